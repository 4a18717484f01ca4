// Screening: keyword match scoring, templated answers and per-analysis sessions.
// The service module orchestrates document processing and these pieces;
// handlers expose them over HTTP.

pub mod answer;
pub mod handlers;
pub mod keywords;
pub mod match_scoring;
pub mod service;
pub mod session;
