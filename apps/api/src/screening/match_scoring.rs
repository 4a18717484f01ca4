//! Match Scoring — pluggable, trait-based scorer that measures a resume against a job description.
//!
//! Default: `KeywordMatchScorer` (pure-Rust, fast, deterministic, fully testable).
//!
//! `AppState` holds an `Arc<dyn MatchScorer>`, chosen at startup.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::screening::keywords::extract_keywords;

const MAX_STRENGTHS: usize = 5;
const MAX_GAPS: usize = 3;

pub const STRONG_FIT_ASSESSMENT: &str = "This candidate is an excellent match for the role, with strong alignment between their skills and the job requirements.";
pub const MODERATE_FIT_ASSESSMENT: &str = "This candidate shows moderate fit for the role. They have some key qualifications but are missing some important skills.";
pub const POOR_FIT_ASSESSMENT: &str = "This candidate may not be the best fit for this role. There are significant gaps between their experience and the job requirements.";

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub score: u8,              // 0 – 100
    pub strengths: Vec<String>, // at most 5
    pub gaps: Vec<String>,      // at most 3
    pub assessment: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The match scorer trait. Implement this to swap backends without touching
/// the service or handler code.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    async fn score(&self, resume_text: &str, job_description: &str)
        -> Result<MatchReport, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordMatchScorer — default implementation
// ────────────────────────────────────────────────────────────────────────────

/// Keyword-overlap scorer. No I/O.
///
/// Algorithm:
/// 1. Extract up to 15 frequent long keywords from the job description
/// 2. A keyword matches if it appears anywhere in the resume (case-insensitive)
/// 3. score = round(100 × matched / total), 0 when there are no keywords
/// 4. Band the score: ≥75 strong, 50–74 moderate, <50 poor
pub struct KeywordMatchScorer;

#[async_trait]
impl MatchScorer for KeywordMatchScorer {
    async fn score(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<MatchReport, AppError> {
        Ok(compute_keyword_match(resume_text, job_description))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core keyword match algorithm
// ────────────────────────────────────────────────────────────────────────────

pub fn compute_keyword_match(resume_text: &str, job_description: &str) -> MatchReport {
    let keywords = extract_keywords(job_description);
    let resume_lower = resume_text.to_lowercase();

    let mut strengths = Vec::new();
    let mut gaps = Vec::new();
    let mut matched = 0usize;

    for keyword in &keywords {
        if resume_lower.contains(&keyword.to_lowercase()) {
            matched += 1;
            if strengths.len() < MAX_STRENGTHS {
                strengths.push(format!("Experience with {keyword}"));
            }
        } else if gaps.len() < MAX_GAPS {
            gaps.push(format!("No mention of {keyword}"));
        }
    }

    let score = percentage(matched, keywords.len());

    MatchReport {
        score,
        strengths,
        gaps,
        assessment: build_assessment(score).to_string(),
    }
}

fn percentage(matched: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((matched as f64 / total as f64) * 100.0).round().clamp(0.0, 100.0) as u8
}

fn build_assessment(score: u8) -> &'static str {
    if score >= 75 {
        STRONG_FIT_ASSESSMENT
    } else if score >= 50 {
        MODERATE_FIT_ASSESSMENT
    } else {
        POOR_FIT_ASSESSMENT
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_keyword_full_match() {
        let report = compute_keyword_match(
            "Worked extensively with kubernetes clusters",
            "Requires: kubernetes kubernetes kubernetes experience",
        );
        assert_eq!(report.score, 100);
        assert_eq!(report.strengths, vec!["Experience with kubernetes"]);
        assert!(report.gaps.is_empty());
        assert_eq!(report.assessment, STRONG_FIT_ASSESSMENT);
    }

    #[test]
    fn test_empty_keywords_returns_zero_score() {
        let report = compute_keyword_match("Anything at all", "short words only here");
        assert_eq!(report.score, 0);
        assert!(report.strengths.is_empty());
        assert!(report.gaps.is_empty());
        assert_eq!(report.assessment, POOR_FIT_ASSESSMENT);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let report = compute_keyword_match("Deep KUBERNETES knowledge", "kubernetes kubernetes");
        assert_eq!(report.score, 100);
    }

    #[test]
    fn test_counts_follow_matched_and_missing() {
        // 8 keywords, resume mentions 6 of them.
        let words = [
            "terraform", "ansible", "kubernetes", "postgres", "grafana", "jenkins", "clickhouse",
            "cassandra",
        ];
        let jd = format!("{} {}", words.join(" "), words.join(" "));
        let resume = "terraform ansible kubernetes postgres grafana jenkins";

        let report = compute_keyword_match(resume, &jd);
        assert_eq!(report.score, 75); // round(600 / 8)
        assert_eq!(report.strengths.len(), 5); // min(6, 5)
        assert_eq!(report.gaps.len(), 2); // min(2, 3)
        assert_eq!(report.gaps[0], "No mention of clickhouse");
    }

    #[test]
    fn test_gaps_capped_at_three() {
        let jd = "alpha1 alpha1 bravo2 bravo2 charlie3 charlie3 delta44 delta44";
        let report = compute_keyword_match("nothing relevant", jd);
        assert_eq!(report.score, 0);
        assert_eq!(report.gaps.len(), 3);
        assert!(report.strengths.is_empty());
    }

    #[test]
    fn test_score_rounds_to_nearest() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13); // 12.5 rounds up
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn test_assessment_bands() {
        assert_eq!(build_assessment(100), STRONG_FIT_ASSESSMENT);
        assert_eq!(build_assessment(75), STRONG_FIT_ASSESSMENT);
        assert_eq!(build_assessment(74), MODERATE_FIT_ASSESSMENT);
        assert_eq!(build_assessment(50), MODERATE_FIT_ASSESSMENT);
        assert_eq!(build_assessment(49), POOR_FIT_ASSESSMENT);
        assert_eq!(build_assessment(0), POOR_FIT_ASSESSMENT);
    }

    #[tokio::test]
    async fn test_trait_object_delegates_to_keyword_algorithm() {
        let scorer: Box<dyn MatchScorer> = Box::new(KeywordMatchScorer);
        let report = scorer
            .score("kubernetes everywhere", "kubernetes kubernetes")
            .await
            .unwrap();
        assert_eq!(report.score, 100);
    }
}
