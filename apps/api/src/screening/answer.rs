//! Answer synthesis for follow-up questions about a candidate.
//!
//! Rules are evaluated in order against the lowercased question; the first
//! rule whose predicate holds produces the answer. Questions no rule claims
//! are answered from the retrieved resume chunks.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::screening::keywords::extract_keywords;

const CONTEXT_PREVIEW_CHARS: usize = 200;
const FALLBACK_KEYWORDS: usize = 3;
const DEFAULT_RULE: &str = "retrieved_context";

static DEGREE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:bs|ba|ms|ma|phd|bachelor|master|degree)\s+(?:in|of)?\s+[^.\n]+")
        .expect("degree pattern is valid")
});

static YEARS_OF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+)\s+years?\s+of\s+([^.\n]+)").expect("experience pattern is valid")
});

/// Everything a rule may look at.
pub struct AnswerContext<'a> {
    pub question: &'a str,
    pub retrieved_chunks: &'a [String],
    pub resume_text: &'a str,
    pub job_description: &'a str,
}

struct AnswerRule {
    name: &'static str,
    applies: fn(&str) -> bool,
    respond: fn(&AnswerContext<'_>) -> String,
}

const RULES: &[AnswerRule] = &[
    AnswerRule {
        name: "education",
        applies: asks_about_education,
        respond: answer_education,
    },
    AnswerRule {
        name: "experience",
        applies: asks_about_experience,
        respond: answer_experience,
    },
];

/// Produces an answer for `question` from the retrieved resume chunks and the
/// two source documents. Returns the answer and the name of the rule that fired.
pub fn synthesize_answer(ctx: &AnswerContext<'_>) -> (String, &'static str) {
    let question = ctx.question.to_lowercase();
    match RULES.iter().find(|rule| (rule.applies)(&question)) {
        Some(rule) => ((rule.respond)(ctx), rule.name),
        None => (answer_from_context(ctx), DEFAULT_RULE),
    }
}

fn asks_about_education(question: &str) -> bool {
    ["degree", "education", "university"]
        .iter()
        .any(|term| question.contains(term))
}

fn asks_about_experience(question: &str) -> bool {
    question.contains("experience")
}

fn answer_education(ctx: &AnswerContext<'_>) -> String {
    if ctx.resume_text.to_lowercase().contains("degree") {
        if let Some(found) = DEGREE.find(ctx.resume_text) {
            return format!(
                "Yes, the candidate has education credentials. Specifically: \"{}\".",
                found.as_str().trim()
            );
        }
    }
    "No explicit degree information found in the resume.".to_string()
}

fn answer_experience(ctx: &AnswerContext<'_>) -> String {
    if ctx.resume_text.to_lowercase().contains("years") {
        if let Some(caps) = YEARS_OF.captures(ctx.resume_text) {
            let years = &caps[1];
            let field = caps[2].trim();
            return format!("The candidate has {years} years of {field}.");
        }
    }
    "Experience details are available in the resume. Based on the background provided.".to_string()
}

fn answer_from_context(ctx: &AnswerContext<'_>) -> String {
    let context = ctx.retrieved_chunks.join("\n");
    if context.trim().is_empty() {
        return answer_without_context(ctx.job_description);
    }

    let preview: String = context.chars().take(CONTEXT_PREVIEW_CHARS).collect();
    format!(
        "Based on the resume information: {preview}... This relates to your question about the candidate's qualifications."
    )
}

fn answer_without_context(job_description: &str) -> String {
    let mut answer = "Based on the resume and job description analysis, I cannot find specific information to directly answer that question.".to_string();

    let focus: Vec<String> = extract_keywords(job_description)
        .into_iter()
        .take(FALLBACK_KEYWORDS)
        .collect();
    if !focus.is_empty() {
        answer.push_str(&format!(
            " The job description emphasizes {}; try asking about those directly.",
            focus.join(", ")
        ));
    }

    answer
}
