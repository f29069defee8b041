// src/analysis/normalizer.rs
//! Turns the raw Gemini response into a validated `ResumeAnalysis`.
//!
//! The external service is unreliable: it can time out, return prose
//! around the JSON, wrap it in Markdown fences, drop fields, or mistype
//! them. Normalization never fails - anything unusable degrades to a
//! deterministic keyword-based fallback derived from the resume text.

use super::{ResumeAnalysis, Seniority};
use serde_json::Value;
use tracing::warn;

const MAX_SKILLS: usize = 5;
const DEFAULT_TITLE: &str = "Professional";
const DEFAULT_SUMMARY: &str = "Experienced professional with strong technical background.";
const FALLBACK_SUMMARY: &str =
    "Experienced professional with diverse technical skills and strong background in their field.";

/// Reference vocabulary for the keyword fallback, searched in order.
const SKILL_VOCABULARY: &[&str] = &[
    "JavaScript",
    "Python",
    "Java",
    "React",
    "Node.js",
    "HTML",
    "CSS",
    "SQL",
    "MongoDB",
    "Express",
    "Angular",
    "Vue",
    "TypeScript",
    "AWS",
    "Docker",
    "Git",
    "REST API",
    "GraphQL",
    "Redux",
    "Spring Boot",
    "Django",
    "Flask",
];

/// Normalize a raw AI response into a complete, valid analysis.
///
/// `raw` is `None` when the external call produced no usable response
/// (missing key, network failure, malformed body). `source_text` is the
/// extracted resume text the fallback skill search runs against.
pub fn normalize(raw: Option<&str>, source_text: &str) -> ResumeAnalysis {
    let parsed = match raw {
        Some(text) => match parse_response(text) {
            Some(value) => value,
            None => {
                warn!("Gemini response was not valid JSON, using fallback analysis");
                return fallback_analysis(source_text);
            }
        },
        None => return fallback_analysis(source_text),
    };

    ResumeAnalysis {
        skills: sanitize_skills(parsed.get("skills"), source_text),
        suggested_title: sanitize_title(parsed.get("suggestedTitle")),
        seniority: sanitize_seniority(parsed.get("seniority")),
        summary: sanitize_summary(parsed.get("summary")),
    }
}

/// Strip Markdown code fences the model likes to wrap its JSON in,
/// then parse.
fn parse_response(raw: &str) -> Option<Value> {
    let cleaned = raw.replace("```json", "").replace("```", "");
    serde_json::from_str(cleaned.trim()).ok()
}

/// Deterministic analysis used when the AI response is absent or
/// unparseable.
fn fallback_analysis(source_text: &str) -> ResumeAnalysis {
    ResumeAnalysis {
        skills: fallback_skills(source_text),
        suggested_title: DEFAULT_TITLE.to_string(),
        seniority: Seniority::Mid,
        summary: FALLBACK_SUMMARY.to_string(),
    }
}

/// Case-insensitive vocabulary search over the resume text, collected
/// in vocabulary order, capped at `MAX_SKILLS`.
fn fallback_skills(source_text: &str) -> Vec<String> {
    let haystack = source_text.to_uppercase();
    SKILL_VOCABULARY
        .iter()
        .filter(|skill| haystack.contains(&skill.to_uppercase()))
        .take(MAX_SKILLS)
        .map(|skill| skill.to_string())
        .collect()
}

fn sanitize_skills(value: Option<&Value>, source_text: &str) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .filter(|skill| !skill.is_empty())
            .take(MAX_SKILLS)
            .map(|skill| skill.to_string())
            .collect(),
        _ => fallback_skills(source_text),
    }
}

fn sanitize_title(value: Option<&Value>) -> String {
    match value.and_then(Value::as_str) {
        Some(title) if !title.trim().is_empty() => title.trim().to_string(),
        _ => DEFAULT_TITLE.to_string(),
    }
}

fn sanitize_seniority(value: Option<&Value>) -> Seniority {
    value
        .and_then(Value::as_str)
        .and_then(Seniority::parse)
        .unwrap_or_default()
}

fn sanitize_summary(value: Option<&Value>) -> String {
    match value.and_then(Value::as_str) {
        Some(summary) if !summary.trim().is_empty() => summary.trim().to_string(),
        _ => DEFAULT_SUMMARY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Built services in Python and SQL, deployed with Docker on AWS.";

    #[test]
    fn test_well_formed_response_passes_through() {
        let raw = r#"{
            "skills": ["Rust", "Go", "Kubernetes"],
            "suggestedTitle": "Platform Engineer",
            "seniority": "senior",
            "summary": "Seasoned platform engineer."
        }"#;
        let result = normalize(Some(raw), RESUME);

        assert_eq!(result.skills, vec!["Rust", "Go", "Kubernetes"]);
        assert_eq!(result.suggested_title, "Platform Engineer");
        assert_eq!(result.seniority, Seniority::Senior);
        assert_eq!(result.summary, "Seasoned platform engineer.");
    }

    #[test]
    fn test_code_fences_are_stripped() {
        let raw = "```json\n{\"skills\": [\"Rust\"], \"suggestedTitle\": \"Engineer\", \"seniority\": \"lead\", \"summary\": \"s\"}\n```";
        let result = normalize(Some(raw), RESUME);
        assert_eq!(result.skills, vec!["Rust"]);
        assert_eq!(result.seniority, Seniority::Lead);
    }

    #[test]
    fn test_absent_response_falls_back_to_vocabulary() {
        let result = normalize(None, RESUME);

        assert_eq!(result.skills, vec!["Python", "SQL", "AWS", "Docker"]);
        assert_eq!(result.suggested_title, "Professional");
        assert_eq!(result.seniority, Seniority::Mid);
        assert!(!result.summary.is_empty());
    }

    #[test]
    fn test_non_json_response_falls_back() {
        let result = normalize(Some("I'm sorry, I can't do that."), RESUME);
        assert_eq!(result.suggested_title, "Professional");
        assert_eq!(result.skills, vec!["Python", "SQL", "AWS", "Docker"]);
    }

    #[test]
    fn test_fallback_caps_at_five_skills_in_vocabulary_order() {
        let text = "JavaScript Python Java React Node.js HTML CSS SQL";
        let result = normalize(None, text);
        assert_eq!(
            result.skills,
            vec!["JavaScript", "Python", "Java", "React", "Node.js"]
        );
    }

    #[test]
    fn test_seven_skills_truncate_to_five_preserving_order() {
        let raw = r#"{
            "skills": ["A", "B", "C", "D", "E", "F", "G"],
            "suggestedTitle": "Engineer",
            "seniority": "mid",
            "summary": "s"
        }"#;
        let result = normalize(Some(raw), RESUME);
        assert_eq!(result.skills, vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_wrong_typed_fields_are_substituted() {
        let raw = r#"{
            "skills": "Python, SQL",
            "suggestedTitle": 42,
            "seniority": "principal",
            "summary": null
        }"#;
        let result = normalize(Some(raw), RESUME);

        // non-array skills fall back to the vocabulary search
        assert_eq!(result.skills, vec!["Python", "SQL", "AWS", "Docker"]);
        assert_eq!(result.suggested_title, "Professional");
        assert_eq!(result.seniority, Seniority::Mid);
        assert_eq!(result.summary, DEFAULT_SUMMARY);
    }

    #[test]
    fn test_empty_skill_entries_are_dropped() {
        let raw = r#"{
            "skills": ["Rust", "", "Go", 3, "Kubernetes"],
            "suggestedTitle": "Engineer",
            "seniority": "mid",
            "summary": "s"
        }"#;
        let result = normalize(Some(raw), RESUME);
        assert_eq!(result.skills, vec!["Rust", "Go", "Kubernetes"]);
    }

    #[test]
    fn test_title_and_summary_are_trimmed() {
        let raw = r#"{
            "skills": ["Rust"],
            "suggestedTitle": "  Staff Engineer  ",
            "seniority": "lead",
            "summary": "  Short summary.  "
        }"#;
        let result = normalize(Some(raw), RESUME);
        assert_eq!(result.suggested_title, "Staff Engineer");
        assert_eq!(result.summary, "Short summary.");
    }

    #[test]
    fn test_output_shape_holds_for_arbitrary_garbage() {
        let cases: &[Option<&str>] = &[
            None,
            Some(""),
            Some("{}"),
            Some("[]"),
            Some("null"),
            Some("{\"seniority\": \"CEO\"}"),
            Some("{\"skills\": [1, 2, 3]}"),
        ];
        for raw in cases {
            let result = normalize(*raw, RESUME);
            assert!(result.skills.len() <= 5, "case {:?}", raw);
            assert!(result.skills.iter().all(|s| !s.is_empty()), "case {:?}", raw);
            assert!(!result.suggested_title.is_empty(), "case {:?}", raw);
            assert!(!result.summary.is_empty(), "case {:?}", raw);
        }
    }
}
