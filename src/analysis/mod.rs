// src/analysis/mod.rs
//! Resume analysis: the Gemini client producing a raw response and the
//! normalizer turning that untrusted response into a valid record.

pub mod gemini;
pub mod normalizer;

use serde::{Deserialize, Serialize};

pub use gemini::GeminiClient;
pub use normalizer::normalize;

/// Validated analysis of a resume. Every field is guaranteed present
/// and well-typed no matter what the external AI service returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysis {
    pub skills: Vec<String>,
    pub suggested_title: String,
    pub seniority: Seniority,
    pub summary: String,
}

/// Closed seniority scale. External input that names anything else is
/// mapped to `Mid` during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seniority {
    Junior,
    Mid,
    Senior,
    Lead,
    Executive,
}

impl Default for Seniority {
    fn default() -> Self {
        Seniority::Mid
    }
}

impl Seniority {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "junior" => Some(Seniority::Junior),
            "mid" => Some(Seniority::Mid),
            "senior" => Some(Seniority::Senior),
            "lead" => Some(Seniority::Lead),
            "executive" => Some(Seniority::Executive),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Seniority::Junior => "junior",
            Seniority::Mid => "mid",
            Seniority::Senior => "senior",
            Seniority::Lead => "lead",
            Seniority::Executive => "executive",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seniority_parses_only_the_closed_set() {
        assert_eq!(Seniority::parse("senior"), Some(Seniority::Senior));
        assert_eq!(Seniority::parse("principal"), None);
        assert_eq!(Seniority::parse("Senior"), None);
        assert_eq!(Seniority::parse(""), None);
    }

    #[test]
    fn test_seniority_serializes_lowercase() {
        let json = serde_json::to_string(&Seniority::Executive).unwrap();
        assert_eq!(json, "\"executive\"");
    }
}
