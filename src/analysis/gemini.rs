// src/analysis/gemini.rs
//! Client for the Gemini generateContent API.
//!
//! Any failure here - unconfigured key, network error, quota, response
//! body that is not the expected shape - surfaces as "no usable
//! response" (`None`). The normalizer owns the fallback; the request
//! path never sees an error from this client.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};

const GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ContentPart>>,
}

#[derive(Deserialize)]
struct ContentPart {
    text: Option<String>,
}

pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
}

impl GeminiClient {
    /// Create the client. `api_key` is `None` when `GEMINI_API_KEY` is
    /// unset; the client then always reports "no usable response".
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, api_key })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(std::env::var("GEMINI_API_KEY").ok())
    }

    /// Ask Gemini for a structured analysis of the resume text.
    /// Returns the raw response text, or `None` when nothing usable
    /// came back.
    pub async fn analyze_resume(&self, resume_text: &str) -> Option<String> {
        let api_key = match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => {
                warn!("GEMINI_API_KEY not configured, skipping AI analysis");
                return None;
            }
        };

        if resume_text.trim().is_empty() {
            warn!("Resume text is empty, skipping AI analysis");
            return None;
        }

        match self.request_analysis(api_key, resume_text).await {
            Ok(text) => {
                info!("Received Gemini analysis ({} bytes)", text.len());
                Some(text)
            }
            Err(e) => {
                error!("Gemini analysis failed: {:#}", e);
                None
            }
        }
    }

    async fn request_analysis(&self, api_key: &str, resume_text: &str) -> Result<String> {
        let url = format!("{}?key={}", GEMINI_API_URL, api_key);
        let body = json!({
            "contents": [{
                "parts": [{
                    "text": build_prompt(resume_text)
                }]
            }]
        });

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .context("Failed to send request to Gemini API")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Gemini API returned {}: {}", status, error_text);
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse Gemini API response body")?;

        extract_text(parsed).context("Gemini response is missing the expected text content")
    }
}

/// Pull `candidates[0].content.parts[0].text` out of the response.
fn extract_text(response: GenerateContentResponse) -> Option<String> {
    response
        .candidates?
        .into_iter()
        .next()?
        .content?
        .parts?
        .into_iter()
        .next()?
        .text
}

fn build_prompt(resume_text: &str) -> String {
    format!(
        r#"
Analyze this resume text and return a JSON response with exactly this structure:
{{
  "skills": ["skill1", "skill2", "skill3", "skill4", "skill5"],
  "suggestedTitle": "Job Title",
  "seniority": "junior|mid|senior|lead|executive",
  "summary": "Brief professional summary in 2-3 sentences"
}}

Requirements:
- Extract exactly 5 most relevant technical skills
- Suggest the most appropriate job title based on experience
- Determine seniority level based on years of experience and responsibilities
- Create a concise professional summary highlighting key strengths

Resume text:
{}

Return only valid JSON without any additional text or formatting."#,
        resume_text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_walks_the_candidate_path() {
        let raw = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"text": "{\"skills\": []}"}]
                }
            }]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(extract_text(parsed).as_deref(), Some("{\"skills\": []}"));
    }

    #[test]
    fn test_extract_text_handles_missing_levels() {
        for raw in ["{}", r#"{"candidates": []}"#, r#"{"candidates": [{}]}"#] {
            let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
            assert!(extract_text(parsed).is_none(), "case {}", raw);
        }
    }

    #[test]
    fn test_prompt_embeds_the_resume_text() {
        let prompt = build_prompt("Ten years of Rust.");
        assert!(prompt.contains("Ten years of Rust."));
        assert!(prompt.contains("junior|mid|senior|lead|executive"));
    }

    #[tokio::test]
    async fn test_missing_key_yields_no_response() {
        let client = GeminiClient::new(None).unwrap();
        assert!(client.analyze_resume("some resume").await.is_none());
    }

    #[tokio::test]
    async fn test_empty_resume_yields_no_response() {
        let client = GeminiClient::new(Some("key".to_string())).unwrap();
        assert!(client.analyze_resume("   ").await.is_none());
    }
}
