// src/resume.rs
//! Resume text extraction from uploaded PDF files.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Extract the text content of a PDF resume.
///
/// `pdf-extract` is synchronous, so the work runs on a blocking thread.
/// A PDF without any readable text is an error - the caller reports it
/// to the user instead of analyzing an empty document.
pub async fn extract_text_from_pdf(path: &Path) -> Result<String> {
    let owned = path.to_path_buf();
    let raw = tokio::task::spawn_blocking(move || pdf_extract::extract_text(&owned))
        .await
        .context("PDF extraction task failed")?
        .context("Failed to parse PDF")?;

    let text = clean_extracted_text(&raw);
    if text.is_empty() {
        anyhow::bail!("No text content found in PDF");
    }

    info!("Extracted {} characters of resume text", text.len());
    Ok(text)
}

/// Collapse runs of whitespace (including the layout-driven newlines
/// PDF extraction produces) into single spaces and trim the ends.
pub fn clean_extracted_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_collapses_whitespace_runs() {
        assert_eq!(
            clean_extracted_text("  Jane\n\nDoe \t Software   Engineer \n"),
            "Jane Doe Software Engineer"
        );
    }

    #[test]
    fn test_clean_of_blank_input_is_empty() {
        assert_eq!(clean_extracted_text("   \n \t "), "");
    }
}
