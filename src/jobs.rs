// src/jobs.rs
//! Static job catalog loader. The catalog is a JSON array of postings
//! shipped with the deployment; a malformed catalog degrades to an
//! empty one instead of failing the request.

use crate::matching::Job;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use tracing::warn;

/// Load the job catalog from `path`.
///
/// The file must exist and contain valid JSON. A top-level value that
/// is not an array, or individual entries that are not objects, are
/// logged and treated as absent rather than propagated as errors.
pub async fn load_catalog(path: &Path) -> Result<Vec<Job>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read job catalog: {}", path.display()))?;

    let value: Value = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse job catalog: {}", path.display()))?;

    let items = match value {
        Value::Array(items) => items,
        _ => {
            warn!("Job catalog is not a JSON array, treating it as empty");
            return Ok(Vec::new());
        }
    };

    let jobs = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Job>(item) {
            Ok(job) => Some(job),
            Err(e) => {
                warn!("Skipping malformed job catalog entry: {}", e);
                None
            }
        })
        .collect();

    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn write_catalog(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.json");
        tokio::fs::write(&path, content).await.unwrap();
        (dir, path)
    }

    #[tokio::test]
    async fn test_catalog_round_trips_known_and_extra_fields() {
        let (_dir, path) = write_catalog(
            r#"[{"id": 1, "title": "Backend Engineer", "company": "Acme",
                 "description": "d", "requirements": "r",
                 "location": "Remote", "salary": "$90,000"}]"#,
        )
        .await;

        let jobs = load_catalog(&path).await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Backend Engineer");
        assert_eq!(jobs[0].extra["company"], "Acme");
    }

    #[tokio::test]
    async fn test_non_array_catalog_is_empty() {
        let (_dir, path) = write_catalog(r#"{"jobs": []}"#).await;
        let jobs = load_catalog(&path).await.unwrap();
        assert!(jobs.is_empty());
    }

    #[tokio::test]
    async fn test_missing_fields_default_to_empty_strings() {
        let (_dir, path) = write_catalog(r#"[{"title": "Engineer"}]"#).await;
        let jobs = load_catalog(&path).await.unwrap();
        assert_eq!(jobs[0].title, "Engineer");
        assert_eq!(jobs[0].salary, "");
        assert_eq!(jobs[0].location, "");
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_catalog(&dir.path().join("nope.json")).await;
        assert!(result.is_err());
    }
}
