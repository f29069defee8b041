// src/environment.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub data_path: PathBuf,
    pub database_path: PathBuf,
    pub jobs_catalog_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: EnvironmentConfig,
    production: EnvironmentConfig,
}

impl EnvironmentConfig {
    /// Load configuration based on environment
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        Self::load_from_file(&environment)
    }

    fn get_environment() -> String {
        std::env::var("JOBSCOUT_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_from_file(environment: &str) -> Result<Self> {
        let config_path = PathBuf::from("config.yaml");
        if !config_path.exists() {
            anyhow::bail!(
                "config.yaml not found in current directory. Server cannot start without configuration."
            );
        }

        let config_content =
            std::fs::read_to_string(&config_path).context("Failed to read config.yaml")?;

        let config_file: ConfigFile =
            serde_yaml::from_str(&config_content).context("Failed to parse config.yaml")?;

        let env_config = match environment {
            "production" => config_file.production,
            _ => config_file.local,
        };

        // Make paths absolute
        Ok(Self {
            data_path: Self::resolve_path(&env_config.data_path)?,
            database_path: Self::resolve_path(&env_config.database_path)?,
            jobs_catalog_path: Self::resolve_path(&env_config.jobs_catalog_path)?,
        })
    }

    fn resolve_path(path: &PathBuf) -> Result<PathBuf> {
        if path.is_absolute() {
            Ok(path.clone())
        } else {
            let current_dir = std::env::current_dir().context("Failed to get current directory")?;
            Ok(current_dir.join(path))
        }
    }

    /// Ensure all configured directories exist
    pub async fn ensure_directories(&self) -> Result<()> {
        let mut dirs = vec![self.data_path.clone()];
        if let Some(parent) = self.database_path.parent() {
            dirs.push(parent.to_path_buf());
        }

        for dir in dirs {
            if !dir.exists() {
                tokio::fs::create_dir_all(&dir)
                    .await
                    .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
                info!("Created directory: {}", dir.display());
            }
        }

        Ok(())
    }

    /// Directory where a user's uploaded resume files live.
    pub fn user_resume_dir(&self, user_id: i64) -> PathBuf {
        self.data_path.join("resumes").join(user_id.to_string())
    }
}
