// src/database.rs
use crate::analysis::ResumeAnalysis;
use crate::matching::{SalaryRange, UserPreferences};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub preferred_role: String,
    pub location: String,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// The matching preferences stored on the user row. The salary
    /// range only exists when both bounds were set.
    pub fn preferences(&self) -> UserPreferences {
        UserPreferences {
            preferred_role: self.preferred_role.clone(),
            location: self.location.clone(),
            salary_range: match (self.salary_min, self.salary_max) {
                (Some(min), Some(max)) => Some(SalaryRange { min, max }),
                _ => None,
            },
        }
    }
}

/// A stored resume. `analysis` holds the normalized `ResumeAnalysis`
/// as JSON text.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Resume {
    pub id: i64,
    pub user_id: i64,
    pub file_path: String,
    pub extracted_text: String,
    pub analysis: String,
    pub uploaded_at: DateTime<Utc>,
}

impl Resume {
    pub fn parse_analysis(&self) -> Result<ResumeAnalysis> {
        serde_json::from_str(&self.analysis).context("Failed to parse stored resume analysis")
    }
}

/// Listing view of a resume - excludes the large extracted text.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ResumeSummary {
    pub id: i64,
    pub file_path: String,
    pub analysis: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Partial preference update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct PreferencesUpdate {
    pub preferred_role: Option<String>,
    pub location: Option<String>,
    pub salary_range: Option<SalaryRange>,
}

#[derive(Debug)]
pub struct DatabaseConfig {
    pub database_path: PathBuf,
    pub pool: Option<SqlitePool>,
}

impl DatabaseConfig {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            database_path,
            pool: None,
        }
    }

    /// Initialize the database connection pool
    pub async fn init_pool(&mut self) -> Result<()> {
        if let Some(parent) = self.database_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create database directory")?;
        }

        let database_url = format!("sqlite:{}?mode=rwc", self.database_path.display());
        let pool = SqlitePool::connect(&database_url)
            .await
            .context("Failed to connect to SQLite database")?;
        self.pool = Some(pool);

        info!("Database connection pool initialized: {}", database_url);
        Ok(())
    }

    /// Get the database pool
    pub fn pool(&self) -> Result<&SqlitePool> {
        self.pool
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Database pool not initialized. Call init_pool() first."))
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        let pool = self.pool()?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                preferred_role TEXT NOT NULL DEFAULT '',
                location TEXT NOT NULL DEFAULT '',
                salary_min INTEGER,
                salary_max INTEGER,
                created_at TEXT NOT NULL DEFAULT (datetime('now')),
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_users_email
            ON users(email);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS resumes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id),
                file_path TEXT NOT NULL,
                extracted_text TEXT NOT NULL,
                analysis TEXT NOT NULL,
                uploaded_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_resumes_user_uploaded
            ON resumes(user_id, uploaded_at);
            "#,
        )
        .execute(pool)
        .await?;

        info!("Database migrations completed successfully");
        Ok(())
    }
}

pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Find user by email (stored lowercased)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, preferred_role, location,
                   salary_min, salary_max, created_at, updated_at
            FROM users WHERE email = ?
            "#,
        )
        .bind(email.trim().to_lowercase())
        .fetch_optional(self.pool)
        .await
        .context("Failed to query user by email")?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, preferred_role, location,
                   salary_min, salary_max, created_at, updated_at
            FROM users WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .context("Failed to query user by id")?;

        Ok(user)
    }

    pub async fn create(&self, name: &str, email: &str, password_hash: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES (?, ?, ?)
            RETURNING id, name, email, password_hash, preferred_role, location,
                      salary_min, salary_max, created_at, updated_at
            "#,
        )
        .bind(name.trim())
        .bind(email.trim().to_lowercase())
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .context("Failed to create user")?;

        info!("Created user: {}", user.email);
        Ok(user)
    }

    /// Apply a partial preference update and return the fresh row.
    pub async fn update_preferences(
        &self,
        id: i64,
        update: PreferencesUpdate,
    ) -> Result<Option<User>> {
        let current = match self.find_by_id(id).await? {
            Some(user) => user,
            None => return Ok(None),
        };

        let preferred_role = update
            .preferred_role
            .map(|role| role.trim().to_string())
            .unwrap_or(current.preferred_role);
        let location = update
            .location
            .map(|location| location.trim().to_string())
            .unwrap_or(current.location);
        let (salary_min, salary_max) = match update.salary_range {
            Some(range) => (Some(range.min), Some(range.max)),
            None => (current.salary_min, current.salary_max),
        };

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET preferred_role = ?, location = ?, salary_min = ?, salary_max = ?,
                updated_at = datetime('now')
            WHERE id = ?
            RETURNING id, name, email, password_hash, preferred_role, location,
                      salary_min, salary_max, created_at, updated_at
            "#,
        )
        .bind(preferred_role)
        .bind(location)
        .bind(salary_min)
        .bind(salary_max)
        .bind(id)
        .fetch_one(self.pool)
        .await
        .context("Failed to update user preferences")?;

        Ok(Some(user))
    }
}

pub struct ResumeRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ResumeRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        user_id: i64,
        file_path: &str,
        extracted_text: &str,
        analysis: &ResumeAnalysis,
    ) -> Result<Resume> {
        let analysis_json =
            serde_json::to_string(analysis).context("Failed to serialize resume analysis")?;

        let resume = sqlx::query_as::<_, Resume>(
            r#"
            INSERT INTO resumes (user_id, file_path, extracted_text, analysis)
            VALUES (?, ?, ?, ?)
            RETURNING id, user_id, file_path, extracted_text, analysis, uploaded_at
            "#,
        )
        .bind(user_id)
        .bind(file_path)
        .bind(extracted_text)
        .bind(analysis_json)
        .fetch_one(self.pool)
        .await
        .context("Failed to insert resume")?;

        info!("Stored resume {} for user {}", resume.id, user_id);
        Ok(resume)
    }

    /// All resumes of a user, newest first, without the extracted text.
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<ResumeSummary>> {
        let resumes = sqlx::query_as::<_, ResumeSummary>(
            r#"
            SELECT id, file_path, analysis, uploaded_at
            FROM resumes
            WHERE user_id = ?
            ORDER BY uploaded_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await
        .context("Failed to list resumes")?;

        Ok(resumes)
    }

    pub async fn find_for_user(&self, id: i64, user_id: i64) -> Result<Option<Resume>> {
        let resume = sqlx::query_as::<_, Resume>(
            r#"
            SELECT id, user_id, file_path, extracted_text, analysis, uploaded_at
            FROM resumes
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await
        .context("Failed to query resume")?;

        Ok(resume)
    }

    /// The analysis of the most recently uploaded resume, if any.
    /// Matching always runs against this one.
    pub async fn latest_analysis(&self, user_id: i64) -> Result<Option<ResumeAnalysis>> {
        let resume = sqlx::query_as::<_, Resume>(
            r#"
            SELECT id, user_id, file_path, extracted_text, analysis, uploaded_at
            FROM resumes
            WHERE user_id = ?
            ORDER BY uploaded_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await
        .context("Failed to query latest resume")?;

        match resume {
            Some(resume) => Ok(Some(resume.parse_analysis()?)),
            None => Ok(None),
        }
    }
}
