// src/lib.rs
//! Job-search assistant backend: users upload a PDF resume, the text
//! is analyzed by Gemini, normalized into a strict profile, and scored
//! against a static job catalog to produce ranked matches.

pub mod analysis;
pub mod auth;
pub mod database;
pub mod environment;
pub mod jobs;
pub mod matching;
pub mod resume;
pub mod web;

pub use analysis::{normalize, GeminiClient, ResumeAnalysis, Seniority};
pub use environment::EnvironmentConfig;
pub use matching::{check_salary_match, match_jobs, Job, MatchedJob, SalaryRange, UserPreferences};
pub use web::start_web_server;
