// src/web/types.rs
use crate::analysis::ResumeAnalysis;
use crate::database::User;
use crate::matching::{Job, MatchedJob, SalaryRange, UserPreferences};
use chrono::{DateTime, Utc};
use rocket::form::FromForm;
use rocket::fs::TempFile;
use rocket::serde::{Deserialize, Serialize};

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
}

impl ErrorResponse {
    pub fn new(error: String, error_code: String, suggestions: Vec<String>) -> Self {
        Self {
            success: false,
            error,
            error_code,
            suggestions,
        }
    }
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public view of a user - everything except the password hash.
#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct UserInfo {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub preferred_role: String,
    pub location: String,
    pub salary_range: Option<SalaryRange>,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        let preferences = user.preferences();
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            preferred_role: preferences.preferred_role,
            location: preferences.location,
            salary_range: preferences.salary_range,
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: UserInfo,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ProfileResponse {
    pub message: String,
    pub user: UserInfo,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct PreferencesRequest {
    pub preferred_role: Option<String>,
    pub location: Option<String>,
    pub salary_range: Option<SalaryRange>,
}

#[derive(FromForm)]
pub struct ResumeUploadForm<'f> {
    pub resume: TempFile<'f>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct ExtractedInfo {
    pub text_length: usize,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    pub resume_id: i64,
    pub analysis: ResumeAnalysis,
    pub extracted_info: ExtractedInfo,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct ResumeListItem {
    pub id: i64,
    pub file_path: String,
    pub analysis: Option<ResumeAnalysis>,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ResumeListResponse {
    pub message: String,
    pub resumes: Vec<ResumeListItem>,
    pub count: usize,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct ResumeDetails {
    pub id: i64,
    pub file_path: String,
    pub extracted_text: String,
    pub analysis: Option<ResumeAnalysis>,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ResumeDetailsResponse {
    pub message: String,
    pub resume: ResumeDetails,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct JobsResponse {
    pub message: String,
    pub jobs: Vec<Job>,
    pub total_jobs: usize,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct MatchesResponse {
    pub message: String,
    pub matches: Vec<MatchedJob>,
    pub total_matches: usize,
    pub user_preferences: UserPreferences,
    pub resume_analysis: ResumeAnalysis,
}
