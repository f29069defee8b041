// src/web/handlers/job_handlers.rs
//! Job catalog listing and the match endpoint tying preferences, the
//! latest resume analysis and the catalog together.

use crate::auth::AuthenticatedUser;
use crate::database::{DatabaseConfig, ResumeRepository};
use crate::environment::EnvironmentConfig;
use crate::jobs::load_catalog;
use crate::matching::match_jobs;
use crate::web::types::{ErrorResponse, JobsResponse, MatchesResponse};
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

fn catalog_error() -> Custom<Json<ErrorResponse>> {
    Custom(
        Status::InternalServerError,
        Json(ErrorResponse::new(
            "Job data file not found. Please contact support.".to_string(),
            "CATALOG_ERROR".to_string(),
            vec!["Contact support".to_string()],
        )),
    )
}

pub async fn get_all_jobs_handler(
    environment: &State<EnvironmentConfig>,
) -> Result<Json<JobsResponse>, Custom<Json<ErrorResponse>>> {
    let jobs = match load_catalog(&environment.jobs_catalog_path).await {
        Ok(jobs) => jobs,
        Err(e) => {
            error!("Failed to load job catalog: {:#}", e);
            return Err(catalog_error());
        }
    };

    let total_jobs = jobs.len();
    Ok(Json(JobsResponse {
        message: "All jobs retrieved successfully".to_string(),
        jobs,
        total_jobs,
    }))
}

pub async fn get_job_matches_handler(
    auth: AuthenticatedUser,
    environment: &State<EnvironmentConfig>,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<MatchesResponse>, Custom<Json<ErrorResponse>>> {
    let user = auth.user();

    let pool = match db_config.pool() {
        Ok(pool) => pool,
        Err(e) => {
            error!("Database unavailable: {}", e);
            return Err(Custom(
                Status::InternalServerError,
                Json(ErrorResponse::new(
                    "Failed to retrieve job matches. Please try again.".to_string(),
                    "INTERNAL_ERROR".to_string(),
                    vec!["Try again or contact support".to_string()],
                )),
            ));
        }
    };

    // Matching always runs against the most recently uploaded analysis
    let analysis = match ResumeRepository::new(pool).latest_analysis(user.id).await {
        Ok(Some(analysis)) => analysis,
        Ok(None) => {
            return Err(Custom(
                Status::BadRequest,
                Json(ErrorResponse::new(
                    "No resume found. Please upload a resume first to get job matches."
                        .to_string(),
                    "NO_RESUME".to_string(),
                    vec!["Upload a resume, then request matches again".to_string()],
                )),
            ));
        }
        Err(e) => {
            error!("Failed to load latest analysis: {}", e);
            return Err(Custom(
                Status::InternalServerError,
                Json(ErrorResponse::new(
                    "Failed to retrieve job matches. Please try again.".to_string(),
                    "INTERNAL_ERROR".to_string(),
                    vec!["Try again or contact support".to_string()],
                )),
            ));
        }
    };

    let jobs = match load_catalog(&environment.jobs_catalog_path).await {
        Ok(jobs) => jobs,
        Err(e) => {
            error!("Failed to load job catalog: {:#}", e);
            return Err(catalog_error());
        }
    };

    let preferences = user.preferences();
    let matches = match_jobs(&jobs, &preferences, &analysis);

    info!(
        "Computed {} job matches for {} from a catalog of {}",
        matches.len(),
        user.email,
        jobs.len()
    );

    let total_matches = matches.len();
    Ok(Json(MatchesResponse {
        message: "Job matches retrieved successfully".to_string(),
        matches,
        total_matches,
        user_preferences: preferences,
        resume_analysis: analysis,
    }))
}
