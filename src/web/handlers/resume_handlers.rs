// src/web/handlers/resume_handlers.rs
//! Resume upload and retrieval. Upload is the pipeline: store the PDF,
//! extract its text, ask Gemini for an analysis, normalize whatever
//! came back, persist the result.

use crate::analysis::{normalize, GeminiClient};
use crate::auth::AuthenticatedUser;
use crate::database::{DatabaseConfig, ResumeRepository};
use crate::environment::EnvironmentConfig;
use crate::resume::extract_text_from_pdf;
use crate::web::types::{
    ErrorResponse, ExtractedInfo, ResumeDetails, ResumeDetailsResponse, ResumeListItem,
    ResumeListResponse, ResumeUploadForm, UploadResponse,
};
use rocket::form::Form;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info, warn};

const MAX_RESUME_SIZE: u64 = 5 * 1024 * 1024;

fn internal_error(error: &str) -> Custom<Json<ErrorResponse>> {
    Custom(
        Status::InternalServerError,
        Json(ErrorResponse::new(
            error.to_string(),
            "INTERNAL_ERROR".to_string(),
            vec!["Try again or contact support".to_string()],
        )),
    )
}

pub async fn upload_resume_handler(
    mut upload: Form<ResumeUploadForm<'_>>,
    auth: AuthenticatedUser,
    environment: &State<EnvironmentConfig>,
    gemini: &State<GeminiClient>,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<UploadResponse>, Custom<Json<ErrorResponse>>> {
    let user = auth.user();
    info!("User {} uploading resume", user.email);

    let is_pdf = upload.resume.content_type().map_or(false, |ct| ct.is_pdf());
    if !is_pdf {
        return Err(Custom(
            Status::BadRequest,
            Json(ErrorResponse::new(
                "Only PDF files are allowed".to_string(),
                "INVALID_FORMAT".to_string(),
                vec!["Upload your resume as a PDF file (.pdf)".to_string()],
            )),
        ));
    }

    if upload.resume.len() > MAX_RESUME_SIZE {
        return Err(Custom(
            Status::BadRequest,
            Json(ErrorResponse::new(
                "File too large. Maximum size is 5MB.".to_string(),
                "FILE_TOO_LARGE".to_string(),
                vec!["Compress the PDF or upload a smaller file".to_string()],
            )),
        ));
    }

    // Store the PDF under the user's resume directory
    let resume_dir = environment.user_resume_dir(user.id);
    if let Err(e) = tokio::fs::create_dir_all(&resume_dir).await {
        error!("Failed to create resume directory: {}", e);
        return Err(internal_error("Resume upload failed. Please try again."));
    }

    let file_path = resume_dir.join(format!("{}.pdf", uuid::Uuid::new_v4()));
    if let Err(e) = upload.resume.persist_to(&file_path).await {
        error!("Failed to persist uploaded resume: {}", e);
        return Err(internal_error("Resume upload failed. Please try again."));
    }

    let extracted_text = match extract_text_from_pdf(&file_path).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Resume text extraction failed: {:#}", e);
            let _ = tokio::fs::remove_file(&file_path).await;
            return Err(Custom(
                Status::BadRequest,
                Json(ErrorResponse::new(
                    "Could not extract text from PDF. Please ensure the PDF contains readable text."
                        .to_string(),
                    "UNREADABLE_PDF".to_string(),
                    vec!["Export the resume as a text-based PDF, not a scan".to_string()],
                )),
            ));
        }
    };

    // The Gemini call degrades to None on any failure; normalization
    // always yields a complete analysis.
    let raw_response = gemini.analyze_resume(&extracted_text).await;
    let analysis = normalize(raw_response.as_deref(), &extracted_text);

    let pool = match db_config.pool() {
        Ok(pool) => pool,
        Err(e) => {
            error!("Database unavailable: {}", e);
            return Err(internal_error("Resume upload failed. Please try again."));
        }
    };

    let resume = match ResumeRepository::new(pool)
        .insert(
            user.id,
            &file_path.display().to_string(),
            &extracted_text,
            &analysis,
        )
        .await
    {
        Ok(resume) => resume,
        Err(e) => {
            error!("Failed to store resume: {}", e);
            return Err(internal_error("Resume upload failed. Please try again."));
        }
    };

    info!(
        "Resume {} uploaded and analyzed for {}",
        resume.id, user.email
    );

    Ok(Json(UploadResponse {
        message: "Resume uploaded and analyzed successfully".to_string(),
        resume_id: resume.id,
        analysis,
        extracted_info: ExtractedInfo {
            text_length: extracted_text.len(),
        },
    }))
}

pub async fn list_resumes_handler(
    auth: AuthenticatedUser,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<ResumeListResponse>, Custom<Json<ErrorResponse>>> {
    let pool = match db_config.pool() {
        Ok(pool) => pool,
        Err(e) => {
            error!("Database unavailable: {}", e);
            return Err(internal_error("Failed to retrieve resumes"));
        }
    };

    let summaries = match ResumeRepository::new(pool).list_for_user(auth.user().id).await {
        Ok(summaries) => summaries,
        Err(e) => {
            error!("Failed to list resumes: {}", e);
            return Err(internal_error("Failed to retrieve resumes"));
        }
    };

    let resumes: Vec<ResumeListItem> = summaries
        .into_iter()
        .map(|summary| ResumeListItem {
            id: summary.id,
            file_path: summary.file_path,
            analysis: serde_json::from_str(&summary.analysis).ok(),
            uploaded_at: summary.uploaded_at,
        })
        .collect();

    let count = resumes.len();
    Ok(Json(ResumeListResponse {
        message: "Resumes retrieved successfully".to_string(),
        resumes,
        count,
    }))
}

pub async fn get_resume_handler(
    resume_id: i64,
    auth: AuthenticatedUser,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<ResumeDetailsResponse>, Custom<Json<ErrorResponse>>> {
    let pool = match db_config.pool() {
        Ok(pool) => pool,
        Err(e) => {
            error!("Database unavailable: {}", e);
            return Err(internal_error("Failed to retrieve resume details"));
        }
    };

    let resume = match ResumeRepository::new(pool)
        .find_for_user(resume_id, auth.user().id)
        .await
    {
        Ok(Some(resume)) => resume,
        Ok(None) => {
            return Err(Custom(
                Status::NotFound,
                Json(ErrorResponse::new(
                    "Resume not found".to_string(),
                    "RESUME_NOT_FOUND".to_string(),
                    vec!["Check the resume id".to_string()],
                )),
            ));
        }
        Err(e) => {
            error!("Failed to query resume: {}", e);
            return Err(internal_error("Failed to retrieve resume details"));
        }
    };

    let analysis = serde_json::from_str(&resume.analysis).ok();
    Ok(Json(ResumeDetailsResponse {
        message: "Resume details retrieved successfully".to_string(),
        resume: ResumeDetails {
            id: resume.id,
            file_path: resume.file_path,
            extracted_text: resume.extracted_text,
            analysis,
            uploaded_at: resume.uploaded_at,
        },
    }))
}
