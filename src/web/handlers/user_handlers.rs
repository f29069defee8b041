// src/web/handlers/user_handlers.rs
//! Profile retrieval and preference updates. The preference write path
//! owns salary-range validation; the matcher trusts what it stores.

use crate::auth::AuthenticatedUser;
use crate::database::{DatabaseConfig, PreferencesUpdate, UserRepository};
use crate::web::types::{ErrorResponse, PreferencesRequest, ProfileResponse, UserInfo};
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

pub async fn get_profile_handler(auth: AuthenticatedUser) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        message: "Profile retrieved successfully".to_string(),
        user: UserInfo::from(auth.user()),
    })
}

pub async fn update_preferences_handler(
    request: Json<PreferencesRequest>,
    auth: AuthenticatedUser,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<ProfileResponse>, Custom<Json<ErrorResponse>>> {
    if let Some(range) = request.salary_range {
        if range.min < 0 || range.max < 0 {
            return Err(Custom(
                Status::BadRequest,
                Json(ErrorResponse::new(
                    "Salary values cannot be negative".to_string(),
                    "INVALID_SALARY_RANGE".to_string(),
                    vec!["Use non-negative salary bounds".to_string()],
                )),
            ));
        }
        if range.min > range.max {
            return Err(Custom(
                Status::BadRequest,
                Json(ErrorResponse::new(
                    "Minimum salary cannot be greater than maximum salary".to_string(),
                    "INVALID_SALARY_RANGE".to_string(),
                    vec!["Swap the salary bounds".to_string()],
                )),
            ));
        }
    }

    let pool = match db_config.pool() {
        Ok(pool) => pool,
        Err(e) => {
            error!("Database unavailable: {}", e);
            return Err(Custom(
                Status::InternalServerError,
                Json(ErrorResponse::new(
                    "Failed to update preferences".to_string(),
                    "INTERNAL_ERROR".to_string(),
                    vec!["Try again or contact support".to_string()],
                )),
            ));
        }
    };

    let update = PreferencesUpdate {
        preferred_role: request.preferred_role.clone(),
        location: request.location.clone(),
        salary_range: request.salary_range,
    };

    let user = match UserRepository::new(pool)
        .update_preferences(auth.user().id, update)
        .await
    {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Err(Custom(
                Status::NotFound,
                Json(ErrorResponse::new(
                    "User not found".to_string(),
                    "USER_NOT_FOUND".to_string(),
                    vec!["Log in again".to_string()],
                )),
            ));
        }
        Err(e) => {
            error!("Failed to update preferences: {}", e);
            return Err(Custom(
                Status::InternalServerError,
                Json(ErrorResponse::new(
                    "Failed to update preferences".to_string(),
                    "INTERNAL_ERROR".to_string(),
                    vec!["Try again or contact support".to_string()],
                )),
            ));
        }
    };

    info!("Updated preferences for {}", user.email);

    Ok(Json(ProfileResponse {
        message: "Preferences updated successfully".to_string(),
        user: UserInfo::from(&user),
    }))
}
