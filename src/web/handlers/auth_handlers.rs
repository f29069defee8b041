// src/web/handlers/auth_handlers.rs
//! Registration and login.

use crate::auth::{hash_password, verify_password, AuthConfig};
use crate::database::{DatabaseConfig, UserRepository};
use crate::web::types::{AuthResponse, ErrorResponse, LoginRequest, RegisterRequest, UserInfo};
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

const MIN_PASSWORD_LENGTH: usize = 6;

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

pub async fn register_handler(
    request: Json<RegisterRequest>,
    auth_config: &State<AuthConfig>,
    db_config: &State<DatabaseConfig>,
) -> Result<Custom<Json<AuthResponse>>, Custom<Json<ErrorResponse>>> {
    let name = request.name.trim();
    let email = request.email.trim().to_lowercase();

    if name.is_empty() || email.is_empty() || request.password.is_empty() {
        return Err(Custom(
            Status::BadRequest,
            Json(ErrorResponse::new(
                "All fields are required (name, email, password)".to_string(),
                "MISSING_FIELDS".to_string(),
                vec!["Provide name, email and password".to_string()],
            )),
        ));
    }

    if request.password.len() < MIN_PASSWORD_LENGTH {
        return Err(Custom(
            Status::BadRequest,
            Json(ErrorResponse::new(
                "Password must be at least 6 characters long".to_string(),
                "PASSWORD_TOO_SHORT".to_string(),
                vec!["Choose a longer password".to_string()],
            )),
        ));
    }

    let pool = match db_config.pool() {
        Ok(pool) => pool,
        Err(e) => {
            error!("Database unavailable: {}", e);
            return Err(internal_error("Registration failed. Please try again."));
        }
    };
    let repository = UserRepository::new(pool);

    match repository.find_by_email(&email).await {
        Ok(Some(_)) => {
            return Err(Custom(
                Status::BadRequest,
                Json(ErrorResponse::new(
                    "User with this email already exists".to_string(),
                    "EMAIL_TAKEN".to_string(),
                    vec!["Log in instead, or use a different email".to_string()],
                )),
            ));
        }
        Ok(None) => {}
        Err(e) => {
            error!("Failed to check existing user: {}", e);
            return Err(internal_error("Registration failed. Please try again."));
        }
    }

    let password_hash = match hash_password(&request.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Password hashing failed: {}", e);
            return Err(internal_error("Registration failed. Please try again."));
        }
    };

    let user = match repository.create(name, &email, &password_hash).await {
        Ok(user) => user,
        Err(e) => {
            error!("Failed to create user: {}", e);
            return Err(internal_error("Registration failed. Please try again."));
        }
    };

    let token = match auth_config.issue_token(&user) {
        Ok(token) => token,
        Err(e) => {
            error!("Failed to issue token: {}", e);
            return Err(internal_error("Registration failed. Please try again."));
        }
    };

    info!("Registered new user: {}", user.email);

    Ok(Custom(
        Status::Created,
        Json(AuthResponse {
            message: "User registered successfully".to_string(),
            token,
            user: UserInfo::from(&user),
        }),
    ))
}

pub async fn login_handler(
    request: Json<LoginRequest>,
    auth_config: &State<AuthConfig>,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<AuthResponse>, Custom<Json<ErrorResponse>>> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(Custom(
            Status::BadRequest,
            Json(ErrorResponse::new(
                "Email and password are required".to_string(),
                "MISSING_FIELDS".to_string(),
                vec!["Provide email and password".to_string()],
            )),
        ));
    }

    let invalid_credentials = || {
        Custom(
            Status::Unauthorized,
            Json(ErrorResponse::new(
                "Invalid email or password".to_string(),
                "INVALID_CREDENTIALS".to_string(),
                vec!["Check your email and password".to_string()],
            )),
        )
    };

    let pool = match db_config.pool() {
        Ok(pool) => pool,
        Err(e) => {
            error!("Database unavailable: {}", e);
            return Err(internal_error("Login failed. Please try again."));
        }
    };

    let user = match UserRepository::new(pool).find_by_email(&request.email).await {
        Ok(Some(user)) => user,
        Ok(None) => return Err(invalid_credentials()),
        Err(e) => {
            error!("Failed to look up user: {}", e);
            return Err(internal_error("Login failed. Please try again."));
        }
    };

    match verify_password(&request.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => return Err(invalid_credentials()),
        Err(e) => {
            error!("Password verification failed for {}: {}", user.email, e);
            return Err(internal_error("Login failed. Please try again."));
        }
    }

    let token = match auth_config.issue_token(&user) {
        Ok(token) => token,
        Err(e) => {
            error!("Failed to issue token: {}", e);
            return Err(internal_error("Login failed. Please try again."));
        }
    };

    info!("User logged in: {}", user.email);

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        user: UserInfo::from(&user),
    }))
}
