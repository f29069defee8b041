// src/auth.rs
use crate::database::{DatabaseConfig, User, UserRepository};
use anyhow::{Context, Result};
use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::{Request, State};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

const TOKEN_TTL_DAYS: i64 = 7;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64, // user id
    pub email: String,
    pub exp: usize,
    pub iat: usize,
}

pub struct AuthConfig {
    secret: String,
}

impl AuthConfig {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("JWT_SECRET")
            .context("JWT_SECRET environment variable not set")?;
        Ok(Self::new(secret))
    }

    /// Issue a signed token for the user, valid for 7 days.
    pub fn issue_token(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to sign token")
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .context("Token verification failed")?;

        Ok(data.claims)
    }
}

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| anyhow::anyhow!("Stored password hash is invalid: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[derive(Debug)]
pub enum AuthError {
    Configuration,
    MissingToken,
    InvalidToken,
    UserNotFound,
    Database,
}

/// Request guard: a user identified by a valid `Authorization: Bearer`
/// token whose account still exists.
pub struct AuthenticatedUser {
    pub user: User,
}

impl AuthenticatedUser {
    pub fn user(&self) -> &User {
        &self.user
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthenticatedUser {
    type Error = AuthError;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let auth_config = match req.guard::<&State<AuthConfig>>().await {
            Outcome::Success(config) => config,
            _ => {
                error!("AuthConfig not available in request state");
                return Outcome::Error((Status::InternalServerError, AuthError::Configuration));
            }
        };

        let db_config = match req.guard::<&State<DatabaseConfig>>().await {
            Outcome::Success(config) => config,
            _ => {
                error!("DatabaseConfig not available in request state");
                return Outcome::Error((Status::InternalServerError, AuthError::Configuration));
            }
        };

        let token = match req
            .headers()
            .get_one("Authorization")
            .and_then(|header| header.strip_prefix("Bearer "))
        {
            Some(token) if !token.is_empty() => token,
            _ => return Outcome::Error((Status::Unauthorized, AuthError::MissingToken)),
        };

        let claims = match auth_config.verify_token(token) {
            Ok(claims) => claims,
            Err(e) => {
                warn!("Rejected token: {}", e);
                return Outcome::Error((Status::Unauthorized, AuthError::InvalidToken));
            }
        };

        let pool = match db_config.pool() {
            Ok(pool) => pool,
            Err(e) => {
                error!("Database pool unavailable: {}", e);
                return Outcome::Error((Status::InternalServerError, AuthError::Database));
            }
        };

        match UserRepository::new(pool).find_by_id(claims.sub).await {
            Ok(Some(user)) => Outcome::Success(AuthenticatedUser { user }),
            Ok(None) => Outcome::Error((Status::Unauthorized, AuthError::UserNotFound)),
            Err(e) => {
                error!("Failed to load user for token: {}", e);
                Outcome::Error((Status::InternalServerError, AuthError::Database))
            }
        }
    }
}
