// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use types::*;

use crate::analysis::GeminiClient;
use crate::auth::{AuthConfig, AuthenticatedUser};
use crate::database::DatabaseConfig;
use crate::environment::EnvironmentConfig;
use anyhow::Result;
use rocket::data::{Limits, ToByteUnit};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::form::Form;
use rocket::http::Header;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::{get, options, patch, post, routes, Request, Response, State};
use tracing::info;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, PATCH, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

#[post("/auth/register", data = "<request>")]
pub async fn register(
    request: Json<RegisterRequest>,
    auth_config: &State<AuthConfig>,
    db_config: &State<DatabaseConfig>,
) -> Result<Custom<Json<AuthResponse>>, Custom<Json<ErrorResponse>>> {
    handlers::register_handler(request, auth_config, db_config).await
}

#[post("/auth/login", data = "<request>")]
pub async fn login(
    request: Json<LoginRequest>,
    auth_config: &State<AuthConfig>,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<AuthResponse>, Custom<Json<ErrorResponse>>> {
    handlers::login_handler(request, auth_config, db_config).await
}

#[get("/users/profile")]
pub async fn get_profile(auth: AuthenticatedUser) -> Json<ProfileResponse> {
    handlers::get_profile_handler(auth).await
}

#[patch("/users/preferences", data = "<request>")]
pub async fn update_preferences(
    request: Json<PreferencesRequest>,
    auth: AuthenticatedUser,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<ProfileResponse>, Custom<Json<ErrorResponse>>> {
    handlers::update_preferences_handler(request, auth, db_config).await
}

#[post("/resumes/upload", data = "<upload>")]
pub async fn upload_resume(
    upload: Form<ResumeUploadForm<'_>>,
    auth: AuthenticatedUser,
    environment: &State<EnvironmentConfig>,
    gemini: &State<GeminiClient>,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<UploadResponse>, Custom<Json<ErrorResponse>>> {
    handlers::upload_resume_handler(upload, auth, environment, gemini, db_config).await
}

#[get("/resumes")]
pub async fn list_resumes(
    auth: AuthenticatedUser,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<ResumeListResponse>, Custom<Json<ErrorResponse>>> {
    handlers::list_resumes_handler(auth, db_config).await
}

#[get("/resumes/<resume_id>")]
pub async fn get_resume(
    resume_id: i64,
    auth: AuthenticatedUser,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<ResumeDetailsResponse>, Custom<Json<ErrorResponse>>> {
    handlers::get_resume_handler(resume_id, auth, db_config).await
}

#[get("/jobs")]
pub async fn get_all_jobs(
    environment: &State<EnvironmentConfig>,
) -> Result<Json<JobsResponse>, Custom<Json<ErrorResponse>>> {
    handlers::get_all_jobs_handler(environment).await
}

#[get("/jobs/matches")]
pub async fn get_job_matches(
    auth: AuthenticatedUser,
    environment: &State<EnvironmentConfig>,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<MatchesResponse>, Custom<Json<ErrorResponse>>> {
    handlers::get_job_matches_handler(auth, environment, db_config).await
}

#[get("/health")]
pub fn health() -> &'static str {
    "OK"
}

// Preflight requests for the CORS fairing
#[options("/<_..>")]
pub fn all_options() {}

/// Build and launch the Rocket server with all shared state managed.
pub async fn start_web_server(
    environment: EnvironmentConfig,
    port: u16,
) -> Result<()> {
    let mut db_config = DatabaseConfig::new(environment.database_path.clone());
    db_config.init_pool().await?;
    db_config.migrate().await?;

    let auth_config = AuthConfig::from_env()?;
    let gemini = GeminiClient::from_env()?;

    let limits = Limits::default()
        .limit("file", 10.mebibytes())
        .limit("data-form", 10.mebibytes());

    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("address", "0.0.0.0"))
        .merge(("limits", limits));

    info!("Mounting API routes on /api");

    rocket::custom(figment)
        .attach(Cors)
        .manage(environment)
        .manage(db_config)
        .manage(auth_config)
        .manage(gemini)
        .mount(
            "/api",
            routes![
                register,
                login,
                get_profile,
                update_preferences,
                upload_resume,
                list_resumes,
                get_resume,
                get_all_jobs,
                get_job_matches,
                health,
                all_options,
            ],
        )
        .launch()
        .await?;

    Ok(())
}
