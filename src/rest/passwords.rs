use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::MinterError;
use crate::generators::HashedPassword;
use crate::rest::command::{ApiResponse, CommandError};
use crate::rest::fields::RequestFields;
use crate::rest::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyResult {
    pub valid: bool,
}

/// bcrypt is deliberately slow; keep it off the async workers.
async fn blocking<T, F>(f: F) -> Result<T, MinterError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, MinterError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| MinterError::Hashing(format!("Hashing task failed: {}", e)))?
}

#[utoipa::path(
    post,
    path = "/api/v1/passwords/hash",
    description = "Hash a password with bcrypt and a fresh salt. Both values are returned base64 encoded.",
    request_body(content_type = "application/x-www-form-urlencoded", description = "Field `password`"),
    responses(
        (status = 200, description = "Hash and salt", body = ApiResponse<HashedPassword>),
        (status = 400, description = "Missing password", body = ApiResponse<String>),
        (status = 500, description = "Hashing failed", body = ApiResponse<String>)
    ),
    tag = "passwords"
)]
pub async fn hash_password(
    State(state): State<AppState>,
    fields: RequestFields,
) -> Result<impl IntoResponse, CommandError> {
    let password = fields.require("password")?;
    let hasher = state.hasher.clone();

    let hashed = blocking(move || hasher.hash_password(&password)).await?;

    Ok((StatusCode::OK, Json(ApiResponse::ok(hashed))))
}

#[utoipa::path(
    post,
    path = "/api/v1/passwords/verify",
    description = "Check a password against a hash previously returned by /api/v1/passwords/hash.",
    request_body(content_type = "application/x-www-form-urlencoded", description = "Fields `password` and `hash`"),
    responses(
        (status = 200, description = "Whether the password matches", body = ApiResponse<VerifyResult>),
        (status = 400, description = "Missing field or malformed hash", body = ApiResponse<String>)
    ),
    tag = "passwords"
)]
pub async fn verify_password(
    State(state): State<AppState>,
    fields: RequestFields,
) -> Result<impl IntoResponse, CommandError> {
    let password = fields.require("password")?;
    let hash = fields.require("hash")?;
    let hasher = state.hasher.clone();

    let valid = blocking(move || hasher.verify_password(&password, &hash)).await?;

    Ok((StatusCode::OK, Json(ApiResponse::ok(VerifyResult { valid }))))
}
