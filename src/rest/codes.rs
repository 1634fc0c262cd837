use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::commands::models::Command;
use crate::error::MinterError;
use crate::rest::command::{send_command, ApiResponse, CommandError};
use crate::rest::fields::RequestFields;
use crate::rest::state::AppState;
use crate::storage::models::IssuedCode;

pub const MAX_CODE_LENGTH: usize = 64;

fn requested_length(fields: &RequestFields, default: usize) -> Result<usize, MinterError> {
    let length = fields.optional_parsed::<usize>("length")?.unwrap_or(default);
    if !(1..=MAX_CODE_LENGTH).contains(&length) {
        return Err(MinterError::InvalidField(
            "length".to_string(),
            format!("{} is outside 1..={}", length, MAX_CODE_LENGTH),
        ));
    }
    Ok(length)
}

#[utoipa::path(
    post,
    path = "/api/v1/codes",
    description = "Issue a new code made of uppercase letters and digits. The code is guaranteed never to have been issued before by this service.",
    params(
        ("length" = Option<usize>, Query, description = "Code length (1-64). Also accepted as a form field. Defaults to the configured length.")
    ),
    responses(
        (status = 200, description = "Freshly issued code", body = ApiResponse<IssuedCode>),
        (status = 400, description = "Invalid length", body = ApiResponse<String>),
        (status = 503, description = "No unused code of that length could be found, or handler unavailable", body = ApiResponse<String>)
    ),
    tag = "codes"
)]
pub async fn generate_code(
    State(state): State<AppState>,
    fields: RequestFields,
) -> Result<impl IntoResponse, CommandError> {
    let length = requested_length(&fields, state.default_code_length)?;

    let issued = send_command(&state, |tx| Command::GenerateCode {
        length,
        response: tx,
    })
    .await?;

    Ok((StatusCode::OK, Json(ApiResponse::ok(issued))))
}

#[utoipa::path(
    get,
    path = "/api/v1/codes",
    description = "List every issued code, oldest first, including codes loaded from the database at start-up.",
    responses(
        (status = 200, description = "Issued codes in issuance order", body = ApiResponse<Vec<String>>),
        (status = 503, description = "Handler unavailable", body = ApiResponse<String>)
    ),
    tag = "codes"
)]
pub async fn list_codes(State(state): State<AppState>) -> Result<impl IntoResponse, CommandError> {
    let codes = send_command(&state, |tx| Command::ListCodes { response: tx }).await?;

    Ok((StatusCode::OK, Json(ApiResponse::ok(codes))))
}

#[utoipa::path(
    get,
    path = "/api/v1/codes/{code}",
    description = "Check whether a code has been issued.",
    params(
        ("code" = String, Path, description = "Code to look up")
    ),
    responses(
        (status = 200, description = "Code has been issued", body = ApiResponse<bool>),
        (status = 404, description = "Code was never issued", body = ApiResponse<bool>),
        (status = 503, description = "Handler unavailable", body = ApiResponse<String>)
    ),
    tag = "codes"
)]
pub async fn check_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, CommandError> {
    let issued = send_command(&state, |tx| Command::CheckCode { code, response: tx }).await?;

    if issued {
        Ok((StatusCode::OK, Json(ApiResponse::ok(true))))
    } else {
        Ok((StatusCode::NOT_FOUND, Json(ApiResponse::<bool>::not_found())))
    }
}
