use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::generators::{make_token, IssuedToken};
use crate::rest::command::{ApiResponse, CommandError};
use crate::rest::fields::RequestFields;

#[utoipa::path(
    post,
    path = "/api/v1/tokens",
    description = "Issue an opaque bearer token for a user together with its metadata record.",
    request_body(content_type = "application/x-www-form-urlencoded", description = "Fields `username` and `user_id`; query parameters are accepted too"),
    responses(
        (status = 200, description = "Token and metadata", body = ApiResponse<IssuedToken>),
        (status = 400, description = "Missing username or user_id", body = ApiResponse<String>)
    ),
    tag = "tokens"
)]
pub async fn issue_token(fields: RequestFields) -> Result<impl IntoResponse, CommandError> {
    let username = fields.require("username")?;
    let user_id = fields.require("user_id")?;

    let issued = make_token(&username, &user_id);
    log::info!("Issued token for user {}", issued.data.username);

    Ok((StatusCode::OK, Json(ApiResponse::ok(issued))))
}
