pub mod codes;
pub mod command;
pub mod dates;
pub mod fields;
pub mod passwords;
pub mod state;
pub mod tokens;

use axum::{
    routing::{get, post},
    Router,
};

use crate::rest::state::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/codes", post(codes::generate_code).get(codes::list_codes))
        .route("/api/v1/codes/{code}", get(codes::check_code))
        .route("/api/v1/tokens", post(tokens::issue_token))
        .route("/api/v1/passwords/hash", post(passwords::hash_password))
        .route("/api/v1/passwords/verify", post(passwords::verify_password))
        .route("/api/v1/dates", get(dates::resolve_date))
        .with_state(state)
}
