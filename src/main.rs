mod commands;
mod config;
mod dates;
mod error;
mod generators;
mod rest;
mod statics;
mod storage;
mod threads;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum_server::Handle;
use clap::Parser;
use log::{debug, error, info};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::commands::models::Command;
use crate::config::Config;
use crate::generators::{AlphanumericGenerator, BcryptHasher, CodeGenerator};
use crate::rest::state::AppState;
use crate::statics::shutdown::{global_cancellation_token, request_shutdown};
use crate::storage::{IssuedCodeStore, SqliteCodeStore};
use crate::threads::handler::{ConcreteHandler, Handler};

#[derive(OpenApi)]
#[openapi(
    paths(
        rest::codes::generate_code,
        rest::codes::list_codes,
        rest::codes::check_code,
        rest::tokens::issue_token,
        rest::passwords::hash_password,
        rest::passwords::verify_password,
        rest::dates::resolve_date,
    ),
    components(schemas(
        storage::models::IssuedCode,
        generators::TokenData,
        generators::IssuedToken,
        generators::HashedPassword,
        rest::passwords::VerifyResult,
        rest::dates::DateResult,
        rest::command::ApiResponse<String>,
        rest::command::ApiResponse<storage::models::IssuedCode>,
        rest::command::ApiResponse<Vec<String>>,
    )),
    tags(
        (name = "codes", description = "Unique code issuance"),
        (name = "tokens", description = "Bearer token issuance"),
        (name = "passwords", description = "Password hashing and verification"),
        (name = "dates", description = "Date parsing and formatting")
    ),
    info(
        title = "Codeminter API",
        version = "1.0.0",
        description = "Unique codes, bearer tokens, password hashes and date helpers"
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    env_logger::init();
    let config = Config::parse();
    info!("Starting up");
    debug!("{:?}", config);

    let store = SqliteCodeStore::new(&config.db_path).expect("Failed to open database");
    store.init().expect("Failed to initialise database");

    let seeded = store.load_codes().expect("Failed to load issued codes");
    let codes = CodeGenerator::<AlphanumericGenerator>::default().with_issued(seeded);
    if codes.is_empty() {
        info!("No codes issued yet");
    } else {
        info!("Loaded {} previously issued codes", codes.len());
    }

    let (tx, rx) = mpsc::channel::<Command>(128);

    let app_state = AppState {
        command_tx: tx,
        hasher: Arc::new(BcryptHasher::new(config.bcrypt_cost)),
        default_code_length: config.code_length,
    };

    ctrlc::set_handler(request_shutdown).expect("Error setting Ctrl-C handler");

    let max_attempts = config.max_attempts;
    tokio::spawn(async move {
        let mut handler = ConcreteHandler::new(codes, store, rx, max_attempts);
        handler.main_loop().await;
    });

    let app = rest::api_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let handle: Handle<SocketAddr> = Handle::new();
    info!("Listening on http://{}", addr);

    tokio::spawn(shutdown_axum(global_cancellation_token(), handle.clone()));

    if let Err(e) = axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await
    {
        error!("Server error: {}", e);
    }
    info!("Shutting down");
}

async fn shutdown_axum(token: CancellationToken, handle: Handle<SocketAddr>) {
    token.cancelled().await;
    debug!("Shutting down axum server.");
    handle.graceful_shutdown(Some(Duration::from_secs(10)));
}
