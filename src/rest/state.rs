use std::sync::Arc;

use crate::commands::models::Command;
use crate::generators::PasswordHasher;
use tokio::sync::mpsc;

#[derive(Clone)]
pub struct AppState {
    pub command_tx: mpsc::Sender<Command>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub default_code_length: usize,
}
