use crate::commands::models::Command;
use crate::error::MinterError;
use crate::generators::{new_uuid, CodeGenerator, ValueGenerator};
use crate::statics::shutdown::global_cancellation_token;
use crate::storage::models::IssuedCode;
use crate::storage::IssuedCodeStore;
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use log::{debug, info, warn};
use tokio::sync::mpsc::Receiver;
use tokio_util::sync::CancellationToken;

/// Owns the code registry. Commands are processed one at a time, which is
/// what makes the registry's check-then-insert safe.
#[async_trait]
pub trait Handler<G, S>: Send
where
    G: ValueGenerator<Args = usize, Value = String>,
    S: IssuedCodeStore,
{
    fn new(codes: CodeGenerator<G>, store: S, rx: Receiver<Command>, max_attempts: u64) -> Self;
    async fn main_loop(&mut self);
}

pub struct ConcreteHandler<G, S>
where
    G: ValueGenerator<Args = usize, Value = String>,
    S: IssuedCodeStore,
{
    codes: CodeGenerator<G>,
    store: S,
    rx: Receiver<Command>,
    // 0 means retry without bound.
    max_attempts: u64,
    cancel_token: CancellationToken,
}

#[async_trait]
impl<G, S> Handler<G, S> for ConcreteHandler<G, S>
where
    G: ValueGenerator<Args = usize, Value = String>,
    S: IssuedCodeStore,
{
    fn new(codes: CodeGenerator<G>, store: S, rx: Receiver<Command>, max_attempts: u64) -> Self {
        Self {
            codes,
            store,
            rx,
            max_attempts,
            cancel_token: global_cancellation_token(),
        }
    }

    async fn main_loop(&mut self) {
        loop {
            tokio::select! {
                _ = self.cancel_token.cancelled() => {
                    debug!("Handler task cancelled. Shutting down.");
                    break;
                }

                cmd_option = self.rx.recv() => {
                    match cmd_option {
                        Some(cmd) => self.handle_command(cmd),
                        None => break,
                    }
                }
            }
        }
    }
}

impl<G, S> ConcreteHandler<G, S>
where
    G: ValueGenerator<Args = usize, Value = String>,
    S: IssuedCodeStore,
{
    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::GenerateCode { length, response } => {
                let _ = response.send(self.handle_generate(length));
            }

            Command::ListCodes { response } => {
                let _ = response.send(Ok(self.codes.issued().to_vec()));
            }

            Command::CheckCode { code, response } => {
                let _ = response.send(Ok(self.codes.contains(&code)));
            }
        }
    }

    fn handle_generate(&mut self, length: usize) -> Result<IssuedCode, MinterError> {
        let code = if self.max_attempts == 0 {
            self.codes.generate(&length)
        } else {
            self.codes
                .try_generate(&length, self.max_attempts)
                .inspect_err(|_| warn!("No fresh code of length {} after {} attempts", length, self.max_attempts))?
        };

        let issued = IssuedCode {
            id: new_uuid(),
            code,
            issued_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        };

        // The code stays registered in memory even if this fails, so it is
        // still never handed out twice by this process.
        self.store.record_code(&issued)?;

        info!("Issued code {} ({} issued so far)", issued.code, self.codes.len());
        Ok(issued)
    }

    #[cfg(test)]
    pub fn new_with_token(
        codes: CodeGenerator<G>,
        store: S,
        rx: Receiver<Command>,
        max_attempts: u64,
        cancel_token: CancellationToken,
    ) -> Self {
        Self {
            codes,
            store,
            rx,
            max_attempts,
            cancel_token,
        }
    }

    #[cfg(test)]
    pub fn process_command(&mut self, cmd: Command) {
        self.handle_command(cmd);
    }
}
