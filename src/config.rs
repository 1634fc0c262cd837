use clap::builder::TypedValueParser;
use clap::Parser;

use crate::generators::DEFAULT_CODE_LENGTH;

/// Runtime settings. Every flag can also come from its environment variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "codeminter", version, about = "Issues unique codes, tokens and password hashes over HTTP")]
pub struct Config {
    #[arg(long, env = "CODEMINTER_PORT", default_value_t = 3000)]
    pub port: u16,

    /// SQLite file holding every code issued so far.
    #[arg(long, env = "CODEMINTER_DB", default_value = "codeminter.db")]
    pub db_path: String,

    /// Length used when a request does not ask for one.
    #[arg(
        long,
        env = "CODEMINTER_CODE_LENGTH",
        default_value_t = DEFAULT_CODE_LENGTH,
        value_parser = clap::value_parser!(u16).range(1..=64).map(usize::from)
    )]
    pub code_length: usize,

    /// Candidates drawn before a request fails. 0 retries forever.
    #[arg(long, env = "CODEMINTER_MAX_ATTEMPTS", default_value_t = 10_000)]
    pub max_attempts: u64,

    #[arg(
        long,
        env = "CODEMINTER_BCRYPT_COST",
        default_value_t = bcrypt::DEFAULT_COST,
        value_parser = clap::value_parser!(u32).range(4..=31)
    )]
    pub bcrypt_cost: u32,
}
