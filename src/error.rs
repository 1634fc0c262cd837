use thiserror::Error;

#[derive(Debug, Error)]
pub enum MinterError {
    #[error("Code space exhausted after {0} attempts")]
    Exhausted(u64),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Malformed password hash: {0}")]
    MalformedHash(String),

    #[error("Invalid date: {0}")]
    DateParse(String),

    #[error("Invalid date format string: {0}")]
    DateFormat(String),

    #[error("Date out of range")]
    DateOverflow,

    #[error("Missing {0} field in the request")]
    MissingField(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidField(String, String),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),
}
