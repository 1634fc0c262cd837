use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One issuance, as returned to callers and persisted for auditing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct IssuedCode {
    #[schema(example = "0b8e1c3e-5d0a-4c55-9a4e-2f7f2e0c6d11")]
    pub id: String,
    #[schema(example = "K7Q2ZP")]
    pub code: String,
    /// RFC 3339, UTC.
    #[schema(example = "2024-03-15T10:20:30Z")]
    pub issued_at: String,
}
