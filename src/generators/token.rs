use base64::{
    engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD},
    Engine as _,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

const TOKEN_SUFFIX_BYTES: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct TokenData {
    #[schema(example = "alice")]
    pub username: String,
    #[serde(rename = "ID")]
    #[schema(example = "42")]
    pub id: String,
    /// Unix seconds at issuance.
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IssuedToken {
    pub token: String,
    pub data: TokenData,
}

/// Builds an opaque bearer token for `username`.
///
/// Layout: URL-safe base64 of `username:<uuid v4>:<uuid v1>` (padded),
/// then 10 random bytes as unpadded URL-safe base64.
pub fn make_token(username: &str, user_id: &str) -> IssuedToken {
    let node_id: [u8; 6] = rand::random();
    let (v4, v1) = (Uuid::new_v4(), Uuid::now_v1(&node_id));

    let mut payload = Vec::with_capacity(username.len() + 34);
    payload.extend_from_slice(username.as_bytes());
    payload.push(b':');
    payload.extend_from_slice(v4.as_bytes());
    payload.push(b':');
    payload.extend_from_slice(v1.as_bytes());

    let suffix: [u8; TOKEN_SUFFIX_BYTES] = rand::random();
    let token = format!("{}{}", URL_SAFE.encode(payload), URL_SAFE_NO_PAD.encode(suffix));

    IssuedToken {
        token,
        data: TokenData {
            username: username.to_string(),
            id: user_id.to_string(),
            timestamp: Utc::now().timestamp(),
        },
    }
}

pub fn new_uuid() -> String {
    Uuid::new_v4().to_string()
}
