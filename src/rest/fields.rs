use std::collections::HashMap;

use axum::{
    extract::{FromRequest, Multipart, Query, Request},
    http::{header, Method},
    Form,
};

use crate::error::MinterError;
use crate::rest::command::CommandError;

const URLENCODED: &str = "application/x-www-form-urlencoded";
const MULTIPART: &str = "multipart/form-data";

/// Named request parameters: form body fields (urlencoded or multipart,
/// file parts excluded) and query string parameters.
#[derive(Debug, Default)]
pub struct RequestFields {
    form: HashMap<String, String>,
    query: HashMap<String, String>,
}

impl RequestFields {
    /// Form value first, then query value. Unless `allow_null` is set an
    /// empty value counts as missing, and a missing field is an error.
    pub fn get_field(&self, key: &str, allow_null: bool) -> Result<Option<String>, MinterError> {
        let usable = |v: &&String| allow_null || !v.is_empty();

        if let Some(value) = self.form.get(key).filter(usable) {
            return Ok(Some(value.clone()));
        }
        if let Some(value) = self.query.get(key).filter(usable) {
            return Ok(Some(value.clone()));
        }

        if allow_null {
            Ok(None)
        } else {
            Err(MinterError::MissingField(key.to_string()))
        }
    }

    pub fn require(&self, key: &str) -> Result<String, MinterError> {
        self.get_field(key, false)?
            .ok_or_else(|| MinterError::MissingField(key.to_string()))
    }

    /// Present and non-empty, or `None`.
    pub fn optional(&self, key: &str) -> Option<String> {
        self.get_field(key, false).ok().flatten()
    }

    /// Parses an optional field; absent or empty yields `None`.
    pub fn optional_parsed<T: std::str::FromStr>(&self, key: &str) -> Result<Option<T>, MinterError> {
        self.optional(key)
            .map(|raw| {
                raw.trim()
                    .parse()
                    .map_err(|_| MinterError::InvalidField(key.to_string(), raw.clone()))
            })
            .transpose()
    }

    #[cfg(test)]
    pub fn from_maps(form: &[(&str, &str)], query: &[(&str, &str)]) -> Self {
        let to_map = |pairs: &[(&str, &str)]| {
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        };
        Self {
            form: to_map(form),
            query: to_map(query),
        }
    }
}

async fn multipart_fields(mut multipart: Multipart) -> Result<HashMap<String, String>, MinterError> {
    let mut fields = HashMap::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| MinterError::MalformedBody(format!("Failed to read multipart field: {}", e)))?
    {
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let value = field
            .text()
            .await
            .map_err(|e| MinterError::MalformedBody(format!("Failed to read field {}: {}", name, e)))?;
        fields.insert(name, value);
    }
    Ok(fields)
}

impl<S> FromRequest<S> for RequestFields
where
    S: Send + Sync,
{
    type Rejection = CommandError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let query = Query::<HashMap<String, String>>::try_from_uri(req.uri())
            .map(|Query(q)| q)
            .map_err(|e| MinterError::MalformedBody(e.body_text()))?;

        if req.method() == Method::GET || req.method() == Method::HEAD {
            return Ok(Self {
                form: HashMap::new(),
                query,
            });
        }

        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let form = if content_type.starts_with(URLENCODED) {
            let Form(form) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| MinterError::MalformedBody(e.body_text()))?;
            form
        } else if content_type.starts_with(MULTIPART) {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| MinterError::MalformedBody(e.body_text()))?;
            multipart_fields(multipart).await?
        } else {
            HashMap::new()
        };

        Ok(Self { form, query })
    }
}
