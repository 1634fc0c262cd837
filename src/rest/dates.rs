use axum::{http::StatusCode, response::IntoResponse, Json};
use chrono::{SecondsFormat, TimeDelta};
use serde::Serialize;
use utoipa::ToSchema;

use crate::dates::{format_date, modify_date, parse_date};
use crate::error::MinterError;
use crate::rest::command::{ApiResponse, CommandError};
use crate::rest::fields::RequestFields;

const DEFAULT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

#[derive(Debug, Serialize, ToSchema)]
pub struct DateResult {
    /// RFC 3339, UTC.
    #[schema(example = "2024-03-16T10:20:30Z")]
    pub timestamp: String,
    #[schema(example = "2024-03-16T10:20:30+00:00")]
    pub formatted: String,
}

fn offset(fields: &RequestFields) -> Result<TimeDelta, MinterError> {
    let days = fields.optional_parsed::<i64>("days")?.unwrap_or(0);
    let seconds = fields.optional_parsed::<i64>("seconds")?.unwrap_or(0);

    let days = TimeDelta::try_days(days)
        .ok_or_else(|| MinterError::InvalidField("days".to_string(), days.to_string()))?;
    let seconds = TimeDelta::try_seconds(seconds)
        .ok_or_else(|| MinterError::InvalidField("seconds".to_string(), seconds.to_string()))?;
    days.checked_add(&seconds).ok_or(MinterError::DateOverflow)
}

fn resolve(fields: &RequestFields) -> Result<DateResult, MinterError> {
    let date = fields.get_field("date", true)?;
    let parsed = parse_date(date.as_deref())?;
    let shifted = modify_date(parsed, offset(fields)?)?;

    let fmt = fields.optional("format").unwrap_or_else(|| DEFAULT_FORMAT.to_string());

    Ok(DateResult {
        timestamp: shifted.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        formatted: format_date(&shifted, &fmt)?,
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/dates",
    description = "Parse an ISO-8601 date or date-time (default: now), optionally shift it, and format it with strftime specifiers.",
    params(
        ("date" = Option<String>, Query, description = "ISO-8601 date or date-time; naive values are UTC"),
        ("format" = Option<String>, Query, description = "strftime format, e.g. %d/%m/%Y"),
        ("days" = Option<i64>, Query, description = "Days to add (may be negative)"),
        ("seconds" = Option<i64>, Query, description = "Seconds to add (may be negative)")
    ),
    responses(
        (status = 200, description = "Resolved date", body = ApiResponse<DateResult>),
        (status = 400, description = "Unparseable date, bad format string or offset", body = ApiResponse<String>)
    ),
    tag = "dates"
)]
pub async fn resolve_date(fields: RequestFields) -> Result<impl IntoResponse, CommandError> {
    let result = resolve(&fields)?;

    Ok((StatusCode::OK, Json(ApiResponse::ok(result))))
}
