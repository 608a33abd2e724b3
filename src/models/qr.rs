//! Payload printed on student QR codes.

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Deserializer, de};
use serde_json::Value;

/// Location used when a code does not name one.
pub const DEFAULT_LOCATION: &str = "Classroom";

pub const QR_FORMAT_HINT: &str =
    r#"{"studentId": "12345", "firstName": "Max", "lastName": "Mustermann", "location": "Classroom"}"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrPayload {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub location: String,
}

impl QrPayload {
    /// Parse a scanned code. `default_location` fills a missing `location`.
    pub fn parse(raw: &str, default_location: &str) -> AppResult<Self> {
        let value: Value = serde_json::from_str(raw.trim()).map_err(|_| {
            AppError::InvalidQr(format!(
                "the code does not contain name information. Expected format:\n{}",
                QR_FORMAT_HINT
            ))
        })?;

        let field = |name: &str| value.get(name).and_then(text_of);

        match (field("studentId"), field("firstName"), field("lastName")) {
            (Some(student_id), Some(first_name), Some(last_name)) => Ok(Self {
                student_id,
                first_name,
                last_name,
                location: field("location").unwrap_or_else(|| default_location.to_string()),
            }),
            _ => Err(AppError::InvalidQr(
                "incomplete data: the code must contain studentId, firstName and lastName".into(),
            )),
        }
    }

    pub fn student_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Non-empty strings and non-zero numbers count as present.
fn text_of(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// Accept identifiers stored either as JSON strings or numbers.
pub(crate) fn de_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    match Value::deserialize(d)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected string or number, found {other}"
        ))),
    }
}
