//! Translation of failed service responses into typed errors.

use serde_json::{Map, Value};

use crate::api::transport::Response;

/// Code reported when the response carries no recognisable error code.
pub const UNKNOWN_CODE: &str = "-1";

const FALLBACK_MESSAGE: &str = "An unknown error occurred";

#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display)]
pub enum ServiceErrorKind {
    #[display("unknown error")]
    Unknown,

    /// Caller-side defect, for example, malformed dates.
    #[display("bad request")]
    BadRequest,

    /// Credentials or the client certificate were rejected.
    #[display("authentication failure")]
    AuthFailure,

    #[display("header missing")]
    HeaderMissing,

    #[display("generic error")]
    Generic,
}

impl ServiceErrorKind {
    /// Look up the kind by the normalized error code, falling back to [`Self::Unknown`].
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "400" => Self::BadRequest,
            "401" => Self::AuthFailure,
            "403" => Self::HeaderMissing,
            "500" => Self::Generic,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{kind} {code}: {message}")]
pub struct ServiceError {
    pub kind: ServiceErrorKind,
    pub message: String,

    /// Normalized error code, [`UNKNOWN_CODE`] when absent.
    pub code: String,

    /// Free-form diagnostics from `errorKey`.
    pub data: Value,

    /// The response that caused the error.
    pub response: Response,
}

impl From<Response> for ServiceError {
    fn from(response: Response) -> Self {
        let body = serde_json::from_str::<Value>(&response.body).unwrap_or_default();
        let error = &body["error"];
        let code = normalize_code(&error["errorCode"]);
        let data = match &error["errorKey"] {
            Value::Null => Value::Object(Map::new()),
            key => key.clone(),
        };
        Self {
            kind: ServiceErrorKind::from_code(&code),
            message: extract_message(&error["errorMessage"])
                .unwrap_or_else(|| FALLBACK_MESSAGE.to_owned()),
            code,
            data,
            response,
        }
    }
}

/// Bring numeric and textual codes to the same representation: `400`, `400.0`, and `"400"` are equal.
fn normalize_code(code: &Value) -> String {
    match code {
        Value::String(code) if !code.trim().is_empty() => code.trim().to_owned(),
        Value::Number(number) => match number.as_f64() {
            #[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
            Some(float) if number.is_f64() && float.fract() == 0.0 => (float as i64).to_string(),
            _ => number.to_string(),
        },
        Value::Null | Value::String(_) => UNKNOWN_CODE.to_owned(),
        other => other.to_string(),
    }
}

fn extract_message(message: &Value) -> Option<String> {
    match message {
        Value::String(message) if !message.trim().is_empty() => Some(message.clone()),
        Value::Number(_) | Value::Bool(_) => Some(message.to_string()),
        _ => None,
    }
}
