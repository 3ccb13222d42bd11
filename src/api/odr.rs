//! On-demand read status tracking.
//!
//! The on-demand read request only triggers a poll of the physical meter.
//! The reading becomes available later and is observed through the status endpoint.

use std::time::Duration;

use bon::Builder;
use serde_json::Value;

use crate::api::options::Params;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(30);

#[must_use]
#[derive(Copy, Clone, Debug, Builder)]
pub struct OdrPolling {
    /// Maximum number of status checks before giving up.
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,

    /// Pause before every status check.
    #[builder(default = DEFAULT_INTERVAL)]
    pub interval: Duration,
}

impl Default for OdrPolling {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OdrStatus {
    Completed,
    Failed(String),
    Pending(String),
}

impl OdrStatus {
    /// Classify the status response body.
    ///
    /// A body without any recognisable status is treated as pending.
    #[must_use]
    pub fn from_body(body: &Value) -> Self {
        let status = ["odrstatus", "odrStatus", "status"]
            .iter()
            .find_map(|key| body.get(*key).and_then(Value::as_str))
            .unwrap_or_default()
            .trim()
            .to_ascii_uppercase();
        match status.as_str() {
            "COMPLETED" | "COMPLETE" => Self::Completed,
            "FAILED" | "REJECTED" | "CANCELLED" | "CANCELED" => Self::Failed(status),
            _ => Self::Pending(status),
        }
    }
}

/// Status request parameters for the acknowledged on-demand read.
#[must_use]
pub fn status_params(acknowledgement: &Value) -> Params {
    ["correlationId", "trans_id"]
        .iter()
        .find_map(|key| acknowledgement.get(*key).map(|value| ((*key).to_owned(), value.clone())))
        .map(|(key, value)| {
            // The service identifies the on-demand read by its correlation ID:
            let key = if key == "trans_id" { "correlationId".to_owned() } else { key };
            Params::from_iter([(key, value)])
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn status_from_body_ok() {
        assert_eq!(OdrStatus::from_body(&json!({"odrstatus": "COMPLETED"})), OdrStatus::Completed);
        assert_eq!(OdrStatus::from_body(&json!({"odrStatus": "completed"})), OdrStatus::Completed);
        assert_eq!(
            OdrStatus::from_body(&json!({"status": "Rejected"})),
            OdrStatus::Failed("REJECTED".to_owned()),
        );
        assert_eq!(
            OdrStatus::from_body(&json!({"odrstatus": "PENDING"})),
            OdrStatus::Pending("PENDING".to_owned()),
        );
        assert_eq!(OdrStatus::from_body(&json!({})), OdrStatus::Pending(String::new()));
    }

    #[test]
    fn status_params_ok() {
        assert_eq!(
            Value::Object(status_params(&json!({"correlationId": "abc", "trans_id": "3"}))),
            json!({"correlationId": "abc"}),
        );
        assert_eq!(
            Value::Object(status_params(&json!({"trans_id": "3"}))),
            json!({"correlationId": "3"}),
        );
        assert!(status_params(&json!({})).is_empty());
    }

    #[test]
    fn default_polling_ok() {
        let polling = OdrPolling::default();
        assert_eq!(polling.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(polling.interval, DEFAULT_INTERVAL);
    }
}
