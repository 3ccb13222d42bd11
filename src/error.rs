use std::path::PathBuf;

use chrono::NaiveDate;

use crate::api::{ReadingError, ServiceError};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The service does not serve interval reads for the current day.
    #[error("same-day reads are not supported (`{date}` is today)")]
    SameDayRead { date: NaiveDate },

    /// Connection, TLS, or timeout failure, surfaced as-is from the transport.
    #[error("transport failed")]
    Transport(#[from] ureq::Error),

    /// The service responded with HTTP status 400 or above.
    #[error(transparent)]
    Service(#[from] Box<ServiceError>),

    /// A reading token is not a finite number.
    #[error("malformed reading `{token}` on `{date}`")]
    DataQuality {
        date: String,
        token: String,

        #[source]
        source: ReadingError,
    },

    #[error("failed to deserialize the response")]
    Decode(#[from] serde_json::Error),

    #[error("failed to read `{path}`")]
    ReadIdentity {
        path: PathBuf,

        #[source]
        source: std::io::Error,
    },

    #[error("invalid client certificate or private key")]
    Identity(#[source] ureq::Error),

    #[error("on-demand read ended with status `{status}`")]
    OdrFailed { status: String, body: serde_json::Value },

    #[error("on-demand read did not complete after {n_attempts} status checks")]
    OdrTimeout { n_attempts: u32 },
}

impl From<ServiceError> for Error {
    fn from(error: ServiceError) -> Self {
        Self::Service(Box::new(error))
    }
}

impl Error {
    /// Service error details, if the service rejected the request.
    #[must_use]
    pub fn as_service_error(&self) -> Option<&ServiceError> {
        match self {
            Self::Service(error) => Some(error),
            _ => None,
        }
    }
}
