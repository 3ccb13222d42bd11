use std::fmt::{Display, Formatter};

/// Service deployment the client talks to.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Host {
    #[default]
    Production,

    /// User acceptance testing environment.
    Test,
}

impl Display for Host {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.base_url())
    }
}

impl Host {
    pub const PRODUCTION_URL: &'static str = "https://services.smartmetertexas.net";
    pub const TEST_URL: &'static str = "https://uatservices.smartmetertexas.net";

    #[must_use]
    pub const fn new(test: bool) -> Self {
        if test { Self::Test } else { Self::Production }
    }

    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Production => Self::PRODUCTION_URL,
            Self::Test => Self::TEST_URL,
        }
    }
}

/// Endpoint URL: the endpoint name goes right after the host, with a trailing slash.
#[must_use]
pub fn build_url(host: &str, endpoint: &str) -> String {
    format!("{}/{}/", host.trim_end_matches('/'), endpoint.trim_matches('/'))
}
