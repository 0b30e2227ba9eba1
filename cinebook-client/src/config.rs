//! Client configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | CINEBOOK_BASE_URL | http://localhost:5000 | Backend base URL |
//! | CINEBOOK_TIMEOUT_SECS | 30 | Request timeout |
//! | CINEBOOK_IDENTITY_MODE | user | `user` or `contact` |
//! | CINEBOOK_NOTICE_SECS | 5 | How long a notice stays visible |
//! | CINEBOOK_LOG_LEVEL | info | Default log filter |

use std::str::FromStr;
use std::time::Duration;

use shared::CustomerIdentity;

/// How bookings identify the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentityMode {
    /// Authenticated user id (`user_id`)
    #[default]
    UserId,
    /// Contact form (`name`, `email`, `phone`)
    Contact,
}

impl IdentityMode {
    /// Whether `identity` is the kind this deployment sends
    pub fn accepts(&self, identity: &CustomerIdentity) -> bool {
        matches!(
            (self, identity),
            (Self::UserId, CustomerIdentity::User { .. })
                | (Self::Contact, CustomerIdentity::Contact { .. })
        )
    }
}

impl FromStr for IdentityMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" | "user_id" | "userid" => Ok(Self::UserId),
            "contact" => Ok(Self::Contact),
            other => Err(format!("unknown identity mode: {other}")),
        }
    }
}

/// Client configuration for connecting to the booking backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:5000")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Customer identity model of the deployment
    pub identity_mode: IdentityMode,

    /// Seconds a transient notice stays visible
    pub notice_secs: u64,

    /// Default log level when RUST_LOG is unset
    pub log_level: String,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            identity_mode: IdentityMode::UserId,
            notice_secs: 5,
            log_level: "info".to_string(),
        }
    }

    /// Load configuration from the environment, reading `.env` first
    ///
    /// Unset or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        // a missing .env file is fine
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            base_url: lookup("CINEBOOK_BASE_URL").unwrap_or(defaults.base_url),
            timeout: lookup("CINEBOOK_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout),
            identity_mode: lookup("CINEBOOK_IDENTITY_MODE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.identity_mode),
            notice_secs: lookup("CINEBOOK_NOTICE_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.notice_secs),
            log_level: lookup("CINEBOOK_LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the identity mode
    pub fn with_identity_mode(mut self, mode: IdentityMode) -> Self {
        self.identity_mode = mode;
        self
    }

    /// Set how long notices stay visible
    pub fn with_notice_secs(mut self, seconds: u64) -> Self {
        self.notice_secs = seconds;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_secs(self.notice_secs)
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<super::HttpClient> {
        super::HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:5000")
    }
}
