//! Configuration for the ROTA client

use secrecy::SecretString;
use std::time::Duration;

/// Platform region used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.mypurecloud.com";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the ROTA client.
///
/// Holds the platform credentials, the on-call schedule endpoint and the
/// knobs of the retry policy that are safe to tune per deployment.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Platform base URL (region), e.g. `https://api.mypurecloud.com`
    pub base_url: Option<String>,

    /// Bearer token for platform requests
    pub access_token: Option<SecretString>,

    /// OAuth client id the token was issued for
    pub oauth_client_id: Option<String>,

    /// Base URL of the on-call schedule API
    pub schedule_endpoint: Option<String>,

    /// API key sent as `X-Api-Key` to the schedule API
    pub schedule_api_key: Option<SecretString>,

    /// Timeout for a single HTTP attempt
    pub timeout: Duration,

    /// Upper bound applied to server-provided retry-after waits
    pub max_retry_after: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            access_token: None,
            oauth_client_id: None,
            schedule_endpoint: None,
            schedule_api_key: None,
            timeout: DEFAULT_TIMEOUT,
            max_retry_after: rota_core::retry::DEFAULT_MAX_RETRY_AFTER,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with an access token.
    pub fn with_access_token(token: impl Into<String>) -> Self {
        Self {
            access_token: Some(SecretString::new(token.into().into_boxed_str())),
            ..Default::default()
        }
    }

    /// Base URL to use, falling back to [`DEFAULT_BASE_URL`].
    pub fn base_url_or_default(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first when present.
    /// This will look for:
    /// - `ROTA_BASE_URL` for the platform region URL
    /// - `ROTA_ACCESS_TOKEN` for the bearer token
    /// - `ROTA_OAUTH_CLIENT_ID` for the OAuth client id
    /// - `ROTA_SCHEDULE_ENDPOINT` and `ROTA_SCHEDULE_API_KEY` for the schedule API
    /// - `ROTA_TIMEOUT` for the request timeout (in seconds)
    /// - `ROTA_MAX_RETRY_AFTER` for the retry-after cap (in seconds)
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self, crate::error::Error> {
        use std::env;

        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            tracing::warn!(error = %err, "Ignoring unreadable .env file");
        }

        let mut config = Self::default();

        if let Ok(base_url) = env::var("ROTA_BASE_URL") {
            config.base_url = Some(base_url);
        }

        if let Ok(token) = env::var("ROTA_ACCESS_TOKEN") {
            config.access_token = Some(SecretString::new(token.into_boxed_str()));
        }

        if let Ok(client_id) = env::var("ROTA_OAUTH_CLIENT_ID") {
            config.oauth_client_id = Some(client_id);
        }

        if let Ok(endpoint) = env::var("ROTA_SCHEDULE_ENDPOINT") {
            config.schedule_endpoint = Some(endpoint);
        }

        if let Ok(api_key) = env::var("ROTA_SCHEDULE_API_KEY") {
            config.schedule_api_key = Some(SecretString::new(api_key.into_boxed_str()));
        }

        // Timeout
        if let Ok(timeout_str) = env::var("ROTA_TIMEOUT")
            && let Ok(timeout_secs) = timeout_str.parse::<u64>()
        {
            config.timeout = Duration::from_secs(timeout_secs);
        }

        // Retry-after cap
        if let Ok(cap_str) = env::var("ROTA_MAX_RETRY_AFTER")
            && let Ok(cap_secs) = cap_str.parse::<u64>()
        {
            config.max_retry_after = Duration::from_secs(cap_secs);
        }

        Ok(config)
    }

    /// Merge this configuration with another, with the other taking precedence.
    pub fn merge(mut self, other: ClientConfig) -> Self {
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.access_token.is_some() {
            self.access_token = other.access_token;
        }
        if other.oauth_client_id.is_some() {
            self.oauth_client_id = other.oauth_client_id;
        }
        if other.schedule_endpoint.is_some() {
            self.schedule_endpoint = other.schedule_endpoint;
        }
        if other.schedule_api_key.is_some() {
            self.schedule_api_key = other.schedule_api_key;
        }
        if other.timeout != DEFAULT_TIMEOUT {
            self.timeout = other.timeout;
        }
        if other.max_retry_after != rota_core::retry::DEFAULT_MAX_RETRY_AFTER {
            self.max_retry_after = other.max_retry_after;
        }

        self
    }
}
