//! Client context shared by every resource

use std::sync::Arc;
use std::time::Duration;

use rota_core::retry::{CallOptions, Invoker, RetryPolicy};
use rota_transport::{HttpRequest, HttpResponse, HttpTransport, HttpTransportConfig, Transport};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    config::ClientConfig,
    error::{Error, Result},
    observability::{RequestMetadata, RequestTimer, ResponseMetadata},
    resources::{Analytics, Contacts, Conversations, Journey, Schedule},
};

/// Main client for the contact-centre platform and the on-call schedule API.
///
/// Owns the transport, the retry invoker and the credentials. Cloning is
/// cheap and every clone shares the same state, so resources hold a clone
/// instead of reaching for globals.
///
/// # Example
///
/// ```rust,no_run
/// use rota::Client;
///
/// # async fn example() -> rota::Result<()> {
/// let client = Client::builder()
///     .base_url("https://api.mypurecloud.ie")
///     .access_token("token")
///     .build()?;
///
/// let details = client.conversations().details("c-123").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    transport: Arc<dyn Transport>,
    invoker: Invoker,
    base_url: Url,
    access_token: Option<SecretString>,
    oauth_client_id: Option<String>,
    schedule_endpoint: Option<Url>,
    schedule_api_key: Option<SecretString>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url.as_str())
            .field("schedule_endpoint", &self.inner.schedule_endpoint.as_ref().map(Url::as_str))
            .field("oauth_client_id", &self.inner.oauth_client_id)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a new client builder for advanced configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client from a configuration object.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured URL is not an absolute `http(s)` URL
    /// or the HTTP client cannot be built.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        ClientBuilder {
            config,
            ..Default::default()
        }
        .build()
    }

    /// Load configuration from the environment and build a client.
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }

    /// Conversations API (callbacks, outbound calls, summaries).
    pub fn conversations(&self) -> Conversations {
        Conversations::new(self.clone())
    }

    /// External contacts API.
    pub fn contacts(&self) -> Contacts {
        Contacts::new(self.clone())
    }

    /// On-call schedule API.
    pub fn schedule(&self) -> Schedule {
        Schedule::new(self.clone())
    }

    /// Journey sessions of external contacts.
    pub fn journey(&self) -> Journey {
        Journey::new(self.clone())
    }

    /// Speech and text analytics (transcripts).
    pub fn analytics(&self) -> Analytics {
        Analytics::new(self.clone())
    }

    /// The platform base URL.
    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    /// OAuth client id the access token belongs to, if configured.
    pub fn oauth_client_id(&self) -> Option<&str> {
        self.inner.oauth_client_id.as_deref()
    }

    /// The retry policy applied to every request.
    pub fn retry_policy(&self) -> &RetryPolicy {
        self.inner.invoker.strategy()
    }

    /// Build an authenticated request against the platform.
    ///
    /// Each entry of `segments` becomes exactly one percent-encoded path
    /// segment, so ids containing `/`, `?` or `#` cannot change the target.
    pub(crate) fn platform_request(&self, method: &str, segments: &[&str]) -> Result<HttpRequest> {
        let url = self.platform_url(segments)?;
        self.authorized(method, url)
    }

    /// Like [`Client::platform_request`] with query parameters appended.
    pub(crate) fn platform_request_with_query<'a>(
        &self,
        method: &str,
        segments: &[&str],
        query: impl IntoIterator<Item = (&'a str, String)>,
    ) -> Result<HttpRequest> {
        let mut url = self.platform_url(segments)?;
        append_query(&mut url, query);
        self.authorized(method, url)
    }

    fn platform_url(&self, segments: &[&str]) -> Result<Url> {
        // `.`, `..` and empty segments would be dropped or collapsed by the
        // URL serializer and address a different resource.
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(Error::InvalidUrl(format!("invalid path segment {:?}", bad)));
        }
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(format!("{}: cannot be a base", self.inner.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Build an authenticated request to an absolute URL (e.g. a signed
    /// transcript download link).
    pub(crate) fn absolute_request(&self, method: &str, url: &str) -> Result<HttpRequest> {
        let url = parse_http_url(url)?;
        self.authorized(method, url)
    }

    /// Build a request against the on-call schedule API.
    pub(crate) fn schedule_request<'a>(
        &self,
        path: &str,
        query: impl IntoIterator<Item = (&'a str, String)>,
    ) -> Result<HttpRequest> {
        let endpoint = self
            .inner
            .schedule_endpoint
            .as_ref()
            .ok_or_else(|| Error::MissingConfig("schedule_endpoint".to_string()))?;

        let mut url = endpoint.join(path.trim_start_matches('/'))?;
        append_query(&mut url, query);

        let mut request =
            HttpRequest::new("GET", url.to_string()).with_header("Accept", "application/json");
        if let Some(key) = &self.inner.schedule_api_key {
            request = request.with_header("X-Api-Key", key.expose_secret());
        }
        Ok(request)
    }

    fn authorized(&self, method: &str, url: Url) -> Result<HttpRequest> {
        let token = self
            .inner
            .access_token
            .as_ref()
            .ok_or_else(|| Error::MissingConfig("access_token".to_string()))?;

        Ok(HttpRequest::new(method, url.to_string())
            .with_header("Accept", "application/json")
            .with_bearer(token.expose_secret()))
    }

    /// Send `request` through the invoker and return the successful response.
    pub(crate) async fn execute(
        &self,
        options: CallOptions,
        request: HttpRequest,
    ) -> Result<HttpResponse> {
        let path = Url::parse(&request.url)
            .map(|u| u.path().to_string())
            .unwrap_or_else(|_| request.url.clone());
        let mut metadata = RequestMetadata::new(options.label, request.method.clone(), path);
        if let Some(body) = &request.body {
            metadata = metadata.with_body_size(body.len());
        }
        metadata.log_request();

        let timer = RequestTimer::start();
        let transport = self.inner.transport.as_ref();
        let result = self
            .inner
            .invoker
            .call_with(options, |req| send_checked(transport, req), request)
            .await;

        match result {
            Ok(response) => {
                ResponseMetadata::new(Some(response.status), timer.elapsed())
                    .with_body_size(response.body.len())
                    .log_success(&metadata);
                Ok(response)
            }
            Err(err) => {
                ResponseMetadata::new(rota_core::StatusError::status(&err), timer.elapsed())
                    .log_error(&metadata, &err.to_string());
                Err(err)
            }
        }
    }

    /// [`Client::execute`] followed by JSON decoding of the body.
    pub(crate) async fn execute_json<T: DeserializeOwned>(
        &self,
        options: CallOptions,
        request: HttpRequest,
    ) -> Result<T> {
        let response = self.execute(options, request).await?;
        Ok(response.json()?)
    }
}

async fn send_checked(transport: &dyn Transport, request: HttpRequest) -> Result<HttpResponse> {
    let response = transport.send_http(request).await?;
    Ok(response.error_for_status()?)
}

fn append_query<'a>(url: &mut Url, query: impl IntoIterator<Item = (&'a str, String)>) {
    let pairs: Vec<_> = query.into_iter().collect();
    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }
}

fn parse_http_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        _ => Err(Error::InvalidUrl(format!(
            "{raw}: expected an absolute http(s) URL"
        ))),
    }
}

/// Parse a base URL so that relative joins keep its path.
fn parse_base_url(raw: &str) -> Result<Url> {
    if raw.trim().is_empty() {
        return Err(Error::InvalidUrl("base URL is empty".to_string()));
    }
    let mut url = parse_http_url(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Builder for creating a configured [`Client`].
#[derive(Default)]
pub struct ClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
    retry_policy: Option<RetryPolicy>,
}

impl ClientBuilder {
    /// Set the platform base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Set the bearer token used for platform requests.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.config.access_token = Some(SecretString::new(token.into().into_boxed_str()));
        self
    }

    /// Set the OAuth client id.
    pub fn oauth_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.config.oauth_client_id = Some(client_id.into());
        self
    }

    /// Set the on-call schedule API base URL.
    pub fn schedule_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.schedule_endpoint = Some(endpoint.into());
        self
    }

    /// Set the on-call schedule API key.
    pub fn schedule_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.schedule_api_key = Some(SecretString::new(key.into().into_boxed_str()));
        self
    }

    /// Set the timeout for a single HTTP attempt.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the cap applied to server-provided retry-after waits.
    pub fn max_retry_after(mut self, max: Duration) -> Self {
        self.config.max_retry_after = max;
        self
    }

    /// Replace the retry policy entirely.
    ///
    /// Takes precedence over [`ClientBuilder::max_retry_after`].
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Use a custom transport instead of the reqwest-based default.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client with the configured options.
    pub fn build(self) -> Result<Client> {
        let config = self.config;

        let base_url = parse_base_url(config.base_url_or_default())?;
        let schedule_endpoint = config
            .schedule_endpoint
            .as_deref()
            .map(parse_base_url)
            .transpose()?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::with_config(HttpTransportConfig {
                timeout: config.timeout,
                ..Default::default()
            })?) as Arc<dyn Transport>,
        };

        let policy = self.retry_policy.unwrap_or_else(|| {
            RetryPolicy::builder()
                .max_retry_after(config.max_retry_after)
                .build()
        });

        Ok(Client {
            inner: Arc::new(ClientInner {
                transport,
                invoker: Invoker::new(policy),
                base_url,
                access_token: config.access_token,
                oauth_client_id: config.oauth_client_id,
                schedule_endpoint,
                schedule_api_key: config.schedule_api_key,
            }),
        })
    }
}
