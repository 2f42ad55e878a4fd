use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::blocking::BlockingPublisher;
use super::traits::Executor;
use crate::errors::{NtfyError, NtfyResult};
use crate::ntfy::{Message, PublishResult};
use crate::shared::config::NtfyConfig;

pub const DEFAULT_SERVER_URL: &str = "https://ntfy.sh";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_USER_AGENT: &str = concat!("ntfy-publish/", env!("CARGO_PKG_VERSION"));

/// Configuration for a [`Publisher`]
#[derive(Clone)]
pub struct PublisherConfig {
    pub server_url: String,
    pub auth_token: Option<String>,
    /// Per-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
    /// Sent with every request unless a per-call header of the same name replaces it
    pub headers: HeaderMap,
    /// Transport override; `None` builds a pooled [`reqwest::Client`]
    pub executor: Option<Arc<dyn Executor>>,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            auth_token: None,
            timeout: Some(DEFAULT_TIMEOUT),
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
            headers,
            executor: None,
        }
    }
}

impl fmt::Debug for PublisherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublisherConfig")
            .field("server_url", &self.server_url)
            .field("has_auth", &self.auth_token.is_some())
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("headers", &self.headers)
            .field("custom_executor", &self.executor.is_some())
            .finish()
    }
}

impl PublisherConfig {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            ..Default::default()
        }
    }

    pub fn with_executor(mut self, executor: impl Executor + 'static) -> Self {
        self.executor = Some(Arc::new(executor));
        self
    }
}

impl TryFrom<&NtfyConfig> for PublisherConfig {
    type Error = NtfyError;

    fn try_from(config: &NtfyConfig) -> NtfyResult<Self> {
        let defaults = PublisherConfig::default();
        let mut headers = defaults.headers;

        for (name, value) in &config.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| NtfyError::invalid_header(name.as_str(), e))?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| NtfyError::invalid_header(name.as_str(), e))?;
            headers.insert(header_name, header_value);
        }

        Ok(Self {
            server_url: config.server_url.clone(),
            auth_token: config.auth_token.clone(),
            timeout: config.timeout_secs.map(Duration::from_secs),
            user_agent: config.user_agent.clone().or(defaults.user_agent),
            headers,
            executor: None,
        })
    }
}

/// Publishes messages to one ntfy server
///
/// Cheap to clone; clones share the underlying executor and its connection
/// pool. A publish sends exactly one request and never retries.
#[derive(Clone)]
pub struct Publisher {
    executor: Arc<dyn Executor>,
    server: Url,
    headers: HeaderMap,
    timeout: Option<Duration>,
}

impl fmt::Debug for Publisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Publisher")
            .field("server", &self.server.as_str())
            .field("headers", &self.headers)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Publisher {
    /// Create a publisher, validating the server URL and default headers
    pub fn new(config: PublisherConfig) -> NtfyResult<Self> {
        let server = parse_server_url(&config.server_url)?;
        let headers = build_default_headers(&config)?;

        let executor = match config.executor {
            Some(executor) => executor,
            None => Arc::new(build_http_client()?),
        };

        debug!(server = %server, timeout = ?config.timeout, "created ntfy publisher");

        Ok(Self {
            executor,
            server,
            headers,
            timeout: config.timeout,
        })
    }

    /// Wrap this publisher for use outside an async runtime
    pub fn blocking(self) -> NtfyResult<BlockingPublisher> {
        BlockingPublisher::from_publisher(self)
    }

    pub fn server(&self) -> &Url {
        &self.server
    }

    pub fn default_headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Publish a message with the default headers
    pub async fn publish<B: Serialize>(&self, message: &Message<B>) -> NtfyResult<PublishResult> {
        self.publish_with_headers(message, &HeaderMap::new()).await
    }

    /// Publish a message, replacing default headers by name with `headers`
    ///
    /// Fails without touching the network when the message is invalid or
    /// cannot be encoded. Any non-2xx status is an error and its body is not
    /// read.
    pub async fn publish_with_headers<B: Serialize>(
        &self,
        message: &Message<B>,
        headers: &HeaderMap,
    ) -> NtfyResult<PublishResult> {
        message.validate()?;
        let body = message.to_json()?;

        debug!(topic = %message.topic, bytes = body.len(), "publishing message");
        let request = self.build_request(body, headers);

        let response = self.executor.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            debug!(topic = %message.topic, status = status.as_u16(), "server returned error status");
            return Err(NtfyError::UnexpectedStatus {
                status_code: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        let result: PublishResult = serde_json::from_slice(&bytes)
            .map_err(|e| NtfyError::decoding("publish response", e))?;

        debug!(id = %result.id, topic = %result.topic, "message published");
        Ok(result)
    }

    fn build_request(&self, body: Vec<u8>, overrides: &HeaderMap) -> reqwest::Request {
        let mut request = reqwest::Request::new(Method::POST, self.server.clone());
        *request.headers_mut() = merge_headers(&self.headers, overrides);
        *request.body_mut() = Some(body.into());
        *request.timeout_mut() = self.timeout;
        request
    }
}

/// Default headers with every name present in `overrides` replaced
pub(crate) fn merge_headers(defaults: &HeaderMap, overrides: &HeaderMap) -> HeaderMap {
    let mut merged = defaults.clone();
    for name in overrides.keys() {
        merged.remove(name);
    }
    for (name, value) in overrides {
        merged.append(name.clone(), value.clone());
    }
    merged
}

fn parse_server_url(raw: &str) -> NtfyResult<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(NtfyError::config("server URL must not be empty"));
    }

    let url = Url::parse(trimmed).map_err(|e| NtfyError::InvalidServerUrl {
        url: raw.to_string(),
        source: Some(e),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(NtfyError::InvalidServerUrl {
            url: raw.to_string(),
            source: None,
        }),
    }
}

fn build_default_headers(config: &PublisherConfig) -> NtfyResult<HeaderMap> {
    let mut headers = config.headers.clone();
    headers
        .entry(CONTENT_TYPE)
        .or_insert(HeaderValue::from_static("application/json"));

    if let Some(token) = &config.auth_token {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| NtfyError::invalid_header(AUTHORIZATION.as_str(), e))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    if let Some(user_agent) = &config.user_agent {
        let value = HeaderValue::from_str(user_agent)
            .map_err(|e| NtfyError::invalid_header(USER_AGENT.as_str(), e))?;
        headers.entry(USER_AGENT).or_insert(value);
    }

    Ok(headers)
}

fn build_http_client() -> NtfyResult<Client> {
    Client::builder()
        .tcp_keepalive(Duration::from_secs(60))
        .pool_idle_timeout(Duration::from_secs(90))
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| NtfyError::config_with_source("failed to create HTTP client", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingExecutor {
        status: u16,
        body: &'static str,
        seen: Mutex<Vec<reqwest::Request>>,
    }

    impl RecordingExecutor {
        fn new(status: u16, body: &'static str) -> Arc<Self> {
            Arc::new(Self {
                status,
                body,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Executor for RecordingExecutor {
        async fn execute(&self, request: reqwest::Request) -> reqwest::Result<reqwest::Response> {
            self.seen.lock().unwrap().push(request);
            let response = http::Response::builder()
                .status(self.status)
                .body(self.body)
                .unwrap();
            Ok(reqwest::Response::from(response))
        }
    }

    const OK_BODY: &str = r#"{"id":"abc","time":1700000000,"expires":1700043200,"event":"message","topic":"alerts","message":"disk full"}"#;

    fn publisher_with(executor: Arc<RecordingExecutor>, config: PublisherConfig) -> Publisher {
        let config = PublisherConfig {
            executor: Some(executor),
            ..config
        };
        Publisher::new(config).unwrap()
    }

    #[test]
    fn test_publisher_is_shareable() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<Publisher>();
        assert_send_sync::<PublisherConfig>();
    }

    #[test]
    fn test_merge_headers_replaces_by_name() {
        let mut defaults = HeaderMap::new();
        defaults.insert("x-a", HeaderValue::from_static("1"));
        defaults.append("x-b", HeaderValue::from_static("2"));
        defaults.append("x-b", HeaderValue::from_static("3"));

        let mut overrides = HeaderMap::new();
        overrides.insert("x-b", HeaderValue::from_static("9"));
        overrides.insert("x-c", HeaderValue::from_static("4"));

        let merged = merge_headers(&defaults, &overrides);
        assert_eq!(merged.get("x-a").unwrap(), "1");
        assert_eq!(merged.get_all("x-b").iter().collect::<Vec<_>>(), vec!["9"]);
        assert_eq!(merged.get("x-c").unwrap(), "4");
    }

    #[test]
    fn test_server_url_validation() {
        assert!(matches!(
            Publisher::new(PublisherConfig::new("")),
            Err(NtfyError::Config { .. })
        ));
        assert!(matches!(
            Publisher::new(PublisherConfig::new("not a url")),
            Err(NtfyError::InvalidServerUrl { source: Some(_), .. })
        ));
        assert!(matches!(
            Publisher::new(PublisherConfig::new("ftp://ntfy.example.com")),
            Err(NtfyError::InvalidServerUrl { source: None, .. })
        ));
        assert!(Publisher::new(PublisherConfig::new("http://localhost:8080")).is_ok());
    }

    #[test]
    fn test_default_headers() {
        let config = PublisherConfig {
            auth_token: Some("tk_secret".to_string()),
            ..PublisherConfig::default()
        };
        let publisher = publisher_with(RecordingExecutor::new(200, OK_BODY), config);
        let headers = publisher.default_headers();

        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer tk_secret");
        assert!(headers.get(AUTHORIZATION).unwrap().is_sensitive());
        assert_eq!(headers.get(USER_AGENT).unwrap(), DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_content_type_restored_when_missing() {
        let config = PublisherConfig {
            headers: HeaderMap::new(),
            user_agent: None,
            ..PublisherConfig::default()
        };
        let publisher = publisher_with(RecordingExecutor::new(200, OK_BODY), config);
        assert_eq!(
            publisher.default_headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert!(publisher.default_headers().get(USER_AGENT).is_none());
    }

    #[test]
    fn test_invalid_auth_token() {
        let config = PublisherConfig {
            auth_token: Some("bad\ntoken".to_string()),
            ..PublisherConfig::default()
        };
        let err = Publisher::new(config).unwrap_err();
        assert!(matches!(err, NtfyError::InvalidHeader { ref name, .. } if name == "authorization"));
    }

    #[test]
    fn test_from_ntfy_config() {
        let mut ntfy = NtfyConfig {
            server_url: "https://push.example.com".to_string(),
            auth_token: Some("tk".to_string()),
            timeout_secs: Some(5),
            ..NtfyConfig::default()
        };
        ntfy.headers.insert("X-Firebase".to_string(), "no".to_string());

        let config = PublisherConfig::try_from(&ntfy).unwrap();
        assert_eq!(config.server_url, "https://push.example.com");
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.headers.get("x-firebase").unwrap(), "no");
        assert_eq!(config.headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(config.user_agent.as_deref(), Some(DEFAULT_USER_AGENT));
    }

    #[test]
    fn test_from_ntfy_config_rejects_bad_header() {
        let mut ntfy = NtfyConfig::default();
        ntfy.headers.insert("bad header".to_string(), "x".to_string());
        assert!(matches!(
            PublisherConfig::try_from(&ntfy),
            Err(NtfyError::InvalidHeader { .. })
        ));
    }

    #[tokio::test]
    async fn test_publish_sends_one_post_to_server_root() {
        let executor = RecordingExecutor::new(200, OK_BODY);
        let publisher = publisher_with(
            executor.clone(),
            PublisherConfig::new("https://ntfy.example.com"),
        );

        let result = publisher
            .publish(&Message::new("alerts").with_body("disk full"))
            .await
            .unwrap();
        assert_eq!(result.id, "abc");
        assert_eq!(result.topic, "alerts");

        let seen = executor.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let request = &seen[0];
        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.url().as_str(), "https://ntfy.example.com/");
        assert_eq!(request.timeout(), Some(&DEFAULT_TIMEOUT));
        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(body, br#"{"topic":"alerts","message":"disk full"}"#);
    }

    #[tokio::test]
    async fn test_unexpected_status() {
        let executor = RecordingExecutor::new(429, "not json at all");
        let publisher = publisher_with(executor, PublisherConfig::default());

        let err = publisher.publish(&Message::new("alerts")).await.unwrap_err();
        assert!(matches!(err, NtfyError::UnexpectedStatus { status_code: 429 }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_invalid_message_is_not_sent() {
        let executor = RecordingExecutor::new(200, OK_BODY);
        let publisher = publisher_with(executor.clone(), PublisherConfig::default());

        let err = publisher.publish(&Message::new("")).await.unwrap_err();
        assert!(matches!(err, NtfyError::Validation { .. }));
        assert!(executor.seen.lock().unwrap().is_empty());
    }
}
