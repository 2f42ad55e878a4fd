use async_trait::async_trait;

/// Transport seam used by the publisher
///
/// The publisher prepares a complete [`reqwest::Request`] and hands it to an
/// executor. [`reqwest::Client`] is the default; tests and callers with their
/// own connection handling can supply anything else that yields a response.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Send one request and return the server's response
    async fn execute(&self, request: reqwest::Request) -> reqwest::Result<reqwest::Response>;
}

#[async_trait]
impl Executor for reqwest::Client {
    async fn execute(&self, request: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        reqwest::Client::execute(self, request).await
    }
}
