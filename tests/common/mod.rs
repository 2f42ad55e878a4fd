//! Common test utilities and helpers
//!
//! Fake executors for publisher tests, a one-shot local HTTP server, and a
//! command builder for the CLI binary.

#![allow(dead_code)]

use assert_cmd::Command;
use async_trait::async_trait;
use ntfy_publish::Executor;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use url::Url;

pub const OK_BODY: &str = r#"{"id":"sPs71M8A2T","time":1700000000,"expires":1700043200,"event":"message","topic":"alerts","message":"disk full"}"#;

/// A request as seen by [`FakeExecutor`]
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: String,
    pub url: String,
    pub headers: reqwest::header::HeaderMap,
    pub body: Vec<u8>,
}

impl SeenRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

/// Executor that answers every request with a canned response
pub struct FakeExecutor {
    status: u16,
    body: &'static str,
    seen: Mutex<Vec<SeenRequest>>,
}

impl FakeExecutor {
    pub fn new(status: u16, body: &'static str) -> Arc<Self> {
        Arc::new(Self {
            status,
            body,
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn ok() -> Arc<Self> {
        Self::new(200, OK_BODY)
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Executor for FakeExecutor {
    async fn execute(&self, request: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        let seen = SeenRequest {
            method: request.method().to_string(),
            url: request.url().to_string(),
            headers: request.headers().clone(),
            body: request
                .body()
                .and_then(|b| b.as_bytes())
                .map(<[u8]>::to_vec)
                .unwrap_or_default(),
        };
        self.seen.lock().unwrap().push(seen);

        let response = http::Response::builder()
            .status(self.status)
            .header("content-type", "application/json")
            .body(self.body)
            .unwrap();
        Ok(reqwest::Response::from(response))
    }
}

/// Serve exactly one HTTP response on a random local port
///
/// The handle resolves to the raw request text the server received.
pub async fn serve_once(status_line: &'static str, body: &'static str) -> (Url, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = Url::parse(&format!("http://{}/", listener.local_addr().unwrap())).unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });

    (url, handle)
}

/// Like [`serve_once`] but on a plain thread, for tests without a runtime
pub fn serve_once_blocking(status_line: &'static str) -> (Url, std::thread::JoinHandle<()>) {
    use std::io::{Read, Write};

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = Url::parse(&format!("http://{}/", listener.local_addr().unwrap())).unwrap();

    let handle = std::thread::spawn(move || {
        let (mut socket, _) = listener.accept().unwrap();
        socket.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 1024];
        while request_length(&buffer).map_or(true, |length| buffer.len() < length) {
            let n = socket.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            buffer.extend_from_slice(&chunk[..n]);
        }
        let response =
            format!("HTTP/1.1 {status_line}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        socket.write_all(response.as_bytes()).unwrap();
    });

    (url, handle)
}

/// Accept one connection and never answer it
pub async fn serve_silence(hold: Duration) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = Url::parse(&format!("http://{}/", listener.local_addr().unwrap())).unwrap();

    tokio::spawn(async move {
        if let Ok((socket, _)) = listener.accept().await {
            tokio::time::sleep(hold).await;
            drop(socket);
        }
    });

    url
}

/// URL of a local port with nothing listening on it
pub async fn closed_port_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}/")).unwrap()
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..n]);

        if request_length(&buffer).is_some_and(|length| buffer.len() >= length) {
            break;
        }
    }

    String::from_utf8_lossy(&buffer).into_owned()
}

/// Total request size once the head has arrived
fn request_length(buffer: &[u8]) -> Option<usize> {
    let end = buffer.windows(4).position(|w| w == b"\r\n\r\n")?;
    let head = String::from_utf8_lossy(&buffer[..end]).to_ascii_lowercase();
    let length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);
    Some(end + 4 + length)
}

/// Temporary config location for CLI tests
pub struct TestConfig {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl TestConfig {
    /// Path inside a fresh temp dir; the file itself does not exist yet
    pub fn empty() -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        Self { dir, path }
    }

    pub fn with_contents(contents: &str) -> Self {
        let config = Self::empty();
        std::fs::write(&config.path, contents).unwrap();
        config
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// The CLI binary pointed at `config`
pub fn cli(config: &TestConfig) -> Command {
    let mut cmd = Command::cargo_bin("ntfy-publish").unwrap();
    cmd.arg("--config").arg(config.path()).env_remove("RUST_LOG");
    cmd
}
