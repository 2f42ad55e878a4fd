//! Publishing client for ntfy servers
//!
//! [`Publisher`] is the async implementation; [`BlockingPublisher`] wraps it
//! for synchronous callers. Requests go out through an [`Executor`], which is
//! a pooled [`reqwest::Client`] unless the configuration supplies another one.
//!
//! ```rust,no_run
//! use ntfy_publish::{Message, Priority, Publisher, PublisherConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = PublisherConfig {
//!     auth_token: Some("tk_mytoken".to_string()),
//!     ..PublisherConfig::new("https://ntfy.example.com")
//! };
//! let publisher = Publisher::new(config)?;
//!
//! let message = Message::new("backups")
//!     .with_title("Nightly backup")
//!     .with_body("Finished in 4m12s")
//!     .with_priority(Priority::LOW);
//! let result = publisher.publish(&message).await?;
//! println!("published {}", result.id);
//! # Ok(())
//! # }
//! ```

pub mod blocking;
pub mod ntfy;
pub mod traits;

pub use blocking::BlockingPublisher;
pub use ntfy::{Publisher, PublisherConfig, DEFAULT_SERVER_URL, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use traits::Executor;
