//! # 1secmail Client
//! Asynchronous wrapper around the 1secmail disposable email HTTP API: allocate a random mailbox, list the messages it has received, and read a single message in full, using [`Client`] and [`ClientBuilder`].
//!
//! ## Audience and uses
//! For Rust developers who need throwaway addresses in integration tests, demos, or automation scripts without running mail infrastructure: obtain an [`Address`], poll it for [`MessageSummary`] entries, then fetch a [`MessageDetail`] by id.
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest`. Every operation is a single GET round trip; nothing is cached, retried, or polled in the background.
//!
//! ## Out of scope
//! Not a general-purpose mail client, SMTP sender, or durable mailbox. It only proxies the 1secmail service and inherits its availability and retention limits.
//!
//! ## Errors
//! Transport failures and non-2xx statuses surface as [`Error::Request`], truncated bodies as [`Error::Read`], and malformed JSON as [`Error::Json`] unless the client was built with [`ClientBuilder::lenient_decode`]. Addresses that are not `login@domain` are rejected with [`Error::InvalidAddress`]. The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Logging
//! Requests are traced at `debug` level through the `tracing` crate; install a subscriber in your application to see them.
//!
//! ## Example
//! ```no_run
//! use secmail_client::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), secmail_client::Error> {
//!     let client = Client::new()?;
//!     let address = client.allocate_mailbox().await?;
//!     println!("Allocated: {}", address);
//!
//!     for msg in client.list_messages(&address).await? {
//!         let detail = client.read_message(&address, msg.id).await?;
//!         println!("From: {}, Subject: {}", detail.from, detail.subject);
//!     }
//!     Ok(())
//! }
//! ```

mod address;
mod client;
mod error;
mod models;

pub use address::{Address, RESERVED_LOGINS, is_reserved_login};
pub use client::{Client, ClientBuilder};
pub use error::Error;
pub use models::{Attachment, MessageDetail, MessageSummary};

/// Result type alias for 1secmail operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
