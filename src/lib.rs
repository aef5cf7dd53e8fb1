//! # mail.tm Client
//! Asynchronous wrapper around the [mail.tm](https://mail.tm) disposable email REST API, providing typed methods to create accounts, list domains, read and delete messages, and fetch raw message sources using [`Client`] and [`ClientBuilder`].
//!
//! ## Audience and uses
//! For Rust developers who need throwaway addresses in integration tests, demos, or automation scripts without running mail infrastructure: pick a [`Domain`], create an [`Account`], exchange its credentials for a [`Token`], then poll [`Message`]s and delete the account when done.
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest`. Each operation performs exactly one request; nothing is retried or cached, and the service allows 8 requests per second.
//!
//! ## Logging
//! Requests and rejected statuses are reported through `tracing` at `debug` and `warn` level. Install a subscriber to see them; the bearer token is never logged.
//!
//! ## Errors
//! Every status other than `200 OK` fails with the matching [`Error`] variant (for example [`Error::Ratelimit`] for 429 or [`Error::AccountTokenInvalid`] for 401). Transport failures surface as [`Error::Request`] and undecodable bodies as [`Error::Json`]. The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Example
//! ```no_run
//! use mailtm_client::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mailtm_client::Error> {
//!     let anon = Client::new()?;
//!     let domains = anon.get_domains().await?.expect("domain list");
//!     let address = format!("myalias@{}", domains.members()[0].domain);
//!     anon.create_account(&address, "pw123456").await?;
//!     let token = anon.get_token(&address, "pw123456").await?.expect("token");
//!     anon.close();
//!
//!     let client = Client::with_token(token)?;
//!     if let Some(page) = client.get_messages(1).await? {
//!         for msg in page {
//!             println!("From: {}, Subject: {}", msg.from.address, msg.subject);
//!         }
//!     }
//!
//!     client.delete_account(None).await?;
//!     client.close();
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod models;

pub use client::{Client, ClientBuilder};
pub use error::Error;
pub use models::{
    Account, Addressee, Attachment, Domain, DomainPageView, Message, MessagePageView, PageView,
    Source, Token,
};
pub use reqwest::Method;

/// Result type alias for mail.tm operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
