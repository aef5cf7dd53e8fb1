//! Data models for mail.tm API responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bearer token for an existing account, as returned by `POST /token`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    id: String,
    token: String,
}

impl Token {
    /// Create a token from a previously obtained account id and bearer string.
    pub fn new(id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            token: token.into(),
        }
    }

    /// Id of the account this token authenticates.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Raw bearer string.
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("id", &self.id)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token)
    }
}

/// A mail.tm account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    #[serde(default)]
    pub address: String,
    /// Storage quota in bytes.
    #[serde(default)]
    pub quota: u64,
    /// Storage used in bytes.
    #[serde(default)]
    pub used: u64,
    #[serde(default)]
    pub is_disabled: bool,
    #[serde(default)]
    pub is_deleted: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A domain that accounts can be created under.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub id: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_private: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Sender or recipient of a message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Addressee {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub name: String,
}

/// Attachment metadata. The content itself lives at `download_url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub disposition: String,
    #[serde(default)]
    pub transfer_encoding: String,
    #[serde(default)]
    pub related: bool,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub download_url: String,
}

/// A received message.
///
/// Listings only fill the summary fields; `text`, `html`, `cc`, `bcc` and
/// `attachments` are populated when fetching a single message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub msgid: String,
    #[serde(default)]
    pub from: Addressee,
    #[serde(default)]
    pub to: Vec<Addressee>,
    #[serde(default)]
    pub cc: Vec<Addressee>,
    #[serde(default)]
    pub bcc: Vec<Addressee>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub html: Vec<String>,
    #[serde(default)]
    pub seen: bool,
    #[serde(default)]
    pub flagged: bool,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub has_attachments: bool,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub download_url: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Raw source of a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub id: String,
    #[serde(default)]
    pub download_url: String,
    /// Full RFC 822 text of the message.
    #[serde(default)]
    pub data: String,
}

/// One page of a server-paginated collection.
///
/// The page number is not part of the wire format: it is set from the
/// request and is neither serialized nor read back, so a deserialized view
/// always reports page 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageView<T> {
    #[serde(skip, default = "first_page")]
    page: u32,
    #[serde(rename = "hydra:totalItems", alias = "totalItems", default)]
    total_items: u64,
    #[serde(rename = "hydra:member", alias = "member", default = "Vec::new")]
    members: Vec<T>,
}

fn first_page() -> u32 {
    1
}

impl<T> PageView<T> {
    /// Page number this view was requested for, starting at 1.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Total number of items across all pages.
    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Items on this page, in server order.
    pub fn members(&self) -> &[T] {
        &self.members
    }

    /// Consume the view, keeping only the items.
    pub fn into_members(self) -> Vec<T> {
        self.members
    }

    pub(crate) fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }
}

impl<T> IntoIterator for PageView<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

/// Page of domains from `GET /domains`.
pub type DomainPageView = PageView<Domain>;

/// Page of messages from `GET /messages`.
pub type MessagePageView = PageView<Message>;
