//! mail.tm async client implementation.

use crate::{
    Account, Domain, DomainPageView, Error, Message, MessagePageView, Result, Source, Token,
};
use reqwest::{Method, Url};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::time::Duration;

/// Async client for the mail.tm disposable email API.
///
/// Use [`Client::new`] for an anonymous session, [`Client::with_token`] for an
/// authenticated one, or [`Client::builder`] for custom settings like proxies,
/// timeouts, and a different base URL.
///
/// Cloning is cheap and clones share one connection pool, so requests may be
/// issued concurrently from several tasks.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    token: Option<Token>,
    proxy: Option<String>,
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create an unauthenticated client.
    ///
    /// Only [`Client::get_domains`], [`Client::get_domain`],
    /// [`Client::create_account`] and [`Client::get_token`] succeed without a
    /// token. No network request is made here.
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    /// Create a client that sends `Authorization: Bearer <token>` on every request.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailtm_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailtm_client::Error> {
    /// let anon = Client::new()?;
    /// let token = anon.get_token("me@example.com", "hunter22").await?.unwrap();
    /// anon.close();
    ///
    /// let client = Client::with_token(token)?;
    /// let me = client.get_me().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_token(token: Token) -> Result<Self> {
        ClientBuilder::new().token(token).build()
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Token attached to this session, if any.
    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// Get the proxy URL if one was configured.
    ///
    /// Returns `None` when no proxy was set on the builder.
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Send one request and return the raw body of a `200 OK` response.
    ///
    /// `path` is relative to the base URL. `body` is sent as JSON, and `params`
    /// as the query string. Only GET, POST, DELETE and PATCH are issued; any
    /// other verb fails with [`Error::MethodNotAllowed`] without touching the
    /// network. Every status other than 200 is mapped through
    /// [`Error::from_status`]. Nothing is retried.
    pub async fn interact(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        params: Option<&[(&str, &str)]>,
    ) -> Result<Vec<u8>> {
        if ![Method::GET, Method::POST, Method::DELETE, Method::PATCH].contains(&method) {
            return Err(Error::MethodNotAllowed);
        }

        let url = self.url(path);
        tracing::debug!(%method, %url, "sending request");

        let mut request = self.http.request(method.clone(), &url);
        if let Some(params) = params {
            request = request.query(params);
        }
        if let Some(body) = body {
            request = if method == Method::PATCH {
                request
                    .header(CONTENT_TYPE, "application/merge-patch+json")
                    .body(serde_json::to_vec(body)?)
            } else {
                request.json(body)
            };
        }

        let response = request.send().await?;
        let status = response.status();
        if let Some(err) = Error::from_status(status) {
            tracing::warn!(%method, %url, %status, "request rejected");
            return Err(err);
        }

        let bytes = response.bytes().await?;
        tracing::debug!(%status, len = bytes.len(), "received response");
        Ok(bytes.to_vec())
    }

    /// Fetch the account the session token belongs to.
    pub async fn get_me(&self) -> Result<Option<Account>> {
        let bytes = self.interact(Method::GET, "/me", None, None).await?;
        decode(&bytes)
    }

    /// List the domains accounts can be created under.
    pub async fn get_domains(&self) -> Result<Option<DomainPageView>> {
        let bytes = self.interact(Method::GET, "/domains", None, None).await?;
        Ok(decode::<DomainPageView>(&bytes)?.map(|view| view.with_page(1)))
    }

    /// Fetch a single domain.
    pub async fn get_domain(&self, domain_id: &str) -> Result<Option<Domain>> {
        let path = entity_path("domains", domain_id)?;
        let bytes = self.interact(Method::GET, &path, None, None).await?;
        decode(&bytes)
    }

    /// Fetch an account by id.
    ///
    /// The remote API serves this as `POST /accounts/{id}`.
    pub async fn get_account(&self, account_id: &str) -> Result<Option<Account>> {
        let path = entity_path("accounts", account_id)?;
        let params = [("id", account_id)];
        let bytes = self
            .interact(Method::POST, &path, None, Some(&params[..]))
            .await?;
        decode(&bytes)
    }

    /// Register a new account.
    ///
    /// The address domain must be one returned by [`Client::get_domains`];
    /// otherwise the server answers with [`Error::EntityNotProcessable`].
    ///
    /// # Examples
    /// ```no_run
    /// # use mailtm_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailtm_client::Error> {
    /// let client = Client::new()?;
    /// let domains = client.get_domains().await?.unwrap();
    /// let address = format!("myalias@{}", domains.members()[0].domain);
    /// let account = client.create_account(&address, "pw123456").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_account(&self, address: &str, password: &str) -> Result<Option<Account>> {
        let body = credentials(address, password);
        let bytes = self
            .interact(Method::POST, "/accounts", Some(&body), None)
            .await?;
        decode(&bytes)
    }

    /// Exchange an address and password for a bearer token.
    pub async fn get_token(&self, address: &str, password: &str) -> Result<Option<Token>> {
        let body = credentials(address, password);
        let bytes = self
            .interact(Method::POST, "/token", Some(&body), None)
            .await?;
        decode(&bytes)
    }

    /// Delete an account.
    ///
    /// With `None`, deletes the account the session token belongs to. Fails
    /// with [`Error::AccountTokenInvalid`] before sending anything if there is
    /// neither an id nor a token.
    pub async fn delete_account(&self, account_id: Option<&str>) -> Result<()> {
        let id = match (account_id, &self.token) {
            (Some(id), _) => id,
            (None, Some(token)) => token.id(),
            (None, None) => return Err(Error::AccountTokenInvalid),
        };
        let path = entity_path("accounts", id)?;
        self.interact(Method::DELETE, &path, None, None).await?;
        Ok(())
    }

    /// List messages, one page at a time. Pages start at 1.
    pub async fn get_messages(&self, page: u32) -> Result<Option<MessagePageView>> {
        let page_param = page.to_string();
        let params = [("page", page_param.as_str())];
        let bytes = self
            .interact(Method::GET, "/messages", None, Some(&params[..]))
            .await?;
        Ok(decode::<MessagePageView>(&bytes)?.map(|view| view.with_page(page)))
    }

    /// Fetch a single message including its body and attachments.
    pub async fn get_message(&self, message_id: &str) -> Result<Option<Message>> {
        let path = entity_path("messages", message_id)?;
        let params = [("id", message_id)];
        let bytes = self
            .interact(Method::GET, &path, None, Some(&params[..]))
            .await?;
        decode(&bytes)
    }

    /// Delete a message.
    pub async fn delete_message(&self, message_id: &str) -> Result<()> {
        let path = entity_path("messages", message_id)?;
        let params = [("id", message_id)];
        self.interact(Method::DELETE, &path, None, Some(&params[..]))
            .await?;
        Ok(())
    }

    /// Mark a message as read.
    pub async fn mark_as_seen(&self, message_id: &str) -> Result<()> {
        let path = entity_path("messages", message_id)?;
        let body = json!({ "seen": true });
        self.interact(Method::PATCH, &path, Some(&body), None)
            .await?;
        Ok(())
    }

    /// Fetch the raw source of a message.
    pub async fn get_source(&self, source_id: &str) -> Result<Option<Source>> {
        let path = entity_path("sources", source_id)?;
        let params = [("id", source_id)];
        let bytes = self
            .interact(Method::GET, &path, None, Some(&params[..]))
            .await?;
        decode(&bytes)
    }

    /// Release the session.
    ///
    /// Pooled connections close once every clone of this client is dropped.
    pub fn close(self) {
        tracing::debug!(base_url = %self.base_url, "closing client");
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Decode a response body, treating an empty body as no value.
fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<Option<T>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    Ok(Some(serde_json::from_slice(bytes)?))
}

/// Build `/{collection}/{id}` with `id` escaped as a single path segment.
///
/// Empty, `.` and `..` ids cannot be expressed as a segment and are rejected.
fn entity_path(collection: &str, id: &str) -> Result<String> {
    let invalid = || Error::InvalidId(id.to_string());
    if matches!(id, "" | "." | "..") {
        return Err(invalid());
    }
    let mut url = Url::parse("http://localhost/").map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|()| invalid())?
        .pop_if_empty()
        .push(collection)
        .push(id);
    Ok(url.path().to_string())
}

fn credentials(address: &str, password: &str) -> Value {
    json!({ "address": address, "password": password })
}

const BASE_URL: &str = "https://api.mail.tm";
const USER_AGENT_VALUE: &str = concat!("mailtm-client/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder for configuring a mail.tm client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    token: Option<Token>,
    proxy: Option<String>,
    danger_accept_invalid_certs: bool,
    user_agent: String,
    timeout: Duration,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - `https://api.mail.tm` base URL
    /// - No token
    /// - No proxy
    /// - `danger_accept_invalid_certs = false`
    /// - `mailtm-client/<version>` user agent
    /// - 30 second request timeout
    pub fn new() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            token: None,
            proxy: None,
            danger_accept_invalid_certs: false,
            user_agent: USER_AGENT_VALUE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the API base URL.
    ///
    /// Useful for testing against a local mock server.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Authenticate every request with this token.
    pub fn token(mut self, token: Token) -> Self {
        self.token = Some(token);
        self
    }

    /// Set a proxy URL (e.g., "socks5://127.0.0.1:9050").
    ///
    /// This uses reqwest's proxy support for all requests.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Control whether to accept invalid TLS certificates (default: false).
    pub fn danger_accept_invalid_certs(mut self, value: bool) -> Self {
        self.danger_accept_invalid_certs = value;
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Override the per-request timeout (default: 30 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    ///
    /// No network request is made. Fails if the proxy URL or token cannot be
    /// used, or the HTTP client cannot be initialized.
    pub fn build(self) -> Result<Client> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/ld+json"));
        if let Some(token) = &self.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(self.user_agent)
            .timeout(self.timeout)
            .danger_accept_invalid_certs(self.danger_accept_invalid_certs);

        if let Some(proxy_url) = &self.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        let http = builder.build()?;
        let base_url = self.base_url.trim_end_matches('/').to_string();
        tracing::debug!(
            base_url = %base_url,
            authenticated = self.token.is_some(),
            "built mail.tm client"
        );

        Ok(Client {
            http,
            base_url,
            token: self.token,
            proxy: self.proxy,
        })
    }
}
