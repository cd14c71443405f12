//! 1secmail async client implementation.

use crate::address::random_login;
use crate::{Address, Error, MessageDetail, MessageSummary, Result};
use rand::seq::IndexedRandom;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

const BASE_URL: &str = "https://www.1secmail.com/api/v1/";
const USER_AGENT_VALUE: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Async client for the 1secmail temporary email service.
///
/// Use [`Client::new`] for defaults or [`Client::builder`] for custom settings
/// like the endpoint, a proxy, a request timeout, or lenient decoding.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    proxy: Option<String>,
    lenient_decode: bool,
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client against the public 1secmail endpoint.
    ///
    /// No request is made until an operation is called.
    ///
    /// # Examples
    /// ```no_run
    /// # use secmail_client::Client;
    /// # fn main() -> Result<(), secmail_client::Error> {
    /// let client = Client::new()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    /// The API endpoint every request is sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the proxy URL if one was configured.
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Whether JSON decode failures are swallowed into default values.
    pub fn is_lenient(&self) -> bool {
        self.lenient_decode
    }

    /// Allocate one fresh random mailbox.
    ///
    /// Every call allocates a new address.
    ///
    /// # Examples
    /// ```no_run
    /// # use secmail_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), secmail_client::Error> {
    /// let client = Client::new()?;
    /// let address = client.allocate_mailbox().await?;
    /// println!("{address}");
    /// # Ok(())
    /// # }
    /// ```
    pub async fn allocate_mailbox(&self) -> Result<Address> {
        self.allocate_mailboxes(1)
            .await?
            .into_iter()
            .next()
            .ok_or(Error::EmptyResponse)
    }

    /// Allocate `count` fresh random mailboxes in one request.
    ///
    /// # Arguments
    /// * `count` - How many addresses to allocate; must be at least 1
    ///
    /// # Returns
    /// The allocated addresses, in the order the service lists them
    ///
    /// # Examples
    /// ```no_run
    /// # use secmail_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), secmail_client::Error> {
    /// let client = Client::new()?;
    /// for address in client.allocate_mailboxes(5).await? {
    ///     println!("{address}");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn allocate_mailboxes(&self, count: u32) -> Result<Vec<Address>> {
        if count == 0 {
            return Err(Error::InvalidCount);
        }

        let count = count.to_string();
        let addresses: Vec<String> = self
            .fetch_json("genRandomMailbox", &[("count", count.as_str())])
            .await?;

        if addresses.is_empty() {
            return Err(Error::EmptyResponse);
        }

        addresses.iter().map(|s| s.parse()).collect()
    }

    /// List the domains the service hosts mailboxes on.
    ///
    /// # Examples
    /// ```no_run
    /// # use secmail_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), secmail_client::Error> {
    /// let client = Client::new()?;
    /// let domains = client.domains().await?;
    /// println!("{}", domains.join(", "));
    /// # Ok(())
    /// # }
    /// ```
    pub async fn domains(&self) -> Result<Vec<String>> {
        self.fetch_json("getDomainList", &[]).await
    }

    /// Build a mailbox address with a login of your choosing.
    ///
    /// The login must not be reserved and the domain must be one of
    /// [`Client::domains`]. This checks the domain list with one request;
    /// the mailbox itself exists as soon as mail is sent to it.
    ///
    /// # Arguments
    /// * `login` - The part before @
    /// * `domain` - One of the service's domains
    ///
    /// # Returns
    /// The validated address
    ///
    /// # Examples
    /// ```no_run
    /// # use secmail_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), secmail_client::Error> {
    /// let client = Client::new()?;
    /// let address = client.custom_mailbox("myalias", "1secmail.com").await?;
    /// assert_eq!(address.to_string(), "myalias@1secmail.com");
    /// # Ok(())
    /// # }
    /// ```
    pub async fn custom_mailbox(&self, login: &str, domain: &str) -> Result<Address> {
        let address = Address::new(login, domain)?;
        if address.is_reserved() {
            return Err(Error::ReservedLogin(login.to_string()));
        }

        let domains = self.domains().await?;
        if !domains.iter().any(|d| d.eq_ignore_ascii_case(domain)) {
            return Err(Error::UnsupportedDomain(domain.to_string()));
        }

        Ok(address)
    }

    /// Build a mailbox with a locally generated login on a random supported domain.
    ///
    /// # Examples
    /// ```no_run
    /// # use secmail_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), secmail_client::Error> {
    /// let client = Client::new()?;
    /// let address = client.random_mailbox().await?;
    /// println!("{address}");
    /// # Ok(())
    /// # }
    /// ```
    pub async fn random_mailbox(&self) -> Result<Address> {
        let domains = self.domains().await?;
        let (login, domain) = {
            let mut rng = rand::rng();
            let domain = domains.choose(&mut rng).ok_or(Error::EmptyResponse)?;
            (random_login(&mut rng), domain.clone())
        };
        Address::new(login, domain)
    }

    /// List the messages in a mailbox, in the order the server returns them.
    ///
    /// An empty inbox is an empty `Vec`, not an error.
    ///
    /// # Arguments
    /// * `address` - The mailbox to list
    ///
    /// # Returns
    /// A summary of each message in the inbox
    ///
    /// # Examples
    /// ```no_run
    /// # use secmail_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), secmail_client::Error> {
    /// let client = Client::new()?;
    /// let address = client.allocate_mailbox().await?;
    /// for msg in client.list_messages(&address).await? {
    ///     println!("{}: {}", msg.from, msg.subject);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_messages(&self, address: &Address) -> Result<Vec<MessageSummary>> {
        self.fetch_json("getMessages", &address.query()).await
    }

    /// Fetch the full content of one message.
    ///
    /// The service answers unknown ids with an empty object, which decodes to
    /// a zero-valued [`MessageDetail`] rather than an error; check
    /// [`MessageDetail::is_empty`] to tell the two apart.
    ///
    /// # Arguments
    /// * `address` - The mailbox holding the message
    /// * `id` - The message id, as seen in [`Client::list_messages`]
    ///
    /// # Returns
    /// The full message including its bodies and attachment list
    ///
    /// # Examples
    /// ```no_run
    /// # use secmail_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), secmail_client::Error> {
    /// let client = Client::new()?;
    /// let address = "ab12cd@1secmail.com".parse()?;
    /// let messages = client.list_messages(&address).await?;
    /// if let Some(msg) = messages.first() {
    ///     let detail = client.read_message(&address, msg.id).await?;
    ///     println!("{}", detail.text_body);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn read_message(&self, address: &Address, id: u64) -> Result<MessageDetail> {
        let id = id.to_string();
        let [login, domain] = address.query();
        self.fetch_json("readMessage", &[login, domain, ("id", id.as_str())])
            .await
    }

    /// Download the raw bytes of one attachment.
    ///
    /// # Arguments
    /// * `address` - The mailbox holding the message
    /// * `id` - The message id
    /// * `filename` - The attachment's filename, as listed in [`MessageDetail::attachments`]
    ///
    /// # Returns
    /// The attachment contents
    ///
    /// # Examples
    /// ```no_run
    /// # use secmail_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), secmail_client::Error> {
    /// let client = Client::new()?;
    /// let address = "ab12cd@1secmail.com".parse()?;
    /// let detail = client.read_message(&address, 639).await?;
    /// for attachment in &detail.attachments {
    ///     let bytes = client.download_attachment(&address, 639, &attachment.filename).await?;
    ///     println!("{}: {} bytes", attachment.filename, bytes.len());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn download_attachment(
        &self,
        address: &Address,
        id: u64,
        filename: &str,
    ) -> Result<Vec<u8>> {
        let id = id.to_string();
        let [login, domain] = address.query();
        self.fetch_bytes("download", &[login, domain, ("id", id.as_str()), ("file", filename)])
            .await
    }

    /// Download an attachment and write it to `path`.
    ///
    /// # Arguments
    /// * `address` - The mailbox holding the message
    /// * `id` - The message id
    /// * `filename` - The attachment's filename
    /// * `path` - Where to write the file; its parent directory must exist
    ///
    /// # Examples
    /// ```no_run
    /// # use secmail_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), secmail_client::Error> {
    /// let client = Client::new()?;
    /// let address = "ab12cd@1secmail.com".parse()?;
    /// client.save_attachment(&address, 639, "iometer.pdf", "iometer.pdf").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn save_attachment(
        &self,
        address: &Address,
        id: u64,
        filename: &str,
        path: impl AsRef<Path>,
    ) -> Result<()> {
        let bytes = self.download_attachment(address, id, filename).await?;
        tokio::fs::write(path, bytes).await?;
        Ok(())
    }

    /// Fetch and decode one API action.
    async fn fetch_json<T>(&self, action: &str, params: &[(&str, &str)]) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let body = self.fetch_bytes(action, params).await?;

        match serde_json::from_slice(&body) {
            Ok(value) => Ok(value),
            Err(err) if self.lenient_decode => {
                warn!(action, error = %err, "discarding undecodable response");
                Ok(T::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Common GET request pattern; reads the whole body into memory.
    async fn fetch_bytes(&self, action: &str, params: &[(&str, &str)]) -> Result<Vec<u8>> {
        debug!(action, url = %self.base_url, "sending request");

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("action", action)])
            .query(params)
            .send()
            .await
            .map_err(Error::Request)?
            .error_for_status()
            .map_err(Error::Request)?;

        let status = response.status();
        let body = response.bytes().await.map_err(Error::Read)?;
        debug!(action, %status, len = body.len(), "received response");

        Ok(body.to_vec())
    }
}

/// Builder for configuring a 1secmail client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    proxy: Option<String>,
    timeout: Option<Duration>,
    danger_accept_invalid_certs: bool,
    user_agent: String,
    lenient_decode: bool,
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
    /// - Public 1secmail endpoint
    /// - No proxy
    /// - No request timeout
    /// - `danger_accept_invalid_certs = false`
    /// - Crate name and version as user agent
    /// - Strict decoding
    pub fn new() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            proxy: None,
            timeout: None,
            danger_accept_invalid_certs: false,
            user_agent: USER_AGENT_VALUE.to_string(),
            lenient_decode: false,
        }
    }

    /// Override the API endpoint URL.
    ///
    /// Useful for testing against a mock server.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set a proxy URL (e.g., "socks5://127.0.0.1:9050").
    ///
    /// This uses reqwest's proxy support for all requests.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Abort requests that take longer than `timeout`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
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

    /// Return default values instead of [`Error::Json`] when a response
    /// fails to decode (default: false).
    pub fn lenient_decode(mut self, value: bool) -> Self {
        self.lenient_decode = value;
        self
    }

    /// Build the client.
    ///
    /// # Examples
    /// ```no_run
    /// # use secmail_client::Client;
    /// # use std::time::Duration;
    /// # fn main() -> Result<(), secmail_client::Error> {
    /// let client = Client::builder()
    ///     .user_agent("my-app/1.0")
    ///     .timeout(Duration::from_secs(10))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<Client> {
        let mut builder = reqwest::Client::builder()
            .user_agent(self.user_agent)
            .danger_accept_invalid_certs(self.danger_accept_invalid_certs);

        if let Some(proxy_url) = &self.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder.build()?;

        Ok(Client {
            http,
            base_url: self.base_url,
            proxy: self.proxy,
            lenient_decode: self.lenient_decode,
        })
    }
}
