use std::time::Duration;

use api_types::{Page, QueryParams};
use reqwest::Url;
use serde_json::Value;

use crate::{ClientError, DEFAULT_MAX_PAGES, ItemSource, PageSource, Result, api_url, fetch_all};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Basic-auth client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    username: String,
    password: String,
    max_pages: u32,
    http: reqwest::Client,
}

impl Client {
    /// Return a builder for `Client`.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl PageSource for Client {
    async fn fetch_page(&self, url: &Url, params: &QueryParams) -> Result<Page<Value>> {
        let res = self
            .http
            .get(url.clone())
            .basic_auth(&self.username, Some(&self.password))
            .query(params.as_slice())
            .send()
            .await
            .map_err(|err| {
                tracing::error!(%url, "error making request: {err}");
                ClientError::Transport(err)
            })?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            let err = match status.as_u16() {
                401 => ClientError::Unauthorized,
                403 => ClientError::Forbidden,
                404 => ClientError::NotFound(url.to_string()),
                code => ClientError::Server { status: code, body },
            };
            tracing::error!(%url, "request failed: {err}");
            return Err(err);
        }

        let body = res.text().await.map_err(ClientError::Transport)?;
        serde_json::from_str::<Page<Value>>(&body).map_err(|err| {
            tracing::error!(%url, "error parsing JSON response: {err}");
            ClientError::Decode(err.to_string())
        })
    }
}

impl ItemSource for Client {
    async fn fetch_items(&self, endpoint: &str, params: &QueryParams) -> Result<Vec<Value>> {
        let url = api_url(self.base_url.as_str(), endpoint)?;
        fetch_all(self, &url, params, self.max_pages).await
    }
}

/// The builder for `Client`
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: String,
    username: String,
    password: String,
    verify_ssl: bool,
    timeout: Duration,
    max_pages: u32,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            username: String::new(),
            password: String::new(),
            verify_ssl: true,
            timeout: DEFAULT_TIMEOUT,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl ClientBuilder {
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn credentials(mut self, username: &str, password: &str) -> Self {
        self.username = username.to_string();
        self.password = password.to_string();
        self
    }

    /// Accept invalid TLS certificates when `false`.
    pub fn verify_ssl(mut self, verify_ssl: bool) -> Self {
        self.verify_ssl = verify_ssl;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    /// Construct `Client`
    pub fn build(self) -> Result<Client> {
        let base_url = Url::parse(&self.base_url)
            .map_err(|err| ClientError::InvalidUrl(format!("{}: {err}", self.base_url)))?;
        if !self.verify_ssl {
            tracing::warn!("TLS certificate verification is disabled");
        }
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(!self.verify_ssl)
            .timeout(self.timeout)
            .build()?;

        Ok(Client {
            base_url,
            username: self.username,
            password: self.password,
            max_pages: self.max_pages,
            http,
        })
    }
}
