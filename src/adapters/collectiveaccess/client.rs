//! HTTP client for the CollectiveAccess GraphQL services
//!
//! Every call is one `POST` with a JSON body `{"query": "..."}`. Bodies are
//! parsed as JSON whatever the status code, because the services report
//! GraphQL errors inside ordinary responses. No call is retried.

use super::models::{parse_login, parse_search};
use super::query::{login_query, search_query, AUTH_ENDPOINT, SEARCH_ENDPOINT};
use super::source::SearchSource;
use super::token::TokenCache;
use crate::config::CollectiveAccessConfig;
use crate::domain::search::{SearchRequest, SearchResponse};
use crate::domain::{CafetchError, Credentials, Result, ResultExt};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::sync::Mutex;

/// Client for one CollectiveAccess instance
///
/// Holds the resolved credentials and a [`TokenCache`]; searches log in on
/// first use and again whenever the cached token has aged out.
///
/// # Example
///
/// ```no_run
/// use cafetch::adapters::collectiveaccess::{CollectiveAccessClient, SearchSource};
/// use cafetch::config::{secret_string, CollectiveAccessConfig};
/// use cafetch::domain::Credentials;
///
/// # async fn example() -> cafetch::domain::Result<()> {
/// let credentials = Credentials::new(
///     "https://collections.example.org",
///     "api",
///     secret_string("secret".to_string()),
/// );
/// let client = CollectiveAccessClient::new(credentials, &CollectiveAccessConfig::default())?;
/// let total = client.count("*", &[]).await?;
/// println!("{total} objects");
/// # Ok(())
/// # }
/// ```
pub struct CollectiveAccessClient {
    http: Client,
    credentials: Credentials,
    tokens: Mutex<TokenCache>,
    clock: fn() -> DateTime<Utc>,
}

impl CollectiveAccessClient {
    /// Build a client from resolved credentials and connection settings
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the HTTP client cannot be built.
    pub fn new(credentials: Credentials, config: &CollectiveAccessConfig) -> Result<Self> {
        let mut builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds));

        if !config.tls_verify {
            tracing::warn!("TLS certificate verification is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder.build().map_err(|e| {
            CafetchError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            http,
            credentials,
            tokens: Mutex::new(TokenCache::new(Duration::from_secs(
                config.token_refresh_seconds,
            ))),
            clock: Utc::now,
        })
    }

    /// Replace the time source used for token freshness
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Log in and return a new JWT, bypassing the cache
    ///
    /// # Errors
    ///
    /// `Request` on transport or JSON failures, `Authentication` when the
    /// response carries no token.
    pub async fn authenticate(&self) -> Result<String> {
        let query = login_query(
            self.credentials.username(),
            self.credentials.password().expose_secret().as_ref(),
        );
        let body = self.post(AUTH_ENDPOINT, &query, None).await?;
        parse_login(body)
    }

    /// A valid JWT, from the cache when possible
    pub async fn token(&self) -> Result<String> {
        let now = (self.clock)();
        let mut tokens = self.tokens.lock().await;
        tokens
            .get_or_refresh(&self.credentials, now, || self.authenticate())
            .await
    }

    /// Force a fresh login and cache the result
    pub async fn verify_credentials(&self) -> Result<()> {
        let mut tokens = self.tokens.lock().await;
        tokens.invalidate();
        let now = (self.clock)();
        tokens
            .get_or_refresh(&self.credentials, now, || self.authenticate())
            .await?;
        tracing::info!(
            base_url = self.credentials.base_url(),
            username = self.credentials.username(),
            "CollectiveAccess credentials accepted"
        );
        Ok(())
    }

    /// Number of logins performed so far
    pub async fn login_count(&self) -> u64 {
        self.tokens.lock().await.logins()
    }

    async fn post(&self, endpoint: &str, query: &str, bearer: Option<&str>) -> Result<Value> {
        let url = self.credentials.endpoint(endpoint);
        tracing::debug!(url = %url, authenticated = bearer.is_some(), "POST GraphQL query");

        let mut request = self.http.post(&url).json(&json!({ "query": query }));
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CafetchError::Request(format!("POST {url} failed: {e}")))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            CafetchError::Request(format!("Failed to read response from {url}: {e}"))
        })?;

        if !status.is_success() {
            tracing::debug!(url = %url, status = %status, "Non-success status, parsing body anyway");
        }

        serde_json::from_str(&text).map_err(|e| {
            CafetchError::Request(format!(
                "Invalid JSON from {url} (status {status}): {e}"
            ))
        })
    }
}

#[async_trait]
impl SearchSource for CollectiveAccessClient {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let token = self.token().await?;
        tracing::debug!(start = request.start, limit = request.limit, "Searching objects");
        let body = self
            .post(SEARCH_ENDPOINT, &search_query(request), Some(&token))
            .await?;
        parse_search(body).with_context(|| {
            format!("search at offset {} (limit {})", request.start, request.limit)
        })
    }

    fn base_url(&self) -> &str {
        self.credentials.base_url()
    }
}
