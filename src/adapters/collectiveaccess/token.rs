//! Bearer token cache
//!
//! The cache holds at most one JWT together with the context hash of the
//! credentials it was issued for and the time it was issued. A lookup hits
//! only when the hash matches and the token is no older than the refresh
//! window. Tokens are replaced wholesale, never edited.

use crate::config::{secret_string, SecretString};
use crate::domain::{Credentials, Result};
use chrono::{DateTime, Duration, Utc};
use secrecy::ExposeSecret;
use std::future::Future;

/// Default refresh window in seconds
pub const DEFAULT_REFRESH_AFTER_SECS: u64 = 480;

/// An issued JWT
#[derive(Debug, Clone)]
pub struct Token {
    value: SecretString,
    context_hash: String,
    issued_at: DateTime<Utc>,
}

impl Token {
    pub fn new(value: String, context_hash: String, issued_at: DateTime<Utc>) -> Self {
        Self {
            value: secret_string(value),
            context_hash,
            issued_at,
        }
    }

    /// The raw token, for the `Authorization` header
    pub fn value(&self) -> &str {
        self.value.expose_secret().as_ref()
    }

    pub fn context_hash(&self) -> &str {
        &self.context_hash
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Whether the token may be reused for `context_hash` at `now`
    pub fn is_valid_for(&self, context_hash: &str, now: DateTime<Utc>, window: Duration) -> bool {
        self.context_hash == context_hash && now - self.issued_at <= window
    }
}

/// Single-slot token cache with a freshness window
#[derive(Debug)]
pub struct TokenCache {
    token: Option<Token>,
    refresh_after: Duration,
    logins: u64,
}

impl TokenCache {
    /// Create an empty cache whose tokens go stale after `refresh_after`
    pub fn new(refresh_after: std::time::Duration) -> Self {
        let refresh_after = Duration::from_std(refresh_after).unwrap_or_else(|_| {
            tracing::warn!(
                requested = ?refresh_after,
                default_secs = DEFAULT_REFRESH_AFTER_SECS,
                "Token refresh window out of range, using default"
            );
            Duration::seconds(DEFAULT_REFRESH_AFTER_SECS as i64)
        });
        Self {
            token: None,
            refresh_after,
            logins: 0,
        }
    }

    /// The cached token if it is still valid for `context_hash` at `now`
    pub fn lookup(&self, context_hash: &str, now: DateTime<Utc>) -> Option<&Token> {
        self.token
            .as_ref()
            .filter(|t| t.is_valid_for(context_hash, now, self.refresh_after))
    }

    /// Replace the cached token
    pub fn store(&mut self, token: Token) {
        self.token = Some(token);
    }

    /// Drop the cached token so the next lookup misses
    pub fn invalidate(&mut self) {
        self.token = None;
    }

    /// Number of logins performed through [`get_or_refresh`](Self::get_or_refresh)
    pub fn logins(&self) -> u64 {
        self.logins
    }

    /// Return a valid token for `credentials`, logging in when needed
    ///
    /// `authenticate` is only called on a miss. Its token is stored with the
    /// credentials' context hash and `now` as issue time.
    ///
    /// # Errors
    ///
    /// Propagates the error from `authenticate`; the cache is left unchanged.
    pub async fn get_or_refresh<F, Fut>(
        &mut self,
        credentials: &Credentials,
        now: DateTime<Utc>,
        authenticate: F,
    ) -> Result<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        let context_hash = credentials.context_hash();

        if let Some(token) = self.lookup(&context_hash, now) {
            tracing::trace!(issued_at = %token.issued_at(), "Reusing cached token");
            return Ok(token.value().to_string());
        }

        tracing::debug!(
            base_url = credentials.base_url(),
            username = credentials.username(),
            "Authenticating against CollectiveAccess"
        );
        let jwt = authenticate().await?;
        self.logins += 1;
        self.store(Token::new(jwt.clone(), context_hash, now));
        Ok(jwt)
    }
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new(std::time::Duration::from_secs(DEFAULT_REFRESH_AFTER_SECS))
    }
}
