//! Connection credentials for a CollectiveAccess instance
//!
//! A [`Credentials`] value is built once per invocation (see
//! [`crate::config::resolve`]) and never changes afterwards. Its
//! [`context_hash`](Credentials::context_hash) identifies the connection
//! context a cached token was issued for.

use crate::config::SecretString;
use secrecy::ExposeSecret;
use sha2::{Digest, Sha256};

/// Base URL, username and password for one CollectiveAccess instance
///
/// # Examples
///
/// ```
/// use cafetch::config::secret_string;
/// use cafetch::domain::Credentials;
///
/// let creds = Credentials::new(
///     "https://ca.example.org/",
///     "api",
///     secret_string("s3cret".to_string()),
/// );
/// assert_eq!(creds.base_url(), "https://ca.example.org");
/// assert_eq!(creds.endpoint("/service/Auth"), "https://ca.example.org/service/Auth");
/// ```
#[derive(Debug, Clone)]
pub struct Credentials {
    base_url: String,
    username: String,
    password: SecretString,
}

impl Credentials {
    /// Create credentials; a trailing `/` on the base URL is dropped
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            username: username.into(),
            password,
        }
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Username used for login
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Password used for login
    pub fn password(&self) -> &SecretString {
        &self.password
    }

    /// Absolute URL of a service endpoint such as `/service/Search`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// SHA-256 over the length-prefixed base URL, username and password
    ///
    /// Each field is preceded by its byte length as a big-endian `u64`, so no
    /// choice of field contents can make two different triples encode to the
    /// same byte stream.
    pub fn context_hash(&self) -> String {
        let mut hasher = Sha256::new();
        for field in [
            self.base_url.as_str(),
            self.username.as_str(),
            self.password.expose_secret().as_ref(),
        ] {
            hasher.update((field.len() as u64).to_be_bytes());
            hasher.update(field.as_bytes());
        }
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn creds(base: &str, user: &str, pass: &str) -> Credentials {
        Credentials::new(base, user, secret_string(pass.to_string()))
    }

    #[test]
    fn test_context_hash_deterministic() {
        let a = creds("https://ca.example.org", "api", "pw");
        let b = creds("https://ca.example.org", "api", "pw");
        assert_eq!(a.context_hash(), b.context_hash());
        assert_eq!(a.context_hash().len(), 64);
    }

    #[test]
    fn test_context_hash_changes_with_any_field() {
        let base = creds("https://ca.example.org", "api", "pw").context_hash();
        assert_ne!(base, creds("https://other.example.org", "api", "pw").context_hash());
        assert_ne!(base, creds("https://ca.example.org", "api2", "pw").context_hash());
        assert_ne!(base, creds("https://ca.example.org", "api", "pw2").context_hash());
    }

    #[test]
    fn test_context_hash_field_boundaries() {
        // Shifting characters between fields must not collide
        let a = creds("https://ca.example.org", "ab", "c").context_hash();
        let b = creds("https://ca.example.org", "a", "bc").context_hash();
        assert_ne!(a, b);

        let c = creds("https://ca.example.org", "a\0b", "c").context_hash();
        let d = creds("https://ca.example.org", "a", "b\0c").context_hash();
        assert_ne!(c, d);
    }

    #[test]
    fn test_trailing_slash_ignored() {
        let a = creds("https://ca.example.org/", "api", "pw");
        let b = creds("https://ca.example.org", "api", "pw");
        assert_eq!(a.base_url(), "https://ca.example.org");
        assert_eq!(a.context_hash(), b.context_hash());
    }

    #[test]
    fn test_debug_redacts_password() {
        let c = creds("https://ca.example.org", "api", "very-secret-pw");
        let debug = format!("{c:?}");
        assert!(!debug.contains("very-secret-pw"));
        assert!(debug.contains("api"));
    }
}
