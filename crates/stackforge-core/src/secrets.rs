//! Credential generation for scaffolded projects.
//!
//! All randomness comes from the operating system CSPRNG. The functions are
//! stateless, so they are safe to call from any thread.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{RngCore, rngs::OsRng};

const ALPHANUMERIC: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub const PLACEHOLDER_AUTH_SECRET: &str = "dev-auth-secret-change-me";
pub const PLACEHOLDER_SESSION_SECRET: &str = "dev-session-secret-change-me";
pub const PLACEHOLDER_API_KEY: &str = "dev-api-key-change-me";

fn random_bytes(n: usize) -> Vec<u8> {
    let mut buf = vec![0u8; n];
    OsRng.fill_bytes(&mut buf);
    buf
}

/// `n` random bytes as lowercase hex (`2n` characters).
pub fn hex(n: usize) -> String {
    hex::encode(random_bytes(n))
}

/// `n` random bytes as URL-safe base64 without padding.
pub fn base64url(n: usize) -> String {
    URL_SAFE_NO_PAD.encode(random_bytes(n))
}

/// `n` characters from `[A-Za-z0-9]`.
///
/// Each byte is reduced modulo 62, which slightly favours the first eight
/// symbols. Acceptable for development API keys.
pub fn alnum(n: usize) -> String {
    random_bytes(n)
        .into_iter()
        .map(|b| ALPHANUMERIC[(b % 62) as usize] as char)
        .collect()
}

/// The three credentials injected into every generation context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretSet {
    pub auth_secret: String,
    pub session_secret: String,
    pub api_key: String,
}

impl SecretSet {
    /// Fresh random secrets.
    pub fn secure() -> Self {
        Self {
            auth_secret: base64url(32),
            session_secret: hex(32),
            api_key: alnum(32),
        }
    }

    /// Fixed, well-known development values.
    pub fn placeholder() -> Self {
        Self {
            auth_secret: PLACEHOLDER_AUTH_SECRET.into(),
            session_secret: PLACEHOLDER_SESSION_SECRET.into(),
            api_key: PLACEHOLDER_API_KEY.into(),
        }
    }

    pub fn generate(secure: bool) -> Self {
        if secure {
            Self::secure()
        } else {
            Self::placeholder()
        }
    }
}
