use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Digest;
use sha2::Sha256;

/// Number of random bytes in a reset token before hex encoding.
pub const RESET_TOKEN_BYTES: usize = 32;

/// A freshly issued password-reset token.
///
/// `token` is the only copy of the plaintext and must be handed to the
/// out-of-band channel; only `token_hash` and `expires_at` are persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct IssuedResetToken {
    pub token: String,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for IssuedResetToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedResetToken")
            .field("token", &"<redacted>")
            .field("token_hash", &self.token_hash)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Issues single-use, time-limited password-reset tokens.
///
/// Only the hex SHA-256 of a token is ever stored or looked up.
#[derive(Debug, Clone, Copy)]
pub struct ResetTokenIssuer {
    ttl: Duration,
}

impl ResetTokenIssuer {
    /// Reset tokens are valid for ten minutes unless configured otherwise.
    pub fn new() -> Self {
        Self::with_ttl(Duration::minutes(10))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self { ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Generate a new token valid until `now + ttl`.
    pub fn issue(&self, now: DateTime<Utc>) -> IssuedResetToken {
        let mut bytes = [0u8; RESET_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        let token = hex::encode(bytes);

        IssuedResetToken {
            token_hash: Self::hash_token(&token),
            token,
            expires_at: now + self.ttl,
        }
    }

    /// Derive the lookup key for a presented token (hex-encoded SHA-256).
    pub fn hash_token(token: &str) -> String {
        hex::encode(Sha256::digest(token.as_bytes()))
    }
}

impl Default for ResetTokenIssuer {
    fn default() -> Self {
        Self::new()
    }
}
