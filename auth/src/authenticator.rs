use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and session tokens.
///
/// Holds the signing secret and the session lifetime; both are fixed for the
/// life of the process.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    session_ttl: Duration,
}

/// Result of successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    /// Signed session token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for session token signing
    /// * `session_ttl` - Lifetime of issued session tokens
    ///
    /// # Errors
    /// * `MissingSecret` - No signing secret configured
    pub fn new(jwt_secret: &[u8], session_ttl: Duration) -> Result<Self, JwtError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret)?,
            session_ttl,
        })
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext candidate against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue a session token for `subject`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.verify_password(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issue_session(subject)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a session token for `subject`, issued now.
    pub fn issue_session(&self, subject: &str) -> Result<String, JwtError> {
        self.issue_session_at(subject, Utc::now())
    }

    /// Issue a session token for `subject` with an explicit issued-at instant.
    pub fn issue_session_at(&self, subject: &str, now: DateTime<Utc>) -> Result<String, JwtError> {
        let claims = Claims::for_subject(subject, now, self.session_ttl);
        self.jwt_handler.encode(&claims)
    }

    /// Validate a session token against the current time.
    pub fn validate_session(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate_session_at(token, Utc::now())
    }

    /// Validate a session token against `now`.
    ///
    /// # Errors
    /// * `Malformed` - Not a token, or not a session token
    /// * `InvalidSignature` - Signed with another secret
    /// * `TokenExpired` - `now` is at or past the token's expiry
    pub fn validate_session_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        let claims: Claims = self.jwt_handler.decode(token)?;

        if claims.is_expired(now.timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }
}
