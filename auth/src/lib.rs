//! Authentication utilities library
//!
//! Credential primitives for the tour service:
//! - Password hashing (Argon2id)
//! - Session tokens (HS256 JWT with explicit expiry evaluation)
//! - Password-reset tokens (random, single-use, stored only as a hash)
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::days(90)).unwrap();
//! let hash = auth.hash_password("password123").unwrap();
//!
//! let result = auth.authenticate("password123", &hash, "user123").unwrap();
//! let claims = auth.validate_session(&result.access_token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```
//!
//! ## Reset Tokens
//! ```
//! use auth::ResetTokenIssuer;
//! use chrono::Utc;
//!
//! let issued = ResetTokenIssuer::new().issue(Utc::now());
//! assert_eq!(ResetTokenIssuer::hash_token(&issued.token), issued.token_hash);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod reset;

pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use reset::IssuedResetToken;
pub use reset::ResetTokenIssuer;
