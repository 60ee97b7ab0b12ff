use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::RoleError;
use crate::user::errors::UserIdError;
use crate::user::errors::UserNameError;

/// User aggregate entity.
///
/// The principal of the authentication subsystem. Plaintext passwords never
/// reach this type; only the argon2 PHC string is held.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: UserName,
    pub email: EmailAddress,
    pub photo: Option<String>,
    pub role: Role,
    pub password_hash: String,
    pub password_changed_at: Option<DateTime<Utc>>,
    pub password_reset: Option<PasswordReset>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a freshly signed-up user.
    ///
    /// The password has never been changed, so `password_changed_at` is
    /// absent and every session issued from now on is accepted.
    pub fn register(
        name: UserName,
        email: EmailAddress,
        photo: Option<String>,
        password_hash: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: UserId::new(),
            name,
            email,
            photo,
            role: Role::default(),
            password_hash,
            password_changed_at: None,
            password_reset: None,
            active: true,
            created_at: now,
        }
    }

    /// Instant recorded as `password_changed_at` for a change made at `now`.
    ///
    /// One second in the past, so that a session issued right after the
    /// change is not mistaken for a stale one.
    pub fn password_changed_stamp(now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::seconds(1)
    }

    /// Whether the password changed after a session issued at `issued_at`
    /// (unix seconds). Compared at whole-second resolution.
    pub fn changed_password_after(&self, issued_at: i64) -> bool {
        match self.password_changed_at {
            Some(changed_at) => changed_at.timestamp() > issued_at,
            None => false,
        }
    }
}

/// Pending password reset: hash of the emailed token and its deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordReset {
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
}

impl PasswordReset {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

impl From<auth::IssuedResetToken> for PasswordReset {
    fn from(issued: auth::IssuedResetToken) -> Self {
        Self {
            token_hash: issued.token_hash,
            expires_at: issued.expires_at,
        }
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Arguments
    /// * `s` - UUID string to parse
    ///
    /// # Returns
    /// Parsed UserId
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type
///
/// Trimmed, non-empty and at most 100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    const MAX_LENGTH: usize = 100;

    /// Create a new valid name.
    ///
    /// # Errors
    /// * `Empty` - Name is blank after trimming
    /// * `TooLong` - Name longer than 100 characters
    pub fn new(name: String) -> Result<Self, UserNameError> {
        let name = name.trim();
        let length = name.chars().count();
        if length == 0 {
            Err(UserNameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(UserNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Trimmed and lowercased before validation with an RFC 5322 compliant
/// parser, so lookups and the uniqueness constraint are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// Normalized EmailAddress value object
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let normalized = email.trim().to_lowercase();
        email_address::EmailAddress::from_str(&normalized)
            .map(|_| EmailAddress(normalized))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    ///
    /// # Returns
    /// Email string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Authorization role carried by every user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    #[default]
    User,
    Guide,
    LeadGuide,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Guide => "guide",
            Role::LeadGuide => "lead-guide",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "guide" => Ok(Role::Guide),
            "lead-guide" => Ok(Role::LeadGuide),
            "admin" => Ok(Role::Admin),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate password that passed the password policy.
///
/// Built from the password and its confirmation; the confirmation is not
/// kept. Debug output never shows the plaintext.
#[derive(Clone)]
pub struct NewPassword(String);

impl NewPassword {
    pub const MIN_LENGTH: usize = 8;

    /// Validate a new password against its confirmation.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than 8 characters
    /// * `Mismatch` - Confirmation differs from the password
    pub fn new(password: String, confirmation: &str) -> Result<Self, PasswordPolicyError> {
        if password.chars().count() < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }
        if password != confirmation {
            return Err(PasswordPolicyError::Mismatch);
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for NewPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NewPassword(****)")
    }
}

/// Outgoing transactional email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: EmailAddress,
    pub subject: String,
    pub body: String,
}

/// Command to sign up a new user with domain types
#[derive(Debug)]
pub struct SignupCommand {
    pub name: UserName,
    pub email: EmailAddress,
    pub photo: Option<String>,
    pub password: NewPassword,
}

/// Command to log in with raw credentials.
///
/// The email is kept raw so that a malformed address fails the same way as
/// an unknown one.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// Command to change the caller's own password
#[derive(Debug)]
pub struct UpdatePasswordCommand {
    pub current_password: String,
    pub new_password: NewPassword,
}

/// Command to update the caller's own profile.
///
/// All fields are optional to support partial updates.
/// Only provided fields will be updated.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileCommand {
    pub name: Option<UserName>,
    pub email: Option<EmailAddress>,
    pub photo: Option<String>,
}

impl UpdateProfileCommand {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.photo.is_none()
    }
}

/// Command for administrators to update any user, including the role
#[derive(Debug, Default)]
pub struct AdminUpdateUserCommand {
    pub name: Option<UserName>,
    pub email: Option<EmailAddress>,
    pub photo: Option<String>,
    pub role: Option<Role>,
}
