use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for UserName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserNameError {
    #[error("Please provide your name")]
    Empty,

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Please provide a valid email: {0}")]
    InvalidFormat(String),
}

/// Error for new-password policy failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters")]
    TooShort { min: usize },

    #[error("Passwords are not the same!")]
    Mismatch,
}

/// Error for Role parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role '{0}': expected one of user, guide, lead-guide, admin")]
    Unknown(String),
}

/// Error for outbound email delivery
#[derive(Debug, Clone, Error)]
pub enum MailerError {
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    #[error("Failed to build email: {0}")]
    BuildFailed(String),

    #[error("Failed to deliver email: {0}")]
    DeliveryFailed(String),
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] UserNameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    #[error("Invalid role: {0}")]
    InvalidRole(#[from] RoleError),

    // Gate rejections
    #[error("{0}")]
    Unauthenticated(String),

    #[error("Please provide email and password!")]
    MissingCredentials,

    #[error("You do not have permission to perform this action")]
    Forbidden,

    // Domain-level errors
    #[error("{0}")]
    NotFound(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Your current password is wrong")]
    IncorrectCurrentPassword,

    #[error("Token is invalid or has expired")]
    ResetTokenInvalid,

    // Infrastructure errors
    #[error("{0}")]
    Transient(String),

    #[error("Authentication is misconfigured: {0}")]
    Fatal(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub const NOT_LOGGED_IN: &str = "You are not logged in! Please log in to get access.";
pub const INVALID_TOKEN: &str = "Invalid token. Please log in again!";
pub const EXPIRED_TOKEN: &str = "Your token has expired! Please log in again.";
pub const USER_NO_LONGER_EXISTS: &str = "The user belonging to this token does no longer exist.";
pub const PASSWORD_CHANGED: &str = "User recently changed password! Please log in again.";
pub const INCORRECT_CREDENTIALS: &str = "Incorrect email or password";
pub const NO_USER_WITH_EMAIL: &str = "There is no user with that email address";
pub const RESET_EMAIL_FAILED: &str = "There was an error sending the email. Try again later!";

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        UserError::Unknown(err.to_string())
    }
}

impl From<auth::JwtError> for UserError {
    fn from(err: auth::JwtError) -> Self {
        match err {
            auth::JwtError::MissingSecret => UserError::Fatal(err.to_string()),
            other => UserError::Unknown(format!("Token generation failed: {}", other)),
        }
    }
}

impl From<auth::PasswordError> for UserError {
    fn from(err: auth::PasswordError) -> Self {
        UserError::Unknown(err.to_string())
    }
}
