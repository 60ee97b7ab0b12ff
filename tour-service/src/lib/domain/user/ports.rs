use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::AdminUpdateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewPassword;
use crate::domain::user::models::OutgoingEmail;
use crate::domain::user::models::PasswordReset;
use crate::domain::user::models::Role;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::UpdatePasswordCommand;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::principal::AuthenticatedPrincipal;
use crate::user::errors::MailerError;
use crate::user::errors::UserError;

/// A user together with a freshly issued session token.
#[derive(Debug, Clone)]
pub struct UserSession {
    pub user: User,
    pub token: String,
}

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user and log them in.
    ///
    /// # Arguments
    /// * `command` - Validated name, email, photo and new password
    ///
    /// # Returns
    /// Created user with a session token
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn signup(&self, command: SignupCommand) -> Result<UserSession, UserError>;

    /// Verify credentials and issue a session.
    ///
    /// # Errors
    /// * `MissingCredentials` - Email or password is blank
    /// * `Unauthenticated` - Unknown email or wrong password (same message for both)
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<UserSession, UserError>;

    /// Resolve a presented session token to the principal it belongs to.
    ///
    /// # Arguments
    /// * `token` - Raw session token taken from the cookie or bearer header
    ///
    /// # Returns
    /// Principal for the active owner of the token
    ///
    /// # Errors
    /// * `Unauthenticated` - Token invalid or expired, owner gone, or password changed since issuance
    /// * `DatabaseError` - Database operation failed
    async fn authenticate(&self, token: &str) -> Result<AuthenticatedPrincipal, UserError>;

    /// Issue a reset token for the account and email it out of band.
    ///
    /// # Arguments
    /// * `email` - Raw email address of the account
    /// * `reset_base_url` - URL the token is appended to in the email
    ///
    /// # Errors
    /// * `NotFound` - No active user with that email
    /// * `Transient` - Email delivery failed; the pending reset was discarded
    /// * `DatabaseError` - Database operation failed
    async fn forgot_password(&self, email: &str, reset_base_url: &str) -> Result<(), UserError>;

    /// Consume a reset token and set a new password.
    ///
    /// # Returns
    /// Updated user with a fresh session token
    ///
    /// A token can be redeemed once; a concurrent second redemption gets
    /// `ResetTokenInvalid`.
    ///
    /// # Errors
    /// * `ResetTokenInvalid` - Token unknown, expired or already used
    /// * `DatabaseError` - Database operation failed
    async fn reset_password(
        &self,
        token: &str,
        new_password: NewPassword,
    ) -> Result<UserSession, UserError>;

    /// Change the caller's password after re-verifying the current one.
    ///
    /// # Errors
    /// * `IncorrectCurrentPassword` - Current password does not match
    /// * `DatabaseError` - Database operation failed
    async fn update_password(
        &self,
        principal: &AuthenticatedPrincipal,
        command: UpdatePasswordCommand,
    ) -> Result<UserSession, UserError>;

    /// Update the caller's name, email or photo.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update_me(
        &self,
        principal: &AuthenticatedPrincipal,
        command: UpdateProfileCommand,
    ) -> Result<User, UserError>;

    /// Soft-delete the caller's account.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn deactivate_me(&self, principal: &AuthenticatedPrincipal) -> Result<(), UserError>;

    /// List all active users.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_users(&self) -> Result<Vec<User>, UserError>;

    /// Retrieve an active user by identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Update any user, including the role.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update_user(
        &self,
        id: &UserId,
        command: AdminUpdateUserCommand,
    ) -> Result<User, UserError>;

    /// Permanently remove a user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_user(&self, id: &UserId) -> Result<(), UserError>;
}

/// Persistence operations for user aggregate.
///
/// Every lookup only sees active users; the email uniqueness constraint
/// spans inactive users too.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Arguments
    /// * `user` - User entity to create
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve active user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found or inactive)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve active user by normalized email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found or inactive)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Retrieve all active users.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_active(&self) -> Result<Vec<User>, UserError>;

    /// Change the name, email or photo of an active user.
    ///
    /// Only the fields present in `changes` are written.
    ///
    /// # Returns
    /// User as stored after the change
    ///
    /// # Errors
    /// * `NotFound` - No active user with that identifier
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update_profile(
        &self,
        id: &UserId,
        changes: &UpdateProfileCommand,
    ) -> Result<User, UserError>;

    /// Change the role of an active user.
    ///
    /// # Errors
    /// * `NotFound` - No active user with that identifier
    /// * `DatabaseError` - Database operation failed
    async fn update_role(&self, id: &UserId, role: Role) -> Result<User, UserError>;

    /// Replace the password hash of an active user, stamp
    /// `password_changed_at` and drop any pending reset.
    ///
    /// # Errors
    /// * `NotFound` - No active user with that identifier
    /// * `DatabaseError` - Database operation failed
    async fn set_password(
        &self,
        id: &UserId,
        password_hash: &str,
        changed_at: DateTime<Utc>,
    ) -> Result<User, UserError>;

    /// Atomically redeem a pending reset: if an active user holds a reset
    /// with `token_hash` that is still valid at `now`, set the new password
    /// and clear the reset in the same statement.
    ///
    /// # Returns
    /// The updated user, or None when no valid reset matched
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn consume_password_reset(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
        password_hash: &str,
        changed_at: DateTime<Utc>,
    ) -> Result<Option<User>, UserError>;

    /// Store or clear the pending password reset of a user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn set_password_reset(
        &self,
        id: &UserId,
        reset: Option<PasswordReset>,
    ) -> Result<(), UserError>;

    /// Mark a user inactive.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn deactivate(&self, id: &UserId) -> Result<(), UserError>;

    /// Remove user from storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &UserId) -> Result<(), UserError>;
}

/// Out-of-band delivery channel for transactional email.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Deliver a single email.
    ///
    /// # Errors
    /// * `InvalidAddress` - Sender or recipient rejected
    /// * `BuildFailed` - Message could not be assembled
    /// * `DeliveryFailed` - Transport refused or timed out
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailerError>;
}
