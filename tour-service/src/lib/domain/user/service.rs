use std::sync::Arc;
use std::sync::OnceLock;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::JwtError;
use auth::ResetTokenIssuer;
use chrono::Utc;

use crate::domain::user::models::AdminUpdateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewPassword;
use crate::domain::user::models::OutgoingEmail;
use crate::domain::user::models::PasswordReset;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::UpdatePasswordCommand;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::principal::AuthenticatedPrincipal;
use crate::user::errors::UserError;
use crate::user::errors::EXPIRED_TOKEN;
use crate::user::errors::INCORRECT_CREDENTIALS;
use crate::user::errors::INVALID_TOKEN;
use crate::user::errors::NO_USER_WITH_EMAIL;
use crate::user::errors::PASSWORD_CHANGED;
use crate::user::errors::RESET_EMAIL_FAILED;
use crate::user::errors::USER_NO_LONGER_EXISTS;
use crate::user::ports::Mailer;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;
use crate::user::ports::UserSession;

/// Domain service implementation for user operations.
///
/// Owns the credential lifecycle: session issuance and verification,
/// password changes and the reset-token flow.
pub struct UserService<UR, M>
where
    UR: UserRepository,
    M: Mailer,
{
    repository: Arc<UR>,
    mailer: Arc<M>,
    authenticator: Authenticator,
    reset_tokens: ResetTokenIssuer,
    dummy_hash: OnceLock<String>,
}

impl<UR, M> UserService<UR, M>
where
    UR: UserRepository,
    M: Mailer,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `mailer` - Delivery channel for reset tokens
    /// * `authenticator` - Password hasher and session token issuer
    ///
    /// # Returns
    /// Configured user service instance
    pub fn new(repository: Arc<UR>, mailer: Arc<M>, authenticator: Authenticator) -> Self {
        Self {
            repository,
            mailer,
            authenticator,
            reset_tokens: ResetTokenIssuer::new(),
            dummy_hash: OnceLock::new(),
        }
    }

    pub fn with_reset_tokens(mut self, reset_tokens: ResetTokenIssuer) -> Self {
        self.reset_tokens = reset_tokens;
        self
    }

    /// Hash verified against when a login names an unknown email, so both
    /// failures cost one argon2 verification.
    fn dummy_hash(&self) -> &str {
        self.dummy_hash.get_or_init(|| {
            self.authenticator
                .hash_password("not-a-real-password")
                .unwrap_or_else(|e| {
                    tracing::error!(error = %e, "Failed to derive dummy password hash");
                    String::new()
                })
        })
    }

    fn start_session(&self, user: User) -> Result<UserSession, UserError> {
        let token = self.authenticator.issue_session(&user.id.to_string())?;
        Ok(UserSession { user, token })
    }

    fn reset_email(&self, to: EmailAddress, reset_url: &str) -> OutgoingEmail {
        OutgoingEmail {
            to,
            subject: format!(
                "Your password reset token (valid for {} minutes)",
                self.reset_tokens.ttl().num_minutes()
            ),
            body: format!(
                "Forgot your password? Submit a PATCH request with your new password and \
                 password_confirm to: {}.\nIf you didn't forget your password, please ignore this email!",
                reset_url
            ),
        }
    }

    async fn find_active(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UserError::NotFound(format!("No user found with ID {}", id)))
    }
}

#[async_trait]
impl<UR, M> UserServicePort for UserService<UR, M>
where
    UR: UserRepository,
    M: Mailer,
{
    async fn signup(&self, command: SignupCommand) -> Result<UserSession, UserError> {
        let password_hash = self.authenticator.hash_password(command.password.expose())?;

        let user = User::register(
            command.name,
            command.email,
            command.photo,
            password_hash,
            Utc::now(),
        );

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User signed up");

        self.start_session(created_user)
    }

    async fn login(&self, command: LoginCommand) -> Result<UserSession, UserError> {
        if command.email.trim().is_empty() || command.password.is_empty() {
            return Err(UserError::MissingCredentials);
        }

        let incorrect = || UserError::Unauthenticated(INCORRECT_CREDENTIALS.to_string());

        let user = match EmailAddress::new(command.email) {
            Ok(email) => self.repository.find_by_email(&email).await?,
            Err(_) => None,
        };

        let Some(user) = user else {
            self.authenticator
                .verify_password(&command.password, self.dummy_hash());
            return Err(incorrect());
        };

        let result = self
            .authenticator
            .authenticate(&command.password, &user.password_hash, &user.id.to_string())
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::info!(user_id = %user.id, "Login rejected: wrong password");
                    incorrect()
                }
                AuthenticationError::PasswordError(err) => UserError::from(err),
                AuthenticationError::JwtError(err) => UserError::from(err),
            })?;

        Ok(UserSession {
            user,
            token: result.access_token,
        })
    }

    async fn authenticate(&self, token: &str) -> Result<AuthenticatedPrincipal, UserError> {
        let claims = self
            .authenticator
            .validate_session(token)
            .map_err(|e| match e {
                JwtError::TokenExpired => UserError::Unauthenticated(EXPIRED_TOKEN.to_string()),
                _ => UserError::Unauthenticated(INVALID_TOKEN.to_string()),
            })?;

        let user = match UserId::from_string(&claims.sub) {
            Ok(id) => self.repository.find_by_id(&id).await?,
            Err(_) => None,
        }
        .ok_or_else(|| UserError::Unauthenticated(USER_NO_LONGER_EXISTS.to_string()))?;

        if user.changed_password_after(claims.iat) {
            tracing::debug!(user_id = %user.id, "Session predates password change");
            return Err(UserError::Unauthenticated(PASSWORD_CHANGED.to_string()));
        }

        Ok(AuthenticatedPrincipal::new(user, claims.iat))
    }

    async fn forgot_password(&self, email: &str, reset_base_url: &str) -> Result<(), UserError> {
        let not_found = || UserError::NotFound(NO_USER_WITH_EMAIL.to_string());

        let email = EmailAddress::new(email.to_string()).map_err(|_| not_found())?;
        let user = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or_else(not_found)?;

        let issued = self.reset_tokens.issue(Utc::now());
        let reset_url = format!("{}/{}", reset_base_url.trim_end_matches('/'), issued.token);

        self.repository
            .set_password_reset(&user.id, Some(PasswordReset::from(issued)))
            .await?;

        let message = self.reset_email(user.email.clone(), &reset_url);
        if let Err(e) = self.mailer.send(&message).await {
            tracing::error!(user_id = %user.id, error = %e, "Failed to send password reset email");

            if let Err(clear_err) = self.repository.set_password_reset(&user.id, None).await {
                tracing::error!(
                    user_id = %user.id,
                    error = %clear_err,
                    "Failed to discard password reset after delivery failure"
                );
            }

            return Err(UserError::Transient(RESET_EMAIL_FAILED.to_string()));
        }

        tracing::info!(user_id = %user.id, "Password reset token sent");
        Ok(())
    }

    async fn reset_password(
        &self,
        token: &str,
        new_password: NewPassword,
    ) -> Result<UserSession, UserError> {
        let now = Utc::now();
        let token_hash = ResetTokenIssuer::hash_token(token);
        let password_hash = self.authenticator.hash_password(new_password.expose())?;

        let user = self
            .repository
            .consume_password_reset(
                &token_hash,
                now,
                &password_hash,
                User::password_changed_stamp(now),
            )
            .await?
            .ok_or(UserError::ResetTokenInvalid)?;
        tracing::info!(user_id = %user.id, "Password reset completed");

        self.start_session(user)
    }

    async fn update_password(
        &self,
        principal: &AuthenticatedPrincipal,
        command: UpdatePasswordCommand,
    ) -> Result<UserSession, UserError> {
        let current = self.find_active(principal.id()).await?;

        if !self
            .authenticator
            .verify_password(&command.current_password, &current.password_hash)
        {
            return Err(UserError::IncorrectCurrentPassword);
        }

        let password_hash = self
            .authenticator
            .hash_password(command.new_password.expose())?;

        let user = self
            .repository
            .set_password(
                &current.id,
                &password_hash,
                User::password_changed_stamp(Utc::now()),
            )
            .await?;
        tracing::info!(user_id = %user.id, "Password changed");

        self.start_session(user)
    }

    async fn update_me(
        &self,
        principal: &AuthenticatedPrincipal,
        command: UpdateProfileCommand,
    ) -> Result<User, UserError> {
        if command.is_empty() {
            return self.find_active(principal.id()).await;
        }

        self.repository.update_profile(principal.id(), &command).await
    }

    async fn deactivate_me(&self, principal: &AuthenticatedPrincipal) -> Result<(), UserError> {
        self.repository.deactivate(principal.id()).await?;
        tracing::info!(user_id = %principal.id(), "User deactivated");
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_active().await
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.find_active(id).await
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: AdminUpdateUserCommand,
    ) -> Result<User, UserError> {
        let profile = UpdateProfileCommand {
            name: command.name,
            email: command.email,
            photo: command.photo,
        };

        let mut user = if profile.is_empty() {
            self.find_active(id).await?
        } else {
            self.repository.update_profile(id, &profile).await?
        };

        if let Some(role) = command.role {
            user = self.repository.update_role(id, role).await?;
            tracing::info!(user_id = %id, role = %role, "User role changed");
        }

        Ok(user)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}
