use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// The user a request has been authenticated as.
///
/// Only the authentication gate can build one, so holding a principal is
/// proof that the session token was verified, the owner is active and the
/// password has not changed since the token was issued.
#[derive(Debug, Clone)]
pub struct AuthenticatedPrincipal {
    user: User,
    issued_at: i64,
}

impl AuthenticatedPrincipal {
    pub(crate) fn new(user: User, issued_at: i64) -> Self {
        Self { user, issued_at }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn id(&self) -> &UserId {
        &self.user.id
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    /// Issued-at of the session token (unix seconds)
    pub fn issued_at(&self) -> i64 {
        self.issued_at
    }
}

/// Role-based authorization gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleGuard {
    allowed: Vec<Role>,
}

impl RoleGuard {
    pub fn new(allowed: &[Role]) -> Self {
        Self {
            allowed: allowed.to_vec(),
        }
    }

    pub fn allows(&self, role: Role) -> bool {
        self.allowed.contains(&role)
    }

    /// Admit the principal if its role is one of the allowed roles.
    ///
    /// # Errors
    /// * `Forbidden` - Role not in the allowed set
    pub fn check(&self, principal: &AuthenticatedPrincipal) -> Result<(), UserError> {
        if self.allows(principal.role()) {
            Ok(())
        } else {
            tracing::debug!(
                user_id = %principal.id(),
                role = %principal.role(),
                "Role not permitted"
            );
            Err(UserError::Forbidden)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::UserName;

    fn principal(role: Role) -> AuthenticatedPrincipal {
        let mut user = User::register(
            UserName::new("Guide".to_string()).unwrap(),
            EmailAddress::new("guide@example.com".to_string()).unwrap(),
            None,
            "$argon2id$hash".to_string(),
            Utc::now(),
        );
        user.role = role;
        AuthenticatedPrincipal::new(user, Utc::now().timestamp())
    }

    #[test]
    fn test_allowed_role_passes() {
        let guard = RoleGuard::new(&[Role::Admin, Role::LeadGuide]);
        assert!(guard.check(&principal(Role::LeadGuide)).is_ok());
        assert!(guard.check(&principal(Role::Admin)).is_ok());
    }

    #[test]
    fn test_other_role_is_forbidden() {
        let guard = RoleGuard::new(&[Role::Admin, Role::LeadGuide]);
        assert!(matches!(
            guard.check(&principal(Role::Guide)),
            Err(UserError::Forbidden)
        ));
        assert!(matches!(
            guard.check(&principal(Role::User)),
            Err(UserError::Forbidden)
        ));
    }

    #[test]
    fn test_empty_guard_admits_nobody() {
        let guard = RoleGuard::new(&[]);
        assert!(guard.check(&principal(Role::Admin)).is_err());
    }
}
