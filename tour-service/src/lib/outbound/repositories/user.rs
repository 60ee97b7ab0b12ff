use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PasswordReset;
use crate::domain::user::models::Role;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserName;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const USER_COLUMNS: &str = "id, name, email, photo, role, password_hash, password_changed_at, \
     password_reset_token_hash, password_reset_expires_at, active, created_at";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &PgRow) -> Result<User, UserError> {
        let token_hash: Option<String> = row.try_get("password_reset_token_hash").map_err(db_error)?;
        let expires_at: Option<DateTime<Utc>> =
            row.try_get("password_reset_expires_at").map_err(db_error)?;
        let role: String = row.try_get("role").map_err(db_error)?;

        Ok(User {
            id: UserId(row.try_get("id").map_err(db_error)?),
            name: UserName::new(row.try_get("name").map_err(db_error)?)?,
            email: EmailAddress::new(row.try_get("email").map_err(db_error)?)?,
            photo: row.try_get("photo").map_err(db_error)?,
            role: role.parse::<Role>()?,
            password_hash: row.try_get("password_hash").map_err(db_error)?,
            password_changed_at: row.try_get("password_changed_at").map_err(db_error)?,
            password_reset: match (token_hash, expires_at) {
                (Some(token_hash), Some(expires_at)) => Some(PasswordReset {
                    token_hash,
                    expires_at,
                }),
                _ => None,
            },
            active: row.try_get("active").map_err(db_error)?,
            created_at: row.try_get("created_at").map_err(db_error)?,
        })
    }

    fn map_write_error(e: sqlx::Error, email: Option<&EmailAddress>) -> UserError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() && db_err.constraint() == Some("users_email_key") {
                let email = email.map(EmailAddress::to_string).unwrap_or_default();
                return UserError::EmailAlreadyExists(email);
            }
        }
        db_error(e)
    }

    /// Runs an `UPDATE ... RETURNING` against a single active user.
    async fn update_active(
        &self,
        query: sqlx::query::Query<'_, sqlx::Postgres, sqlx::postgres::PgArguments>,
        id: &UserId,
        email: Option<&EmailAddress>,
    ) -> Result<User, UserError> {
        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::map_write_error(e, email))?
            .ok_or_else(|| not_found(id))?;

        Self::row_to_user(&row)
    }
}

fn db_error(e: sqlx::Error) -> UserError {
    UserError::DatabaseError(e.to_string())
}

fn not_found(id: &UserId) -> UserError {
    UserError::NotFound(format!("No user found with ID {}", id))
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let (token_hash, expires_at) = match &user.password_reset {
            Some(reset) => (Some(reset.token_hash.as_str()), Some(reset.expires_at)),
            None => (None, None),
        };

        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, photo, role, password_hash, password_changed_at,
                               password_reset_token_hash, password_reset_expires_at, active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(user.id.0)
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(user.photo.as_deref())
        .bind(user.role.as_str())
        .bind(&user.password_hash)
        .bind(user.password_changed_at)
        .bind(token_hash)
        .bind(expires_at)
        .bind(user.active)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, Some(&user.email)))?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE id = $1 AND active",
            USER_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE email = $1 AND active",
            USER_COLUMNS
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn list_active(&self) -> Result<Vec<User>, UserError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM users WHERE active ORDER BY created_at",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.iter().map(Self::row_to_user).collect()
    }

    async fn update_profile(
        &self,
        id: &UserId,
        changes: &UpdateProfileCommand,
    ) -> Result<User, UserError> {
        let sql = format!(
            r#"
            UPDATE users
            SET name = COALESCE($2, name), email = COALESCE($3, email), photo = COALESCE($4, photo)
            WHERE id = $1 AND active
            RETURNING {}
            "#,
            USER_COLUMNS
        );
        let query = sqlx::query(&sql)
            .bind(id.0)
            .bind(changes.name.as_ref().map(UserName::as_str))
            .bind(changes.email.as_ref().map(EmailAddress::as_str))
            .bind(changes.photo.as_deref());

        self.update_active(query, id, changes.email.as_ref()).await
    }

    async fn update_role(&self, id: &UserId, role: Role) -> Result<User, UserError> {
        let sql = format!(
            "UPDATE users SET role = $2 WHERE id = $1 AND active RETURNING {}",
            USER_COLUMNS
        );
        let query = sqlx::query(&sql).bind(id.0).bind(role.as_str());

        self.update_active(query, id, None).await
    }

    async fn set_password(
        &self,
        id: &UserId,
        password_hash: &str,
        changed_at: DateTime<Utc>,
    ) -> Result<User, UserError> {
        let sql = format!(
            r#"
            UPDATE users
            SET password_hash = $2, password_changed_at = $3,
                password_reset_token_hash = NULL, password_reset_expires_at = NULL
            WHERE id = $1 AND active
            RETURNING {}
            "#,
            USER_COLUMNS
        );
        let query = sqlx::query(&sql)
            .bind(id.0)
            .bind(password_hash)
            .bind(changed_at);

        self.update_active(query, id, None).await
    }

    async fn consume_password_reset(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
        password_hash: &str,
        changed_at: DateTime<Utc>,
    ) -> Result<Option<User>, UserError> {
        // Matching and clearing the token in one statement makes it single use.
        let row = sqlx::query(&format!(
            r#"
            UPDATE users
            SET password_hash = $3, password_changed_at = $4,
                password_reset_token_hash = NULL, password_reset_expires_at = NULL
            WHERE password_reset_token_hash = $1 AND password_reset_expires_at > $2 AND active
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(token_hash)
        .bind(now)
        .bind(password_hash)
        .bind(changed_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn set_password_reset(
        &self,
        id: &UserId,
        reset: Option<PasswordReset>,
    ) -> Result<(), UserError> {
        let (token_hash, expires_at) = match reset {
            Some(reset) => (Some(reset.token_hash), Some(reset.expires_at)),
            None => (None, None),
        };

        let result = sqlx::query(
            r#"
            UPDATE users
            SET password_reset_token_hash = $2, password_reset_expires_at = $3
            WHERE id = $1 AND active
            "#,
        )
        .bind(id.0)
        .bind(token_hash)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }

    async fn deactivate(&self, id: &UserId) -> Result<(), UserError> {
        let result = sqlx::query("UPDATE users SET active = FALSE WHERE id = $1 AND active")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }
}
