//! PostgreSQL user repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::DomainError;
use crate::domain::user::{UniqueField, User, UserId, UserRepository};

const SELECT_COLUMNS: &str =
    "id, email, username, password_hash, profile_image, created_at, updated_at";

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the users table if it does not exist yet
    pub async fn ensure_table(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id BIGINT PRIMARY KEY,
                email VARCHAR(254) NOT NULL UNIQUE,
                username VARCHAR(64) NOT NULL UNIQUE,
                password_hash VARCHAR(255) NOT NULL DEFAULT '',
                profile_image VARCHAR(255),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create users table: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM users WHERE id = $1", SELECT_COLUMNS))
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_one_by(
        &self,
        field: UniqueField,
        value: &str,
    ) -> Result<Option<User>, DomainError> {
        // Column names come from a closed enum, never from input
        let sql = format!(
            "SELECT {} FROM users WHERE {} = $1 LIMIT 1",
            SELECT_COLUMNS,
            field.column()
        );

        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to find user by {}: {}", field, e))
            })?;

        match row {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, username, password_hash, profile_image,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id().value())
        .bind(user.email())
        .bind(user.username())
        .bind(user.password_hash())
        .bind(user.profile_image())
        .bind(user.created_at())
        .bind(user.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| create_error(&user, e))?;

        Ok(user)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count users: {}", e)))?;

        Ok(count as usize)
    }
}

fn create_error(user: &User, error: sqlx::Error) -> DomainError {
    let msg = error.to_string();

    if !(msg.contains("duplicate key") || msg.contains("unique constraint")) {
        return DomainError::storage(format!("Failed to create user: {}", error));
    }

    conflict_message(user, &msg)
}

fn conflict_message(user: &User, msg: &str) -> DomainError {
    if msg.contains("email") {
        DomainError::conflict(format!("Email '{}' already exists", user.email()))
    } else if msg.contains("username") {
        DomainError::conflict(format!("Username '{}' already exists", user.username()))
    } else {
        DomainError::conflict(format!("User with ID '{}' already exists", user.id()))
    }
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> Result<User, DomainError> {
    let id: i64 = row.get("id");
    let email: String = row.get("email");
    let username: String = row.get("username");
    let password_hash: String = row.get("password_hash");
    let profile_image: Option<String> = row.get("profile_image");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");
    let updated_at: chrono::DateTime<chrono::Utc> = row.get("updated_at");

    let user_id = UserId::new(id)
        .map_err(|e| DomainError::storage(format!("Invalid user ID in database: {}", e)))?;

    Ok(User::restore(
        user_id,
        email,
        username,
        password_hash,
        profile_image,
        created_at,
        updated_at,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User::new(UserId::new(1).unwrap(), "a@x.com", "ab", "")
    }

    #[test]
    fn test_conflict_names_the_violated_column() {
        let err = conflict_message(
            &user(),
            r#"duplicate key value violates unique constraint "users_email_key""#,
        );
        assert_eq!(err.to_string(), "Conflict: Email 'a@x.com' already exists");

        let err = conflict_message(
            &user(),
            r#"duplicate key value violates unique constraint "users_username_key""#,
        );
        assert_eq!(err.to_string(), "Conflict: Username 'ab' already exists");

        let err = conflict_message(
            &user(),
            r#"duplicate key value violates unique constraint "users_pkey""#,
        );
        assert!(matches!(err, DomainError::Conflict { .. }));
    }

    #[test]
    fn test_unique_field_columns() {
        assert_eq!(UniqueField::Email.column(), "email");
        assert_eq!(UniqueField::Username.column(), "username");
    }
}
