//! In-memory user repository implementation

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::DomainError;
use crate::domain::user::{UniqueField, User, UserId, UserRepository};

#[derive(Debug, Default)]
struct UserTable {
    users: HashMap<UserId, User>,
    /// email -> user ID
    email_index: HashMap<String, UserId>,
    /// username -> user ID
    username_index: HashMap<String, UserId>,
}

impl UserTable {
    fn index(&self, field: UniqueField) -> &HashMap<String, UserId> {
        match field {
            UniqueField::Email => &self.email_index,
            UniqueField::Username => &self.username_index,
        }
    }

    fn insert(&mut self, user: User) -> Result<(), DomainError> {
        let id = *user.id();

        if self.users.contains_key(&id) {
            return Err(DomainError::conflict(format!("User with ID '{}' already exists", id)));
        }

        if self.email_index.contains_key(user.email()) {
            return Err(DomainError::conflict(format!(
                "Email '{}' already exists",
                user.email()
            )));
        }

        if self.username_index.contains_key(user.username()) {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                user.username()
            )));
        }

        self.email_index.insert(user.email().to_string(), id);
        self.username_index.insert(user.username().to_string(), id);
        self.users.insert(id, user);

        Ok(())
    }
}

/// In-memory implementation of UserRepository
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    table: Arc<RwLock<UserTable>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository with initial users
    pub fn with_users(users: Vec<User>) -> Result<Self, DomainError> {
        let mut table = UserTable::default();

        for user in users {
            table.insert(user)?;
        }

        Ok(Self {
            table: Arc::new(RwLock::new(table)),
        })
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table.users.get(id).cloned())
    }

    async fn find_one_by(
        &self,
        field: UniqueField,
        value: &str,
    ) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;

        Ok(table
            .index(field)
            .get(value)
            .and_then(|id| table.users.get(id))
            .cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut table = self.table.write().await;
        table.insert(user.clone())?;
        Ok(user)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.table.read().await.users.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserLookup;

    fn create_test_user(id: i64, email: &str, username: &str) -> User {
        User::new(UserId::new(id).unwrap(), email, username, "hash")
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryUserRepository::new();
        let user = create_test_user(1, "a@x.com", "ab");

        repo.create(user.clone()).await.unwrap();

        let retrieved = repo.get(user.id()).await.unwrap();
        assert_eq!(retrieved.unwrap().username(), "ab");
    }

    #[tokio::test]
    async fn test_find_one_by_exact_match() {
        let repo = InMemoryUserRepository::new();
        repo.create(create_test_user(1, "a@x.com", "ab")).await.unwrap();

        let by_email = repo.find_one_by(UniqueField::Email, "a@x.com").await.unwrap();
        assert_eq!(by_email.unwrap().id().value(), 1);

        let by_username = repo.find_one_by(UniqueField::Username, "ab").await.unwrap();
        assert!(by_username.is_some());

        // Exact match only
        assert!(
            repo.find_one_by(UniqueField::Email, "A@X.COM")
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            repo.find_one_by(UniqueField::Username, "a@x.com")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let repo = InMemoryUserRepository::new();
        repo.create(create_test_user(1, "a@x.com", "ab")).await.unwrap();

        let result = repo.create(create_test_user(2, "a@x.com", "cd")).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let repo = InMemoryUserRepository::new();
        repo.create(create_test_user(1, "a@x.com", "ab")).await.unwrap();

        let result = repo.create(create_test_user(2, "b@x.com", "ab")).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_lookup_exists() {
        let repo =
            InMemoryUserRepository::with_users(vec![create_test_user(1, "a@x.com", "ab")])
                .unwrap();

        assert!(repo.exists(UniqueField::Email, "a@x.com").await.unwrap());
        assert!(!repo.exists(UniqueField::Email, "b@x.com").await.unwrap());
        assert!(repo.exists(UniqueField::Username, "ab").await.unwrap());
    }

    #[tokio::test]
    async fn test_with_users_rejects_duplicates() {
        let result = InMemoryUserRepository::with_users(vec![
            create_test_user(1, "a@x.com", "ab"),
            create_test_user(2, "a@x.com", "cd"),
        ]);

        assert!(result.is_err());
    }
}
