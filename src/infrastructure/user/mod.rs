//! User infrastructure module
//!
//! Storage backends for accounts and the service that validates the
//! account forms against them.

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::AccountFormService;
