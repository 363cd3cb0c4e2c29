//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! private to this module, connections come from a `bb8` pool through
//! `diesel-async`, and every database failure is mapped to the owning port's
//! error type.
//!
//! # Example
//!
//! ```ignore
//! use mytrip::outbound::persistence::{DbPool, PoolConfig, DieselBookmarkRepository};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/mytrip")).await?;
//! let bookmarks = DieselBookmarkRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_bookmark_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_bookmark_repository::DieselBookmarkRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_MAX_SIZE, DbPool, PoolConfig, PoolError};
