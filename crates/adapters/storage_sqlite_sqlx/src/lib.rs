//! # wirelessmesh-adapter-storage-sqlite-sqlx
//!
//! `SQLite` event store using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the `EventStore` port defined in `wirelessmesh-app::ports`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between recorded events and database rows
//!
//! ## Dependency rule
//! Depends on `wirelessmesh-app` (for port traits) and `wirelessmesh-domain`
//! (for domain types). The `app` and `domain` crates must never reference
//! this adapter.

pub mod error;
pub mod event_store;
pub mod pool;

pub use error::StorageError;
pub use event_store::SqliteEventStore;
pub use pool::Database;
