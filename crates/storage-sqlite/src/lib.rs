//! SQLite storage implementation for StockIQ.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the [`OverviewStore`](stockiq_core::stocks::OverviewStore) trait
//! defined in `stockiq-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The single-writer actor all writes go through
//! - The overview cache repository
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//!
//! ```text
//!          core (domain)
//!                │
//!                ▼
//!        storage-sqlite (this crate)
//!                │
//!                ▼
//!            SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod overviews;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use overviews::OverviewRepository;

// Re-export from stockiq-core for convenience
pub use stockiq_core::errors::{DatabaseError, Error, Result};
