//! StockIQ Core - Domain services and traits.
//!
//! This crate contains the cache-aside business logic for stock quotes and
//! company overviews. It is database-agnostic and defines the
//! [`stocks::OverviewStore`] trait implemented by the `storage-sqlite` crate.

pub mod errors;
pub mod stocks;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
