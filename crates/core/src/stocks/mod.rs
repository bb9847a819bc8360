//! Stock quote and overview module.
//!
//! - [`store`] - Storage trait for cached overviews
//! - [`service`] - Cache-aside service combining provider, parser, mock data and store
//! - [`constants`] - Staleness window
//! - [`symbol`] - Ticker normalization
//!
//! ```text
//! StockDataService → ProviderClient → ResponseParser
//!       ↓                  ↘ (failure) MockDataGenerator
//! OverviewStore (DB)
//! ```

pub mod constants;
pub mod service;
pub mod store;
pub mod symbol;


pub use constants::{is_fresh, OVERVIEW_STALENESS_WINDOW};
pub use service::{StockDataService, StockDataServiceTrait};
pub use store::OverviewStore;
pub use symbol::normalize_symbol;
