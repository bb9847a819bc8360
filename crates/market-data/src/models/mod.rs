//! Market data models
//!
//! This module contains the two domain records served by the crate:
//! - `quote` - Live price snapshot (Quote)
//! - `overview` - Fundamentals snapshot (Overview) and its metric categories

mod overview;
mod quote;

pub use overview::{
    CategorizedMetrics, FinancialHealthMetrics, GrowthMetrics, Overview, OverviewMetrics,
    ProfitabilityMetrics, RiskMetrics, ValuationMetrics,
};
pub use quote::Quote;
