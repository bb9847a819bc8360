//! Deterministic synthetic market data.
//!
//! Used whenever the provider cannot supply a usable record. Every field is
//! derived from the MD5 digest of `"{symbol}:{field}"`, so the same symbol
//! yields identical values across calls and process restarts.

use rust_decimal::Decimal;

use crate::models::{
    FinancialHealthMetrics, GrowthMetrics, Overview, OverviewMetrics, ProfitabilityMetrics, Quote,
    RiskMetrics, ValuationMetrics,
};

/// Generator for symbol-derived mock quotes and overviews.
#[derive(Clone, Copy, Debug, Default)]
pub struct MockDataGenerator;

impl MockDataGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Synthetic quote with a price in [50, 500).
    pub fn quote_for(&self, symbol: &str) -> Quote {
        let price = Decimal::from(50 + seed(symbol, "price") % 450);
        let previous_close = price - Decimal::new(125, 2);
        let change = Decimal::new(125, 2);
        let change_percent = (change / previous_close * Decimal::ONE_HUNDRED).round_dp(2);

        Quote {
            symbol: symbol.to_string(),
            price,
            change,
            change_percent,
            volume: 1_000_000 + (seed(symbol, "volume") % 5_000_000) as i64,
            previous_close,
            open: price - Decimal::new(250, 2),
            high: price + Decimal::new(575, 2),
            low: price - Decimal::new(325, 2),
        }
    }

    /// Synthetic overview with every category populated.
    pub fn overview_for(&self, symbol: &str) -> Overview {
        // Whole-number value in [base, base + span)
        let whole = |field: &str, base: u64, span: u64| {
            Some(Decimal::from(base + seed(symbol, field) % span))
        };
        // Two-decimal value in [base/100, (base + span)/100)
        let cents = |field: &str, base: u64, span: u64| {
            Some(Decimal::new((base + seed(symbol, field) % span) as i64, 2))
        };

        Overview {
            symbol: symbol.to_string(),
            name: Some(format!("{} Corporation", symbol)),
            exchange: Some("NASDAQ".to_string()),
            currency: Some("USD".to_string()),
            country: Some("USA".to_string()),
            sector: Some("Technology".to_string()),
            industry: Some("Software".to_string()),
            metrics: OverviewMetrics {
                valuation: ValuationMetrics {
                    pe_ratio: whole("pe_ratio", 15, 25),
                    price_to_book_ratio: whole("price_to_book_ratio", 2, 8),
                    peg_ratio: cents("peg_ratio", 100, 50),
                },
                profitability: ProfitabilityMetrics {
                    return_on_equity_ttm: whole("return_on_equity_ttm", 10, 20),
                    return_on_assets_ttm: whole("return_on_assets_ttm", 10, 20),
                    profit_margin: whole("profit_margin", 5, 20),
                    operating_margin_ttm: whole("operating_margin_ttm", 8, 17),
                },
                financial_health: FinancialHealthMetrics {
                    current_ratio: cents("current_ratio", 120, 80),
                    debt_to_equity_ratio: cents("debt_to_equity_ratio", 10, 90),
                    quick_ratio: cents("quick_ratio", 110, 70),
                },
                growth: GrowthMetrics {
                    quarterly_revenue_growth_yoy: whole("quarterly_revenue_growth_yoy", 5, 30),
                    quarterly_earnings_growth_yoy: whole("quarterly_earnings_growth_yoy", 3, 40),
                },
                risk: RiskMetrics {
                    beta: cents("beta", 100, 50),
                },
            },
        }
    }
}

/// First eight bytes of `md5("{symbol}:{field}")` as a big-endian integer.
fn seed(symbol: &str, field: &str) -> u64 {
    let digest = md5::compute(format!("{}:{}", symbol, field));
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest.0[..8]);
    u64::from_be_bytes(head)
}
