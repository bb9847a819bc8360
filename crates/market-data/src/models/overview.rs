use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metrics keyed by category, then by provider field name.
pub type CategorizedMetrics = BTreeMap<&'static str, BTreeMap<&'static str, Option<Decimal>>>;

/// Fundamental/valuation snapshot for a symbol.
///
/// `symbol` is the only identity. Saving an overview for a symbol that is
/// already cached replaces the whole record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub symbol: String,

    #[serde(default)]
    pub name: Option<String>,

    /// Listing exchange (e.g., "NASDAQ")
    #[serde(default)]
    pub exchange: Option<String>,

    /// Reporting currency (e.g., "USD")
    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default)]
    pub country: Option<String>,

    #[serde(default)]
    pub sector: Option<String>,

    #[serde(default)]
    pub industry: Option<String>,

    #[serde(default)]
    pub metrics: OverviewMetrics,
}

/// The fixed set of financial ratios, grouped into five categories.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewMetrics {
    #[serde(default)]
    pub valuation: ValuationMetrics,
    #[serde(default)]
    pub profitability: ProfitabilityMetrics,
    #[serde(default)]
    pub financial_health: FinancialHealthMetrics,
    #[serde(default)]
    pub growth: GrowthMetrics,
    #[serde(default)]
    pub risk: RiskMetrics,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationMetrics {
    pub pe_ratio: Option<Decimal>,
    pub price_to_book_ratio: Option<Decimal>,
    pub peg_ratio: Option<Decimal>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitabilityMetrics {
    #[serde(rename = "returnOnEquityTTM")]
    pub return_on_equity_ttm: Option<Decimal>,
    #[serde(rename = "returnOnAssetsTTM")]
    pub return_on_assets_ttm: Option<Decimal>,
    pub profit_margin: Option<Decimal>,
    #[serde(rename = "operatingMarginTTM")]
    pub operating_margin_ttm: Option<Decimal>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialHealthMetrics {
    pub current_ratio: Option<Decimal>,
    pub debt_to_equity_ratio: Option<Decimal>,
    pub quick_ratio: Option<Decimal>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthMetrics {
    #[serde(rename = "quarterlyRevenueGrowthYOY")]
    pub quarterly_revenue_growth_yoy: Option<Decimal>,
    #[serde(rename = "quarterlyEarningsGrowthYOY")]
    pub quarterly_earnings_growth_yoy: Option<Decimal>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMetrics {
    pub beta: Option<Decimal>,
}

impl Overview {
    /// Create an overview with only the symbol set
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Default::default()
        }
    }

    /// Metrics keyed by category and by the provider's field names.
    ///
    /// Absent ratios are kept as `None` entries so every category always
    /// lists its full set of keys.
    pub fn categorized_metrics(&self) -> CategorizedMetrics {
        let m = &self.metrics;
        let mut out = BTreeMap::new();

        out.insert(
            "valuation",
            BTreeMap::from([
                ("PERatio", m.valuation.pe_ratio),
                ("PriceToBookRatio", m.valuation.price_to_book_ratio),
                ("PEGRatio", m.valuation.peg_ratio),
            ]),
        );
        out.insert(
            "profitability",
            BTreeMap::from([
                ("ReturnOnEquityTTM", m.profitability.return_on_equity_ttm),
                ("ReturnOnAssetsTTM", m.profitability.return_on_assets_ttm),
                ("ProfitMargin", m.profitability.profit_margin),
                ("OperatingMarginTTM", m.profitability.operating_margin_ttm),
            ]),
        );
        out.insert(
            "financial_health",
            BTreeMap::from([
                ("CurrentRatio", m.financial_health.current_ratio),
                ("DebtToEquityRatio", m.financial_health.debt_to_equity_ratio),
                ("QuickRatio", m.financial_health.quick_ratio),
            ]),
        );
        out.insert(
            "growth",
            BTreeMap::from([
                (
                    "QuarterlyRevenueGrowthYOY",
                    m.growth.quarterly_revenue_growth_yoy,
                ),
                (
                    "QuarterlyEarningsGrowthYOY",
                    m.growth.quarterly_earnings_growth_yoy,
                ),
            ]),
        );
        out.insert("risk", BTreeMap::from([("Beta", m.risk.beta)]));

        out
    }
}
