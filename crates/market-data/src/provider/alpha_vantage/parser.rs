//! Alpha Vantage payload parsing.
//!
//! The parser turns a response body into a [`Quote`] or [`Overview`], or into
//! a [`ParseOutcome`] describing why it could not. It never substitutes mock
//! data.

use log::{debug, warn};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

use crate::errors::ParseOutcome;
use crate::models::{
    FinancialHealthMetrics, GrowthMetrics, Overview, OverviewMetrics, ProfitabilityMetrics, Quote,
    RiskMetrics, ValuationMetrics,
};

const GLOBAL_QUOTE: &str = "Global Quote";

/// Every OVERVIEW field the parser maps. A payload with none of them is
/// treated as "no data" (the provider answers `{}` for unknown symbols).
const OVERVIEW_FIELDS: &[&str] = &[
    "Symbol",
    "Name",
    "Exchange",
    "Currency",
    "Country",
    "Sector",
    "Industry",
    "PERatio",
    "PriceToBookRatio",
    "PEGRatio",
    "ReturnOnEquityTTM",
    "ReturnOnAssetsTTM",
    "ProfitMargin",
    "OperatingMarginTTM",
    "CurrentRatio",
    "DebtToEquityRatio",
    "QuickRatio",
    "QuarterlyRevenueGrowthYOY",
    "QuarterlyEarningsGrowthYOY",
    "Beta",
];

/// Stateless parser for Alpha Vantage bodies.
pub struct ResponseParser;

impl ResponseParser {
    /// Parse a `GLOBAL_QUOTE` body.
    ///
    /// All numeric fields are required. `symbol` becomes the quote's identity
    /// regardless of what the payload echoes back.
    pub fn parse_quote(symbol: &str, body: &str) -> Result<Quote, ParseOutcome> {
        let root = Self::parse_object(body)?;
        Self::check_envelope(&root, root.contains_key(GLOBAL_QUOTE))?;

        let quote = root
            .get(GLOBAL_QUOTE)
            .and_then(Value::as_object)
            .ok_or_else(|| ParseOutcome::Malformed(format!("missing '{}'", GLOBAL_QUOTE)))?;

        let change_percent = Self::required_str(quote, "10. change percent")?;
        let change_percent = Self::decimal_or_malformed(
            "10. change percent",
            change_percent.trim().trim_end_matches('%'),
        )?;

        let volume = Self::required_str(quote, "06. volume")?;
        let volume = volume
            .trim()
            .parse::<i64>()
            .map_err(|_| ParseOutcome::Malformed(format!("invalid '06. volume': {}", volume)))?;

        let parsed = Quote {
            symbol: symbol.to_string(),
            price: Self::required_decimal(quote, "05. price")?,
            change: Self::required_decimal(quote, "09. change")?,
            change_percent,
            volume,
            previous_close: Self::required_decimal(quote, "08. previous close")?,
            open: Self::required_decimal(quote, "02. open")?,
            high: Self::required_decimal(quote, "03. high")?,
            low: Self::required_decimal(quote, "04. low")?,
        };

        debug!("Parsed Alpha Vantage quote for {}", symbol);
        Ok(parsed)
    }

    /// Parse an `OVERVIEW` body.
    ///
    /// Every field is optional; sentinels (`"None"`, `"-"`, empty) and values
    /// that are not decimals become `None`.
    pub fn parse_overview(symbol: &str, body: &str) -> Result<Overview, ParseOutcome> {
        let root = Self::parse_object(body)?;

        let has_data = OVERVIEW_FIELDS.iter().any(|f| root.contains_key(*f));
        Self::check_envelope(&root, has_data)?;

        if !has_data {
            return Err(ParseOutcome::Malformed(format!(
                "no overview fields for {}",
                symbol
            )));
        }

        let d = |field: &str| Self::optional_decimal(&root, field);

        let overview = Overview {
            symbol: symbol.to_string(),
            name: Self::optional_text(&root, "Name"),
            exchange: Self::optional_text(&root, "Exchange"),
            currency: Self::optional_text(&root, "Currency"),
            country: Self::optional_text(&root, "Country"),
            sector: Self::optional_text(&root, "Sector"),
            industry: Self::optional_text(&root, "Industry"),
            metrics: OverviewMetrics {
                valuation: ValuationMetrics {
                    pe_ratio: d("PERatio"),
                    price_to_book_ratio: d("PriceToBookRatio"),
                    peg_ratio: d("PEGRatio"),
                },
                profitability: ProfitabilityMetrics {
                    return_on_equity_ttm: d("ReturnOnEquityTTM"),
                    return_on_assets_ttm: d("ReturnOnAssetsTTM"),
                    profit_margin: d("ProfitMargin"),
                    operating_margin_ttm: d("OperatingMarginTTM"),
                },
                financial_health: FinancialHealthMetrics {
                    current_ratio: d("CurrentRatio"),
                    debt_to_equity_ratio: d("DebtToEquityRatio"),
                    quick_ratio: d("QuickRatio"),
                },
                growth: GrowthMetrics {
                    quarterly_revenue_growth_yoy: d("QuarterlyRevenueGrowthYOY"),
                    quarterly_earnings_growth_yoy: d("QuarterlyEarningsGrowthYOY"),
                },
                risk: RiskMetrics { beta: d("Beta") },
            },
        };

        debug!("Parsed Alpha Vantage overview for {}", symbol);
        Ok(overview)
    }

    fn parse_object(body: &str) -> Result<Map<String, Value>, ParseOutcome> {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(ParseOutcome::Malformed(
                "payload is not a JSON object".to_string(),
            )),
            Err(e) => Err(ParseOutcome::Malformed(format!("invalid JSON: {}", e))),
        }
    }

    /// Check for API-level envelopes in the response.
    ///
    /// `"Information"` is only fatal when it is a rate-limit message or the
    /// payload carries no data alongside it.
    fn check_envelope(root: &Map<String, Value>, has_data: bool) -> Result<(), ParseOutcome> {
        if let Some(msg) = Self::envelope_text(root, "Error Message") {
            return Err(ParseOutcome::UpstreamError(msg));
        }

        if let Some(msg) = Self::envelope_text(root, "Note") {
            return Err(ParseOutcome::RateLimited(msg));
        }

        if let Some(msg) = Self::envelope_text(root, "Information") {
            if Self::mentions_rate_limit(&msg) {
                return Err(ParseOutcome::RateLimited(msg));
            }
            if !has_data {
                return Err(ParseOutcome::UpstreamError(msg));
            }
            warn!("Alpha Vantage info: {}", msg);
        }

        Ok(())
    }

    fn envelope_text(root: &Map<String, Value>, key: &str) -> Option<String> {
        root.get(key).map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    fn mentions_rate_limit(msg: &str) -> bool {
        let msg = msg.to_lowercase();
        msg.contains("call frequency") || msg.contains("rate limit")
    }

    fn required_str<'a>(obj: &'a Map<String, Value>, field: &str) -> Result<&'a str, ParseOutcome> {
        obj.get(field)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ParseOutcome::Malformed(format!("missing '{}'", field)))
    }

    fn required_decimal(obj: &Map<String, Value>, field: &str) -> Result<Decimal, ParseOutcome> {
        let raw = Self::required_str(obj, field)?;
        Self::decimal_or_malformed(field, raw.trim())
    }

    fn decimal_or_malformed(field: &str, raw: &str) -> Result<Decimal, ParseOutcome> {
        Self::parse_decimal(raw)
            .ok_or_else(|| ParseOutcome::Malformed(format!("invalid '{}': {}", field, raw)))
    }

    /// Parse a decimal value from a string, accepting scientific notation.
    fn parse_decimal(s: &str) -> Option<Decimal> {
        Decimal::from_str(s)
            .or_else(|_| Decimal::from_scientific(s))
            .ok()
    }

    fn is_sentinel(s: &str) -> bool {
        let s = s.trim();
        s.is_empty() || s == "None" || s == "-"
    }

    fn optional_text(root: &Map<String, Value>, field: &str) -> Option<String> {
        root.get(field)
            .and_then(Value::as_str)
            .filter(|s| !Self::is_sentinel(s))
            .map(|s| s.trim().to_string())
    }

    fn optional_decimal(root: &Map<String, Value>, field: &str) -> Option<Decimal> {
        let raw = match root.get(field)? {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };

        if Self::is_sentinel(&raw) {
            return None;
        }

        let parsed = Self::parse_decimal(raw.trim());
        if parsed.is_none() {
            debug!("Could not parse {} as decimal: {}", field, raw);
        }
        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const IBM_QUOTE: &str = r#"{
        "Global Quote": {
            "01. symbol": "IBM",
            "02. open": "149.5000",
            "03. high": "151.0000",
            "04. low": "148.7500",
            "05. price": "150.2500",
            "06. volume": "3456789",
            "07. latest trading day": "2024-01-15",
            "08. previous close": "149.0000",
            "09. change": "1.2500",
            "10. change percent": "0.8389%"
        }
    }"#;

    #[test]
    fn test_parse_quote() {
        let quote = ResponseParser::parse_quote("IBM", IBM_QUOTE).unwrap();

        assert_eq!(quote.symbol, "IBM");
        assert_eq!(quote.price, dec!(150.25));
        assert_eq!(quote.open, dec!(149.5));
        assert_eq!(quote.high, dec!(151));
        assert_eq!(quote.low, dec!(148.75));
        assert_eq!(quote.previous_close, dec!(149));
        assert_eq!(quote.change, dec!(1.25));
        assert_eq!(quote.change_percent, dec!(0.8389));
        assert_eq!(quote.volume, 3_456_789);
    }

    #[test]
    fn test_parse_quote_stamps_requested_symbol() {
        let quote = ResponseParser::parse_quote("IBM.TEST", IBM_QUOTE).unwrap();
        assert_eq!(quote.symbol, "IBM.TEST");
    }

    #[test]
    fn test_parse_quote_envelopes() {
        let err = ResponseParser::parse_quote(
            "IBM",
            r#"{"Error Message": "Invalid API call. Please retry or visit the documentation."}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ParseOutcome::UpstreamError(m) if m.starts_with("Invalid API call")));

        let err = ResponseParser::parse_quote(
            "IBM",
            r#"{"Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute."}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ParseOutcome::RateLimited(_)));
    }

    #[test]
    fn test_parse_information_envelope() {
        let err = ResponseParser::parse_quote(
            "IBM",
            r#"{"Information": "We have detected your API key as ABC and our standard API rate limit is 25 requests per day."}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ParseOutcome::RateLimited(_)));

        let err = ResponseParser::parse_overview(
            "IBM",
            r#"{"Information": "The **demo** API key is for demo purposes only."}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ParseOutcome::UpstreamError(_)));
    }

    #[test]
    fn test_parse_quote_malformed() {
        let cases = [
            "not json",
            "[]",
            r#"{"Global Quote": {}}"#,
            r#"{"Global Quote": {"05. price": "abc"}}"#,
            r#"{}"#,
        ];
        for body in cases {
            let err = ResponseParser::parse_quote("IBM", body).unwrap_err();
            assert!(
                matches!(err, ParseOutcome::Malformed(_)),
                "expected Malformed for {}",
                body
            );
        }
    }

    #[test]
    fn test_parse_quote_bad_volume_is_malformed() {
        let body = IBM_QUOTE.replace("3456789", "lots");
        let err = ResponseParser::parse_quote("IBM", &body).unwrap_err();
        assert_eq!(
            err,
            ParseOutcome::Malformed("invalid '06. volume': lots".to_string())
        );
    }

    #[test]
    fn test_parse_overview() {
        let body = r#"{
            "Symbol": "MSFT",
            "AssetType": "Common Stock",
            "Name": "Microsoft Corporation",
            "Exchange": "NASDAQ",
            "Currency": "USD",
            "Country": "USA",
            "Sector": "TECHNOLOGY",
            "Industry": "SERVICES-PREPACKAGED SOFTWARE",
            "PERatio": "35.12",
            "PriceToBookRatio": "12.04",
            "PEGRatio": "None",
            "ReturnOnEquityTTM": "0.355",
            "ReturnOnAssetsTTM": "0.147",
            "ProfitMargin": "0.364",
            "OperatingMarginTTM": "-",
            "CurrentRatio": "",
            "QuarterlyRevenueGrowthYOY": "0.176",
            "QuarterlyEarningsGrowthYOY": "0.1",
            "Beta": "0.904"
        }"#;

        let overview = ResponseParser::parse_overview("MSFT", body).unwrap();

        assert_eq!(overview.symbol, "MSFT");
        assert_eq!(overview.name.as_deref(), Some("Microsoft Corporation"));
        assert_eq!(overview.exchange.as_deref(), Some("NASDAQ"));
        assert_eq!(overview.metrics.valuation.pe_ratio, Some(dec!(35.12)));
        assert_eq!(overview.metrics.valuation.peg_ratio, None);
        assert_eq!(
            overview.metrics.profitability.return_on_equity_ttm,
            Some(dec!(0.355))
        );
        assert_eq!(overview.metrics.profitability.operating_margin_ttm, None);
        assert_eq!(overview.metrics.financial_health.current_ratio, None);
        // Absent field
        assert_eq!(overview.metrics.financial_health.debt_to_equity_ratio, None);
        assert_eq!(overview.metrics.risk.beta, Some(dec!(0.904)));
    }

    #[test]
    fn test_parse_overview_unparseable_ratio_is_none() {
        let body = r#"{"Symbol": "XYZ", "PERatio": "n/a", "Beta": 1.2, "PEGRatio": null}"#;
        let overview = ResponseParser::parse_overview("XYZ", body).unwrap();

        assert_eq!(overview.metrics.valuation.pe_ratio, None);
        assert_eq!(overview.metrics.valuation.peg_ratio, None);
        assert_eq!(overview.metrics.risk.beta, Some(dec!(1.2)));
    }

    #[test]
    fn test_parse_overview_empty_object_is_malformed() {
        let err = ResponseParser::parse_overview("NOPE", "{}").unwrap_err();
        assert!(matches!(err, ParseOutcome::Malformed(_)));

        let err = ResponseParser::parse_overview("NOPE", "\"text\"").unwrap_err();
        assert!(matches!(err, ParseOutcome::Malformed(_)));
    }

    #[test]
    fn test_parse_overview_rate_limited() {
        let err = ResponseParser::parse_overview(
            "GOOGL",
            r#"{"Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute and 500 calls per day."}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ParseOutcome::RateLimited(_)));
    }
}
