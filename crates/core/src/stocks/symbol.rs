use crate::errors::{Error, Result};

/// Trim and uppercase a ticker.
///
/// A missing, empty or whitespace-only symbol is rejected with
/// [`Error::InvalidArgument`].
pub fn normalize_symbol(symbol: Option<&str>) -> Result<String> {
    let trimmed = symbol.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(Error::InvalidArgument(
            "Stock symbol cannot be null or empty".to_string(),
        ));
    }
    Ok(trimmed.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(normalize_symbol(Some("aapl")).unwrap(), "AAPL");
        assert_eq!(normalize_symbol(Some("  msft \n")).unwrap(), "MSFT");
        assert_eq!(normalize_symbol(Some("brk.b")).unwrap(), "BRK.B");
    }

    #[test]
    fn test_normalize_symbol_rejects_blank() {
        for input in [None, Some(""), Some("   "), Some("\t")] {
            assert!(matches!(
                normalize_symbol(input),
                Err(Error::InvalidArgument(_))
            ));
        }
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(raw in "\\s{0,3}[a-zA-Z.]{1,8}\\s{0,3}") {
            let once = normalize_symbol(Some(&raw)).unwrap();
            let twice = normalize_symbol(Some(&once)).unwrap();
            prop_assert_eq!(&once, &twice);
            prop_assert_eq!(once.trim(), once.as_str());
        }
    }
}
