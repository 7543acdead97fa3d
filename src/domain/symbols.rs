//! Symbol list parsing for the analysis universe.

use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SymbolListError {
    #[error("empty token in symbol list")]
    EmptyToken,

    #[error("duplicate symbol: {0}")]
    DuplicateSymbol(String),

    #[error("symbol list is empty")]
    Empty,
}

/// Split a comma-separated list into upper-cased, unique symbols.
pub fn parse_symbols(input: &str) -> Result<Vec<String>, SymbolListError> {
    if input.trim().is_empty() {
        return Err(SymbolListError::Empty);
    }

    let mut symbols = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(SymbolListError::EmptyToken);
        }
        let symbol = trimmed.to_uppercase();
        if !seen.insert(symbol.clone()) {
            return Err(SymbolListError::DuplicateSymbol(symbol));
        }
        symbols.push(symbol);
    }

    Ok(symbols)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_symbols_basic() {
        let result = parse_symbols("BTCUSDT,ETHUSDT,SOLUSDT").unwrap();
        assert_eq!(result, vec!["BTCUSDT", "ETHUSDT", "SOLUSDT"]);
    }

    #[test]
    fn parse_symbols_with_whitespace_and_case() {
        let result = parse_symbols("  btcusdt , EthUsdt ,XRPUSDT ").unwrap();
        assert_eq!(result, vec!["BTCUSDT", "ETHUSDT", "XRPUSDT"]);
    }

    #[test]
    fn parse_symbols_single() {
        assert_eq!(parse_symbols("BNBUSDT").unwrap(), vec!["BNBUSDT"]);
    }

    #[test]
    fn parse_symbols_empty_token() {
        let result = parse_symbols("BTCUSDT,,ETHUSDT");
        assert!(matches!(result, Err(SymbolListError::EmptyToken)));
    }

    #[test]
    fn parse_symbols_duplicate() {
        let result = parse_symbols("BTCUSDT,ethusdt,btcusdt");
        assert!(matches!(result, Err(SymbolListError::DuplicateSymbol(s)) if s == "BTCUSDT"));
    }

    #[test]
    fn parse_symbols_blank_input() {
        assert_eq!(parse_symbols("   "), Err(SymbolListError::Empty));
    }
}
