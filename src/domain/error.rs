//! Domain error types.

/// Why a single asset could not be analyzed. Never fatal to a run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error("no candles returned for {symbol}")]
    EmptyAssetResult { symbol: String },

    #[error("malformed candle for {symbol} at index {index}: {reason}")]
    MalformedInput {
        symbol: String,
        index: usize,
        reason: String,
    },
}

/// Top-level error type for volscan.
#[derive(Debug, thiserror::Error)]
pub enum VolscanError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("malformed input: {reason}")]
    MalformedInput { reason: String },

    #[error("no symbols produced a result")]
    NoResults,

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&VolscanError> for std::process::ExitCode {
    fn from(err: &VolscanError) -> Self {
        let code: u8 = match err {
            VolscanError::Io(_) | VolscanError::Json(_) | VolscanError::Report { .. } => 1,
            VolscanError::ConfigParse { .. }
            | VolscanError::ConfigMissing { .. }
            | VolscanError::ConfigInvalid { .. } => 2,
            VolscanError::DataSource { .. } | VolscanError::MalformedInput { .. } => 3,
            VolscanError::NoResults => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_error_messages() {
        let err = AnalysisError::EmptyAssetResult {
            symbol: "BTCUSDT".into(),
        };
        assert_eq!(err.to_string(), "no candles returned for BTCUSDT");

        let err = AnalysisError::MalformedInput {
            symbol: "ETHUSDT".into(),
            index: 3,
            reason: "close is not a finite number".into(),
        };
        assert_eq!(
            err.to_string(),
            "malformed candle for ETHUSDT at index 3: close is not a finite number"
        );
    }

    #[test]
    fn config_error_messages() {
        let err = VolscanError::ConfigInvalid {
            section: "analysis".into(),
            key: "window".into(),
            reason: "window must be at least 2".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config value [analysis] window: window must be at least 2"
        );
    }
}
