//! Engine and configuration errors.
//!
//! Every engine operation is pure and deterministic, so none of these are
//! retryable: callers treat them as terminal for the computation and ask for
//! corrected input.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// The cumulative position amount is exactly zero, so the average price
    /// is undefined. `rows` is the prefix length at which it happened
    /// (0 for an empty prefix).
    #[error("position size is zero after {rows} order(s); average price is undefined")]
    ZeroPositionSize { rows: usize },

    #[error("ladder did not reach its target price within {iterations} rows")]
    LadderDivergence { iterations: usize },

    #[error("invalid setting `{field}`: {reason}")]
    InvalidSettings { field: &'static str, reason: String },
}

/// Errors loading settings, rows or snapshots from disk.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] EngineError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = EngineError::ZeroPositionSize { rows: 3 };
        assert_eq!(
            err.to_string(),
            "position size is zero after 3 order(s); average price is undefined"
        );

        let err = EngineError::InvalidSettings {
            field: "leverage",
            reason: "must be greater than zero".into(),
        };
        assert_eq!(err.to_string(), "invalid setting `leverage`: must be greater than zero");
    }

    #[test]
    fn engine_error_converts_into_config_error() {
        let err: ConfigError = EngineError::LadderDivergence { iterations: 10 }.into();
        assert!(matches!(err, ConfigError::Invalid(EngineError::LadderDivergence { .. })));
    }
}
