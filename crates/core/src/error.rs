//! Error types for the force-fields core.
//!
//! Only construction and configuration can fail. Once a [`Simulation`](crate::Simulation)
//! exists, every per-frame operation either succeeds or degrades silently.

use thiserror::Error;

/// Errors produced while building grids, pools, or simulations.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Rows or columns was zero, or `rows * cols` overflowed.
    #[error("invalid dimensions: rows and columns must be non-zero")]
    InvalidDimensions,

    /// A particle pool was requested with zero capacity.
    #[error("invalid particle capacity: pool must hold at least one particle")]
    InvalidCapacity,

    /// A configuration value was out of its valid range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A field name did not match any known field kind.
    #[error("unknown field kind: {0}")]
    UnknownField(String),

    /// Reading a config file or writing a snapshot failed.
    #[error("i/o error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_mentions_rows_and_columns() {
        let msg = FieldError::InvalidDimensions.to_string();
        assert!(
            msg.contains("rows") && msg.contains("columns"),
            "expected message mentioning rows and columns, got: {msg}"
        );
    }

    #[test]
    fn invalid_capacity_mentions_pool() {
        let msg = FieldError::InvalidCapacity.to_string();
        assert!(msg.contains("pool"), "got: {msg}");
    }

    #[test]
    fn invalid_config_includes_message() {
        let msg = FieldError::InvalidConfig("cell_size must be positive".into()).to_string();
        assert!(msg.contains("cell_size"), "missing detail in: {msg}");
    }

    #[test]
    fn unknown_field_includes_name() {
        let msg = FieldError::UnknownField("dipole".into()).to_string();
        assert!(msg.contains("dipole"), "missing name in: {msg}");
    }

    #[test]
    fn io_includes_message() {
        let msg = FieldError::Io("disk full".into()).to_string();
        assert!(msg.contains("disk full"), "missing message in: {msg}");
    }

    #[test]
    fn field_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FieldError>();
    }

    #[test]
    fn field_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<FieldError>();
    }
}
