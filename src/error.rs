use std::fmt;

use thiserror::Error;

use crate::types::{Axis, Kind};

/// Convenience result type for table operations.
pub type FrameResult<T> = Result<T, FrameError>;

/// Error type returned by series, table, processing, and adapter functions.
///
/// Mutating operations that return this error leave their receiver unchanged.
#[derive(Debug, Error)]
pub enum FrameError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited-text read/write error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Parquet read error.
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// JSON parse error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A row or column does not match the table's current shape.
    #[error("dimension mismatch ({context}): expected {expected}, found {found}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },

    /// One or more column names are not present in the table.
    #[error("unknown column(s): {}", quoted(.names))]
    UnknownColumn { names: Vec<String> },

    /// A positional index is past the end of a table dimension.
    #[error("{axis} index {index} out of range (len {len})")]
    IndexOutOfRange { axis: Axis, index: usize, len: usize },

    /// A value could not be cast to the requested kind.
    #[error("conversion failure: {0}")]
    Conversion(#[from] ConversionError),

    /// The requested operation is not supported (unknown file type, unknown cast target, ...).
    #[error("unsupported operation: {message}")]
    Unsupported { message: String },
}

fn quoted(names: &[String]) -> String {
    let list: Vec<String> = names.iter().map(|n| format!("\"{n}\"")).collect();
    format!("[{}]", list.join(", "))
}

/// A single value that could not be converted to a target [`Kind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionError {
    /// Kind of the source value (`None` for null).
    pub from: Option<Kind>,
    /// Requested kind.
    pub to: Kind,
    /// Text rendering of the source value.
    pub raw: String,
    /// Why the conversion failed.
    pub message: String,
}

impl ConversionError {
    pub(crate) fn new(
        from: Option<Kind>,
        to: Kind,
        raw: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            from,
            to,
            raw: raw.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let from = self.from.map_or("null", |k| k.as_str());
        write!(
            f,
            "cannot convert {from} value to {}: {} (raw='{}')",
            self.to, self.message, self.raw
        )
    }
}

impl std::error::Error for ConversionError {}

#[cfg(test)]
mod tests {
    use super::{ConversionError, FrameError};
    use crate::types::{Axis, Kind};

    #[test]
    fn unknown_column_lists_every_name() {
        let err = FrameError::UnknownColumn {
            names: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(err.to_string(), r#"unknown column(s): ["a", "b"]"#);
    }

    #[test]
    fn index_out_of_range_names_axis() {
        let err = FrameError::IndexOutOfRange {
            axis: Axis::Column,
            index: 4,
            len: 2,
        };
        assert_eq!(err.to_string(), "column index 4 out of range (len 2)");
    }

    #[test]
    fn conversion_error_renders_null_source() {
        let err = ConversionError::new(None, Kind::Int, "", "null has no int value");
        assert_eq!(
            err.to_string(),
            "cannot convert null value to int: null has no int value (raw='')"
        );
    }
}
