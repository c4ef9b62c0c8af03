//! Path-based entry points that pick an adapter by format.
//!
//! - If [`ReadOptions::format`] is `None`, the format is inferred from the file extension.
//! - If a [`ReadObserver`] is provided, success, failure and alerts are reported to it.
//! - A `.tsv` path handled with the default `,` delimiter is split on tabs instead.

use std::error::Error as StdError;
use std::fmt;
use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};
use crate::table::Table;

use super::csv::{CsvReadOptions, CsvWriteOptions};
use super::observability::{ReadContext, ReadObserver, ReadSeverity, ReadStats};
use super::{csv, json, parquet};

/// Supported file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    /// Delimited text.
    Csv,
    /// JSON array-of-objects or NDJSON.
    Json,
    /// Apache Parquet.
    Parquet,
}

impl FileFormat {
    /// Parse a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" | "tsv" | "txt" => Some(Self::Csv),
            "json" | "ndjson" => Some(Self::Json),
            "parquet" | "pq" => Some(Self::Parquet),
            _ => None,
        }
    }

    /// Infer a format from the extension of `path`.
    pub fn from_path(path: &Path) -> FrameResult<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| FrameError::Unsupported {
                message: format!(
                    "cannot infer format: path has no extension ({})",
                    path.display()
                ),
            })?;
        Self::from_extension(ext).ok_or_else(|| FrameError::Unsupported {
            message: format!(
                "cannot infer format from extension '{ext}' for path ({})",
                path.display()
            ),
        })
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileFormat::Csv => "csv",
            FileFormat::Json => "json",
            FileFormat::Parquet => "parquet",
        })
    }
}

fn is_tsv(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("tsv"))
}

/// `.tsv` files keep every caller setting except a default `,` delimiter.
fn csv_read_options<'a>(path: &Path, options: &'a CsvReadOptions) -> Cow<'a, CsvReadOptions> {
    if options.delimiter == ',' && is_tsv(path) {
        Cow::Owned(CsvReadOptions {
            delimiter: '\t',
            ..options.clone()
        })
    } else {
        Cow::Borrowed(options)
    }
}

fn csv_write_options<'a>(path: &Path, options: &'a CsvWriteOptions) -> Cow<'a, CsvWriteOptions> {
    if options.delimiter == ',' && is_tsv(path) {
        Cow::Owned(CsvWriteOptions {
            delimiter: '\t',
            ..options.clone()
        })
    } else {
        Cow::Borrowed(options)
    }
}

/// Options controlling [`read_table`].
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct ReadOptions {
    /// If `None`, detect the format from the file extension.
    pub format: Option<FileFormat>,
    /// Delimited-text options, used only for CSV.
    pub csv: CsvReadOptions,
    /// Optional observer for logging and alerts.
    pub observer: Option<Arc<dyn ReadObserver>>,
    /// Severity at which `on_alert` is invoked.
    pub alert_at_or_above: ReadSeverity,
}

impl fmt::Debug for ReadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadOptions")
            .field("format", &self.format)
            .field("csv", &self.csv)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            format: None,
            csv: CsvReadOptions::default(),
            observer: None,
            alert_at_or_above: ReadSeverity::Critical,
        }
    }
}

/// Options controlling [`write_table`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    /// If `None`, detect the format from the file extension.
    pub format: Option<FileFormat>,
    pub csv: CsvWriteOptions,
}

/// Read a file into a [`Table`].
///
/// When an observer is configured, this function reports:
///
/// - `on_success` with the table shape and column kinds
/// - `on_failure` with a computed severity
/// - `on_alert` when that severity is >= `options.alert_at_or_above`
///
/// Format detection failures are returned before any observer call.
///
/// ```no_run
/// use std::sync::Arc;
///
/// use rust_dataframe::io::{read_table, LogObserver, ReadOptions, ReadSeverity};
///
/// # fn main() -> Result<(), rust_dataframe::FrameError> {
/// let opts = ReadOptions {
///     observer: Some(Arc::new(LogObserver)),
///     alert_at_or_above: ReadSeverity::Error,
///     ..Default::default()
/// };
/// let table = read_table("people.csv", &opts)?;
/// println!("{:?}", table.shape());
/// # Ok(())
/// # }
/// ```
pub fn read_table(path: impl AsRef<Path>, options: &ReadOptions) -> FrameResult<Table> {
    let path = path.as_ref();
    let format = match options.format {
        Some(f) => f,
        None => FileFormat::from_path(path)?,
    };

    let ctx = ReadContext {
        path: path.to_path_buf(),
        format,
    };

    let result = match format {
        FileFormat::Csv => csv::read_csv_from_path(path, &csv_read_options(path, &options.csv)),
        FileFormat::Json => json::read_json_from_path(path),
        FileFormat::Parquet => parquet::read_parquet_from_path(path),
    };

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(table) => obs.on_success(&ctx, &ReadStats::of(table)),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

/// Write `table` to `path`. Only CSV output is supported; a `.tsv` path written with the
/// default delimiter gets tabs.
pub fn write_table(table: &Table, path: impl AsRef<Path>, options: &WriteOptions) -> FrameResult<()> {
    let path = path.as_ref();
    let format = match options.format {
        Some(f) => f,
        None => FileFormat::from_path(path)?,
    };
    match format {
        FileFormat::Csv => csv::write_csv_to_path(table, path, &csv_write_options(path, &options.csv)),
        other => Err(FrameError::Unsupported {
            message: format!("writing {other:?} files is not supported"),
        }),
    }
}

pub(crate) fn severity_for_error(e: &FrameError) -> ReadSeverity {
    match e {
        FrameError::Io(_) => ReadSeverity::Critical,
        FrameError::Parquet(err) => {
            // Parquet errors may wrap I/O without a dedicated variant.
            if error_chain_contains_io(err) {
                ReadSeverity::Critical
            } else {
                ReadSeverity::Error
            }
        }
        FrameError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => ReadSeverity::Critical,
            _ => ReadSeverity::Error,
        },
        FrameError::Json(err) if err.is_io() => ReadSeverity::Critical,
        FrameError::DimensionMismatch { .. } => ReadSeverity::Warning,
        _ => ReadSeverity::Error,
    }
}

fn error_chain_contains_io(e: &(dyn StdError + 'static)) -> bool {
    let mut cur: Option<&(dyn StdError + 'static)> = Some(e);
    while let Some(err) = cur {
        if err.is::<std::io::Error>() {
            return true;
        }
        cur = err.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{csv_read_options, severity_for_error, FileFormat};
    use crate::error::FrameError;
    use crate::io::{CsvReadOptions, ReadSeverity};

    #[test]
    fn format_from_extension_is_case_insensitive() {
        assert_eq!(FileFormat::from_extension("CSV"), Some(FileFormat::Csv));
        assert_eq!(FileFormat::from_extension("ndjson"), Some(FileFormat::Json));
        assert_eq!(FileFormat::from_extension("pq"), Some(FileFormat::Parquet));
        assert_eq!(FileFormat::from_extension("xlsx"), None);
        assert!(FileFormat::from_path(Path::new("no_extension")).is_err());
    }

    #[test]
    fn tsv_paths_default_to_tab_delimiter() {
        let defaults = CsvReadOptions::default();
        assert_eq!(csv_read_options(Path::new("a.TSV"), &defaults).delimiter, '\t');
        assert_eq!(csv_read_options(Path::new("a.txt"), &defaults).delimiter, ',');

        let semicolon = CsvReadOptions {
            delimiter: ';',
            ..Default::default()
        };
        assert_eq!(csv_read_options(Path::new("a.tsv"), &semicolon).delimiter, ';');
        assert_eq!(FileFormat::Parquet.to_string(), "parquet");
    }

    #[test]
    fn io_errors_are_critical() {
        let io = FrameError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(severity_for_error(&io), ReadSeverity::Critical);
        let unsupported = FrameError::Unsupported {
            message: "x".to_string(),
        };
        assert_eq!(severity_for_error(&unsupported), ReadSeverity::Error);
    }
}
