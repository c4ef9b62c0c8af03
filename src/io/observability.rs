//! Outcome reporting for [`super::read_table`].
//!
//! A [`ReadObserver`] hears about every read: the table's shape and column kinds on
//! success, the error and its [`ReadSeverity`] on failure. [`LogObserver`] and
//! [`FileObserver`] render the same one-line summary, to the `log` facade and to an
//! append-only file respectively. [`CompositeObserver`] fans out to several observers.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::FrameError;
use crate::table::Table;
use crate::types::Kind;

use super::unified::FileFormat;

/// How bad a failed read is. Ordered, so it can be compared to an alert threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReadSeverity {
    Info,
    Warning,
    /// The input could not be decoded.
    Error,
    /// The input could not be reached (I/O).
    Critical,
}

/// Which file was read, and how.
#[derive(Debug, Clone)]
pub struct ReadContext {
    pub path: PathBuf,
    pub format: FileFormat,
}

/// What a successful read produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadStats {
    pub rows: usize,
    pub columns: usize,
    /// Kind of each column, in column order.
    pub kinds: Vec<Kind>,
}

impl ReadStats {
    pub fn of(table: &Table) -> Self {
        Self {
            rows: table.height(),
            columns: table.width(),
            kinds: table.columns().iter().map(|s| s.kind()).collect(),
        }
    }
}

/// Receives read outcomes. Every method defaults to doing nothing except
/// [`ReadObserver::on_alert`], which forwards to [`ReadObserver::on_failure`].
pub trait ReadObserver: Send + Sync {
    fn on_success(&self, _ctx: &ReadContext, _stats: &ReadStats) {}

    fn on_failure(&self, _ctx: &ReadContext, _severity: ReadSeverity, _error: &FrameError) {}

    /// A failure at or above the caller's alert threshold.
    fn on_alert(&self, ctx: &ReadContext, severity: ReadSeverity, error: &FrameError) {
        self.on_failure(ctx, severity, error)
    }
}

/// One reported outcome, rendered the same way by every built-in sink.
enum Outcome<'a> {
    Loaded(&'a ReadStats),
    Failed(ReadSeverity, &'a FrameError),
    Alert(ReadSeverity, &'a FrameError),
}

impl Outcome<'_> {
    fn level(&self) -> log::Level {
        match self {
            Outcome::Loaded(_) => log::Level::Info,
            Outcome::Failed(ReadSeverity::Info, _) => log::Level::Info,
            Outcome::Failed(ReadSeverity::Warning, _) => log::Level::Warn,
            Outcome::Failed(..) | Outcome::Alert(..) => log::Level::Error,
        }
    }

    fn line(&self, ctx: &ReadContext) -> String {
        let source = format!("{} {}", ctx.format, ctx.path.display());
        match self {
            Outcome::Loaded(stats) => {
                let kinds: Vec<&str> = stats.kinds.iter().map(|k| k.as_str()).collect();
                format!(
                    "ok {source}: {} rows x {} columns [{}]",
                    stats.rows,
                    stats.columns,
                    kinds.join(",")
                )
            }
            Outcome::Failed(severity, error) => format!("fail[{severity:?}] {source}: {error}"),
            Outcome::Alert(severity, error) => format!("ALERT[{severity:?}] {source}: {error}"),
        }
    }
}

/// Forwards outcomes to the `log` facade: success at `info`, failures at `info`, `warn`
/// or `error` by severity, alerts at `error`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl LogObserver {
    fn emit(ctx: &ReadContext, outcome: Outcome<'_>) {
        log::log!(outcome.level(), "read {}", outcome.line(ctx));
    }
}

impl ReadObserver for LogObserver {
    fn on_success(&self, ctx: &ReadContext, stats: &ReadStats) {
        Self::emit(ctx, Outcome::Loaded(stats));
    }

    fn on_failure(&self, ctx: &ReadContext, severity: ReadSeverity, error: &FrameError) {
        Self::emit(ctx, Outcome::Failed(severity, error));
    }

    fn on_alert(&self, ctx: &ReadContext, severity: ReadSeverity, error: &FrameError) {
        Self::emit(ctx, Outcome::Alert(severity, error));
    }
}

/// Appends one timestamped line per outcome to a file.
///
/// A file that cannot be opened or written is reported at `debug` level and otherwise
/// ignored; observing never fails a read.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(&self, ctx: &ReadContext, outcome: Outcome<'_>) {
        let line = format!("{} {}", unix_secs(), outcome.line(ctx));
        let _guard = self.lock.lock().ok();
        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut f| writeln!(f, "{line}"));
        if let Err(e) = written {
            log::debug!("read observer could not write {}: {e}", self.path.display());
        }
    }
}

impl ReadObserver for FileObserver {
    fn on_success(&self, ctx: &ReadContext, stats: &ReadStats) {
        self.record(ctx, Outcome::Loaded(stats));
    }

    fn on_failure(&self, ctx: &ReadContext, severity: ReadSeverity, error: &FrameError) {
        self.record(ctx, Outcome::Failed(severity, error));
    }

    fn on_alert(&self, ctx: &ReadContext, severity: ReadSeverity, error: &FrameError) {
        self.record(ctx, Outcome::Alert(severity, error));
    }
}

fn unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

/// Several observers behind one, called in the order they were added.
#[derive(Default, Clone)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ReadObserver>>,
}

impl CompositeObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an observer, builder style.
    pub fn with(mut self, observer: Arc<dyn ReadObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompositeObserver({} observers)", self.observers.len())
    }
}

impl ReadObserver for CompositeObserver {
    fn on_success(&self, ctx: &ReadContext, stats: &ReadStats) {
        self.observers.iter().for_each(|o| o.on_success(ctx, stats));
    }

    fn on_failure(&self, ctx: &ReadContext, severity: ReadSeverity, error: &FrameError) {
        self.observers
            .iter()
            .for_each(|o| o.on_failure(ctx, severity, error));
    }

    fn on_alert(&self, ctx: &ReadContext, severity: ReadSeverity, error: &FrameError) {
        self.observers
            .iter()
            .for_each(|o| o.on_alert(ctx, severity, error));
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{Outcome, ReadContext, ReadSeverity, ReadStats};
    use crate::error::FrameError;
    use crate::io::FileFormat;
    use crate::types::Kind;

    fn ctx() -> ReadContext {
        ReadContext {
            path: PathBuf::from("data/people.csv"),
            format: FileFormat::Csv,
        }
    }

    #[test]
    fn success_line_lists_shape_and_kinds() {
        let stats = ReadStats {
            rows: 2,
            columns: 2,
            kinds: vec![Kind::Int, Kind::Text],
        };
        let outcome = Outcome::Loaded(&stats);
        assert_eq!(outcome.line(&ctx()), "ok csv data/people.csv: 2 rows x 2 columns [int,text]");
        assert_eq!(outcome.level(), log::Level::Info);
    }

    #[test]
    fn failure_level_follows_severity() {
        let err = FrameError::Unsupported {
            message: "bad".to_string(),
        };
        assert_eq!(Outcome::Failed(ReadSeverity::Warning, &err).level(), log::Level::Warn);
        assert_eq!(Outcome::Failed(ReadSeverity::Error, &err).level(), log::Level::Error);
        let line = Outcome::Alert(ReadSeverity::Critical, &err).line(&ctx());
        assert!(line.starts_with("ALERT[Critical] csv data/people.csv: "));
    }
}
