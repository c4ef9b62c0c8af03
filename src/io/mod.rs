//! Boundary adapters: reading tables from files and writing them back out.
//!
//! Most callers should use [`read_table`] and [`write_table`], which pick an adapter
//! from the file extension. The per-format modules are public for in-memory input and
//! finer control.

pub mod csv;
pub mod json;
pub mod observability;
pub mod parquet;
pub mod unified;

pub use csv::{CsvReadOptions, CsvWriteOptions};
pub use observability::{
    CompositeObserver, FileObserver, LogObserver, ReadContext, ReadObserver, ReadSeverity,
    ReadStats,
};
pub use unified::{read_table, write_table, FileFormat, ReadOptions, WriteOptions};
