//! `rust-dataframe` is a small in-memory table library: typed columns ([`series::Series`])
//! grouped into a [`table::Table`], transformed with apply/filter pipelines, reduced with
//! [`processing::Aggregator`]s and partitioned with [`processing::group_by`].
//!
//! Tables are read from and written to files through [`io`]. Delimited text has each
//! column's kind inferred by majority vote ([`inference`]).
//!
//! ## Value model
//!
//! Every cell is a [`types::Value`]: `Null`, `Int(i64)`, `Float(f64)`, `Text(String)` or
//! `Bool(bool)`. A series stores one [`types::Kind`]: Int, Float, Text, Bool, or Mixed for
//! heterogeneous values (including nulls).
//!
//! Conversions between kinds follow [`convert::convert`]: numeric text is cleaned
//! (thousands separators and surrounding spaces removed), floats truncate toward zero,
//! and bools map to `1`/`0`.
//!
//! ## Sharing
//!
//! Cloning a [`series::Series`] is cheap and shares storage: an element written with
//! [`series::Series::set`] is visible through every clone. Operations that change a
//! series' length detach it from the shared storage first. Use
//! [`series::Series::copy`] with `deep = true` or [`table::Table::deep_copy`] for an
//! independent copy. Shared storage is single-threaded; a table is not `Send`.
//!
//! ## Quick example
//!
//! ```rust
//! use rust_dataframe::io::csv::{read_csv_from_str, CsvReadOptions};
//! use rust_dataframe::processing::{group_by, Aggregator, Predicate};
//! use rust_dataframe::types::Value;
//!
//! let csv = "city,temp\nOslo,3\nLima,19\nOslo,5\nLima,21\n";
//! let mut table = read_csv_from_str(csv, &CsvReadOptions::default())?;
//!
//! table.filter_column("temp", &Predicate::ge(4))?;
//! let out = group_by(&table, &["city"], &[("temp", Aggregator::mean())]);
//! assert_eq!(out.to_rows(), vec![
//!     vec![Value::from("Lima"), Value::Float(20.0)],
//!     vec![Value::from("Oslo"), Value::Float(5.0)],
//! ]);
//! # Ok::<(), rust_dataframe::FrameError>(())
//! ```
//!
//! ## Reading files
//!
//! ```no_run
//! use rust_dataframe::io::{read_table, ReadOptions};
//!
//! # fn main() -> Result<(), rust_dataframe::FrameError> {
//! // Auto-detects by extension (.csv/.json/.ndjson/.parquet).
//! let table = read_table("data.csv", &ReadOptions::default())?;
//! println!("shape={:?}", table.shape());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`types`]: kinds, values and axes
//! - [`error`]: error types used across the crate
//! - [`convert`]: value conversion between kinds
//! - [`series`]: typed columns
//! - [`table`]: ordered, equal-height collections of series
//! - [`processing`]: apply, filter, predicates, aggregation and group-by
//! - [`inference`]: kind inference for text columns
//! - [`io`]: CSV, JSON and Parquet adapters with observer hooks

pub mod convert;
pub mod error;
pub mod inference;
pub mod io;
pub mod processing;
pub mod series;
pub mod table;
pub mod types;

pub use error::{ConversionError, FrameError, FrameResult};
pub use series::Series;
pub use table::Table;
pub use types::{Kind, Value};
