//! In-memory table transformations.
//!
//! - [`apply`]: derive a column per row ([`apply_index`], [`apply_map`]) or per column
//!   ([`apply_series`])
//! - [`filter`]: drop rows by predicate ([`filter_index`], [`filter_map`])
//! - [`predicate`]: reusable value predicates ([`Predicate`], [`matching_rows`])
//! - [`aggregate`]: named reductions ([`Aggregator`], [`Aggregate`])
//! - [`groupby`]: partition rows by key columns and aggregate ([`group_by`])
//!
//! ## Example: apply → filter → group by
//!
//! ```rust
//! use rust_dataframe::processing::{apply_index, filter_index, group_by, Aggregator};
//! use rust_dataframe::series::Series;
//! use rust_dataframe::table::Table;
//! use rust_dataframe::types::Value;
//!
//! let mut t = Table::from_series([
//!     Series::from_texts("category", ["A", "B", "A", "B"]),
//!     Series::from_floats("price", vec![10.0, 20.0, 30.0, 5.0]),
//!     Series::from_ints("qty", vec![1, 2, 3, 4]),
//! ])?;
//!
//! apply_index(&mut t, ["price", "qty"], "revenue", |row| {
//!     let price = row[0].as_float().unwrap_or(0.0);
//!     let qty = row[1].as_int().unwrap_or(0) as f64;
//!     Value::Float(price * qty)
//! })?;
//! filter_index(&mut t, "revenue", |row| row[0].as_float().is_some_and(|r| r >= 20.0))?;
//!
//! let out = group_by(&t, &["category"], &[("revenue", Aggregator::sum())]);
//! assert_eq!(out.to_rows(), vec![
//!     vec![Value::from("A"), Value::Float(90.0)],
//!     vec![Value::from("B"), Value::Float(60.0)],
//! ]);
//! # Ok::<(), rust_dataframe::error::FrameError>(())
//! ```

pub mod aggregate;
pub mod apply;
pub mod filter;
pub mod groupby;
pub mod predicate;

pub use aggregate::{Aggregate, Aggregator};
pub use apply::{apply_index, apply_map, apply_series};
pub use filter::{filter_index, filter_map};
pub use groupby::{group_by, COUNT_COLUMN};
pub use predicate::{compare, matching_rows, Predicate};
