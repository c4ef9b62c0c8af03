//! Named reductions over a sequence of values.
//!
//! An [`Aggregator`] maps `&[Value]` to an [`Aggregate`]. Results that come from the
//! permissive fallback (summing text that is not numeric, taking the minimum of
//! unordered values) are tagged [`Aggregate::Fallback`] so callers can tell a degraded
//! value from a real one.
//!
//! ```
//! use rust_dataframe::processing::{Aggregate, Aggregator};
//! use rust_dataframe::types::Value;
//!
//! let values: Vec<Value> = (1..=5).map(Value::Int).collect();
//! assert_eq!(Aggregator::sum().apply(&values), Aggregate::Value(Value::Int(15)));
//! assert_eq!(Aggregator::mean().apply(&values), Aggregate::Value(Value::Float(3.0)));
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::convert;
use crate::error::{FrameError, FrameResult};
use crate::series::Series;
use crate::table::Table;
use crate::types::Value;

/// Result of applying an [`Aggregator`].
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregate {
    /// A real result.
    Value(Value),
    /// The inputs could not be reduced numerically; this is the permissive stand-in.
    Fallback(Value),
    /// One result per wrapped aggregator, in order, from [`Aggregator::combine`].
    Combined(Vec<(String, Aggregate)>),
}

impl Aggregate {
    /// The single value, if this is not a combined result.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Aggregate::Value(v) | Aggregate::Fallback(v) => Some(v),
            Aggregate::Combined(_) => None,
        }
    }

    /// The single value, or null for a combined result.
    pub fn into_value(self) -> Value {
        match self {
            Aggregate::Value(v) | Aggregate::Fallback(v) => v,
            Aggregate::Combined(_) => Value::Null,
        }
    }

    /// Returns `true` if this result, or any part of it, is a fallback.
    pub fn is_fallback(&self) -> bool {
        match self {
            Aggregate::Value(_) => false,
            Aggregate::Fallback(_) => true,
            Aggregate::Combined(parts) => parts.iter().any(|(_, a)| a.is_fallback()),
        }
    }

    /// Name every leaf value: a single result is named `prefix`, the parts of a combined
    /// result `{prefix}_{part}`.
    pub fn flatten(self, prefix: &str) -> Vec<(String, Value)> {
        match self {
            Aggregate::Value(v) | Aggregate::Fallback(v) => vec![(prefix.to_owned(), v)],
            Aggregate::Combined(parts) => parts
                .into_iter()
                .flat_map(|(name, part)| part.flatten(&format!("{prefix}_{name}")))
                .collect(),
        }
    }
}

type AggregateFn = dyn Fn(&[Value]) -> Aggregate + Send + Sync;

/// A named, stateless reduction.
#[derive(Clone)]
pub struct Aggregator {
    name: String,
    func: Arc<AggregateFn>,
}

impl fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aggregator")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Aggregator {
    /// A custom aggregator.
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[Value]) -> Aggregate + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, values: &[Value]) -> Aggregate {
        (self.func)(values)
    }

    /// Sum. Empty input is `Int(0)`. All-Int input stays Int unless it overflows; any
    /// other input is summed as floats. Non-numeric input yields `Fallback(Int(0))`.
    pub fn sum() -> Self {
        Self::new("sum", sum)
    }

    /// Arithmetic mean as Float. Empty input is `Float(0.0)`; non-numeric input yields
    /// `Fallback(Float(0.0))`.
    pub fn mean() -> Self {
        Self::new("mean", mean)
    }

    /// Smallest value. Empty input is null; non-numeric input yields the first value as
    /// a fallback.
    pub fn min() -> Self {
        Self::new("min", |values: &[Value]| extreme(values, Extreme::Min))
    }

    /// Largest value, with the same rules as [`Aggregator::min`].
    pub fn max() -> Self {
        Self::new("max", |values: &[Value]| extreme(values, Extreme::Max))
    }

    /// Number of values, including nulls.
    pub fn count() -> Self {
        Self::new("count", |values: &[Value]| {
            Aggregate::Value(Value::Int(values.len() as i64))
        })
    }

    /// First value, or null when empty.
    pub fn first() -> Self {
        Self::new("first", |values: &[Value]| {
            Aggregate::Value(values.first().cloned().unwrap_or_default())
        })
    }

    /// Last value, or null when empty.
    pub fn last() -> Self {
        Self::new("last", |values: &[Value]| {
            Aggregate::Value(values.last().cloned().unwrap_or_default())
        })
    }

    /// Apply every aggregator to the same input and keep all results.
    pub fn combine(aggregators: impl IntoIterator<Item = Aggregator>) -> Self {
        let parts: Vec<Aggregator> = aggregators.into_iter().collect();
        let names: Vec<&str> = parts.iter().map(Aggregator::name).collect();
        let name = format!("combine({})", names.join(","));
        Self::new(name, move |values: &[Value]| {
            Aggregate::Combined(
                parts
                    .iter()
                    .map(|a| (a.name.clone(), a.apply(values)))
                    .collect(),
            )
        })
    }
}

impl FromStr for Aggregator {
    type Err = FrameError;

    /// Parse a built-in aggregator name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" => Ok(Aggregator::sum()),
            "mean" | "avg" | "average" => Ok(Aggregator::mean()),
            "min" => Ok(Aggregator::min()),
            "max" => Ok(Aggregator::max()),
            "count" => Ok(Aggregator::count()),
            "first" => Ok(Aggregator::first()),
            "last" => Ok(Aggregator::last()),
            other => Err(FrameError::Unsupported {
                message: format!("unknown aggregator '{other}'"),
            }),
        }
    }
}

fn ints(values: &[Value]) -> Option<Vec<i64>> {
    values.iter().map(Value::as_int).collect()
}

fn floats(values: &[Value]) -> Option<Vec<f64>> {
    values.iter().map(Value::as_float).collect()
}

/// Every value as f64 through the conversion rules, or `None` if any fails.
fn numeric(values: &[Value]) -> Option<Vec<f64>> {
    values.iter().map(convert::to_f64).collect()
}

fn sum(values: &[Value]) -> Aggregate {
    if values.is_empty() {
        return Aggregate::Value(Value::Int(0));
    }
    if let Some(ints) = ints(values) {
        if let Some(total) = ints.iter().try_fold(0_i64, |acc, v| acc.checked_add(*v)) {
            return Aggregate::Value(Value::Int(total));
        }
    }
    let floats = floats(values).or_else(|| numeric(values));
    match floats {
        Some(fs) => Aggregate::Value(Value::Float(fs.iter().sum())),
        None => Aggregate::Fallback(Value::Int(0)),
    }
}

fn mean(values: &[Value]) -> Aggregate {
    if values.is_empty() {
        return Aggregate::Value(Value::Float(0.0));
    }
    let n = values.len() as f64;
    if let Some(ints) = ints(values) {
        let total: i128 = ints.iter().map(|v| i128::from(*v)).sum();
        return Aggregate::Value(Value::Float(total as f64 / n));
    }
    match floats(values).or_else(|| numeric(values)) {
        Some(fs) => Aggregate::Value(Value::Float(fs.iter().sum::<f64>() / n)),
        None => Aggregate::Fallback(Value::Float(0.0)),
    }
}

#[derive(Clone, Copy)]
enum Extreme {
    Min,
    Max,
}

impl Extreme {
    fn pick_int(self, a: i64, b: i64) -> i64 {
        match self {
            Extreme::Min => a.min(b),
            Extreme::Max => a.max(b),
        }
    }

    fn pick_float(self, a: f64, b: f64) -> f64 {
        match self {
            Extreme::Min => a.min(b),
            Extreme::Max => a.max(b),
        }
    }
}

fn extreme(values: &[Value], which: Extreme) -> Aggregate {
    let Some(first) = values.first() else {
        return Aggregate::Value(Value::Null);
    };
    if let Some(ints) = ints(values) {
        if let Some(v) = ints.into_iter().reduce(|a, b| which.pick_int(a, b)) {
            return Aggregate::Value(Value::Int(v));
        }
    }
    match floats(values).or_else(|| numeric(values)) {
        Some(fs) => match fs.into_iter().reduce(|a, b| which.pick_float(a, b)) {
            Some(v) => Aggregate::Value(Value::Float(v)),
            None => Aggregate::Value(Value::Null),
        },
        None => Aggregate::Fallback(first.clone()),
    }
}

impl Series {
    /// Apply `aggregator` to every value of this series.
    pub fn aggregate(&self, aggregator: &Aggregator) -> Aggregate {
        let result = aggregator.apply(&self.values());
        if result.is_fallback() {
            log::warn!(
                "aggregation '{}' over series '{}' fell back to a default value",
                aggregator.name(),
                self.name()
            );
        }
        result
    }
}

impl Table {
    /// Apply `aggregator` to the column called `column`.
    pub fn aggregate(&self, column: &str, aggregator: &Aggregator) -> FrameResult<Aggregate> {
        let series = self.get_series(column, false)?;
        Ok(series.aggregate(aggregator))
    }
}
