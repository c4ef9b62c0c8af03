//! Value predicates for filtering a single column.
//!
//! ```
//! use rust_dataframe::processing::{matching_rows, Predicate};
//! use rust_dataframe::series::Series;
//!
//! let ages = Series::from_ints("age", vec![35, 23, 48]);
//! let p = Predicate::ge(30).and(Predicate::lt(40));
//! assert_eq!(matching_rows(&ages, &p), vec![0]);
//! ```

use std::cmp::Ordering;
use std::ops::Not;

use crate::error::FrameResult;
use crate::series::Series;
use crate::table::Table;
use crate::types::Value;

/// A test applied to one value.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Gt(Value),
    Lt(Value),
    Ge(Value),
    Le(Value),
    Eq(Value),
    Ne(Value),
    /// Text values containing the substring. Non-text values never match.
    Contains(String),
    StartsWith(String),
    EndsWith(String),
    /// Equal (by [`compare`]) to any listed value.
    In(Vec<Value>),
    IsNull,
    NotNull,
    /// Every inner predicate matches. Empty matches everything.
    All(Vec<Predicate>),
    /// Any inner predicate matches. Empty matches nothing.
    Any(Vec<Predicate>),
    Negate(Box<Predicate>),
}

impl Predicate {
    pub fn gt(v: impl Into<Value>) -> Self {
        Predicate::Gt(v.into())
    }

    pub fn lt(v: impl Into<Value>) -> Self {
        Predicate::Lt(v.into())
    }

    pub fn ge(v: impl Into<Value>) -> Self {
        Predicate::Ge(v.into())
    }

    pub fn le(v: impl Into<Value>) -> Self {
        Predicate::Le(v.into())
    }

    pub fn eq(v: impl Into<Value>) -> Self {
        Predicate::Eq(v.into())
    }

    pub fn ne(v: impl Into<Value>) -> Self {
        Predicate::Ne(v.into())
    }

    pub fn contains(s: impl Into<String>) -> Self {
        Predicate::Contains(s.into())
    }

    pub fn starts_with(s: impl Into<String>) -> Self {
        Predicate::StartsWith(s.into())
    }

    pub fn ends_with(s: impl Into<String>) -> Self {
        Predicate::EndsWith(s.into())
    }

    pub fn is_in<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Predicate::In(values.into_iter().map(Into::into).collect())
    }

    pub fn is_null() -> Self {
        Predicate::IsNull
    }

    pub fn not_null() -> Self {
        Predicate::NotNull
    }

    /// Both `self` and `other` must match.
    pub fn and(self, other: Predicate) -> Self {
        match self {
            Predicate::All(mut ps) => {
                ps.push(other);
                Predicate::All(ps)
            }
            p => Predicate::All(vec![p, other]),
        }
    }

    /// Either `self` or `other` must match.
    pub fn or(self, other: Predicate) -> Self {
        match self {
            Predicate::Any(mut ps) => {
                ps.push(other);
                Predicate::Any(ps)
            }
            p => Predicate::Any(vec![p, other]),
        }
    }

    /// Evaluate against one value.
    pub fn test(&self, value: &Value) -> bool {
        match self {
            Predicate::Gt(t) => compare(value, t) == Ordering::Greater,
            Predicate::Lt(t) => compare(value, t) == Ordering::Less,
            Predicate::Ge(t) => compare(value, t) != Ordering::Less,
            Predicate::Le(t) => compare(value, t) != Ordering::Greater,
            Predicate::Eq(t) => compare(value, t) == Ordering::Equal,
            Predicate::Ne(t) => compare(value, t) != Ordering::Equal,
            Predicate::Contains(s) => value.as_text().is_some_and(|v| v.contains(s.as_str())),
            Predicate::StartsWith(s) => value.as_text().is_some_and(|v| v.starts_with(s.as_str())),
            Predicate::EndsWith(s) => value.as_text().is_some_and(|v| v.ends_with(s.as_str())),
            Predicate::In(set) => set.iter().any(|t| compare(value, t) == Ordering::Equal),
            Predicate::IsNull => value.is_null(),
            Predicate::NotNull => !value.is_null(),
            Predicate::All(ps) => ps.iter().all(|p| p.test(value)),
            Predicate::Any(ps) => ps.iter().any(|p| p.test(value)),
            Predicate::Negate(p) => !p.test(value),
        }
    }
}

impl Not for Predicate {
    type Output = Predicate;

    fn not(self) -> Predicate {
        match self {
            Predicate::Negate(inner) => *inner,
            p => Predicate::Negate(Box::new(p)),
        }
    }
}

/// Total order used by the comparison predicates.
///
/// Null sorts before everything. Int, Float, and Bool compare numerically with each
/// other; any other pairing compares the text renderings.
pub fn compare(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        (Value::Int(x), Value::Int(y)) => x.cmp(y),
        _ => match (numeric(a), numeric(b)) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or_else(|| x.total_cmp(&y)),
            _ => a.to_text().cmp(&b.to_text()),
        },
    }
}

fn numeric(v: &Value) -> Option<f64> {
    match v {
        Value::Int(i) => Some(*i as f64),
        Value::Float(f) => Some(*f),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Row positions in `series` whose value satisfies `predicate`.
pub fn matching_rows(series: &Series, predicate: &Predicate) -> Vec<usize> {
    series
        .values()
        .iter()
        .enumerate()
        .filter(|(_, v)| predicate.test(v))
        .map(|(i, _)| i)
        .collect()
}

impl Table {
    /// Keep only the rows where `column` satisfies `predicate`.
    pub fn filter_column(&mut self, column: &str, predicate: &Predicate) -> FrameResult<()> {
        let values = self.get_series(column, false)?.values();
        let rejected: Vec<usize> = values
            .iter()
            .enumerate()
            .filter(|(_, v)| !predicate.test(v))
            .map(|(i, _)| i)
            .collect();
        self.drop_rows(&rejected)
    }
}
