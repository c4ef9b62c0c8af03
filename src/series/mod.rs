//! Named, homogeneous columns.
//!
//! A [`Series`] is one of five variants: four concrete kinds backed by a typed
//! [`Column`] and a `Mixed` variant backed by a column of [`Value`]s.
//!
//! ```
//! use rust_dataframe::series::Series;
//! use rust_dataframe::types::{Kind, Value};
//!
//! let s = Series::new("age", vec![Value::Int(35), Value::Int(23)]);
//! assert_eq!(s.kind(), Kind::Int);
//!
//! let mixed = Series::new("x", vec![Value::Int(1), Value::from("a")]);
//! assert_eq!(mixed.kind(), Kind::Mixed);
//! ```
//!
//! ## Aliasing
//!
//! `Clone` and `copy(false)` return a header over the same storage. Element writes made
//! with [`Series::set`] or [`Column::with_values_mut`] are visible through every alias.
//! `drop_row(s)` and `push` never change the length another header sees: shared storage
//! is copied before the length changes. `copy(true)` always yields private storage.

mod column;

pub use column::{Column, Element};

pub(crate) use column::uniform_kind;

use crate::convert;
use crate::error::{FrameError, FrameResult};
use crate::types::{Axis, Kind, Value};

/// Apply `$body` to the column inside any variant.
macro_rules! with_column {
    ($series:expr, $col:ident => $body:expr) => {
        match $series {
            Series::Int($col) => $body,
            Series::Float($col) => $body,
            Series::Text($col) => $body,
            Series::Bool($col) => $body,
            Series::Mixed($col) => $body,
        }
    };
}

/// Apply `$body` to the column inside any variant and rewrap the result in the same variant.
macro_rules! map_column {
    ($series:expr, $col:ident => $body:expr) => {
        match $series {
            Series::Int($col) => Series::Int($body),
            Series::Float($col) => Series::Float($body),
            Series::Text($col) => Series::Text($body),
            Series::Bool($col) => Series::Bool($body),
            Series::Mixed($col) => Series::Mixed($body),
        }
    };
}

/// A named column of one [`Kind`].
#[derive(Debug, Clone)]
pub enum Series {
    Int(Column<i64>),
    Float(Column<f64>),
    Text(Column<String>),
    Bool(Column<bool>),
    /// Heterogeneous values. Stays `Mixed` even when the contents happen to be uniform;
    /// see [`Column::uniform_kind`] and [`Series::as_type`].
    Mixed(Column<Value>),
}

impl Series {
    /// Build a series from untyped values.
    ///
    /// The first value's kind is checked against every value; if all match the result is
    /// that concrete variant, otherwise (or when empty, or when any value is null) the
    /// result is `Mixed`.
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Series {
        match uniform_kind(&values) {
            Some(kind) => Series::from_kind_values(name, kind, values),
            None => Series::Mixed(Column::new(name, values)),
        }
    }

    pub fn from_ints(name: impl Into<String>, values: Vec<i64>) -> Series {
        Series::Int(Column::new(name, values))
    }

    pub fn from_floats(name: impl Into<String>, values: Vec<f64>) -> Series {
        Series::Float(Column::new(name, values))
    }

    pub fn from_texts<I, S>(name: impl Into<String>, values: I) -> Series
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Series::Text(Column::new(
            name,
            values.into_iter().map(Into::into).collect(),
        ))
    }

    pub fn from_bools(name: impl Into<String>, values: Vec<bool>) -> Series {
        Series::Bool(Column::new(name, values))
    }

    /// A `Mixed` series, regardless of whether `values` are uniform.
    pub fn mixed(name: impl Into<String>, values: Vec<Value>) -> Series {
        Series::Mixed(Column::new(name, values))
    }

    /// Build a series of `kind` from values already converted to it.
    ///
    /// An empty `values` still yields the requested kind. Falls back to `Mixed` if a
    /// value does not match.
    pub(crate) fn from_kind_values(
        name: impl Into<String>,
        kind: Kind,
        values: Vec<Value>,
    ) -> Series {
        if kind != Kind::Mixed && !values.iter().all(|v| v.kind() == Some(kind)) {
            return Series::mixed(name, values);
        }
        match kind {
            Kind::Int => Series::Int(Column::new(name, typed(values))),
            Kind::Float => Series::Float(Column::new(name, typed(values))),
            Kind::Text => Series::Text(Column::new(name, typed(values))),
            Kind::Bool => Series::Bool(Column::new(name, typed(values))),
            Kind::Mixed => Series::mixed(name, values),
        }
    }

    pub fn name(&self) -> &str {
        with_column!(self, c => c.name())
    }

    /// Rename in place. Aliases keep their own name.
    pub fn rename(&mut self, name: impl Into<String>) -> &mut Self {
        with_column!(self, c => c.rename(name));
        self
    }

    pub fn kind(&self) -> Kind {
        match self {
            Series::Int(_) => Kind::Int,
            Series::Float(_) => Kind::Float,
            Series::Text(_) => Kind::Text,
            Series::Bool(_) => Kind::Bool,
            Series::Mixed(_) => Kind::Mixed,
        }
    }

    pub fn len(&self) -> usize {
        with_column!(self, c => c.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at row `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<Value> {
        with_column!(self, c => c.get(index).map(Element::into_value))
    }

    /// All values, in row order.
    pub fn values(&self) -> Vec<Value> {
        with_column!(self, c => c.values())
    }

    /// `copy(false)` aliases storage, `copy(true)` duplicates it.
    pub fn copy(&self, deep: bool) -> Series {
        if deep {
            map_column!(self, c => c.deep_copy())
        } else {
            self.clone()
        }
    }

    /// Returns `true` if both series read the same storage.
    pub fn shares_storage_with(&self, other: &Series) -> bool {
        match (self, other) {
            (Series::Int(a), Series::Int(b)) => a.shares_storage_with(b),
            (Series::Float(a), Series::Float(b)) => a.shares_storage_with(b),
            (Series::Text(a), Series::Text(b)) => a.shares_storage_with(b),
            (Series::Bool(a), Series::Bool(b)) => a.shares_storage_with(b),
            (Series::Mixed(a), Series::Mixed(b)) => a.shares_storage_with(b),
            _ => false,
        }
    }

    /// Remove one row. Out-of-range indexes are ignored.
    pub fn drop_row(&mut self, index: usize) -> &mut Self {
        with_column!(self, c => c.drop_row(index));
        self
    }

    /// Remove several rows.
    ///
    /// Indexes are deduplicated and removed from highest to lowest, so the order they are
    /// passed in does not matter. Out-of-range indexes are ignored.
    pub fn drop_rows(&mut self, indexes: &[usize]) -> &mut Self {
        let order = descending_unique(indexes);
        with_column!(self, c => c.drop_rows_descending(&order));
        self
    }

    /// Cast to `kind`, returning a new series; `self` is untouched.
    ///
    /// Casts between concrete kinds that cannot fail are done in bulk. Everything else
    /// converts value by value and fails on the first value that cannot be converted.
    /// Blank text casts to the zero value of a numeric or bool target.
    pub fn as_type(&self, kind: Kind) -> FrameResult<Series> {
        if kind == self.kind() {
            return Ok(self.clone());
        }
        let cast = match (self, kind) {
            (_, Kind::Mixed) => self.to_mixed(),
            (Series::Int(c), Kind::Float) => Series::Float(c.map(|v| convert::int_to_float(*v))),
            (Series::Int(c), Kind::Text) => Series::Text(c.map(|v| v.to_string())),
            (Series::Int(c), Kind::Bool) => Series::Bool(c.map(|v| *v != 0)),
            (Series::Float(c), Kind::Text) => Series::Text(c.map(|v| convert::float_to_text(*v))),
            (Series::Float(c), Kind::Bool) => Series::Bool(c.map(|v| *v != 0.0)),
            (Series::Bool(c), Kind::Int) => Series::Int(c.map(|v| i64::from(*v))),
            (Series::Bool(c), Kind::Float) => Series::Float(c.map(|v| if *v { 1.0 } else { 0.0 })),
            (Series::Bool(c), Kind::Text) => Series::Text(c.map(|v| v.to_string())),
            _ => self.cast_each(kind)?,
        };
        Ok(cast)
    }

    fn cast_each(&self, kind: Kind) -> FrameResult<Series> {
        let mut out = Vec::with_capacity(self.len());
        for (row, value) in self.values().into_iter().enumerate() {
            let cast = match &value {
                Value::Text(s) if s.trim().is_empty() => Ok(zero_value(kind)),
                _ => convert::convert(&value, kind),
            };
            match cast {
                Ok(v) => out.push(v),
                Err(err) => {
                    log::warn!(
                        "cast of series '{}' to {kind} failed at row {row}: {err}",
                        self.name()
                    );
                    return Err(err.into());
                }
            }
        }
        Ok(Series::from_kind_values(self.name(), kind, out))
    }

    /// The same values as a `Mixed` series. A `Mixed` series returns an alias of itself.
    pub fn to_mixed(&self) -> Series {
        match self {
            Series::Mixed(_) => self.clone(),
            _ => Series::mixed(self.name(), self.values()),
        }
    }

    /// Overwrite row `index` in place, converting `value` to this series' kind.
    ///
    /// The write goes to shared storage and is visible through every alias.
    pub fn set(&self, index: usize, value: Value) -> FrameResult<()> {
        let len = self.len();
        if index >= len {
            return Err(FrameError::IndexOutOfRange {
                axis: Axis::Row,
                index,
                len,
            });
        }
        let value = convert::convert(&value, self.kind())?;
        with_column!(self, c => c.set_value(index, value));
        Ok(())
    }

    /// Append one value, keeping the concrete kind when the value matches it.
    ///
    /// A value of another kind (or null) demotes a concrete series to `Mixed` first.
    pub fn push(&mut self, value: Value) {
        if self.kind() != Kind::Mixed && value.kind() != Some(self.kind()) {
            log::debug!(
                "series '{}' demoted from {} to mixed on append",
                self.name(),
                self.kind()
            );
            *self = Series::mixed(self.name(), self.values());
        }
        with_column!(self, c => c.push_value(value));
    }

    pub fn int_column(&self) -> Option<&Column<i64>> {
        match self {
            Series::Int(c) => Some(c),
            _ => None,
        }
    }

    pub fn float_column(&self) -> Option<&Column<f64>> {
        match self {
            Series::Float(c) => Some(c),
            _ => None,
        }
    }

    pub fn text_column(&self) -> Option<&Column<String>> {
        match self {
            Series::Text(c) => Some(c),
            _ => None,
        }
    }

    pub fn bool_column(&self) -> Option<&Column<bool>> {
        match self {
            Series::Bool(c) => Some(c),
            _ => None,
        }
    }

    pub fn mixed_column(&self) -> Option<&Column<Value>> {
        match self {
            Series::Mixed(c) => Some(c),
            _ => None,
        }
    }
}

/// Sort descending and drop duplicates, the order rows must be removed in.
pub(crate) fn descending_unique(indexes: &[usize]) -> Vec<usize> {
    let mut order = indexes.to_vec();
    order.sort_unstable_by(|a, b| b.cmp(a));
    order.dedup();
    order
}

/// Zero value of a kind; `Null` for `Mixed`.
pub(crate) fn zero_value(kind: Kind) -> Value {
    match kind {
        Kind::Int => Value::Int(0),
        Kind::Float => Value::Float(0.0),
        Kind::Text => Value::Text(String::new()),
        Kind::Bool => Value::Bool(false),
        Kind::Mixed => Value::Null,
    }
}

fn typed<T: Element>(values: Vec<Value>) -> Vec<T> {
    values.into_iter().filter_map(T::from_value).collect()
}

#[cfg(test)]
mod tests {
    use super::{descending_unique, Series};
    use crate::error::FrameError;
    use crate::types::{Kind, Value};

    #[test]
    fn factory_picks_concrete_variant_when_uniform() {
        let s = Series::new("a", vec![Value::Float(1.5), Value::Float(2.0)]);
        assert_eq!(s.kind(), Kind::Float);
        let s = Series::new("b", vec![Value::from("x"), Value::from("y")]);
        assert_eq!(s.kind(), Kind::Text);
    }

    #[test]
    fn factory_falls_back_to_mixed() {
        let s = Series::new("a", vec![Value::Int(1), Value::Float(2.0)]);
        assert_eq!(s.kind(), Kind::Mixed);
        let s = Series::new("b", vec![Value::Int(1), Value::Null]);
        assert_eq!(s.kind(), Kind::Mixed);
        assert_eq!(Series::new("c", vec![]).kind(), Kind::Mixed);
    }

    #[test]
    fn mixed_reports_uniform_kind_but_stays_mixed() {
        let s = Series::mixed("m", vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(s.kind(), Kind::Mixed);
        assert_eq!(s.mixed_column().unwrap().uniform_kind(), Some(Kind::Int));
        let promoted = s.as_type(Kind::Int).unwrap();
        assert_eq!(promoted.kind(), Kind::Int);
        assert_eq!(promoted.values(), vec![Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn shallow_copy_sees_writes_deep_copy_does_not() {
        let s = Series::from_ints("n", vec![1, 2, 3]);
        let alias = s.copy(false);
        let isolated = s.copy(true);
        s.set(0, Value::Int(10)).unwrap();
        assert_eq!(alias.get(0), Some(Value::Int(10)));
        assert_eq!(isolated.get(0), Some(Value::Int(1)));
        assert!(alias.shares_storage_with(&s));
        assert!(!isolated.shares_storage_with(&s));
    }

    #[test]
    fn set_converts_to_series_kind() {
        let s = Series::from_floats("f", vec![0.0, 0.0]);
        s.set(1, Value::Int(4)).unwrap();
        assert_eq!(s.get(1), Some(Value::Float(4.0)));
        let err = s.set(5, Value::Int(1)).unwrap_err();
        assert!(matches!(err, FrameError::IndexOutOfRange { index: 5, len: 2, .. }));
        assert!(s.set(0, Value::from("abc")).is_err());
    }

    #[test]
    fn drop_rows_is_order_independent() {
        let base = Series::from_texts("t", ["a", "b", "c", "d", "e"]);
        let mut one = base.copy(true);
        let mut two = base.copy(true);
        one.drop_rows(&[0, 2, 4]);
        two.drop_rows(&[4, 0, 2, 2]);
        assert_eq!(one.values(), two.values());
        assert_eq!(one.values(), vec![Value::from("b"), Value::from("d")]);
    }

    #[test]
    fn drop_rows_ignores_out_of_range() {
        let mut s = Series::from_ints("n", vec![1, 2]);
        s.drop_rows(&[7, 1]);
        assert_eq!(s.values(), vec![Value::Int(1)]);
        s.drop_row(9);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn descending_unique_sorts_and_dedups() {
        assert_eq!(descending_unique(&[1, 3, 1, 2]), vec![3, 2, 1]);
    }

    #[test]
    fn int_float_round_trip() {
        let s = Series::from_ints("n", vec![-3, 0, 7]);
        let back = s.as_type(Kind::Float).unwrap().as_type(Kind::Int).unwrap();
        assert_eq!(back.values(), s.values());
    }

    #[test]
    fn text_cast_blank_is_zero_and_failure_is_reported() {
        let s = Series::from_texts("t", ["1,000", " ", "3.9"]);
        let ints = s.as_type(Kind::Int).unwrap();
        assert_eq!(ints.values(), vec![Value::Int(1000), Value::Int(0), Value::Int(3)]);

        let bad = Series::from_texts("t", ["1", "x"]);
        let err = bad.as_type(Kind::Int).unwrap_err();
        assert!(matches!(err, FrameError::Conversion(ref e) if e.raw == "x"));
        assert_eq!(bad.kind(), Kind::Text);
    }

    #[test]
    fn empty_cast_keeps_target_kind() {
        let s = Series::from_texts("t", Vec::<String>::new());
        assert_eq!(s.as_type(Kind::Int).unwrap().kind(), Kind::Int);
    }

    #[test]
    fn push_demotes_on_mismatch() {
        let mut s = Series::from_ints("n", vec![1]);
        s.push(Value::Int(2));
        assert_eq!(s.kind(), Kind::Int);
        s.push(Value::from("three"));
        assert_eq!(s.kind(), Kind::Mixed);
        assert_eq!(
            s.values(),
            vec![Value::Int(1), Value::Int(2), Value::from("three")]
        );
    }

    #[test]
    fn push_on_alias_leaves_original_length() {
        let s = Series::from_ints("n", vec![1]);
        let mut alias = s.copy(false);
        alias.push(Value::Int(2));
        assert_eq!(s.len(), 1);
        assert_eq!(alias.len(), 2);
    }
}
