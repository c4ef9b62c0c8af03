//! The [`Table`] container: an ordered set of row-aligned [`Series`].
//!
//! Every series in a table has the same length, checked on every mutation. Tables hold
//! series headers, not copies: [`Table::select`], [`Table::get_series`] with
//! `copy = false`, and `Clone` all alias the underlying storage. Use
//! [`Table::deep_copy`] for an isolated table.
//!
//! ```
//! use rust_dataframe::series::Series;
//! use rust_dataframe::table::Table;
//! use rust_dataframe::types::Value;
//!
//! let mut table = Table::new();
//! table.add_series(Series::from_texts("category", ["A", "B"]))?;
//! table.add_series(Series::from_ints("sales", vec![100, 200]))?;
//! table.add_row(vec![Value::from("A"), Value::Int(150)])?;
//! assert_eq!(table.shape(), (3, 2));
//! # Ok::<(), rust_dataframe::error::FrameError>(())
//! ```

use std::collections::HashMap;

use crate::error::{FrameError, FrameResult};
use crate::series::{descending_unique, Series};
use crate::types::{Axis, Kind, Value};

/// One row keyed by column name.
pub type Row = HashMap<String, Value>;

/// Columns addressed either by name or by position, never both in one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelector {
    Names(Vec<String>),
    Positions(Vec<usize>),
}

impl From<&str> for ColumnSelector {
    fn from(name: &str) -> Self {
        ColumnSelector::Names(vec![name.to_owned()])
    }
}

impl From<String> for ColumnSelector {
    fn from(name: String) -> Self {
        ColumnSelector::Names(vec![name])
    }
}

impl From<Vec<String>> for ColumnSelector {
    fn from(names: Vec<String>) -> Self {
        ColumnSelector::Names(names)
    }
}

impl From<Vec<&str>> for ColumnSelector {
    fn from(names: Vec<&str>) -> Self {
        ColumnSelector::Names(names.into_iter().map(str::to_owned).collect())
    }
}

impl From<&[&str]> for ColumnSelector {
    fn from(names: &[&str]) -> Self {
        ColumnSelector::Names(names.iter().map(|n| (*n).to_owned()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ColumnSelector {
    fn from(names: [&str; N]) -> Self {
        ColumnSelector::Names(names.iter().map(|n| (*n).to_owned()).collect())
    }
}

impl From<usize> for ColumnSelector {
    fn from(position: usize) -> Self {
        ColumnSelector::Positions(vec![position])
    }
}

impl From<Vec<usize>> for ColumnSelector {
    fn from(positions: Vec<usize>) -> Self {
        ColumnSelector::Positions(positions)
    }
}

impl From<&[usize]> for ColumnSelector {
    fn from(positions: &[usize]) -> Self {
        ColumnSelector::Positions(positions.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for ColumnSelector {
    fn from(positions: [usize; N]) -> Self {
        ColumnSelector::Positions(positions.to_vec())
    }
}

/// An ordered collection of equally long series.
#[derive(Debug, Clone, Default)]
pub struct Table {
    series: Vec<Series>,
}

impl Table {
    /// An empty table (no columns, height 0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from series, checking they all have the same length.
    pub fn from_series(series: impl IntoIterator<Item = Series>) -> FrameResult<Self> {
        let mut table = Table::new();
        for s in series {
            table.add_series(s)?;
        }
        Ok(table)
    }

    /// Wrap series the caller has already built to the same length.
    pub(crate) fn from_aligned(series: Vec<Series>) -> Self {
        debug_assert!(series.windows(2).all(|w| w[0].len() == w[1].len()));
        Table { series }
    }

    /// Number of rows; 0 for a table without columns.
    pub fn height(&self) -> usize {
        self.series.first().map_or(0, Series::len)
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.series.len()
    }

    /// `(height, width)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.height(), self.width())
    }

    /// Returns `true` if the table has no columns.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.series.iter().map(Series::name).collect()
    }

    /// Position of the first column called `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.series.iter().position(|s| s.name() == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name() == name)
    }

    pub fn column_at(&self, position: usize) -> Option<&Series> {
        self.series.get(position)
    }

    pub fn columns(&self) -> &[Series] {
        &self.series
    }

    /// Resolve a selector to column positions.
    ///
    /// Unknown names are collected and reported together.
    pub fn resolve(&self, selector: &ColumnSelector) -> FrameResult<Vec<usize>> {
        match selector {
            ColumnSelector::Names(names) => {
                let mut positions = Vec::with_capacity(names.len());
                let mut missing = Vec::new();
                for name in names {
                    match self.column_index(name) {
                        Some(i) => positions.push(i),
                        None => missing.push(name.clone()),
                    }
                }
                if missing.is_empty() {
                    Ok(positions)
                } else {
                    Err(FrameError::UnknownColumn { names: missing })
                }
            }
            ColumnSelector::Positions(positions) => {
                let len = self.width();
                match positions.iter().find(|&&i| i >= len) {
                    Some(&index) => Err(FrameError::IndexOutOfRange {
                        axis: Axis::Column,
                        index,
                        len,
                    }),
                    None => Ok(positions.clone()),
                }
            }
        }
    }

    fn position_of(&self, name: &str) -> FrameResult<usize> {
        self.column_index(name)
            .ok_or_else(|| FrameError::UnknownColumn {
                names: vec![name.to_owned()],
            })
    }

    /// Append a column. The first column sets the height; later ones must match it.
    pub fn add_series(&mut self, series: Series) -> FrameResult<()> {
        if !self.is_empty() && series.len() != self.height() {
            return Err(FrameError::DimensionMismatch {
                context: "add series",
                expected: self.height(),
                found: series.len(),
            });
        }
        self.series.push(series);
        Ok(())
    }

    /// Append one row, one value per column in column order.
    ///
    /// A column keeps its kind when the value matches it and is demoted to `Mixed`
    /// otherwise.
    pub fn add_row(&mut self, values: Vec<Value>) -> FrameResult<()> {
        if values.len() != self.width() {
            return Err(FrameError::DimensionMismatch {
                context: "add row",
                expected: self.width(),
                found: values.len(),
            });
        }
        for (series, value) in self.series.iter_mut().zip(values) {
            series.push(value);
        }
        Ok(())
    }

    /// A new table over the selected columns, in selector order. No data is copied.
    pub fn select(&self, columns: impl Into<ColumnSelector>) -> FrameResult<Table> {
        let positions = self.resolve(&columns.into())?;
        Ok(Table {
            series: positions.into_iter().map(|i| self.series[i].clone()).collect(),
        })
    }

    /// Remove columns. Nothing is removed if any selected column is unknown.
    pub fn drop_column(&mut self, columns: impl Into<ColumnSelector>) -> FrameResult<()> {
        let positions = self.resolve(&columns.into())?;
        for i in descending_unique(&positions) {
            self.series.remove(i);
        }
        Ok(())
    }

    /// Remove one row from every column.
    pub fn drop_row(&mut self, index: usize) -> FrameResult<()> {
        self.drop_rows(&[index])
    }

    /// Remove rows from every column.
    ///
    /// The order of `indexes` does not matter and duplicates count once. Nothing is
    /// removed if any index is out of range.
    pub fn drop_rows(&mut self, indexes: &[usize]) -> FrameResult<()> {
        let len = self.height();
        if let Some(&index) = indexes.iter().find(|&&i| i >= len) {
            return Err(FrameError::IndexOutOfRange {
                axis: Axis::Row,
                index,
                len,
            });
        }
        let order = descending_unique(indexes);
        for series in &mut self.series {
            series.drop_rows(&order);
        }
        Ok(())
    }

    /// Rename column `from` to `to`.
    pub fn rename(&mut self, from: &str, to: impl Into<String>) -> FrameResult<()> {
        let i = self.position_of(from)?;
        self.series[i].rename(to);
        Ok(())
    }

    /// Cast column `column` to `kind`, replacing it in place.
    ///
    /// On failure the column is left as it was.
    pub fn as_type(&mut self, column: &str, kind: Kind) -> FrameResult<()> {
        let i = self.position_of(column)?;
        let cast = self.series[i].as_type(kind)?;
        self.series[i] = cast;
        Ok(())
    }

    /// The column called `name`: the live series, or an isolated copy when `copy` is set.
    pub fn get_series(&self, name: &str, copy: bool) -> FrameResult<Series> {
        let i = self.position_of(name)?;
        Ok(self.series[i].copy(copy))
    }

    /// Replace the column with the same name, or append it if there is none.
    pub fn put_series(&mut self, series: Series) -> FrameResult<()> {
        match self.column_index(series.name()) {
            Some(i) => {
                if self.width() > 1 && series.len() != self.height() {
                    return Err(FrameError::DimensionMismatch {
                        context: "replace series",
                        expected: self.height(),
                        found: series.len(),
                    });
                }
                self.series[i] = series;
                Ok(())
            }
            None => self.add_series(series),
        }
    }

    fn check_row(&self, index: usize) -> FrameResult<()> {
        let len = self.height();
        if index >= len {
            return Err(FrameError::IndexOutOfRange {
                axis: Axis::Row,
                index,
                len,
            });
        }
        Ok(())
    }

    /// Values of row `index`, in column order.
    pub fn row(&self, index: usize) -> FrameResult<Vec<Value>> {
        self.check_row(index)?;
        Ok(self
            .series
            .iter()
            .map(|s| s.get(index).unwrap_or_default())
            .collect())
    }

    /// Values of row `index`, keyed by column name.
    pub fn row_map(&self, index: usize) -> FrameResult<Row> {
        self.check_row(index)?;
        Ok(self
            .series
            .iter()
            .map(|s| (s.name().to_owned(), s.get(index).unwrap_or_default()))
            .collect())
    }

    /// Every row, in row order.
    pub fn to_rows(&self) -> Vec<Vec<Value>> {
        let columns: Vec<Vec<Value>> = self.series.iter().map(Series::values).collect();
        (0..self.height())
            .map(|r| columns.iter().map(|c| c[r].clone()).collect())
            .collect()
    }

    /// A table whose series share no storage with this one.
    pub fn deep_copy(&self) -> Table {
        Table {
            series: self.series.iter().map(|s| s.copy(true)).collect(),
        }
    }
}
