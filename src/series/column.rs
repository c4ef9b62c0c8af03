//! Typed column storage shared between series headers.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::{FrameError, FrameResult};
use crate::types::{Kind, Value};

mod sealed {
    pub trait Sealed {}

    impl Sealed for i64 {}
    impl Sealed for f64 {}
    impl Sealed for String {}
    impl Sealed for bool {}
    impl Sealed for crate::types::Value {}
}

/// A type that can be stored in a [`Column`].
///
/// Implemented for `i64`, `f64`, `String`, `bool` (the concrete kinds) and [`Value`]
/// (the mixed kind). The set is closed.
pub trait Element: sealed::Sealed + Clone + fmt::Debug + 'static {
    /// Kind tag for a column of this element type.
    const KIND: Kind;

    /// Wrap this element as a [`Value`].
    fn into_value(self) -> Value;

    /// Unwrap a [`Value`] of exactly this element's kind.
    fn from_value(value: Value) -> Option<Self>;
}

impl Element for i64 {
    const KIND: Kind = Kind::Int;

    fn into_value(self) -> Value {
        Value::Int(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        value.as_int()
    }
}

impl Element for f64 {
    const KIND: Kind = Kind::Float;

    fn into_value(self) -> Value {
        Value::Float(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        value.as_float()
    }
}

impl Element for String {
    const KIND: Kind = Kind::Text;

    fn into_value(self) -> Value {
        Value::Text(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl Element for bool {
    const KIND: Kind = Kind::Bool;

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        value.as_bool()
    }
}

impl Element for Value {
    const KIND: Kind = Kind::Mixed;

    fn into_value(self) -> Value {
        self
    }

    fn from_value(value: Value) -> Option<Self> {
        Some(value)
    }
}

/// A named column of `T` over reference-counted storage.
///
/// `Clone` produces a new header over the *same* storage: element writes through one
/// header ([`Column::set`], [`Column::with_values_mut`], [`Column::replace_values`]) are
/// visible through every other. Length-changing operations (row drops, appends) first
/// detach the header onto private storage when it is shared, so they never change the
/// length another header observes. Use [`Column::deep_copy`] for an isolated copy.
#[derive(Debug, Clone)]
pub struct Column<T> {
    name: String,
    values: Rc<RefCell<Vec<T>>>,
}

impl<T: Element> Column<T> {
    /// Create a column that owns `values`.
    pub fn new(name: impl Into<String>, values: Vec<T>) -> Self {
        Self {
            name: name.into(),
            values: Rc::new(RefCell::new(values)),
        }
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind tag of this column.
    pub fn kind(&self) -> Kind {
        T::KIND
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    /// Returns `true` if the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }

    /// Element at `index`.
    pub fn get(&self, index: usize) -> Option<T> {
        self.values.borrow().get(index).cloned()
    }

    /// Owned copy of the elements.
    pub fn to_vec(&self) -> Vec<T> {
        self.values.borrow().clone()
    }

    /// Elements wrapped as [`Value`]s.
    pub fn values(&self) -> Vec<Value> {
        self.values
            .borrow()
            .iter()
            .cloned()
            .map(Element::into_value)
            .collect()
    }

    /// Run `f` over the elements without copying them.
    ///
    /// The storage stays borrowed while `f` runs. Reading through any header is fine.
    ///
    /// # Panics
    ///
    /// If `f` writes to the same storage through another header (`set`, `with_values_mut`,
    /// `replace_values` on a clone of this column).
    pub fn with_values<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.values.borrow())
    }

    /// Edit the elements in place. Every header sharing this storage sees the edit.
    ///
    /// The slice cannot change length.
    ///
    /// # Panics
    ///
    /// If `f` touches the same storage through another header, even to read it
    /// (`get`, `to_vec`, `with_values` on a clone of this column).
    pub fn with_values_mut<R>(&self, f: impl FnOnce(&mut [T]) -> R) -> R {
        f(&mut self.values.borrow_mut())
    }

    /// Overwrite the element at `index`. Returns `false` if `index` is out of range.
    pub fn set(&self, index: usize, value: T) -> bool {
        match self.values.borrow_mut().get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Replace every element at once, visible through all headers.
    ///
    /// Fails with [`FrameError::DimensionMismatch`] if `values` has a different length.
    pub fn replace_values(&self, values: Vec<T>) -> FrameResult<()> {
        let len = self.len();
        if values.len() != len {
            return Err(FrameError::DimensionMismatch {
                context: "replace column values",
                expected: len,
                found: values.len(),
            });
        }
        *self.values.borrow_mut() = values;
        Ok(())
    }

    /// Returns `true` if both headers point at the same storage.
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.values, &other.values)
    }

    /// Copy with private storage.
    pub fn deep_copy(&self) -> Self {
        Self::new(self.name.clone(), self.to_vec())
    }

    pub(crate) fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub(crate) fn set_value(&self, index: usize, value: Value) -> bool {
        match T::from_value(value) {
            Some(v) => self.set(index, v),
            None => false,
        }
    }

    pub(crate) fn push_value(&mut self, value: Value) -> bool {
        match T::from_value(value) {
            Some(v) => {
                self.detach();
                self.values.borrow_mut().push(v);
                true
            }
            None => false,
        }
    }

    pub(crate) fn drop_row(&mut self, index: usize) {
        if index < self.len() {
            self.detach();
            self.values.borrow_mut().remove(index);
        }
    }

    /// `indexes` must already be sorted descending and unique.
    pub(crate) fn drop_rows_descending(&mut self, indexes: &[usize]) {
        let len = self.len();
        if !indexes.iter().any(|&i| i < len) {
            return;
        }
        self.detach();
        let mut values = self.values.borrow_mut();
        for &i in indexes {
            if i < values.len() {
                values.remove(i);
            }
        }
    }

    pub(crate) fn map<U: Element>(&self, f: impl FnMut(&T) -> U) -> Column<U> {
        let mapped = self.values.borrow().iter().map(f).collect();
        Column::new(self.name.clone(), mapped)
    }

    fn detach(&mut self) {
        if Rc::strong_count(&self.values) > 1 {
            let owned = self.to_vec();
            self.values = Rc::new(RefCell::new(owned));
        }
    }
}

impl Column<Value> {
    /// The kind every stored value shares, if there is one.
    ///
    /// Derived from the current contents on each call, so it reflects writes made through
    /// any header. `None` for an empty column or when a null is present.
    pub fn uniform_kind(&self) -> Option<Kind> {
        uniform_kind(&self.values.borrow())
    }
}

/// The kind shared by every value, or `None` if empty, mixed, or containing a null.
pub(crate) fn uniform_kind(values: &[Value]) -> Option<Kind> {
    let first = values.first()?.kind()?;
    values
        .iter()
        .all(|v| v.kind() == Some(first))
        .then_some(first)
}
