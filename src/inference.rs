//! Majority-vote kind inference for columns of raw text.
//!
//! Every non-blank cell falls in exactly one class, tried in order: bool-like, int-like,
//! float-like, otherwise text. So `"1"` and `"0"` vote Bool and never Int. Then, over the
//! non-blank cells:
//!
//! 1. any text cell makes the column Text;
//! 2. Bool if at least 90% are bool-like;
//! 3. Int if at least 90% are int-like;
//! 4. Float if at least 90% are int-like or float-like together;
//! 5. Text otherwise.
//!
//! A column with no non-blank cells is Text. Blank cells become the zero value of the
//! chosen kind.
//!
//! ```
//! use rust_dataframe::inference::series_from_text;
//! use rust_dataframe::types::{Kind, Value};
//!
//! let s = series_from_text("age", vec!["35".into(), "23".into(), "48".into()], true);
//! assert_eq!(s.kind(), Kind::Int);
//! assert_eq!(s.values(), vec![Value::Int(35), Value::Int(23), Value::Int(48)]);
//! ```

use crate::convert;
use crate::series::Series;
use crate::types::Kind;

/// Share of non-blank cells that must agree on a kind.
pub const INFERENCE_THRESHOLD: f64 = 0.9;

/// The spellings that vote Bool: `true/false`, `yes/no`, `t/f`, `1/0` (case-insensitive).
///
/// Narrower than [`convert::bool_from_text`], which also casts `y`/`n`.
pub fn is_bool_like(cell: &str) -> bool {
    matches!(
        cell.trim().to_ascii_lowercase().as_str(),
        "true" | "false" | "yes" | "no" | "t" | "f" | "1" | "0"
    )
}

pub fn is_int_like(cell: &str) -> bool {
    convert::parse_int_exact(cell).is_some()
}

/// Parses as a float and contains a digit, so `inf` and `NaN` stay text.
pub fn is_float_like(cell: &str) -> bool {
    cell.bytes().any(|b| b.is_ascii_digit()) && convert::parse_float_exact(cell).is_some()
}

/// Per-class cell counts for one column. Each non-blank cell is counted once.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KindVotes {
    pub non_empty: usize,
    pub bool_like: usize,
    pub int_like: usize,
    /// Float-like cells that are not int-like.
    pub float_like: usize,
    /// Cells that are none of the above.
    pub text: usize,
}

impl KindVotes {
    pub fn tally<S: AsRef<str>>(cells: &[S]) -> Self {
        let mut votes = KindVotes::default();
        for cell in cells {
            let cell = cell.as_ref().trim();
            if cell.is_empty() {
                continue;
            }
            votes.non_empty += 1;
            if is_bool_like(cell) {
                votes.bool_like += 1;
            } else if is_int_like(cell) {
                votes.int_like += 1;
            } else if is_float_like(cell) {
                votes.float_like += 1;
            } else {
                votes.text += 1;
            }
        }
        votes
    }

    pub fn decide(&self) -> Kind {
        if self.non_empty == 0 || self.text > 0 {
            return Kind::Text;
        }
        let share = |n: usize| n as f64 / self.non_empty as f64;
        if share(self.bool_like) >= INFERENCE_THRESHOLD {
            Kind::Bool
        } else if share(self.int_like) >= INFERENCE_THRESHOLD {
            Kind::Int
        } else if share(self.int_like + self.float_like) >= INFERENCE_THRESHOLD {
            Kind::Float
        } else {
            Kind::Text
        }
    }
}

/// The kind a column of raw text should be stored as.
pub fn infer_kind<S: AsRef<str>>(cells: &[S]) -> Kind {
    KindVotes::tally(cells).decide()
}

/// Build a series from raw text, inferring its kind when `infer` is set.
///
/// If the winning kind cannot hold a minority cell (for example `"yes"` in a column that
/// is 90% integers) the column stays Text.
pub fn series_from_text(name: impl Into<String>, cells: Vec<String>, infer: bool) -> Series {
    let kind = if infer { infer_kind(&cells) } else { Kind::Text };
    let text = Series::from_texts(name, cells);
    if kind == Kind::Text {
        return text;
    }
    match text.as_type(kind) {
        Ok(series) => series,
        Err(err) => {
            log::debug!(
                "column '{}' inferred as {kind} but kept as text: {err}",
                text.name()
            );
            text
        }
    }
}
