//! Table types - filter predicate, row records and the filter outcome.

use serde::{Deserialize, Serialize};

/// Attribute that names the column a table cell belongs to.
pub const LABEL_ATTRIBUTE: &str = "data-label";

/// Which labeled cell a row must match to be kept.
///
/// Both halves are stored trimmed. Use [`FilterPredicate::from_parts`] to
/// get `None` when either half is blank, which means "do not filter".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPredicate {
    /// Value of the label attribute identifying the cell
    pub label: String,

    /// Text the cell must contain, compared after trimming
    pub expected: String,
}

impl FilterPredicate {
    /// Build a predicate, or `None` when filtering is disabled.
    pub fn from_parts(label: &str, expected: &str) -> Option<Self> {
        let label = label.trim();
        let expected = expected.trim();
        if label.is_empty() || expected.is_empty() {
            return None;
        }
        Some(Self {
            label: label.to_string(),
            expected: expected.to_string(),
        })
    }

    /// Exact, case-sensitive comparison of trimmed cell text.
    pub fn matches(&self, cell_text: &str) -> bool {
        cell_text.trim() == self.expected
    }
}

/// Cell values projected from one retained row.
///
/// Always has one entry per configured column name, in that order.
/// A column the row does not have is an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowRecord(pub Vec<String>);

impl RowRecord {
    pub fn cells(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Cells joined with `separator`.
    pub fn join(&self, separator: &str) -> String {
        self.0.join(separator)
    }
}

impl From<Vec<String>> for RowRecord {
    fn from(cells: Vec<String>) -> Self {
        Self(cells)
    }
}

/// Outcome of [`filter_table_rows`](crate::pipeline::filter_table_rows).
///
/// Callers must branch on the variant: when filtering is disabled the
/// fragment comes back untouched instead of as a list of rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterResult {
    /// Filtering was disabled; the input fragment, unchanged
    Unfiltered(String),

    /// Rows that matched the predicate, in document order
    Filtered(Vec<RowRecord>),
}

impl FilterResult {
    /// Retained rows, treating an unfiltered fragment as zero rows.
    pub fn into_rows(self) -> Vec<RowRecord> {
        match self {
            Self::Filtered(rows) => rows,
            Self::Unfiltered(_) => Vec::new(),
        }
    }

    pub fn is_filtered(&self) -> bool {
        matches!(self, Self::Filtered(_))
    }
}
