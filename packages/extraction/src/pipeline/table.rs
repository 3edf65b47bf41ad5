//! Table filtering and column projection.
//!
//! Rows are addressed semantically: every cell carries a label attribute
//! (`data-label="Especialidad"`), which is how responsive tables keep the
//! column name next to the value. A row is kept when its labeled cell
//! matches the predicate, then projected onto the configured columns.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

use crate::types::table::{FilterPredicate, FilterResult, RowRecord, LABEL_ATTRIBUTE};

static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tbody tr").unwrap());
static CELL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());

/// Keep the rows whose `label` cell equals `expected` and project `columns`.
///
/// When `label` or `expected` is blank, filtering is disabled and the
/// fragment is returned untouched as [`FilterResult::Unfiltered`].
pub fn filter_table_rows(
    fragment: &str,
    label: &str,
    expected: &str,
    columns: &[String],
) -> FilterResult {
    match FilterPredicate::from_parts(label, expected) {
        Some(predicate) => FilterResult::Filtered(filter_rows(fragment, &predicate, columns)),
        None => FilterResult::Unfiltered(fragment.to_string()),
    }
}

/// Rows of `fragment` matching `predicate`, in document order.
///
/// Each record has exactly `columns.len()` cells. A row without a cell
/// for the predicate's label never matches.
pub fn filter_rows(
    fragment: &str,
    predicate: &FilterPredicate,
    columns: &[String],
) -> Vec<RowRecord> {
    let document = Html::parse_document(fragment);

    let mut scanned = 0usize;
    let rows: Vec<RowRecord> = document
        .select(&ROW_SELECTOR)
        .inspect(|_| scanned += 1)
        .filter(|row| {
            labeled_cell_text(*row, &predicate.label)
                .is_some_and(|text| predicate.matches(&text))
        })
        .map(|row| project_row(row, columns))
        .collect();

    debug!(
        label = %predicate.label,
        expected = %predicate.expected,
        scanned,
        retained = rows.len(),
        "Filtered table rows"
    );

    rows
}

/// One value per column name; missing cells become empty strings.
fn project_row(row: ElementRef<'_>, columns: &[String]) -> RowRecord {
    columns
        .iter()
        .map(|name| labeled_cell_text(row, name).unwrap_or_default())
        .collect::<Vec<_>>()
        .into()
}

/// Trimmed text of the first cell in `row` labeled `label`.
fn labeled_cell_text(row: ElementRef<'_>, label: &str) -> Option<String> {
    row.select(&CELL_SELECTOR)
        .find(|cell| cell.value().attr(LABEL_ATTRIBUTE) == Some(label))
        .map(|cell| cell.text().collect::<String>().trim().to_string())
}
