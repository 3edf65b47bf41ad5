//! Notification text built from the retained rows.

use extraction::RowRecord;

/// Body sent when no row matched.
pub const NO_MATCHES_MESSAGE: &str = "No hay vacantes disponibles con ese filtro.";

const ROW_PREFIX: &str = "• ";
const CELL_SEPARATOR: &str = " | ";
const ROW_SEPARATOR: &str = "\n____\n";

/// `Hay {count} vacantes de {expected} disponibles`
pub fn compose_title(count: usize, expected: &str) -> String {
    format!("Hay {count} vacantes de {expected} disponibles")
}

/// One bullet line per row, rows separated by a rule line.
pub fn compose_body(rows: &[RowRecord]) -> String {
    if rows.is_empty() {
        return NO_MATCHES_MESSAGE.to_string();
    }

    rows.iter()
        .map(|row| format!("{ROW_PREFIX}{}", row.join(CELL_SEPARATOR)))
        .collect::<Vec<_>>()
        .join(ROW_SEPARATOR)
}
