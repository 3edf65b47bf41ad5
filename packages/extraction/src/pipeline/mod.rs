//! Extraction pipeline: content region first, then the table filter.

pub mod content;
pub mod table;

pub use content::extract_content;
pub use table::{filter_rows, filter_table_rows};
