//! Page Fetching and Table Extraction Library
//!
//! Fetches a page either over plain HTTP or through a real browser, narrows
//! it to a content region and optionally filters a labeled table down to
//! the rows of interest.
//!
//! # Usage
//!
//! ```rust,ignore
//! use extraction::{extract_content, filter_table_rows, Fetcher, StaticFetcher};
//!
//! let page = StaticFetcher::new().fetch("https://example.com/listado").await?;
//! let fragment = extract_content(&page.html, "#resultados")?;
//! let rows = filter_table_rows(&fragment, "Especialidad", "Matemática", &columns);
//! ```
//!
//! # Modules
//!
//! - [`traits`] - The [`Fetcher`] abstraction
//! - [`fetchers`] - Static, rendered (browser) and mock fetchers
//! - [`pipeline`] - Content-region extraction and table filtering
//! - [`types`] - Page snapshots, table records and dropdown interactions
//! - [`error`] - Typed errors

pub mod error;
pub mod fetchers;
pub mod pipeline;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{ConfigError, ExtractionError, FetchError, InteractionError};
pub use traits::fetcher::Fetcher;
pub use types::{
    interaction::{
        DropdownInteraction, DropdownMode, DropdownOption, DEFAULT_OPTION_SELECTOR,
        DEFAULT_SETTLE_DELAY,
    },
    page::PageSnapshot,
    table::{FilterPredicate, FilterResult, RowRecord, LABEL_ATTRIBUTE},
};

pub use fetchers::{MockFetcher, StaticFetcher, DEFAULT_USER_AGENT};

#[cfg(feature = "browser")]
pub use fetchers::RenderedFetcher;

pub use pipeline::{extract_content, filter_rows, filter_table_rows};
