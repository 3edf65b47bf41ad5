//! Content-region extraction.

use scraper::{Html, Selector};

use crate::error::ConfigError;

/// Narrow `markup` to the inner HTML of the first element matching `selector`.
///
/// Only the first match is used, never a join of all matches. A blank
/// selector, a selector that matches nothing, or a match with no inner
/// markup all yield the whole serialized document.
///
/// # Errors
///
/// [`ConfigError::InvalidSelector`] when `selector` is not valid CSS.
pub fn extract_content(markup: &str, selector: &str) -> Result<String, ConfigError> {
    let document = Html::parse_document(markup);

    let selector = selector.trim();
    if selector.is_empty() {
        return Ok(document.html());
    }

    let parsed = Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })?;

    let region = document
        .select(&parsed)
        .next()
        .map(|element| element.inner_html())
        .filter(|inner| !inner.is_empty());

    Ok(region.unwrap_or_else(|| document.html()))
}
