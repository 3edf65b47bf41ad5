//! Dropdown interaction performed by the rendered fetcher before capture.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Options container used by custom widget libraries (MudBlazor and ARIA listboxes).
pub const DEFAULT_OPTION_SELECTOR: &str = ".mud-list-item, [role='option'], .mud-select-item";

/// Default wait after each dropdown step.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(2000);

/// How the dropdown control is driven.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropdownMode {
    /// A real `<select>` element; the option is selected directly
    #[default]
    Native,

    /// A scripted widget; open it with a click, then click the option
    Custom,
}

/// Which option to pick, after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownOption {
    Value(String),
    Label(String),
}

impl DropdownOption {
    /// Text used to find the option in a custom widget.
    pub fn text(&self) -> &str {
        match self {
            Self::Value(v) | Self::Label(v) => v,
        }
    }
}

impl fmt::Display for DropdownOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "value={v:?}"),
            Self::Label(l) => write!(f, "label={l:?}"),
        }
    }
}

/// A dropdown to operate after navigation.
///
/// Option value and label come straight from configuration and are only
/// validated by [`DropdownInteraction::resolve_option`], so a bad setup
/// surfaces as a [`ConfigError`] when the fetch runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownInteraction {
    /// CSS selector of the control
    pub selector: String,

    /// Option value to select (may be empty)
    pub option_value: String,

    /// Option label to select (may be empty)
    pub option_label: String,

    /// Wait after opening and after selecting
    pub settle_delay: Duration,

    /// Native `<select>` or custom widget
    pub mode: DropdownMode,

    /// Where custom-widget options live
    pub option_selector: String,
}

impl DropdownInteraction {
    /// Create an interaction for a control with default timing and native mode.
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            option_value: String::new(),
            option_label: String::new(),
            settle_delay: DEFAULT_SETTLE_DELAY,
            mode: DropdownMode::Native,
            option_selector: DEFAULT_OPTION_SELECTOR.to_string(),
        }
    }

    /// Set the option value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.option_value = value.into();
        self
    }

    /// Set the option label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.option_label = label.into();
        self
    }

    /// Set the settle delay.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Set the interaction mode.
    pub fn with_mode(mut self, mode: DropdownMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the options container selector (custom mode). Blank keeps the default.
    pub fn with_option_selector(mut self, selector: impl Into<String>) -> Self {
        let selector = selector.into();
        if !selector.trim().is_empty() {
            self.option_selector = selector;
        }
        self
    }

    /// Exactly one of value or label must be set.
    pub fn resolve_option(&self) -> Result<DropdownOption, ConfigError> {
        let value = self.option_value.trim();
        let label = self.option_label.trim();

        match (value.is_empty(), label.is_empty()) {
            (false, true) => Ok(DropdownOption::Value(value.to_string())),
            (true, false) => Ok(DropdownOption::Label(label.to_string())),
            (true, true) => Err(ConfigError::MissingDropdownOption {
                selector: self.selector.clone(),
            }),
            (false, false) => Err(ConfigError::AmbiguousDropdownOption {
                selector: self.selector.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_option_by_value() {
        let dropdown = DropdownInteraction::new("#especialidad").with_value(" 12 ");
        assert_eq!(
            dropdown.resolve_option().unwrap(),
            DropdownOption::Value("12".to_string())
        );
    }

    #[test]
    fn test_resolve_option_by_label() {
        let dropdown = DropdownInteraction::new("#especialidad").with_label("Matemática");
        let option = dropdown.resolve_option().unwrap();
        assert_eq!(option, DropdownOption::Label("Matemática".to_string()));
        assert_eq!(option.text(), "Matemática");
    }

    #[test]
    fn test_resolve_option_requires_one() {
        let dropdown = DropdownInteraction::new("#especialidad").with_value("   ");
        assert!(matches!(
            dropdown.resolve_option(),
            Err(ConfigError::MissingDropdownOption { .. })
        ));
    }

    #[test]
    fn test_resolve_option_rejects_both() {
        let dropdown = DropdownInteraction::new("#especialidad")
            .with_value("12")
            .with_label("Matemática");
        assert!(matches!(
            dropdown.resolve_option(),
            Err(ConfigError::AmbiguousDropdownOption { .. })
        ));
    }

    #[test]
    fn test_blank_option_selector_keeps_default() {
        let dropdown = DropdownInteraction::new(".mud-select").with_option_selector("  ");
        assert_eq!(dropdown.option_selector, DEFAULT_OPTION_SELECTOR);
        assert_eq!(dropdown.mode, DropdownMode::Native);
        assert_eq!(dropdown.settle_delay, DEFAULT_SETTLE_DELAY);
    }
}
