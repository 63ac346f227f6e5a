//! Non-fatal findings produced while sanitizing a [`PagerConfig`].
//!
//! [`PagerConfig`]: crate::PagerConfig

use std::fmt;

/// A suspicious configuration value that was repaired or is only advisory.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigWarning {
    /// `initial_width` was negative or not finite; reset to `0`.
    InvalidInitialWidth {
        /// The rejected value.
        value: f64,
    },
    /// `initial_page` points past the known children. Bounds are enforced by
    /// the page container, so the value is kept.
    InitialPageOutOfRange {
        /// Configured initial page.
        page: usize,
        /// Number of children known at sanitize time.
        child_count: usize,
    },
    /// `page` points past the known children. Kept for the same reason.
    PageRequestOutOfRange {
        /// Requested page.
        page: usize,
        /// Number of children known at sanitize time.
        child_count: usize,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::InvalidInitialWidth { value } => {
                write!(f, "initial_width {value} is not a usable width; using 0")
            }
            ConfigWarning::InitialPageOutOfRange { page, child_count } => {
                write!(
                    f,
                    "initial_page {page} is beyond the {child_count} configured pages"
                )
            }
            ConfigWarning::PageRequestOutOfRange { page, child_count } => {
                write!(
                    f,
                    "page {page} is beyond the {child_count} configured pages"
                )
            }
        }
    }
}

/// Collected warnings for one sanitize pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigWarnings {
    items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    /// Empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning and forward it to the log.
    pub fn push(&mut self, warning: ConfigWarning) {
        log::warn!("pager config: {warning}");
        self.items.push(warning);
    }

    /// `true` when nothing was flagged.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of warnings collected.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Warnings in the order they were found.
    pub fn iter(&self) -> impl Iterator<Item = &ConfigWarning> {
        self.items.iter()
    }
}

impl IntoIterator for ConfigWarnings {
    type Item = ConfigWarning;
    type IntoIter = std::vec::IntoIter<ConfigWarning>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
