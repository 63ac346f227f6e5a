//! Configuration for swipepager.
//!
//! This crate owns the per-mount options of a paged view: which page is shown
//! first, how many neighbouring pages stay materialized, where the tab bar
//! sits, and whether navigation animates. Values can be built in code or
//! loaded from TOML/JSON files and environment variables. Out-of-range or
//! unknown values never fail a mount; they fall back to documented defaults
//! and are reported as [`ConfigWarning`]s.

pub mod error;
pub mod pager;
pub mod tab_bar;
pub mod validation;

pub use error::ConfigError;
pub use pager::{PagerConfig, PagerConfigSource};
pub use tab_bar::TabBarPosition;
pub use validation::{ConfigWarning, ConfigWarnings};
