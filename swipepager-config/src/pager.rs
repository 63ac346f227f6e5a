//! Per-mount pager options and their loaders.

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::tab_bar::TabBarPosition;
use crate::validation::{ConfigWarning, ConfigWarnings};

/// Environment variable naming a TOML or JSON config file.
pub const CONFIG_PATH_ENV: &str = "SWIPEPAGER_CONFIG_PATH";
/// Environment variable holding an inline JSON config.
pub const CONFIG_JSON_ENV: &str = "SWIPEPAGER_CONFIG_JSON";

/// Source that produced the pager configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PagerConfigSource {
    /// Nothing configured; built-in defaults.
    #[default]
    Default,
    /// File named by [`CONFIG_PATH_ENV`].
    EnvPath(PathBuf),
    /// Inline JSON from [`CONFIG_JSON_ENV`].
    EnvInline,
    /// One of the default candidate files.
    File(PathBuf),
}

/// Options fixed when a pager is mounted.
///
/// Every field has a default, so partial files are fine. The host may later
/// push a new `page` request; everything else is read once at construction.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PagerConfig {
    /// Page shown first, and the initial base of the continuous position.
    pub initial_page: usize,
    /// Explicit page requested by the host. Applied whenever it differs from
    /// the current page.
    pub page: Option<usize>,
    /// Layout directive for the tab bar renderer.
    pub tab_bar_position: TabBarPosition,
    /// How many pages on each side of the active page stay materialized.
    /// `0` keeps only the active page.
    pub sibling_radius: usize,
    /// Disable user-driven paging. Programmatic navigation still works.
    pub lock_scrolling: bool,
    /// Navigate with immediate positioning instead of an animated transition.
    pub suppress_navigation_animation: bool,
    /// Width assumed until the first layout report arrives.
    pub initial_width: f64,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            initial_page: 0,
            page: None,
            tab_bar_position: TabBarPosition::Top,
            sibling_radius: 0,
            lock_scrolling: false,
            suppress_navigation_animation: false,
            initial_width: 0.0,
        }
    }
}

impl PagerConfig {
    /// Repair values that would otherwise poison downstream arithmetic and
    /// report anything suspicious.
    ///
    /// `child_count`, when known, enables the advisory page range checks.
    /// Page indices are never clamped here: bounds belong to the page
    /// container.
    pub fn sanitize(&mut self, child_count: Option<usize>) -> ConfigWarnings {
        let mut warnings = ConfigWarnings::new();

        if !self.initial_width.is_finite() || self.initial_width < 0.0 {
            warnings.push(ConfigWarning::InvalidInitialWidth {
                value: self.initial_width,
            });
            self.initial_width = 0.0;
        }

        if let Some(child_count) = child_count {
            if self.initial_page >= child_count {
                warnings.push(ConfigWarning::InitialPageOutOfRange {
                    page: self.initial_page,
                    child_count,
                });
            }
            if let Some(page) = self.page
                && page >= child_count
            {
                warnings.push(ConfigWarning::PageRequestOutOfRange {
                    page,
                    child_count,
                });
            }
        }

        warnings
    }

    /// Load configuration overrides using environment variables.
    /// Evaluation order:
    /// 1) `$SWIPEPAGER_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$SWIPEPAGER_CONFIG_JSON` (inline JSON),
    /// 3) the first existing default candidate file,
    /// 4) defaults.
    pub fn load_from_env() -> anyhow::Result<(Self, PagerConfigSource)> {
        Self::load_with(|key| env::var(key).ok())
    }

    /// Same as [`PagerConfig::load_from_env`] with an explicit variable
    /// lookup.
    pub fn load_with<F>(lookup: F) -> anyhow::Result<(Self, PagerConfigSource)>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path_str) = lookup(CONFIG_PATH_ENV)
            && !path_str.trim().is_empty()
        {
            let path = PathBuf::from(path_str);
            let config = Self::load_from_file(&path)?;
            return Ok((config, PagerConfigSource::EnvPath(path)));
        }

        if let Some(raw) = lookup(CONFIG_JSON_ENV)
            && !raw.trim().is_empty()
        {
            let parsed = Self::parse_json(&raw)
                .with_context(|| format!("failed to parse {CONFIG_JSON_ENV}"))?;
            return Ok((parsed, PagerConfigSource::EnvInline));
        }

        if let Some(path) = Self::find_default_file() {
            let config = Self::load_from_file(&path)?;
            return Ok((config, PagerConfigSource::File(path)));
        }

        Ok((Self::default(), PagerConfigSource::Default))
    }

    /// Read a config file, parsed as JSON or TOML by extension and by trial
    /// otherwise.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read pager config from {}", path.display())
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::parse_json(&contents).with_context(|| {
                format!("invalid pager config {}", path.display())
            }),
            Some("toml") | Some("tml") => {
                toml::from_str(&contents).map_err(|err| {
                    anyhow!("invalid pager config {}: {}", path.display(), err)
                })
            }
            _ => Self::parse_from_str(&contents, &path.display().to_string()),
        }
    }

    /// Parse TOML, falling back to JSON. `origin` names the input in errors.
    pub fn parse_from_str(
        contents: &str,
        origin: &str,
    ) -> anyhow::Result<Self> {
        // Try TOML first, then JSON for convenience.
        toml::from_str(contents).or_else(|toml_err| {
            serde_json::from_str(contents).map_err(|json_err| {
                anyhow!(
                    "failed to parse pager config {}: toml error: {}; json error: {}",
                    origin,
                    toml_err,
                    json_err
                )
            })
        })
    }

    /// Parse an inline JSON config.
    pub fn parse_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw)
            .map_err(|err| anyhow!("invalid pager config json: {err}"))
    }

    fn find_default_file() -> Option<PathBuf> {
        const CANDIDATES: &[&str] = &[
            "swipepager.toml",
            "swipepager.json",
            "config/swipepager.toml",
            "config/swipepager.json",
        ];

        CANDIDATES
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
            .map(|path| path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: PagerConfig = toml::from_str(
            r#"
            sibling_radius = 2
            tab_bar_position = "overlayBottom"
            "#,
        )
        .expect("valid toml");

        assert_eq!(config.sibling_radius, 2);
        assert_eq!(config.tab_bar_position, TabBarPosition::OverlayBottom);
        assert_eq!(config.initial_page, 0);
        assert_eq!(config.page, None);
        assert!(!config.lock_scrolling);
    }

    #[test]
    fn unknown_tab_bar_position_falls_back_instead_of_failing() {
        let config = PagerConfig::parse_json(
            r#"{"tab_bar_position": "diagonal", "initial_page": 3}"#,
        )
        .expect("lenient parse");

        assert_eq!(config.tab_bar_position, TabBarPosition::Top);
        assert_eq!(config.initial_page, 3);
    }

    #[test]
    fn parse_from_str_accepts_json_when_toml_fails() {
        let config = PagerConfig::parse_from_str(
            r#"{"suppress_navigation_animation": true}"#,
            "inline",
        )
        .expect("json fallback");
        assert!(config.suppress_navigation_animation);
    }

    #[test]
    fn parse_from_str_reports_both_errors() {
        let err = PagerConfig::parse_from_str("sibling_radius = [", "broken")
            .unwrap_err()
            .to_string();
        assert!(err.contains("toml error"));
        assert!(err.contains("json error"));
    }

    #[test]
    fn sanitize_repairs_width_and_flags_pages() {
        let mut config = PagerConfig {
            initial_width: f64::NAN,
            initial_page: 7,
            page: Some(9),
            ..PagerConfig::default()
        };

        let warnings = config.sanitize(Some(4));

        assert_eq!(config.initial_width, 0.0);
        assert_eq!(config.initial_page, 7);
        assert_eq!(config.page, Some(9));
        assert_eq!(warnings.len(), 3);
        assert!(warnings.iter().any(|w| matches!(
            w,
            ConfigWarning::PageRequestOutOfRange { page: 9, child_count: 4 }
        )));
    }

    #[test]
    fn sanitize_is_quiet_for_sane_values() {
        let mut config = PagerConfig {
            initial_width: 320.0,
            initial_page: 1,
            ..PagerConfig::default()
        };
        assert!(config.sanitize(Some(3)).is_empty());
        assert!(config.sanitize(None).is_empty());
    }

    #[test]
    fn inline_json_from_lookup_wins_over_defaults() {
        let (config, source) = PagerConfig::load_with(|key| {
            (key == CONFIG_JSON_ENV)
                .then(|| r#"{"lock_scrolling": true}"#.to_string())
        })
        .expect("inline config");

        assert!(config.lock_scrolling);
        assert_eq!(source, PagerConfigSource::EnvInline);
    }

    #[test]
    fn blank_lookup_values_are_ignored() {
        let (config, source) =
            PagerConfig::load_with(|_| Some("   ".to_string()))
                .expect("defaults");
        // No candidate files live in the crate directory.
        assert_eq!(config, PagerConfig::default());
        assert_eq!(source, PagerConfigSource::Default);
    }

    #[test]
    fn broken_inline_json_surfaces_context() {
        let err = PagerConfig::load_with(|key| {
            (key == CONFIG_JSON_ENV).then(|| "{not json".to_string())
        })
        .unwrap_err();
        assert!(format!("{err:#}").contains(CONFIG_JSON_ENV));
    }
}
