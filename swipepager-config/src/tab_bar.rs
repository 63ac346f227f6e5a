//! Tab bar placement directive.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ConfigError, Result};

/// Where the tab bar sits relative to the paged content.
///
/// This is a pure layout directive for the tab bar renderer; the controller
/// never interprets it beyond deciding slot order and overlay pinning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TabBarPosition {
    /// Above the content.
    #[default]
    Top,
    /// Below the content.
    Bottom,
    /// Floating over the content, pinned to the top edge.
    OverlayTop,
    /// Floating over the content, pinned to the bottom edge.
    OverlayBottom,
}

impl TabBarPosition {
    /// Canonical textual form, as accepted in configuration files.
    pub const fn as_str(&self) -> &'static str {
        match self {
            TabBarPosition::Top => "top",
            TabBarPosition::Bottom => "bottom",
            TabBarPosition::OverlayTop => "overlayTop",
            TabBarPosition::OverlayBottom => "overlayBottom",
        }
    }

    /// Whether the tab bar floats over the content instead of taking space.
    pub fn is_overlay(&self) -> bool {
        matches!(
            self,
            TabBarPosition::OverlayTop | TabBarPosition::OverlayBottom
        )
    }

    /// Whether the tab bar is emitted before the content in slot order.
    ///
    /// Only `Top` precedes the content; both overlay variants are emitted
    /// after it so they draw on top.
    pub fn precedes_content(&self) -> bool {
        matches!(self, TabBarPosition::Top)
    }

    /// Parse a position, falling back to [`TabBarPosition::Top`] for
    /// anything unrecognized.
    pub fn parse_or_default(raw: &str) -> Self {
        match raw.parse() {
            Ok(position) => position,
            Err(err) => {
                log::warn!("{err}; falling back to '{}'", Self::Top.as_str());
                Self::default()
            }
        }
    }
}

impl FromStr for TabBarPosition {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim() {
            "top" => Ok(TabBarPosition::Top),
            "bottom" => Ok(TabBarPosition::Bottom),
            "overlayTop" | "overlay_top" => Ok(TabBarPosition::OverlayTop),
            "overlayBottom" | "overlay_bottom" => {
                Ok(TabBarPosition::OverlayBottom)
            }
            other => Err(ConfigError::UnknownTabBarPosition(other.to_string())),
        }
    }
}

impl fmt::Display for TabBarPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TabBarPosition {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

// Lenient on purpose: an unknown position must not fail the whole config.
impl<'de> Deserialize<'de> for TabBarPosition {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_or_default(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_and_snake_case() {
        assert_eq!("top".parse(), Ok(TabBarPosition::Top));
        assert_eq!("bottom".parse(), Ok(TabBarPosition::Bottom));
        assert_eq!("overlayTop".parse(), Ok(TabBarPosition::OverlayTop));
        assert_eq!("overlay_bottom".parse(), Ok(TabBarPosition::OverlayBottom));
    }

    #[test]
    fn unknown_value_is_an_error_for_strict_parsing() {
        let err = "sideways".parse::<TabBarPosition>().unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownTabBarPosition("sideways".to_string())
        );
    }

    #[test]
    fn unknown_value_falls_back_to_top() {
        assert_eq!(
            TabBarPosition::parse_or_default("left"),
            TabBarPosition::Top
        );
    }

    #[test]
    fn slot_order_and_overlay() {
        assert!(TabBarPosition::Top.precedes_content());
        assert!(!TabBarPosition::Bottom.precedes_content());
        assert!(!TabBarPosition::OverlayTop.precedes_content());
        assert!(TabBarPosition::OverlayBottom.is_overlay());
        assert!(!TabBarPosition::Bottom.is_overlay());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for position in [
            TabBarPosition::Top,
            TabBarPosition::Bottom,
            TabBarPosition::OverlayTop,
            TabBarPosition::OverlayBottom,
        ] {
            assert_eq!(position.to_string().parse(), Ok(position));
        }
    }
}
