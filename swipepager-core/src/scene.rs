//! Scene windowing: which pages are materialized and which are placeholders.
//!
//! A page is materialized when it sits inside a fixed band around the active
//! page, or when it was already materialized and still exists unchanged. The
//! second rule keeps content mounted when a page transition and a content
//! swap arrive together, so nothing is torn down only to be rebuilt.

use std::collections::HashSet;
use std::fmt;

/// A page supplied by the host.
pub trait PageChild {
    /// Opaque label shown by the tab bar and carried by placeholders.
    fn tab_label(&self) -> &str;
}

impl PageChild for String {
    fn tab_label(&self) -> &str {
        self
    }
}

impl PageChild for &'static str {
    fn tab_label(&self) -> &str {
        self
    }
}

/// Identity of a logical page: label plus ordinal position.
///
/// Both parts participate in equality, so moving a page to a new position
/// yields a new key even if its label is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SceneKey {
    label: String,
    index: usize,
}

impl SceneKey {
    /// Key for `label` at `index`.
    pub fn new(label: impl Into<String>, index: usize) -> Self {
        Self {
            label: label.into(),
            index,
        }
    }

    /// Key for the host child at `index`.
    pub fn for_child<C: PageChild>(child: &C, index: usize) -> Self {
        Self::new(child.tab_label(), index)
    }

    /// Page label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Page position.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for SceneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.label, self.index)
    }
}

/// Whether `index` lies strictly inside
/// `(current - radius - 1, current + radius + 1)`.
///
/// The bounds are exclusive, so the band holds `2 * radius + 1` pages.
pub fn in_band(index: usize, current: usize, radius: usize) -> bool {
    let reach = radius.saturating_add(1);
    index < current.saturating_add(reach)
        && index.saturating_add(reach) > current
}

/// One slot in the page container.
#[derive(Debug, Clone, PartialEq)]
pub enum Scene<'a, C> {
    /// Rendered with the real child.
    Materialized {
        /// Identity of the materialized page.
        key: SceneKey,
        /// The host's page content.
        child: &'a C,
        /// Inside the band; content should be refreshed.
        should_update: bool,
    },
    /// Inert stand-in that only keeps the layout slot.
    Placeholder {
        /// Label of the page it stands in for.
        label: &'a str,
        /// Slot position.
        index: usize,
        /// Inside the band (always false unless the window is stale).
        should_update: bool,
    },
}

impl<C> Scene<'_, C> {
    /// Rendered with the real child.
    pub fn is_materialized(&self) -> bool {
        matches!(self, Scene::Materialized { .. })
    }

    /// Slot position.
    pub fn index(&self) -> usize {
        match self {
            Scene::Materialized { key, .. } => key.index(),
            Scene::Placeholder { index, .. } => *index,
        }
    }

    /// Label of the page in this slot.
    pub fn label(&self) -> &str {
        match self {
            Scene::Materialized { key, .. } => key.label(),
            Scene::Placeholder { label, .. } => label,
        }
    }

    /// Inside the band around the active page.
    pub fn should_update(&self) -> bool {
        match self {
            Scene::Materialized { should_update, .. }
            | Scene::Placeholder { should_update, .. } => *should_update,
        }
    }
}

/// The ordered set of materialized scene keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneWindow {
    radius: usize,
    keys: Vec<SceneKey>,
}

impl SceneWindow {
    /// Empty window with the given sibling radius.
    pub fn new(radius: usize) -> Self {
        Self {
            radius,
            keys: Vec::new(),
        }
    }

    /// Window for a first mount: the band only, nothing to retain.
    pub fn initial<C: PageChild>(
        radius: usize,
        current: usize,
        children: &[C],
    ) -> Self {
        let mut window = Self::new(radius);
        window.recompute(current, children);
        window
    }

    /// Pages kept on each side of the active page.
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Materialized keys in page order.
    pub fn keys(&self) -> &[SceneKey] {
        &self.keys
    }

    /// Number of materialized pages.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// `true` when nothing is materialized.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Whether `key` is materialized.
    pub fn contains(&self, key: &SceneKey) -> bool {
        self.keys.contains(key)
    }

    /// Band test using this window's radius.
    pub fn in_band(&self, index: usize, current: usize) -> bool {
        in_band(index, current, self.radius)
    }

    /// Rebuild the window for `current` over `children`.
    ///
    /// A child's key is kept if it is in band or was in the previous window.
    /// Keys whose page disappeared, or moved to a different index, drop out.
    /// Returns whether the window changed.
    pub fn recompute<C: PageChild>(
        &mut self,
        current: usize,
        children: &[C],
    ) -> bool {
        let previous: HashSet<&SceneKey> = self.keys.iter().collect();

        let next: Vec<SceneKey> = children
            .iter()
            .enumerate()
            .filter_map(|(idx, child)| {
                let key = SceneKey::for_child(child, idx);
                (previous.contains(&key) || self.in_band(idx, current))
                    .then_some(key)
            })
            .collect();

        if next == self.keys {
            return false;
        }
        log::trace!(
            "scene window at page {current}: {} -> {} materialized",
            self.keys.len(),
            next.len()
        );
        self.keys = next;
        true
    }

    /// One scene per child, in order.
    pub fn compose<'a, C: PageChild>(
        &self,
        current: usize,
        children: &'a [C],
    ) -> Vec<Scene<'a, C>> {
        let materialized: HashSet<&SceneKey> = self.keys.iter().collect();

        children
            .iter()
            .enumerate()
            .map(|(idx, child)| {
                let key = SceneKey::for_child(child, idx);
                let should_update = self.in_band(idx, current);
                if materialized.contains(&key) {
                    Scene::Materialized {
                        key,
                        child,
                        should_update,
                    }
                } else {
                    Scene::Placeholder {
                        label: child.tab_label(),
                        index: idx,
                        should_update,
                    }
                }
            })
            .collect()
    }
}
