//! The swipeable page container this crate drives but does not implement.

use crate::error::Result;

/// How a navigation command moves the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMode {
    /// Animated transition.
    Animated,
    /// Jump straight to the page.
    Immediate,
}

impl NavigationMode {
    /// Mode implied by the `suppress_navigation_animation` option.
    pub fn from_suppressed(suppress_animation: bool) -> Self {
        if suppress_animation {
            NavigationMode::Immediate
        } else {
            NavigationMode::Animated
        }
    }
}

/// Commands consumed from the native page container.
///
/// The container reports settled pages and in-progress scroll ticks back to
/// the host, which forwards them to
/// [`PagingController::on_external_page_selected`] and
/// [`PagingController::on_external_scroll_tick`].
///
/// [`PagingController::on_external_page_selected`]: crate::PagingController::on_external_page_selected
/// [`PagingController::on_external_scroll_tick`]: crate::PagingController::on_external_scroll_tick
#[cfg_attr(test, mockall::automock)]
pub trait PageContainer {
    /// Move to `page` with an animated transition.
    fn set_page(&mut self, page: usize) -> Result<()>;

    /// Move to `page` immediately.
    fn set_page_without_animation(&mut self, page: usize) -> Result<()>;

    /// Enable or disable user-driven paging.
    fn set_scroll_enabled(&mut self, enabled: bool) -> Result<()>;
}

impl dyn PageContainer {
    /// Dispatch to the command matching `mode`.
    pub fn navigate(&mut self, page: usize, mode: NavigationMode) -> Result<()> {
        match mode {
            NavigationMode::Animated => self.set_page(page),
            NavigationMode::Immediate => self.set_page_without_animation(page),
        }
    }
}
