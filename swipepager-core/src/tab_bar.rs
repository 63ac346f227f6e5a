//! Tab bar contract.
//!
//! Drawing a tab bar is the host's business. The controller only hands the
//! renderer what it needs: labels, the active index, the continuous position
//! (as a value and as a live [`PositionBus`]), the container width, where the
//! bar sits, and a handle to request navigation.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use swipepager_config::TabBarPosition;

use crate::bus::PositionBus;

/// Edge an overlay tab bar is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEdge {
    /// Pinned to the top edge.
    Top,
    /// Pinned to the bottom edge.
    Bottom,
}

/// Resolved slot for the tab bar relative to the paged content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabBarPlacement {
    position: TabBarPosition,
}

impl TabBarPlacement {
    /// Placement for `position`.
    pub fn new(position: TabBarPosition) -> Self {
        Self { position }
    }

    /// Configured position.
    pub fn position(&self) -> TabBarPosition {
        self.position
    }

    /// Emitted before the content (`top`) rather than after it.
    pub fn precedes_content(&self) -> bool {
        self.position.precedes_content()
    }

    /// Edge to pin to when the bar floats over the content.
    pub fn overlay_edge(&self) -> Option<OverlayEdge> {
        match self.position {
            TabBarPosition::OverlayTop => Some(OverlayEdge::Top),
            TabBarPosition::OverlayBottom => Some(OverlayEdge::Bottom),
            TabBarPosition::Top | TabBarPosition::Bottom => None,
        }
    }
}

/// Queue through which a tab bar asks for navigation.
///
/// Requests are applied by the controller at the next frame boundary, so a
/// tab bar can keep a clone and call [`NavigationHandle::navigate`] from its
/// own input handling. Once the controller is torn down the handle is closed
/// and further requests are dropped.
#[derive(Clone, Default)]
pub struct NavigationHandle {
    queue: Rc<NavigationQueue>,
}

#[derive(Default)]
struct NavigationQueue {
    requests: RefCell<VecDeque<usize>>,
    closed: Cell<bool>,
}

impl NavigationHandle {
    /// Open handle with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the controller to go to `page`. No-op once closed.
    pub fn navigate(&self, page: usize) {
        if self.queue.closed.get() {
            log::trace!("navigation to page {page} after teardown dropped");
            return;
        }
        self.queue.requests.borrow_mut().push_back(page);
    }

    /// Requests waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.queue.requests.borrow().len()
    }

    /// Whether the owning controller has been torn down.
    pub fn is_closed(&self) -> bool {
        self.queue.closed.get()
    }

    pub(crate) fn drain(&self) -> Vec<usize> {
        self.queue.requests.borrow_mut().drain(..).collect()
    }

    pub(crate) fn close(&self) {
        self.queue.closed.set(true);
        self.queue.requests.borrow_mut().clear();
    }
}

impl fmt::Debug for NavigationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationHandle")
            .field("pending", &self.pending())
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Everything a tab bar renderer receives.
#[derive(Debug, Clone)]
pub struct TabBarProps<'a> {
    /// One label per page, in order.
    pub tabs: Vec<&'a str>,
    /// Index of the settled active page.
    pub active_index: usize,
    /// Continuous position at the time of the call.
    pub continuous_position: f64,
    /// Live position for indicator animation between renders.
    pub position: PositionBus,
    /// Width of the paging surface.
    pub container_width: f64,
    /// Where the bar sits relative to the content.
    pub placement: TabBarPlacement,
    /// Handle for requesting navigation from the bar.
    pub navigator: NavigationHandle,
}

/// External tab bar renderer.
pub trait TabBar {
    /// Draw (or record) the bar for `props`. Called after every page
    /// change, children change and resize.
    fn render(&mut self, props: &TabBarProps<'_>);
}

impl<F> TabBar for F
where
    F: FnMut(&TabBarProps<'_>),
{
    fn render(&mut self, props: &TabBarProps<'_>) {
        self(props)
    }
}

/// Geometry of the underline indicator for evenly sized tabs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IndicatorLayout {
    /// Width of one tab.
    pub tab_width: f64,
    /// Left edge of the indicator.
    pub offset: f64,
}

impl IndicatorLayout {
    /// Indicator for `position` across `tab_count` tabs filling
    /// `container_width`.
    pub fn compute(position: f64, container_width: f64, tab_count: usize) -> Self {
        if tab_count == 0 || container_width <= 0.0 {
            return Self::default();
        }
        let tab_width = container_width / tab_count as f64;
        let max_position = (tab_count - 1) as f64;
        Self {
            tab_width,
            offset: position.clamp(0.0, max_position) * tab_width,
        }
    }
}

/// Built-in tab bar model: evenly sized tabs with a sliding underline.
///
/// It does no drawing. The host reads [`DefaultTabBar::indicator`] (or
/// recomputes it from the live bus) and paints it however it likes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefaultTabBar {
    tabs: Vec<String>,
    active_index: usize,
    container_width: f64,
    indicator: IndicatorLayout,
}

impl DefaultTabBar {
    /// Empty model; populated by the first render.
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels from the last render.
    pub fn tabs(&self) -> &[String] {
        &self.tabs
    }

    /// Active page from the last render.
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Indicator for the last rendered position.
    pub fn indicator(&self) -> IndicatorLayout {
        self.indicator
    }

    /// Indicator for an arbitrary position with the last rendered geometry.
    pub fn indicator_at(&self, position: f64) -> IndicatorLayout {
        IndicatorLayout::compute(position, self.container_width, self.tabs.len())
    }
}

impl TabBar for DefaultTabBar {
    fn render(&mut self, props: &TabBarProps<'_>) {
        self.tabs = props.tabs.iter().map(|t| t.to_string()).collect();
        self.active_index = props.active_index;
        self.container_width = props.container_width;
        self.indicator = self.indicator_at(props.continuous_position);
    }
}

/// Renderer choice, fixed when the controller is built.
pub enum TabBarRenderer {
    /// The built-in [`DefaultTabBar`] model.
    Default(DefaultTabBar),
    /// A host-supplied renderer.
    Custom(Box<dyn TabBar>),
    /// No tab bar at all.
    Suppressed,
}

impl TabBarRenderer {
    /// Wrap a host renderer.
    pub fn custom<T>(tab_bar: T) -> Self
    where
        T: TabBar + 'static,
    {
        TabBarRenderer::Custom(Box::new(tab_bar))
    }

    /// `true` for [`TabBarRenderer::Suppressed`].
    pub fn is_suppressed(&self) -> bool {
        matches!(self, TabBarRenderer::Suppressed)
    }

    /// The built-in model, when that is the selected renderer.
    pub fn default_tab_bar(&self) -> Option<&DefaultTabBar> {
        match self {
            TabBarRenderer::Default(tab_bar) => Some(tab_bar),
            _ => None,
        }
    }

    /// Invoke the selected renderer. Returns whether anything was rendered.
    pub fn render(&mut self, props: &TabBarProps<'_>) -> bool {
        match self {
            TabBarRenderer::Default(tab_bar) => tab_bar.render(props),
            TabBarRenderer::Custom(tab_bar) => tab_bar.render(props),
            TabBarRenderer::Suppressed => return false,
        }
        true
    }
}

impl Default for TabBarRenderer {
    fn default() -> Self {
        TabBarRenderer::Default(DefaultTabBar::new())
    }
}

impl fmt::Debug for TabBarRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TabBarRenderer::Default(tab_bar) => {
                f.debug_tuple("Default").field(tab_bar).finish()
            }
            TabBarRenderer::Custom(_) => f.write_str("Custom(..)"),
            TabBarRenderer::Suppressed => f.write_str("Suppressed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props<'a>(tabs: Vec<&'a str>, position: f64, width: f64) -> TabBarProps<'a> {
        TabBarProps {
            tabs,
            active_index: position.round() as usize,
            continuous_position: position,
            position: PositionBus::new(position),
            container_width: width,
            placement: TabBarPlacement::new(TabBarPosition::Top),
            navigator: NavigationHandle::new(),
        }
    }

    #[test]
    fn indicator_slides_with_position() {
        let layout = IndicatorLayout::compute(1.5, 300.0, 3);
        assert_eq!(layout.tab_width, 100.0);
        assert_eq!(layout.offset, 150.0);
    }

    #[test]
    fn indicator_is_clamped_to_the_tab_strip() {
        assert_eq!(IndicatorLayout::compute(-0.4, 300.0, 3).offset, 0.0);
        assert_eq!(IndicatorLayout::compute(7.0, 300.0, 3).offset, 200.0);
        assert_eq!(
            IndicatorLayout::compute(1.0, 300.0, 0),
            IndicatorLayout::default()
        );
    }

    #[test]
    fn default_tab_bar_records_render_input() {
        let mut renderer = TabBarRenderer::default();
        assert!(renderer.render(&props(vec!["a", "b"], 1.0, 200.0)));

        let tab_bar = renderer.default_tab_bar().expect("default renderer");
        assert_eq!(tab_bar.tabs(), &["a".to_string(), "b".to_string()]);
        assert_eq!(tab_bar.active_index(), 1);
        assert_eq!(tab_bar.indicator().offset, 100.0);
        assert_eq!(tab_bar.indicator_at(0.5).offset, 50.0);
    }

    #[test]
    fn suppressed_renderer_renders_nothing() {
        let mut renderer = TabBarRenderer::Suppressed;
        assert!(!renderer.render(&props(vec!["a"], 0.0, 100.0)));
        assert!(renderer.is_suppressed());
    }

    #[test]
    fn closures_are_custom_renderers() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut renderer =
            TabBarRenderer::custom(move |props: &TabBarProps<'_>| {
                sink.borrow_mut().push(props.active_index)
            });

        renderer.render(&props(vec!["a", "b", "c"], 2.0, 90.0));

        assert_eq!(*seen.borrow(), vec![2]);
    }

    #[test]
    fn navigation_requests_queue_in_order() {
        let handle = NavigationHandle::new();
        let clone = handle.clone();
        clone.navigate(3);
        clone.navigate(1);

        assert_eq!(handle.pending(), 2);
        assert_eq!(handle.drain(), vec![3, 1]);
        assert_eq!(handle.pending(), 0);
    }

    #[test]
    fn closed_handle_drops_requests() {
        let handle = NavigationHandle::new();
        let kept = handle.clone();
        handle.navigate(1);

        handle.close();
        kept.navigate(2);

        assert!(kept.is_closed());
        assert_eq!(kept.pending(), 0);
        assert!(kept.drain().is_empty());
    }

    #[test]
    fn placement_resolves_slot_and_edge() {
        let top = TabBarPlacement::new(TabBarPosition::Top);
        assert!(top.precedes_content());
        assert_eq!(top.overlay_edge(), None);

        let overlay = TabBarPlacement::new(TabBarPosition::OverlayBottom);
        assert!(!overlay.precedes_content());
        assert_eq!(overlay.overlay_edge(), Some(OverlayEdge::Bottom));
    }
}
