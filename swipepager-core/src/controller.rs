//! PagingController: wires the store, scene window, layout monitor, frame
//! scheduler, page container and tab bar together.
//!
//! Every operation runs to completion synchronously and takes `&mut self`,
//! so host callbacks cannot re-enter the controller while it is mid-update.
//! The only deferred work is the resync after a resize, which runs at the
//! next [`PagingController::on_animation_frame`] and no-ops once the
//! controller has been torn down.

use std::fmt;

use swipepager_config::PagerConfig;

use crate::bus::PositionBus;
use crate::container::{NavigationMode, PageContainer};
use crate::layout::{LayoutChange, LayoutMonitor};
use crate::scene::{PageChild, Scene, SceneWindow};
use crate::scheduler::{FrameQueue, FrameScheduler};
use crate::store::{PageStore, Phase};
use crate::tab_bar::{
    NavigationHandle, TabBarPlacement, TabBarProps, TabBarRenderer,
};

/// Page-change notification delivered to the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeTab<'a, C> {
    /// Newly active page.
    pub to: usize,
    /// Page active before the change.
    pub from: usize,
    /// Child at `to`, if it exists.
    pub child: Option<&'a C>,
}

type ChangeTabCallback<C> = Box<dyn FnMut(ChangeTab<'_, C>)>;
type ScrollCallback = Box<dyn FnMut(f64)>;

/// What the host needs to lay out the pager for the current state.
#[derive(Debug, Clone, PartialEq)]
pub struct PagerLayout<'a, C> {
    /// One scene per child, in order.
    pub scenes: Vec<Scene<'a, C>>,
    /// Width each scene occupies.
    pub scene_width: f64,
    /// Whether user paging is enabled on the container.
    pub scroll_enabled: bool,
    /// Identity of the page container instance. It changes with the child
    /// count; when it does, the host remounts the container and attaches the
    /// new one.
    pub container_key: usize,
    /// Tab bar slot, `None` when the tab bar is suppressed.
    pub tab_bar: Option<TabBarPlacement>,
}

/// Builder for [`PagingController`].
pub struct PagerBuilder<C: PageChild + 'static> {
    config: PagerConfig,
    children: Vec<C>,
    scheduler: Option<Box<dyn FrameScheduler<PagingController<C>>>>,
    tab_bar: TabBarRenderer,
    container: Option<Box<dyn PageContainer>>,
    on_change_tab: Option<ChangeTabCallback<C>>,
    on_scroll: Option<ScrollCallback>,
}

impl<C: PageChild + 'static> PagerBuilder<C> {
    fn new(config: PagerConfig, children: Vec<C>) -> Self {
        Self {
            config,
            children,
            scheduler: None,
            tab_bar: TabBarRenderer::default(),
            container: None,
            on_change_tab: None,
            on_scroll: None,
        }
    }

    /// Replace the default in-process [`FrameQueue`].
    pub fn scheduler<S>(mut self, scheduler: S) -> Self
    where
        S: FrameScheduler<PagingController<C>> + 'static,
    {
        self.scheduler = Some(Box::new(scheduler));
        self
    }

    /// Choose the tab bar renderer. Defaults to [`DefaultTabBar`].
    ///
    /// [`DefaultTabBar`]: crate::DefaultTabBar
    pub fn tab_bar(mut self, renderer: TabBarRenderer) -> Self {
        self.tab_bar = renderer;
        self
    }

    /// Attach the page container right away.
    pub fn container<P>(mut self, container: P) -> Self
    where
        P: PageContainer + 'static,
    {
        self.container = Some(Box::new(container));
        self
    }

    /// Called after every settled page change, once the scene window has
    /// been updated.
    pub fn on_change_tab<F>(mut self, callback: F) -> Self
    where
        F: FnMut(ChangeTab<'_, C>) + 'static,
    {
        self.on_change_tab = Some(Box::new(callback));
        self
    }

    /// Called with the continuous position on every scroll tick.
    pub fn on_scroll<F>(mut self, callback: F) -> Self
    where
        F: FnMut(f64) + 'static,
    {
        self.on_scroll = Some(Box::new(callback));
        self
    }

    /// Sanitize the config, compute the first scene window, attach the
    /// container if one was given and render the tab bar once.
    pub fn build(self) -> PagingController<C> {
        let mut config = self.config;
        // Warnings are logged as they are collected.
        let _ = config.sanitize(Some(self.children.len()));

        let start = config.page.unwrap_or(config.initial_page);
        let window =
            SceneWindow::initial(config.sibling_radius, start, &self.children);

        let mut pager = PagingController {
            current_page: start,
            store: PageStore::new(start),
            window,
            layout: LayoutMonitor::new(config.initial_width),
            children: self.children,
            container: None,
            scheduler: self
                .scheduler
                .unwrap_or_else(|| Box::new(FrameQueue::new())),
            tab_bar: self.tab_bar,
            navigator: NavigationHandle::new(),
            on_change_tab: self
                .on_change_tab
                .unwrap_or_else(|| Box::new(|_: ChangeTab<'_, C>| {})),
            on_scroll: self.on_scroll.unwrap_or_else(|| Box::new(|_: f64| {})),
            alive: true,
            config,
        };

        log::debug!(
            "pager mounted on page {start} with {} pages, radius {}",
            pager.children.len(),
            pager.config.sibling_radius
        );

        if let Some(container) = self.container {
            pager.attach_boxed(container);
        }
        pager.render_tab_bar();
        pager
    }
}

impl<C: PageChild + 'static> fmt::Debug for PagerBuilder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagerBuilder")
            .field("config", &self.config)
            .field("children", &self.children.len())
            .field("tab_bar", &self.tab_bar)
            .finish_non_exhaustive()
    }
}

/// Orchestrates paging state for one mounted pager.
pub struct PagingController<C: PageChild + 'static> {
    config: PagerConfig,
    children: Vec<C>,
    current_page: usize,
    store: PageStore,
    window: SceneWindow,
    layout: LayoutMonitor,
    container: Option<Box<dyn PageContainer>>,
    scheduler: Box<dyn FrameScheduler<PagingController<C>>>,
    tab_bar: TabBarRenderer,
    navigator: NavigationHandle,
    on_change_tab: ChangeTabCallback<C>,
    on_scroll: ScrollCallback,
    alive: bool,
}

impl<C: PageChild + 'static> PagingController<C> {
    /// Start building a controller over `children`.
    pub fn builder(config: PagerConfig, children: Vec<C>) -> PagerBuilder<C> {
        PagerBuilder::new(config, children)
    }

    /// Controller with default scheduler, default tab bar and no callbacks.
    pub fn new(config: PagerConfig, children: Vec<C>) -> Self {
        Self::builder(config, children).build()
    }

    /// Options in effect, after sanitizing.
    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    /// Current children, in page order.
    pub fn children(&self) -> &[C] {
        &self.children
    }

    /// Settled active page.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// `base_page + fractional_offset`.
    pub fn continuous_position(&self) -> f64 {
        self.store.continuous_position()
    }

    /// Whether a swipe is in progress.
    pub fn phase(&self) -> Phase {
        self.store.phase()
    }

    /// Position state backing the bus.
    pub fn store(&self) -> &PageStore {
        &self.store
    }

    /// Bus carrying the continuous position, for indicator observers.
    pub fn position_bus(&self) -> PositionBus {
        self.store.position_bus()
    }

    /// Pages currently materialized.
    pub fn scene_window(&self) -> &SceneWindow {
        &self.window
    }

    /// Last accepted container width.
    pub fn container_width(&self) -> f64 {
        self.layout.width()
    }

    /// Selected tab bar renderer.
    pub fn tab_bar(&self) -> &TabBarRenderer {
        &self.tab_bar
    }

    /// Handle for queueing navigation from outside a controller call.
    pub fn navigator(&self) -> NavigationHandle {
        self.navigator.clone()
    }

    /// Whether a page container is attached.
    pub fn has_container(&self) -> bool {
        self.container.is_some()
    }

    /// Frame callbacks waiting for the next boundary.
    pub fn pending_frames(&self) -> usize {
        self.scheduler.pending()
    }

    /// `false` once [`PagingController::teardown`] has run.
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Attach the native page container. User paging is enabled according
    /// to `lock_scrolling` and the container is moved to the current page.
    pub fn attach_container<P>(&mut self, container: P)
    where
        P: PageContainer + 'static,
    {
        self.attach_boxed(Box::new(container));
    }

    /// Detach the page container, e.g. before remounting it.
    pub fn detach_container(&mut self) -> Option<Box<dyn PageContainer>> {
        self.container.take()
    }

    fn attach_boxed(&mut self, mut container: Box<dyn PageContainer>) {
        if !self.alive {
            return;
        }
        let enabled = !self.config.lock_scrolling;
        if let Err(err) = container.set_scroll_enabled(enabled) {
            log::warn!("page container rejected scroll_enabled={enabled}: {err}");
        }
        if let Err(err) = container
            .navigate(self.current_page, NavigationMode::Immediate)
        {
            log::warn!(
                "page container failed to sync to page {}: {err}",
                self.current_page
            );
        }
        self.container = Some(container);
    }

    /// Navigate to `page`.
    ///
    /// The container is told to move first (animated unless
    /// `suppress_navigation_animation` is set). Without a container only
    /// that command is dropped; the internal state still follows.
    pub fn go_to_page(&mut self, page: usize) {
        if !self.alive {
            return;
        }
        let mode = NavigationMode::from_suppressed(
            self.config.suppress_navigation_animation,
        );
        self.send_to_container(page, mode);
        self.transition_to(page);
    }

    /// The container settled on `page` after a user swipe.
    pub fn on_external_page_selected(&mut self, page: usize) {
        if !self.alive {
            return;
        }
        self.transition_to(page);
    }

    /// In-progress scroll reported by the container: `position` is the page
    /// the container is scrolled from, `offset` the fraction towards the
    /// next one. The scene window is left alone until the swipe settles.
    pub fn on_external_scroll_tick(&mut self, position: usize, offset: f64) {
        if !self.alive {
            return;
        }
        let base = self.store.base_page() as f64;
        self.store.set_fractional_offset(position as f64 - base + offset);
        let value = self.store.continuous_position();
        log::trace!("scroll tick {position}+{offset} -> {value}");
        (self.on_scroll)(value);
    }

    /// Replace the children. The current page is kept; previously
    /// materialized scenes that still exist stay materialized.
    pub fn on_children_changed(&mut self, children: Vec<C>) {
        if !self.alive {
            return;
        }
        let previous_len = self.children.len();
        self.children = children;
        if self.window.recompute(self.current_page, &self.children) {
            log::debug!(
                "children changed ({previous_len} -> {}); {} scenes materialized",
                self.children.len(),
                self.window.len()
            );
        }
        self.render_tab_bar();
    }

    /// Host request for an explicit page. Applied only when it differs from
    /// the current page.
    pub fn request_page(&mut self, page: usize) {
        if !self.alive {
            return;
        }
        self.config.page = Some(page);
        if page != self.current_page {
            self.go_to_page(page);
        }
    }

    /// Combined host update: new children (if any) are applied before the
    /// page request (if any).
    pub fn set_props(&mut self, children: Option<Vec<C>>, page: Option<usize>) {
        if let Some(children) = children {
            self.on_children_changed(children);
        }
        if let Some(page) = page {
            self.request_page(page);
        }
    }

    /// Width reported by a layout event. A genuine change schedules a resync
    /// of the container to the current page at the next frame.
    pub fn on_layout(&mut self, width: f64) {
        if !self.alive {
            return;
        }
        if let LayoutChange::Resized { from, to } = self.layout.report(width) {
            log::debug!("container width {from} -> {to}; resync scheduled");
            self.render_tab_bar();
            self.scheduler.schedule_on_next_frame(Box::new(
                |pager: &mut PagingController<C>| pager.resync(),
            ));
        }
    }

    /// Cross a frame boundary: run deferred callbacks, then apply navigation
    /// requested through the [`NavigationHandle`].
    pub fn on_animation_frame(&mut self) {
        if !self.alive {
            return;
        }
        for callback in self.scheduler.take_due() {
            callback(&mut *self);
        }
        for page in self.navigator.drain() {
            self.go_to_page(page);
        }
    }

    /// Release everything. Safe to call more than once; only the first call
    /// has an effect, and every later operation is a no-op.
    pub fn teardown(&mut self) {
        if !self.alive {
            return;
        }
        self.alive = false;
        self.scheduler.cancel_all();
        self.store.position_bus().unobserve_all();
        self.navigator.close();
        self.container = None;
        log::debug!("pager torn down on page {}", self.current_page);
    }

    /// Snapshot of scenes and container settings for the host's render.
    pub fn compose(&self) -> PagerLayout<'_, C> {
        PagerLayout {
            scenes: self.window.compose(self.current_page, &self.children),
            scene_width: self.layout.width(),
            scroll_enabled: !self.config.lock_scrolling,
            container_key: self.children.len(),
            tab_bar: (!self.tab_bar.is_suppressed())
                .then(|| TabBarPlacement::new(self.config.tab_bar_position)),
        }
    }

    /// Invoke the tab bar renderer with the current state.
    pub fn render_tab_bar(&mut self) {
        if !self.alive || self.tab_bar.is_suppressed() {
            return;
        }
        let props = TabBarProps {
            tabs: self.children.iter().map(|c| c.tab_label()).collect(),
            active_index: self.current_page,
            continuous_position: self.store.continuous_position(),
            position: self.store.position_bus(),
            container_width: self.layout.width(),
            placement: TabBarPlacement::new(self.config.tab_bar_position),
            navigator: self.navigator.clone(),
        };
        self.tab_bar.render(&props);
    }

    fn resync(&mut self) {
        if !self.alive {
            return;
        }
        log::debug!("resyncing page container to page {}", self.current_page);
        // Container only: a swipe in progress keeps its offset.
        let mode = NavigationMode::from_suppressed(
            self.config.suppress_navigation_animation,
        );
        self.send_to_container(self.current_page, mode);
    }

    fn send_to_container(&mut self, page: usize, mode: NavigationMode) {
        let Some(container) = self.container.as_mut() else {
            log::debug!("no page container attached; dropping move to page {page}");
            return;
        };
        if let Err(err) = container.navigate(page, mode) {
            log::warn!("page container failed to move to page {page}: {err}");
        }
    }

    fn transition_to(&mut self, page: usize) {
        let from = self.current_page;
        self.store.settle(page);
        self.current_page = page;
        self.window.recompute(page, &self.children);

        if page == from {
            return;
        }
        log::debug!("page {from} -> {page}");
        self.render_tab_bar();
        (self.on_change_tab)(ChangeTab {
            to: page,
            from,
            child: self.children.get(page),
        });
    }
}

impl<C: PageChild + 'static> Drop for PagingController<C> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<C: PageChild + 'static> fmt::Debug for PagingController<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagingController")
            .field("current_page", &self.current_page)
            .field("store", &self.store)
            .field("window", &self.window)
            .field("layout", &self.layout)
            .field("children", &self.children.len())
            .field("container", &self.container.is_some())
            .field("tab_bar", &self.tab_bar)
            .field("alive", &self.alive)
            .finish_non_exhaustive()
    }
}
