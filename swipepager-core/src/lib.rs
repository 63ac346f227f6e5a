//! Paging state for swipeable, tabbed page containers.
//!
//! A host owns a native page container and a tab bar. It feeds container
//! events (settled pages, scroll ticks, layout widths, frame boundaries) into
//! a [`PagingController`], which keeps the authoritative page index and a
//! continuous position, decides which pages are materialized, and sends
//! navigation commands back through [`PageContainer`].
//!
//! ```
//! use swipepager_config::PagerConfig;
//! use swipepager_core::PagingController;
//!
//! let mut pager = PagingController::new(
//!     PagerConfig::default(),
//!     vec!["Feed".to_string(), "Search".to_string(), "Profile".to_string()],
//! );
//! pager.on_external_scroll_tick(0, 0.5);
//! assert_eq!(pager.continuous_position(), 0.5);
//!
//! pager.on_external_page_selected(1);
//! assert_eq!(pager.current_page(), 1);
//! ```

pub mod bus;
pub mod container;
pub mod controller;
pub mod error;
pub mod layout;
pub mod scene;
pub mod scheduler;
pub mod store;
pub mod tab_bar;

pub use bus::{PositionBus, SubscriptionHandle};
pub use container::{NavigationMode, PageContainer};
pub use controller::{ChangeTab, PagerBuilder, PagerLayout, PagingController};
pub use error::{ContainerError, Result};
pub use layout::{IgnoreReason, LayoutChange, LayoutMonitor};
pub use scene::{PageChild, Scene, SceneKey, SceneWindow};
pub use scheduler::{FrameCallback, FrameQueue, FrameScheduler};
pub use store::{PageStore, Phase};
pub use tab_bar::{
    DefaultTabBar, IndicatorLayout, NavigationHandle, OverlayEdge, TabBar,
    TabBarPlacement, TabBarProps, TabBarRenderer,
};

pub use swipepager_config::{PagerConfig, TabBarPosition};
