//! PageStore: the two raw position cells and their published sum.

use crate::bus::PositionBus;

/// Whether a swipe is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No offset; the base page is the confirmed page.
    Settled,
    /// A non-zero in-progress offset is applied on top of the base page.
    Dragging,
}

/// Owns `base_page` and `fractional_offset` and republishes their sum.
///
/// Every cell write recomputes the sum from both cells and publishes it
/// immediately. There is no coalescing: one external event, one publish.
#[derive(Debug)]
pub struct PageStore {
    base_page: usize,
    fractional_offset: f64,
    bus: PositionBus,
}

impl PageStore {
    /// Store settled on `initial_page`.
    pub fn new(initial_page: usize) -> Self {
        Self {
            base_page: initial_page,
            fractional_offset: 0.0,
            bus: PositionBus::new(initial_page as f64),
        }
    }

    /// Confirmed page the offset is measured from.
    pub fn base_page(&self) -> usize {
        self.base_page
    }

    /// In-progress offset relative to [`PageStore::base_page`].
    pub fn fractional_offset(&self) -> f64 {
        self.fractional_offset
    }

    /// `base_page + fractional_offset`, identical to the last published value.
    pub fn continuous_position(&self) -> f64 {
        self.base_page as f64 + self.fractional_offset
    }

    /// `Dragging` while the offset is non-zero.
    pub fn phase(&self) -> Phase {
        if self.fractional_offset == 0.0 {
            Phase::Settled
        } else {
            Phase::Dragging
        }
    }

    /// Handle to the bus carrying the continuous position. Observers may
    /// subscribe through it; only the store publishes.
    pub fn position_bus(&self) -> PositionBus {
        self.bus.clone()
    }

    /// Authoritative page change.
    pub fn set_base_page(&mut self, page: usize) {
        self.base_page = page;
        self.publish();
    }

    /// In-progress scroll offset relative to the base page.
    pub fn set_fractional_offset(&mut self, offset: f64) {
        self.fractional_offset = offset;
        self.publish();
    }

    /// Confirm `page`: base becomes `page`, offset becomes `0`, and a single
    /// value is published. Observers never see the mixed intermediate state.
    pub fn settle(&mut self, page: usize) {
        self.base_page = page;
        self.fractional_offset = 0.0;
        self.publish();
    }

    fn publish(&self) {
        self.bus.publish(self.continuous_position());
    }
}
