//! Container width tracking.

/// Why a width report was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Zero, negative, or not a number.
    NonPositive,
    /// Rounds to the stored width; sub-pixel measurement noise.
    SameRoundedWidth,
}

/// Outcome of a width report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutChange {
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// The stored width changed; the page container needs a resync.
    Resized {
        /// Previously stored width.
        from: f64,
        /// Newly stored width.
        to: f64,
    },
}

impl LayoutChange {
    /// Whether the page container has to be moved back onto the current page.
    pub fn needs_resync(&self) -> bool {
        matches!(self, LayoutChange::Resized { .. })
    }
}

/// Holds the measured width of the paging surface and filters noisy reports.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutMonitor {
    width: f64,
}

impl LayoutMonitor {
    /// Monitor starting from `initial_width`.
    pub fn new(initial_width: f64) -> Self {
        Self {
            width: initial_width,
        }
    }

    /// Last accepted width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Feed a width reported by a layout event.
    pub fn report(&mut self, width: f64) -> LayoutChange {
        if !width.is_finite() || width <= 0.0 {
            log::trace!("ignoring layout width {width}");
            return LayoutChange::Ignored(IgnoreReason::NonPositive);
        }
        if width.round() == self.width.round() {
            log::trace!(
                "ignoring layout width {width}: rounds to stored {}",
                self.width
            );
            return LayoutChange::Ignored(IgnoreReason::SameRoundedWidth);
        }

        let from = self.width;
        self.width = width;
        LayoutChange::Resized { from, to: width }
    }
}
