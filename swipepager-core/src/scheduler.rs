//! Deferred work at animation-frame boundaries.
//!
//! Layout events arrive before the platform has finished settling geometry,
//! so follow-up work is pushed to the next frame. The scheduler is an explicit
//! service owned by whoever defers work, and it is cancelled explicitly on
//! teardown.

use std::fmt;

/// Work to run against a target at a frame boundary.
pub type FrameCallback<T> = Box<dyn FnOnce(&mut T)>;

/// Frame scheduling service.
pub trait FrameScheduler<T> {
    /// Queue `callback` for the next frame boundary.
    fn schedule_on_next_frame(&mut self, callback: FrameCallback<T>);

    /// Hand over every callback due at the boundary being entered, in
    /// scheduling order. Callbacks scheduled while these run belong to the
    /// following frame.
    fn take_due(&mut self) -> Vec<FrameCallback<T>>;

    /// Drop every pending callback without running it.
    fn cancel_all(&mut self);

    /// Number of callbacks waiting for a frame.
    fn pending(&self) -> usize;
}

/// In-process [`FrameScheduler`] driven by the host's frame loop.
pub struct FrameQueue<T> {
    queued: Vec<FrameCallback<T>>,
    frames: u64,
}

impl<T> FrameQueue<T> {
    /// Empty queue.
    pub fn new() -> Self {
        Self {
            queued: Vec::new(),
            frames: 0,
        }
    }

    /// Frame boundaries crossed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Cross a frame boundary, running due callbacks against `target`.
    ///
    /// For targets that do not own the queue; owners use
    /// [`FrameScheduler::take_due`] and run the callbacks themselves.
    pub fn run_frame(&mut self, target: &mut T) {
        for callback in self.take_due() {
            callback(target);
        }
    }
}

impl<T> Default for FrameQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FrameScheduler<T> for FrameQueue<T> {
    fn schedule_on_next_frame(&mut self, callback: FrameCallback<T>) {
        self.queued.push(callback);
    }

    fn take_due(&mut self) -> Vec<FrameCallback<T>> {
        self.frames += 1;
        std::mem::take(&mut self.queued)
    }

    fn cancel_all(&mut self) {
        if !self.queued.is_empty() {
            log::debug!(
                "cancelling {} pending frame callbacks",
                self.queued.len()
            );
        }
        self.queued.clear();
    }

    fn pending(&self) -> usize {
        self.queued.len()
    }
}

impl<T> fmt::Debug for FrameQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameQueue")
            .field("pending", &self.queued.len())
            .field("frames", &self.frames)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callbacks_wait_for_the_next_frame() {
        let mut queue: FrameQueue<Vec<u32>> = FrameQueue::new();
        let mut log = Vec::new();

        queue.schedule_on_next_frame(Box::new(|log: &mut Vec<u32>| log.push(1)));
        queue.schedule_on_next_frame(Box::new(|log: &mut Vec<u32>| log.push(2)));
        assert_eq!(queue.pending(), 2);
        assert!(log.is_empty());

        queue.run_frame(&mut log);

        assert_eq!(log, vec![1, 2]);
        assert_eq!(queue.pending(), 0);
        assert_eq!(queue.frames(), 1);
    }

    #[test]
    fn cancel_all_drops_pending_work() {
        let mut queue: FrameQueue<Vec<u32>> = FrameQueue::new();
        let mut log = Vec::new();

        queue.schedule_on_next_frame(Box::new(|log: &mut Vec<u32>| log.push(1)));
        queue.cancel_all();
        queue.run_frame(&mut log);

        assert!(log.is_empty());
    }

    #[test]
    fn take_due_leaves_later_schedules_for_the_following_frame() {
        let mut queue: FrameQueue<u32> = FrameQueue::new();
        queue.schedule_on_next_frame(Box::new(|n: &mut u32| *n += 1));

        let due = queue.take_due();
        queue.schedule_on_next_frame(Box::new(|n: &mut u32| *n += 10));

        let mut n = 0;
        for callback in due {
            callback(&mut n);
        }
        assert_eq!(n, 1);
        assert_eq!(queue.pending(), 1);
    }
}
