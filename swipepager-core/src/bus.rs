//! PositionBus: an observable numeric value.
//!
//! The continuous page position is the sum of two independently changing
//! cells. Composed values of that kind usually cannot be observed directly,
//! so the sum is republished here by hand and any number of observers (a tab
//! indicator, the host) subscribe to it.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

type Listener = Rc<dyn Fn(f64)>;

/// Opaque handle returned by [`PositionBus::observe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionHandle(u64);

/// Shared observable value. Cloning yields another handle to the same bus.
///
/// Listeners run synchronously inside [`PositionBus::publish`], in
/// registration order, once per publish. Repeated identical values are
/// delivered every time, so listeners must tolerate them.
#[derive(Clone)]
pub struct PositionBus {
    inner: Rc<BusInner>,
}

struct BusInner {
    value: Cell<f64>,
    next_id: Cell<u64>,
    // Bumped by every publish; a delivery pass stops once it is stale.
    generation: Cell<u64>,
    listeners: RefCell<HashMap<SubscriptionHandle, Listener>>,
    // Registration order. Removed handles linger until compaction.
    order: RefCell<Vec<SubscriptionHandle>>,
}

impl PositionBus {
    /// New bus holding `initial`.
    pub fn new(initial: f64) -> Self {
        Self {
            inner: Rc::new(BusInner {
                value: Cell::new(initial),
                next_id: Cell::new(0),
                generation: Cell::new(0),
                listeners: RefCell::new(HashMap::new()),
                order: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Last published value.
    pub fn value(&self) -> f64 {
        self.inner.value.get()
    }

    /// Number of currently registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Register `listener`. It is first called on the next publish.
    pub fn observe<F>(&self, listener: F) -> SubscriptionHandle
    where
        F: Fn(f64) + 'static,
    {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        let handle = SubscriptionHandle(id);
        self.inner
            .listeners
            .borrow_mut()
            .insert(handle, Rc::new(listener));
        self.inner.order.borrow_mut().push(handle);
        handle
    }

    /// Remove a listener. Returns `false` if it was already gone.
    ///
    /// Safe to call from inside a listener, including for itself; a listener
    /// removed mid-publish is not called for the rest of that publish.
    pub fn unobserve(&self, handle: SubscriptionHandle) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        if listeners.remove(&handle).is_none() {
            return false;
        }
        let live = listeners.len();

        let mut order = self.inner.order.borrow_mut();
        if order.len() > 2 * live + 8 {
            order.retain(|h| listeners.contains_key(h));
        }
        true
    }

    /// Drop every listener. Called once when the owner is torn down.
    pub fn unobserve_all(&self) {
        self.inner.listeners.borrow_mut().clear();
        self.inner.order.borrow_mut().clear();
    }

    /// Store `value` and notify every registered listener with it.
    ///
    /// A listener may publish again. The nested value is delivered to every
    /// listener and the outer pass stops there, so nobody receives the older
    /// value after the newer one.
    pub fn publish(&self, value: f64) {
        self.inner.value.set(value);
        let generation = self.inner.generation.get().wrapping_add(1);
        self.inner.generation.set(generation);

        // Snapshot so listeners may observe/unobserve/publish re-entrantly.
        let snapshot: Vec<SubscriptionHandle> =
            self.inner.order.borrow().clone();

        for handle in snapshot {
            if self.inner.generation.get() != generation {
                break;
            }
            let listener = self.inner.listeners.borrow().get(&handle).cloned();
            if let Some(listener) = listener {
                listener(value);
            }
        }
    }
}

impl Default for PositionBus {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl fmt::Debug for PositionBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionBus")
            .field("value", &self.value())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<f64>>>, impl Fn(f64) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |v| sink.borrow_mut().push(v))
    }

    #[test]
    fn publish_reaches_listeners_in_registration_order() {
        let bus = PositionBus::new(0.0);
        let order = Rc::new(RefCell::new(Vec::new()));
        for tag in 0..3 {
            let order = Rc::clone(&order);
            bus.observe(move |_| order.borrow_mut().push(tag));
        }

        bus.publish(1.5);

        assert_eq!(*order.borrow(), vec![0, 1, 2]);
        assert_eq!(bus.value(), 1.5);
    }

    #[test]
    fn repeated_values_are_not_deduplicated() {
        let bus = PositionBus::new(0.0);
        let (seen, listener) = recorder();
        bus.observe(listener);

        bus.publish(2.0);
        bus.publish(2.0);

        assert_eq!(*seen.borrow(), vec![2.0, 2.0]);
    }

    #[test]
    fn unobserve_stops_delivery() {
        let bus = PositionBus::new(0.0);
        let (seen, listener) = recorder();
        let handle = bus.observe(listener);

        bus.publish(1.0);
        assert!(bus.unobserve(handle));
        assert!(!bus.unobserve(handle));
        bus.publish(2.0);

        assert_eq!(*seen.borrow(), vec![1.0]);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn listener_can_unsubscribe_itself_mid_publish() {
        let bus = PositionBus::new(0.0);
        let slot: Rc<Cell<Option<SubscriptionHandle>>> = Rc::new(Cell::new(None));
        let calls = Rc::new(Cell::new(0));

        let handle = {
            let bus_ref = bus.clone();
            let slot = Rc::clone(&slot);
            let calls = Rc::clone(&calls);
            bus.observe(move |_| {
                calls.set(calls.get() + 1);
                if let Some(me) = slot.get() {
                    bus_ref.unobserve(me);
                }
            })
        };
        slot.set(Some(handle));
        let (after, listener) = recorder();
        bus.observe(listener);

        bus.publish(1.0);
        bus.publish(2.0);

        assert_eq!(calls.get(), 1);
        assert_eq!(*after.borrow(), vec![1.0, 2.0]);
    }

    #[test]
    fn listener_removed_by_earlier_listener_is_skipped() {
        let bus = PositionBus::new(0.0);
        let victim: Rc<Cell<Option<SubscriptionHandle>>> = Rc::new(Cell::new(None));
        {
            let bus_ref = bus.clone();
            let victim = Rc::clone(&victim);
            bus.observe(move |_| {
                if let Some(h) = victim.take() {
                    bus_ref.unobserve(h);
                }
            });
        }
        let (seen, listener) = recorder();
        victim.set(Some(bus.observe(listener)));

        bus.publish(3.0);

        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn listener_added_mid_publish_waits_for_next_publish() {
        let bus = PositionBus::new(0.0);
        let (seen, listener) = recorder();
        let pending = Rc::new(RefCell::new(Some(listener)));
        {
            let bus_ref = bus.clone();
            let pending = Rc::clone(&pending);
            bus.observe(move |_| {
                if let Some(listener) = pending.borrow_mut().take() {
                    bus_ref.observe(listener);
                }
            });
        }

        bus.publish(1.0);
        bus.publish(2.0);

        assert_eq!(*seen.borrow(), vec![2.0]);
    }

    #[test]
    fn nested_publish_is_not_followed_by_the_stale_value() {
        let bus = PositionBus::new(0.0);
        {
            let bus_ref = bus.clone();
            bus.observe(move |v| {
                if v == 1.0 {
                    bus_ref.publish(2.0);
                }
            });
        }
        let (seen, listener) = recorder();
        bus.observe(listener);

        bus.publish(1.0);

        assert_eq!(*seen.borrow(), vec![2.0]);
        assert_eq!(bus.value(), 2.0);
    }

    #[test]
    fn nested_publish_after_a_listener_ran_keeps_it_current() {
        let bus = PositionBus::new(0.0);
        let (first, listener) = recorder();
        bus.observe(listener);
        {
            let bus_ref = bus.clone();
            bus.observe(move |v| {
                if v == 1.0 {
                    bus_ref.publish(3.0);
                }
            });
        }

        bus.publish(1.0);

        assert_eq!(*first.borrow(), vec![1.0, 3.0]);
        assert_eq!(bus.value(), 3.0);
    }

    #[test]
    fn unobserve_all_clears_everything() {
        let bus = PositionBus::new(0.0);
        let (seen, listener) = recorder();
        bus.observe(listener);
        bus.observe(|_| {});

        bus.unobserve_all();
        bus.publish(4.0);

        assert!(seen.borrow().is_empty());
        assert_eq!(bus.listener_count(), 0);
        assert_eq!(bus.value(), 4.0);
    }

    #[test]
    fn tombstones_are_compacted_without_losing_order() {
        let bus = PositionBus::new(0.0);
        let order = Rc::new(RefCell::new(Vec::new()));
        let handles: Vec<_> = (0..40)
            .map(|tag| {
                let order = Rc::clone(&order);
                bus.observe(move |_| order.borrow_mut().push(tag))
            })
            .collect();
        for handle in handles.iter().filter(|h| h.0 % 4 != 0) {
            bus.unobserve(*handle);
        }

        bus.publish(1.0);

        assert_eq!(*order.borrow(), (0..40).step_by(4).collect::<Vec<_>>());
        assert_eq!(bus.listener_count(), 10);
        assert!(bus.inner.order.borrow().len() <= 2 * 10 + 8);
    }
}
