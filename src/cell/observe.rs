//! Continuous width observation for a rendered region.
//!
//! The layout pass reports the width of an observed region every frame;
//! subscribers hear about it only when it changes. Everything runs on the UI
//! thread, so the registry lives behind `Rc<RefCell<_>>`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::trace;

/// Callback receiving the new width in cells.
pub type Listener = Box<dyn FnMut(u16)>;

/// Something that can notify about width changes of a region.
pub trait WidthSource {
    /// Register `on_change`; it stays registered until the returned
    /// [`Subscription`] is released.
    fn subscribe(&self, on_change: Listener) -> Subscription;
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
    last_width: Option<u16>,
    /// True while listeners are taken out for a notification
    notifying: bool,
    /// Ids released during a notification
    released_in_flight: Vec<u64>,
}

/// Width observer for one region (e.g. the address column).
#[derive(Clone, Default)]
pub struct SizeObserver {
    registry: Rc<RefCell<Registry>>,
}

impl SizeObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report the region's current width. Listeners run only if it changed.
    pub fn report(&self, width: u16) {
        let mut listeners = {
            let mut reg = self.registry.borrow_mut();
            if reg.last_width == Some(width) {
                return;
            }
            reg.last_width = Some(width);
            reg.notifying = true;
            std::mem::take(&mut reg.listeners)
        };

        trace!(width, listeners = listeners.len(), "region width changed");
        for (_, listener) in listeners.iter_mut() {
            listener(width);
        }

        let dropped: Vec<(u64, Listener)> = {
            let mut reg = self.registry.borrow_mut();
            let released = std::mem::take(&mut reg.released_in_flight);
            let (dropped, mut kept): (Vec<_>, Vec<_>) = listeners
                .into_iter()
                .partition(|(id, _)| released.contains(id));
            // Anything subscribed during the notification goes after the originals
            kept.append(&mut reg.listeners);
            reg.listeners = kept;
            reg.notifying = false;
            dropped
        };
        // A listener may own subscriptions to this observer; they release
        // through the registry, so it must not be borrowed here
        drop(dropped);
    }

    /// Last reported width, if any
    pub fn width(&self) -> Option<u16> {
        self.registry.borrow().last_width
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

impl WidthSource for SizeObserver {
    fn subscribe(&self, mut on_change: Listener) -> Subscription {
        let last_width = self.registry.borrow().last_width;
        // A fresh observation starts with the current size
        if let Some(width) = last_width {
            on_change(width);
        }

        let mut reg = self.registry.borrow_mut();
        let id = reg.next_id;
        reg.next_id += 1;
        reg.listeners.push((id, on_change));
        trace!(id, "width listener subscribed");

        Subscription {
            id,
            registry: Some(Rc::downgrade(&self.registry)),
        }
    }
}

/// Keeps a listener registered. Dropping it releases the listener.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    registry: Option<Weak<RefCell<Registry>>>,
}

impl Subscription {
    /// Release the listener now.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    pub fn is_active(&self) -> bool {
        self.registry.as_ref().is_some_and(|w| w.strong_count() > 0)
    }

    fn release(&mut self) {
        let Some(weak) = self.registry.take() else {
            return;
        };
        let Some(registry) = weak.upgrade() else {
            return;
        };
        let removed = {
            let mut reg = registry.borrow_mut();
            if reg.notifying {
                reg.released_in_flight.push(self.id);
                None
            } else {
                let pos = reg.listeners.iter().position(|(id, _)| *id == self.id);
                pos.map(|pos| reg.listeners.remove(pos))
            }
        };
        trace!(id = self.id, "width listener released");
        // Dropped outside the borrow, see `SizeObserver::report`
        drop(removed);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}
