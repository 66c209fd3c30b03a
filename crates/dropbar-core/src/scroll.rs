#![forbid(unsafe_code)]

//! Host scroll container and its scroll signal.
//!
//! A [`ScrollHost`] stands in for the host window: it owns the vertical
//! scroll offset and broadcasts a [`ScrollSignal`] to every live
//! [`ScrollSubscription`] whenever the offset changes. Subscriptions are
//! scoped guards: dropping one (or calling [`ScrollSubscription::unsubscribe`])
//! removes it from the host, after which it never receives another signal.
//!
//! Everything here is single-threaded. The host shares its listener table
//! with outstanding subscriptions through `Rc`/`Weak`, so a subscription may
//! outlive its host without error.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};
use std::sync::mpsc;

use crate::event::{MouseEvent, MouseEventKind};

/// A unique identifier for a scroll subscription.
pub type SubId = u64;

/// One scroll notification from the host scroll container.
///
/// Element-like containers expose `scroll_top`; window-like containers only
/// expose a page offset. [`ScrollSignal::offset`] prefers the former.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScrollSignal {
    /// `scrollTop`-style offset, if the container exposes one.
    pub scroll_top: Option<i32>,
    /// Page-offset-style fallback.
    pub page_y_offset: i32,
}

impl ScrollSignal {
    /// Signal from a window-like container (page offset only).
    #[must_use]
    pub const fn page(page_y_offset: i32) -> Self {
        Self {
            scroll_top: None,
            page_y_offset,
        }
    }

    /// Signal from an element-like container (exposes `scroll_top`).
    #[must_use]
    pub const fn element(scroll_top: i32) -> Self {
        Self {
            scroll_top: Some(scroll_top),
            page_y_offset: 0,
        }
    }

    /// Current vertical offset, clamped at zero.
    ///
    /// Overscroll (negative offsets) reads as 0.
    #[must_use]
    pub fn offset(&self) -> u32 {
        self.scroll_top.unwrap_or(self.page_y_offset).max(0) as u32
    }
}

/// Which offset field the host exposes in its signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollSourceKind {
    /// Window-like: only a page offset.
    #[default]
    Window,
    /// Element-like: a `scroll_top` field.
    Element,
}

#[derive(Debug, Default)]
struct Listeners {
    next_id: SubId,
    senders: BTreeMap<SubId, mpsc::Sender<ScrollSignal>>,
}

/// The host scroll container (the "window").
#[derive(Debug, Default)]
pub struct ScrollHost {
    kind: ScrollSourceKind,
    offset: i32,
    listeners: Rc<RefCell<Listeners>>,
}

impl ScrollHost {
    /// A window-like host at offset 0.
    #[must_use]
    pub fn window() -> Self {
        Self::default()
    }

    /// An element-like host at offset 0.
    #[must_use]
    pub fn element() -> Self {
        Self {
            kind: ScrollSourceKind::Element,
            ..Self::default()
        }
    }

    /// Which field this host fills in its signals.
    #[must_use]
    pub const fn kind(&self) -> ScrollSourceKind {
        self.kind
    }

    /// Current raw offset (may be negative during overscroll).
    #[must_use]
    pub const fn offset(&self) -> i32 {
        self.offset
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().senders.len()
    }

    /// Register a new listener.
    pub fn subscribe(&self) -> ScrollSubscription {
        let (sender, receiver) = mpsc::channel();
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.senders.insert(id, sender);
        crate::debug!(sub_id = id, "scroll subscription acquired");

        ScrollSubscription {
            id,
            receiver,
            host: Rc::downgrade(&self.listeners),
        }
    }

    /// Move to an absolute offset and notify listeners.
    ///
    /// Returns the number of listeners notified.
    pub fn scroll_to(&mut self, offset: i32) -> usize {
        self.offset = offset;
        self.emit()
    }

    /// Move by a relative amount and notify listeners.
    pub fn scroll_by(&mut self, delta: i32) -> usize {
        self.scroll_to(self.offset.saturating_add(delta))
    }

    /// Apply a mouse-wheel event, `lines` rows per notch.
    ///
    /// Returns `None` for non-wheel events, otherwise the number of listeners
    /// notified. Wheel-up never moves the offset below zero.
    pub fn apply_wheel(&mut self, event: &MouseEvent, lines: i32) -> Option<usize> {
        match event.kind {
            MouseEventKind::ScrollDown => Some(self.scroll_by(lines)),
            MouseEventKind::ScrollUp => {
                let target = self.offset.saturating_sub(lines).max(0);
                Some(self.scroll_to(target))
            }
            _ => None,
        }
    }

    /// The signal describing the current offset.
    #[must_use]
    pub fn signal(&self) -> ScrollSignal {
        match self.kind {
            ScrollSourceKind::Window => ScrollSignal::page(self.offset),
            ScrollSourceKind::Element => ScrollSignal::element(self.offset),
        }
    }

    fn emit(&self) -> usize {
        let signal = self.signal();
        let mut listeners = self.listeners.borrow_mut();
        // Receivers that were leaked without dropping the guard are pruned here.
        listeners
            .senders
            .retain(|_, sender| sender.send(signal).is_ok());
        listeners.senders.len()
    }
}

/// A live registration with a [`ScrollHost`].
///
/// Dropping the guard unsubscribes.
#[derive(Debug)]
pub struct ScrollSubscription {
    id: SubId,
    receiver: mpsc::Receiver<ScrollSignal>,
    host: Weak<RefCell<Listeners>>,
}

impl ScrollSubscription {
    /// This subscription's identifier.
    #[must_use]
    pub const fn id(&self) -> SubId {
        self.id
    }

    /// Take every signal delivered since the last drain, oldest first.
    pub fn drain(&self) -> Vec<ScrollSignal> {
        self.receiver.try_iter().collect()
    }

    /// Release the subscription now instead of at drop.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for ScrollSubscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.host.upgrade() {
            listeners.borrow_mut().senders.remove(&self.id);
        }
        crate::debug!(sub_id = self.id, "scroll subscription released");
    }
}
