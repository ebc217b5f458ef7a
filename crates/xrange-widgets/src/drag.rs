#![forbid(unsafe_code)]

//! Drag session and its cancellation handle.
//!
//! A [`DragSession`] exists only while a pointer is held on the control. It
//! records the captured pointer and owns a shared activity flag. Hosts that
//! attach their own move/up listeners for the duration of a drag take a
//! [`DragSubscription`] from the session; once the session is released the
//! flag is cleared and every subscription reports inactive, so late events
//! can be dropped at the source.
//!
//! # Invariants
//!
//! 1. At most one session exists per control.
//! 2. Releasing (or dropping) a session deactivates every subscription
//!    taken from it, immediately and permanently.
//! 3. A new session never revives subscriptions of an earlier one.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use xrange_core::event::PointerId;

/// Why a drag session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseReason {
    /// The captured pointer was lifted.
    PointerUp,
    /// The host cancelled the pointer (e.g. touch interrupted).
    Cancel,
    /// Pointer capture was taken away from the control.
    LostCapture,
    /// The control lost focus mid-drag.
    Blur,
}

impl fmt::Display for ReleaseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PointerUp => "pointer up",
            Self::Cancel => "cancel",
            Self::LostCapture => "lost capture",
            Self::Blur => "blur",
        })
    }
}

/// One pointer-held interaction.
#[derive(Debug)]
pub struct DragSession {
    pointer_id: PointerId,
    active: Rc<Cell<bool>>,
}

impl DragSession {
    /// Open a session for `pointer_id`.
    #[must_use]
    pub fn open(pointer_id: PointerId) -> Self {
        Self {
            pointer_id,
            active: Rc::new(Cell::new(true)),
        }
    }

    /// The captured pointer.
    #[must_use]
    pub const fn pointer_id(&self) -> PointerId {
        self.pointer_id
    }

    /// Whether `pointer_id` belongs to this session.
    #[must_use]
    pub fn owns(&self, pointer_id: PointerId) -> bool {
        self.pointer_id == pointer_id
    }

    /// Whether the session is still live.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Hand out a handle sharing this session's cancellation flag.
    #[must_use]
    pub fn subscribe(&self) -> DragSubscription {
        DragSubscription {
            pointer_id: self.pointer_id,
            active: Rc::clone(&self.active),
        }
    }

    /// End the session, deactivating every subscription.
    pub fn release(self) -> PointerId {
        self.active.set(false);
        self.pointer_id
    }
}

impl Drop for DragSession {
    fn drop(&mut self) {
        self.active.set(false);
    }
}

/// Host-side view of a drag session's move/up subscription.
#[derive(Debug, Clone)]
pub struct DragSubscription {
    pointer_id: PointerId,
    active: Rc<Cell<bool>>,
}

impl DragSubscription {
    /// Pointer the subscription listens to.
    #[must_use]
    pub const fn pointer_id(&self) -> PointerId {
        self.pointer_id
    }

    /// `false` once the originating session has been released.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}
