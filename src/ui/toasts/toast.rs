// SPDX-License-Identifier: MPL-2.0
//! The toast record: identity plus transient interaction state.

use super::content::Renderable;
use std::fmt;
use std::rc::Rc;

/// Unique identifier for a toast.
///
/// Construction is the only source of ids, so two live toasts never share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    /// Creates a new unique toast ID.
    fn next() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

/// A transient, dismissible notification card.
///
/// The content is shared (`Rc`) so that a toast removed from its collection
/// can still be drawn while its exit animation plays.
#[derive(Clone)]
pub struct Toast {
    id: ToastId,
    content: Rc<dyn Renderable>,
    /// Horizontal drag displacement, never positive while a drag is active.
    pub(super) offset_x: f32,
    /// Set right before removal so the card is drawn above its siblings.
    pub(super) is_deleting: bool,
}

impl Toast {
    /// Creates a toast whose content is built from its own freshly generated id.
    ///
    /// Handing the id to the factory lets dismiss affordances inside the
    /// content refer back to the toast that contains them.
    pub fn new<C, F>(factory: F) -> Self
    where
        C: Renderable + 'static,
        F: FnOnce(ToastId) -> C,
    {
        let id = ToastId::next();
        Self {
            id,
            content: Rc::new(factory(id)),
            offset_x: 0.0,
            is_deleting: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    #[must_use]
    pub fn content(&self) -> &dyn Renderable {
        self.content.as_ref()
    }

    /// Current horizontal drag displacement.
    #[must_use]
    pub fn offset_x(&self) -> f32 {
        self.offset_x
    }

    /// Whether this toast is on its way out.
    #[must_use]
    pub fn is_deleting(&self) -> bool {
        self.is_deleting
    }
}

impl fmt::Debug for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toast")
            .field("id", &self.id)
            .field("offset_x", &self.offset_x)
            .field("is_deleting", &self.is_deleting)
            .finish_non_exhaustive()
    }
}
