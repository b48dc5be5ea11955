// SPDX-License-Identifier: MPL-2.0
//! The toast collection: host-owned, observable, mutated in place.
//!
//! The host keeps the only `ToastCollection` and lends it to the stack by
//! reference. Each mutation is broadcast to subscribers as a
//! [`CollectionEvent`]. Mutations made inside [`ToastCollection::animate`]
//! carry a [`Transition`] so observers know to interpolate them.

use super::toast::{Toast, ToastId};
use super::transition::{Curve, Transition, TransitionKind};
use crossbeam_channel::{unbounded, Receiver, Sender};

/// A change to the collection, as seen by subscribers.
#[derive(Debug, Clone)]
pub enum CollectionEvent {
    /// A toast was appended.
    Inserted {
        id: ToastId,
        transition: Option<Transition>,
    },
    /// A toast was removed. The event owns the departing toast (with
    /// `is_deleting` set) so it can still be drawn while it leaves.
    Removed {
        toast: Toast,
        transition: Option<Transition>,
    },
    /// A toast's horizontal offset changed.
    OffsetChanged {
        id: ToastId,
        from: f32,
        to: f32,
        transition: Option<Transition>,
    },
}

/// Ordered toasts, oldest first.
#[derive(Debug, Default)]
pub struct ToastCollection {
    toasts: Vec<Toast>,
    subscribers: Vec<Sender<CollectionEvent>>,
    /// Curve of the enclosing `animate` scope, if any.
    scope: Option<Curve>,
}

impl ToastCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new observer.
    ///
    /// Dropping the receiver unsubscribes: the next broadcast prunes it.
    pub fn subscribe(&mut self) -> Receiver<CollectionEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Runs `mutate` with every change it makes animated along `curve`.
    ///
    /// Scopes nest; the innermost curve wins while it is active.
    pub fn animate<R>(&mut self, curve: Curve, mutate: impl FnOnce(&mut Self) -> R) -> R {
        let outer = self.scope.replace(curve);
        let result = mutate(self);
        self.scope = outer;
        result
    }

    /// Appends a toast on top of the stack.
    ///
    /// Ids are not checked for uniqueness; [`Toast::new`] is the only id
    /// source, so pushing the same toast twice is a caller bug.
    pub fn push(&mut self, toast: Toast) -> ToastId {
        let id = toast.id();
        self.toasts.push(toast);
        tracing::debug!(toast_id = %id, count = self.toasts.len(), "toast appended");

        let transition = self.transition(TransitionKind::Insert, vec![id]);
        self.broadcast(CollectionEvent::Inserted { id, transition });
        id
    }

    /// Removes the toast with `id`, animated with the bouncy curve.
    ///
    /// The toast is flagged `is_deleting` first so it stays on top during its
    /// exit. Returns the removal transition, or `None` if no toast has this
    /// id (removal is idempotent).
    pub fn dismiss(&mut self, id: ToastId) -> Option<Transition> {
        let position = self.position(id)?;
        self.toasts[position].is_deleting = true;

        self.animate(Curve::Bouncy, |toasts| toasts.remove_at(position))
    }

    /// Removes every toast, animated with the bouncy curve.
    pub fn clear(&mut self) {
        self.animate(Curve::Bouncy, |toasts| {
            while !toasts.toasts.is_empty() {
                let last = toasts.toasts.len() - 1;
                toasts.toasts[last].is_deleting = true;
                let _ = toasts.remove_at(last);
            }
        });
    }

    /// Sets the drag offset of a toast. Returns `false` if it is not present.
    pub fn set_offset(&mut self, id: ToastId, offset_x: f32) -> bool {
        let Some(position) = self.position(id) else {
            return false;
        };
        let from = self.toasts[position].offset_x;
        self.toasts[position].offset_x = offset_x;

        let transition = self.transition(TransitionKind::ResetOffset, vec![id]);
        self.broadcast(CollectionEvent::OffsetChanged {
            id,
            from,
            to: offset_x,
            transition,
        });
        true
    }

    /// Animates a toast back to its resting horizontal position.
    pub fn reset_offset(&mut self, id: ToastId) -> bool {
        self.animate(Curve::Smooth, |toasts| toasts.set_offset(id, 0.0))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Toasts in insertion order (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    #[must_use]
    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|toast| toast.id() == id)
    }

    /// Position of a toast in insertion order.
    #[must_use]
    pub fn position(&self, id: ToastId) -> Option<usize> {
        self.toasts.iter().position(|toast| toast.id() == id)
    }

    /// Visual index of a toast: 0 for the most recent.
    #[must_use]
    pub fn rank(&self, id: ToastId) -> Option<usize> {
        self.position(id)
            .map(|position| super::layout::rank(position, self.toasts.len()))
    }

    /// Ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> Vec<ToastId> {
        self.toasts.iter().map(Toast::id).collect()
    }

    fn remove_at(&mut self, position: usize) -> Option<Transition> {
        let toast = self.toasts.remove(position);
        let id = toast.id();
        tracing::debug!(toast_id = %id, count = self.toasts.len(), "toast removed");

        let transition = self.transition(TransitionKind::Remove, vec![id]);
        self.broadcast(CollectionEvent::Removed {
            toast,
            transition: transition.clone(),
        });
        transition
    }

    fn transition(&self, kind: TransitionKind, ids: Vec<ToastId>) -> Option<Transition> {
        self.scope.map(|curve| Transition::new(curve, kind, ids))
    }

    fn broadcast(&mut self, event: CollectionEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::toasts::Plain;

    fn toast(label: &str) -> Toast {
        let label = label.to_owned();
        Toast::new(move |_| Plain::new(label))
    }

    fn filled(count: usize) -> (ToastCollection, Vec<ToastId>) {
        let mut collection = ToastCollection::new();
        let ids = (0..count)
            .map(|i| collection.push(toast(&format!("toast-{i}"))))
            .collect();
        (collection, ids)
    }

    #[test]
    fn new_collection_is_empty() {
        let collection = ToastCollection::new();
        assert!(collection.is_empty());
        assert_eq!(collection.len(), 0);
    }

    #[test]
    fn push_keeps_insertion_order() {
        let (collection, ids) = filled(3);
        assert_eq!(collection.ids(), ids);
    }

    #[test]
    fn ranks_reverse_insertion_order() {
        let (collection, ids) = filled(4);
        let ranks: Vec<usize> = ids.iter().filter_map(|id| collection.rank(*id)).collect();
        assert_eq!(ranks, vec![3, 2, 1, 0]);
    }

    #[test]
    fn dismiss_removes_only_that_toast() {
        let (mut collection, ids) = filled(4);
        let removed = collection.dismiss(ids[1]);

        assert!(removed.is_some());
        assert_eq!(collection.len(), 3);
        assert_eq!(collection.ids(), vec![ids[0], ids[2], ids[3]]);
    }

    #[test]
    fn dismiss_unknown_id_is_a_noop() {
        let (mut collection, ids) = filled(2);
        let stranger = toast("stranger").id();
        let events = collection.subscribe();

        assert!(collection.dismiss(stranger).is_none());
        assert_eq!(collection.ids(), ids);
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn dismiss_twice_is_idempotent() {
        let (mut collection, ids) = filled(2);
        assert!(collection.dismiss(ids[0]).is_some());
        assert!(collection.dismiss(ids[0]).is_none());
        assert_eq!(collection.ids(), vec![ids[1]]);
    }

    #[test]
    fn dismiss_emits_bouncy_removal_of_a_deleting_toast() {
        let (mut collection, ids) = filled(2);
        let events = collection.subscribe();

        let transition = collection.dismiss(ids[0]).expect("toast exists");
        assert_eq!(transition.curve, Curve::Bouncy);
        assert_eq!(transition.kind, TransitionKind::Remove);
        assert_eq!(transition.ids, vec![ids[0]]);

        match events.try_recv() {
            Ok(CollectionEvent::Removed { toast, transition }) => {
                assert_eq!(toast.id(), ids[0]);
                assert!(toast.is_deleting());
                assert_eq!(transition.map(|t| t.curve), Some(Curve::Bouncy));
            }
            other => panic!("expected removal, got {other:?}"),
        }
    }

    #[test]
    fn push_outside_scope_is_not_animated() {
        let mut collection = ToastCollection::new();
        let events = collection.subscribe();
        let id = collection.push(toast("a"));

        match events.try_recv() {
            Ok(CollectionEvent::Inserted {
                id: inserted,
                transition,
            }) => {
                assert_eq!(inserted, id);
                assert!(transition.is_none());
            }
            other => panic!("expected insertion, got {other:?}"),
        }
    }

    #[test]
    fn push_inside_scope_carries_transition() {
        let mut collection = ToastCollection::new();
        let events = collection.subscribe();
        let id = collection.animate(Curve::Bouncy, |toasts| toasts.push(toast("a")));

        match events.try_recv() {
            Ok(CollectionEvent::Inserted { transition, .. }) => {
                assert_eq!(
                    transition,
                    Some(Transition::new(
                        Curve::Bouncy,
                        TransitionKind::Insert,
                        vec![id]
                    ))
                );
            }
            other => panic!("expected insertion, got {other:?}"),
        }
    }

    #[test]
    fn animate_scope_is_restored_afterwards() {
        let mut collection = ToastCollection::new();
        collection.animate(Curve::Linear, |toasts| {
            toasts.animate(Curve::Smooth, |inner| {
                assert_eq!(inner.scope, Some(Curve::Smooth));
            });
            assert_eq!(toasts.scope, Some(Curve::Linear));
        });
        assert_eq!(collection.scope, None);
    }

    #[test]
    fn set_offset_updates_toast() {
        let (mut collection, ids) = filled(1);
        assert!(collection.set_offset(ids[0], -80.0));
        assert_eq!(collection.get(ids[0]).map(Toast::offset_x), Some(-80.0));
    }

    #[test]
    fn set_offset_on_missing_toast_fails() {
        let mut collection = ToastCollection::new();
        assert!(!collection.set_offset(toast("ghost").id(), -10.0));
    }

    #[test]
    fn reset_offset_is_smoothly_animated() {
        let (mut collection, ids) = filled(1);
        collection.set_offset(ids[0], -120.0);
        let events = collection.subscribe();

        assert!(collection.reset_offset(ids[0]));
        assert_eq!(collection.get(ids[0]).map(Toast::offset_x), Some(0.0));
        match events.try_recv() {
            Ok(CollectionEvent::OffsetChanged {
                from, to, transition, ..
            }) => {
                assert_eq!(from, -120.0);
                assert_eq!(to, 0.0);
                assert_eq!(transition.map(|t| t.curve), Some(Curve::Smooth));
            }
            other => panic!("expected offset change, got {other:?}"),
        }
    }

    #[test]
    fn clear_removes_everything_newest_first() {
        let (mut collection, ids) = filled(3);
        let events = collection.subscribe();
        collection.clear();

        assert!(collection.is_empty());
        let removed: Vec<ToastId> = events
            .try_iter()
            .filter_map(|event| match event {
                CollectionEvent::Removed { toast, .. } => Some(toast.id()),
                _ => None,
            })
            .collect();
        assert_eq!(removed, vec![ids[2], ids[1], ids[0]]);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut collection = ToastCollection::new();
        let kept = collection.subscribe();
        drop(collection.subscribe());

        collection.push(toast("a"));
        assert_eq!(collection.subscribers.len(), 1);
        assert!(kept.try_recv().is_ok());
    }

    #[test]
    fn every_subscriber_sees_every_event() {
        let mut collection = ToastCollection::new();
        let first = collection.subscribe();
        let second = collection.subscribe();
        let id = collection.push(toast("a"));
        collection.dismiss(id);

        assert_eq!(first.try_iter().count(), 2);
        assert_eq!(second.try_iter().count(), 2);
    }
}
