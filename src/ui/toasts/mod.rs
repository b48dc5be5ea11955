// SPDX-License-Identifier: MPL-2.0
//! Stacked, dismissible toast overlay.
//!
//! Toasts pile up at the bottom of the window as a collapsed deck, most
//! recent in front. Tapping a card expands the deck into a list over a
//! dimmed scrim; dragging a card to the left dismisses it.
//!
//! # Components
//!
//! - [`toast`] - `Toast` record and its `ToastId`
//! - [`content`] - `Renderable` content (`Banner`, `Plain`)
//! - [`collection`] - Host-owned `ToastCollection` with change events
//! - [`transition`] - Transition descriptors and easing curves
//! - [`layout`] - Deck geometry
//! - [`gesture`] - Swipe-to-dismiss decisions
//! - [`stack`] - `ToastStack` overlay state, messages and view
//!
//! # Usage
//!
//! ```ignore
//! use crate::ui::toasts::{self, Banner, Curve, StackConfig, Toast, ToastCollection, ToastStack};
//!
//! let mut collection = ToastCollection::new();
//! let mut stack = ToastStack::new(&mut collection, StackConfig::default());
//!
//! collection.animate(Curve::Bouncy, |c| c.push(Toast::new(|id| Banner::new(id, "Copied"))));
//!
//! // In update
//! stack.update(message, &mut collection);
//!
//! // In view
//! toasts::attach(content, &stack, &collection, Message::Toasts)
//! ```

pub mod collection;
pub mod content;
pub mod deck;
pub mod gesture;
pub mod layout;
pub mod stack;
pub mod toast;
pub mod transition;

mod card;

pub use collection::{CollectionEvent, ToastCollection};
pub use content::{Banner, BannerIcon, Plain, Renderable};
pub use layout::Mode;
pub use stack::{Message, StackConfig, ToastStack};
pub use toast::{Toast, ToastId};
pub use transition::{Curve, Transition, TransitionKind};

use iced::widget::{Space, Stack as Layers};
use iced::{Element, Length};

/// Lays the toast overlay over `base`.
///
/// Attach once, at the root of the view. The overlay layer is always
/// present; with nothing to show it is an empty space that takes no input.
pub fn attach<'a, M: 'a>(
    base: impl Into<Element<'a, M>>,
    stack: &'a ToastStack,
    collection: &'a ToastCollection,
    on_message: impl Fn(Message) -> M + 'a,
) -> Element<'a, M> {
    let overlay = if stack.is_idle(collection) {
        Space::new().into()
    } else {
        stack.view(collection).map(on_message)
    };

    Layers::with_children([base.into(), overlay])
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
