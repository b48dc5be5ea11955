// SPDX-License-Identifier: MPL-2.0
//! Bottom-anchored container for toast cards.
//!
//! The deck fills its parent, centers every card horizontally and stands it
//! on the bottom edge. When spread, cards are lifted into a list using their
//! measured heights. Later children are drawn above earlier ones and receive
//! events first.

use super::layout::lift_at;
use iced::advanced::layout::{self, Layout};
use iced::advanced::mouse;
use iced::advanced::renderer;
use iced::advanced::widget::{self, Widget};
use iced::advanced::{Clipboard, Shell};
use iced::{Element, Event, Length, Point, Rectangle, Size};

/// Where a card sits in the deck.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub rank: usize,
    /// Departing cards keep their last rank but take no room in the list.
    pub live: bool,
    /// Position the card is lifted to, which trails `rank` while restacking.
    pub list_rank: f32,
}

impl Slot {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn live(rank: usize) -> Self {
        Self {
            rank,
            live: true,
            list_rank: rank as f32,
        }
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn departing(rank: usize) -> Self {
        Self {
            rank,
            live: false,
            list_rank: rank as f32,
        }
    }

    /// Lifts the card to a fractional list position.
    #[must_use]
    pub fn at(mut self, list_rank: f32) -> Self {
        self.list_rank = list_rank;
        self
    }
}

/// Top-left corner of each card inside a deck of size `bounds`.
///
/// `sizes` and `slots` are parallel. Live ranks are expected to be
/// `0..live_count`.
#[must_use]
pub fn place(
    bounds: Size,
    sizes: &[Size],
    slots: &[Slot],
    spread: f32,
    spacing: f32,
    bottom_padding: f32,
) -> Vec<Point> {
    let live = slots.iter().filter(|slot| slot.live).count();
    let mut heights = vec![0.0; live];
    for (slot, size) in slots.iter().zip(sizes) {
        if slot.live && slot.rank < live {
            heights[slot.rank] = size.height;
        }
    }

    slots
        .iter()
        .zip(sizes)
        .map(|(slot, size)| {
            let lifted = lift_at(&heights, slot.list_rank, spread, spacing);
            Point::new(
                (bounds.width - size.width) / 2.0,
                bounds.height - bottom_padding - size.height - lifted,
            )
        })
        .collect()
}

pub struct Deck<'a, Message, Theme, Renderer> {
    slots: Vec<Slot>,
    cards: Vec<Element<'a, Message, Theme, Renderer>>,
    spread: f32,
    spacing: f32,
    bottom_padding: f32,
}

impl<'a, Message, Theme, Renderer> Deck<'a, Message, Theme, Renderer> {
    /// Builds a deck from cards in drawing order (bottom first).
    pub fn with_cards(
        cards: impl IntoIterator<Item = (Slot, Element<'a, Message, Theme, Renderer>)>,
    ) -> Self {
        let (slots, cards) = cards.into_iter().unzip();
        Self {
            slots,
            cards,
            spread: 0.0,
            spacing: 0.0,
            bottom_padding: 0.0,
        }
    }

    #[must_use]
    pub fn spread(mut self, spread: f32) -> Self {
        self.spread = spread;
        self
    }

    #[must_use]
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    #[must_use]
    pub fn bottom_padding(mut self, bottom_padding: f32) -> Self {
        self.bottom_padding = bottom_padding;
        self
    }
}

impl<Message, Theme, Renderer> Widget<Message, Theme, Renderer>
    for Deck<'_, Message, Theme, Renderer>
where
    Renderer: renderer::Renderer,
{
    fn size(&self) -> Size<Length> {
        Size::new(Length::Fill, Length::Fill)
    }

    fn layout(
        &mut self,
        tree: &mut widget::Tree,
        renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        let bounds = limits.width(Length::Fill).height(Length::Fill).max();
        let card_limits = layout::Limits::new(Size::ZERO, bounds);

        let nodes: Vec<layout::Node> = self
            .cards
            .iter_mut()
            .zip(tree.children.iter_mut())
            .map(|(card, state)| card.as_widget_mut().layout(state, renderer, &card_limits))
            .collect();
        let sizes: Vec<Size> = nodes.iter().map(layout::Node::size).collect();
        let origins = place(
            bounds,
            &sizes,
            &self.slots,
            self.spread,
            self.spacing,
            self.bottom_padding,
        );

        layout::Node::with_children(
            bounds,
            nodes
                .into_iter()
                .zip(origins)
                .map(|(node, origin)| node.move_to(origin))
                .collect(),
        )
    }

    fn children(&self) -> Vec<widget::Tree> {
        self.cards.iter().map(widget::Tree::new).collect()
    }

    fn diff(&self, tree: &mut widget::Tree) {
        tree.diff_children(&self.cards);
    }

    fn draw(
        &self,
        tree: &widget::Tree,
        renderer: &mut Renderer,
        theme: &Theme,
        style: &renderer::Style,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
    ) {
        let cards = self.cards.iter().zip(&tree.children).zip(layout.children());

        // Every card above the first is drawn on its own layer.
        for (index, ((card, state), layout)) in cards.enumerate() {
            if index == 0 {
                card.as_widget()
                    .draw(state, renderer, theme, style, layout, cursor, viewport);
            } else {
                renderer.with_layer(*viewport, |renderer| {
                    card.as_widget()
                        .draw(state, renderer, theme, style, layout, cursor, viewport);
                });
            }
        }
    }

    fn update(
        &mut self,
        tree: &mut widget::Tree,
        event: &Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        renderer: &Renderer,
        clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Message>,
        viewport: &Rectangle,
    ) {
        let cards = self
            .cards
            .iter_mut()
            .zip(tree.children.iter_mut())
            .zip(layout.children())
            .rev();

        for ((card, state), layout) in cards {
            card.as_widget_mut().update(
                state, event, layout, cursor, renderer, clipboard, shell, viewport,
            );
            if shell.is_event_captured() {
                return;
            }
        }
    }

    fn mouse_interaction(
        &self,
        tree: &widget::Tree,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
        renderer: &Renderer,
    ) -> mouse::Interaction {
        self.cards
            .iter()
            .zip(&tree.children)
            .zip(layout.children())
            .rev()
            .map(|((card, state), layout)| {
                card.as_widget()
                    .mouse_interaction(state, layout, cursor, viewport, renderer)
            })
            .find(|interaction| *interaction != mouse::Interaction::None)
            .unwrap_or(mouse::Interaction::None)
    }

    fn operate(
        &mut self,
        tree: &mut widget::Tree,
        layout: Layout<'_>,
        renderer: &Renderer,
        operation: &mut dyn widget::Operation,
    ) {
        for ((card, state), layout) in self
            .cards
            .iter_mut()
            .zip(tree.children.iter_mut())
            .zip(layout.children())
        {
            card.as_widget_mut().operate(state, layout, renderer, operation);
        }
    }
}

impl<'a, Message, Theme, Renderer> From<Deck<'a, Message, Theme, Renderer>>
    for Element<'a, Message, Theme, Renderer>
where
    Message: 'a,
    Theme: 'a,
    Renderer: renderer::Renderer + 'a,
{
    fn from(deck: Deck<'a, Message, Theme, Renderer>) -> Self {
        Self::new(deck)
    }
}
