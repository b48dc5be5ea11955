// SPDX-License-Identifier: MPL-2.0
//! The toast stack overlay.
//!
//! [`ToastStack`] is the overlay's local state: the collapsed/expanded mode
//! and the motions in flight. It never owns toasts. The host lends the
//! [`ToastCollection`] by reference: `&` to [`ToastStack::view`] and
//! `&mut` to [`ToastStack::update`]. Changes made elsewhere reach the stack
//! through its collection subscription and are folded in by
//! [`ToastStack::sync`].
//!
//! Every animation is sampled against the instant of the last processed
//! message, so `view` stays a pure function of state.

use super::card::Card;
use super::collection::{CollectionEvent, ToastCollection};
use super::deck::{Deck, Slot};
use super::gesture::{self, DragOutcome};
use super::layout::{self, Mode, Pose, Resting};
use super::toast::{Toast, ToastId};
use super::transition::{lerp, Curve, Motion, Transition};
use crate::ui::design_tokens::{opacity, palette};
use crossbeam_channel::Receiver;
use iced::widget::{container, mouse_area, Space, Stack as Layers};
use iced::{window, Color, Element, Length, Subscription};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Tunables of the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackConfig {
    /// Leftward projected distance past which a released card is dismissed.
    pub dismiss_threshold: f32,
    /// Gap between cards in the expanded list.
    pub expanded_spacing: f32,
    /// Distance between the bottom edge and the front card.
    pub bottom_padding: f32,
    /// Duration of bouncy transitions.
    pub animation: Duration,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            dismiss_threshold: gesture::DISMISS_THRESHOLD,
            expanded_spacing: 10.0,
            bottom_padding: 15.0,
            animation: Curve::Bouncy.default_duration(),
        }
    }
}

/// Messages produced by the overlay and by toast content.
#[derive(Debug, Clone)]
pub enum Message {
    /// A card was clicked without dragging.
    Tapped,
    /// The scrim behind the expanded list was clicked.
    ScrimPressed,
    /// A card is being dragged horizontally.
    DragChanged { id: ToastId, translation_x: f32 },
    /// A drag ended with the given translation and release velocity.
    DragEnded {
        id: ToastId,
        translation_x: f32,
        velocity_x: f32,
    },
    /// A drag was interrupted (pointer lost).
    DragCancelled(ToastId),
    /// Remove the toast with this id.
    Dismiss(ToastId),
    /// Animation frame.
    Tick(Instant),
}

/// Interpolation of every live card between two layouts.
#[derive(Debug)]
struct Restack {
    motion: Motion,
    from: HashMap<ToastId, Resting>,
    from_spread: f32,
}

/// A dragged card returning to rest.
#[derive(Debug, Clone, Copy)]
struct Reset {
    from_x: f32,
    motion: Motion,
}

/// A removed toast playing its exit animation.
#[derive(Debug)]
struct Departure {
    toast: Toast,
    resting: Resting,
    offset_x: f32,
    rank: usize,
    motion: Motion,
}

/// Overlay state for one presentation context: mode, motions in flight and
/// the subscription to the host's [`ToastCollection`].
#[derive(Debug)]
pub struct ToastStack {
    config: StackConfig,
    mode: Mode,
    events: Receiver<CollectionEvent>,
    restack: Option<Restack>,
    resets: HashMap<ToastId, Reset>,
    departures: Vec<Departure>,
    /// Ranks of live toasts as of the last sync.
    ranks: HashMap<ToastId, usize>,
    now: Instant,
}

impl ToastStack {
    /// Creates an overlay observing `collection`.
    pub fn new(collection: &mut ToastCollection, config: StackConfig) -> Self {
        let len = collection.len();
        let ranks = collection
            .iter()
            .enumerate()
            .map(|(position, toast)| (toast.id(), layout::rank(position, len)))
            .collect();

        Self {
            config,
            mode: Mode::default(),
            events: collection.subscribe(),
            restack: None,
            resets: HashMap::new(),
            departures: Vec::new(),
            ranks,
            now: Instant::now(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.mode == Mode::Expanded
    }

    /// Whether any motion is still running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.restack.is_some() || !self.resets.is_empty() || !self.departures.is_empty()
    }

    /// Nothing to draw and nothing to interact with.
    #[must_use]
    pub fn is_idle(&self, collection: &ToastCollection) -> bool {
        collection.is_empty() && self.departures.is_empty()
    }

    /// Ids of toasts still playing their exit animation.
    #[must_use]
    pub fn departing(&self) -> Vec<ToastId> {
        self.departures.iter().map(|d| d.toast.id()).collect()
    }

    /// Frame ticks, only while something moves.
    pub fn subscription(&self) -> Subscription<Message> {
        if self.is_animating() {
            window::frames().map(Message::Tick)
        } else {
            Subscription::none()
        }
    }

    pub fn update(&mut self, message: Message, collection: &mut ToastCollection) {
        let now = match message {
            Message::Tick(at) => at,
            _ => Instant::now(),
        };
        self.update_at(message, collection, now);
    }

    /// [`ToastStack::update`] with an explicit clock.
    pub fn update_at(&mut self, message: Message, collection: &mut ToastCollection, now: Instant) {
        self.now = self.now.max(now);
        self.sync_at(collection, now);

        match message {
            Message::Tapped => {
                let mode = self.mode.toggled();
                self.set_mode(mode, collection, now);
            }
            Message::ScrimPressed => self.set_mode(Mode::Collapsed, collection, now),
            Message::DragChanged { id, translation_x } => {
                let _ = collection.set_offset(id, gesture::drag_offset(translation_x));
            }
            Message::DragEnded {
                id,
                translation_x,
                velocity_x,
            } => {
                let outcome =
                    gesture::release(translation_x, velocity_x, self.config.dismiss_threshold);
                tracing::debug!(toast_id = %id, translation_x, velocity_x, ?outcome, "drag released");
                match outcome {
                    DragOutcome::Dismiss => {
                        let _ = collection.dismiss(id);
                    }
                    DragOutcome::Restore => {
                        let _ = collection.reset_offset(id);
                    }
                }
            }
            Message::DragCancelled(id) => {
                let _ = collection.reset_offset(id);
            }
            Message::Dismiss(id) => {
                let _ = collection.dismiss(id);
            }
            Message::Tick(_) => self.prune(now),
        }

        self.sync_at(collection, now);
    }

    /// Folds pending collection events into the overlay.
    ///
    /// The host calls this after mutating the collection outside
    /// [`ToastStack::update`].
    pub fn sync(&mut self, collection: &ToastCollection) {
        let now = Instant::now();
        self.now = self.now.max(now);
        self.sync_at(collection, now);
    }

    /// [`ToastStack::sync`] with an explicit clock.
    pub fn sync_at(&mut self, collection: &ToastCollection, now: Instant) {
        let events: Vec<CollectionEvent> = self.events.try_iter().collect();
        let must_collapse = collection.is_empty() && self.mode == Mode::Expanded;
        if events.is_empty() && !must_collapse {
            return;
        }

        let mut from = self.displayed(now);
        let from_spread = self.spread_at(now);
        let mut curve = None;

        for event in events {
            match event {
                CollectionEvent::Inserted { id, transition } => {
                    let Some(transition) = animating(transition, id) else {
                        continue;
                    };
                    if let Some(rank) = collection.rank(id) {
                        from.insert(id, Resting::for_rank(self.mode, rank).entering());
                        curve = Some(transition.curve);
                    }
                }
                CollectionEvent::Removed { toast, transition } => {
                    let id = toast.id();
                    let offset_x = self.offset_x(&toast, now);
                    self.resets.remove(&id);
                    let Some(transition) = animating(transition, id) else {
                        continue;
                    };

                    let rank = self.ranks.get(&id).copied().unwrap_or(0);
                    let resting = from
                        .get(&id)
                        .copied()
                        .unwrap_or_else(|| Resting::for_rank(self.mode, rank));
                    self.departures.push(Departure {
                        toast,
                        resting,
                        offset_x,
                        rank,
                        motion: self.motion(transition.curve, now),
                    });
                    curve = Some(transition.curve);
                }
                CollectionEvent::OffsetChanged {
                    id,
                    from: from_x,
                    transition,
                    ..
                } => match animating(transition, id) {
                    Some(transition) => {
                        let motion = self.motion(transition.curve, now);
                        self.resets.insert(id, Reset { from_x, motion });
                    }
                    None => {
                        self.resets.remove(&id);
                    }
                },
            }
        }

        if collection.is_empty() && self.mode == Mode::Expanded {
            tracing::debug!("toast stack emptied, collapsing");
            self.mode = Mode::Collapsed;
            curve.get_or_insert(Curve::Bouncy);
        }

        let len = collection.len();
        self.ranks = collection
            .iter()
            .enumerate()
            .map(|(position, toast)| (toast.id(), layout::rank(position, len)))
            .collect();

        if let Some(curve) = curve {
            self.restack = Some(Restack {
                motion: self.motion(curve, now),
                from,
                from_spread,
            });
        }
    }

    /// Current pose of a live or departing toast.
    #[must_use]
    pub fn pose(&self, collection: &ToastCollection, id: ToastId) -> Option<Pose> {
        self.pose_at(collection, id, self.now)
    }

    /// Pose of a live or departing toast sampled at `now`.
    #[must_use]
    pub fn pose_at(&self, collection: &ToastCollection, id: ToastId, now: Instant) -> Option<Pose> {
        if let Some(position) = collection.position(id) {
            let toast = collection.iter().nth(position)?;
            let rank = layout::rank(position, collection.len());
            return Some(Pose::new(
                self.resting_at(id, rank, now),
                self.offset_x(toast, now),
            ));
        }

        self.departures
            .iter()
            .find(|departure| departure.toast.id() == id)
            .map(|departure| departure.pose(now))
    }

    /// How far apart the cards currently are: 0 stacked, 1 listed.
    #[must_use]
    pub fn spread_at(&self, now: Instant) -> f32 {
        let target = self.mode.spread();
        match &self.restack {
            Some(restack) => {
                lerp(restack.from_spread, target, restack.motion.progress(now)).max(0.0)
            }
            None => target,
        }
    }

    pub fn view<'a>(&'a self, collection: &'a ToastCollection) -> Element<'a, Message> {
        let now = self.now;
        let spread = self.spread_at(now);

        let cards = self
            .entries(collection, now)
            .into_iter()
            .map(|(toast, slot, pose)| {
                let card: Element<'a, Message> =
                    Card::new(toast.id(), pose, toast.content().render())
                        .interactive(!toast.is_deleting())
                        .into();
                (slot, card)
            });

        let deck = Deck::with_cards(cards)
            .spread(spread)
            .spacing(self.config.expanded_spacing)
            .bottom_padding(self.config.bottom_padding);

        // The scrim layer is always present to keep the deck's tree position.
        let scrim: Element<'a, Message> = if spread > 0.0 {
            let alpha = opacity::OVERLAY_MEDIUM * spread.min(1.0);
            mouse_area(
                container(Space::new())
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .style(move |_theme| container::Style {
                        background: Some(Color { a: alpha, ..palette::BLACK }.into()),
                        ..container::Style::default()
                    }),
            )
            .on_press(Message::ScrimPressed)
            .into()
        } else {
            Space::new().into()
        };

        Layers::with_children([scrim, deck.into()])
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Cards in drawing order, bottom first.
    fn entries<'a>(
        &'a self,
        collection: &'a ToastCollection,
        now: Instant,
    ) -> Vec<(&'a Toast, Slot, Pose)> {
        let len = collection.len();
        let live = collection.iter().enumerate().map(|(position, toast)| {
            let rank = layout::rank(position, len);
            let pose = Pose::new(self.resting_at(toast.id(), rank, now), self.offset_x(toast, now));
            (toast, Slot::live(rank).at(pose.list_rank), pose)
        });

        let departing = self.departures.iter().map(|departure| {
            let pose = departure.pose(now);
            let slot = Slot::departing(departure.rank).at(pose.list_rank);
            (&departure.toast, slot, pose)
        });

        // Toasts being deleted are drawn above the rest and ignore input.
        let mut entries: Vec<_> = live.chain(departing).collect();
        entries.sort_by_key(|(toast, ..)| toast.is_deleting());
        entries
    }

    fn set_mode(&mut self, mode: Mode, collection: &ToastCollection, now: Instant) {
        if mode == self.mode || (mode == Mode::Expanded && collection.is_empty()) {
            return;
        }
        tracing::debug!(?mode, "toast stack mode changed");

        let from = self.displayed(now);
        let from_spread = self.spread_at(now);
        self.mode = mode;
        self.restack = Some(Restack {
            motion: self.motion(Curve::Bouncy, now),
            from,
            from_spread,
        });
    }

    fn prune(&mut self, now: Instant) {
        if self
            .restack
            .as_ref()
            .is_some_and(|restack| restack.motion.is_finished(now))
        {
            self.restack = None;
        }
        self.resets.retain(|_, reset| !reset.motion.is_finished(now));
        self.departures
            .retain(|departure| !departure.motion.is_finished(now));
    }

    fn motion(&self, curve: Curve, now: Instant) -> Motion {
        let duration = match curve {
            Curve::Bouncy => self.config.animation,
            other => other.default_duration(),
        };
        Motion::new(curve, duration, now)
    }

    fn resting_at(&self, id: ToastId, rank: usize, now: Instant) -> Resting {
        let target = Resting::for_rank(self.mode, rank);
        match &self.restack {
            Some(restack) => match restack.from.get(&id) {
                Some(from) => from.lerp(target, restack.motion.progress(now)),
                None => target,
            },
            None => target,
        }
    }

    fn offset_x(&self, toast: &Toast, now: Instant) -> f32 {
        match self.resets.get(&toast.id()) {
            Some(reset) => lerp(reset.from_x, toast.offset_x(), reset.motion.progress(now)),
            None => toast.offset_x(),
        }
    }

    /// Poses of the live toasts as they are drawn right now.
    fn displayed(&self, now: Instant) -> HashMap<ToastId, Resting> {
        self.ranks
            .iter()
            .map(|(id, rank)| (*id, self.resting_at(*id, *rank, now)))
            .collect()
    }
}

/// The transition carried by an event, if it animates `id`.
fn animating(transition: Option<Transition>, id: ToastId) -> Option<Transition> {
    let transition = transition.filter(|transition| transition.affects(id))?;
    tracing::trace!(
        toast_id = %id,
        kind = ?transition.kind,
        curve = ?transition.curve,
        "animating toast"
    );
    Some(transition)
}

impl Departure {
    fn pose(&self, now: Instant) -> Pose {
        Pose::new(self.resting, self.offset_x).exiting(self.motion.progress(now))
    }
}
