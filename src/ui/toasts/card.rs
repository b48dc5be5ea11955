// SPDX-License-Identifier: MPL-2.0
//! A single toast card.
//!
//! Wraps the toast content, draws it scaled and translated according to its
//! [`Pose`], and recognises taps and horizontal drags on it. Events reach
//! the content first, so buttons inside a toast keep working.

use super::gesture::{DragTracker, Gesture};
use super::layout::Pose;
use super::stack::Message;
use super::toast::ToastId;
use iced::advanced::layout::{self, Layout};
use iced::advanced::mouse;
use iced::advanced::renderer;
use iced::advanced::widget::{self, tree, Widget};
use iced::advanced::{Clipboard, Shell};
use iced::{touch, Element, Event, Length, Point, Rectangle, Size, Transformation, Vector};
use std::time::Instant;

/// Gesture state kept in the widget tree between frames.
#[derive(Debug, Default)]
struct State {
    tracker: DragTracker,
}

pub struct Card<'a, Theme, Renderer> {
    id: ToastId,
    pose: Pose,
    interactive: bool,
    content: Element<'a, Message, Theme, Renderer>,
}

impl<'a, Theme, Renderer> Card<'a, Theme, Renderer> {
    pub fn new(
        id: ToastId,
        pose: Pose,
        content: impl Into<Element<'a, Message, Theme, Renderer>>,
    ) -> Self {
        Self {
            id,
            pose,
            interactive: true,
            content: content.into(),
        }
    }

    /// Departing cards are drawn but ignore input.
    #[must_use]
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Full drawing transform: scale about the bottom-center, then translate.
    fn transformation(&self, bounds: Rectangle) -> Transformation {
        let anchor = anchor(bounds);
        let translation = translation(&self.pose, bounds);

        Transformation::translate(translation.x, translation.y)
            * Transformation::translate(anchor.x, anchor.y)
            * Transformation::scale(self.pose.scale)
            * Transformation::translate(-anchor.x, -anchor.y)
    }

    /// Cursor as seen by the content, which is laid out untransformed.
    fn local_cursor(&self, cursor: mouse::Cursor, bounds: Rectangle) -> mouse::Cursor {
        match cursor.position() {
            Some(position) => to_local(&self.pose, bounds, position)
                .map_or(mouse::Cursor::Unavailable, mouse::Cursor::Available),
            None => cursor,
        }
    }
}

/// Cards drawn smaller than this cannot be hit.
const MIN_HIT_SCALE: f32 = 0.01;

/// Point the card is scaled about.
fn anchor(bounds: Rectangle) -> Point {
    Point::new(bounds.center_x(), bounds.y + bounds.height)
}

/// Translation of the card's drawing relative to its layout slot.
fn translation(pose: &Pose, bounds: Rectangle) -> Vector {
    Vector::new(pose.translation_x(bounds.x + bounds.width), pose.offset.y)
}

/// Inverse of the drawing transform: maps a window position into the
/// card's layout space, or `None` when the card is too small to hit.
fn to_local(pose: &Pose, bounds: Rectangle, position: Point) -> Option<Point> {
    if pose.scale < MIN_HIT_SCALE {
        return None;
    }
    let anchor = anchor(bounds);
    let translation = translation(pose, bounds);

    Some(Point::new(
        anchor.x + (position.x - translation.x - anchor.x) / pose.scale,
        anchor.y + (position.y - translation.y - anchor.y) / pose.scale,
    ))
}

impl<Theme, Renderer> Widget<Message, Theme, Renderer> for Card<'_, Theme, Renderer>
where
    Renderer: renderer::Renderer,
{
    fn tag(&self) -> tree::Tag {
        tree::Tag::of::<State>()
    }

    fn state(&self) -> tree::State {
        tree::State::new(State::default())
    }

    fn size(&self) -> Size<Length> {
        self.content.as_widget().size()
    }

    fn layout(
        &mut self,
        tree: &mut widget::Tree,
        renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        self.content
            .as_widget_mut()
            .layout(&mut tree.children[0], renderer, limits)
    }

    fn children(&self) -> Vec<widget::Tree> {
        vec![widget::Tree::new(&self.content)]
    }

    fn diff(&self, tree: &mut widget::Tree) {
        tree.diff_children(std::slice::from_ref(&self.content));
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
        let bounds = layout.bounds();
        let cursor = self.local_cursor(cursor, bounds);

        renderer.with_transformation(self.transformation(bounds), |renderer| {
            self.content.as_widget().draw(
                &tree.children[0],
                renderer,
                theme,
                style,
                layout,
                cursor,
                viewport,
            );
        });
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
        if !self.interactive {
            return;
        }

        let bounds = layout.bounds();
        let local_cursor = self.local_cursor(cursor, bounds);

        self.content.as_widget_mut().update(
            &mut tree.children[0],
            event,
            layout,
            local_cursor,
            renderer,
            clipboard,
            shell,
            viewport,
        );
        if shell.is_event_captured() {
            return;
        }

        let state = tree.state.downcast_mut::<State>();
        let Some(pointer) = pointer_event(event, cursor) else {
            return;
        };

        match track(
            &mut state.tracker,
            pointer,
            local_cursor.is_over(bounds),
            Instant::now(),
        ) {
            Step::Ignored => {}
            Step::Pressed => shell.capture_event(),
            Step::Dragged(translation_x) => {
                if let Some(translation_x) = translation_x {
                    shell.publish(Message::DragChanged {
                        id: self.id,
                        translation_x,
                    });
                }
                shell.capture_event();
            }
            Step::Released(gesture) => {
                match gesture {
                    Some(Gesture::Tap) => shell.publish(Message::Tapped),
                    Some(Gesture::Drag {
                        translation_x,
                        velocity_x,
                    }) => shell.publish(Message::DragEnded {
                        id: self.id,
                        translation_x,
                        velocity_x,
                    }),
                    None => {}
                }
                shell.capture_event();
            }
            Step::Cancelled { was_dragging } => {
                if was_dragging {
                    shell.publish(Message::DragCancelled(self.id));
                }
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
        if !self.interactive {
            return mouse::Interaction::None;
        }

        let state = tree.state.downcast_ref::<State>();
        if state.tracker.is_dragging() {
            return mouse::Interaction::Grabbing;
        }

        let bounds = layout.bounds();
        let local_cursor = self.local_cursor(cursor, bounds);
        let interaction = self.content.as_widget().mouse_interaction(
            &tree.children[0],
            layout,
            local_cursor,
            viewport,
            renderer,
        );

        if interaction == mouse::Interaction::None && local_cursor.is_over(bounds) {
            mouse::Interaction::Grab
        } else {
            interaction
        }
    }

    fn operate(
        &mut self,
        tree: &mut widget::Tree,
        layout: Layout<'_>,
        renderer: &Renderer,
        operation: &mut dyn widget::Operation,
    ) {
        self.content
            .as_widget_mut()
            .operate(&mut tree.children[0], layout, renderer, operation);
    }
}

impl<'a, Theme, Renderer> From<Card<'a, Theme, Renderer>> for Element<'a, Message, Theme, Renderer>
where
    Theme: 'a,
    Renderer: renderer::Renderer + 'a,
{
    fn from(card: Card<'a, Theme, Renderer>) -> Self {
        Self::new(card)
    }
}

/// Mouse and touch input reduced to what the drag tracker needs.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Pointer {
    Pressed(Point),
    Moved(Point),
    Released(Option<Point>),
    Lost,
}

/// Effect of one pointer event on the card's gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    Ignored,
    Pressed,
    /// Pointer moved while pressed; carries the drag translation once past the slop.
    Dragged(Option<f32>),
    Released(Option<Gesture>),
    Cancelled { was_dragging: bool },
}

/// Feeds `pointer` to the tracker. `over` tells whether the press landed on
/// the card as drawn.
fn track(tracker: &mut DragTracker, pointer: Pointer, over: bool, now: Instant) -> Step {
    match pointer {
        Pointer::Pressed(position) if over => {
            tracker.press(position, now);
            Step::Pressed
        }
        Pointer::Moved(position) if tracker.is_pressed() => {
            Step::Dragged(tracker.moved(position, now))
        }
        Pointer::Released(position) if tracker.is_pressed() => {
            Step::Released(tracker.release(position, now))
        }
        Pointer::Lost if tracker.is_pressed() => {
            let was_dragging = tracker.is_dragging();
            tracker.cancel();
            Step::Cancelled { was_dragging }
        }
        _ => Step::Ignored,
    }
}

fn pointer_event(event: &Event, cursor: mouse::Cursor) -> Option<Pointer> {
    match event {
        Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
            cursor.position().map(Pointer::Pressed)
        }
        Event::Mouse(mouse::Event::CursorMoved { position }) => Some(Pointer::Moved(*position)),
        Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
            Some(Pointer::Released(cursor.position()))
        }
        Event::Mouse(mouse::Event::CursorLeft) => Some(Pointer::Lost),
        Event::Touch(touch::Event::FingerPressed { position, .. }) => {
            Some(Pointer::Pressed(*position))
        }
        Event::Touch(touch::Event::FingerMoved { position, .. }) => {
            Some(Pointer::Moved(*position))
        }
        Event::Touch(touch::Event::FingerLifted { position, .. }) => {
            Some(Pointer::Released(Some(*position)))
        }
        Event::Touch(touch::Event::FingerLost { .. }) => Some(Pointer::Lost),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, F32_EPSILON};
    use crate::ui::toasts::layout::{Mode, Resting};
    use std::time::Duration;

    #[test]
    fn left_press_uses_cursor_position() {
        let event = Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left));
        let cursor = mouse::Cursor::Available(Point::new(10.0, 20.0));
        assert_eq!(
            pointer_event(&event, cursor),
            Some(Pointer::Pressed(Point::new(10.0, 20.0)))
        );
    }

    #[test]
    fn press_without_cursor_is_ignored() {
        let event = Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left));
        assert_eq!(pointer_event(&event, mouse::Cursor::Unavailable), None);
    }

    #[test]
    fn right_button_is_ignored() {
        let event = Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Right));
        let cursor = mouse::Cursor::Available(Point::ORIGIN);
        assert_eq!(pointer_event(&event, cursor), None);
    }

    #[test]
    fn touch_lift_carries_position() {
        let event = Event::Touch(touch::Event::FingerLifted {
            id: touch::Finger(0),
            position: Point::new(5.0, 6.0),
        });
        assert_eq!(
            pointer_event(&event, mouse::Cursor::Unavailable),
            Some(Pointer::Released(Some(Point::new(5.0, 6.0))))
        );
    }

    #[test]
    fn cursor_leaving_window_cancels() {
        let event = Event::Mouse(mouse::Event::CursorLeft);
        assert_eq!(
            pointer_event(&event, mouse::Cursor::Unavailable),
            Some(Pointer::Lost)
        );
    }

    #[test]
    fn wheel_is_ignored() {
        let event = Event::Mouse(mouse::Event::WheelScrolled {
            delta: mouse::ScrollDelta::Lines { x: 0.0, y: 1.0 },
        });
        assert_eq!(pointer_event(&event, mouse::Cursor::Unavailable), None);
    }

    fn bounds() -> Rectangle {
        Rectangle::new(Point::new(40.0, 500.0), Size::new(400.0, 50.0))
    }

    #[test]
    fn hidden_deep_card_is_not_hit() {
        let pose = Pose::new(Resting::for_rank(Mode::Collapsed, 10), 0.0);
        assert_eq!(to_local(&pose, bounds(), Point::new(45.0, 475.0)), None);
    }

    #[test]
    fn scaled_card_is_hit_only_where_drawn() {
        // Rank 2: drawn at 80% about (240, 550), raised by 30.
        let pose = Pose::new(Resting::for_rank(Mode::Collapsed, 2), 0.0);

        let outside = to_local(&pose, bounds(), Point::new(60.0, 500.0)).expect("visible");
        assert!(!bounds().contains(outside));

        let inside = to_local(&pose, bounds(), Point::new(90.0, 500.0)).expect("visible");
        assert_abs_diff_eq!(inside.x, 52.5, epsilon = 1e-3);
        assert_abs_diff_eq!(inside.y, 525.0, epsilon = 1e-3);
        assert!(bounds().contains(inside));
    }

    #[test]
    fn dragged_card_cursor_follows_the_offset() {
        let pose = Pose::new(Resting::for_rank(Mode::Expanded, 0), -40.0);
        let local = to_local(&pose, bounds(), Point::new(100.0, 520.0)).expect("visible");
        assert_abs_diff_eq!(local.x, 140.0, epsilon = F32_EPSILON);
        assert_abs_diff_eq!(local.y, 520.0, epsilon = F32_EPSILON);
    }

    #[test]
    fn press_outside_the_card_is_ignored() {
        let mut tracker = DragTracker::default();
        let step = track(
            &mut tracker,
            Pointer::Pressed(Point::ORIGIN),
            false,
            Instant::now(),
        );
        assert_eq!(step, Step::Ignored);
        assert!(!tracker.is_pressed());
    }

    #[test]
    fn mouse_fling_ends_with_release_velocity() {
        let start = Instant::now();
        let mut tracker = DragTracker::default();
        let at = |x: f32| mouse::Cursor::Available(Point::new(x, 20.0));
        let mut feed = |event: Event, cursor: mouse::Cursor, ms: u64| {
            let pointer = pointer_event(&event, cursor).expect("pointer event");
            track(&mut tracker, pointer, true, start + Duration::from_millis(ms))
        };

        let pressed = Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left));
        assert_eq!(feed(pressed, at(300.0), 0), Step::Pressed);

        let moved = |x: f32| {
            Event::Mouse(mouse::Event::CursorMoved {
                position: Point::new(x, 20.0),
            })
        };
        assert_eq!(feed(moved(250.0), at(250.0), 25), Step::Dragged(Some(-50.0)));
        assert_eq!(feed(moved(200.0), at(200.0), 50), Step::Dragged(Some(-100.0)));

        // The release repeats the last cursor position.
        let released = Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left));
        match feed(released, at(200.0), 58) {
            Step::Released(Some(Gesture::Drag {
                translation_x,
                velocity_x,
            })) => {
                assert_abs_diff_eq!(translation_x, -100.0, epsilon = F32_EPSILON);
                assert_abs_diff_eq!(velocity_x, -2000.0, epsilon = 1e-1);
            }
            other => panic!("expected a drag release, got {other:?}"),
        }
    }

    #[test]
    fn click_in_place_is_a_tap() {
        let now = Instant::now();
        let mut tracker = DragTracker::default();
        let cursor = mouse::Cursor::Available(Point::new(10.0, 10.0));

        let pressed = Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left));
        let released = Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left));
        for (event, expected) in [
            (pressed, Step::Pressed),
            (released, Step::Released(Some(Gesture::Tap))),
        ] {
            let pointer = pointer_event(&event, cursor).expect("pointer event");
            assert_eq!(track(&mut tracker, pointer, true, now), expected);
        }
    }
}
