// SPDX-License-Identifier: MPL-2.0
//! Swipe-to-dismiss gesture.
//!
//! [`DragTracker`] turns raw pointer samples into a tap or a horizontal drag
//! with a release velocity. The free functions decide what a drag does to
//! the card.

use iced::Point;
use std::time::{Duration, Instant};

/// Default leftward projected distance past which a released card is dismissed.
pub const DISMISS_THRESHOLD: f32 = 200.0;

/// Pointer travel below which a press-release pair still counts as a tap.
pub const TAP_SLOP: f32 = 4.0;

/// A pointer resting longer than this before release carries no velocity.
pub const VELOCITY_WINDOW: Duration = Duration::from_millis(100);

/// Offset shown while dragging: only leftward movement is reflected.
#[must_use]
pub fn drag_offset(translation_x: f32) -> f32 {
    translation_x.min(0.0)
}

/// Where the card would come to rest if the fling carried on for half a second.
#[must_use]
pub fn projected_displacement(translation_x: f32, velocity_x: f32) -> f32 {
    translation_x + velocity_x / 2.0
}

/// What happens to a card when the pointer lets go of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Flung far enough to the left: remove the toast.
    Dismiss,
    /// Snap back to the resting position.
    Restore,
}

/// Decides the fate of a released card.
#[must_use]
pub fn release(translation_x: f32, velocity_x: f32, threshold: f32) -> DragOutcome {
    if -projected_displacement(translation_x, velocity_x) > threshold {
        DragOutcome::Dismiss
    } else {
        DragOutcome::Restore
    }
}

/// A finished pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Tap,
    Drag {
        translation_x: f32,
        /// Horizontal velocity in logical pixels per second.
        velocity_x: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Sample {
    position: Point,
    at: Instant,
}

/// Tracks one pointer from press to release.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    origin: Option<Sample>,
    previous: Option<Sample>,
    latest: Option<Sample>,
    dragging: bool,
}

impl DragTracker {
    /// Starts tracking at `position`.
    pub fn press(&mut self, position: Point, now: Instant) {
        let sample = Sample { position, at: now };
        self.origin = Some(sample);
        self.previous = None;
        self.latest = Some(sample);
        self.dragging = false;
    }

    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.origin.is_some()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Records a pointer move.
    ///
    /// Returns the horizontal translation once the pointer has left the tap
    /// slop, `None` while it is still a potential tap or nothing is pressed.
    pub fn moved(&mut self, position: Point, now: Instant) -> Option<f32> {
        let origin = self.origin?;
        self.previous = self.latest;
        self.latest = Some(Sample { position, at: now });

        if !self.dragging && origin.position.distance(position) > TAP_SLOP {
            self.dragging = true;
        }

        self.dragging.then(|| position.x - origin.position.x)
    }

    /// Ends tracking and classifies the interaction.
    ///
    /// `position` is where the pointer let go, when the platform reports it.
    /// Mouse releases repeat the last cursor position, which adds no sample.
    pub fn release(&mut self, position: Option<Point>, now: Instant) -> Option<Gesture> {
        let origin = self.origin?;
        if let Some(position) = position {
            if self.latest.map(|latest| latest.position) != Some(position) {
                let _ = self.moved(position, now);
            }
        }

        let gesture = if self.dragging {
            let latest = self.latest.unwrap_or(origin);
            Gesture::Drag {
                translation_x: latest.position.x - origin.position.x,
                velocity_x: self.velocity_x(now),
            }
        } else {
            Gesture::Tap
        };
        self.cancel();
        Some(gesture)
    }

    /// Forgets the current interaction without classifying it.
    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    /// Speed between the last two samples, zero once the pointer has rested.
    fn velocity_x(&self, now: Instant) -> f32 {
        match (self.previous, self.latest) {
            (Some(previous), Some(latest))
                if now.saturating_duration_since(latest.at) <= VELOCITY_WINDOW =>
            {
                let dt = latest.at.saturating_duration_since(previous.at).as_secs_f32();
                if dt > 0.0 {
                    (latest.position.x - previous.position.x) / dt
                } else {
                    0.0
                }
            }
            _ => 0.0,
        }
    }
}
