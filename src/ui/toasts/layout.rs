// SPDX-License-Identifier: MPL-2.0
//! Stack geometry.
//!
//! Pure functions describing where each card rests. "Rank" is the visual
//! index: 0 is the most recently added toast, drawn on top of the deck.

use super::transition::lerp;
use iced::Vector;

/// Scale lost per rank in the collapsed deck.
pub const SCALE_STEP: f32 = 0.1;

/// Upward offset per rank in the collapsed deck.
pub const OFFSET_STEP: f32 = 15.0;

/// Maximum upward offset in the collapsed deck.
pub const MAX_OFFSET: f32 = 30.0;

/// Distance below the anchor edge that new cards slide in from.
pub const ENTRY_OFFSET: f32 = 100.0;

/// Rendering mode of the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Overlapping, depth-scaled deck.
    #[default]
    Collapsed,
    /// Vertically spaced list at full size.
    Expanded,
}

impl Mode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Mode::Collapsed => Mode::Expanded,
            Mode::Expanded => Mode::Collapsed,
        }
    }

    /// How far the cards are pulled apart: 0 for the deck, 1 for the list.
    #[must_use]
    pub fn spread(self) -> f32 {
        match self {
            Mode::Collapsed => 0.0,
            Mode::Expanded => 1.0,
        }
    }
}

/// Visual index of the toast at `position` in a collection of `len` toasts.
///
/// # Panics
///
/// Debug builds panic if `position` is out of range.
#[must_use]
pub fn rank(position: usize, len: usize) -> usize {
    debug_assert!(position < len, "position {position} out of range {len}");
    len - 1 - position
}

/// Collapsed-deck scale for a rank, saturating at 0 from rank 10 on.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn scale(rank: usize) -> f32 {
    1.0 - (rank as f32 * SCALE_STEP).min(1.0)
}

/// Collapsed-deck vertical offset for a rank, saturating at −30 from rank 2 on.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn offset_y(rank: usize) -> f32 {
    -(rank as f32 * OFFSET_STEP).min(MAX_OFFSET)
}

/// Distance between the anchor edge and the bottom of the card at `rank`.
///
/// `heights` are the measured card heights ordered by rank. With `spread`
/// at 0 every card sits on the anchor; at 1 they form a list separated by
/// `spacing`. Ranks past the end are placed after the last card.
#[must_use]
pub fn lift(heights: &[f32], rank: usize, spread: f32, spacing: f32) -> f32 {
    spread * heights.iter().take(rank).map(|h| h + spacing).sum::<f32>()
}

/// [`lift`] at a fractional list position, blending the two nearest ranks.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn lift_at(heights: &[f32], position: f32, spread: f32, spacing: f32) -> f32 {
    let position = position.max(0.0);
    let lower = position.floor();
    let below = lift(heights, lower as usize, spread, spacing);
    let above = lift(heights, lower as usize + 1, spread, spacing);
    lerp(below, above, position - lower)
}

/// Resting scale, vertical offset and list position of a card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resting {
    pub scale: f32,
    pub offset_y: f32,
    /// Rank used to lift the card in the list; fractional while restacking.
    pub list_rank: f32,
}

impl Resting {
    /// Where the card at `rank` rests in `mode`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn for_rank(mode: Mode, rank: usize) -> Self {
        match mode {
            Mode::Collapsed => Self {
                scale: scale(rank),
                offset_y: offset_y(rank),
                list_rank: rank as f32,
            },
            Mode::Expanded => Self {
                scale: 1.0,
                offset_y: 0.0,
                list_rank: rank as f32,
            },
        }
    }

    /// The same pose pushed below the anchor edge, for entry animations.
    #[must_use]
    pub fn entering(self) -> Self {
        Self {
            offset_y: self.offset_y + ENTRY_OFFSET,
            ..self
        }
    }

    #[must_use]
    pub fn lerp(self, to: Self, t: f32) -> Self {
        Self {
            scale: lerp(self.scale, to.scale, t),
            offset_y: lerp(self.offset_y, to.offset_y, t),
            list_rank: lerp(self.list_rank, to.list_rank, t),
        }
    }
}

/// Everything the card widget needs to draw one toast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Uniform scale, anchored at the card's bottom edge.
    pub scale: f32,
    /// Translation applied after scaling.
    pub offset: Vector,
    /// Exit progress: 0 in place, 1 fully past the leading edge.
    pub exit: f32,
    /// Position in the expanded list, see [`Resting::list_rank`].
    pub list_rank: f32,
}

impl Pose {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        offset: Vector::ZERO,
        exit: 0.0,
        list_rank: 0.0,
    };

    #[must_use]
    pub fn new(resting: Resting, offset_x: f32) -> Self {
        Self {
            scale: resting.scale,
            offset: Vector::new(offset_x, resting.offset_y),
            exit: 0.0,
            list_rank: resting.list_rank,
        }
    }

    #[must_use]
    pub fn exiting(mut self, exit: f32) -> Self {
        self.exit = exit;
        self
    }

    /// Horizontal translation once the exit slide is applied.
    ///
    /// `trailing_edge` is the x coordinate of the card's right edge; at full
    /// exit the card ends just past the container's leading edge.
    #[must_use]
    pub fn translation_x(&self, trailing_edge: f32) -> f32 {
        lerp(self.offset.x, -trailing_edge, self.exit)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}
