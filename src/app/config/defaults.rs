// SPDX-License-Identifier: MPL-2.0
//! Default values and bounds for the `[toasts]` settings.

// ==========================================================================
// Gesture
// ==========================================================================

/// Default leftward projected distance (logical px) that dismisses a toast.
pub const DEFAULT_DISMISS_THRESHOLD: f32 = crate::ui::toasts::gesture::DISMISS_THRESHOLD;

/// Minimum dismiss threshold.
pub const MIN_DISMISS_THRESHOLD: f32 = 50.0;

/// Maximum dismiss threshold.
pub const MAX_DISMISS_THRESHOLD: f32 = 1000.0;

// ==========================================================================
// Layout
// ==========================================================================

/// Default gap between toasts in the expanded list.
pub const DEFAULT_EXPANDED_SPACING: f32 = 10.0;

/// Maximum gap between toasts in the expanded list.
pub const MAX_EXPANDED_SPACING: f32 = 64.0;

/// Default distance between the window bottom and the front toast.
pub const DEFAULT_BOTTOM_PADDING: f32 = 15.0;

/// Maximum distance between the window bottom and the front toast.
pub const MAX_BOTTOM_PADDING: f32 = 200.0;

// ==========================================================================
// Animation
// ==========================================================================

/// Default duration of bouncy transitions, in milliseconds.
pub const DEFAULT_ANIMATION_MS: u64 = 500;

/// Shortest allowed transition. Zero disables animation.
pub const MIN_ANIMATION_MS: u64 = 0;

/// Longest allowed transition.
pub const MAX_ANIMATION_MS: u64 = 3000;

const _: () = {
    assert!(DEFAULT_DISMISS_THRESHOLD >= MIN_DISMISS_THRESHOLD);
    assert!(DEFAULT_DISMISS_THRESHOLD <= MAX_DISMISS_THRESHOLD);
    assert!(DEFAULT_EXPANDED_SPACING <= MAX_EXPANDED_SPACING);
    assert!(DEFAULT_BOTTOM_PADDING <= MAX_BOTTOM_PADDING);
    assert!(DEFAULT_ANIMATION_MS <= MAX_ANIMATION_MS);
};
