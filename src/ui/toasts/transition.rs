// SPDX-License-Identifier: MPL-2.0
//! Explicit transition descriptors and easing curves.
//!
//! Every animated collection mutation carries a [`Transition`] naming the
//! curve and the toasts it affects. The stack turns descriptors into
//! [`Motion`]s and samples them on each frame, so interpolation is
//! deterministic for a given start instant.

use super::toast::ToastId;
use std::time::{Duration, Instant};

/// Damping ratio of the bouncy spring (a 0.3 "bounce").
const BOUNCY_DAMPING: f32 = 0.7;

/// Easing curve of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Curve {
    /// Underdamped spring with a small overshoot.
    #[default]
    Bouncy,
    /// Cubic ease-in-out.
    Smooth,
    /// Constant speed.
    Linear,
}

impl Curve {
    /// Duration used when nothing overrides it.
    #[must_use]
    pub fn default_duration(self) -> Duration {
        match self {
            Curve::Bouncy => Duration::from_millis(500),
            Curve::Smooth => Duration::from_millis(350),
            Curve::Linear => Duration::from_millis(250),
        }
    }

    /// Maps linear progress in `[0, 1]` to eased progress.
    ///
    /// The result starts at 0 and ends at exactly 1. The bouncy curve may
    /// briefly exceed 1 in between.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Curve::Linear => t,
            Curve::Smooth => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
            Curve::Bouncy => {
                let omega = std::f32::consts::TAU;
                let zeta = BOUNCY_DAMPING;
                let omega_d = omega * (1.0 - zeta * zeta).sqrt();
                let envelope = (-zeta * omega * t).exp();
                1.0 - envelope
                    * ((omega_d * t).cos() + (zeta * omega / omega_d) * (omega_d * t).sin())
            }
        }
    }
}

/// What a transition animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Toasts slide in from below the anchor edge.
    Insert,
    /// Toasts slide out toward the leading edge.
    Remove,
    /// A dragged toast returns to its resting position.
    ResetOffset,
}

/// A request to animate a change, attached to the mutation that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub curve: Curve,
    pub kind: TransitionKind,
    pub ids: Vec<ToastId>,
}

impl Transition {
    pub fn new(curve: Curve, kind: TransitionKind, ids: Vec<ToastId>) -> Self {
        Self { curve, kind, ids }
    }

    /// Whether `id` is part of this transition.
    #[must_use]
    pub fn affects(&self, id: ToastId) -> bool {
        self.ids.contains(&id)
    }
}

/// A running animation: a curve sampled between two instants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    curve: Curve,
    started_at: Instant,
    duration: Duration,
}

impl Motion {
    pub fn new(curve: Curve, duration: Duration, started_at: Instant) -> Self {
        Self {
            curve,
            started_at,
            duration,
        }
    }

    /// Linear progress in `[0, 1]`.
    #[must_use]
    pub fn linear_progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Eased progress.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        self.curve.apply(self.linear_progress(now))
    }

    #[must_use]
    pub fn is_finished(&self, now: Instant) -> bool {
        self.linear_progress(now) >= 1.0
    }
}

/// Linear interpolation between `from` and `to`.
#[must_use]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, F32_EPSILON};

    #[test]
    fn curves_start_at_zero_and_end_at_one() {
        for curve in [Curve::Bouncy, Curve::Smooth, Curve::Linear] {
            assert_abs_diff_eq!(curve.apply(0.0), 0.0, epsilon = F32_EPSILON);
            assert_abs_diff_eq!(curve.apply(1.0), 1.0, epsilon = F32_EPSILON);
        }
    }

    #[test]
    fn apply_clamps_out_of_range_input() {
        assert_abs_diff_eq!(Curve::Smooth.apply(-3.0), 0.0, epsilon = F32_EPSILON);
        assert_abs_diff_eq!(Curve::Smooth.apply(7.0), 1.0, epsilon = F32_EPSILON);
    }

    #[test]
    fn smooth_is_symmetric_around_midpoint() {
        assert_abs_diff_eq!(Curve::Smooth.apply(0.5), 0.5, epsilon = F32_EPSILON);
        let a = Curve::Smooth.apply(0.25);
        let b = Curve::Smooth.apply(0.75);
        assert_abs_diff_eq!(a + b, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn bouncy_overshoots_before_settling() {
        let peak = (1..100)
            .map(|i| Curve::Bouncy.apply(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0, "bouncy curve should overshoot, peak = {peak}");
        assert!(peak < 1.1, "overshoot should stay small, peak = {peak}");
    }

    #[test]
    fn motion_progress_follows_elapsed_time() {
        let start = Instant::now();
        let motion = Motion::new(Curve::Linear, Duration::from_millis(200), start);

        assert_abs_diff_eq!(motion.progress(start), 0.0, epsilon = F32_EPSILON);
        assert_abs_diff_eq!(
            motion.progress(start + Duration::from_millis(100)),
            0.5,
            epsilon = 1e-4
        );
        assert!(!motion.is_finished(start + Duration::from_millis(199)));
        assert!(motion.is_finished(start + Duration::from_millis(200)));
        assert_abs_diff_eq!(
            motion.progress(start + Duration::from_secs(5)),
            1.0,
            epsilon = F32_EPSILON
        );
    }

    #[test]
    fn zero_duration_motion_is_immediately_finished() {
        let start = Instant::now();
        let motion = Motion::new(Curve::Bouncy, Duration::ZERO, start);
        assert!(motion.is_finished(start));
        assert_abs_diff_eq!(motion.progress(start), 1.0, epsilon = F32_EPSILON);
    }

    #[test]
    fn progress_before_start_is_zero() {
        let now = Instant::now();
        let motion = Motion::new(
            Curve::Linear,
            Duration::from_millis(100),
            now + Duration::from_millis(50),
        );
        assert_abs_diff_eq!(motion.progress(now), 0.0, epsilon = F32_EPSILON);
    }

    #[test]
    fn transition_reports_affected_ids() {
        let toast = crate::ui::toasts::Toast::new(|_| crate::ui::toasts::Plain::new("x"));
        let other = crate::ui::toasts::Toast::new(|_| crate::ui::toasts::Plain::new("y"));
        let transition = Transition::new(Curve::Bouncy, TransitionKind::Insert, vec![toast.id()]);

        assert!(transition.affects(toast.id()));
        assert!(!transition.affects(other.id()));
    }

    #[test]
    fn lerp_interpolates() {
        assert_abs_diff_eq!(lerp(0.0, 10.0, 0.25), 2.5, epsilon = F32_EPSILON);
        assert_abs_diff_eq!(lerp(-30.0, 0.0, 1.0), 0.0, epsilon = F32_EPSILON);
    }
}
