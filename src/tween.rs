//! Scalar tween for the `uProgress` uniform.
//!
//! Times are milliseconds on the page's `performance.now()` clock, which is also
//! the clock `requestAnimationFrame` hands to the render loop.

use serde::{Deserialize, Serialize};

pub const DEFAULT_DURATION_MS: f64 = 1000.0;

/// Easing curves, named the way GSAP names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Ease {
    #[serde(rename = "linear", alias = "none")]
    Linear,
    #[serde(rename = "power2.in")]
    Power2In,
    #[default]
    #[serde(rename = "power2.out")]
    Power2Out,
    #[serde(rename = "power2.inOut")]
    Power2InOut,
}

impl Ease {
    /// Maps linear time `t` in [0, 1] to eased progress in [0, 1].
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power2In => t * t,
            Ease::Power2Out => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::Power2InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    start_ms: f64,
    duration_ms: f64,
    ease: Ease,
}

impl Tween {
    /// A tween resting at `value`.
    pub fn at_rest(value: f32, duration_ms: f64, ease: Ease) -> Self {
        Self {
            from: value,
            to: value,
            start_ms: 0.0,
            duration_ms: duration_ms.max(0.0),
            ease,
        }
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn value_at(&self, now_ms: f64) -> f32 {
        let t = self.linear_progress(now_ms);
        let eased = self.ease.apply(t);
        self.from + (self.to - self.from) * eased as f32
    }

    pub fn is_finished(&self, now_ms: f64) -> bool {
        self.linear_progress(now_ms) >= 1.0
    }

    /// Starts animating from the current value towards `to`.
    ///
    /// Returns `false` and leaves the running tween alone when it is already
    /// heading for `to`.
    pub fn retarget(&mut self, to: f32, now_ms: f64) -> bool {
        if self.to == to {
            return false;
        }
        self.from = self.value_at(now_ms);
        self.to = to;
        self.start_ms = now_ms;
        true
    }

    fn linear_progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn eases_hit_their_endpoints() {
        for ease in [
            Ease::Linear,
            Ease::Power2In,
            Ease::Power2Out,
            Ease::Power2InOut,
        ] {
            assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
            assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
        }
    }

    #[test]
    fn power2_out_is_fast_then_slow() {
        assert!((Ease::Power2Out.apply(0.5) - 0.75).abs() < 1e-12);
        let mut last = 0.0;
        for i in 1..=100 {
            let v = Ease::Power2Out.apply(f64::from(i) / 100.0);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn tween_runs_from_zero_to_one_over_duration() {
        let mut tween = Tween::at_rest(0.0, 1000.0, Ease::Power2Out);
        assert!(tween.retarget(1.0, 500.0));
        assert!(close(tween.value_at(500.0), 0.0));
        assert!(close(tween.value_at(1000.0), 0.75));
        assert!(close(tween.value_at(1500.0), 1.0));
        assert!(close(tween.value_at(9000.0), 1.0));
        assert!(tween.is_finished(1500.0));
        assert!(!tween.is_finished(1499.0));
    }

    #[test]
    fn retarget_mid_flight_starts_from_current_value() {
        let mut tween = Tween::at_rest(0.0, 1000.0, Ease::Linear);
        tween.retarget(1.0, 0.0);
        let mid = tween.value_at(400.0);
        assert!(tween.retarget(0.0, 400.0));
        assert!(close(tween.value_at(400.0), mid));
        assert!(close(tween.value_at(1400.0), 0.0));
    }

    #[test]
    fn retarget_to_same_target_keeps_running_tween() {
        let mut tween = Tween::at_rest(0.0, 1000.0, Ease::Linear);
        tween.retarget(1.0, 0.0);
        assert!(!tween.retarget(1.0, 300.0));
        assert!(close(tween.value_at(500.0), 0.5));
    }

    #[test]
    fn zero_duration_jumps() {
        let mut tween = Tween::at_rest(0.0, 0.0, Ease::Power2Out);
        tween.retarget(1.0, 10.0);
        assert_eq!(tween.value_at(10.0), 1.0);
    }

    #[test]
    fn ease_names_match_gsap() {
        let ease: Ease = serde_json::from_str("\"power2.out\"").unwrap();
        assert_eq!(ease, Ease::Power2Out);
        let ease: Ease = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(ease, Ease::Linear);

        let linear = serde_json::to_string(&Ease::Linear).unwrap();
        assert_eq!(linear, "\"linear\"");
        let in_out = serde_json::to_string(&Ease::Power2InOut).unwrap();
        assert_eq!(in_out, "\"power2.inOut\"");
    }
}
