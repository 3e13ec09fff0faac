//=========================================================================
// Easing
//=========================================================================
//
// Pure functions mapping normalized progress to eased progress.
//
// Used by the frame-stepped animation strategy directly and by the
// sequence primitive for each of its tracks.
//
//=========================================================================

//=== External Dependencies ===============================================

use serde::Deserialize;

//=== Easing ==============================================================

/// Easing curve selector for window transitions.
///
/// Deserializes from snake_case names (`"ease_in_out"`) so it can be
/// authored in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Output equals input.
    Linear,

    /// Quadratic, starts slow.
    EaseIn,

    /// Quadratic, ends slow.
    EaseOut,

    /// Quadratic on both ends.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Evaluates the curve at `t`.
    ///
    /// Input is not clamped; callers feed normalized progress.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Self::Linear => linear(t),
            Self::EaseIn => ease_in(t),
            Self::EaseOut => ease_out(t),
            Self::EaseInOut => ease_in_out(t),
        }
    }
}

//=== Curve Functions =====================================================

#[inline]
pub fn linear(t: f32) -> f32 {
    t
}

#[inline]
pub fn ease_in(t: f32) -> f32 {
    t * t
}

#[inline]
pub fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

//=== Interpolation =======================================================

/// Linear interpolation without clamping `t`.
#[inline]
pub fn lerp_unclamped(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ALL: [Easing; 4] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
    ];

    #[test]
    fn ease_in_endpoints() {
        assert_relative_eq!(ease_in(0.0), 0.0);
        assert_relative_eq!(ease_in(1.0), 1.0);
    }

    #[test]
    fn ease_out_midpoint() {
        assert_relative_eq!(ease_out(0.5), 0.75);
    }

    #[test]
    fn ease_in_out_midpoint() {
        assert_relative_eq!(ease_in_out(0.5), 0.5);
        assert_relative_eq!(ease_in_out(0.25), 0.125);
        assert_relative_eq!(ease_in_out(0.75), 0.875);
    }

    #[test]
    fn all_curves_hit_both_endpoints() {
        for easing in ALL {
            assert_relative_eq!(easing.apply(0.0), 0.0);
            assert_relative_eq!(easing.apply(1.0), 1.0);
        }
    }

    #[test]
    fn all_curves_are_monotonic_on_unit_interval() {
        for easing in ALL {
            let mut previous = easing.apply(0.0);
            for step in 1..=1000 {
                let value = easing.apply(step as f32 / 1000.0);
                assert!(
                    value >= previous,
                    "{:?} decreased at step {}: {} < {}",
                    easing,
                    step,
                    value,
                    previous
                );
                previous = value;
            }
        }
    }

    #[test]
    fn default_is_ease_in_out() {
        assert_eq!(Easing::default(), Easing::EaseInOut);
    }

    #[test]
    fn lerp_does_not_clamp() {
        assert_relative_eq!(lerp_unclamped(0.0, 1.0, 0.5), 0.5);
        assert_relative_eq!(lerp_unclamped(1.0, 0.0, 0.25), 0.75);
        assert_relative_eq!(lerp_unclamped(0.0, 2.0, 1.5), 3.0);
    }

    #[test]
    fn deserializes_from_snake_case() {
        #[derive(Deserialize)]
        struct Holder {
            easing: Easing,
        }

        let holder: Holder = toml::from_str("easing = \"ease_out\"").unwrap();
        assert_eq!(holder.easing, Easing::EaseOut);
    }
}
