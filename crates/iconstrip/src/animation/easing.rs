//! Easing functions for smooth animations.
//!
//! Easing functions map a linear progress value (0.0 to 1.0) to a transformed
//! value that creates smoother, more natural-looking animations.

/// Natural frequency of [`Easing::Spring`], in units of the animation duration.
pub const SPRING_FREQUENCY: f32 = 10.0;

/// Initial velocity of [`Easing::Spring`], in units of the animation distance
/// per animation duration.
pub const SPRING_INITIAL_VELOCITY: f32 = 1.0;

/// Available easing functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation (no easing).
    #[default]
    Linear,
    /// Quadratic ease-in (starts slow, accelerates).
    EaseIn,
    /// Quadratic ease-out (starts fast, decelerates).
    EaseOut,
    /// Quadratic ease-in-out (smooth start and end).
    EaseInOut,
    /// Critically damped spring: no overshoot, settles exactly at 1.0.
    Spring,
}

/// Apply an easing function to a progress value.
///
/// # Example
///
/// ```
/// use iconstrip::animation::{ease, Easing};
///
/// // Linear: output equals input
/// assert_eq!(ease(Easing::Linear, 0.5), 0.5);
///
/// // Ease-out and spring: fast at the start
/// assert!(ease(Easing::EaseOut, 0.5) > 0.5);
/// assert!(ease(Easing::Spring, 0.5) > 0.9);
/// ```
#[inline]
pub fn ease(easing: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);

    match easing {
        Easing::Linear => t,
        Easing::EaseIn => t * t,
        Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
        Easing::EaseInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
            }
        }
        Easing::Spring => critically_damped_spring(t),
    }
}

/// Interpolate between two values using an easing function.
#[inline]
pub fn lerp_eased(easing: Easing, start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * ease(easing, t)
}

// Position of a unit spring released at 0 towards 1 with damping ratio 1:
// x(t) = 1 - (1 + (w - v0) t) e^(-w t)
fn critically_damped_spring(t: f32) -> f32 {
    if t >= 1.0 {
        return 1.0;
    }
    let w = SPRING_FREQUENCY;
    1.0 - (1.0 + (w - SPRING_INITIAL_VELOCITY) * t) * (-w * t).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear() {
        assert_eq!(ease(Easing::Linear, 0.0), 0.0);
        assert_eq!(ease(Easing::Linear, 0.5), 0.5);
        assert_eq!(ease(Easing::Linear, 1.0), 1.0);
    }

    #[test]
    fn test_ease_in_out_family() {
        assert!(ease(Easing::EaseIn, 0.5) < 0.5);
        assert!(ease(Easing::EaseOut, 0.5) > 0.5);
        assert_eq!(ease(Easing::EaseInOut, 0.5), 0.5);
        for easing in [Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut] {
            assert_eq!(ease(easing, 0.0), 0.0);
            assert_eq!(ease(easing, 1.0), 1.0);
        }
    }

    #[test]
    fn test_spring_boundaries() {
        assert!(ease(Easing::Spring, 0.0).abs() < 1e-6);
        assert_eq!(ease(Easing::Spring, 1.0), 1.0);
        assert!(ease(Easing::Spring, 0.99) > 0.99);
    }

    #[test]
    fn test_spring_never_overshoots() {
        let mut previous = 0.0;
        for step in 0..=100 {
            let value = ease(Easing::Spring, step as f32 / 100.0);
            assert!(value >= previous, "spring went backwards at step {step}");
            assert!(value <= 1.0);
            previous = value;
        }
    }

    #[test]
    fn test_clamp() {
        assert_eq!(ease(Easing::Linear, -0.5), 0.0);
        assert_eq!(ease(Easing::Linear, 1.5), 1.0);
        assert_eq!(ease(Easing::Spring, 2.0), 1.0);
    }

    #[test]
    fn test_lerp_eased() {
        assert_eq!(lerp_eased(Easing::Linear, 100.0, 200.0, 0.0), 100.0);
        assert_eq!(lerp_eased(Easing::Linear, 100.0, 200.0, 0.5), 150.0);
        assert_eq!(lerp_eased(Easing::Linear, 100.0, 200.0, 1.0), 200.0);
    }
}
