//! Animation support for the icon strip.
//!
//! This module provides easing functions and a timestamp-driven animator for
//! node opacity and translation.
//!
//! # Easing Functions
//!
//! Easing functions control the rate of change during animations. They take a
//! normalized progress value `t` (0.0 to 1.0) and return a transformed value.
//! The strip's appear, lift and dismiss motions all use [`Easing::Spring`].
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//!
//! use iconstrip::animation::{AnimationTarget, Animator, Timing};
//! use iconstrip_core::Scene;
//! use iconstrip_render::{Point, Size};
//!
//! let mut scene = Scene::new(Size::new(100.0, 100.0));
//! let node = scene.create_node("badge");
//! let mut animator = Animator::new();
//!
//! let start = Instant::now();
//! let id = animator
//!     .animate(
//!         &scene,
//!         node,
//!         AnimationTarget::Translation(Point::new(0.0, -50.0)),
//!         Timing::spring(Duration::from_millis(500)),
//!         start,
//!     )
//!     .unwrap();
//!
//! let finished = animator.advance(&mut scene, start + Duration::from_millis(500));
//! assert_eq!(finished, vec![id]);
//! ```

mod animator;
mod easing;

pub use animator::{AnimatedProperty, AnimationId, AnimationTarget, Animator, Timing};
pub use easing::{ease, lerp_eased, Easing, SPRING_FREQUENCY, SPRING_INITIAL_VELOCITY};
