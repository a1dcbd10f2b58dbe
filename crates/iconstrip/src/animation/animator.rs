//! Property tweens driven by explicit timestamps.
//!
//! An [`Animator`] interpolates node opacity and translation inside a
//! [`Scene`]. Tweens start from the value the scene currently shows, so
//! retargeting a property mid-flight continues smoothly from where it is.
//! Nothing advances on its own: the owner calls [`Animator::advance`] once
//! per frame and learns which animations completed.

use std::time::{Duration, Instant};

use iconstrip_core::logging::targets;
use iconstrip_core::{NodeId, Scene, SceneError};
use iconstrip_render::{Point, Transform2D};
use slotmap::{new_key_type, SlotMap};

use super::easing::{ease, Easing};

new_key_type! {
    /// Handle to a running animation.
    pub struct AnimationId;
}

/// Timing of an animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    /// Total duration. Zero jumps to the target on the next advance.
    pub duration: Duration,
    /// Easing applied to the progress.
    pub easing: Easing,
}

impl Timing {
    /// Create a timing.
    pub const fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }

    /// Critically damped spring timing.
    pub const fn spring(duration: Duration) -> Self {
        Self::new(duration, Easing::Spring)
    }

    /// Progress in `0.0..=1.0` after `elapsed`.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        }
    }
}

/// A node property an animation can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimatedProperty {
    /// Node opacity.
    Opacity,
    /// Translation part of the node transform.
    Translation,
}

/// The value an animation drives a property towards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationTarget {
    /// Target opacity.
    Opacity(f32),
    /// Target translation; the node transform becomes a pure translation.
    Translation(Point),
}

impl AnimationTarget {
    /// The property this target drives.
    pub fn property(&self) -> AnimatedProperty {
        match self {
            Self::Opacity(_) => AnimatedProperty::Opacity,
            Self::Translation(_) => AnimatedProperty::Translation,
        }
    }

    fn current(property: AnimatedProperty, scene: &Scene, node: NodeId) -> Result<Self, SceneError> {
        Ok(match property {
            AnimatedProperty::Opacity => Self::Opacity(scene.opacity(node)?),
            AnimatedProperty::Translation => Self::Translation(scene.transform(node)?.translation()),
        })
    }

    fn interpolate(from: Self, to: Self, t: f32) -> Self {
        match (from, to) {
            (Self::Opacity(a), Self::Opacity(b)) => Self::Opacity(a + (b - a) * t),
            (Self::Translation(a), Self::Translation(b)) => Self::Translation(a.lerp(b, t)),
            (_, to) => to,
        }
    }

    fn apply(self, scene: &mut Scene, node: NodeId) -> Result<(), SceneError> {
        match self {
            Self::Opacity(opacity) => scene.set_opacity(node, opacity),
            Self::Translation(offset) => scene.set_transform(node, Transform2D::from_offset(offset)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Tween {
    node: NodeId,
    from: AnimationTarget,
    to: AnimationTarget,
    timing: Timing,
    start: Instant,
}

/// Runs property tweens against a scene.
#[derive(Debug, Default)]
pub struct Animator {
    tweens: SlotMap<AnimationId, Tween>,
}

impl Animator {
    /// Create an animator with nothing running.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of running animations.
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    /// Whether nothing is running.
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Whether the animation is still running.
    pub fn is_animating(&self, id: AnimationId) -> bool {
        self.tweens.contains_key(id)
    }

    /// Start animating a node property from its current value to `target`.
    ///
    /// A running animation of the same property on the same node is
    /// interrupted and never reported as finished.
    pub fn animate(
        &mut self,
        scene: &Scene,
        node: NodeId,
        target: AnimationTarget,
        timing: Timing,
        now: Instant,
    ) -> Result<AnimationId, SceneError> {
        let property = target.property();
        let from = AnimationTarget::current(property, scene, node)?;

        let before = self.tweens.len();
        self.tweens
            .retain(|_, tween| tween.node != node || tween.to.property() != property);
        if self.tweens.len() != before {
            tracing::trace!(target: targets::ANIMATION, ?node, ?property, "interrupted running animation");
        }

        Ok(self.tweens.insert(Tween {
            node,
            from,
            to: target,
            timing,
            start: now,
        }))
    }

    /// Step every animation to `now` and return the ones that completed.
    ///
    /// Animations whose node no longer exists are dropped and reported as
    /// completed.
    pub fn advance(&mut self, scene: &mut Scene, now: Instant) -> Vec<AnimationId> {
        let mut finished = Vec::new();
        for (id, tween) in &self.tweens {
            let progress = tween
                .timing
                .progress(now.saturating_duration_since(tween.start));
            let value = if progress >= 1.0 {
                tween.to
            } else {
                AnimationTarget::interpolate(tween.from, tween.to, ease(tween.timing.easing, progress))
            };

            if let Err(err) = value.apply(scene, tween.node) {
                tracing::debug!(target: targets::ANIMATION, animation = ?id, %err, "dropping animation");
                finished.push(id);
            } else if progress >= 1.0 {
                finished.push(id);
            }
        }

        for id in &finished {
            self.tweens.remove(*id);
        }
        finished
    }

    /// Jump every animation to its target and return them all.
    pub fn finish_all(&mut self, scene: &mut Scene) -> Vec<AnimationId> {
        self.tweens
            .drain()
            .map(|(id, tween)| {
                if let Err(err) = tween.to.apply(scene, tween.node) {
                    tracing::debug!(target: targets::ANIMATION, animation = ?id, %err, "dropping animation");
                }
                id
            })
            .collect()
    }

    /// Stop an animation where it is. Returns `false` if it was not running.
    pub fn cancel(&mut self, id: AnimationId) -> bool {
        self.tweens.remove(id).is_some()
    }

    /// Stop every animation of a node where it is.
    pub fn cancel_node(&mut self, node: NodeId) {
        self.tweens.retain(|_, tween| tween.node != node);
    }

    /// Stop everything.
    pub fn clear(&mut self) {
        self.tweens.clear();
    }
}
