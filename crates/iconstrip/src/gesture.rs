//! Long-press recognition from touch input.
//!
//! [`LongPressRecognizer`] follows a single finger. Once the finger has been
//! held for [`LongPressConfig::minimum_duration`] without drifting further
//! than [`LongPressConfig::allowable_movement`], the gesture is recognized and
//! every later movement is reported until the finger lifts:
//!
//! ```text
//! Started -> Updated* -> Ended | Cancelled
//! ```
//!
//! Moving too far or lifting the finger before the delay elapses fails the
//! gesture silently. Additional fingers are ignored while one is tracked.
//!
//! Time is never read from the clock here. Touches carry their own
//! timestamps and [`LongPressRecognizer::poll`] takes the current instant,
//! which keeps recognition deterministic under test.

use std::time::{Duration, Instant};

use iconstrip_core::logging::targets;
use iconstrip_render::Point;
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

/// Default long-press activation delay in milliseconds.
///
/// A touch must be held for at least this duration to trigger a long-press.
pub const DEFAULT_LONG_PRESS_TIMEOUT_MS: u64 = 500;

/// Default maximum movement before activation, in pixels.
///
/// Movement beyond this threshold fails the long-press.
pub const DEFAULT_ALLOWABLE_MOVEMENT: f32 = 10.0;

new_key_type! {
    /// Handle to a long-press recognizer installed on a surface.
    pub struct RecognizerId;
}

/// Phase of a single touch point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// Finger touched down.
    Started,
    /// Finger moved.
    Moved,
    /// Finger lifted.
    Ended,
    /// The system took the touch away.
    Cancelled,
}

/// A single touch sample in root scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Identifier that stays stable for the lifetime of one finger.
    pub id: u64,
    /// Phase of this sample.
    pub phase: TouchPhase,
    /// Position in root scene coordinates.
    pub position: Point,
    /// When the sample was taken.
    pub timestamp: Instant,
}

impl TouchPoint {
    /// Create a touch sample.
    pub fn new(id: u64, phase: TouchPhase, position: Point, timestamp: Instant) -> Self {
        Self {
            id,
            phase,
            position,
            timestamp,
        }
    }
}

/// State of a continuous gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureState {
    /// The gesture was recognized.
    Started,
    /// The finger moved after recognition.
    Updated,
    /// The finger lifted.
    Ended,
    /// The gesture was interrupted.
    Cancelled,
}

impl GestureState {
    /// Whether this state finishes the gesture.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled)
    }
}

/// Configuration for long-press recognition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LongPressConfig {
    /// How long the finger must be held before the gesture starts.
    #[serde(rename = "minimum_duration_ms", with = "duration_ms")]
    pub minimum_duration: Duration,
    /// How far the finger may drift before the gesture starts.
    pub allowable_movement: f32,
}

impl Default for LongPressConfig {
    fn default() -> Self {
        Self {
            minimum_duration: Duration::from_millis(DEFAULT_LONG_PRESS_TIMEOUT_MS),
            allowable_movement: DEFAULT_ALLOWABLE_MOVEMENT,
        }
    }
}

/// Serde helper storing a [`Duration`] as whole milliseconds.
pub(crate) mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// A state change reported by a [`LongPressRecognizer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LongPressUpdate {
    /// New gesture state.
    pub state: GestureState,
    /// Finger position in root scene coordinates.
    pub position: Point,
    /// When the change happened.
    pub timestamp: Instant,
}

/// A long-press event delivered to a recognizer's owner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LongPressEvent {
    /// The recognizer that produced the event.
    pub recognizer: RecognizerId,
    /// Gesture state.
    pub state: GestureState,
    /// Finger position in the coordinate space of the recognizer's node.
    pub location: Point,
    /// When the change happened.
    pub timestamp: Instant,
}

#[derive(Debug, Clone, Copy)]
struct TrackedTouch {
    id: u64,
    start_time: Instant,
    start_pos: Point,
    current_pos: Point,
    recognized: bool,
}

/// Recognizes a single-finger long-press.
#[derive(Debug, Default)]
pub struct LongPressRecognizer {
    config: LongPressConfig,
    touch: Option<TrackedTouch>,
}

impl LongPressRecognizer {
    /// Creates a recognizer with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a recognizer with the given configuration.
    pub fn with_config(config: LongPressConfig) -> Self {
        Self {
            config,
            touch: None,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &LongPressConfig {
        &self.config
    }

    /// Whether a finger is being followed.
    pub fn is_tracking(&self) -> bool {
        self.touch.is_some()
    }

    /// Whether the followed finger has been recognized as a long-press.
    pub fn is_recognized(&self) -> bool {
        self.touch.is_some_and(|t| t.recognized)
    }

    /// Feeds one touch sample and returns the resulting state changes.
    ///
    /// A sample taken after the activation delay on a finger that was never
    /// polled yields `Started` before the change the sample itself causes.
    pub fn process_touch(&mut self, point: &TouchPoint) -> Vec<LongPressUpdate> {
        let mut updates = Vec::new();
        match point.phase {
            TouchPhase::Started => self.handle_touch_start(point),
            TouchPhase::Moved => self.handle_touch_move(point, &mut updates),
            TouchPhase::Ended => self.handle_touch_end(point, GestureState::Ended, &mut updates),
            TouchPhase::Cancelled => {
                self.handle_touch_end(point, GestureState::Cancelled, &mut updates)
            }
        }
        updates
    }

    /// Checks for the activation delay elapsing.
    ///
    /// Call this periodically (e.g., once per frame) while a finger is held.
    pub fn poll(&mut self, now: Instant) -> Option<LongPressUpdate> {
        let touch = self.touch.as_mut()?;
        if touch.recognized || now.saturating_duration_since(touch.start_time) < self.config.minimum_duration {
            return None;
        }
        touch.recognized = true;
        tracing::debug!(target: targets::GESTURE, id = touch.id, "long-press recognized");
        Some(LongPressUpdate {
            state: GestureState::Started,
            position: touch.current_pos,
            timestamp: now,
        })
    }

    /// Forgets the followed finger without reporting anything.
    pub fn reset(&mut self) {
        self.touch = None;
    }

    fn handle_touch_start(&mut self, point: &TouchPoint) {
        if let Some(tracked) = self.touch {
            tracing::trace!(
                target: targets::GESTURE,
                tracked = tracked.id,
                ignored = point.id,
                "ignoring additional finger"
            );
            return;
        }
        self.touch = Some(TrackedTouch {
            id: point.id,
            start_time: point.timestamp,
            start_pos: point.position,
            current_pos: point.position,
            recognized: false,
        });
    }

    fn handle_touch_move(&mut self, point: &TouchPoint, updates: &mut Vec<LongPressUpdate>) {
        if !self.is_following(point.id) {
            return;
        }
        updates.extend(self.poll(point.timestamp));

        let Some(touch) = self.touch.as_mut() else {
            return;
        };
        touch.current_pos = point.position;

        if touch.recognized {
            updates.push(LongPressUpdate {
                state: GestureState::Updated,
                position: point.position,
                timestamp: point.timestamp,
            });
        } else if touch.start_pos.distance(point.position) > self.config.allowable_movement {
            tracing::debug!(target: targets::GESTURE, id = point.id, "long-press failed: moved too far");
            self.touch = None;
        }
    }

    fn handle_touch_end(
        &mut self,
        point: &TouchPoint,
        state: GestureState,
        updates: &mut Vec<LongPressUpdate>,
    ) {
        if !self.is_following(point.id) {
            return;
        }
        updates.extend(self.poll(point.timestamp));

        let Some(touch) = self.touch.take() else {
            return;
        };
        if touch.recognized {
            updates.push(LongPressUpdate {
                state,
                position: point.position,
                timestamp: point.timestamp,
            });
        } else {
            tracing::debug!(target: targets::GESTURE, id = point.id, "long-press failed: released early");
        }
    }

    fn is_following(&self, id: u64) -> bool {
        self.touch.is_some_and(|t| t.id == id)
    }
}
