//! Conversion from platform input into [`TouchPoint`]s.
//!
//! Touchscreens deliver [`winit::event::Touch`] events directly. On desktop
//! platforms without touch input, [`MouseTouchEmulator`] turns a held primary
//! mouse button into a single emulated finger so the same long-press pipeline
//! can be driven by a mouse.

use std::time::Instant;

use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, Touch, TouchPhase as WinitTouchPhase};

use iconstrip_render::Point;

use crate::gesture::{TouchPhase, TouchPoint};

/// Touch id used for the finger emulated by [`MouseTouchEmulator`].
pub const MOUSE_TOUCH_ID: u64 = u64::MAX;

/// Converts a winit TouchPhase to an iconstrip TouchPhase.
pub fn from_winit_touch_phase(phase: WinitTouchPhase) -> TouchPhase {
    match phase {
        WinitTouchPhase::Started => TouchPhase::Started,
        WinitTouchPhase::Moved => TouchPhase::Moved,
        WinitTouchPhase::Ended => TouchPhase::Ended,
        WinitTouchPhase::Cancelled => TouchPhase::Cancelled,
    }
}

/// Converts a physical window position into logical scene coordinates.
pub fn to_logical_point(position: PhysicalPosition<f64>, scale_factor: f64) -> Point {
    let logical = position.to_logical::<f32>(scale_factor);
    Point::new(logical.x, logical.y)
}

/// Converts a winit touch event into a [`TouchPoint`] in logical coordinates.
pub fn from_winit_touch(touch: &Touch, scale_factor: f64, timestamp: Instant) -> TouchPoint {
    TouchPoint::new(
        touch.id,
        from_winit_touch_phase(touch.phase),
        to_logical_point(touch.location, scale_factor),
        timestamp,
    )
}

/// Emulates a single finger with the primary mouse button.
#[derive(Debug, Default)]
pub struct MouseTouchEmulator {
    cursor: Point,
    pressed: bool,
}

impl MouseTouchEmulator {
    /// Creates an emulator with the cursor at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the emulated finger is down.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Feeds a cursor movement. Produces a `Moved` sample while pressed.
    pub fn cursor_moved(
        &mut self,
        position: PhysicalPosition<f64>,
        scale_factor: f64,
        timestamp: Instant,
    ) -> Option<TouchPoint> {
        self.cursor = to_logical_point(position, scale_factor);
        self.pressed
            .then(|| TouchPoint::new(MOUSE_TOUCH_ID, TouchPhase::Moved, self.cursor, timestamp))
    }

    /// Feeds a mouse button change. Only the left button is considered.
    pub fn mouse_input(
        &mut self,
        state: ElementState,
        button: MouseButton,
        timestamp: Instant,
    ) -> Option<TouchPoint> {
        if button != MouseButton::Left {
            return None;
        }
        let phase = match (state, self.pressed) {
            (ElementState::Pressed, false) => TouchPhase::Started,
            (ElementState::Released, true) => TouchPhase::Ended,
            _ => return None,
        };
        self.pressed = phase == TouchPhase::Started;
        Some(TouchPoint::new(MOUSE_TOUCH_ID, phase, self.cursor, timestamp))
    }

    /// Cancels the emulated finger, e.g. when the window loses focus.
    pub fn cancel(&mut self, timestamp: Instant) -> Option<TouchPoint> {
        if !self.pressed {
            return None;
        }
        self.pressed = false;
        Some(TouchPoint::new(
            MOUSE_TOUCH_ID,
            TouchPhase::Cancelled,
            self.cursor,
            timestamp,
        ))
    }
}
