//! iconstrip - a long-press drag-to-select icon strip.
//!
//! Long-pressing a container makes a rounded row of icons spring into view
//! above its center. Sliding the finger raises the icon under it, and
//! releasing reports that icon (or none) to a [`SelectionDelegate`] before
//! the strip slides away again.
//!
//! The widget draws into a retained [`Scene`](iconstrip_core::Scene) owned by
//! a [`Surface`]. [`Stage`] is a ready-made surface that routes touches to
//! long-press recognizers; [`touch`] converts `winit` input into those
//! touches.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use std::time::{Duration, Instant};
//!
//! use iconstrip::gesture::{TouchPhase, TouchPoint};
//! use iconstrip::render::{Point, Rect, Size};
//! use iconstrip::{Icon, IconStrip, IconStripConfig, Stage, Surface};
//!
//! let mut stage = Stage::new(Size::new(320.0, 480.0));
//! let root = stage.root();
//! let container = stage.scene_mut().create_node("container");
//! stage.scene_mut().set_frame(container, Rect::new(0.0, 0.0, 320.0, 480.0)).unwrap();
//! stage.scene_mut().add_child(root, container).unwrap();
//!
//! let icons = vec![Icon::new("check"), Icon::new("cancel")];
//! let mut strip = IconStrip::with_icons(&mut stage, IconStripConfig::default(), icons).unwrap();
//! strip.attach(&mut stage, Some(container));
//!
//! let delegate = Rc::new(|strip: &IconStrip| {
//!     println!("selected: {:?}", strip.resolved_icon());
//! });
//! strip.set_delegate(&delegate);
//!
//! // Hold still for half a second, then slide onto the first icon.
//! let t0 = Instant::now();
//! let t1 = t0 + Duration::from_millis(500);
//! stage.dispatch_touch(&TouchPoint::new(0, TouchPhase::Started, Point::new(160.0, 240.0), t0));
//! let mut events = stage.poll(t1);
//! events.extend(stage.dispatch_touch(&TouchPoint::new(0, TouchPhase::Moved, Point::new(130.0, 240.0), t1)));
//! events.extend(stage.dispatch_touch(&TouchPoint::new(0, TouchPhase::Ended, Point::new(130.0, 240.0), t1)));
//! for event in &events {
//!     strip.handle_long_press(&mut stage, event).unwrap();
//! }
//!
//! assert_eq!(strip.resolved_icon().map(|i| i.name()), Some("check"));
//! assert!(strip.tick(&mut stage, t1 + Duration::from_secs(1)).unwrap());
//! ```

pub mod animation;
mod error;
pub mod gesture;
mod host;
mod icon;
mod strip;
mod surface;
pub mod touch;

pub use error::{ConfigError, Result, StripError};
pub use gesture::{GestureState, LongPressConfig, LongPressEvent, RecognizerId};
pub use host::{Host, LabelReceiver, SelectionOutcome};
pub use icon::Icon;
pub use strip::{
    configure, parse_color, DragSession, IconSlot, IconStrip, IconStripConfig, IconVisual,
    LayoutResult, LiftState, SelectionDelegate, ShadowConfig, StripPhase,
    DEFAULT_ANIMATION_DURATION_MS, DEFAULT_ICON_DIAMETER, DEFAULT_LIFT_OFFSET, DEFAULT_PADDING,
};
pub use surface::{Stage, Surface};

pub use iconstrip_core::{NodeId, Scene, SceneError};

/// Geometry and paint value types.
pub mod render {
    pub use iconstrip_render::*;
}

/// Scene tree, logging and display lists.
pub mod scene {
    pub use iconstrip_core::*;
}
