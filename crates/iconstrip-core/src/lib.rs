//! Core systems for iconstrip.
//!
//! This crate provides the foundation the icon strip widget is built on:
//!
//! - **Scene tree**: an arena of nodes with frames, transforms and opacity
//! - **Hit testing**: topmost-deepest lookup honoring transforms and visibility
//! - **Coordinate conversion**: mapping points between any two nodes of a tree
//! - **Display lists**: flattening a subtree into paint commands
//! - **Logging**: tracing targets, macros and scene tree dumps
//!
//! # Example
//!
//! ```
//! use iconstrip_core::Scene;
//! use iconstrip_render::{Point, Rect, Size};
//!
//! let mut scene = Scene::new(Size::new(320.0, 480.0));
//! let root = scene.root();
//!
//! let strip = scene.create_node("strip");
//! scene.set_frame(strip, Rect::new(100.0, 200.0, 52.0, 52.0)).unwrap();
//! scene.add_child(root, strip).unwrap();
//!
//! let local = scene.convert_point(Point::new(110.0, 226.0), root, strip).unwrap();
//! assert_eq!(local, Point::new(10.0, 26.0));
//! assert_eq!(scene.hit_test(root, Point::new(110.0, 226.0)).unwrap(), Some(strip));
//! ```

mod error;
pub mod logging;
mod paint;
mod scene;

pub use error::{Result, SceneError};
pub use logging::{PerfSpan, SceneTreeDebug, TreeFormatOptions, TreeStyle};
pub use paint::DisplayItem;
pub use scene::{Node, NodeId, NodeStyle, Scene};

#[doc(hidden)]
pub use tracing;
