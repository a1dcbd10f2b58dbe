//! Geometry, color and transform types for the iconstrip widget.
//!
//! This crate holds the plain value types the rest of the workspace is built
//! on: points, sizes, rectangles, colors, shadows, affine transforms and the
//! instance layout a GPU backend consumes.
//!
//! # Example
//!
//! ```
//! use iconstrip_render::{Point, Rect, Transform2D};
//!
//! let frame = Rect::new(10.0, 20.0, 100.0, 52.0);
//! let lifted = Transform2D::translate(0.0, -50.0);
//! let moved = lifted.transform_rect(&frame);
//! assert_eq!(moved.top(), -30.0);
//! assert!(moved.contains(Point::new(50.0, 0.0)));
//! ```

mod instance;
mod transform;
mod types;

pub use instance::{quad_kind, QuadInstance};
pub use transform::Transform2D;
pub use types::{Color, CornerRadii, ImageKey, Point, Rect, Shadow, Size};
