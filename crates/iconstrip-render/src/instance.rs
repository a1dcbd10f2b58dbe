//! GPU-ready quad instances.
//!
//! A renderer backend draws every paint item as one instanced quad. The layout
//! here is `#[repr(C)]` and [`Pod`] so a slice of instances can be uploaded to a
//! vertex buffer without copying.

use bytemuck::{Pod, Zeroable};

use crate::types::{Color, Rect};

/// Kind tag stored in [`QuadInstance::kind`].
pub mod quad_kind {
    /// A solid rounded-rectangle fill.
    pub const FILL: u32 = 0;
    /// A blurred shadow behind a fill.
    pub const SHADOW: u32 = 1;
    /// A textured quad sampling an image.
    pub const IMAGE: u32 = 2;
}

/// One instanced quad in device-independent pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct QuadInstance {
    /// Top-left corner (x, y).
    pub origin: [f32; 2],
    /// Width and height.
    pub size: [f32; 2],
    /// Premultiplied color; for images this is a tint with the opacity in alpha.
    pub color: [f32; 4],
    /// Corner radius.
    pub corner_radius: f32,
    /// Blur radius (shadows only).
    pub blur: f32,
    /// One of the [`quad_kind`] constants.
    pub kind: u32,
    /// Image key for [`quad_kind::IMAGE`], truncated to 32 bits; zero otherwise.
    pub image: u32,
}

impl QuadInstance {
    /// Build an instance covering `rect`.
    pub fn new(kind: u32, rect: Rect, color: Color, corner_radius: f32) -> Self {
        Self {
            origin: [rect.left(), rect.top()],
            size: [rect.width(), rect.height()],
            color: color.to_array(),
            corner_radius,
            blur: 0.0,
            kind,
            image: 0,
        }
    }

    /// View a slice of instances as raw bytes for upload.
    pub fn as_bytes(instances: &[Self]) -> &[u8] {
        bytemuck::cast_slice(instances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<QuadInstance>(), 48);
        let instances = [
            QuadInstance::new(quad_kind::FILL, Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE, 5.0),
            QuadInstance::new(quad_kind::IMAGE, Rect::new(1.0, 2.0, 3.0, 4.0), Color::WHITE, 0.0),
        ];
        assert_eq!(QuadInstance::as_bytes(&instances).len(), 96);
    }

    #[test]
    fn test_instance_copies_geometry() {
        let quad = QuadInstance::new(
            quad_kind::SHADOW,
            Rect::new(4.0, 8.0, 20.0, 10.0),
            Color::BLACK,
            5.0,
        );
        assert_eq!(quad.origin, [4.0, 8.0]);
        assert_eq!(quad.size, [20.0, 10.0]);
        assert_eq!(quad.color, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(quad.kind, quad_kind::SHADOW);
    }
}
