//! Flattening a scene tree into paint commands.
//!
//! [`Scene::display_list`] walks a subtree in paint order and emits one
//! [`DisplayItem`] per visible shadow, fill and image, with geometry already
//! mapped into the space of the tree's topmost node and opacity multiplied
//! down the hierarchy. A backend turns each item into a [`QuadInstance`].

use iconstrip_render::{quad_kind, Color, ImageKey, QuadInstance, Rect, Transform2D};

use crate::error::Result;
use crate::scene::{NodeId, Scene};

/// A single paint command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayItem {
    /// A blurred shadow under a fill.
    Shadow {
        rect: Rect,
        color: Color,
        blur: f32,
        corner_radius: f32,
    },
    /// A solid rounded-rectangle fill.
    Fill {
        rect: Rect,
        color: Color,
        corner_radius: f32,
    },
    /// An image clipped to a rounded rectangle.
    Image {
        rect: Rect,
        image: ImageKey,
        opacity: f32,
        corner_radius: f32,
    },
}

impl DisplayItem {
    /// The target rectangle of the item.
    pub fn rect(&self) -> Rect {
        match self {
            Self::Shadow { rect, .. } | Self::Fill { rect, .. } | Self::Image { rect, .. } => *rect,
        }
    }

    /// Convert to a GPU instance.
    pub fn to_instance(&self) -> QuadInstance {
        match *self {
            Self::Shadow {
                rect,
                color,
                blur,
                corner_radius,
            } => QuadInstance {
                blur,
                ..QuadInstance::new(quad_kind::SHADOW, rect, color, corner_radius)
            },
            Self::Fill {
                rect,
                color,
                corner_radius,
            } => QuadInstance::new(quad_kind::FILL, rect, color, corner_radius),
            Self::Image {
                rect,
                image,
                opacity,
                corner_radius,
            } => QuadInstance {
                image: image.0 as u32,
                ..QuadInstance::new(
                    quad_kind::IMAGE,
                    rect,
                    Color::WHITE.faded(opacity),
                    corner_radius,
                )
            },
        }
    }
}

impl Scene {
    /// Build the display list for the subtree rooted at `root`.
    pub fn display_list(&self, root: NodeId) -> Result<Vec<DisplayItem>> {
        let (_, transform) = self.to_top(root)?;
        let mut items = Vec::new();
        self.paint_into(root, transform, 1.0, &mut items)?;
        Ok(items)
    }

    fn paint_into(
        &self,
        id: NodeId,
        to_top: Transform2D,
        inherited_opacity: f32,
        items: &mut Vec<DisplayItem>,
    ) -> Result<()> {
        let node = self.node(id)?;
        let opacity = inherited_opacity * node.opacity();
        if node.is_hidden() || opacity <= 0.0 {
            return Ok(());
        }

        let rect = to_top.transform_rect(&node.bounds());
        let style = node.style();

        if let (Some(shadow), Some(_)) = (style.shadow, style.background) {
            items.push(DisplayItem::Shadow {
                rect: rect.offset(shadow.offset.x, shadow.offset.y),
                color: shadow.effective_color().faded(opacity),
                blur: shadow.radius,
                corner_radius: style.corner_radius,
            });
        }
        if let Some(background) = style.background {
            items.push(DisplayItem::Fill {
                rect,
                color: background.faded(opacity),
                corner_radius: style.corner_radius,
            });
        }
        if let Some(image) = style.image {
            items.push(DisplayItem::Image {
                rect,
                image,
                opacity,
                corner_radius: style.corner_radius,
            });
        }

        for &child in node.children() {
            let child_to_top = to_top.then(&self.node(child)?.to_parent());
            self.paint_into(child, child_to_top, opacity, items)?;
        }
        Ok(())
    }
}
