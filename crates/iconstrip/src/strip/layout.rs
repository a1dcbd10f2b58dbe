//! Pure strip layout.
//!
//! Icons sit in a single row, each `diameter` wide, separated from each other
//! and from the strip edges by `padding`:
//!
//! ```text
//! width  = n * diameter + (n + 1) * padding
//! height = diameter + 2 * padding
//! ```

use iconstrip_render::{Rect, Size};

use crate::icon::Icon;

/// Where one icon goes inside the strip.
#[derive(Debug, Clone, PartialEq)]
pub struct IconSlot {
    /// The icon shown in this slot.
    pub icon: Icon,
    /// Frame in strip coordinates.
    pub frame: Rect,
}

/// Result of laying out a strip.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    /// Bounding size of the strip.
    pub size: Size,
    /// Corner radius of the strip background (half its height).
    pub corner_radius: f32,
    /// Corner radius of each icon (half the diameter).
    pub icon_corner_radius: f32,
    /// One slot per icon, in display order.
    pub slots: Vec<IconSlot>,
}

impl LayoutResult {
    /// Index of the slot showing `icon`.
    pub fn position(&self, icon: &Icon) -> Option<usize> {
        self.slots.iter().position(|slot| &slot.icon == icon)
    }
}

/// Lay out `icons` with the given spacing and icon size.
///
/// `padding` and `diameter` are expected to be finite and non-negative.
pub fn configure(icons: &[Icon], padding: f32, diameter: f32) -> LayoutResult {
    let count = icons.len() as f32;
    let size = Size::new(
        count * diameter + (count + 1.0) * padding,
        diameter + 2.0 * padding,
    );

    let slots = icons
        .iter()
        .enumerate()
        .map(|(i, icon)| IconSlot {
            icon: icon.clone(),
            frame: Rect::new(
                padding + i as f32 * (diameter + padding),
                padding,
                diameter,
                diameter,
            ),
        })
        .collect();

    LayoutResult {
        size,
        corner_radius: size.height / 2.0,
        icon_corner_radius: diameter / 2.0,
        slots,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_icons(n: usize) -> Vec<Icon> {
        (0..n).map(|i| Icon::new(format!("icon-{i}"))).collect()
    }

    #[test]
    fn test_size_formula() {
        for n in 0..8 {
            for (padding, diameter) in [(6.0, 40.0), (0.0, 40.0), (10.0, 0.0), (3.5, 22.0)] {
                let layout = configure(&make_icons(n), padding, diameter);
                let count = n as f32;
                assert_eq!(layout.size.width, count * diameter + (count + 1.0) * padding);
                assert_eq!(layout.size.height, diameter + 2.0 * padding);
                assert_eq!(layout.corner_radius, layout.size.height / 2.0);
                assert_eq!(layout.slots.len(), n);
            }
        }
    }

    #[test]
    fn test_empty_strip() {
        let layout = configure(&[], 6.0, 40.0);
        assert_eq!(layout.size, Size::new(6.0, 52.0));
        assert!(layout.slots.is_empty());
    }

    #[test]
    fn test_slot_frames() {
        let icons = make_icons(2);
        let layout = configure(&icons, 6.0, 40.0);
        assert_eq!(layout.size, Size::new(98.0, 52.0));
        assert_eq!(layout.slots[0].frame, Rect::new(6.0, 6.0, 40.0, 40.0));
        assert_eq!(layout.slots[1].frame, Rect::new(52.0, 6.0, 40.0, 40.0));
        assert_eq!(layout.icon_corner_radius, 20.0);
        assert_eq!(layout.position(&icons[1]), Some(1));
        assert_eq!(layout.position(&Icon::new("other")), None);
    }
}
