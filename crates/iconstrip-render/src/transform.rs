//! 2D affine transformations.
//!
//! Scene nodes carry a [`Transform2D`] on top of their frame; the lift and
//! slide effects of the widget are expressed as translations.

use crate::types::{Point, Rect};

/// A 2D affine transformation matrix.
///
/// Stored as a 3x2 matrix in column-major order:
/// ```text
/// | m00 m10 m20 |   | scale_x  skew_x   translate_x |
/// | m01 m11 m21 | = | skew_y   scale_y  translate_y |
/// ```
///
/// # Examples
///
/// ```
/// use iconstrip_render::{Transform2D, Point};
///
/// let translate = Transform2D::translate(100.0, 50.0);
/// let p = translate.transform_point(Point::new(0.0, 0.0));
/// assert_eq!(p, Point::new(100.0, 50.0));
///
/// // Transforms are composed right-to-left with `then`
/// // (first translate, then scale)
/// let transform = Transform2D::scale(2.0)
///     .then(&Transform2D::translate(10.0, 0.0));
/// let p = transform.transform_point(Point::new(5.0, 0.0));
/// assert_eq!(p, Point::new(30.0, 0.0));
///
/// let inverse = transform.inverse().unwrap();
/// assert_eq!(inverse.transform_point(p), Point::new(5.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    /// Matrix elements in column-major order.
    m: [f32; 6],
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    /// The identity transform (no transformation).
    pub const IDENTITY: Self = Self {
        m: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    /// Create a translation transform.
    #[inline]
    pub const fn translate(tx: f32, ty: f32) -> Self {
        Self {
            m: [1.0, 0.0, 0.0, 1.0, tx, ty],
        }
    }

    /// Create a translation transform from a point used as an offset.
    #[inline]
    pub const fn from_offset(offset: Point) -> Self {
        Self::translate(offset.x, offset.y)
    }

    /// Create a uniform scaling transform.
    #[inline]
    pub const fn scale(s: f32) -> Self {
        Self::scale_xy(s, s)
    }

    /// Create a non-uniform scaling transform.
    #[inline]
    pub const fn scale_xy(sx: f32, sy: f32) -> Self {
        Self {
            m: [sx, 0.0, 0.0, sy, 0.0, 0.0],
        }
    }

    /// Concatenate this transform with another (self * other).
    ///
    /// The resulting transform first applies `other`, then `self`.
    #[inline]
    pub fn then(&self, other: &Self) -> Self {
        let a = &self.m;
        let b = &other.m;
        Self {
            m: [
                a[0] * b[0] + a[2] * b[1],
                a[1] * b[0] + a[3] * b[1],
                a[0] * b[2] + a[2] * b[3],
                a[1] * b[2] + a[3] * b[3],
                a[0] * b[4] + a[2] * b[5] + a[4],
                a[1] * b[4] + a[3] * b[5] + a[5],
            ],
        }
    }

    /// Transform a point.
    #[inline]
    pub fn transform_point(&self, p: Point) -> Point {
        Point {
            x: self.m[0] * p.x + self.m[2] * p.y + self.m[4],
            y: self.m[1] * p.x + self.m[3] * p.y + self.m[5],
        }
    }

    /// Compute the inverse of this transform, if it exists.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det.abs() < 1e-10 {
            return None;
        }

        let inv_det = 1.0 / det;
        Some(Self {
            m: [
                self.m[3] * inv_det,
                -self.m[1] * inv_det,
                -self.m[2] * inv_det,
                self.m[0] * inv_det,
                (self.m[2] * self.m[5] - self.m[3] * self.m[4]) * inv_det,
                (self.m[1] * self.m[4] - self.m[0] * self.m[5]) * inv_det,
            ],
        })
    }

    /// Get the translation component.
    #[inline]
    pub fn translation(&self) -> Point {
        Point::new(self.m[4], self.m[5])
    }

    /// Get the determinant of the transform matrix.
    #[inline]
    pub fn determinant(&self) -> f32 {
        self.m[0] * self.m[3] - self.m[1] * self.m[2]
    }

    /// Check if this is the identity transform.
    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Check if this transform only contains translation.
    #[inline]
    pub fn is_translation_only(&self) -> bool {
        self.m[0] == 1.0 && self.m[1] == 0.0 && self.m[2] == 0.0 && self.m[3] == 1.0
    }

    /// Transform a rectangle's bounding box.
    ///
    /// Note: This returns the axis-aligned bounding box of the transformed rectangle.
    pub fn transform_rect(&self, rect: &Rect) -> Rect {
        let corners = [
            self.transform_point(rect.top_left()),
            self.transform_point(rect.top_right()),
            self.transform_point(rect.bottom_left()),
            self.transform_point(rect.bottom_right()),
        ];

        let min_x = corners.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
        let min_y = corners.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let max_x = corners
            .iter()
            .map(|p| p.x)
            .fold(f32::NEG_INFINITY, f32::max);
        let max_y = corners
            .iter()
            .map(|p| p.y)
            .fold(f32::NEG_INFINITY, f32::max);

        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_identity() {
        let t = Transform2D::IDENTITY;
        let p = Point::new(5.0, 10.0);
        assert_eq!(t.transform_point(p), p);
        assert!(t.is_identity());
        assert!(t.is_translation_only());
    }

    #[test]
    fn test_translation() {
        let t = Transform2D::translate(10.0, 20.0);
        let tp = t.transform_point(Point::new(5.0, 5.0));
        assert_eq!(tp, Point::new(15.0, 25.0));
        assert_eq!(t.translation(), Point::new(10.0, 20.0));
        assert!(!t.is_identity());
    }

    #[test]
    fn test_scale() {
        let t = Transform2D::scale_xy(2.0, 3.0);
        let tp = t.transform_point(Point::new(5.0, 10.0));
        assert_eq!(tp, Point::new(10.0, 30.0));
        assert!(!t.is_translation_only());
    }

    #[test]
    fn test_concatenation() {
        // First translate, then scale
        let combined = Transform2D::scale(2.0).then(&Transform2D::translate(10.0, 0.0));
        let tp = combined.transform_point(Point::new(5.0, 0.0));
        assert_eq!(tp, Point::new(30.0, 0.0));
    }

    #[test]
    fn test_nested_translations_accumulate() {
        let parent = Transform2D::translate(100.0, 40.0);
        let child = Transform2D::translate(6.0, -50.0);
        let p = parent.then(&child).transform_point(Point::ZERO);
        assert_eq!(p, Point::new(106.0, -10.0));
    }

    #[test]
    fn test_inverse() {
        let t = Transform2D::translate(10.0, 20.0).then(&Transform2D::scale(2.0));
        let inv = t.inverse().unwrap();
        let tp = t.then(&inv).transform_point(Point::new(100.0, 50.0));
        assert!(approx_eq(tp.x, 100.0));
        assert!(approx_eq(tp.y, 50.0));

        assert!(Transform2D::scale(0.0).inverse().is_none());
    }

    #[test]
    fn test_transform_rect() {
        let t = Transform2D::translate(10.0, 10.0);
        let r = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(t.transform_rect(&r), Rect::new(10.0, 10.0, 100.0, 50.0));
    }
}
