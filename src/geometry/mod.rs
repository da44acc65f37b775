//! Geometric primitives for text-layer reconstruction.
//!
//! This module provides the basic geometric types used throughout the
//! engine: points, rectangles, the 2×3 glyph-run transform, and the single
//! page-space ↔ screen-space scale mapping.
//!
//! All persisted geometry lives in *page space* (scale = 1). On-screen
//! geometry is page space multiplied by the currently active rendering
//! scale; no other unit is introduced anywhere in the crate.

use serde::{Deserialize, Serialize};

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// use textlayer::geometry::Point;
    ///
    /// let point = Point::new(10.0, 20.0);
    /// assert_eq!(point.x, 10.0);
    /// assert_eq!(point.y, 20.0);
    /// ```
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle.
///
/// `y` grows downward, matching the visual coordinate space produced by the
/// page-description viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// X coordinate of the top-left corner
    pub x: f32,
    /// Y coordinate of the top-left corner
    pub y: f32,
    /// Width of the rectangle
    pub width: f32,
    /// Height of the rectangle
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle from position and dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use textlayer::geometry::Rect;
    ///
    /// let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
    /// assert_eq!(rect.width, 100.0);
    /// assert_eq!(rect.height, 50.0);
    /// ```
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from two corner points.
    pub fn from_points(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        }
    }

    /// Get the left edge x-coordinate.
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the top edge y-coordinate.
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Get the bottom edge y-coordinate.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Get the center point of the rectangle.
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Check if this rectangle intersects with another.
    ///
    /// Edges that merely touch do not count as an intersection.
    ///
    /// # Examples
    ///
    /// ```
    /// use textlayer::geometry::Rect;
    ///
    /// let r1 = Rect::new(0.0, 0.0, 100.0, 100.0);
    /// let r2 = Rect::new(50.0, 50.0, 100.0, 100.0);
    /// let r3 = Rect::new(200.0, 200.0, 100.0, 100.0);
    ///
    /// assert!(r1.intersects(&r2));
    /// assert!(!r1.intersects(&r3));
    /// ```
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Check if this rectangle fully contains another.
    pub fn contains(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }

    /// Compute the union of this rectangle with another.
    ///
    /// Returns the smallest rectangle that contains both rectangles.
    pub fn union(&self, other: &Rect) -> Rect {
        let x0 = self.left().min(other.left());
        let y0 = self.top().min(other.top());
        let x1 = self.right().max(other.right());
        let y1 = self.bottom().max(other.bottom());
        Rect::from_points(x0, y0, x1, y1)
    }

    /// Expand the rectangle by `pad` on all four sides.
    pub fn expanded(&self, pad: f32) -> Rect {
        Rect::new(
            self.x - pad,
            self.y - pad,
            self.width + 2.0 * pad,
            self.height + 2.0 * pad,
        )
    }
}

/// A 2×3 affine transform as produced by the page description for each
/// glyph run: `[a b c d e f]`, mapping `(x, y)` to
/// `(a*x + c*y + e, b*x + d*y + f)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Matrix entries `[a, b, c, d, e, f]`
    pub m: [f32; 6],
}

impl Transform {
    /// Create a transform from its six entries.
    pub fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self {
            m: [a, b, c, d, e, f],
        }
    }

    /// The identity transform.
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// A pure scale transform.
    pub fn scale(s: f32) -> Self {
        Self::new(s, 0.0, 0.0, s, 0.0, 0.0)
    }

    /// Apply the transform to a point.
    ///
    /// # Examples
    ///
    /// ```
    /// use textlayer::geometry::{Point, Transform};
    ///
    /// let t = Transform::new(2.0, 0.0, 0.0, 2.0, 10.0, 5.0);
    /// let p = t.apply(Point::new(3.0, 4.0));
    /// assert_eq!(p, Point::new(16.0, 13.0));
    /// ```
    pub fn apply(&self, p: Point) -> Point {
        let [a, b, c, d, e, f] = self.m;
        Point::new(a * p.x + c * p.y + e, b * p.x + d * p.y + f)
    }

    /// The transform's origin `(e, f)`, where it maps `(0, 0)`.
    pub fn origin(&self) -> Point {
        Point::new(self.m[4], self.m[5])
    }

    /// Vertical extent of a unit glyph under this transform: `√(c² + d²)`.
    ///
    /// This is the font height encoded in a glyph-run matrix.
    pub fn font_height(&self) -> f32 {
        (self.m[2] * self.m[2] + self.m[3] * self.m[3]).sqrt()
    }

    /// Horizontal extent of a unit glyph under this transform: `√(a² + b²)`.
    pub fn font_width(&self) -> f32 {
        (self.m[0] * self.m[0] + self.m[1] * self.m[1]).sqrt()
    }

    /// Rotation angle in radians: `atan2(b, a)`.
    pub fn rotation(&self) -> f32 {
        self.m[1].atan2(self.m[0])
    }

    /// Whether every matrix entry is a finite number.
    ///
    /// Runs carrying non-finite transforms are dropped by the extractor.
    pub fn is_finite(&self) -> bool {
        self.m.iter().all(|v| v.is_finite())
    }
}

/// Convert a screen-space rectangle to page space (scale = 1).
///
/// # Examples
///
/// ```
/// use textlayer::geometry::{to_page_space, Rect};
///
/// let screen = Rect::new(200.0, 100.0, 50.0, 25.0);
/// let page = to_page_space(&screen, 2.0);
/// assert_eq!(page, Rect::new(100.0, 50.0, 25.0, 12.5));
/// ```
pub fn to_page_space(rect: &Rect, scale: f32) -> Rect {
    Rect::new(
        rect.x / scale,
        rect.y / scale,
        rect.width / scale,
        rect.height / scale,
    )
}

/// Convert a page-space rectangle to screen space at the given scale.
///
/// Inverse of [`to_page_space`] for any `scale > 0`.
pub fn to_screen_space(rect: &Rect, scale: f32) -> Rect {
    Rect::new(
        rect.x * scale,
        rect.y * scale,
        rect.width * scale,
        rect.height * scale,
    )
}
