use super::{Point, Size};
use serde::{Deserialize, Serialize};

/// Rotation of a reported quad relative to its upright form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rotation {
    /// Corners already sit in their named positions
    Upright,
    /// Content turned a quarter turn clockwise
    Rotated90,
    /// Content upside down
    Rotated180,
    /// Content turned a quarter turn counter-clockwise
    Rotated270,
}

/// Four reported corners of a detected item
///
/// The corner names are the detector's labels, which follow the content's
/// own orientation and not the viewport's. Use
/// [`normalize`](crate::selection::normalize::normalize) to get viewport-upright
/// corners.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct QuadBounds {
    /// Reported top-left corner
    pub top_left: Point,
    /// Reported top-right corner
    pub top_right: Point,
    /// Reported bottom-left corner
    pub bottom_left: Point,
    /// Reported bottom-right corner
    pub bottom_right: Point,
}

impl QuadBounds {
    /// Create a quad from its four named corners
    pub fn new(top_left: Point, top_right: Point, bottom_left: Point, bottom_right: Point) -> Self {
        Self {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        }
    }

    /// Create a quad from corners listed clockwise starting at top-left
    /// (TL, TR, BR, BL), the order most detectors report.
    pub fn from_corners_clockwise(corners: [Point; 4]) -> Self {
        Self {
            top_left: corners[0],
            top_right: corners[1],
            bottom_right: corners[2],
            bottom_left: corners[3],
        }
    }

    /// Axis-aligned quad covering `x..x+width`, `y..y+height`
    pub fn from_rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            top_left: Point::new(x, y),
            top_right: Point::new(x + width, y),
            bottom_left: Point::new(x, y + height),
            bottom_right: Point::new(x + width, y + height),
        }
    }

    /// Corners in clockwise drawing order (TL, TR, BR, BL)
    pub fn corners_clockwise(&self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    /// Midpoint of the raw top-left and bottom-right corners
    pub fn raw_center(&self) -> Point {
        self.top_left.midpoint(&self.bottom_right)
    }

    /// Box spanned by this quad, assuming it is already upright.
    ///
    /// Origin is the smaller of the top-left/bottom-right coordinates, width
    /// comes from the top edge and height from the left edge.
    pub fn to_box(&self) -> AxisAlignedBox {
        AxisAlignedBox {
            x: self.top_left.x.min(self.bottom_right.x),
            y: self.top_left.y.min(self.bottom_right.y),
            width: (self.top_right.x - self.top_left.x).abs(),
            height: (self.bottom_left.y - self.top_left.y).abs(),
        }
    }

    /// Apply `f` to every corner
    pub fn map(&self, f: impl Fn(Point) -> Point) -> Self {
        Self {
            top_left: f(self.top_left),
            top_right: f(self.top_right),
            bottom_left: f(self.bottom_left),
            bottom_right: f(self.bottom_right),
        }
    }
}

/// Axis-aligned rectangle used for containment and overlap tests
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisAlignedBox {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Horizontal extent
    pub width: f32,
    /// Vertical extent
    pub height: f32,
}

impl AxisAlignedBox {
    /// Create a box from origin and extent
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box of the given size centered on `center`
    pub fn from_center(center: Point, size: Size) -> Self {
        Self {
            x: center.x - size.width / 2.0,
            y: center.y - size.height / 2.0,
            width: size.width,
            height: size.height,
        }
    }

    /// Right edge
    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge
    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    /// Center of the box
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Area (zero for degenerate boxes)
    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// True when the box covers no area
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Overlapping region of two boxes, if they share any interior.
    ///
    /// Boxes that only touch along an edge or a corner, and degenerate boxes,
    /// have no intersection.
    pub fn intersection(&self, other: &AxisAlignedBox) -> Option<AxisAlignedBox> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.max_x().min(other.max_x());
        let y1 = self.max_y().min(other.max_y());
        let overlap = AxisAlignedBox::new(x0, y0, x1 - x0, y1 - y0);
        if overlap.is_empty() {
            None
        } else {
            Some(overlap)
        }
    }

    /// Strict interior overlap test
    pub fn intersects(&self, other: &AxisAlignedBox) -> bool {
        self.intersection(other).is_some()
    }

    /// The box's corners as an upright quad
    pub fn to_quad(&self) -> QuadBounds {
        QuadBounds::from_rect(self.x, self.y, self.width, self.height)
    }
}
