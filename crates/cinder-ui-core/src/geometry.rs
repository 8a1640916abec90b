//! Basic geometry types for the widget system.
//!
//! All coordinates are integer pixels. Widget rectangles are local to the
//! parent's content area; conversion to absolute coordinates is the widget
//! tree's job.

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Component-wise addition.
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A size in 2D space (width and height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    /// Check if the size has zero (or negative) area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

impl From<(i32, i32)> for Size {
    fn from((width, height): (i32, i32)) -> Self {
        Self { width, height }
    }
}

/// A rectangle defined by origin and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Create a new rectangle from coordinates and dimensions.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    /// Create a rectangle from an origin point and a size.
    #[inline]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// The left edge (x coordinate).
    #[inline]
    pub const fn left(&self) -> i32 {
        self.origin.x
    }

    /// The top edge (y coordinate).
    #[inline]
    pub const fn top(&self) -> i32 {
        self.origin.y
    }

    /// The right edge (x + width).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.origin.x + self.size.width
    }

    /// The bottom edge (y + height).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.origin.y + self.size.height
    }

    /// The horizontal center.
    #[inline]
    pub const fn center_x(&self) -> i32 {
        self.origin.x + self.size.width / 2
    }

    /// The vertical center.
    #[inline]
    pub const fn center_y(&self) -> i32 {
        self.origin.y + self.size.height / 2
    }

    /// The width of the rectangle.
    #[inline]
    pub const fn width(&self) -> i32 {
        self.size.width
    }

    /// The height of the rectangle.
    #[inline]
    pub const fn height(&self) -> i32 {
        self.size.height
    }

    /// Check if a point lies inside the rectangle.
    ///
    /// The left/top edges are inclusive, the right/bottom edges exclusive.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Return the rectangle translated by (dx, dy).
    #[inline]
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            origin: self.origin.offset(dx, dy),
            size: self.size,
        }
    }

    /// Intersect two rectangles. Returns `Rect::ZERO` when they are disjoint.
    pub fn intersection(&self, other: &Rect) -> Rect {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= left || bottom <= top {
            return Rect::ZERO;
        }
        Rect::new(left, top, right - left, bottom - top)
    }

    /// Check if the rectangle overlaps another.
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.intersection(other).size.is_empty()
    }

    /// Return the rectangle shrunk by the given edges (used for padding).
    pub fn inset(&self, edges: Edges) -> Rect {
        Rect::new(
            self.left() + edges.left,
            self.top() + edges.top,
            (self.width() - edges.left - edges.right).max(0),
            (self.height() - edges.top - edges.bottom).max(0),
        )
    }
}

/// Four-sided integer margins or padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Edges {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Edges {
    /// Create edges with individual values.
    #[inline]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// All four edges zero.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// The same value on all four edges.
    #[inline]
    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Total horizontal extent (left + right).
    #[inline]
    pub const fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Total vertical extent (top + bottom).
    #[inline]
    pub const fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}
