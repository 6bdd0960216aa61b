// crates/tessel-core/src/geometry.rs
use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Integer pixel position. Layout works on whole pixels, so points are plain `IVec2`s.
pub type Point = IVec2;

/// Integer pixel extent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const ZERO: Size = Size { width: 0, height: 0 };

    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn square(side: i32) -> Self {
        Self::new(side, side)
    }

    /// Component-wise maximum.
    pub fn max(self, other: Size) -> Size {
        Size::new(self.width.max(other.width), self.height.max(other.height))
    }

    /// Component-wise minimum.
    pub fn min(self, other: Size) -> Size {
        Size::new(self.width.min(other.width), self.height.min(other.height))
    }

    /// Negative components are clamped to zero.
    pub fn clamp_non_negative(self) -> Size {
        self.max(Size::ZERO)
    }

    pub fn grow(self, dw: i32, dh: i32) -> Size {
        Size::new(self.width + dw, self.height + dh)
    }

    pub fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn as_ivec2(self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }
}

impl From<IVec2> for Size {
    fn from(value: IVec2) -> Self {
        Size::new(value.x, value.y)
    }
}

/// Axis-aligned rectangle with its origin at the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            origin: IVec2::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn from_parts(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn x(&self) -> i32 {
        self.origin.x
    }

    pub fn y(&self) -> i32 {
        self.origin.y
    }

    pub fn width(&self) -> i32 {
        self.size.width
    }

    pub fn height(&self) -> i32 {
        self.size.height
    }

    pub fn right(&self) -> i32 {
        self.origin.x + self.size.width
    }

    pub fn bottom(&self) -> i32 {
        self.origin.y + self.size.height
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x() && point.x < self.right() && point.y >= self.y() && point.y < self.bottom()
    }

    /// Shrinks the rectangle by the given insets. The resulting size never goes negative.
    pub fn deflate(&self, left: i32, top: i32, right: i32, bottom: i32) -> Rect {
        Rect::from_parts(
            self.origin + IVec2::new(left, top),
            self.size.grow(-(left + right), -(top + bottom)).clamp_non_negative(),
        )
    }
}

/// Primary axis of a linear container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn other(self) -> Orientation {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Extent of `size` along this axis.
    pub fn main(self, size: Size) -> i32 {
        match self {
            Orientation::Horizontal => size.width,
            Orientation::Vertical => size.height,
        }
    }

    /// Extent of `size` across this axis.
    pub fn cross(self, size: Size) -> i32 {
        self.other().main(size)
    }

    pub fn main_of_point(self, point: Point) -> i32 {
        match self {
            Orientation::Horizontal => point.x,
            Orientation::Vertical => point.y,
        }
    }

    /// Builds a size from its main and cross extents.
    pub fn size(self, main: i32, cross: i32) -> Size {
        match self {
            Orientation::Horizontal => Size::new(main, cross),
            Orientation::Vertical => Size::new(cross, main),
        }
    }

    pub fn point(self, main: i32, cross: i32) -> Point {
        match self {
            Orientation::Horizontal => IVec2::new(main, cross),
            Orientation::Vertical => IVec2::new(cross, main),
        }
    }

    /// Rectangle whose main/cross origin and extents are given along this axis.
    pub fn rect(self, main_pos: i32, cross_pos: i32, main: i32, cross: i32) -> Rect {
        Rect::from_parts(self.point(main_pos, cross_pos), self.size(main, cross))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_projection() {
        let size = Size::new(30, 10);
        assert_eq!(Orientation::Horizontal.main(size), 30);
        assert_eq!(Orientation::Horizontal.cross(size), 10);
        assert_eq!(Orientation::Vertical.main(size), 10);
        assert_eq!(Orientation::Vertical.size(4, 7), Size::new(7, 4));
        assert_eq!(Orientation::Vertical.rect(5, 1, 4, 7), Rect::new(1, 5, 7, 4));
    }

    #[test]
    fn test_rect_containment_and_deflate() {
        let rect = Rect::new(10, 10, 20, 20);
        assert!(rect.contains(IVec2::new(10, 10)));
        assert!(!rect.contains(IVec2::new(30, 15)));

        assert_eq!(rect.deflate(2, 3, 4, 5), Rect::new(12, 13, 14, 12));
        assert_eq!(rect.deflate(15, 0, 15, 0).size, Size::new(0, 20));
    }
}
