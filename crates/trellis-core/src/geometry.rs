#![forbid(unsafe_code)]

//! Pixel geometry: rectangles, sizes, points and four-sided spacing.
//!
//! All values are integer pixels in window coordinates (origin at top-left,
//! y grows downwards). Extents may transiently go negative during
//! arithmetic; `validate` clamps them back to zero before a value leaves the
//! layout engine.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
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
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// The empty size.
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a new size.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Check if either extent is zero or negative.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Clamp negative extents to zero.
    #[inline]
    #[must_use]
    pub const fn validate(self) -> Self {
        Self {
            width: if self.width < 0 { 0 } else { self.width },
            height: if self.height < 0 { 0 } else { self.height },
        }
    }

    /// Grow by the given sides (e.g. re-adding padding or a margin).
    #[inline]
    #[must_use]
    pub const fn inflate(self, sides: Sides) -> Self {
        Self {
            width: self.width.saturating_add(sides.horizontal_sum()),
            height: self.height.saturating_add(sides.vertical_sum()),
        }
    }

    /// Shrink by the given sides, never below zero.
    #[inline]
    #[must_use]
    pub const fn deflate(self, sides: Sides) -> Self {
        Self {
            width: self.width.saturating_sub(sides.horizontal_sum()),
            height: self.height.saturating_sub(sides.vertical_sum()),
        }
        .validate()
    }

    /// Component-wise maximum.
    #[inline]
    #[must_use]
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }
}

/// A rectangle described by its four edges.
///
/// `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// Create a rectangle from its edges.
    #[inline]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Create a rectangle from an origin and a size.
    #[inline]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(
            origin.x,
            origin.y,
            origin.x.saturating_add(size.width),
            origin.y.saturating_add(size.height),
        )
    }

    /// Width (may be negative on an unvalidated rect).
    #[inline]
    pub const fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    /// Height (may be negative on an unvalidated rect).
    #[inline]
    pub const fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Width and height.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Top-left corner.
    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Check if the rectangle has zero (or negative) area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Clamp negative extents to zero by pulling `right`/`bottom` back to
    /// `left`/`top`.
    #[inline]
    #[must_use]
    pub const fn validate(self) -> Self {
        Self {
            left: self.left,
            top: self.top,
            right: if self.right < self.left {
                self.left
            } else {
                self.right
            },
            bottom: if self.bottom < self.top {
                self.top
            } else {
                self.bottom
            },
        }
    }

    /// Shrink the rectangle by the given sides. The result is validated.
    #[must_use]
    pub const fn inner(&self, sides: Sides) -> Rect {
        Rect {
            left: self.left.saturating_add(sides.left),
            top: self.top.saturating_add(sides.top),
            right: self.right.saturating_sub(sides.right),
            bottom: self.bottom.saturating_sub(sides.bottom),
        }
        .validate()
    }
}

/// Four-sided spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sides {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

/// Spacing owned by a child, outside its placed rectangle.
pub type Margin = Sides;

/// Spacing owned by a container, inside its rectangle.
pub type Padding = Sides;

impl Sides {
    /// The same spacing on every side.
    pub const fn all(val: i32) -> Self {
        Self {
            top: val,
            right: val,
            bottom: val,
            left: val,
        }
    }

    /// Only `left` and `right` set.
    pub const fn horizontal(val: i32) -> Self {
        Self {
            top: 0,
            right: val,
            bottom: 0,
            left: val,
        }
    }

    /// Only `top` and `bottom` set.
    pub const fn vertical(val: i32) -> Self {
        Self {
            top: val,
            right: 0,
            bottom: val,
            left: 0,
        }
    }

    /// Spacing given clockwise from the top.
    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Horizontal spacing: `left + right`.
    #[inline]
    pub const fn horizontal_sum(&self) -> i32 {
        self.left.saturating_add(self.right)
    }

    /// Vertical spacing: `top + bottom`.
    #[inline]
    pub const fn vertical_sum(&self) -> i32 {
        self.top.saturating_add(self.bottom)
    }
}

impl From<i32> for Sides {
    fn from(val: i32) -> Self {
        Self::all(val)
    }
}

impl From<(i32, i32)> for Sides {
    fn from((vertical, horizontal): (i32, i32)) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }
}

impl From<(i32, i32, i32, i32)> for Sides {
    fn from((top, right, bottom, left): (i32, i32, i32, i32)) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}
