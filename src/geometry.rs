//! Core geometry types: Offset, Size, Rect, Bounds.
//!
//! Document-space coordinates in CSS pixels. `Offset` mirrors a node's page
//! offset (distance from the document's top-left corner), `Size` its outer
//! box, and `Bounds` the vertical scroll range in which a sticky element is
//! allowed to follow the viewport.

use std::ops::{Add, Sub};

/// CSS pixel value.
pub type Px = f64;

// ---------------------------------------------------------------------------
// Offset
// ---------------------------------------------------------------------------

/// A position relative to the document origin.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Offset {
    pub left: Px,
    pub top: Px,
}

impl Offset {
    /// Create a new offset.
    #[inline]
    pub const fn new(left: Px, top: Px) -> Self {
        Self { left, top }
    }
}

impl Add for Offset {
    type Output = Offset;
    #[inline]
    fn add(self, rhs: Offset) -> Offset {
        Offset { left: self.left + rhs.left, top: self.top + rhs.top }
    }
}

impl Sub for Offset {
    type Output = Offset;
    #[inline]
    fn sub(self, rhs: Offset) -> Offset {
        Offset { left: self.left - rhs.left, top: self.top - rhs.top }
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// An outer box size (border box plus padding, as `outerWidth`/`outerHeight`).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Size {
    pub width: Px,
    pub height: Px,
}

impl Size {
    /// A zero-sized size.
    pub const ZERO: Size = Size { width: 0.0, height: 0.0 };

    /// Create a new size.
    #[inline]
    pub const fn new(width: Px, height: Px) -> Self {
        Self { width, height }
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// A laid-out box in document coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: Px,
    pub top: Px,
    pub width: Px,
    pub height: Px,
}

impl Rect {
    /// An empty rect at the origin.
    pub const EMPTY: Rect = Rect { left: 0.0, top: 0.0, width: 0.0, height: 0.0 };

    /// Create a new rect.
    #[inline]
    pub const fn new(left: Px, top: Px, width: Px, height: Px) -> Self {
        Self { left, top, width, height }
    }

    /// Top-left corner.
    #[inline]
    pub const fn offset(self) -> Offset {
        Offset { left: self.left, top: self.top }
    }

    /// Width and height.
    #[inline]
    pub const fn size(self) -> Size {
        Size { width: self.width, height: self.height }
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// Vertical scroll range that drives the sticky state machine.
///
/// Past `top` the element sticks to the viewport; once its trailing edge
/// reaches `bottom` it is bound to the end of its context.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bounds {
    pub top: Px,
    pub bottom: Px,
}

impl Bounds {
    /// Create new bounds.
    #[inline]
    pub const fn new(top: Px, bottom: Px) -> Self {
        Self { top, bottom }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_arithmetic() {
        let a = Offset::new(10.0, 20.0);
        let b = Offset::new(3.0, 5.0);
        assert_eq!(a + b, Offset::new(13.0, 25.0));
        assert_eq!(a - b, Offset::new(7.0, 15.0));
    }

    #[test]
    fn rect_edges() {
        let r = Rect::new(10.0, 500.0, 300.0, 400.0);
        assert_eq!(r.offset(), Offset::new(10.0, 500.0));
        assert_eq!(r.size(), Size::new(300.0, 400.0));
    }

    #[test]
    fn bounds_default_is_origin() {
        assert_eq!(Bounds::default(), Bounds::new(0.0, 0.0));
    }
}
