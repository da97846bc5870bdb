// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer window geometry in physical pixels.
//!
//! Window hosts speak in physical (DPI-scaled) integer coordinates, so the
//! non-client side of this crate does too: [`PhysPoint`], [`PhysSize`] and
//! [`PhysRect`] mirror the host's native units exactly, with no rounding
//! surprises at odd scale factors. The composition side works in logical
//! float coordinates and uses [`kurbo::Rect`] for that; [`PhysRect::to_kurbo`]
//! is the one-way bridge.
//!
//! Rects are edge-based (`left`/`top`/`right`/`bottom`) rather than
//! origin-plus-size, matching how hosts report window bounds and how frame
//! margins apply to them.

use core::fmt;

use kurbo::Rect;

/// A point in physical pixels.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct PhysPoint {
    /// Horizontal position.
    pub x: i32,
    /// Vertical position.
    pub y: i32,
}

impl PhysPoint {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A size in physical pixels.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct PhysSize {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl PhysSize {
    /// Creates a size.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle in physical pixels, stored as its four edges.
///
/// Edges follow screen convention: `top < bottom` for a non-empty rect, and
/// `right`/`bottom` are exclusive when used as pixel bounds.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PhysRect {
    /// Left edge.
    pub left: i32,
    /// Top edge.
    pub top: i32,
    /// Right edge.
    pub right: i32,
    /// Bottom edge.
    pub bottom: i32,
}

impl PhysRect {
    /// Creates a rect from its four edges.
    #[must_use]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Creates a rect from an origin and a size.
    #[must_use]
    pub const fn from_origin_size(origin: PhysPoint, size: PhysSize) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            right: origin.x + size.width,
            bottom: origin.y + size.height,
        }
    }

    /// Returns the width, which is negative for an inverted rect.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Returns the height, which is negative for an inverted rect.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Returns the top-left corner.
    #[must_use]
    pub const fn origin(&self) -> PhysPoint {
        PhysPoint {
            x: self.left,
            y: self.top,
        }
    }

    /// Returns the size.
    #[must_use]
    pub const fn size(&self) -> PhysSize {
        PhysSize {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Returns `true` if `p` lies inside the rect.
    ///
    /// The left and top edges are inclusive, the right and bottom edges
    /// exclusive.
    #[must_use]
    pub const fn contains(&self, p: PhysPoint) -> bool {
        p.x >= self.left && p.x < self.right && p.y >= self.top && p.y < self.bottom
    }

    /// Converts into a float rect for the composition side.
    #[must_use]
    pub fn to_kurbo(&self) -> Rect {
        Rect::new(
            f64::from(self.left),
            f64::from(self.top),
            f64::from(self.right),
            f64::from(self.bottom),
        )
    }
}

impl fmt::Debug for PhysRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PhysRect({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// One of the two window axes.
///
/// Hosts may report different resize border thicknesses per axis, so metric
/// queries take the axis they apply to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Axis {
    /// The horizontal axis (left and right borders).
    X,
    /// The vertical axis (top and bottom borders).
    Y,
}

/// Per-edge frame margins in physical pixels, as passed to the host when
/// extending the frame into the client area.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct FrameMargins {
    /// Left margin.
    pub left: i32,
    /// Top margin.
    pub top: i32,
    /// Right margin.
    pub right: i32,
    /// Bottom margin.
    pub bottom: i32,
}

impl FrameMargins {
    /// Margins extending only the top edge, the shape used for a hidden
    /// title bar with an intact shadow.
    #[must_use]
    pub const fn top_only(top: i32) -> Self {
        Self {
            left: 0,
            top,
            right: 0,
            bottom: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_width_height() {
        let r = PhysRect::new(10, 20, 110, 70);
        assert_eq!(r.width(), 100);
        assert_eq!(r.height(), 50);
        assert_eq!(r.origin(), PhysPoint::new(10, 20));
        assert_eq!(r.size(), PhysSize::new(100, 50));
    }

    #[test]
    fn contains_is_half_open() {
        let r = PhysRect::new(0, 0, 800, 31);
        assert!(r.contains(PhysPoint::new(0, 0)));
        assert!(r.contains(PhysPoint::new(799, 30)));
        assert!(!r.contains(PhysPoint::new(800, 0)));
        assert!(!r.contains(PhysPoint::new(0, 31)));
    }

    #[test]
    fn from_origin_size_round_trips() {
        let r = PhysRect::from_origin_size(PhysPoint::new(5, 7), PhysSize::new(20, 10));
        assert_eq!(r, PhysRect::new(5, 7, 25, 17));
    }

    #[test]
    fn to_kurbo_preserves_edges() {
        let r = PhysRect::new(0, 31, 800, 600).to_kurbo();
        assert_eq!(r, Rect::new(0.0, 31.0, 800.0, 600.0));
    }
}
