// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use core::fmt::Debug;

/// Axis-aligned rectangle in 2D, stored as origin and extent.
///
/// Covers the closed region `[x, x + w] × [y, y + h]`. Extents are not validated: with a
/// negative width or height the predicates below are still applied literally to the
/// computed edges.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Aabb<T> {
    /// Left edge.
    pub x: T,
    /// Top edge.
    pub y: T,
    /// Width.
    pub w: T,
    /// Height.
    pub h: T,
}

/// One of the four equal sub-rectangles of an [`Aabb`].
///
/// Children of a subdivided node are always laid out in this order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Top-left.
    NorthWest,
    /// Top-right.
    NorthEast,
    /// Bottom-left.
    SouthWest,
    /// Bottom-right.
    SouthEast,
}

impl Quadrant {
    /// All quadrants in child order.
    pub const ALL: [Self; 4] = [
        Self::NorthWest,
        Self::NorthEast,
        Self::SouthWest,
        Self::SouthEast,
    ];

    /// Position of this quadrant among a node's children.
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl<T> Aabb<T> {
    /// Create a new AABB from origin and size.
    pub const fn new(x: T, y: T, w: T, h: T) -> Self {
        Self { x, y, w, h }
    }
}

impl<T: Scalar> Aabb<T> {
    /// Right edge (`x + w`).
    #[inline]
    pub fn right(&self) -> T {
        T::add(self.x, self.w)
    }

    /// Bottom edge (`y + h`).
    #[inline]
    pub fn bottom(&self) -> T {
        T::add(self.y, self.h)
    }

    /// Whether the two boxes overlap with non-zero area.
    ///
    /// Boxes that only share an edge or a corner do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Whether `other` lies inside this box. Shared edges count as inside.
    #[inline]
    pub fn contains(&self, other: &Self) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && self.right() >= other.right()
            && self.bottom() >= other.bottom()
    }

    /// One quarter of this box.
    ///
    /// For integer scalars the half extent truncates, so the four quadrants only tile the
    /// box exactly when `w` and `h` are even.
    pub fn quadrant(&self, which: Quadrant) -> Self {
        let hw = T::half(self.w);
        let hh = T::half(self.h);
        let mx = T::add(self.x, hw);
        let my = T::add(self.y, hh);
        match which {
            Quadrant::NorthWest => Self::new(self.x, self.y, hw, hh),
            Quadrant::NorthEast => Self::new(mx, self.y, hw, hh),
            Quadrant::SouthWest => Self::new(self.x, my, hw, hh),
            Quadrant::SouthEast => Self::new(mx, my, hw, hh),
        }
    }

    /// The four quadrants in child order.
    pub fn quadrants(&self) -> [Self; 4] {
        Quadrant::ALL.map(|q| self.quadrant(q))
    }
}

/// Numeric scalar abstraction for quadtree coordinates.
///
/// Only the operations needed to derive edges and split a box in half are required.
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Add two scalar values.
    fn add(a: Self, b: Self) -> Self;

    /// Half of a value. Integer implementations truncate toward zero.
    fn half(v: Self) -> Self;
}

impl Scalar for f32 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn half(v: Self) -> Self {
        v / 2.0
    }
}

impl Scalar for f64 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn half(v: Self) -> Self {
        v / 2.0
    }
}

impl Scalar for i32 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a.saturating_add(b)
    }

    #[inline]
    fn half(v: Self) -> Self {
        v / 2
    }
}

impl Scalar for i64 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a.saturating_add(b)
    }

    #[inline]
    fn half(v: Self) -> Self {
        v / 2
    }
}

#[cfg(feature = "kurbo")]
impl From<kurbo::Rect> for Aabb<f64> {
    fn from(r: kurbo::Rect) -> Self {
        let r = r.abs();
        Self::new(r.x0, r.y0, r.width(), r.height())
    }
}

#[cfg(feature = "kurbo")]
impl From<Aabb<f64>> for kurbo::Rect {
    fn from(a: Aabb<f64>) -> Self {
        Self::new(a.x, a.y, a.right(), a.bottom())
    }
}
