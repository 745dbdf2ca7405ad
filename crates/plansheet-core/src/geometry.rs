//! Geometric primitives for plan sheet layout.
//!
//! This module provides the value types used throughout the plan sheet crates
//! for positions, extents, and bounding boxes of diagrams, lines, and labels.
//!
//! # Overview
//!
//! - [`Ground`] / [`Page`] - Zero-sized markers naming a coordinate space
//! - [`Point`] - A 2D coordinate tagged with its coordinate space
//! - [`Bounds`] - An axis-aligned bounding box tagged with its coordinate space
//! - [`Size`] - Width and height dimensions
//! - [`Insets`] - Border widths for four sides
//!
//! # Coordinate Spaces
//!
//! Two coordinate spaces exist and must never be silently mixed:
//!
//! - **Ground**: real-world planar coordinates in metres.
//! - **Page**: centimetres on the printable plan sheet.
//!
//! A `Point<Ground>` can only become a `Point<Page>` by going through a
//! diagram's transform, so the compiler rejects code that mixes points from
//! different spaces:
//!
//! ```compile_fail
//! # use plansheet_core::geometry::{Bounds, Ground, Page, Point};
//! let ground: Point<Ground> = Point::new(1.0, 2.0);
//! let page: Point<Page> = Point::new(1.0, 2.0);
//! let _ = Bounds::from_corners(ground, page);
//! ```

use std::{fmt, marker::PhantomData};

use serde::{Deserialize, Serialize};

/// Names a coordinate space for display purposes.
pub trait CoordinateSpace {
    /// Short name used in debug output.
    const NAME: &'static str;
}

/// Marker type for ground coordinates (metres).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ground {}

/// Marker type for page coordinates (centimetres on the printable sheet).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {}

impl CoordinateSpace for Ground {
    const NAME: &'static str = "Ground";
}

impl CoordinateSpace for Page {
    const NAME: &'static str = "Page";
}

impl fmt::Debug for Ground {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

/// A 2D point in the coordinate space `S`.
///
/// # Examples
///
/// ```
/// # use plansheet_core::geometry::{Ground, Page, Point};
/// let corner: Point<Ground> = Point::new(10.0, 20.0);
/// assert_eq!(corner.x(), 10.0);
/// assert_eq!(corner.y(), 20.0);
///
/// let origin: Point<Page> = Point::default();
/// assert_eq!(origin, Point::new(0.0, 0.0));
/// ```
pub struct Point<S> {
    x: f64,
    y: f64,
    _space: PhantomData<S>,
}

impl<S> Point<S> {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            _space: PhantomData,
        }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Returns true if both coordinates are finite (not NaN or infinite).
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

// Manual impls so that `S` needs no bounds.
impl<S> Clone for Point<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Point<S> {}

impl<S> PartialEq for Point<S> {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl<S: CoordinateSpace> fmt::Debug for Point<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(&format!("Point<{}>", S::NAME))
            .field("x", &self.x)
            .field("y", &self.y)
            .finish()
    }
}

impl<S> Default for Point<S> {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl<S> Serialize for Point<S> {
    fn serialize<Ser: serde::Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Point", 2)?;
        state.serialize_field("x", &self.x)?;
        state.serialize_field("y", &self.y)?;
        state.end()
    }
}

impl<'de, S> Deserialize<'de> for Point<S> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct PointData {
            x: f64,
            y: f64,
        }
        let data = PointData::deserialize(deserializer)?;
        Ok(Point::new(data.x, data.y))
    }
}

/// Represents the dimensions of an extent with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f64 {
        self.height
    }

    /// Returns the larger of the two dimensions
    pub fn longest_side(self) -> f64 {
        self.width.max(self.height)
    }

    /// Returns a new Size with the insets removed from both dimensions.
    ///
    /// Used to derive a printable area from a page size and its border.
    /// The result may be negative when the insets exceed the size.
    pub fn sub_padding(self, insets: Insets) -> Self {
        Self {
            width: self.width - insets.horizontal_sum(),
            height: self.height - insets.vertical_sum(),
        }
    }

    /// Returns true if both dimensions are finite
    pub fn is_finite(self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }

    /// Returns true if both dimensions are strictly positive and finite
    pub fn is_positive(self) -> bool {
        self.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// An axis-aligned bounding box in the coordinate space `S`.
///
/// Construction does not reorder the coordinates; a box with `min > max` can
/// be represented and is reported by [`Bounds::is_ordered`].
pub struct Bounds<S> {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
    _space: PhantomData<S>,
}

impl<S> Bounds<S> {
    /// Creates a new bounds from explicit coordinates
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
            _space: PhantomData,
        }
    }

    /// Creates a new bounds from its minimum and maximum corners
    pub fn from_corners(min: Point<S>, max: Point<S>) -> Self {
        Self::new(min.x, min.y, max.x, max.y)
    }

    /// Returns the smallest bounds enclosing every point, or `None` when
    /// the iterator is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use plansheet_core::geometry::{Bounds, Ground, Point};
    /// let points: [Point<Ground>; 3] = [
    ///     Point::new(3.0, -1.0),
    ///     Point::new(-2.0, 4.0),
    ///     Point::new(0.0, 0.0),
    /// ];
    /// let bounds = Bounds::from_points(points).unwrap();
    /// assert_eq!(bounds.min_x(), -2.0);
    /// assert_eq!(bounds.max_y(), 4.0);
    ///
    /// assert!(Bounds::<Ground>::from_points([]).is_none());
    /// ```
    pub fn from_points(points: impl IntoIterator<Item = Point<S>>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Self::from_corners(p, p),
                Some(bounds) => bounds.include(p),
            })
        })
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f64 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f64 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f64 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f64 {
        self.max_y
    }

    /// Returns the minimum corner as a Point
    pub fn min_point(self) -> Point<S> {
        Point::new(self.min_x, self.min_y)
    }

    /// Returns the maximum corner as a Point
    pub fn max_point(self) -> Point<S> {
        Point::new(self.max_x, self.max_y)
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f64 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f64 {
        self.max_y - self.min_y
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Returns true if all coordinates are finite
    pub fn is_finite(self) -> bool {
        self.min_point().is_finite() && self.max_point().is_finite()
    }

    /// Returns true if min <= max on both axes
    pub fn is_ordered(self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y
    }

    /// Grows the bounds so that it also encloses `point`.
    pub fn include(self, point: Point<S>) -> Self {
        Self::new(
            self.min_x.min(point.x),
            self.min_y.min(point.y),
            self.max_x.max(point.x),
            self.max_y.max(point.y),
        )
    }

    /// Returns true if `point` lies inside the closed box.
    ///
    /// Points on an edge or a corner are inside.
    ///
    /// # Examples
    ///
    /// ```
    /// # use plansheet_core::geometry::{Bounds, Page, Point};
    /// let bounds: Bounds<Page> = Bounds::new(0.0, 0.0, 100.0, 100.0);
    /// assert!(bounds.contains_point(Point::new(50.0, 50.0)));
    /// assert!(bounds.contains_point(Point::new(100.0, 0.0)));
    /// assert!(!bounds.contains_point(Point::new(150.0, 50.0)));
    /// ```
    pub fn contains_point(self, point: Point<S>) -> bool {
        self.min_x <= point.x
            && point.x <= self.max_x
            && self.min_y <= point.y
            && point.y <= self.max_y
    }

    /// Returns true if the two closed boxes share at least one point.
    ///
    /// Boxes that only touch along an edge or at a corner overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// # use plansheet_core::geometry::{Bounds, Page};
    /// let diagram: Bounds<Page> = Bounds::new(0.0, 0.0, 100.0, 100.0);
    /// assert!(diagram.overlaps(&Bounds::new(90.0, 90.0, 110.0, 110.0)));
    /// assert!(diagram.overlaps(&Bounds::new(100.0, 20.0, 120.0, 40.0)));
    /// assert!(!diagram.overlaps(&Bounds::new(101.0, 20.0, 120.0, 40.0)));
    /// ```
    pub fn overlaps(&self, other: &Self) -> bool {
        !(self.min_y > other.max_y
            || self.max_y < other.min_y
            || self.min_x > other.max_x
            || self.max_x < other.min_x)
    }
}

impl<S> Clone for Bounds<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Bounds<S> {}

impl<S> PartialEq for Bounds<S> {
    fn eq(&self, other: &Self) -> bool {
        self.min_x == other.min_x
            && self.min_y == other.min_y
            && self.max_x == other.max_x
            && self.max_y == other.max_y
    }
}

impl<S: CoordinateSpace> fmt::Debug for Bounds<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(&format!("Bounds<{}>", S::NAME))
            .field("min_x", &self.min_x)
            .field("min_y", &self.min_y)
            .field("max_x", &self.max_x)
            .field("max_y", &self.max_y)
            .finish()
    }
}

impl<S> Default for Bounds<S> {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

impl<S> Serialize for Bounds<S> {
    fn serialize<Ser: serde::Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Bounds", 4)?;
        state.serialize_field("min_x", &self.min_x)?;
        state.serialize_field("min_y", &self.min_y)?;
        state.serialize_field("max_x", &self.max_x)?;
        state.serialize_field("max_y", &self.max_y)?;
        state.end()
    }
}

impl<'de, S> Deserialize<'de> for Bounds<S> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct BoundsData {
            min_x: f64,
            min_y: f64,
            max_x: f64,
            max_y: f64,
        }
        let data = BoundsData::deserialize(deserializer)?;
        Ok(Bounds::new(data.min_x, data.min_y, data.max_x, data.max_y))
    }
}

/// Border widths around a page, with potentially different values for each side
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    #[serde(default)]
    top: f64,
    #[serde(default)]
    right: f64,
    #[serde(default)]
    bottom: f64,
    #[serde(default)]
    left: f64,
}

impl Insets {
    /// Creates new insets with the given values for each side
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates insets with the same value on every side
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Sum of the left and right insets
    pub fn horizontal_sum(self) -> f64 {
        self.left + self.right
    }

    /// Sum of the top and bottom insets
    pub fn vertical_sum(self) -> f64 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_new() {
        let point: Point<Ground> = Point::new(3.5, 4.2);
        assert_eq!(point.x(), 3.5);
        assert_eq!(point.y(), 4.2);
    }

    #[test]
    fn test_point_default() {
        let point: Point<Page> = Point::default();
        assert_eq!(point, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_point_is_finite() {
        assert!(Point::<Ground>::new(1.0, 2.0).is_finite());
        assert!(!Point::<Ground>::new(f64::NAN, 2.0).is_finite());
        assert!(!Point::<Ground>::new(1.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_point_debug_names_space() {
        let point: Point<Ground> = Point::new(1.0, 2.0);
        let text = format!("{point:?}");
        assert!(text.starts_with("Point<Ground>"), "{text}");
    }

    #[test]
    fn test_size_longest_side() {
        assert_eq!(Size::new(3.0, 7.0).longest_side(), 7.0);
        assert_eq!(Size::new(9.0, 7.0).longest_side(), 9.0);
    }

    #[test]
    fn test_size_sub_padding() {
        let page = Size::new(0.42, 0.297);
        let printable = page.sub_padding(Insets::uniform(0.01));
        assert!((printable.width() - 0.40).abs() < 1e-12);
        assert!((printable.height() - 0.277).abs() < 1e-12);
    }

    #[test]
    fn test_size_is_positive() {
        assert!(Size::new(1.0, 1.0).is_positive());
        assert!(!Size::new(0.0, 1.0).is_positive());
        assert!(!Size::new(1.0, f64::NAN).is_positive());
    }

    #[test]
    fn test_bounds_from_points_empty() {
        let bounds = Bounds::<Ground>::from_points(Vec::new());
        assert!(bounds.is_none());
    }

    #[test]
    fn test_bounds_from_single_point() {
        let bounds = Bounds::from_points([Point::<Ground>::new(5.0, 6.0)]).unwrap();
        assert_eq!(bounds.width(), 0.0);
        assert_eq!(bounds.height(), 0.0);
        assert_eq!(bounds.min_point(), Point::new(5.0, 6.0));
    }

    #[test]
    fn test_bounds_to_size() {
        let bounds: Bounds<Page> = Bounds::new(10.0, 20.0, 40.0, 60.0);
        assert_eq!(bounds.to_size(), Size::new(30.0, 40.0));
    }

    #[test]
    fn test_bounds_finite() {
        assert!(Bounds::<Ground>::new(0.0, 0.0, 1.0, 1.0).is_finite());
        assert!(!Bounds::<Ground>::new(0.0, f64::NAN, 1.0, 1.0).is_finite());
        assert!(!Bounds::<Ground>::new(0.0, 0.0, f64::INFINITY, 1.0).is_finite());
    }

    #[test]
    fn test_bounds_contains_point_edges() {
        let bounds: Bounds<Page> = Bounds::new(0.0, 0.0, 100.0, 100.0);
        assert!(bounds.contains_point(Point::new(0.0, 0.0)));
        assert!(bounds.contains_point(Point::new(100.0, 100.0)));
        assert!(bounds.contains_point(Point::new(0.0, 55.0)));
        assert!(!bounds.contains_point(Point::new(-0.001, 55.0)));
        assert!(!bounds.contains_point(Point::new(50.0, 100.001)));
    }

    #[test]
    fn test_bounds_overlap_corner_touch() {
        let a: Bounds<Page> = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let b = Bounds::new(10.0, 10.0, 20.0, 20.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_bounds_disjoint() {
        let a: Bounds<Page> = Bounds::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&Bounds::new(0.0, 10.5, 10.0, 20.0)));
        assert!(!a.overlaps(&Bounds::new(-20.0, 0.0, -10.0, 10.0)));
    }

    #[test]
    fn test_bounds_ordering() {
        assert!(Bounds::<Page>::new(0.0, 0.0, 1.0, 1.0).is_ordered());
        assert!(!Bounds::<Page>::new(2.0, 0.0, 1.0, 1.0).is_ordered());
    }

    #[test]
    fn test_bounds_deserialize() {
        let bounds: Bounds<Ground> =
            toml::from_str("min_x = 1.0\nmin_y = 2.0\nmax_x = 3.0\nmax_y = 4.0\n").unwrap();
        assert_eq!(bounds, Bounds::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn test_insets_partial_deserialize() {
        let insets: Insets = toml::from_str("top = 2.0\nleft = 1.0\n").unwrap();
        assert_eq!(insets, Insets::new(2.0, 0.0, 0.0, 1.0));
    }
}
