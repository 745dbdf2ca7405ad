//! Ground ↔ page coordinate mapping.
//!
//! Every diagram places its ground coordinates (metres) on the page
//! (centimetres) with a uniform scale and a translation:
//!
//! ```text
//! page = ground × 100 / zoom_scale + origin_page_offset
//! ground = (page − origin_page_offset) × zoom_scale / 100
//! ```
//!
//! Both axes share one factor and there is no rotation, so the map is a
//! similarity transform. [`DiagramTransform`] holds the validated factor and
//! offset of one diagram; [`CoordinateMapper`] looks diagrams up by id.

use indexmap::IndexMap;
use log::trace;

use plansheet_core::{
    geometry::{Bounds, Ground, Page, Point},
    identifier::Id,
    model::{Diagram, Line},
    units::CENTIMETRES_PER_METRE,
};

use crate::{
    error::{ConfigurationError, PlanSheetError},
    impact::LineBox,
};

/// The validated ground → page transform of a single diagram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagramTransform {
    zoom_scale: f64,
    origin: Point<Page>,
}

impl DiagramTransform {
    /// Builds the transform of `diagram`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingZoomScale`] when the diagram has no
    /// zoom scale and [`ConfigurationError::InvalidZoomScale`] when it is zero,
    /// negative, or not finite.
    pub fn for_diagram(diagram: &Diagram) -> Result<Self, ConfigurationError> {
        let zoom_scale = diagram
            .zoom_scale()
            .ok_or(ConfigurationError::MissingZoomScale(diagram.id()))?;

        if !zoom_scale.is_finite() || zoom_scale <= 0.0 {
            return Err(ConfigurationError::InvalidZoomScale {
                id: diagram.id(),
                zoom_scale,
            });
        }

        Ok(Self {
            zoom_scale,
            origin: diagram.origin_page_offset(),
        })
    }

    /// Ground metres per page metre.
    pub fn zoom_scale(&self) -> f64 {
        self.zoom_scale
    }

    /// Page position of the ground origin.
    pub fn origin(&self) -> Point<Page> {
        self.origin
    }

    /// Maps a ground point to the page.
    pub fn ground_to_page(&self, point: Point<Ground>) -> Point<Page> {
        Point::new(
            point.x() * CENTIMETRES_PER_METRE / self.zoom_scale + self.origin.x(),
            point.y() * CENTIMETRES_PER_METRE / self.zoom_scale + self.origin.y(),
        )
    }

    /// Maps a page point back to the ground.
    pub fn page_to_ground(&self, point: Point<Page>) -> Point<Ground> {
        Point::new(
            (point.x() - self.origin.x()) * self.zoom_scale / CENTIMETRES_PER_METRE,
            (point.y() - self.origin.y()) * self.zoom_scale / CENTIMETRES_PER_METRE,
        )
    }

    /// Maps a ground box to the page. Ordering is preserved since the scale is positive.
    pub fn ground_bounds_to_page(&self, bounds: Bounds<Ground>) -> Bounds<Page> {
        Bounds::from_corners(
            self.ground_to_page(bounds.min_point()),
            self.ground_to_page(bounds.max_point()),
        )
    }

    /// Maps a page box back to the ground.
    pub fn page_bounds_to_ground(&self, bounds: Bounds<Page>) -> Bounds<Ground> {
        Bounds::from_corners(
            self.page_to_ground(bounds.min_point()),
            self.page_to_ground(bounds.max_point()),
        )
    }
}

/// Looks up diagrams of a sheet snapshot and maps points through them.
///
/// The mapper borrows the snapshot and keeps no state of its own; when ids
/// repeat, the first diagram with that id is used.
///
/// # Examples
///
/// ```
/// # use plansheet::mapper::CoordinateMapper;
/// # use plansheet_core::{geometry::{Bounds, Point}, model::Diagram};
/// let diagrams = vec![Diagram::new(
///     "D1",
///     Some(100.0),
///     Point::new(0.0, 0.0),
///     Bounds::new(-50.0, -50.0, 50.0, 50.0),
/// )];
/// let mapper = CoordinateMapper::new(&diagrams);
///
/// let page = mapper.ground_to_page("D1".into(), Point::new(30.0, -20.0)).unwrap();
/// assert_eq!((page.x(), page.y()), (30.0, -20.0));
/// ```
#[derive(Debug)]
pub struct CoordinateMapper<'a> {
    diagrams: IndexMap<Id, &'a Diagram>,
}

impl<'a> CoordinateMapper<'a> {
    /// Indexes the given diagrams by id.
    pub fn new(diagrams: &'a [Diagram]) -> Self {
        let mut index = IndexMap::with_capacity(diagrams.len());
        for diagram in diagrams {
            index.entry(diagram.id()).or_insert(diagram);
        }
        Self { diagrams: index }
    }

    /// Returns the diagram with the given id.
    pub fn diagram(&self, id: Id) -> Result<&'a Diagram, ConfigurationError> {
        self.diagrams
            .get(&id)
            .copied()
            .ok_or(ConfigurationError::UnknownDiagram(id))
    }

    /// Returns the validated transform of the given diagram.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] when the diagram is unknown or its
    /// zoom scale is missing or invalid.
    pub fn transform(&self, id: Id) -> Result<DiagramTransform, PlanSheetError> {
        let diagram = self.diagram(id)?;
        Ok(DiagramTransform::for_diagram(diagram)?)
    }

    /// Maps a ground point of diagram `id` to the page.
    pub fn ground_to_page(
        &self,
        id: Id,
        point: Point<Ground>,
    ) -> Result<Point<Page>, PlanSheetError> {
        let page = self.transform(id)?.ground_to_page(point);
        trace!(diagram:% = id, ground:? = point, page:? = page; "Mapped ground point");
        Ok(page)
    }

    /// Maps a page point back to the ground of diagram `id`.
    pub fn page_to_ground(
        &self,
        id: Id,
        point: Point<Page>,
    ) -> Result<Point<Ground>, PlanSheetError> {
        let ground = self.transform(id)?.page_to_ground(point);
        trace!(diagram:% = id, page:? = point, ground:? = ground; "Mapped page point");
        Ok(ground)
    }

    /// Returns the page box of diagram `id`'s bounding extent.
    pub fn diagram_page_bounds(&self, id: Id) -> Result<Bounds<Page>, PlanSheetError> {
        let diagram = self.diagram(id)?;
        let transform = DiagramTransform::for_diagram(diagram)?;
        Ok(transform.ground_bounds_to_page(diagram.bounding_extent()))
    }

    /// Resolves and maps the coordinates of `line` through its diagram.
    ///
    /// `resolve` looks a coordinate id up in the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`PlanSheetError::InvalidSheet`] when a referenced coordinate
    /// cannot be resolved, and a configuration error when the line's diagram
    /// cannot be mapped.
    pub fn line_page_points(
        &self,
        line: &Line,
        resolve: impl Fn(Id) -> Option<Point<Ground>>,
    ) -> Result<Vec<Point<Page>>, PlanSheetError> {
        let transform = self.transform(line.diagram())?;
        line.coordinates()
            .iter()
            .map(|&coordinate| {
                resolve(coordinate)
                    .map(|ground| transform.ground_to_page(ground))
                    .ok_or_else(|| {
                        PlanSheetError::InvalidSheet(format!(
                            "line `{}` references unknown coordinate `{coordinate}`",
                            line.id()
                        ))
                    })
            })
            .collect()
    }

    /// Returns one page box per rendered segment of `line`.
    ///
    /// Segment `i` joins points `i` and `i + 1` and is named
    /// `<line>_<i>` (see [`Id::segment`]).
    pub fn line_segments(
        &self,
        line: &Line,
        resolve: impl Fn(Id) -> Option<Point<Ground>>,
    ) -> Result<Vec<LineBox>, PlanSheetError> {
        let points = self.line_page_points(line, resolve)?;
        Ok(points
            .windows(2)
            .enumerate()
            .map(|(index, pair)| {
                let bounds = Bounds::from_corners(pair[0], pair[0]).include(pair[1]);
                LineBox::new(line.id().segment(index), bounds)
            })
            .collect())
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn ground_point_strategy() -> impl Strategy<Value = Point<Ground>> {
        (-100_000.0f64..100_000.0, -100_000.0f64..100_000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn transform_strategy() -> impl Strategy<Value = DiagramTransform> {
        (1.0f64..20_000.0, -100.0f64..100.0, -100.0f64..100.0).prop_map(|(scale, x, y)| {
            let diagram = Diagram::new("P", Some(scale), Point::new(x, y), Bounds::default());
            DiagramTransform::for_diagram(&diagram).expect("positive scale is valid")
        })
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Mapping to the page and back returns the ground point.
    fn check_round_trip(t: DiagramTransform, p: Point<Ground>) -> Result<(), TestCaseError> {
        let back = t.page_to_ground(t.ground_to_page(p));
        prop_assert!(approx_eq!(f64, back.x(), p.x(), epsilon = 1e-6));
        prop_assert!(approx_eq!(f64, back.y(), p.y(), epsilon = 1e-6));
        Ok(())
    }

    /// Page distances are ground distances × 100 / zoom_scale.
    fn check_uniform_scale(
        t: DiagramTransform,
        p1: Point<Ground>,
        p2: Point<Ground>,
    ) -> Result<(), TestCaseError> {
        let (q1, q2) = (t.ground_to_page(p1), t.ground_to_page(p2));
        let ground_distance = (p1.x() - p2.x()).hypot(p1.y() - p2.y());
        let page_distance = (q1.x() - q2.x()).hypot(q1.y() - q2.y());
        let expected = ground_distance * CENTIMETRES_PER_METRE / t.zoom_scale();
        prop_assert!(approx_eq!(
            f64,
            page_distance,
            expected,
            epsilon = 1e-6 * (1.0 + expected)
        ));
        Ok(())
    }

    /// The ground origin lands on the page offset.
    fn check_origin_maps_to_offset(t: DiagramTransform) -> Result<(), TestCaseError> {
        let origin = t.ground_to_page(Point::default());
        prop_assert!(approx_eq!(f64, origin.x(), t.origin().x()));
        prop_assert!(approx_eq!(f64, origin.y(), t.origin().y()));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn round_trip(t in transform_strategy(), p in ground_point_strategy()) {
            check_round_trip(t, p)?;
        }

        #[test]
        fn uniform_scale(
            t in transform_strategy(),
            p1 in ground_point_strategy(),
            p2 in ground_point_strategy()
        ) {
            check_uniform_scale(t, p1, p2)?;
        }

        #[test]
        fn origin_maps_to_offset(t in transform_strategy()) {
            check_origin_maps_to_offset(t)?;
        }
    }
}
