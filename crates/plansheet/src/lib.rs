//! Plan sheet layout - coordinate mapping, scale fitting and move impact.
//!
//! A plan sheet places several survey diagrams on one printed page. Each
//! diagram draws its ground coordinates (metres) at its own zoom scale from its
//! own page origin. This crate maps between the two spaces, picks zoom scales
//! that fit content onto the printable area, and works out which lines and
//! labels must be laid out again when a diagram moves.

pub mod config;
pub mod impact;
pub mod mapper;
pub mod relayout;
pub mod scale;
pub mod sheet;

mod error;

pub use plansheet_core::{geometry, identifier, model, units};

pub use error::{ConfigurationError, PlanSheetError};

use indexmap::IndexSet;
use log::{debug, info};

use geometry::{Ground, Page, Point};
use identifier::Id;
use model::Sheet;

use config::AppConfig;
use mapper::CoordinateMapper;
use relayout::{DiagramPlacement, Relayout};
use scale::{FitRequest, ScaleCalculator, ZoomFit};
use sheet::SheetIndex;

/// Entry point for laying out a plan sheet snapshot.
///
/// # Examples
///
/// ```rust
/// use plansheet::{LayoutEngine, config::AppConfig, geometry::{Bounds, Point}, model::*};
///
/// let sheet = Sheet::new(
///     vec![Diagram::new(
///         "D1",
///         Some(500.0),
///         Point::new(2.0, 3.0),
///         Bounds::new(0.0, 0.0, 80.0, 60.0),
///     )],
///     vec![],
///     vec![],
///     vec![],
/// );
///
/// let engine = LayoutEngine::new(AppConfig::default());
/// let page = engine
///     .ground_to_page(&sheet, "D1".into(), Point::new(10.0, 0.0))
///     .expect("Failed to map point");
/// assert_eq!(page, Point::new(4.0, 3.0));
///
/// // Or use default config
/// let engine = LayoutEngine::default();
/// ```
#[derive(Debug, Default)]
pub struct LayoutEngine {
    config: AppConfig,
}

impl LayoutEngine {
    /// Create a new layout engine with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Page and scale settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Map a ground point of `diagram` to page centimetres.
    ///
    /// # Errors
    ///
    /// Returns [`PlanSheetError::Configuration`] when the diagram is unknown
    /// or has no valid zoom scale.
    pub fn ground_to_page(
        &self,
        sheet: &Sheet,
        diagram: Id,
        point: Point<Ground>,
    ) -> Result<Point<Page>, PlanSheetError> {
        CoordinateMapper::new(sheet.diagrams()).ground_to_page(diagram, point)
    }

    /// Map a page point back to the ground of `diagram`.
    ///
    /// # Errors
    ///
    /// Same as [`LayoutEngine::ground_to_page`].
    pub fn page_to_ground(
        &self,
        sheet: &Sheet,
        diagram: Id,
        point: Point<Page>,
    ) -> Result<Point<Ground>, PlanSheetError> {
        CoordinateMapper::new(sheet.diagrams()).page_to_ground(diagram, point)
    }

    /// Compute the zoom scale that fits `diagram`'s content onto the
    /// printable page area.
    ///
    /// The content is every coordinate used by the diagram's lines. A diagram
    /// without lines is fitted by its declared bounding extent.
    ///
    /// # Errors
    ///
    /// Returns `PlanSheetError` when the sheet is invalid, the diagram is
    /// unknown, the page area is not positive, or the content is degenerate
    /// and no fallback scale is configured.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use plansheet::{LayoutEngine, geometry::{Bounds, Point}, model::*, scale::Binding};
    ///
    /// let sheet = Sheet::new(
    ///     vec![Diagram::new("D1", None, Point::default(), Bounds::new(0.0, 0.0, 390.0, 100.0))],
    ///     vec![],
    ///     vec![],
    ///     vec![],
    /// );
    ///
    /// let fit = LayoutEngine::default()
    ///     .fit_diagram(&sheet, "D1".into())
    ///     .expect("Failed to fit diagram");
    /// assert_eq!(fit.binding(), Binding::LongestSide);
    /// ```
    pub fn fit_diagram(&self, sheet: &Sheet, diagram: Id) -> Result<ZoomFit, PlanSheetError> {
        sheet::validate(sheet)?;
        let target = sheet
            .diagram(diagram)
            .ok_or(ConfigurationError::UnknownDiagram(diagram))?;

        let index = SheetIndex::new(sheet);
        let coordinates: IndexSet<Id> = sheet
            .lines_of(diagram)
            .flat_map(|line| line.coordinates().iter().copied())
            .collect();
        let points: Vec<Point<Ground>> = coordinates
            .iter()
            .filter_map(|&id| index.position(id))
            .collect();

        info!(diagram:% = diagram, coordinates = points.len(); "Fitting diagram");

        let request =
            FitRequest::from_points(&points, target.bounding_extent()).with_kind(target.kind());
        let printable = self.config.page().printable_area();
        let calculator = ScaleCalculator::new(self.config.scale(), printable)?;
        let fit = calculator.compute_zoom_scale(&request)?;

        debug!(
            diagram:% = diagram,
            scale = fit.scale(),
            binding:? = fit.binding();
            "Diagram fitted"
        );
        Ok(fit)
    }

    /// Move `diagram` to a new page placement and lay out what it now covers.
    ///
    /// See [`relayout::move_diagram`].
    ///
    /// # Errors
    ///
    /// Returns `PlanSheetError` for invalid sheets and unmappable diagrams.
    pub fn move_diagram(
        &self,
        sheet: &Sheet,
        diagram: Id,
        placement: DiagramPlacement,
    ) -> Result<Relayout, PlanSheetError> {
        relayout::move_diagram(sheet, diagram, placement)
    }
}
