//! CLI logic for the plan sheet tool.
//!
//! Loads a sheet snapshot and configuration, runs one layout operation, and
//! prints the result as TOML.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};

use std::{fs, io, path::Path};

use log::info;
use serde::Serialize;

use plansheet::{
    LayoutEngine, PlanSheetError,
    geometry::{Bounds, Ground, Page, Point},
    identifier::Id,
    model::Sheet,
    relayout::{DiagramPlacement, Relayout},
    scale::{Binding, ZoomFit},
};

/// Run the plan sheet CLI application
///
/// Executes the requested command and writes its report to stdout.
///
/// # Errors
///
/// Returns `PlanSheetError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Invalid sheet snapshots
/// - Mapping, fitting, or relayout errors
pub fn run(args: &Args) -> Result<(), PlanSheetError> {
    let report = execute(args)?;
    print!("{report}");
    Ok(())
}

/// Executes the requested command and returns its report as TOML.
///
/// # Errors
///
/// See [`run`].
pub fn execute(args: &Args) -> Result<String, PlanSheetError> {
    info!(sheet_path = args.sheet, command:? = args.command; "Processing sheet");

    let app_config = config::load_config(args.config.as_ref())?;
    let sheet = load_sheet(&args.sheet)?;
    let engine = LayoutEngine::new(app_config);

    match &args.command {
        Command::Map {
            diagram,
            x,
            y,
            inverse,
        } => {
            let diagram = Id::new(diagram);
            let report = if *inverse {
                let page = Point::new(*x, *y);
                let ground = engine.page_to_ground(&sheet, diagram, page)?;
                MapReport {
                    diagram,
                    ground,
                    page,
                }
            } else {
                let ground = Point::new(*x, *y);
                let page = engine.ground_to_page(&sheet, diagram, ground)?;
                MapReport {
                    diagram,
                    ground,
                    page,
                }
            };
            to_toml(&report)
        }
        Command::Fit { diagram } => {
            let diagram = Id::new(diagram);
            let fit = engine.fit_diagram(&sheet, diagram)?;
            to_toml(&FitReport::new(diagram, fit))
        }
        Command::Move {
            diagram,
            x,
            y,
            zoom_scale,
        } => {
            let diagram = Id::new(diagram);
            let mut placement = DiagramPlacement::new(Point::new(*x, *y));
            if let Some(zoom_scale) = zoom_scale {
                placement = placement.with_zoom_scale(*zoom_scale);
            }
            let relayout = engine.move_diagram(&sheet, diagram, placement)?;
            info!(
                diagram:% = diagram,
                lines = relayout.lines().len(),
                labels = relayout.labels().len();
                "Diagram moved"
            );
            to_toml(&MoveReport::new(&relayout))
        }
    }
}

/// Reads a sheet snapshot from a TOML file.
///
/// # Errors
///
/// Returns [`PlanSheetError::Io`] when the file cannot be read and
/// [`PlanSheetError::InvalidSheet`] when it does not describe a sheet.
pub fn load_sheet(path: impl AsRef<Path>) -> Result<Sheet, PlanSheetError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|err| {
        PlanSheetError::InvalidSheet(format!("failed to parse {}: {err}", path.display()))
    })
}

fn to_toml(report: &impl Serialize) -> Result<String, PlanSheetError> {
    toml::to_string(report).map_err(|err| PlanSheetError::Io(io::Error::other(err)))
}

#[derive(Debug, Serialize)]
struct MapReport {
    diagram: Id,
    ground: Point<Ground>,
    page: Point<Page>,
}

#[derive(Debug, Serialize)]
struct FitReport {
    diagram: Id,
    zoom_scale: f64,
    binding: &'static str,
}

impl FitReport {
    fn new(diagram: Id, fit: ZoomFit) -> Self {
        let binding = match fit.binding() {
            Binding::Width => "width",
            Binding::Height => "height",
            Binding::LongestSide => "longest-side",
            Binding::SystemReference => "system-reference",
            Binding::DegenerateFallback => "degenerate-fallback",
        };
        Self {
            diagram,
            zoom_scale: fit.scale(),
            binding,
        }
    }
}

#[derive(Debug, Serialize)]
struct MoveReport {
    diagram: Id,
    affected_lines: Vec<Id>,
    affected_labels: Vec<Id>,
    bounds: Bounds<Page>,
    lines: Vec<LineReport>,
    labels: Vec<LabelReport>,
}

#[derive(Debug, Serialize)]
struct LineReport {
    id: Id,
    points: Vec<Point<Page>>,
}

#[derive(Debug, Serialize)]
struct LabelReport {
    id: Id,
    anchor: Point<Page>,
}

impl MoveReport {
    fn new(relayout: &Relayout) -> Self {
        let affected = relayout.affected();
        Self {
            diagram: affected.diagram(),
            affected_lines: affected.lines().iter().copied().collect(),
            affected_labels: affected.labels().iter().copied().collect(),
            bounds: relayout.diagram_bounds(),
            lines: relayout
                .lines()
                .iter()
                .map(|line| LineReport {
                    id: line.id(),
                    points: line.points().to_vec(),
                })
                .collect(),
            labels: relayout
                .labels()
                .iter()
                .map(|label| LabelReport {
                    id: label.id(),
                    anchor: label.anchor(),
                })
                .collect(),
        }
    }
}
