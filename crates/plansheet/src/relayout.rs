//! Relayout of a sheet after one diagram is moved or rescaled.
//!
//! [`move_diagram`] ties the coordinate mapper and the impact calculator
//! together: it places the moved diagram, works out which lines and labels
//! fall inside its new page box, and returns their new page positions.

use indexmap::IndexMap;
use log::{debug, info};

use plansheet_core::{
    geometry::{Bounds, Page, Point},
    identifier::Id,
    model::{Attachment, Diagram, Label, Sheet},
};

use crate::{
    error::PlanSheetError,
    impact::{AffectedElements, LabelAnchor, LineBox, compute_affected},
    mapper::{CoordinateMapper, DiagramTransform},
    sheet::{self, SheetIndex},
};

/// The new placement of a diagram on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagramPlacement {
    origin_page_offset: Point<Page>,
    zoom_scale: Option<f64>,
}

impl DiagramPlacement {
    /// Moves the diagram origin to `origin_page_offset`, keeping its scale.
    pub fn new(origin_page_offset: Point<Page>) -> Self {
        Self {
            origin_page_offset,
            zoom_scale: None,
        }
    }

    /// Also replaces the zoom scale.
    pub fn with_zoom_scale(mut self, zoom_scale: f64) -> Self {
        self.zoom_scale = Some(zoom_scale);
        self
    }

    pub fn origin_page_offset(&self) -> Point<Page> {
        self.origin_page_offset
    }

    pub fn zoom_scale(&self) -> Option<f64> {
        self.zoom_scale
    }

    fn apply(&self, diagram: &Diagram) -> Diagram {
        let moved = diagram
            .clone()
            .with_origin_page_offset(self.origin_page_offset);
        match self.zoom_scale {
            Some(zoom_scale) => moved.with_zoom_scale(zoom_scale),
            None => moved,
        }
    }
}

/// A line re-mapped to the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    id: Id,
    points: Vec<Point<Page>>,
}

impl PlacedLine {
    pub fn id(&self) -> Id {
        self.id
    }

    /// Page positions of the line's coordinates, in line order.
    pub fn points(&self) -> &[Point<Page>] {
        &self.points
    }
}

/// A label anchor after the move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedLabel {
    id: Id,
    anchor: Point<Page>,
}

impl PlacedLabel {
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn anchor(&self) -> Point<Page> {
        self.anchor
    }
}

/// Outcome of moving a diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Relayout {
    diagram_bounds: Bounds<Page>,
    affected: AffectedElements,
    lines: Vec<PlacedLine>,
    labels: Vec<PlacedLabel>,
}

impl Relayout {
    /// The moved diagram's new page box.
    pub fn diagram_bounds(&self) -> Bounds<Page> {
        self.diagram_bounds
    }

    pub fn affected(&self) -> &AffectedElements {
        &self.affected
    }

    /// New page positions of the affected lines.
    pub fn lines(&self) -> &[PlacedLine] {
        &self.lines
    }

    /// New anchors of the affected labels.
    pub fn labels(&self) -> &[PlacedLabel] {
        &self.labels
    }
}

/// Moves `diagram_id` to `placement` and lays out the affected elements.
///
/// Lines are mapped through their own diagram's transform, so lines of other
/// diagrams are only affected when they overlap the new box. Labels attached
/// to the moved diagram (directly or through one of its lines) follow it:
/// their anchor is mapped back to ground with the old transform and onto the
/// page with the new one. All other labels keep their anchor.
///
/// Lines of other diagrams without a valid zoom scale are not on the page yet
/// and are skipped. When the moved diagram had no zoom scale before the move,
/// its attached labels keep their anchor.
///
/// # Errors
///
/// - [`PlanSheetError::InvalidSheet`] when the snapshot fails validation.
/// - [`PlanSheetError::Configuration`] when the moved diagram is unknown or
///   has no valid zoom scale after the move.
pub fn move_diagram(
    sheet: &Sheet,
    diagram_id: Id,
    placement: DiagramPlacement,
) -> Result<Relayout, PlanSheetError> {
    sheet::validate(sheet)?;
    let index = SheetIndex::new(sheet);

    let before = CoordinateMapper::new(sheet.diagrams());
    // Absent when the diagram is being given its first zoom scale.
    let old_transform = DiagramTransform::for_diagram(before.diagram(diagram_id)?).ok();

    let diagrams: Vec<Diagram> = sheet
        .diagrams()
        .iter()
        .map(|diagram| {
            if diagram.id() == diagram_id {
                placement.apply(diagram)
            } else {
                diagram.clone()
            }
        })
        .collect();
    let after = CoordinateMapper::new(&diagrams);
    let new_transform = after.transform(diagram_id)?;
    let diagram_bounds = after.diagram_page_bounds(diagram_id)?;

    info!(
        diagram:% = diagram_id,
        zoom_scale = new_transform.zoom_scale(),
        origin:? = new_transform.origin();
        "Moving diagram"
    );

    let mut line_boxes: Vec<LineBox> = Vec::new();
    for line in sheet.lines() {
        if let Err(err) = after.transform(line.diagram()) {
            debug!(
                line:% = line.id(),
                diagram:% = line.diagram(),
                err:%;
                "Skipping line of unplaced diagram"
            );
            continue;
        }
        line_boxes.extend(after.line_segments(line, |id| index.position(id))?);
    }

    let anchors: IndexMap<Id, Point<Page>> = sheet
        .labels()
        .iter()
        .map(|label| {
            let anchor = match &old_transform {
                Some(old) if follows_diagram(label, diagram_id, &index) => {
                    reproject(label.anchor(), old, &new_transform)
                }
                _ => label.anchor(),
            };
            (label.id(), anchor)
        })
        .collect();
    let label_anchors: Vec<LabelAnchor> = anchors
        .iter()
        .map(|(&id, &anchor)| LabelAnchor::new(id, anchor))
        .collect();

    let affected = compute_affected(diagram_id, diagram_bounds, &line_boxes, &label_anchors);

    let lines = affected
        .lines()
        .iter()
        .filter_map(|&id| index.line(id))
        .map(|line| {
            Ok(PlacedLine {
                id: line.id(),
                points: after.line_page_points(line, |id| index.position(id))?,
            })
        })
        .collect::<Result<Vec<_>, PlanSheetError>>()?;

    let labels = affected
        .labels()
        .iter()
        .filter_map(|&id| anchors.get(&id).map(|&anchor| PlacedLabel { id, anchor }))
        .collect();

    debug!(
        diagram:% = diagram_id,
        bounds:? = diagram_bounds,
        lines = affected.lines().len(),
        labels = affected.labels().len();
        "Relayout complete"
    );

    Ok(Relayout {
        diagram_bounds,
        affected,
        lines,
        labels,
    })
}

fn follows_diagram(label: &Label, diagram_id: Id, index: &SheetIndex<'_>) -> bool {
    match label.attached_to() {
        Some(Attachment::Diagram(id)) => id == diagram_id,
        Some(Attachment::Line(id)) => index
            .line(id)
            .is_some_and(|line| line.diagram() == diagram_id),
        None => false,
    }
}

fn reproject(anchor: Point<Page>, from: &DiagramTransform, to: &DiagramTransform) -> Point<Page> {
    to.ground_to_page(from.page_to_ground(anchor))
}
