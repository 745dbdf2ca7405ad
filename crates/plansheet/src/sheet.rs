//! Sheet snapshot indexing and validation.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::debug;

use plansheet_core::{
    geometry::{Ground, Point},
    identifier::Id,
    model::{Attachment, Coordinate, CoordinateKind, Line, Sheet},
};

use crate::error::PlanSheetError;

/// Id lookups over a sheet snapshot.
#[derive(Debug)]
pub struct SheetIndex<'a> {
    coordinates: IndexMap<Id, &'a Coordinate>,
    lines: IndexMap<Id, &'a Line>,
}

impl<'a> SheetIndex<'a> {
    pub fn new(sheet: &'a Sheet) -> Self {
        Self {
            coordinates: sheet.coordinates().iter().map(|c| (c.id(), c)).collect(),
            lines: sheet.lines().iter().map(|l| (l.id(), l)).collect(),
        }
    }

    /// Ground position of a coordinate.
    pub fn position(&self, coordinate: Id) -> Option<Point<Ground>> {
        self.coordinates.get(&coordinate).map(|c| c.position())
    }

    pub fn line(&self, id: Id) -> Option<&'a Line> {
        self.lines.get(&id).copied()
    }
}

/// Checks the structural invariants of a sheet snapshot.
///
/// # Errors
///
/// Returns [`PlanSheetError::InvalidSheet`] for:
/// - duplicate diagram, coordinate, line, or label ids
/// - diagrams whose bounding extent is reversed or not finite
/// - lines with fewer than two coordinates
/// - lines referencing unknown diagrams or coordinates
/// - local coordinates referenced by more than one line
/// - labels attached to unknown diagrams or lines
pub fn validate(sheet: &Sheet) -> Result<(), PlanSheetError> {
    check_unique("diagram", sheet.diagrams().iter().map(|d| d.id()))?;
    check_unique("coordinate", sheet.coordinates().iter().map(|c| c.id()))?;
    check_unique("line", sheet.lines().iter().map(|l| l.id()))?;
    check_unique("label", sheet.labels().iter().map(|l| l.id()))?;

    for diagram in sheet.diagrams() {
        let extent = diagram.bounding_extent();
        if !extent.is_ordered() || !extent.is_finite() {
            return Err(PlanSheetError::InvalidSheet(format!(
                "diagram `{}` has a reversed or non-finite bounding extent",
                diagram.id()
            )));
        }
    }

    let index = SheetIndex::new(sheet);
    let mut local_users: HashMap<Id, Id> = HashMap::new();

    for line in sheet.lines() {
        if line.coordinates().len() < 2 {
            return Err(PlanSheetError::InvalidSheet(format!(
                "line `{}` has {} coordinate(s), at least 2 are required",
                line.id(),
                line.coordinates().len()
            )));
        }

        if sheet.diagram(line.diagram()).is_none() {
            return Err(PlanSheetError::InvalidSheet(format!(
                "line `{}` belongs to unknown diagram `{}`",
                line.id(),
                line.diagram()
            )));
        }

        for &id in line.coordinates() {
            let coordinate = index.coordinates.get(&id).ok_or_else(|| {
                PlanSheetError::InvalidSheet(format!(
                    "line `{}` references unknown coordinate `{id}`",
                    line.id()
                ))
            })?;

            if coordinate.kind() == CoordinateKind::Local {
                let user = *local_users.entry(id).or_insert(line.id());
                if user != line.id() {
                    return Err(PlanSheetError::InvalidSheet(format!(
                        "local coordinate `{id}` is used by lines `{user}` and `{}`",
                        line.id()
                    )));
                }
            }
        }
    }

    for label in sheet.labels() {
        let known = match label.attached_to() {
            None => true,
            Some(Attachment::Diagram(id)) => sheet.diagram(id).is_some(),
            Some(Attachment::Line(id)) => index.line(id).is_some(),
        };
        if !known {
            return Err(PlanSheetError::InvalidSheet(format!(
                "label `{}` is attached to an unknown element",
                label.id()
            )));
        }
    }

    debug!(
        diagrams = sheet.diagrams().len(),
        coordinates = sheet.coordinates().len(),
        lines = sheet.lines().len(),
        labels = sheet.labels().len();
        "Sheet validated"
    );
    Ok(())
}

fn check_unique(kind: &str, ids: impl Iterator<Item = Id>) -> Result<(), PlanSheetError> {
    let mut seen = indexmap::IndexSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(PlanSheetError::InvalidSheet(format!(
                "duplicate {kind} id `{id}`"
            )));
        }
    }
    Ok(())
}
