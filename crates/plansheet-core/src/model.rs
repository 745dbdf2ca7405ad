//! Snapshot model of a plan sheet.
//!
//! A [`Sheet`] is the complete set of diagrams, coordinates, lines, and labels
//! handed to the layout functions for a single operation. The records are plain
//! values; nothing here holds onto a live scene graph or performs I/O.
//!
//! All types implement [`serde::Deserialize`] so a snapshot can be loaded from
//! an external source:
//!
//! ```
//! # use plansheet_core::model::Sheet;
//! let sheet: Sheet = toml::from_str(r#"
//!     [[diagrams]]
//!     id = "D1"
//!     zoom_scale = 500.0
//!     origin_page_offset = { x = 2.0, y = 3.0 }
//!     bounding_extent = { min_x = 0.0, min_y = 0.0, max_x = 80.0, max_y = 60.0 }
//!
//!     [[coordinates]]
//!     id = "c1"
//!     position = { x = 0.0, y = 0.0 }
//!
//!     [[coordinates]]
//!     id = "c2"
//!     position = { x = 80.0, y = 60.0 }
//!
//!     [[lines]]
//!     id = "L1"
//!     diagram = "D1"
//!     coordinates = ["c1", "c2"]
//!
//!     [[labels]]
//!     id = "T1"
//!     anchor = { x = 5.0, y = 5.0 }
//!     text = "Lot 1"
//!     attached_to = { line = "L1" }
//! "#).unwrap();
//!
//! assert_eq!(sheet.diagrams().len(), 1);
//! assert_eq!(sheet.lines()[0].coordinates().len(), 2);
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    geometry::{Bounds, Ground, Page, Point},
    identifier::Id,
};

/// How a diagram came into existence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagramKind {
    /// Drawn by a user.
    #[default]
    UserDefined,
    /// Generated from survey data; small ones keep a reference scale.
    SystemGenerated,
}

/// A named region of the sheet drawn at one scale and page offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    id: Id,
    /// Ground metres per page metre. `None` until a scale has been assigned.
    #[serde(default)]
    zoom_scale: Option<f64>,
    /// Page position (centimetres) of the diagram's ground origin.
    #[serde(default)]
    origin_page_offset: Point<Page>,
    bounding_extent: Bounds<Ground>,
    #[serde(default)]
    kind: DiagramKind,
}

impl Diagram {
    /// Creates a user-defined diagram.
    pub fn new(
        id: impl Into<Id>,
        zoom_scale: Option<f64>,
        origin_page_offset: Point<Page>,
        bounding_extent: Bounds<Ground>,
    ) -> Self {
        Self {
            id: id.into(),
            zoom_scale,
            origin_page_offset,
            bounding_extent,
            kind: DiagramKind::UserDefined,
        }
    }

    /// Sets the diagram kind (builder style).
    pub fn with_kind(mut self, kind: DiagramKind) -> Self {
        self.kind = kind;
        self
    }

    /// Replaces the page offset of the ground origin.
    pub fn with_origin_page_offset(mut self, offset: Point<Page>) -> Self {
        self.origin_page_offset = offset;
        self
    }

    /// Replaces the zoom scale.
    pub fn with_zoom_scale(mut self, zoom_scale: f64) -> Self {
        self.zoom_scale = Some(zoom_scale);
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn zoom_scale(&self) -> Option<f64> {
        self.zoom_scale
    }

    pub fn origin_page_offset(&self) -> Point<Page> {
        self.origin_page_offset
    }

    pub fn bounding_extent(&self) -> Bounds<Ground> {
        self.bounding_extent
    }

    pub fn kind(&self) -> DiagramKind {
        self.kind
    }
}

/// Whether a coordinate may be referenced by more than one line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoordinateKind {
    /// Reusable across lines (e.g. a shared boundary mark).
    Shared,
    /// Belongs to a single line.
    #[default]
    Local,
}

/// A ground-space point that lines refer to by identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    id: Id,
    position: Point<Ground>,
    #[serde(default)]
    kind: CoordinateKind,
}

impl Coordinate {
    pub fn new(id: impl Into<Id>, position: Point<Ground>, kind: CoordinateKind) -> Self {
        Self {
            id: id.into(),
            position,
            kind,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn position(&self) -> Point<Ground> {
        self.position
    }

    pub fn kind(&self) -> CoordinateKind {
        self.kind
    }
}

/// An ordered polyline through coordinates of one diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    id: Id,
    diagram: Id,
    coordinates: Vec<Id>,
}

impl Line {
    pub fn new(id: impl Into<Id>, diagram: impl Into<Id>, coordinates: Vec<Id>) -> Self {
        Self {
            id: id.into(),
            diagram: diagram.into(),
            coordinates,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    /// The diagram whose transform places this line on the page.
    pub fn diagram(&self) -> Id {
        self.diagram
    }

    /// Referenced coordinate ids, in drawing order.
    pub fn coordinates(&self) -> &[Id] {
        &self.coordinates
    }
}

/// What a label sits next to. This is a back-reference only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attachment {
    Diagram(Id),
    Line(Id),
}

/// A piece of text anchored at a page position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    id: Id,
    anchor: Point<Page>,
    #[serde(default)]
    text: String,
    /// Rotation in degrees, counter-clockwise.
    #[serde(default)]
    rotation: f64,
    #[serde(default)]
    attached_to: Option<Attachment>,
}

impl Label {
    pub fn new(id: impl Into<Id>, anchor: Point<Page>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            anchor,
            text: text.into(),
            rotation: 0.0,
            attached_to: None,
        }
    }

    /// Sets the rotation in degrees (builder style).
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets the attachment back-reference (builder style).
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attached_to = Some(attachment);
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn anchor(&self) -> Point<Page> {
        self.anchor
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn attached_to(&self) -> Option<Attachment> {
        self.attached_to
    }
}

/// The snapshot of everything on a plan sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    #[serde(default)]
    diagrams: Vec<Diagram>,
    #[serde(default)]
    coordinates: Vec<Coordinate>,
    #[serde(default)]
    lines: Vec<Line>,
    #[serde(default)]
    labels: Vec<Label>,
}

impl Sheet {
    pub fn new(
        diagrams: Vec<Diagram>,
        coordinates: Vec<Coordinate>,
        lines: Vec<Line>,
        labels: Vec<Label>,
    ) -> Self {
        Self {
            diagrams,
            coordinates,
            lines,
            labels,
        }
    }

    pub fn diagrams(&self) -> &[Diagram] {
        &self.diagrams
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Looks up a diagram by id.
    pub fn diagram(&self, id: Id) -> Option<&Diagram> {
        self.diagrams.iter().find(|diagram| diagram.id == id)
    }

    /// Returns the lines drawn in the given diagram.
    pub fn lines_of(&self, diagram: Id) -> impl Iterator<Item = &Line> {
        self.lines.iter().filter(move |line| line.diagram == diagram)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagram_defaults() {
        let diagram: Diagram = toml::from_str(
            r#"
            id = "D1"
            bounding_extent = { min_x = 0.0, min_y = 0.0, max_x = 10.0, max_y = 10.0 }
            "#,
        )
        .unwrap();
        assert_eq!(diagram.zoom_scale(), None);
        assert_eq!(diagram.origin_page_offset(), Point::default());
        assert_eq!(diagram.kind(), DiagramKind::UserDefined);
    }

    #[test]
    fn test_system_generated_kind() {
        let diagram: Diagram = toml::from_str(
            r#"
            id = "D2"
            zoom_scale = 250.0
            kind = "system-generated"
            bounding_extent = { min_x = 0.0, min_y = 0.0, max_x = 10.0, max_y = 10.0 }
            "#,
        )
        .unwrap();
        assert_eq!(diagram.kind(), DiagramKind::SystemGenerated);
        assert_eq!(diagram.zoom_scale(), Some(250.0));
    }

    #[test]
    fn test_coordinate_kind_default_is_local() {
        let coordinate: Coordinate =
            toml::from_str("id = \"c1\"\nposition = { x = 1.0, y = 2.0 }").unwrap();
        assert_eq!(coordinate.kind(), CoordinateKind::Local);
    }

    #[test]
    fn test_label_attachment() {
        let label: Label = toml::from_str(
            "id = \"T1\"\nanchor = { x = 1.0, y = 2.0 }\nattached_to = { diagram = \"D1\" }",
        )
        .unwrap();
        assert_eq!(label.attached_to(), Some(Attachment::Diagram(Id::new("D1"))));
        assert_eq!(label.text(), "");
    }

    #[test]
    fn test_lines_of() {
        let sheet = Sheet::new(
            Vec::new(),
            Vec::new(),
            vec![
                Line::new("L1", "D1", vec![Id::new("a"), Id::new("b")]),
                Line::new("L2", "D2", vec![Id::new("c"), Id::new("d")]),
                Line::new("L3", "D1", vec![Id::new("e"), Id::new("f")]),
            ],
            Vec::new(),
        );
        let ids: Vec<_> = sheet.lines_of(Id::new("D1")).map(Line::id).collect();
        assert_eq!(ids, vec![Id::new("L1"), Id::new("L3")]);
    }
}
