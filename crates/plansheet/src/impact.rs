//! Diagram-move impact calculation.
//!
//! When a diagram is moved or resized, only the lines and labels that end up
//! inside its new page box need to be laid out again. This module decides
//! which ones, from page-space boxes and anchors that were already computed
//! elsewhere.

use indexmap::IndexSet;
use log::debug;

use plansheet_core::{
    geometry::{Bounds, Page, Point},
    identifier::Id,
};

/// The page box of one rendered line element (usually a single segment).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineBox {
    element: Id,
    bounds: Bounds<Page>,
}

impl LineBox {
    /// Creates a line box for the rendered element `element`.
    ///
    /// `element` may be a compound id (`<line>_<segment>`) or a plain line id.
    pub fn new(element: impl Into<Id>, bounds: Bounds<Page>) -> Self {
        Self {
            element: element.into(),
            bounds,
        }
    }

    pub fn element(&self) -> Id {
        self.element
    }

    pub fn bounds(&self) -> Bounds<Page> {
        self.bounds
    }
}

/// The page anchor of one label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelAnchor {
    label: Id,
    anchor: Point<Page>,
}

impl LabelAnchor {
    pub fn new(label: impl Into<Id>, anchor: Point<Page>) -> Self {
        Self {
            label: label.into(),
            anchor,
        }
    }

    pub fn label(&self) -> Id {
        self.label
    }

    pub fn anchor(&self) -> Point<Page> {
        self.anchor
    }
}

/// Lines and labels touched by a diagram's new page box.
///
/// Both collections are sets; their iteration order follows the input order
/// but carries no meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct AffectedElements {
    diagram: Id,
    lines: IndexSet<Id>,
    labels: IndexSet<Id>,
}

impl AffectedElements {
    /// The moved diagram.
    pub fn diagram(&self) -> Id {
        self.diagram
    }

    /// Ids of affected lines (owning line ids, never segment ids).
    pub fn lines(&self) -> &IndexSet<Id> {
        &self.lines
    }

    /// Ids of affected labels.
    pub fn labels(&self) -> &IndexSet<Id> {
        &self.labels
    }

    /// Returns true when nothing is affected.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.labels.is_empty()
    }
}

/// Computes the lines and labels affected by moving `diagram` to `new_bounds`.
///
/// - A label is affected iff its anchor lies in the closed box.
/// - A line is affected iff one of its element boxes overlaps the box;
///   touching edges or corners count.
///
/// Element ids are truncated to their owning line id with [`Id::owner`];
/// empty ids are dropped and duplicates collapse.
///
/// # Examples
///
/// ```
/// # use plansheet::impact::{compute_affected, LabelAnchor, LineBox};
/// # use plansheet_core::{geometry::{Bounds, Point}, identifier::Id};
/// let diagram = Bounds::new(0.0, 0.0, 100.0, 100.0);
/// let lines = [LineBox::new("L1_0", Bounds::new(90.0, 90.0, 110.0, 110.0))];
/// let labels = [
///     LabelAnchor::new("inside", Point::new(50.0, 50.0)),
///     LabelAnchor::new("outside", Point::new(150.0, 50.0)),
/// ];
///
/// let affected = compute_affected(Id::new("D1"), diagram, &lines, &labels);
/// assert!(affected.lines().contains(&Id::new("L1")));
/// assert!(affected.labels().contains(&Id::new("inside")));
/// assert!(!affected.labels().contains(&Id::new("outside")));
/// ```
pub fn compute_affected(
    diagram: Id,
    new_bounds: Bounds<Page>,
    lines: &[LineBox],
    labels: &[LabelAnchor],
) -> AffectedElements {
    let affected_lines: IndexSet<Id> = lines
        .iter()
        .filter(|line| new_bounds.overlaps(&line.bounds))
        .map(|line| line.element.owner())
        .filter(|id| !id.is_empty())
        .collect();

    let affected_labels: IndexSet<Id> = labels
        .iter()
        .filter(|label| new_bounds.contains_point(label.anchor))
        .map(|label| label.label)
        .filter(|id| !id.is_empty())
        .collect();

    debug!(
        diagram:% = diagram,
        candidate_lines = lines.len(),
        candidate_labels = labels.len(),
        affected_lines = affected_lines.len(),
        affected_labels = affected_labels.len();
        "Computed move impact"
    );

    AffectedElements {
        diagram,
        lines: affected_lines,
        labels: affected_labels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagram_box() -> Bounds<Page> {
        Bounds::new(0.0, 0.0, 100.0, 100.0)
    }

    #[test]
    fn test_label_inside_and_outside() {
        let labels = [
            LabelAnchor::new("in", Point::new(50.0, 50.0)),
            LabelAnchor::new("out", Point::new(150.0, 50.0)),
        ];
        let affected = compute_affected(Id::new("D1"), diagram_box(), &[], &labels);
        assert_eq!(affected.labels().len(), 1);
        assert!(affected.labels().contains(&Id::new("in")));
        assert!(affected.lines().is_empty());
    }

    #[test]
    fn test_label_on_edge_is_affected() {
        let labels = [
            LabelAnchor::new("edge", Point::new(100.0, 40.0)),
            LabelAnchor::new("corner", Point::new(0.0, 0.0)),
        ];
        let affected = compute_affected(Id::new("D1"), diagram_box(), &[], &labels);
        assert_eq!(affected.labels().len(), 2);
    }

    #[test]
    fn test_line_overlapping_corner() {
        let lines = [LineBox::new("L1", Bounds::new(90.0, 90.0, 110.0, 110.0))];
        let affected = compute_affected(Id::new("D1"), diagram_box(), &lines, &[]);
        assert!(affected.lines().contains(&Id::new("L1")));
    }

    #[test]
    fn test_line_touching_edge() {
        let lines = [
            LineBox::new("touch", Bounds::new(100.0, 10.0, 120.0, 20.0)),
            LineBox::new("apart", Bounds::new(100.5, 10.0, 120.0, 20.0)),
        ];
        let affected = compute_affected(Id::new("D1"), diagram_box(), &lines, &[]);
        assert!(affected.lines().contains(&Id::new("touch")));
        assert!(!affected.lines().contains(&Id::new("apart")));
    }

    #[test]
    fn test_line_enclosing_diagram() {
        let lines = [LineBox::new("big", Bounds::new(-10.0, -10.0, 200.0, 200.0))];
        let affected = compute_affected(Id::new("D1"), diagram_box(), &lines, &[]);
        assert!(affected.lines().contains(&Id::new("big")));
    }

    #[test]
    fn test_segments_collapse_to_line() {
        let lines = [
            LineBox::new("L7_0", Bounds::new(10.0, 10.0, 20.0, 20.0)),
            LineBox::new("L7_1", Bounds::new(20.0, 20.0, 30.0, 30.0)),
            LineBox::new("L7_2", Bounds::new(500.0, 500.0, 600.0, 600.0)),
            LineBox::new("L8_0", Bounds::new(50.0, 50.0, 60.0, 60.0)),
        ];
        let affected = compute_affected(Id::new("D1"), diagram_box(), &lines, &[]);
        let ids: Vec<String> = affected.lines().iter().map(Id::to_string).collect();
        assert_eq!(ids, vec!["L7".to_string(), "L8".to_string()]);
    }

    #[test]
    fn test_empty_ids_filtered() {
        let lines = [
            LineBox::new("", Bounds::new(10.0, 10.0, 20.0, 20.0)),
            LineBox::new("_0", Bounds::new(10.0, 10.0, 20.0, 20.0)),
        ];
        let labels = [LabelAnchor::new("", Point::new(1.0, 1.0))];
        let affected = compute_affected(Id::new("D1"), diagram_box(), &lines, &labels);
        assert!(affected.is_empty());
    }

    #[test]
    fn test_duplicate_labels_collapse() {
        let labels = [
            LabelAnchor::new("T1", Point::new(1.0, 1.0)),
            LabelAnchor::new("T1", Point::new(2.0, 2.0)),
        ];
        let affected = compute_affected(Id::new("D1"), diagram_box(), &[], &labels);
        assert_eq!(affected.labels().len(), 1);
        assert_eq!(affected.diagram(), Id::new("D1"));
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn bounds_strategy() -> impl Strategy<Value = Bounds<Page>> {
        (-100.0f64..100.0, -100.0f64..100.0, 0.0f64..80.0, 0.0f64..80.0)
            .prop_map(|(x, y, w, h)| Bounds::new(x, y, x + w, y + h))
    }

    fn lines_strategy() -> impl Strategy<Value = Vec<LineBox>> {
        proptest::collection::vec((0usize..6, 0usize..4, bounds_strategy()), 0..24).prop_map(
            |entries| {
                entries
                    .into_iter()
                    .map(|(line, segment, bounds)| {
                        LineBox::new(Id::new(&format!("L{line}")).segment(segment), bounds)
                    })
                    .collect()
            },
        )
    }

    fn labels_strategy() -> impl Strategy<Value = Vec<LabelAnchor>> {
        proptest::collection::vec((0usize..8, -120.0f64..120.0, -120.0f64..120.0), 0..24)
            .prop_map(|entries| {
                entries
                    .into_iter()
                    .map(|(label, x, y)| {
                        LabelAnchor::new(Id::new(&format!("T{label}")), Point::new(x, y))
                    })
                    .collect()
            })
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Identical inputs give identical sets.
    fn check_idempotent(
        diagram: Bounds<Page>,
        lines: &[LineBox],
        labels: &[LabelAnchor],
    ) -> Result<(), TestCaseError> {
        let first = compute_affected(Id::new("D"), diagram, lines, labels);
        let second = compute_affected(Id::new("D"), diagram, lines, labels);
        prop_assert_eq!(first, second);
        Ok(())
    }

    /// Every affected line has an overlapping element and every unaffected one has none.
    fn check_lines_match_overlap(
        diagram: Bounds<Page>,
        lines: &[LineBox],
    ) -> Result<(), TestCaseError> {
        let affected = compute_affected(Id::new("D"), diagram, lines, &[]);
        for line in lines {
            if diagram.overlaps(&line.bounds()) {
                prop_assert!(affected.lines().contains(&line.element().owner()));
            }
        }
        for id in affected.lines() {
            prop_assert!(
                lines
                    .iter()
                    .any(|line| line.element().owner() == *id && diagram.overlaps(&line.bounds()))
            );
        }
        Ok(())
    }

    /// Affected labels are exactly those with an anchor inside the box.
    fn check_labels_match_containment(
        diagram: Bounds<Page>,
        labels: &[LabelAnchor],
    ) -> Result<(), TestCaseError> {
        let affected = compute_affected(Id::new("D"), diagram, &[], labels);
        for label in labels {
            if diagram.contains_point(label.anchor()) {
                prop_assert!(affected.labels().contains(&label.label()));
            }
        }
        for id in affected.labels() {
            prop_assert!(
                labels
                    .iter()
                    .any(|label| label.label() == *id && diagram.contains_point(label.anchor()))
            );
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn idempotent(
            diagram in bounds_strategy(),
            lines in lines_strategy(),
            labels in labels_strategy()
        ) {
            check_idempotent(diagram, &lines, &labels)?;
        }

        #[test]
        fn lines_match_overlap(diagram in bounds_strategy(), lines in lines_strategy()) {
            check_lines_match_overlap(diagram, &lines)?;
        }

        #[test]
        fn labels_match_containment(diagram in bounds_strategy(), labels in labels_strategy()) {
            check_labels_match_containment(diagram, &labels)?;
        }
    }
}
