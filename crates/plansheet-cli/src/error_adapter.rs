//! Error adapter for converting PlanSheetError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use plansheet::{ConfigurationError, PlanSheetError};

/// Adapter giving a [`PlanSheetError`] a stable diagnostic code and, where one
/// is useful, a hint for the user.
pub struct ErrorAdapter<'a>(pub &'a PlanSheetError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            PlanSheetError::Configuration(_) => "plansheet::configuration",
            PlanSheetError::DegenerateGeometry(_) => "plansheet::degenerate_geometry",
            PlanSheetError::InvalidSheet(_) => "plansheet::invalid_sheet",
            PlanSheetError::Io(_) => "plansheet::io",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            PlanSheetError::Configuration(ConfigurationError::MissingZoomScale(_)) => {
                "set `zoom_scale` on the diagram, or run `fit` to compute one"
            }
            PlanSheetError::Configuration(ConfigurationError::UnknownDiagram(_)) => {
                "check the diagram id against the `[[diagrams]]` entries of the sheet"
            }
            PlanSheetError::DegenerateGeometry(_) => {
                "set `scale.degenerate_fallback_scale` in the configuration \
                 to fit zero-size content"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
