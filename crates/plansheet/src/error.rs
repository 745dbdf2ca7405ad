//! Error types for plan sheet layout operations.
//!
//! This module provides the main error type [`PlanSheetError`]. None of the
//! failures are transient: every layout function is a pure computation, so an
//! error always means the inputs cannot be laid out as given.

use std::io;

use thiserror::Error;

use plansheet_core::identifier::Id;

/// The main error type for plan sheet operations.
#[derive(Debug, Error)]
pub enum PlanSheetError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Invalid sheet: {0}")]
    InvalidSheet(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Inputs that make a transform or a fit meaningless.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("unknown diagram `{0}`")]
    UnknownDiagram(Id),

    #[error("diagram `{0}` has no zoom scale")]
    MissingZoomScale(Id),

    #[error("diagram `{id}` has an invalid zoom scale {zoom_scale}")]
    InvalidZoomScale { id: Id, zoom_scale: f64 },

    #[error("printable page area {width} x {height} m is not positive")]
    InvalidPageArea { width: f64, height: f64 },

    #[error("content extent {width} x {height} m is not a finite, non-negative size")]
    InvalidExtent { width: f64, height: f64 },

    #[error("system-generated reference extent {width} x {height} m is not positive")]
    InvalidReferenceExtent { width: f64, height: f64 },
}

impl PlanSheetError {
    /// Returns the configuration error, if this is one.
    pub fn as_configuration(&self) -> Option<&ConfigurationError> {
        match self {
            Self::Configuration(err) => Some(err),
            _ => None,
        }
    }
}
