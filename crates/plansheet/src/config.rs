//! Configuration types for plan sheet layout.
//!
//! This module provides configuration structures that control the page the
//! diagrams are fitted to and the scale policy. All types implement
//! [`serde::Deserialize`] for flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining page and scale settings.
//! - [`PageConfig`] - Page size and printable border, in metres.
//! - [`ScaleConfig`] - System-generated reference extent and degenerate fallback.
//!
//! # Example
//!
//! ```
//! # use plansheet::config::AppConfig;
//! let config = AppConfig::default();
//! let printable = config.page().printable_area();
//! assert!(printable.width() > printable.height());
//! ```

use serde::Deserialize;

use plansheet_core::geometry::{Insets, Size};

/// Top-level application configuration combining page and scale settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Page configuration section.
    #[serde(default)]
    page: PageConfig,

    /// Scale configuration section.
    #[serde(default)]
    scale: ScaleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified page and scale configurations.
    pub fn new(page: PageConfig, scale: ScaleConfig) -> Self {
        Self { page, scale }
    }

    /// Returns the page configuration.
    pub fn page(&self) -> &PageConfig {
        &self.page
    }

    /// Returns the scale configuration.
    pub fn scale(&self) -> &ScaleConfig {
        &self.scale
    }
}

/// Plan sheet page geometry, in metres at 1:1.
///
/// Defaults to an A3 landscape sheet with a 15 mm border on every side.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Full page size.
    size: Size,

    /// Border excluded from the printable area.
    border: Insets,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            size: Size::new(0.420, 0.297),
            border: Insets::uniform(0.015),
        }
    }
}

impl PageConfig {
    /// Creates a new [`PageConfig`].
    ///
    /// # Arguments
    ///
    /// * `size` - Full page size in metres.
    /// * `border` - Non-printable border in metres.
    pub fn new(size: Size, border: Insets) -> Self {
        Self { size, border }
    }

    /// Returns the full page size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the border insets.
    pub fn border(&self) -> Insets {
        self.border
    }

    /// Returns the area diagrams are fitted into: the page minus its border.
    pub fn printable_area(&self) -> Size {
        self.size.sub_padding(self.border)
    }
}

/// Scale policy settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    /// Ground extent (metres) of the reference system-generated diagram.
    ///
    /// System-generated content smaller than this in both dimensions is drawn
    /// at the scale that fits this extent.
    system_generated_reference: Option<Size>,

    /// Scale returned for zero-extent content instead of an error.
    degenerate_fallback_scale: Option<f64>,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            system_generated_reference: Some(Size::new(40.0, 30.0)),
            degenerate_fallback_scale: None,
        }
    }
}

impl ScaleConfig {
    /// Creates a new [`ScaleConfig`].
    pub fn new(
        system_generated_reference: Option<Size>,
        degenerate_fallback_scale: Option<f64>,
    ) -> Self {
        Self {
            system_generated_reference,
            degenerate_fallback_scale,
        }
    }

    /// Returns the system-generated reference extent, if any.
    pub fn system_generated_reference(&self) -> Option<Size> {
        self.system_generated_reference
    }

    /// Returns the degenerate fallback scale, if any.
    pub fn degenerate_fallback_scale(&self) -> Option<f64> {
        self.degenerate_fallback_scale
    }
}
