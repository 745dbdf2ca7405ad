//! Zoom scale calculation.
//!
//! Finds the zoom scale (ground metres per page metre) at which a diagram's
//! content fits the printable page area.
//!
//! # Fitting rule
//!
//! With content extent `w × h` and printable area `W × H` (all in metres):
//!
//! ```text
//! by_width  = w / W
//! by_height = h / H
//! scale     = max(by_width, by_height)
//! ```
//!
//! The larger candidate is the binding axis: content drawn at that scale fills
//! the binding axis exactly and fits the other axis with equal or greater
//! margin. An exact tie binds on width.
//!
//! Content-less requests skip the axis comparison and fit the longest side of
//! the fallback extent to the longest side of the page. Small
//! system-generated content is pinned to the scale of the configured
//! reference extent instead of being blown up to fill the page.

use log::{debug, warn};

use plansheet_core::{
    geometry::{Bounds, Ground, Point, Size},
    model::DiagramKind,
    units::degrees_to_metres,
};

use crate::{
    config::ScaleConfig,
    error::{ConfigurationError, PlanSheetError},
};

/// A ground extent in the unit it was measured in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extent {
    /// Width and height in metres.
    Metres(Size),
    /// Longitude and latitude spans in degrees, converted at `reference_latitude`.
    Degrees { size: Size, reference_latitude: f64 },
}

impl Extent {
    /// Returns the extent in metres.
    pub fn to_metres(self) -> Size {
        match self {
            Self::Metres(size) => size,
            Self::Degrees {
                size,
                reference_latitude,
            } => degrees_to_metres(size, reference_latitude),
        }
    }
}

/// The content to fit and how it should be treated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitRequest {
    extent: Extent,
    has_content: bool,
    kind: DiagramKind,
}

impl FitRequest {
    /// Requests a fit of measured content.
    pub fn new(extent: Extent) -> Self {
        Self {
            extent,
            has_content: true,
            kind: DiagramKind::UserDefined,
        }
    }

    /// Requests a fit for a diagram without content; `extent` is the
    /// diagram's declared extent.
    pub fn without_content(extent: Extent) -> Self {
        Self {
            extent,
            has_content: false,
            kind: DiagramKind::UserDefined,
        }
    }

    /// Derives the request from the ground coordinates of the content.
    ///
    /// An empty coordinate list produces a content-less request over
    /// `fallback`.
    pub fn from_points(points: &[Point<Ground>], fallback: Bounds<Ground>) -> Self {
        match Bounds::from_points(points.iter().copied()) {
            Some(bounds) => Self::new(Extent::Metres(bounds.to_size())),
            None => Self::without_content(Extent::Metres(fallback.to_size())),
        }
    }

    /// Sets the diagram kind (builder style).
    pub fn with_kind(mut self, kind: DiagramKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn has_content(&self) -> bool {
        self.has_content
    }

    pub fn kind(&self) -> DiagramKind {
        self.kind
    }
}

/// Which constraint decided the scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Content width fills the printable width.
    Width,
    /// Content height fills the printable height.
    Height,
    /// Content-less request; the longest sides were matched.
    LongestSide,
    /// Pinned to the system-generated reference extent.
    SystemReference,
    /// No usable scale; the configured fallback scale was used.
    DegenerateFallback,
}

/// A computed zoom scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomFit {
    scale: f64,
    binding: Binding,
}

impl ZoomFit {
    /// Ground metres per page metre; always positive and finite.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn binding(&self) -> Binding {
        self.binding
    }
}

/// Fits content extents into a printable page area.
#[derive(Debug, Clone)]
pub struct ScaleCalculator<'a> {
    config: &'a ScaleConfig,
    page: Size,
}

impl<'a> ScaleCalculator<'a> {
    /// Creates a calculator for the given printable page area (metres).
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::InvalidPageArea`] unless both page dimensions
    ///   are positive and finite.
    /// - [`ConfigurationError::InvalidReferenceExtent`] when a system-generated
    ///   reference extent is configured and is not positive and finite.
    pub fn new(config: &'a ScaleConfig, page: Size) -> Result<Self, ConfigurationError> {
        if !page.is_positive() {
            return Err(ConfigurationError::InvalidPageArea {
                width: page.width(),
                height: page.height(),
            });
        }
        if let Some(reference) = config
            .system_generated_reference()
            .filter(|reference| !reference.is_positive())
        {
            return Err(ConfigurationError::InvalidReferenceExtent {
                width: reference.width(),
                height: reference.height(),
            });
        }
        Ok(Self { config, page })
    }

    /// Computes the zoom scale for `request`.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::InvalidExtent`] for negative or non-finite extents.
    /// - [`PlanSheetError::DegenerateGeometry`] for zero extents, or extents
    ///   whose scale overflows, when no fallback scale is configured.
    ///
    /// # Examples
    ///
    /// ```
    /// # use plansheet::config::ScaleConfig;
    /// # use plansheet::scale::{Binding, Extent, FitRequest, ScaleCalculator};
    /// # use plansheet_core::geometry::Size;
    /// let config = ScaleConfig::default();
    /// let calculator = ScaleCalculator::new(&config, Size::new(0.4, 0.2)).unwrap();
    ///
    /// let fit = calculator
    ///     .compute_zoom_scale(&FitRequest::new(Extent::Metres(Size::new(200.0, 40.0))))
    ///     .unwrap();
    /// assert_eq!(fit.scale(), 500.0);
    /// assert_eq!(fit.binding(), Binding::Width);
    /// ```
    pub fn compute_zoom_scale(&self, request: &FitRequest) -> Result<ZoomFit, PlanSheetError> {
        let extent = request.extent.to_metres();
        if !extent.is_finite() || extent.width() < 0.0 || extent.height() < 0.0 {
            return Err(ConfigurationError::InvalidExtent {
                width: extent.width(),
                height: extent.height(),
            }
            .into());
        }

        let fit = if !request.has_content {
            self.fit_longest_side(extent)
        } else if let Some(reference) = self.pinned_reference(request.kind, extent) {
            self.fit_both_axes(reference).map(|fit| ZoomFit {
                binding: Binding::SystemReference,
                ..fit
            })
        } else {
            self.fit_both_axes(extent)
        };

        let fit = match fit {
            Some(fit) => fit,
            None => self.degenerate(extent)?,
        };

        debug!(
            extent_width = extent.width(),
            extent_height = extent.height(),
            scale = fit.scale,
            binding:? = fit.binding;
            "Computed zoom scale"
        );
        Ok(fit)
    }

    /// The reference extent to pin to, if the content qualifies.
    fn pinned_reference(&self, kind: DiagramKind, extent: Size) -> Option<Size> {
        if kind != DiagramKind::SystemGenerated {
            return None;
        }
        let reference = self.config.system_generated_reference()?;
        (extent.width() < reference.width() && extent.height() < reference.height())
            .then_some(reference)
    }

    /// Fits both axes; `None` unless the scale is positive and finite.
    fn fit_both_axes(&self, extent: Size) -> Option<ZoomFit> {
        let by_width = extent.width() / self.page.width();
        let by_height = extent.height() / self.page.height();

        let fit = if by_width >= by_height {
            ZoomFit {
                scale: by_width,
                binding: Binding::Width,
            }
        } else {
            ZoomFit {
                scale: by_height,
                binding: Binding::Height,
            }
        };
        (fit.scale > 0.0 && fit.scale.is_finite()).then_some(fit)
    }

    /// Matches the longest extent side to the longest page side.
    fn fit_longest_side(&self, extent: Size) -> Option<ZoomFit> {
        let scale = extent.longest_side() / self.page.longest_side();
        (scale > 0.0 && scale.is_finite()).then_some(ZoomFit {
            scale,
            binding: Binding::LongestSide,
        })
    }

    fn degenerate(&self, extent: Size) -> Result<ZoomFit, PlanSheetError> {
        match self.config.degenerate_fallback_scale() {
            Some(scale) if scale.is_finite() && scale > 0.0 => {
                warn!(scale; "Content extent has no usable scale, using fallback scale");
                Ok(ZoomFit {
                    scale,
                    binding: Binding::DegenerateFallback,
                })
            }
            _ => Err(PlanSheetError::DegenerateGeometry(format!(
                "content extent {} x {} m has no positive, finite scale",
                extent.width(),
                extent.height()
            ))),
        }
    }
}
