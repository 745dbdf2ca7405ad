//! Unit conventions shared by the layout crates.
//!
//! Ground coordinates are metres, page coordinates are centimetres, and page
//! areas used for fitting are expressed in metres at 1:1.

use crate::geometry::Size;

/// Centimetres in one metre; the factor between ground metres and page units.
pub const CENTIMETRES_PER_METRE: f64 = 100.0;

/// Metres spanned by one degree of arc on the equator (WGS84 semi-major axis).
pub const METRES_PER_DEGREE: f64 = 111_319.490_793_273_58;

/// Converts an extent measured in degrees to metres at `reference_latitude`.
///
/// The latitude span (height) converts at [`METRES_PER_DEGREE`]; the longitude
/// span (width) additionally shrinks with the cosine of the reference latitude.
///
/// # Examples
///
/// ```
/// # use plansheet_core::{geometry::Size, units::degrees_to_metres};
/// let metres = degrees_to_metres(Size::new(0.001, 0.001), 60.0);
/// assert!((metres.width() - 55.66).abs() < 0.01);
/// assert!((metres.height() - 111.32).abs() < 0.01);
/// ```
pub fn degrees_to_metres(extent: Size, reference_latitude: f64) -> Size {
    let cos_lat = reference_latitude.to_radians().cos();
    Size::new(
        extent.width() * METRES_PER_DEGREE * cos_lat,
        extent.height() * METRES_PER_DEGREE,
    )
}
