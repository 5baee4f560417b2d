use crate::error::{Result, TumorscanError};

/// Exponent applied to the spacing for length measurements
pub const LENGTH: i32 = 1;

/// Exponent applied to the spacing for area measurements
pub const AREA: i32 = 2;

/// Converts a pixel-space measurement to physical units
///
/// `physical = pixel_value * spacing^exponent`, with `exponent` 1 for
/// lengths and 2 for areas.
///
/// # Errors
///
/// Returns `InvalidConfiguration` if `spacing <= 0` (or is not finite)
pub fn to_physical(pixel_value: f64, spacing: f64, exponent: i32) -> Result<f64> {
    if !(spacing.is_finite() && spacing > 0.0) {
        return Err(TumorscanError::InvalidConfiguration(format!(
            "pixel spacing must be positive, got {}",
            spacing
        )));
    }
    Ok(pixel_value * spacing.powi(exponent))
}
