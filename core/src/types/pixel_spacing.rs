use crate::error::{Result, TumorscanError};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Default physical size of one pixel edge, in mm
pub const DEFAULT_PIXEL_SPACING: f64 = 0.5;

/// Isotropic pixel spacing in millimeters
///
/// Represents the physical distance covered by one pixel edge. Always
/// positive and finite once constructed.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(transparent))]
pub struct PixelSpacing(f64);

impl PixelSpacing {
    /// Creates a new PixelSpacing
    ///
    /// # Errors
    ///
    /// Returns [`TumorscanError::InvalidConfiguration`] if `mm` is not a
    /// positive finite number
    pub fn new(mm: f64) -> Result<Self> {
        if mm.is_finite() && mm > 0.0 {
            Ok(Self(mm))
        } else {
            Err(TumorscanError::InvalidConfiguration(format!(
                "pixel spacing must be a positive finite number, got {}",
                mm
            )))
        }
    }

    /// Returns the spacing in mm per pixel
    pub fn mm(&self) -> f64 {
        self.0
    }

    /// Parses pixel spacing from string
    ///
    /// Accepts formats like:
    /// - "0.5"
    /// - "0.5mm"
    /// - "0.5\\0.5" (DICOM row\column, both values must agree)
    /// - "[0.5, 0.5]"
    /// - Exponential notation: "5e-1"
    ///
    /// # Errors
    ///
    /// Returns an error if the string holds no number, if row and column
    /// spacing differ, or if the value is not positive
    pub fn parse(s: &str) -> Result<Self> {
        static REGEX: OnceLock<Regex> = OnceLock::new();
        let re = REGEX.get_or_init(|| {
            Regex::new(r"[-+]?\d*\.?\d+(?:[eE][-+]?\d+)?").expect("Failed to compile regex")
        });

        let values = re
            .find_iter(s)
            .map(|m| m.as_str().parse::<f64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| {
                TumorscanError::InvalidConfiguration(format!("Failed to parse spacing: {}", e))
            })?;

        match values.as_slice() {
            [mm] => Self::new(*mm),
            [row, col] if row == col => Self::new(*row),
            [row, col] => Err(TumorscanError::InvalidConfiguration(format!(
                "anisotropic pixel spacing {} x {} mm is not supported",
                row, col
            ))),
            _ => Err(TumorscanError::InvalidConfiguration(format!(
                "Failed to parse PixelSpacing from '{}'",
                s
            ))),
        }
    }
}

impl Default for PixelSpacing {
    fn default() -> Self {
        Self(DEFAULT_PIXEL_SPACING)
    }
}

impl TryFrom<f64> for PixelSpacing {
    type Error = TumorscanError;

    fn try_from(mm: f64) -> Result<Self> {
        Self::new(mm)
    }
}

impl fmt::Display for PixelSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mm", self.0)
    }
}
