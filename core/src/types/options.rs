use crate::error::Result;
use crate::types::{Connectivity, PixelSpacing};

/// Configuration for a single analysis call
///
/// Values are copied into the call; nothing here is process-wide.
///
/// # Example
///
/// ```
/// use tumorscan_core::{AnalysisOptions, Connectivity, PixelSpacing};
///
/// let options = AnalysisOptions::default()
///     .with_spacing(PixelSpacing::new(0.25).unwrap())
///     .with_connectivity(Connectivity::Four)
///     .with_reference_shape(&[256, 256, 3]);
///
/// assert_eq!(options.spacing.mm(), 0.25);
/// assert_eq!(options.connectivity, Connectivity::Four);
/// assert_eq!(options.reference_shape, Some(vec![256, 256, 3]));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct AnalysisOptions {
    /// Physical size of one pixel edge
    pub spacing: PixelSpacing,

    /// Neighbourhood used for region grouping
    pub connectivity: Connectivity,

    /// Shape of the reference image, if one accompanies the mask
    /// Only used to check that its first two dimensions match the mask.
    pub reference_shape: Option<Vec<usize>>,
}

impl AnalysisOptions {
    /// Builds options from raw scalar values
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if `spacing_mm <= 0` or
    /// `connectivity` is not 4 or 8
    ///
    /// # Example
    ///
    /// ```
    /// use tumorscan_core::AnalysisOptions;
    ///
    /// assert!(AnalysisOptions::from_raw(0.5, 8).is_ok());
    /// assert!(AnalysisOptions::from_raw(0.0, 8).is_err());
    /// assert!(AnalysisOptions::from_raw(0.5, 6).is_err());
    /// ```
    pub fn from_raw(spacing_mm: f64, connectivity: u8) -> Result<Self> {
        Ok(Self {
            spacing: PixelSpacing::new(spacing_mm)?,
            connectivity: Connectivity::try_from(connectivity)?,
            reference_shape: None,
        })
    }

    /// Builder: Set pixel spacing
    pub fn with_spacing(mut self, spacing: PixelSpacing) -> Self {
        self.spacing = spacing;
        self
    }

    /// Builder: Set connectivity
    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Builder: Set reference image shape
    pub fn with_reference_shape(mut self, shape: &[usize]) -> Self {
        self.reference_shape = Some(shape.to_vec());
        self
    }
}
