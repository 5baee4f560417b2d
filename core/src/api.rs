use crate::error::{Result, TumorscanError};
use crate::extraction::{binarize, classify_region, extract_regions, to_physical, AREA, LENGTH};
use crate::types::{AnalysisOptions, Region, TumorRecord};
use log::{debug, warn};
use ndarray::{ArrayView2, ArrayViewD, Ix2};
use num::ToPrimitive;

/// Main analyzer for tumor segmentation masks
///
/// Binarizes the mask, extracts connected regions and turns each region
/// into a [`TumorRecord`]. Every call is independent: there is no shared
/// state, so masks can be analyzed concurrently without locking.
///
/// # Example
///
/// ```
/// use ndarray::Array2;
/// use tumorscan_core::{AnalysisOptions, TumorAnalyzer};
///
/// // 4x6 block in the top-left of a 30x30 mask
/// let mut mask = Array2::<u8>::zeros((30, 30));
/// mask.slice_mut(ndarray::s![2..6, 3..9]).fill(1);
///
/// let records = TumorAnalyzer::analyze(mask.view()).unwrap();
///
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].area_px, 24);
/// assert_eq!(records[0].area_mm2, 6.0);
/// assert_eq!(records[0].bbox_px, [3, 2, 6, 4]);
/// assert_eq!(records[0].region_label.to_string(), "Frontal Lobe (Left Hemisphere)");
/// ```
pub struct TumorAnalyzer;

impl TumorAnalyzer {
    /// Analyzes a mask with default options (0.5 mm spacing, 8-connectivity)
    pub fn analyze<T: ToPrimitive>(mask: ArrayView2<'_, T>) -> Result<Vec<TumorRecord>> {
        Self::analyze_with_options(mask, &AnalysisOptions::default())
    }

    /// Analyzes a mask with explicit options
    ///
    /// Records come back in ascending region label order, which is the
    /// row-major order in which regions are first encountered.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The reference shape is not 2-D or 3-D (`InvalidInput`)
    /// - The reference shape's first two dimensions differ from the mask (`ShapeMismatch`)
    /// - A mask value cannot be read as a number (`InvalidInput`)
    pub fn analyze_with_options<T: ToPrimitive>(
        mask: ArrayView2<'_, T>,
        options: &AnalysisOptions,
    ) -> Result<Vec<TumorRecord>> {
        let shape = mask.dim();
        if let Some(reference) = &options.reference_shape {
            Self::check_reference_shape(shape, reference)?;
        }

        let binary = binarize(mask)?;
        let regions = extract_regions(&binary, options.connectivity);
        debug!(
            "Analyzing {} regions at {} per pixel",
            regions.len(),
            options.spacing
        );

        regions
            .iter()
            .map(|region| Self::build_record(region, shape, options))
            .collect()
    }

    /// Analyzes a mask of dynamic dimensionality
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the mask is not 2-D, plus everything
    /// [`TumorAnalyzer::analyze_with_options`] can return
    pub fn analyze_dyn<T: ToPrimitive>(
        mask: ArrayViewD<'_, T>,
        options: &AnalysisOptions,
    ) -> Result<Vec<TumorRecord>> {
        let ndim = mask.ndim();
        let mask = mask.into_dimensionality::<Ix2>().map_err(|_| {
            TumorscanError::InvalidInput(format!("mask must be 2-D, got {} dimensions", ndim))
        })?;
        Self::analyze_with_options(mask, options)
    }

    /// Checks that a reference image can be overlaid on the mask
    fn check_reference_shape(mask: (usize, usize), reference: &[usize]) -> Result<()> {
        match reference {
            [h, w] | [h, w, _] if (*h, *w) == mask => {
                if reference.len() == 3 {
                    debug!("Reference image has {} channels", reference[2]);
                }
                Ok(())
            }
            [_, _] | [_, _, _] => Err(TumorscanError::ShapeMismatch {
                mask,
                reference: reference.to_vec(),
            }),
            _ => {
                warn!("Rejecting reference image with shape {:?}", reference);
                Err(TumorscanError::InvalidInput(format!(
                    "reference image must be 2-D or 3-D, got shape {:?}",
                    reference
                )))
            }
        }
    }

    /// Converts one region into a record
    fn build_record(
        region: &Region,
        image_shape: (usize, usize),
        options: &AnalysisOptions,
    ) -> Result<TumorRecord> {
        let spacing = options.spacing.mm();
        let bbox = region.bbox;

        Ok(TumorRecord {
            label: region.label,
            area_px: region.area_px,
            area_mm2: to_physical(region.area_px as f64, spacing, AREA)?,
            height_px: bbox.height,
            width_px: bbox.width,
            height_mm: to_physical(bbox.height as f64, spacing, LENGTH)?,
            width_mm: to_physical(bbox.width as f64, spacing, LENGTH)?,
            centroid_px: region.centroid.to_array(),
            bbox_px: bbox.to_array(),
            region_label: classify_region(region.centroid, image_shape),
        })
    }
}

/// Analyzes `mask` with `options`
///
/// Shorthand for [`TumorAnalyzer::analyze_with_options`].
pub fn analyze<T: ToPrimitive>(
    mask: ArrayView2<'_, T>,
    options: &AnalysisOptions,
) -> Result<Vec<TumorRecord>> {
    TumorAnalyzer::analyze_with_options(mask, options)
}
