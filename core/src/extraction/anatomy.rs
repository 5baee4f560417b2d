use crate::types::{AnatomicalLabel, Centroid, Hemisphere, Lobe};

/// A threshold expressed as `numerator / denominator` of an image extent
///
/// Kept as a fraction so the boundary is computed as `extent * n / d`,
/// which is exact for the usual image sizes (`W/2`, `H/3`, `2H/3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fraction {
    pub numerator: u32,
    pub denominator: u32,
}

impl Fraction {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Returns this fraction of `extent`
    pub fn of(&self, extent: usize) -> f64 {
        extent as f64 * f64::from(self.numerator) / f64::from(self.denominator)
    }
}

/// Left/right split as a fraction of the image width
pub const HEMISPHERE_SPLIT: Fraction = Fraction::new(1, 2);

/// Frontal/parietal boundary as a fraction of the image height
pub const FRONTAL_LIMIT: Fraction = Fraction::new(1, 3);

/// Parietal/occipital-temporal boundary as a fraction of the image height
pub const PARIETAL_LIMIT: Fraction = Fraction::new(2, 3);

/// Classifies the hemisphere from the centroid column
///
/// Strictly left of `W/2` is Left; the midpoint itself is Right.
pub fn classify_hemisphere(cx: f64, width: usize) -> Hemisphere {
    if cx < HEMISPHERE_SPLIT.of(width) {
        Hemisphere::Left
    } else {
        Hemisphere::Right
    }
}

/// Classifies the lobe band from the centroid row
///
/// `cy < H/3` is Frontal, `cy < 2H/3` Parietal, anything else
/// Occipital/Temporal.
pub fn classify_lobe(cy: f64, height: usize) -> Lobe {
    if cy < FRONTAL_LIMIT.of(height) {
        Lobe::Frontal
    } else if cy < PARIETAL_LIMIT.of(height) {
        Lobe::Parietal
    } else {
        Lobe::OccipitalTemporal
    }
}

/// Maps a centroid to a coarse anatomical label
///
/// Assumes a standard axial MRI slice with the front of the head at the
/// top of the image. This is a geometric heuristic, not an atlas lookup.
/// Centroids outside the image still classify through the same
/// comparisons.
///
/// # Arguments
///
/// * `centroid` - Region centroid in pixel units
/// * `image_shape` - `(height, width)` of the mask
///
/// # Example
///
/// ```
/// use tumorscan_core::extraction::classify_region;
/// use tumorscan_core::Centroid;
///
/// let label = classify_region(Centroid::new(10.0, 80.0), (90, 120));
/// assert_eq!(label.to_string(), "Occipital/Temporal Lobe (Left Hemisphere)");
/// ```
pub fn classify_region(centroid: Centroid, image_shape: (usize, usize)) -> AnatomicalLabel {
    let (height, width) = image_shape;
    AnatomicalLabel::new(
        classify_lobe(centroid.y, height),
        classify_hemisphere(centroid.x, width),
    )
}
