use super::{AnatomicalLabel, BoundingBox, Centroid};

/// Measurements for one tumor region
///
/// Pixel-space values come straight from the region; physical values are
/// `pixel * spacing` (lengths) or `pixel * spacing²` (area) for the
/// spacing the analysis ran with.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct TumorRecord {
    /// Region ordinal, 1-based in row-major discovery order
    pub label: u32,

    /// Foreground pixel count
    pub area_px: usize,

    /// Physical area in mm²
    pub area_mm2: f64,

    /// Bounding box height in pixels
    pub height_px: usize,

    /// Bounding box width in pixels
    pub width_px: usize,

    /// Bounding box height in mm
    pub height_mm: f64,

    /// Bounding box width in mm
    pub width_mm: f64,

    /// Centroid `[x, y]` in pixel units
    pub centroid_px: [f64; 2],

    /// Bounding box `[x, y, width, height]` in pixel units
    pub bbox_px: [usize; 4],

    /// Approximate anatomical location
    pub region_label: AnatomicalLabel,
}

impl TumorRecord {
    /// Returns the centroid as a typed point
    pub fn centroid(&self) -> Centroid {
        Centroid::new(self.centroid_px[0], self.centroid_px[1])
    }

    /// Returns the bounding box as a typed rectangle
    pub fn bbox(&self) -> BoundingBox {
        let [x, y, width, height] = self.bbox_px;
        BoundingBox::new(x, y, width, height)
    }
}
