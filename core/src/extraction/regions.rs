use super::binarize::BinaryMask;
use crate::types::{BoundingBox, Centroid, Connectivity, Region};
use log::{debug, trace};
use ndarray::Array2;
use std::collections::VecDeque;

/// Label value reserved for background pixels
pub const BACKGROUND_LABEL: u32 = 0;

/// Connected component labeling result
///
/// `labels[(row, col)]` holds the region label of each pixel (0 for
/// background); `regions[i]` describes label `i + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledMask {
    pub labels: Array2<u32>,
    pub regions: Vec<Region>,
}

/// Running statistics for one component
struct RegionStats {
    count: usize,
    min_row: usize,
    max_row: usize,
    min_col: usize,
    max_col: usize,
    sum_row: u64,
    sum_col: u64,
}

impl RegionStats {
    fn new() -> Self {
        Self {
            count: 0,
            min_row: usize::MAX,
            max_row: 0,
            min_col: usize::MAX,
            max_col: 0,
            sum_row: 0,
            sum_col: 0,
        }
    }

    fn add(&mut self, (row, col): (usize, usize)) {
        self.count += 1;
        self.min_row = self.min_row.min(row);
        self.max_row = self.max_row.max(row);
        self.min_col = self.min_col.min(col);
        self.max_col = self.max_col.max(col);
        self.sum_row += row as u64;
        self.sum_col += col as u64;
    }

    fn into_region(self, label: u32) -> Region {
        let n = self.count as f64;
        let bbox = BoundingBox::new(
            self.min_col,
            self.min_row,
            self.max_col - self.min_col + 1,
            self.max_row - self.min_row + 1,
        );
        let centroid = Centroid::new(self.sum_col as f64 / n, self.sum_row as f64 / n);
        debug_assert!(self.count >= 1 && self.count <= bbox.area());
        debug_assert!(bbox.contains(centroid));
        Region {
            label,
            area_px: self.count,
            bbox,
            centroid,
        }
    }
}

/// Returns in-bounds neighbours of `(row, col)` under `connectivity`
fn neighbours(
    (row, col): (usize, usize),
    (height, width): (usize, usize),
    connectivity: Connectivity,
) -> impl Iterator<Item = (usize, usize)> {
    connectivity.offsets().iter().filter_map(move |&(dr, dc)| {
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        (r < height && c < width).then_some((r, c))
    })
}

/// Labels connected foreground components of `mask`
///
/// Scans row-major; each unlabeled foreground pixel seeds a breadth-first
/// flood under `connectivity` and receives the next label, starting at 1.
/// Regions are therefore ordered by the position of their first pixel.
pub fn label_components(mask: &BinaryMask, connectivity: Connectivity) -> LabeledMask {
    let shape = mask.shape();
    let mut labels = Array2::<u32>::from_elem(shape, BACKGROUND_LABEL);
    let mut regions = Vec::new();
    let mut queue: VecDeque<(usize, usize)> = VecDeque::with_capacity(64);

    for (seed, &foreground) in mask.view().indexed_iter() {
        if !foreground || labels[seed] != BACKGROUND_LABEL {
            continue;
        }

        let label = regions.len() as u32 + 1;
        let mut stats = RegionStats::new();
        labels[seed] = label;
        queue.push_back(seed);

        while let Some(pos) = queue.pop_front() {
            stats.add(pos);
            for next in neighbours(pos, shape, connectivity) {
                if mask.is_foreground(next.0, next.1) && labels[next] == BACKGROUND_LABEL {
                    labels[next] = label;
                    queue.push_back(next);
                }
            }
        }

        let region = stats.into_region(label);
        trace!(
            "Region {}: {} px, bbox {:?}, centroid ({:.2}, {:.2})",
            region.label,
            region.area_px,
            region.bbox.to_array(),
            region.centroid.x,
            region.centroid.y
        );
        regions.push(region);
    }

    debug!("Found {} regions using {}", regions.len(), connectivity);
    LabeledMask { labels, regions }
}

/// Extracts connected regions of `mask` in ascending label order
///
/// An all-background mask yields an empty vector.
pub fn extract_regions(mask: &BinaryMask, connectivity: Connectivity) -> Vec<Region> {
    label_components(mask, connectivity).regions
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn mask_from(data: Array2<u8>) -> BinaryMask {
        BinaryMask::from_array(data.mapv(|v| v > 0))
    }

    #[test]
    fn test_empty_mask() {
        let mask = mask_from(Array2::zeros((5, 5)));
        assert!(extract_regions(&mask, Connectivity::Eight).is_empty());
    }

    #[test]
    fn test_zero_sized_mask() {
        let mask = mask_from(Array2::zeros((0, 7)));
        assert!(extract_regions(&mask, Connectivity::Eight).is_empty());
    }

    #[test]
    fn test_single_rectangle_stats() {
        let mut data = Array2::<u8>::zeros((10, 12));
        data.slice_mut(ndarray::s![2..5, 3..9]).fill(1);
        let regions = extract_regions(&mask_from(data), Connectivity::Eight);

        assert_eq!(regions.len(), 1);
        let region = &regions[0];
        assert_eq!(region.label, 1);
        assert_eq!(region.area_px, 18);
        assert_eq!(region.bbox, BoundingBox::new(3, 2, 6, 3));
        assert_eq!(region.centroid, Centroid::new(5.5, 3.0));
    }

    #[test]
    fn test_diagonal_contact_depends_on_connectivity() {
        let data = array![[1u8, 0, 0], [0, 1, 0], [0, 0, 1]];
        let mask = mask_from(data);

        let eight = extract_regions(&mask, Connectivity::Eight);
        assert_eq!(eight.len(), 1);
        assert_eq!(eight[0].area_px, 3);
        assert_eq!(eight[0].centroid, Centroid::new(1.0, 1.0));

        let four = extract_regions(&mask, Connectivity::Four);
        assert_eq!(four.len(), 3);
        assert!(four.iter().all(|r| r.area_px == 1));
    }

    #[test]
    fn test_labels_follow_row_major_discovery() {
        // The component starting at row 0 col 4 is discovered before the
        // one whose first pixel is at row 1 col 0.
        let data = array![
            [0u8, 0, 0, 0, 1],
            [1, 1, 0, 0, 1],
            [1, 1, 0, 0, 0],
        ];
        let labeled = label_components(&mask_from(data), Connectivity::Eight);

        assert_eq!(labeled.regions.len(), 2);
        assert_eq!(labeled.regions[0].bbox, BoundingBox::new(4, 0, 1, 2));
        assert_eq!(labeled.regions[1].bbox, BoundingBox::new(0, 1, 2, 2));
        assert_eq!(labeled.labels[(0, 4)], 1);
        assert_eq!(labeled.labels[(2, 1)], 2);
        assert_eq!(labeled.labels[(0, 0)], BACKGROUND_LABEL);
    }

    #[test]
    fn test_u_shape_is_one_region() {
        let data = array![
            [1u8, 0, 1],
            [1, 0, 1],
            [1, 1, 1],
        ];
        let regions = extract_regions(&mask_from(data), Connectivity::Four);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].area_px, 7);
        assert_eq!(regions[0].bbox.area(), 9);
        assert!(regions[0].bbox.contains(regions[0].centroid));
    }

    #[test]
    fn test_label_counts_match_areas() {
        let data = array![
            [1u8, 1, 0, 0],
            [0, 0, 0, 1],
            [1, 0, 1, 1],
        ];
        let labeled = label_components(&mask_from(data), Connectivity::Four);
        for region in &labeled.regions {
            let count = labeled.labels.iter().filter(|&&l| l == region.label).count();
            assert_eq!(count, region.area_px);
        }
    }
}
