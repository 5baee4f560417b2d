/// Axis-aligned bounding box in pixel units
///
/// `x`/`y` address the top-left pixel (column, row); `width`/`height`
/// count pixels, so a single pixel has a 1x1 box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl BoundingBox {
    /// Creates a new BoundingBox
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns `[x, y, width, height]`
    pub fn to_array(&self) -> [usize; 4] {
        [self.x, self.y, self.width, self.height]
    }

    /// Number of pixels covered by the box
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Checks whether a real-valued point lies inside the box
    ///
    /// Pixel centres sit on integer coordinates, so the box spans
    /// `[x, x + width - 1]` horizontally.
    pub fn contains(&self, point: Centroid) -> bool {
        let (x0, y0) = (self.x as f64, self.y as f64);
        let x1 = (self.x + self.width) as f64 - 1.0;
        let y1 = (self.y + self.height) as f64 - 1.0;
        point.x >= x0 && point.x <= x1 && point.y >= y0 && point.y <= y1
    }

    /// Checks whether two boxes share at least one pixel
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// Real-valued centroid in pixel units (x = column, y = row)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    pub x: f64,
    pub y: f64,
}

impl Centroid {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns `[x, y]`
    pub fn to_array(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

/// One connected foreground component
///
/// Labels start at 1 in row-major discovery order; label 0 is the
/// background and never appears as a Region.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub label: u32,
    pub area_px: usize,
    pub bbox: BoundingBox,
    pub centroid: Centroid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_contains() {
        let bbox = BoundingBox::new(2, 3, 4, 2);
        assert!(bbox.contains(Centroid::new(2.0, 3.0)));
        assert!(bbox.contains(Centroid::new(5.0, 4.0)));
        assert!(bbox.contains(Centroid::new(3.5, 3.5)));
        assert!(!bbox.contains(Centroid::new(6.0, 3.0)));
        assert!(!bbox.contains(Centroid::new(2.0, 5.0)));
    }

    #[test]
    fn test_bbox_overlaps() {
        let a = BoundingBox::new(0, 0, 3, 3);
        let b = BoundingBox::new(2, 2, 3, 3);
        let c = BoundingBox::new(3, 0, 3, 3);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert_eq!(a.area(), 9);
        assert_eq!(c.to_array(), [3, 0, 3, 3]);
    }
}
