use crate::types::TumorRecord;
use std::fmt;

/// Text report formatter for tumor records
pub struct TextReport<'a> {
    records: &'a [TumorRecord],
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(records: &'a [TumorRecord]) -> Self {
        Self { records }
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tumor Analysis")?;
        writeln!(f, "==============")?;
        writeln!(f)?;

        if self.records.is_empty() {
            writeln!(f, "No tumor regions found")?;
            return Ok(());
        }

        for (i, record) in self.records.iter().enumerate() {
            writeln!(
                f,
                "Tumor {}: {} pixels, {:.2} mm², Height: {:.2} mm, Width: {:.2} mm, Location: {}",
                i + 1,
                record.area_px,
                record.area_mm2,
                record.height_mm,
                record.width_mm,
                record.region_label
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Locations are approximate (centroid position heuristic).")?;
        Ok(())
    }
}
