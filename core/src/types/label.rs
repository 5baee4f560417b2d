use super::{Hemisphere, Lobe};
use std::fmt;

/// Anatomical label combining lobe band and hemisphere
///
/// Represents a coarse location such as "Frontal Lobe (Left Hemisphere)".
/// It is a geometric heuristic over an axial view, not an atlas lookup,
/// and should be presented to users as approximate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnatomicalLabel {
    pub lobe: Lobe,
    pub hemisphere: Hemisphere,
}

impl AnatomicalLabel {
    /// Creates a new AnatomicalLabel
    pub fn new(lobe: Lobe, hemisphere: Hemisphere) -> Self {
        Self { lobe, hemisphere }
    }
}

impl fmt::Display for AnatomicalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.lobe, self.hemisphere)
    }
}

#[cfg(feature = "json")]
impl serde::Serialize for AnatomicalLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
