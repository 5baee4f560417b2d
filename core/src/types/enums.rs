use crate::error::TumorscanError;
use std::fmt;

/// Pixel adjacency used when grouping foreground pixels into regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum Connectivity {
    /// Edge neighbours only (up, down, left, right)
    Four,
    /// Edge and corner neighbours
    #[default]
    Eight,
}

const N4_OFFSETS: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

const N8_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

impl Connectivity {
    /// Returns the (row, column) offsets of the neighbours of a pixel
    pub fn offsets(&self) -> &'static [(isize, isize)] {
        match self {
            Connectivity::Four => &N4_OFFSETS,
            Connectivity::Eight => &N8_OFFSETS,
        }
    }

    /// Returns the neighbour count (4 or 8)
    pub fn value(&self) -> u8 {
        match self {
            Connectivity::Four => 4,
            Connectivity::Eight => 8,
        }
    }
}

impl TryFrom<u8> for Connectivity {
    type Error = TumorscanError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            4 => Ok(Connectivity::Four),
            8 => Ok(Connectivity::Eight),
            other => Err(TumorscanError::InvalidConfiguration(format!(
                "connectivity must be 4 or 8, got {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-connectivity", self.value())
    }
}

/// Brain hemisphere, judged from the horizontal centroid position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum Hemisphere {
    Left,
    Right,
}

impl Hemisphere {
    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            Hemisphere::Left => "Left",
            Hemisphere::Right => "Right",
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hemisphere", self.simple_name())
    }
}

/// Coarse anterior-posterior band, judged from the vertical centroid position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum Lobe {
    Frontal,
    Parietal,
    OccipitalTemporal,
}

impl Lobe {
    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            Lobe::Frontal => "Frontal",
            Lobe::Parietal => "Parietal",
            Lobe::OccipitalTemporal => "Occipital/Temporal",
        }
    }
}

impl fmt::Display for Lobe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Lobe", self.simple_name())
    }
}
