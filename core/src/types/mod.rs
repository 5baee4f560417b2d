//! Core type definitions for tumor measurement
//!
//! This module provides the value types used throughout the tumorscan library:
//! - [`PixelSpacing`]: Physical size of one pixel edge (defaults to 0.5 mm)
//! - [`Connectivity`]: 4- or 8-neighbour adjacency for region grouping
//! - [`Region`], [`BoundingBox`], [`Centroid`]: Connected component statistics
//! - [`Hemisphere`], [`Lobe`], [`AnatomicalLabel`]: Heuristic location labels
//! - [`TumorRecord`]: Per-tumor measurements returned to callers
//! - [`AnalysisOptions`]: Per-call configuration

mod enums;
mod label;
mod options;
mod pixel_spacing;
mod record;
mod region;

pub use enums::{Connectivity, Hemisphere, Lobe};
pub use label::AnatomicalLabel;
pub use options::AnalysisOptions;
pub use pixel_spacing::{PixelSpacing, DEFAULT_PIXEL_SPACING};
pub use record::TumorRecord;
pub use region::{BoundingBox, Centroid, Region};
