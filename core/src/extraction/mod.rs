pub mod anatomy;
pub mod binarize;
pub mod regions;
pub mod tags;
pub mod units;

pub use anatomy::{classify_region, FRONTAL_LIMIT, HEMISPHERE_SPLIT, PARIETAL_LIMIT};
pub use binarize::{binarize, BinaryMask};
pub use regions::{extract_regions, label_components, LabeledMask};
pub use tags::{extract_image_shape, extract_pixel_spacing};
pub use units::{to_physical, AREA, LENGTH};
