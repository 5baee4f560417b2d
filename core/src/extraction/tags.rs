use crate::error::Result;
use crate::types::PixelSpacing;
use dicom_core::Tag;
use dicom_object::InMemDicomObject;
use log::debug;

// Image Geometry Tags
pub const ROWS: Tag = Tag(0x0028, 0x0010);
pub const COLUMNS: Tag = Tag(0x0028, 0x0011);
pub const PIXEL_SPACING: Tag = Tag(0x0028, 0x0030);
pub const IMAGER_PIXEL_SPACING: Tag = Tag(0x0018, 0x1164);

/// Helper to get string value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to string
pub fn get_string_value(dcm: &InMemDicomObject, tag: Tag) -> Option<String> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_str().ok())
        .map(|s| s.trim().to_string())
}

/// Helper to get u16 value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to u16
pub fn get_u16_value(dcm: &InMemDicomObject, tag: Tag) -> Option<u16> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_int::<u16>().ok())
}

/// Extracts pixel spacing from a DICOM object
///
/// Tries PixelSpacing first, then ImagerPixelSpacing. Returns `Ok(None)`
/// when neither tag is present.
///
/// # Errors
///
/// Returns `InvalidConfiguration` if the tag is present but holds a
/// non-positive or anisotropic spacing
pub fn extract_pixel_spacing(dcm: &InMemDicomObject) -> Result<Option<PixelSpacing>> {
    let raw = get_string_value(dcm, PIXEL_SPACING)
        .filter(|s| !s.is_empty())
        .or_else(|| get_string_value(dcm, IMAGER_PIXEL_SPACING).filter(|s| !s.is_empty()));

    match raw {
        Some(s) => {
            let spacing = PixelSpacing::parse(&s)?;
            debug!("DICOM pixel spacing: {}", spacing);
            Ok(Some(spacing))
        }
        None => Ok(None),
    }
}

/// Extracts `(rows, columns)` from a DICOM object
///
/// Returns `None` if either tag is missing
pub fn extract_image_shape(dcm: &InMemDicomObject) -> Option<(usize, usize)> {
    let rows = get_u16_value(dcm, ROWS)?;
    let columns = get_u16_value(dcm, COLUMNS)?;
    Some((rows as usize, columns as usize))
}
