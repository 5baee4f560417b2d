//! Loading masks and reference images from disk
//!
//! The analysis itself only ever sees in-memory grids; these helpers are
//! for the binaries and other callers that start from files.

use crate::error::{Result, TumorscanError};
use crate::extraction::{extract_image_shape, extract_pixel_spacing};
use crate::types::PixelSpacing;
use image::DynamicImage;
use log::{debug, info};
use ndarray::Array2;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tiff::decoder::{Decoder, DecodingResult};

/// File extensions accepted as mask images
pub const MASK_EXTENSIONS: [&str; 3] = ["tif", "tiff", "png"];

/// What the analysis needs to know about a reference image
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceInfo {
    /// `[height, width]` or `[height, width, channels]`
    pub shape: Vec<usize>,

    /// Physical spacing, when the file records one (DICOM only)
    pub spacing: Option<PixelSpacing>,
}

/// Loads a mask image as a grid of raw sample values
///
/// Samples are not rescaled: an 8-bit mask holding 0/1 stays 0/1, and a
/// 0/255 mask stays 0/255. Colour images are reduced to luma first.
/// Grayscale TIFFs that `image` cannot represent (float, signed or 32/64-bit
/// samples, e.g. probability maps) are read directly with `tiff`.
///
/// # Errors
///
/// Returns `ImageError` if the file cannot be decoded
pub fn load_mask(path: &Path) -> Result<Array2<f64>> {
    let mask = match image::open(path) {
        Ok(img) => image_to_array(&img)?,
        Err(e) if has_tiff_extension(path) => {
            debug!("Falling back to raw TIFF decoding for {}: {}", path.display(), e);
            load_tiff_samples(path)?
        }
        Err(e) => return Err(e.into()),
    };
    info!("Loaded mask {} with shape {:?}", path.display(), mask.dim());
    Ok(mask)
}

/// Reads a single-channel TIFF as a grid of raw sample values
///
/// # Errors
///
/// Returns `ImageError` if the file is not a readable TIFF, or
/// `InvalidInput` if it has more than one channel
pub fn load_tiff_samples(path: &Path) -> Result<Array2<f64>> {
    let mut decoder = Decoder::new(BufReader::new(File::open(path)?))?;
    let (width, height) = decoder.dimensions()?;
    let color = decoder.colortype()?;
    if !matches!(color, tiff::ColorType::Gray(_)) {
        return Err(TumorscanError::InvalidInput(format!(
            "TIFF mask {} must be single-channel, got {:?}",
            path.display(),
            color
        )));
    }

    let values: Vec<f64> = match decoder.read_image()? {
        DecodingResult::U8(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U16(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U64(v) => v.into_iter().map(|x| x as f64).collect(),
        DecodingResult::I8(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I16(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I64(v) => v.into_iter().map(|x| x as f64).collect(),
        DecodingResult::F16(v) => v.into_iter().map(|x| x.to_f64()).collect(),
        DecodingResult::F32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::F64(v) => v,
    };

    debug!("Decoded {:?} TIFF {}x{}", color, width, height);
    Ok(Array2::from_shape_vec(
        (height as usize, width as usize),
        values,
    )?)
}

/// Converts a decoded image into a `[row, column]` grid of luma samples
pub fn image_to_array(img: &DynamicImage) -> Result<Array2<f64>> {
    let (width, height) = (img.width() as usize, img.height() as usize);
    let color = img.color();
    let bytes_per_channel = color.bytes_per_pixel() / color.channel_count();

    let values: Vec<f64> = match bytes_per_channel {
        1 => img.to_luma8().into_raw().into_iter().map(f64::from).collect(),
        2 => img.to_luma16().into_raw().into_iter().map(f64::from).collect(),
        _ => img
            .to_luma32f()
            .into_raw()
            .into_iter()
            .map(f64::from)
            .collect(),
    };

    Ok(Array2::from_shape_vec((height, width), values)?)
}

/// Reads the shape (and spacing, for DICOM) of a reference image
///
/// # Errors
///
/// Returns `DicomError`/`ImageError` if the file cannot be read, or
/// `InvalidInput` if a DICOM file lacks Rows/Columns
pub fn load_reference(path: &Path) -> Result<ReferenceInfo> {
    if has_dicom_extension(path) || is_dicom_file(path) {
        let dcm = dicom_object::open_file(path)?;
        let (rows, columns) = extract_image_shape(&dcm).ok_or_else(|| {
            TumorscanError::InvalidInput(format!(
                "DICOM reference {} has no Rows/Columns",
                path.display()
            ))
        })?;
        let spacing = extract_pixel_spacing(&dcm)?;
        debug!(
            "DICOM reference {}: {}x{}, spacing {:?}",
            path.display(),
            rows,
            columns,
            spacing
        );
        return Ok(ReferenceInfo {
            shape: vec![rows, columns],
            spacing,
        });
    }

    let img = image::open(path)?;
    let channels = img.color().channel_count() as usize;
    let mut shape = vec![img.height() as usize, img.width() as usize];
    if channels > 1 {
        shape.push(channels);
    }
    debug!("Reference {} has shape {:?}", path.display(), shape);
    Ok(ReferenceInfo {
        shape,
        spacing: None,
    })
}

/// Checks whether `path` has a mask image extension
pub fn has_mask_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            MASK_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

fn has_tiff_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("tif") || ext.eq_ignore_ascii_case("tiff"))
        .unwrap_or(false)
}

fn has_dicom_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("dcm") || ext.eq_ignore_ascii_case("dicom"))
        .unwrap_or(false)
}

/// Checks if a file has a DICOM header
///
/// DICOM files typically have:
/// - 128-byte preamble
/// - 4-byte "DICM" magic string at offset 128
pub fn is_dicom_file(path: &Path) -> bool {
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(_) => return false,
    };

    let mut buffer = [0u8; 132];
    match file.read_exact(&mut buffer) {
        Ok(()) => &buffer[128..132] == b"DICM",
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TumorAnalyzer;
    use dicom_core::value::PrimitiveValue;
    use dicom_core::{DataElement, VR};
    use dicom_object::{FileMetaTableBuilder, InMemDicomObject};
    use image::{GrayImage, ImageBuffer, Luma, RgbImage};
    use std::io::Write;
    use tempfile::TempDir;
    use tiff::encoder::{colortype, TiffEncoder};

    use crate::extraction::tags::{
        COLUMNS as COLUMNS_TAG, PIXEL_SPACING as PIXEL_SPACING_TAG, ROWS as ROWS_TAG,
    };

    #[test]
    fn test_load_mask_keeps_raw_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mask.png");
        GrayImage::from_raw(3, 2, vec![0, 1, 0, 255, 0, 1])
            .unwrap()
            .save(&path)
            .unwrap();

        let mask = load_mask(&path).unwrap();
        assert_eq!(mask.dim(), (2, 3));
        assert_eq!(mask[(0, 1)], 1.0);
        assert_eq!(mask[(1, 0)], 255.0);
        assert_eq!(mask[(1, 1)], 0.0);
    }

    #[test]
    fn test_sixteen_bit_mask() {
        let img: ImageBuffer<Luma<u16>, Vec<u16>> =
            ImageBuffer::from_raw(2, 1, vec![0, 1000]).unwrap();
        let mask = image_to_array(&DynamicImage::ImageLuma16(img)).unwrap();
        assert_eq!(mask[(0, 1)], 1000.0);
    }

    #[test]
    fn test_float_tiff_probability_map() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("probabilities.tif");
        let file = File::create(&path).unwrap();
        TiffEncoder::new(file)
            .unwrap()
            .write_image::<colortype::Gray32Float>(2, 1, &[0.2, 0.9])
            .unwrap();

        let mask = load_mask(&path).unwrap();
        assert_eq!(mask.dim(), (1, 2));
        assert_eq!(mask[(0, 0)], f64::from(0.2f32));
        assert_eq!(mask[(0, 1)], f64::from(0.9f32));

        let records = TumorAnalyzer::analyze(mask.view()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].area_px, 1);
        assert_eq!(records[0].bbox_px, [1, 0, 1, 1]);
    }

    #[test]
    fn test_signed_tiff_keeps_raw_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("labels.tiff");
        let file = File::create(&path).unwrap();
        TiffEncoder::new(file)
            .unwrap()
            .write_image::<colortype::GrayI16>(3, 1, &[-4, 0, 300])
            .unwrap();

        let mask = load_tiff_samples(&path).unwrap();
        assert_eq!(mask.row(0).to_vec(), vec![-4.0, 0.0, 300.0]);
    }

    #[test]
    fn test_rgb_tiff_rejected_by_raw_decoder() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rgb.tif");
        let file = File::create(&path).unwrap();
        TiffEncoder::new(file)
            .unwrap()
            .write_image::<colortype::RGB8>(1, 1, &[1, 2, 3])
            .unwrap();

        assert!(matches!(
            load_tiff_samples(&path),
            Err(TumorscanError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_reference_from_dicom_file() {
        let temp_dir = TempDir::new().unwrap();
        // No extension: detected through the DICM preamble
        let path = temp_dir.path().join("reference");

        let dcm = InMemDicomObject::from_element_iter([
            DataElement::new(ROWS_TAG, VR::US, PrimitiveValue::from(64_u16)),
            DataElement::new(COLUMNS_TAG, VR::US, PrimitiveValue::from(48_u16)),
            DataElement::new(
                PIXEL_SPACING_TAG,
                VR::DS,
                PrimitiveValue::Strs(vec!["0.7".to_string(), "0.7".to_string()].into()),
            ),
        ]);
        dcm.with_meta(
            FileMetaTableBuilder::new()
                .media_storage_sop_class_uid("1.2.840.10008.5.1.4.1.1.4")
                .media_storage_sop_instance_uid("1.2.826.0.1.3680043.2.1125.1")
                .transfer_syntax("1.2.840.10008.1.2.1"),
        )
        .unwrap()
        .write_to_file(&path)
        .unwrap();

        assert!(is_dicom_file(&path));
        let info = load_reference(&path).unwrap();
        assert_eq!(info.shape, vec![64, 48]);
        assert_eq!(info.spacing, Some(PixelSpacing::new(0.7).unwrap()));
    }

    #[test]
    fn test_reference_shape_from_image() {
        let temp_dir = TempDir::new().unwrap();
        let gray = temp_dir.path().join("gray.png");
        let rgb = temp_dir.path().join("rgb.png");
        GrayImage::new(7, 5).save(&gray).unwrap();
        RgbImage::new(7, 5).save(&rgb).unwrap();

        assert_eq!(load_reference(&gray).unwrap().shape, vec![5, 7]);
        let info = load_reference(&rgb).unwrap();
        assert_eq!(info.shape, vec![5, 7, 3]);
        assert!(info.spacing.is_none());
    }

    #[test]
    fn test_load_mask_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        assert!(load_mask(&temp_dir.path().join("absent.png")).is_err());
    }

    #[test]
    fn test_is_dicom_file() {
        let temp_dir = TempDir::new().unwrap();
        let dicom = temp_dir.path().join("scan");
        let mut file = File::create(&dicom).unwrap();
        file.write_all(&[0u8; 128]).unwrap();
        file.write_all(b"DICM").unwrap();

        let other = temp_dir.path().join("other");
        File::create(&other).unwrap().write_all(b"small").unwrap();

        assert!(is_dicom_file(&dicom));
        assert!(!is_dicom_file(&other));
    }

    #[test]
    fn test_mask_extensions() {
        assert!(has_mask_extension(Path::new("a/b/mask.tif")));
        assert!(has_mask_extension(Path::new("mask.TIFF")));
        assert!(has_mask_extension(Path::new("mask.png")));
        assert!(!has_mask_extension(Path::new("mask.jpg")));
        assert!(!has_mask_extension(Path::new("mask")));
    }
}
