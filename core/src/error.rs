use thiserror::Error;

/// Result type for tumorscan operations
pub type Result<T> = std::result::Result<T, TumorscanError>;

/// Error types for tumorscan operations
#[derive(Error, Debug)]
pub enum TumorscanError {
    /// Spacing or connectivity outside the accepted range
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Reference image does not share the mask's height and width
    #[error("Shape mismatch: mask is {mask:?}, reference image is {reference:?}")]
    ShapeMismatch {
        mask: (usize, usize),
        reference: Vec<usize>,
    },

    /// Malformed mask or reference input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Image decoding error
    #[error("Image error: {0}")]
    ImageError(String),

    /// DICOM reading error
    #[error("DICOM error: {0}")]
    DicomError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<image::ImageError> for TumorscanError {
    fn from(e: image::ImageError) -> Self {
        TumorscanError::ImageError(format!("{}", e))
    }
}

impl From<tiff::TiffError> for TumorscanError {
    fn from(e: tiff::TiffError) -> Self {
        TumorscanError::ImageError(format!("{}", e))
    }
}

impl From<dicom_object::ReadError> for TumorscanError {
    fn from(e: dicom_object::ReadError) -> Self {
        TumorscanError::DicomError(format!("{}", e))
    }
}

impl From<ndarray::ShapeError> for TumorscanError {
    fn from(e: ndarray::ShapeError) -> Self {
        TumorscanError::InvalidInput(format!("{}", e))
    }
}
