use crate::error::{Result, TumorscanError};
use log::debug;
use ndarray::{Array2, ArrayView2};
use num::ToPrimitive;

/// Values strictly above this count as foreground
pub const FOREGROUND_THRESHOLD: f64 = 0.5;

/// Strict tumor / background grid derived from a segmentation mask
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    data: Array2<bool>,
}

impl BinaryMask {
    /// Wraps an existing boolean grid
    pub fn from_array(data: Array2<bool>) -> Self {
        Self { data }
    }

    /// Returns `(height, width)`
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Returns the underlying grid, indexed `[row, column]`
    pub fn view(&self) -> ArrayView2<'_, bool> {
        self.data.view()
    }

    /// Checks whether the pixel at `(row, column)` is foreground
    #[inline]
    pub fn is_foreground(&self, row: usize, col: usize) -> bool {
        self.data[(row, col)]
    }

    /// Number of foreground pixels
    pub fn foreground_count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }
}

/// Thresholds a numeric mask into a [`BinaryMask`]
///
/// Every element `> 0.5` becomes foreground. NaN compares false and
/// therefore lands in the background. A mask with nothing above the
/// threshold yields an all-background grid, not an error.
///
/// # Errors
///
/// Returns `InvalidInput` if an element cannot be represented as `f64`
pub fn binarize<T>(mask: ArrayView2<'_, T>) -> Result<BinaryMask>
where
    T: ToPrimitive,
{
    let values = mask
        .iter()
        .map(|v| {
            v.to_f64()
                .map(|x| x > FOREGROUND_THRESHOLD)
                .ok_or_else(|| {
                    TumorscanError::InvalidInput("mask value is not representable as f64".into())
                })
        })
        .collect::<Result<Vec<bool>>>()?;

    let binary = BinaryMask::from_array(Array2::from_shape_vec(mask.raw_dim(), values)?);
    debug!(
        "Binarized {:?} mask: {} foreground pixels",
        binary.shape(),
        binary.foreground_count()
    );
    Ok(binary)
}
