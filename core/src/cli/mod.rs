pub mod report;

use crate::error::Result;
use crate::io::ReferenceInfo;
use crate::types::{AnalysisOptions, Connectivity, PixelSpacing};
use clap::{Parser, ValueEnum};
use log::info;
use std::path::PathBuf;

/// Command-line arguments for tumorscan
#[derive(Parser, Debug)]
#[command(name = "tumorscan")]
#[command(about = "Tumor size and location measurement from a segmentation mask")]
#[command(version)]
pub struct Cli {
    /// Path to the mask image (tif, png)
    #[arg(value_name = "MASK")]
    pub mask: PathBuf,

    /// Reference image aligned with the mask (image or DICOM)
    #[arg(short, long, value_name = "FILE")]
    pub reference: Option<PathBuf>,

    /// Pixel spacing in mm (defaults to the DICOM reference spacing, else 0.5)
    #[arg(short, long, value_name = "MM")]
    pub spacing: Option<String>,

    /// Pixel adjacency for grouping regions (4 or 8)
    #[arg(short, long, default_value_t = 8)]
    pub connectivity: u8,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}

/// Initialises env_logger at Info, or Debug when verbose
///
/// `RUST_LOG` still takes precedence for module-specific filters.
pub fn setup_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

/// Builds analysis options from command-line values
///
/// An explicit `--spacing` wins over the spacing recorded in a DICOM
/// reference; with neither, the 0.5 mm default applies.
///
/// # Errors
///
/// Returns `InvalidConfiguration` for an unparsable or non-positive
/// spacing, or a connectivity other than 4 or 8
pub fn build_options(
    spacing: Option<&str>,
    connectivity: u8,
    reference: Option<&ReferenceInfo>,
) -> Result<AnalysisOptions> {
    let spacing = match (spacing, reference.and_then(|r| r.spacing)) {
        (Some(raw), _) => PixelSpacing::parse(raw)?,
        (None, Some(from_reference)) => {
            info!("Using reference image spacing: {}", from_reference);
            from_reference
        }
        (None, None) => PixelSpacing::default(),
    };

    let mut options = AnalysisOptions::default()
        .with_spacing(spacing)
        .with_connectivity(Connectivity::try_from(connectivity)?);
    if let Some(reference) = reference {
        options = options.with_reference_shape(&reference.shape);
    }
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TumorscanError;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["tumorscan", "mask.tif"]).unwrap();
        assert_eq!(cli.mask, PathBuf::from("mask.tif"));
        assert_eq!(cli.connectivity, 8);
        assert!(cli.reference.is_none());
        assert!(cli.spacing.is_none());
        assert!(matches!(cli.format, OutputFormat::Text));
    }

    #[test]
    fn test_parse_all_options() {
        let cli = Cli::try_parse_from([
            "tumorscan",
            "mask.tif",
            "--reference",
            "mri.dcm",
            "--spacing",
            "0.25",
            "--connectivity",
            "4",
            "--format",
            "json",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.reference, Some(PathBuf::from("mri.dcm")));
        assert_eq!(cli.spacing.as_deref(), Some("0.25"));
        assert_eq!(cli.connectivity, 4);
        assert!(matches!(cli.format, OutputFormat::Json));
        assert!(cli.verbose);
    }

    #[test]
    fn test_build_options_precedence() {
        let reference = ReferenceInfo {
            shape: vec![64, 64],
            spacing: Some(PixelSpacing::new(0.8).unwrap()),
        };

        let options = build_options(None, 8, None).unwrap();
        assert_eq!(options.spacing, PixelSpacing::default());
        assert!(options.reference_shape.is_none());

        let options = build_options(None, 4, Some(&reference)).unwrap();
        assert_eq!(options.spacing.mm(), 0.8);
        assert_eq!(options.connectivity, Connectivity::Four);
        assert_eq!(options.reference_shape, Some(vec![64, 64]));

        let options = build_options(Some("0.3"), 8, Some(&reference)).unwrap();
        assert_eq!(options.spacing.mm(), 0.3);
    }

    #[test]
    fn test_build_options_rejects_bad_values() {
        assert!(matches!(
            build_options(Some("0"), 8, None),
            Err(TumorscanError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            build_options(Some("-1"), 8, None),
            Err(TumorscanError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            build_options(None, 6, None),
            Err(TumorscanError::InvalidConfiguration(_))
        ));
    }
}
