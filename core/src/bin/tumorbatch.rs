use clap::Parser;
use log::{error, info, warn};
use rayon::prelude::*;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process;
use tumorscan_core::cli::{build_options, setup_logging};
use tumorscan_core::io::{has_mask_extension, load_mask};
use tumorscan_core::{AnalysisOptions, TextReport, TumorAnalyzer, TumorRecord};

/// CLI tool for measuring tumors across a directory of masks
#[derive(Parser, Debug)]
#[command(name = "tumorbatch")]
#[command(about = "Measure tumors in every mask image (tif, tiff, png) of a directory")]
#[command(version)]
struct Cli {
    /// Directory containing mask images
    #[arg(value_name = "DIRECTORY")]
    directory: PathBuf,

    /// Pixel spacing in mm, applied to every mask
    #[arg(short, long, value_name = "MM")]
    spacing: Option<String>,

    /// Pixel adjacency for grouping regions (4 or 8)
    #[arg(short, long, default_value_t = 8)]
    connectivity: u8,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
    /// One summary line per mask
    Summary,
}

/// Result of analyzing one mask file
struct MaskResult {
    path: PathBuf,
    records: Vec<TumorRecord>,
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    if !cli.directory.is_dir() {
        eprintln!("Error: {} is not a directory", cli.directory.display());
        process::exit(1);
    }

    let options = match build_options(cli.spacing.as_deref(), cli.connectivity, None) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    info!("Processing directory: {}", cli.directory.display());

    let mask_files = match collect_mask_files(&cli.directory) {
        Ok(files) => files,
        Err(e) => {
            error!("Failed to read directory: {}", e);
            eprintln!("Error: Failed to read directory: {}", e);
            process::exit(1);
        }
    };

    if mask_files.is_empty() {
        eprintln!("Error: No mask files (.tif, .tiff, .png) found in directory");
        process::exit(1);
    }

    info!("Found {} mask files", mask_files.len());

    let results = analyze_all(&mask_files, &options);

    if results.is_empty() {
        eprintln!("Error: No mask files could be processed");
        process::exit(1);
    }

    info!("Successfully processed {} files", results.len());

    output_results(&results, cli.format);
}

/// Analyzes every file in parallel, skipping the ones that fail
///
/// Output follows the (sorted) input order regardless of scheduling.
fn analyze_all(files: &[PathBuf], options: &AnalysisOptions) -> Vec<MaskResult> {
    files
        .par_iter()
        .filter_map(|path| {
            let analyzed = load_mask(path)
                .and_then(|mask| TumorAnalyzer::analyze_with_options(mask.view(), options));
            match analyzed {
                Ok(records) => {
                    info!("Processed: {} ({} regions)", path.display(), records.len());
                    Some(MaskResult {
                        path: path.clone(),
                        records,
                    })
                }
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    None
                }
            }
        })
        .collect()
}

fn collect_mask_files(directory: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(directory)? {
        let path = entry?.path();
        if path.is_file() && has_mask_extension(&path) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

fn output_results(results: &[MaskResult], format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            for result in results {
                println!("{}", result.path.display());
                println!("{}", TextReport::new(&result.records));
            }
        }
        OutputFormat::Summary => {
            print!("{}", SummaryReport::new(results));
        }
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match output_json(results) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!("Failed to serialize to JSON: {}", e);
                        eprintln!("Error: Failed to serialize to JSON: {}", e);
                        process::exit(1);
                    }
                }
            }
            #[cfg(not(feature = "json"))]
            {
                eprintln!("Error: JSON output requires the 'json' feature");
                eprintln!("Rebuild with: cargo build --features json");
                process::exit(1);
            }
        }
    }
}

#[cfg(feature = "json")]
fn output_json(results: &[MaskResult]) -> Result<String, serde_json::Error> {
    use serde::Serialize;

    #[derive(Serialize)]
    struct ResultJson<'a> {
        file_path: String,
        tumors: &'a [TumorRecord],
    }

    let output: Vec<ResultJson> = results
        .iter()
        .map(|r| ResultJson {
            file_path: r.path.display().to_string(),
            tumors: &r.records,
        })
        .collect();

    serde_json::to_string_pretty(&output)
}

/// One line per mask: tumor count and total tumor area
struct SummaryReport<'a> {
    results: &'a [MaskResult],
}

impl<'a> SummaryReport<'a> {
    fn new(results: &'a [MaskResult]) -> Self {
        Self { results }
    }
}

impl<'a> fmt::Display for SummaryReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for result in self.results {
            let total_mm2: f64 = result.records.iter().map(|r| r.area_mm2).sum();
            writeln!(
                f,
                "{}: {} tumors, {:.2} mm² total",
                result.path.display(),
                result.records.len(),
                total_mm2
            )?;
        }
        Ok(())
    }
}
