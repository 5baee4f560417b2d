use clap::Parser;
use log::{error, info};
use std::process;
use tumorscan_core::cli::{build_options, setup_logging, Cli, OutputFormat};
use tumorscan_core::io::{load_mask, load_reference};
use tumorscan_core::{Result, TextReport, TumorAnalyzer, TumorRecord};

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    match run(&cli) {
        Ok(records) => output_records(&records, cli.format),
        Err(e) => {
            error!("Analysis failed: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<Vec<TumorRecord>> {
    let reference = cli
        .reference
        .as_deref()
        .map(load_reference)
        .transpose()?;
    let options = build_options(cli.spacing.as_deref(), cli.connectivity, reference.as_ref())?;
    info!(
        "Analyzing {} ({}, {})",
        cli.mask.display(),
        options.spacing,
        options.connectivity
    );

    let mask = load_mask(&cli.mask)?;
    let records = TumorAnalyzer::analyze_with_options(mask.view(), &options)?;
    info!("Found {} tumor regions", records.len());
    Ok(records)
}

fn output_records(records: &[TumorRecord], format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            print!("{}", TextReport::new(records));
        }
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match serde_json::to_string_pretty(records) {
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
                let _ = records;
                eprintln!("Error: JSON output requires the 'json' feature");
                eprintln!("Rebuild with: cargo build --features json");
                process::exit(1);
            }
        }
    }
}
