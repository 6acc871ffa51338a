mod barcode;
mod config;
mod error;
mod pdf;

use anyhow::{Result, anyhow};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use config::{LayoutConfig, load_csv_data, load_settings_config};
use pdf::create_labels_pdf;

/// Generate a printable sheet of Code 39 barcode labels as a PDF.
#[derive(Parser, Debug)]
#[command(name = "barcode_label_print")]
#[command(about = "Generate a printable sheet of Code 39 barcode labels.", long_about = None)]
struct Args {
    /// Target directory containing data.csv and optionally settings.json
    /// labels.pdf will be saved in this directory
    #[arg(short, long, default_value = ".")]
    target_dir: PathBuf,
}

fn run(target_dir: PathBuf) -> Result<()> {
    // Verify the target directory exists
    if !target_dir.exists() {
        return Err(anyhow!("Target directory not found: {:?}", target_dir));
    }
    if !target_dir.is_dir() {
        return Err(anyhow!("Target path is not a directory: {:?}", target_dir));
    }

    // Define file paths
    let settings_json_path = target_dir.join("settings.json");
    let data_csv_path = target_dir.join("data.csv");
    let output_pdf_path = target_dir.join("labels.pdf");

    if !data_csv_path.exists() {
        return Err(anyhow!("Required file not found: {:?}", data_csv_path));
    }

    let config = if settings_json_path.exists() {
        println!("Loading configuration from settings.json...");
        load_settings_config(&settings_json_path)?.resolve()?
    } else {
        LayoutConfig::default()
    };

    println!("Loading data from data.csv...");
    let records = load_csv_data(&data_csv_path)?;
    println!("Found {} labels in data.csv", records.len());

    println!("Generating labels.pdf...");
    let pdf_bytes = create_labels_pdf(&records, &config)?;

    fs::write(&output_pdf_path, &pdf_bytes)?;
    println!(
        "Successfully saved labels.pdf with {} pages",
        records.len().div_ceil(config.labels_per_page)
    );

    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args.target_dir) {
        eprintln!("Error: {}", e);
        for cause in e.chain().skip(1) {
            eprintln!("Caused by: {}", cause);
        }
        std::process::exit(1);
    }
}
