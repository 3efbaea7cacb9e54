use clap::Parser;
use log::{error, info};
use std::process::ExitCode;

use lp2yolo::{process_dataset, Args, ConvertConfig};

fn main() -> ExitCode {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = ConvertConfig::from_args(&args);
    if !config.input_dir.is_dir() {
        error!(
            "The specified input_directory does not exist: {}",
            args.input_directory
        );
        return ExitCode::FAILURE;
    }

    info!(
        "Converting {} into {} (lp_size={}, ocr_size={})",
        config.input_dir.display(),
        config.output_root.display(),
        config.lp_size,
        config.ocr_size
    );

    match process_dataset(&config) {
        Ok(stats) => {
            stats.print_summary();
            if stats.failed_conversions > 0 {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("Failed to process dataset: {}", e);
            ExitCode::FAILURE
        }
    }
}
