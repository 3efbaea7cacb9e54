use clap::Parser;
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;

use lp2yolo::{write_manifest, ManifestArgs};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = ManifestArgs::parse();

    let dirname = PathBuf::from(&args.dataset_dir);
    if !dirname.is_dir() {
        error!("The specified dataset_dir does not exist: {}", args.dataset_dir);
        return ExitCode::FAILURE;
    }

    match write_manifest(&dirname) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Failed to write manifests: {}", e);
            ExitCode::FAILURE
        }
    }
}
