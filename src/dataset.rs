use log::{error, info};

use crate::alphabet::OcrAlphabet;
use crate::config::ConvertConfig;
use crate::conversion::{process_sample, ConversionContext, LP_CLASS_NAME};
use crate::error::Result;
use crate::io::{create_dataset_yaml, setup_output_directories};
use crate::manifest::read_manifest;
use crate::types::{ProcessingStats, Split};
use crate::utils::create_progress_bar;

/// Convert every sample listed in one split's manifest.
///
/// Failing samples are logged and counted, the rest of the split carries on.
pub fn process_split(ctx: &ConversionContext, split: Split, ids: &[String]) -> ProcessingStats {
    let mut stats = ProcessingStats::new();
    let label = match split {
        Split::Train => "Train",
        Split::Test => "Test",
    };
    let pb = create_progress_bar(ids.len() as u64, label);

    for id in ids {
        stats.increment_total();
        match process_sample(ctx, split, id) {
            Ok(outcome) if outcome.plates == 0 => stats.increment_skipped_no_plates(),
            Ok(outcome) => {
                stats.increment_successful();
                stats.plates_written += outcome.plates;
                stats.characters_written += outcome.characters;
            }
            Err(e) => {
                error!("Failed to convert sample {} ({}): {}", id, split.input_name(), e);
                stats.increment_failed();
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message(format!("{} processing complete", label));
    stats
}

/// Main dataset conversion pipeline
pub fn process_dataset(config: &ConvertConfig) -> Result<ProcessingStats> {
    // Read every manifest up front so a missing split fails before any output exists.
    let mut manifests = Vec::with_capacity(Split::ALL.len());
    for split in Split::ALL {
        let manifest_path = config
            .input_dir
            .join(format!("{}.txt", split.input_name()));
        let ids = read_manifest(&manifest_path)?;
        info!("Read {} ids from {}", ids.len(), manifest_path.display());
        manifests.push((split, ids));
    }

    let output_dirs = setup_output_directories(&config.output_root)?;
    let alphabet = OcrAlphabet::default();
    let ctx = ConversionContext {
        config,
        output_dirs: &output_dirs,
        alphabet: &alphabet,
    };

    let mut stats = ProcessingStats::new();
    for (split, ids) in &manifests {
        info!("Processing {} split", split.input_name());
        stats.merge(&process_split(&ctx, *split, ids));
    }

    info!("Creating dataset.yaml files...");
    create_dataset_yaml(&output_dirs.lp, [LP_CLASS_NAME.to_string()])?;
    create_dataset_yaml(&output_dirs.ocr, alphabet.names())?;

    info!(
        "Conversion finished, output written to {}",
        output_dirs.root.display()
    );
    Ok(stats)
}
