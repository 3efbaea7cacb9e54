//! Split manifests: newline-delimited lists of sample ids.

use glob::{glob, Pattern};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};
use crate::types::is_image_file;

/// Read the sample ids listed in a manifest, in file order.
///
/// Blank lines (including the usual trailing one) are skipped and `\r\n`
/// line endings are accepted.
pub fn read_manifest(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|source| ConvertError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Sorted, extension-stripped names of the images directly inside `images_dir`.
pub fn list_image_stems(images_dir: &Path) -> Vec<String> {
    let Some(dir) = images_dir.to_str() else {
        log::warn!("Skipping non UTF-8 path {:?}", images_dir);
        return Vec::new();
    };
    let pattern = format!("{}/*", Pattern::escape(dir));

    let mut stems: Vec<String> = match glob(&pattern) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .filter(|path| path.is_file() && is_image_file(path))
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(String::from))
            .collect(),
        Err(e) => {
            log::error!("Invalid glob pattern for {:?}: {}", images_dir, e);
            Vec::new()
        }
    };
    stems.sort();
    stems
}

fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let file = File::create(path).map_err(ConvertError::io_write(path))?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "{}", line).map_err(ConvertError::io_write(path))?;
    }
    writer.flush().map_err(ConvertError::io_write(path))
}

/// Regenerate `train.txt` and `val.txt` in `dataset_dir` from `images/train` and `images/val`.
///
/// A missing split directory produces an empty manifest.
pub fn write_manifest(dataset_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    let images_dir = dataset_dir.join("images");
    let train_path = dataset_dir.join("train.txt");
    let val_path = dataset_dir.join("val.txt");

    let train = list_image_stems(&images_dir.join("train"));
    let val = list_image_stems(&images_dir.join("val"));

    write_lines(&train_path, &train)?;
    write_lines(&val_path, &val)?;
    log::info!(
        "Wrote {} train and {} val ids to {:?}",
        train.len(),
        val.len(),
        dataset_dir
    );

    Ok((train_path, val_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_manifest() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("train.txt");
        fs::write(&path, "00017\r\n00003\n\n00101\n").unwrap();

        assert_eq!(read_manifest(&path).unwrap(), vec!["00017", "00003", "00101"]);
    }

    #[test]
    fn test_read_manifest_missing() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_manifest(&temp_dir.path().join("test.txt")),
            Err(ConvertError::ManifestRead { .. })
        ));
    }

    #[test]
    fn test_write_then_read_manifest() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("images/train")).unwrap();
        fs::create_dir_all(root.join("images/val")).unwrap();
        for name in ["b.jpg", "a.jpg", "c_1.png", "notes.txt"] {
            fs::write(root.join("images/train").join(name), b"").unwrap();
        }
        fs::write(root.join("images/val/z.jpg"), b"").unwrap();

        let (train_path, val_path) = write_manifest(root).unwrap();

        assert_eq!(read_manifest(&train_path).unwrap(), vec!["a", "b", "c_1"]);
        assert_eq!(read_manifest(&val_path).unwrap(), vec!["z"]);
    }

    #[test]
    fn test_write_manifest_missing_split() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (train_path, val_path) = write_manifest(temp_dir.path()).unwrap();
        assert!(read_manifest(&train_path).unwrap().is_empty());
        assert!(read_manifest(&val_path).unwrap().is_empty());
    }
}
