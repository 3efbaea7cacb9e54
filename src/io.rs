use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};
use crate::types::{OutputDirs, TreeDirs};
use crate::utils::create_output_directory;

fn setup_tree(root: &Path) -> Result<TreeDirs> {
    let images_dir = root.join("images");
    let labels_dir = root.join("labels");

    Ok(TreeDirs {
        root: create_output_directory(root)?,
        train_images_dir: create_output_directory(&images_dir.join("train"))?,
        val_images_dir: create_output_directory(&images_dir.join("val"))?,
        train_labels_dir: create_output_directory(&labels_dir.join("train"))?,
        val_labels_dir: create_output_directory(&labels_dir.join("val"))?,
    })
}

/// Set up the `LP/` and `OCR/` YOLO trees under `output_root`
pub fn setup_output_directories(output_root: &Path) -> Result<OutputDirs> {
    let lp = setup_tree(&output_root.join("LP"))?;
    let ocr = setup_tree(&output_root.join("OCR"))?;

    Ok(OutputDirs {
        root: output_root.to_path_buf(),
        lp,
        ocr,
    })
}

/// Label lines collected for one sample, keyed by label file.
///
/// Each file is written in full on [`LabelBuffer::flush`], so converting the
/// same sample twice yields the same file rather than duplicated lines.
#[derive(Debug, Default)]
pub struct LabelBuffer {
    files: BTreeMap<PathBuf, Vec<String>>,
}

impl LabelBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, path: &Path, line: String) {
        self.files.entry(path.to_path_buf()).or_default().push(line);
    }

    /// Write every buffered file, returning how many were written.
    pub fn flush(self) -> Result<usize> {
        let count = self.files.len();
        for (path, lines) in self.files {
            let file = File::create(&path).map_err(ConvertError::io_write(&path))?;
            let mut writer = BufWriter::new(file);
            for line in &lines {
                writeln!(writer, "{}", line).map_err(ConvertError::io_write(&path))?;
            }
            writer.flush().map_err(ConvertError::io_write(&path))?;
        }
        Ok(count)
    }
}

/// Create the dataset.yaml file for YOLO training of one tree
pub fn create_dataset_yaml<I>(tree: &TreeDirs, names: I) -> Result<PathBuf>
where
    I: IntoIterator<Item = String>,
{
    let dataset_yaml_path = tree.root.join("dataset.yaml");
    let absolute_path =
        fs::canonicalize(&tree.root).map_err(ConvertError::io_write(&tree.root))?;

    let mut yaml_content = format!(
        "path: {}\ntrain: images/train\nval: images/val\ntest:\n",
        absolute_path.to_string_lossy()
    );
    yaml_content.push_str("\nnames:\n");
    for (id, name) in names.into_iter().enumerate() {
        yaml_content.push_str(&format!("    {}: {}\n", id, name));
    }

    let mut dataset_yaml = BufWriter::new(
        File::create(&dataset_yaml_path).map_err(ConvertError::io_write(&dataset_yaml_path))?,
    );
    dataset_yaml
        .write_all(yaml_content.as_bytes())
        .and_then(|_| dataset_yaml.flush())
        .map_err(ConvertError::io_write(&dataset_yaml_path))?;

    Ok(dataset_yaml_path)
}
