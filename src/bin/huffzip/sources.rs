//! Turning the command line inputs into the bytes that get compressed.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use tracing::debug;
use walkdir::WalkDir;

use crate::progress::ProgressMonitor;

/// Expand `inputs` into the files to read, in order.
///
/// A file is taken as is. A directory contributes its direct child files sorted by name,
/// anything nested deeper is skipped. Symbolic links count as what they point to.
pub fn collect(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::with_capacity(inputs.len());
    for input in inputs {
        let metadata = fs::metadata(input)
            .wrap_err_with(|| format!("Can't access input {}", input.display()))?;
        if !metadata.is_dir() {
            files.push(input.clone());
            continue;
        }
        for entry in WalkDir::new(input)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry =
                entry.wrap_err_with(|| format!("Can't list directory {}", input.display()))?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            } else {
                debug!("skipping {}, not a regular file", entry.path().display());
            }
        }
    }
    Ok(files)
}

/// Read a whole file, showing progress while doing so
pub fn read_with_progress(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path).wrap_err_with(|| format!("Can't open {}", path.display()))?;
    let size = file.metadata()?.len() as usize;
    let mut buffer = Vec::with_capacity(size);
    ProgressMonitor::new(file, size)
        .read_to_end(&mut buffer)
        .wrap_err_with(|| format!("Can't read {}", path.display()))?;
    Ok(buffer)
}

/// Read all `files` in order
pub fn read_all(files: &[PathBuf]) -> Result<Vec<Vec<u8>>> {
    files.iter().map(|path| read_with_progress(path)).collect()
}
