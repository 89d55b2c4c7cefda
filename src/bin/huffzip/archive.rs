//! The zip container holding the frame as a single stored entry.

use std::io::{Read, Seek, Write};

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use huffzip::common::ARCHIVE_ENTRY_NAME;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::progress::ProgressMonitor;

/// Write `frame` as the only entry of a new archive. The frame is already compressed,
/// so the entry is stored without deflating it again.
pub fn write_archive<W: Write + Seek>(writer: W, frame: &[u8]) -> Result<W> {
    let mut zip = ZipWriter::new(writer);
    let options = FileOptions::default().compression_method(CompressionMethod::Stored);
    zip.start_file(ARCHIVE_ENTRY_NAME, options)?;
    zip.write_all(frame)?;
    Ok(zip.finish()?)
}

/// Read the frame entry back out of an archive
pub fn read_archive<R: Read + Seek>(reader: R) -> Result<Vec<u8>> {
    let mut archive = ZipArchive::new(reader).wrap_err("Input is not a zip archive")?;
    let mut entry = archive
        .by_name(ARCHIVE_ENTRY_NAME)
        .wrap_err_with(|| format!("Archive has no {ARCHIVE_ENTRY_NAME} entry"))?;
    let size = entry.size() as usize;
    let mut frame = Vec::with_capacity(size);
    ProgressMonitor::new(&mut entry, size).read_to_end(&mut frame)?;
    Ok(frame)
}
