//! Writing result files so that either all of them appear or none does.

use std::fs;
use std::io::Write;
use std::path::Path;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Write every `(path, contents)` pair.
///
/// All contents are first written to temporary files next to their targets. Only when
/// every one of them is complete are they moved into place. If a move fails, the files
/// moved before it are removed again and the remaining temporary files are dropped.
pub fn write_all_or_nothing(outputs: &[(&Path, &[u8])]) -> Result<()> {
    let mut staged = Vec::with_capacity(outputs.len());
    for &(path, contents) in outputs {
        staged.push((stage(path, contents)?, path));
    }

    let mut persisted: Vec<&Path> = Vec::with_capacity(staged.len());
    for (file, path) in staged {
        if let Err(err) = file.persist(path) {
            for done in persisted {
                if let Err(remove_err) = fs::remove_file(done) {
                    warn!("can't remove {} again: {remove_err}", done.display());
                }
            }
            return Err(err.error).wrap_err_with(|| format!("Can't write {}", path.display()));
        }
        debug!("wrote {}", path.display());
        persisted.push(path);
    }
    Ok(())
}

/// Write `contents` to a temporary file in the directory `path` will end up in
fn stage(path: &Path, contents: &[u8]) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)
        .wrap_err_with(|| format!("Can't create a file in {}", dir.display()))?;
    file.write_all(contents)
        .and_then(|()| file.as_file().sync_all())
        .wrap_err_with(|| format!("Can't write {}", path.display()))?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::write_all_or_nothing;
    use std::fs;

    #[test]
    fn writes_every_file() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first");
        let second = dir.path().join("second");
        write_all_or_nothing(&[
            (first.as_path(), b"one".as_slice()),
            (second.as_path(), b"".as_slice()),
        ])
        .unwrap();
        assert_eq!(fs::read(&first).unwrap(), b"one");
        assert!(fs::read(&second).unwrap().is_empty());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("target");
        fs::write(&target, "old contents").unwrap();
        write_all_or_nothing(&[(target.as_path(), b"new".as_slice())]).unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"new");
    }

    #[test]
    fn unwritable_directory_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first");
        let second = dir.path().join("missing").join("second");
        let result = write_all_or_nothing(&[
            (first.as_path(), b"one".as_slice()),
            (second.as_path(), b"two".as_slice()),
        ]);
        assert!(result.is_err());
        assert!(!first.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn failed_move_removes_earlier_files() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first");
        // a file can't be moved over a directory
        let second = dir.path().join("second");
        fs::create_dir(&second).unwrap();
        let result = write_all_or_nothing(&[
            (first.as_path(), b"one".as_slice()),
            (second.as_path(), b"two".as_slice()),
        ]);
        assert!(result.is_err());
        assert!(!first.exists());
        assert!(second.is_dir());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
