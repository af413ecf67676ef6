//! Owner-only directory and file creation.
//!
//! Permission bits are applied by the `open(2)`/`mkdir(2)` call that creates
//! the entry, never by a later `chmod`, so there is no moment where a file
//! holding credential material is readable by group or other.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

/// Unix mode for private directories.
pub const PRIVATE_DIR_MODE: u32 = 0o700;
/// Unix mode for private files.
pub const PRIVATE_FILE_MODE: u32 = 0o600;

/// Create `path` (and any missing ancestors) with mode 0700.
///
/// Existing directories are left untouched.
pub fn ensure_private_dir(path: &Path) -> io::Result<()> {
    if path.is_dir() {
        return Ok(());
    }

    debug!(path = %path.display(), "creating private directory");
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(PRIVATE_DIR_MODE);
    }
    builder.create(path)
}

/// Create or replace `path` with `bytes`, readable only by the owner.
///
/// The content is written to a fresh sibling file opened with
/// `O_CREAT | O_EXCL` and mode 0600, flushed, and renamed over `path`.
/// Readers see either the previous content or the new content.
pub fn write_private_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    ensure_private_dir(parent_dir(path))?;

    let temp_path = temp_path_for(path);
    let result = write_then_rename(&temp_path, path, bytes);
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_then_rename(temp_path: &Path, path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = create_private(temp_path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    drop(file);

    debug!(path = %path.display(), "replacing private file");
    fs::rename(temp_path, path)
}

fn create_private(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(PRIVATE_FILE_MODE);
    }
    options.open(path)
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let suffix = Uuid::new_v4();
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("tmp");
    path.with_file_name(format!(".{file_name}.{suffix}.tmp"))
}
