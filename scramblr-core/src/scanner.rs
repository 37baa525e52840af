use crate::error::{Result, ScramblrError};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Extensions (lowercase, without the dot) treated as images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tiff", "tif", "webp"];

/// An image file found in the target directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub file_name: String,
    /// Extension including the leading dot, exactly as found on disk.
    pub extension: String,
}

/// Snapshot of a directory taken at plan time.
#[derive(Debug, Clone, Default)]
pub struct DirectoryListing {
    pub directory: PathBuf,
    /// Image entries in ascending file name order.
    pub entries: Vec<FileEntry>,
    /// Lowercased names of everything in the directory, images or not.
    pub existing_names: HashSet<String>,
}

impl DirectoryListing {
    pub fn contains_name(&self, name: &str) -> bool {
        self.existing_names.contains(&name.to_lowercase())
    }
}

/// Returns the extension (with dot) if the path names an accepted image type.
pub fn image_extension(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?;
    let lower = ext.to_ascii_lowercase();
    if IMAGE_EXTENSIONS.contains(&lower.as_str()) {
        Some(format!(".{ext}"))
    } else {
        None
    }
}

/// Check that `dir` exists, is a directory and can be listed and written.
pub fn validate_directory(dir: &Path) -> Result<()> {
    let metadata = match fs::metadata(dir) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ScramblrError::invalid_directory(dir, "does not exist"));
        },
        Err(e) => return Err(ScramblrError::invalid_directory(dir, e.to_string())),
    };

    if !metadata.is_dir() {
        return Err(ScramblrError::invalid_directory(dir, "not a directory"));
    }

    fs::read_dir(dir)
        .map_err(|e| ScramblrError::invalid_directory(dir, format!("not readable: {e}")))?;

    if !can_write_entries(dir) {
        return Err(ScramblrError::invalid_directory(dir, "not writable"));
    }

    Ok(())
}

/// Whether this process may rename entries inside `dir`.
#[cfg(unix)]
fn can_write_entries(dir: &Path) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(path) = CString::new(dir.as_os_str().as_bytes()) else {
        return false;
    };
    // Renaming needs write and search permission on the directory itself.
    unsafe { libc::access(path.as_ptr(), libc::W_OK | libc::X_OK) == 0 }
}

#[cfg(not(unix))]
fn can_write_entries(dir: &Path) -> bool {
    fs::metadata(dir).is_ok_and(|metadata| !metadata.permissions().readonly())
}

/// List the direct children of `dir`, collecting image files as entries.
///
/// Only regular files become entries; sub-directories and symlinks are left
/// alone but still reserve their names. A symlink that already carries a
/// final name such as `img_1.png` therefore makes the phase 2 move onto that
/// name fail with "already exists".
pub fn scan_directory(dir: &Path) -> Result<DirectoryListing> {
    let mut listing = DirectoryListing {
        directory: dir.to_path_buf(),
        ..DirectoryListing::default()
    };

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|e| ScramblrError::io(dir, io::Error::from(e)))?;
        let file_name = entry.file_name().to_string_lossy().into_owned();
        listing.existing_names.insert(file_name.to_lowercase());

        if !entry.file_type().is_file() {
            continue;
        }

        if let Some(extension) = image_extension(entry.path()) {
            listing.entries.push(FileEntry {
                path: entry.path().to_path_buf(),
                file_name,
                extension,
            });
        }
    }

    debug!(
        directory = %dir.display(),
        images = listing.entries.len(),
        total = listing.existing_names.len(),
        "scanned directory"
    );

    Ok(listing)
}
