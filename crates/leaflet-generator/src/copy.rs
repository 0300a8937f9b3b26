//! Recursive directory copying.
//!
//! Copies a source tree into a destination tree, creating directories as
//! needed and streaming file contents. The copy overlays the destination:
//! entries that exist only in the destination are left alone.

use std::{
    fs::{self, File},
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info, trace};

/// Tree copy errors.
#[derive(Debug, Error)]
pub enum CopyError {
    /// Source directory does not exist.
    #[error("source directory {} does not exist", .0.display())]
    SourceMissing(PathBuf),

    /// Directory listing failed.
    #[error("failed to read directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Destination directory could not be created.
    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Source file could not be opened.
    #[error("failed to open {}: {source}", .path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Destination file could not be created.
    #[error("failed to create {}: {source}", .path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Copying bytes between files failed.
    #[error("failed to copy {} to {}: {source}", .from.display(), .to.display())]
    StreamCopy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type for copy operations.
pub type Result<T> = std::result::Result<T, CopyError>;

/// Counts of what a copy produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Number of files copied.
    pub files: usize,

    /// Number of directories ensured, including the destination root.
    pub dirs: usize,

    /// Total bytes streamed.
    pub bytes: u64,
}

/// Copy the tree rooted at `source` into `destination`.
///
/// Fails fast: the first error aborts the rest of the copy, leaving whatever
/// was already written in place.
pub fn copy_dir(source: &Path, destination: &Path) -> Result<CopyStats> {
    info!(
        source = %source.display(),
        dest = %destination.display(),
        "copying directory tree"
    );

    if !source.exists() {
        return Err(CopyError::SourceMissing(source.to_path_buf()));
    }

    let mut stats = CopyStats::default();
    copy_dir_inner(source, destination, &mut stats)?;

    info!(
        files = stats.files,
        dirs = stats.dirs,
        bytes = stats.bytes,
        "directory tree copied"
    );
    Ok(stats)
}

fn copy_dir_inner(source: &Path, destination: &Path, stats: &mut CopyStats) -> Result<()> {
    ensure_dir(destination)?;
    stats.dirs += 1;

    let read_dir_err = |source_err| CopyError::ReadDir {
        path: source.to_path_buf(),
        source: source_err,
    };

    for entry in fs::read_dir(source).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let src_path = entry.path();
        let dst_path = destination.join(entry.file_name());

        // Follows symlinks, so a linked directory is copied as a directory.
        if src_path.is_dir() {
            copy_dir_inner(&src_path, &dst_path, stats)?;
        } else {
            stats.bytes += copy_file(&src_path, &dst_path)?;
            stats.files += 1;
        }
    }

    Ok(())
}

/// Stream a single file, creating or truncating the destination.
///
/// Returns the number of bytes copied. Both handles are closed before
/// returning, on success and on error.
pub fn copy_file(source: &Path, destination: &Path) -> Result<u64> {
    let mut reader = File::open(source).map_err(|e| CopyError::OpenFile {
        path: source.to_path_buf(),
        source: e,
    })?;
    let mut writer = File::create(destination).map_err(|e| CopyError::CreateFile {
        path: destination.to_path_buf(),
        source: e,
    })?;

    let bytes = io::copy(&mut reader, &mut writer).map_err(|e| CopyError::StreamCopy {
        from: source.to_path_buf(),
        to: destination.to_path_buf(),
        source: e,
    })?;

    trace!(
        src = %source.display(),
        dest = %destination.display(),
        bytes,
        "copied file"
    );
    Ok(bytes)
}

/// Create a directory and all missing parents with mode 0755.
pub fn ensure_dir(path: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }

    builder.create(path).map_err(|e| CopyError::CreateDir {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!(dir = %path.display(), "ensured directory");
    Ok(())
}
