//! Storage for uploaded photos.
//!
//! Photos are written to a directory on disk and referenced from the
//! database by a relative path such as `uploads/1718000000000000000-3.jpg`,
//! which is also the URL path they are served from.

use std::{
    fmt::Debug,
    fs,
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
};

use time::OffsetDateTime;

use crate::Error;

/// The prefix of every relative path returned by a [BlobStore].
pub const UPLOAD_PREFIX: &str = "uploads";

/// Keeps uploaded files and hands out paths to retrieve them by.
pub trait BlobStore: Debug + Send + Sync {
    /// Save `bytes` under a new, unique name and return its relative path.
    ///
    /// The extension of `original_file_name` is kept so the file is served
    /// with a sensible content type.
    fn store(&self, bytes: &[u8], original_file_name: &str) -> Result<String, Error>;

    /// Delete the file at `relative_path`, as returned by [BlobStore::store].
    fn remove(&self, relative_path: &str) -> Result<(), Error>;

    /// Delete the file at `relative_path`, logging instead of failing.
    ///
    /// Used for cleanup after the record referencing the file is gone or was
    /// never written.
    fn discard(&self, relative_path: &str) {
        if let Err(error) = self.remove(relative_path) {
            tracing::warn!("Could not remove uploaded file {relative_path}: {error}");
        }
    }
}

/// Stores uploaded files in a directory on the local disk.
#[derive(Debug, Clone)]
pub struct DiskBlobStore {
    directory: PathBuf,
}

impl DiskBlobStore {
    /// Create a store that writes to `directory`, creating it if needed.
    ///
    /// # Errors
    /// Returns an [Error::BlobStore] if the directory cannot be created.
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self, Error> {
        let directory = directory.into();

        fs::create_dir_all(&directory).map_err(|error| {
            Error::BlobStore(format!(
                "could not create upload directory {}: {error}",
                directory.display()
            ))
        })?;

        Ok(Self { directory })
    }

    /// The directory files are written to.
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl BlobStore for DiskBlobStore {
    fn store(&self, bytes: &[u8], original_file_name: &str) -> Result<String, Error> {
        let file_name = unique_file_name(original_file_name);
        let path = self.directory.join(&file_name);

        fs::write(&path, bytes).map_err(|error| {
            Error::BlobStore(format!("could not write {}: {error}", path.display()))
        })?;
        tracing::debug!("Stored {} bytes at {}", bytes.len(), path.display());

        Ok(format!("{UPLOAD_PREFIX}/{file_name}"))
    }

    fn remove(&self, relative_path: &str) -> Result<(), Error> {
        // Only the last component is used so that a stored path can never
        // point outside the upload directory.
        let file_name = relative_path
            .strip_prefix(UPLOAD_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
            .and_then(|rest| Path::new(rest).file_name())
            .ok_or_else(|| Error::BlobStore(format!("{relative_path} is not an upload path")))?;
        let path = self.directory.join(file_name);

        fs::remove_file(&path)
            .map_err(|error| Error::BlobStore(format!("could not remove {}: {error}", path.display())))
    }
}

static UPLOAD_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Build a file name that no other upload from this process can share.
///
/// The timestamp separates uploads across restarts and the counter separates
/// uploads within the same clock tick.
fn unique_file_name(original_file_name: &str) -> String {
    let timestamp = OffsetDateTime::now_utc().unix_timestamp_nanos();
    let sequence = UPLOAD_COUNTER.fetch_add(1, Ordering::Relaxed);

    let extension = Path::new(original_file_name)
        .extension()
        .and_then(|extension| extension.to_str())
        .filter(|extension| {
            !extension.is_empty() && extension.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map(|extension| format!(".{}", extension.to_ascii_lowercase()))
        .unwrap_or_default();

    format!("{timestamp}-{sequence}{extension}")
}
