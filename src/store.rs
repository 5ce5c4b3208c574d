use std::fs;
use std::io;
use std::path::PathBuf;

use crate::errors::BackendError;

pub mod mock;

/// The durable slot holding the serialized collection. Reads and
/// overwrites a single named value; there is no per-record granularity.
pub trait Blob: Send + Sync {
    /// Reads the persisted collection, or `None` if nothing has been
    /// persisted yet.
    fn load(&self) -> Result<Option<Vec<u8>>, BackendError>;

    /// Overwrites the persisted collection.
    fn save(&self, raw: &[u8]) -> Result<(), BackendError>;
}

impl<B: Blob + ?Sized> Blob for std::sync::Arc<B> {
    fn load(&self) -> Result<Option<Vec<u8>>, BackendError> {
        (**self).load()
    }

    fn save(&self, raw: &[u8]) -> Result<(), BackendError> {
        (**self).save(raw)
    }
}

/// A blob kept in a single JSON file on disk.
pub struct FileBlob {
    path: PathBuf,
}

impl FileBlob {
    /// Creates a new instance backed by the given file. The file need
    /// not exist yet; its parent directory must.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_env() -> Self {
        use crate::config::get_variable;

        Self::new(get_variable("BACKEND_DATA_PATH"))
    }
}

impl Blob for FileBlob {
    fn load(&self) -> Result<Option<Vec<u8>>, BackendError> {
        match fs::read(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BackendError::BlobRead { source: e }),
        }
    }

    fn save(&self, raw: &[u8]) -> Result<(), BackendError> {
        fs::write(&self.path, raw).map_err(|source| BackendError::BlobWrite { source })
    }
}
