use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use crate::errors::BackendError;
use crate::store::Blob;

/// An in-memory blob for tests. Writes can be made to fail on demand.
#[derive(Default)]
pub struct MockBlob {
    contents: RwLock<Option<Vec<u8>>>,
    fail_writes: AtomicBool,
}

impl MockBlob {
    pub fn new() -> Self {
        Default::default()
    }

    /// Makes every subsequent `save` fail until called again with
    /// `false`.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn contents(&self) -> Option<Vec<u8>> {
        self.contents.read().unwrap().clone()
    }
}

impl Blob for MockBlob {
    fn load(&self) -> Result<Option<Vec<u8>>, BackendError> {
        Ok(self.contents.read().unwrap().clone())
    }

    fn save(&self, raw: &[u8]) -> Result<(), BackendError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BackendError::BlobWrite {
                source: std::io::Error::new(std::io::ErrorKind::Other, "mock write failure"),
            });
        }

        *self.contents.write().unwrap() = Some(raw.to_vec());

        Ok(())
    }
}
