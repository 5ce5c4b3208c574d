use std::sync::Arc;

use slog::Logger;
use tokio::sync::Mutex;

use crate::homes::HomesStore;
use crate::urls::Urls;

/// Everything a request handler needs: the logger, the shared homes
/// collection, and the URL scheme. Handlers take the store lock for
/// the duration of one operation; each operation runs to completion,
/// including its durable write, before the lock is released.
#[derive(Clone)]
pub struct Environment {
    pub logger: Arc<Logger>,
    pub homes: Arc<Mutex<HomesStore>>,
    pub urls: Arc<Urls>,
}

impl Environment {
    pub fn new(logger: Arc<Logger>, homes: Arc<Mutex<HomesStore>>, urls: Arc<Urls>) -> Self {
        Self {
            logger,
            homes,
            urls,
        }
    }
}
