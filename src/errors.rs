use std::io;

use thiserror::Error;
use warp::reject;

/// Enumerates high-level errors returned by this library.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Represents a reference to a home that does not exist (or no
    /// longer exists) in the collection.
    #[error("No home with ID {id}")]
    HomeNotFound { id: String },

    /// Represents a donation with a non-positive amount.
    #[error("Donation amount must be positive, got {amount}")]
    InvalidDonationAmount { amount: f64 },

    /// Represents a review rating outside the accepted scale.
    #[error("Rating must be between 1 and 5, got {rating}")]
    InvalidRating { rating: u8 },

    /// Represents a failure to read the persisted collection.
    #[error("Failed to read persisted collection")]
    BlobRead { source: io::Error },

    /// Represents a failure to overwrite the persisted collection. The
    /// in-memory mutation that triggered the write is rolled back.
    #[error("Failed to persist collection")]
    BlobWrite { source: io::Error },

    /// Represents a persisted collection that could not be deserialized.
    #[error("Malformed persisted collection")]
    MalformedCollection { source: serde_json::Error },

    /// Represents a collection that could not be serialized.
    #[error("Failed to serialize collection")]
    SerializeCollection { source: serde_json::Error },
}

// `warp::Rejection` conversion comes from warp's blanket
// `impl<T: Reject> From<T> for Rejection`.
impl reject::Reject for BackendError {}
