pub mod repository;
pub mod search;
pub mod validation;

use aero_shared::BookingId;

pub use repository::{BookingRepository, DraftRepository, BOOKINGS_KEY, DRAFT_KEY};
pub use search::{page_window, paginate, search, Page};
pub use validation::{validate, FieldError, ValidationErrors};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Booking not found: {0}")]
    NotFound(BookingId),
    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationErrors),
    #[error("Invalid session transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Failure to write (or, for adapters that care, read) the persisted blobs.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O failure on `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not encode `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type CoreResult<T> = Result<T, CoreError>;
