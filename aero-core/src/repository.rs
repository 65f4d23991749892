use aero_shared::{Booking, Draft};

use crate::StorageError;

/// Storage key holding the booking list
pub const BOOKINGS_KEY: &str = "aeroBookings";

/// Storage key holding the single draft
pub const DRAFT_KEY: &str = "aeroDraft";

/// Whole-value access to the persisted booking list.
///
/// Reads never fail: missing or malformed data comes back as an empty list.
pub trait BookingRepository: Send + Sync {
    fn load(&self) -> Vec<Booking>;

    fn save(&self, bookings: &[Booking]) -> Result<(), StorageError>;
}

/// Single-slot draft storage. Last write wins.
pub trait DraftRepository: Send + Sync {
    fn load(&self) -> Option<Draft>;

    fn save(&self, draft: &Draft) -> Result<(), StorageError>;

    fn clear(&self) -> Result<(), StorageError>;
}

impl<T: BookingRepository + ?Sized> BookingRepository for &T {
    fn load(&self) -> Vec<Booking> {
        (**self).load()
    }

    fn save(&self, bookings: &[Booking]) -> Result<(), StorageError> {
        (**self).save(bookings)
    }
}

impl<T: DraftRepository + ?Sized> DraftRepository for &T {
    fn load(&self) -> Option<Draft> {
        (**self).load()
    }

    fn save(&self, draft: &Draft) -> Result<(), StorageError> {
        (**self).save(draft)
    }

    fn clear(&self) -> Result<(), StorageError> {
        (**self).clear()
    }
}
