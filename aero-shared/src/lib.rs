pub mod models;
pub mod money;
pub mod pii;

pub use models::booking::{Booking, BookingDetails, BookingId, BookingPatch, TravelClass, UnknownTravelClass};
pub use models::draft::{BookingForm, Draft};
pub use models::seat::{SeatLabel, SeatLabelError, MAX_COLUMNS};
pub use money::format_naira;
pub use pii::Masked;
