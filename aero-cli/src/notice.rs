use aero_shared::{BookingId, SeatLabel};
use std::fmt;
use std::path::PathBuf;

/// Short status messages shown after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    BookingConfirmed(BookingId),
    DraftSaved,
    DraftLoaded,
    DraftCleared,
    NoDraft,
    SeatsSaved(Vec<SeatLabel>),
    SeatUnavailable(SeatLabel),
    BookingUpdated,
    BookingRemoved,
    BookingNotFound,
    AllCleared,
    Exported(PathBuf),
    NothingToExport,
    DestinationSet(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::BookingConfirmed(id) => write!(f, "Booking {} confirmed, saved locally (demo).", id),
            Notice::DraftSaved => write!(f, "Draft saved locally."),
            Notice::DraftLoaded => write!(f, "Loaded saved draft."),
            Notice::DraftCleared => write!(f, "Draft discarded."),
            Notice::NoDraft => write!(f, "No saved draft."),
            Notice::SeatsSaved(seats) if seats.is_empty() => write!(f, "Seats saved: none"),
            Notice::SeatsSaved(seats) => {
                let labels: Vec<&str> = seats.iter().map(|s| s.as_str()).collect();
                write!(f, "Seats saved: {}", labels.join(", "))
            }
            Notice::SeatUnavailable(seat) => write!(f, "Seat {} is not available", seat),
            Notice::BookingUpdated => write!(f, "Booking updated"),
            Notice::BookingRemoved => write!(f, "Booking removed"),
            Notice::BookingNotFound => write!(f, "Booking not found"),
            Notice::AllCleared => write!(f, "All bookings cleared"),
            Notice::Exported(path) => write!(f, "Bookings exported to {}", path.display()),
            Notice::NothingToExport => write!(f, "No bookings to export"),
            Notice::DestinationSet(city) => write!(f, "Destination set to {}", city),
        }
    }
}
