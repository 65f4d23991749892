pub mod drafts;
pub mod export;
pub mod manager;
pub mod session;
pub mod summary;

pub use drafts::DraftStore;
pub use export::{ExportError, EXPORT_FILE_NAME};
pub use manager::BookingManager;
pub use session::{BookingSession, SessionState};
pub use summary::{seat_summary, BookingSummary};
