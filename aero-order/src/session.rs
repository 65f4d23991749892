use aero_catalog::{FareEstimator, SeatMap, SeatSelection, Toggle};
use aero_core::{validate, BookingRepository, CoreError, CoreResult, DraftRepository, ValidationErrors};
use aero_shared::{Booking, BookingForm, BookingId, Draft, SeatLabel};
use tracing::{info, warn};

use crate::drafts::DraftStore;
use crate::manager::BookingManager;
use crate::summary::BookingSummary;

/// Where the booking session stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Editing,
    Previewing,
    /// Last confirmed booking; the form has been reset for the next one.
    Confirmed(BookingId),
}

impl SessionState {
    fn name(&self) -> &'static str {
        match self {
            SessionState::Editing => "EDITING",
            SessionState::Previewing => "PREVIEWING",
            SessionState::Confirmed(_) => "CONFIRMED",
        }
    }
}

/// One user's in-progress booking: the form, the seat selection and the
/// preview/confirm state machine.
///
/// `Editing -> Previewing -> Confirmed`, with `Previewing -> Editing` allowed
/// any number of times. The selection belongs to the session and is copied
/// into the booking or draft when either is saved.
#[derive(Debug, Clone)]
pub struct BookingSession {
    form: BookingForm,
    selection: SeatSelection,
    state: SessionState,
}

impl Default for BookingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingSession {
    pub fn new() -> Self {
        Self {
            form: BookingForm::default(),
            selection: SeatSelection::new(),
            state: SessionState::Editing,
        }
    }

    /// Start from a saved draft, or a blank form when there is none.
    pub fn resume(draft: Option<Draft>) -> Self {
        match draft {
            Some(draft) => Self {
                form: draft.form,
                selection: SeatSelection::from_labels(draft.seats),
                state: SessionState::Editing,
            },
            None => Self::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn form(&self) -> &BookingForm {
        &self.form
    }

    /// Editing any field drops back to `Editing`.
    pub fn form_mut(&mut self) -> &mut BookingForm {
        self.state = SessionState::Editing;
        &mut self.form
    }

    pub fn selection(&self) -> &SeatSelection {
        &self.selection
    }

    /// Toggle a seat on `map`. Seat changes do not leave the preview; the next
    /// summary picks them up.
    pub fn toggle_seat(&mut self, map: &SeatMap, label: &SeatLabel) -> Toggle {
        if let SessionState::Confirmed(_) = self.state {
            self.state = SessionState::Editing;
        }
        map.toggle(&mut self.selection, label)
    }

    pub fn remove_seat(&mut self, label: &SeatLabel) -> bool {
        self.selection.remove(label)
    }

    /// Destination shortcut: sets `to`, and `from` when it is still empty.
    pub fn pick_destination(&mut self, city: &str, default_origin: &str) {
        let form = self.form_mut();
        form.destination = city.to_string();
        if form.origin.trim().is_empty() {
            form.origin = default_origin.to_string();
        }
    }

    /// Validate the form and move to `Previewing`. Nothing is stored.
    pub fn preview(&mut self, fares: &FareEstimator) -> CoreResult<BookingSummary> {
        let details = validate(&self.form)?;
        self.state = SessionState::Previewing;
        Ok(BookingSummary::from_details(&details, self.selection.labels(), fares))
    }

    pub fn back_to_editing(&mut self) {
        self.state = SessionState::Editing;
    }

    pub fn save_draft<D: DraftRepository>(&self, drafts: &DraftStore<D>) -> CoreResult<Draft> {
        drafts.save(&self.form, self.selection.labels())
    }

    /// Store the previewed booking, clear the draft and reset the form.
    pub fn confirm<R, D>(&mut self, bookings: &BookingManager<R>, drafts: &DraftStore<D>) -> CoreResult<Booking>
    where
        R: BookingRepository,
        D: DraftRepository,
    {
        if self.state != SessionState::Previewing {
            return Err(CoreError::InvalidTransition {
                from: self.state.name().to_string(),
                to: "CONFIRMED".to_string(),
            });
        }

        let details = validate(&self.form)?;

        let occupied = bookings.occupied_seats();
        let taken: Vec<&str> = self
            .selection
            .labels()
            .iter()
            .filter(|s| occupied.contains(*s))
            .map(|s| s.as_str())
            .collect();
        if !taken.is_empty() {
            let mut errors = ValidationErrors::new();
            errors.push("seats", format!("already booked: {}", taken.join(", ")));
            return Err(errors.into());
        }

        let booking = bookings.create(details, self.selection.labels())?;

        if let Err(e) = drafts.clear() {
            warn!("Booking {} stored but the draft could not be cleared: {}", booking.id, e);
        }

        self.form = BookingForm::default();
        self.selection.clear();
        self.state = SessionState::Confirmed(booking.id);

        info!(booking_id = %booking.id, "Booking confirmed");
        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aero_core::StorageError;
    use std::collections::HashSet;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Mem {
        bookings: Mutex<Vec<Booking>>,
        draft: Mutex<Option<Draft>>,
    }

    impl BookingRepository for Mem {
        fn load(&self) -> Vec<Booking> {
            self.bookings.lock().unwrap().clone()
        }

        fn save(&self, bookings: &[Booking]) -> Result<(), StorageError> {
            *self.bookings.lock().unwrap() = bookings.to_vec();
            Ok(())
        }
    }

    impl DraftRepository for Mem {
        fn load(&self) -> Option<Draft> {
            self.draft.lock().unwrap().clone()
        }

        fn save(&self, draft: &Draft) -> Result<(), StorageError> {
            *self.draft.lock().unwrap() = Some(draft.clone());
            Ok(())
        }

        fn clear(&self) -> Result<(), StorageError> {
            *self.draft.lock().unwrap() = None;
            Ok(())
        }
    }

    fn label(s: &str) -> SeatLabel {
        s.parse().unwrap()
    }

    fn fill(session: &mut BookingSession) {
        let form = session.form_mut();
        form.name = "Ada Obi".to_string();
        form.email = "ada@example.com".to_string();
        form.origin = "Lagos".to_string();
        form.destination = "London".to_string();
        form.depart = "2025-12-28".to_string();
        form.travel_class = "economy".to_string();
    }

    #[test]
    fn test_preview_then_confirm() {
        let mem = Mem::default();
        let bookings = BookingManager::new(&mem, FareEstimator::default());
        let drafts = DraftStore::new(&mem);
        let map = SeatMap::generate(8, 6, &bookings.occupied_seats()).unwrap();

        let mut session = BookingSession::new();
        fill(&mut session);
        session.toggle_seat(&map, &label("2C"));
        session.toggle_seat(&map, &label("2D"));
        session.save_draft(&drafts).unwrap();

        let summary = session.preview(bookings.fares()).unwrap();
        assert_eq!(summary.fare, 300);
        assert_eq!(session.state(), SessionState::Previewing);

        let booking = session.confirm(&bookings, &drafts).unwrap();
        assert_eq!(booking.seats, vec![label("2C"), label("2D")]);
        assert_eq!(session.state(), SessionState::Confirmed(booking.id));
        assert!(session.selection().is_empty());
        assert_eq!(session.form(), &BookingForm::default());
        assert_eq!(drafts.load(), None);
        assert_eq!(bookings.list().len(), 1);
    }

    #[test]
    fn test_confirm_requires_preview() {
        let mem = Mem::default();
        let bookings = BookingManager::new(&mem, FareEstimator::default());
        let drafts = DraftStore::new(&mem);

        let mut session = BookingSession::new();
        fill(&mut session);
        let err = session.confirm(&bookings, &drafts).unwrap_err();
        assert!(matches!(err, CoreError::InvalidTransition { .. }));

        session.preview(bookings.fares()).unwrap();
        session.form_mut().name = "Ada O.".to_string();
        assert_eq!(session.state(), SessionState::Editing);
        assert!(session.confirm(&bookings, &drafts).is_err());
        assert!(bookings.list().is_empty());
    }

    #[test]
    fn test_invalid_form_blocks_preview() {
        let mut session = BookingSession::new();
        session.form_mut().name = "Ada".to_string();
        let err = session.preview(&FareEstimator::default()).unwrap_err();
        match err {
            CoreError::ValidationFailed(errors) => assert!(errors.has_field("email")),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(session.state(), SessionState::Editing);
    }

    #[test]
    fn test_seat_taken_since_selection() {
        let mem = Mem::default();
        let bookings = BookingManager::new(&mem, FareEstimator::default());
        let drafts = DraftStore::new(&mem);
        let map = SeatMap::generate(8, 6, &HashSet::new()).unwrap();

        let mut session = BookingSession::new();
        fill(&mut session);
        session.toggle_seat(&map, &label("1A"));
        session.preview(bookings.fares()).unwrap();

        // someone else books 1A before we confirm
        let mut other = BookingSession::new();
        fill(&mut other);
        other.toggle_seat(&map, &label("1A"));
        other.preview(bookings.fares()).unwrap();
        other.confirm(&bookings, &drafts).unwrap();

        let err = session.confirm(&bookings, &drafts).unwrap_err();
        match err {
            CoreError::ValidationFailed(errors) => assert!(errors.has_field("seats")),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(bookings.list().len(), 1);
    }

    #[test]
    fn test_resume_from_draft() {
        let mem = Mem::default();
        let drafts = DraftStore::new(&mem);

        let mut session = BookingSession::new();
        fill(&mut session);
        let map = SeatMap::generate(2, 2, &HashSet::new()).unwrap();
        session.toggle_seat(&map, &label("2B"));
        session.save_draft(&drafts).unwrap();

        let resumed = BookingSession::resume(drafts.load());
        assert_eq!(resumed.form(), session.form());
        assert_eq!(resumed.selection().labels(), &[label("2B")]);
        assert_eq!(resumed.state(), SessionState::Editing);
    }

    #[test]
    fn test_pick_destination_fills_empty_origin() {
        let mut session = BookingSession::new();
        session.pick_destination("Dubai", "Enugu");
        assert_eq!(session.form().destination, "Dubai");
        assert_eq!(session.form().origin, "Enugu");

        session.form_mut().origin = "Abuja".to_string();
        session.pick_destination("London", "Enugu");
        assert_eq!(session.form().origin, "Abuja");
    }
}
