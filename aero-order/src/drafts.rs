use aero_core::{CoreResult, DraftRepository};
use aero_shared::{BookingForm, Draft, SeatLabel};
use tracing::info;

/// Single-slot store for the unconfirmed form
pub struct DraftStore<R> {
    repo: R,
}

impl<R: DraftRepository> DraftStore<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Replace whatever draft was stored before.
    pub fn save(&self, form: &BookingForm, seats: &[SeatLabel]) -> CoreResult<Draft> {
        let draft = Draft {
            form: form.clone(),
            seats: seats.to_vec(),
        };
        self.repo.save(&draft)?;
        info!(seats = draft.seats.len(), "Draft saved");
        Ok(draft)
    }

    pub fn load(&self) -> Option<Draft> {
        self.repo.load()
    }

    pub fn clear(&self) -> CoreResult<()> {
        self.repo.clear()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aero_core::StorageError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct SlotRepo(Mutex<Option<Draft>>);

    impl DraftRepository for SlotRepo {
        fn load(&self) -> Option<Draft> {
            self.0.lock().unwrap().clone()
        }

        fn save(&self, draft: &Draft) -> Result<(), StorageError> {
            *self.0.lock().unwrap() = Some(draft.clone());
            Ok(())
        }

        fn clear(&self) -> Result<(), StorageError> {
            *self.0.lock().unwrap() = None;
            Ok(())
        }
    }

    #[test]
    fn test_last_write_wins() {
        let store = DraftStore::new(SlotRepo::default());
        let first = BookingForm {
            name: "Ada".to_string(),
            ..Default::default()
        };
        let second = BookingForm {
            destination: "Dubai".to_string(),
            ..Default::default()
        };

        store.save(&first, &["1A".parse().unwrap()]).unwrap();
        store.save(&second, &[]).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.form, second);
        assert!(loaded.seats.is_empty());

        store.clear().unwrap();
        assert_eq!(store.load(), None);
    }
}
