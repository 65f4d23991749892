use aero_catalog::FareEstimator;
use aero_core::search::{self, total_pages};
use aero_core::{BookingRepository, CoreError, CoreResult, Page};
use aero_shared::{Booking, BookingDetails, BookingId, BookingPatch, Masked, SeatLabel};
use chrono::Utc;
use std::collections::HashSet;
use tracing::{debug, info};

use crate::export::{self, ExportError};

/// Booking list operations over a repository.
///
/// Every call reloads from storage; nothing is cached between calls, so edits
/// made by another process show up on the next read.
pub struct BookingManager<R> {
    repo: R,
    fares: FareEstimator,
}

impl<R: BookingRepository> BookingManager<R> {
    pub fn new(repo: R, fares: FareEstimator) -> Self {
        Self { repo, fares }
    }

    pub fn fares(&self) -> &FareEstimator {
        &self.fares
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// All bookings in creation order
    pub fn list(&self) -> Vec<Booking> {
        self.repo.load()
    }

    pub fn get(&self, id: BookingId) -> CoreResult<Booking> {
        self.repo
            .load()
            .into_iter()
            .find(|b| b.id == id)
            .ok_or(CoreError::NotFound(id))
    }

    /// Append a new booking with a fresh id and a computed price.
    pub fn create(&self, details: BookingDetails, seats: &[SeatLabel]) -> CoreResult<Booking> {
        let mut bookings = self.repo.load();

        let id = next_id(&bookings, Utc::now().timestamp_millis());
        let price = self.fares.estimate(details.travel_class, details.passengers, seats);
        let booking = Booking::new(id, details, seats.to_vec(), price);

        bookings.push(booking.clone());
        self.repo.save(&bookings)?;

        info!(
            booking_id = %booking.id,
            email = %Masked(&booking.email),
            price = booking.price,
            "Booking created"
        );
        Ok(booking)
    }

    /// Overwrite the named fields of an existing booking and reprice it.
    /// Nothing is written when `id` is unknown.
    pub fn update(&self, id: BookingId, patch: BookingPatch) -> CoreResult<Booking> {
        let mut bookings = self.repo.load();
        let booking = bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(CoreError::NotFound(id))?;

        patch.apply_to(booking);
        booking.price = self.fares.estimate(booking.travel_class, booking.passengers, &booking.seats);
        let updated = booking.clone();

        self.repo.save(&bookings)?;

        info!(booking_id = %id, price = updated.price, "Booking updated");
        Ok(updated)
    }

    /// Remove one booking. Returns `false` when there was nothing to remove.
    pub fn delete(&self, id: BookingId) -> CoreResult<bool> {
        let mut bookings = self.repo.load();
        let before = bookings.len();
        bookings.retain(|b| b.id != id);

        if bookings.len() == before {
            debug!(booking_id = %id, "Delete skipped, no such booking");
            return Ok(false);
        }

        self.repo.save(&bookings)?;
        info!(booking_id = %id, "Booking removed");
        Ok(true)
    }

    pub fn clear_all(&self) -> CoreResult<()> {
        self.repo.save(&[])?;
        info!("All bookings cleared");
        Ok(())
    }

    pub fn search(&self, query: &str) -> Vec<Booking> {
        search::search(self.repo.load(), query)
    }

    /// Filter by `query`, then serve page `page` of `page_size`.
    pub fn page(&self, query: &str, page_size: usize, page: usize) -> Page<Booking> {
        search::paginate(&self.search(query), page_size, page)
    }

    /// Page holding the most recent booking of the unfiltered list.
    pub fn last_page(&self, page_size: usize) -> usize {
        total_pages(self.repo.load().len(), page_size)
    }

    /// Every seat taken by a persisted booking
    pub fn occupied_seats(&self) -> HashSet<SeatLabel> {
        self.repo
            .load()
            .into_iter()
            .flat_map(|b| b.seats)
            .collect()
    }

    /// CSV of the whole list, or `None` when there is nothing to export.
    pub fn export_csv(&self) -> Result<Option<String>, ExportError> {
        let bookings = self.repo.load();
        if bookings.is_empty() {
            return Ok(None);
        }
        export::to_csv_string(&bookings, &self.fares).map(Some)
    }
}

/// Clock-based id, bumped past the largest stored id so ids stay strictly
/// increasing even when the clock stalls or goes backwards.
fn next_id(existing: &[Booking], now_millis: i64) -> BookingId {
    let floor = existing.iter().map(|b| b.id.0).max().map_or(i64::MIN, |max| max.saturating_add(1));
    BookingId(now_millis.max(floor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aero_core::StorageError;
    use aero_shared::TravelClass;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    #[derive(Default)]
    struct VecRepo {
        bookings: Mutex<Vec<Booking>>,
        writes: Mutex<usize>,
    }

    impl BookingRepository for VecRepo {
        fn load(&self) -> Vec<Booking> {
            self.bookings.lock().unwrap().clone()
        }

        fn save(&self, bookings: &[Booking]) -> Result<(), StorageError> {
            *self.bookings.lock().unwrap() = bookings.to_vec();
            *self.writes.lock().unwrap() += 1;
            Ok(())
        }
    }

    fn details(name: &str, class: TravelClass, passengers: u32) -> BookingDetails {
        BookingDetails {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            origin: "Lagos".to_string(),
            destination: "London".to_string(),
            depart: NaiveDate::from_ymd_opt(2025, 12, 28).unwrap(),
            return_date: None,
            travel_class: class,
            passengers,
        }
    }

    fn seats(labels: &[&str]) -> Vec<SeatLabel> {
        labels.iter().map(|l| l.parse().unwrap()).collect()
    }

    fn manager() -> BookingManager<VecRepo> {
        BookingManager::new(VecRepo::default(), FareEstimator::default())
    }

    #[test]
    fn test_create_prices_and_appends() {
        let manager = manager();
        let first = manager.create(details("Ada", TravelClass::Business, 2), &seats(&["1A", "1B"])).unwrap();
        let second = manager.create(details("Musa", TravelClass::Economy, 1), &[]).unwrap();

        assert_eq!(first.price, 1000);
        assert_eq!(second.price, 200);
        assert!(second.id > first.id);

        let ids: Vec<_> = manager.list().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[test]
    fn test_ids_strictly_increase_within_same_millisecond() {
        let existing = vec![Booking::new(BookingId(5_000), details("Ada", TravelClass::Economy, 1), vec![], 200)];
        assert_eq!(next_id(&existing, 4_000), BookingId(5_001));
        assert_eq!(next_id(&existing, 9_000), BookingId(9_000));
        assert_eq!(next_id(&[], 1_234), BookingId(1_234));
    }

    #[test]
    fn test_update_reprices_in_place() {
        let manager = manager();
        let a = manager.create(details("Ada", TravelClass::Economy, 1), &seats(&["3C"])).unwrap();
        let b = manager.create(details("Musa", TravelClass::Economy, 1), &[]).unwrap();

        let updated = manager
            .update(
                a.id,
                BookingPatch {
                    travel_class: Some(TravelClass::First),
                    passengers: Some(2),
                    ..Default::default()
                },
            )
            .unwrap();

        // 200 * 3.5 * 2 + 200 * 1
        assert_eq!(updated.price, 1600);
        assert_eq!(updated.id, a.id);
        assert_eq!(updated.seats, seats(&["3C"]));

        let list = manager.list();
        assert_eq!(list[0], updated);
        assert_eq!(list[1].id, b.id);
    }

    #[test]
    fn test_update_missing_id_writes_nothing() {
        let manager = manager();
        manager.create(details("Ada", TravelClass::Economy, 1), &[]).unwrap();
        let writes = *manager.repository().writes.lock().unwrap();

        let err = manager.update(BookingId(42), BookingPatch::default()).unwrap_err();
        assert!(matches!(err, CoreError::NotFound(BookingId(42))));
        assert_eq!(*manager.repository().writes.lock().unwrap(), writes);
    }

    #[test]
    fn test_delete_and_clear() {
        let manager = manager();
        let a = manager.create(details("Ada", TravelClass::Economy, 1), &[]).unwrap();
        manager.create(details("Musa", TravelClass::Economy, 1), &[]).unwrap();

        assert!(manager.delete(a.id).unwrap());
        assert!(!manager.delete(a.id).unwrap());
        assert_eq!(manager.list().len(), 1);
        assert!(matches!(manager.get(a.id), Err(CoreError::NotFound(_))));

        manager.clear_all().unwrap();
        assert!(manager.list().is_empty());
    }

    #[test]
    fn test_search_finds_created_record() {
        let manager = manager();
        manager.create(details("Ada", TravelClass::Economy, 1), &[]).unwrap();
        let musa = manager.create(details("Musa", TravelClass::Economy, 1), &[]).unwrap();

        let found = manager.search("mus");
        assert_eq!(found, vec![musa]);
    }

    #[test]
    fn test_occupied_seats_union() {
        let manager = manager();
        manager.create(details("Ada", TravelClass::Economy, 1), &seats(&["1A", "1B"])).unwrap();
        manager.create(details("Musa", TravelClass::Economy, 1), &seats(&["1B", "4F"])).unwrap();

        let occupied = manager.occupied_seats();
        assert_eq!(occupied.len(), 3);
        assert!(occupied.contains(&"4F".parse().unwrap()));
    }

    #[test]
    fn test_paging_and_last_page() {
        let manager = manager();
        for i in 0..13 {
            manager.create(details(&format!("P{i}"), TravelClass::Economy, 1), &[]).unwrap();
        }

        assert_eq!(manager.page("", 6, 1).items.len(), 6);
        assert_eq!(manager.page("", 6, 3).items.len(), 1);
        assert_eq!(manager.page("", 6, 4).page, 3);
        assert_eq!(manager.last_page(6), 3);
        assert_eq!(manager.page("p1", 6, 1).total_items, 4);
    }

    #[test]
    fn test_export_empty_is_none() {
        assert_eq!(manager().export_csv().unwrap(), None);
    }
}
