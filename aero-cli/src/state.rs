use aero_catalog::seatmap::DEFAULT_DEMO_OCCUPANCY;
use aero_catalog::{FareEstimator, SeatMap, SeatMapError};
use aero_core::StorageError;
use aero_order::{BookingManager, DraftStore};
use aero_store::{Config, FileStore, JsonRepository, KeyValueStore};

/// Everything a command needs: the booking list, the draft slot and config.
pub struct AppState<S> {
    pub bookings: BookingManager<JsonRepository<S>>,
    pub drafts: DraftStore<JsonRepository<S>>,
    pub config: Config,
}

impl<S: KeyValueStore + Clone> AppState<S> {
    pub fn new(store: S, config: Config) -> Self {
        let fares = FareEstimator::new(config.fares.clone());
        Self {
            bookings: BookingManager::new(JsonRepository::new(store.clone()), fares),
            drafts: DraftStore::new(JsonRepository::new(store)),
            config,
        }
    }

    /// Seat map with occupancy from the stored bookings
    pub fn seat_map(&self) -> Result<SeatMap, SeatMapError> {
        let seats = &self.config.seat_map;
        SeatMap::generate(seats.rows, seats.cols, &self.bookings.occupied_seats())
    }

    /// Seeded sample occupancy that ignores bookings
    pub fn demo_seat_map(&self, seed: Option<u64>) -> Result<SeatMap, SeatMapError> {
        let seats = &self.config.seat_map;
        SeatMap::demo(
            seats.rows,
            seats.cols,
            seats.demo_occupancy.unwrap_or(DEFAULT_DEMO_OCCUPANCY),
            seed.unwrap_or(seats.demo_seed),
        )
    }
}

impl AppState<FileStore> {
    pub fn open(config: Config) -> Result<Self, StorageError> {
        let store = FileStore::open(&config.storage.data_dir)?;
        Ok(Self::new(store, config))
    }
}
