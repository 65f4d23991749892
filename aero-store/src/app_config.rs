use aero_catalog::FareTable;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub storage: StorageConfig,
    pub listing: ListingConfig,
    pub search: SearchConfig,
    pub seat_map: SeatMapConfig,
    pub fares: FareTable,
    pub booking: BookingRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ListingConfig {
    pub page_size: usize,
    /// Page numbers shown in the pagination bar
    pub page_links: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    pub debounce_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeatMapConfig {
    pub rows: u32,
    pub cols: u8,
    /// Probability for the seeded demo occupancy. Unset means seats come
    /// from bookings only.
    pub demo_occupancy: Option<f64>,
    #[serde(default)]
    pub demo_seed: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingRules {
    /// Filled into an empty origin when a destination is picked
    pub default_origin: String,
}

impl Config {
    /// Load from `config/` relative to the working directory.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    pub fn load_from(dir: &str) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let defaults = FareTable::default();

        let s = config::Config::builder()
            .set_default("storage.data_dir", ".aero")?
            .set_default("listing.page_size", 6)?
            .set_default("listing.page_links", 5)?
            .set_default("search.debounce_ms", 300)?
            .set_default("seat_map.rows", 8)?
            .set_default("seat_map.cols", 6)?
            .set_default("seat_map.demo_seed", 0)?
            .set_default("fares.base_fare", defaults.base_fare)?
            .set_default("fares.multipliers.economy", defaults.multipliers.economy)?
            .set_default("fares.multipliers.business", defaults.multipliers.business)?
            .set_default("fares.multipliers.first", defaults.multipliers.first)?
            .set_default("fares.seat_prices.economy", defaults.seat_prices.economy as i64)?
            .set_default("fares.seat_prices.business", defaults.seat_prices.business as i64)?
            .set_default("fares.seat_prices.first", defaults.seat_prices.first as i64)?
            .set_default("booking.default_origin", "Enugu")?
            // Checked-in defaults, then the run mode, then an untracked local file
            .add_source(config::File::with_name(&format!("{}/default", dir)).required(false))
            .add_source(config::File::with_name(&format!("{}/{}", dir, run_mode)).required(false))
            .add_source(config::File::with_name(&format!("{}/local", dir)).required(false))
            // Eg.. `AERO_LISTING__PAGE_SIZE=10`
            .add_source(config::Environment::with_prefix("AERO").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
