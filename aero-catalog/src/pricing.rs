use aero_shared::{SeatLabel, TravelClass};
use serde::{Deserialize, Serialize};

/// A value per travel class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassRates<T> {
    pub economy: T,
    pub business: T,
    pub first: T,
}

impl<T: Copy> ClassRates<T> {
    pub fn get(&self, class: TravelClass) -> T {
        match class {
            TravelClass::Economy => self.economy,
            TravelClass::Business => self.business,
            TravelClass::First => self.first,
        }
    }
}

/// Fare configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareTable {
    /// Base fare per passenger before the class multiplier
    pub base_fare: f64,

    /// Cabin multipliers applied to the base fare
    pub multipliers: ClassRates<f64>,

    /// Flat price of each selected seat
    pub seat_prices: ClassRates<u64>,
}

impl Default for FareTable {
    fn default() -> Self {
        Self {
            base_fare: 200.0,
            multipliers: ClassRates {
                economy: 1.0,
                business: 2.0,
                first: 3.5,
            },
            seat_prices: ClassRates {
                economy: 50,
                business: 100,
                first: 200,
            },
        }
    }
}

/// Fare estimation engine
#[derive(Debug, Clone, Default)]
pub struct FareEstimator {
    table: FareTable,
}

impl FareEstimator {
    pub fn new(table: FareTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &FareTable {
        &self.table
    }

    /// Price of a single seat in `class`
    pub fn seat_fee(&self, class: TravelClass) -> u64 {
        self.table.seat_prices.get(class)
    }

    /// Price of `count` seats in `class`
    pub fn seat_total(&self, class: TravelClass, count: usize) -> u64 {
        self.seat_fee(class).saturating_mul(count as u64)
    }

    /// Estimated fare: class-scaled base fare per passenger plus the seat total.
    ///
    /// A passenger count of zero is treated as one.
    pub fn estimate(&self, class: TravelClass, passengers: u32, seats: &[SeatLabel]) -> u64 {
        let passengers = passengers.max(1) as f64;
        let fare = self.table.base_fare * self.table.multipliers.get(class) * passengers;
        let total = fare + self.seat_total(class, seats.len()) as f64;

        total.round().max(0.0) as u64
    }
}

/// Estimate with the default fare table.
pub fn estimate(class: TravelClass, passengers: u32, seats: &[SeatLabel]) -> u64 {
    FareEstimator::default().estimate(class, passengers, seats)
}
