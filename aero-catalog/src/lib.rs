pub mod pricing;
pub mod seatmap;

pub use pricing::{estimate, ClassRates, FareEstimator, FareTable};
pub use seatmap::{ReadOnlySeatMap, Seat, SeatMap, SeatMapError, SeatSelection, SeatStatus, Toggle};
