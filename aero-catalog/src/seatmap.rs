use aero_shared::{SeatLabel, MAX_COLUMNS};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::HashSet;

/// Probability used by the demo occupancy when none is configured.
pub const DEFAULT_DEMO_OCCUPANCY: f64 = 0.03;

/// A seat on the generated map
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Seat {
    pub label: SeatLabel,
    pub occupied: bool,
}

/// How a seat renders for the current selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Occupied,
    Selected,
}

/// Outcome of a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Selected,
    Deselected,
    /// Seat is occupied or not on this map
    Ignored,
}

/// Seats picked in the current booking session, in the order they were picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeatSelection {
    seats: Vec<SeatLabel>,
}

impl SeatSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a selection from a saved list, dropping duplicates.
    pub fn from_labels<I: IntoIterator<Item = SeatLabel>>(labels: I) -> Self {
        let mut selection = Self::new();
        for label in labels {
            if !selection.contains(&label) {
                selection.seats.push(label);
            }
        }
        selection
    }

    pub fn contains(&self, label: &SeatLabel) -> bool {
        self.seats.contains(label)
    }

    pub fn labels(&self) -> &[SeatLabel] {
        &self.seats
    }

    pub fn to_vec(&self) -> Vec<SeatLabel> {
        self.seats.clone()
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Drop a seat regardless of the map. Returns whether it was selected.
    pub fn remove(&mut self, label: &SeatLabel) -> bool {
        let before = self.seats.len();
        self.seats.retain(|s| s != label);
        before != self.seats.len()
    }

    pub fn clear(&mut self) {
        self.seats.clear();
    }
}

/// Generated seat map for one cabin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatMap {
    rows: u32,
    cols: u8,
    seats: Vec<Seat>,
}

impl SeatMap {
    /// Row-major map with occupancy taken from `occupied`, usually the union of
    /// seats across all persisted bookings.
    pub fn generate(rows: u32, cols: u8, occupied: &HashSet<SeatLabel>) -> Result<Self, SeatMapError> {
        Self::build(rows, cols, |label| occupied.contains(label))
    }

    /// Map that ignores bookings and marks each seat occupied with
    /// `probability`. Seeded, so the same seed always yields the same map.
    pub fn demo(rows: u32, cols: u8, probability: f64, seed: u64) -> Result<Self, SeatMapError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let probability = if probability.is_finite() { probability.clamp(0.0, 1.0) } else { 0.0 };
        Self::build(rows, cols, |_| rng.gen_bool(probability))
    }

    fn build<F>(rows: u32, cols: u8, mut is_occupied: F) -> Result<Self, SeatMapError>
    where
        F: FnMut(&SeatLabel) -> bool,
    {
        if cols > MAX_COLUMNS {
            return Err(SeatMapError::TooManyColumns(cols));
        }

        let mut seats = Vec::with_capacity(rows as usize * cols as usize);
        for row in 1..=rows {
            for col in 0..cols {
                let label = SeatLabel::new(row, col).map_err(|_| SeatMapError::TooManyColumns(cols))?;
                let occupied = is_occupied(&label);
                seats.push(Seat { label, occupied });
            }
        }

        Ok(Self { rows, cols, seats })
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn seat(&self, label: &SeatLabel) -> Option<&Seat> {
        let (row, col) = label.position()?;
        if row > self.rows || col >= self.cols {
            return None;
        }
        self.seats.get((row as usize - 1) * self.cols as usize + col as usize)
    }

    pub fn is_occupied(&self, label: &SeatLabel) -> bool {
        self.seat(label).is_some_and(|s| s.occupied)
    }

    /// Status of one seat; occupied wins over selected.
    pub fn status(&self, label: &SeatLabel, selection: &SeatSelection) -> Option<SeatStatus> {
        self.seat(label).map(|seat| Self::status_of(seat, selection))
    }

    fn status_of(seat: &Seat, selection: &SeatSelection) -> SeatStatus {
        if seat.occupied {
            SeatStatus::Occupied
        } else if selection.contains(&seat.label) {
            SeatStatus::Selected
        } else {
            SeatStatus::Available
        }
    }

    /// Rows of `(seat, status)` ready for drawing.
    pub fn render(&self, selection: &SeatSelection) -> Vec<Vec<(&Seat, SeatStatus)>> {
        if self.cols == 0 {
            return Vec::new();
        }
        self.seats
            .chunks(self.cols as usize)
            .map(|row| row.iter().map(|seat| (seat, Self::status_of(seat, selection))).collect())
            .collect()
    }

    /// Flip `label` in `selection`. Occupied seats and seats not on this map
    /// are left alone.
    pub fn toggle(&self, selection: &mut SeatSelection, label: &SeatLabel) -> Toggle {
        match self.seat(label) {
            Some(seat) if !seat.occupied => {
                if selection.remove(label) {
                    Toggle::Deselected
                } else {
                    selection.seats.push(label.clone());
                    Toggle::Selected
                }
            }
            _ => Toggle::Ignored,
        }
    }

    /// Inspection-only view without the toggle.
    pub fn read_only(self) -> ReadOnlySeatMap {
        ReadOnlySeatMap(self)
    }
}

/// Seat map for "check seats" views: occupancy can be inspected, nothing can
/// be selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOnlySeatMap(SeatMap);

impl ReadOnlySeatMap {
    pub fn rows(&self) -> u32 {
        self.0.rows()
    }

    pub fn cols(&self) -> u8 {
        self.0.cols()
    }

    pub fn seats(&self) -> &[Seat] {
        self.0.seats()
    }

    pub fn is_occupied(&self, label: &SeatLabel) -> bool {
        self.0.is_occupied(label)
    }

    pub fn render(&self) -> Vec<Vec<(&Seat, SeatStatus)>> {
        self.0.render(&SeatSelection::new())
    }

    pub fn available_count(&self) -> usize {
        self.0.seats.iter().filter(|s| !s.occupied).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeatMapError {
    #[error("Seat map has {0} columns, at most {MAX_COLUMNS} are supported")]
    TooManyColumns(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(s: &str) -> SeatLabel {
        s.parse().unwrap()
    }

    #[test]
    fn test_generate_labels_row_major() {
        let map = SeatMap::generate(8, 6, &HashSet::new()).unwrap();
        assert_eq!(map.seats().len(), 48);
        assert_eq!(map.seats()[0].label.as_str(), "1A");
        assert_eq!(map.seats()[5].label.as_str(), "1F");
        assert_eq!(map.seats()[6].label.as_str(), "2A");
        assert_eq!(map.seats()[47].label.as_str(), "8F");
        assert!(map.seats().iter().all(|s| !s.occupied));

        let unique: HashSet<_> = map.seats().iter().map(|s| s.label.clone()).collect();
        assert_eq!(unique.len(), 48);
    }

    #[test]
    fn test_generate_sizes() {
        for (rows, cols) in [(0, 0), (1, 1), (3, 4), (30, 26)] {
            let map = SeatMap::generate(rows, cols, &HashSet::new()).unwrap();
            assert_eq!(map.seats().len(), rows as usize * cols as usize);
        }
        assert!(SeatMap::generate(2, 27, &HashSet::new()).is_err());
    }

    #[test]
    fn test_occupied_from_bookings() {
        let occupied: HashSet<_> = [label("2C"), label("9Z")].into_iter().collect();
        let map = SeatMap::generate(3, 4, &occupied).unwrap();

        assert!(map.is_occupied(&label("2C")));
        assert!(!map.is_occupied(&label("2D")));
        assert_eq!(map.seats().iter().filter(|s| s.occupied).count(), 1);
    }

    #[test]
    fn test_toggle_round_trip() {
        let map = SeatMap::generate(4, 4, &HashSet::new()).unwrap();
        let mut selection = SeatSelection::from_labels([label("1A")]);
        let before = selection.clone();

        assert_eq!(map.toggle(&mut selection, &label("3B")), Toggle::Selected);
        assert!(selection.contains(&label("3B")));
        assert_eq!(map.toggle(&mut selection, &label("3B")), Toggle::Deselected);
        assert_eq!(selection, before);
    }

    #[test]
    fn test_occupied_and_unknown_seats_ignored() {
        let occupied: HashSet<_> = [label("1B")].into_iter().collect();
        let map = SeatMap::generate(2, 2, &occupied).unwrap();
        let mut selection = SeatSelection::new();

        assert_eq!(map.toggle(&mut selection, &label("1B")), Toggle::Ignored);
        assert_eq!(map.toggle(&mut selection, &label("5A")), Toggle::Ignored);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_occupied_wins_over_selected() {
        let occupied: HashSet<_> = [label("1A")].into_iter().collect();
        let map = SeatMap::generate(1, 2, &occupied).unwrap();
        let selection = SeatSelection::from_labels([label("1A"), label("1B")]);

        assert_eq!(map.status(&label("1A"), &selection), Some(SeatStatus::Occupied));
        assert_eq!(map.status(&label("1B"), &selection), Some(SeatStatus::Selected));

        let rows = map.render(&selection);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][1].1, SeatStatus::Selected);
    }

    #[test]
    fn test_selection_dedupes_saved_labels() {
        let selection = SeatSelection::from_labels([label("2C"), label("2D"), label("2C")]);
        assert_eq!(selection.len(), 2);
        assert_eq!(selection.labels()[1].as_str(), "2D");
    }

    #[test]
    fn test_demo_map_is_seeded() {
        let a = SeatMap::demo(20, 6, 0.3, 42).unwrap();
        let b = SeatMap::demo(20, 6, 0.3, 42).unwrap();
        assert_eq!(a, b);

        let none = SeatMap::demo(5, 6, 0.0, 7).unwrap();
        assert!(none.seats().iter().all(|s| !s.occupied));
        let full = SeatMap::demo(5, 6, 1.0, 7).unwrap();
        assert!(full.seats().iter().all(|s| s.occupied));
    }

    #[test]
    fn test_read_only_view() {
        let occupied: HashSet<_> = [label("1A"), label("2B")].into_iter().collect();
        let view = SeatMap::generate(2, 2, &occupied).unwrap().read_only();
        assert_eq!(view.available_count(), 2);
        assert!(view.is_occupied(&label("2B")));
        assert_eq!(view.render()[0][0].1, SeatStatus::Occupied);
    }
}
