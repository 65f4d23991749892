use aero_catalog::FareEstimator;
use aero_shared::{format_naira, Booking, BookingDetails, SeatLabel, TravelClass};
use serde::Serialize;
use std::fmt;

/// Review card shown before confirming, and when viewing a stored booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingSummary {
    pub passenger: String,
    pub origin: String,
    pub destination: String,
    pub depart: String,
    pub return_date: Option<String>,
    pub passengers: u32,
    pub travel_class: TravelClass,
    pub seats: Vec<SeatLabel>,
    pub seat_fee: u64,
    pub seat_total: u64,
    pub email: String,
    pub fare: u64,
}

impl BookingSummary {
    pub fn from_details(details: &BookingDetails, seats: &[SeatLabel], fares: &FareEstimator) -> Self {
        let class = details.travel_class;
        Self {
            passenger: details.name.clone(),
            origin: details.origin.clone(),
            destination: details.destination.clone(),
            depart: details.depart.to_string(),
            return_date: details.return_date.map(|d| d.to_string()),
            passengers: details.passengers,
            travel_class: class,
            seats: seats.to_vec(),
            seat_fee: fares.seat_fee(class),
            seat_total: fares.seat_total(class, seats.len()),
            email: details.email.clone(),
            fare: fares.estimate(class, details.passengers, seats),
        }
    }

    /// Summary of a stored booking, quoting the price it was saved with.
    pub fn from_booking(booking: &Booking, fares: &FareEstimator) -> Self {
        let class = booking.travel_class;
        Self {
            passenger: booking.name.clone(),
            origin: booking.origin.clone(),
            destination: booking.destination.clone(),
            depart: booking.depart.map(|d| d.to_string()).unwrap_or_default(),
            return_date: booking.return_date.map(|d| d.to_string()),
            passengers: booking.passengers,
            travel_class: class,
            seats: booking.seats.clone(),
            seat_fee: fares.seat_fee(class),
            seat_total: fares.seat_total(class, booking.seats.len()),
            email: booking.email.clone(),
            fare: booking.price,
        }
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

impl fmt::Display for BookingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Passenger:  {}", or_dash(&self.passenger))?;
        writeln!(f, "Route:      {} -> {}", or_dash(&self.origin), or_dash(&self.destination))?;
        writeln!(f, "Departure:  {}", or_dash(&self.depart))?;
        writeln!(f, "Return:     {}", self.return_date.as_deref().unwrap_or("One-way"))?;
        writeln!(f, "Passengers: {}", self.passengers)?;
        writeln!(f, "Class:      {}", self.travel_class)?;
        if self.seats.is_empty() {
            writeln!(f, "Seats:      None")?;
        } else {
            writeln!(f, "Seats:      {}", join_seats(&self.seats))?;
            writeln!(
                f,
                "            Seat price: {} x {} = {}",
                format_naira(self.seat_fee),
                self.seats.len(),
                format_naira(self.seat_total)
            )?;
        }
        writeln!(f, "Email:      {}", or_dash(&self.email))?;
        write!(f, "Estimated fare: {}", format_naira(self.fare))
    }
}

fn join_seats(seats: &[SeatLabel]) -> String {
    seats.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", ")
}

/// `2 seats: 2C, 2D (₦100)`; empty when no seats were picked.
pub fn seat_summary(class: TravelClass, seats: &[SeatLabel], fares: &FareEstimator) -> String {
    match seats.len() {
        0 => String::new(),
        n => format!(
            "{} seat{}: {} ({})",
            n,
            if n > 1 { "s" } else { "" },
            join_seats(seats),
            format_naira(fares.seat_total(class, n))
        ),
    }
}
