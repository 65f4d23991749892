use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::draft::BookingForm;
use crate::models::seat::SeatLabel;

/// Booking identifier. Assigned from the wall clock in milliseconds and kept
/// strictly increasing by the booking store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(pub i64);

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookingId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(BookingId)
    }
}

/// Cabin class of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelClass {
    #[default]
    Economy,
    Business,
    First,
}

impl TravelClass {
    pub const ALL: [TravelClass; 3] = [TravelClass::Economy, TravelClass::Business, TravelClass::First];

    pub fn as_str(&self) -> &'static str {
        match self {
            TravelClass::Economy => "economy",
            TravelClass::Business => "business",
            TravelClass::First => "first",
        }
    }

    /// Unknown or blank input falls back to economy.
    pub fn from_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl fmt::Display for TravelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelClass {
    type Err = UnknownTravelClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "economy" => Ok(TravelClass::Economy),
            "business" => Ok(TravelClass::Business),
            "first" => Ok(TravelClass::First),
            _ => Err(UnknownTravelClass(s.to_string())),
        }
    }
}

// Stored blobs may carry any string here; read it the lenient way.
impl<'de> Deserialize<'de> for TravelClass {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(TravelClass::from_lenient).unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown travel class `{0}`, expected economy, business or first")]
pub struct UnknownTravelClass(pub String);

fn default_passengers() -> u32 {
    1
}

/// A confirmed reservation as persisted in the booking list.
///
/// Field names on the wire match the legacy storage blob (`from`, `to`,
/// `return`, `class`) so existing lists keep loading. Edits saved by older
/// clients could leave `depart` blank, so it is optional here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "from", default)]
    pub origin: String,
    #[serde(rename = "to", default)]
    pub destination: String,
    #[serde(default, with = "optional_date")]
    pub depart: Option<NaiveDate>,
    #[serde(rename = "return", default, with = "optional_date")]
    pub return_date: Option<NaiveDate>,
    #[serde(rename = "class", default)]
    pub travel_class: TravelClass,
    #[serde(default = "default_passengers")]
    pub passengers: u32,
    #[serde(default)]
    pub seats: Vec<SeatLabel>,
    #[serde(default)]
    pub price: u64,
}

impl Booking {
    pub fn new(id: BookingId, details: BookingDetails, seats: Vec<SeatLabel>, price: u64) -> Self {
        Self {
            id,
            name: details.name,
            email: details.email,
            origin: details.origin,
            destination: details.destination,
            depart: Some(details.depart),
            return_date: details.return_date,
            travel_class: details.travel_class,
            passengers: details.passengers,
            seats,
            price,
        }
    }

    /// Raw form values, used to prefill an edit.
    pub fn to_form(&self) -> BookingForm {
        BookingForm {
            name: self.name.clone(),
            email: self.email.clone(),
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            depart: self.depart.map(|d| d.to_string()).unwrap_or_default(),
            return_date: self.return_date.map(|d| d.to_string()).unwrap_or_default(),
            travel_class: self.travel_class.as_str().to_string(),
            passengers: self.passengers,
        }
    }
}

/// Validated passenger and itinerary fields of a booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDetails {
    pub name: String,
    pub email: String,
    pub origin: String,
    pub destination: String,
    pub depart: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub travel_class: TravelClass,
    pub passengers: u32,
}

/// Partial replacement of a booking's fields. `None` leaves a field alone;
/// `return_date: Some(None)` clears the return leg.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub depart: Option<NaiveDate>,
    pub return_date: Option<Option<NaiveDate>>,
    pub travel_class: Option<TravelClass>,
    pub passengers: Option<u32>,
    pub seats: Option<Vec<SeatLabel>>,
}

impl BookingPatch {
    /// Overwrite the named fields. The price is left for the caller to recompute.
    pub fn apply_to(self, booking: &mut Booking) {
        if let Some(name) = self.name {
            booking.name = name;
        }
        if let Some(email) = self.email {
            booking.email = email;
        }
        if let Some(origin) = self.origin {
            booking.origin = origin;
        }
        if let Some(destination) = self.destination {
            booking.destination = destination;
        }
        if let Some(depart) = self.depart {
            booking.depart = Some(depart);
        }
        if let Some(return_date) = self.return_date {
            booking.return_date = return_date;
        }
        if let Some(travel_class) = self.travel_class {
            booking.travel_class = travel_class;
        }
        if let Some(passengers) = self.passengers {
            booking.passengers = passengers.max(1);
        }
        if let Some(seats) = self.seats {
            booking.seats = seats;
        }
    }
}

impl From<BookingDetails> for BookingPatch {
    fn from(details: BookingDetails) -> Self {
        Self {
            name: Some(details.name),
            email: Some(details.email),
            origin: Some(details.origin),
            destination: Some(details.destination),
            depart: Some(details.depart),
            return_date: Some(details.return_date),
            travel_class: Some(details.travel_class),
            passengers: Some(details.passengers),
            seats: None,
        }
    }
}

/// Dates stored as text, where an empty string means no date (one-way
/// `return`, or a `depart` blanked by an old edit).
mod optional_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => serializer.collect_str(date),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
