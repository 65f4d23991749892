use aero_catalog::FareEstimator;
use aero_shared::Booking;
use std::io::Write;

use crate::summary::seat_summary;

/// File name offered for downloads of the export
pub const EXPORT_FILE_NAME: &str = "aero_bookings.csv";

pub const HEADER: [&str; 12] = [
    "id",
    "name",
    "from",
    "to",
    "depart",
    "return",
    "class",
    "passengers",
    "price",
    "seats",
    "seat_summary",
    "email",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("Export write failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Export produced invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Write the booking table to `out`. The header row is bare, every data
/// field is double-quoted with embedded quotes doubled.
pub fn write_csv<W: Write>(bookings: &[Booking], fares: &FareEstimator, out: W) -> Result<W, ExportError> {
    let mut out = out;
    writeln!(out, "{}", HEADER.join(","))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(out);

    for booking in bookings {
        let seats = booking
            .seats
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join("|");

        writer.write_record([
            booking.id.to_string(),
            booking.name.clone(),
            booking.origin.clone(),
            booking.destination.clone(),
            booking.depart.map(|d| d.to_string()).unwrap_or_default(),
            booking.return_date.map(|d| d.to_string()).unwrap_or_default(),
            booking.travel_class.to_string(),
            booking.passengers.to_string(),
            booking.price.to_string(),
            seats,
            seat_summary(booking.travel_class, &booking.seats, fares),
            booking.email.clone(),
        ])?;
    }

    writer.flush()?;
    writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}

pub fn to_csv_string(bookings: &[Booking], fares: &FareEstimator) -> Result<String, ExportError> {
    let bytes = write_csv(bookings, fares, Vec::new())?;
    Ok(String::from_utf8(bytes)?)
}
