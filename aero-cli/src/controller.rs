use aero_catalog::{SeatMap, Toggle};
use aero_core::{validate, CoreError};
use aero_order::{BookingSession, BookingSummary, EXPORT_FILE_NAME};
use aero_shared::{format_naira, Booking, BookingForm, BookingId, BookingPatch, SeatLabel, TravelClass};
use aero_store::KeyValueStore;
use anyhow::{bail, Context};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

use crate::cli::{BookingArgs, FormArgs};
use crate::notice::Notice;
use crate::render;
use crate::state::AppState;

/// Filter and page of the bookings list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    pub query: String,
    pub page: usize,
}

/// Runs user commands against the stores and prints the results.
pub struct Controller<S> {
    state: AppState<S>,
}

impl<S: KeyValueStore + Clone> Controller<S> {
    pub fn new(state: AppState<S>) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState<S> {
        &self.state
    }

    /// Session for a one-shot command: optionally the draft, then the args on top.
    fn session_from(&self, args: &BookingArgs, out: &mut dyn Write) -> anyhow::Result<BookingSession> {
        let mut session = if args.use_draft {
            match self.state.drafts.load() {
                Some(draft) => {
                    writeln!(out, "{}", Notice::DraftLoaded)?;
                    BookingSession::resume(Some(draft))
                }
                None => {
                    writeln!(out, "{}", Notice::NoDraft)?;
                    BookingSession::new()
                }
            }
        } else {
            BookingSession::new()
        };

        args.form.apply_to(session.form_mut());
        if !args.seats.is_empty() {
            let map = self.state.seat_map()?;
            self.select_seats(&mut session, &map, &args.seats, out)?;
        }
        Ok(session)
    }

    /// Add seats to the selection. Seats already selected stay selected.
    pub fn select_seats(
        &self,
        session: &mut BookingSession,
        map: &SeatMap,
        labels: &[SeatLabel],
        out: &mut dyn Write,
    ) -> anyhow::Result<()> {
        for label in labels {
            if session.selection().contains(label) {
                continue;
            }
            if session.toggle_seat(map, label) == Toggle::Ignored {
                writeln!(out, "{}", Notice::SeatUnavailable(label.clone()))?;
            }
        }
        Ok(())
    }

    pub fn preview(&self, args: &BookingArgs, out: &mut dyn Write) -> anyhow::Result<BookingSummary> {
        let mut session = self.session_from(args, out)?;
        self.preview_session(&mut session, out)
    }

    pub fn preview_session(&self, session: &mut BookingSession, out: &mut dyn Write) -> anyhow::Result<BookingSummary> {
        let summary = session.preview(self.state.bookings.fares())?;
        writeln!(out, "{}", summary)?;
        Ok(summary)
    }

    /// Preview and confirm in one go.
    pub fn book(&self, args: &BookingArgs, out: &mut dyn Write) -> anyhow::Result<Booking> {
        let mut session = self.session_from(args, out)?;
        self.preview_session(&mut session, out)?;
        self.confirm_session(&mut session, out)
    }

    pub fn confirm_session(&self, session: &mut BookingSession, out: &mut dyn Write) -> anyhow::Result<Booking> {
        let booking = session.confirm(&self.state.bookings, &self.state.drafts)?;
        writeln!(out, "{}", Notice::BookingConfirmed(booking.id))?;
        Ok(booking)
    }

    /// Merge `args` into the stored draft and save it back.
    pub fn draft_save(&self, args: &BookingArgs, out: &mut dyn Write) -> anyhow::Result<()> {
        let mut session = BookingSession::resume(self.state.drafts.load());
        args.form.apply_to(session.form_mut());
        if !args.seats.is_empty() {
            let map = self.state.seat_map()?;
            self.select_seats(&mut session, &map, &args.seats, out)?;
        }
        self.save_session(&session, out)
    }

    pub fn save_session(&self, session: &BookingSession, out: &mut dyn Write) -> anyhow::Result<()> {
        session.save_draft(&self.state.drafts)?;
        writeln!(out, "{}", Notice::DraftSaved)?;
        Ok(())
    }

    pub fn draft_show(&self, out: &mut dyn Write) -> anyhow::Result<()> {
        match self.state.drafts.load() {
            Some(draft) => render::draft(&draft, out)?,
            None => writeln!(out, "{}", Notice::NoDraft)?,
        }
        Ok(())
    }

    pub fn draft_clear(&self, out: &mut dyn Write) -> anyhow::Result<()> {
        self.state.drafts.clear()?;
        writeln!(out, "{}", Notice::DraftCleared)?;
        Ok(())
    }

    /// `Seat price: ₦50 each (economy)` for the class typed so far.
    pub fn seat_price(&self, class: &str, out: &mut dyn Write) -> anyhow::Result<()> {
        let class = TravelClass::from_lenient(class);
        let fee = self.state.bookings.fares().seat_fee(class);
        writeln!(out, "Seat price: {} each ({})", format_naira(fee), class)?;
        Ok(())
    }

    /// Read-only occupancy map, from bookings or seeded sample data.
    pub fn seats(&self, demo: bool, seed: Option<u64>, out: &mut dyn Write) -> anyhow::Result<()> {
        let map = if demo {
            self.state.demo_seat_map(seed)?
        } else {
            self.state.seat_map()?
        };
        let map = map.read_only();
        render::seat_grid(&map.render(), out)?;
        writeln!(out, "{} of {} seats available", map.available_count(), map.seats().len())?;
        Ok(())
    }

    /// Print the page `view` asks for. Returns the page actually shown, which
    /// is clamped into range.
    pub fn list(&self, view: &ListView, out: &mut dyn Write) -> anyhow::Result<usize> {
        let listing = &self.state.config.listing;
        let page = self.state.bookings.page(&view.query, listing.page_size, view.page);
        debug!(query = %view.query, page = page.page, matches = page.total_items, "Listing bookings");
        render::bookings_page(&page, listing.page_links, out)?;
        Ok(page.page)
    }

    /// Page that holds the newest booking
    pub fn last_page(&self) -> usize {
        self.state.bookings.last_page(self.state.config.listing.page_size)
    }

    pub fn view(&self, id: BookingId, json: bool, out: &mut dyn Write) -> anyhow::Result<()> {
        let booking = self.state.bookings.get(id)?;
        if json {
            writeln!(out, "{}", serde_json::to_string_pretty(&booking)?)?;
            return Ok(());
        }
        writeln!(out, "Booking {}", booking.id)?;
        writeln!(out, "{}", BookingSummary::from_booking(&booking, self.state.bookings.fares()))?;
        Ok(())
    }

    /// Overlay `args` on the stored booking, revalidate and save. Seats are
    /// kept as booked.
    pub fn edit(&self, id: BookingId, args: &FormArgs, out: &mut dyn Write) -> anyhow::Result<Booking> {
        let booking = self.state.bookings.get(id)?;
        let mut form = booking.to_form();
        args.apply_to(&mut form);
        self.save_edit(id, &form, out)
    }

    pub fn save_edit(&self, id: BookingId, form: &BookingForm, out: &mut dyn Write) -> anyhow::Result<Booking> {
        let details = validate(form).map_err(CoreError::from)?;
        let updated = self.state.bookings.update(id, BookingPatch::from(details))?;
        writeln!(out, "{}", Notice::BookingUpdated)?;
        writeln!(out, "{}", BookingSummary::from_booking(&updated, self.state.bookings.fares()))?;
        Ok(updated)
    }

    pub fn delete(&self, id: BookingId, out: &mut dyn Write) -> anyhow::Result<bool> {
        let removed = self.state.bookings.delete(id)?;
        let notice = if removed { Notice::BookingRemoved } else { Notice::BookingNotFound };
        writeln!(out, "{}", notice)?;
        Ok(removed)
    }

    pub fn clear(&self, confirmed: bool, out: &mut dyn Write) -> anyhow::Result<()> {
        if !confirmed {
            bail!("refusing to remove every booking without confirmation (pass --yes)");
        }
        self.state.bookings.clear_all()?;
        writeln!(out, "{}", Notice::AllCleared)?;
        Ok(())
    }

    /// Write the CSV to `output` (default `aero_bookings.csv`). Nothing is
    /// written when there are no bookings.
    pub fn export(&self, output: Option<PathBuf>, out: &mut dyn Write) -> anyhow::Result<Option<PathBuf>> {
        let Some(csv) = self.state.bookings.export_csv()? else {
            writeln!(out, "{}", Notice::NothingToExport)?;
            return Ok(None);
        };

        let path = output.unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));
        std::fs::write(&path, csv).with_context(|| format!("Failed to write {}", path.display()))?;
        writeln!(out, "{}", Notice::Exported(path.clone()))?;
        Ok(Some(path))
    }
}

/// Set one form field by its display name.
pub fn set_field(form: &mut BookingForm, field: &str, value: &str) -> anyhow::Result<()> {
    let value = value.to_string();
    match field {
        "name" => form.name = value,
        "email" => form.email = value,
        "from" => form.origin = value,
        "to" => form.destination = value,
        "depart" => form.depart = value,
        "return" => form.return_date = value,
        "class" => form.travel_class = value,
        "passengers" => {
            form.passengers = value
                .trim()
                .parse()
                .with_context(|| format!("passengers must be a whole number, got `{}`", value))?;
        }
        other => bail!("unknown field `{}` (name, email, from, to, depart, return, class, passengers)", other),
    }
    Ok(())
}
