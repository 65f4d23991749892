use aero_shared::{BookingForm, BookingId, SeatLabel};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "aero")]
#[command(about = "Aero Trust booking desk: fares, seats and locally stored bookings")]
pub struct Cli {
    /// Directory holding default/<mode>/local config files
    #[arg(long, default_value = "config", global = true)]
    pub config_dir: String,

    /// Override the storage directory from config
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate, preview and confirm a booking
    Book(BookingArgs),
    /// Validate and show the fare summary without booking
    Preview(BookingArgs),
    /// Manage the saved draft
    Draft {
        #[command(subcommand)]
        action: DraftAction,
    },
    /// Show seat occupancy (read-only)
    Seats {
        /// Sample occupancy instead of the stored bookings
        #[arg(long)]
        demo: bool,
        /// Seed for the sample occupancy
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List bookings, one page at a time
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Filter on name, route or email
        #[arg(long)]
        query: Option<String>,
    },
    /// Shorthand for `list --query`
    Search {
        query: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show one booking
    View {
        id: BookingId,
        /// Print the stored record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change fields of a booking; the fare is recomputed
    Edit {
        id: BookingId,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Remove one booking
    Delete { id: BookingId },
    /// Remove every booking
    Clear {
        /// Required, this cannot be undone
        #[arg(long)]
        yes: bool,
    },
    /// Write all bookings to a CSV file
    Export {
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Interactive booking session
    Shell,
}

#[derive(Debug, Subcommand)]
pub enum DraftAction {
    /// Merge the given fields into the draft and save it
    Save(BookingArgs),
    Show,
    Clear,
}

#[derive(Debug, Clone, Default, Args)]
pub struct BookingArgs {
    #[command(flatten)]
    pub form: FormArgs,

    /// Seats to select, e.g. `--seat 2C,2D`
    #[arg(long = "seat", value_delimiter = ',')]
    pub seats: Vec<SeatLabel>,

    /// Start from the saved draft
    #[arg(long)]
    pub use_draft: bool,
}

/// Booking form fields. Unset flags leave the current value alone.
#[derive(Debug, Clone, Default, Args)]
pub struct FormArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long = "from")]
    pub origin: Option<String>,
    #[arg(long = "to")]
    pub destination: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub depart: Option<String>,
    /// YYYY-MM-DD, empty for one-way
    #[arg(long = "return")]
    pub return_date: Option<String>,
    /// economy, business or first
    #[arg(long = "class")]
    pub travel_class: Option<String>,
    #[arg(long)]
    pub passengers: Option<u32>,
}

impl FormArgs {
    pub fn apply_to(&self, form: &mut BookingForm) {
        let fields = [
            (&self.name, &mut form.name),
            (&self.email, &mut form.email),
            (&self.origin, &mut form.origin),
            (&self.destination, &mut form.destination),
            (&self.depart, &mut form.depart),
            (&self.return_date, &mut form.return_date),
            (&self.travel_class, &mut form.travel_class),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value.clone();
            }
        }
        if let Some(passengers) = self.passengers {
            form.passengers = passengers;
        }
    }
}
