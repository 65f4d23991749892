use aero_shared::{BookingDetails, BookingForm, TravelClass};
use chrono::NaiveDate;
use std::fmt;

/// Date format used by the form's date inputs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A problem with one form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every field problem found in one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", err.field, err.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Check the raw form and turn it into typed booking details.
pub fn validate(form: &BookingForm) -> Result<BookingDetails, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = required(&mut errors, "name", &form.name);
    let email = required(&mut errors, "email", &form.email);
    let origin = required(&mut errors, "from", &form.origin);
    let destination = required(&mut errors, "to", &form.destination);

    if let Some(email) = &email {
        if !looks_like_email(email) {
            errors.push("email", "must look like name@domain");
        }
    }

    let depart = match required(&mut errors, "depart", &form.depart) {
        Some(raw) => parse_date(&mut errors, "depart", &raw),
        None => None,
    };

    let return_raw = form.return_date.trim();
    let return_date = if return_raw.is_empty() {
        None
    } else {
        parse_date(&mut errors, "return", return_raw)
    };

    if let (Some(depart), Some(back)) = (depart, return_date) {
        if back < depart {
            errors.push("return", "must not be before the departure date");
        }
    }

    let class_raw = form.travel_class.trim();
    let travel_class = if class_raw.is_empty() {
        TravelClass::default()
    } else {
        match class_raw.parse::<TravelClass>() {
            Ok(class) => class,
            Err(e) => {
                errors.push("class", e.to_string());
                TravelClass::default()
            }
        }
    };

    if form.passengers == 0 {
        errors.push("passengers", "at least one passenger is required");
    }

    match (name, email, origin, destination, depart) {
        (Some(name), Some(email), Some(origin), Some(destination), Some(depart)) if errors.is_empty() => {
            Ok(BookingDetails {
                name,
                email,
                origin,
                destination,
                depart,
                return_date,
                travel_class,
                passengers: form.passengers,
            })
        }
        _ => Err(errors),
    }
}

fn required(errors: &mut ValidationErrors, field: &'static str, value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(field, "is required");
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_date(errors: &mut ValidationErrors, field: &'static str, value: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(field, "must be a date in YYYY-MM-DD form");
            None
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}
