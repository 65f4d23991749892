use serde::{Deserialize, Serialize};

use crate::models::seat::SeatLabel;

fn default_passengers() -> u32 {
    1
}

/// Raw booking form values, exactly as the user typed them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "from", default)]
    pub origin: String,
    #[serde(rename = "to", default)]
    pub destination: String,
    #[serde(default)]
    pub depart: String,
    #[serde(rename = "return", default)]
    pub return_date: String,
    #[serde(rename = "class", default)]
    pub travel_class: String,
    #[serde(default = "default_passengers")]
    pub passengers: u32,
}

impl Default for BookingForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            origin: String::new(),
            destination: String::new(),
            depart: String::new(),
            return_date: String::new(),
            travel_class: String::new(),
            passengers: default_passengers(),
        }
    }
}

/// Saved, unconfirmed form snapshot. Stored flat, seats alongside the form
/// fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    #[serde(flatten)]
    pub form: BookingForm,
    #[serde(default)]
    pub seats: Vec<SeatLabel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_is_stored_flat() {
        let draft = Draft {
            form: BookingForm {
                name: "Ngozi".to_string(),
                destination: "Dubai".to_string(),
                passengers: 2,
                ..Default::default()
            },
            seats: vec!["3C".parse().unwrap()],
        };

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["name"], "Ngozi");
        assert_eq!(json["to"], "Dubai");
        assert_eq!(json["passengers"], 2);
        assert_eq!(json["seats"][0], "3C");

        let back: Draft = serde_json::from_value(json).unwrap();
        assert_eq!(back, draft);
    }

    #[test]
    fn test_missing_fields_default() {
        let draft: Draft = serde_json::from_str(r#"{"name":"Tolu"}"#).unwrap();
        assert_eq!(draft.form.passengers, 1);
        assert!(draft.seats.is_empty());
        assert!(draft.form.email.is_empty());
    }
}
