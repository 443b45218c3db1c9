use chrono::{DateTime, Local, NaiveDate, Utc};

/// Raw field values of the quote-request form, exactly as the visitor typed
/// or selected them. Validation happens against this model; nothing here is
/// parsed until a submission snapshot is taken.
#[derive(Clone, Debug, Eq, PartialEq, tripquote_derive::FormModel)]
pub struct QuoteForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub travel_date: String,
    pub trip_duration: String,
    pub adults: String,
    pub children: String,
    pub inquiry_type: String,
    pub trip_details: String,
}

impl QuoteForm {
    /// The state the form presents to a new visitor and returns to after a
    /// successful submit or a close. The travel date is recomputed each time
    /// so the default never falls into the past.
    pub fn fresh() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            country: String::new(),
            travel_date: format_travel_date(travel_date_floor()),
            trip_duration: String::new(),
            adults: "2".into(),
            children: "0".into(),
            inquiry_type: String::new(),
            trip_details: String::new(),
        }
    }
}

/// Earliest selectable travel date: tomorrow in the local time zone. Also
/// the default value of the travel-date field.
pub fn travel_date_floor() -> NaiveDate {
    let today = Local::now().date_naive();
    today.succ_opt().unwrap_or(today)
}

pub fn format_travel_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Snapshot of the form taken at a successful submit. Ephemeral: handed to
/// the caller (and eventually a [`SubmissionSink`](super::SubmissionSink)),
/// never stored by the controller.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubmissionRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub travel_date: String,
    pub trip_duration: String,
    pub adults: String,
    pub children: String,
    pub inquiry_type: String,
    pub trip_details: String,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionRecord {
    pub fn capture(model: &QuoteForm) -> Self {
        Self {
            name: model.name.trim().to_string(),
            email: model.email.trim().to_string(),
            phone: model.phone.trim().to_string(),
            country: model.country.clone(),
            travel_date: model.travel_date.clone(),
            trip_duration: model.trip_duration.clone(),
            adults: model.adults.clone(),
            children: model.children.clone(),
            inquiry_type: model.inquiry_type.clone(),
            trip_details: model.trip_details.trim().to_string(),
            submitted_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_form_carries_party_defaults_and_tomorrow() {
        let form = QuoteForm::fresh();
        assert_eq!(form.adults, "2");
        assert_eq!(form.children, "0");
        assert_eq!(form.travel_date, format_travel_date(travel_date_floor()));
        assert!(form.name.is_empty());
        assert!(form.inquiry_type.is_empty());
    }

    #[test]
    fn travel_date_floor_is_strictly_after_today() {
        assert!(travel_date_floor() > Local::now().date_naive());
    }

    #[test]
    fn submission_record_trims_free_text_fields() {
        let mut form = QuoteForm::fresh();
        form.name = "  Jane Doe  ".into();
        form.email = " jane@example.com ".into();
        form.trip_details = " We want to see elephants and the great migration. ".into();

        let record = SubmissionRecord::capture(&form);
        assert_eq!(record.name, "Jane Doe");
        assert_eq!(record.email, "jane@example.com");
        assert_eq!(
            record.trip_details,
            "We want to see elephants and the great migration."
        );
        assert_eq!(record.adults, "2");
    }
}
