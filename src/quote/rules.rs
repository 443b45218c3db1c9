use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::form::{FormModel, FormResult, ValidationError};

use super::QuoteForm;
use super::controller::QuoteEngine;

// One non-whitespace local part, one `@`, and a dot somewhere in the domain.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

// International style: optional `+`, leading digit 1-9, up to 15 more digits.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").expect("phone pattern is a valid regex"));

const TRIP_DETAILS_MIN_CHARS: usize = 20;

/// One failed field rule. Messages are the ones shown inline on the page.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RuleViolation {
    NameRequired,
    EmailRequired,
    EmailInvalid,
    CountryRequired,
    AdultsRequired,
    TripDetailsRequired,
    TripDetailsTooShort,
    PhoneInvalid,
}

impl ValidationError for RuleViolation {
    fn message(&self) -> Cow<'static, str> {
        Cow::Borrowed(match self {
            RuleViolation::NameRequired => "Please enter your full name",
            RuleViolation::EmailRequired => "Please enter your email address",
            RuleViolation::EmailInvalid => "Please enter a valid email address",
            RuleViolation::CountryRequired => "Please select your country",
            RuleViolation::AdultsRequired => "Please select number of adults",
            RuleViolation::TripDetailsRequired => "Please tell us about your trip",
            RuleViolation::TripDetailsTooShort => {
                "Please provide more details (at least 20 characters)"
            }
            RuleViolation::PhoneInvalid => "Please enter a valid phone number",
        })
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Spaces, dashes and parentheses are presentation, not payload.
pub fn is_valid_phone(value: &str) -> bool {
    let cleaned: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect();
    PHONE_PATTERN.is_match(&cleaned)
}

/// Blur-time check for the email field: an empty value is left for the
/// submit pass, a non-empty malformed one is flagged right away.
pub fn email_format_violation(value: &str) -> Option<RuleViolation> {
    let value = value.trim();
    (!value.is_empty() && !is_valid_email(value)).then_some(RuleViolation::EmailInvalid)
}

/// Blur-time check for the optional phone field.
pub fn phone_format_violation(value: &str) -> Option<RuleViolation> {
    let value = value.trim();
    (!value.is_empty() && !is_valid_phone(value)).then_some(RuleViolation::PhoneInvalid)
}

/// Installs every field rule on the engine. All rules run on every submit
/// pass so each failing field surfaces its own message simultaneously.
pub(super) fn install(engine: &QuoteEngine) -> FormResult<()> {
    let fields = QuoteForm::fields();

    engine.register_field_validator(fields.name(), |_model: &QuoteForm, value: &String| {
        if value.trim().is_empty() {
            Err(RuleViolation::NameRequired)
        } else {
            Ok(())
        }
    })?;

    engine.register_field_validator(fields.email(), |_model: &QuoteForm, value: &String| {
        if value.trim().is_empty() {
            Err(RuleViolation::EmailRequired)
        } else {
            Ok(())
        }
    })?;
    engine.register_field_validator(fields.email(), |_model: &QuoteForm, value: &String| {
        let value = value.trim();
        if !value.is_empty() && !is_valid_email(value) {
            Err(RuleViolation::EmailInvalid)
        } else {
            Ok(())
        }
    })?;

    engine.register_field_validator(fields.country(), |_model: &QuoteForm, value: &String| {
        if value.is_empty() {
            Err(RuleViolation::CountryRequired)
        } else {
            Ok(())
        }
    })?;

    engine.register_field_validator(fields.adults(), |_model: &QuoteForm, value: &String| {
        if value.is_empty() {
            Err(RuleViolation::AdultsRequired)
        } else {
            Ok(())
        }
    })?;

    engine.register_field_validator(fields.trip_details(), |_model: &QuoteForm, value: &String| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            Err(RuleViolation::TripDetailsRequired)
        } else if trimmed.chars().count() < TRIP_DETAILS_MIN_CHARS {
            Err(RuleViolation::TripDetailsTooShort)
        } else {
            Ok(())
        }
    })?;

    engine.register_field_validator(fields.phone(), |_model: &QuoteForm, value: &String| {
        match phone_format_violation(value) {
            Some(violation) => Err(violation),
            None => Ok(()),
        }
    })?;

    Ok(())
}
