mod controller;
mod model;
mod rules;
mod submission;
mod surface;


pub use controller::{QuoteFormController, QuoteFormOptions, SubmitOutcome, Visibility};
// Glob keeps the derive-generated field lenses reachable alongside the model.
pub use model::*;
pub use rules::{
    RuleViolation, email_format_violation, is_valid_email, is_valid_phone, phone_format_violation,
};
pub use submission::{BoxedDeliveryFuture, DiscardSink, SubmissionSink};
pub use surface::{FormSurface, SuccessNotice};
