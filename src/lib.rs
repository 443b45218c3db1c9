pub mod form;
pub mod quote;

pub use quote::{QuoteFormController, QuoteFormOptions, SubmitOutcome, Visibility};
