mod controller;
mod schedule;
mod validation;

#[cfg(test)]
mod tests;

pub use controller::{
    FieldKey, FieldMeta, FormController, FormError, FormId, FormOptions, FormResult, FormSnapshot,
    SubmitState, ValidationMode,
};
pub use schedule::ScheduledEffect;
pub use tripquote_derive::FormModel;
pub use validation::{FieldLens, FieldValidator, FormModel, FormValidator, ValidationError};
