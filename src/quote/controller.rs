use std::borrow::Cow;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::form::{
    FieldKey, FieldLens, FormController, FormError, FormModel, FormOptions, FormResult,
    ScheduledEffect, SubmitState, ValidationError,
};

use super::model::{QuoteForm, SubmissionRecord};
use super::rules::{self, RuleViolation};
use super::surface::{FormSurface, SuccessNotice};

pub(super) type QuoteEngine = FormController<QuoteForm, RuleViolation>;

/// Whether the quote form panel is on screen. `Hidden` and `Visible` cycle
/// indefinitely: reveal shows it, close or a successful submit hides it,
/// and a failed submit leaves it up with its errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Visibility {
    Hidden,
    Visible,
}

#[derive(Clone, Debug)]
pub struct QuoteFormOptions {
    /// Pause before the first field is focused after reveal.
    pub focus_delay: Duration,
    /// How long the success notice stays up before auto-dismissing.
    pub notice_duration: Duration,
    pub notice: SuccessNotice,
}

impl Default for QuoteFormOptions {
    fn default() -> Self {
        Self {
            focus_delay: Duration::from_millis(500),
            notice_duration: Duration::from_secs(8),
            notice: SuccessNotice::default(),
        }
    }
}

/// Result of a submit pass. The accepted branch hands back the captured
/// record together with the pending notice dismissal; the rejected branch
/// lists what the visitor still has to fix, in on-page field order.
#[derive(Debug)]
pub enum SubmitOutcome {
    Accepted {
        record: SubmissionRecord,
        dismissal: ScheduledEffect,
    },
    Rejected {
        errors: Vec<(FieldKey, Cow<'static, str>)>,
    },
}

/// Drives the quote-request form on a [`FormSurface`]: reveal, field edits,
/// blur checks, submit with inline errors or simulated success, and close.
/// Owns all mutable form state; the surface only renders what it is told.
pub struct QuoteFormController<S: FormSurface> {
    engine: QuoteEngine,
    surface: Arc<S>,
    visibility: Arc<RwLock<Visibility>>,
    options: QuoteFormOptions,
}

impl<S: FormSurface> Clone for QuoteFormController<S> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            surface: self.surface.clone(),
            visibility: self.visibility.clone(),
            options: self.options.clone(),
        }
    }
}

impl<S: FormSurface> QuoteFormController<S> {
    pub fn new(surface: Arc<S>) -> FormResult<Self> {
        Self::with_options(surface, QuoteFormOptions::default())
    }

    pub fn with_options(surface: Arc<S>, options: QuoteFormOptions) -> FormResult<Self> {
        let engine = QuoteEngine::new(QuoteForm::fresh(), FormOptions::default());
        rules::install(&engine)?;
        Ok(Self {
            engine,
            surface,
            visibility: Arc::new(RwLock::new(Visibility::Hidden)),
            options,
        })
    }

    pub fn visibility(&self) -> FormResult<Visibility> {
        Ok(*self
            .visibility
            .read()
            .map_err(|_| FormError::StatePoisoned("reading form visibility"))?)
    }

    pub fn model(&self) -> FormResult<QuoteForm> {
        self.engine.model()
    }

    pub fn field_errors(&self) -> FormResult<Vec<(FieldKey, Cow<'static, str>)>> {
        let snapshot = self.engine.snapshot()?;
        let mut errors = Vec::new();
        for key in QuoteForm::field_keys() {
            if let Some(message) = snapshot
                .field_meta
                .get(key)
                .and_then(|meta| meta.errors.first())
                .map(ValidationError::message)
            {
                errors.push((*key, message));
            }
        }
        Ok(errors)
    }

    /// Brings the form on screen: trigger hidden, panel shown and scrolled
    /// to. Returns the pending focus of the first field; the host drives it
    /// after the configured delay. Safe to call while already visible.
    pub fn reveal(&self) -> FormResult<ScheduledEffect> {
        self.set_visibility(Visibility::Visible)?;
        self.surface.hide_trigger();
        self.surface.show_form();
        self.surface.scroll_to_form();
        tracing::debug!("quote form revealed");

        let surface = self.surface.clone();
        let first_field = QuoteForm::fields().name().key();
        Ok(ScheduledEffect::new(self.options.focus_delay, move || {
            if !surface.focus_field(first_field) {
                tracing::trace!(field = %first_field, "focus target gone, skipping");
            }
        }))
    }

    /// Writes a field value. Any error the field was showing is cleared
    /// immediately, without waiting for the next validation pass.
    pub fn edit<L>(&self, lens: L, value: L::Value) -> FormResult<()>
    where
        L: FieldLens<QuoteForm>,
    {
        self.engine.set(lens, value)?;
        self.surface.clear_field_error(lens.key());
        Ok(())
    }

    pub fn clear_field_error<L>(&self, lens: L) -> FormResult<()>
    where
        L: FieldLens<QuoteForm>,
    {
        self.engine.clear_field_errors(lens)?;
        self.surface.clear_field_error(lens.key());
        Ok(())
    }

    /// Blur check for the email field: flags a non-empty malformed address
    /// right away, clears otherwise.
    pub fn email_blurred(&self) -> FormResult<()> {
        let lens = QuoteForm::fields().email();
        self.engine.touch(lens)?;
        let value = self.engine.model()?.email;
        self.apply_blur_check(lens, rules::email_format_violation(&value))
    }

    /// Blur check for the optional phone field.
    pub fn phone_blurred(&self) -> FormResult<()> {
        let lens = QuoteForm::fields().phone();
        self.engine.touch(lens)?;
        let value = self.engine.model()?.phone;
        self.apply_blur_check(lens, rules::phone_format_violation(&value))
    }

    fn apply_blur_check<L>(&self, lens: L, violation: Option<RuleViolation>) -> FormResult<()>
    where
        L: FieldLens<QuoteForm>,
    {
        match violation {
            Some(violation) => {
                self.engine.report_field_error(lens, violation)?;
                self.surface.show_field_error(lens.key(), violation.message());
            }
            None => {
                self.engine.clear_field_errors(lens)?;
                self.surface.clear_field_error(lens.key());
            }
        }
        Ok(())
    }

    /// Runs the full validation pass and either simulates a successful
    /// submission or renders the errors inline.
    ///
    /// Success: captures a timestamped [`SubmissionRecord`], shows the
    /// notice, hides the form, resets every field to fresh defaults and
    /// restores the trigger. The returned dismissal effect takes the notice
    /// down after [`QuoteFormOptions::notice_duration`]. Nothing is
    /// transmitted; see [`SubmissionSink`](super::SubmissionSink).
    ///
    /// Failure: one message per invalid field, scrolled to the first, and
    /// the form stays up.
    pub fn submit(&self) -> FormResult<SubmitOutcome> {
        self.engine.submit(|_model| Ok(()))?;

        if self.engine.submit_state()? != SubmitState::Succeeded {
            let errors = self.field_errors()?;
            for (key, message) in &errors {
                self.surface.show_field_error(*key, message.clone());
            }
            if let Some(first) = self.engine.first_error()? {
                self.surface.scroll_to_field(first);
            }
            tracing::debug!(error_count = errors.len(), "quote request rejected");
            return Ok(SubmitOutcome::Rejected { errors });
        }

        let record = SubmissionRecord::capture(&self.engine.model()?);
        tracing::info!(
            country = %record.country,
            travel_date = %record.travel_date,
            "quote request accepted"
        );

        self.surface.show_success_notice(&self.options.notice);
        self.surface.hide_form();
        self.surface.show_trigger();
        self.surface.clear_all_field_errors();
        self.engine.reset_to(QuoteForm::fresh())?;
        self.set_visibility(Visibility::Hidden)?;

        let surface = self.surface.clone();
        let dismissal = ScheduledEffect::new(self.options.notice_duration, move || {
            if !surface.dismiss_success_notice() {
                tracing::trace!("success notice already gone, skipping dismissal");
            }
        });
        Ok(SubmitOutcome::Accepted { record, dismissal })
    }

    /// Cancels out of the form: panel hidden, trigger restored and scrolled
    /// back to, all values and errors reset.
    pub fn close(&self) -> FormResult<()> {
        self.surface.hide_form();
        self.surface.show_trigger();
        self.surface.clear_all_field_errors();
        self.engine.reset_to(QuoteForm::fresh())?;
        self.surface.scroll_to_trigger();
        self.set_visibility(Visibility::Hidden)?;
        tracing::debug!("quote form closed");
        Ok(())
    }

    fn set_visibility(&self, next: Visibility) -> FormResult<()> {
        *self
            .visibility
            .write()
            .map_err(|_| FormError::StatePoisoned("updating form visibility"))? = next;
        Ok(())
    }
}
