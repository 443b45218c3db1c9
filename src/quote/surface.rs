use std::borrow::Cow;

use crate::form::FieldKey;

/// The page the controller drives: form panel, trigger controls, inline
/// error slots, success notice, scrolling and focus. Implementations own
/// the actual rendering; the controller only pushes state at them.
///
/// Delayed effects may fire after the page has moved on, so the two
/// operations a timer can reach ([`focus_field`](Self::focus_field) and
/// [`dismiss_success_notice`](Self::dismiss_success_notice)) report whether
/// their target still existed; callers treat `false` as a completed no-op.
pub trait FormSurface: Send + Sync + 'static {
    fn show_form(&self);
    fn hide_form(&self);
    fn show_trigger(&self);
    fn hide_trigger(&self);

    fn scroll_to_form(&self);
    fn scroll_to_trigger(&self);
    fn scroll_to_field(&self, key: FieldKey);

    fn focus_field(&self, key: FieldKey) -> bool;

    /// Replaces any previous message for the field and marks it invalid.
    fn show_field_error(&self, key: FieldKey, message: Cow<'static, str>);
    fn clear_field_error(&self, key: FieldKey);
    fn clear_all_field_errors(&self);

    fn show_success_notice(&self, notice: &SuccessNotice);
    fn dismiss_success_notice(&self) -> bool;
}

/// Copy shown after a successful submit.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SuccessNotice {
    pub title: Cow<'static, str>,
    pub body: Cow<'static, str>,
}

impl SuccessNotice {
    pub fn new(title: impl Into<Cow<'static, str>>, body: impl Into<Cow<'static, str>>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn title(mut self, value: impl Into<Cow<'static, str>>) -> Self {
        self.title = value.into();
        self
    }

    pub fn body(mut self, value: impl Into<Cow<'static, str>>) -> Self {
        self.body = value.into();
        self
    }
}

impl Default for SuccessNotice {
    fn default() -> Self {
        Self::new(
            "Safari Plan Request Submitted!",
            "Thank you for your interest! Our safari experts are already working on \
             your personalized itinerary. You'll receive it via email within 24 hours.",
        )
    }
}
