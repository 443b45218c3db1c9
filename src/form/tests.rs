use super::*;
use futures::executor::block_on;
use std::borrow::Cow;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Clone, Debug, Eq, PartialEq)]
struct TestError(&'static str);

impl ValidationError for TestError {
    fn message(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.0)
    }
}

#[allow(dead_code)]
#[derive(Clone, tripquote_derive::FormModel)]
struct BookingForm {
    email: String,
    nights: String,
    arrival_notes: String,
}

fn base_form() -> BookingForm {
    BookingForm {
        email: "guest@example.com".into(),
        nights: "3".into(),
        arrival_notes: String::new(),
    }
}

fn require_non_empty(
    message: &'static str,
) -> impl for<'a> Fn(&'a BookingForm, &'a String) -> Result<(), TestError> + Send + Sync {
    move |_model, value| {
        if value.trim().is_empty() {
            Err(TestError(message))
        } else {
            Ok(())
        }
    }
}

#[test]
fn field_lens_updates_model_and_dirty_state() {
    let controller =
        FormController::<BookingForm, TestError>::new(base_form(), FormOptions::default());
    let fields = BookingForm::fields();

    controller
        .set(fields.email(), "changed@example.com".into())
        .expect("set must succeed");
    let snapshot = controller.snapshot().expect("snapshot must succeed");
    assert!(snapshot.is_dirty);
    assert_eq!(snapshot.model.email, "changed@example.com");

    let email_meta = snapshot
        .field_meta
        .get(&fields.email().key())
        .expect("email meta should exist");
    assert!(email_meta.dirty);
}

#[test]
fn validation_mode_controls_when_errors_appear() {
    let fields = BookingForm::fields();
    let on_change = FormController::<BookingForm, TestError>::new(
        base_form(),
        FormOptions {
            validate_mode: ValidationMode::OnChange,
            ..FormOptions::default()
        },
    );
    on_change
        .register_field_validator(fields.email(), require_non_empty("required"))
        .expect("register validator");
    on_change
        .set(fields.email(), "".into())
        .expect("set should trigger validation");
    assert_eq!(
        on_change
            .snapshot()
            .expect("snapshot")
            .field_meta
            .get(&fields.email().key())
            .expect("field meta")
            .errors
            .len(),
        1
    );

    let on_submit = FormController::<BookingForm, TestError>::new(
        base_form(),
        FormOptions::default(),
    );
    on_submit
        .register_field_validator(fields.email(), require_non_empty("required"))
        .expect("register validator");
    on_submit
        .set(fields.email(), "".into())
        .expect("set should not trigger validation immediately");
    assert!(
        on_submit
            .snapshot()
            .expect("snapshot")
            .field_meta
            .get(&fields.email().key())
            .is_some_and(|meta| meta.errors.is_empty())
    );
    assert!(!on_submit.validate_form().expect("validate form"));
}

#[test]
fn validate_form_reports_every_failing_field_at_once() {
    let fields = BookingForm::fields();
    let controller =
        FormController::<BookingForm, TestError>::new(base_form(), FormOptions::default());
    controller
        .register_field_validator(fields.email(), require_non_empty("email required"))
        .expect("register email validator");
    controller
        .register_field_validator(fields.nights(), require_non_empty("nights required"))
        .expect("register nights validator");

    controller
        .set(fields.email(), "".into())
        .expect("blank email");
    controller
        .set(fields.nights(), "".into())
        .expect("blank nights");

    assert!(!controller.validate_form().expect("validate form"));
    let snapshot = controller.snapshot().expect("snapshot");
    assert_eq!(
        snapshot
            .field_meta
            .get(&fields.email().key())
            .expect("email meta")
            .errors,
        vec![TestError("email required")]
    );
    assert_eq!(
        snapshot
            .field_meta
            .get(&fields.nights().key())
            .expect("nights meta")
            .errors,
        vec![TestError("nights required")]
    );
}

#[test]
fn first_error_follows_declaration_order() {
    let fields = BookingForm::fields();
    let controller =
        FormController::<BookingForm, TestError>::new(base_form(), FormOptions::default());
    controller
        .register_field_validator(fields.nights(), require_non_empty("nights required"))
        .expect("register nights validator");
    controller
        .register_field_validator(fields.arrival_notes(), require_non_empty("arrival_notes required"))
        .expect("register arrival_notes validator");

    controller
        .set(fields.nights(), "".into())
        .expect("blank nights");
    assert!(!controller.validate_form().expect("validate form"));

    // "nights" sorts after "arrival_notes" alphabetically but is declared first.
    assert_eq!(
        controller.first_error().expect("first error"),
        Some(fields.nights().key())
    );
}

#[test]
fn editing_a_field_clears_only_its_own_error() {
    let fields = BookingForm::fields();
    let controller =
        FormController::<BookingForm, TestError>::new(base_form(), FormOptions::default());
    controller
        .register_field_validator(fields.email(), require_non_empty("email required"))
        .expect("register email validator");
    controller
        .register_field_validator(fields.arrival_notes(), require_non_empty("arrival_notes required"))
        .expect("register arrival_notes validator");

    controller
        .set(fields.email(), "".into())
        .expect("blank email");
    assert!(!controller.validate_form().expect("validate form"));

    controller
        .set(fields.email(), "fixed@example.com".into())
        .expect("edit clears error");
    let snapshot = controller.snapshot().expect("snapshot");
    assert!(
        snapshot
            .field_meta
            .get(&fields.email().key())
            .is_some_and(|meta| meta.errors.is_empty())
    );
    assert_eq!(
        snapshot
            .field_meta
            .get(&fields.arrival_notes().key())
            .expect("arrival_notes meta")
            .errors,
        vec![TestError("arrival_notes required")]
    );
}

#[test]
fn submit_state_transitions_are_enforced() {
    let fields = BookingForm::fields();
    let controller =
        FormController::<BookingForm, TestError>::new(base_form(), FormOptions::default());
    controller
        .register_field_validator(fields.email(), require_non_empty("required"))
        .expect("register validator");

    let submit_count = Arc::new(AtomicUsize::new(0));

    controller
        .set(fields.email(), "".into())
        .expect("set invalid email");
    {
        let submit_count = submit_count.clone();
        controller
            .submit(move |_model| {
                submit_count.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .expect("submit should return Ok when validation fails");
    }
    assert_eq!(submit_count.load(Ordering::SeqCst), 0);
    assert_eq!(
        controller.submit_state().expect("submit state"),
        SubmitState::Failed
    );

    controller
        .set(fields.email(), "valid@example.com".into())
        .expect("set valid email");
    {
        let submit_count = submit_count.clone();
        controller
            .submit(move |_model| {
                submit_count.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .expect("submit should succeed");
    }
    assert_eq!(submit_count.load(Ordering::SeqCst), 1);
    assert_eq!(
        controller.submit_state().expect("submit state"),
        SubmitState::Succeeded
    );
}

#[test]
fn submit_async_drives_the_same_state_machine() {
    let fields = BookingForm::fields();
    let controller =
        FormController::<BookingForm, TestError>::new(base_form(), FormOptions::default());
    controller
        .register_field_validator(fields.email(), require_non_empty("required"))
        .expect("register validator");

    block_on(controller.submit_async(|_model| async { Ok(()) })).expect("async submit");
    assert_eq!(
        controller.submit_state().expect("submit state"),
        SubmitState::Succeeded
    );

    controller
        .set(fields.email(), "".into())
        .expect("set invalid email");
    block_on(controller.submit_async(|_model| async { Ok(()) }))
        .expect("async submit returns Ok on validation failure");
    assert_eq!(
        controller.submit_state().expect("submit state"),
        SubmitState::Failed
    );
}

#[test]
fn reset_to_installs_a_new_baseline() {
    let fields = BookingForm::fields();
    let controller =
        FormController::<BookingForm, TestError>::new(base_form(), FormOptions::default());

    controller
        .set(fields.email(), "dirty@example.com".into())
        .expect("set dirty value");
    controller
        .reset_to(BookingForm {
            email: "fresh@example.com".into(),
            nights: "7".into(),
            arrival_notes: String::new(),
        })
        .expect("reset to fresh model");

    let snapshot = controller.snapshot().expect("snapshot");
    assert_eq!(snapshot.model.email, "fresh@example.com");
    assert_eq!(snapshot.model.nights, "7");
    assert!(!snapshot.is_dirty);
    assert_eq!(snapshot.submit_state, SubmitState::Idle);

    // The fresh model is the new dirty baseline.
    controller
        .set(fields.nights(), "7".into())
        .expect("set equal value");
    assert!(!controller.snapshot().expect("snapshot").is_dirty);

    controller
        .set(fields.email(), "other@example.com".into())
        .expect("set dirty value");
    controller
        .reset_to_initial()
        .expect("reset to current baseline");
    assert_eq!(
        controller.snapshot().expect("snapshot").model.email,
        "fresh@example.com"
    );
}

#[test]
fn each_controller_gets_a_distinct_form_id() {
    let first = FormController::<BookingForm, TestError>::new(base_form(), FormOptions::default());
    let second = FormController::<BookingForm, TestError>::new(base_form(), FormOptions::default());
    assert_ne!(
        first.form_id().expect("first id"),
        second.form_id().expect("second id")
    );
}

#[test]
fn form_level_validators_attach_errors_to_fields() {
    let fields = BookingForm::fields();
    let controller =
        FormController::<BookingForm, TestError>::new(base_form(), FormOptions::default());
    controller
        .register_form_validator(move |model: &BookingForm| {
            if model.nights == "0" && model.arrival_notes.trim().is_empty() {
                vec![(
                    fields.arrival_notes().key(),
                    TestError("explain the zero-night stay"),
                )]
            } else {
                Vec::new()
            }
        })
        .expect("register form validator");

    controller
        .set(fields.nights(), "0".into())
        .expect("set nights");
    assert!(!controller.validate_form().expect("validate form"));
    assert_eq!(
        controller
            .field_meta(fields.arrival_notes())
            .expect("meta")
            .expect("meta exists")
            .errors,
        vec![TestError("explain the zero-night stay")]
    );

    controller.clear_errors().expect("clear all errors");
    assert_eq!(controller.first_error().expect("first error"), None);
    assert!(
        controller
            .field_meta(fields.arrival_notes())
            .expect("meta")
            .expect("meta exists")
            .errors
            .is_empty()
    );
}

#[test]
fn reported_errors_clear_like_validated_ones() {
    let fields = BookingForm::fields();
    let controller =
        FormController::<BookingForm, TestError>::new(base_form(), FormOptions::default());

    controller
        .report_field_error(fields.email(), TestError("server says no"))
        .expect("report error");
    assert_eq!(
        controller.first_error().expect("first error"),
        Some(fields.email().key())
    );

    controller
        .clear_field_errors(fields.email())
        .expect("clear field errors");
    assert_eq!(controller.first_error().expect("first error"), None);
}

#[test]
fn reset_field_and_clear_errors_are_consistent() {
    let fields = BookingForm::fields();
    let controller = FormController::<BookingForm, TestError>::new(
        base_form(),
        FormOptions {
            validate_mode: ValidationMode::OnChange,
            ..FormOptions::default()
        },
    );

    controller
        .register_field_validator(fields.email(), require_non_empty("required"))
        .expect("register validator");
    controller
        .set(fields.email(), "".into())
        .expect("set invalid value");
    controller
        .clear_field_errors(fields.email())
        .expect("clear field errors");
    assert!(
        controller
            .field_meta(fields.email())
            .expect("meta")
            .expect("meta exists")
            .errors
            .is_empty()
    );

    controller
        .set(fields.email(), "dirty@example.com".into())
        .expect("set dirty value");
    controller.reset_field(fields.email()).expect("reset field");
    let snapshot = controller.snapshot().expect("snapshot");
    assert_eq!(snapshot.model.email, "guest@example.com");
    assert!(
        snapshot
            .field_meta
            .get(&fields.email().key())
            .is_some_and(|meta| !meta.dirty)
    );
}

#[test]
fn touch_marks_field_and_validates_in_blur_mode() {
    let fields = BookingForm::fields();
    let controller = FormController::<BookingForm, TestError>::new(
        base_form(),
        FormOptions {
            validate_mode: ValidationMode::OnBlur,
            ..FormOptions::default()
        },
    );
    controller
        .register_field_validator(fields.arrival_notes(), require_non_empty("required"))
        .expect("register validator");

    controller.touch(fields.arrival_notes()).expect("touch field");
    let meta = controller
        .field_meta(fields.arrival_notes())
        .expect("meta")
        .expect("meta exists");
    assert!(meta.touched);
    assert_eq!(meta.errors, vec![TestError("required")]);
}

#[test]
fn derive_macro_generates_field_lenses_and_order() {
    let fields = BookingForm::fields();
    assert_eq!(fields.email().key().as_str(), "email");
    assert_eq!(fields.arrival_notes().key().as_str(), "arrival_notes");
    assert_eq!(
        BookingForm::field_keys(),
        &[
            FieldKey::new("email"),
            FieldKey::new("nights"),
            FieldKey::new("arrival_notes"),
        ]
    );
}
