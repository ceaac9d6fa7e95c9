use super::*;

use crate::contact::endpoint::{SimulatedEndpoint, SubmitError};

fn filled<E: SubmitEndpoint>(form: &mut ContactForm<E>) {
    form.set_field(Field::Name, "Ada");
    form.set_field(Field::Email, "ada@example.com");
    form.set_field(Field::Subject, "Collab");
    form.set_field(Field::Message, "Let's build something fast.");
}

struct FailingEndpoint;

impl SubmitEndpoint for FailingEndpoint {
    fn begin(&mut self, _draft: &ContactDraft, _now_ms: f64) -> ScuderiaResult<Ticket> {
        Ok(Ticket(7))
    }

    fn poll(&mut self, _ticket: Ticket, _now_ms: f64) -> Poll<Result<(), SubmitError>> {
        Poll::Ready(Err(SubmitError::Network("connection reset".into())))
    }

    fn cancel(&mut self, _ticket: Ticket) {}
}

#[test]
fn successful_submit_clears_fields_after_delay() {
    let mut form = ContactForm::new(SimulatedEndpoint::default());
    filled(&mut form);
    form.submit(1000.0).unwrap();
    assert!(form.is_submitting());
    assert_eq!(form.status(), &SubmitStatus::Submitting);

    form.tick(2999.0);
    assert!(form.is_submitting());
    assert_eq!(form.draft().name, "Ada");

    form.tick(3000.0 + 1e-6);
    assert!(!form.is_submitting());
    assert!(form.draft().is_empty());
    assert_eq!(form.status(), &SubmitStatus::Sent);
    assert_eq!(form.endpoint().delivered(), 1);
}

#[test]
fn second_submit_while_in_flight_is_rejected() {
    let mut form = ContactForm::new(SimulatedEndpoint::default());
    filled(&mut form);
    form.submit(0.0).unwrap();
    let err = form.submit(10.0).unwrap_err();
    assert!(matches!(err, ScuderiaError::State(_)));
    assert_eq!(form.endpoint().in_flight(), 1);
}

#[test]
fn blank_fields_are_rejected() {
    let mut form = ContactForm::new(SimulatedEndpoint::default());
    filled(&mut form);
    form.set_field(Field::Subject, "   ");
    let err = form.submit(0.0).unwrap_err();
    assert!(err.to_string().contains("subject"));
    assert!(!form.is_submitting());
    assert_eq!(form.status(), &SubmitStatus::Idle);
}

#[test]
fn email_shape_is_checked() {
    let mut d = ContactDraft {
        name: "a".into(),
        email: "a@b".into(),
        subject: "s".into(),
        message: "m".into(),
    };
    assert!(d.validate().is_ok());
    for bad in ["ab", "@b", "a@", "a b@c", "a@b@c"] {
        d.email = bad.into();
        assert!(d.validate().is_err(), "{bad}");
    }
}

#[test]
fn failed_delivery_keeps_draft() {
    let mut form = ContactForm::new(FailingEndpoint);
    filled(&mut form);
    form.submit(0.0).unwrap();
    let status = form.tick(16.0).clone();
    assert_eq!(
        status,
        SubmitStatus::Failed("network error: connection reset".into())
    );
    assert!(!form.is_submitting());
    assert_eq!(form.draft().email, "ada@example.com");

    // A retry is allowed once the failure is surfaced.
    assert!(form.submit(20.0).is_ok());
}

#[test]
fn dispose_mid_delay_ignores_late_completion() {
    let mut form = ContactForm::new(SimulatedEndpoint::default());
    filled(&mut form);
    form.submit(0.0).unwrap();
    form.tick(1000.0);
    form.dispose();
    assert!(form.is_disposed());
    assert_eq!(form.endpoint().in_flight(), 0);

    form.tick(5000.0);
    assert_eq!(form.draft().name, "Ada");
    assert_ne!(form.status(), &SubmitStatus::Sent);
    assert_eq!(form.endpoint().delivered(), 0);

    form.set_field(Field::Name, "Grace");
    assert_eq!(form.draft().name, "Ada");
    assert!(form.submit(6000.0).is_ok());
    assert!(!form.is_submitting());
}
