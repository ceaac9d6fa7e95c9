use super::*;

fn draft() -> ContactDraft {
    ContactDraft {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        subject: "Hello".into(),
        message: "Nice car.".into(),
    }
}

#[test]
fn simulated_endpoint_completes_after_delay() {
    let mut ep = SimulatedEndpoint::default();
    assert_eq!(ep.delay_ms(), 2000.0);
    let t = ep.begin(&draft(), 100.0).unwrap();
    assert_eq!(ep.poll(t, 100.0), Poll::Pending);
    assert_eq!(ep.poll(t, 2099.0), Poll::Pending);
    assert_eq!(ep.poll(t, 2100.0), Poll::Ready(Ok(())));
    assert_eq!(ep.delivered(), 1);
    assert_eq!(ep.in_flight(), 0);
}

#[test]
fn tickets_are_distinct() {
    let mut ep = SimulatedEndpoint::new(10.0).unwrap();
    let a = ep.begin(&draft(), 0.0).unwrap();
    let b = ep.begin(&draft(), 0.0).unwrap();
    assert_ne!(a, b);
    assert_eq!(ep.in_flight(), 2);
}

#[test]
fn cancelled_ticket_is_unknown() {
    let mut ep = SimulatedEndpoint::new(10.0).unwrap();
    let t = ep.begin(&draft(), 0.0).unwrap();
    ep.cancel(t);
    assert!(matches!(
        ep.poll(t, 50.0),
        Poll::Ready(Err(SubmitError::Rejected(_)))
    ));
    assert_eq!(ep.delivered(), 0);
}

#[test]
fn rejects_bad_delay() {
    assert!(SimulatedEndpoint::new(-1.0).is_err());
    assert!(SimulatedEndpoint::new(f64::NAN).is_err());
}

#[test]
fn boxed_endpoint_forwards() {
    let mut ep: Box<dyn SubmitEndpoint> = Box::new(SimulatedEndpoint::new(0.0).unwrap());
    let t = ep.begin(&draft(), 5.0).unwrap();
    assert_eq!(ep.poll(t, 5.0), Poll::Ready(Ok(())));
}
