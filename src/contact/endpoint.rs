use std::task::Poll;

use crate::contact::form::ContactDraft;
use crate::foundation::error::{ScuderiaError, ScuderiaResult};

/// Handle for one in-flight delivery.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ticket(pub u64);

/// Delivery failure reported by an endpoint.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum SubmitError {
    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(String),
    /// The receiving side refused the message.
    #[error("rejected: {0}")]
    Rejected(String),
}

/// Outbound seam for contact-form delivery.
///
/// Delivery is modelled as begin/poll so it can be driven from the frame loop with caller
/// timestamps. `cancel` must make the ticket unknown to later `poll` calls.
pub trait SubmitEndpoint {
    fn begin(&mut self, draft: &ContactDraft, now_ms: f64) -> ScuderiaResult<Ticket>;

    fn poll(&mut self, ticket: Ticket, now_ms: f64) -> Poll<Result<(), SubmitError>>;

    fn cancel(&mut self, ticket: Ticket);
}

impl<E: SubmitEndpoint + ?Sized> SubmitEndpoint for Box<E> {
    fn begin(&mut self, draft: &ContactDraft, now_ms: f64) -> ScuderiaResult<Ticket> {
        (**self).begin(draft, now_ms)
    }

    fn poll(&mut self, ticket: Ticket, now_ms: f64) -> Poll<Result<(), SubmitError>> {
        (**self).poll(ticket, now_ms)
    }

    fn cancel(&mut self, ticket: Ticket) {
        (**self).cancel(ticket)
    }
}

#[derive(Clone, Debug)]
struct Pending {
    ticket: Ticket,
    due_ms: f64,
    from: String,
    subject: String,
}

/// Endpoint that performs no I/O and always succeeds after a fixed delay.
#[derive(Clone, Debug)]
pub struct SimulatedEndpoint {
    delay_ms: f64,
    next_ticket: u64,
    pending: Vec<Pending>,
    delivered: u64,
}

impl SimulatedEndpoint {
    pub const DEFAULT_DELAY_MS: f64 = 2000.0;

    pub fn new(delay_ms: f64) -> ScuderiaResult<Self> {
        if !(delay_ms.is_finite() && delay_ms >= 0.0) {
            return Err(ScuderiaError::validation(
                "submit delay must be finite and >= 0",
            ));
        }
        Ok(Self {
            delay_ms,
            next_ticket: 0,
            pending: Vec::new(),
            delivered: 0,
        })
    }

    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    /// Number of messages that completed delivery.
    pub fn delivered(&self) -> u64 {
        self.delivered
    }

    /// Number of tickets still waiting on their delay.
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }
}

impl Default for SimulatedEndpoint {
    fn default() -> Self {
        Self {
            delay_ms: Self::DEFAULT_DELAY_MS,
            next_ticket: 0,
            pending: Vec::new(),
            delivered: 0,
        }
    }
}

impl SubmitEndpoint for SimulatedEndpoint {
    fn begin(&mut self, draft: &ContactDraft, now_ms: f64) -> ScuderiaResult<Ticket> {
        if !now_ms.is_finite() {
            return Err(ScuderiaError::validation("submit timestamp must be finite"));
        }
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.pending.push(Pending {
            ticket,
            due_ms: now_ms + self.delay_ms,
            from: draft.email.clone(),
            subject: draft.subject.clone(),
        });
        Ok(ticket)
    }

    fn poll(&mut self, ticket: Ticket, now_ms: f64) -> Poll<Result<(), SubmitError>> {
        let Some(i) = self.pending.iter().position(|p| p.ticket == ticket) else {
            return Poll::Ready(Err(SubmitError::Rejected(format!(
                "unknown ticket {}",
                ticket.0
            ))));
        };
        if now_ms < self.pending[i].due_ms {
            return Poll::Pending;
        }
        let done = self.pending.swap_remove(i);
        self.delivered += 1;
        tracing::info!(
            ticket = done.ticket.0,
            from = %done.from,
            subject = %done.subject,
            "contact form submitted"
        );
        Poll::Ready(Ok(()))
    }

    fn cancel(&mut self, ticket: Ticket) {
        self.pending.retain(|p| p.ticket != ticket);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/contact/endpoint.rs"]
mod tests;
