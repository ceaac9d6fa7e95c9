use std::task::Poll;

use crate::contact::endpoint::{SubmitEndpoint, Ticket};
use crate::foundation::error::{ScuderiaError, ScuderiaResult};

/// One of the four contact fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }
}

/// In-memory form contents. All four fields are required.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactDraft {
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        };
        *slot = value.into();
    }

    /// `true` when every field is empty.
    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.field(*f).is_empty())
    }

    /// Required-field and email-shape checks.
    pub fn validate(&self) -> ScuderiaResult<()> {
        for f in Field::ALL {
            if self.field(f).trim().is_empty() {
                return Err(ScuderiaError::validation(format!(
                    "contact field '{}' is required",
                    f.as_str()
                )));
            }
        }
        if !is_email(&self.email) {
            return Err(ScuderiaError::validation(format!(
                "'{}' is not an email address",
                self.email.trim()
            )));
        }
        Ok(())
    }
}

fn is_email(s: &str) -> bool {
    let s = s.trim();
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    match s.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

/// Outcome of the most recent submission.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Sent,
    Failed(String),
}

/// Contact form controller.
///
/// `submit` hands the draft to the endpoint and `tick` polls it once per frame. After
/// `dispose` the form is inert: late completions never touch the draft or status.
#[derive(Debug)]
pub struct ContactForm<E> {
    endpoint: E,
    draft: ContactDraft,
    status: SubmitStatus,
    in_flight: Option<Ticket>,
    disposed: bool,
}

impl<E: SubmitEndpoint> ContactForm<E> {
    pub fn new(endpoint: E) -> Self {
        Self {
            endpoint,
            draft: ContactDraft::default(),
            status: SubmitStatus::Idle,
            in_flight: None,
            disposed: false,
        }
    }

    pub fn draft(&self) -> &ContactDraft {
        &self.draft
    }

    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        if self.disposed {
            return;
        }
        self.draft.set(field, value);
    }

    /// Validate the draft and start delivery.
    ///
    /// Ignored after `dispose`. Rejected while a previous submission is in flight.
    pub fn submit(&mut self, now_ms: f64) -> ScuderiaResult<()> {
        if self.disposed {
            tracing::debug!("submit ignored on disposed contact form");
            return Ok(());
        }
        if self.in_flight.is_some() {
            return Err(ScuderiaError::state("a submission is already in flight"));
        }
        self.draft.validate()?;
        let ticket = self.endpoint.begin(&self.draft, now_ms)?;
        self.in_flight = Some(ticket);
        self.status = SubmitStatus::Submitting;
        tracing::debug!(ticket = ticket.0, now_ms, "contact submission started");
        Ok(())
    }

    /// Poll the in-flight submission, if any.
    pub fn tick(&mut self, now_ms: f64) -> &SubmitStatus {
        if self.disposed {
            return &self.status;
        }
        let Some(ticket) = self.in_flight else {
            return &self.status;
        };
        match self.endpoint.poll(ticket, now_ms) {
            Poll::Pending => {}
            Poll::Ready(Ok(())) => {
                self.in_flight = None;
                self.draft = ContactDraft::default();
                self.status = SubmitStatus::Sent;
            }
            Poll::Ready(Err(e)) => {
                self.in_flight = None;
                tracing::warn!(error = %e, "contact submission failed");
                self.status = SubmitStatus::Failed(e.to_string());
            }
        }
        &self.status
    }

    /// Cancel any in-flight delivery and ignore every later call.
    pub fn dispose(&mut self) {
        if let Some(ticket) = self.in_flight.take() {
            self.endpoint.cancel(ticket);
        }
        self.disposed = true;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/contact/form.rs"]
mod tests;
