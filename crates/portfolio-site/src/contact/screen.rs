//! Contact screen state.
//!
//! The screen owns the form, its validation errors and the submission outcome.
//! A submit is split in two so a UI can render the Sending state while the
//! request is in flight:
//!
//! ```text
//! begin_submit() -> Some(ticket) -> relay.submit(ticket.form()) -> finish_submit(ticket, outcome)
//! ```
//!
//! Tickets carry a generation number; finishing with a ticket from an older
//! attempt is ignored.

use super::submission::{ContactRelay, SEND_FAILED_FALLBACK, SubmissionOutcome};
use super::{ContactForm, FormField, ValidationErrors, validate};

const LABEL_SENDING: &str = "Sending...";
const LABEL_SENT: &str = "Message Sent ✅";
const LABEL_IDLE: &str = "Send Message";

/// Proof that a submit attempt started, with the payload to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionTicket {
    generation: u64,
    form: ContactForm,
}

impl SubmissionTicket {
    /// Form snapshot taken when the attempt started.
    #[must_use]
    pub const fn form(&self) -> &ContactForm {
        &self.form
    }
}

/// Local state behind the contact form.
#[derive(Debug, Clone, Default)]
pub struct ContactScreen {
    form: ContactForm,
    errors: ValidationErrors,
    outcome: SubmissionOutcome,
    generation: u64,
}

impl ContactScreen {
    /// Empty form, no errors, idle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current field values.
    #[must_use]
    pub const fn form(&self) -> &ContactForm {
        &self.form
    }

    /// Errors from the last submit attempt.
    #[must_use]
    pub const fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Outcome of the latest attempt.
    #[must_use]
    pub const fn outcome(&self) -> &SubmissionOutcome {
        &self.outcome
    }

    /// Replace one field value.
    pub fn edit(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Validate and, if the form passes, enter Sending.
    ///
    /// Returns `None` and stores the errors when validation fails; the error
    /// banner is cleared either way.
    pub fn begin_submit(&mut self) -> Option<SubmissionTicket> {
        if self.outcome.banner().is_some() {
            self.outcome = SubmissionOutcome::Idle;
        }

        let errors = validate(&self.form);
        if !errors.is_empty() {
            self.errors = errors;
            return None;
        }

        self.errors = ValidationErrors::default();
        self.outcome = SubmissionOutcome::Sending;
        self.generation += 1;
        Some(SubmissionTicket {
            generation: self.generation,
            form: self.form.clone(),
        })
    }

    /// Apply the outcome of the attempt behind `ticket`.
    ///
    /// Returns `false` and leaves state untouched when a newer attempt has
    /// started or the screen was reset since. An unsettled outcome is treated
    /// as a server failure so the screen never stays in Sending.
    pub fn finish_submit(&mut self, ticket: &SubmissionTicket, outcome: SubmissionOutcome) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.outcome = if outcome.is_settled() {
            outcome
        } else {
            SubmissionOutcome::ServerError(SEND_FAILED_FALLBACK.to_owned())
        };
        if self.outcome == SubmissionOutcome::Sent {
            self.form.clear();
        }
        true
    }

    /// Validate, send through `relay` and apply the result.
    pub async fn submit(&mut self, relay: &dyn ContactRelay) -> &SubmissionOutcome {
        if let Some(ticket) = self.begin_submit() {
            let outcome = relay.submit(ticket.form()).await;
            self.finish_submit(&ticket, outcome);
        }
        &self.outcome
    }

    /// Return to an empty idle screen, invalidating any in-flight ticket.
    pub fn reset(&mut self) {
        self.form.clear();
        self.errors = ValidationErrors::default();
        self.outcome = SubmissionOutcome::Idle;
        self.generation += 1;
    }

    /// Submit button label.
    #[must_use]
    pub const fn submit_label(&self) -> &'static str {
        match self.outcome {
            SubmissionOutcome::Sending => LABEL_SENDING,
            SubmissionOutcome::Sent => LABEL_SENT,
            _ => LABEL_IDLE,
        }
    }

    /// Whether the submit button accepts clicks.
    #[must_use]
    pub const fn is_submit_enabled(&self) -> bool {
        !matches!(self.outcome, SubmissionOutcome::Sending)
    }

    /// Server or network error to show above the button.
    #[must_use]
    pub fn banner(&self) -> Option<&str> {
        self.outcome.banner()
    }

    /// Inline error for `field`.
    #[must_use]
    pub fn field_error(&self, field: FormField) -> Option<&'static str> {
        self.errors.get(field)
    }
}
