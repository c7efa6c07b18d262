//! Contact form model and validation.
//!
//! [`validate`] is the browser-side gate in front of the relay: every rule is
//! evaluated on every call and the result replaces any earlier errors.
//! Submission lives in [`submission`] and the screen state in [`screen`].

pub mod screen;
pub mod submission;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use screen::{ContactScreen, SubmissionTicket};
pub use submission::{
    ContactRelay, HttpContactRelay, SubmissionOutcome, outcome_from_response,
};

/// Error shown when the name is blank.
pub const NAME_REQUIRED: &str = "Name is required.";
/// Error shown when the email is blank.
pub const EMAIL_REQUIRED: &str = "Email is required.";
/// Error shown when the email lacks a `local@domain.tld` shape.
pub const EMAIL_INVALID: &str = "Email is invalid.";
/// Error shown when the message is blank.
pub const MESSAGE_REQUIRED: &str = "Message cannot be empty.";

/// One of the three contact form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    /// Sender's name.
    Name,
    /// Sender's address.
    Email,
    /// Message text.
    Message,
}

impl FormField {
    /// All fields in display order.
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    /// Wire and error-map key for the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

/// Raw contact form values exactly as typed.
///
/// Serialises to the relay payload `{"name", "email", "message"}` without
/// trimming.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    /// Sender's name.
    pub name: String,
    /// Sender's address.
    pub email: String,
    /// Message text.
    pub message: String,
}

impl ContactForm {
    /// Build a form from the three field values.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Current value of `field`.
    #[must_use]
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Message => &self.message,
        }
    }

    /// Replace the value of `field`.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Message => &mut self.message,
        };
        *slot = value.into();
    }

    /// Reset every field to empty.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether every field is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|field| self.value(*field).is_empty())
    }
}

/// Field-keyed validation messages. Empty means the form may be sent.
///
/// Serialises as a JSON object keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    messages: BTreeMap<FormField, &'static str>,
}

impl ValidationErrors {
    /// Message for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: FormField) -> Option<&'static str> {
        self.messages.get(&field).copied()
    }

    /// Whether no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of failed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Failed fields with their messages, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (FormField, &'static str)> + '_ {
        self.messages.iter().map(|(field, message)| (*field, *message))
    }

    fn insert(&mut self, field: FormField, message: &'static str) {
        self.messages.insert(field, message);
    }
}

/// Check `form` and report every failing field.
///
/// Blank-after-trim fields are required errors. A non-blank email must contain
/// a run of non-whitespace shaped like `local@domain.tld`; only the shape is
/// checked.
///
/// # Examples
/// ```
/// use portfolio_site::contact::{ContactForm, validate};
///
/// assert!(validate(&ContactForm::new("Ada", "ada@example.com", "Hello")).is_empty());
/// assert_eq!(validate(&ContactForm::default()).len(), 3);
/// ```
#[must_use]
pub fn validate(form: &ContactForm) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if form.name.trim().is_empty() {
        errors.insert(FormField::Name, NAME_REQUIRED);
    }

    if form.email.trim().is_empty() {
        errors.insert(FormField::Email, EMAIL_REQUIRED);
    } else if !has_email_shape(&form.email) {
        errors.insert(FormField::Email, EMAIL_INVALID);
    }

    if form.message.trim().is_empty() {
        errors.insert(FormField::Message, MESSAGE_REQUIRED);
    }

    errors
}

/// Whether `value` contains `non-space @ non-space . non-space` anywhere.
#[must_use]
pub fn has_email_shape(value: &str) -> bool {
    value.split_whitespace().any(token_has_email_shape)
}

fn token_has_email_shape(token: &str) -> bool {
    let chars: Vec<char> = token.chars().collect();
    let Some(at) = chars
        .iter()
        .skip(1)
        .position(|c| *c == '@')
        .map(|offset| offset + 1)
    else {
        return false;
    };
    let last = chars.len().saturating_sub(1);
    chars
        .iter()
        .enumerate()
        .skip(at + 2)
        .any(|(index, c)| *c == '.' && index < last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("a@b.co", true)]
    #[case::surrounded("mail me at a@b.co please", true)]
    #[case::subdomain("first.last@mail.example.org", true)]
    #[case::dot_before_at("a.b@c", false)]
    #[case::no_at("ab.co", false)]
    #[case::no_local("@b.co", false)]
    #[case::dot_adjacent_to_at("a@.co", false)]
    #[case::trailing_dot("a@b.", false)]
    #[case::split_by_space("a@b .co", false)]
    #[case::double_at("a@@b.c", true)]
    fn email_shape(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(has_email_shape(value), expected);
    }

    #[rstest]
    #[case::name_blank(ContactForm::new("   ", "a@b.co", "hi"), &[FormField::Name])]
    #[case::message_blank(ContactForm::new("Al", "a@b.co", "\n\t"), &[FormField::Message])]
    #[case::email_blank(ContactForm::new("Al", " ", "hi"), &[FormField::Email])]
    #[case::all_blank(ContactForm::default(), &FormField::ALL)]
    #[case::valid(ContactForm::new("Al", "a@b.co", "hi"), &[])]
    fn blank_fields_are_reported(#[case] form: ContactForm, #[case] expected: &[FormField]) {
        let errors = validate(&form);
        let fields: Vec<FormField> = errors.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, expected);
    }

    #[test]
    fn invalid_email_is_the_only_error() {
        let errors = validate(&ContactForm::new("Al", "bad", "hi"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(FormField::Email), Some(EMAIL_INVALID));
    }

    #[test]
    fn blank_email_reports_required_not_invalid() {
        let errors = validate(&ContactForm::new("Al", "", "hi"));
        assert_eq!(errors.get(FormField::Email), Some(EMAIL_REQUIRED));
    }

    #[test]
    fn errors_serialise_keyed_by_field() {
        let errors = validate(&ContactForm::default());
        let json = serde_json::to_value(&errors).expect("errors serialise");
        assert_eq!(
            json,
            serde_json::json!({
                "name": NAME_REQUIRED,
                "email": EMAIL_REQUIRED,
                "message": MESSAGE_REQUIRED,
            })
        );
    }

    #[test]
    fn form_serialises_untrimmed_payload() {
        let form = ContactForm::new(" Ada ", "ada@example.com", "hi ");
        let json = serde_json::to_value(&form).expect("form serialises");
        assert_eq!(
            json,
            serde_json::json!({"name": " Ada ", "email": "ada@example.com", "message": "hi "})
        );
    }

    #[test]
    fn set_and_clear_fields() {
        let mut form = ContactForm::default();
        form.set(FormField::Message, "hello");
        assert_eq!(form.value(FormField::Message), "hello");
        form.clear();
        assert!(form.is_empty());
    }
}
