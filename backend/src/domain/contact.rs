//! Contact submissions accepted by the relay.
//!
//! The browser validates the form before posting, but the relay is reachable
//! directly, so it runs its own coarse check: each field must be present and
//! truthy. Whitespace-only text passes here; only the browser trims.

use serde_json::{Map, Value};

/// Field names the relay requires, in reporting order.
pub const REQUIRED_FIELDS: [&str; 3] = ["name", "email", "message"];

/// Rejection raised when one or more required fields are absent or falsy.
///
/// The display text is the plain-text body returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Missing required fields")]
pub struct MissingFields {
    fields: Vec<&'static str>,
}

impl MissingFields {
    /// Names of the fields that failed the check.
    #[must_use]
    pub fn fields(&self) -> &[&'static str] {
        &self.fields
    }
}

/// A contact message that passed the relay's required-field check.
///
/// ## Invariants
/// - `name`, `email` and `message` are non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    name: String,
    email: String,
    message: String,
}

impl ContactSubmission {
    /// Build a submission from a raw request body.
    ///
    /// A body that is not a JSON object is treated as `{}` so the caller sees
    /// the same rejection as for an object with every field missing.
    ///
    /// # Examples
    /// ```
    /// use portfolio_backend::domain::ContactSubmission;
    ///
    /// let body = br#"{"name":"A","email":"a@b.com","message":"hi"}"#;
    /// let submission = ContactSubmission::from_json_body(body).expect("valid body");
    /// assert_eq!(submission.name(), "A");
    ///
    /// let missing = ContactSubmission::from_json_body(b"not json").unwrap_err();
    /// assert_eq!(missing.fields(), ["name", "email", "message"]);
    /// ```
    ///
    /// # Errors
    /// Returns [`MissingFields`] when any required field is falsy.
    pub fn from_json_body(body: &[u8]) -> Result<Self, MissingFields> {
        let fields = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        Self::from_fields(&fields)
    }

    /// Build a submission from an already decoded JSON object.
    ///
    /// # Errors
    /// Returns [`MissingFields`] when any required field is falsy.
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, MissingFields> {
        let [name, email, message] = REQUIRED_FIELDS.map(|key| truthy_text(fields.get(key)));
        match (name, email, message) {
            (Some(name), Some(email), Some(message)) => Ok(Self {
                name,
                email,
                message,
            }),
            (name, email, message) => {
                let present = [name.is_some(), email.is_some(), message.is_some()];
                let fields = REQUIRED_FIELDS
                    .into_iter()
                    .zip(present)
                    .filter_map(|(key, ok)| (!ok).then_some(key))
                    .collect();
                Err(MissingFields { fields })
            }
        }
    }

    /// Submitter's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Submitter's reply address, as typed.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Text form of a truthy JSON scalar; `None` for falsy or structured values.
fn truthy_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) if number.as_f64().is_some_and(|n| n != 0.0) => {
            Some(number.to_string())
        }
        Value::Bool(true) => Some("true".to_owned()),
        _ => None,
    }
}
