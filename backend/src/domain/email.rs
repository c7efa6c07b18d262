//! Outbound email composition.
//!
//! The envelope sender is always the operator mailbox so the SMTP provider's
//! sender verification passes; the submitter only appears as the display name
//! and inside the body.

/// Operator-controlled addresses used for every relayed message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MailRouting {
    /// Envelope sender address (the authenticated SMTP account).
    pub sender_address: String,
    /// Destination mailbox that receives contact messages.
    pub recipient_address: String,
}

/// How submitted text is embedded in the HTML part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HtmlBodyPolicy {
    /// Interpolate submitted text as-is. Markup in the message is rendered by
    /// the recipient's mail client.
    #[default]
    Verbatim,
    /// Escape `&`, `<`, `>`, `"` and `'` before interpolation.
    Escaped,
}

/// A message ready to hand to a [`crate::domain::ports::MailTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Display name on the `From` header; the submitter's name.
    pub from_display_name: String,
    /// Address on the `From` header; the operator mailbox.
    pub from_envelope_address: String,
    /// Destination address.
    pub to_address: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text part.
    pub text_body: String,
    /// HTML part.
    pub html_body: String,
}

impl EmailMessage {
    /// Compose the relay email for one submission.
    ///
    /// # Examples
    /// ```
    /// use portfolio_backend::domain::{
    ///     ContactSubmission, EmailMessage, HtmlBodyPolicy, MailRouting,
    /// };
    ///
    /// let submission = ContactSubmission::from_json_body(
    ///     br#"{"name":"A","email":"a@b.com","message":"hi"}"#,
    /// )
    /// .expect("valid body");
    /// let routing = MailRouting {
    ///     sender_address: "relay@example.com".into(),
    ///     recipient_address: "owner@example.com".into(),
    /// };
    /// let email = EmailMessage::compose(&submission, &routing, HtmlBodyPolicy::Verbatim);
    /// assert_eq!(email.subject, "Portfolio contact from A");
    /// assert_eq!(email.text_body, "From: A <a@b.com>\n\nhi");
    /// ```
    #[must_use]
    pub fn compose(
        submission: &crate::domain::ContactSubmission,
        routing: &MailRouting,
        policy: HtmlBodyPolicy,
    ) -> Self {
        let name = submission.name();
        let email = submission.email();
        let message = submission.message();

        let html_body = {
            let (name, email, message) = match policy {
                HtmlBodyPolicy::Verbatim => (name.to_owned(), email.to_owned(), message.to_owned()),
                HtmlBodyPolicy::Escaped => (escape_html(name), escape_html(email), escape_html(message)),
            };
            format!("<p>{message}</p><hr/><p>From: {name} &lt;{email}&gt;</p>")
        };

        Self {
            from_display_name: name.to_owned(),
            from_envelope_address: routing.sender_address.clone(),
            to_address: routing.recipient_address.clone(),
            subject: format!("Portfolio contact from {name}"),
            text_body: format!("From: {name} <{email}>\n\n{message}"),
            html_body,
        }
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
