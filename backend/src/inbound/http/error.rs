//! HTTP mapping for relay failures.
//!
//! Missing fields answer with a plain-text 400; every delivery failure answers
//! with a JSON 500 carrying the provider's message.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use super::schemas::RelayErrorBody;
use crate::domain::RelayError;

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingFields(_) => StatusCode::BAD_REQUEST,
            Self::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        match self {
            Self::MissingFields(_) => builder
                .content_type(ContentType::plaintext())
                .body(self.client_message()),
            Self::Delivery(_) => builder.json(RelayErrorBody {
                error: self.client_message(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ContactSubmission;
    use crate::domain::ports::MailTransportError;
    use actix_web::body::to_bytes;
    use actix_web::http::header;
    use rstest::rstest;

    async fn render(error: RelayError) -> (StatusCode, Option<String>, String) {
        let response = error.error_response();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = to_bytes(response.into_body()).await.expect("body bytes");
        let body = String::from_utf8(body.to_vec()).expect("utf8 body");
        (status, content_type, body)
    }

    #[actix_web::test]
    async fn missing_fields_render_plain_text() {
        let missing = ContactSubmission::from_json_body(br#"{"name":"A"}"#).expect_err("missing");
        let (status, content_type, body) = render(RelayError::from(missing)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(content_type.is_some_and(|value| value.starts_with("text/plain")));
        assert_eq!(body, "Missing required fields");
    }

    #[rstest]
    #[case::detail(MailTransportError::connection("Connection refused"), "Connection refused")]
    #[case::blank(MailTransportError::rejected(" "), "Unknown error")]
    #[tokio::test]
    async fn delivery_failures_render_json(
        #[case] cause: MailTransportError,
        #[case] expected: &str,
    ) {
        let (status, content_type, body) = render(RelayError::from(cause)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        let parsed: RelayErrorBody = serde_json::from_str(&body).expect("json body");
        assert_eq!(parsed.error, expected);
    }
}
