//! Contact relay endpoint.
//!
//! ```text
//! POST /relay {"name":"Ada","email":"ada@example.com","message":"Hello"}
//! ```
//!
//! The body is read raw so malformed JSON reaches the required-field check
//! instead of being rejected by an extractor.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, Resource, web};
use tracing::{error, warn};

use super::schemas::{RelayConfirmation, RelayErrorBody, RelayRequestSchema};
use super::state::HttpState;
use crate::domain::{RelayError, TraceId};

/// Confirmation text returned once the provider accepts the message.
pub const RELAY_CONFIRMATION: &str = "Email sent.";

/// Path used by the serverless deployment; kept as an alias of the relay.
pub const LEGACY_RELAY_PATH: &str = "/.netlify/functions/send-email";

/// Largest request body the relay reads, matching the serverless platform.
pub const RELAY_PAYLOAD_LIMIT: usize = 6 * 1024 * 1024;

/// Relay a contact submission as one email.
#[utoipa::path(
    post,
    path = "/relay",
    request_body = RelayRequestSchema,
    responses(
        (status = 200, description = "Message accepted by the provider", body = RelayConfirmation),
        (status = 400, description = "A required field is missing or empty", content_type = "text/plain", body = String),
        (status = 405, description = "Only POST is supported", content_type = "text/plain", body = String),
        (status = 413, description = "Body exceeds the 6 MiB relay limit"),
        (status = 500, description = "Composition or delivery failed", body = RelayErrorBody)
    ),
    tags = ["relay"],
    operation_id = "relayContact",
    security([])
)]
pub async fn relay_contact(
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> Result<HttpResponse, RelayError> {
    match state.relay.relay(&body).await {
        Ok(_) => Ok(HttpResponse::Ok().json(RelayConfirmation {
            message: RELAY_CONFIRMATION.to_owned(),
        })),
        Err(RelayError::MissingFields(missing)) => {
            warn!(
                trace_id = %TraceId::current_label(),
                fields = ?missing.fields(),
                "contact submission rejected"
            );
            Err(missing.into())
        }
        Err(RelayError::Delivery(cause)) => {
            error!(
                trace_id = %TraceId::current_label(),
                kind = cause.kind(),
                error = %cause,
                "contact relay failed"
            );
            Err(cause.into())
        }
    }
}

/// Fallback for every method other than POST on a relay path.
pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed()
        .content_type(ContentType::plaintext())
        .body("Method Not Allowed")
}

/// Mount the relay at `path`, answering non-POST methods with 405.
///
/// Bodies up to [`RELAY_PAYLOAD_LIMIT`] are accepted.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use portfolio_backend::inbound::http::relay_resource;
///
/// let _app = App::new().service(relay_resource("/relay"));
/// ```
pub fn relay_resource(path: &str) -> Resource {
    web::resource(path)
        .app_data(web::PayloadConfig::new(RELAY_PAYLOAD_LIMIT))
        .route(web::post().to(relay_contact))
        .default_service(web::to(method_not_allowed))
}
