//! Server construction and middleware wiring.

mod config;
mod settings;

pub use config::ServerConfig;
pub use settings::RelaySettings;

use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::{ContactRelayCommand, MailTransport};
use crate::domain::{ContactRelayService, MailRouting};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::{HttpState, LEGACY_RELAY_PATH, relay_resource};
use crate::outbound::smtp::{
    MailEnv, SmtpMailTransport, UnconfiguredMailTransport, smtp_settings_from_env,
};

/// Wire the relay use-case from SMTP variables in `env`.
///
/// Incomplete or unusable SMTP settings do not stop the server: the relay is
/// built around a transport that fails every delivery, so callers receive a
/// 500 with the configuration problem while probes keep working.
pub fn build_relay_command<E: MailEnv>(
    settings: &RelaySettings,
    env: &E,
) -> Arc<dyn ContactRelayCommand> {
    let (transport, routing) = build_mail_setup(env);
    Arc::new(ContactRelayService::new(transport, routing).with_html_policy(settings.html_policy()))
}

fn build_mail_setup<E: MailEnv>(env: &E) -> (Arc<dyn MailTransport>, MailRouting) {
    let smtp = match smtp_settings_from_env(env) {
        Ok(smtp) => smtp,
        Err(error) => {
            warn!(%error, "smtp settings incomplete; relay will fail deliveries");
            let transport: Arc<dyn MailTransport> =
                Arc::new(UnconfiguredMailTransport::new(error.to_string()));
            return (transport, MailRouting::default());
        }
    };

    let transport: Arc<dyn MailTransport> = match SmtpMailTransport::from_settings(&smtp) {
        Ok(transport) => {
            info!(
                host = %smtp.host,
                port = smtp.port,
                implicit_tls = smtp.implicit_tls(),
                "smtp transport configured"
            );
            Arc::new(transport)
        }
        Err(error) => {
            warn!(%error, "smtp transport unusable; relay will fail deliveries");
            Arc::new(UnconfiguredMailTransport::new(error.detail()))
        }
    };
    (transport, smtp.routing())
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    relay_path: String,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(relay_resource(&relay_path))
        .service(ready)
        .service(live);

    let app = if relay_path == LEGACY_RELAY_PATH {
        app
    } else {
        app.service(relay_resource(LEGACY_RELAY_PATH))
    };

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct the relay server bound to `config.bind_addr()`.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let listener = TcpListener::bind(config.bind_addr())?;
    create_server_on(health_state, config, listener)
}

/// Construct the relay server on an already bound listener.
///
/// Tests bind port 0 and read the chosen address before starting.
///
/// # Errors
/// Propagates [`std::io::Error`] when the listener cannot be adopted.
pub fn create_server_on(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
    listener: TcpListener,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(config.http_state());
    let relay_path = config.relay_path().to_owned();

    let server = HttpServer::new(move || {
        build_app(
            server_health_state.clone(),
            http_state.clone(),
            relay_path.clone(),
        )
    })
    .listen(listener)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RelayError;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use crate::inbound::http::schemas::RelayErrorBody;
    use rstest::rstest;
    use std::collections::HashMap;

    struct EmptyEnv;

    impl MailEnv for EmptyEnv {
        fn string(&self, _name: &str) -> Option<String> {
            None
        }
    }

    struct MapEnv(HashMap<&'static str, &'static str>);

    impl MailEnv for MapEnv {
        fn string(&self, name: &str) -> Option<String> {
            self.0.get(name).map(|value| (*value).to_owned())
        }
    }

    fn smtp_env(extra: &[(&'static str, &'static str)]) -> MapEnv {
        let mut vars = HashMap::from([
            ("SMTP_USER", "relay@example.com"),
            ("SMTP_PASS", "secret"),
            ("CONTACT_EMAIL", "owner@example.com"),
        ]);
        vars.extend(extra.iter().copied());
        MapEnv(vars)
    }

    fn default_settings() -> RelaySettings {
        RelaySettings {
            host: None,
            port: None,
            path: None,
            escape_html: false,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn unconfigured_smtp_fails_deliveries_but_still_checks_fields() {
        let relay = build_relay_command(&default_settings(), &EmptyEnv);

        let missing = relay.relay(b"{}").await.expect_err("fields checked first");
        assert!(matches!(missing, RelayError::MissingFields(_)));

        let error = relay
            .relay(br#"{"name":"A","email":"a@b.com","message":"hi"}"#)
            .await
            .expect_err("delivery fails");
        assert_eq!(
            error.client_message(),
            "missing required environment variable: SMTP_USER"
        );
    }

    #[rstest]
    #[case::configured("/relay")]
    #[case::legacy(LEGACY_RELAY_PATH)]
    #[actix_web::test]
    async fn relay_is_reachable_on_both_paths(#[case] uri: &str) {
        let app = actix_test::init_service(build_app(
            web::Data::new(HealthState::new()),
            web::Data::new(HttpState::default()),
            "/relay".to_owned(),
        ))
        .await;
        let request = actix_test::TestRequest::post()
            .uri(uri)
            .set_payload(r#"{"name":"A","email":"a@b.com","message":"hi"}"#)
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(crate::domain::TRACE_ID_HEADER));
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_sender_fails_deliveries_with_reason() {
        let env = smtp_env(&[("SMTP_FROM", "no-domain")]);
        let relay = build_relay_command(&default_settings(), &env);

        let error = relay
            .relay(br#"{"name":"A","email":"a@b.com","message":"hi"}"#)
            .await
            .expect_err("delivery fails");
        assert!(error.client_message().starts_with("SMTP_FROM is not a valid email address"));
    }

    #[rstest]
    #[case::line_feed("A\\nB")]
    #[case::crlf_header_injection("A\\r\\nBcc: e@x.io")]
    #[actix_web::test]
    async fn line_breaks_in_name_still_get_a_json_answer(#[case] name: &str) {
        let env = smtp_env(&[("SMTP_HOST", "127.0.0.1"), ("SMTP_PORT", "1")]);
        let relay = build_relay_command(&default_settings(), &env);
        let app = actix_test::init_service(build_app(
            web::Data::new(HealthState::new()),
            web::Data::new(HttpState::new(relay)),
            "/relay".to_owned(),
        ))
        .await;
        let request = actix_test::TestRequest::post()
            .uri("/relay")
            .set_payload(format!(r#"{{"name":"{name}","email":"a@b.com","message":"hi"}}"#))
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: RelayErrorBody = actix_test::read_body_json(response).await;
        assert!(!body.error.is_empty());
    }
}
