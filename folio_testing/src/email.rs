//! Stand-in for the email delivery provider.
//!
//! Accepts `POST /emails` with a bearer api key, records every accepted
//! message and answers with a fresh id. Recipients in the `reject.invalid`
//! domain are refused with `422`.

use std::{
    net::{IpAddr, SocketAddr},
    sync::{Arc, Mutex},
};

use anyhow::Context;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::info;
use uuid::Uuid;

const EMAILS_ROUTE: &str = "/emails";
pub const REJECTED_DOMAIN: &str = "reject.invalid";

pub async fn start_server(host: IpAddr, port: u16, api_key: String) -> anyhow::Result<()> {
    info!("Starting email provider testing server on {host}:{port}");
    info!("Endpoint: http://{host}:{port}/");
    info!("Api key: {api_key:?}");
    info!("Emails to addresses in the {REJECTED_DOMAIN} domain are rejected.");

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router(api_key, Outbox::default()))
        .await
        .context("Failed to start HTTP server")
}

/// Start the server on a random local port in the background.
pub async fn spawn(api_key: impl Into<String>) -> anyhow::Result<TestServer> {
    let listener = TcpListener::bind(("127.0.0.1", 0))
        .await
        .context("Failed to bind to a local port")?;
    let addr = listener.local_addr()?;
    let outbox = Outbox::default();

    let router = router(api_key.into(), outbox.clone());
    tokio::spawn(async move { axum::serve(listener, router).await });

    Ok(TestServer { addr, outbox })
}

#[derive(Debug, Clone)]
pub struct TestServer {
    pub addr: SocketAddr,
    pub outbox: Outbox,
}

impl TestServer {
    pub fn endpoint(&self) -> String {
        format!("http://{}/", self.addr)
    }
}

/// Messages the server has accepted, oldest first.
#[derive(Debug, Clone, Default)]
pub struct Outbox(Arc<Mutex<Vec<ReceivedEmail>>>);

impl Outbox {
    pub fn emails(&self) -> Vec<ReceivedEmail> {
        self.0.lock().map(|x| x.clone()).unwrap_or_default()
    }

    fn push(&self, email: ReceivedEmail) {
        if let Ok(mut emails) = self.0.lock() {
            emails.push(email);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedEmail {
    #[serde(default)]
    pub id: String,
    pub from: String,
    pub to: Vec<String>,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: Option<String>,
    pub text: Option<String>,
}

#[derive(Clone)]
struct AppState {
    api_key: Arc<str>,
    outbox: Outbox,
}

fn router(api_key: String, outbox: Outbox) -> Router {
    Router::new()
        .route(EMAILS_ROUTE, routing::post(send).get(list))
        .with_state(AppState {
            api_key: api_key.into(),
            outbox,
        })
}

async fn send(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(mut email): Json<ReceivedEmail>,
) -> Response {
    if !authorized(&state, &headers) {
        return error(StatusCode::UNAUTHORIZED, "API key is invalid");
    }

    if email.to.is_empty() {
        return error(StatusCode::UNPROCESSABLE_ENTITY, "Missing `to` field");
    }

    if let Some(to) = email
        .to
        .iter()
        .find(|to| to.ends_with(&format!("@{REJECTED_DOMAIN}")))
    {
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            &format!("Recipient {to} is not allowed"),
        );
    }

    email.id = Uuid::new_v4().to_string();
    let id = email.id.clone();
    info!(%id, to = ?email.to, subject = %email.subject, "accepted email");
    state.outbox.push(email);

    Json(SendResponse { id }).into_response()
}

async fn list(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if !authorized(&state, &headers) {
        return error(StatusCode::UNAUTHORIZED, "API key is invalid");
    }
    Json(state.outbox.emails()).into_response()
}

fn authorized(state: &AppState, headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|x| x.to_str().ok())
        .and_then(|x| x.strip_prefix("Bearer "))
        .is_some_and(|x| x == &*state.api_key)
}

fn error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            status_code: status.as_u16(),
            message,
        }),
    )
        .into_response()
}

#[derive(Serialize)]
struct SendResponse {
    id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse<'a> {
    status_code: u16,
    message: &'a str,
}
