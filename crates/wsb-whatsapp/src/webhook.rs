//! Webhook server receiving gateway events.
//!
//! The gateway pushes each event as a JSON POST. Deliveries are verified
//! against a shared secret when one is configured, decoded into core events,
//! and handed to the dispatcher one at a time.

use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tracing::{error, info, warn};

use wsb_core::dispatcher::Dispatcher;

use crate::wire;

const SIGNATURE_HEADER: &str = "x-webhook-signature";

#[derive(Clone)]
pub struct WebhookState {
    pub dispatcher: Arc<Dispatcher>,
    pub secret: Option<String>,
}

pub struct WebhookServer {
    addr: SocketAddr,
    state: WebhookState,
}

impl WebhookServer {
    pub fn new(addr: SocketAddr, dispatcher: Arc<Dispatcher>, secret: Option<String>) -> Self {
        Self {
            addr,
            state: WebhookState { dispatcher, secret },
        }
    }

    /// Serve until `shutdown` resolves.
    pub async fn run(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        info!("starting webhook server on {}", self.addr);

        let app = Router::new()
            .route("/events", post(handle_event))
            .route("/health", get(health))
            .with_state(Arc::new(self.state));

        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}

async fn health() -> &'static str {
    "ok"
}

async fn handle_event(
    State(state): State<Arc<WebhookState>>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    if let Some(secret) = &state.secret {
        let signature = headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        if !verify_signature(secret, &body, signature) {
            warn!("rejected webhook delivery with bad signature");
            return (StatusCode::UNAUTHORIZED, "bad signature");
        }
    }

    let event = match wire::decode_event(&body) {
        Ok(event) => event,
        Err(e) => {
            // Answer 200 so the gateway does not redeliver; a redelivery
            // could make the bot act twice on the same message.
            error!(error = %e, "dropping undecodable gateway event");
            return (StatusCode::OK, "");
        }
    };

    state.dispatcher.handle_event(event).await;
    (StatusCode::OK, "")
}

/// Check a hex HMAC-SHA256 signature over the raw request body.
pub fn verify_signature(secret: &str, body: &[u8], signature: &str) -> bool {
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    type HmacSha256 = Hmac<Sha256>;

    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(body);

    let expected = hex::encode(mac.finalize().into_bytes());
    expected == signature
}
