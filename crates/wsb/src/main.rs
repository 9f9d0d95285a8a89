use std::sync::Arc;

use tracing::{info, warn};

use wsb_core::{config::Config, dispatcher::Dispatcher, logging};
use wsb_whatsapp::{webhook::WebhookServer, GatewayClient};

#[tokio::main]
async fn main() -> Result<(), wsb_core::Error> {
    logging::init("wsb")?;

    let cfg = Config::load()?;

    let client = GatewayClient::new(
        cfg.gateway_url.clone(),
        cfg.gateway_token.clone(),
        cfg.http_timeout,
    )?;

    // The gateway must already hold a paired session; the identity is fixed
    // for the lifetime of the process.
    let self_jid = client.self_jid().await?;
    info!(jid = %self_jid.0, "gateway session established");

    // Announce presence and surface the status privacy settings, the way a
    // freshly connected client would. Both are best-effort.
    if let Err(e) = client.send_presence_available().await {
        warn!(error = %e, "failed to update presence");
    }
    match client.status_privacy().await {
        Ok(privacy) => info!(%privacy, "status privacy settings"),
        Err(e) => warn!(error = %e, "failed to get status privacy settings"),
    }

    let dispatcher = Arc::new(Dispatcher::new(self_jid, Arc::new(client)));

    let server = WebhookServer::new(cfg.webhook_addr, dispatcher, cfg.webhook_secret.clone());
    server
        .run(shutdown_signal())
        .await
        .map_err(|e| wsb_core::Error::External(format!("webhook server failed: {e}")))?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut term = match signal(SignalKind::terminate()) {
            Ok(term) => term,
            Err(_) => {
                let _ = ctrl_c.await;
                return;
            }
        };

        tokio::select! {
            _ = ctrl_c => {}
            _ = term.recv() => {}
        }
    }

    #[cfg(not(unix))]
    {
        let _ = ctrl_c.await;
    }
}
