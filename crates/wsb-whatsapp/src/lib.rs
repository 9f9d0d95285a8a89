//! WhatsApp gateway adapter.
//!
//! This crate implements the `wsb-core` MessagingPort over the gateway
//! sidecar's REST API and hosts the webhook that receives its events. The
//! gateway owns every protocol concern (pairing, encryption, multi-device
//! sync, reconnection); the bot only speaks JSON over HTTP to it.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

pub mod webhook;
pub mod wire;

use std::time::Duration;

use wsb_core::{
    domain::{MessageRef, UserJid},
    errors::Error,
    messaging::{port::MessagingPort, types::StatusUpdate},
    Result,
};

use crate::wire::{PresenceRequest, SendRequest, WireSession};

#[derive(Clone)]
pub struct GatewayClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl GatewayClient {
    pub fn new(base_url: String, token: Option<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Self::map_err)?;

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    fn map_err(e: reqwest::Error) -> Error {
        Error::External(format!("gateway error: {e}"))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn execute(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let resp = self.authorize(req).send().await.map_err(Self::map_err)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Gateway {
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp)
    }

    async fn post_json(&self, path: &str, payload: &impl Serialize) -> Result<()> {
        self.execute(self.http.post(self.url(path)).json(payload))
            .await?;
        Ok(())
    }

    /// The bot's own account identity, available once the gateway session is
    /// established (paired). Fetched once at startup.
    pub async fn self_jid(&self) -> Result<UserJid> {
        let session: WireSession = self
            .execute(self.http.get(self.url("/session")))
            .await?
            .json()
            .await
            .map_err(Self::map_err)?;

        Ok(UserJid(session.jid))
    }

    /// Announce the account as available. Best-effort at startup.
    pub async fn send_presence_available(&self) -> Result<()> {
        self.post_json(
            "/presence",
            &PresenceRequest {
                presence: "available".to_string(),
            },
        )
        .await
    }

    /// The account's status privacy settings, surfaced at startup for the
    /// operator (who controls which contacts see published statuses).
    pub async fn status_privacy(&self) -> Result<serde_json::Value> {
        self.execute(self.http.get(self.url("/status/privacy")))
            .await?
            .json()
            .await
            .map_err(Self::map_err)
    }
}

#[async_trait]
impl MessagingPort for GatewayClient {
    async fn publish_status(&self, update: &StatusUpdate) -> Result<()> {
        self.post_json("/send", &SendRequest::status(update)).await
    }

    async fn send_reaction(&self, target: &MessageRef, emoji: &str) -> Result<()> {
        self.post_json("/send", &SendRequest::reaction(target, emoji))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_path() {
        let client = GatewayClient::new(
            "http://localhost:8080".to_string(),
            None,
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.url("/send"), "http://localhost:8080/send");
    }
}
