use std::{env, fs, net::SocketAddr, path::Path, time::Duration};

use crate::{errors::Error, Result};

const DEFAULT_WEBHOOK_PORT: u16 = 8090;

/// Typed configuration for the bot.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the WhatsApp gateway sidecar (no trailing slash).
    pub gateway_url: String,
    /// Optional bearer token for gateway calls.
    pub gateway_token: Option<String>,
    /// Bind address for the inbound event webhook.
    pub webhook_addr: SocketAddr,
    /// Shared secret for webhook signature verification; unset disables it.
    pub webhook_secret: Option<String>,
    /// Outbound request timeout.
    pub http_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let gateway_url = env_str("WHATSAPP_GATEWAY_URL")
            .and_then(non_empty)
            .ok_or_else(|| {
                Error::Config("WHATSAPP_GATEWAY_URL environment variable is required".to_string())
            })?;
        let gateway_url = gateway_url.trim().trim_end_matches('/').to_string();

        let gateway_token = env_str("WHATSAPP_GATEWAY_TOKEN").and_then(non_empty);

        let webhook_addr = match env_str("WEBHOOK_ADDR").and_then(non_empty) {
            Some(raw) => raw
                .trim()
                .parse::<SocketAddr>()
                .map_err(|e| Error::Config(format!("invalid WEBHOOK_ADDR {raw:?}: {e}")))?,
            None => SocketAddr::from(([0, 0, 0, 0], DEFAULT_WEBHOOK_PORT)),
        };

        let webhook_secret = env_str("WEBHOOK_SECRET").and_then(non_empty);

        let http_timeout = Duration::from_millis(env_u64("HTTP_TIMEOUT_MS").unwrap_or(30_000));

        Ok(Self {
            gateway_url,
            gateway_token,
            webhook_addr,
            webhook_secret,
            http_timeout,
        })
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}
