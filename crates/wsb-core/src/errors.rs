/// Core error type for the bot.
///
/// The adapter crate maps its transport errors into this type so the
/// dispatcher can treat any send failure as a single boolean outcome.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("gateway error: status {status}: {body}")]
    Gateway { status: u16, body: String },

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
