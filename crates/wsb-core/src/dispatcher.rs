use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    domain::UserJid,
    events::{InboundMessage, IncomingEvent, MessageKind},
    messaging::{port::MessagingPort, types::StatusUpdate},
};

/// Command token recognized in message bodies.
const STATUS_COMMAND: &str = "!status";

/// Reaction sent when a status publish succeeds.
const REACT_OK: &str = "\u{2705}";
/// Reaction sent on publish failure or to unauthorized senders.
const REACT_REJECT: &str = "\u{274c}";

/// What a recognized `!status` command should do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandPlan {
    /// Sender is the bot's own account: publish, then react with the outcome.
    Publish { status_text: String },
    /// Anyone else: reject without inspecting the arguments.
    Reject,
}

/// Map one inbound message to its command plan.
///
/// Total over all message kinds; `None` means no outbound action at all.
/// Stateless, so identical inputs always plan identically.
pub fn plan(message: &InboundMessage, self_jid: &UserJid) -> Option<CommandPlan> {
    if message.kind != MessageKind::Text {
        return None;
    }

    let status_text = parse_status_command(message.body())?;

    if message.sender.user() == self_jid.user() {
        Some(CommandPlan::Publish {
            status_text: status_text.to_string(),
        })
    } else {
        Some(CommandPlan::Reject)
    }
}

/// Extract the argument of a `!status` command.
///
/// The prefix match is exact and case-sensitive, and the body must extend
/// past the token: a bare `"!status"` is not a command. Exactly one separator
/// character after the token is skipped; the rest is the argument verbatim.
pub fn parse_status_command(body: &str) -> Option<&str> {
    let rest = body.strip_prefix(STATUS_COMMAND)?;
    if rest.is_empty() {
        return None;
    }
    let mut chars = rest.chars();
    chars.next();
    Some(chars.as_str())
}

/// Executes command plans against the injected protocol-client port.
///
/// Holds no state besides the fixed self identity; every event is handled
/// independently.
pub struct Dispatcher {
    self_jid: UserJid,
    messenger: Arc<dyn MessagingPort>,
}

impl Dispatcher {
    pub fn new(self_jid: UserJid, messenger: Arc<dyn MessagingPort>) -> Self {
        Self {
            self_jid,
            messenger,
        }
    }

    pub fn self_jid(&self) -> &UserJid {
        &self.self_jid
    }

    /// Handle one inbound event.
    ///
    /// At most one publish attempt and at most one reaction leave this call.
    /// A failed publish selects the rejection reaction; a failed reaction is
    /// reported and dropped. Nothing here aborts the process.
    pub async fn handle_event(&self, event: IncomingEvent) {
        let message = match event {
            IncomingEvent::Message(m) => m,
            IncomingEvent::Receipt { .. } | IncomingEvent::Presence { .. } | IncomingEvent::Other => {
                return;
            }
        };

        let Some(plan) = plan(&message, &self.self_jid) else {
            return;
        };

        let emoji = match plan {
            CommandPlan::Publish { status_text } => {
                let update = StatusUpdate::text(status_text);
                match self.messenger.publish_status(&update).await {
                    Ok(()) => {
                        info!(chat = %message.chat.0, "status update posted");
                        REACT_OK
                    }
                    Err(e) => {
                        warn!(error = %e, "failed to post status update");
                        REACT_REJECT
                    }
                }
            }
            CommandPlan::Reject => REACT_REJECT,
        };

        if let Err(e) = self
            .messenger
            .send_reaction(&message.message_ref(), emoji)
            .await
        {
            warn!(error = %e, chat = %message.chat.0, "failed to send reaction");
        }
    }
}
