use crate::domain::{ChatJid, MessageId, MessageRef, UserJid};

/// Inbound events delivered by the protocol client.
///
/// The gateway emits more event kinds than the bot acts on; they are carried
/// as explicit variants so the dispatcher ignores them by pattern match
/// rather than by decode failure.
#[derive(Clone, Debug)]
pub enum IncomingEvent {
    Message(InboundMessage),
    Receipt {
        chat: ChatJid,
        message_ids: Vec<MessageId>,
    },
    Presence {
        from: UserJid,
        available: bool,
    },
    /// Event kinds the gateway may add that this bot has no use for.
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Text,
    Other,
}

/// One received message. Immutable; discarded after handling.
#[derive(Clone, Debug)]
pub struct InboundMessage {
    pub chat: ChatJid,
    pub sender: UserJid,
    pub id: MessageId,
    pub kind: MessageKind,
    /// Plain conversation text, if any.
    pub conversation: Option<String>,
    /// Text of an extended/quoted payload, preferred over `conversation`.
    pub extended_text: Option<String>,
}

impl InboundMessage {
    /// Message body: extended text if present, else conversation text, else
    /// the empty string.
    pub fn body(&self) -> &str {
        self.extended_text
            .as_deref()
            .or(self.conversation.as_deref())
            .unwrap_or("")
    }

    pub fn message_ref(&self) -> MessageRef {
        MessageRef {
            chat: self.chat.clone(),
            sender: self.sender.clone(),
            id: self.id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(conversation: Option<&str>, extended: Option<&str>) -> InboundMessage {
        InboundMessage {
            chat: ChatJid("15551230002@s.whatsapp.net".to_string()),
            sender: UserJid("15551230001@s.whatsapp.net".to_string()),
            id: MessageId("3EB0A9C2".to_string()),
            kind: MessageKind::Text,
            conversation: conversation.map(|s| s.to_string()),
            extended_text: extended.map(|s| s.to_string()),
        }
    }

    #[test]
    fn body_prefers_extended_text() {
        let m = message(Some("plain"), Some("extended"));
        assert_eq!(m.body(), "extended");
    }

    #[test]
    fn body_falls_back_to_conversation() {
        let m = message(Some("plain"), None);
        assert_eq!(m.body(), "plain");
    }

    #[test]
    fn body_defaults_to_empty() {
        let m = message(None, None);
        assert_eq!(m.body(), "");
    }
}
