/// Well-known JID that status broadcasts are addressed to.
pub const STATUS_BROADCAST_JID: &str = "status@broadcast";

/// WhatsApp JID of a user account (`user[:device]@server`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UserJid(pub String);

impl UserJid {
    /// Bare user part of the JID, with device suffix and server stripped.
    ///
    /// `15551234567:12@s.whatsapp.net` -> `15551234567`. Identity checks
    /// compare user parts, so companion devices of one account are equal.
    pub fn user(&self) -> &str {
        let head = self.0.split('@').next().unwrap_or("");
        head.split(':').next().unwrap_or("")
    }
}

/// WhatsApp JID of a chat (direct, group, or broadcast).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChatJid(pub String);

/// Message id (string, assigned by the protocol client).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub String);

/// A stable reference to a prior message, as needed to attach a reaction.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub chat: ChatJid,
    pub sender: UserJid,
    pub id: MessageId,
}
