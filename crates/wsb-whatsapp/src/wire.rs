//! JSON wire types for the gateway REST API and its webhook events.
//!
//! Field names follow the gateway's protobuf-derived JSON (`conversation`,
//! `extendedTextMessage`, reaction keys). Domain types stay in `wsb-core`;
//! everything here exists only at the boundary.

use serde::{Deserialize, Serialize};

use wsb_core::{
    domain::{ChatJid, MessageId, MessageRef, UserJid, STATUS_BROADCAST_JID},
    events::{InboundMessage, IncomingEvent, MessageKind},
    messaging::types::StatusUpdate,
    Result,
};

// ============== Inbound events ==============

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WireEvent {
    Message(WireMessage),
    Receipt(WireReceipt),
    Presence(WirePresence),
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, Deserialize)]
pub struct WireMessage {
    pub info: WireMessageInfo,
    #[serde(default)]
    pub message: WireMessageContent,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireMessageInfo {
    pub id: String,
    pub chat: String,
    pub sender: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireMessageContent {
    pub conversation: Option<String>,
    pub extended_text_message: Option<WireExtendedText>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireReceipt {
    pub chat: String,
    #[serde(default)]
    pub message_ids: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePresence {
    pub from: String,
    #[serde(default)]
    pub available: bool,
}

/// Decode one webhook delivery into a core event.
pub fn decode_event(raw: &[u8]) -> Result<IncomingEvent> {
    let wire: WireEvent = serde_json::from_slice(raw)?;
    Ok(wire.into())
}

impl From<WireEvent> for IncomingEvent {
    fn from(wire: WireEvent) -> Self {
        match wire {
            WireEvent::Message(m) => IncomingEvent::Message(InboundMessage {
                chat: ChatJid(m.info.chat),
                sender: UserJid(m.info.sender),
                id: MessageId(m.info.id),
                kind: if m.info.kind == "text" {
                    MessageKind::Text
                } else {
                    MessageKind::Other
                },
                conversation: m.message.conversation,
                extended_text: m.message.extended_text_message.map(|e| e.text),
            }),
            WireEvent::Receipt(r) => IncomingEvent::Receipt {
                chat: ChatJid(r.chat),
                message_ids: r.message_ids.into_iter().map(MessageId).collect(),
            },
            WireEvent::Presence(p) => IncomingEvent::Presence {
                from: UserJid(p.from),
                available: p.available,
            },
            WireEvent::Unknown => IncomingEvent::Other,
        }
    }
}

// ============== Outbound payloads ==============

/// `POST /send` request body.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRequest {
    pub to: String,
    pub message: OutgoingMessage,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_text_message: Option<WireExtendedText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reaction_message: Option<WireReaction>,
}

/// Extended text payload, shared between inbound decoding (only `text`
/// matters) and outbound status publishing (presentation attributes set).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireExtendedText {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_argb: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_argb: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireReaction {
    pub key: ReactionKey,
    pub text: String,
    pub sender_timestamp_ms: i64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionKey {
    pub remote_jid: String,
    pub participant: String,
    pub id: String,
}

/// `GET /session` response body.
#[derive(Clone, Debug, Deserialize)]
pub struct WireSession {
    pub jid: String,
}

/// `POST /presence` request body.
#[derive(Clone, Debug, Serialize)]
pub struct PresenceRequest {
    pub presence: String,
}

impl SendRequest {
    /// A status broadcast addressed to the well-known status JID.
    pub fn status(update: &StatusUpdate) -> Self {
        Self {
            to: STATUS_BROADCAST_JID.to_string(),
            message: OutgoingMessage {
                extended_text_message: Some(WireExtendedText {
                    text: update.text.clone(),
                    background_argb: Some(update.background_argb),
                    text_argb: Some(update.text_argb),
                    font: Some(update.font.clone()),
                }),
                ..Default::default()
            },
        }
    }

    /// An emoji reaction addressed to the chat the target message lives in.
    pub fn reaction(target: &MessageRef, emoji: &str) -> Self {
        Self {
            to: target.chat.0.clone(),
            message: OutgoingMessage {
                reaction_message: Some(WireReaction {
                    key: ReactionKey {
                        remote_jid: target.chat.0.clone(),
                        participant: target.sender.0.clone(),
                        id: target.id.0.clone(),
                    },
                    text: emoji.to_string(),
                    sender_timestamp_ms: chrono::Utc::now().timestamp_millis(),
                }),
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_text_message_event() {
        let raw = br#"{
            "type": "message",
            "info": {
                "id": "3EB0A9C2",
                "chat": "15551230002@s.whatsapp.net",
                "sender": "15551230001:7@s.whatsapp.net",
                "type": "text"
            },
            "message": { "conversation": "!status hello" }
        }"#;

        let IncomingEvent::Message(msg) = decode_event(raw).unwrap() else {
            panic!("expected message event");
        };
        assert_eq!(msg.kind, MessageKind::Text);
        assert_eq!(msg.body(), "!status hello");
        assert_eq!(msg.sender.user(), "15551230001");
    }

    #[test]
    fn extended_text_wins_over_conversation() {
        let raw = br#"{
            "type": "message",
            "info": {
                "id": "3EB0A9C2",
                "chat": "15551230002@s.whatsapp.net",
                "sender": "15551230001@s.whatsapp.net",
                "type": "text"
            },
            "message": {
                "conversation": "plain",
                "extendedTextMessage": { "text": "!status linked" }
            }
        }"#;

        let IncomingEvent::Message(msg) = decode_event(raw).unwrap() else {
            panic!("expected message event");
        };
        assert_eq!(msg.body(), "!status linked");
    }

    #[test]
    fn non_text_kind_maps_to_other() {
        let raw = br#"{
            "type": "message",
            "info": {
                "id": "3EB0A9C2",
                "chat": "15551230002@s.whatsapp.net",
                "sender": "15551230001@s.whatsapp.net",
                "type": "image"
            },
            "message": {}
        }"#;

        let IncomingEvent::Message(msg) = decode_event(raw).unwrap() else {
            panic!("expected message event");
        };
        assert_eq!(msg.kind, MessageKind::Other);
        assert_eq!(msg.body(), "");
    }

    #[test]
    fn unknown_event_type_maps_to_other() {
        let raw = br#"{ "type": "call_offer", "from": "x" }"#;
        assert!(matches!(decode_event(raw).unwrap(), IncomingEvent::Other));
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(decode_event(b"{ not json").is_err());
    }

    #[test]
    fn status_request_targets_broadcast_jid_with_presentation() {
        let req = SendRequest::status(&StatusUpdate::text("hello"));
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["to"], "status@broadcast");
        let ext = &json["message"]["extendedTextMessage"];
        assert_eq!(ext["text"], "hello");
        assert_eq!(ext["backgroundArgb"], 0xFF00_0000u32);
        assert_eq!(ext["textArgb"], 0xFFFF_FFFFu32);
        assert_eq!(ext["font"], "SYSTEM");
    }

    #[test]
    fn reaction_request_carries_the_message_key() {
        let target = MessageRef {
            chat: ChatJid("15551230002@s.whatsapp.net".to_string()),
            sender: UserJid("15551230001@s.whatsapp.net".to_string()),
            id: MessageId("3EB0A9C2".to_string()),
        };
        let req = SendRequest::reaction(&target, "\u{274c}");
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["to"], "15551230002@s.whatsapp.net");
        let reaction = &json["message"]["reactionMessage"];
        assert_eq!(reaction["text"], "\u{274c}");
        assert_eq!(reaction["key"]["remoteJid"], "15551230002@s.whatsapp.net");
        assert_eq!(reaction["key"]["participant"], "15551230001@s.whatsapp.net");
        assert_eq!(reaction["key"]["id"], "3EB0A9C2");
        // No stray payloads alongside the reaction.
        assert!(json["message"].get("extendedTextMessage").is_none());
    }
}
