use crate::model::role::Role;
use crate::model::session::{IceCandidate, SessionDescription};
use serde::de::{self, Deserializer, IgnoredAny, Visitor};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One event on the signaling channel.
///
/// Framed on the wire as `{"event": "<name>", "data": {...}}`. The message
/// carries no sender identity; the transport that received it attaches one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum SignalMessage {
    Register {
        #[serde(rename = "type")]
        role: Role,
    },
    RequestStream(StreamRequest),
    Offer {
        offer: SessionDescription,
    },
    Answer {
        answer: SessionDescription,
    },
    IceCandidate {
        candidate: IceCandidate,
    },
    #[serde(rename = "touchdesigner-online")]
    PresenceOnline {
        message: String,
    },
    #[serde(rename = "touchdesigner-offline")]
    PresenceOffline {
        message: String,
    },
}

/// Empty payload of `request-stream`.
///
/// Written as `{}`. Browsers emit the event with no payload at all, so an
/// absent or `null` body is accepted as well; any object body is ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamRequest;

impl Serialize for StreamRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_struct("StreamRequest", 0)?.end()
    }
}

impl<'de> Deserialize<'de> for StreamRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StreamRequestVisitor;

        impl<'de> Visitor<'de> for StreamRequestVisitor {
            type Value = StreamRequest;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an empty object, null or nothing")
            }

            fn visit_none<E: de::Error>(self) -> Result<StreamRequest, E> {
                Ok(StreamRequest)
            }

            fn visit_unit<E: de::Error>(self) -> Result<StreamRequest, E> {
                Ok(StreamRequest)
            }

            fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<StreamRequest, D::Error> {
                IgnoredAny::deserialize(d)?;
                Ok(StreamRequest)
            }
        }

        deserializer.deserialize_option(StreamRequestVisitor)
    }
}

/// Payload-free discriminant of [`SignalMessage`], used for routing decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Register,
    RequestStream,
    Offer,
    Answer,
    IceCandidate,
    PresenceOnline,
    PresenceOffline,
}

impl SignalMessage {
    pub fn kind(&self) -> MessageKind {
        match self {
            SignalMessage::Register { .. } => MessageKind::Register,
            SignalMessage::RequestStream(_) => MessageKind::RequestStream,
            SignalMessage::Offer { .. } => MessageKind::Offer,
            SignalMessage::Answer { .. } => MessageKind::Answer,
            SignalMessage::IceCandidate { .. } => MessageKind::IceCandidate,
            SignalMessage::PresenceOnline { .. } => MessageKind::PresenceOnline,
            SignalMessage::PresenceOffline { .. } => MessageKind::PresenceOffline,
        }
    }

    pub fn request_stream() -> Self {
        SignalMessage::RequestStream(StreamRequest)
    }

    pub fn presence_online(message: impl Into<String>) -> Self {
        SignalMessage::PresenceOnline {
            message: message.into(),
        }
    }

    pub fn presence_offline(message: impl Into<String>) -> Self {
        SignalMessage::PresenceOffline {
            message: message.into(),
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MessageKind::Register => "register",
            MessageKind::RequestStream => "request-stream",
            MessageKind::Offer => "offer",
            MessageKind::Answer => "answer",
            MessageKind::IceCandidate => "ice-candidate",
            MessageKind::PresenceOnline => "touchdesigner-online",
            MessageKind::PresenceOffline => "touchdesigner-offline",
        };
        f.write_str(name)
    }
}
