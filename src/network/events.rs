//! Network domain: envelopes leaving this client.

use bevy::ecs::message::Message;

use crate::network::packets::Envelope;

/// One envelope drained from the outbox this frame.
///
/// Whatever carries packets to other peers reads these. Unread messages are
/// dropped after two frames like any other message.
#[derive(Debug, Clone)]
pub struct OutgoingEnvelope(pub Envelope);

impl Message for OutgoingEnvelope {}
