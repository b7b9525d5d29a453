//! Network domain: the packet queues shared with the host transport.
//!
//! `outbox` is drained every frame into `OutgoingEnvelope` messages; the
//! host delivers envelopes from other peers into `inbox`. Delivery is
//! eventual and unordered across objects.

use bevy::prelude::*;

use crate::network::packets::{Envelope, Packet, PacketError};
use crate::network::components::PeerId;

#[derive(Resource, Debug, Default)]
pub struct NetworkTransport {
    pub outbox: Vec<Envelope>,
    pub inbox: Vec<Envelope>,
}

impl NetworkTransport {
    /// Encode `packet` and queue it for every other peer.
    pub fn send(&mut self, sender: PeerId, packet: &Packet) -> Result<(), PacketError> {
        let envelope = Envelope::seal(sender, packet)?;
        self.outbox.push(envelope);
        Ok(())
    }

    /// Hand an envelope received from another peer to this client.
    pub fn deliver(&mut self, envelope: Envelope) {
        self.inbox.push(envelope);
    }

    pub fn take_outbox(&mut self) -> Vec<Envelope> {
        std::mem::take(&mut self.outbox)
    }

    pub fn take_inbox(&mut self) -> Vec<Envelope> {
        std::mem::take(&mut self.inbox)
    }
}
