//! Network domain: wire format for ownership and door state packets.

use serde::{Deserialize, Serialize};

use crate::network::components::{NetworkId, PeerId};

/// Everything that crosses the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Packet {
    /// `owner` now holds `object`.
    Ownership { object: NetworkId, owner: PeerId },
    /// New value of a door's authoritative flag.
    DoorState { object: NetworkId, is_open: bool },
}

/// An encoded packet plus the peer that sent it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub sender: PeerId,
    pub payload: Vec<u8>,
}

/// Error type for packet encoding and decoding failures.
#[derive(Debug)]
pub struct PacketError {
    pub sender: Option<PeerId>,
    pub message: String,
}

impl std::fmt::Display for PacketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.sender {
            Some(sender) => write!(f, "Bad packet from {}: {}", sender, self.message),
            None => write!(f, "Bad packet: {}", self.message),
        }
    }
}

impl Envelope {
    pub fn seal(sender: PeerId, packet: &Packet) -> Result<Self, PacketError> {
        let payload = serde_json::to_vec(packet).map_err(|e| PacketError {
            sender: Some(sender),
            message: format!("Encode error: {}", e),
        })?;

        Ok(Self { sender, payload })
    }

    pub fn open(&self) -> Result<Packet, PacketError> {
        serde_json::from_slice(&self.payload).map_err(|e| PacketError {
            sender: Some(self.sender),
            message: format!("Decode error: {}", e),
        })
    }
}
