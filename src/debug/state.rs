//! Debug domain: dev-tool state and the simulated remote peer.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::SimulatedPeerSettings;
use crate::network::{Envelope, NetworkId, Packet, PacketError, PeerId};

/// Resource tracking debug mode state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Whether the door info overlay is visible
    pub show_info: bool,
    /// Whether the simulated peer is allowed to act
    pub simulation_paused: bool,
    /// Message to display temporarily in the overlay
    pub status_message: Option<(String, f32)>,
}

impl DebugState {
    /// Set a status message that will fade after a duration
    pub fn set_message(&mut self, message: impl Into<String>, duration: f32) {
        self.status_message = Some((message.into(), duration));
    }
}

/// A fake remote client. Every interval it claims one idle door and flips
/// it, exactly as a real peer's packets would arrive.
#[derive(Resource, Debug)]
pub struct SimulatedPeer {
    pub peer: PeerId,
    pub rng: ChaCha8Rng,
    pub timer: Timer,
    /// Packets received from the local client so far.
    pub heard: usize,
}

impl SimulatedPeer {
    pub fn new(settings: &SimulatedPeerSettings) -> Self {
        Self {
            peer: settings.peer,
            rng: ChaCha8Rng::seed_from_u64(settings.seed),
            timer: Timer::from_seconds(settings.interval_secs.max(0.1), TimerMode::Repeating),
            heard: 0,
        }
    }

    /// Receive an envelope the local client transmitted.
    ///
    /// Returns `None` for the peer's own envelopes.
    pub fn hear(&mut self, envelope: &Envelope) -> Result<Option<Packet>, PacketError> {
        if envelope.sender == self.peer {
            return Ok(None);
        }

        let packet = envelope.open()?;
        self.heard += 1;
        Ok(Some(packet))
    }

    /// Pick one of `idle` and produce the envelopes a peer toggling it sends.
    pub fn toggle_random(
        &mut self,
        idle: &[(NetworkId, bool)],
    ) -> Result<Option<Vec<Envelope>>, PacketError> {
        if idle.is_empty() {
            return Ok(None);
        }

        let (object, is_open) = idle[self.rng.random_range(0..idle.len())];
        let claim = Envelope::seal(
            self.peer,
            &Packet::Ownership {
                object,
                owner: self.peer,
            },
        )?;
        let state = Envelope::seal(
            self.peer,
            &Packet::DoorState {
                object,
                is_open: !is_open,
            },
        )?;

        Ok(Some(vec![claim, state]))
    }
}
