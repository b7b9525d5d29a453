//! Core domain: session settings shared across domains.

use bevy::prelude::*;

use crate::network::PeerId;

/// Settings for this client's session, loaded from `session.ron`.
#[derive(Resource, Debug, Clone)]
pub struct SessionSettings {
    pub local_peer: PeerId,
    /// Initial owner of every replicated door.
    pub master_peer: PeerId,
    pub simulated_peer: Option<SimulatedPeerSettings>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            local_peer: PeerId(1),
            master_peer: PeerId(1),
            simulated_peer: None,
        }
    }
}

/// A fake remote peer used by the dev tools to exercise the receive path.
#[derive(Debug, Clone)]
pub struct SimulatedPeerSettings {
    pub peer: PeerId,
    pub seed: u64,
    pub interval_secs: f32,
}
