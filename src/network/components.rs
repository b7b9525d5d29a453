//! Network domain: peer identity, object ids and ownership components.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Identifies one connected client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct PeerId(pub u64);

impl std::fmt::Display for PeerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "peer#{}", self.0)
    }
}

/// Id of a replicated object. Identical on every peer for the same door.
#[derive(
    Component, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize,
)]
pub struct NetworkId(pub u64);

/// The peer currently allowed to mutate and propagate an object's state.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkOwner(pub PeerId);

/// This client's own identity.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalPeer(pub PeerId);

impl Default for LocalPeer {
    fn default() -> Self {
        Self(PeerId(1))
    }
}

/// Set by the owner after mutating replicated state; the send stage
/// serializes the object and clears the marker.
#[derive(Component, Debug, Default)]
pub struct SyncRequested;
