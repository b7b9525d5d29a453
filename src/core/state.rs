//! Core domain: frame ordering for door systems.

use bevy::prelude::*;

/// Stages of one door frame, run in declaration order inside `Update`.
#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone, Copy)]
pub enum DoorSystems {
    /// Capture baselines of newly spawned doors.
    Initialize,
    /// Apply packets that arrived from other peers.
    Receive,
    /// Handle local user interactions.
    Interact,
    /// Advance running animations.
    Animate,
    /// Serialize state the owner asked to propagate.
    Send,
    /// Hand the outbox to whatever carries packets off this client.
    Transmit,
}
