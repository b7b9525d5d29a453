//! Interaction domain: messages raised by the host's interaction callback.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::network::PeerId;

/// Fired when `peer` uses the interactable on `handle`.
#[derive(Debug, Clone)]
pub struct InteractMessage {
    pub handle: Entity,
    pub peer: PeerId,
}

impl Message for InteractMessage {}

/// The local user became the interacting target of the handle `entity`.
///
/// Raised by the host's pointer input; becomes an `InteractMessage` from
/// the local peer.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct HandleUsed {
    pub entity: Entity,
}

/// Fired for each door an interaction actually toggled.
#[derive(Debug, Clone)]
pub struct DoorToggledEvent {
    pub handle: Entity,
    pub door: Entity,
    pub is_open: bool,
}

impl Message for DoorToggledEvent {}
