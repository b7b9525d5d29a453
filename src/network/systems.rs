//! Network domain: receive and send systems.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::doors::{DoorState, DoorTransitions};
use crate::network::components::{LocalPeer, NetworkId, SyncRequested};
use crate::network::events::OutgoingEnvelope;
use crate::network::ownership::Ownership;
use crate::network::packets::Packet;
use crate::network::transport::NetworkTransport;

/// Apply every envelope delivered since the last frame.
///
/// A door state packet always restarts the local transition, even when the
/// value matches what this client already has.
pub(crate) fn receive_packets(mut ownership: Ownership, mut transitions: DoorTransitions) {
    let local = ownership.local_peer();

    for envelope in ownership.take_inbox() {
        if envelope.sender == local {
            continue;
        }

        let packet = match envelope.open() {
            Ok(packet) => packet,
            Err(e) => {
                warn!("{}", e);
                continue;
            }
        };

        match packet {
            Packet::Ownership { object, owner } => {
                if !ownership.apply_remote(object, owner) {
                    debug!("Ownership packet for unknown {:?}", object);
                }
            }
            Packet::DoorState { object, is_open } => {
                let Some(door) = ownership.find(object) else {
                    debug!("Door state packet for unknown {:?}", object);
                    continue;
                };

                if ownership.owner_of(door) != Some(envelope.sender) {
                    debug!(
                        "{:?} updated by {} while owned by {:?}",
                        object,
                        envelope.sender,
                        ownership.owner_of(door)
                    );
                }

                if !transitions.apply_remote_state(door, is_open) {
                    debug!("{:?} is not an initialized door", object);
                }
            }
        }
    }
}

/// Serialize doors whose owner requested propagation this frame.
pub(crate) fn flush_sync_requests(
    mut commands: Commands,
    pending: Query<(Entity, &NetworkId, &DoorState), With<SyncRequested>>,
    mut ownership: Ownership,
) {
    for (entity, id, state) in &pending {
        commands.entity(entity).remove::<SyncRequested>();

        if !ownership.is_local_owner(entity) {
            warn!("Dropping sync of {:?}: ownership moved before send", id);
            continue;
        }

        let packet = Packet::DoorState {
            object: *id,
            is_open: state.is_open,
        };
        if let Err(e) = ownership.send(&packet) {
            warn!("{}", e);
        }
    }
}

/// Empty the outbox every frame, so nothing queues up between frames.
pub(crate) fn drain_outbox(
    local: Res<LocalPeer>,
    mut transport: ResMut<NetworkTransport>,
    mut outgoing: MessageWriter<OutgoingEnvelope>,
) {
    let envelopes = transport.take_outbox();
    if envelopes.is_empty() {
        return;
    }

    debug!("{} transmits {} envelope(s)", local.0, envelopes.len());
    outgoing.write_batch(envelopes.into_iter().map(OutgoingEnvelope));
}
