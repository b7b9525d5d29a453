//! Interaction domain: fan an interaction out to the handle's doors.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::doors::DoorTransitions;
use crate::interaction::components::DoorHandleInteractable;
use crate::interaction::events::{DoorToggledEvent, HandleUsed, InteractMessage};
use crate::network::{LocalPeer, Ownership};

/// Turn a local handle use into an interaction from this client's peer.
pub(crate) fn use_handle(
    used: On<HandleUsed>,
    local: Res<LocalPeer>,
    mut interactions: MessageWriter<InteractMessage>,
) {
    interactions.write(InteractMessage {
        handle: used.entity,
        peer: local.0,
    });
}

/// Toggle each door of the used handle in order, claiming ownership first.
///
/// An unset slot, a missing door or a door that is still animating stops the
/// rest of the sequence. Doors already toggled stay toggled.
pub(crate) fn handle_interactions(
    mut interactions: MessageReader<InteractMessage>,
    handles: Query<&DoorHandleInteractable>,
    mut ownership: Ownership,
    mut transitions: DoorTransitions,
    mut toggled: MessageWriter<DoorToggledEvent>,
) {
    for interaction in interactions.read() {
        if interaction.peer != ownership.local_peer() {
            continue;
        }

        let Ok(interactable) = handles.get(interaction.handle) else {
            debug!("{:?} has no door handle", interaction.handle);
            continue;
        };

        for slot in &interactable.doors {
            let Some(door) = *slot else {
                debug!("Handle {:?} has an unset door slot", interaction.handle);
                break;
            };

            match transitions.is_animating(door) {
                None => {
                    debug!("Handle {:?} points at missing door {:?}", interaction.handle, door);
                    break;
                }
                Some(true) => {
                    debug!("Door {:?} is busy, interaction stops", door);
                    break;
                }
                Some(false) => {}
            }

            if let Err(e) = ownership.request(door, interaction.peer) {
                warn!("{}", e);
                break;
            }

            match transitions.toggle_as_owner(door, &ownership) {
                Ok(is_open) => {
                    toggled.write(DoorToggledEvent {
                        handle: interaction.handle,
                        door,
                        is_open,
                    });
                }
                Err(e) => {
                    warn!("{}", e);
                    break;
                }
            }
        }
    }
}
