//! Doors domain: the state-change path shared by local toggles and remote updates.

use bevy::ecs::message::MessageWriter;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use avian3d::prelude::ColliderDisabled;

use crate::audio::{DoorAudio, PlayDoorCue, dispatch_cue};
use crate::doors::animator::DoorAnimator;
use crate::doors::components::{DoorConfig, DoorState};
use crate::network::{Ownership, ReplicationError, SyncRequested};

/// Enable or disable every cached collider of a door.
pub(crate) fn set_colliders_enabled(commands: &mut Commands, colliders: &[Entity], enabled: bool) {
    for &collider in colliders {
        let Ok(mut entity) = commands.get_entity(collider) else {
            continue;
        };
        if enabled {
            entity.try_remove::<ColliderDisabled>();
        } else {
            entity.try_insert(ColliderDisabled);
        }
    }
}

/// Access to initialized doors for starting transitions.
#[derive(SystemParam)]
pub struct DoorTransitions<'w, 's> {
    doors: Query<
        'w,
        's,
        (
            &'static DoorConfig,
            &'static mut DoorState,
            &'static mut DoorAnimator,
            &'static Transform,
            &'static GlobalTransform,
            Option<&'static DoorAudio>,
        ),
    >,
    commands: Commands<'w, 's>,
    cues: MessageWriter<'w, PlayDoorCue>,
}

impl DoorTransitions<'_, '_> {
    /// `None` when `door` is not an initialized door.
    pub fn is_animating(&self, door: Entity) -> Option<bool> {
        self.doors
            .get(door)
            .ok()
            .map(|(_, _, animator, ..)| animator.is_animating())
    }

    /// Re-target the animation at the door's current authoritative state.
    ///
    /// Snapshots the current pose as the start, recomputes the end pose from
    /// the baseline, plays the start cue and suppresses collision if configured.
    pub fn begin_state_transition(&mut self, door: Entity) -> bool {
        let Ok((config, state, mut animator, transform, global, audio)) = self.doors.get_mut(door)
        else {
            return false;
        };

        let frame = global.compute_transform().rotation;
        if let Some(cue) = animator.begin_transition(config, state.is_open, transform, frame) {
            dispatch_cue(&mut self.cues, door, audio, cue);
        }

        if config.disable_collision_while_animating {
            set_colliders_enabled(&mut self.commands, &animator.colliders, false);
        }

        true
    }

    /// Flip the authoritative flag, animate, and request propagation.
    ///
    /// Only the owner may do this; otherwise nothing changes.
    pub fn toggle_as_owner(
        &mut self,
        door: Entity,
        ownership: &Ownership,
    ) -> Result<bool, ReplicationError> {
        if !ownership.is_local_owner(door) {
            return Err(ReplicationError::NotOwner {
                entity: door,
                owner: ownership.owner_of(door).unwrap_or(ownership.local_peer()),
                local: ownership.local_peer(),
            });
        }

        let Ok((_, mut state, ..)) = self.doors.get_mut(door) else {
            return Err(ReplicationError::UnknownObject(door));
        };
        state.is_open = !state.is_open;
        let is_open = state.is_open;

        self.begin_state_transition(door);
        if ownership.network_id(door).is_some() {
            self.commands.entity(door).insert(SyncRequested);
        }

        Ok(is_open)
    }

    /// Store a value replicated from another peer and animate toward it.
    pub fn apply_remote_state(&mut self, door: Entity, is_open: bool) -> bool {
        let Ok((_, mut state, ..)) = self.doors.get_mut(door) else {
            return false;
        };
        state.is_open = is_open;

        self.begin_state_transition(door)
    }
}
