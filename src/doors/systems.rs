//! Doors domain: initialization and per-frame animation systems.

use avian3d::prelude::Collider;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::audio::{DoorAudio, PlayDoorCue, dispatch_cue};
use crate::doors::animator::{BaselinePose, DoorAnimator, TickOutcome};
use crate::doors::components::{DoorConfig, DoorState, RotatingHandle};
use crate::doors::transitions::set_colliders_enabled;

/// Capture the baseline pose and collider list of every new door.
///
/// Runs before anything else can reach the door, so the baseline is the
/// untouched authored pose.
pub(crate) fn initialize_doors(
    mut commands: Commands,
    new_doors: Query<
        (Entity, &DoorConfig, &Transform, Option<&RotatingHandle>),
        Without<DoorAnimator>,
    >,
    parts: Query<&Transform>,
    children: Query<&Children>,
    colliders: Query<(), With<Collider>>,
) {
    for (entity, config, transform, handle) in &new_doors {
        let handle_transform = handle.and_then(|handle| parts.get(handle.entity).ok());
        let baseline = BaselinePose::capture(transform, handle_transform);

        let cached: Vec<Entity> = std::iter::once(entity)
            .chain(children.iter_descendants(entity))
            .filter(|candidate| colliders.contains(*candidate))
            .collect();

        debug!(
            "Door {:?} initialized: kind={:?}, colliders={}, handle={}",
            entity,
            config.kind,
            cached.len(),
            baseline.handle_rotation.is_some()
        );

        commands
            .entity(entity)
            .insert(DoorAnimator::new(baseline, cached));
    }
}

/// Advance every animating door. Idle doors cost one flag check.
pub(crate) fn animate_doors(
    time: Res<Time>,
    mut commands: Commands,
    mut doors: Query<(
        Entity,
        &DoorConfig,
        &DoorState,
        &mut DoorAnimator,
        &mut Transform,
        Option<&RotatingHandle>,
        Option<&DoorAudio>,
    )>,
    mut handles: Query<&mut Transform, Without<DoorAnimator>>,
    mut cues: MessageWriter<PlayDoorCue>,
) {
    let delta = time.delta_secs();

    for (entity, config, state, mut animator, mut transform, handle, audio) in &mut doors {
        if !animator.is_animating() {
            continue;
        }

        let handle_transform = match handle {
            Some(handle) => handles.get_mut(handle.entity).ok(),
            None => None,
        };

        let outcome = animator.advance(
            config,
            state.is_open,
            delta,
            &mut transform,
            handle_transform.map(|t| t.into_inner()),
        );

        if let TickOutcome::Finished { cue } = outcome {
            if config.disable_collision_while_animating {
                set_colliders_enabled(&mut commands, &animator.colliders, true);
            }
            dispatch_cue(&mut cues, entity, audio, cue);
            debug!("Door {:?} settled, open={}", entity, state.is_open);
        }
    }
}
