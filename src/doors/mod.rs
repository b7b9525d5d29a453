//! Doors domain: door configuration, animation state machine and systems.

mod animator;
mod components;
mod systems;
#[cfg(test)]
mod tests;
mod transitions;

pub use animator::{
    AnimationPhase, BaselinePose, DoorAnimator, Pose, TickOutcome, end_pose,
    euler_degrees_to_quat, move_towards, quat_to_euler_degrees,
};
pub use components::{DoorConfig, DoorKind, DoorMotion, DoorState, HandleConfig, RotatingHandle};
pub use transitions::DoorTransitions;

use bevy::prelude::*;

use crate::core::DoorSystems;
use crate::doors::systems::{animate_doors, initialize_doors};

pub struct DoorsPlugin;

impl Plugin for DoorsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, initialize_doors.in_set(DoorSystems::Initialize))
            .add_systems(Update, animate_doors.in_set(DoorSystems::Animate));
    }
}
