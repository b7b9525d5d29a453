//! Core domain: frame ordering and session settings.

mod resources;
mod state;

pub use resources::{SessionSettings, SimulatedPeerSettings};
pub use state::DoorSystems;

use bevy::prelude::*;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SessionSettings>().configure_sets(
            Update,
            (
                DoorSystems::Initialize,
                DoorSystems::Receive,
                DoorSystems::Interact,
                DoorSystems::Animate,
                DoorSystems::Send,
                DoorSystems::Transmit,
            )
                .chain(),
        );
    }
}
