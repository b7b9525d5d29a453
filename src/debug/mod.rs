//! Debug/dev tools for exercising doors without a real network.
//!
//! Features:
//! - Use handles with the digit keys
//! - Door state overlay (F1) and log dump (F2)
//! - Seeded simulated remote peer that claims and flips doors (pause with P)
//!   and hears every packet this client transmits

mod state;
mod systems;
mod ui;

pub use state::{DebugState, SimulatedPeer};

use bevy::prelude::*;

use crate::content::load_content;
use crate::core::DoorSystems;
use crate::debug::systems::{
    drive_simulated_peer, handle_debug_hotkeys, log_door_toggles, loop_back_to_simulated_peer,
    setup_simulated_peer, toggle_debug_overlay, update_debug_info_overlay,
    update_status_message,
};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(Startup, setup_simulated_peer.after(load_content))
            .add_systems(
                Update,
                (
                    toggle_debug_overlay,
                    handle_debug_hotkeys,
                    drive_simulated_peer,
                    update_status_message,
                )
                    .chain()
                    .before(DoorSystems::Receive),
            )
            .add_systems(
                Update,
                (
                    log_door_toggles,
                    loop_back_to_simulated_peer,
                    update_debug_info_overlay,
                )
                    .chain()
                    .after(DoorSystems::Transmit),
            );
    }
}
