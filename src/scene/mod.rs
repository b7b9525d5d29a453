//! Scene domain: builds the playable scene from loaded content.

mod spawn;

pub use spawn::{DoorPanel, HandleKnob};

use bevy::prelude::*;

use crate::content::load_content;
use crate::scene::spawn::{setup_stage, spawn_doors};

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_stage, spawn_doors.after(load_content)));
    }
}
