//! Audio domain: door sound cues and their playback.

mod cues;
mod systems;

pub use cues::{CueClip, DoorAudio, DoorCue, PlayDoorCue, dispatch_cue};
pub use systems::DoorCueSound;

use bevy::prelude::*;

use crate::audio::systems::play_door_cues;
use crate::core::DoorSystems;

pub struct DoorAudioPlugin;

impl Plugin for DoorAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PlayDoorCue>()
            .add_systems(Update, play_door_cues.after(DoorSystems::Animate));
    }
}
