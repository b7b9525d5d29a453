//! Audio domain: cue playback.

use bevy::audio::Volume;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::audio::cues::PlayDoorCue;

/// Marks a one-shot sound spawned for a door cue.
#[derive(Component, Debug)]
pub struct DoorCueSound;

/// Spawn a spatial one-shot player under the door's emitter for every queued cue.
pub(crate) fn play_door_cues(mut commands: Commands, mut cues: MessageReader<PlayDoorCue>) {
    for cue in cues.read() {
        let Ok(mut emitter) = commands.get_entity(cue.emitter) else {
            debug!("Dropping {:?} for {:?}: emitter is gone", cue.cue, cue.door);
            continue;
        };

        emitter.with_child((
            DoorCueSound,
            AudioPlayer::new(cue.clip.clone()),
            PlaybackSettings::DESPAWN
                .with_volume(Volume::Linear(cue.volume))
                .with_spatial(true),
            Transform::default(),
        ));
    }
}
