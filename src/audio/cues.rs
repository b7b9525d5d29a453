//! Audio domain: door cue definitions and the cue message.

use bevy::ecs::message::{Message, MessageWriter};
use bevy::prelude::*;

/// Animation milestones that can play a sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoorCue {
    StartOpening,
    EndOpening,
    StartClosing,
    EndClosing,
}

impl DoorCue {
    /// Cue played when a transition toward `is_open` begins.
    pub fn starting(is_open: bool) -> Self {
        if is_open {
            DoorCue::StartOpening
        } else {
            DoorCue::StartClosing
        }
    }

    /// Cue played when the door settles in the `is_open` pose.
    pub fn ending(is_open: bool) -> Self {
        if is_open {
            DoorCue::EndOpening
        } else {
            DoorCue::EndClosing
        }
    }
}

/// A clip and the volume it plays at.
#[derive(Debug, Clone, PartialEq)]
pub struct CueClip {
    pub clip: Handle<AudioSource>,
    /// Linear volume, clamped to `[0, 1]` at playback.
    pub volume: f32,
}

impl CueClip {
    pub fn new(clip: Handle<AudioSource>, volume: f32) -> Self {
        Self { clip, volume }
    }
}

/// Sound setup for a door. Any part may be missing; missing parts are skipped.
#[derive(Component, Debug, Clone, Default)]
pub struct DoorAudio {
    /// Emitter entity the one-shot sounds are parented to.
    pub source: Option<Entity>,
    pub start_opening: Option<CueClip>,
    pub end_opening: Option<CueClip>,
    pub start_closing: Option<CueClip>,
    pub end_closing: Option<CueClip>,
}

impl DoorAudio {
    pub fn clip(&self, cue: DoorCue) -> Option<&CueClip> {
        match cue {
            DoorCue::StartOpening => self.start_opening.as_ref(),
            DoorCue::EndOpening => self.end_opening.as_ref(),
            DoorCue::StartClosing => self.start_closing.as_ref(),
            DoorCue::EndClosing => self.end_closing.as_ref(),
        }
    }
}

/// Request to play one cue from a door's emitter.
#[derive(Debug, Clone)]
pub struct PlayDoorCue {
    pub door: Entity,
    pub emitter: Entity,
    pub cue: DoorCue,
    pub clip: Handle<AudioSource>,
    pub volume: f32,
}

impl Message for PlayDoorCue {}

/// Queue `cue` for `door` if both an emitter and a clip for it are configured.
/// Returns whether anything was queued.
pub fn dispatch_cue(
    writer: &mut MessageWriter<PlayDoorCue>,
    door: Entity,
    audio: Option<&DoorAudio>,
    cue: DoorCue,
) -> bool {
    let Some(audio) = audio else {
        return false;
    };
    let (Some(emitter), Some(clip)) = (audio.source, audio.clip(cue)) else {
        return false;
    };

    writer.write(PlayDoorCue {
        door,
        emitter,
        cue,
        clip: clip.clip.clone(),
        volume: clip.volume.clamp(0.0, 1.0),
    });
    true
}
