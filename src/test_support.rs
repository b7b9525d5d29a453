//! Headless app helpers shared by the ECS tests.

use std::time::Duration;

use bevy::ecs::message::MessageReader;
use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;

use crate::audio::{CueClip, DoorAudio, DoorAudioPlugin, DoorCue, PlayDoorCue};
use crate::core::{CorePlugin, DoorSystems};
use crate::doors::{DoorConfig, DoorState, DoorTransitions, DoorsPlugin};
use crate::interaction::InteractionPlugin;
use crate::network::{
    Envelope, LocalPeer, NetworkId, NetworkOwner, NetworkPlugin, NetworkTransport,
    OutgoingEnvelope, Ownership, Packet, PeerId, ReplicationError,
};

/// Every cue queued so far, in order.
#[derive(Resource, Debug, Default)]
pub struct CueLog(pub Vec<(Entity, DoorCue)>);

impl CueLog {
    pub fn count(&self, door: Entity, cue: DoorCue) -> usize {
        self.0.iter().filter(|entry| **entry == (door, cue)).count()
    }
}

fn record_cues(mut cues: MessageReader<PlayDoorCue>, mut log: ResMut<CueLog>) {
    for cue in cues.read() {
        log.0.push((cue.door, cue.cue));
    }
}

/// Envelopes transmitted and not yet pumped to another app.
#[derive(Resource, Debug, Default)]
pub struct SentLog(pub Vec<Envelope>);

fn record_sent(mut outgoing: MessageReader<OutgoingEnvelope>, mut log: ResMut<SentLog>) {
    for envelope in outgoing.read() {
        log.0.push(envelope.0.clone());
    }
}

/// Door pipeline without window, renderer or physics.
pub fn door_app(local: PeerId) -> App {
    let mut app = App::new();
    app.insert_resource(Time::<()>::default())
        .add_plugins((
            CorePlugin,
            DoorsPlugin,
            NetworkPlugin,
            InteractionPlugin,
            DoorAudioPlugin,
        ))
        .insert_resource(LocalPeer(local))
        .init_resource::<CueLog>()
        .init_resource::<SentLog>()
        .add_systems(Update, record_cues.after(DoorSystems::Animate))
        .add_systems(Update, record_sent.after(DoorSystems::Transmit));
    app
}

/// Advance the clock by `secs` and run one frame.
pub fn step(app: &mut App, secs: f32) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(secs));
    app.update();
}

/// Spawn a door and run a zero-length frame so it gets initialized.
pub fn spawn_door(app: &mut App, config: DoorConfig, transform: Transform) -> Entity {
    let door = app
        .world_mut()
        .spawn((
            config,
            DoorState::default(),
            transform,
            GlobalTransform::from(transform),
        ))
        .id();
    step(app, 0.0);
    door
}

/// Make `door` replicated with the given id and owner.
pub fn replicate(app: &mut App, door: Entity, id: u64, owner: PeerId) {
    app.world_mut()
        .entity_mut(door)
        .insert((NetworkId(id), NetworkOwner(owner)));
}

/// Attach an emitter and a clip for every cue.
pub fn attach_audio(app: &mut App, door: Entity) -> Entity {
    let emitter = app.world_mut().spawn(Transform::default()).id();
    let clip = || Some(CueClip::new(Handle::default(), 0.8));
    app.world_mut().entity_mut(door).insert(DoorAudio {
        source: Some(emitter),
        start_opening: clip(),
        end_opening: clip(),
        start_closing: clip(),
        end_closing: clip(),
    });
    emitter
}

/// Run the owner toggle outside the schedule, as a local interaction would.
pub fn toggle(app: &mut App, door: Entity) -> Result<bool, ReplicationError> {
    app.world_mut()
        .run_system_once(
            move |mut transitions: DoorTransitions, ownership: Ownership| {
                transitions.toggle_as_owner(door, &ownership)
            },
        )
        .expect("toggle system should run")
}

pub fn transform(app: &App, entity: Entity) -> Transform {
    *app.world()
        .get::<Transform>(entity)
        .expect("entity has a transform")
}

pub fn is_open(app: &App, door: Entity) -> bool {
    app.world()
        .get::<DoorState>(door)
        .expect("door has state")
        .is_open
}

/// Decoded packets `app` has transmitted and not yet pumped.
pub fn sent_packets(app: &App) -> Vec<Packet> {
    app.world()
        .resource::<SentLog>()
        .0
        .iter()
        .map(|envelope| envelope.open().expect("own packets decode"))
        .collect()
}

/// Move everything `from` has transmitted into `to`'s inbox.
pub fn pump(from: &mut App, to: &mut App) -> usize {
    let envelopes = std::mem::take(&mut from.world_mut().resource_mut::<SentLog>().0);
    let count = envelopes.len();
    let mut transport = to.world_mut().resource_mut::<NetworkTransport>();
    for envelope in envelopes {
        transport.deliver(envelope);
    }
    count
}
