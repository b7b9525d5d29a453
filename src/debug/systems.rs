//! Debug domain: hotkeys, overlay and the simulated peer driver.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::core::SessionSettings;
use crate::debug::state::{DebugState, SimulatedPeer};
use crate::debug::ui::{DebugInfoOverlay, spawn_debug_info_overlay};
use crate::doors::{DoorAnimator, DoorState};
use crate::interaction::{DoorHandleInteractable, DoorToggledEvent, InteractMessage};
use crate::network::{LocalPeer, NetworkId, NetworkOwner, NetworkTransport, OutgoingEnvelope};

const HANDLE_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

pub(crate) fn setup_simulated_peer(mut commands: Commands, session: Res<SessionSettings>) {
    if let Some(settings) = &session.simulated_peer {
        info!(
            "[DEBUG] Simulated {} acts every {}s (seed {})",
            settings.peer, settings.interval_secs, settings.seed
        );
        commands.insert_resource(SimulatedPeer::new(settings));
    }
}

/// Toggle the door overlay with F1 or backtick key
pub(crate) fn toggle_debug_overlay(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    existing: Query<Entity, With<DebugInfoOverlay>>,
) {
    let toggle = keyboard.just_pressed(KeyCode::F1) || keyboard.just_pressed(KeyCode::Backquote);
    if !toggle {
        return;
    }

    debug_state.show_info = !debug_state.show_info;
    if debug_state.show_info {
        spawn_debug_info_overlay(&mut commands);
    } else {
        for entity in &existing {
            commands.entity(entity).despawn();
        }
    }
}

/// Digits 1-9 use the Nth handle (sorted by name) as the local peer.
/// P pauses the simulated peer, F2 logs every door.
pub(crate) fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    local: Res<LocalPeer>,
    mut debug_state: ResMut<DebugState>,
    handles: Query<(Entity, &Name), With<DoorHandleInteractable>>,
    doors: Query<(&Name, &DoorState, Option<&NetworkOwner>, &DoorAnimator)>,
    mut interactions: MessageWriter<InteractMessage>,
) {
    if let Some(index) = HANDLE_KEYS.iter().position(|key| keyboard.just_pressed(*key)) {
        let mut sorted: Vec<(Entity, &Name)> = handles.iter().collect();
        sorted.sort_by(|a, b| a.1.as_str().cmp(b.1.as_str()));

        match sorted.get(index) {
            Some((handle, name)) => {
                info!("[DEBUG] {} uses handle '{}'", local.0, name);
                interactions.write(InteractMessage {
                    handle: *handle,
                    peer: local.0,
                });
            }
            None => debug_state.set_message(format!("No handle #{}", index + 1), 2.0),
        }
    }

    if keyboard.just_pressed(KeyCode::KeyP) {
        debug_state.simulation_paused = !debug_state.simulation_paused;
        let msg = if debug_state.simulation_paused {
            "Simulated peer paused"
        } else {
            "Simulated peer resumed"
        };
        debug_state.set_message(msg, 2.0);
        info!("[DEBUG] {}", msg);
    }

    if keyboard.just_pressed(KeyCode::F2) {
        for (name, state, owner, animator) in &doors {
            info!(
                "[DEBUG] {}: open={} owner={:?} phase={:?} progress={:.2}",
                name,
                state.is_open,
                owner.map(|owner| owner.0),
                animator.phase,
                animator.progress
            );
        }
    }
}

/// Let the simulated peer claim and flip an idle door each interval.
pub(crate) fn drive_simulated_peer(
    time: Res<Time>,
    debug_state: Res<DebugState>,
    simulated: Option<ResMut<SimulatedPeer>>,
    doors: Query<(&NetworkId, &DoorState, &DoorAnimator)>,
    mut transport: ResMut<NetworkTransport>,
) {
    let Some(mut simulated) = simulated else {
        return;
    };
    if debug_state.simulation_paused {
        return;
    }

    simulated.timer.tick(time.delta());
    if !simulated.timer.just_finished() {
        return;
    }

    let mut idle: Vec<(NetworkId, bool)> = doors
        .iter()
        .filter(|(_, _, animator)| !animator.is_animating())
        .map(|(id, state, _)| (*id, state.is_open))
        .collect();
    idle.sort_by_key(|(id, _)| *id);

    match simulated.toggle_random(&idle) {
        Ok(Some(envelopes)) => {
            for envelope in envelopes {
                transport.deliver(envelope);
            }
        }
        Ok(None) => debug!("[DEBUG] Simulated peer found no idle door"),
        Err(e) => warn!("{}", e),
    }
}

/// Loop transmitted envelopes back to the simulated peer.
pub(crate) fn loop_back_to_simulated_peer(
    mut outgoing: MessageReader<OutgoingEnvelope>,
    simulated: Option<ResMut<SimulatedPeer>>,
) {
    let Some(mut simulated) = simulated else {
        return;
    };

    for envelope in outgoing.read() {
        match simulated.hear(&envelope.0) {
            Ok(Some(packet)) => debug!("[DEBUG] {} heard {:?}", simulated.peer, packet),
            Ok(None) => {}
            Err(e) => warn!("{}", e),
        }
    }
}

pub(crate) fn log_door_toggles(mut toggled: MessageReader<DoorToggledEvent>) {
    for event in toggled.read() {
        info!(
            "[DEBUG] Handle {:?} toggled {:?} -> open={}",
            event.handle, event.door, event.is_open
        );
    }
}

/// Update status message timer and fade out
pub(crate) fn update_status_message(time: Res<Time>, mut debug_state: ResMut<DebugState>) {
    if let Some((_, ref mut duration)) = debug_state.status_message {
        *duration -= time.delta_secs();
        if *duration <= 0.0 {
            debug_state.status_message = None;
        }
    }
}

/// Rewrite the overlay with one line per door
pub(crate) fn update_debug_info_overlay(
    debug_state: Res<DebugState>,
    local: Res<LocalPeer>,
    doors: Query<(&Name, &DoorState, Option<&NetworkOwner>, &DoorAnimator)>,
    simulated: Option<Res<SimulatedPeer>>,
    mut overlay: Query<&mut Text, With<DebugInfoOverlay>>,
) {
    let Ok(mut text) = overlay.single_mut() else {
        return;
    };

    let mut lines: Vec<String> = doors
        .iter()
        .map(|(name, state, owner, animator)| {
            let owner = owner
                .map(|owner| owner.0.to_string())
                .unwrap_or_else(|| "local".to_string());
            format!(
                "{}: {} | owner {} | {:?} {:.0}%",
                name,
                if state.is_open { "open" } else { "closed" },
                owner,
                animator.phase,
                animator.progress * 100.0
            )
        })
        .collect();
    lines.sort();

    lines.insert(0, format!("Local: {}", local.0));
    if let Some(simulated) = &simulated {
        lines.insert(
            1,
            format!(
                "Simulated {} heard {} packets",
                simulated.peer, simulated.heard
            ),
        );
    }
    if let Some((message, _)) = &debug_state.status_message {
        lines.push(message.clone());
    }

    **text = lines.join("\n");
}
