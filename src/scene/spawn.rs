//! Scene domain: camera, floor, door and handle spawning.

use std::collections::HashMap;

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::audio::{CueClip, DoorAudio};
use crate::content::{ClipDef, ContentRegistry, DoorDef, PlacementDef};
use crate::core::SessionSettings;
use crate::doors::{DoorState, RotatingHandle, euler_degrees_to_quat};
use crate::interaction::{DoorHandleInteractable, HandleUsed};
use crate::network::{NetworkId, NetworkOwner};

/// Visible leaf of a door, offset from the hinge pivot.
#[derive(Component, Debug)]
pub struct DoorPanel;

/// Clickable knob that toggles a group of doors.
#[derive(Component, Debug)]
pub struct HandleKnob;

fn placement_transform(placement: &PlacementDef) -> Transform {
    Transform::from_translation(Vec3::from_array(placement.translation))
        .with_rotation(euler_degrees_to_quat(Vec3::from_array(placement.rotation)))
}

fn load_clip(asset_server: &AssetServer, clip: Option<&ClipDef>) -> Option<CueClip> {
    clip.map(|clip| CueClip::new(asset_server.load(clip.path.clone()), clip.volume))
}

fn click_knob(click: On<Pointer<Click>>, mut commands: Commands) {
    commands.trigger(HandleUsed {
        entity: click.entity,
    });
}

pub(crate) fn setup_stage(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 4.0, 9.0).looking_at(Vec3::new(0.0, 1.0, 0.0), Vec3::Y),
        SpatialListener::new(0.3),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Floor
    commands.spawn((
        Name::new("Floor"),
        Mesh3d(meshes.add(Cuboid::new(30.0, 0.2, 30.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::linear_rgb(0.2, 0.3, 0.25),
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::from_xyz(0.0, -0.1, 0.0),
        RigidBody::Static,
        Collider::cuboid(30.0, 0.2, 30.0),
    ));
}

/// Spawn one door hierarchy: hinge pivot, panel collider, optional handle
/// part and optional audio emitter.
fn spawn_door(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    panel_material: Handle<StandardMaterial>,
    handle_material: Handle<StandardMaterial>,
    asset_server: &AssetServer,
    def: &DoorDef,
    owner: NetworkOwner,
) -> Entity {
    let [width, height, thickness] = def.size;

    let door = commands
        .spawn((
            Name::new(def.id.clone()),
            def.config(),
            DoorState::default(),
            NetworkId(def.network_id),
            owner,
            placement_transform(&def.placement),
            Visibility::default(),
            RigidBody::Kinematic,
        ))
        .id();

    // The pivot sits on the hinge edge, so the panel extends along +X.
    commands.spawn((
        DoorPanel,
        Name::new(format!("{} panel", def.id)),
        Mesh3d(meshes.add(Cuboid::new(width, height, thickness))),
        MeshMaterial3d(panel_material),
        Transform::from_xyz(width * 0.5, height * 0.5, 0.0),
        Collider::cuboid(width, height, thickness),
        ChildOf(door),
    ));

    if def.handle.is_some() {
        let handle = commands
            .spawn((
                Name::new(format!("{} handle", def.id)),
                Mesh3d(meshes.add(Cuboid::new(0.18, 0.04, 0.04))),
                MeshMaterial3d(handle_material),
                Transform::from_xyz(width * 0.85, height * 0.45, thickness),
                ChildOf(door),
            ))
            .id();
        commands.entity(door).insert(RotatingHandle { entity: handle });
    }

    if let Some(audio) = &def.audio {
        let emitter = commands
            .spawn((
                Name::new(format!("{} audio", def.id)),
                Transform::from_xyz(width * 0.5, height * 0.5, 0.0),
                Visibility::default(),
                ChildOf(door),
            ))
            .id();

        commands.entity(door).insert(DoorAudio {
            source: Some(emitter),
            start_opening: load_clip(asset_server, audio.start_opening.as_ref()),
            end_opening: load_clip(asset_server, audio.end_opening.as_ref()),
            start_closing: load_clip(asset_server, audio.start_closing.as_ref()),
            end_closing: load_clip(asset_server, audio.end_closing.as_ref()),
        });
    }

    door
}

/// Spawn every door and handle in the registry. Doors start owned by the
/// session's master peer.
pub(crate) fn spawn_doors(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    registry: Option<Res<ContentRegistry>>,
    session: Res<SessionSettings>,
) {
    let Some(registry) = registry else {
        warn!("No content registry, skipping door spawn");
        return;
    };

    let panel_material = materials.add(Color::srgb_u8(140, 100, 70));
    let handle_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.8, 0.75, 0.5),
        metallic: 0.9,
        ..default()
    });
    let knob_material = materials.add(Color::srgb_u8(124, 144, 255));
    let owner = NetworkOwner(session.master_peer);

    let mut spawned: HashMap<&str, Entity> = HashMap::new();
    for def in registry.doors_sorted() {
        let door = spawn_door(
            &mut commands,
            &mut meshes,
            panel_material.clone(),
            handle_material.clone(),
            &asset_server,
            def,
            owner,
        );
        spawned.insert(def.id.as_str(), door);
    }

    for def in registry.interactables_sorted() {
        let doors = def.doors.iter().map(|slot| {
            let id = slot.as_deref()?;
            let door = spawned.get(id).copied();
            if door.is_none() {
                warn!("Handle '{}' references unknown door '{}'", def.id, id);
            }
            door
        });

        commands
            .spawn((
                HandleKnob,
                Name::new(def.id.clone()),
                DoorHandleInteractable::new(doors),
                Pickable::default(),
                Mesh3d(meshes.add(Sphere::new(0.12))),
                MeshMaterial3d(knob_material.clone()),
                placement_transform(&def.placement),
            ))
            .observe(click_knob);
    }

    info!(
        "Spawned {} doors and {} handles (owner {})",
        spawned.len(),
        registry.interactables.len(),
        session.master_peer
    );
}
