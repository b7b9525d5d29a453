//! Data definitions for all RON content files.
//!
//! These structs mirror the structure in assets/data/*.ron and are used
//! for deserialization. The ContentRegistry provides lookup by id.

use serde::{Deserialize, Serialize};

use crate::core::{SessionSettings, SimulatedPeerSettings};
use bevy::math::Vec3;

use crate::curves::{AnimationCurve, Keyframe};
use crate::doors::{DoorConfig, DoorKind, HandleConfig};
use crate::network::PeerId;

// ============================================================================
// Common wrapper for RON files with schema_version and items
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

// ============================================================================
// Shared pieces
// ============================================================================

/// Curve presets, or explicit keys.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub enum CurveDef {
    #[default]
    Linear,
    EaseInOut,
    Constant(f32),
    Keys(Vec<Keyframe>),
}

impl CurveDef {
    pub fn to_curve(&self) -> AnimationCurve {
        match self {
            CurveDef::Linear => AnimationCurve::linear(0.0, 0.0, 1.0, 1.0),
            CurveDef::EaseInOut => AnimationCurve::ease_in_out(),
            CurveDef::Constant(value) => AnimationCurve::constant(*value),
            CurveDef::Keys(keys) => AnimationCurve::new(keys.clone()),
        }
    }
}

/// Where an object sits in its parent's space.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlacementDef {
    pub translation: [f32; 3],
    /// Euler degrees.
    #[serde(default)]
    pub rotation: [f32; 3],
}

// ============================================================================
// Doors (doors.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DoorDef {
    pub id: String,
    /// Replication id; must be unique and identical on every peer.
    pub network_id: u64,
    /// HingedSingle, SlidingSingle, HingedDouble or SlidingDouble.
    pub kind: String,
    #[serde(default = "default_speed")]
    pub speed: f32,
    #[serde(default)]
    pub movement_curve: CurveDef,
    /// Euler degrees a hinged door turns when opening.
    #[serde(default)]
    pub rotation: [f32; 3],
    /// Distance a sliding door travels when opening.
    #[serde(default)]
    pub offset: [f32; 3],
    pub placement: PlacementDef,
    /// Panel width, height and thickness.
    #[serde(default = "default_panel_size")]
    pub size: [f32; 3],
    #[serde(default)]
    pub handle: Option<HandlePartDef>,
    #[serde(default)]
    pub audio: Option<AudioDef>,
    #[serde(default = "default_true")]
    pub disable_collision_while_animating: bool,
}

impl DoorDef {
    /// Runtime settings for this door.
    pub fn config(&self) -> DoorConfig {
        DoorConfig {
            kind: DoorKind::from_name(&self.kind),
            speed: self.speed,
            movement_curve: self.movement_curve.to_curve(),
            rotation: Vec3::from_array(self.rotation),
            offset: Vec3::from_array(self.offset),
            handle: self.handle.as_ref().map(|handle| HandleConfig {
                max_rotation: Vec3::from_array(handle.max_rotation),
                opening_curve: handle.opening_curve.to_curve(),
                closing_curve: handle.closing_curve.to_curve(),
            }),
            disable_collision_while_animating: self.disable_collision_while_animating,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HandlePartDef {
    /// Euler degrees the handle turns at full deflection.
    pub max_rotation: [f32; 3],
    #[serde(default)]
    pub opening_curve: CurveDef,
    #[serde(default)]
    pub closing_curve: CurveDef,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AudioDef {
    #[serde(default)]
    pub start_opening: Option<ClipDef>,
    #[serde(default)]
    pub end_opening: Option<ClipDef>,
    #[serde(default)]
    pub start_closing: Option<ClipDef>,
    #[serde(default)]
    pub end_closing: Option<ClipDef>,
}

impl AudioDef {
    pub fn clips(&self) -> [(&'static str, Option<&ClipDef>); 4] {
        [
            ("start_opening", self.start_opening.as_ref()),
            ("end_opening", self.end_opening.as_ref()),
            ("start_closing", self.start_closing.as_ref()),
            ("end_closing", self.end_closing.as_ref()),
        ]
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClipDef {
    /// Asset path of the clip.
    pub path: String,
    #[serde(default = "default_volume")]
    pub volume: f32,
}

fn default_speed() -> f32 {
    1.5
}

fn default_panel_size() -> [f32; 3] {
    [1.0, 2.1, 0.08]
}

fn default_true() -> bool {
    true
}

fn default_volume() -> f32 {
    1.0
}

// ============================================================================
// Handles (handles.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InteractableDef {
    pub id: String,
    pub placement: PlacementDef,
    /// Door ids toggled in order. `None` is an unset slot.
    pub doors: Vec<Option<String>>,
}

// ============================================================================
// Session (session.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionDef {
    pub schema_version: u32,
    pub local_peer: u64,
    pub master_peer: u64,
    #[serde(default)]
    pub simulated_peer: Option<SimulatedPeerDef>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulatedPeerDef {
    pub peer: u64,
    pub seed: u64,
    pub interval_secs: f32,
}

impl SessionDef {
    pub fn settings(&self) -> SessionSettings {
        SessionSettings {
            local_peer: PeerId(self.local_peer),
            master_peer: PeerId(self.master_peer),
            simulated_peer: self.simulated_peer.as_ref().map(|sim| SimulatedPeerSettings {
                peer: PeerId(sim.peer),
                seed: sim.seed,
                interval_secs: sim.interval_secs,
            }),
        }
    }
}
