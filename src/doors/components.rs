//! Doors domain: door configuration and replicated state components.

use bevy::prelude::*;

use crate::curves::AnimationCurve;

/// How a door moves. Double doors are configured per leaf, so each double
/// variant animates exactly like its single counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DoorKind {
    #[default]
    HingedSingle,
    SlidingSingle,
    HingedDouble,
    SlidingDouble,
    /// Unrecognized kind from content; the door never moves.
    Unsupported,
}

/// The motion a [`DoorKind`] resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorMotion {
    Hinge,
    Slide,
}

impl DoorKind {
    /// Parse a content name. Unknown names degrade to [`DoorKind::Unsupported`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "HingedSingle" | "Hinged" => DoorKind::HingedSingle,
            "SlidingSingle" | "Sliding" => DoorKind::SlidingSingle,
            "HingedDouble" => DoorKind::HingedDouble,
            "SlidingDouble" => DoorKind::SlidingDouble,
            _ => DoorKind::Unsupported,
        }
    }

    pub fn motion(self) -> Option<DoorMotion> {
        match self {
            DoorKind::HingedSingle | DoorKind::HingedDouble => Some(DoorMotion::Hinge),
            DoorKind::SlidingSingle | DoorKind::SlidingDouble => Some(DoorMotion::Slide),
            DoorKind::Unsupported => None,
        }
    }
}

/// Rotation settings for a door's handle part.
#[derive(Debug, Clone, PartialEq)]
pub struct HandleConfig {
    /// Euler degrees applied on top of the handle's baseline rotation.
    pub max_rotation: Vec3,
    pub opening_curve: AnimationCurve,
    pub closing_curve: AnimationCurve,
}

/// Immutable per-door settings, produced by the content loader.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct DoorConfig {
    pub kind: DoorKind,
    /// Progress units per second; a full animation takes `1 / speed` seconds.
    pub speed: f32,
    pub movement_curve: AnimationCurve,
    /// Euler degrees added to the baseline rotation when a hinged door opens.
    pub rotation: Vec3,
    /// Direction and distance a sliding door travels when opening.
    pub offset: Vec3,
    pub handle: Option<HandleConfig>,
    pub disable_collision_while_animating: bool,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            kind: DoorKind::HingedSingle,
            speed: 1.5,
            movement_curve: AnimationCurve::linear(0.0, 0.0, 1.0, 1.0),
            rotation: Vec3::ZERO,
            offset: Vec3::ZERO,
            handle: None,
            disable_collision_while_animating: true,
        }
    }
}

/// The authoritative open/closed flag. This is the only door data that is
/// replicated between peers.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DoorState {
    pub is_open: bool,
}

/// Points a door at the entity that renders its rotating handle.
#[derive(Component, Debug, Clone, Copy)]
pub struct RotatingHandle {
    pub entity: Entity,
}
