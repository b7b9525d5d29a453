//! Doors domain: the interpolation state machine.
//!
//! Everything here is plain data plus pure functions over it. The systems in
//! `doors::systems` and `doors::transitions` feed it transforms and apply the
//! returned cues and collider changes.

use bevy::prelude::*;

use crate::audio::DoorCue;
use crate::doors::components::{DoorConfig, DoorMotion};

/// Euler order used for all configured rotations: yaw, then pitch, then roll.
const EULER_ORDER: EulerRot = EulerRot::YXZ;

pub fn euler_degrees_to_quat(degrees: Vec3) -> Quat {
    Quat::from_euler(
        EULER_ORDER,
        degrees.y.to_radians(),
        degrees.x.to_radians(),
        degrees.z.to_radians(),
    )
}

pub fn quat_to_euler_degrees(rotation: Quat) -> Vec3 {
    let (y, x, z) = rotation.to_euler(EULER_ORDER);
    Vec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees())
}

/// Local rotation and position of a door.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub rotation: Quat,
    pub position: Vec3,
}

impl Pose {
    pub fn from_transform(transform: &Transform) -> Self {
        Self {
            rotation: transform.rotation,
            position: transform.translation,
        }
    }
}

/// Rest pose captured once when the door is initialized. Every end pose is a
/// delta from this, never from the current transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaselinePose {
    pub rotation: Quat,
    pub rotation_degrees: Vec3,
    pub position: Vec3,
    pub handle_rotation: Option<Quat>,
}

impl BaselinePose {
    pub fn capture(door: &Transform, handle: Option<&Transform>) -> Self {
        Self {
            rotation: door.rotation,
            rotation_degrees: quat_to_euler_degrees(door.rotation),
            position: door.translation,
            handle_rotation: handle.map(|handle| handle.rotation),
        }
    }

    pub fn pose(&self) -> Pose {
        Pose {
            rotation: self.rotation,
            position: self.position,
        }
    }
}

/// Target pose for `is_open`.
///
/// `frame` is the door's current world rotation; a sliding door's offset is
/// expressed in that frame before being added to the baseline position.
pub fn end_pose(baseline: &BaselinePose, config: &DoorConfig, is_open: bool, frame: Quat) -> Pose {
    let mut pose = baseline.pose();
    if !is_open {
        return pose;
    }

    match config.kind.motion() {
        Some(DoorMotion::Hinge) => {
            pose.rotation = euler_degrees_to_quat(baseline.rotation_degrees + config.rotation);
        }
        Some(DoorMotion::Slide) => {
            pose.position = baseline.position + frame.inverse() * config.offset;
        }
        None => {}
    }

    pose
}

/// Step `current` toward `target` by at most `max_delta`, never overshooting.
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let max_delta = max_delta.max(0.0);
    let remaining = target - current;
    if remaining.abs() <= max_delta {
        target
    } else {
        current + remaining.signum() * max_delta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationPhase {
    #[default]
    Idle,
    Animating,
}

/// Result of one [`DoorAnimator::advance`] step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    Running,
    Finished { cue: DoorCue },
}

/// Local, unreplicated animation state of one door.
#[derive(Component, Debug, Clone)]
pub struct DoorAnimator {
    pub phase: AnimationPhase,
    /// Normalized animation time in `[0, 1]`.
    pub progress: f32,
    /// Value of the authoritative flag the running animation was started for.
    pub target_open: bool,
    pub start: Pose,
    pub end: Pose,
    pub baseline: BaselinePose,
    /// Collider entities in the door's subtree, cached at initialization.
    pub colliders: Vec<Entity>,
}

impl DoorAnimator {
    pub fn new(baseline: BaselinePose, colliders: Vec<Entity>) -> Self {
        Self {
            phase: AnimationPhase::Idle,
            progress: 0.0,
            target_open: false,
            start: baseline.pose(),
            end: baseline.pose(),
            baseline,
            colliders,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.phase == AnimationPhase::Animating
    }

    /// Start animating toward `is_open` from wherever `current` is now.
    ///
    /// Returns the start cue, or `None` for kinds that do not move.
    pub fn begin_transition(
        &mut self,
        config: &DoorConfig,
        is_open: bool,
        current: &Transform,
        frame: Quat,
    ) -> Option<DoorCue> {
        self.target_open = is_open;
        self.start = Pose::from_transform(current);
        self.end = end_pose(&self.baseline, config, is_open, frame);
        self.progress = 0.0;
        self.phase = AnimationPhase::Animating;

        config.kind.motion().map(|_| DoorCue::starting(is_open))
    }

    /// Advance by `delta_secs` and write the interpolated pose.
    ///
    /// The handle curve follows the current `is_open`, not `target_open`.
    pub fn advance(
        &mut self,
        config: &DoorConfig,
        is_open: bool,
        delta_secs: f32,
        door: &mut Transform,
        handle: Option<&mut Transform>,
    ) -> TickOutcome {
        if !self.is_animating() {
            return TickOutcome::Idle;
        }

        self.progress = move_towards(self.progress, 1.0, delta_secs * config.speed);
        let eased = config.movement_curve.evaluate(self.progress);

        match config.kind.motion() {
            Some(DoorMotion::Hinge) => {
                door.rotation = if eased >= 1.0 {
                    self.end.rotation
                } else {
                    self.start.rotation.lerp(self.end.rotation, eased)
                };
            }
            Some(DoorMotion::Slide) => {
                door.translation = if eased >= 1.0 {
                    self.end.position
                } else {
                    self.start.position.lerp(self.end.position, eased)
                };
            }
            None => {}
        }

        if let (Some(handle_config), Some(handle), Some(handle_base)) =
            (&config.handle, handle, self.baseline.handle_rotation)
        {
            let handle_target = handle_base * euler_degrees_to_quat(handle_config.max_rotation);
            let curve = if is_open {
                &handle_config.opening_curve
            } else {
                &handle_config.closing_curve
            };
            handle.rotation = handle_base.lerp(handle_target, curve.evaluate(self.progress));
        }

        if self.progress >= 1.0 && self.target_open == is_open {
            self.phase = AnimationPhase::Idle;
            return TickOutcome::Finished {
                cue: DoorCue::ending(is_open),
            };
        }

        TickOutcome::Running
    }
}
