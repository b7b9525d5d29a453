//! Doors domain: animation state machine and transition tests.

use avian3d::prelude::ColliderDisabled;
use bevy::prelude::*;

use super::{
    AnimationPhase, BaselinePose, DoorAnimator, DoorConfig, DoorKind, HandleConfig,
    RotatingHandle, TickOutcome, end_pose, euler_degrees_to_quat, move_towards,
    quat_to_euler_degrees,
};
use crate::audio::DoorCue;
use crate::curves::AnimationCurve;
use crate::network::PeerId;
use crate::test_support::{
    CueLog, attach_audio, door_app, is_open, spawn_door, step, toggle, transform,
};

const EPSILON: f32 = 1e-4;

fn hinged(rotation: Vec3) -> DoorConfig {
    DoorConfig {
        kind: DoorKind::HingedSingle,
        speed: 1.5,
        rotation,
        ..default()
    }
}

fn sliding(offset: Vec3) -> DoorConfig {
    DoorConfig {
        kind: DoorKind::SlidingSingle,
        speed: 1.5,
        offset,
        ..default()
    }
}

fn animator_at(door: &Transform) -> DoorAnimator {
    DoorAnimator::new(BaselinePose::capture(door, None), Vec::new())
}

fn assert_rotation(actual: Quat, expected: Quat) {
    assert!(
        actual.abs_diff_eq(expected, EPSILON) || actual.abs_diff_eq(-expected, EPSILON),
        "rotation {:?} != {:?}",
        actual,
        expected
    );
}

fn animator(app: &App, door: Entity) -> DoorAnimator {
    app.world()
        .get::<DoorAnimator>(door)
        .expect("door is initialized")
        .clone()
}

// -----------------------------------------------------------------------------
// Pure state machine
// -----------------------------------------------------------------------------

#[test]
fn test_move_towards_never_overshoots() {
    assert_eq!(move_towards(0.0, 1.0, 0.4), 0.4);
    assert_eq!(move_towards(0.8, 1.0, 0.75), 1.0);
    assert_eq!(move_towards(1.0, 1.0, 0.5), 1.0);
    assert_eq!(move_towards(0.5, 1.0, -3.0), 0.5);
}

#[test]
fn test_euler_round_trip_in_yxz_order() {
    let degrees = Vec3::new(10.0, 45.0, -20.0);
    let back = quat_to_euler_degrees(euler_degrees_to_quat(degrees));
    assert!(back.abs_diff_eq(degrees, 1e-3), "{:?}", back);
}

#[test]
fn test_progress_reaches_exactly_one_for_any_speed() {
    for speed in [0.25, 1.0, 1.5, 3.0, 10.0] {
        let config = DoorConfig {
            speed,
            ..hinged(Vec3::new(0.0, 90.0, 0.0))
        };
        let mut door = Transform::default();
        let mut animator = animator_at(&door);
        animator.begin_transition(&config, true, &door, Quat::IDENTITY);

        let mut elapsed = 0.0;
        let mut finished = false;
        while elapsed < 1.0 / speed + 0.2 {
            let outcome = animator.advance(&config, true, 0.1, &mut door, None);
            finished |= matches!(outcome, TickOutcome::Finished { .. });
            elapsed += 0.1;
            assert!(animator.progress <= 1.0);
        }

        assert!(finished, "speed {} never finished", speed);
        assert_eq!(animator.progress, 1.0);
        assert_eq!(animator.phase, AnimationPhase::Idle);
    }
}

#[test]
fn test_idle_advance_is_noop() {
    let config = hinged(Vec3::new(0.0, 90.0, 0.0));
    let mut door = Transform::default();
    let mut animator = animator_at(&door);

    let outcome = animator.advance(&config, true, 1.0, &mut door, None);

    assert_eq!(outcome, TickOutcome::Idle);
    assert_eq!(animator.progress, 0.0);
    assert_eq!(door, Transform::default());
}

#[test]
fn test_completion_waits_for_matching_state() {
    let config = hinged(Vec3::new(0.0, 90.0, 0.0));
    let mut door = Transform::default();
    let mut animator = animator_at(&door);
    animator.begin_transition(&config, true, &door, Quat::IDENTITY);

    // authoritative flag flipped back without a new transition
    let outcome = animator.advance(&config, false, 5.0, &mut door, None);

    assert_eq!(outcome, TickOutcome::Running);
    assert_eq!(animator.progress, 1.0);
    assert!(animator.is_animating());
}

#[test]
fn test_end_pose_closed_is_baseline() {
    let door = Transform::from_xyz(1.0, 0.0, 2.0).with_rotation(Quat::from_rotation_y(0.3));
    let baseline = BaselinePose::capture(&door, None);

    for config in [hinged(Vec3::new(0.0, 90.0, 0.0)), sliding(Vec3::X)] {
        let pose = end_pose(&baseline, &config, false, door.rotation);
        assert_eq!(pose, baseline.pose());
    }
}

#[test]
fn test_end_pose_hinge_adds_rotation_delta() {
    let door = Transform::from_rotation(euler_degrees_to_quat(Vec3::new(0.0, 30.0, 0.0)));
    let baseline = BaselinePose::capture(&door, None);

    let pose = end_pose(&baseline, &hinged(Vec3::new(0.0, 90.0, 0.0)), true, door.rotation);

    assert_rotation(pose.rotation, euler_degrees_to_quat(Vec3::new(0.0, 120.0, 0.0)));
    assert_eq!(pose.position, baseline.position);
}

#[test]
fn test_end_pose_slide_uses_inverse_world_rotation() {
    let door = Transform::from_xyz(2.0, 0.0, 0.0);
    let baseline = BaselinePose::capture(&door, None);
    let frame = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);

    let pose = end_pose(&baseline, &sliding(Vec3::X), true, frame);

    assert!(
        pose.position.abs_diff_eq(Vec3::new(2.0, 0.0, 1.0), EPSILON),
        "{:?}",
        pose.position
    );
    assert_eq!(pose.rotation, baseline.rotation);
}

#[test]
fn test_double_kinds_match_single_kinds() {
    let door = Transform::from_xyz(0.5, 0.0, 0.0);
    let baseline = BaselinePose::capture(&door, None);
    let frame = Quat::from_rotation_y(0.7);

    let pairs = [
        (DoorKind::HingedSingle, DoorKind::HingedDouble),
        (DoorKind::SlidingSingle, DoorKind::SlidingDouble),
    ];
    for (single, double) in pairs {
        let config = DoorConfig {
            kind: single,
            rotation: Vec3::new(0.0, -80.0, 0.0),
            offset: Vec3::new(0.9, 0.0, 0.0),
            ..default()
        };
        let double_config = DoorConfig {
            kind: double,
            ..config.clone()
        };

        assert_eq!(
            end_pose(&baseline, &config, true, frame),
            end_pose(&baseline, &double_config, true, frame)
        );
    }
}

#[test]
fn test_unsupported_kind_never_moves() {
    let config = DoorConfig {
        kind: DoorKind::Unsupported,
        rotation: Vec3::new(0.0, 90.0, 0.0),
        offset: Vec3::X,
        ..default()
    };
    let start = Transform::from_xyz(1.0, 2.0, 3.0);
    let mut door = start;
    let mut animator = animator_at(&door);

    let cue = animator.begin_transition(&config, true, &door, Quat::IDENTITY);
    for _ in 0..5 {
        animator.advance(&config, true, 0.5, &mut door, None);
    }

    assert_eq!(cue, None);
    assert_eq!(door, start);
    assert!(!animator.is_animating());
}

#[test]
fn test_handle_curve_follows_current_state() {
    let config = DoorConfig {
        handle: Some(HandleConfig {
            max_rotation: Vec3::new(0.0, 0.0, 90.0),
            opening_curve: AnimationCurve::constant(1.0),
            closing_curve: AnimationCurve::constant(0.0),
        }),
        ..hinged(Vec3::new(0.0, 90.0, 0.0))
    };
    let mut door = Transform::default();
    let mut handle = Transform::default();
    let mut animator = DoorAnimator::new(BaselinePose::capture(&door, Some(&handle)), Vec::new());
    let full_turn = euler_degrees_to_quat(Vec3::new(0.0, 0.0, 90.0));

    animator.begin_transition(&config, true, &door, Quat::IDENTITY);
    animator.advance(&config, true, 0.1, &mut door, Some(&mut handle));
    assert_rotation(handle.rotation, full_turn);

    // flag flips mid-flight; progress keeps going, curve switches
    animator.advance(&config, false, 0.1, &mut door, Some(&mut handle));
    assert_rotation(handle.rotation, Quat::IDENTITY);
}

// -----------------------------------------------------------------------------
// Systems
// -----------------------------------------------------------------------------

#[test]
fn test_initialize_captures_baseline_once() {
    let mut app = door_app(PeerId(1));
    let handle = app
        .world_mut()
        .spawn(Transform::from_rotation(Quat::from_rotation_x(0.2)))
        .id();
    let start = Transform::from_xyz(0.0, 0.0, 4.0);
    let door = app
        .world_mut()
        .spawn((
            hinged(Vec3::new(0.0, 90.0, 0.0)),
            super::DoorState::default(),
            start,
            RotatingHandle { entity: handle },
        ))
        .id();

    step(&mut app, 0.0);
    let first = animator(&app, door);
    assert_eq!(first.baseline.position, start.translation);
    assert_eq!(first.baseline.handle_rotation, Some(Quat::from_rotation_x(0.2)));
    assert_eq!(first.phase, AnimationPhase::Idle);

    app.world_mut()
        .get_mut::<Transform>(door)
        .expect("door")
        .translation = Vec3::new(9.0, 9.0, 9.0);
    step(&mut app, 0.1);
    assert_eq!(animator(&app, door).baseline, first.baseline);
}

#[test]
fn test_hinged_open_scenario() {
    let mut app = door_app(PeerId(1));
    let door = spawn_door(&mut app, hinged(Vec3::new(0.0, 90.0, 0.0)), Transform::default());
    attach_audio(&mut app, door);

    assert!(toggle(&mut app, door).expect("owner toggles"));
    assert!(is_open(&app, door));

    step(&mut app, 0.5);
    let mid = animator(&app, door);
    assert!((mid.progress - 0.75).abs() < EPSILON);
    assert!(mid.is_animating());

    step(&mut app, 0.5);
    let done = animator(&app, door);
    assert_eq!(done.progress, 1.0);
    assert!(!done.is_animating());
    assert_rotation(
        transform(&app, door).rotation,
        euler_degrees_to_quat(Vec3::new(0.0, 90.0, 0.0)),
    );

    step(&mut app, 0.5);
    step(&mut app, 0.5);
    let log = app.world().resource::<CueLog>();
    assert_eq!(log.count(door, DoorCue::StartOpening), 1);
    assert_eq!(log.count(door, DoorCue::EndOpening), 1);
    assert_eq!(log.0.len(), 2);
}

#[test]
fn test_open_then_close_returns_to_baseline() {
    let mut app = door_app(PeerId(1));
    let start = Transform::from_rotation(euler_degrees_to_quat(Vec3::new(0.0, 15.0, 0.0)));
    let door = spawn_door(&mut app, hinged(Vec3::new(0.0, 90.0, 0.0)), start);
    attach_audio(&mut app, door);

    toggle(&mut app, door).expect("open");
    step(&mut app, 0.3);
    assert_ne!(transform(&app, door).rotation, start.rotation);

    assert!(!toggle(&mut app, door).expect("close"));
    let restarted = animator(&app, door);
    assert_eq!(restarted.progress, 0.0);
    assert!(!restarted.target_open);

    for _ in 0..4 {
        step(&mut app, 0.25);
    }

    assert_eq!(transform(&app, door).rotation, start.rotation);
    let log = app.world().resource::<CueLog>();
    assert_eq!(log.count(door, DoorCue::StartOpening), 1);
    assert_eq!(log.count(door, DoorCue::StartClosing), 1);
    assert_eq!(log.count(door, DoorCue::EndOpening), 0);
    assert_eq!(log.count(door, DoorCue::EndClosing), 1);
}

#[test]
fn test_sliding_door_moves_by_offset() {
    let mut app = door_app(PeerId(1));
    let start = Transform::from_xyz(2.0, 0.0, 0.0)
        .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
    let door = spawn_door(&mut app, sliding(Vec3::new(1.2, 0.0, 0.0)), start);

    toggle(&mut app, door).expect("open");
    for _ in 0..3 {
        step(&mut app, 0.5);
    }

    let expected = start.translation + start.rotation.inverse() * Vec3::new(1.2, 0.0, 0.0);
    let actual = transform(&app, door);
    assert!(actual.translation.abs_diff_eq(expected, EPSILON), "{:?}", actual.translation);
    assert_eq!(actual.rotation, start.rotation);
}

#[test]
fn test_unset_clips_change_pose_and_colliders_identically() {
    let mut app = door_app(PeerId(1));
    let config = hinged(Vec3::new(0.0, -70.0, 0.0));
    let loud = spawn_door(&mut app, config.clone(), Transform::default());
    let quiet = spawn_door(&mut app, config, Transform::default());
    attach_audio(&mut app, loud);

    let mut panels = Vec::new();
    for door in [loud, quiet] {
        let panel = app.world_mut().spawn_empty().id();
        app.world_mut()
            .get_mut::<DoorAnimator>(door)
            .expect("door")
            .colliders = vec![panel];
        panels.push(panel);
    }

    toggle(&mut app, loud).expect("open loud");
    toggle(&mut app, quiet).expect("open quiet");
    for panel in &panels {
        assert!(app.world().get::<ColliderDisabled>(*panel).is_some());
    }

    step(&mut app, 0.4);
    assert_eq!(transform(&app, loud), transform(&app, quiet));

    step(&mut app, 0.4);
    assert_eq!(transform(&app, loud), transform(&app, quiet));
    for panel in &panels {
        assert!(app.world().get::<ColliderDisabled>(*panel).is_none());
    }

    let log = app.world().resource::<CueLog>();
    assert_eq!(log.count(loud, DoorCue::StartOpening), 1);
    assert_eq!(log.count(loud, DoorCue::EndOpening), 1);
    assert!(log.0.iter().all(|(door, _)| *door != quiet));
}

#[test]
fn test_collision_kept_when_suppression_off() {
    let mut app = door_app(PeerId(1));
    let config = DoorConfig {
        disable_collision_while_animating: false,
        ..hinged(Vec3::new(0.0, 90.0, 0.0))
    };
    let door = spawn_door(&mut app, config, Transform::default());
    let panel = app.world_mut().spawn_empty().id();
    app.world_mut()
        .get_mut::<DoorAnimator>(door)
        .expect("door")
        .colliders = vec![panel];

    toggle(&mut app, door).expect("open");
    step(&mut app, 0.2);

    assert!(app.world().get::<ColliderDisabled>(panel).is_none());
}

#[test]
fn test_unsupported_door_plays_no_start_cue() {
    let mut app = door_app(PeerId(1));
    let config = DoorConfig {
        kind: DoorKind::Unsupported,
        ..hinged(Vec3::new(0.0, 90.0, 0.0))
    };
    let start = Transform::from_xyz(0.0, 1.0, 0.0);
    let door = spawn_door(&mut app, config, start);
    attach_audio(&mut app, door);

    toggle(&mut app, door).expect("toggle");
    for _ in 0..3 {
        step(&mut app, 0.5);
    }

    assert_eq!(transform(&app, door), start);
    assert_eq!(
        app.world()
            .resource::<CueLog>()
            .count(door, DoorCue::StartOpening),
        0
    );
}
