//! Validation for door values and cross-references between content definitions.

use std::collections::HashMap;

use super::data::*;
use super::registry::ContentRegistry;
use crate::doors::DoorKind;

/// A validation error with context about what failed.
#[derive(Debug)]
pub struct ValidationError {
    pub source_type: &'static str,
    pub source_id: String,
    pub field: String,
    pub problem: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} '{}' field '{}': {}",
            self.source_type, self.source_id, self.field, self.problem
        )
    }
}

/// Helper macro for recording a failed check
macro_rules! check {
    ($errors:expr, $cond:expr, $source_type:expr, $source_id:expr, $field:expr, $($problem:tt)+) => {
        if !$cond {
            $errors.push(ValidationError {
                source_type: $source_type,
                source_id: $source_id.to_string(),
                field: $field.to_string(),
                problem: format!($($problem)+),
            });
        }
    };
}

fn check_curve(errors: &mut Vec<ValidationError>, door_id: &str, field: &str, curve: &CurveDef) {
    let curve = curve.to_curve();
    check!(errors, !curve.is_empty(), "Door", door_id, field, "curve has no keys");
    check!(
        errors,
        curve.is_sorted(),
        "Door",
        door_id,
        field,
        "key times must be strictly increasing"
    );
}

/// Validate door values and all cross-references in the registry.
/// Returns a list of validation errors, empty if everything is valid.
pub fn validate_content(registry: &ContentRegistry) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut network_ids: HashMap<u64, &str> = HashMap::new();

    for door in registry.doors_sorted() {
        let id = door.id.as_str();

        check!(
            errors,
            door.speed.is_finite() && door.speed > 0.0,
            "Door",
            id,
            "speed",
            "must be positive, got {}",
            door.speed
        );
        check!(
            errors,
            DoorKind::from_name(&door.kind) != DoorKind::Unsupported,
            "Door",
            id,
            "kind",
            "unknown kind '{}', door will not move",
            door.kind
        );
        check_curve(&mut errors, id, "movement_curve", &door.movement_curve);

        if let Some(handle) = &door.handle {
            check_curve(&mut errors, id, "handle.opening_curve", &handle.opening_curve);
            check_curve(&mut errors, id, "handle.closing_curve", &handle.closing_curve);
        }

        if let Some(audio) = &door.audio {
            for (name, clip) in audio.clips() {
                if let Some(clip) = clip {
                    check!(
                        errors,
                        (0.0..=1.0).contains(&clip.volume),
                        "Door",
                        id,
                        format!("audio.{}.volume", name),
                        "volume {} outside [0, 1]",
                        clip.volume
                    );
                }
            }
        }

        if let Some(other) = network_ids.insert(door.network_id, id) {
            errors.push(ValidationError {
                source_type: "Door",
                source_id: id.to_string(),
                field: "network_id".to_string(),
                problem: format!("{} already used by door '{}'", door.network_id, other),
            });
        }
    }

    for handle in registry.interactables_sorted() {
        for (index, slot) in handle.doors.iter().enumerate() {
            if let Some(door_id) = slot {
                check!(
                    errors,
                    registry.doors.contains_key(door_id),
                    "Interactable",
                    handle.id,
                    format!("doors[{}]", index),
                    "references missing Door '{}'",
                    door_id
                );
            }
        }
    }

    errors
}
