//! ContentRegistry resource providing HashMap lookups for all loaded content.

use bevy::prelude::*;
use std::collections::HashMap;

use super::data::*;

/// Central registry for all loaded door content.
/// Provides O(1) lookup by id for any content type.
#[derive(Resource, Debug, Default)]
pub struct ContentRegistry {
    pub doors: HashMap<String, DoorDef>,
    pub interactables: HashMap<String, InteractableDef>,
}

impl ContentRegistry {
    /// Returns a summary of loaded content counts for logging.
    pub fn summary(&self) -> String {
        format!(
            "ContentRegistry loaded:\n\
             - Doors: {}\n\
             - Interactables: {}",
            self.doors.len(),
            self.interactables.len(),
        )
    }

    /// Door definitions ordered by id, for deterministic spawning.
    pub fn doors_sorted(&self) -> Vec<&DoorDef> {
        let mut doors: Vec<&DoorDef> = self.doors.values().collect();
        doors.sort_by(|a, b| a.id.cmp(&b.id));
        doors
    }

    pub fn interactables_sorted(&self) -> Vec<&InteractableDef> {
        let mut handles: Vec<&InteractableDef> = self.interactables.values().collect();
        handles.sort_by(|a, b| a.id.cmp(&b.id));
        handles
    }
}
