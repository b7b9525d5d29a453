//! Interaction domain: the handle trigger surface.

use bevy::prelude::*;

/// A surface that toggles a group of doors when used.
///
/// Doors are toggled in list order. A `None` entry is an unset slot and stops
/// the interaction when reached.
#[derive(Component, Debug, Clone, Default)]
pub struct DoorHandleInteractable {
    pub doors: Vec<Option<Entity>>,
}

impl DoorHandleInteractable {
    pub fn new(doors: impl IntoIterator<Item = Option<Entity>>) -> Self {
        Self {
            doors: doors.into_iter().collect(),
        }
    }
}
