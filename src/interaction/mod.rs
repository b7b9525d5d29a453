//! Interaction domain: door handles that toggle groups of doors.

mod components;
mod events;
mod systems;

pub use components::DoorHandleInteractable;
pub use events::{DoorToggledEvent, HandleUsed, InteractMessage};

use bevy::prelude::*;

use crate::core::DoorSystems;
use crate::interaction::systems::{handle_interactions, use_handle};

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<InteractMessage>()
            .add_message::<DoorToggledEvent>()
            .add_observer(use_handle)
            .add_systems(Update, handle_interactions.in_set(DoorSystems::Interact));
    }
}
