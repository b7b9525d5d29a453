//! Content domain: RON door definitions, session settings and validation.

mod data;
mod loader;
mod registry;
mod validation;

pub use data::{
    AudioDef, ClipDef, CurveDef, DataFile, DoorDef, HandlePartDef, InteractableDef, PlacementDef,
    SessionDef, SimulatedPeerDef,
};
pub use loader::{ContentLoadError, load_all_content, parse_ron};
pub use registry::ContentRegistry;
pub use validation::{ValidationError, validate_content};

use bevy::prelude::*;
use std::path::Path;

use crate::network::LocalPeer;

pub const CONTENT_DIR: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_content);
    }
}

/// Load, validate and publish content. Failures leave an empty registry so
/// the scene still starts.
pub(crate) fn load_content(mut commands: Commands) {
    match load_all_content(Path::new(CONTENT_DIR)) {
        Ok((registry, session)) => {
            for problem in validate_content(&registry) {
                warn!("{}", problem);
            }
            info!("{}", registry.summary());

            let settings = session.settings();
            info!(
                "Session: local {}, master {}",
                settings.local_peer, settings.master_peer
            );
            commands.insert_resource(LocalPeer(settings.local_peer));
            commands.insert_resource(settings);
            commands.insert_resource(registry);
        }
        Err(errors) => {
            for e in errors {
                error!("{}", e);
            }
            commands.insert_resource(ContentRegistry::default());
        }
    }
}
