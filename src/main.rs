mod audio;
mod content;
mod core;
mod curves;
#[cfg(feature = "dev-tools")]
mod debug;
mod doors;
mod interaction;
mod network;
mod scene;
#[cfg(test)]
mod test_support;

use avian3d::prelude::*;
use bevy::prelude::*;

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Realfake Doors".to_string(),
            resolution: (1280, 720).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins((PhysicsPlugins::default(), MeshPickingPlugin))
    .add_plugins((
        core::CorePlugin,
        content::ContentPlugin,
        doors::DoorsPlugin,
        network::NetworkPlugin,
        interaction::InteractionPlugin,
        audio::DoorAudioPlugin,
        scene::ScenePlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(debug::DebugPlugin);

    app.run();
}
