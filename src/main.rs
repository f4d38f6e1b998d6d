use bevy::prelude::*;
use bevy::window::WindowMode;

mod audio;
mod bowler;
mod celebrate;
mod clock;
mod controls;
mod cricket;
mod game_flow;
mod game_ui;
mod hand;
mod settings;
mod state;
mod tracker;
mod umpire;

fn main() -> anyhow::Result<()> {
    let settings = settings::Settings::from_env()?;
    let mode = if settings.windowed {
        WindowMode::Windowed
    } else {
        WindowMode::BorderlessFullscreen
    };
    let mut app = App::new();
    app.insert_resource(Msaa { samples: 4 })
        .insert_resource(WindowDescriptor {
            title: "Hand Cricket".to_owned(),
            mode,
            ..Default::default()
        })
        .insert_resource(ClearColor(Color::rgb_u8(16, 48, 24)))
        .add_plugins(DefaultPlugins)
        .add_plugin(bevy_debug_text_overlay::OverlayPlugin::default())
        .add_plugin(audio::Plugin { volume: settings.volume })
        .add_plugin(controls::Plugin)
        .add_plugin(tracker::Plugin)
        .add_plugin(game_flow::Plugin { tick_rate: settings.tick_rate, seed: settings.seed })
        .add_plugin(game_ui::Plugin)
        .add_plugin(celebrate::Plugin);

    #[cfg(feature = "debug")]
    app.add_plugin(bevy_inspector_egui::WorldInspectorPlugin::new());

    app.run();
    Ok(())
}
