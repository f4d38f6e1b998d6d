use bevy::prelude::{Plugin as BevyPlugin, *};

use crate::umpire::MatchCommand;

/// Command waiting for the next round clock tick. Ticks run slower than
/// frames, so presses wait here until the next tick takes them.
#[derive(Default)]
pub struct PendingCommand(Option<MatchCommand>);
impl PendingCommand {
    pub fn take(&mut self) -> Option<MatchCommand> {
        self.0.take()
    }
}

fn read_keys(keys: Res<Input<KeyCode>>, mut pending: ResMut<PendingCommand>) {
    let command = if keys.just_pressed(KeyCode::Q) || keys.just_pressed(KeyCode::Escape) {
        Some(MatchCommand::Quit)
    } else if keys.just_pressed(KeyCode::S) {
        Some(MatchCommand::Start)
    } else if keys.just_pressed(KeyCode::N) {
        Some(MatchCommand::Restart)
    } else {
        None
    };
    // Quit wins over anything pressed earlier in the same tick
    if command.is_some() && pending.0 != Some(MatchCommand::Quit) {
        pending.0 = command;
    }
}

pub struct Plugin;
impl BevyPlugin for Plugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendingCommand>()
            .add_system(read_keys);
    }
}
