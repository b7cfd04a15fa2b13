use bevy_ecs::{
    event::EventReader,
    system::ResMut,
};
use tracing::{error, info};

use crate::error::GameError;
use crate::events::{GameCommand, GameEvent};
use crate::systems::components::GlobalState;
use crate::systems::debug::DebugState;

/// Applies application commands raised by the input system.
pub fn command_system(mut events: EventReader<GameEvent>, mut state: ResMut<GlobalState>, mut overlay: ResMut<DebugState>) {
    for event in events.read() {
        match event {
            GameEvent::Command(GameCommand::Exit) => {
                info!("Exit requested");
                state.exit = true;
            }
            GameEvent::Command(GameCommand::TogglePause) => {
                state.paused = !state.paused;
                info!("{}", if state.paused { "Paused" } else { "Unpaused" });
            }
            GameEvent::Command(GameCommand::ToggleDebug) => {
                overlay.toggle();
                info!(enabled = overlay.enabled, "Toggled debug overlay");
            }
        }
    }
}

/// Logs errors reported by systems during the tick. None of them stop the game.
pub fn error_report_system(mut errors: EventReader<GameError>) {
    for e in errors.read() {
        error!("{e}");
    }
}
