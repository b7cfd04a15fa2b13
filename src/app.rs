use std::time::Instant;

use sdl2::event::{Event, WindowEvent};
use sdl2::{EventPump, GameControllerSubsystem, Sdl, VideoSubsystem};
use tracing::{debug, info, trace, warn};

use crate::config::FieldConfig;
use crate::constants::{LOOP_TIME, WINDOW_SCALE};
use crate::error::{GameError, GameResult};
use crate::game::Game;
use crate::platform;
use crate::scheduler::{FrameScheduler, Pacing};
use crate::systems::gamepad::SdlGamepad;
use crate::systems::render::CanvasRenderer;
use crate::systems::{InputEvent, SimpleKeyEvent};

/// Startup choices taken from the command line.
#[derive(Debug, Default, Clone, Copy)]
pub struct AppOptions {
    pub pacing: Pacing,
    pub debug: bool,
}

/// Main application wrapper that manages SDL initialization, window lifecycle, and the game loop.
pub struct App {
    pub game: Game,
    scheduler: FrameScheduler,
    event_pump: EventPump,
    controllers: GameControllerSubsystem,
    focused: bool,
    // Dropping either of these shuts SDL down
    _video_subsystem: VideoSubsystem,
    _sdl_context: Sdl,
}

impl App {
    /// Initializes SDL, opens the window and builds the game.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Sdl` if any SDL initialization step fails, or propagates
    /// errors from `Game::new()`.
    pub fn new(options: AppOptions) -> GameResult<Self> {
        info!("Initializing SDL2 application");
        let sdl_context = sdl2::init().map_err(GameError::Sdl)?;

        debug!("Initializing SDL2 subsystems");
        let video_subsystem = sdl_context.video().map_err(GameError::Sdl)?;
        let controllers = sdl_context.game_controller().map_err(GameError::Sdl)?;
        let event_pump = sdl_context.event_pump().map_err(GameError::Sdl)?;

        let config = FieldConfig::default();
        let canvas_size = config.canvas_pixels();
        let window_width = (canvas_size.x as f32 * WINDOW_SCALE).round() as u32;
        let window_height = (canvas_size.y as f32 * WINDOW_SCALE).round() as u32;

        trace!(width = window_width, height = window_height, scale = WINDOW_SCALE, "Creating game window");
        let window = video_subsystem
            .window("Fieldrunner", window_width, window_height)
            .resizable()
            .position_centered()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;

        let mut canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        canvas
            .set_logical_size(canvas_size.x, canvas_size.y)
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        debug!(renderer_info = ?canvas.info(), "Canvas renderer initialized");

        let mut game = Game::new(config, Box::new(CanvasRenderer::new(canvas)))?;
        game.set_debug(options.debug);

        info!("Application initialization completed successfully");
        Ok(App {
            game,
            scheduler: FrameScheduler::new(options.pacing),
            event_pump,
            controllers,
            focused: true,
            _video_subsystem: video_subsystem,
            _sdl_context: sdl_context,
        })
    }

    /// Runs one host frame: forwards SDL events to the game, lets the scheduler
    /// decide whether to tick, then sleeps out the rest of `LOOP_TIME`.
    ///
    /// Returns `false` once the game has stopped.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();

        self.handle_events();
        if !self.scheduler.drive(&mut self.game, start) {
            return false;
        }

        match LOOP_TIME.checked_sub(start.elapsed()) {
            Some(remaining) if !remaining.is_zero() => platform::sleep(remaining, self.focused),
            Some(_) => {}
            None => warn!(behind = ?(start.elapsed() - LOOP_TIME), "Game loop behind schedule"),
        }

        true
    }

    /// Stops the scheduler, releasing any open controllers.
    pub fn stop(&mut self) {
        self.scheduler.stop(&mut self.game);
    }

    fn handle_events(&mut self) {
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => self.game.push_input(InputEvent::Quit),
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => self.game.push_input(InputEvent::Key(SimpleKeyEvent::KeyDown(key))),
                Event::KeyUp {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => self.game.push_input(InputEvent::Key(SimpleKeyEvent::KeyUp(key))),
                Event::Window { win_event, .. } => match win_event {
                    WindowEvent::FocusLost => {
                        debug!("Window lost focus");
                        self.focused = false;
                        self.game.push_input(InputEvent::FocusLost);
                    }
                    WindowEvent::FocusGained => {
                        debug!("Window gained focus");
                        self.focused = true;
                    }
                    _ => {}
                },
                Event::ControllerDeviceAdded { which, .. } => match self.controllers.open(which) {
                    Ok(controller) => {
                        debug!(index = which, name = %controller.name(), "Opened game controller");
                        self.game.connect_gamepad(Box::new(SdlGamepad::new(controller)));
                    }
                    Err(e) => warn!(index = which, error = %e, "Failed to open gamepad"),
                },
                Event::ControllerDeviceRemoved { which, .. } => {
                    self.game.disconnect_gamepad(which);
                }
                _ => {}
            }
        }
    }
}
