//! This module contains the main game logic and state.

use std::time::Instant;

use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::query::With;
use bevy_ecs::schedule::{IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::system::Res;
use bevy_ecs::world::World;
use glam::Vec2;
use tracing::{debug, debug_span, info, warn};

use crate::config::FieldConfig;
use crate::error::{GameError, GameResult};
use crate::events::GameEvent;
use crate::field::FieldLayout;
use crate::systems::control::{command_system, error_report_system};
use crate::systems::debug::debug_overlay_system;
use crate::systems::gamepad::gamepad_system;
use crate::systems::input::input_system;
use crate::systems::movement::player_movement_system;
use crate::systems::render::render_system;
use crate::systems::{
    profile, Bindings, DebugOverlay, DebugState, DeltaTime, FieldRenderer, GamepadDevice, GamepadInput, GamepadReader,
    GlobalState, InputEvent, InputQueue, MovementState, PlayerBundle, PlayerControlled, Position, RendererResource,
    SystemId, SystemTimings, Timing, Velocity,
};

/// System set for gameplay systems, run before anything is drawn
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum GameplaySet {
    /// Drains queued host events and applies commands
    Input,
    /// Samples the gamepad and moves the player
    Update,
}

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum RenderSet {
    Draw,
}

/// Game state built on the Bevy ECS.
///
/// The `World` holds the player entity and the shared resources (input state,
/// gamepad slots, configuration, renderer), while the `Schedule` fixes the order
/// systems run in each tick: input, gamepad poll, movement, then drawing.
/// SDL handles live as non-send resources and every tick runs on the calling thread.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    /// Builds the world, spawns the player and configures the tick schedule.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Config` for an unusable configuration and
    /// `GameError::NoRenderTarget` when the renderer has no surface to draw on;
    /// in both cases no tick is ever run.
    pub fn new(config: FieldConfig, renderer: Box<dyn FieldRenderer>) -> GameResult<Game> {
        info!("Starting game initialization");
        let config = config.validate()?;

        let Some(surface) = renderer.surface_size().filter(|size| size.x > 0 && size.y > 0) else {
            return Err(GameError::NoRenderTarget);
        };
        debug!(width = surface.x, height = surface.y, "Render target ready");

        let mut world = World::default();
        let mut schedule = Schedule::default();

        EventRegistry::register_event::<GameError>(&mut world);
        EventRegistry::register_event::<GameEvent>(&mut world);

        debug!("Inserting resources into ECS world");
        Self::insert_resources(&mut world, config, renderer);

        debug!("Configuring system execution schedule");
        Self::configure_schedule(&mut schedule);

        let spawn = config.spawn_position();
        debug!(x = spawn.x, y = spawn.y, "Spawning player entity");
        world.spawn(PlayerBundle {
            player: PlayerControlled,
            position: Position(spawn),
            velocity: Velocity {
                direction: Vec2::ZERO,
                speed: config.movement_speed,
            },
        });

        info!("Game initialization completed successfully");
        Ok(Game { world, schedule })
    }

    fn insert_resources(world: &mut World, config: FieldConfig, renderer: Box<dyn FieldRenderer>) {
        world.insert_non_send_resource(RendererResource(renderer));
        world.insert_non_send_resource(GamepadReader::new(config.dead_zone));

        world.insert_resource(FieldLayout::new(&config));
        world.insert_resource(config);
        world.insert_resource(GlobalState::default());
        world.insert_resource(DeltaTime::default());
        world.insert_resource(Bindings::default());
        world.insert_resource(InputQueue::default());
        world.insert_resource(MovementState::default());
        world.insert_resource(GamepadInput::default());
        world.insert_resource(DebugState::default());
        world.insert_resource(DebugOverlay::default());
        world.insert_resource(SystemTimings::default());
        world.insert_resource(Timing::default());
    }

    fn configure_schedule(schedule: &mut Schedule) {
        let input_system = profile(SystemId::Input, input_system);
        let command_system = profile(SystemId::Commands, command_system);
        let gamepad_system = profile(SystemId::Gamepad, gamepad_system);
        let movement_system = profile(SystemId::Movement, player_movement_system);
        let debug_overlay_system = profile(SystemId::DebugOverlay, debug_overlay_system);
        let render_system = profile(SystemId::Render, render_system);
        let error_report_system = profile(SystemId::Errors, error_report_system);

        schedule
            .add_systems((
                (input_system, command_system).chain().in_set(GameplaySet::Input),
                (gamepad_system, movement_system).chain().in_set(GameplaySet::Update),
                (debug_overlay_system, render_system).chain().in_set(RenderSet::Draw),
                error_report_system.after(RenderSet::Draw),
            ))
            .configure_sets(
                (
                    GameplaySet::Input,
                    GameplaySet::Update.run_if(|state: Res<GlobalState>| !state.paused),
                    RenderSet::Draw,
                )
                    .chain(),
            );
    }

    /// Runs one tick of every system. Returns `true` once exit has been requested.
    pub fn tick(&mut self, delta: DeltaTime) -> bool {
        self.world.insert_resource(delta);

        let tick = self.world.resource::<Timing>().current_tick() + 1;
        let span = debug_span!("tick", n = tick);
        let _entered = span.enter();

        let start = Instant::now();
        self.schedule.run(&mut self.world);
        let total_duration = start.elapsed();

        // Events live for one extra tick so late readers still see them
        self.world.resource_mut::<Events<GameEvent>>().update();
        self.world.resource_mut::<Events<GameError>>().update();

        let timing = self.world.resource::<Timing>();
        let timings = self.world.resource::<SystemTimings>();
        let new_tick = timing.increment_tick();
        timings.add_total_timing(total_duration, new_tick);

        // A tick may take up to 120% of the time it stands for before it is reported
        let budget = delta.seconds.max(crate::constants::LOOP_TIME.as_secs_f32()) * 1.2;
        if total_duration.as_secs_f32() > budget {
            let slowest = timings
                .slowest_systems()
                .iter()
                .map(|(id, duration)| format!("{id} ({duration:.2?})"))
                .collect::<Vec<_>>()
                .join(", ");
            warn!(
                total = format!("{:.3?}", total_duration),
                tick = new_tick,
                systems = slowest,
                budget = format!("{:.1}ms", budget * 1000.0),
                "Tick took longer than expected"
            );
        }

        self.world.resource::<GlobalState>().exit
    }

    /// Queues a host event for the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.world.resource_mut::<InputQueue>().push(event);
    }

    pub fn connect_gamepad(&mut self, device: Box<dyn GamepadDevice>) -> Option<usize> {
        self.world.non_send_resource_mut::<GamepadReader>().connect(device)
    }

    pub fn disconnect_gamepad(&mut self, instance_id: u32) -> Option<usize> {
        self.world.non_send_resource_mut::<GamepadReader>().disconnect(instance_id)
    }

    pub fn connected_gamepads(&self) -> usize {
        self.world.non_send_resource::<GamepadReader>().connected_count()
    }

    /// Drops every gamepad and any input still queued. Used when the loop is cancelled.
    pub fn release_inputs(&mut self) {
        self.world.non_send_resource_mut::<GamepadReader>().disconnect_all();
        let dropped = self.world.resource_mut::<InputQueue>().drain().count();
        if dropped > 0 {
            debug!(dropped, "Discarded queued input");
        }
    }

    pub fn set_fps(&mut self, fps: u32) {
        let mut debug = self.world.resource_mut::<DebugState>();
        if debug.fps != fps {
            debug.fps = fps;
        }
    }

    pub fn set_debug(&mut self, enabled: bool) {
        self.world.resource_mut::<DebugState>().enabled = enabled;
    }

    pub fn is_paused(&self) -> bool {
        self.world.resource::<GlobalState>().paused
    }

    pub fn movement_state(&self) -> MovementState {
        *self.world.resource::<MovementState>()
    }

    pub fn player_position(&mut self) -> Option<Vec2> {
        self.world
            .query_filtered::<&Position, With<PlayerControlled>>()
            .single(&self.world)
            .ok()
            .map(|position| position.0)
    }

    pub fn player_velocity(&mut self) -> Option<Velocity> {
        self.world
            .query_filtered::<&Velocity, With<PlayerControlled>>()
            .single(&self.world)
            .ok()
            .copied()
    }

    pub fn current_tick(&self) -> u64 {
        self.world.resource::<Timing>().current_tick()
    }
}
