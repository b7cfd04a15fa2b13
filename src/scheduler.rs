//! Frame pacing: decides when the host's frame callbacks advance the game.

use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use crate::constants::{LOOP_TIME, MAX_FRAME_DELTA};
use crate::game::Game;
use crate::systems::DeltaTime;

/// How host frames translate into game ticks.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Every host frame advances the game, scaled by the time that actually passed.
    Unthrottled,
    /// The game advances one fixed tick each time a full `LOOP_TIME` has accumulated.
    #[default]
    Throttled,
}

/// Rolling count of ticks per wall-clock second.
#[derive(Debug, Default, Clone, Copy)]
pub struct FpsCounter {
    window_start: Option<Instant>,
    ticks: u32,
    fps: u32,
}

impl FpsCounter {
    const WINDOW: Duration = Duration::from_secs(1);

    /// Records a tick at `now` and returns the count for the last completed second.
    ///
    /// The tick that closes a window is counted towards the next one.
    pub fn record(&mut self, now: Instant) -> u32 {
        let start = *self.window_start.get_or_insert(now);

        if now.saturating_duration_since(start) >= Self::WINDOW {
            self.fps = self.ticks;
            self.ticks = 1;
            self.window_start = Some(now);
            trace!(fps = self.fps, "FPS window closed");
        } else {
            self.ticks += 1;
        }

        self.fps
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// Drives [`Game`] ticks from host frame callbacks.
#[derive(Debug)]
pub struct FrameScheduler {
    pacing: Pacing,
    last_frame: Option<Instant>,
    accumulator: Duration,
    fps: FpsCounter,
    running: bool,
    ticks: u64,
}

impl FrameScheduler {
    pub fn new(pacing: Pacing) -> Self {
        debug!(?pacing, "Creating frame scheduler");
        Self {
            pacing,
            last_frame: None,
            accumulator: Duration::ZERO,
            fps: FpsCounter::default(),
            running: true,
            ticks: 0,
        }
    }

    /// Decides whether the frame at `now` runs a tick, and how much time that tick covers.
    ///
    /// The first frame always ticks. Under throttled pacing, elapsed time accumulates
    /// and a tick consumes one `LOOP_TIME`; any backlog beyond a single pending
    /// interval is dropped rather than replayed. Under unthrottled pacing, a frame
    /// never covers more than `MAX_FRAME_DELTA`.
    pub fn frame(&mut self, now: Instant) -> Option<DeltaTime> {
        if !self.running {
            return None;
        }

        let Some(last) = self.last_frame.replace(now) else {
            return Some(DeltaTime::fixed());
        };
        let elapsed = now.saturating_duration_since(last);

        match self.pacing {
            Pacing::Unthrottled => {
                if elapsed > MAX_FRAME_DELTA {
                    debug!(?elapsed, "Clamping long frame");
                }
                let seconds = elapsed.min(MAX_FRAME_DELTA).as_secs_f32();
                Some(DeltaTime {
                    seconds,
                    ticks: seconds / LOOP_TIME.as_secs_f32(),
                })
            }
            Pacing::Throttled => {
                self.accumulator += elapsed;
                if self.accumulator < LOOP_TIME {
                    trace!(accumulated = ?self.accumulator, "Deferring tick");
                    return None;
                }

                self.accumulator -= LOOP_TIME;
                if self.accumulator > LOOP_TIME {
                    debug!(backlog = ?self.accumulator, "Dropping tick backlog");
                    self.accumulator = LOOP_TIME;
                }
                Some(DeltaTime::fixed())
            }
        }
    }

    /// Handles one host frame. Returns `false` once the scheduler has stopped,
    /// either because the game asked to exit or because [`stop`](Self::stop) was called.
    pub fn drive(&mut self, game: &mut Game, now: Instant) -> bool {
        let Some(delta) = self.frame(now) else {
            return self.running;
        };

        game.set_fps(self.fps.record(now));
        let exit = game.tick(delta);
        self.ticks += 1;

        if exit {
            self.stop(game);
        }
        self.running
    }

    /// Cancels the loop: no further ticks run and the game's gamepads are released.
    pub fn stop(&mut self, game: &mut Game) {
        if !self.running {
            return;
        }
        self.running = false;
        game.release_inputs();
        info!(ticks = self.ticks, "Frame scheduler stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
