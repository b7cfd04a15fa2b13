use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use bevy_ecs::system::{IntoSystem, System};
use bevy_ecs::{resource::Resource, world::World};
use circular_buffer::CircularBuffer;
use num_width::NumberWidth;
use parking_lot::Mutex;
use smallvec::SmallVec;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{EnumCount, EnumIter, IntoStaticStr};
use thousands::Separable;

const MAX_SYSTEMS: usize = SystemId::COUNT;
/// The number of ticks kept per system.
const TIMING_WINDOW_SIZE: usize = 30;
/// A single system over this is reported on its own when a tick runs late.
const SLOW_SYSTEM_THRESHOLD: Duration = Duration::from_millis(2);

/// A rolling window of durations for one system.
///
/// Ticks the system did not run in (paused movement, for example) are recorded as zero
/// so the window always covers the same span of ticks.
#[derive(Debug, Default)]
pub struct TimingBuffer {
    buffer: CircularBuffer<TIMING_WINDOW_SIZE, Duration>,
    last_tick: u64,
}

impl TimingBuffer {
    fn fill_skipped(&mut self, current_tick: u64) {
        if current_tick > self.last_tick + 1 {
            let skipped = (current_tick - self.last_tick - 1).min(TIMING_WINDOW_SIZE as u64);
            for _ in 0..skipped {
                self.buffer.push_back(Duration::ZERO);
            }
        }
    }

    /// Records a duration for `current_tick`. Out-of-order ticks are recorded as-is.
    pub fn add_timing(&mut self, duration: Duration, current_tick: u64) {
        self.fill_skipped(current_tick);
        self.buffer.push_back(duration);
        self.last_tick = self.last_tick.max(current_tick);
    }

    pub fn most_recent(&self) -> Duration {
        self.buffer.back().copied().unwrap_or(Duration::ZERO)
    }

    /// Mean and sample standard deviation over the window.
    pub fn stats(&mut self, current_tick: u64) -> (Duration, Duration) {
        if current_tick > self.last_tick {
            self.fill_skipped(current_tick);
            self.last_tick = current_tick;
        }

        // Welford's algorithm
        let mut count = 0u32;
        let mut mean = 0.0f64;
        let mut m2 = 0.0f64;
        for duration in self.buffer.iter() {
            let value = duration.as_secs_f64();
            count += 1;
            let delta = value - mean;
            mean += delta / count as f64;
            m2 += delta * (value - mean);
        }

        if count == 0 {
            return (Duration::ZERO, Duration::ZERO);
        }

        let variance = if count > 1 { m2 / (count - 1) as f64 } else { 0.0 };
        (Duration::from_secs_f64(mean), Duration::from_secs_f64(variance.sqrt()))
    }
}

/// The tick counter of a single game world.
#[derive(Resource, Debug, Default)]
pub struct Timing {
    current_tick: AtomicU64,
}

impl Timing {
    pub fn current_tick(&self) -> u64 {
        self.current_tick.load(Ordering::Relaxed)
    }

    /// Increments the tick counter and returns the new value.
    pub fn increment_tick(&self) -> u64 {
        self.current_tick.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[derive(EnumCount, EnumIter, IntoStaticStr, Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum SystemId {
    Total,
    Input,
    Commands,
    Gamepad,
    Movement,
    DebugOverlay,
    Render,
    Errors,
}

impl Display for SystemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Into::<&'static str>::into(self).to_ascii_lowercase())
    }
}

#[derive(Resource, Debug)]
pub struct SystemTimings {
    timings: micromap::Map<SystemId, Mutex<TimingBuffer>, MAX_SYSTEMS>,
}

impl Default for SystemTimings {
    fn default() -> Self {
        let mut timings = micromap::Map::new();
        for id in SystemId::iter() {
            timings.insert(id, Mutex::new(TimingBuffer::default()));
        }
        Self { timings }
    }
}

impl SystemTimings {
    pub fn add_timing(&self, id: SystemId, duration: Duration, current_tick: u64) {
        if let Some(buffer) = self.timings.get(&id) {
            buffer.lock().add_timing(duration, current_tick);
        }
    }

    pub fn add_total_timing(&self, duration: Duration, current_tick: u64) {
        self.add_timing(SystemId::Total, duration, current_tick);
    }

    pub fn stats(&self, current_tick: u64) -> micromap::Map<SystemId, (Duration, Duration), MAX_SYSTEMS> {
        let mut stats = micromap::Map::new();
        for (id, buffer) in self.timings.iter() {
            stats.insert(*id, buffer.lock().stats(current_tick));
        }
        stats
    }

    /// The systems most likely responsible for a late tick, slowest first.
    ///
    /// Systems over 2ms on the latest tick are returned when there are any; otherwise
    /// the slowest systems until they add up to 30% of the tick, at most five.
    pub fn slowest_systems(&self) -> SmallVec<[(SystemId, Duration); 5]> {
        let mut recent: SmallVec<[(SystemId, Duration); MAX_SYSTEMS]> = self
            .timings
            .iter()
            .filter(|(id, _)| **id != SystemId::Total)
            .map(|(id, buffer)| (*id, buffer.lock().most_recent()))
            .collect();
        recent.sort_by(|a, b| b.1.cmp(&a.1));

        let over_threshold: SmallVec<[(SystemId, Duration); 5]> = recent
            .iter()
            .filter(|(_, duration)| *duration >= SLOW_SYSTEM_THRESHOLD)
            .take(5)
            .copied()
            .collect();
        if !over_threshold.is_empty() {
            return over_threshold;
        }

        let total: Duration = recent.iter().map(|(_, duration)| *duration).sum();
        let threshold = total.as_secs_f64() * 0.3;
        let mut accumulated = 0.0;
        let mut result = SmallVec::new();
        for (id, duration) in recent.iter().take(5) {
            result.push((*id, *duration));
            accumulated += duration.as_secs_f64();
            if accumulated >= threshold {
                break;
            }
        }
        result
    }

    /// Aligned `name : mean ± std` lines, the total first and then the slowest systems.
    pub fn format_timing_display(&self, current_tick: u64) -> SmallVec<[String; MAX_SYSTEMS]> {
        let stats = self.stats(current_tick);
        let (total_avg, total_std) = stats.get(&SystemId::Total).copied().unwrap_or_default();

        let header = match 1.0 / total_avg.as_secs_f64() {
            f if !f.is_finite() => "  --- FPS".to_string(),
            f if f > 100.0 => format!("{:>5} FPS", (f as u32).separate_with_commas()),
            f if f < 10.0 => format!("{f:.1} FPS"),
            f => format!("{f:5.0} FPS"),
        };

        let mut rows = vec![(header, total_avg, total_std)];
        let mut systems: Vec<_> = stats.iter().filter(|(id, _)| **id != SystemId::Total).collect();
        systems.sort_by(|a, b| b.1 .0.cmp(&a.1 .0));
        rows.extend(systems.into_iter().map(|(id, (avg, std))| (id.to_string(), *avg, *std)));

        format_timing_display(rows)
    }
}

/// Wraps a system so each run records its duration under `id`.
pub fn profile<S, M>(id: SystemId, system: S) -> impl FnMut(&mut World)
where
    S: IntoSystem<(), (), M> + 'static,
{
    let mut system: S::System = IntoSystem::into_system(system);
    let mut is_initialized = false;
    move |world: &mut World| {
        if !is_initialized {
            system.initialize(world);
            is_initialized = true;
        }

        let start = Instant::now();
        system.run((), world);
        let duration = start.elapsed();

        if let (Some(timings), Some(timing)) = (world.get_resource::<SystemTimings>(), world.get_resource::<Timing>()) {
            timings.add_timing(id, duration, timing.current_tick());
        }
    }
}

/// Splits a duration into integer part, three-digit fraction and unit.
fn split_duration(duration: Duration) -> (u64, u32, &'static str) {
    if duration >= Duration::from_secs(1) {
        (duration.as_secs(), duration.subsec_millis(), "s")
    } else if duration >= Duration::from_millis(1) {
        (duration.as_millis() as u64, duration.subsec_micros() % 1000, "ms")
    } else if duration >= Duration::from_micros(1) {
        (duration.as_micros() as u64, duration.subsec_nanos() % 1000, "µs")
    } else {
        (duration.as_nanos() as u64, 0, "ns")
    }
}

/// Formats `(name, mean, std_dev)` rows with the columns aligned.
pub fn format_timing_display(
    rows: impl IntoIterator<Item = (String, Duration, Duration)>,
) -> SmallVec<[String; MAX_SYSTEMS]> {
    struct Entry {
        name: String,
        avg: (u64, u32, &'static str),
        std: (u64, u32, &'static str),
    }

    let entries = rows
        .into_iter()
        .map(|(name, avg, std)| Entry {
            name,
            avg: split_duration(avg),
            std: split_duration(std),
        })
        .collect::<SmallVec<[Entry; MAX_SYSTEMS]>>();

    let name_width = entries.iter().map(|e| e.name.chars().count()).max().unwrap_or(0);
    let avg_width = entries.iter().map(|e| e.avg.0.width() as usize).max().unwrap_or(1);
    let std_width = entries.iter().map(|e| e.std.0.width() as usize).max().unwrap_or(1);

    entries
        .iter()
        .map(|e| {
            format!(
                "{name:name_width$} : {avg_int:>avg_width$}.{avg_dec:03}{avg_unit} ± {std_int:>std_width$}.{std_dec:03}{std_unit}",
                name = e.name,
                avg_int = e.avg.0,
                avg_dec = e.avg.1,
                avg_unit = e.avg.2,
                std_int = e.std.0,
                std_dec = e.std.1,
                std_unit = e.std.2,
            )
        })
        .collect()
}
