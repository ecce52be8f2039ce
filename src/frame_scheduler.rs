//! Tick scheduling and timing utilities.
//!
//! Provides portable tick pacing without async/await or platform-specific
//! timers. The caller is responsible for sleeping/waiting between ticks.

use embassy_time::{Duration, Instant};

use crate::PinDriver;
use crate::energy::RandomSource;
use crate::renderer::NeuroneArray;

/// Default control loop rate (100 Hz).
pub const DEFAULT_TICK_RATE: u32 = 100;

/// Default tick period based on the tick rate.
pub const DEFAULT_TICK_DURATION: Duration =
    Duration::from_millis(1000 / DEFAULT_TICK_RATE as u64);

/// Result of a tick.
#[derive(Debug, Clone, Copy)]
pub struct TickResult {
    /// The deadline for the next tick.
    pub next_deadline: Instant,
    /// How long to wait until the next tick (zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Drives the neurone array and writes every frame to the hardware.
///
/// ```ignore
/// let mut scheduler = TickScheduler::new(array, driver);
///
/// loop {
///     let result = scheduler.tick(Instant::from_millis(millis()));
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct TickScheduler<
    'a,
    D: PinDriver,
    R: RandomSource,
    const N: usize,
    const COMMAND_QUEUE_SIZE: usize,
> {
    driver: D,
    array: NeuroneArray<'a, R, N, COMMAND_QUEUE_SIZE>,
    next_tick: Instant,
    tick_duration: Duration,
}

impl<'a, D: PinDriver, R: RandomSource, const N: usize, const COMMAND_QUEUE_SIZE: usize>
    TickScheduler<'a, D, R, N, COMMAND_QUEUE_SIZE>
{
    /// Create a scheduler running at `DEFAULT_TICK_RATE`.
    pub fn new(array: NeuroneArray<'a, R, N, COMMAND_QUEUE_SIZE>, driver: D) -> Self {
        Self::with_tick_duration(array, driver, DEFAULT_TICK_DURATION)
    }

    pub fn with_tick_duration(
        array: NeuroneArray<'a, R, N, COMMAND_QUEUE_SIZE>,
        driver: D,
        tick_duration: Duration,
    ) -> Self {
        Self {
            driver,
            array,
            next_tick: Instant::from_millis(0),
            tick_duration,
        }
    }

    /// Run one control loop iteration.
    ///
    /// Falls back to `now` when more than two periods behind, so a long stall
    /// does not cause a burst of catch-up ticks.
    pub fn tick(&mut self, now: Instant) -> TickResult {
        let max_drift = self.tick_duration.as_millis() * 2;
        if now.as_millis() > self.next_tick.as_millis() + max_drift {
            self.next_tick = now;
        }

        for level in self.array.render(now) {
            self.driver.write(level.pin, level.intensity);
        }

        self.next_tick += self.tick_duration;

        let sleep_duration = if self.next_tick > now {
            self.next_tick - now
        } else {
            Duration::from_millis(0)
        };

        TickResult {
            next_deadline: self.next_tick,
            sleep_duration,
        }
    }

    pub fn array(&self) -> &NeuroneArray<'a, R, N, COMMAND_QUEUE_SIZE> {
        &self.array
    }

    pub fn array_mut(&mut self) -> &mut NeuroneArray<'a, R, N, COMMAND_QUEUE_SIZE> {
        &mut self.array
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }
}
