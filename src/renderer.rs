use embassy_time::Instant;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::command::CommandReceiver;
use crate::energy::RandomSource;
use crate::led::{DEFAULT_LED_TABLE, LedConfig, NUM_LIGHTS};
use crate::neurone::Neurone;
use crate::tuning::NeuroneTuning;

/// Default energy of a freshly booted neurone
pub const DEFAULT_ENERGY: f32 = 0.5;

/// Intensity to write to one pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinLevel {
    pub pin: u8,
    pub intensity: u8,
}

/// Configuration for the neurone array
#[derive(Debug, Clone)]
pub struct NeuroneArrayConfig<const N: usize> {
    /// One entry per LED, in update order
    pub table: [LedConfig; N],
    /// Initial energy of every neurone
    pub energy: f32,
    pub tuning: NeuroneTuning,
}

impl NeuroneArrayConfig<NUM_LIGHTS> {
    pub const DEFAULT: Self = Self {
        table: DEFAULT_LED_TABLE,
        energy: DEFAULT_ENERGY,
        tuning: NeuroneTuning::DEFAULT,
    };
}

impl Default for NeuroneArrayConfig<NUM_LIGHTS> {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Neurone array - owns every neurone and renders one frame per tick
pub struct NeuroneArray<'a, R: RandomSource, const N: usize, const COMMAND_QUEUE_SIZE: usize> {
    // External dependencies and configuration
    commands: CommandReceiver<'a, COMMAND_QUEUE_SIZE>,
    rng: R,
    tuning: NeuroneTuning,

    // Internal state
    neurones: [Neurone; N],
    frame_buffer: [PinLevel; N],
}

impl<'a, R: RandomSource, const N: usize, const COMMAND_QUEUE_SIZE: usize>
    NeuroneArray<'a, R, N, COMMAND_QUEUE_SIZE>
{
    /// Create the array with every neurone disabled at `now`
    pub fn new(
        commands: CommandReceiver<'a, COMMAND_QUEUE_SIZE>,
        rng: R,
        config: &NeuroneArrayConfig<N>,
        now: Instant,
    ) -> Self {
        Self {
            commands,
            rng,
            tuning: config.tuning,
            neurones: core::array::from_fn(|i| Neurone::new(&config.table[i], config.energy, now)),
            frame_buffer: core::array::from_fn(|i| PinLevel {
                pin: config.table[i].pin,
                intensity: 0,
            }),
        }
    }

    /// Process one tick
    ///
    /// Takes at most one pending command and hands it to every neurone in
    /// table order, then returns the intensity of each pin at `now`.
    pub fn render(&mut self, now: Instant) -> &[PinLevel] {
        let command = self.commands.try_receive();

        #[cfg(feature = "esp32-log")]
        {
            if let Some(command) = command.filter(|command| command.instruction().is_none()) {
                println!(
                    "[NeuroneArray.render] ignoring command {:?} ({})",
                    command.instruction, command.argument
                );
            }
        }

        for (neurone, level) in self.neurones.iter_mut().zip(self.frame_buffer.iter_mut()) {
            level.intensity = neurone.tick(now, command, &mut self.rng, &self.tuning);
        }

        &self.frame_buffer
    }

    pub fn neurones(&self) -> &[Neurone] {
        &self.neurones
    }

    pub fn tuning(&self) -> &NeuroneTuning {
        &self.tuning
    }

    /// Replace the tuning; takes effect from the next drawn interval
    pub fn set_tuning(&mut self, tuning: NeuroneTuning) {
        self.tuning = tuning;
    }
}
