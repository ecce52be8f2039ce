use embassy_time::Instant;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::command::Command;
use crate::energy::RandomSource;
use crate::led::{Led, LedConfig};
use crate::mode::NeuroneState;
use crate::tuning::NeuroneTuning;

/// One LED together with its animation state
#[derive(Debug, Clone, Copy)]
pub struct Neurone {
    led: Led,
    state: NeuroneState,
}

impl Neurone {
    /// Create a disabled neurone
    pub fn new(config: &LedConfig, energy: f32, now: Instant) -> Self {
        Self {
            led: Led::new(config),
            state: NeuroneState::new(energy, now),
        }
    }

    pub const fn led(&self) -> &Led {
        &self.led
    }

    pub const fn state(&self) -> &NeuroneState {
        &self.state
    }

    pub const fn pin(&self) -> u8 {
        self.led.pin()
    }

    /// Run one tick and return the intensity to write at `now`
    pub fn tick<R: RandomSource + ?Sized>(
        &mut self,
        now: Instant,
        command: Option<Command>,
        rng: &mut R,
        tuning: &NeuroneTuning,
    ) -> u8 {
        let previous = self.state;
        self.state = previous.update(&mut self.led, now, command, rng, tuning);

        #[cfg(feature = "esp32-log")]
        {
            if previous.mode.id() != self.state.mode.id() {
                println!(
                    "[Neurone {}] {} -> {}",
                    self.led.pin(),
                    previous.mode.id().as_str(),
                    self.state.mode.id().as_str()
                );
            }
            if previous.energy.to_bits() != self.state.energy.to_bits() {
                println!(
                    "[Neurone {}] energy {} -> {}",
                    self.led.pin(),
                    previous.energy,
                    self.state.energy
                );
            }
        }

        self.led.envelope.intensity_at(now)
    }
}
