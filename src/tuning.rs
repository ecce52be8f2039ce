use embassy_time::Duration;

use crate::energy::{
    BRIGHTNESS, COOLDOWN, DURATION, EnergyBounds, POWERUP_LENGTH, WARM_UP_BRIGHTNESS,
    WARM_UP_COOLDOWN, WARM_UP_DURATION,
};
use crate::envelope::PulseShape;

/// Tunable parameters shared by all neurones
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeuroneTuning {
    /// Length of an interactive pulse (ms)
    pub duration: EnergyBounds,
    /// Dark interval after an interactive pulse (ms)
    pub cooldown: EnergyBounds,
    /// Peak intensity of an interactive pulse
    pub brightness: EnergyBounds,
    /// Length of the power up pulse (ms)
    pub warm_up_duration: EnergyBounds,
    /// Delay before the power up pulse starts (ms)
    pub warm_up_cooldown: EnergyBounds,
    /// Peak intensity of the power up pulse
    pub warm_up_brightness: EnergyBounds,
    /// How long the power up mode lasts
    pub powerup_length: Duration,
    /// Proportions of every pulse
    pub pulse_shape: PulseShape,
}

impl NeuroneTuning {
    #[allow(clippy::cast_lossless)]
    pub const DEFAULT: Self = Self {
        duration: DURATION,
        cooldown: COOLDOWN,
        brightness: BRIGHTNESS,
        warm_up_duration: WARM_UP_DURATION,
        warm_up_cooldown: WARM_UP_COOLDOWN,
        warm_up_brightness: WARM_UP_BRIGHTNESS,
        powerup_length: Duration::from_millis(POWERUP_LENGTH as u64),
        pulse_shape: PulseShape::DEFAULT,
    };

    #[must_use]
    pub const fn with_powerup_length(mut self, powerup_length: Duration) -> Self {
        self.powerup_length = powerup_length;
        self
    }

    #[must_use]
    pub const fn with_pulse_shape(mut self, pulse_shape: PulseShape) -> Self {
        self.pulse_shape = pulse_shape;
        self
    }
}

impl Default for NeuroneTuning {
    fn default() -> Self {
        Self::DEFAULT
    }
}
