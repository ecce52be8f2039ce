//! Energy mapping
//!
//! A neurone's energy (0.0 = low, 1.0 = high) selects where each tunable
//! parameter sits between its low-energy and high-energy bounds. A value is
//! then drawn at random from the blended range so that pulses never line up
//! perfectly.

use embassy_time::Duration;

/// Shortest pulse when the neurone is at high energy (ms)
pub const DURATION_LOWER_HE: u32 = 150;
/// Longest pulse when the neurone is at high energy (ms)
pub const DURATION_UPPER_HE: u32 = 350;
/// Shortest pulse when the neurone is at low energy (ms)
pub const DURATION_LOWER_LE: u32 = 3000;
/// Longest pulse when the neurone is at low energy (ms)
pub const DURATION_UPPER_LE: u32 = 6000;

/// Shortest gap between pulses at high energy (ms)
pub const COOLDOWN_LOWER_HE: u32 = 150;
/// Longest gap between pulses at high energy (ms)
pub const COOLDOWN_UPPER_HE: u32 = 350;
/// Shortest gap between pulses at low energy (ms)
pub const COOLDOWN_LOWER_LE: u32 = 3000;
/// Longest gap between pulses at low energy (ms)
pub const COOLDOWN_UPPER_LE: u32 = 6000;

/// Dimmest pulse at high energy
pub const BRIGHT_LOWER_HE: u8 = 105;
/// Dimmest pulse at low energy
pub const BRIGHT_LOWER_LE: u8 = 5;
/// Brightest pulse at high energy
pub const BRIGHT_UPPER_HE: u8 = 255;
/// Brightest pulse at low energy
pub const BRIGHT_UPPER_LE: u8 = 20;

/// Length of the power up animation (ms)
pub const POWERUP_LENGTH: u32 = 20_000;

pub const WARM_UP_LOWER_DURATION_LE: u32 = 20_000;
pub const WARM_UP_UPPER_DURATION_LE: u32 = 30_000;
pub const WARM_UP_LOWER_DURATION_HE: u32 = 3000;
pub const WARM_UP_UPPER_DURATION_HE: u32 = 4000;

pub const WARM_UP_COOLDOWN_LE: u32 = 6000;
pub const WARM_UP_COOLDOWN_HE: u32 = 0;

pub const WARM_UP_BRIGHT_LE: u8 = 255;
pub const WARM_UP_BRIGHT_HE: u8 = 5;

/// Source of uniformly distributed random numbers
pub trait RandomSource {
    /// Next value in `[0.0, 1.0)`
    fn unit(&mut self) -> f32;
}

impl RandomSource for fastrand::Rng {
    fn unit(&mut self) -> f32 {
        self.f32()
    }
}

/// Lower and upper bounds of one parameter at high and low energy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyBounds {
    pub lower_he: f32,
    pub upper_he: f32,
    pub lower_le: f32,
    pub upper_le: f32,
}

/// Pulse duration bounds (ms)
pub const DURATION: EnergyBounds = EnergyBounds::from_millis(
    DURATION_LOWER_HE,
    DURATION_UPPER_HE,
    DURATION_LOWER_LE,
    DURATION_UPPER_LE,
);

/// Cooldown bounds (ms)
pub const COOLDOWN: EnergyBounds = EnergyBounds::from_millis(
    COOLDOWN_LOWER_HE,
    COOLDOWN_UPPER_HE,
    COOLDOWN_LOWER_LE,
    COOLDOWN_UPPER_LE,
);

/// Pulse brightness bounds
pub const BRIGHTNESS: EnergyBounds = EnergyBounds::from_intensity(
    BRIGHT_LOWER_HE,
    BRIGHT_UPPER_HE,
    BRIGHT_LOWER_LE,
    BRIGHT_UPPER_LE,
);

/// Power up pulse duration bounds (ms)
pub const WARM_UP_DURATION: EnergyBounds = EnergyBounds::from_millis(
    WARM_UP_LOWER_DURATION_HE,
    WARM_UP_UPPER_DURATION_HE,
    WARM_UP_LOWER_DURATION_LE,
    WARM_UP_UPPER_DURATION_LE,
);

/// Delay before the power up pulse starts (ms)
pub const WARM_UP_COOLDOWN: EnergyBounds = EnergyBounds::from_millis(
    WARM_UP_COOLDOWN_HE,
    WARM_UP_COOLDOWN_HE,
    WARM_UP_COOLDOWN_LE,
    WARM_UP_COOLDOWN_LE,
);

/// Power up pulse brightness
pub const WARM_UP_BRIGHTNESS: EnergyBounds = EnergyBounds::from_intensity(
    WARM_UP_BRIGHT_HE,
    WARM_UP_BRIGHT_HE,
    WARM_UP_BRIGHT_LE,
    WARM_UP_BRIGHT_LE,
);

impl EnergyBounds {
    pub const fn new(lower_he: f32, upper_he: f32, lower_le: f32, upper_le: f32) -> Self {
        Self {
            lower_he,
            upper_he,
            lower_le,
            upper_le,
        }
    }

    /// Bounds expressed in milliseconds
    #[allow(clippy::cast_precision_loss)]
    pub const fn from_millis(lower_he: u32, upper_he: u32, lower_le: u32, upper_le: u32) -> Self {
        Self::new(
            lower_he as f32,
            upper_he as f32,
            lower_le as f32,
            upper_le as f32,
        )
    }

    /// Bounds expressed as LED intensities
    pub const fn from_intensity(lower_he: u8, upper_he: u8, lower_le: u8, upper_le: u8) -> Self {
        Self::new(
            lower_he as f32,
            upper_he as f32,
            lower_le as f32,
            upper_le as f32,
        )
    }

    /// Effective `(lower, upper)` range at the given energy
    pub fn range(&self, energy: f32) -> (f32, f32) {
        let energy = clamp_energy(energy);
        (
            lerp(self.lower_le, self.lower_he, energy),
            lerp(self.upper_le, self.upper_he, energy),
        )
    }

    /// Draw a value from the range at the given energy
    pub fn draw<R: RandomSource + ?Sized>(&self, energy: f32, rng: &mut R) -> f32 {
        let (lower, upper) = self.range(energy);
        let unit = unit_or_zero(rng.unit());
        lower + (upper - lower) * unit
    }

    /// Draw a duration, rounded to the nearest millisecond
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn draw_millis<R: RandomSource + ?Sized>(&self, energy: f32, rng: &mut R) -> Duration {
        let millis = libm::roundf(self.draw(energy, rng)).max(0.0);
        Duration::from_millis(millis as u64)
    }

    /// Draw an LED intensity
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn draw_intensity<R: RandomSource + ?Sized>(&self, energy: f32, rng: &mut R) -> u8 {
        libm::roundf(self.draw(energy, rng)).clamp(0.0, 255.0) as u8
    }
}

/// Clamp an energy level into `[0.0, 1.0]`
///
/// NaN is treated as low energy.
pub fn clamp_energy(energy: f32) -> f32 {
    if energy.is_nan() {
        return 0.0;
    }
    energy.clamp(0.0, 1.0)
}

#[inline]
fn lerp(low_energy: f32, high_energy: f32, energy: f32) -> f32 {
    low_energy + (high_energy - low_energy) * energy
}

// Out-of-range draws are pinned to the range ends
fn unit_or_zero(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}
