//! Neurone mode state machine
//!
//! Every neurone is in exactly one of four modes. [`NeuroneState::update`]
//! is called once per tick and returns the state for the next tick:
//!
//! ```text
//!            i / p                    elapsed
//! Disabled ─────────▶ Powerup ─────────────────▶ Interactive ◀─┐
//!    ▲                                              │           │ elapsed / i
//!    │ d (from any mode)                            ▼ pulse end │
//!    └──────────────────────────────────────────── Cooldown ────┘
//! ```
//!
//! A command that changes the mode wins over any timing based transition in
//! the same tick.

use embassy_time::{Duration, Instant};

use crate::command::{Command, Instruction};
use crate::energy::{RandomSource, clamp_energy};
use crate::envelope::Envelope;
use crate::led::Led;
use crate::tuning::NeuroneTuning;

const MODE_NAME_DISABLED: &str = "disabled";
const MODE_NAME_COOLDOWN: &str = "cooldown";
const MODE_NAME_INTERACTIVE: &str = "interactive";
const MODE_NAME_POWERUP: &str = "powerup";

const MODE_ID_DISABLED: u8 = 0;
const MODE_ID_COOLDOWN: u8 = 1;
const MODE_ID_INTERACTIVE: u8 = 2;
const MODE_ID_POWERUP: u8 = 3;

/// Active behavior of a neurone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// LED is off and waits for a command
    Disabled,
    /// LED is dark for `duration` after a pulse
    Cooldown { duration: Duration },
    /// LED pulses according to its energy
    Interactive,
    /// One-shot intro pulse
    Powerup,
}

/// Known mode ids
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ModeId {
    Disabled = MODE_ID_DISABLED,
    Cooldown = MODE_ID_COOLDOWN,
    Interactive = MODE_ID_INTERACTIVE,
    Powerup = MODE_ID_POWERUP,
}

impl ModeId {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MODE_ID_DISABLED => Self::Disabled,
            MODE_ID_COOLDOWN => Self::Cooldown,
            MODE_ID_INTERACTIVE => Self::Interactive,
            MODE_ID_POWERUP => Self::Powerup,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => MODE_NAME_DISABLED,
            Self::Cooldown => MODE_NAME_COOLDOWN,
            Self::Interactive => MODE_NAME_INTERACTIVE,
            Self::Powerup => MODE_NAME_POWERUP,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            MODE_NAME_DISABLED => Some(Self::Disabled),
            MODE_NAME_COOLDOWN => Some(Self::Cooldown),
            MODE_NAME_INTERACTIVE => Some(Self::Interactive),
            MODE_NAME_POWERUP => Some(Self::Powerup),
            _ => None,
        }
    }
}

impl Mode {
    pub const fn id(&self) -> ModeId {
        match self {
            Self::Disabled => ModeId::Disabled,
            Self::Cooldown { .. } => ModeId::Cooldown,
            Self::Interactive => ModeId::Interactive,
            Self::Powerup => ModeId::Powerup,
        }
    }
}

/// State of one neurone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeuroneState {
    /// Energy level (0.0 = low, 1.0 = high)
    pub energy: f32,
    /// When the current mode started
    pub started_at: Instant,
    /// Current mode
    pub mode: Mode,
}

impl NeuroneState {
    /// Disabled neurone with the given energy
    pub fn new(energy: f32, now: Instant) -> Self {
        Self {
            energy: clamp_energy(energy),
            started_at: now,
            mode: Mode::Disabled,
        }
    }

    /// Time spent in the current mode
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }

    /// Advance the state machine by one tick
    ///
    /// `led` must be the LED this state belongs to. Its envelope is rewritten
    /// whenever a pulse starts or the neurone is disabled.
    #[must_use]
    pub fn update<R: RandomSource + ?Sized>(
        mut self,
        led: &mut Led,
        now: Instant,
        command: Option<Command>,
        rng: &mut R,
        tuning: &NeuroneTuning,
    ) -> Self {
        if let Some(instruction) = command.and_then(|command| command.instruction()) {
            if let Some(next) = self.apply(instruction, led, now) {
                return next;
            }
        }

        match self.mode {
            Mode::Disabled => self,
            Mode::Powerup => self.powerup(led, now, rng, tuning),
            Mode::Interactive => self.interactive(led, now, rng, tuning),
            Mode::Cooldown { duration } => self.cooldown(duration, now),
        }
    }

    /// Apply a command
    ///
    /// Returns the next state if the command switches mode. Energy changes are
    /// applied in place and leave the timing rules to run.
    fn apply(&mut self, instruction: Instruction, led: &mut Led, now: Instant) -> Option<Self> {
        match (instruction, self.mode) {
            (Instruction::SetEnergy(energy), _) => {
                self.energy = clamp_energy(energy);
                None
            }
            (Instruction::EnterDisabled, Mode::Disabled) => None,
            (Instruction::EnterDisabled, _) => Some(self.disable(led, now)),
            (Instruction::EnterInteractive | Instruction::EnterPowerup, Mode::Disabled) => {
                Some(self.enter_powerup(led, now))
            }
            (Instruction::EnterPowerup, Mode::Interactive | Mode::Cooldown { .. }) => {
                Some(self.enter_powerup(led, now))
            }
            (Instruction::EnterInteractive, Mode::Cooldown { .. }) => {
                Some(self.switch(Mode::Interactive, now))
            }
            (Instruction::EnterInteractive | Instruction::EnterPowerup, Mode::Powerup)
            | (Instruction::EnterInteractive, Mode::Interactive) => None,
        }
    }

    fn switch(&self, mode: Mode, now: Instant) -> Self {
        Self {
            energy: self.energy,
            started_at: now,
            mode,
        }
    }

    fn disable(&self, led: &mut Led, now: Instant) -> Self {
        led.clear();
        self.switch(Mode::Disabled, now)
    }

    fn enter_powerup(&self, led: &mut Led, now: Instant) -> Self {
        led.power_up_processed = false;
        self.switch(Mode::Powerup, now)
    }

    fn powerup<R: RandomSource + ?Sized>(
        self,
        led: &mut Led,
        now: Instant,
        rng: &mut R,
        tuning: &NeuroneTuning,
    ) -> Self {
        if !led.power_up_processed {
            let delay = tuning.warm_up_cooldown.draw_millis(self.energy, rng);
            let duration = tuning.warm_up_duration.draw_millis(self.energy, rng);
            let brightness = tuning.warm_up_brightness.draw_intensity(self.energy, rng);
            led.start_pulse(Envelope::pulse(
                now + delay,
                duration,
                brightness,
                tuning.pulse_shape,
            ));
            led.power_up_processed = true;
        }

        if self.elapsed(now) < tuning.powerup_length {
            return self;
        }
        led.power_up_processed = false;
        self.switch(Mode::Interactive, now)
    }

    fn interactive<R: RandomSource + ?Sized>(
        self,
        led: &mut Led,
        now: Instant,
        rng: &mut R,
        tuning: &NeuroneTuning,
    ) -> Self {
        if !led.envelope.is_elapsed(now) {
            return self;
        }

        if led.on {
            led.on = false;
            let duration = tuning.cooldown.draw_millis(self.energy, rng);
            return self.switch(Mode::Cooldown { duration }, now);
        }

        let duration = tuning.duration.draw_millis(self.energy, rng);
        let brightness = tuning.brightness.draw_intensity(self.energy, rng);
        led.start_pulse(Envelope::pulse(
            now,
            duration,
            brightness,
            tuning.pulse_shape,
        ));
        self
    }

    fn cooldown(self, duration: Duration, now: Instant) -> Self {
        if self.elapsed(now) < duration {
            return self;
        }
        self.switch(Mode::Interactive, now)
    }
}
