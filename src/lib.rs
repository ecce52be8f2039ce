#![no_std]

pub mod command;
pub mod energy;
pub mod envelope;
pub mod frame_scheduler;
pub mod led;
pub mod mode;
pub mod neurone;
pub mod renderer;
pub mod tuning;

pub use command::{Command, CommandQueue, CommandReceiver, CommandSender, Instruction, QueueFull};
pub use energy::{EnergyBounds, RandomSource};
pub use envelope::{Envelope, KeyFrame, PulseShape};
pub use frame_scheduler::{TickResult, TickScheduler};
pub use led::{DEFAULT_LED_TABLE, Led, LedConfig, NUM_LIGHTS};
pub use mode::{Mode, ModeId, NeuroneState};
pub use neurone::Neurone;
pub use renderer::{NeuroneArray, NeuroneArrayConfig, PinLevel};
pub use tuning::NeuroneTuning;
pub use embassy_time::{Duration, Instant};

/// Abstract LED output trait
///
/// Implement this trait to support different hardware platforms.
/// The tick scheduler is generic over this trait.
pub trait PinDriver {
    /// Write an intensity (0-255) to a pin
    fn write(&mut self, pin: u8, intensity: u8);
}
