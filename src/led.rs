use crate::envelope::{Envelope, KeyFrame};

/// Number of LEDs in the default installation
pub const NUM_LIGHTS: usize = 13;

/// Initial configuration of one LED
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedConfig {
    /// Output pin the LED is connected to
    pub pin: u8,
    /// Envelope the LED starts with
    pub envelope: Envelope,
}

impl LedConfig {
    /// LED on `pin` with the placeholder keyframes at 0, 1, 2 and 3 ms
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            envelope: Envelope::new(
                KeyFrame::new(0, 0),
                KeyFrame::new(0, 1),
                KeyFrame::new(0, 2),
                KeyFrame::new(0, 3),
            ),
        }
    }

    #[must_use]
    pub const fn with_envelope(mut self, envelope: Envelope) -> Self {
        self.envelope = envelope;
        self
    }
}

/// Default pin table
///
/// The pin 13 row starts its plateau at 2 ms instead of 1 ms.
pub const DEFAULT_LED_TABLE: [LedConfig; NUM_LIGHTS] = [
    LedConfig::new(44),
    LedConfig::new(2),
    LedConfig::new(3),
    LedConfig::new(4),
    LedConfig::new(5),
    LedConfig::new(6),
    LedConfig::new(7),
    LedConfig::new(8),
    LedConfig::new(9),
    LedConfig::new(10),
    LedConfig::new(11),
    LedConfig::new(12),
    LedConfig::new(13).with_envelope(Envelope::new(
        KeyFrame::new(0, 0),
        KeyFrame::new(0, 2),
        KeyFrame::new(0, 2),
        KeyFrame::new(0, 3),
    )),
];

/// Output state of a single LED
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Led {
    pin: u8,
    /// Is a pulse in flight?
    pub on: bool,
    /// Has the power up pulse been scheduled?
    pub power_up_processed: bool,
    /// Current pulse
    pub envelope: Envelope,
}

impl Led {
    pub const fn new(config: &LedConfig) -> Self {
        Self {
            pin: config.pin,
            on: false,
            power_up_processed: false,
            envelope: config.envelope,
        }
    }

    /// Output pin of this LED
    pub const fn pin(&self) -> u8 {
        self.pin
    }

    /// Replace the current pulse and mark the LED as on
    pub fn start_pulse(&mut self, envelope: Envelope) {
        self.envelope = envelope;
        self.on = true;
    }

    /// Turn the LED off and forget its pulse
    pub fn clear(&mut self) {
        self.on = false;
        self.power_up_processed = false;
        self.envelope = Envelope::IDLE;
    }
}

impl From<LedConfig> for Led {
    fn from(config: LedConfig) -> Self {
        Self::new(&config)
    }
}
