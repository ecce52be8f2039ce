//! Pulse envelope
//!
//! Every LED renders a single trapezoidal pulse described by four keyframes:
//! it rises from `start_low` to `start_high`, holds until `end_high`, falls
//! to `end_low` and stays dark afterwards.

use embassy_time::{Duration, Instant};

/// Intensity anchor at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyFrame {
    /// LED intensity reached at `t` (0-255)
    pub intensity: u8,
    /// Time at which `intensity` is reached
    pub t: Instant,
}

impl KeyFrame {
    /// Keyframe of an idle LED
    pub const IDLE: Self = Self::new(0, 0);

    /// Create a keyframe at `t_ms` milliseconds
    pub const fn new(intensity: u8, t_ms: u64) -> Self {
        Self {
            intensity,
            t: Instant::from_millis(t_ms),
        }
    }

    pub const fn at(intensity: u8, t: Instant) -> Self {
        Self { intensity, t }
    }
}

/// Proportions of a pulse
///
/// `rise` and `hold` are fractions of the whole pulse duration; whatever is
/// left over is spent on the falling edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseShape {
    pub rise: f32,
    pub hold: f32,
}

impl PulseShape {
    pub const DEFAULT: Self = Self {
        rise: 0.25,
        hold: 0.25,
    };

    /// Split `duration` into rise, hold and fall segments
    ///
    /// The three segments always add up to `duration`.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn split(self, duration: Duration) -> (Duration, Duration, Duration) {
        let total = duration.as_millis();
        let rise_fraction = unit_or_zero(self.rise);
        let hold_fraction = unit_or_zero(self.hold).min(1.0 - rise_fraction);

        let rise = (libm::roundf(total as f32 * rise_fraction) as u64).min(total);
        let hold = (libm::roundf(total as f32 * hold_fraction) as u64).min(total - rise);
        let fall = total - rise - hold;

        (
            Duration::from_millis(rise),
            Duration::from_millis(hold),
            Duration::from_millis(fall),
        )
    }
}

impl Default for PulseShape {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn unit_or_zero(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Four keyframes forming one pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope {
    /// When the pulse begins
    pub start_low: KeyFrame,
    /// When the pulse reaches its maximum
    pub start_high: KeyFrame,
    /// When the pulse departs its maximum
    pub end_high: KeyFrame,
    /// When the pulse ends
    pub end_low: KeyFrame,
}

impl Envelope {
    /// Envelope of a dark LED
    pub const IDLE: Self = Self {
        start_low: KeyFrame::IDLE,
        start_high: KeyFrame::IDLE,
        end_high: KeyFrame::IDLE,
        end_low: KeyFrame::IDLE,
    };

    pub const fn new(
        start_low: KeyFrame,
        start_high: KeyFrame,
        end_high: KeyFrame,
        end_low: KeyFrame,
    ) -> Self {
        Self {
            start_low,
            start_high,
            end_high,
            end_low,
        }
    }

    /// Build a pulse that starts at `start` and goes dark at `start + duration`
    pub fn pulse(start: Instant, duration: Duration, brightness: u8, shape: PulseShape) -> Self {
        let (rise, hold, fall) = shape.split(duration);
        let start_high = start + rise;
        let end_high = start_high + hold;
        let end_low = end_high + fall;

        Self {
            start_low: KeyFrame::at(0, start),
            start_high: KeyFrame::at(brightness, start_high),
            end_high: KeyFrame::at(brightness, end_high),
            end_low: KeyFrame::at(0, end_low),
        }
    }

    /// Intensity of the pulse at `now`
    ///
    /// Outside the pulse window the `start_low` intensity is returned. Edges
    /// are interpolated linearly; an edge of zero length is a step.
    pub fn intensity_at(&self, now: Instant) -> u8 {
        if now < self.start_low.t || now > self.end_low.t {
            return self.start_low.intensity;
        }
        if now < self.start_high.t {
            return interpolate(self.start_low, self.start_high, now);
        }
        if now <= self.end_high.t {
            return self.start_high.intensity;
        }
        interpolate(self.end_high, self.end_low, now)
    }

    /// Whether the pulse has fully decayed at `now`
    pub fn is_elapsed(&self, now: Instant) -> bool {
        now >= self.end_low.t
    }

    /// Full length of the pulse
    pub fn duration(&self) -> Duration {
        self.end_low.t.saturating_duration_since(self.start_low.t)
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::IDLE
    }
}

/// Linear interpolation between two keyframes
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn interpolate(from: KeyFrame, to: KeyFrame, now: Instant) -> u8 {
    let span = to.t.saturating_duration_since(from.t).as_millis();
    if span == 0 {
        return to.intensity;
    }
    let elapsed = now.saturating_duration_since(from.t).as_millis().min(span);

    let from_intensity = i64::from(from.intensity);
    let delta = i64::from(to.intensity) - from_intensity;
    // elapsed <= span, so the quotient magnitude never exceeds |delta|
    #[allow(clippy::cast_possible_wrap)]
    let step = delta * elapsed as i64 / span as i64;

    (from_intensity + step).clamp(0, 255) as u8
}
