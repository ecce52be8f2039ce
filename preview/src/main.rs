//! Desktop preview app for gasworks-neurones
//!
//! Renders the neurone array in a window with interactive controls.
//! All changes go through the same command queue a serial transport would use.

use std::time::Instant as StdInstant;

use eframe::egui::{self};
use gasworks_neurones::{
    Command, CommandQueue, CommandSender, Instant, ModeId, NUM_LIGHTS, NeuroneArray,
    NeuroneArrayConfig, PinLevel,
};

/// Command queue size
const COMMAND_QUEUE_SIZE: usize = 16;

/// Static command queue for communication between UI and array
static COMMANDS: CommandQueue<COMMAND_QUEUE_SIZE> = CommandQueue::new();

/// Radius of each LED in pixels
const LED_RADIUS: f32 = 18.0;

/// Gap between LEDs
const LED_GAP: f32 = 16.0;

/// Color of a fully lit LED
const LED_COLOR: [u8; 3] = [255, 170, 60];

type Array = NeuroneArray<'static, fastrand::Rng, NUM_LIGHTS, COMMAND_QUEUE_SIZE>;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 360.0])
            .with_title("Gasworks Neurones Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "gasworks-neurones-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new()))),
    )
}

struct PreviewApp {
    /// The neurone array
    array: Array,
    /// Command sender for UI changes
    commands: CommandSender<'static, COMMAND_QUEUE_SIZE>,

    /// Synthetic time in milliseconds
    t_ms: u64,
    /// Wall-clock reference for delta time
    last_frame: StdInstant,
    /// Whether animation is playing
    playing: bool,
    /// Time scale multiplier (1.0 = realtime)
    time_scale: f32,
    /// Energy slider value
    energy: f32,
    /// Whether to show pin and mode labels
    show_labels: bool,
}

impl PreviewApp {
    fn new() -> Self {
        let config = NeuroneArrayConfig::DEFAULT;
        Self {
            array: new_array(&config),
            commands: COMMANDS.sender(),
            t_ms: 0,
            last_frame: StdInstant::now(),
            playing: true,
            time_scale: 1.0,
            energy: config.energy,
            show_labels: true,
        }
    }

    /// Queue a command for the next tick
    fn send(&self, command: Command) {
        let _ = self.commands.try_send(command);
    }

    /// Reset time to zero and rebuild the array
    fn reset(&mut self) {
        while COMMANDS.try_receive().is_some() {}
        let config = NeuroneArrayConfig {
            energy: self.energy,
            ..NeuroneArrayConfig::DEFAULT
        };
        self.array = new_array(&config);
        self.t_ms = 0;
        self.last_frame = StdInstant::now();
    }

    /// Toggle playing state
    fn toggle_playing(&mut self) {
        self.playing = !self.playing;
    }

    /// Update synthetic time based on wall clock and time scale
    fn update_time(&mut self) {
        let now = StdInstant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        if self.playing {
            let delta_ms_f64 = delta.as_secs_f64() * 1000.0 * f64::from(self.time_scale);
            let delta_ms_f64 = if delta_ms_f64.is_finite() {
                #[allow(clippy::cast_precision_loss)]
                delta_ms_f64.clamp(0.0, u64::MAX as f64)
            } else {
                0.0
            };
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let delta_ms = delta_ms_f64 as u64;
            self.t_ms = self.t_ms.saturating_add(delta_ms);
        }
    }
}

fn new_array(config: &NeuroneArrayConfig<NUM_LIGHTS>) -> Array {
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    NeuroneArray::new(
        COMMANDS.receiver(),
        fastrand::Rng::with_seed(seed),
        config,
        Instant::from_millis(0),
    )
}

fn mode_color(mode: ModeId) -> egui::Color32 {
    match mode {
        ModeId::Disabled => egui::Color32::DARK_GRAY,
        ModeId::Cooldown => egui::Color32::LIGHT_BLUE,
        ModeId::Interactive => egui::Color32::LIGHT_GREEN,
        ModeId::Powerup => egui::Color32::GOLD,
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_time();

        // Paused time is frozen, so commands wait in the queue until resumed
        let now = Instant::from_millis(self.t_ms);
        let frame = if self.playing {
            self.array.render(now).to_vec()
        } else {
            self.array
                .neurones()
                .iter()
                .map(|neurone| PinLevel {
                    pin: neurone.pin(),
                    intensity: neurone.led().envelope.intensity_at(now),
                })
                .collect()
        };

        ctx.request_repaint();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                // <PlaybackControls>
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        if ui.button("⏮ Reset").clicked() {
                            self.reset();
                        }
                        if ui
                            .button(if self.playing { "⏸ Pause" } else { "▶ Play" })
                            .clicked()
                        {
                            self.toggle_playing();
                        }
                    });

                    ui.add_space(4.0);

                    let secs = self.t_ms / 1000;
                    let ms = self.t_ms % 1000;
                    ui.label(format!("Time: {secs}.{ms:03}s"));

                    ui.add_space(4.0);

                    ui.horizontal(|ui| {
                        ui.label("Speed:");
                        ui.add(egui::Slider::new(&mut self.time_scale, 0.1..=10.0).logarithmic(true));
                    });
                });
                // </PlaybackControls>
                ui.add_space(16.0);
                // <CommandControls>
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        if ui.button("Interactive").clicked() {
                            self.send(Command::enter_interactive());
                        }
                        if ui.button("Power up").clicked() {
                            self.send(Command::enter_powerup());
                        }
                        if ui.button("Disable").clicked() {
                            self.send(Command::enter_disabled());
                        }
                    });

                    ui.add_space(4.0);

                    ui.horizontal(|ui| {
                        ui.label("Energy:");
                        let old_energy = self.energy;
                        ui.add(egui::Slider::new(&mut self.energy, 0.0..=1.0));
                        #[allow(clippy::float_cmp)]
                        let changed = self.energy != old_energy;
                        if changed {
                            self.send(Command::set_energy(self.energy));
                        }
                    });

                    ui.add_space(4.0);

                    ui.checkbox(&mut self.show_labels, "Labels");
                });
                // </CommandControls>
            });

            ui.add_space(24.0);

            // === LED Display ===
            let pitch = LED_RADIUS * 2.0 + LED_GAP;
            #[allow(clippy::cast_precision_loss)]
            let width = frame.len() as f32 * pitch;
            let (response, painter) =
                ui.allocate_painter(egui::vec2(width, pitch * 2.0), egui::Sense::hover());
            let origin = response.rect.min;

            #[allow(clippy::cast_precision_loss)]
            for (i, (level, neurone)) in frame.iter().zip(self.array.neurones()).enumerate() {
                let center = egui::pos2(
                    origin.x + i as f32 * pitch + LED_RADIUS,
                    origin.y + LED_RADIUS,
                );
                let lit = |channel: u8| {
                    #[allow(clippy::cast_possible_truncation)]
                    let scaled = (u16::from(channel) * u16::from(level.intensity) / 255) as u8;
                    scaled
                };
                let color = egui::Color32::from_rgb(
                    lit(LED_COLOR[0]),
                    lit(LED_COLOR[1]),
                    lit(LED_COLOR[2]),
                );
                painter.circle_filled(center, LED_RADIUS, color);

                let mode = neurone.state().mode.id();
                painter.circle_stroke(center, LED_RADIUS, egui::Stroke::new(2.0, mode_color(mode)));

                if self.show_labels {
                    painter.text(
                        center + egui::vec2(0.0, LED_RADIUS + 10.0),
                        egui::Align2::CENTER_TOP,
                        format!("{}\n{}", level.pin, mode.as_str()),
                        egui::FontId::monospace(10.0),
                        ui.visuals().text_color(),
                    );
                }
            }
        });
    }
}
