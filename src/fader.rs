//! Fade state machine for one PWM output channel.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::gamma::{GammaCorrection, gamma22};
use crate::plan::StepPlan;
use crate::pwm::{Polarity, brightness_to_pwm};
use crate::{BRIGHTNESS_RANGE, MAX_PIN, PwmPlatform};

/// Configuration for a fade channel
#[derive(Debug, Clone)]
pub struct FaderConfig {
    /// Electrical polarity of the output pin
    pub polarity: Polarity,
    /// Default fade duration used when a command omits one
    pub global_duration: Duration,
    /// Gamma correction applied on the output path
    pub gamma: GammaCorrection,
}

impl Default for FaderConfig {
    fn default() -> Self {
        Self {
            polarity: Polarity::Normal,
            global_duration: Duration::from_millis(0),
            gamma: gamma22,
        }
    }
}

/// Single-channel fade controller
///
/// Owns all fade state for one output pin and drives the duty cycle from the
/// current brightness toward a target over a configurable duration. All
/// forward progress happens in [`tick`](Self::tick), which the host must call
/// from its main loop; nothing here blocks or reads a clock, so several
/// faders can share one loop without synchronization.
///
/// A new command issued mid-fade supersedes the in-flight plan immediately;
/// there is no queue of pending fades.
pub struct Fader<P: PwmPlatform> {
    // External dependencies and configuration
    platform: P,
    pin: u8,
    polarity: Polarity,
    gamma: GammaCorrection,
    global_duration: Duration,

    // Internal state
    on_state: bool,
    current_brightness: u8,
    previous_brightness: u8,
    target_brightness: u8,
    plan: Option<StepPlan>,
    last_step: Instant,
}

impl<P: PwmPlatform> Fader<P> {
    /// Create a fader with the default configuration
    ///
    /// An out-of-range pin leaves the channel permanently inert: every
    /// command and tick becomes a no-op and the pin is never configured.
    pub fn new(platform: P, pin: u8) -> Self {
        Self::with_config(platform, pin, &FaderConfig::default())
    }

    /// Create a fader with an explicit configuration
    pub fn with_config(mut platform: P, pin: u8, config: &FaderConfig) -> Self {
        if pin_is_valid(pin) {
            platform.configure_output(pin);
        }
        Self {
            platform,
            pin,
            polarity: config.polarity,
            gamma: config.gamma,
            global_duration: config.global_duration,
            on_state: false,
            current_brightness: 0,
            previous_brightness: BRIGHTNESS_RANGE,
            target_brightness: 0,
            plan: None,
            last_step: Instant::from_millis(0),
        }
    }

    /// Replace the default fade duration
    ///
    /// Zero means commands without an explicit duration switch instantly.
    pub fn set_global_duration(&mut self, duration: Duration) {
        self.global_duration = duration;
    }

    /// Replace the gamma correction
    ///
    /// `None` is ignored and the current correction, including the default,
    /// stays in place.
    pub fn set_gamma(&mut self, gamma: Option<GammaCorrection>) {
        if let Some(gamma) = gamma {
            self.gamma = gamma;
        }
    }

    /// Check if a fade is in progress
    pub const fn is_fading(&self) -> bool {
        self.plan.is_some()
    }

    /// Check if the channel is logically on
    ///
    /// Distinct from brightness: a channel is already "on" while still
    /// fading up from zero.
    pub const fn is_on(&self) -> bool {
        self.on_state
    }

    /// Current brightness in `0..=BRIGHTNESS_RANGE`
    pub const fn brightness(&self) -> u8 {
        self.current_brightness
    }

    /// Fade to the last nonzero brightness
    pub fn on(&mut self, duration: Option<Duration>, now: Instant) {
        self.on_state = true;
        self.target_brightness = self.previous_brightness;
        self.start_fade(duration, now);
    }

    /// Fade to zero
    pub fn off(&mut self, duration: Option<Duration>, now: Instant) {
        self.on_state = false;
        self.target_brightness = 0;
        self.start_fade(duration, now);
    }

    /// Flip between on and off
    pub fn toggle(&mut self, duration: Option<Duration>, now: Instant) {
        self.on_state = !self.on_state;
        self.target_brightness = if self.on_state {
            self.previous_brightness
        } else {
            0
        };
        self.start_fade(duration, now);
    }

    /// Fade to an explicit brightness in `0..=BRIGHTNESS_RANGE`
    ///
    /// The target is not validated; an out-of-range value is clamped only
    /// when written to the hardware.
    pub fn fade_to(&mut self, brightness: u8, duration: Option<Duration>, now: Instant) {
        self.on_state = brightness != 0;
        self.target_brightness = brightness;
        self.start_fade(duration, now);
    }

    /// Advance the fade by at most one step
    ///
    /// Level-triggered: call this from the host loop at least as often as
    /// the smallest configured step interval. Extra calls between eligible
    /// intervals are no-ops; late calls delay steps but never skip them,
    /// since elapsed time is measured from the last executed step rather
    /// than a fixed schedule.
    pub fn tick(&mut self, now: Instant) {
        let Some(mut plan) = self.plan else {
            return;
        };

        if !plan.is_exhausted() {
            if now.duration_since(self.last_step) >= plan.delta_time {
                self.last_step = now;
                self.write_pwm(i16::from(self.current_brightness) + plan.delta_brightness);
                plan.steps_taken += 1;
                self.plan = Some(plan);
            }
        } else {
            // Truncated per-step deltas can fall short of the target; the
            // final write snaps to the exact terminal value.
            let terminal = if self.on_state {
                self.target_brightness
            } else {
                0
            };
            self.write_pwm(i16::from(terminal));
            self.plan = None;
        }
    }

    /// Time until the next step becomes eligible
    ///
    /// Returns `None` when no fade is in progress, and a zero duration when
    /// a step or the terminal write is already due. Lets the host sleep
    /// between steps instead of spinning.
    pub fn time_until_next_step(&self, now: Instant) -> Option<Duration> {
        let plan = self.plan?;
        if plan.is_exhausted() {
            return Some(Duration::from_millis(0));
        }

        let elapsed = now.duration_since(self.last_step);
        if elapsed >= plan.delta_time {
            Some(Duration::from_millis(0))
        } else {
            Some(plan.delta_time - elapsed)
        }
    }

    /// Get a reference to the platform
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Get a mutable reference to the platform
    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Plan a fade toward `target_brightness` and begin stepping
    fn start_fade(&mut self, duration: Option<Duration>, now: Instant) {
        if !pin_is_valid(self.pin) {
            return;
        }

        // A nonzero target becomes the brightness restored by `on`; zero
        // keeps the stored value, falling back to full scale when there is
        // no history yet.
        if self.target_brightness != 0 {
            self.previous_brightness = self.target_brightness;
        } else if self.previous_brightness == 0 {
            self.previous_brightness = BRIGHTNESS_RANGE;
        }

        let duration = duration.unwrap_or(self.global_duration);

        match StepPlan::decompose(self.current_brightness, self.target_brightness, duration) {
            Some(plan) => {
                #[cfg(feature = "esp32-log")]
                println!(
                    "[Fader.start_fade] {} -> {} over {}ms: {} steps of {} every {}ms",
                    self.current_brightness,
                    self.target_brightness,
                    duration.as_millis(),
                    plan.total_steps,
                    plan.delta_brightness,
                    plan.delta_time.as_millis(),
                );
                self.plan = Some(plan);
                self.tick(now);
            }
            None => {
                // Nothing to step: a single terminal write, superseding any
                // in-flight plan.
                self.plan = None;
                self.write_pwm(i16::from(self.target_brightness));
            }
        }
    }

    /// Write a brightness value through the mapping pipeline
    ///
    /// Clamps into the brightness domain, stores the result as the current
    /// brightness and writes the mapped duty value to the platform. A write
    /// that would not change the current brightness is skipped to avoid
    /// redundant hardware writes.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn write_pwm(&mut self, brightness: i16) {
        if !pin_is_valid(self.pin) || brightness == i16::from(self.current_brightness) {
            return;
        }

        self.current_brightness = brightness.clamp(0, i16::from(BRIGHTNESS_RANGE)) as u8;

        let duty = brightness_to_pwm(self.current_brightness, self.polarity, self.gamma);
        self.platform.write_output(self.pin, duty);
    }
}

/// Check a pin number against the accepted range
const fn pin_is_valid(pin: u8) -> bool {
    pin > 0 && pin <= MAX_PIN
}
