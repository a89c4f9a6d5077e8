#![no_std]

pub mod fader;
pub mod gamma;
pub mod math;
pub mod plan;
pub mod pwm;

pub use fader::{Fader, FaderConfig};
pub use gamma::{GammaCorrection, gamma22, identity};
pub use plan::StepPlan;
pub use pwm::{Polarity, brightness_to_pwm};

pub use embassy_time::{Duration, Instant};

/// Upper bound of the brightness domain (brightness values are `0..=BRIGHTNESS_RANGE`).
pub const BRIGHTNESS_RANGE: u8 = 100;

/// Upper bound of the PWM domain (duty values are `0..=PWM_RANGE`).
pub const PWM_RANGE: u16 = 1024;

/// Minimum interval between two PWM updates of a stepped fade.
pub const MIN_TIME_DIVISION: Duration = Duration::from_millis(10);

/// Highest accepted pin number (valid pins are `1..=MAX_PIN`).
pub const MAX_PIN: u8 = 16;

/// Abstract PWM platform trait
///
/// Implement this trait to support different hardware platforms.
/// The fader is generic over this trait.
pub trait PwmPlatform {
    /// One-time setup marking a pin as a PWM-capable output
    fn configure_output(&mut self, pin: u8);

    /// Write a duty value in `0..=PWM_RANGE` to the pin
    fn write_output(&mut self, pin: u8, value: u16);
}
