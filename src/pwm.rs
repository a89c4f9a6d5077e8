//! Brightness to duty-value mapping.

use crate::gamma::GammaCorrection;
use crate::math::map_range;
use crate::{BRIGHTNESS_RANGE, PWM_RANGE};

/// Electrical polarity of the output pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarity {
    /// Duty value rises with brightness
    #[default]
    Normal,
    /// Duty value is complemented against the PWM range (active-low wiring)
    Inverted,
}

impl Polarity {
    /// Check if the polarity is inverted
    pub const fn is_inverted(self) -> bool {
        matches!(self, Self::Inverted)
    }
}

/// Map a brightness value to the duty value written to the hardware
///
/// Processing is applied in a fixed order to ensure correct results:
/// linear range map into the PWM domain, then gamma correction, then
/// polarity complement. The gamma stage operates entirely within the
/// PWM domain.
pub fn brightness_to_pwm(brightness: u8, polarity: Polarity, gamma: GammaCorrection) -> u16 {
    let duty = map_range(
        u16::from(brightness),
        0,
        u16::from(BRIGHTNESS_RANGE),
        0,
        PWM_RANGE,
    );
    let duty = gamma(duty);

    if polarity.is_inverted() {
        PWM_RANGE.saturating_sub(duty)
    } else {
        duty
    }
}
