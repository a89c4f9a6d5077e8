//! Gamma corrections for the PWM output stage.
//!
//! A correction maps a PWM-domain duty value to another PWM-domain duty
//! value, compensating for the eye's non-linear brightness perception.

use crate::PWM_RANGE;

/// Type alias for a function that corrects a PWM-domain duty value
pub type GammaCorrection = fn(value: u16) -> u16;

/// Power-law correction with the conventional 2.2 exponent
///
/// This is the correction installed by default. Costs one `powf` per
/// hardware write (~250us on common MCU cores without an FPU).
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn gamma22(value: u16) -> u16 {
    let normalized = f32::from(value) / f32::from(PWM_RANGE);
    (libm::powf(normalized, 2.2) * f32::from(PWM_RANGE)) as u16
}

/// Pass-through correction, disables gamma compensation
pub fn identity(value: u16) -> u16 {
    value
}
