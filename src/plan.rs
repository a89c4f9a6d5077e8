//! Duration-to-steps decomposition for stepped fades.

use embassy_time::Duration;

use crate::MIN_TIME_DIVISION;

/// One stepped fade, decomposed into fixed-size steps
///
/// A plan is a plain value; the fader owns at most one and drops it when the
/// terminal write has been issued.
#[derive(Debug, Clone, Copy)]
pub struct StepPlan {
    /// Signed brightness increment applied on every step
    pub delta_brightness: i16,
    /// Minimum interval between two steps
    pub delta_time: Duration,
    /// Total number of planned steps
    pub total_steps: u32,
    /// Steps executed so far
    pub steps_taken: u32,
}

impl StepPlan {
    /// Decompose a fade into discrete steps
    ///
    /// Returns `None` when no stepped fade is needed: zero duration, target
    /// already reached, or a duration too short to hold even one minimum
    /// time division. The caller then writes the target in a single
    /// transition.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn decompose(current: u8, target: u8, duration: Duration) -> Option<Self> {
        if duration.as_millis() == 0 || target == current {
            return None;
        }

        let time_steps = duration.as_millis() / MIN_TIME_DIVISION.as_millis();
        if time_steps == 0 {
            return None;
        }

        let brightness_delta = i32::from(target) - i32::from(current);
        let brightness_steps = brightness_delta.unsigned_abs();

        // More brightness units to cover than time slots available at minimum
        // granularity: keep the minimum interval and enlarge the per-step
        // delta. Otherwise move one unit per step and stretch the interval to
        // spread the steps over the requested duration.
        let plan = if u64::from(brightness_steps) > time_steps {
            Self {
                delta_brightness: (brightness_delta / time_steps as i32) as i16,
                delta_time: MIN_TIME_DIVISION,
                total_steps: time_steps as u32,
                steps_taken: 0,
            }
        } else {
            Self {
                delta_brightness: if brightness_delta > 0 { 1 } else { -1 },
                delta_time: Duration::from_millis(
                    duration.as_millis() / u64::from(brightness_steps),
                ),
                total_steps: brightness_steps,
                steps_taken: 0,
            }
        };

        Some(plan)
    }

    /// Check if every planned step has been executed
    pub const fn is_exhausted(&self) -> bool {
        self.steps_taken >= self.total_steps
    }
}
