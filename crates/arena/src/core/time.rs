//! Fixed-step clock for the shell loop.
//!
//! The host hands the runner a variable frame delta; the game only ever sees
//! whole steps of `dt`. Time beyond `max_steps` steps in one frame is thrown
//! away so a stalled tab does not replay seconds of simulation at once.

const FALLBACK_DT: f32 = 1.0 / 60.0;
const DEFAULT_MAX_STEPS: u32 = 10;

/// Converts frame deltas into a count of fixed steps.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    dt: f32,
    /// Time not yet consumed by a step, always below `dt` after a call.
    pending: f32,
    max_steps: u32,
}

impl FixedTimestep {
    /// A clock stepping every `dt` seconds. Non-positive or non-finite values
    /// fall back to 1/60.
    pub fn new(dt: f32) -> Self {
        let dt = if dt.is_finite() && dt > 0.0 {
            dt
        } else {
            log::warn!("fixed_dt {dt} is unusable, stepping at 1/60");
            FALLBACK_DT
        };
        Self {
            dt,
            pending: 0.0,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    /// Steps allowed per frame after a stall (minimum 1).
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Add one frame's delta and return how many steps to run now.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.pending += frame_dt;
        }

        let ceiling = self.dt * self.max_steps as f32;
        if self.pending > ceiling {
            log::debug!("frame stalled, dropping {:.3}s", self.pending - ceiling);
            self.pending = ceiling;
        }

        let steps = (self.pending / self.dt) as u32;
        self.pending -= steps as f32 * self.dt;
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_steps_only() {
        let mut clock = FixedTimestep::new(0.25);
        assert_eq!(clock.accumulate(0.25), 1);
        assert_eq!(clock.accumulate(0.1), 0);
        assert_eq!(clock.accumulate(0.2), 1);
        assert_eq!(clock.accumulate(0.5), 2);
    }

    #[test]
    fn stall_is_capped_and_forgotten() {
        let mut clock = FixedTimestep::new(0.25).with_max_steps(3);
        assert_eq!(clock.accumulate(10.0), 3);
        // Nothing from the stall carries over.
        assert_eq!(clock.accumulate(0.0), 0);
        assert_eq!(clock.accumulate(0.25), 1);
    }

    #[test]
    fn bad_deltas_are_ignored() {
        let mut clock = FixedTimestep::new(0.25);
        assert_eq!(clock.accumulate(-5.0), 0);
        assert_eq!(clock.accumulate(f32::NAN), 0);
        assert_eq!(clock.accumulate(f32::INFINITY), 0);
        assert_eq!(clock.accumulate(0.25), 1);
    }

    #[test]
    fn unusable_dt_falls_back() {
        let mut clock = FixedTimestep::new(0.0);
        assert_eq!(clock.accumulate(0.02), 1);
        assert_eq!(clock.accumulate(0.01), 0);
    }
}
