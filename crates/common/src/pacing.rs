//! Step pacing for the simulated hardsub pipeline.
//!
//! The pipeline never does real work; its perceived duration comes from
//! per-step delays. Pacing is isolated behind the [`Pacer`] trait so that
//! tests can run the pipeline with fixed (or zero) delays and assert exact
//! progress sequences.

use std::time::Duration;

use crate::config::PipelineTiming;

/// Source of the delays the pipeline waits on.
pub trait Pacer: Send + Sync {
    /// Delay before step `index` (zero-based) is reported as complete.
    fn step_delay(&self, index: usize) -> Duration;

    /// Delay between the last step and run completion.
    fn finalize_delay(&self) -> Duration;
}

/// Production pacer: a deterministic base plus uniform random jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomPacer {
    timing: PipelineTiming,
}

impl RandomPacer {
    pub fn new(timing: PipelineTiming) -> Self {
        Self { timing }
    }
}

impl Default for RandomPacer {
    fn default() -> Self {
        Self::new(PipelineTiming::default())
    }
}

impl Pacer for RandomPacer {
    fn step_delay(&self, _index: usize) -> Duration {
        let jitter = if self.timing.step_jitter_ms == 0 {
            0
        } else {
            fastrand::u64(0..self.timing.step_jitter_ms)
        };
        Duration::from_millis(self.timing.step_base_ms + jitter)
    }

    fn finalize_delay(&self) -> Duration {
        Duration::from_millis(self.timing.finalize_ms)
    }
}

/// Deterministic pacer with constant delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPacer {
    pub step: Duration,
    pub finalize: Duration,
}

impl FixedPacer {
    pub fn new(step: Duration, finalize: Duration) -> Self {
        Self { step, finalize }
    }

    /// A pacer that never waits.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }
}

impl Pacer for FixedPacer {
    fn step_delay(&self, _index: usize) -> Duration {
        self.step
    }

    fn finalize_delay(&self) -> Duration {
        self.finalize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_jitter_is_deterministic() {
        let pacer = RandomPacer::new(PipelineTiming {
            step_base_ms: 30,
            step_jitter_ms: 0,
            finalize_ms: 5,
        });
        assert_eq!(pacer.step_delay(0), Duration::from_millis(30));
        assert_eq!(pacer.finalize_delay(), Duration::from_millis(5));
    }

    proptest! {
        #[test]
        fn prop_random_step_delay_stays_in_window(index in 0usize..16) {
            let pacer = RandomPacer::default();
            let delay = pacer.step_delay(index);
            prop_assert!(delay >= Duration::from_millis(1200));
            prop_assert!(delay < Duration::from_millis(2200));
        }
    }
}
