//! Processing state of a hardsub run and its pure transitions.
//!
//! The orchestrator never edits [`ProcessingState`] field by field; it
//! feeds [`ProcessingEvent`]s through [`ProcessingState::apply`]. That keeps
//! the run invariants in one place:
//! - progress never decreases within a run and is reset to 0 at start
//! - `is_processing` is true exactly while a run is in flight
//! - progress reaches 100 only together with the completion line

use serde::{Deserialize, Serialize};

/// First log line of every run.
pub const INIT_LOG_LINE: &str = "Initializing FFmpeg backend...";

/// Last log line of every completed run.
pub const COMPLETION_LOG_LINE: &str = "Finished! File saved to Downloads.";

/// Ceiling for step-driven progress; only completion reaches 100.
pub const STEP_PROGRESS_CAP: f64 = 95.0;

/// Observable progress of the simulated pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProcessingState {
    pub is_processing: bool,

    /// Percentage in `[0, 100]`.
    pub progress: f64,

    /// Append-only during a run, reset when the next run starts.
    pub log: Vec<String>,
}

/// Coarse state-machine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunPhase {
    /// Nothing has run yet.
    Idle,
    /// A run is in flight.
    Running,
    /// The last run completed; a new one may start.
    Finished,
}

/// Things that happen to a run.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingEvent {
    /// A new run begins.
    Started,
    /// Step `index` of `step_count` finished and produced `line`.
    StepCompleted {
        index: usize,
        step_count: usize,
        line: String,
    },
    /// The run completed.
    Finished,
}

/// Progress after step `index` (zero-based) of `step_count` completes.
pub fn step_progress(index: usize, step_count: usize) -> f64 {
    if step_count == 0 {
        return 0.0;
    }
    (100.0 * (index + 1) as f64 / step_count as f64).min(STEP_PROGRESS_CAP)
}

impl ProcessingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> RunPhase {
        if self.is_processing {
            RunPhase::Running
        } else if self.log.is_empty() {
            RunPhase::Idle
        } else {
            RunPhase::Finished
        }
    }

    /// Progress rounded for display.
    pub fn display_percent(&self) -> u8 {
        self.progress.round().clamp(0.0, 100.0) as u8
    }

    /// Return the state after `event`.
    ///
    /// Events that do not fit the current phase (a step or finish while no
    /// run is in flight) leave the state unchanged.
    pub fn apply(&self, event: &ProcessingEvent) -> ProcessingState {
        let mut next = self.clone();
        next.apply_in_place(event);
        next
    }

    /// In-place form of [`apply`](Self::apply).
    ///
    /// Returns whether the state changed.
    pub fn apply_in_place(&mut self, event: &ProcessingEvent) -> bool {
        match event {
            ProcessingEvent::Started => {
                *self = ProcessingState {
                    is_processing: true,
                    progress: 0.0,
                    log: vec![INIT_LOG_LINE.to_string()],
                };
                true
            }
            ProcessingEvent::StepCompleted {
                index,
                step_count,
                line,
            } => {
                if !self.is_processing {
                    return false;
                }
                self.log.push(line.clone());
                self.progress = self.progress.max(step_progress(*index, *step_count));
                true
            }
            ProcessingEvent::Finished => {
                if !self.is_processing {
                    return false;
                }
                self.progress = 100.0;
                self.is_processing = false;
                self.log.push(COMPLETION_LOG_LINE.to_string());
                true
            }
        }
    }
}
