//! Hardsub Studio Engine
//!
//! Drives the simulated hardsub workflow and publishes its state:
//!
//! ```text
//! selection ──► start_hardsubbing()
//!                    │
//!                    ├── step plan ──► timed steps ──► progress/log ──► completion ──► notification
//!                    │
//!                    └── insights fetch (detached) ──────────────────► insights text
//! ```
//!
//! Every observable slot is a `tokio::sync::watch` channel; render code
//! subscribes and never writes.

pub mod notify;
pub mod orchestrator;
pub mod plan;

pub use notify::NotificationSurface;
pub use orchestrator::HardsubController;
pub use plan::StepPlan;
