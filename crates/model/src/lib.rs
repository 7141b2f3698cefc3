//! Hardsub Studio Data Model
//!
//! Defines the state slots a hardsub session is made of:
//! - **Selection:** The video, subtitle, and thumbnail picks plus thumbnail placement
//! - **Processing:** Progress, log, and the pure transitions that drive them
//! - **Notification:** The transient user-facing message
//!
//! Nothing in this crate performs I/O or waits; the engine crate owns timing.

pub mod notification;
pub mod output;
pub mod position;
pub mod processing;
pub mod selection;

pub use notification::*;
pub use output::*;
pub use position::*;
pub use processing::*;
pub use selection::*;
