//! Convenient re-exports for common usage
//!
//! ```rust,ignore
//! use testweave::prelude::*;
//! ```

pub use crate::action::{Action, ActionSequence, Stateful};
pub use crate::executor::{execute, execute_with_state};
pub use crate::multiplier::{Multiplier, MultiplierRegistry, SkipReason};
pub use crate::report::{fields_from, log_actions, render_report, LogReporter, Reporter};
