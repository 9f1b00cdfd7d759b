//! # Testweave
//!
//! Action-based test composition with complexity multipliers.
//!
//! Tests are declared as an ordered sequence of small, polymorphic units of
//! work ([`Action`]s) executed serially against shared test state. On top of
//! that sits the multiplier engine: named, registered transformations
//! ([`Multiplier`]s) that rewrite a declared action sequence into expanded
//! sequences exercising combinatorial "complexity dimensions" - for example
//! running the same test both inside and outside a transaction - without the
//! test author hand-writing each variant.
//!
//! ## Architecture Overview
//!
//! - [`action`]: the `Action` contract, the optional `Stateful` capability,
//!   and the `ActionSequence` the rest of the crate operates on
//! - [`multiplier`]: the `Multiplier` contract and the registry that selects
//!   and applies active multipliers
//! - [`executor`]: serial execution with optional shared-state injection
//! - [`report`]: the host-reporter seam and diagnostic rendering
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use testweave::prelude::*;
//!
//! // Harness setup, once per process:
//! let mut registry = MultiplierRegistry::new();
//! registry.register(TransactionMultiplier::default());
//! registry.init("MY_PROJECT_MULTIPLIERS", &["txn-commit"]);
//!
//! // Per test:
//! #[test]
//! fn create_then_read() {
//!     let mut reporter = LogReporter;
//!     if registry.skip(&mut reporter, &[], &["no-store"]) {
//!         return;
//!     }
//!
//!     let actions: ActionSequence<Shared> = vec![
//!         Box::new(CreateRecord::new("alice")),
//!         Box::new(AssertRecordExists::new("alice")),
//!     ];
//!     let mut actions = registry.apply(actions);
//!
//!     let state = Shared::default();
//!     executor::execute_with_state(&mut actions, &state);
//! }
//! ```
//!
//! ## Design Principles
//!
//! 1. **Declare once, test many**: one action sequence, every active
//!    complexity dimension applied mechanically
//! 2. **Explicit registry**: no process globals; the harness constructs and
//!    initializes one [`MultiplierRegistry`] during setup and shares it
//!    read-only
//! 3. **Pure rewrites**: multipliers consume a sequence and return a new one;
//!    ownership rules out aliasing between input and output
//! 4. **Serial and synchronous**: no concurrency, retries, or timeouts inside
//!    the engine; failure is an action's own fatal signal

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Action contract, stateful capability, and action sequences
pub mod action;

/// Serial execution engine with optional shared-state injection
pub mod executor;

/// Multiplier contract, registry, selection, and application
pub mod multiplier;

/// Host-reporter seam and diagnostic rendering of action sequences
pub mod report;

// Convenient re-exports for common usage
pub mod prelude;

// Re-export commonly used types at crate root
pub use action::{Action, ActionSequence, Stateful};
pub use multiplier::{Multiplier, MultiplierRegistry, SkipReason};
pub use report::{LogReporter, Reporter};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
