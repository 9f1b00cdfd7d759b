//! Complexity multipliers and their registry
//!
//! A complexity multiplier represents a concept that multiplies the surface
//! area of proximal features. Database transactions are the canonical
//! example: every new datastore action must be tested both with and without a
//! transaction, so the transaction concept multiplies the complexity of the
//! system. Identifying such dimensions and applying them mechanically keeps a
//! test suite scalable - without them, each new feature needs a hand-written
//! test per dimension, which is tedious, error prone, and degrades both test
//! and production code.
//!
//! Concrete [`Multiplier`]s are defined by consuming projects and added to a
//! [`MultiplierRegistry`] during the harness's setup phase via
//! [`register`](MultiplierRegistry::register). Once everything is registered,
//! [`init`](MultiplierRegistry::init) selects the active subset from an
//! environment variable (falling back to caller-supplied defaults), and
//! [`apply`](MultiplierRegistry::apply) rewrites each test's action sequence
//! through that subset.
//!
//! Multipliers have no effect during execution: they act only on the action
//! sequence itself, rewriting the test definition *before* it runs.

mod registry;

pub use registry::{MultiplierRegistry, SkipReason};

use crate::action::ActionSequence;

/// A named complexity dimension of the system under test.
///
/// A multiplier rewrites a declared action sequence into one exercising its
/// dimension. For example, a `namespace` multiplier may prepend an action
/// that namespaces the store under test, reducing - but not removing - the
/// testing cost of namespacing.
///
/// Implementations are stateless across calls; configuration captured at
/// construction time is fine.
pub trait Multiplier<S> {
    /// The unique name of this multiplier.
    ///
    /// Names identify multipliers in configuration, in
    /// [skip](MultiplierRegistry::skip) filters, and in diagnostic reports.
    /// Within one registry a name should be claimed by a single multiplier;
    /// on collision the last registration wins the name lookup.
    fn name(&self) -> &str;

    /// Rewrite the given action sequence to exercise this dimension.
    ///
    /// The sequence is consumed and a new one returned; implementations may
    /// insert, remove, reorder, or duplicate actions. There is no error path:
    /// a multiplier that cannot apply returns its input unchanged or panics
    /// on its own authority.
    fn apply(&self, source: ActionSequence<S>) -> ActionSequence<S>;
}
