//! Host-reporter seam and diagnostic rendering
//!
//! The engine never talks to a test runner directly; it reports through the
//! [`Reporter`] trait, which the embedding harness implements over whatever
//! runner it uses. [`log_actions`] renders a human-readable dump of the
//! active multipliers and an action sequence for failure diagnosis - purely
//! observational, with no influence on execution outcome.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::action::ActionSequence;
use crate::multiplier::MultiplierRegistry;

/// The host test reporter, as seen by the engine.
///
/// Implementations decide what "skip" and "fatal" mean for their runner.
/// Skipping is cooperative: [`MultiplierRegistry::skip`] calls
/// [`skip`](Reporter::skip) with a message and returns `true`, and the test
/// body is expected to return immediately.
pub trait Reporter {
    /// Record a diagnostic message.
    fn log(&mut self, message: &str);

    /// Signal that the current test is being skipped, with the reason.
    fn skip(&mut self, message: &str);

    /// Signal an unrecoverable failure in the current test.
    fn fatal(&mut self, message: &str);
}

/// A [`Reporter`] backed by the `log` facade.
///
/// Routes `log` to `info`, `skip` to `warn`, and panics on `fatal`, which is
/// the fatal path of the default test runner. Harnesses with richer runners
/// supply their own implementation instead.
pub struct LogReporter;

impl Reporter for LogReporter {
    fn log(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn skip(&mut self, message: &str) {
        log::warn!("{message}");
    }

    fn fatal(&mut self, message: &str) {
        panic!("{message}");
    }
}

/// Serialize an action's fields for [`Action::fields`](crate::action::Action::fields).
///
/// Convenience for actions deriving `Serialize`:
///
/// ```rust,ignore
/// fn fields(&self) -> serde_json::Result<Value> {
///     testweave::report::fields_from(self)
/// }
/// ```
pub fn fields_from<T: Serialize>(value: &T) -> serde_json::Result<Value> {
    serde_json::to_value(value)
}

/// Render the diagnostic report for the active multipliers and the given
/// action sequence.
///
/// The first line is blank. Multipliers follow on the second line as comma
/// separated values. Actions follow on the third line as prettified JSON,
/// each element carrying the action's concrete variant tag in a `_type`
/// property merged with that action's own fields:
///
/// ```text
///
/// Multipliers: txn-commit
/// Actions: [
///   {
///     "_type": "StartCli"
///   },
///   {
///     "_type": "TxCommit",
///     "txn_index": 0
///   }
/// ]
/// ```
///
/// # Errors
///
/// Returns an error if any action's [`fields`](crate::action::Action::fields)
/// fails or the final report cannot be serialized.
pub fn render_report<S>(
    registry: &MultiplierRegistry<S>,
    actions: &ActionSequence<S>,
) -> Result<String> {
    let mut entries = Vec::with_capacity(actions.len());
    for action in actions {
        let mut entry = Map::new();
        entry.insert("_type".to_string(), Value::String(action.kind().to_string()));

        let fields = action
            .fields()
            .with_context(|| format!("serializing fields of action {}", action.kind()))?;
        if let Value::Object(fields) = fields {
            entry.extend(fields);
        }

        entries.push(Value::Object(entry));
    }

    let json = serde_json::to_string_pretty(&entries).context("rendering action report")?;

    Ok(format!(
        "\nMultipliers: {}\nActions: {}",
        registry.active_names().join(","),
        json
    ))
}

/// Log the set of active multipliers and the provided actions.
///
/// Renders [`render_report`] and forwards it to [`Reporter::log`]. A
/// rendering failure is fatal to the diagnostic step only: it is forwarded to
/// [`Reporter::fatal`], never silently swallowed.
pub fn log_actions<S>(
    reporter: &mut dyn Reporter,
    registry: &MultiplierRegistry<S>,
    actions: &ActionSequence<S>,
) {
    match render_report(registry, actions) {
        Ok(report) => reporter.log(&report),
        Err(error) => reporter.fatal(&format!("{error:#}")),
    }
}
