//! Serial execution of action sequences
//!
//! Runs an [`ActionSequence`] strictly in order, one action at a time, with
//! no concurrency, retries, or timeout enforcement. A fatal failure inside an
//! action - typically a panicking assertion - aborts the remaining sequence
//! through the host runner; this layer neither catches nor recovers.
//!
//! [`execute_with_state`] additionally injects shared test state into every
//! action exposing the [`Stateful`](crate::action::Stateful) capability,
//! immediately before that action runs.

use crate::action::ActionSequence;

/// Execute this sequence of actions, serially, in order.
pub fn execute<S>(actions: &mut ActionSequence<S>) {
    for action in actions.iter_mut() {
        action.execute();
    }
}

/// Execute this sequence of actions upon the given state, serially, in order.
///
/// For every action exposing the stateful capability, a clone of `state` is
/// injected via [`set_state`](crate::action::Stateful::set_state) immediately
/// before that action's `execute`. `S` is expected to be a cheap shared
/// handle (`Arc<Mutex<_>>` or similar): every stateful action then observes
/// the same underlying instance, so later actions see mutations made by
/// earlier ones. Timeouts or cancellation, if any, are a property of the
/// state object itself; this loop runs to completion or until an action
/// fatally aborts it.
pub fn execute_with_state<S: Clone>(actions: &mut ActionSequence<S>, state: &S) {
    for action in actions.iter_mut() {
        if let Some(stateful) = action.stateful() {
            stateful.set_state(state.clone());
        }

        action.execute();
    }
}
