//! Action contract and action sequences
//!
//! An [`Action`] is a single executable test step - set a value, open a
//! transaction, assert on store contents. A test body is an
//! [`ActionSequence`]: an ordered list of boxed actions that the multiplier
//! engine rewrites and the [`executor`](crate::executor) runs serially.
//!
//! Actions that need access to shared test state additionally implement
//! [`Stateful`] and surface it through [`Action::stateful`], the capability
//! query the executor uses to inject state immediately before execution.

use serde_json::{Map, Value};

/// A single executable step within a test.
///
/// `S` is the shared-state type chosen by the embedding harness. Actions that
/// never touch shared state can implement `Action<S>` generically over `S`.
///
/// # Example
///
/// ```rust,ignore
/// struct CloseStore;
///
/// impl<S> Action<S> for CloseStore {
///     fn execute(&mut self) {
///         // side effects only; failure is a panicking assertion
///     }
/// }
/// ```
pub trait Action<S> {
    /// Execute this action.
    ///
    /// Side-effecting, no return value. A fatal failure (typically a
    /// panicking assertion) aborts the remainder of the sequence via the host
    /// runner's own mechanism; the engine performs no recovery.
    fn execute(&mut self);

    /// Query the stateful capability.
    ///
    /// Actions that accept shared state return `Some(self)`; the executor
    /// calls [`Stateful::set_state`] through it immediately before
    /// [`execute`](Action::execute), every run.
    fn stateful(&mut self) -> Option<&mut dyn Stateful<S>> {
        None
    }

    /// Concrete variant tag used when rendering diagnostic reports.
    ///
    /// Defaults to the unqualified type name.
    fn kind(&self) -> &'static str {
        short_type_name::<Self>()
    }

    /// This action's own serializable fields for diagnostic reports.
    ///
    /// Defaults to an empty object, which renders as a bare `_type` entry.
    /// Actions with interesting configuration usually derive `Serialize` and
    /// forward to [`crate::report::fields_from`].
    fn fields(&self) -> serde_json::Result<Value> {
        Ok(Value::Object(Map::new()))
    }
}

/// The optional capability of an [`Action`] to receive shared test state.
///
/// State is owned by the caller of the executor and shared, not copied: `S`
/// is expected to be a cheap handle (`Arc<Mutex<_>>` or similar), so every
/// stateful action in one run observes the same underlying instance and later
/// actions see mutations made by earlier ones. This is the intended channel
/// for cross-action communication, e.g. propagating created-record
/// identifiers.
pub trait Stateful<S> {
    /// Overwrite currently held state with the given value.
    fn set_state(&mut self, state: S);
}

/// An ordered, executable sequence of [`Action`]s.
///
/// Order is semantically meaningful - actions run in declared order - and is
/// rewritten only by [`Multiplier`](crate::multiplier::Multiplier)s, which
/// consume a sequence and return a new one.
pub type ActionSequence<S> = Vec<Box<dyn Action<S>>>;

/// Strips the module path from a type name, keeping generic arguments intact.
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    match full.find('<') {
        // `a::b::Foo<c::d::Bar>` - trim the path of the outer type only.
        Some(generics) => full[..generics]
            .rfind("::")
            .map(|path| &full[path + 2..])
            .unwrap_or(full),
        None => full.rsplit("::").next().unwrap_or(full),
    }
}
