//! Multiplier registry: registration, selection, application, and skipping

use std::collections::HashMap;
use std::env;
use std::sync::Arc;

use log::{debug, info, warn};
use thiserror::Error;

use super::Multiplier;
use crate::action::ActionSequence;
use crate::report::Reporter;

/// Why a test was skipped by [`MultiplierRegistry::skip`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// An active multiplier matched the test's exclude list.
    #[error("skipping, multiplier is excluded. Name: {0}")]
    Excluded(String),

    /// A multiplier required by the test's include list is not active.
    #[error("skipping, required multiplier is not included. Name: {0}")]
    NotIncluded(String),
}

/// The registry of complexity multipliers for one test harness.
///
/// Owns two ordered sets: the *available* set, in registration order, and the
/// *active* set, an ordered subset resolved from configuration by
/// [`init`](Self::init). The harness constructs one registry during setup,
/// registers every multiplier its projects define, initializes it once, and
/// then shares it read-only with test functions.
///
/// # Example
///
/// ```rust,ignore
/// let mut registry = MultiplierRegistry::new();
/// registry.register(TransactionMultiplier::default());
/// registry.register(NamespaceMultiplier::default());
/// registry.init("MY_PROJECT_MULTIPLIERS", &["txn-commit"]);
/// ```
pub struct MultiplierRegistry<S> {
    /// Every registered multiplier, in registration order.
    available: Vec<Arc<dyn Multiplier<S>>>,

    /// The active subset, in candidate-name order. Empty until `init`.
    active: Vec<Arc<dyn Multiplier<S>>>,
}

impl<S> MultiplierRegistry<S> {
    /// Create an empty registry with no active multipliers.
    pub fn new() -> Self {
        Self {
            available: Vec::new(),
            active: Vec::new(),
        }
    }

    /// Add the given multiplier to the available set.
    ///
    /// Must be called before [`init`](Self::init) for the multiplier to be
    /// eligible for activation. May be called any number of times from
    /// independent setup routines. Registering a second multiplier under an
    /// already-claimed name is not rejected; the later registration wins the
    /// name lookup at init time.
    pub fn register(&mut self, multiplier: impl Multiplier<S> + 'static) {
        debug!("registered multiplier: {}", multiplier.name());
        self.available.push(Arc::new(multiplier));
    }

    /// Resolve the active set from configuration.
    ///
    /// Reads the environment variable named `env_var`. If it is set and
    /// non-blank, its value is split on commas into candidate names, each
    /// trimmed of surrounding whitespace; if it is unset or blank, `defaults`
    /// is used verbatim. Candidates are then resolved against the available
    /// set: matches become active in candidate order, unknown names are
    /// silently dropped, and duplicate candidates yield duplicate active
    /// entries. Any previously computed active set is overwritten.
    ///
    /// Multipliers are applied in the order in which their names are given.
    pub fn init(&mut self, env_var: &str, defaults: &[&str]) {
        match env::var(env_var) {
            Ok(raw) if !raw.trim().is_empty() => {
                let names: Vec<&str> = raw.split(',').map(str::trim).collect();
                self.activate(&names);
            }
            _ => self.activate(defaults),
        }
    }

    /// Resolve the active set directly from the given candidate names.
    ///
    /// This is the resolution step of [`init`](Self::init), exposed for
    /// harnesses whose configuration is not environment-based. Same
    /// semantics: candidate order, unknowns dropped, duplicates preserved,
    /// previous active set overwritten.
    pub fn activate<N: AsRef<str>>(&mut self, names: &[N]) {
        let mut by_name: HashMap<&str, &Arc<dyn Multiplier<S>>> =
            HashMap::with_capacity(self.available.len());
        for multiplier in &self.available {
            if by_name.insert(multiplier.name(), multiplier).is_some() {
                warn!(
                    "multiple multipliers registered under name {:?}, later registration wins",
                    multiplier.name()
                );
            }
        }

        let mut active = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            match by_name.get(name) {
                Some(multiplier) => active.push(Arc::clone(multiplier)),
                None => debug!("unknown multiplier {name:?} skipped"),
            }
        }
        self.active = active;

        info!("active multipliers: {}", self.active_names().join(","));
    }

    /// Apply all active multipliers to the given action sequence.
    ///
    /// Strict left-to-right fold in active-set order: each multiplier
    /// receives the sequence produced by the previous one and returns a new
    /// sequence. With an empty active set this is the identity transform.
    pub fn apply(&self, mut actions: ActionSequence<S>) -> ActionSequence<S> {
        for multiplier in &self.active {
            actions = multiplier.apply(actions);
        }

        actions
    }

    /// Decide whether a test should be skipped, without reporting.
    ///
    /// Returns the first matching reason, checked in this order:
    /// - an active multiplier (in active-set order) whose name appears in
    ///   `excludes`;
    /// - a name in `includes` with no matching active multiplier.
    pub fn skip_reason(&self, includes: &[&str], excludes: &[&str]) -> Option<SkipReason> {
        for multiplier in &self.active {
            if let Some(excluded) = excludes.iter().find(|name| multiplier.name() == **name) {
                return Some(SkipReason::Excluded((*excluded).to_string()));
            }
        }

        for include in includes {
            if !self.is_active(include) {
                return Some(SkipReason::NotIncluded((*include).to_string()));
            }
        }

        None
    }

    /// Skip the test if the active set conflicts with its declared filters.
    ///
    /// Forwards the first matching [`SkipReason`] message to
    /// [`Reporter::skip`] and returns `true` if the test should not run.
    /// Callers are expected to return from the test body immediately when
    /// this returns `true`.
    pub fn skip(&self, reporter: &mut dyn Reporter, includes: &[&str], excludes: &[&str]) -> bool {
        match self.skip_reason(includes, excludes) {
            Some(reason) => {
                reporter.skip(&reason.to_string());
                true
            }
            None => false,
        }
    }

    /// Whether a multiplier with the given name is currently active.
    pub fn is_active(&self, name: &str) -> bool {
        self.active.iter().any(|multiplier| multiplier.name() == name)
    }

    /// The names of the active multipliers, in active-set order.
    pub fn active_names(&self) -> Vec<&str> {
        self.active.iter().map(|multiplier| multiplier.name()).collect()
    }
}

impl<S> Default for MultiplierRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use proptest::prelude::*;

    /// Multiplier that leaves sequences untouched; only its name matters.
    struct Named(&'static str);

    impl Multiplier<()> for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn apply(&self, source: ActionSequence<()>) -> ActionSequence<()> {
            source
        }
    }

    /// Action carrying only a diagnostic tag.
    struct Tag(&'static str);

    impl Action<()> for Tag {
        fn execute(&mut self) {}

        fn kind(&self) -> &'static str {
            self.0
        }
    }

    /// Prepends a "front" action.
    struct Prepend;

    impl Multiplier<()> for Prepend {
        fn name(&self) -> &str {
            "prepend"
        }

        fn apply(&self, source: ActionSequence<()>) -> ActionSequence<()> {
            let mut result: ActionSequence<()> = Vec::with_capacity(source.len() + 1);
            result.push(Box::new(Tag("front")));
            result.extend(source);
            result
        }
    }

    /// Appends an action whose tag depends on the current sequence length.
    struct AppendParity;

    impl Multiplier<()> for AppendParity {
        fn name(&self) -> &str {
            "append-parity"
        }

        fn apply(&self, mut source: ActionSequence<()>) -> ActionSequence<()> {
            let tag = if source.len() % 2 == 0 { "even" } else { "odd" };
            source.push(Box::new(Tag(tag)));
            source
        }
    }

    fn kinds(actions: &ActionSequence<()>) -> Vec<&'static str> {
        actions.iter().map(|action| action.kind()).collect()
    }

    #[test]
    fn activate_follows_candidate_order_not_registration_order() {
        let mut registry = MultiplierRegistry::new();
        registry.register(Named("a"));
        registry.register(Named("b"));
        registry.register(Named("c"));

        registry.activate(&["c", "a"]);

        assert_eq!(registry.active_names(), vec!["c", "a"]);
    }

    #[test]
    fn activate_drops_unknown_names_and_keeps_duplicates() {
        let mut registry = MultiplierRegistry::new();
        registry.register(Named("a"));
        registry.register(Named("b"));

        registry.activate(&["b", "missing", "b", "a"]);

        assert_eq!(registry.active_names(), vec!["b", "b", "a"]);
    }

    #[test]
    fn activate_overwrites_previous_active_set() {
        let mut registry = MultiplierRegistry::new();
        registry.register(Named("a"));
        registry.register(Named("b"));

        registry.activate(&["a"]);
        registry.activate(&["b"]);

        assert_eq!(registry.active_names(), vec!["b"]);
    }

    #[test]
    fn duplicate_registration_last_wins() {
        struct Tagging(&'static str, &'static str);

        impl Multiplier<()> for Tagging {
            fn name(&self) -> &str {
                self.0
            }

            fn apply(&self, mut source: ActionSequence<()>) -> ActionSequence<()> {
                source.push(Box::new(Tag(self.1)));
                source
            }
        }

        let mut registry = MultiplierRegistry::new();
        registry.register(Tagging("dim", "first"));
        registry.register(Tagging("dim", "second"));
        registry.activate(&["dim"]);

        let result = registry.apply(Vec::new());
        assert_eq!(kinds(&result), vec!["second"]);
    }

    #[test]
    fn init_round_trip_defaults_then_env_override() {
        const ENV_VAR: &str = "TESTWEAVE_TEST_INIT_ROUND_TRIP";

        let mut registry = MultiplierRegistry::new();
        registry.register(Named("a"));
        registry.register(Named("b"));

        std::env::remove_var(ENV_VAR);
        registry.init(ENV_VAR, &["b", "a"]);
        assert_eq!(registry.active_names(), vec!["b", "a"]);

        std::env::set_var(ENV_VAR, "a, b");
        registry.init(ENV_VAR, &["b", "a"]);
        assert_eq!(registry.active_names(), vec!["a", "b"]);

        std::env::remove_var(ENV_VAR);
    }

    #[test]
    fn init_blank_env_value_falls_back_to_defaults() {
        const ENV_VAR: &str = "TESTWEAVE_TEST_INIT_BLANK";

        let mut registry = MultiplierRegistry::new();
        registry.register(Named("a"));

        std::env::set_var(ENV_VAR, "   ");
        registry.init(ENV_VAR, &["a"]);
        assert_eq!(registry.active_names(), vec!["a"]);

        std::env::remove_var(ENV_VAR);
    }

    #[test]
    fn init_trims_whitespace_around_env_names() {
        const ENV_VAR: &str = "TESTWEAVE_TEST_INIT_TRIM";

        let mut registry = MultiplierRegistry::new();
        registry.register(Named("a"));
        registry.register(Named("b"));
        registry.register(Named("c"));

        std::env::set_var(ENV_VAR, "  c ,a,  b");
        registry.init(ENV_VAR, &[]);
        assert_eq!(registry.active_names(), vec!["c", "a", "b"]);

        std::env::remove_var(ENV_VAR);
    }

    #[test]
    fn apply_with_empty_active_set_is_identity() {
        let registry: MultiplierRegistry<()> = MultiplierRegistry::new();

        let actions: ActionSequence<()> = vec![Box::new(Tag("one")), Box::new(Tag("two"))];
        let result = registry.apply(actions);

        assert_eq!(kinds(&result), vec!["one", "two"]);
    }

    #[test]
    fn apply_folds_left_to_right_over_active_order() {
        let mut registry = MultiplierRegistry::new();
        registry.register(Prepend);
        registry.register(AppendParity);

        let base = || -> ActionSequence<()> { vec![Box::new(Tag("base"))] };

        registry.activate(&["prepend", "append-parity"]);
        let forward = registry.apply(base());
        assert_eq!(kinds(&forward), vec!["front", "base", "even"]);

        registry.activate(&["append-parity", "prepend"]);
        let reverse = registry.apply(base());
        assert_eq!(kinds(&reverse), vec!["front", "base", "odd"]);

        assert_ne!(kinds(&forward), kinds(&reverse));
    }

    #[test]
    fn skip_reason_matrix() {
        let mut registry = MultiplierRegistry::new();
        registry.register(Named("txn"));
        registry.activate(&["txn"]);

        assert_eq!(registry.skip_reason(&["txn"], &[]), None);
        assert_eq!(
            registry.skip_reason(&["ns"], &[]),
            Some(SkipReason::NotIncluded("ns".to_string()))
        );
        assert_eq!(
            registry.skip_reason(&[], &["txn"]),
            Some(SkipReason::Excluded("txn".to_string()))
        );
        assert_eq!(registry.skip_reason(&[], &["ns"]), None);
    }

    #[test]
    fn skip_reports_the_offending_name() {
        #[derive(Default)]
        struct Recorder {
            skips: Vec<String>,
        }

        impl Reporter for Recorder {
            fn log(&mut self, _message: &str) {}

            fn skip(&mut self, message: &str) {
                self.skips.push(message.to_string());
            }

            fn fatal(&mut self, message: &str) {
                panic!("unexpected fatal: {message}");
            }
        }

        let mut registry = MultiplierRegistry::new();
        registry.register(Named("txn"));
        registry.activate(&["txn"]);

        let mut reporter = Recorder::default();
        assert!(registry.skip(&mut reporter, &[], &["txn"]));
        assert!(registry.skip(&mut reporter, &["ns"], &[]));
        assert!(!registry.skip(&mut reporter, &["txn"], &[]));

        assert_eq!(reporter.skips.len(), 2);
        assert!(reporter.skips[0].contains("excluded"));
        assert!(reporter.skips[0].contains("txn"));
        assert!(reporter.skips[1].contains("not included"));
        assert!(reporter.skips[1].contains("ns"));
    }

    proptest! {
        /// Active-set order always equals candidate order filtered to the
        /// registered universe, duplicates included.
        #[test]
        fn activation_preserves_candidate_order(
            candidates in prop::collection::vec(
                prop::sample::select(vec!["a", "b", "c", "x", "y"]),
                0..8,
            )
        ) {
            let mut registry = MultiplierRegistry::new();
            registry.register(Named("a"));
            registry.register(Named("b"));
            registry.register(Named("c"));

            registry.activate(&candidates);

            let expected: Vec<&str> = candidates
                .iter()
                .copied()
                .filter(|name| matches!(*name, "a" | "b" | "c"))
                .collect();
            prop_assert_eq!(registry.active_names(), expected);
        }
    }
}
