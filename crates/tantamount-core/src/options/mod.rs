//! Per-call configuration of the engine
//!
//! Options decide how each type is compared (its equality strategy), which
//! custom comparers apply, whether recursion depth is bounded, and whether
//! step dispatch follows declared or runtime types. Options are built up
//! front with the `comparing_*`/`using_*`/`allowing_*` mutators and are
//! read-only once a validation starts, which is what makes the memoized
//! strategy cache safe to share across threads.

pub mod comparers;

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tantamount_core_types::TypeToken;

pub use comparers::{ApproxFloatComparer, EqualityComparer, FnComparer};

/// How values of a type are compared once the traversal reaches them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EqualityStrategy {
    /// Recurse into members or elements
    ByMembers,
    /// Compare as one structural value
    ByValue,
    /// Defer to the value's own equality
    OwnEquals,
}

/// Configuration consumed by the validator and the steps
pub struct EquivalencyOptions {
    overrides: HashMap<TypeToken, EqualityStrategy>,
    strategy_cache: RwLock<HashMap<TypeToken, EqualityStrategy>>,
    comparers: HashMap<TypeToken, Arc<dyn EqualityComparer>>,
    allow_infinite_recursion: bool,
    use_runtime_typing: bool,
}

impl EquivalencyOptions {
    /// Options with default strategies, no comparers, bounded recursion,
    /// and declared typing
    pub fn new() -> Self {
        Self {
            overrides: HashMap::new(),
            strategy_cache: RwLock::new(HashMap::new()),
            comparers: HashMap::new(),
            allow_infinite_recursion: false,
            use_runtime_typing: false,
        }
    }

    /// Resolve the equality strategy for a type
    ///
    /// The first resolution per token is memoized; later lookups, including
    /// concurrent ones from other threads, return the cached strategy.
    pub fn equality_strategy(&self, token: &TypeToken) -> EqualityStrategy {
        if let Some(found) = self
            .strategy_cache
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(token)
        {
            return *found;
        }

        let mut cache = self
            .strategy_cache
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(found) = cache.get(token) {
            return *found;
        }
        let resolved = self.resolve_strategy(token);
        cache.insert(token.clone(), resolved);
        resolved
    }

    fn resolve_strategy(&self, token: &TypeToken) -> EqualityStrategy {
        if let Some(strategy) = self.overrides.get(token) {
            return *strategy;
        }
        if token.is_composite() {
            EqualityStrategy::ByMembers
        } else {
            EqualityStrategy::OwnEquals
        }
    }

    /// The comparer registered for a type, if any
    pub fn custom_comparer(&self, token: &TypeToken) -> Option<Arc<dyn EqualityComparer>> {
        self.comparers.get(token).cloned()
    }

    /// Whether the recursion depth guard is disabled
    pub fn allow_infinite_recursion(&self) -> bool {
        self.allow_infinite_recursion
    }

    /// Whether step dispatch follows runtime instead of declared types
    pub fn use_runtime_typing(&self) -> bool {
        self.use_runtime_typing
    }

    /// Compare values of the given type as single structural values
    pub fn comparing_by_value(mut self, token: TypeToken) -> Self {
        self.overrides.insert(token, EqualityStrategy::ByValue);
        self.strategy_cache = RwLock::new(HashMap::new());
        self
    }

    /// Compare values of the given type member by member
    pub fn comparing_by_members(mut self, token: TypeToken) -> Self {
        self.overrides.insert(token, EqualityStrategy::ByMembers);
        self.strategy_cache = RwLock::new(HashMap::new());
        self
    }

    /// Register a custom comparer for the given type
    pub fn using_comparer(
        mut self,
        token: TypeToken,
        comparer: Arc<dyn EqualityComparer>,
    ) -> Self {
        self.comparers.insert(token, comparer);
        self
    }

    /// Disable the recursion depth guard
    ///
    /// Cycle detection still applies, so cyclic graphs terminate either way.
    pub fn allowing_infinite_recursion(mut self) -> Self {
        self.allow_infinite_recursion = true;
        self
    }

    /// Dispatch steps on runtime types instead of declared types
    pub fn respecting_runtime_types(mut self) -> Self {
        self.use_runtime_typing = true;
        self
    }
}

impl Default for EquivalencyOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary used as the "configuration" reportable of a validation
impl fmt::Display for EquivalencyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "typing: {}, recursion: {}, strategy overrides: {}, custom comparers: {}",
            if self.use_runtime_typing {
                "runtime"
            } else {
                "declared"
            },
            if self.allow_infinite_recursion {
                "unbounded"
            } else {
                "bounded"
            },
            self.overrides.len(),
            self.comparers.len()
        )
    }
}
