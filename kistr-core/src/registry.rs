//! Name → descriptor registry.

use std::sync::Arc;

use crate::{BidAskListSpec, TrError, TrSpec};

/// Registry of endpoint descriptors keyed by canonical TR name.
///
/// Built once at startup and shared read-only afterwards. Registration order is
/// preserved and reported back by [`all`](Self::all) and in unknown-name errors.
#[derive(Clone, Default)]
pub struct TrRegistry {
    specs: Vec<Arc<dyn TrSpec>>,
}

impl TrRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { specs: Vec::new() }
    }

    /// A registry holding every built-in descriptor.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut reg = Self::new();
        // Built-ins have distinct names; registration into an empty registry cannot collide.
        reg.specs.push(Arc::new(BidAskListSpec::new()));
        reg
    }

    /// Register a descriptor.
    ///
    /// # Errors
    /// Returns `DuplicateTr` if a descriptor with the same name (or a name that
    /// would resolve to the same alias) is already registered; the existing
    /// registration is kept.
    pub fn register(&mut self, spec: impl TrSpec + 'static) -> Result<(), TrError> {
        self.register_arc(Arc::new(spec))
    }

    /// Register an already shared descriptor.
    ///
    /// # Errors
    /// See [`register`](Self::register).
    pub fn register_arc(&mut self, spec: Arc<dyn TrSpec>) -> Result<(), TrError> {
        let name = spec.name();
        if self.specs.iter().any(|s| s.name().matches(name.as_str())) {
            return Err(TrError::DuplicateTr {
                name: name.as_str().to_string(),
            });
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "kistr::registry", tr = %name, "registered TR");
        self.specs.push(spec);
        Ok(())
    }

    /// Resolve a canonical name or its constant alias to a descriptor.
    ///
    /// Exact canonical matches win over alias matches.
    ///
    /// # Errors
    /// Returns `UnknownTr` listing every registered name when nothing matches.
    pub fn get(&self, name: impl AsRef<str>) -> Result<Arc<dyn TrSpec>, TrError> {
        let raw = name.as_ref();
        self.specs
            .iter()
            .find(|s| s.name().as_str() == raw)
            .or_else(|| self.specs.iter().find(|s| s.name().matches(raw)))
            .cloned()
            .ok_or_else(|| TrError::UnknownTr {
                name: raw.to_string(),
                available: self.names().map(str::to_string).collect(),
            })
    }

    /// Whether a descriptor resolves for `name`.
    #[must_use]
    pub fn contains(&self, name: impl AsRef<str>) -> bool {
        let raw = name.as_ref();
        self.specs.iter().any(|s| s.name().matches(raw))
    }

    /// Registered descriptors in registration order.
    #[must_use]
    pub fn all(&self) -> &[Arc<dyn TrSpec>] {
        &self.specs
    }

    /// Registered canonical names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.specs.iter().map(|s| s.name().as_str())
    }

    /// Number of registered descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// True when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl std::fmt::Debug for TrRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

