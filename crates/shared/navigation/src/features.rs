use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An immutable mapping from feature name to feature-specific configuration.
///
/// Built once when a [`RouteHandle`] is constructed and read-only thereafter:
/// no accessor hands out a mutable reference, so callers cannot alias or
/// mutate the stored configuration. Callers that need an owned, independently
/// mutable copy take one explicitly via [`FeaturesMap::to_map`].
///
/// [`RouteHandle`]: crate::RouteHandle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeaturesMap {
    entries: FxHashMap<String, Value>,
}

impl FeaturesMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The configuration object for `name`, if the feature is enabled.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Whether the feature `name` is enabled for this route.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(feature name, configuration)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, config)| (name.as_str(), config))
    }

    /// Hands back an owned copy of the underlying map.
    ///
    /// Mutating the copy has no effect on this `FeaturesMap`.
    #[must_use]
    pub fn to_map(&self) -> FxHashMap<String, Value> {
        self.entries.clone()
    }
}

impl FromIterator<(String, Value)> for FeaturesMap {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

impl From<FxHashMap<String, Value>> for FeaturesMap {
    fn from(entries: FxHashMap<String, Value>) -> Self {
        Self { entries }
    }
}
