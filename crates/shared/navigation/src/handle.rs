use crate::crumb::Crumb;
use crate::features::FeaturesMap;
use fxhash::FxHashMap;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// The breadcrumb-producing function attached to a route.
///
/// The `data` argument is opaque to the handle: its shape is defined by each
/// call site (typically the loader payload of the matched route) and is passed
/// by shared reference, never mutated.
pub type CrumbsBuilder = Arc<dyn Fn(&Value) -> Vec<Crumb> + Send + Sync>;

/// Immutable navigation metadata attached to a route-tree node.
///
/// Combines a lazily-invoked breadcrumb builder, a logical module identifier,
/// and a per-module feature map. Constructed once per navigation-node
/// definition at module load and immutable thereafter; cloning is cheap
/// (shared `Arc` internals).
///
/// # Example
///
/// ```rust
/// use siteline_navigation::{Crumb, RouteHandle};
/// use serde_json::json;
///
/// let handle = RouteHandle::builder()
///     .module_id("assets")
///     .crumbs(|data| {
///         let name = data["assetName"].as_str().unwrap_or("Asset");
///         vec![Crumb::linked("Assets", "/assets"), Crumb::new(name)]
///     })
///     .feature("board", json!({ "columns": 4 }))
///     .build();
///
/// let trail = handle.build_crumbs(&json!({ "assetName": "Mill 7" }));
/// assert_eq!(trail.len(), 2);
/// assert_eq!(trail[1].title, "Mill 7");
/// assert!(handle.features().contains("board"));
/// ```
#[derive(Clone, Default)]
pub struct RouteHandle {
    module_id: Option<Cow<'static, str>>,
    crumbs: Option<CrumbsBuilder>,
    features: Arc<FeaturesMap>,
}

impl fmt::Debug for RouteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteHandle")
            .field("module_id", &self.module_id)
            .field("crumbs", &self.crumbs.as_ref().map(|_| ".."))
            .field("features", &self.features)
            .finish()
    }
}

impl RouteHandle {
    #[must_use = "The handle is not constructed until you call .build()"]
    pub fn builder() -> RouteHandleBuilder {
        RouteHandleBuilder::default()
    }

    /// The logical section identifier this route belongs to, if any.
    #[must_use]
    pub fn module_id(&self) -> Option<&str> {
        self.module_id.as_deref()
    }

    /// Builds the breadcrumb trail for `data`.
    ///
    /// Delegates to the stored builder; a handle without a builder degrades
    /// to an empty trail rather than erroring. The result is never cached and
    /// `data` is never mutated.
    #[must_use]
    pub fn build_crumbs(&self, data: &Value) -> Vec<Crumb> {
        self.crumbs.as_ref().map_or_else(Vec::new, |build| build(data))
    }

    /// The read-only per-module feature map.
    #[must_use]
    pub fn features(&self) -> &FeaturesMap {
        &self.features
    }

    /// An owned copy of the feature map, detached from this handle.
    #[must_use]
    pub fn features_map(&self) -> FxHashMap<String, Value> {
        self.features.to_map()
    }
}

/// Fluent builder for [`RouteHandle`]. Every field is optional and `build`
/// never fails.
#[derive(Default)]
pub struct RouteHandleBuilder {
    module_id: Option<Cow<'static, str>>,
    crumbs: Option<CrumbsBuilder>,
    features: FxHashMap<String, Value>,
}

impl fmt::Debug for RouteHandleBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteHandleBuilder")
            .field("module_id", &self.module_id)
            .field("crumbs", &self.crumbs.as_ref().map(|_| ".."))
            .field("features", &self.features)
            .finish()
    }
}

impl RouteHandleBuilder {
    #[must_use = "Sets the logical module identifier"]
    pub fn module_id(mut self, id: impl Into<Cow<'static, str>>) -> Self {
        self.module_id = Some(id.into());
        self
    }

    #[must_use = "Sets the breadcrumb builder"]
    pub fn crumbs<F>(mut self, builder: F) -> Self
    where
        F: Fn(&Value) -> Vec<Crumb> + Send + Sync + 'static,
    {
        self.crumbs = Some(Arc::new(builder));
        self
    }

    /// Enables `name` with the given configuration object.
    #[must_use = "Enables a feature on the handle"]
    pub fn feature(mut self, name: impl Into<String>, config: Value) -> Self {
        self.features.insert(name.into(), config);
        self
    }

    /// Enables every feature in `map`, replacing previously set entries with
    /// the same name.
    #[must_use = "Enables a set of features on the handle"]
    pub fn features(mut self, map: impl IntoIterator<Item = (String, Value)>) -> Self {
        self.features.extend(map);
        self
    }

    #[must_use]
    pub fn build(self) -> RouteHandle {
        RouteHandle {
            module_id: self.module_id,
            crumbs: self.crumbs,
            features: Arc::new(FeaturesMap::from(self.features)),
        }
    }
}
