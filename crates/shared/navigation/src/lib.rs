//! # Navigation Domain
//!
//! Pure navigation metadata types with minimal dependencies (`serde`,
//! `serde_json`). Keep it lean: no I/O, no rendering, no routing glue—just the
//! immutable descriptors a route tree attaches to its nodes.
//!
//! A [`RouteHandle`] couples a navigation node to a lazily-invoked breadcrumb
//! builder, a module identifier, and a read-only per-module feature map,
//! without coupling the route tree to whatever renders trails or feature-gated
//! UI.

pub mod crumb;
pub mod features;
pub mod handle;

pub use crumb::Crumb;
pub use features::FeaturesMap;
pub use handle::{CrumbsBuilder, RouteHandle, RouteHandleBuilder};
