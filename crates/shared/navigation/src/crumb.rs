use serde::{Deserialize, Serialize};

/// A single breadcrumb-trail entry describing one ancestor of the current view.
///
/// The final crumb of a trail conventionally carries no `link` (it is the
/// current view); intermediate crumbs link to their ancestor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Crumb {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Crumb {
    /// A terminal crumb with no link.
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), link: None }
    }

    /// A crumb linking to an ancestor view.
    pub fn linked(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self { title: title.into(), link: Some(link.into()) }
    }
}
