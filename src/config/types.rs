//! Raw config types matching the resource definition JSON.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Route list for one resource: `{ "routes": ["create", "get-list", ...] }`.
/// Both keys are required; a misspelled key is a parse error, not an empty list.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceMeta {
    pub routes: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResourceConfig {
    pub meta: ResourceMeta,
}

impl ResourceConfig {
    pub fn with_routes<I, S>(routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ResourceConfig {
            meta: ResourceMeta {
                routes: routes.into_iter().map(Into::into).collect(),
            },
        }
    }
}

/// Resource name -> definition, in declaration order. Keys are used verbatim
/// as the first path segment.
pub type ResourceDefinitions = IndexMap<String, ResourceConfig>;
