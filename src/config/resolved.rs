//! Resolved resource model: config validated and flattened for runtime use.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A declared route type. Each one binds exactly one method/path pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    Create,
    GetList,
    GetOne,
    Update,
    SoftDelete,
    HardDelete,
}

impl Capability {
    pub const ALL: [Capability; 6] = [
        Capability::Create,
        Capability::GetList,
        Capability::GetOne,
        Capability::Update,
        Capability::SoftDelete,
        Capability::HardDelete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Create => "create",
            Capability::GetList => "get-list",
            Capability::GetOne => "get-one",
            Capability::Update => "update",
            Capability::SoftDelete => "soft-delete",
            Capability::HardDelete => "hard-delete",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Capability::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// How records of a resource leave it, if at all.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeleteMode {
    #[default]
    None,
    Soft,
    Hard,
}

#[derive(Clone, Debug, Serialize)]
pub struct ResolvedResource {
    pub name: String,
    /// Declared capabilities in declaration order.
    pub capabilities: Vec<Capability>,
    pub delete_mode: DeleteMode,
}

impl ResolvedResource {
    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    pub fn soft_delete(&self) -> bool {
        self.delete_mode == DeleteMode::Soft
    }
}

#[derive(Clone, Debug, Default)]
pub struct ResolvedModel {
    pub resources: Vec<ResolvedResource>,
    pub resource_by_name: HashMap<String, ResolvedResource>,
}

impl ResolvedModel {
    pub fn resource(&self, name: &str) -> Option<&ResolvedResource> {
        self.resource_by_name.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_names_parse_back() {
        for c in Capability::ALL {
            assert_eq!(c.as_str().parse::<Capability>(), Ok(c));
        }
        assert_eq!("delete".parse::<Capability>(), Err("delete".to_string()));
    }

    #[test]
    fn capability_serializes_kebab_case() {
        let json = serde_json::to_string(&Capability::SoftDelete).unwrap();
        assert_eq!(json, "\"soft-delete\"");
    }
}
