//! Config validation: capability names, delete exclusivity, resource names.

use crate::config::{Capability, ResourceDefinitions};
use crate::error::ConfigError;
use std::collections::HashSet;

/// Paths served by the common routes.
pub const RESERVED_NAMES: [&str; 3] = ["health", "version", "info"];

/// A resource name becomes a literal path segment, so it must not contain
/// separators, router wildcards or whitespace.
pub fn validate_resource_name(name: &str) -> Result<(), ConfigError> {
    let invalid = name.is_empty()
        || RESERVED_NAMES.contains(&name)
        || name.starts_with(':')
        || name.starts_with('*')
        || name.chars().any(|c| c == '/' || c == '?' || c == '#' || c.is_whitespace());
    if invalid {
        return Err(ConfigError::InvalidResourceName(name.to_string()));
    }
    Ok(())
}

pub fn validate(definitions: &ResourceDefinitions) -> Result<(), ConfigError> {
    for (name, resource) in definitions {
        validate_resource_name(name)?;

        let mut seen = HashSet::new();
        for route in &resource.meta.routes {
            let capability: Capability = route.parse().map_err(|capability| ConfigError::UnknownCapability {
                resource: name.clone(),
                capability,
            })?;
            if !seen.insert(capability) {
                return Err(ConfigError::DuplicateCapability {
                    resource: name.clone(),
                    capability: route.clone(),
                });
            }
        }

        if seen.contains(&Capability::SoftDelete) && seen.contains(&Capability::HardDelete) {
            return Err(ConfigError::ConflictingDelete(name.clone()));
        }
    }
    Ok(())
}
