//! Catalog metadata for discoverable component types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::component::ComponentConfig;

/// Opaque, stable identifier for a component type.
///
/// The identifier is the durable link between persisted records and the
/// registry; it follows a registration, not a Rust type path, so types can
/// be renamed or moved without invalidating saved sessions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentTypeId(String);

impl ComponentTypeId {
    /// Create an identifier from its string form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentTypeId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ComponentTypeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Immutable catalog entry for one discoverable component type.
///
/// Built once during registry construction and never mutated; everything a
/// browsing or searching surface needs without touching a live instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDescriptor {
    type_id: ComponentTypeId,
    config: ComponentConfig,
}

impl ComponentDescriptor {
    pub(crate) fn new(type_id: ComponentTypeId, config: ComponentConfig) -> Self {
        Self { type_id, config }
    }

    /// Stable identifier of the implementing type.
    pub fn type_id(&self) -> &ComponentTypeId {
        &self.type_id
    }

    /// The full static metadata.
    pub fn config(&self) -> &ComponentConfig {
        &self.config
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Author.
    pub fn author(&self) -> &str {
        &self.config.author
    }

    /// Version string.
    pub fn version(&self) -> &str {
        &self.config.version
    }

    /// Optional description.
    pub fn description(&self) -> Option<&str> {
        self.config.description.as_deref()
    }

    /// Optional readme URL.
    pub fn readme_url(&self) -> Option<&str> {
        self.config.readme_url.as_deref()
    }
}
