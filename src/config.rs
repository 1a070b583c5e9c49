//! Component host configuration.

use std::path::PathBuf;

use crate::descriptor::ComponentTypeId;

/// Configuration for the component host.
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// File backing the persisted record set
    pub records_path: PathBuf,

    /// Components pinned by `load_preset` when a user asks for the
    /// out-of-the-box layout
    pub preset: Vec<ComponentTypeId>,
}

impl HostConfig {
    /// Create a configuration with an explicit record file path.
    pub fn new(records_path: impl Into<PathBuf>) -> Self {
        Self {
            records_path: records_path.into(),
            preset: Vec::new(),
        }
    }

    /// Set the record file path.
    pub fn with_records_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.records_path = path.into();
        self
    }

    /// Set the preset component list.
    pub fn with_preset(
        mut self,
        ids: impl IntoIterator<Item = impl Into<ComponentTypeId>>,
    ) -> Self {
        self.preset = ids.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        // Use the platform config directory when available
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));

        Self {
            records_path: config_dir.join("component-host").join("records.json"),
            preset: Vec::new(),
        }
    }
}
