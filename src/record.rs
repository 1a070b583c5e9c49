//! Durable records for the active component set.
//!
//! A [`PersistedRecord`] is the only thing that survives a process restart:
//! a stable type identifier plus whatever opaque state the component chose
//! to carry. [`RecordStore`] owns the backing JSON file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::descriptor::ComponentTypeId;
use crate::error::Result;

/// A stable, serializable reference to a component type.
///
/// Meaningless without a registry lookup; carries no live references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedRecord {
    /// Identifier in the same space as the registry's descriptors
    pub type_id: ComponentTypeId,
    /// Component-specific opaque state; round-tripped exactly, never
    /// interpreted by the core
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<serde_json::Value>,
}

impl PersistedRecord {
    /// A fresh record with no component state.
    pub fn new(type_id: ComponentTypeId) -> Self {
        Self {
            type_id,
            state: None,
        }
    }

    /// Attach an opaque state blob.
    pub fn with_state(mut self, state: serde_json::Value) -> Self {
        self.state = Some(state);
        self
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RecordFile {
    records: Vec<PersistedRecord>,
}

/// Durable store for the current record set.
///
/// Loading never fails the caller: a missing or unreadable file degrades to
/// an empty store. Saving replaces the previous file atomically or leaves
/// it intact.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    data: RecordFile,
}

impl RecordStore {
    /// Load a previously saved store, or start empty.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<RecordFile>(&raw) {
                Ok(data) => data,
                Err(err) => {
                    warn!(path = %path.display(), %err, "record file unreadable, starting empty");
                    RecordFile::default()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => RecordFile::default(),
            Err(err) => {
                warn!(path = %path.display(), %err, "record file inaccessible, starting empty");
                RecordFile::default()
            }
        };

        Self { path, data }
    }

    /// Platform default location for the record file.
    pub fn default_path() -> Result<PathBuf> {
        let mut dir = dirs::config_dir().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no config directory")
        })?;
        dir.push("component-host");
        fs::create_dir_all(&dir)?;
        Ok(dir.join("records.json"))
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The tracked record set.
    pub fn records(&self) -> &[PersistedRecord] {
        &self.data.records
    }

    /// Replace the entire tracked set.
    pub fn set_records(&mut self, records: impl IntoIterator<Item = PersistedRecord>) {
        self.data.records.clear();
        self.data.records.extend(records);
    }

    /// Serialize the current set to the backing file.
    ///
    /// Writes a sibling temp file and renames it over the target, so a
    /// failed save leaves the previous file untouched. Failures surface to
    /// the caller; losing session state silently is not acceptable.
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
