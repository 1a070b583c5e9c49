//! Component type registration and the process-wide catalog.
//!
//! Component types announce themselves through a static registration table:
//! each [`register_component!`] invocation submits a [`ComponentRegistration`]
//! via `inventory`, and [`ComponentRegistry::build`] collects every
//! submission into an immutable catalog. There is no runtime type scanning;
//! the table is assembled by the linker.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::component::{Component, ComponentConfig};
use crate::descriptor::{ComponentDescriptor, ComponentTypeId};
use crate::error::{HostError, Result};

/// Static registration entry collected via `inventory`.
pub struct ComponentRegistration {
    /// Stable identifier persisted in records. Pick it once and keep it;
    /// it must not be derived from the Rust type path.
    pub type_id: &'static str,
    /// Static metadata accessor.
    pub config: fn() -> ComponentConfig,
    /// Factory producing a fresh, un-materialized instance.
    pub construct: fn() -> Box<dyn Component>,
}

inventory::collect!(ComponentRegistration);

/// Register a component type with the host's registration table.
///
/// The type must implement [`Component`] and `Default`. The identifier is
/// the durable key records are saved under.
///
/// ```rust,ignore
/// register_component!("kit.code_editor", CodeEditorTool);
/// ```
#[macro_export]
macro_rules! register_component {
    ($id:literal, $ty:ty) => {
        $crate::__private::inventory::submit! {
            $crate::ComponentRegistration {
                type_id: $id,
                config: <$ty as $crate::Component>::config,
                construct: || ::std::boxed::Box::new(<$ty as ::std::default::Default>::default())
                    as ::std::boxed::Box<dyn $crate::Component>,
            }
        }
    };
}

/// Process-wide catalog of all registered component types.
///
/// Built once from the registration table, read-only afterwards. Building
/// is idempotent: for a fixed link set every call produces the same catalog
/// in the same canonical order.
pub struct ComponentRegistry {
    descriptors: HashMap<ComponentTypeId, ComponentDescriptor>,
    factories: HashMap<ComponentTypeId, fn() -> Box<dyn Component>>,
    rejected: HashSet<ComponentTypeId>,
}

impl ComponentRegistry {
    /// Collect every registration submitted through [`register_component!`].
    pub fn build() -> Self {
        Self::from_entries(inventory::iter::<ComponentRegistration>)
    }

    /// Build a catalog from an explicit set of registrations.
    ///
    /// Registrations with unusable metadata are logged and excluded; a
    /// duplicate identifier keeps the first registration. Neither aborts
    /// the build.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a ComponentRegistration>) -> Self {
        let mut entries: Vec<&ComponentRegistration> = entries.into_iter().collect();
        entries.sort_by_key(|entry| entry.type_id);

        let mut registry = Self {
            descriptors: HashMap::new(),
            factories: HashMap::new(),
            rejected: HashSet::new(),
        };

        for entry in entries {
            let type_id = ComponentTypeId::new(entry.type_id);

            if registry.descriptors.contains_key(&type_id) {
                warn!(%type_id, "duplicate component registration, keeping the first");
                continue;
            }

            let config = (entry.config)();
            if let Err(err) = validate_config(&type_id, &config) {
                warn!(%type_id, %err, "excluding component with invalid metadata");
                registry.rejected.insert(type_id);
                continue;
            }

            registry
                .descriptors
                .insert(type_id.clone(), ComponentDescriptor::new(type_id.clone(), config));
            registry.factories.insert(type_id, entry.construct);
        }

        registry
    }

    /// Look up a descriptor by identifier.
    pub fn get(&self, type_id: &ComponentTypeId) -> Option<&ComponentDescriptor> {
        self.descriptors.get(type_id)
    }

    /// Whether the catalog contains the identifier.
    pub fn contains(&self, type_id: &ComponentTypeId) -> bool {
        self.descriptors.contains_key(type_id)
    }

    /// All descriptors in canonical `type_id` order.
    ///
    /// This is the browse order and the search corpus.
    pub fn list(&self) -> Vec<ComponentDescriptor> {
        let mut descriptors: Vec<ComponentDescriptor> =
            self.descriptors.values().cloned().collect();
        descriptors.sort_by(|a, b| a.type_id().cmp(b.type_id()));
        descriptors
    }

    /// Number of catalogued component types.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Construct a fresh instance of the identified type.
    ///
    /// Distinguishes an identifier nobody registered from one that was
    /// registered but excluded from the catalog.
    pub(crate) fn construct(&self, type_id: &ComponentTypeId) -> Result<Box<dyn Component>> {
        match self.factories.get(type_id) {
            Some(factory) => Ok(factory()),
            None if self.rejected.contains(type_id) => {
                Err(HostError::CapabilityMismatch(type_id.clone()))
            }
            None => Err(HostError::ComponentNotFound(type_id.clone())),
        }
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("count", &self.descriptors.len())
            .finish()
    }
}

fn validate_config(type_id: &ComponentTypeId, config: &ComponentConfig) -> Result<()> {
    if config.name.trim().is_empty() {
        return Err(HostError::Metadata {
            type_id: type_id.clone(),
            reason: "empty name".into(),
        });
    }
    if config.version.trim().is_empty() {
        return Err(HostError::Metadata {
            type_id: type_id.clone(),
            reason: "empty version".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Bounds;

    #[derive(Default)]
    struct Probe;

    impl Component for Probe {
        fn config() -> ComponentConfig {
            ComponentConfig::new("Probe")
                .with_author("tests")
                .with_version("1.0.0")
        }

        fn render(&mut self, _bounds: Bounds) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct Nameless;

    impl Component for Nameless {
        fn config() -> ComponentConfig {
            ComponentConfig::new("").with_version("1.0.0")
        }

        fn render(&mut self, _bounds: Bounds) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn entry(type_id: &'static str, config: fn() -> ComponentConfig) -> ComponentRegistration {
        ComponentRegistration {
            type_id,
            config,
            construct: || Box::new(Probe) as Box<dyn Component>,
        }
    }

    register_component!("kit.test.registered", Probe);

    #[test]
    fn build_collects_registration_table() {
        let registry = ComponentRegistry::build();
        assert!(registry.contains(&ComponentTypeId::new("kit.test.registered")));
    }

    #[test]
    fn build_is_idempotent() {
        let first = ComponentRegistry::build().list();
        let second = ComponentRegistry::build().list();
        assert_eq!(first, second);
    }

    #[test]
    fn list_is_sorted_by_type_id() {
        let entries = [
            entry("kit.zeta", Probe::config),
            entry("kit.alpha", Probe::config),
            entry("kit.mid", Probe::config),
        ];
        let registry = ComponentRegistry::from_entries(&entries);

        let ids: Vec<String> = registry
            .list()
            .iter()
            .map(|d| d.type_id().to_string())
            .collect();
        assert_eq!(ids, ["kit.alpha", "kit.mid", "kit.zeta"]);
    }

    #[test]
    fn type_ids_are_unique() {
        let entries = [
            entry("kit.dup", Probe::config),
            entry("kit.dup", Probe::config),
            entry("kit.other", Probe::config),
        ];
        let registry = ComponentRegistry::from_entries(&entries);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn invalid_metadata_is_excluded_without_aborting() {
        let entries = [
            entry("kit.bad", Nameless::config),
            entry("kit.good", Probe::config),
        ];
        let registry = ComponentRegistry::from_entries(&entries);

        assert_eq!(registry.len(), 1);
        assert!(registry.contains(&ComponentTypeId::new("kit.good")));
        assert!(!registry.contains(&ComponentTypeId::new("kit.bad")));
    }

    #[test]
    fn construct_distinguishes_unknown_from_rejected() {
        let entries = [entry("kit.bad", Nameless::config)];
        let registry = ComponentRegistry::from_entries(&entries);

        let missing = registry.construct(&ComponentTypeId::new("kit.nope"));
        assert!(matches!(missing, Err(HostError::ComponentNotFound(_))));

        let rejected = registry.construct(&ComponentTypeId::new("kit.bad"));
        assert!(matches!(rejected, Err(HostError::CapabilityMismatch(_))));
    }

    #[test]
    fn construct_produces_fresh_instances() {
        let entries = [entry("kit.probe", Probe::config)];
        let registry = ComponentRegistry::from_entries(&entries);

        let instance = registry.construct(&ComponentTypeId::new("kit.probe"));
        assert!(instance.is_ok());
    }
}
