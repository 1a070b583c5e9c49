//! Main component host implementation.

use tracing::{info, warn};

use crate::config::HostConfig;
use crate::descriptor::ComponentTypeId;
use crate::error::{HostError, Result};
use crate::instance::ComponentInstance;
use crate::record::{PersistedRecord, RecordStore};
use crate::registry::ComponentRegistry;
use crate::search::{default_searcher, SearchDelivery, Searcher};
use crate::store::InstanceStore;

/// Main host tying the catalog, the live set, and persistence together.
///
/// Construction restores the previous session; [`shutdown`](Self::shutdown)
/// persists the current one. Everything in between goes through the
/// instance store, which this host owns exclusively.
pub struct ComponentHost {
    config: HostConfig,
    registry: ComponentRegistry,
    records: RecordStore,
    store: InstanceStore,
    searcher: Box<dyn Searcher>,
    shut_down: bool,
}

impl ComponentHost {
    /// Create a host with the default search strategy.
    pub fn new(config: HostConfig) -> Self {
        Self::with_searcher(config, default_searcher())
    }

    /// Create a host with a custom search strategy.
    pub fn with_searcher(config: HostConfig, searcher: Box<dyn Searcher>) -> Self {
        Self::with_registry(config, ComponentRegistry::build(), searcher)
    }

    pub(crate) fn with_registry(
        config: HostConfig,
        registry: ComponentRegistry,
        searcher: Box<dyn Searcher>,
    ) -> Self {
        let records = RecordStore::load(&config.records_path);

        let mut store = InstanceStore::new();
        let restored = InstanceStore::from_records(records.records(), &registry);
        info!(
            restored = restored.len(),
            catalog = registry.len(),
            "component host ready"
        );
        for instance in restored {
            store.add(instance);
        }
        store.activate_all();

        Self {
            config,
            registry,
            records,
            store,
            searcher,
            shut_down: false,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// The component catalog.
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// The live instance set.
    pub fn store(&self) -> &InstanceStore {
        &self.store
    }

    /// Mutable access to the live instance set.
    pub fn store_mut(&mut self) -> &mut InstanceStore {
        &mut self.store
    }

    /// The backing record store.
    pub fn record_store(&self) -> &RecordStore {
        &self.records
    }

    // === Activation ===

    /// Instantiate, materialize, and activate a component, pinned to the
    /// end of the display order.
    pub fn pin(&mut self, type_id: &ComponentTypeId) -> Result<()> {
        let instance = self.create(type_id)?;
        self.store.add(instance);
        Ok(())
    }

    /// Instantiate, materialize, and activate a component without tracking
    /// it.
    ///
    /// The caller owns the instance — a detached window, typically. It is
    /// not part of the persisted snapshot; pin it instead if it should
    /// survive a restart.
    pub fn open(&mut self, type_id: &ComponentTypeId) -> Result<ComponentInstance> {
        self.create(type_id)
    }

    /// Tear down and drop the pinned instance at `index`.
    pub fn unpin(&mut self, index: usize) -> bool {
        self.store.remove(index)
    }

    /// Move the pinned instance at `index` to the end of the order.
    ///
    /// The pop-out path: the instance stays tracked and persisted.
    pub fn pop_out(&mut self, index: usize) {
        self.store.move_to_back(index);
    }

    /// Tear down and drop every pinned instance.
    pub fn unpin_all(&mut self) {
        self.store.remove_all();
    }

    /// Replace the pinned set with the configured preset.
    ///
    /// Preset ids that are not registered are logged and skipped. Returns
    /// how many components were pinned.
    pub fn load_preset(&mut self) -> usize {
        let mut descriptors = Vec::with_capacity(self.config.preset.len());
        for type_id in &self.config.preset {
            match self.registry.get(type_id) {
                Some(descriptor) => descriptors.push(descriptor.clone()),
                None => warn!(%type_id, "preset component not registered"),
            }
        }

        let instances = InstanceStore::from_descriptors(&descriptors, &self.registry);
        self.store.set_instances(instances);
        self.store.activate_all();
        self.store.len()
    }

    fn create(&self, type_id: &ComponentTypeId) -> Result<ComponentInstance> {
        let component = InstanceStore::instantiate(&self.registry, type_id)?;
        let descriptor = match self.registry.get(type_id) {
            Some(descriptor) => descriptor.clone(),
            None => return Err(HostError::ComponentNotFound(type_id.clone())),
        };

        let mut instance = ComponentInstance::materialize(
            component,
            descriptor,
            PersistedRecord::new(type_id.clone()),
        );
        instance.activate();
        Ok(instance)
    }

    // === Search ===

    /// Run the configured search strategy over the catalog.
    pub fn search(&self, query: &str, deliver: SearchDelivery) {
        let corpus = self.registry.list();
        self.searcher.search(query, &corpus, deliver);
    }

    // === Shutdown ===

    /// Persist the current session and tear everything down.
    ///
    /// A save failure is surfaced — the caller should warn that session
    /// state was not preserved — but teardown still completes. Calling
    /// again is a no-op.
    pub fn shutdown(&mut self) -> Result<()> {
        if self.shut_down {
            return Ok(());
        }
        self.shut_down = true;

        self.store.deactivate_all();
        self.records.set_records(self.store.records());
        let saved = self.records.save();
        self.store.remove_all();
        saved
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;
    use crate::component::{Bounds, Component, ComponentConfig};
    use crate::registry::ComponentRegistration;

    #[derive(Default)]
    struct Plain;

    impl Component for Plain {
        fn config() -> ComponentConfig {
            ComponentConfig::new("Plain").with_version("1.0.0")
        }

        fn render(&mut self, _bounds: Bounds) -> anyhow::Result<()> {
            Ok(())
        }
    }

    static ENTRIES: [ComponentRegistration; 2] = [
        ComponentRegistration {
            type_id: "kit.alpha",
            config: Plain::config,
            construct: || Box::new(Plain),
        },
        ComponentRegistration {
            type_id: "kit.beta",
            config: Plain::config,
            construct: || Box::new(Plain),
        },
    ];

    fn host(config: HostConfig) -> ComponentHost {
        ComponentHost::with_registry(
            config,
            ComponentRegistry::from_entries(&ENTRIES),
            default_searcher(),
        )
    }

    fn id(raw: &str) -> ComponentTypeId {
        ComponentTypeId::new(raw)
    }

    fn pinned_ids(host: &ComponentHost) -> Vec<String> {
        host.store()
            .iter()
            .map(|instance| instance.type_id().to_string())
            .collect()
    }

    #[test]
    fn session_round_trips_across_hosts() {
        let dir = tempdir().unwrap();
        let config = HostConfig::new(dir.path().join("records.json"));

        let mut first = host(config.clone());
        first.pin(&id("kit.alpha")).unwrap();
        first.pin(&id("kit.beta")).unwrap();
        first.pin(&id("kit.alpha")).unwrap();
        first.shutdown().unwrap();

        let second = host(config);
        assert_eq!(pinned_ids(&second), ["kit.alpha", "kit.beta", "kit.alpha"]);
    }

    #[test]
    fn pin_unknown_type_fails() {
        let dir = tempdir().unwrap();
        let mut host = host(HostConfig::new(dir.path().join("records.json")));

        let err = host.pin(&id("kit.ghost")).unwrap_err();
        assert!(matches!(err, HostError::ComponentNotFound(_)));
        assert!(host.store().is_empty());
    }

    #[test]
    fn open_is_untracked_and_unpersisted() {
        let dir = tempdir().unwrap();
        let config = HostConfig::new(dir.path().join("records.json"));

        let mut first = host(config.clone());
        let detached = first.open(&id("kit.alpha")).unwrap();
        assert_eq!(detached.type_id(), &id("kit.alpha"));
        assert!(first.store().is_empty());
        drop(detached);
        first.shutdown().unwrap();

        let second = host(config);
        assert!(second.store().is_empty());
    }

    #[test]
    fn pop_out_keeps_the_instance_persisted() {
        let dir = tempdir().unwrap();
        let config = HostConfig::new(dir.path().join("records.json"));

        let mut first = host(config.clone());
        first.pin(&id("kit.alpha")).unwrap();
        first.pin(&id("kit.beta")).unwrap();
        first.pop_out(0);
        assert_eq!(pinned_ids(&first), ["kit.beta", "kit.alpha"]);
        first.shutdown().unwrap();

        let second = host(config);
        assert_eq!(pinned_ids(&second), ["kit.beta", "kit.alpha"]);
    }

    #[test]
    fn load_preset_replaces_the_pinned_set() {
        let dir = tempdir().unwrap();
        let config = HostConfig::new(dir.path().join("records.json"))
            .with_preset(["kit.beta", "kit.ghost", "kit.alpha"]);

        let mut host = host(config);
        host.pin(&id("kit.alpha")).unwrap();

        let pinned = host.load_preset();
        assert_eq!(pinned, 2);
        assert_eq!(pinned_ids(&host), ["kit.beta", "kit.alpha"]);
    }

    #[test]
    fn stale_records_are_skipped_on_restore() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.json");

        let mut store = RecordStore::load(&path);
        store.set_records([
            PersistedRecord::new(id("kit.alpha")),
            PersistedRecord::new(id("kit.retired")),
            PersistedRecord::new(id("kit.beta")),
        ]);
        store.save().unwrap();

        let host = host(HostConfig::new(path));
        assert_eq!(pinned_ids(&host), ["kit.alpha", "kit.beta"]);
    }

    #[test]
    fn shutdown_twice_is_a_no_op() {
        let dir = tempdir().unwrap();
        let config = HostConfig::new(dir.path().join("records.json"));

        let mut first = host(config.clone());
        first.pin(&id("kit.alpha")).unwrap();
        first.shutdown().unwrap();
        first.shutdown().unwrap();

        let second = host(config);
        assert_eq!(pinned_ids(&second), ["kit.alpha"]);
    }

    #[test]
    fn search_runs_over_the_catalog() {
        let dir = tempdir().unwrap();
        let host = host(HostConfig::new(dir.path().join("records.json")));

        let out = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&out);
        host.search(
            "",
            Box::new(move |ids| {
                *sink.borrow_mut() = ids;
            }),
        );

        assert_eq!(out.borrow().len(), 2);
    }
}
