//! The authoritative ordered set of active component instances.
//!
//! [`InstanceStore`] is the sole owner of live instances. Everything else —
//! panels, search surfaces, detached windows — borrows. Order is display
//! order and is preserved across every mutation; the same type may appear
//! more than once.

use tracing::warn;

use crate::component::Component;
use crate::descriptor::{ComponentDescriptor, ComponentTypeId};
use crate::error::Result;
use crate::instance::ComponentInstance;
use crate::record::PersistedRecord;
use crate::registry::ComponentRegistry;

/// Creates, tracks, and destroys live component instances.
#[derive(Debug, Default)]
pub struct InstanceStore {
    instances: Vec<ComponentInstance>,
}

impl InstanceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // === Creation ===

    /// Construct a fresh component with no hooks run and no record attached.
    ///
    /// The caller owns the handle outright; nothing but explicit tracking
    /// will persist it.
    pub fn instantiate(
        registry: &ComponentRegistry,
        type_id: &ComponentTypeId,
    ) -> Result<Box<dyn Component>> {
        registry.construct(type_id)
    }

    /// Rebuild instances from persisted records (the restore path).
    ///
    /// Records that no longer resolve are logged and skipped; the batch
    /// never aborts. Survivors come back materialized, in input order.
    pub fn from_records(
        records: &[PersistedRecord],
        registry: &ComponentRegistry,
    ) -> Vec<ComponentInstance> {
        let mut result = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            let Some(descriptor) = registry.get(&record.type_id) else {
                warn!(type_id = %record.type_id, index, "skipping record for unknown component type");
                continue;
            };

            let component = match registry.construct(&record.type_id) {
                Ok(component) => component,
                Err(err) => {
                    warn!(type_id = %record.type_id, index, %err, "skipping record, construction failed");
                    continue;
                }
            };

            result.push(ComponentInstance::materialize(
                component,
                descriptor.clone(),
                record.clone(),
            ));
        }

        result
    }

    /// Build instances straight from descriptors (the fresh-activation path).
    ///
    /// Each instance gets a new empty record. Same skip-and-continue policy
    /// as [`from_records`](Self::from_records).
    pub fn from_descriptors(
        descriptors: &[ComponentDescriptor],
        registry: &ComponentRegistry,
    ) -> Vec<ComponentInstance> {
        let mut result = Vec::with_capacity(descriptors.len());

        for (index, descriptor) in descriptors.iter().enumerate() {
            let component = match registry.construct(descriptor.type_id()) {
                Ok(component) => component,
                Err(err) => {
                    warn!(type_id = %descriptor.type_id(), index, %err, "skipping descriptor, construction failed");
                    continue;
                }
            };

            let record = PersistedRecord::new(descriptor.type_id().clone());
            result.push(ComponentInstance::materialize(
                component,
                descriptor.clone(),
                record,
            ));
        }

        result
    }

    // === Collection ===

    /// Append an instance to the display order.
    pub fn add(&mut self, instance: ComponentInstance) {
        self.instances.push(instance);
    }

    /// Insert an instance at a position in the display order.
    pub fn insert(&mut self, index: usize, instance: ComponentInstance) {
        let index = index.min(self.instances.len());
        self.instances.insert(index, instance);
    }

    /// Tear down and drop the instance at `index`.
    ///
    /// The teardown hook runs before removal completes; afterwards the
    /// instance is unreachable. Returns whether anything was removed.
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.instances.len() {
            return false;
        }
        let mut instance = self.instances.remove(index);
        instance.teardown();
        true
    }

    /// Move the instance at `index` to the end of the display order.
    ///
    /// This is the pop-out path: a detached duplicate stays tracked (and
    /// therefore persisted), just last in order.
    pub fn move_to_back(&mut self, index: usize) {
        if index >= self.instances.len() {
            return;
        }
        let instance = self.instances.remove(index);
        self.instances.push(instance);
    }

    /// Tear down every instance and clear the collection.
    ///
    /// Safe to call on an empty store; no teardown hook ever runs twice.
    pub fn remove_all(&mut self) {
        for instance in &mut self.instances {
            instance.teardown();
        }
        self.instances.clear();
    }

    /// Replace the entire collection, tearing down whatever it held.
    pub fn set_instances(&mut self, instances: Vec<ComponentInstance>) {
        self.remove_all();
        self.instances = instances;
    }

    // === Lifecycle forwarding ===

    /// Forward `on_activate` to every instance, in order.
    pub fn activate_all(&mut self) {
        for instance in &mut self.instances {
            instance.activate();
        }
    }

    /// Forward `on_deactivate` to every instance, in order.
    pub fn deactivate_all(&mut self) {
        for instance in &mut self.instances {
            instance.deactivate();
        }
    }

    // === Queries ===

    /// Snapshot of every instance's record, in display order.
    ///
    /// This is what gets handed to the record store on shutdown.
    pub fn records(&self) -> Vec<PersistedRecord> {
        self.instances
            .iter()
            .map(|instance| instance.record().clone())
            .collect()
    }

    /// Re-bind descriptors after a registry rebuild.
    ///
    /// Instances whose type no longer resolves keep their old descriptor;
    /// the miss is logged.
    pub fn refresh_descriptors(&mut self, registry: &ComponentRegistry) {
        for instance in &mut self.instances {
            match registry.get(instance.type_id()) {
                Some(descriptor) => instance.set_descriptor(descriptor.clone()),
                None => {
                    warn!(type_id = %instance.type_id(), "active component no longer registered");
                }
            }
        }
    }

    /// Borrowed view of the collection.
    pub fn components(&self) -> &[ComponentInstance] {
        &self.instances
    }

    /// The instance at `index`.
    pub fn get(&self, index: usize) -> Option<&ComponentInstance> {
        self.instances.get(index)
    }

    /// Mutable access to the instance at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut ComponentInstance> {
        self.instances.get_mut(index)
    }

    /// Iterate the collection in display order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentInstance> {
        self.instances.iter()
    }

    /// Iterate mutably in display order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ComponentInstance> {
        self.instances.iter_mut()
    }

    /// Number of active instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
