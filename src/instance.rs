//! Live component instances.

use tracing::error;

use crate::component::{Bounds, Component, Size};
use crate::descriptor::{ComponentDescriptor, ComponentTypeId};
use crate::error::{HostError, Result};
use crate::record::PersistedRecord;

/// A live, constructed component bound to its descriptor and record.
///
/// Invariant: `record.type_id == descriptor.type_id()` at all times. The
/// teardown hook runs at most once, backstopped by `Drop`, so an instance
/// dropped without going through the store still deactivates cleanly.
pub struct ComponentInstance {
    component: Box<dyn Component>,
    descriptor: ComponentDescriptor,
    record: PersistedRecord,
    torn_down: bool,
}

impl ComponentInstance {
    /// Bind a freshly constructed component to its identity.
    ///
    /// Runs `on_materialized` exactly once, before any other hook.
    pub(crate) fn materialize(
        mut component: Box<dyn Component>,
        descriptor: ComponentDescriptor,
        record: PersistedRecord,
    ) -> Self {
        debug_assert_eq!(&record.type_id, descriptor.type_id());
        component.on_materialized();
        Self {
            component,
            descriptor,
            record,
            torn_down: false,
        }
    }

    /// Catalog metadata for this instance's type.
    pub fn descriptor(&self) -> &ComponentDescriptor {
        &self.descriptor
    }

    pub(crate) fn set_descriptor(&mut self, descriptor: ComponentDescriptor) {
        debug_assert_eq!(&self.record.type_id, descriptor.type_id());
        self.descriptor = descriptor;
    }

    /// The persisted identity that produced this instance.
    pub fn record(&self) -> &PersistedRecord {
        &self.record
    }

    /// Mutable access to the record, for keeping opaque state current.
    pub fn record_mut(&mut self) -> &mut PersistedRecord {
        &mut self.record
    }

    /// Stable identifier of the implementing type.
    pub fn type_id(&self) -> &ComponentTypeId {
        &self.record.type_id
    }

    /// Display name from the descriptor.
    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    /// The instance became visible/active.
    pub fn activate(&mut self) {
        self.component.on_activate();
    }

    /// The instance became inactive.
    pub fn deactivate(&mut self) {
        self.component.on_deactivate();
    }

    /// Drive the component's render hook for one display cycle.
    ///
    /// A failure is logged with the component's name and returned; it never
    /// propagates past this call, so one broken component cannot take the
    /// host or its neighbors down.
    pub fn render(&mut self, bounds: Bounds) -> Result<()> {
        if let Err(source) = self.component.render(bounds) {
            error!(component = self.name(), %source, "component failed to render");
            return Err(HostError::Render {
                name: self.name().to_owned(),
                source,
            });
        }
        Ok(())
    }

    /// The component's preferred minimum display size.
    pub fn preferred_min_size(&self) -> Size {
        self.component.preferred_min_size()
    }

    /// Run the teardown hook if it has not run yet.
    pub(crate) fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.component.on_deactivate();
        self.torn_down = true;
    }
}

impl Drop for ComponentInstance {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for ComponentInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentInstance")
            .field("type_id", self.type_id())
            .field("name", &self.name())
            .finish()
    }
}
