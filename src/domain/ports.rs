use serde::Serialize;

/// Successful registry mutations, delivered after the state change is complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RegistryEvent {
    SlotAdded { slot_id: String },
    SlotRemoved { slot_id: String },
    VehicleParked { slot_id: String, registration: String },
    VehicleRemoved { slot_id: String, registration: String },
}

/// Observer for presentation layers that need to refresh after a change.
pub trait RegistryListener: Send + Sync {
    fn registry_changed(&self, event: &RegistryEvent);
}

impl<F> RegistryListener for F
where
    F: Fn(&RegistryEvent) + Send + Sync,
{
    fn registry_changed(&self, event: &RegistryEvent) {
        self(event)
    }
}

/// Source of the initial site layout, implemented by the config front ends.
pub trait SiteConfigProvider {
    fn site_name(&self) -> &str;
    fn slot_ids(&self) -> &[String];
}
