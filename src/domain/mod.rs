// Domain layer: slot and vehicle models plus the listener port. No I/O here.

pub mod model;
pub mod ports;

pub use model::{Slot, SlotStatus, Vehicle};
pub use ports::{RegistryEvent, RegistryListener, SiteConfigProvider};
