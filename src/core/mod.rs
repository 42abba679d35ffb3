pub mod registry;
pub mod shared;

pub use crate::domain::model::{Slot, SlotStatus, Vehicle};
pub use crate::domain::ports::{RegistryEvent, RegistryListener, SiteConfigProvider};
pub use crate::utils::error::{RegistryError, Result};
pub use registry::{Registry, RegistryResult};
pub use shared::SharedRegistry;
