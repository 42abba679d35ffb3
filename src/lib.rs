pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::SiteConfig;

pub use app::{Command, Console};
pub use core::{Registry, RegistryResult, SharedRegistry};
pub use domain::{RegistryEvent, RegistryListener, Slot, SlotStatus, Vehicle};
pub use utils::error::{CarParkError, RegistryError, Result, SlotError};
