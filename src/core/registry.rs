use crate::domain::{
    RegistryEvent, RegistryListener, SiteConfigProvider, Slot, SlotStatus, Vehicle,
};
use crate::utils::error::RegistryError;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

pub type RegistryResult<T> = std::result::Result<T, RegistryError>;

/// Owns every slot of a site and the index of parked registration numbers.
///
/// All checks of an operation run before any mutation, so a rejected call leaves the
/// registry exactly as it was. The registration index is private and only changes in the
/// same method that changes slot occupancy.
#[derive(Default)]
pub struct Registry {
    // listing order = insertion order
    slots: Vec<Slot>,
    positions: HashMap<String, usize>,
    occupied_registrations: HashSet<String>,
    listeners: Vec<Box<dyn RegistryListener>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry with empty slots in the given order.
    pub fn with_slots<I, S>(slot_ids: I) -> RegistryResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        for slot_id in slot_ids {
            registry.add_slot(Slot::new(slot_id))?;
        }
        Ok(registry)
    }

    pub fn from_config<C: SiteConfigProvider>(config: &C) -> RegistryResult<Self> {
        let registry = Self::with_slots(config.slot_ids().iter().cloned())?;
        tracing::info!(
            "🅿️ Site '{}' opened with {} slots",
            config.site_name(),
            registry.len()
        );
        Ok(registry)
    }

    /// Listeners are called synchronously from the mutating method. Behind a
    /// `SharedRegistry` that means with the lock held, so they must not re-enter it.
    pub fn subscribe<L: RegistryListener + 'static>(&mut self, listener: L) {
        self.listeners.push(Box::new(listener));
    }

    /// Inserts a slot at the end of the listing order.
    ///
    /// A slot that already carries a vehicle is accepted as long as that registration is
    /// not parked elsewhere. The vehicle is then parked as of now, exactly as `park` would.
    pub fn add_slot(&mut self, mut slot: Slot) -> RegistryResult<()> {
        if self.positions.contains_key(slot.id()) {
            return reject(RegistryError::DuplicateSlotId {
                slot_id: slot.id().to_string(),
            });
        }
        if let Some(vehicle) = slot.occupant() {
            if self
                .occupied_registrations
                .contains(vehicle.registration_number())
            {
                return reject(RegistryError::DuplicateRegistration {
                    registration: vehicle.registration_number().to_string(),
                });
            }
        }

        let slot_id = slot.id().to_string();
        let parked = match slot.clear() {
            Ok(mut vehicle) => {
                vehicle.mark_parked();
                let registration = vehicle.registration_number().to_string();
                slot.assign(vehicle)?;
                self.occupied_registrations.insert(registration.clone());
                Some(registration)
            }
            Err(_) => None,
        };

        self.positions.insert(slot_id.clone(), self.slots.len());
        self.slots.push(slot);
        tracing::debug!("Parking slot {} added", slot_id);
        self.notify(RegistryEvent::SlotAdded {
            slot_id: slot_id.clone(),
        });
        if let Some(registration) = parked {
            tracing::debug!("Car {} parked in slot {}", registration, slot_id);
            self.notify(RegistryEvent::VehicleParked {
                slot_id,
                registration,
            });
        }
        Ok(())
    }

    /// Deletes an unoccupied slot and returns it.
    pub fn remove_slot(&mut self, slot_id: &str) -> RegistryResult<Slot> {
        let index = self.position(slot_id)?;
        if self.slots[index].is_occupied() {
            return reject(RegistryError::SlotOccupied {
                slot_id: slot_id.to_string(),
            });
        }

        let slot = self.slots.remove(index);
        self.positions.remove(slot_id);
        for (offset, later) in self.slots[index..].iter().enumerate() {
            self.positions.insert(later.id().to_string(), index + offset);
        }
        tracing::debug!("Parking slot {} deleted", slot_id);
        self.notify(RegistryEvent::SlotRemoved {
            slot_id: slot_id.to_string(),
        });
        Ok(slot)
    }

    /// Owned copy of every slot in insertion order.
    pub fn list_slots(&self) -> Vec<Slot> {
        self.slots.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    pub fn get_slot(&self, slot_id: &str) -> Option<&Slot> {
        self.positions.get(slot_id).map(|&index| &self.slots[index])
    }

    /// Parks `vehicle` in `slot_id`.
    ///
    /// Checked in order: the slot exists, the slot is empty, the registration is not
    /// already parked anywhere. The first failing check is the error returned.
    pub fn park(&mut self, slot_id: &str, mut vehicle: Vehicle) -> RegistryResult<()> {
        let index = self.position(slot_id)?;
        if self.slots[index].is_occupied() {
            return reject(RegistryError::SlotOccupied {
                slot_id: slot_id.to_string(),
            });
        }
        let registration = vehicle.registration_number().to_string();
        if self.occupied_registrations.contains(&registration) {
            return reject(RegistryError::DuplicateRegistration { registration });
        }

        vehicle.mark_parked();
        self.slots[index].assign(vehicle)?;
        self.occupied_registrations.insert(registration.clone());
        tracing::debug!("Car {} parked in slot {}", registration, slot_id);
        self.notify(RegistryEvent::VehicleParked {
            slot_id: slot_id.to_string(),
            registration,
        });
        Ok(())
    }

    /// Case-sensitive lookup; the first matching slot in listing order wins.
    pub fn find_by_registration(&self, registration: &str) -> Option<(&Vehicle, &Slot)> {
        self.slots.iter().find_map(|slot| {
            slot.occupant()
                .filter(|vehicle| vehicle.registration_number() == registration)
                .map(|vehicle| (vehicle, slot))
        })
    }

    pub fn remove_by_registration(&mut self, registration: &str) -> RegistryResult<Vehicle> {
        let found = self.slots.iter().position(|slot| {
            slot.occupant()
                .is_some_and(|vehicle| vehicle.registration_number() == registration)
        });
        match found {
            Some(index) => self.vacate(index),
            None => reject(RegistryError::VehicleNotFound {
                registration: registration.to_string(),
            }),
        }
    }

    pub fn remove_by_slot(&mut self, slot_id: &str) -> RegistryResult<Vehicle> {
        let index = self.position(slot_id)?;
        if !self.slots[index].is_occupied() {
            return reject(RegistryError::SlotEmpty {
                slot_id: slot_id.to_string(),
            });
        }
        self.vacate(index)
    }

    /// Parked vehicles whose make matches ignoring case, in listing order.
    pub fn find_by_make(&self, make: &str) -> Vec<(&Slot, &Vehicle)> {
        let wanted = make.to_lowercase();
        self.slots
            .iter()
            .filter_map(|slot| slot.occupant().map(|vehicle| (slot, vehicle)))
            .filter(|(_, vehicle)| vehicle.make().to_lowercase() == wanted)
            .collect()
    }

    pub fn status_snapshot(&self) -> BTreeMap<String, SlotStatus> {
        self.slots
            .iter()
            .map(|slot| (slot.id().to_string(), slot.status()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied_registrations.len()
    }

    pub fn is_registration_parked(&self, registration: &str) -> bool {
        self.occupied_registrations.contains(registration)
    }

    /// Sorted copy of the parked-registration index.
    pub fn parked_registrations(&self) -> Vec<String> {
        let mut registrations: Vec<String> =
            self.occupied_registrations.iter().cloned().collect();
        registrations.sort();
        registrations
    }

    fn position(&self, slot_id: &str) -> RegistryResult<usize> {
        match self.positions.get(slot_id) {
            Some(&index) => Ok(index),
            None => reject(RegistryError::SlotNotFound {
                slot_id: slot_id.to_string(),
            }),
        }
    }

    // Caller guarantees the slot at `index` is occupied.
    fn vacate(&mut self, index: usize) -> RegistryResult<Vehicle> {
        let mut vehicle = self.slots[index].clear()?;
        self.occupied_registrations
            .remove(vehicle.registration_number());
        vehicle.mark_unparked();

        let slot_id = self.slots[index].id().to_string();
        tracing::debug!(
            "Car {} removed from slot {}",
            vehicle.registration_number(),
            slot_id
        );
        self.notify(RegistryEvent::VehicleRemoved {
            slot_id,
            registration: vehicle.registration_number().to_string(),
        });
        Ok(vehicle)
    }

    fn notify(&self, event: RegistryEvent) {
        for listener in &self.listeners {
            listener.registry_changed(&event);
        }
    }
}

fn reject<T>(err: RegistryError) -> RegistryResult<T> {
    tracing::warn!("⚠️ {}", err);
    Err(err)
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("slots", &self.slots)
            .field("occupied_registrations", &self.occupied_registrations)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
