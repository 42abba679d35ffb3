use crate::utils::error::SlotError;
use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A car identified by its registration number.
///
/// `parked_at` is only set while the vehicle occupies a slot in a registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    registration_number: String,
    make: String,
    model: String,
    year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parked_at: Option<DateTime<Local>>,
}

impl Vehicle {
    /// No format checks are applied; callers validate user input beforehand.
    pub fn new(
        registration_number: impl Into<String>,
        make: impl Into<String>,
        model: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        Self {
            registration_number: registration_number.into(),
            make: make.into(),
            model: model.into(),
            year: year.into(),
            parked_at: None,
        }
    }

    pub fn registration_number(&self) -> &str {
        &self.registration_number
    }

    pub fn make(&self) -> &str {
        &self.make
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn parked_at(&self) -> Option<DateTime<Local>> {
        self.parked_at
    }

    pub fn is_parked(&self) -> bool {
        self.parked_at.is_some()
    }

    /// Records the current time as the start of occupancy. Calling it again resets the clock.
    pub fn mark_parked(&mut self) {
        self.mark_parked_at(Local::now());
    }

    pub fn mark_parked_at(&mut self, at: DateTime<Local>) {
        self.parked_at = Some(at);
    }

    pub fn mark_unparked(&mut self) {
        self.parked_at = None;
    }

    /// Time spent in the slot as of `now`, or `None` when the vehicle is not parked.
    /// Clock skew (a `now` before `parked_at`) clamps to zero.
    pub fn elapsed_since_parked(&self, now: DateTime<Local>) -> Option<Duration> {
        self.parked_at
            .map(|since| (now - since).max(Duration::zero()))
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Car{{registrationNumber='{}', make='{}', model='{}', year='{}'}}",
            self.registration_number, self.make, self.model, self.year
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotStatus {
    Occupied,
    Empty,
}

impl SlotStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SlotStatus::Occupied => "Occupied",
            SlotStatus::Empty => "Empty",
        }
    }
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A named parking space holding at most one vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    id: String,
    occupant: Option<Vehicle>,
}

impl Slot {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            occupant: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn occupant(&self) -> Option<&Vehicle> {
        self.occupant.as_ref()
    }

    pub fn status(&self) -> SlotStatus {
        if self.is_occupied() {
            SlotStatus::Occupied
        } else {
            SlotStatus::Empty
        }
    }

    /// Empty → Occupied. An occupied slot is left untouched.
    pub fn assign(&mut self, vehicle: Vehicle) -> Result<(), SlotError> {
        if self.occupant.is_some() {
            return Err(SlotError::AlreadyOccupied {
                slot_id: self.id.clone(),
            });
        }
        self.occupant = Some(vehicle);
        Ok(())
    }

    /// Occupied → Empty, handing back the vehicle that was parked here.
    pub fn clear(&mut self) -> Result<Vehicle, SlotError> {
        self.occupant.take().ok_or_else(|| SlotError::AlreadyEmpty {
            slot_id: self.id.clone(),
        })
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.occupant {
            Some(vehicle) => write!(
                f,
                "ParkingSlot{{slotID='{}', status='{}', parkedCar={}}}",
                self.id,
                self.status(),
                vehicle
            ),
            None => write!(
                f,
                "ParkingSlot{{slotID='{}', status='{}', parkedCar=No car parked}}",
                self.id,
                self.status()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn corolla() -> Vehicle {
        Vehicle::new("ABC123", "Toyota", "Corolla", "2020")
    }

    #[test]
    fn test_new_vehicle_is_not_parked() {
        let vehicle = corolla();
        assert!(!vehicle.is_parked());
        assert_eq!(vehicle.registration_number(), "ABC123");
        assert_eq!(vehicle.make(), "Toyota");
        assert_eq!(vehicle.model(), "Corolla");
        assert_eq!(vehicle.year(), "2020");
        assert!(vehicle.elapsed_since_parked(Local::now()).is_none());
    }

    #[test]
    fn test_blank_fields_are_accepted() {
        let vehicle = Vehicle::new("", " ", "", "");
        assert_eq!(vehicle.registration_number(), "");
        assert_eq!(vehicle.make(), " ");
    }

    #[test]
    fn test_elapsed_since_parked() {
        let mut vehicle = corolla();
        let start = Local.with_ymd_and_hms(2023, 10, 22, 9, 0, 0).unwrap();
        vehicle.mark_parked_at(start);

        let later = start + Duration::seconds(3 * 3600 + 25 * 60 + 7);
        assert_eq!(
            vehicle.elapsed_since_parked(later),
            Some(Duration::seconds(12307))
        );

        let earlier = start - Duration::seconds(30);
        assert_eq!(vehicle.elapsed_since_parked(earlier), Some(Duration::zero()));
    }

    #[test]
    fn test_mark_parked_resets_and_unparked_clears() {
        let mut vehicle = corolla();
        let first = Local.with_ymd_and_hms(2023, 10, 22, 9, 0, 0).unwrap();
        vehicle.mark_parked_at(first);
        vehicle.mark_parked();
        assert!(vehicle.parked_at().unwrap() > first);

        vehicle.mark_unparked();
        assert!(!vehicle.is_parked());
        assert!(vehicle.parked_at().is_none());
    }

    #[test]
    fn test_slot_assign_and_clear() {
        let mut slot = Slot::new("A001");
        assert_eq!(slot.status(), SlotStatus::Empty);

        slot.assign(corolla()).unwrap();
        assert!(slot.is_occupied());
        assert_eq!(slot.occupant().unwrap().registration_number(), "ABC123");

        let err = slot
            .assign(Vehicle::new("XYZ789", "Honda", "Civic", "2019"))
            .unwrap_err();
        assert_eq!(
            err,
            SlotError::AlreadyOccupied {
                slot_id: "A001".to_string()
            }
        );
        assert_eq!(slot.occupant().unwrap().registration_number(), "ABC123");

        let vehicle = slot.clear().unwrap();
        assert_eq!(vehicle.registration_number(), "ABC123");
        assert!(!slot.is_occupied());
        assert!(matches!(slot.clear(), Err(SlotError::AlreadyEmpty { .. })));
    }

    #[test]
    fn test_display() {
        let mut slot = Slot::new("B001");
        assert_eq!(
            slot.to_string(),
            "ParkingSlot{slotID='B001', status='Empty', parkedCar=No car parked}"
        );
        slot.assign(corolla()).unwrap();
        assert_eq!(
            slot.to_string(),
            "ParkingSlot{slotID='B001', status='Occupied', parkedCar=Car{registrationNumber='ABC123', make='Toyota', model='Corolla', year='2020'}}"
        );
    }
}
