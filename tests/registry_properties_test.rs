//! Property-based tests for the registration index.
//!
//! Random operation sequences must never let the index drift from slot occupancy.

use proptest::prelude::*;
use small_carpark::{Registry, Slot, Vehicle};
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Op {
    AddSlot(String),
    RemoveSlot(String),
    Park(String, String, String),
    RemoveByRegistration(String),
    RemoveBySlot(String),
}

fn slot_id() -> impl Strategy<Value = String> {
    prop_oneof![Just("A001"), Just("A002"), Just("B001"), Just("B002"), Just("C001")]
        .prop_map(str::to_string)
}

fn registration() -> impl Strategy<Value = String> {
    prop_oneof![Just("ABC123"), Just("XYZ789"), Just("abc123"), Just("KL0001")]
        .prop_map(str::to_string)
}

fn make() -> impl Strategy<Value = String> {
    prop_oneof![Just("Toyota"), Just("toyota"), Just("Honda")].prop_map(str::to_string)
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        slot_id().prop_map(Op::AddSlot),
        slot_id().prop_map(Op::RemoveSlot),
        (slot_id(), registration(), make()).prop_map(|(s, r, m)| Op::Park(s, r, m)),
        registration().prop_map(Op::RemoveByRegistration),
        slot_id().prop_map(Op::RemoveBySlot),
    ]
}

fn apply(registry: &mut Registry, op: &Op) -> bool {
    match op {
        Op::AddSlot(id) => registry.add_slot(Slot::new(id.as_str())).is_ok(),
        Op::RemoveSlot(id) => registry.remove_slot(id).is_ok(),
        Op::Park(id, reg, make) => registry
            .park(id, Vehicle::new(reg.as_str(), make.as_str(), "Model", "2020"))
            .is_ok(),
        Op::RemoveByRegistration(reg) => registry.remove_by_registration(reg).is_ok(),
        Op::RemoveBySlot(id) => registry.remove_by_slot(id).is_ok(),
    }
}

fn occupant_registrations(registry: &Registry) -> Vec<String> {
    registry
        .iter()
        .filter_map(|slot| slot.occupant())
        .map(|vehicle| vehicle.registration_number().to_string())
        .collect()
}

proptest! {
    #[test]
    fn index_matches_occupancy(ops in prop::collection::vec(op(), 0..60)) {
        let mut registry = Registry::with_slots(["A001", "B001"]).unwrap();

        for op in &ops {
            let before = registry.list_slots();
            let succeeded = apply(&mut registry, op);
            if !succeeded {
                prop_assert_eq!(registry.list_slots(), before);
            }

            let occupants = occupant_registrations(&registry);
            let unique: HashSet<&String> = occupants.iter().collect();
            prop_assert_eq!(unique.len(), occupants.len(), "registration parked twice");

            let mut sorted = occupants.clone();
            sorted.sort();
            prop_assert_eq!(registry.parked_registrations(), sorted);
            prop_assert_eq!(registry.occupied_count(), occupants.len());
        }
    }

    #[test]
    fn find_by_make_ignores_case(upper in "[A-Z]{1,8}") {
        let mut registry = Registry::with_slots(["A001"]).unwrap();
        registry.park("A001", Vehicle::new("P1", upper.as_str(), "M", "2020")).unwrap();

        let lower = upper.to_lowercase();
        prop_assert_eq!(registry.find_by_make(&lower).len(), 1);
        prop_assert_eq!(registry.find_by_make(&upper), registry.find_by_make(&lower));
    }

    #[test]
    fn every_parked_vehicle_is_findable(regs in prop::collection::hash_set("[A-Z0-9]{6}", 1..6)) {
        let regs: Vec<String> = regs.into_iter().collect();
        let mut registry = Registry::with_slots((0..regs.len()).map(|i| format!("S{:03}", i))).unwrap();

        for (i, reg) in regs.iter().enumerate() {
            let slot = format!("S{:03}", i);
            prop_assert!(registry.park(&slot, Vehicle::new(reg.as_str(), "Ford", "Focus", "2015")).is_ok());
        }
        for (i, reg) in regs.iter().enumerate() {
            let (vehicle, slot) = registry.find_by_registration(reg).unwrap();
            prop_assert_eq!(vehicle.registration_number(), reg.as_str());
            prop_assert_eq!(slot.id(), format!("S{:03}", i));
        }
    }
}
