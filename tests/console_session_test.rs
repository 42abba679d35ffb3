use small_carpark::utils::validation::Validate;
use small_carpark::{Console, Registry, RegistryEvent, SharedRegistry, SiteConfig};
use std::io::Write;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

fn site_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn run_script(registry: &mut Registry, script: &str) -> String {
    let mut console = Console::new(registry, Vec::new());
    console.run(script.as_bytes()).unwrap();
    String::from_utf8(console.into_inner()).unwrap()
}

#[test]
fn test_session_against_site_from_file() {
    let file = site_file(
        r#"
[site]
name = "Harbour View"

[slots]
ids = ["A001", "B001", "C001"]
"#,
    );
    let site = SiteConfig::from_file(file.path()).unwrap();
    site.validate().unwrap();
    let mut registry = Registry::from_config(&site).unwrap();

    let output = run_script(
        &mut registry,
        "park A001 ABC123 Toyota Corolla 2020\n\
         park C001 TOY999 TOYOTA Yaris 2017\n\
         park B001 XYZ789 Honda Civic 2019\n\
         make toyota\n\
         vacate B001\n\
         delete-slot B001\n\
         add-slot V001\n\
         list\n",
    );

    assert!(output.contains("Cars with Make: toyota"));
    assert!(output.contains("Slot ID: A001\n   Registration Number: ABC123"));
    assert!(output.contains("Slot ID: C001\n   Registration Number: TOY999"));
    let make_section = output
        .split("Cars with Make: toyota")
        .nth(1)
        .and_then(|rest| rest.split("=====").next())
        .unwrap();
    assert!(!make_section.contains("XYZ789"));
    assert_eq!(make_section.matches("Occupied Time: ").count(), 2);
    assert!(output.contains("Car with registration XYZ789 removed from slot B001"));
    assert!(output.contains("Parking slot B001 deleted."));
    assert!(output.contains("Parking slot V001 added."));

    let ids: Vec<&str> = registry.iter().map(|slot| slot.id()).collect();
    assert_eq!(ids, vec!["A001", "C001", "V001"]);
    assert_eq!(registry.parked_registrations(), vec!["ABC123", "TOY999"]);
}

#[test]
fn test_deleting_occupied_slot_through_console() {
    let mut registry = Registry::with_slots(["A001", "B001"]).unwrap();
    let output = run_script(
        &mut registry,
        "park A001 ABC123 Toyota Corolla 2020\ndelete-slot A001\ndelete-slot Q001\n",
    );

    assert!(output.contains("Alert: Slot A001 is occupied"));
    assert!(output.contains("Alert: Slot Q001 does not exist"));
    assert!(registry.get_slot("A001").unwrap().is_occupied());
}

#[test]
fn test_listener_observes_console_changes() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let mut registry = Registry::with_slots(["A001"]).unwrap();
    registry.subscribe(move |event: &RegistryEvent| {
        sink.lock().unwrap().push(event.clone());
    });
    run_script(
        &mut registry,
        "park A001 ABC123 Toyota Corolla 2020\nremove ABC123\nremove ABC123\n",
    );

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert!(matches!(seen[0], RegistryEvent::VehicleParked { .. }));
    assert!(matches!(seen[1], RegistryEvent::VehicleRemoved { .. }));
}

#[test]
fn test_shared_registry_runs_console_under_lock() {
    let shared = SharedRegistry::new(Registry::with_slots(["A001", "B001"]).unwrap());

    let output = shared
        .with(|registry| run_script(registry, "park B001 ABC123 Toyota Corolla 2020\nstatus\n"))
        .unwrap();
    assert!(output.contains("Slot A001: Empty\nSlot B001: Occupied\n"));

    let found = shared
        .with(|registry| {
            registry
                .find_by_registration("ABC123")
                .map(|(_, slot)| slot.id().to_string())
        })
        .unwrap();
    assert_eq!(found.as_deref(), Some("B001"));
}
