use crate::app::command::{Command, HELP};
use crate::core::Registry;
use crate::domain::{Slot, Vehicle};
use crate::utils::error::{ErrorSeverity, Result};
use crate::utils::format::{format_duration, format_timestamp};
use chrono::Local;
use std::io::{BufRead, Write};

const SEPARATOR: &str = "===============================";

/// Line-oriented front end over a borrowed registry.
///
/// Rejected operations and bad input are printed and the session continues; only
/// failures of the output stream itself end `run` early.
pub struct Console<'r, W: Write> {
    registry: &'r mut Registry,
    out: W,
}

impl<'r, W: Write> Console<'r, W> {
    pub fn new(registry: &'r mut Registry, out: W) -> Self {
        Self { registry, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Processes lines until EOF or `quit`, returning how many commands ran.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<usize> {
        let mut executed = 0;
        for line in input.lines() {
            let line = line?;
            let outcome = match Command::parse(&line) {
                Ok(None) => continue,
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => {
                    executed += 1;
                    self.execute(&command)
                }
                Err(e) => Err(e),
            };

            if let Err(e) = outcome {
                if e.severity() > ErrorSeverity::Medium {
                    return Err(e);
                }
                writeln!(self.out, "{}", e.user_friendly_message())?;
                writeln!(self.out, "{}", SEPARATOR)?;
            }
        }
        self.out.flush()?;
        Ok(executed)
    }

    pub fn execute(&mut self, command: &Command) -> Result<()> {
        tracing::debug!("Executing {:?}", command);
        match command {
            Command::AddSlot { slot_id } => {
                self.registry.add_slot(Slot::new(slot_id.as_str()))?;
                writeln!(self.out, "Parking slot {} added.", slot_id)?;
            }
            Command::DeleteSlot { slot_id } => {
                self.registry.remove_slot(slot_id)?;
                writeln!(self.out, "Parking slot {} deleted.", slot_id)?;
                writeln!(self.out, "{}", SEPARATOR)?;
            }
            Command::Park {
                slot_id,
                registration,
                make,
                model,
                year,
            } => {
                let vehicle = Vehicle::new(
                    registration.as_str(),
                    make.as_str(),
                    model.as_str(),
                    year.as_str(),
                );
                self.registry.park(slot_id, vehicle)?;
                let parked_at = self
                    .registry
                    .get_slot(slot_id)
                    .and_then(Slot::occupant)
                    .and_then(Vehicle::parked_at)
                    .map(|at| format_timestamp(&at))
                    .unwrap_or_default();
                writeln!(self.out, "Car parked successfully at {}", parked_at)?;
                writeln!(self.out, "{}", SEPARATOR)?;
            }
            Command::Find { registration } => self.find(registration)?,
            Command::Remove { registration } => {
                let slot_id = self
                    .registry
                    .find_by_registration(registration)
                    .map(|(_, slot)| slot.id().to_string());
                self.registry.remove_by_registration(registration)?;
                writeln!(
                    self.out,
                    "Car with registration {} removed from slot {}",
                    registration,
                    slot_id.unwrap_or_default()
                )?;
                writeln!(self.out, "{}", SEPARATOR)?;
            }
            Command::Vacate { slot_id } => {
                let vehicle = self.registry.remove_by_slot(slot_id)?;
                writeln!(
                    self.out,
                    "Car with registration {} removed from slot {}",
                    vehicle.registration_number(),
                    slot_id
                )?;
                writeln!(self.out, "{}", SEPARATOR)?;
            }
            Command::FindByMake { make } => self.find_by_make(make)?,
            Command::List => self.list()?,
            Command::Status => {
                for (slot_id, status) in self.registry.status_snapshot() {
                    writeln!(self.out, "Slot {}: {}", slot_id, status)?;
                }
            }
            Command::Json => {
                let json = serde_json::to_string_pretty(&self.registry.list_slots())?;
                writeln!(self.out, "{}", json)?;
            }
            Command::Help => writeln!(self.out, "{}", HELP)?,
            Command::Quit => {}
        }
        Ok(())
    }

    fn find(&mut self, registration: &str) -> Result<()> {
        match self.registry.find_by_registration(registration) {
            Some((vehicle, slot)) => {
                writeln!(self.out, "Car found in slot {}:", slot.id())?;
                write_vehicle(&mut self.out, vehicle)?;
                if let Some(at) = vehicle.parked_at() {
                    writeln!(self.out, "   Parked At: {}", format_timestamp(&at))?;
                }
            }
            None => writeln!(
                self.out,
                "Car with registration {} not found in any slot.",
                registration
            )?,
        }
        writeln!(self.out, "{}", SEPARATOR)?;
        Ok(())
    }

    fn find_by_make(&mut self, make: &str) -> Result<()> {
        let now = Local::now();
        let matches = self.registry.find_by_make(make);
        writeln!(self.out, "Cars with Make: {}", make)?;
        if matches.is_empty() {
            writeln!(self.out, "No parked cars of make {}.", make)?;
        }
        for (slot, vehicle) in matches {
            writeln!(self.out, "Slot ID: {}", slot.id())?;
            write_vehicle(&mut self.out, vehicle)?;
            if let Some(elapsed) = vehicle.elapsed_since_parked(now) {
                writeln!(self.out, "   Occupied Time: {}", format_duration(elapsed))?;
            }
        }
        writeln!(self.out, "{}", SEPARATOR)?;
        Ok(())
    }

    fn list(&mut self) -> Result<()> {
        let now = Local::now();
        writeln!(self.out, "List of All Slots:")?;
        for slot in self.registry.iter() {
            match slot.occupant() {
                Some(vehicle) => {
                    let elapsed = vehicle
                        .elapsed_since_parked(now)
                        .map(format_duration)
                        .unwrap_or_default();
                    writeln!(
                        self.out,
                        "Slot ID: {}, Status: {}, Parking Time: {}",
                        slot.id(),
                        slot.status(),
                        elapsed
                    )?;
                    writeln!(self.out, "   Car Registration: {}", vehicle.registration_number())?;
                    writeln!(self.out, "   Car Make: {}", vehicle.make())?;
                }
                None => writeln!(self.out, "Slot ID: {}, Status: {}", slot.id(), slot.status())?,
            }
        }
        writeln!(self.out, "{}", SEPARATOR)?;
        Ok(())
    }
}

fn write_vehicle<W: Write>(out: &mut W, vehicle: &Vehicle) -> Result<()> {
    writeln!(out, "   Registration Number: {}", vehicle.registration_number())?;
    writeln!(out, "   Make: {}", vehicle.make())?;
    writeln!(out, "   Model: {}", vehicle.model())?;
    writeln!(out, "   Year: {}", vehicle.year())?;
    Ok(())
}
