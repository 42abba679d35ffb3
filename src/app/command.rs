use crate::utils::error::{CarParkError, Result};
use crate::utils::validation::validate_required_input;

pub const HELP: &str = "\
Commands:
  add-slot <slot>                               open a new parking slot
  delete-slot <slot>                            delete an empty parking slot
  park <slot> <registration> <make> <model> <year>
  find <registration>                           show where a car is parked
  remove <registration>                         remove a car by registration
  vacate <slot>                                 remove whatever car is in a slot
  make <make>                                   list parked cars of a make
  list                                          list every slot with occupancy
  status                                        slot id -> Occupied/Empty
  json                                          list every slot as JSON
  help                                          show this text
  quit                                          leave the console";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddSlot {
        slot_id: String,
    },
    DeleteSlot {
        slot_id: String,
    },
    Park {
        slot_id: String,
        registration: String,
        make: String,
        model: String,
        year: String,
    },
    Find {
        registration: String,
    },
    Remove {
        registration: String,
    },
    Vacate {
        slot_id: String,
    },
    FindByMake {
        make: String,
    },
    List,
    Status,
    Json,
    Help,
    Quit,
}

impl Command {
    /// Parses one console line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut words = line.split_whitespace();
        let Some(keyword) = words.next() else {
            return Ok(None);
        };
        let mut field = |name: &str| validate_required_input(name, words.next()).map(str::to_string);

        let command = match keyword.to_lowercase().as_str() {
            "add-slot" => Command::AddSlot {
                slot_id: field("slot ID")?,
            },
            "delete-slot" => Command::DeleteSlot {
                slot_id: field("slot ID")?,
            },
            "park" => Command::Park {
                slot_id: field("slot ID")?,
                registration: field("car registration number")?,
                make: field("car make")?,
                model: field("car model")?,
                year: field("car year")?,
            },
            "find" => Command::Find {
                registration: field("car registration number")?,
            },
            "remove" => Command::Remove {
                registration: field("car registration number")?,
            },
            "vacate" => Command::Vacate {
                slot_id: field("slot ID")?,
            },
            "make" => Command::FindByMake {
                make: field("car make")?,
            },
            "list" => Command::List,
            "status" => Command::Status,
            "json" => Command::Json,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => {
                return Err(CarParkError::UnknownCommand {
                    command: other.to_string(),
                })
            }
        };

        // 多餘的欄位不可靜默丟棄，否則 make/model/year 會錯位
        if let Some(extra) = words.next() {
            return Err(CarParkError::ValidationError {
                field: "command".to_string(),
                message: format!("unexpected extra value '{}' after {}", extra, keyword),
            });
        }

        Ok(Some(command))
    }
}
