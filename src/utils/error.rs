use thiserror::Error;

/// Failure of a single slot transition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("Parking slot {slot_id} is already occupied")]
    AlreadyOccupied { slot_id: String },

    #[error("Parking slot {slot_id} is already empty")]
    AlreadyEmpty { slot_id: String },
}

/// Rejections reported by the registry. None of them leave partial state behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Slot number {slot_id} is not unique")]
    DuplicateSlotId { slot_id: String },

    #[error("Slot {slot_id} does not exist")]
    SlotNotFound { slot_id: String },

    #[error("Slot {slot_id} is occupied")]
    SlotOccupied { slot_id: String },

    #[error("Slot {slot_id} is not occupied")]
    SlotEmpty { slot_id: String },

    #[error("Car with registration number '{registration}' is already parked")]
    DuplicateRegistration { registration: String },

    #[error("Car with registration {registration} not found in any slot")]
    VehicleNotFound { registration: String },
}

impl From<SlotError> for RegistryError {
    fn from(err: SlotError) -> Self {
        match err {
            SlotError::AlreadyOccupied { slot_id } => RegistryError::SlotOccupied { slot_id },
            SlotError::AlreadyEmpty { slot_id } => RegistryError::SlotEmpty { slot_id },
        }
    }
}

#[derive(Error, Debug)]
pub enum CarParkError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("Unknown command: {command}")]
    UnknownCommand { command: String },

    #[error("Registry lock poisoned by a panicking holder")]
    LockPoisoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Registry,
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CarParkError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CarParkError::Registry(_) => ErrorCategory::Registry,
            CarParkError::ValidationError { .. } | CarParkError::UnknownCommand { .. } => {
                ErrorCategory::Input
            }
            CarParkError::ConfigError { .. } | CarParkError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            CarParkError::IoError(_)
            | CarParkError::SerializationError(_)
            | CarParkError::LockPoisoned => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 操作被拒絕，狀態未變
            ErrorCategory::Registry | ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CarParkError::Registry(err) => format!("Alert: {}", err),
            CarParkError::ValidationError { field, .. } => {
                format!("Alert: Please enter a valid {}", field)
            }
            CarParkError::UnknownCommand { command } => {
                format!("Alert: '{}' is not a known command", command)
            }
            CarParkError::ConfigError { message } => {
                format!("Could not load the site configuration: {}", message)
            }
            CarParkError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            CarParkError::IoError(err) => format!("Input/output failure: {}", err),
            CarParkError::SerializationError(err) => format!("Could not render output: {}", err),
            CarParkError::LockPoisoned => "The car park registry is unavailable".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CarParkError::Registry(RegistryError::DuplicateSlotId { .. }) => {
                "Choose a slot id that is not already listed"
            }
            CarParkError::Registry(RegistryError::SlotNotFound { .. }) => {
                "Run 'list' to see the existing slot ids"
            }
            CarParkError::Registry(RegistryError::SlotOccupied { .. }) => {
                "Remove the parked car first or pick an empty slot"
            }
            CarParkError::Registry(RegistryError::SlotEmpty { .. }) => {
                "Nothing to remove, the slot is already free"
            }
            CarParkError::Registry(RegistryError::DuplicateRegistration { .. }) => {
                "Use 'find' to locate the car that is already parked"
            }
            CarParkError::Registry(RegistryError::VehicleNotFound { .. }) => {
                "Check the registration number spelling (matching is case-sensitive)"
            }
            CarParkError::ValidationError { .. } | CarParkError::UnknownCommand { .. } => {
                "Type 'help' to see the available commands"
            }
            CarParkError::ConfigError { .. } | CarParkError::InvalidConfigValueError { .. } => {
                "Fix the TOML site file and start again"
            }
            CarParkError::IoError(_) | CarParkError::SerializationError(_) => {
                "Check that the terminal or file is readable and writable"
            }
            CarParkError::LockPoisoned => "Restart the process",
        }
    }
}

pub type Result<T> = std::result::Result<T, CarParkError>;
