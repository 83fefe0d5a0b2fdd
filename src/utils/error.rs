use crate::domain::model::{PartType, Serial};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SalvageError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{part} of donor {serial} is not available for harvesting")]
    PartNotAvailable { part: PartType, serial: Serial },

    #[error("No {part} parts left in inventory while assembling recipient {recipient}")]
    InventoryExhausted { part: PartType, recipient: Serial },

    #[error("Every available {part} donor already supplies two parts to recipient {recipient}")]
    NoEligibleDonor { part: PartType, recipient: Serial },

    #[error("Gave up picking a {part} donor for recipient {recipient} after {attempts} attempts")]
    ResampleLimitExceeded {
        part: PartType,
        recipient: Serial,
        attempts: usize,
    },

    #[error("Could not find an unused serial number after {attempts} attempts")]
    SerialSpaceExhausted { attempts: usize },

    #[error("Unit {serial} is not part of the population")]
    UnknownUnit { serial: Serial },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Allocation,
    Bookkeeping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for a run that failed with this severity.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::High => 1,
            Self::Medium => 2,
            Self::Critical => 3,
        }
    }
}

impl SalvageError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::Io,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::InventoryExhausted { .. }
            | Self::NoEligibleDonor { .. }
            | Self::ResampleLimitExceeded { .. }
            | Self::SerialSpaceExhausted { .. } => ErrorCategory::Allocation,
            Self::PartNotAvailable { .. } | Self::UnknownUnit { .. } => ErrorCategory::Bookkeeping,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Io => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Allocation => ErrorSeverity::High,
            // bookkeeping errors mean the inventory and ledger disagree
            ErrorCategory::Bookkeeping => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::IoError(_) => "Check that the file exists and is readable",
            Self::SerializationError(_) => "Retry without --json or report the issue",
            Self::ConfigError { .. } | Self::ConfigValidationError { .. } => {
                "Check the TOML configuration file syntax"
            }
            Self::InvalidConfigValueError { .. } => "Fix the configuration value and run again",
            Self::InventoryExhausted { .. } => {
                "Use at least as many donors as recipients"
            }
            Self::NoEligibleDonor { .. } | Self::ResampleLimitExceeded { .. } => {
                "Increase the donor population or run again with a different seed"
            }
            Self::SerialSpaceExhausted { .. } => {
                "Widen the serial range or raise max_serial_attempts"
            }
            Self::PartNotAvailable { .. } | Self::UnknownUnit { .. } => {
                "This is an internal bookkeeping bug, please report it"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Could not read or write data: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Allocation => format!("Could not assemble the new line: {}", self),
            ErrorCategory::Bookkeeping => format!("Internal error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SalvageError>;
