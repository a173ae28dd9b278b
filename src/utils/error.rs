use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration parse error in {path}: {message}")]
    ConfigParseError { path: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Unable to find `tickets` member in root json object of {file}")]
    MissingTicketsError { file: String },

    #[error("Ticket #{index} is invalid: {reason}")]
    InvalidTicketError { index: usize, reason: String },

    #[error("Airport {code} is not present in the ticket graph")]
    UnknownAirportError { code: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit status for a failed run; `Low` still counts as success.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl RouteError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RouteError::IoError(_) => ErrorCategory::Io,
            RouteError::SerializationError(_)
            | RouteError::MissingTicketsError { .. }
            | RouteError::InvalidTicketError { .. } => ErrorCategory::Data,
            RouteError::ConfigParseError { .. }
            | RouteError::InvalidConfigValueError { .. }
            | RouteError::MissingConfigError { .. }
            | RouteError::UnknownAirportError { .. } => ErrorCategory::Configuration,
            RouteError::CsvError(_) | RouteError::ProcessingError { .. } => {
                ErrorCategory::Processing
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Io => ErrorSeverity::Critical,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Processing => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            RouteError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
                "Put tickets.json in the executing directory or pass --tickets <FILE>".to_string()
            }
            RouteError::IoError(_) => {
                "Check file permissions for the tickets file and the output directory".to_string()
            }
            RouteError::SerializationError(_) | RouteError::InvalidTicketError { .. } => {
                "Check that every ticket has dates as dd.MM.yy, times as H:mm and an integer price"
                    .to_string()
            }
            RouteError::MissingTicketsError { .. } => {
                "Wrap the ticket list in a root object: {\"tickets\": [...]}".to_string()
            }
            RouteError::CsvError(_) => "Check that the output directory is writable".to_string(),
            RouteError::ConfigParseError { .. } => {
                "Fix the TOML syntax of the configuration file".to_string()
            }
            RouteError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}'", field)
            }
            RouteError::MissingConfigError { field } => {
                format!("Provide '{}' on the command line or in the config file", field)
            }
            RouteError::UnknownAirportError { .. } => {
                "Use an airport code that appears as origin or destination in the tickets"
                    .to_string()
            }
            RouteError::ProcessingError { .. } => "Re-run with --verbose for details".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RouteError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
                "Unable to read the tickets file".to_string()
            }
            RouteError::SerializationError(_) => "Unable to cast ticket list file".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RouteError>;
