use thiserror::Error;

/// The six outcomes a draw can fail with, as seen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidCount,
    ManualOverflow,
    ManualNotInteger,
    ManualDuplicate,
    InsufficientParticipants,
    InternalFailure,
}

impl ErrorKind {
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ErrorKind::InternalFailure)
    }
}

#[derive(Error, Debug)]
pub enum DrawError {
    #[error("Winner count must be a positive integer, got {value}")]
    InvalidCount { value: String },

    #[error("Winner count {value} is outside the supported range 1..={max}", max = i64::MAX)]
    CountOutOfRange { value: String },

    #[error("{manual} manual winners defined, but only {requested} winners requested")]
    ManualOverflow { manual: usize, requested: u64 },

    #[error("Manual winner pinned to position {position}, but only {requested} winners requested")]
    ManualSlotOutOfRange { position: usize, requested: u64 },

    #[error("Manual winner at position {position} is not an integer: {value}")]
    ManualNotInteger { position: usize, value: String },

    #[error("Manual winner at position {position} is outside the supported range {min}..={max}: {value}", min = i64::MIN, max = i64::MAX)]
    ManualOutOfRange { position: usize, value: String },

    #[error("Manual winner {value} is pinned more than once")]
    ManualDuplicate { value: i64 },

    #[error("Not enough participants: need {needed} more winners, have {available} eligible numbers")]
    InsufficientParticipants { needed: usize, available: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Participant pool error: {message}")]
    PoolError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl DrawError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DrawError::InvalidCount { .. } | DrawError::CountOutOfRange { .. } => {
                ErrorKind::InvalidCount
            }
            DrawError::ManualOverflow { .. } | DrawError::ManualSlotOutOfRange { .. } => {
                ErrorKind::ManualOverflow
            }
            DrawError::ManualNotInteger { .. } | DrawError::ManualOutOfRange { .. } => {
                ErrorKind::ManualNotInteger
            }
            DrawError::ManualDuplicate { .. } => ErrorKind::ManualDuplicate,
            DrawError::InsufficientParticipants { .. } => ErrorKind::InsufficientParticipants,
            _ => ErrorKind::InternalFailure,
        }
    }

    /// Transport status: 400 for bad input, 500 for everything else.
    pub fn status_code(&self) -> u16 {
        if self.kind().is_client_error() {
            400
        } else {
            500
        }
    }

    /// Message safe to hand back to the caller. Internal details stay in the logs.
    pub fn user_friendly_message(&self) -> String {
        if self.kind().is_client_error() {
            self.to_string()
        } else {
            "Internal server error".to_string()
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DrawError::InvalidCount { .. } => "Request at least one winner",
            DrawError::CountOutOfRange { .. } => "Request a realistic number of winners",
            DrawError::ManualOverflow { .. } | DrawError::ManualSlotOutOfRange { .. } => {
                "Remove manual winners or raise the requested winner count"
            }
            DrawError::ManualNotInteger { .. } => "Manual winners must be whole numbers",
            DrawError::ManualOutOfRange { .. } => {
                "Manual winners must be registered participant numbers"
            }
            DrawError::ManualDuplicate { .. } => "Pin each number to a single position",
            DrawError::InsufficientParticipants { .. } => {
                "Register more participants or lower the winner count"
            }
            DrawError::IoError(_) | DrawError::PoolError { .. } | DrawError::CsvError(_) => {
                "Check that the participant pool source exists and is readable"
            }
            DrawError::SerializationError(_) => "Check that the request is valid JSON",
            DrawError::TomlError(_)
            | DrawError::ConfigError { .. }
            | DrawError::InvalidConfigValueError { .. }
            | DrawError::MissingConfigError { .. } => "Review the configuration file and flags",
        }
    }

    pub fn exit_code(&self) -> i32 {
        if self.kind().is_client_error() {
            2
        } else {
            3
        }
    }
}

pub type Result<T> = std::result::Result<T, DrawError>;
