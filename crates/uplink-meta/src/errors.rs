use thiserror::Error;
use uplink_core_types::{schema, CommandUid};

/// Result type alias using CmdMetaError
pub type Result<T> = std::result::Result<T, CmdMetaError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and status reports sent back to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Construction / stage mutation
    InvalidInput,
    AlreadyFinalized,
    AlreadyAssigned,
    TimestampOrder,

    // Wire mapping
    MissingField,
    InvalidFieldType,
    UnexpectedField,
    UnsupportedDataType,
    Unrepresentable,
    InvalidTimestamp,

    // Integration/IO
    Serialization,
    Config,
    Io,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::AlreadyFinalized => "ERR_ALREADY_FINALIZED",
            ExErrorKind::AlreadyAssigned => "ERR_ALREADY_ASSIGNED",
            ExErrorKind::TimestampOrder => "ERR_TIMESTAMP_ORDER",
            ExErrorKind::MissingField => "ERR_MISSING_FIELD",
            ExErrorKind::InvalidFieldType => "ERR_INVALID_FIELD_TYPE",
            ExErrorKind::UnexpectedField => "ERR_UNEXPECTED_FIELD",
            ExErrorKind::UnsupportedDataType => "ERR_UNSUPPORTED_DATA_TYPE",
            ExErrorKind::Unrepresentable => "ERR_UNREPRESENTABLE",
            ExErrorKind::InvalidTimestamp => "ERR_INVALID_TIMESTAMP",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Io => "ERR_IO",
        }
    }
}

/// Canonical structured error type
///
/// Carries a stable classification plus optional context (operation, record
/// uid, wire field) for status reporting and log correlation.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    uid: Option<String>,
    field: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            uid: None,
            field: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add record uid context
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    /// Add wire field context
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the record uid context, if any
    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    /// Get the wire field context, if any
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(uid) = &self.uid {
            write!(f, " (uid: {})", uid)?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {})", field)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for command metadata operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CmdMetaError {
    // ===== Construction / Mutation Errors =====
    /// A caller-supplied value violates a field constraint
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// finish_time_gps was already set
    #[error("Record {uid} was already finalized at {finish_time_gps}")]
    AlreadyFinalized {
        uid: CommandUid,
        finish_time_gps: String,
    },

    /// The clock reported a finish instant earlier than the record's start
    #[error("Record {uid} cannot finish at {finish_time_gps}: started at {start_time_gps}")]
    FinishBeforeStart {
        uid: CommandUid,
        start_time_gps: String,
        finish_time_gps: String,
    },

    /// A set-once field already holds a value
    #[error("Record {uid} already has {field} assigned")]
    AlreadyAssigned { uid: CommandUid, field: &'static str },

    // ===== Wire Mapping Errors =====
    /// Required key absent from a wire mapping
    #[error("Missing field in wire mapping: {field}")]
    MissingField { field: String },

    /// Key present but holding the wrong value shape
    #[error("Field {field} has wrong type: expected {expected}, found {found}")]
    InvalidFieldType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Key not part of the CommandMetadata wire schema
    #[error("Unexpected field in wire mapping: {field}")]
    UnexpectedField { field: String },

    /// data_type tag names some other record type
    #[error("Unsupported data_type: {data_type}")]
    UnsupportedDataType { data_type: String },

    /// A field value cannot be carried by the wire format
    #[error("Field {field} is not representable on the wire: {reason}")]
    Unrepresentable { field: &'static str, reason: String },

    /// Timestamp text could not be parsed
    #[error("Invalid timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },

    // ===== Integration Errors =====
    /// Encoding or decoding failed
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Settings could not be parsed or are inconsistent
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Filesystem access failed
    #[error("I/O error: {message}")]
    Io { message: String },
}

impl From<CmdMetaError> for ExError {
    fn from(err: CmdMetaError) -> Self {
        match err {
            CmdMetaError::InvalidInput { field, reason } => ExError::new(ExErrorKind::InvalidInput)
                .with_field(field)
                .with_message(reason),

            CmdMetaError::AlreadyFinalized {
                uid,
                finish_time_gps,
            } => ExError::new(ExErrorKind::AlreadyFinalized)
                .with_uid(uid.into_string())
                .with_op("finalize")
                .with_message(format!("Already finalized at {}", finish_time_gps)),

            CmdMetaError::FinishBeforeStart {
                uid,
                start_time_gps,
                finish_time_gps,
            } => ExError::new(ExErrorKind::TimestampOrder)
                .with_uid(uid.into_string())
                .with_op("finalize")
                .with_message(format!(
                    "Finish {} precedes start {}",
                    finish_time_gps, start_time_gps
                )),

            CmdMetaError::AlreadyAssigned { uid, field } => {
                ExError::new(ExErrorKind::AlreadyAssigned)
                    .with_uid(uid.into_string())
                    .with_field(field)
                    .with_message("Field is set-once")
            }

            CmdMetaError::MissingField { field } => ExError::new(ExErrorKind::MissingField)
                .with_op("unmarshal")
                .with_field(field)
                .with_message("Required key absent"),

            CmdMetaError::InvalidFieldType {
                field,
                expected,
                found,
            } => {
                ExError::new(ExErrorKind::InvalidFieldType)
                    .with_op("unmarshal")
                    .with_field(field)
                    .with_message(format!("Expected {}, found {}", expected, found))
            }

            CmdMetaError::UnexpectedField { field } => ExError::new(ExErrorKind::UnexpectedField)
                .with_op("unmarshal")
                .with_field(field)
                .with_message("Key is not part of the wire schema"),

            CmdMetaError::UnsupportedDataType { data_type } => {
                ExError::new(ExErrorKind::UnsupportedDataType)
                    .with_op("unmarshal")
                    .with_field(schema::KEY_DATA_TYPE)
                    .with_message(format!(
                        "Unsupported data_type {}; wire schema v{} carries {}",
                        data_type,
                        schema::WIRE_SCHEMA_VERSION,
                        schema::DATA_TYPE_COMMAND_METADATA
                    ))
            }

            CmdMetaError::Unrepresentable { field, reason } => {
                ExError::new(ExErrorKind::Unrepresentable)
                    .with_op("marshal")
                    .with_field(field)
                    .with_message(reason)
            }

            CmdMetaError::InvalidTimestamp { value, reason } => {
                ExError::new(ExErrorKind::InvalidTimestamp)
                    .with_message(format!("'{}': {}", value, reason))
            }

            CmdMetaError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            CmdMetaError::Config { message } => {
                ExError::new(ExErrorKind::Config).with_message(message)
            }

            CmdMetaError::Io { message } => ExError::new(ExErrorKind::Io).with_message(message),
        }
    }
}

/// Conversion from serde_json::Error to CmdMetaError
impl From<serde_json::Error> for CmdMetaError {
    fn from(err: serde_json::Error) -> Self {
        CmdMetaError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<rmp_serde::encode::Error> for CmdMetaError {
    fn from(err: rmp_serde::encode::Error) -> Self {
        CmdMetaError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<rmp_serde::decode::Error> for CmdMetaError {
    fn from(err: rmp_serde::decode::Error) -> Self {
        CmdMetaError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for CmdMetaError {
    fn from(err: toml::de::Error) -> Self {
        CmdMetaError::Config {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for CmdMetaError {
    fn from(err: std::io::Error) -> Self {
        CmdMetaError::Io {
            message: err.to_string(),
        }
    }
}
