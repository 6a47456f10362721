//! Error type definitions for the channel grouper
//!
//! Two classes of failure exist. Precondition violations (bad options, empty
//! input, rule tables that do not compile) surface as `Err` values from the
//! entry points. Failures of individual external calls are described by
//! [`ApiError`] and are recovered by the orchestrator into the batch outcome.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Grouping precondition violations
    #[error("Grouping error: {0}")]
    Grouping(#[from] GroupingError),

    /// Rule table compilation errors
    #[error("Normalization error: {0}")]
    Normalization(#[from] NormalizationError),

    /// External channel API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Input file parsing errors
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Precondition violations raised by the grouping orchestrator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GroupingError {
    /// No streams were supplied
    #[error("No streams supplied for channel creation")]
    EmptyInput,

    /// Channel numbering must start at 1 or above
    #[error("Invalid starting channel number: {number}")]
    InvalidStartingNumber { number: u32 },

    /// A normalization option failed validation
    #[error("Invalid option: {field} - {message}")]
    InvalidOption { field: String, message: String },

    /// The options could not be compiled into a pipeline
    #[error("Failed to build normalization pipeline: {0}")]
    Pipeline(#[from] NormalizationError),
}

/// Rule table compilation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizationError {
    /// A tag produced a pattern the regex engine rejected
    #[error("Invalid pattern for {rule} tag '{tag}': {message}")]
    InvalidPattern {
        rule: String,
        tag: String,
        message: String,
    },

    /// A rule table entry was empty or otherwise unusable
    #[error("Invalid {table} table entry: {message}")]
    InvalidTableEntry { table: String, message: String },
}

/// Errors returned by the external channel API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The resource already exists (e.g. a logo with the same URL)
    #[error("{resource} already exists: {key}")]
    AlreadyExists { resource: String, key: String },

    /// The referenced resource does not exist
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    /// The API rejected the request
    #[error("Request failed: {status} - {message}")]
    Request { status: u16, message: String },

    /// The request never reached the API
    #[error("Transport error: {message}")]
    Transport { message: String },
}

impl AppError {
    /// Create a validation error with a custom message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl GroupingError {
    /// Create an invalid option error
    pub fn invalid_option<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self::InvalidOption {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl NormalizationError {
    /// Create an invalid pattern error from a regex failure
    pub fn invalid_pattern<R: Into<String>, T: Into<String>>(
        rule: R,
        tag: T,
        error: &regex::Error,
    ) -> Self {
        Self::InvalidPattern {
            rule: rule.into(),
            tag: tag.into(),
            message: error.to_string(),
        }
    }

    /// Create an invalid table entry error
    pub fn invalid_entry<T: Into<String>, M: Into<String>>(table: T, message: M) -> Self {
        Self::InvalidTableEntry {
            table: table.into(),
            message: message.into(),
        }
    }
}

impl ApiError {
    /// Create an already-exists error
    pub fn already_exists<R: Into<String>, K: Into<String>>(resource: R, key: K) -> Self {
        Self::AlreadyExists {
            resource: resource.into(),
            key: key.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<R: Into<String>, I: Into<String>>(resource: R, id: I) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }

    /// Create a request failed error
    pub fn request<M: Into<String>>(status: u16, message: M) -> Self {
        Self::Request {
            status,
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport<M: Into<String>>(message: M) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Whether the API reported a duplicate resource
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }
}
