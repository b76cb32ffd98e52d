//! Error handling types
//!
//! Every layer (implementation → factory → manager → pipeline) forwards the
//! first error it meets. Errors raised by a component carry the
//! `category/implementation` label of the component that produced them.

use thiserror::Error;

use crate::value_objects::Modality;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification used at the boundary to map errors to statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Required configuration missing or invalid. Fix the config.
    Configuration,
    /// Unknown category or implementation name. Deployment bug.
    NotFound,
    /// Malformed per-call input.
    Validation,
    /// Remote call failed, timed out or returned something unusable. Retry me.
    Inference,
    /// The request was cancelled before it completed.
    Cancelled,
    /// Anything else (I/O, serialization, storage, internal invariants).
    Internal,
}

/// Main error type for the multimodal retriever
#[derive(Error, Debug)]
pub enum Error {
    /// Required field missing or invalid when a component is initialised
    #[error("Configuration error [{component}]: {message}")]
    Configuration {
        /// `category` or `category/implementation` that rejected the config
        component: String,
        /// Description of the configuration problem
        message: String,
    },

    /// Requested category or implementation has no registered entry
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// Malformed per-call input
    #[error("Validation error: {message}")]
    Validation {
        /// Description of the invalid input
        message: String,
    },

    /// Remote model call failed or returned an unusable result
    #[error("Inference error [{component}]: {message}")]
    Inference {
        /// `category/implementation` that issued the call
        component: String,
        /// Description of the failure
        message: String,
    },

    /// A modality of one record failed during extraction
    #[error("{modality} extraction failed: {source}")]
    Extraction {
        /// Modality whose branch failed
        modality: Modality,
        /// The underlying error
        #[source]
        source: Box<Error>,
    },

    /// The request was cancelled
    #[error("Operation cancelled")]
    Cancelled,

    /// Object storage operation error
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage error
        message: String,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Base64 decoding error
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

impl Error {
    /// Create a configuration error for a component
    pub fn configuration<C: Into<String>, S: Into<String>>(component: C, message: S) -> Self {
        Self::Configuration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an inference error for a component
    pub fn inference<C: Into<String>, S: Into<String>>(component: C, message: S) -> Self {
        Self::Inference {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Wrap an error with the modality whose branch produced it
    pub fn extraction(modality: Modality, source: Error) -> Self {
        Self::Extraction {
            modality,
            source: Box::new(source),
        }
    }

    /// Create a storage error
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl Error {
    /// Classify the error, looking through extraction wrappers
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration { .. } => ErrorKind::Configuration,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Inference { .. } => ErrorKind::Inference,
            Self::Extraction { source, .. } => source.kind(),
            Self::Cancelled => ErrorKind::Cancelled,
            Self::Storage { .. }
            | Self::Io { .. }
            | Self::Json { .. }
            | Self::Base64(_)
            | Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Whether the caller may retry the same request unchanged
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Inference
    }

    /// Modality that failed, if the error came out of the extraction pipeline
    pub fn failed_modality(&self) -> Option<Modality> {
        match self {
            Self::Extraction { modality, .. } => Some(*modality),
            _ => None,
        }
    }
}
