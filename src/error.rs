//! Error types for 5250 data-stream decoding
//!
//! Decoding failures are data-level: every variant records the absolute
//! record offset where it arose so the caller can line it up with the
//! `unknown_data` item emitted for the same bytes. Nothing here is fatal to
//! the process; a record always decodes to *something*.

use std::fmt;

use serde::Serialize;

/// Which code space an unrecognised byte belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CodeKind {
    /// The escape byte expected in front of every outbound command
    Escape,
    /// Top-level command code following the escape byte
    Command,
    /// Order code inside a write command
    Order,
    /// Structured-field class byte
    Class,
    /// Structured-field major type
    MajorType,
    /// Minor-structure type inside a major structure
    MinorType,
    /// Attention identifier in an inbound record
    Aid,
    /// Write Extended Attribute selector
    AttributeType,
}

impl fmt::Display for CodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CodeKind::Escape => "escape",
            CodeKind::Command => "command",
            CodeKind::Order => "order",
            CodeKind::Class => "structured field class",
            CodeKind::MajorType => "major structure type",
            CodeKind::MinorType => "minor structure type",
            CodeKind::Aid => "attention identifier",
            CodeKind::AttributeType => "extended attribute type",
        };
        f.write_str(name)
    }
}

/// A decode failure scoped to one structure of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum DecodeError {
    /// A required field or declared length extends past the available bytes
    #[error("truncated record at offset {offset}: need {needed} bytes, have {available}")]
    TruncatedRecord {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A code outside the known set for its position
    #[error("unknown {kind} code 0x{code:02X} at offset {offset}")]
    UnknownCode {
        kind: CodeKind,
        code: u8,
        offset: usize,
    },

    /// A declared length smaller than the structure's mandatory header
    #[error("declared length {declared} at offset {offset} is below the minimum of {minimum}")]
    StructuralLengthMismatch {
        offset: usize,
        declared: usize,
        minimum: usize,
    },

    /// Self-embedding commands nested past the configured depth
    #[error("nesting depth {depth} exceeded at offset {offset}")]
    NestingTooDeep { offset: usize, depth: usize },
}

impl DecodeError {
    /// Absolute record offset the failure refers to.
    pub fn offset(&self) -> usize {
        match self {
            DecodeError::TruncatedRecord { offset, .. }
            | DecodeError::UnknownCode { offset, .. }
            | DecodeError::StructuralLengthMismatch { offset, .. }
            | DecodeError::NestingTooDeep { offset, .. } => *offset,
        }
    }

    pub fn is_truncation(&self) -> bool {
        matches!(self, DecodeError::TruncatedRecord { .. })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid configuration parameter
    #[error("invalid configuration parameter '{parameter}' = '{value}': {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },
    /// Configuration file could not be read
    #[error("configuration file error '{path}': {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// Configuration file is not valid JSON for the schema
    #[error("malformed configuration: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Result type alias for decoder operations
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
