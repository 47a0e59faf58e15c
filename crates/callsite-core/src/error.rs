//! Error types for the callsite core.
//!
//! The core only fails when reading type or method descriptors. Code
//! generation errors live in `callsite-compiler`, which wraps
//! [`DescriptorError`] where a descriptor is parsed on its behalf.

use thiserror::Error;

/// Errors produced while parsing a type or method descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// The descriptor ended in the middle of a type.
    #[error("unexpected end of descriptor '{descriptor}'")]
    UnexpectedEnd { descriptor: String },

    /// A character that does not start any type was found.
    #[error("invalid character '{ch}' at offset {offset} in descriptor '{descriptor}'")]
    InvalidChar {
        ch: char,
        offset: usize,
        descriptor: String,
    },

    /// `V` was used somewhere other than a method return type.
    #[error("void is only valid as a return type (offset {offset} in '{descriptor}')")]
    InvalidVoid { offset: usize, descriptor: String },

    /// A method descriptor did not start with `(` or never closed it.
    #[error("method descriptor '{descriptor}' is missing its parameter list")]
    MissingParen { descriptor: String },

    /// Characters were left over after a complete descriptor.
    #[error("trailing input at offset {offset} in descriptor '{descriptor}'")]
    TrailingInput { offset: usize, descriptor: String },
}

impl DescriptorError {
    /// Get the descriptor that failed to parse.
    pub fn descriptor(&self) -> &str {
        match self {
            DescriptorError::UnexpectedEnd { descriptor } => descriptor,
            DescriptorError::InvalidChar { descriptor, .. } => descriptor,
            DescriptorError::InvalidVoid { descriptor, .. } => descriptor,
            DescriptorError::MissingParen { descriptor } => descriptor,
            DescriptorError::TrailingInput { descriptor, .. } => descriptor,
        }
    }
}
