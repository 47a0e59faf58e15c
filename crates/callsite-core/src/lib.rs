//! Core types for call-site code generation.
//!
//! ## Modules
//!
//! - [`asm_type`]: VM value types and their descriptors
//! - [`signature`]: Method signatures with tagged parameter slots
//! - [`names`]: Fixed naming conventions (constructor name, defaults suffix)
//! - [`error`]: Descriptor parsing errors

pub mod asm_type;
pub mod error;
pub mod names;
pub mod signature;

pub use asm_type::AsmType;
pub use error::DescriptorError;
pub use signature::{MethodSignature, ParameterKind, ParameterSignature};
