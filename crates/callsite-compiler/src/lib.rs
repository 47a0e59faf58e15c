//! Call-site code generation.
//!
//! Turns resolved call targets into call instructions for a stack-based VM.
//!
//! ## Modules
//!
//! - [`bytecode`]: Bytecode types (OpCode, BytecodeChunk, ConstantPool)
//! - [`emit`]: The instruction sink seam and the bytecode emitter
//! - [`callable`]: Callable descriptors and their emission algorithms
//! - [`assertions`]: Runtime null checks after platform calls
//! - [`options`]: Code generation options

pub mod assertions;
pub mod bytecode;
pub mod callable;
pub mod emit;
mod error;
pub mod options;

pub use assertions::{CallAssertions, CallSiteInfo, NotNullAssertion};
pub use callable::{CallableMethod, CallableMethodBuilder, DefaultImpl, DispatchKind};
pub use emit::{BytecodeEmitter, InstructionSink};
pub use error::CodegenError;
pub use options::CodegenOptions;

// Re-export core types for convenience
pub use callsite_core::{AsmType, MethodSignature, ParameterKind, ParameterSignature};
