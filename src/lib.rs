//! Call instruction emission for a stack-based VM backend.
//!
//! This crate re-exports the workspace crates:
//!
//! - [`model`]: VM types, method signatures and naming conventions
//! - [`compiler`]: callable descriptors, instruction sinks and null checks
//!
//! ```
//! use callsite::prelude::*;
//!
//! let sig = MethodSignature::parse("foo", "(I)I").unwrap();
//! let callable = CallableMethod::builder(AsmType::object("T"), sig, DispatchKind::Static).build();
//!
//! let mut constants = ConstantPool::new();
//! let mut emitter = BytecodeEmitter::new(&mut constants);
//! callable.emit_direct_call(&mut emitter);
//! assert_eq!(emitter.finish().unwrap().opcodes(), vec![OpCode::InvokeStatic]);
//! ```

pub use callsite_compiler as compiler;
pub use callsite_core as model;

pub mod prelude {
    pub use callsite_compiler::bytecode::{BytecodeChunk, ConstantPool, OpCode};
    pub use callsite_compiler::{
        BytecodeEmitter, CallAssertions, CallSiteInfo, CallableMethod, CodegenError,
        CodegenOptions, DefaultImpl, DispatchKind, InstructionSink, NotNullAssertion,
    };
    pub use callsite_core::names;
    pub use callsite_core::{
        AsmType, DescriptorError, MethodSignature, ParameterKind, ParameterSignature,
    };
}
