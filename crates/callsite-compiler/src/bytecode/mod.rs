//! Bytecode types for call-site emission.
//!
//! This module contains the core bytecode types:
//!
//! - [`OpCode`] - The call-related subset of the VM instruction set
//! - [`BytecodeChunk`] - Encoded bytecode for a method body
//! - [`Constant`] and [`ConstantPool`] - Class-level symbolic operands

mod chunk;
mod constant;
mod opcode;

pub use chunk::{BytecodeChunk, Instruction};
pub use constant::{Constant, ConstantPool, MethodRef};
pub use opcode::OpCode;
