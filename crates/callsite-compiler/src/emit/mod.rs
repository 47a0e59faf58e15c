//! Instruction emission for call sites.
//!
//! [`InstructionSink`] is the append-only seam call-site code writes through.
//! [`BytecodeEmitter`] implements it by encoding into a [`BytecodeChunk`]
//! and interning operands in a shared [`ConstantPool`].
//!
//! # Example
//!
//! ```
//! use callsite_compiler::bytecode::{ConstantPool, OpCode};
//! use callsite_compiler::emit::{BytecodeEmitter, InstructionSink};
//!
//! let mut constants = ConstantPool::new();
//! let mut emitter = BytecodeEmitter::new(&mut constants);
//!
//! emitter.set_line(1);
//! emitter.emit_method_insn(OpCode::InvokeStatic, "T", "foo", "(I)I");
//!
//! let chunk = emitter.finish().unwrap();
//! assert_eq!(chunk.opcodes(), vec![OpCode::InvokeStatic]);
//! ```

use crate::CodegenError;
use crate::bytecode::{BytecodeChunk, ConstantPool, OpCode};

/// Append-only destination for instructions.
///
/// The binary encoding of each instruction is the sink's business.
pub trait InstructionSink {
    /// Append an instruction that has no operands (`PushNull`, `Dup`).
    fn emit(&mut self, op: OpCode);

    /// Append a load of a string constant.
    fn emit_string(&mut self, value: &str);

    /// Append a method instruction with its class, member and descriptor operands.
    fn emit_method_insn(&mut self, op: OpCode, owner: &str, name: &str, descriptor: &str);
}

impl<S: InstructionSink + ?Sized> InstructionSink for &mut S {
    fn emit(&mut self, op: OpCode) {
        (**self).emit(op);
    }

    fn emit_string(&mut self, value: &str) {
        (**self).emit_string(value);
    }

    fn emit_method_insn(&mut self, op: OpCode, owner: &str, name: &str, descriptor: &str) {
        (**self).emit_method_insn(op, owner, name, descriptor);
    }
}

/// Emits bytecode instructions.
///
/// Uses a shared class-level constant pool for deduplication across methods.
/// Each `BytecodeEmitter` produces bytecode for a single method body.
///
/// An operand that lands past [`ConstantPool::MAX_INDEX`] is not written;
/// the overflow is reported by [`finish`](Self::finish).
pub struct BytecodeEmitter<'pool> {
    /// The bytecode chunk being built (per-method)
    chunk: BytecodeChunk,

    /// Shared class-level constant pool (deduplicated)
    constants: &'pool mut ConstantPool,

    /// Current source line for debug info
    current_line: u32,

    /// First pool index that did not fit an operand
    overflow: Option<u32>,
}

impl<'pool> BytecodeEmitter<'pool> {
    /// Create a new bytecode emitter.
    ///
    /// # Arguments
    /// * `constants` - The shared class-level constant pool
    pub fn new(constants: &'pool mut ConstantPool) -> Self {
        Self {
            chunk: BytecodeChunk::new(),
            constants,
            current_line: 1,
            overflow: None,
        }
    }

    /// Set current source line for debug info.
    ///
    /// All subsequent instructions will be associated with this line number.
    pub fn set_line(&mut self, line: u32) {
        self.current_line = line;
    }

    /// Get current source line.
    pub fn current_line(&self) -> u32 {
        self.current_line
    }

    /// Get the constant pool shared by this emitter.
    pub fn constants(&self) -> &ConstantPool {
        self.constants
    }

    /// Get the bytecode emitted so far.
    pub fn chunk(&self) -> &BytecodeChunk {
        &self.chunk
    }

    /// Finish emission and return the bytecode chunk.
    ///
    /// Fails if any operand overflowed the constant pool.
    pub fn finish(self) -> Result<BytecodeChunk, CodegenError> {
        match self.overflow {
            Some(index) => Err(CodegenError::ConstantPoolOverflow { index }),
            None => Ok(self.chunk),
        }
    }

    /// Narrow a pool index to an operand, recording the first overflow.
    fn pool_operand(&mut self, index: u32) -> Option<u16> {
        if index <= ConstantPool::MAX_INDEX {
            return u16::try_from(index).ok();
        }
        if self.overflow.is_none() {
            tracing::error!(index, "constant pool index does not fit an operand");
            self.overflow = Some(index);
        }
        None
    }

    /// Emit opcode with 16-bit operand.
    fn emit_u16(&mut self, op: OpCode, value: u16) {
        self.chunk.write_op(op, self.current_line);
        self.chunk.write_u16(value, self.current_line);
    }
}

impl InstructionSink for BytecodeEmitter<'_> {
    fn emit(&mut self, op: OpCode) {
        debug_assert_eq!(op.operand_size(), 0, "{} takes operands", op.name());
        self.chunk.write_op(op, self.current_line);
    }

    /// Uses narrow (8-bit) or wide (16-bit) index based on pool size.
    fn emit_string(&mut self, value: &str) {
        let index = self.constants.add_string(value);
        if let Ok(narrow) = u8::try_from(index) {
            self.chunk.write_op(OpCode::Ldc, self.current_line);
            self.chunk.write_byte(narrow, self.current_line);
        } else if let Some(wide) = self.pool_operand(index) {
            self.emit_u16(OpCode::LdcWide, wide);
        }
    }

    fn emit_method_insn(&mut self, op: OpCode, owner: &str, name: &str, descriptor: &str) {
        debug_assert!(op.is_invoke(), "{} is not a method instruction", op.name());
        let index = self.constants.add_method_ref(owner, name, descriptor);
        if let Some(operand) = self.pool_operand(index) {
            self.emit_u16(op, operand);
        }
    }
}
