//! Bytecode chunk for a method body.
//!
//! A `BytecodeChunk` contains the encoded instructions of a single method,
//! along with line number information for debugging.

use super::OpCode;

/// A decoded instruction: opcode, byte offset and inline operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// Offset of the opcode byte.
    pub offset: usize,
    /// The opcode.
    pub op: OpCode,
    /// Constant pool index for `Ldc`/`LdcWide`/invokes, `None` otherwise.
    pub operand: Option<u32>,
}

/// A chunk of encoded bytecode for a single method.
///
/// Operands are indices into a class-level `ConstantPool`, not stored here.
#[derive(Debug, Clone, Default)]
pub struct BytecodeChunk {
    /// The bytecode instructions.
    code: Vec<u8>,
    /// Line numbers for debugging (parallel to code).
    /// Each entry corresponds to a byte in `code`.
    lines: Vec<u32>,
}

impl BytecodeChunk {
    /// Create a new empty bytecode chunk.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bytecode chunk with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            code: Vec::with_capacity(capacity),
            lines: Vec::with_capacity(capacity),
        }
    }

    /// Write an opcode.
    pub fn write_op(&mut self, op: OpCode, line: u32) {
        self.code.push(op.into());
        self.lines.push(line);
    }

    /// Write a byte operand.
    pub fn write_byte(&mut self, byte: u8, line: u32) {
        self.code.push(byte);
        self.lines.push(line);
    }

    /// Write a 16-bit operand (big-endian).
    pub fn write_u16(&mut self, value: u16, line: u32) {
        for byte in value.to_be_bytes() {
            self.write_byte(byte, line);
        }
    }

    /// Get current code offset.
    pub fn current_offset(&self) -> usize {
        self.code.len()
    }

    /// Get the bytecode.
    pub fn code(&self) -> &[u8] {
        &self.code
    }

    /// Get the line numbers.
    pub fn lines(&self) -> &[u32] {
        &self.lines
    }

    /// Get the line number for a given offset.
    pub fn line_at(&self, offset: usize) -> Option<u32> {
        self.lines.get(offset).copied()
    }

    /// Get the length of the bytecode.
    pub fn len(&self) -> usize {
        self.code.len()
    }

    /// Check if the chunk is empty.
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Read a byte at the given offset.
    pub fn read_byte(&self, offset: usize) -> Option<u8> {
        self.code.get(offset).copied()
    }

    /// Read a u16 at the given offset (big-endian).
    pub fn read_u16(&self, offset: usize) -> Option<u16> {
        let hi = self.read_byte(offset)?;
        let lo = self.read_byte(offset + 1)?;
        Some(u16::from_be_bytes([hi, lo]))
    }

    /// Read an opcode at the given offset.
    pub fn read_op(&self, offset: usize) -> Option<OpCode> {
        self.read_byte(offset).and_then(OpCode::from_u8)
    }

    /// Decode every instruction in the chunk.
    ///
    /// Stops at the first byte that is not a known opcode.
    pub fn instructions(&self) -> Vec<Instruction> {
        let mut out = Vec::new();
        let mut offset = 0;
        while let Some(op) = self.read_op(offset) {
            let operand = match op {
                OpCode::PushNull | OpCode::Dup => None,
                OpCode::Ldc => self.read_byte(offset + 1).map(u32::from),
                OpCode::LdcWide
                | OpCode::InvokeVirtual
                | OpCode::InvokeSpecial
                | OpCode::InvokeStatic => self.read_u16(offset + 1).map(u32::from),
            };
            out.push(Instruction {
                offset,
                op,
                operand,
            });
            offset += 1 + op.operand_size();
        }
        out
    }

    /// Extract all opcodes from the chunk, skipping operands.
    ///
    /// This is useful for testing bytecode sequences without worrying about
    /// specific operand values or instruction offsets.
    pub fn opcodes(&self) -> Vec<OpCode> {
        self.instructions().into_iter().map(|insn| insn.op).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_chunk_is_empty() {
        let chunk = BytecodeChunk::new();
        assert!(chunk.is_empty());
        assert_eq!(chunk.len(), 0);
        assert!(chunk.instructions().is_empty());
    }

    #[test]
    fn write_and_read() {
        let mut chunk = BytecodeChunk::new();
        chunk.write_op(OpCode::InvokeStatic, 3);
        chunk.write_u16(0x1234, 3);

        assert_eq!(chunk.code(), &[0xb8, 0x12, 0x34]);
        assert_eq!(chunk.read_op(0), Some(OpCode::InvokeStatic));
        assert_eq!(chunk.read_u16(1), Some(0x1234));
        assert_eq!(chunk.read_u16(2), None);
        assert_eq!(chunk.line_at(2), Some(3));
        assert_eq!(chunk.line_at(3), None);
    }

    #[test]
    fn decode_instructions() {
        let mut chunk = BytecodeChunk::new();
        chunk.write_op(OpCode::PushNull, 1);
        chunk.write_op(OpCode::Dup, 1);
        chunk.write_op(OpCode::Ldc, 2);
        chunk.write_byte(7, 2);
        chunk.write_op(OpCode::InvokeSpecial, 2);
        chunk.write_u16(300, 2);

        let insns = chunk.instructions();
        assert_eq!(insns.len(), 4);
        assert_eq!(insns[0].operand, None);
        assert_eq!(insns[2].operand, Some(7));
        assert_eq!(insns[3].offset, 4);
        assert_eq!(insns[3].operand, Some(300));
        assert_eq!(
            chunk.opcodes(),
            vec![
                OpCode::PushNull,
                OpCode::Dup,
                OpCode::Ldc,
                OpCode::InvokeSpecial
            ]
        );
    }
}
