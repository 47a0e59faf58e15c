//! Bytecode operation codes.
//!
//! Only the instructions a call site needs are modelled. Byte values match
//! the VM's encoding so a [`BytecodeChunk`](super::BytecodeChunk) is directly
//! loadable.

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Bytecode operation codes.
///
/// The VM is a stack-based machine. Calls pop their receiver (if any) and
/// arguments, then push the result unless the return type is void.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum OpCode {
    // =========================================================================
    // Constants
    // =========================================================================
    /// Push null reference.
    PushNull = 0x01,
    /// Push constant from pool (8-bit index).
    /// Operand: u8 constant index
    Ldc = 0x12,
    /// Push constant from pool (16-bit index).
    /// Operand: u16 constant index (big-endian)
    LdcWide = 0x13,

    // =========================================================================
    // Stack Operations
    // =========================================================================
    /// Duplicate top of stack.
    Dup = 0x59,

    // =========================================================================
    // Method Calls
    // =========================================================================
    /// Call instance method through the receiver's vtable.
    /// Operand: u16 constant index (Methodref)
    InvokeVirtual = 0xb6,
    /// Call instance method without dispatch (constructors, private, super).
    /// Operand: u16 constant index (Methodref)
    InvokeSpecial = 0xb7,
    /// Call static method.
    /// Operand: u16 constant index (Methodref)
    InvokeStatic = 0xb8,
}

impl OpCode {
    /// Convert from u8, returning None for invalid values.
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::try_from(value).ok()
    }

    /// Get the size of operands for this opcode in bytes.
    ///
    /// This does NOT include the opcode byte itself.
    pub fn operand_size(&self) -> usize {
        match self {
            OpCode::PushNull | OpCode::Dup => 0,
            OpCode::Ldc => 1,
            OpCode::LdcWide
            | OpCode::InvokeVirtual
            | OpCode::InvokeSpecial
            | OpCode::InvokeStatic => 2,
        }
    }

    /// Check if this opcode calls a method.
    pub fn is_invoke(&self) -> bool {
        matches!(
            self,
            OpCode::InvokeVirtual | OpCode::InvokeSpecial | OpCode::InvokeStatic
        )
    }

    /// Get the mnemonic of this opcode.
    pub fn name(&self) -> &'static str {
        match self {
            OpCode::PushNull => "ACONST_NULL",
            OpCode::Ldc => "LDC",
            OpCode::LdcWide => "LDC_W",
            OpCode::Dup => "DUP",
            OpCode::InvokeVirtual => "INVOKEVIRTUAL",
            OpCode::InvokeSpecial => "INVOKESPECIAL",
            OpCode::InvokeStatic => "INVOKESTATIC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcode_repr() {
        assert_eq!(OpCode::PushNull as u8, 0x01);
        assert_eq!(u8::from(OpCode::InvokeStatic), 0xb8);
        assert_eq!(u8::from(OpCode::InvokeSpecial), 0xb7);
    }

    #[test]
    fn opcode_from_u8() {
        assert_eq!(OpCode::from_u8(0xb6), Some(OpCode::InvokeVirtual));
        assert_eq!(OpCode::from_u8(0x59), Some(OpCode::Dup));
        assert_eq!(OpCode::from_u8(0x00), None);
        assert_eq!(OpCode::from_u8(255), None);
    }

    #[test]
    fn opcode_name() {
        assert_eq!(OpCode::InvokeStatic.name(), "INVOKESTATIC");
        assert_eq!(OpCode::PushNull.name(), "ACONST_NULL");
        assert_eq!(OpCode::LdcWide.name(), "LDC_W");
    }

    #[test]
    fn operand_sizes() {
        assert_eq!(OpCode::PushNull.operand_size(), 0);
        assert_eq!(OpCode::Dup.operand_size(), 0);
        assert_eq!(OpCode::Ldc.operand_size(), 1);
        assert_eq!(OpCode::LdcWide.operand_size(), 2);
        assert_eq!(OpCode::InvokeStatic.operand_size(), 2);
    }

    #[test]
    fn invoke_classification() {
        assert!(OpCode::InvokeVirtual.is_invoke());
        assert!(OpCode::InvokeSpecial.is_invoke());
        assert!(!OpCode::PushNull.is_invoke());
        assert!(!OpCode::Ldc.is_invoke());
    }
}
