//! Error types for call-site code generation.

use thiserror::Error;

use crate::bytecode::ConstantPool;

/// Errors that occur while emitting a call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    /// An emission operation was requested that the callable cannot satisfy.
    ///
    /// Not caused by user code: the resolver and the backend disagree about
    /// a call shape, and the compilation unit must be aborted with an
    /// internal-error diagnostic.
    #[error("internal error: illegal usage of {callable}: {message}")]
    IllegalUsage {
        /// Debug representation of the callable.
        callable: String,
        /// What was requested.
        message: String,
    },

    /// The class needs more constants than an instruction operand can address.
    #[error(
        "constant pool overflow: index {index} exceeds {max}",
        max = ConstantPool::MAX_INDEX
    )]
    ConstantPoolOverflow {
        /// First index that did not fit.
        index: u32,
    },
}

impl CodegenError {
    /// Create an illegal usage error.
    pub fn illegal_usage(callable: impl Into<String>, message: impl Into<String>) -> Self {
        CodegenError::IllegalUsage {
            callable: callable.into(),
            message: message.into(),
        }
    }

    /// Check if this error is an internal compiler inconsistency.
    ///
    /// Pool overflow is a limit of the target format hit by a large class,
    /// and is reported against the class rather than as a compiler bug.
    pub fn is_internal(&self) -> bool {
        match self {
            CodegenError::IllegalUsage { .. } => true,
            CodegenError::ConstantPoolOverflow { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn illegal_usage_display() {
        let err =
            CodegenError::illegal_usage("INVOKESTATIC T.foo(I)I", "no default implementation");
        assert_eq!(
            err.to_string(),
            "internal error: illegal usage of INVOKESTATIC T.foo(I)I: no default implementation"
        );
        assert!(err.is_internal());
    }

    #[test]
    fn pool_overflow_is_not_internal() {
        let err = CodegenError::ConstantPoolOverflow { index: 70_004 };
        assert_eq!(
            err.to_string(),
            "constant pool overflow: index 70004 exceeds 65534"
        );
        assert!(!err.is_internal());
    }
}
