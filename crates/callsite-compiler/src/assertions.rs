//! Runtime null checks after calls.
//!
//! Values returned by platform declarations (code not written in the source
//! language) carry no nullability guarantee. When the type checker treats
//! such a result as non-null, the backend has to verify it at runtime right
//! after the call returns.

use callsite_core::AsmType;
use callsite_core::names::{CHECK_EXPRESSION_VALUE_IS_NOT_NULL, INTRINSICS_CLASS};

use crate::CodegenOptions;
use crate::bytecode::OpCode;
use crate::emit::InstructionSink;

/// Generates the null check that follows a call.
///
/// Implementors decide from the call site whether a check is needed at all.
pub trait NotNullAssertion {
    /// What the generator needs to know about the call being checked.
    type CallSite: ?Sized;

    /// Append a null check for the value on top of the stack, if needed.
    ///
    /// The stack must be unchanged afterwards.
    fn assert_not_null(&self, sink: &mut dyn InstructionSink, call_site: &Self::CallSite);
}

/// Facts about a resolved call that decide whether its result is checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSiteInfo {
    /// Source text of the call, reported in the exception message.
    pub description: String,
    /// VM return type of the callee.
    pub return_type: AsmType,
    /// Whether the callee is a platform declaration.
    pub platform_declaration: bool,
    /// Whether the type checker treats the result as non-null.
    pub expects_non_null: bool,
}

impl CallSiteInfo {
    /// Call site of a platform declaration whose result is used as non-null.
    pub fn platform(description: impl Into<String>, return_type: AsmType) -> Self {
        Self {
            description: description.into(),
            return_type,
            platform_declaration: true,
            expects_non_null: true,
        }
    }

    /// Call site of a declaration from the source language.
    pub fn source(description: impl Into<String>, return_type: AsmType) -> Self {
        Self {
            description: description.into(),
            return_type,
            platform_declaration: false,
            expects_non_null: true,
        }
    }

    /// Mark the result as used where null is acceptable.
    pub fn nullable(mut self) -> Self {
        self.expects_non_null = false;
        self
    }

    fn needs_check(&self) -> bool {
        self.platform_declaration && self.expects_non_null && self.return_type.is_reference()
    }
}

/// Emits `Intrinsics.checkExpressionValueIsNotNull` after platform calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallAssertions {
    options: CodegenOptions,
}

impl CallAssertions {
    /// Descriptor of the intrinsic: `(value, expression)`.
    pub const CHECK_DESCRIPTOR: &'static str = "(Ljava/lang/Object;Ljava/lang/String;)V";

    /// Create a generator honouring `options`.
    pub fn new(options: CodegenOptions) -> Self {
        Self { options }
    }

    /// Get the options in effect.
    pub fn options(&self) -> &CodegenOptions {
        &self.options
    }
}

impl NotNullAssertion for CallAssertions {
    type CallSite = CallSiteInfo;

    fn assert_not_null(&self, sink: &mut dyn InstructionSink, call_site: &CallSiteInfo) {
        if !self.options.call_assertions || !call_site.needs_check() {
            return;
        }

        tracing::trace!(expression = %call_site.description, "emitting call result null check");
        sink.emit(OpCode::Dup);
        sink.emit_string(&call_site.description);
        sink.emit_method_insn(
            OpCode::InvokeStatic,
            INTRINSICS_CLASS,
            CHECK_EXPRESSION_VALUE_IS_NOT_NULL,
            Self::CHECK_DESCRIPTOR,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytecode::ConstantPool;
    use crate::emit::BytecodeEmitter;

    fn string() -> AsmType {
        AsmType::object("java/lang/String")
    }

    fn run(assertions: CallAssertions, site: &CallSiteInfo) -> (Vec<OpCode>, ConstantPool) {
        let mut constants = ConstantPool::new();
        let mut emitter = BytecodeEmitter::new(&mut constants);
        assertions.assert_not_null(&mut emitter, site);
        let ops = emitter.finish().unwrap().opcodes();
        (ops, constants)
    }

    #[test]
    fn platform_reference_result_is_checked() {
        let site = CallSiteInfo::platform("System.getProperty(key)", string());
        let (ops, constants) = run(CallAssertions::default(), &site);
        assert_eq!(ops, vec![OpCode::Dup, OpCode::Ldc, OpCode::InvokeStatic]);

        let check = constants
            .constants()
            .iter()
            .any(|c| *c == crate::bytecode::Constant::Utf8("System.getProperty(key)".into()));
        assert!(check);
    }

    #[test]
    fn disabled_by_options() {
        let site = CallSiteInfo::platform("System.getProperty(key)", string());
        let (ops, _) = run(CallAssertions::new(CodegenOptions::without_assertions()), &site);
        assert!(ops.is_empty());
    }

    #[test]
    fn primitive_results_are_not_checked() {
        let site = CallSiteInfo::platform("list.size()", AsmType::Int);
        let (ops, _) = run(CallAssertions::default(), &site);
        assert!(ops.is_empty());
    }

    #[test]
    fn source_declarations_are_not_checked() {
        let site = CallSiteInfo::source("greet()", string());
        let (ops, _) = run(CallAssertions::default(), &site);
        assert!(ops.is_empty());
    }

    #[test]
    fn nullable_use_is_not_checked() {
        let site = CallSiteInfo::platform("map.get(key)", string()).nullable();
        let (ops, _) = run(CallAssertions::default(), &site);
        assert!(ops.is_empty());
    }
}
