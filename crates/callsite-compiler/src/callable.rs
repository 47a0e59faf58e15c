//! Callable invocation descriptors.
//!
//! A [`CallableMethod`] is built once per resolved call site and describes
//! everything needed to emit the call: the declaring class, the VM
//! signature, how the call dispatches, and where the synthetic
//! defaults-forwarding helper lives when optional parameters were omitted.
//!
//! ## Defaults forwarding
//!
//! A callable with optional parameters gets one synthetic helper that takes
//! every parameter plus a trailing marker saying which were omitted. The
//! helper computes the missing defaults itself, so the call site only pushes
//! placeholders. Methods forward to a static `name$default` that takes the
//! original receiver as its first parameter; constructors forward to a
//! second constructor on the same class.

use std::fmt;

use callsite_core::names::{
    CONSTRUCTOR_NAME, DEFAULT_CONSTRUCTOR_MARKER, DEFAULT_IMPLS_CLASS_SUFFIX, default_impl_name,
};
use callsite_core::{AsmType, MethodSignature, ParameterKind, ParameterSignature};

use crate::CodegenError;
use crate::assertions::NotNullAssertion;
use crate::bytecode::OpCode;
use crate::emit::InstructionSink;

/// How a call is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchKind {
    /// No receiver; the owner's method is called directly.
    Static,
    /// Receiver-based dispatch through the vtable.
    Virtual,
    /// Receiver-based call without dispatch (private, super calls).
    Special,
    /// Initialisation of a freshly allocated instance.
    Constructor,
}

impl DispatchKind {
    /// Get the instruction that performs this kind of call.
    pub fn opcode(self) -> OpCode {
        match self {
            DispatchKind::Static => OpCode::InvokeStatic,
            DispatchKind::Virtual => OpCode::InvokeVirtual,
            DispatchKind::Special | DispatchKind::Constructor => OpCode::InvokeSpecial,
        }
    }
}

/// Location of the synthetic defaults-forwarding helper.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DefaultImpl {
    /// Class declaring the helper.
    pub owner: AsmType,
    /// Type of the trailing marker parameter of the helper.
    pub extra_param: AsmType,
}

impl DefaultImpl {
    /// Create a defaults-forwarding location.
    pub fn new(owner: AsmType, extra_param: AsmType) -> Self {
        Self { owner, extra_param }
    }

    /// Helper for an interface method: `<interface>$DefaultImpls` with an
    /// `int` bitmask marker.
    pub fn for_interface(interface: &AsmType) -> Self {
        let owner = format!("{}{}", interface.internal_name(), DEFAULT_IMPLS_CLASS_SUFFIX);
        Self::new(AsmType::object(owner), AsmType::Int)
    }

    /// Helper for a constructor: a second constructor on `class` that takes
    /// the marker object.
    pub fn for_constructor(class: &AsmType) -> Self {
        Self::new(class.clone(), AsmType::object(DEFAULT_CONSTRUCTOR_MARKER))
    }
}

/// A resolved call target, ready to be emitted.
///
/// Immutable once built. The resolver is responsible for handing over
/// consistent values; nothing is checked here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallableMethod {
    owner: AsmType,
    defaults: Option<DefaultImpl>,
    signature: MethodSignature,
    dispatch: DispatchKind,
    this_type: Option<AsmType>,
    receiver_type: Option<AsmType>,
    callee_generation_type: Option<AsmType>,
}

impl CallableMethod {
    /// Create a callable from already resolved parts.
    pub fn new(
        owner: AsmType,
        defaults: Option<DefaultImpl>,
        signature: MethodSignature,
        dispatch: DispatchKind,
        this_type: Option<AsmType>,
        receiver_type: Option<AsmType>,
        callee_generation_type: Option<AsmType>,
    ) -> Self {
        Self {
            owner,
            defaults,
            signature,
            dispatch,
            this_type,
            receiver_type,
            callee_generation_type,
        }
    }

    /// Start building a callable with no optional parts set.
    pub fn builder(
        owner: AsmType,
        signature: MethodSignature,
        dispatch: DispatchKind,
    ) -> CallableMethodBuilder {
        CallableMethodBuilder {
            callable: Self::new(owner, None, signature, dispatch, None, None, None),
        }
    }

    /// Declaring class, used as the class operand of the call.
    pub fn owner(&self) -> &AsmType {
        &self.owner
    }

    /// The VM signature of the target.
    pub fn signature(&self) -> &MethodSignature {
        &self.signature
    }

    /// How the call dispatches.
    pub fn dispatch(&self) -> DispatchKind {
        self.dispatch
    }

    /// The defaults-forwarding helper, if the target has optional parameters.
    pub fn defaults(&self) -> Option<&DefaultImpl> {
        self.defaults.as_ref()
    }

    /// Every parameter slot of the signature, synthetic ones included.
    pub fn value_parameters(&self) -> &[ParameterSignature] {
        self.signature.value_parameters()
    }

    /// Types of the source-level value parameters only.
    pub fn value_parameter_types(&self) -> Vec<AsmType> {
        self.signature
            .value_parameters()
            .iter()
            .filter(|p| p.kind == ParameterKind::Value)
            .map(|p| p.ty.clone())
            .collect()
    }

    /// Types of every parameter slot in declared order.
    pub fn argument_types(&self) -> Vec<AsmType> {
        self.signature.argument_types()
    }

    /// Type of the enclosing receiver context.
    pub fn this_type(&self) -> Option<&AsmType> {
        self.this_type.as_ref()
    }

    /// Type of the explicit extension receiver.
    pub fn receiver_type(&self) -> Option<&AsmType> {
        self.receiver_type.as_ref()
    }

    /// Type to push when computing the callee, when it differs from the owner.
    pub fn callee_generation_type(&self) -> Option<&AsmType> {
        self.callee_generation_type.as_ref()
    }

    /// Return type of the target.
    pub fn return_type(&self) -> &AsmType {
        &self.signature.return_type
    }

    /// Check if the call has no receiver.
    pub fn is_static_call(&self) -> bool {
        self.dispatch == DispatchKind::Static
    }

    /// Append the call instruction.
    ///
    /// Receiver and arguments must already be on the stack.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn emit_direct_call<S: InstructionSink>(&self, sink: &mut S) {
        let op = self.dispatch.opcode();
        let owner = self.owner.internal_name();
        let descriptor = self.signature.descriptor();
        tracing::trace!(
            opcode = op.name(),
            %owner,
            name = %self.signature.name,
            %descriptor,
            "emitting direct call"
        );
        sink.emit_method_insn(op, &owner, &self.signature.name, &descriptor);
    }

    /// Append the call instruction followed by the result null check.
    pub fn emit_direct_call_with_not_null_assertion<S, A>(
        &self,
        sink: &mut S,
        context: &A,
        call_site: &A::CallSite,
    ) where
        S: InstructionSink,
        A: NotNullAssertion + ?Sized,
    {
        self.emit_direct_call(sink);
        context.assert_not_null(sink, call_site);
    }

    /// Build the signature of the defaults-forwarding helper.
    ///
    /// The helper takes every original slot plus a trailing marker. Unless
    /// the target is static or a constructor, it also takes the dispatch
    /// receiver first, typed as the owner. An extension receiver is already
    /// one of the original slots and is carried over in place.
    pub fn defaults_forwarding_signature(&self) -> Result<MethodSignature, CodegenError> {
        self.forwarding().map(|(_, signature)| signature)
    }

    /// Append a call to the defaults-forwarding helper.
    ///
    /// The stack must hold the receiver (if any), every argument with
    /// placeholders for omitted ones, and the marker value. For constructors
    /// the trailing null placeholder is pushed here.
    ///
    /// Fails without appending anything when the target has no defaults helper.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn emit_defaults_forwarding_call<S: InstructionSink>(
        &self,
        sink: &mut S,
    ) -> Result<(), CodegenError> {
        let (defaults, forwarding) = self.forwarding()?;
        let owner = defaults.owner.internal_name();
        let descriptor = forwarding.descriptor();

        let op = if forwarding.is_constructor() {
            sink.emit(OpCode::PushNull);
            OpCode::InvokeSpecial
        } else {
            OpCode::InvokeStatic
        };

        tracing::trace!(
            opcode = op.name(),
            %owner,
            name = %forwarding.name,
            %descriptor,
            "emitting defaults-forwarding call"
        );
        sink.emit_method_insn(op, &owner, &forwarding.name, &descriptor);
        Ok(())
    }

    /// Append the defaults-forwarding call followed by the result null check.
    pub fn emit_defaults_forwarding_call_with_not_null_assertion<S, A>(
        &self,
        sink: &mut S,
        context: &A,
        call_site: &A::CallSite,
    ) -> Result<(), CodegenError>
    where
        S: InstructionSink,
        A: NotNullAssertion + ?Sized,
    {
        self.emit_defaults_forwarding_call(sink)?;
        context.assert_not_null(sink, call_site);
        Ok(())
    }

    fn forwarding(&self) -> Result<(&DefaultImpl, MethodSignature), CodegenError> {
        let Some(defaults) = &self.defaults else {
            tracing::error!(callable = %self, "defaults forwarding without default implementation");
            return Err(CodegenError::illegal_usage(
                self.to_string(),
                "defaults forwarding requested but the target has no default implementation",
            ));
        };

        let is_constructor = self.signature.is_constructor();
        let mut parameters = Vec::with_capacity(self.signature.parameters.len() + 2);
        if !self.is_static_call() && !is_constructor {
            parameters.push(ParameterSignature::new(
                self.owner.clone(),
                ParameterKind::Receiver,
            ));
        }
        parameters.extend(self.signature.parameters.iter().cloned());
        parameters.push(ParameterSignature::value(defaults.extra_param.clone()));

        let name = if is_constructor {
            CONSTRUCTOR_NAME.to_string()
        } else {
            default_impl_name(&self.signature.name)
        };

        Ok((
            defaults,
            MethodSignature::new(name, parameters, self.signature.return_type.clone()),
        ))
    }
}

impl fmt::Display for CallableMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}.{}",
            self.dispatch.opcode().name(),
            self.owner.class_name(),
            self.signature
        )
    }
}

/// Builder for [`CallableMethod`]; sets the optional parts by name.
#[derive(Debug, Clone)]
pub struct CallableMethodBuilder {
    callable: CallableMethod,
}

impl CallableMethodBuilder {
    /// Set the defaults-forwarding helper location.
    pub fn defaults(self, owner: AsmType, extra_param: AsmType) -> Self {
        self.default_impl(DefaultImpl::new(owner, extra_param))
    }

    /// Set an already built defaults-forwarding helper location.
    pub fn default_impl(mut self, defaults: DefaultImpl) -> Self {
        self.callable.defaults = Some(defaults);
        self
    }

    /// Set the enclosing receiver context type.
    pub fn this_type(mut self, ty: AsmType) -> Self {
        self.callable.this_type = Some(ty);
        self
    }

    /// Set the explicit extension receiver type.
    pub fn receiver_type(mut self, ty: AsmType) -> Self {
        self.callable.receiver_type = Some(ty);
        self
    }

    /// Set the type pushed when computing the callee.
    pub fn callee_generation_type(mut self, ty: AsmType) -> Self {
        self.callable.callee_generation_type = Some(ty);
        self
    }

    /// Finish building.
    pub fn build(self) -> CallableMethod {
        self.callable
    }
}
