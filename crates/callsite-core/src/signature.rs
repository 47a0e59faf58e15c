//! Method signatures with tagged parameter slots.
//!
//! A VM method receives more parameters than the source declared: outer
//! instances, extension receivers, captured variables and enum bookkeeping
//! all occupy real slots. [`ParameterKind`] records why each slot exists so
//! later passes can tell the user's value parameters apart from the rest.

use std::fmt;

use crate::asm_type::parse_type;
use crate::names::CONSTRUCTOR_NAME;
use crate::{AsmType, DescriptorError};

/// Why a parameter slot exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    /// An ordinary value parameter declared in source.
    Value,
    /// The enclosing instance passed to a closure-like target.
    This,
    /// The outer instance of an inner class constructor.
    Outer,
    /// The extension receiver.
    Receiver,
    /// A local variable captured by a local function or class.
    CapturedLocalVariable,
    /// Enum constant name passed to an enum constructor.
    EnumName,
    /// Enum constant ordinal passed to an enum constructor.
    EnumOrdinal,
    /// Argument forwarded to a super constructor call.
    SuperCallParam,
}

impl ParameterKind {
    /// Check if this slot holds a source-level value parameter.
    pub fn is_value(self) -> bool {
        self == ParameterKind::Value
    }
}

/// A single parameter slot of a [`MethodSignature`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterSignature {
    /// The slot's VM type.
    pub ty: AsmType,
    /// Why the slot exists.
    pub kind: ParameterKind,
}

impl ParameterSignature {
    /// Create a parameter slot.
    pub fn new(ty: AsmType, kind: ParameterKind) -> Self {
        Self { ty, kind }
    }

    /// Create an ordinary value parameter.
    pub fn value(ty: AsmType) -> Self {
        Self::new(ty, ParameterKind::Value)
    }
}

/// A method signature as the VM sees it.
///
/// # Examples
///
/// ```
/// use callsite_core::{AsmType, MethodSignature, ParameterSignature};
///
/// let params = vec![ParameterSignature::value(AsmType::Int)];
/// let sig = MethodSignature::new("foo", params, AsmType::Int);
/// assert_eq!(sig.descriptor(), "(I)I");
/// assert_eq!(sig.to_string(), "foo(I)I");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodSignature {
    /// Member name (`<init>` for constructors).
    pub name: String,
    /// Every parameter slot in declared order.
    pub parameters: Vec<ParameterSignature>,
    /// Return type.
    pub return_type: AsmType,
}

impl MethodSignature {
    /// Create a new method signature.
    pub fn new(
        name: impl Into<String>,
        parameters: Vec<ParameterSignature>,
        return_type: AsmType,
    ) -> Self {
        Self {
            name: name.into(),
            parameters,
            return_type,
        }
    }

    /// Create a constructor signature (`<init>`, returning void).
    pub fn constructor(parameters: Vec<ParameterSignature>) -> Self {
        Self::new(CONSTRUCTOR_NAME, parameters, AsmType::Void)
    }

    /// Build a signature from a method descriptor such as `(ILjava/lang/String;)V`.
    ///
    /// Every slot is tagged [`ParameterKind::Value`].
    pub fn parse(name: impl Into<String>, descriptor: &str) -> Result<Self, DescriptorError> {
        if !descriptor.starts_with('(') {
            return Err(DescriptorError::MissingParen {
                descriptor: descriptor.to_string(),
            });
        }

        let mut parameters = Vec::new();
        let mut offset = 1;
        loop {
            match descriptor.as_bytes().get(offset) {
                Some(b')') => break,
                Some(_) => {
                    let (ty, end) = parse_type(descriptor, offset, false)?;
                    parameters.push(ParameterSignature::value(ty));
                    offset = end;
                }
                None => {
                    return Err(DescriptorError::MissingParen {
                        descriptor: descriptor.to_string(),
                    });
                }
            }
        }

        let (return_type, end) = parse_type(descriptor, offset + 1, true)?;
        if end != descriptor.len() {
            return Err(DescriptorError::TrailingInput {
                offset: end,
                descriptor: descriptor.to_string(),
            });
        }

        Ok(Self::new(name, parameters, return_type))
    }

    /// Build the method descriptor, e.g. `(I)I`.
    pub fn descriptor(&self) -> String {
        let mut out = String::from("(");
        for param in &self.parameters {
            param.ty.write_descriptor(&mut out);
        }
        out.push(')');
        self.return_type.write_descriptor(&mut out);
        out
    }

    /// Every parameter slot, including synthetic ones.
    pub fn value_parameters(&self) -> &[ParameterSignature] {
        &self.parameters
    }

    /// Types of every parameter slot in declared order.
    pub fn argument_types(&self) -> Vec<AsmType> {
        self.parameters.iter().map(|p| p.ty.clone()).collect()
    }

    /// Check if this signature names a constructor.
    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR_NAME
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.descriptor())
    }
}
