//! Value types of the target VM and their descriptor grammar.
//!
//! Types are written the way the VM reads them: primitives are one letter,
//! classes are `L<internal name>;` and arrays prefix their element with `[`.

use std::fmt;

use crate::DescriptorError;

/// A value type of the target virtual machine.
///
/// # Examples
///
/// ```
/// use callsite_core::AsmType;
///
/// let string = AsmType::object("java/lang/String");
/// assert_eq!(string.descriptor(), "Ljava/lang/String;");
/// assert_eq!(string.class_name(), "java.lang.String");
///
/// let ints = AsmType::array_of(AsmType::Int);
/// assert_eq!(ints.descriptor(), "[I");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AsmType {
    Void,
    Boolean,
    Char,
    Byte,
    Short,
    Int,
    Float,
    Long,
    Double,
    /// A class or interface, by internal (slash-separated) name.
    Object(String),
    /// An array of the element type.
    Array(Box<AsmType>),
}

impl AsmType {
    /// Create a class type from its internal name (e.g. `java/lang/Object`).
    pub fn object(internal_name: impl Into<String>) -> Self {
        AsmType::Object(internal_name.into())
    }

    /// Create an array type with the given element type.
    pub fn array_of(element: AsmType) -> Self {
        AsmType::Array(Box::new(element))
    }

    /// Parse a single field descriptor such as `I` or `[Ljava/lang/String;`.
    pub fn from_descriptor(descriptor: &str) -> Result<Self, DescriptorError> {
        let (ty, end) = parse_type(descriptor, 0, false)?;
        if end != descriptor.len() {
            return Err(DescriptorError::TrailingInput {
                offset: end,
                descriptor: descriptor.to_string(),
            });
        }
        Ok(ty)
    }

    /// Get the descriptor form of this type.
    pub fn descriptor(&self) -> String {
        let mut out = String::new();
        self.write_descriptor(&mut out);
        out
    }

    /// Append the descriptor form of this type to `out`.
    pub fn write_descriptor(&self, out: &mut String) {
        match self {
            AsmType::Object(name) => {
                out.push('L');
                out.push_str(name);
                out.push(';');
            }
            AsmType::Array(element) => {
                out.push('[');
                element.write_descriptor(out);
            }
            AsmType::Void => out.push('V'),
            AsmType::Boolean => out.push('Z'),
            AsmType::Char => out.push('C'),
            AsmType::Byte => out.push('B'),
            AsmType::Short => out.push('S'),
            AsmType::Int => out.push('I'),
            AsmType::Float => out.push('F'),
            AsmType::Long => out.push('J'),
            AsmType::Double => out.push('D'),
        }
    }

    /// Get the name used as the class operand of an instruction.
    ///
    /// Classes use their internal name; arrays use their descriptor.
    pub fn internal_name(&self) -> String {
        match self {
            AsmType::Object(name) => name.clone(),
            other => other.descriptor(),
        }
    }

    /// Get the fully qualified, human-readable name (`java.lang.String`, `int[]`).
    pub fn class_name(&self) -> String {
        match self {
            AsmType::Void => "void".into(),
            AsmType::Boolean => "boolean".into(),
            AsmType::Char => "char".into(),
            AsmType::Byte => "byte".into(),
            AsmType::Short => "short".into(),
            AsmType::Int => "int".into(),
            AsmType::Float => "float".into(),
            AsmType::Long => "long".into(),
            AsmType::Double => "double".into(),
            AsmType::Object(name) => name.replace('/', "."),
            AsmType::Array(element) => format!("{}[]", element.class_name()),
        }
    }

    /// Number of operand stack slots a value of this type occupies.
    pub fn size(&self) -> usize {
        match self {
            AsmType::Void => 0,
            AsmType::Long | AsmType::Double => 2,
            _ => 1,
        }
    }

    /// Check if this is a primitive (including void).
    pub fn is_primitive(&self) -> bool {
        !self.is_reference()
    }

    /// Check if values of this type are object references.
    pub fn is_reference(&self) -> bool {
        matches!(self, AsmType::Object(_) | AsmType::Array(_))
    }
}

impl fmt::Display for AsmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.descriptor())
    }
}

/// Parse one type starting at `offset`, returning it and the offset just past it.
pub(crate) fn parse_type(
    descriptor: &str,
    offset: usize,
    allow_void: bool,
) -> Result<(AsmType, usize), DescriptorError> {
    let bytes = descriptor.as_bytes();
    let Some(&b) = bytes.get(offset) else {
        return Err(DescriptorError::UnexpectedEnd {
            descriptor: descriptor.to_string(),
        });
    };

    let primitive = match b {
        b'V' if allow_void => Some(AsmType::Void),
        b'V' => {
            return Err(DescriptorError::InvalidVoid {
                offset,
                descriptor: descriptor.to_string(),
            });
        }
        b'Z' => Some(AsmType::Boolean),
        b'C' => Some(AsmType::Char),
        b'B' => Some(AsmType::Byte),
        b'S' => Some(AsmType::Short),
        b'I' => Some(AsmType::Int),
        b'F' => Some(AsmType::Float),
        b'J' => Some(AsmType::Long),
        b'D' => Some(AsmType::Double),
        _ => None,
    };
    if let Some(ty) = primitive {
        return Ok((ty, offset + 1));
    }

    match b {
        b'L' => {
            let start = offset + 1;
            let Some(len) = descriptor[start..].find(';') else {
                return Err(DescriptorError::UnexpectedEnd {
                    descriptor: descriptor.to_string(),
                });
            };
            if len == 0 {
                return Err(DescriptorError::InvalidChar {
                    ch: ';',
                    offset: start,
                    descriptor: descriptor.to_string(),
                });
            }
            let name = &descriptor[start..start + len];
            Ok((AsmType::object(name), start + len + 1))
        }
        b'[' => {
            let (element, end) = parse_type(descriptor, offset + 1, false)?;
            Ok((AsmType::array_of(element), end))
        }
        _ => Err(DescriptorError::InvalidChar {
            ch: descriptor[offset..].chars().next().unwrap_or('?'),
            offset,
            descriptor: descriptor.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_descriptors() {
        let all = [
            (AsmType::Void, "V"),
            (AsmType::Boolean, "Z"),
            (AsmType::Char, "C"),
            (AsmType::Byte, "B"),
            (AsmType::Short, "S"),
            (AsmType::Int, "I"),
            (AsmType::Float, "F"),
            (AsmType::Long, "J"),
            (AsmType::Double, "D"),
        ];
        for (ty, descriptor) in all {
            assert_eq!(ty.descriptor(), descriptor);
            let parsed = AsmType::from_descriptor(descriptor).ok();
            assert_eq!(parsed, (ty != AsmType::Void).then_some(ty));
        }
    }

    #[test]
    fn object_and_array_names() {
        let string = AsmType::object("java/lang/String");
        assert_eq!(string.internal_name(), "java/lang/String");
        assert_eq!(string.class_name(), "java.lang.String");

        let matrix = AsmType::array_of(AsmType::array_of(AsmType::Double));
        assert_eq!(matrix.descriptor(), "[[D");
        assert_eq!(matrix.internal_name(), "[[D");
        assert_eq!(matrix.class_name(), "double[][]");
    }

    #[test]
    fn parse_descriptors() {
        assert_eq!(AsmType::from_descriptor("I"), Ok(AsmType::Int));
        assert_eq!(
            AsmType::from_descriptor("[Ljava/lang/String;"),
            Ok(AsmType::array_of(AsmType::object("java/lang/String")))
        );
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(matches!(
            AsmType::from_descriptor("V"),
            Err(DescriptorError::InvalidVoid { offset: 0, .. })
        ));
        assert!(matches!(
            AsmType::from_descriptor("Ljava/lang/String"),
            Err(DescriptorError::UnexpectedEnd { .. })
        ));
        assert!(matches!(
            AsmType::from_descriptor("II"),
            Err(DescriptorError::TrailingInput { offset: 1, .. })
        ));
        assert!(matches!(
            AsmType::from_descriptor("Q"),
            Err(DescriptorError::InvalidChar { ch: 'Q', .. })
        ));
        assert!(matches!(
            AsmType::from_descriptor(""),
            Err(DescriptorError::UnexpectedEnd { .. })
        ));
    }

    #[test]
    fn slot_sizes() {
        assert_eq!(AsmType::Void.size(), 0);
        assert_eq!(AsmType::Long.size(), 2);
        assert_eq!(AsmType::Double.size(), 2);
        assert_eq!(AsmType::Int.size(), 1);
        assert_eq!(AsmType::object("T").size(), 1);
    }

    #[test]
    fn reference_classification() {
        assert!(AsmType::object("T").is_reference());
        assert!(AsmType::array_of(AsmType::Int).is_reference());
        assert!(AsmType::Int.is_primitive());
        assert!(AsmType::Void.is_primitive());
    }
}
