//! Constant pool for compiled classes.
//!
//! The constant pool stores the symbolic operands that bytecode instructions
//! refer to: names, descriptors, string literals and method references.
//! Indices start at 1, as the VM reserves index 0.

use rustc_hash::FxHashMap;

/// Entries stored in the constant pool.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Constant {
    /// Raw modified-UTF-8 text, referenced by the other entries.
    Utf8(String),
    /// A class, by index of its internal name.
    Class(u32),
    /// A string literal, by index of its text.
    String(u32),
    /// A member name and descriptor pair.
    NameAndType { name: u32, descriptor: u32 },
    /// A method of a class.
    MethodRef { class: u32, name_and_type: u32 },
}

/// A method reference with every index resolved to text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodRef<'a> {
    /// Internal name of the owning class.
    pub owner: &'a str,
    /// Member name.
    pub name: &'a str,
    /// Method descriptor.
    pub descriptor: &'a str,
}

/// Class-level constant pool with deduplication.
///
/// Shared across all methods of a class so identical references are stored once.
#[derive(Debug, Clone, Default)]
pub struct ConstantPool {
    /// The actual constants; slot `i` holds index `i + 1`.
    constants: Vec<Constant>,
    /// Deduplication index: maps constant to its index.
    index: FxHashMap<Constant, u32>,
}

impl ConstantPool {
    /// Largest index an instruction operand may refer to.
    ///
    /// The class file stores the entry count plus one in 16 bits.
    pub const MAX_INDEX: u32 = u16::MAX as u32 - 1;

    /// Create a new empty constant pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a constant pool with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            constants: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Add or get existing constant, returns its index.
    ///
    /// Deduplicates identical constants.
    pub fn add(&mut self, constant: Constant) -> u32 {
        if let Some(&idx) = self.index.get(&constant) {
            return idx;
        }

        self.constants.push(constant.clone());
        let idx = self.constants.len() as u32;
        self.index.insert(constant, idx);
        idx
    }

    /// Add UTF-8 text.
    pub fn add_utf8(&mut self, text: &str) -> u32 {
        self.add(Constant::Utf8(text.to_string()))
    }

    /// Add a class reference by internal name.
    pub fn add_class(&mut self, internal_name: &str) -> u32 {
        let name = self.add_utf8(internal_name);
        self.add(Constant::Class(name))
    }

    /// Add a string literal.
    pub fn add_string(&mut self, value: &str) -> u32 {
        let text = self.add_utf8(value);
        self.add(Constant::String(text))
    }

    /// Add a name and descriptor pair.
    pub fn add_name_and_type(&mut self, name: &str, descriptor: &str) -> u32 {
        let name = self.add_utf8(name);
        let descriptor = self.add_utf8(descriptor);
        self.add(Constant::NameAndType { name, descriptor })
    }

    /// Add a method reference.
    pub fn add_method_ref(&mut self, owner: &str, name: &str, descriptor: &str) -> u32 {
        let class = self.add_class(owner);
        let name_and_type = self.add_name_and_type(name, descriptor);
        self.add(Constant::MethodRef {
            class,
            name_and_type,
        })
    }

    /// Get constant by index.
    pub fn get(&self, index: u32) -> Option<&Constant> {
        let slot = index.checked_sub(1)?;
        self.constants.get(slot as usize)
    }

    /// Get the text of a UTF-8 entry.
    pub fn utf8(&self, index: u32) -> Option<&str> {
        match self.get(index)? {
            Constant::Utf8(text) => Some(text),
            _ => None,
        }
    }

    /// Get the text of a string literal entry.
    pub fn string(&self, index: u32) -> Option<&str> {
        match self.get(index)? {
            Constant::String(text) => self.utf8(*text),
            _ => None,
        }
    }

    /// Resolve a method reference to its owner, name and descriptor.
    pub fn method_ref(&self, index: u32) -> Option<MethodRef<'_>> {
        let (class, name_and_type) = match self.get(index)? {
            Constant::MethodRef {
                class,
                name_and_type,
            } => (*class, *name_and_type),
            _ => return None,
        };

        let owner = match self.get(class)? {
            Constant::Class(name) => self.utf8(*name)?,
            _ => return None,
        };
        let (name, descriptor) = match self.get(name_and_type)? {
            Constant::NameAndType { name, descriptor } => {
                (self.utf8(*name)?, self.utf8(*descriptor)?)
            }
            _ => return None,
        };

        Some(MethodRef {
            owner,
            name,
            descriptor,
        })
    }

    /// Get all constants (for serialization).
    pub fn constants(&self) -> &[Constant] {
        &self.constants
    }

    /// Number of constants.
    pub fn len(&self) -> usize {
        self.constants.len()
    }

    /// Check if the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_pool_is_empty() {
        let pool = ConstantPool::new();
        assert!(pool.is_empty());
        assert_eq!(pool.len(), 0);
        assert_eq!(pool.get(0), None);
        assert_eq!(pool.get(1), None);
    }

    #[test]
    fn indices_start_at_one() {
        let mut pool = ConstantPool::new();
        assert_eq!(pool.add_utf8("foo"), 1);
        assert_eq!(pool.add_utf8("bar"), 2);
        assert_eq!(pool.utf8(1), Some("foo"));
    }

    #[test]
    fn deduplicates_utf8() {
        let mut pool = ConstantPool::new();
        let a = pool.add_utf8("java/lang/Object");
        let b = pool.add_utf8("java/lang/Object");
        assert_eq!(a, b);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn method_ref_shares_entries() {
        let mut pool = ConstantPool::new();
        let first = pool.add_method_ref("T", "foo", "(I)I");
        let len = pool.len();
        let second = pool.add_method_ref("T", "foo", "(I)I");
        assert_eq!(first, second);
        assert_eq!(pool.len(), len);

        // Same owner and name, new descriptor: only the descriptor, the
        // NameAndType and the MethodRef are new.
        pool.add_method_ref("T", "foo", "(J)J");
        assert_eq!(pool.len(), len + 3);
    }

    #[test]
    fn resolve_method_ref() {
        let mut pool = ConstantPool::new();
        let idx = pool.add_method_ref("T$DefaultImpls", "bar$default", "(LT;I)V");
        let method = pool.method_ref(idx).unwrap();
        assert_eq!(method.owner, "T$DefaultImpls");
        assert_eq!(method.name, "bar$default");
        assert_eq!(method.descriptor, "(LT;I)V");

        let class = pool.add_class("T");
        assert_eq!(pool.method_ref(class), None);
    }

    #[test]
    fn resolve_wrong_kind() {
        let mut pool = ConstantPool::new();
        let idx = pool.add_utf8("text");
        assert_eq!(pool.method_ref(idx), None);
        assert_eq!(pool.string(idx), None);

        let s = pool.add_string("text");
        assert_eq!(pool.string(s), Some("text"));
    }
}
