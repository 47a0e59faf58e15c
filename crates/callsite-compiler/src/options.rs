//! Code generation options.

/// Switches that change what the backend emits around calls.
///
/// # Examples
///
/// ```
/// use callsite_compiler::CodegenOptions;
///
/// let options = CodegenOptions::default().with_call_assertions(false);
/// assert!(!options.call_assertions);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Check results of platform calls for null at runtime.
    pub call_assertions: bool,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            call_assertions: true,
        }
    }
}

impl CodegenOptions {
    /// Options with every runtime assertion disabled.
    pub fn without_assertions() -> Self {
        Self {
            call_assertions: false,
        }
    }

    /// Set whether platform call results are null-checked.
    pub fn with_call_assertions(mut self, enabled: bool) -> Self {
        self.call_assertions = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_assertions() {
        assert!(CodegenOptions::default().call_assertions);
    }

    #[test]
    fn without_assertions() {
        let options = CodegenOptions::without_assertions();
        assert!(!options.call_assertions);
        assert_eq!(
            options.with_call_assertions(true),
            CodegenOptions::default()
        );
    }
}
