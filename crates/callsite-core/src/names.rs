//! Naming conventions shared by every code generation pass.
//!
//! These are fixed by the runtime ABI and never change at runtime.

/// Member name of every constructor.
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// Suffix appended to a method name to get its defaults-forwarding helper.
///
/// `bar` with optional parameters gets a synthetic `bar$default`.
pub const DEFAULT_PARAMS_IMPL_SUFFIX: &str = "$default";

/// Suffix of the class holding default implementations for an interface.
pub const DEFAULT_IMPLS_CLASS_SUFFIX: &str = "$DefaultImpls";

/// Internal name of the marker type that disambiguates the synthetic
/// defaults constructor from user constructors.
pub const DEFAULT_CONSTRUCTOR_MARKER: &str = "kotlin/jvm/internal/DefaultConstructorMarker";

/// Internal name of the runtime intrinsics class hosting null checks.
pub const INTRINSICS_CLASS: &str = "kotlin/jvm/internal/Intrinsics";

/// Intrinsic called to check a platform call result for null.
pub const CHECK_EXPRESSION_VALUE_IS_NOT_NULL: &str = "checkExpressionValueIsNotNull";

/// Get the name of the defaults-forwarding helper for `method_name`.
pub fn default_impl_name(method_name: &str) -> String {
    format!("{method_name}{DEFAULT_PARAMS_IMPL_SUFFIX}")
}
