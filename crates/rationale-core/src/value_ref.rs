//! Type-erased value handles for nested explanation sources.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Snapshot of a value or reason inside a nested explanation record.
///
/// Levels of a computation tree may carry different value/reason types, so
/// records below the root hold both behind `ValueRef`: a display string
/// captured from the `Debug` rendering at erasure time, plus the original
/// value for typed access by downcast.
///
/// Equality and hashing compare the type name and the display string, which
/// makes records comparable without requiring the erased types themselves
/// to be comparable.
///
/// # Examples
///
/// ```
/// use rationale_core::ValueRef;
///
/// let value = ValueRef::new(1900.5);
/// assert_eq!(value.as_value::<f64>(), Some(&1900.5));
/// assert_eq!(value.display, "1900.5");
/// assert_eq!(value.short_type_name(), "f64");
/// ```
#[derive(Clone)]
pub struct ValueRef {
    /// Type name of the erased value.
    pub type_name: String,
    /// String representation for display, from the value's `Debug` form.
    pub display: String,
    /// Type-erased value for programmatic access.
    value: Arc<dyn Any + Send + Sync>,
}

impl ValueRef {
    /// Erases a value, capturing its `Debug` rendering as the display.
    pub fn new<T: fmt::Debug + Send + Sync + 'static>(value: T) -> Self {
        Self {
            type_name: std::any::type_name::<T>().to_string(),
            display: format!("{:?}", value),
            value: Arc::new(value),
        }
    }

    /// Erases a value with a custom display string.
    pub fn with_display<T: Send + Sync + 'static>(value: T, display: String) -> Self {
        Self {
            type_name: std::any::type_name::<T>().to_string(),
            display,
            value: Arc::new(value),
        }
    }

    /// Attempts to downcast to the concrete value type.
    pub fn as_value<T: 'static>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Returns the short type name (without module path).
    pub fn short_type_name(&self) -> &str {
        self.type_name
            .rsplit("::")
            .next()
            .unwrap_or(&self.type_name)
    }
}

impl fmt::Debug for ValueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueRef")
            .field("type", &self.short_type_name())
            .field("display", &self.display)
            .finish()
    }
}

impl fmt::Display for ValueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

impl PartialEq for ValueRef {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && self.display == other.display
    }
}

impl Eq for ValueRef {}

impl Hash for ValueRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_name.hash(state);
        self.display.hash(state);
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ValueRef {
    /// Serializes as the captured display string.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creation() {
        let value = ValueRef::new(2000.0);
        assert!(value.type_name.contains("f64"));
        assert_eq!(value.display, "2000.0");
    }

    #[test]
    fn test_downcast() {
        let value = ValueRef::new(42_i64);
        assert_eq!(value.as_value::<i64>(), Some(&42));
        assert_eq!(value.as_value::<i32>(), None);
    }

    #[test]
    fn test_custom_display() {
        let value = ValueRef::with_display(19, "nineteen years".to_string());
        assert_eq!(value.display, "nineteen years");
        assert_eq!(value.as_value::<i32>(), Some(&19));
    }

    #[test]
    fn test_equality() {
        let a = ValueRef::new("base salary");
        let b = ValueRef::new("base salary");
        let c = ValueRef::new("bonus");
        assert_eq!(a, b);
        assert_ne!(a, c);
        // Same display, different type.
        let as_string = ValueRef::with_display((), "\"base salary\"".to_string());
        assert_ne!(a, as_string);
    }

    #[test]
    fn test_string_reason_display_keeps_quotes() {
        let reason = ValueRef::new("years of work");
        assert_eq!(reason.display, "\"years of work\"");
    }
}
