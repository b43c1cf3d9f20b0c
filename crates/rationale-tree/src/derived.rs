//! Situation-derived node.

use std::fmt;
use std::marker::PhantomData;

use rationale_core::Computed;

/// A node computing its value from the situation through a pure function.
///
/// The function runs fresh on every evaluation - nothing is memoized, and
/// any side effects inside it occur exactly once per call. Default method
/// tag: "function".
///
/// # Examples
///
/// ```
/// use rationale_core::Computed;
/// use rationale_tree::Derived;
///
/// let years = Derived::new("years of work", |years: &f64| *years);
/// assert_eq!(years.value(&19.0), 19.0);
/// assert_eq!(years.method(), "function");
/// ```
pub struct Derived<S, T, R, F> {
    method: String,
    reason: R,
    func: F,
    _phantom: PhantomData<fn(&S) -> T>,
}

impl<S, T, R, F> Derived<S, T, R, F>
where
    F: Fn(&S) -> T,
{
    /// Creates a function node.
    pub fn new(reason: R, func: F) -> Self {
        Self {
            method: "function".to_string(),
            reason,
            func,
            _phantom: PhantomData,
        }
    }

    /// Replaces the method tag.
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }
}

impl<S, T, R, F> Computed<S> for Derived<S, T, R, F>
where
    R: Clone,
    F: Fn(&S) -> T,
{
    type Value = T;
    type Reason = R;

    #[inline]
    fn method(&self) -> &str {
        &self.method
    }

    #[inline]
    fn reason(&self) -> &R {
        &self.reason
    }

    fn value(&self, situation: &S) -> T {
        (self.func)(situation)
    }
}

impl<S, T, R, F> fmt::Debug for Derived<S, T, R, F>
where
    R: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Derived")
            .field("method", &self.method)
            .field("reason", &self.reason)
            .finish_non_exhaustive()
    }
}
