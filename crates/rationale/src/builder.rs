//! Named node builders.
//!
//! One builder per node kind. `constant` and `derived` hand back shared
//! [`ComputedRef`] handles ready to drop into a child list; `composite` and
//! `fold` keep the concrete type so `add` and the find-or-create lookups
//! stay callable. The per-keyword aggregations live on
//! [`Composite`](rationale_tree::Composite) itself (`Composite::sum`,
//! `Composite::mult`, ...).

use std::sync::Arc;

use rationale_core::{ComputedRef, SourceEntry};
use rationale_tree::{BoxedComposite, Composite, Constant, Derived};

/// Builds a constant node (method "simple") as a shared handle.
///
/// # Examples
///
/// ```
/// use rationale::prelude::*;
///
/// let base = constant("base salary", 2000.0);
/// assert_eq!(base.value(&()), 2000.0);
/// assert_eq!(base.method(), "simple");
/// ```
pub fn constant<S, T, R>(reason: R, value: T) -> ComputedRef<S, T, R>
where
    S: 'static,
    T: Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
{
    Arc::new(Constant::new(reason, value))
}

/// Builds a function node (method "function") as a shared handle.
///
/// # Examples
///
/// ```
/// use rationale::prelude::*;
///
/// let years = derived("years of work", |years: &f64| *years);
/// assert_eq!(years.value(&19.0), 19.0);
/// ```
pub fn derived<S, T, R, F>(reason: R, func: F) -> ComputedRef<S, T, R>
where
    S: 'static,
    T: 'static,
    R: Clone + Send + Sync + 'static,
    F: Fn(&S) -> T + Send + Sync + 'static,
{
    Arc::new(Derived::new(reason, func))
}

/// Builds an aggregate node (method "compound") with a caller-supplied
/// combining closure.
///
/// # Examples
///
/// ```
/// use rationale::prelude::*;
/// use rationale::SourceEntry;
///
/// let spread = composite("spread", |entries: &[SourceEntry<f64, &str>], _: &()| {
///     let max = entries.iter().fold(f64::MIN, |a, e| a.max(e.value));
///     let min = entries.iter().fold(f64::MAX, |a, e| a.min(e.value));
///     max - min
/// });
/// spread.add(constant("low", 3.0));
/// spread.add(constant("high", 11.0));
/// assert_eq!(spread.value(&()), 8.0);
/// ```
pub fn composite<S, T, R, XT, XR, F>(reason: R, combine: F) -> Arc<Composite<T, R, S, XT, XR, F>>
where
    F: Fn(&[SourceEntry<XT, XR>], &S) -> T,
    XR: Clone,
{
    Arc::new(Composite::new(reason, combine))
}

/// Builds a fold node (method "reducer") from a reducer and an initial
/// accumulator.
///
/// # Examples
///
/// ```
/// use rationale::prelude::*;
/// use rationale::SourceEntry;
///
/// let total = fold("total", 0.0, |acc, entry: &SourceEntry<f64, &str>, _: &()| {
///     acc + entry.value
/// });
/// total.add(constant("a", 1.0));
/// total.add(constant("b", 2.0));
/// assert_eq!(total.value(&()), 3.0);
/// ```
pub fn fold<S, T, R, XT, XR, G>(
    reason: R,
    initial: T,
    reducer: G,
) -> Arc<BoxedComposite<T, R, S, XT, XR>>
where
    T: Clone + Send + Sync + 'static,
    G: Fn(T, &SourceEntry<XT, XR>, &S) -> T + Send + Sync + 'static,
    XR: Clone,
{
    Arc::new(Composite::fold(reason, initial, reducer))
}
