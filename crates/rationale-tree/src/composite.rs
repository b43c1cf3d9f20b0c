//! Aggregate node: an ordered child list combined by a closure.

use std::fmt;
use std::marker::PhantomData;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rationale_core::{Computed, ComputedRef, Explained, SourceEntry};

/// Boxed combining closure used by the built-in constructors.
pub type CombineFn<T, S, XT, XR> =
    Box<dyn Fn(&[SourceEntry<XT, XR>], &S) -> T + Send + Sync>;

/// A [`Composite`] whose combining closure is the boxed form produced by
/// the built-in constructors ([`Composite::fold`] and the aggregations).
pub type BoxedComposite<T, R, S, XT, XR> = Composite<T, R, S, XT, XR, CombineFn<T, S, XT, XR>>;

/// A node combining the evaluated results of an ordered child list.
///
/// The combining closure `F` receives every child's `{value, reason}` pair
/// in child order, plus the situation. Children may carry value/reason
/// types (`XT`, `XR`) different from the node's own (`T`, `R`), uniform
/// within one node; the mismatch between a parent's expectations and its
/// children is therefore a compile error, not an evaluation failure.
///
/// The child list is ordered and growable; everything else about the node
/// is fixed at construction. It is held behind a lock so that [`add`] and
/// the find-or-create lookups work through shared [`ComputedRef`] handles,
/// and so the scan-then-append in [`find_or_add`] is a single atomic step.
///
/// Default method tag: "compound".
///
/// [`add`]: Composite::add
/// [`find_or_add`]: Composite::find_or_add
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use rationale_core::{Computed, SourceEntry};
/// use rationale_tree::{Composite, Constant};
///
/// let spread = Composite::new("spread", |entries: &[SourceEntry<f64, &str>], _: &()| {
///     let max = entries.iter().fold(f64::MIN, |a, e| a.max(e.value));
///     let min = entries.iter().fold(f64::MAX, |a, e| a.min(e.value));
///     max - min
/// });
/// spread.add(Arc::new(Constant::new("low", 3.0)));
/// spread.add(Arc::new(Constant::new("high", 11.0)));
/// assert_eq!(spread.value(&()), 8.0);
/// ```
pub struct Composite<T, R, S, XT, XR, F> {
    method: String,
    reason: R,
    combine: F,
    sources: RwLock<Vec<ComputedRef<S, XT, XR>>>,
    _phantom: PhantomData<fn() -> T>,
}

impl<T, R, S, XT, XR, F> Composite<T, R, S, XT, XR, F>
where
    F: Fn(&[SourceEntry<XT, XR>], &S) -> T,
    XR: Clone,
{
    /// Creates an aggregate node with no children.
    pub fn new(reason: R, combine: F) -> Self {
        Self {
            method: "compound".to_string(),
            reason,
            combine,
            sources: RwLock::new(Vec::new()),
            _phantom: PhantomData,
        }
    }

    /// Replaces the method tag.
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Seeds the child list, replacing any current children.
    pub fn with_sources(self, sources: Vec<ComputedRef<S, XT, XR>>) -> Self {
        Self {
            sources: RwLock::new(sources),
            ..self
        }
    }

    /// Appends a child at the end of the sequence.
    pub fn add(&self, source: ComputedRef<S, XT, XR>) {
        self.write_sources().push(source);
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.read_sources().len()
    }

    /// Returns true if the node has no children.
    pub fn is_empty(&self) -> bool {
        self.read_sources().is_empty()
    }

    /// Returns the first child whose reason equals `reason`.
    ///
    /// Reasons need not be unique among siblings; lookup assumes the caller
    /// intends at most one match.
    pub fn find(&self, reason: &XR) -> Option<ComputedRef<S, XT, XR>>
    where
        XR: PartialEq,
    {
        self.read_sources()
            .iter()
            .find(|source| source.reason() == reason)
            .cloned()
    }

    /// Returns the first child whose reason satisfies `predicate`.
    pub fn find_by<P>(&self, predicate: P) -> Option<ComputedRef<S, XT, XR>>
    where
        P: Fn(&XR) -> bool,
    {
        self.read_sources()
            .iter()
            .find(|source| predicate(source.reason()))
            .cloned()
    }

    /// Returns the first child with the given reason, materializing `make`
    /// and appending it if there is none.
    ///
    /// `make` may return a ready-made handle or build one lazily; either
    /// way it runs only when no child matches. The scan and the append
    /// happen under one lock.
    pub fn find_or_add<M>(&self, reason: &XR, make: M) -> ComputedRef<S, XT, XR>
    where
        XR: PartialEq,
        M: FnOnce() -> ComputedRef<S, XT, XR>,
    {
        self.find_by_or_add(|candidate| candidate == reason, make)
    }

    /// Predicate form of [`find_or_add`](Composite::find_or_add).
    pub fn find_by_or_add<P, M>(&self, predicate: P, make: M) -> ComputedRef<S, XT, XR>
    where
        P: Fn(&XR) -> bool,
        M: FnOnce() -> ComputedRef<S, XT, XR>,
    {
        let mut sources = self.write_sources();
        if let Some(found) = sources
            .iter()
            .find(|source| predicate(source.reason()))
            .cloned()
        {
            return found;
        }
        let made = make();
        sources.push(made.clone());
        made
    }

    fn entries(&self, situation: &S) -> Vec<SourceEntry<XT, XR>>
    where
        XR: Clone,
    {
        self.read_sources()
            .iter()
            .map(|source| SourceEntry::new(source.value(situation), source.reason().clone()))
            .collect()
    }

}

impl<T, R, S, XT, XR, F> Composite<T, R, S, XT, XR, F>
where
    XR: Clone,
{
    // Append-only writes cannot be observed half-done, so a poisoned lock
    // still holds a consistent list.
    fn read_sources(&self) -> RwLockReadGuard<'_, Vec<ComputedRef<S, XT, XR>>> {
        self.sources.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_sources(&self) -> RwLockWriteGuard<'_, Vec<ComputedRef<S, XT, XR>>> {
        self.sources.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T, R, S, XT, XR: Clone> BoxedComposite<T, R, S, XT, XR> {
    /// Creates a node whose combining closure is a left fold over the
    /// children, from an initial accumulator.
    ///
    /// The reducer sees `(accumulator, child entry, situation)` once per
    /// child in child order; with no children the result is `initial`.
    /// Default method tag: "reducer".
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use rationale_core::{Computed, SourceEntry};
    /// use rationale_tree::{Composite, Constant};
    ///
    /// let total = Composite::fold(
    ///     "weighted total",
    ///     0.0,
    ///     |acc, entry: &SourceEntry<f64, &str>, weight: &f64| acc + entry.value * weight,
    /// );
    /// total.add(Arc::new(Constant::new("a", 10.0)));
    /// total.add(Arc::new(Constant::new("b", 5.0)));
    /// assert_eq!(total.value(&2.0), 30.0);
    /// assert_eq!(total.method(), "reducer");
    /// ```
    pub fn fold<G>(reason: R, initial: T, reducer: G) -> Self
    where
        T: Clone + Send + Sync + 'static,
        G: Fn(T, &SourceEntry<XT, XR>, &S) -> T + Send + Sync + 'static,
    {
        let combine: CombineFn<T, S, XT, XR> =
            Box::new(move |entries: &[SourceEntry<XT, XR>], situation: &S| {
                entries.iter().fold(initial.clone(), |accumulator, entry| {
                    reducer(accumulator, entry, situation)
                })
            });
        Composite::new(reason, combine).with_method("reducer")
    }
}

impl<T, R, S, XT, XR, F> Computed<S> for Composite<T, R, S, XT, XR, F>
where
    R: Clone,
    XT: Clone + fmt::Debug + Send + Sync + 'static,
    XR: Clone + fmt::Debug + Send + Sync + 'static,
    F: Fn(&[SourceEntry<XT, XR>], &S) -> T,
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

    /// Evaluates every child in order - never short-circuiting - and hands
    /// the full entry list to the combining closure.
    fn value(&self, situation: &S) -> T {
        (self.combine)(&self.entries(situation), situation)
    }

    /// Like `value`, but each child contributes its full explanation
    /// record; the combining closure sees the same entries it would see in
    /// `value`, and the records become the `sources` of the result.
    fn explain(&self, situation: &S) -> Explained<T, R> {
        let records: Vec<Explained<XT, XR>> = self
            .read_sources()
            .iter()
            .map(|source| source.explain(situation))
            .collect();
        let entries: Vec<SourceEntry<XT, XR>> = records
            .iter()
            .map(|record| SourceEntry::new(record.value.clone(), record.reason.clone()))
            .collect();
        let value = (self.combine)(&entries, situation);
        Explained::compound(
            value,
            self.method.clone(),
            self.reason.clone(),
            records.into_iter().map(Explained::erase).collect(),
        )
    }
}

impl<T, R, S, XT, XR, F> fmt::Debug for Composite<T, R, S, XT, XR, F>
where
    R: fmt::Debug,
    XR: Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composite")
            .field("method", &self.method)
            .field("reason", &self.reason)
            .field("source_count", &self.read_sources().len())
            .finish_non_exhaustive()
    }
}
