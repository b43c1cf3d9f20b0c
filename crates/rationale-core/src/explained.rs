//! Explanation records produced by [`Computed::explain`](crate::Computed::explain).

use std::fmt::Debug;

use crate::value_ref::ValueRef;

/// One child's evaluated `{value, reason}` pair, as seen by the combining
/// function of an aggregate node.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceEntry<T, R> {
    /// The child's evaluated value.
    pub value: T,
    /// The child's reason.
    pub reason: R,
}

impl<T, R> SourceEntry<T, R> {
    /// Creates an entry from a value/reason pair.
    pub fn new(value: T, reason: R) -> Self {
        Self { value, reason }
    }
}

/// Audit record for one evaluation of one node.
///
/// Field names are part of the external contract: `value`, `method`,
/// `reason`, and - for aggregate results only - `sources`, holding one
/// nested record per child in child order. Leaf records carry no `sources`.
///
/// The record's own `value` and `reason` keep the node's types; nested
/// records are the type-erased [`ExplainedSource`] form, since each level
/// of a tree may carry different value/reason types.
///
/// # Examples
///
/// ```
/// use rationale_core::Explained;
///
/// let record = Explained::leaf(2000.0, "fixed", "base salary");
/// assert_eq!(record.value, 2000.0);
/// assert_eq!(record.method, "fixed");
/// assert!(record.sources.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Explained<T, R> {
    /// The evaluated value.
    pub value: T,
    /// How the value was computed.
    pub method: String,
    /// Why the node exists.
    pub reason: R,
    /// Nested per-child records, present only for aggregate results.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub sources: Option<Vec<ExplainedSource>>,
}

/// Type-erased record used below the root of an explanation.
///
/// Self-recursive: its own `sources` hold further `ExplainedSource` records.
pub type ExplainedSource = Explained<ValueRef, ValueRef>;

impl<T, R> Explained<T, R> {
    /// Creates a leaf record (no `sources`).
    pub fn leaf(value: T, method: impl Into<String>, reason: R) -> Self {
        Self {
            value,
            method: method.into(),
            reason,
            sources: None,
        }
    }

    /// Creates an aggregate record with nested per-child records.
    pub fn compound(
        value: T,
        method: impl Into<String>,
        reason: R,
        sources: Vec<ExplainedSource>,
    ) -> Self {
        Self {
            value,
            method: method.into(),
            reason,
            sources: Some(sources),
        }
    }

    /// Returns true if this record has no nested sources.
    pub fn is_leaf(&self) -> bool {
        self.sources.is_none()
    }

    /// Number of nested source records (0 for leaves).
    pub fn source_count(&self) -> usize {
        self.sources.as_ref().map_or(0, Vec::len)
    }

    /// Erases the record's own types for storage inside a parent record.
    ///
    /// Nested sources are already erased, so only this record's `value` and
    /// `reason` are wrapped.
    pub fn erase(self) -> ExplainedSource
    where
        T: Debug + Send + Sync + 'static,
        R: Debug + Send + Sync + 'static,
    {
        Explained {
            value: ValueRef::new(self.value),
            method: self.method,
            reason: ValueRef::new(self.reason),
            sources: self.sources,
        }
    }
}
