//! Core node contract.

use std::sync::Arc;

use crate::explained::Explained;

/// A computed value that can justify itself.
///
/// Every node in a computation tree implements `Computed` against a caller
/// situation type `S`. A node carries two identity fields fixed at
/// construction: a `method` tag naming *how* the value is computed (e.g.
/// "sum", "function", "fixed") and a caller-defined `reason` naming *why*
/// the node exists. Evaluation comes in two flavors:
///
/// - [`value`](Computed::value) produces the plain result.
/// - [`explain`](Computed::explain) produces the same result wrapped in an
///   [`Explained`] record carrying method and reason, and - for nodes with
///   children - one nested record per child, in child order.
///
/// The situation is borrowed for the duration of a call and never stored;
/// nothing is cached, so every call recomputes the whole subtree.
///
/// For any node and situation, `value(s)` and `explain(s).value` must agree.
pub trait Computed<S> {
    /// Result type of this node.
    type Value;

    /// Caller-defined label naming why this node exists. Opaque to the
    /// library; threaded through to explanation output unchanged.
    type Reason: Clone;

    /// Short tag naming how this node computes its value.
    fn method(&self) -> &str;

    /// The reason this node exists.
    fn reason(&self) -> &Self::Reason;

    /// Evaluates this node against a situation.
    fn value(&self, situation: &S) -> Self::Value;

    /// Evaluates this node and wraps the result in an explanation record.
    ///
    /// The default implementation produces a leaf record (no `sources`);
    /// nodes with children override it.
    fn explain(&self, situation: &S) -> Explained<Self::Value, Self::Reason> {
        Explained::leaf(self.value(situation), self.method(), self.reason().clone())
    }
}

/// Shared handle to a node.
///
/// Children are held through `ComputedRef`, so one node may appear under
/// several parents; lifetime is governed by reachability from caller-held
/// roots. The node kind is erased while its value and reason types stay
/// visible, which is what lets constants, functions and aggregates coexist
/// in one child list.
pub type ComputedRef<S, T, R> = Arc<dyn Computed<S, Value = T, Reason = R> + Send + Sync>;
