//! Rationale Tree - Concrete computation nodes
//!
//! This crate provides the node kinds that make up a computation tree:
//! - `Constant`: a fixed value, ignoring the situation
//! - `Derived`: a pure function of the situation
//! - `Composite`: an ordered list of children combined by a closure,
//!   including the left-fold form and the built-in aggregations
//!
//! Closures are stored as concrete generic type parameters; only the
//! built-in constructors box their combining closure so the node stays
//! nameable.

pub mod aggregation;
pub mod composite;
pub mod constant;
pub mod derived;

#[cfg(test)]
mod tests;

pub use aggregation::Aggregation;
pub use composite::{BoxedComposite, CombineFn, Composite};
pub use constant::Constant;
pub use derived::Derived;
