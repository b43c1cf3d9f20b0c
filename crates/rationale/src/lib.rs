//! Rationale - Trees of computed values that explain themselves
//!
//! Every node carries a caller-defined *reason* and evaluates two ways:
//! as a plain value, or as an audit record showing the value, method and
//! reason of every contributing node.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use rationale::prelude::*;
//!
//! let base = constant("base salary", 2000.0);
//!
//! let bonus = Arc::new(Composite::aggregate_or(
//!     "current bonus",
//!     Aggregation::Mult,
//!     1.0,
//! ));
//! bonus.add(base.clone());
//! bonus.add(constant("yearly bonus (5%)", 0.05));
//! bonus.add(derived("years of work", |years: &f64| *years));
//!
//! let salary = Arc::new(Composite::sum("current salary"));
//! salary.add(base);
//! salary.add(bonus);
//!
//! assert!((salary.value(&19.0) - 3900.0).abs() < 1e-9);
//!
//! let report = salary.explain(&19.0);
//! assert_eq!(report.method, "sum");
//! assert_eq!(report.source_count(), 2);
//! ```

// Contract types
pub use rationale_core::{
    Computed, ComputedRef, Explained, ExplainedSource, RationaleError, Result, SourceEntry,
    ValueRef,
};

// Node kinds
pub use rationale_tree::{Aggregation, BoxedComposite, CombineFn, Composite, Constant, Derived};

mod builder;
pub use builder::{composite, constant, derived, fold};

pub mod prelude {
    pub use super::builder::{composite, constant, derived, fold};
    pub use super::{Aggregation, Composite, Computed, ComputedRef, Explained};
}
