//! Built-in aggregations over numeric children.

use std::fmt;
use std::str::FromStr;

use num_traits::Num;
use rationale_core::{RationaleError, SourceEntry};

use crate::composite::{BoxedComposite, CombineFn, Composite};

/// One of the built-in aggregation strategies.
///
/// Each strategy folds the children's values in child order; an empty child
/// list yields the node's fallback instead. The strategy name doubles as
/// the node's default method tag.
///
/// # Examples
///
/// ```
/// use rationale_tree::Aggregation;
///
/// let aggregation: Aggregation = "sum".parse().unwrap();
/// assert_eq!(aggregation, Aggregation::Sum);
/// assert_eq!(aggregation.method(), "sum");
/// assert!("median".parse::<Aggregation>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aggregation {
    /// The first child's value.
    First,
    /// The last child's value.
    Last,
    /// Pairwise maximum, seeded from the first child's value.
    Max,
    /// Pairwise minimum, seeded from the first child's value.
    Min,
    /// Arithmetic mean. Integer division truncates for integer values.
    Avg,
    /// Product of all values.
    Mult,
    /// Total of all values.
    Sum,
}

/// The reserved aggregation keywords, in parse order.
pub const KEYWORDS: [&str; 7] = ["first", "last", "max", "min", "avg", "mult", "sum"];

impl Aggregation {
    /// Default method tag for this aggregation: its keyword.
    pub fn method(&self) -> &'static str {
        match self {
            Aggregation::First => "first",
            Aggregation::Last => "last",
            Aggregation::Max => "max",
            Aggregation::Min => "min",
            Aggregation::Avg => "avg",
            Aggregation::Mult => "mult",
            Aggregation::Sum => "sum",
        }
    }

    /// Folds the entries in sequence order; `fallback` when empty.
    pub fn apply<T, XR>(&self, entries: &[SourceEntry<T, XR>], fallback: impl FnOnce() -> T) -> T
    where
        T: Copy + Num + PartialOrd,
    {
        if entries.is_empty() {
            return fallback();
        }
        let first = entries[0].value;
        match self {
            Aggregation::First => first,
            Aggregation::Last => entries[entries.len() - 1].value,
            Aggregation::Max => entries[1..]
                .iter()
                .fold(first, |best, e| if e.value > best { e.value } else { best }),
            Aggregation::Min => entries[1..]
                .iter()
                .fold(first, |best, e| if e.value < best { e.value } else { best }),
            Aggregation::Avg => {
                let total = entries.iter().fold(T::zero(), |acc, e| acc + e.value);
                let count = entries.iter().fold(T::zero(), |acc, _| acc + T::one());
                total / count
            }
            Aggregation::Mult => entries.iter().fold(T::one(), |acc, e| acc * e.value),
            Aggregation::Sum => entries.iter().fold(T::zero(), |acc, e| acc + e.value),
        }
    }
}

impl FromStr for Aggregation {
    type Err = RationaleError;

    fn from_str(keyword: &str) -> Result<Self, Self::Err> {
        match keyword {
            "first" => Ok(Aggregation::First),
            "last" => Ok(Aggregation::Last),
            "max" => Ok(Aggregation::Max),
            "min" => Ok(Aggregation::Min),
            "avg" => Ok(Aggregation::Avg),
            "mult" => Ok(Aggregation::Mult),
            "sum" => Ok(Aggregation::Sum),
            other => Err(RationaleError::UnknownAggregation(other.to_string())),
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method())
    }
}

impl<T, R, S, XR: Clone> BoxedComposite<T, R, S, T, XR> {
    /// Creates an aggregation node over numeric children.
    ///
    /// The empty-case fallback is zero for every strategy, including
    /// [`Aggregation::Mult`] - deliberately not the multiplicative
    /// identity; use [`aggregate_or`](BoxedComposite::aggregate_or) to
    /// supply a different fallback. The method tag defaults to the
    /// aggregation keyword.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use rationale_core::Computed;
    /// use rationale_tree::{Aggregation, Composite, Constant};
    ///
    /// let total = Composite::aggregate("total", Aggregation::Sum);
    /// assert_eq!(total.value(&()), 0.0);
    /// total.add(Arc::new(Constant::new("a", 1.5)));
    /// total.add(Arc::new(Constant::new("b", 2.5)));
    /// assert_eq!(total.value(&()), 4.0);
    /// ```
    pub fn aggregate(reason: R, aggregation: Aggregation) -> Self
    where
        T: Copy + Num + PartialOrd + Send + Sync + 'static,
    {
        Self::aggregate_or_else(reason, aggregation, T::zero)
    }

    /// Like [`aggregate`](BoxedComposite::aggregate), with an explicit
    /// empty-case fallback value.
    pub fn aggregate_or(reason: R, aggregation: Aggregation, fallback: T) -> Self
    where
        T: Copy + Num + PartialOrd + Send + Sync + 'static,
    {
        Self::aggregate_or_else(reason, aggregation, move || fallback)
    }

    /// Like [`aggregate`](BoxedComposite::aggregate), with a lazily
    /// produced empty-case fallback.
    pub fn aggregate_or_else<D>(reason: R, aggregation: Aggregation, fallback: D) -> Self
    where
        T: Copy + Num + PartialOrd + Send + Sync + 'static,
        D: Fn() -> T + Send + Sync + 'static,
    {
        let combine: CombineFn<T, S, T, XR> =
            Box::new(move |entries: &[SourceEntry<T, XR>], _situation: &S| {
                aggregation.apply(entries, &fallback)
            });
        Composite::new(reason, combine).with_method(aggregation.method())
    }

    /// Total of the children's values; see [`Aggregation::Sum`].
    pub fn sum(reason: R) -> Self
    where
        T: Copy + Num + PartialOrd + Send + Sync + 'static,
    {
        Self::aggregate(reason, Aggregation::Sum)
    }

    /// Product of the children's values; see [`Aggregation::Mult`].
    ///
    /// With no children this yields zero, like the other numeric
    /// aggregations - not one.
    pub fn mult(reason: R) -> Self
    where
        T: Copy + Num + PartialOrd + Send + Sync + 'static,
    {
        Self::aggregate(reason, Aggregation::Mult)
    }

    /// Maximum of the children's values; see [`Aggregation::Max`].
    pub fn max(reason: R) -> Self
    where
        T: Copy + Num + PartialOrd + Send + Sync + 'static,
    {
        Self::aggregate(reason, Aggregation::Max)
    }

    /// Minimum of the children's values; see [`Aggregation::Min`].
    pub fn min(reason: R) -> Self
    where
        T: Copy + Num + PartialOrd + Send + Sync + 'static,
    {
        Self::aggregate(reason, Aggregation::Min)
    }

    /// Arithmetic mean of the children's values; see [`Aggregation::Avg`].
    pub fn avg(reason: R) -> Self
    where
        T: Copy + Num + PartialOrd + Send + Sync + 'static,
    {
        Self::aggregate(reason, Aggregation::Avg)
    }

    /// The first child's value, or `fallback` with no children.
    ///
    /// Unlike the numeric aggregations, works over any clonable value
    /// type.
    pub fn first(reason: R, fallback: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        let combine: CombineFn<T, S, T, XR> =
            Box::new(move |entries: &[SourceEntry<T, XR>], _situation: &S| {
                entries
                    .first()
                    .map_or_else(|| fallback.clone(), |entry| entry.value.clone())
            });
        Composite::new(reason, combine).with_method("first")
    }

    /// The last child's value, or `fallback` with no children.
    pub fn last(reason: R, fallback: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        let combine: CombineFn<T, S, T, XR> =
            Box::new(move |entries: &[SourceEntry<T, XR>], _situation: &S| {
                entries
                    .last()
                    .map_or_else(|| fallback.clone(), |entry| entry.value.clone())
            });
        Composite::new(reason, combine).with_method("last")
    }
}
