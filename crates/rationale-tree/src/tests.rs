//! End-to-end scenarios across node kinds.

use std::sync::Arc;

use rationale_core::{Computed, ComputedRef, SourceEntry};

use crate::{Aggregation, Composite, Constant, Derived};

type Node = ComputedRef<f64, f64, &'static str>;

/// Salary tree: base salary plus a multiplicative bonus that depends on
/// years of work. The base constant is shared by both aggregates.
fn salary_tree() -> (Arc<crate::BoxedComposite<f64, &'static str, f64, f64, &'static str>>, Node) {
    let base: Node = Arc::new(Constant::new("base salary", 2000.0).with_method("fixed"));

    let bonus = Arc::new(Composite::aggregate_or(
        "current bonus",
        Aggregation::Mult,
        1.0,
    ));
    bonus.add(base.clone());
    bonus.add(Arc::new(
        Constant::new("yearly bonus (5%)", 0.05).with_method("fixed"),
    ));
    bonus.add(Arc::new(
        Derived::new("years of work", |years: &f64| *years).with_method("input"),
    ));

    let salary = Arc::new(Composite::sum("current salary"));
    salary.add(base.clone());
    salary.add(bonus);
    (salary, base)
}

#[test]
fn test_salary_value() {
    let (salary, _) = salary_tree();
    assert!((salary.value(&19.0) - 3900.0).abs() < 1e-9);
    // A different situation recomputes the whole tree.
    assert!((salary.value(&0.0) - 2000.0).abs() < 1e-9);
}

#[test]
fn test_salary_value_matches_explain() {
    let (salary, _) = salary_tree();
    assert_eq!(salary.value(&19.0), salary.explain(&19.0).value);
}

#[test]
fn test_salary_explain_structure() {
    let (salary, _) = salary_tree();
    let report = salary.explain(&19.0);

    assert!((report.value - 3900.0).abs() < 1e-9);
    assert_eq!(report.method, "sum");
    assert_eq!(report.reason, "current salary");

    let sources = report.sources.as_ref().unwrap();
    assert_eq!(sources.len(), 2);

    let base = &sources[0];
    assert_eq!(base.method, "fixed");
    assert_eq!(base.reason.as_value::<&str>(), Some(&"base salary"));
    assert_eq!(base.value.as_value::<f64>(), Some(&2000.0));
    assert!(base.sources.is_none());

    let bonus = &sources[1];
    assert_eq!(bonus.method, "mult");
    assert_eq!(bonus.reason.as_value::<&str>(), Some(&"current bonus"));
    assert!((bonus.value.as_value::<f64>().unwrap() - 1900.0).abs() < 1e-9);

    let bonus_sources = bonus.sources.as_ref().unwrap();
    assert_eq!(bonus_sources.len(), 3);
    assert_eq!(bonus_sources[0].reason.as_value::<&str>(), Some(&"base salary"));
    assert_eq!(bonus_sources[0].method, "fixed");
    assert_eq!(bonus_sources[1].value.as_value::<f64>(), Some(&0.05));
    assert_eq!(bonus_sources[2].reason.as_value::<&str>(), Some(&"years of work"));
    assert_eq!(bonus_sources[2].method, "input");
    assert_eq!(bonus_sources[2].value.as_value::<f64>(), Some(&19.0));
}

#[test]
fn test_shared_base_counts_in_both_aggregates() {
    let (salary, base) = salary_tree();
    // base appears under the root and under the bonus subtree.
    let report = salary.explain(&1.0);
    let sources = report.sources.as_ref().unwrap();
    let bonus_sources = sources[1].sources.as_ref().unwrap();
    assert_eq!(sources[0].reason.as_value::<&str>(), Some(base.reason()));
    assert_eq!(
        bonus_sources[0].reason.as_value::<&str>(),
        Some(base.reason())
    );
}

#[test]
fn test_fold_over_aggregate() {
    let subtotal = Arc::new(Composite::sum("subtotal"));
    subtotal.add(Arc::new(Constant::new("a", 2.0)));
    subtotal.add(Arc::new(Constant::new("b", 3.0)));

    let total = Composite::fold(
        "grand total",
        0.0,
        |acc, entry: &SourceEntry<f64, &str>, factor: &f64| acc + entry.value * factor,
    );
    total.add(subtotal);
    total.add(Arc::new(Constant::new("flat", 10.0)));

    assert_eq!(total.value(&2.0), 30.0);

    let report = total.explain(&2.0);
    assert_eq!(report.value, 30.0);
    assert_eq!(report.method, "reducer");
    let sources = report.sources.as_ref().unwrap();
    assert_eq!(sources[0].method, "sum");
    assert_eq!(sources[0].source_count(), 2);
    assert_eq!(sources[1].method, "simple");
}

#[test]
fn test_parent_and_children_may_differ_in_type() {
    let label = Composite::new(
        "headcount",
        |entries: &[SourceEntry<i64, &str>], _: &()| {
            let people: i64 = entries.iter().map(|e| e.value).sum();
            format!("{} teams, {} people", entries.len(), people)
        },
    );
    label.add(Arc::new(Constant::new("platform", 4)));
    label.add(Arc::new(Constant::new("product", 7)));
    assert_eq!(label.value(&()), "2 teams, 11 people");

    let report = label.explain(&());
    assert_eq!(report.value, "2 teams, 11 people");
    assert_eq!(report.source_count(), 2);
}

#[test]
fn test_typed_reasons() {
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Part {
        Base,
        Bonus,
    }

    let salary: crate::BoxedComposite<i64, &str, (), i64, Part> = Composite::sum("salary");
    salary.add(Arc::new(Constant::new(Part::Base, 2000)));
    let bonus = salary.find_or_add(&Part::Bonus, || Arc::new(Constant::new(Part::Bonus, 150)));
    assert_eq!(bonus.value(&()), 150);
    assert_eq!(salary.value(&()), 2150);
    assert!(salary.find(&Part::Base).is_some());
}

#[test]
fn test_incremental_build_through_find_or_add() {
    let salary = Arc::new(Composite::sum("salary"));
    for _ in 0..2 {
        // The same component is materialized once and then found.
        salary.find_or_add(&"base", || Arc::new(Constant::new("base", 2000.0)));
        salary.find_or_add(&"bonus", || Arc::new(Constant::new("bonus", 300.0)));
    }
    assert_eq!(salary.len(), 2);
    assert_eq!(salary.value(&()), 2300.0);
}
