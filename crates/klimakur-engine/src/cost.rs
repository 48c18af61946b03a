//! Cost resolution
//!
//! Precedence: override, then the store's unknown-cost default, then the
//! catalog cost. Overrides are returned verbatim; they are validated when set.

use crate::params::ParameterStore;
use klimakur_catalog::{MeasureRecord, UnitCost};

/// Effective unit cost (NOK per tonne) of a measure under a store
#[must_use]
pub fn resolve_unit_cost(measure: &MeasureRecord, store: &ParameterStore) -> f64 {
    if let Some(cost) = store.cost_override(measure.title()) {
        return cost;
    }
    match measure.cost() {
        UnitCost::Known(cost) => cost,
        UnitCost::Unknown => store.default_unknown_cost(),
    }
}

/// True iff the measure has no assessed cost and no override
#[must_use]
pub fn is_assumed_cost(measure: &MeasureRecord, store: &ParameterStore) -> bool {
    measure.cost().is_unknown() && store.cost_override(measure.title()).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use klimakur_catalog::{Catalog, Category};
    use proptest::prelude::*;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            MeasureRecord::new("K01 Kjent", Category::Industry, 100.0, UnitCost::Known(800.0)).unwrap(),
            MeasureRecord::new("U01 Ukjent", Category::Industry, 100.0, UnitCost::Unknown).unwrap(),
            MeasureRecord::new("N01 Null", Category::Industry, 100.0, UnitCost::Known(0.0)).unwrap(),
        ])
    }

    #[test]
    fn known_cost_is_used() {
        let c = catalog();
        let store = ParameterStore::new(&c);
        assert_eq!(resolve_unit_cost(&c.records()[0], &store), 800.0);
        assert!(!is_assumed_cost(&c.records()[0], &store));
    }

    #[test]
    fn zero_is_not_unknown() {
        let c = catalog();
        let store = ParameterStore::new(&c).with_default_unknown_cost(3000.0).unwrap();
        assert_eq!(resolve_unit_cost(&c.records()[2], &store), 0.0);
        assert!(!is_assumed_cost(&c.records()[2], &store));
    }

    #[test]
    fn unknown_uses_default_until_overridden() {
        let c = catalog();
        let store = ParameterStore::new(&c).with_default_unknown_cost(2000.0).unwrap();
        let m = &c.records()[1];
        assert_eq!(resolve_unit_cost(m, &store), 2000.0);
        assert!(is_assumed_cost(m, &store));

        let store = store.with_cost_override(&c, m.title(), 500.0).unwrap();
        assert_eq!(resolve_unit_cost(m, &store), 500.0);
        assert!(!is_assumed_cost(m, &store));
    }

    #[test]
    fn stale_override_is_inert() {
        let c = catalog();
        let other = Catalog::new(vec![
            MeasureRecord::new("X01 Borte", Category::Other, 1.0, UnitCost::Known(1.0)).unwrap(),
        ]);
        let store = ParameterStore::new(&other)
            .with_cost_override(&other, "X01 Borte", 9.0)
            .unwrap();
        assert_eq!(resolve_unit_cost(&c.records()[0], &store), 800.0);
    }

    proptest! {
        #[test]
        fn default_cost_only_moves_assumed_rows(default in 0.0f64..10_000.0, over in 0.0f64..10_000.0) {
            let c = catalog();
            let base = ParameterStore::new(&c)
                .with_cost_override(&c, "N01 Null", over)
                .unwrap();
            let changed = base.clone().with_default_unknown_cost(default).unwrap();

            for m in [&c.records()[0], &c.records()[2]] {
                prop_assert_eq!(resolve_unit_cost(m, &base), resolve_unit_cost(m, &changed));
            }
            prop_assert_eq!(resolve_unit_cost(&c.records()[1], &changed), default.round());
        }
    }
}
