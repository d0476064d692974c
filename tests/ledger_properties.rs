//! Property-based tests for the bill ledger
//!
//! Uses proptest to verify, over arbitrary sequences of adds and quantity changes:
//! 1. No two lines ever share an item id
//! 2. Every retained line has a quantity of at least 1
//! 3. The total always equals the sum of price x quantity
//! 4. Removing a line's full quantity removes the line

use billing_counter::core::{
    catalog::{Catalog, CatalogItem},
    ledger::{Adjustment, Ledger},
    money::Money,
};
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
enum Op {
    Add(usize),
    Adjust(usize, i64),
}

fn menu() -> Vec<CatalogItem> {
    let catalog = Catalog::builtin();
    catalog
        .category_names()
        .flat_map(|name| catalog.items(name).to_vec())
        .collect()
}

fn op_strategy(menu_len: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..menu_len).prop_map(Op::Add),
        2 => (0..menu_len, -5i64..5).prop_map(|(index, delta)| Op::Adjust(index, delta)),
    ]
}

fn apply(ledger: &mut Ledger, menu: &[CatalogItem], op: &Op) {
    match *op {
        Op::Add(index) => {
            ledger.add_item(&menu[index]);
        }
        Op::Adjust(index, delta) => {
            ledger.adjust_quantity(menu[index].id, delta);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: ids are unique and quantities positive after any sequence
    #[test]
    fn lines_stay_unique_and_positive(ops in prop::collection::vec(op_strategy(27), 0..60)) {
        let menu = menu();
        let mut ledger = Ledger::new();
        for op in &ops {
            apply(&mut ledger, &menu, op);

            let mut ids = HashSet::new();
            for line in ledger.lines() {
                prop_assert!(ids.insert(line.item().id), "duplicate line for id {}", line.item().id);
                prop_assert!(line.quantity() >= 1);
            }
        }
    }

    /// Property: the total matches an independent recomputation
    #[test]
    fn total_matches_model(ops in prop::collection::vec(op_strategy(27), 0..60)) {
        let menu = menu();
        let mut ledger = Ledger::new();
        let mut model: HashMap<u32, i64> = HashMap::new();

        for op in &ops {
            apply(&mut ledger, &menu, op);
            match *op {
                Op::Add(index) => *model.entry(menu[index].id).or_insert(0) += 1,
                Op::Adjust(index, delta) => {
                    if let Some(quantity) = model.get_mut(&menu[index].id) {
                        *quantity = (*quantity + delta).max(0);
                        if *quantity == 0 {
                            model.remove(&menu[index].id);
                        }
                    }
                }
            }
        }

        let expected: Money = model
            .iter()
            .map(|(id, quantity)| {
                let item = menu.iter().find(|item| item.id == *id).unwrap();
                item.price * u32::try_from(*quantity).unwrap()
            })
            .sum();
        prop_assert_eq!(ledger.total(), expected);
        prop_assert_eq!(ledger.item_count(), model.len());
    }

    /// Property: subtracting a line's whole quantity removes it
    #[test]
    fn full_decrement_removes_line(index in 0usize..27, adds in 1u32..10) {
        let menu = menu();
        let mut ledger = Ledger::new();
        for _ in 0..adds {
            ledger.add_item(&menu[index]);
        }

        let id = menu[index].id;
        let quantity = ledger.line(id).unwrap().quantity();
        prop_assert_eq!(ledger.adjust_quantity(id, -i64::from(quantity)), Adjustment::Removed);
        prop_assert!(ledger.line(id).is_none());
        prop_assert_eq!(ledger.total(), Money::ZERO);
    }
}

#[test]
fn empty_ledger_totals_zero() {
    assert_eq!(Ledger::new().total(), Money::ZERO);
}
