mod common;

use common::strategies::*;
use common::{order, service, user, CustomerBuilder};
use proptest::prelude::*;
use storefront_query::compile;
use storefront_query::criteria::{CustomerCriteria, ProductOrderCriteria};
use storefront_query::filter::{LongFilter, StringFilter};
use storefront_query::models::Customer;
use storefront_query::{MemoryStorage, Storage, VisibilityContext};

fn customer_storage(customers: &[Customer]) -> MemoryStorage {
    let storage = MemoryStorage::new();
    storage.insert_all(customers);
    storage
}

fn matching_ids(storage: &MemoryStorage, criteria: &CustomerCriteria) -> Vec<i64> {
    let predicate = compile(Some(criteria)).unwrap();
    tokio_test::block_on(storage.find(&predicate))
        .unwrap()
        .iter()
        .map(|c: &Customer| c.id)
        .collect()
}

proptest! {
    /// Property: counting agrees with the length of the unpaged list, also when
    /// a filter on orders fans each customer out over several joined rows
    #[test]
    fn count_agrees_with_find(
        customers in customers_strategy(),
        orders in orders_strategy(),
        criteria in customer_criteria_strategy(),
    ) {
        let storage = customer_storage(&customers);
        storage.insert_all(&orders);
        let predicate = compile(Some(&criteria)).unwrap();

        let found = tokio_test::block_on(storage.find(&predicate)).unwrap();
        let counted = tokio_test::block_on(storage.count(&predicate)).unwrap();
        prop_assert_eq!(counted, found.len() as i64);

        let mut ids: Vec<i64> = found.iter().map(|c: &Customer| c.id).collect();
        ids.dedup();
        prop_assert_eq!(ids.len(), found.len());
    }

    /// Property: the empty aggregate selects exactly what no aggregate selects
    #[test]
    fn empty_criteria_selects_everything(customers in customers_strategy()) {
        let storage = customer_storage(&customers);
        let none = compile::<CustomerCriteria>(None).unwrap();

        let all = tokio_test::block_on(storage.find(&none)).unwrap();
        prop_assert_eq!(all.len(), customers.len());
        prop_assert_eq!(matching_ids(&storage, &CustomerCriteria::default()).len(), customers.len());
    }

    /// Property: `equals` selects exactly the equal rows and `notEquals` never selects NULLs
    #[test]
    fn equals_and_not_equals_follow_sql(customers in customers_strategy(), value in name_strategy()) {
        let storage = customer_storage(&customers);

        let equal = CustomerCriteria {
            address_line_2: Some(StringFilter::default().equal_to(value.clone())),
            ..Default::default()
        };
        let expected: Vec<i64> = customers
            .iter()
            .filter(|c| c.address_line_2.as_deref() == Some(value.as_str()))
            .map(|c| c.id)
            .collect();
        prop_assert_eq!(matching_ids(&storage, &equal), expected);

        let not_equal = CustomerCriteria {
            address_line_2: Some(StringFilter::default().not_equal_to(value.clone())),
            ..Default::default()
        };
        for id in matching_ids(&storage, &not_equal) {
            let row = customers.iter().find(|c| c.id == id).unwrap();
            prop_assert!(row.address_line_2.is_some());
            prop_assert_ne!(row.address_line_2.as_deref(), Some(value.as_str()));
        }
    }

    /// Property: `specified=true` and `specified=false` partition the rows
    #[test]
    fn specified_partitions_rows(customers in customers_strategy()) {
        let storage = customer_storage(&customers);
        let with = CustomerCriteria {
            address_line_2: Some(StringFilter::default().specified_as(true)),
            ..Default::default()
        };
        let without = CustomerCriteria {
            address_line_2: Some(StringFilter::default().specified_as(false)),
            ..Default::default()
        };

        let mut both = matching_ids(&storage, &with);
        let absent = matching_ids(&storage, &without);
        prop_assert!(both.iter().all(|id| !absent.contains(id)));

        both.extend(absent);
        both.sort_unstable();
        let all: Vec<i64> = customers.iter().map(|c| c.id).collect();
        prop_assert_eq!(both, all);
    }

    /// Property: `contains` and `doesNotContain` split the non-null rows; NULL satisfies neither
    #[test]
    fn contains_complements_over_non_null(customers in customers_strategy(), needle in "[a-zJ]{1,2}") {
        let storage = customer_storage(&customers);
        let contains = CustomerCriteria {
            address_line_2: Some(StringFilter::default().containing(needle.clone())),
            ..Default::default()
        };
        let lacks = CustomerCriteria {
            address_line_2: Some(StringFilter::default().not_containing(needle.clone())),
            ..Default::default()
        };

        let mut both = matching_ids(&storage, &contains);
        both.extend(matching_ids(&storage, &lacks));
        both.sort_unstable();
        let non_null: Vec<i64> = customers
            .iter()
            .filter(|c| c.address_line_2.is_some())
            .map(|c| c.id)
            .collect();
        prop_assert_eq!(both, non_null);
    }

    /// Property: restricted callers never see another customer's orders
    #[test]
    fn ownership_override_cannot_be_bypassed(
        orders in orders_strategy(),
        criteria in order_criteria_strategy(),
        owner in 1i64..=4,
    ) {
        let storage = MemoryStorage::new();
        for id in 1..=4 {
            storage.insert(&user(id, &format!("user{id}")));
            storage.insert(&CustomerBuilder::new(id, "Amy", "March").account(id).build());
        }
        storage.insert_all(&orders);
        let service = service(storage);
        let context = VisibilityContext::Restricted(owner);

        let visible = tokio_test::block_on(service.find_by_criteria(Some(&criteria), &context)).unwrap();
        prop_assert!(visible.iter().all(|o| o.customer_id == owner));

        let counted = tokio_test::block_on(service.count_by_criteria(Some(&criteria), &context)).unwrap();
        prop_assert_eq!(counted, visible.len() as i64);
    }
}

#[test]
fn test_empty_in_matches_nothing_and_empty_not_in_matches_everything() {
    let storage = MemoryStorage::new();
    storage.insert_all(&[
        order(1, "ORD-1", 1, storefront_query::constants::OrderStatus::Pending),
        order(2, "ORD-2", 1, storefront_query::constants::OrderStatus::Pending),
    ]);

    let empty_in = ProductOrderCriteria {
        id: Some(LongFilter::default().one_of([])),
        ..Default::default()
    };
    let empty_not_in = ProductOrderCriteria {
        id: Some(LongFilter::default().none_of([])),
        ..Default::default()
    };

    let none = compile(Some(&empty_in)).unwrap();
    let all = compile(Some(&empty_not_in)).unwrap();
    assert_eq!(tokio_test::block_on(storage.count(&none)).unwrap(), 0);
    assert_eq!(tokio_test::block_on(storage.count(&all)).unwrap(), 2);
    assert_eq!(none.predicate().to_where_sql().as_deref(), Some("FALSE"));
    assert_eq!(all.predicate().to_where_sql().as_deref(), Some("TRUE"));
}
