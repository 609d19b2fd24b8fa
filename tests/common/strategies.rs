//! Proptest strategies over small value domains so filters hit often

use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;
use storefront_query::constants::{Gender, OrderStatus};
use storefront_query::criteria::{CustomerCriteria, ProductOrderCriteria};
use storefront_query::filter::{Filter, LongFilter, StringFilter};
use storefront_query::models::{Customer, ProductOrder};

use super::builders::{order, CustomerBuilder};

pub fn name_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Jo", "Joan", "Meg", "Beth", "Amy", "Laurie"]).prop_map(str::to_string)
}

pub fn gender_strategy() -> impl Strategy<Value = Gender> {
    prop::sample::select(Gender::ALL.to_vec())
}

pub fn order_status_strategy() -> impl Strategy<Value = OrderStatus> {
    prop::sample::select(OrderStatus::ALL.to_vec())
}

/// Customers with unique ids `1..=n` and nullable second address lines
pub fn customers_strategy() -> impl Strategy<Value = Vec<Customer>> {
    vec(
        (
            name_strategy(),
            gender_strategy(),
            option::of(name_strategy()),
        ),
        0..12,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(index, (first_name, gender, line_2))| {
                let builder = CustomerBuilder::new(index as i64 + 1, &first_name, "March").gender(gender);
                match line_2 {
                    Some(line) => builder.address_line_2(&line).build(),
                    None => builder.build(),
                }
            })
            .collect()
    })
}

pub fn string_filter_strategy() -> impl Strategy<Value = StringFilter> {
    prop_oneof![
        name_strategy().prop_map(|v| StringFilter::default().equal_to(v)),
        name_strategy().prop_map(|v| StringFilter::default().not_equal_to(v)),
        vec(name_strategy(), 0..3).prop_map(|v| StringFilter::default().one_of(v)),
        vec(name_strategy(), 0..3).prop_map(|v| StringFilter::default().none_of(v)),
        any::<bool>().prop_map(|b| StringFilter::default().specified_as(b)),
        "[a-zJ]{1,2}".prop_map(|v| StringFilter::default().containing(v)),
        "[a-zJ]{1,2}".prop_map(|v| StringFilter::default().not_containing(v)),
    ]
}

pub fn long_filter_strategy() -> impl Strategy<Value = LongFilter> {
    prop_oneof![
        (0i64..14).prop_map(|v| LongFilter::default().equal_to(v)),
        (0i64..14).prop_map(|v| LongFilter::default().above(v)),
        (0i64..14).prop_map(|v| LongFilter::default().at_most(v)),
        (0i64..14, 0i64..14).prop_map(|(low, high)| LongFilter::default().at_least(low).below(high)),
        vec(0i64..14, 0..4).prop_map(|v| LongFilter::default().none_of(v)),
    ]
}

pub fn customer_criteria_strategy() -> impl Strategy<Value = CustomerCriteria> {
    (
        option::of(long_filter_strategy()),
        option::of(string_filter_strategy()),
        option::of(string_filter_strategy()),
        option::of(gender_strategy().prop_map(|g| Filter::default().equal_to(g))),
        option::of(long_filter_strategy()),
    )
        .prop_map(|(id, first_name, address_line_2, gender, order_id)| CustomerCriteria {
            id,
            first_name,
            address_line_2,
            gender,
            order_id,
            ..Default::default()
        })
}

/// Orders spread over customers 1..=4 (all of which exist)
pub fn orders_strategy() -> impl Strategy<Value = Vec<ProductOrder>> {
    vec((1i64..=4, order_status_strategy()), 0..16).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(index, (customer_id, status))| {
                let id = index as i64 + 1;
                order(id, &format!("ORD-{id}"), customer_id, status)
            })
            .collect()
    })
}

pub fn order_criteria_strategy() -> impl Strategy<Value = ProductOrderCriteria> {
    (
        option::of(long_filter_strategy()),
        option::of(order_status_strategy().prop_map(|s| Filter::default().not_equal_to(s))),
    )
        .prop_map(|(customer_id, status)| ProductOrderCriteria {
            customer_id,
            status,
            ..Default::default()
        })
}
