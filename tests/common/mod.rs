//! Shared fixtures for the storefront integration tests

#![allow(dead_code)]

pub mod builders;
pub mod strategies;

pub use builders::*;

use std::sync::Arc;
use storefront_query::config::PaginationConfig;
use storefront_query::{MemoryStorage, QueryService};

/// Account ids of the seeded users
pub const ADMIN_ACCOUNT: i64 = 1;
pub const JO_ACCOUNT: i64 = 2;
pub const MEG_ACCOUNT: i64 = 3;
/// An account with no customer profile
pub const ORPHAN_ACCOUNT: i64 = 4;

/// Customer ids of the seeded profiles
pub const JO: i64 = 7;
pub const MEG: i64 = 3;
pub const WALK_IN: i64 = 8;

/// Storage seeded with a small storefront:
///
/// - Jo (customer 7) placed orders 10 and 11; order 10 has items 100, 101,
///   invoice 5 (`INV-1`) and shipments 20, 21
/// - Meg (customer 3) placed order 12 with item 102, invoice 6 (`INV-2`) and
///   shipment 22
/// - the walk-in customer 8 has no account and no orders
pub fn seeded_storage() -> MemoryStorage {
    let storage = MemoryStorage::new();

    storage.insert_all(&[
        user(ADMIN_ACCOUNT, "admin"),
        user(JO_ACCOUNT, "jo"),
        user(MEG_ACCOUNT, "meg"),
        user(ORPHAN_ACCOUNT, "orphan"),
    ]);
    storage.insert_all(&[
        CustomerBuilder::new(JO, "Jo", "March").account(JO_ACCOUNT).build(),
        CustomerBuilder::new(MEG, "Meg", "March")
            .account(MEG_ACCOUNT)
            .city("Boston")
            .build(),
        CustomerBuilder::new(WALK_IN, "Laurie", "Laurence")
            .address_line_2("Apt 4")
            .build(),
    ]);
    storage.insert_all(&[product(1, "Shirt", Some("Cotton shirt")), product(2, "Hat", None)]);
    storage.insert_all(&[
        order(10, "ORD-10", JO, storefront_query::constants::OrderStatus::Pending),
        order(11, "ORD-11", JO, storefront_query::constants::OrderStatus::Completed),
        order(12, "ORD-12", MEG, storefront_query::constants::OrderStatus::Cancelled),
    ]);
    storage.insert_all(&[order_item(100, 10, 1, 2), order_item(101, 10, 2, 1), order_item(102, 12, 1, 5)]);
    storage.insert_all(&[
        invoice(5, "INV-1", 10, Some("first invoice")),
        invoice(6, "INV-2", 12, None),
    ]);
    storage.insert_all(&[
        shipment(20, 5, Some("TRACK-20")),
        shipment(21, 5, None),
        shipment(22, 6, Some("TRACK-22")),
    ]);
    storage
}

pub fn service(storage: MemoryStorage) -> QueryService<MemoryStorage> {
    QueryService::new(Arc::new(storage), PaginationConfig::default())
}

pub fn seeded_service() -> QueryService<MemoryStorage> {
    service(seeded_storage())
}
