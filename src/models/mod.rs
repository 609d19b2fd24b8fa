//! # Storefront Models
//!
//! Persistent entities of the back office. Each entity carries a static
//! [`EntitySchema`] that names its columns, its criteria fields and the join
//! paths that reach related identifiers:
//!
//! ```text
//! Customer 1──* ProductOrder 1──* OrderItem *──1 Product
//! ProductOrder 1──* Invoice 1──* Shipment
//! ```

pub mod customer;
pub mod invoice;
pub mod order_item;
pub mod product;
pub mod product_order;
pub mod shipment;
pub mod user;

pub use customer::Customer;
pub use invoice::Invoice;
pub use order_item::OrderItem;
pub use product::Product;
pub use product_order::ProductOrder;
pub use shipment::Shipment;
pub use user::User;

use sqlx::postgres::PgRow;
use sqlx::FromRow;
use std::fmt;

use crate::error::Result;
use crate::query_builder::Record;
use crate::schema::{EntitySchema, JoinStep};

/// A row type that both storage back ends can load
pub trait Entity:
    Clone + fmt::Debug + Send + Sync + Unpin + for<'r> FromRow<'r, PgRow> + 'static
{
    fn schema() -> &'static EntitySchema;

    fn id(&self) -> i64;

    /// Column values keyed by column name
    fn to_record(&self) -> Record;

    fn from_record(record: &Record) -> Result<Self>;
}

// Relationship hops shared by the entity join paths
pub(crate) const USER: JoinStep = JoinStep::to_one("user", "app_user", "user_id");
pub(crate) const CUSTOMER: JoinStep = JoinStep::to_one("customer", "customer", "customer_id");
pub(crate) const ORDER: JoinStep = JoinStep::to_one("order", "product_order", "order_id");
pub(crate) const PRODUCT: JoinStep = JoinStep::to_one("product", "product", "product_id");
pub(crate) const INVOICE: JoinStep = JoinStep::to_one("invoice", "invoice", "invoice_id");
pub(crate) const ORDERS: JoinStep = JoinStep::to_many("orders", "product_order", "customer_id");
pub(crate) const ORDER_ITEMS: JoinStep = JoinStep::to_many("orderItems", "order_item", "order_id");
pub(crate) const INVOICES: JoinStep = JoinStep::to_many("invoices", "invoice", "order_id");
pub(crate) const SHIPMENTS: JoinStep = JoinStep::to_many("shipments", "shipment", "invoice_id");

/// Every entity schema, referenced tables before the tables that point at them
pub fn all_schemas() -> [&'static EntitySchema; 7] {
    [
        User::schema(),
        Customer::schema(),
        Product::schema(),
        ProductOrder::schema(),
        OrderItem::schema(),
        Invoice::schema(),
        Shipment::schema(),
    ]
}

/// Schema for a table name, e.g. the target table of a [`JoinStep`]
pub fn schema_for_table(table: &str) -> Option<&'static EntitySchema> {
    all_schemas().into_iter().find(|schema| schema.table == table)
}
