use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Entity, CUSTOMER, ORDER, PRODUCT};
use crate::constants::OrderItemStatus;
use crate::error::Result;
use crate::query_builder::{column, Record, Value};
use crate::schema::{EntitySchema, FieldDef};

/// One line of a product order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct OrderItem {
    pub id: i64,
    pub quantity: i32,
    pub total_price: BigDecimal,
    #[sqlx(try_from = "String")]
    pub status: OrderItemStatus,
    pub product_id: i64,
    pub order_id: i64,
}

static ORDER_ITEM_SCHEMA: EntitySchema = EntitySchema {
    name: "OrderItem",
    table: "order_item",
    columns: &[
        "id",
        "quantity",
        "total_price",
        "status",
        "product_id",
        "order_id",
    ],
    fields: &[
        FieldDef::column("id"),
        FieldDef::column("quantity"),
        FieldDef::column("total_price"),
        FieldDef::column("status"),
        FieldDef::related("product_id", &[PRODUCT]),
        FieldDef::related("order_id", &[ORDER]),
        FieldDef::related("customer_id", &[ORDER, CUSTOMER]),
    ],
};

impl Entity for OrderItem {
    fn schema() -> &'static EntitySchema {
        &ORDER_ITEM_SCHEMA
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn to_record(&self) -> Record {
        Record::from([
            ("id", Value::from(self.id)),
            ("quantity", Value::from(self.quantity)),
            ("total_price", Value::from(self.total_price.clone())),
            ("status", Value::from(self.status)),
            ("product_id", Value::from(self.product_id)),
            ("order_id", Value::from(self.order_id)),
        ])
    }

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            id: column(record, "id")?,
            quantity: column(record, "quantity")?,
            total_price: column(record, "total_price")?,
            status: column(record, "status")?,
            product_id: column(record, "product_id")?,
            order_id: column(record, "order_id")?,
        })
    }
}
