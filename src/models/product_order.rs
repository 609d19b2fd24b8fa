use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Entity, CUSTOMER, INVOICES, ORDER_ITEMS};
use crate::constants::OrderStatus;
use crate::error::Result;
use crate::query_builder::{column, Record, Value};
use crate::schema::{EntitySchema, FieldDef};

/// An order placed by a customer
/// Maps to `product_order` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProductOrder {
    pub id: i64,
    pub placed_date: DateTime<Utc>,
    #[sqlx(try_from = "String")]
    pub status: OrderStatus,
    pub code: String,
    pub customer_id: i64,
}

static PRODUCT_ORDER_SCHEMA: EntitySchema = EntitySchema {
    name: "ProductOrder",
    table: "product_order",
    columns: &["id", "placed_date", "status", "code", "customer_id"],
    fields: &[
        FieldDef::column("id"),
        FieldDef::column("placed_date"),
        FieldDef::column("status"),
        FieldDef::column("code"),
        FieldDef::related("order_item_id", &[ORDER_ITEMS]),
        FieldDef::related("invoice_id", &[INVOICES]),
        FieldDef::related("customer_id", &[CUSTOMER]),
    ],
};

impl Entity for ProductOrder {
    fn schema() -> &'static EntitySchema {
        &PRODUCT_ORDER_SCHEMA
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn to_record(&self) -> Record {
        Record::from([
            ("id", Value::from(self.id)),
            ("placed_date", Value::from(self.placed_date)),
            ("status", Value::from(self.status)),
            ("code", Value::from(self.code.as_str())),
            ("customer_id", Value::from(self.customer_id)),
        ])
    }

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            id: column(record, "id")?,
            placed_date: column(record, "placed_date")?,
            status: column(record, "status")?,
            code: column(record, "code")?,
            customer_id: column(record, "customer_id")?,
        })
    }
}
