use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Entity, CUSTOMER, ORDER, SHIPMENTS};
use crate::constants::{InvoiceStatus, PaymentMethod};
use crate::error::Result;
use crate::query_builder::{column, Record, Value};
use crate::schema::{EntitySchema, FieldDef};

/// Invoice issued for a product order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Invoice {
    pub id: i64,
    pub code: String,
    pub date: DateTime<Utc>,
    pub details: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: InvoiceStatus,
    #[sqlx(try_from = "String")]
    pub payment_method: PaymentMethod,
    pub payment_date: DateTime<Utc>,
    pub payment_amount: BigDecimal,
    pub order_id: i64,
}

static INVOICE_SCHEMA: EntitySchema = EntitySchema {
    name: "Invoice",
    table: "invoice",
    columns: &[
        "id",
        "code",
        "date",
        "details",
        "status",
        "payment_method",
        "payment_date",
        "payment_amount",
        "order_id",
    ],
    fields: &[
        FieldDef::column("id"),
        FieldDef::column("code"),
        FieldDef::column("date"),
        FieldDef::column("details"),
        FieldDef::column("status"),
        FieldDef::column("payment_method"),
        FieldDef::column("payment_date"),
        FieldDef::column("payment_amount"),
        FieldDef::related("shipment_id", &[SHIPMENTS]),
        FieldDef::related("order_id", &[ORDER]),
        FieldDef::related("customer_id", &[ORDER, CUSTOMER]),
    ],
};

impl Entity for Invoice {
    fn schema() -> &'static EntitySchema {
        &INVOICE_SCHEMA
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn to_record(&self) -> Record {
        Record::from([
            ("id", Value::from(self.id)),
            ("code", Value::from(self.code.as_str())),
            ("date", Value::from(self.date)),
            ("details", Value::from(self.details.clone())),
            ("status", Value::from(self.status)),
            ("payment_method", Value::from(self.payment_method)),
            ("payment_date", Value::from(self.payment_date)),
            ("payment_amount", Value::from(self.payment_amount.clone())),
            ("order_id", Value::from(self.order_id)),
        ])
    }

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            id: column(record, "id")?,
            code: column(record, "code")?,
            date: column(record, "date")?,
            details: column(record, "details")?,
            status: column(record, "status")?,
            payment_method: column(record, "payment_method")?,
            payment_date: column(record, "payment_date")?,
            payment_amount: column(record, "payment_amount")?,
            order_id: column(record, "order_id")?,
        })
    }
}
