use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Entity, CUSTOMER, INVOICE, ORDER};
use crate::error::Result;
use crate::query_builder::{column, Record, Value};
use crate::schema::{EntitySchema, FieldDef};

/// Shipment dispatched against an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Shipment {
    pub id: i64,
    pub tracking_code: Option<String>,
    pub date: DateTime<Utc>,
    pub details: Option<String>,
    pub invoice_id: i64,
}

static SHIPMENT_SCHEMA: EntitySchema = EntitySchema {
    name: "Shipment",
    table: "shipment",
    columns: &["id", "tracking_code", "date", "details", "invoice_id"],
    fields: &[
        FieldDef::column("id"),
        FieldDef::column("tracking_code"),
        FieldDef::column("date"),
        FieldDef::column("details"),
        FieldDef::related("invoice_id", &[INVOICE]),
        FieldDef::related("customer_id", &[INVOICE, ORDER, CUSTOMER]),
    ],
};

impl Entity for Shipment {
    fn schema() -> &'static EntitySchema {
        &SHIPMENT_SCHEMA
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn to_record(&self) -> Record {
        Record::from([
            ("id", Value::from(self.id)),
            ("tracking_code", Value::from(self.tracking_code.clone())),
            ("date", Value::from(self.date)),
            ("details", Value::from(self.details.clone())),
            ("invoice_id", Value::from(self.invoice_id)),
        ])
    }

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            id: column(record, "id")?,
            tracking_code: column(record, "tracking_code")?,
            date: column(record, "date")?,
            details: column(record, "details")?,
            invoice_id: column(record, "invoice_id")?,
        })
    }
}
