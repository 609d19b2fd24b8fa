use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Entity;
use crate::constants::Size;
use crate::error::Result;
use crate::query_builder::{column, Record, Value};
use crate::schema::{EntitySchema, FieldDef};

/// Catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    #[sqlx(try_from = "String")]
    pub size: Size,
}

static PRODUCT_SCHEMA: EntitySchema = EntitySchema {
    name: "Product",
    table: "product",
    columns: &["id", "name", "description", "price", "size"],
    fields: &[
        FieldDef::column("id"),
        FieldDef::column("name"),
        FieldDef::column("description"),
        FieldDef::column("price"),
        FieldDef::column("size"),
    ],
};

impl Entity for Product {
    fn schema() -> &'static EntitySchema {
        &PRODUCT_SCHEMA
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn to_record(&self) -> Record {
        Record::from([
            ("id", Value::from(self.id)),
            ("name", Value::from(self.name.as_str())),
            ("description", Value::from(self.description.clone())),
            ("price", Value::from(self.price.clone())),
            ("size", Value::from(self.size)),
        ])
    }

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            id: column(record, "id")?,
            name: column(record, "name")?,
            description: column(record, "description")?,
            price: column(record, "price")?,
            size: column(record, "size")?,
        })
    }
}
