use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Entity;
use crate::error::Result;
use crate::query_builder::{column, Record, Value};
use crate::schema::{EntitySchema, FieldDef};

/// Authenticated account; a customer profile may link to it through `user_id`.
/// Maps to the `app_user` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub login: String,
}

static USER_SCHEMA: EntitySchema = EntitySchema {
    name: "User",
    table: "app_user",
    columns: &["id", "login"],
    fields: &[FieldDef::column("id"), FieldDef::column("login")],
};

impl Entity for User {
    fn schema() -> &'static EntitySchema {
        &USER_SCHEMA
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn to_record(&self) -> Record {
        Record::from([
            ("id", Value::from(self.id)),
            ("login", Value::from(self.login.as_str())),
        ])
    }

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            id: column(record, "id")?,
            login: column(record, "login")?,
        })
    }
}
