use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Entity, ORDERS, USER};
use crate::constants::Gender;
use crate::error::Result;
use crate::query_builder::{column, Record, Value};
use crate::schema::{EntitySchema, FieldDef};

/// Customer profile, optionally linked to an account
/// Maps to `customer` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[sqlx(try_from = "String")]
    pub gender: Gender,
    pub email: String,
    pub phone: String,
    pub address_line_1: String,
    pub address_line_2: Option<String>,
    pub city: String,
    pub country: String,
    pub user_id: Option<i64>,
}

static CUSTOMER_SCHEMA: EntitySchema = EntitySchema {
    name: "Customer",
    table: "customer",
    columns: &[
        "id",
        "first_name",
        "last_name",
        "gender",
        "email",
        "phone",
        "address_line_1",
        "address_line_2",
        "city",
        "country",
        "user_id",
    ],
    fields: &[
        FieldDef::column("id"),
        FieldDef::column("first_name"),
        FieldDef::column("last_name"),
        FieldDef::column("gender"),
        FieldDef::column("email"),
        FieldDef::column("phone"),
        FieldDef::column("address_line_1"),
        FieldDef::column("address_line_2"),
        FieldDef::column("city"),
        FieldDef::column("country"),
        FieldDef::related("user_id", &[USER]),
        FieldDef::related("order_id", &[ORDERS]),
    ],
};

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Entity for Customer {
    fn schema() -> &'static EntitySchema {
        &CUSTOMER_SCHEMA
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn to_record(&self) -> Record {
        Record::from([
            ("id", Value::from(self.id)),
            ("first_name", Value::from(self.first_name.as_str())),
            ("last_name", Value::from(self.last_name.as_str())),
            ("gender", Value::from(self.gender)),
            ("email", Value::from(self.email.as_str())),
            ("phone", Value::from(self.phone.as_str())),
            ("address_line_1", Value::from(self.address_line_1.as_str())),
            ("address_line_2", Value::from(self.address_line_2.clone())),
            ("city", Value::from(self.city.as_str())),
            ("country", Value::from(self.country.as_str())),
            ("user_id", Value::from(self.user_id)),
        ])
    }

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            id: column(record, "id")?,
            first_name: column(record, "first_name")?,
            last_name: column(record, "last_name")?,
            gender: column(record, "gender")?,
            email: column(record, "email")?,
            phone: column(record, "phone")?,
            address_line_1: column(record, "address_line_1")?,
            address_line_2: column(record, "address_line_2")?,
            city: column(record, "city")?,
            country: column(record, "country")?,
            user_id: column(record, "user_id")?,
        })
    }
}
