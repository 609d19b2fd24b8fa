use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use std::str::FromStr;

use super::FilterValue;
use crate::query_builder::Value;

/// Marker for filter values with a total order, enabling range components
pub trait RangeValue: FilterValue {}

impl FilterValue for i64 {
    const ORDERED: bool = true;

    fn to_value(&self) -> Value {
        Value::Int(*self)
    }

    fn parse_param(raw: &str) -> Result<Self, String> {
        raw.trim().parse().map_err(|e: std::num::ParseIntError| e.to_string())
    }
}

impl FilterValue for i32 {
    const ORDERED: bool = true;

    fn to_value(&self) -> Value {
        Value::from(*self)
    }

    fn parse_param(raw: &str) -> Result<Self, String> {
        raw.trim().parse().map_err(|e: std::num::ParseIntError| e.to_string())
    }
}

impl FilterValue for BigDecimal {
    const ORDERED: bool = true;

    fn to_value(&self) -> Value {
        Value::Decimal(self.clone())
    }

    fn parse_param(raw: &str) -> Result<Self, String> {
        BigDecimal::from_str(raw.trim()).map_err(|e| e.to_string())
    }
}

impl FilterValue for DateTime<Utc> {
    const ORDERED: bool = true;

    fn to_value(&self) -> Value {
        Value::Timestamp(*self)
    }

    fn parse_param(raw: &str) -> Result<Self, String> {
        DateTime::parse_from_rfc3339(raw.trim())
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| e.to_string())
    }
}

impl FilterValue for String {
    const ORDERED: bool = false;
    const TEXT: bool = true;

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn parse_param(raw: &str) -> Result<Self, String> {
        Ok(raw.to_string())
    }
}

impl RangeValue for i64 {}
impl RangeValue for i32 {}
impl RangeValue for BigDecimal {}
impl RangeValue for DateTime<Utc> {}
