//! # Filter Value Objects
//!
//! A [`Filter`] describes the constraints requested for one field: any subset of
//! equality, membership, "is specified", range and substring components. Every
//! present component becomes one [`Condition`]; a filter with no components is
//! no constraint at all.
//!
//! Range components can only be set on [`RangeValue`] types and substring
//! components only on `Filter<String>`, so an incomparable filter is a type error
//! rather than a runtime one.

mod values;

use std::fmt;

use crate::error::{Result, StorefrontError};
use crate::query_builder::{ColumnRef, Condition, Operator, Value};

pub use values::RangeValue;

/// A type a [`Filter`] can hold
pub trait FilterValue: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Whether range comparators apply
    const ORDERED: bool;
    /// Whether substring comparators apply
    const TEXT: bool = false;

    fn to_value(&self) -> Value;

    /// Parse one request parameter value
    fn parse_param(raw: &str) -> std::result::Result<Self, String>;
}

/// Object-safe view of a filter used by the predicate compiler
pub trait FieldFilter: fmt::Debug + Send + Sync {
    fn is_empty(&self) -> bool;

    /// One condition per present component, in a fixed component order
    fn conditions(&self, column: &ColumnRef) -> Vec<Condition>;
}

pub type LongFilter = Filter<i64>;
pub type IntegerFilter = Filter<i32>;
pub type BigDecimalFilter = Filter<bigdecimal::BigDecimal>;
pub type InstantFilter = Filter<chrono::DateTime<chrono::Utc>>;
pub type StringFilter = Filter<String>;

/// Per-field filter; build with [`Filter::default`] and the chained setters
#[derive(Clone, PartialEq)]
pub struct Filter<T> {
    equals: Option<T>,
    not_equals: Option<T>,
    in_values: Option<Vec<T>>,
    not_in: Option<Vec<T>>,
    specified: Option<bool>,
    greater_than: Option<T>,
    greater_than_or_equal: Option<T>,
    less_than: Option<T>,
    less_than_or_equal: Option<T>,
    contains: Option<String>,
    does_not_contain: Option<String>,
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Self {
            equals: None,
            not_equals: None,
            in_values: None,
            not_in: None,
            specified: None,
            greater_than: None,
            greater_than_or_equal: None,
            less_than: None,
            less_than_or_equal: None,
            contains: None,
            does_not_contain: None,
        }
    }
}

impl<T: FilterValue> Filter<T> {
    pub fn equal_to(mut self, value: T) -> Self {
        self.equals = Some(value);
        self
    }

    pub fn not_equal_to(mut self, value: T) -> Self {
        self.not_equals = Some(value);
        self
    }

    pub fn one_of(mut self, values: impl IntoIterator<Item = T>) -> Self {
        self.in_values = Some(values.into_iter().collect());
        self
    }

    pub fn none_of(mut self, values: impl IntoIterator<Item = T>) -> Self {
        self.not_in = Some(values.into_iter().collect());
        self
    }

    /// `true`: the field is non-null; `false`: the field is null
    pub fn specified_as(mut self, specified: bool) -> Self {
        self.specified = Some(specified);
        self
    }

    pub fn equals(&self) -> Option<&T> {
        self.equals.as_ref()
    }

    pub fn not_equals(&self) -> Option<&T> {
        self.not_equals.as_ref()
    }

    pub fn in_values(&self) -> Option<&[T]> {
        self.in_values.as_deref()
    }

    pub fn not_in(&self) -> Option<&[T]> {
        self.not_in.as_deref()
    }

    pub fn specified(&self) -> Option<bool> {
        self.specified
    }

    pub fn greater_than(&self) -> Option<&T> {
        self.greater_than.as_ref()
    }

    pub fn greater_than_or_equal(&self) -> Option<&T> {
        self.greater_than_or_equal.as_ref()
    }

    pub fn less_than(&self) -> Option<&T> {
        self.less_than.as_ref()
    }

    pub fn less_than_or_equal(&self) -> Option<&T> {
        self.less_than_or_equal.as_ref()
    }

    pub fn contains(&self) -> Option<&str> {
        self.contains.as_deref()
    }

    pub fn does_not_contain(&self) -> Option<&str> {
        self.does_not_contain.as_deref()
    }

    /// Set one component from a `field.operator=value` request parameter
    pub fn apply_param(&mut self, operator: &str, raw: &str) -> Result<()> {
        let parse = |raw: &str| {
            T::parse_param(raw).map_err(|e| {
                StorefrontError::validation(format!("invalid value '{raw}' for '{operator}': {e}"))
            })
        };
        let parse_list = |raw: &str| -> Result<Vec<T>> {
            raw.split(',')
                .filter(|item| !item.trim().is_empty())
                .map(parse)
                .collect()
        };
        let ordered = |slot: &mut Option<T>| -> Result<()> {
            if !T::ORDERED {
                return Err(StorefrontError::validation(format!(
                    "operator '{operator}' needs an ordered field"
                )));
            }
            *slot = Some(parse(raw)?);
            Ok(())
        };

        match operator {
            "equals" => self.equals = Some(parse(raw)?),
            "notEquals" => self.not_equals = Some(parse(raw)?),
            "in" => self.in_values = Some(parse_list(raw)?),
            "notIn" => self.not_in = Some(parse_list(raw)?),
            "specified" => {
                self.specified = Some(raw.trim().parse::<bool>().map_err(|_| {
                    StorefrontError::validation(format!("invalid value '{raw}' for 'specified'"))
                })?)
            }
            "greaterThan" => ordered(&mut self.greater_than)?,
            "greaterThanOrEqual" => ordered(&mut self.greater_than_or_equal)?,
            "lessThan" => ordered(&mut self.less_than)?,
            "lessThanOrEqual" => ordered(&mut self.less_than_or_equal)?,
            "contains" | "doesNotContain" if !T::TEXT => {
                return Err(StorefrontError::validation(format!(
                    "operator '{operator}' needs a text field"
                )))
            }
            "contains" => self.contains = Some(raw.to_string()),
            "doesNotContain" => self.does_not_contain = Some(raw.to_string()),
            other => {
                return Err(StorefrontError::validation(format!(
                    "unknown filter operator '{other}'"
                )))
            }
        }
        Ok(())
    }
}

impl<T: RangeValue> Filter<T> {
    /// `field > value`
    pub fn above(mut self, value: T) -> Self {
        self.greater_than = Some(value);
        self
    }

    /// `field >= value`
    pub fn at_least(mut self, value: T) -> Self {
        self.greater_than_or_equal = Some(value);
        self
    }

    /// `field < value`
    pub fn below(mut self, value: T) -> Self {
        self.less_than = Some(value);
        self
    }

    /// `field <= value`
    pub fn at_most(mut self, value: T) -> Self {
        self.less_than_or_equal = Some(value);
        self
    }
}

impl Filter<String> {
    /// Case-sensitive substring match; the value is used as-is inside the LIKE pattern
    pub fn containing(mut self, value: impl Into<String>) -> Self {
        self.contains = Some(value.into());
        self
    }

    pub fn not_containing(mut self, value: impl Into<String>) -> Self {
        self.does_not_contain = Some(value.into());
        self
    }
}

impl<T: FilterValue> FieldFilter for Filter<T> {
    fn is_empty(&self) -> bool {
        self.equals.is_none()
            && self.not_equals.is_none()
            && self.in_values.is_none()
            && self.not_in.is_none()
            && self.specified.is_none()
            && self.greater_than.is_none()
            && self.greater_than_or_equal.is_none()
            && self.less_than.is_none()
            && self.less_than_or_equal.is_none()
            && self.contains.is_none()
            && self.does_not_contain.is_none()
    }

    fn conditions(&self, column: &ColumnRef) -> Vec<Condition> {
        let compare = |operator: Operator, value: &T| Condition::Simple {
            field: column.clone(),
            operator,
            value: value.to_value(),
        };
        let values = |items: &[T]| -> Vec<Value> { items.iter().map(T::to_value).collect() };
        let mut conditions = Vec::new();

        if let Some(value) = &self.equals {
            conditions.push(compare(Operator::Eq, value));
        }
        if let Some(value) = &self.not_equals {
            conditions.push(compare(Operator::NotEq, value));
        }
        if let Some(items) = &self.in_values {
            conditions.push(Condition::In {
                field: column.clone(),
                values: values(items),
            });
        }
        if let Some(items) = &self.not_in {
            conditions.push(Condition::NotIn {
                field: column.clone(),
                values: values(items),
            });
        }
        match self.specified {
            Some(true) => conditions.push(Condition::IsNotNull {
                field: column.clone(),
            }),
            Some(false) => conditions.push(Condition::IsNull {
                field: column.clone(),
            }),
            None => {}
        }
        if let Some(value) = &self.greater_than {
            conditions.push(compare(Operator::Gt, value));
        }
        if let Some(value) = &self.greater_than_or_equal {
            conditions.push(compare(Operator::Gte, value));
        }
        if let Some(value) = &self.less_than {
            conditions.push(compare(Operator::Lt, value));
        }
        if let Some(value) = &self.less_than_or_equal {
            conditions.push(compare(Operator::Lte, value));
        }
        if let Some(text) = &self.contains {
            conditions.push(Condition::Like {
                field: column.clone(),
                pattern: format!("%{text}%"),
            });
        }
        if let Some(text) = &self.does_not_contain {
            conditions.push(Condition::NotLike {
                field: column.clone(),
                pattern: format!("%{text}%"),
            });
        }
        conditions
    }
}

impl<T: fmt::Debug> fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only the present components, like the request parameters that built it
        let mut out = f.debug_struct("Filter");
        if let Some(v) = &self.equals {
            out.field("equals", v);
        }
        if let Some(v) = &self.not_equals {
            out.field("notEquals", v);
        }
        if let Some(v) = &self.in_values {
            out.field("in", v);
        }
        if let Some(v) = &self.not_in {
            out.field("notIn", v);
        }
        if let Some(v) = &self.specified {
            out.field("specified", v);
        }
        if let Some(v) = &self.greater_than {
            out.field("greaterThan", v);
        }
        if let Some(v) = &self.greater_than_or_equal {
            out.field("greaterThanOrEqual", v);
        }
        if let Some(v) = &self.less_than {
            out.field("lessThan", v);
        }
        if let Some(v) = &self.less_than_or_equal {
            out.field("lessThanOrEqual", v);
        }
        if let Some(v) = &self.contains {
            out.field("contains", v);
        }
        if let Some(v) = &self.does_not_contain {
            out.field("doesNotContain", v);
        }
        out.finish()
    }
}
