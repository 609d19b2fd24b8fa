//! # Criteria Aggregates
//!
//! One aggregate per queryable entity: an optional [`Filter`](crate::filter::Filter)
//! per own scalar field plus one identifier filter per related entity reachable by a
//! join. Absent filters are `None`; a `Clone` of an aggregate owns its filters.
//!
//! Aggregates are usually bound from flat `field.operator=value` request
//! parameters:
//!
//! ```rust,ignore
//! let criteria = InvoiceCriteria::from_query_string("code.contains=INV&customerId.equals=7")?;
//! ```

pub use aggregates::{
    CustomerCriteria, InvoiceCriteria, OrderItemCriteria, ProductOrderCriteria, ShipmentCriteria,
};

use crate::error::{Result, StorefrontError};
use crate::filter::FieldFilter;
use crate::models::Entity;

/// Request keys that carry paging rather than filtering
const NON_FILTER_PARAMS: &[&str] = &["page", "size", "sort"];

/// Per-entity filter aggregate consumed by the predicate compiler
pub trait Criteria: Clone + Default + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    type Entity: Entity;

    /// Identifier field that scopes rows to one customer
    const OWNER_FIELD: &'static str;

    /// Present filters keyed by schema field name, in declaration order
    fn filters(&self) -> Vec<(&'static str, &dyn FieldFilter)>;

    /// Copy with the ownership filter replaced by `equals = customer_id`
    fn with_owner(&self, customer_id: i64) -> Self;

    /// Criteria selecting a single row by identifier
    fn by_id(id: i64) -> Self;

    /// Bind one `field.operator=value` parameter; `field` is the snake_case name
    fn apply_param(&mut self, field: &str, operator: &str, raw: &str) -> Result<()>;

    fn is_empty(&self) -> bool {
        self.filters().iter().all(|(_, filter)| filter.is_empty())
    }

    /// Bind decoded request parameters. Keys without an operator are not filters
    /// and are skipped.
    fn from_query_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut criteria = Self::default();
        for (key, raw) in pairs {
            let Some((field, operator)) = key.split_once('.') else {
                if !NON_FILTER_PARAMS.contains(&key) {
                    tracing::debug!(parameter = key, "ignoring non-filter request parameter");
                }
                continue;
            };
            criteria.apply_param(&snake_case(field), operator, raw)?;
        }
        Ok(criteria)
    }

    /// Bind an `application/x-www-form-urlencoded` query string
    fn from_query_string(query: &str) -> Result<Self> {
        let mut pairs = Vec::new();
        for part in query.trim_start_matches('?').split('&') {
            if part.is_empty() {
                continue;
            }
            let (key, raw) = part.split_once('=').unwrap_or((part, ""));
            pairs.push((decode_component(key)?, decode_component(raw)?));
        }
        Self::from_query_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}

fn decode_component(raw: &str) -> Result<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| StorefrontError::validation(format!("malformed query parameter '{raw}': {e}")))
}

/// `addressLine1` -> `address_line_1`, `orderItemId` -> `order_item_id`
pub fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut previous: Option<char> = None;
    for c in name.chars() {
        let boundary = match previous {
            Some(p) if c.is_ascii_uppercase() => p != '_',
            Some(p) if c.is_ascii_digit() => p.is_ascii_alphabetic(),
            _ => false,
        };
        if boundary {
            out.push('_');
        }
        out.push(c.to_ascii_lowercase());
        previous = Some(c);
    }
    out
}

/// Declares a criteria aggregate: one public `Option<Filter>` per field and the
/// [`Criteria`] impl over them. The owner field must be a `LongFilter`.
macro_rules! criteria {
    (
        $(#[$meta:meta])*
        $name:ident for $entity:ty, owner $owner:ident {
            $($field:ident: $filter:ty),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            $(pub $field: Option<$filter>,)+
        }

        impl $crate::criteria::Criteria for $name {
            type Entity = $entity;

            const OWNER_FIELD: &'static str = stringify!($owner);

            fn filters(&self) -> Vec<(&'static str, &dyn $crate::filter::FieldFilter)> {
                let mut filters: Vec<(&'static str, &dyn $crate::filter::FieldFilter)> =
                    Vec::new();
                $(
                    if let Some(filter) = &self.$field {
                        filters.push((stringify!($field), filter as &dyn $crate::filter::FieldFilter));
                    }
                )+
                filters
            }

            fn with_owner(&self, customer_id: i64) -> Self {
                let mut restricted = self.clone();
                restricted.$owner = Some($crate::filter::LongFilter::default().equal_to(customer_id));
                restricted
            }

            fn by_id(id: i64) -> Self {
                Self {
                    id: Some($crate::filter::LongFilter::default().equal_to(id)),
                    ..Self::default()
                }
            }

            fn apply_param(
                &mut self,
                field: &str,
                operator: &str,
                raw: &str,
            ) -> $crate::error::Result<()> {
                match field {
                    $(
                        stringify!($field) => self
                            .$field
                            .get_or_insert_with(Default::default)
                            .apply_param(operator, raw),
                    )+
                    other => Err($crate::error::StorefrontError::validation(format!(
                        "unknown filter field '{}' for {}",
                        other,
                        stringify!($name)
                    ))),
                }
            }
        }
    };
}

mod aggregates;
