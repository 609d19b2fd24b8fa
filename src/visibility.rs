//! # Visibility Policy
//!
//! Administrators see every row. Any other caller is restricted to rows owned by
//! their own customer profile: before compilation the ownership filter of the
//! criteria is overwritten with `equals = customer_id`, whatever the caller sent
//! for that field.
//!
//! The caller's identity is always passed in explicitly; nothing here reads
//! ambient or global state.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::compiler::compile;
use crate::criteria::{Criteria, CustomerCriteria};
use crate::error::{Result, StorefrontError};
use crate::filter::LongFilter;
use crate::models::Customer;
use crate::query_builder::PageRequest;
use crate::storage::Storage;

/// Identity of the caller, supplied by the authentication layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    /// Identifier of the caller's account (`app_user.id`)
    pub account_id: i64,
    pub admin: bool,
}

impl CallerIdentity {
    pub fn admin(account_id: i64) -> Self {
        Self {
            account_id,
            admin: true,
        }
    }

    pub fn user(account_id: i64) -> Self {
        Self {
            account_id,
            admin: false,
        }
    }
}

/// Per-request visibility, resolved once per call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisibilityContext {
    Privileged,
    Restricted(i64),
}

impl VisibilityContext {
    pub fn is_privileged(&self) -> bool {
        matches!(self, VisibilityContext::Privileged)
    }

    /// Customer the caller is restricted to, if any
    pub fn customer_id(&self) -> Option<i64> {
        match self {
            VisibilityContext::Privileged => None,
            VisibilityContext::Restricted(customer_id) => Some(*customer_id),
        }
    }
}

impl fmt::Display for VisibilityContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisibilityContext::Privileged => write!(f, "privileged"),
            VisibilityContext::Restricted(customer_id) => write!(f, "restricted({customer_id})"),
        }
    }
}

pub struct VisibilityPolicy;

impl VisibilityPolicy {
    /// Resolve the caller's visibility; a non-admin without a linked customer
    /// profile is `NotFound`
    pub async fn resolve<S: Storage>(
        identity: &CallerIdentity,
        storage: &S,
    ) -> Result<VisibilityContext> {
        if identity.admin {
            return Ok(VisibilityContext::Privileged);
        }

        let linked = CustomerCriteria {
            user_id: Some(LongFilter::default().equal_to(identity.account_id)),
            ..Default::default()
        };
        let predicate = compile(Some(&linked))?;
        let first = storage
            .find_page(&predicate, &PageRequest::of(0, 1))
            .await?
            .content
            .into_iter()
            .next();

        let customer = match first {
            Some(candidate) => storage.find_by_id::<Customer>(candidate.id).await?,
            None => None,
        };

        match customer {
            Some(customer) => {
                tracing::debug!(
                    account_id = identity.account_id,
                    customer_id = customer.id,
                    "resolved restricted visibility"
                );
                Ok(VisibilityContext::Restricted(customer.id))
            }
            None => Err(StorefrontError::not_found(format!(
                "no customer profile linked to account {}",
                identity.account_id
            ))),
        }
    }

    /// Criteria to compile for the caller: unchanged when privileged, otherwise a
    /// copy with the ownership filter forced to the caller's customer
    pub fn apply<C: Criteria>(context: &VisibilityContext, criteria: Option<&C>) -> Option<C> {
        match context {
            VisibilityContext::Privileged => criteria.cloned(),
            VisibilityContext::Restricted(customer_id) => {
                let restricted = criteria.cloned().unwrap_or_default().with_owner(*customer_id);
                tracing::debug!(
                    owner_field = C::OWNER_FIELD,
                    customer_id = *customer_id,
                    "applied ownership restriction"
                );
                Some(restricted)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::{InvoiceCriteria, ProductOrderCriteria};
    use crate::filter::StringFilter;

    #[test]
    fn test_privileged_passes_criteria_through() {
        let criteria = InvoiceCriteria {
            code: Some(StringFilter::default().equal_to("INV-1".to_string())),
            ..Default::default()
        };
        let applied = VisibilityPolicy::apply(&VisibilityContext::Privileged, Some(&criteria));
        assert_eq!(applied, Some(criteria));

        let none = VisibilityPolicy::apply::<InvoiceCriteria>(&VisibilityContext::Privileged, None);
        assert_eq!(none, None);
    }

    #[test]
    fn test_restricted_overrides_caller_owner_filter() {
        let criteria = ProductOrderCriteria {
            customer_id: Some(LongFilter::default().equal_to(99)),
            ..Default::default()
        };
        let applied =
            VisibilityPolicy::apply(&VisibilityContext::Restricted(7), Some(&criteria)).unwrap();

        assert_eq!(applied.customer_id, Some(LongFilter::default().equal_to(7)));
        // the caller's aggregate is untouched
        assert_eq!(criteria.customer_id, Some(LongFilter::default().equal_to(99)));
    }

    #[test]
    fn test_restricted_without_criteria_still_restricts() {
        let applied =
            VisibilityPolicy::apply::<CustomerCriteria>(&VisibilityContext::Restricted(3), None)
                .unwrap();
        assert_eq!(applied.id, Some(LongFilter::default().equal_to(3)));
    }

    #[test]
    fn test_context_accessors() {
        assert!(VisibilityContext::Privileged.is_privileged());
        assert_eq!(VisibilityContext::Restricted(4).customer_id(), Some(4));
        assert_eq!(VisibilityContext::Restricted(4).to_string(), "restricted(4)");
        assert!(!CallerIdentity::user(1).admin);
    }
}
