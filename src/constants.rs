//! # Storefront Constants
//!
//! Enumerated column types of the storefront schema. Every enumeration is stored
//! as upper snake case text, filtered with equality/membership filters only, and
//! converted to and from [`Value`] for predicate evaluation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, StorefrontError};
use crate::filter::FilterValue;
use crate::query_builder::{FromValue, Value};

macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = StorefrontError;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(StorefrontError::validation(format!(
                        "unknown {} value '{}'",
                        stringify!($name),
                        other
                    ))),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = StorefrontError;

            fn try_from(value: String) -> Result<Self> {
                value.parse()
            }
        }

        impl From<$name> for Value {
            fn from(value: $name) -> Self {
                Value::Text(value.as_str().to_string())
            }
        }

        impl FromValue for $name {
            fn from_value(value: &Value) -> Option<Self> {
                value.as_str().and_then(|text| text.parse().ok())
            }
        }

        impl FilterValue for $name {
            const ORDERED: bool = false;

            fn to_value(&self) -> Value {
                Value::from(*self)
            }

            fn parse_param(raw: &str) -> std::result::Result<Self, String> {
                raw.trim().parse().map_err(|e: StorefrontError| e.to_string())
            }
        }
    };
}

text_enum! {
    /// Customer gender
    Gender {
        Male => "MALE",
        Female => "FEMALE",
        Other => "OTHER",
    }
}

text_enum! {
    /// Lifecycle of a product order
    OrderStatus {
        Completed => "COMPLETED",
        Pending => "PENDING",
        Cancelled => "CANCELLED",
    }
}

text_enum! {
    /// Stock state of a single order line
    OrderItemStatus {
        Available => "AVAILABLE",
        OutOfStock => "OUT_OF_STOCK",
        BackOrder => "BACK_ORDER",
    }
}

text_enum! {
    InvoiceStatus {
        Paid => "PAID",
        Issued => "ISSUED",
        Cancelled => "CANCELLED",
    }
}

text_enum! {
    PaymentMethod {
        CreditCard => "CREDIT_CARD",
        CashOnDelivery => "CASH_ON_DELIVERY",
        Paypal => "PAYPAL",
    }
}

text_enum! {
    /// Product size
    Size {
        S => "S",
        M => "M",
        L => "L",
        Xl => "XL",
        Xxl => "XXL",
    }
}

impl OrderStatus {
    /// Check if the order can no longer change
    pub fn is_final(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }
}

impl InvoiceStatus {
    pub fn is_settled(&self) -> bool {
        matches!(self, InvoiceStatus::Paid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_round_trip_through_from_str() {
        for status in OrderItemStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderItemStatus>().unwrap(), *status);
        }
        assert_eq!(OrderItemStatus::OutOfStock.to_string(), "OUT_OF_STOCK");
    }

    #[test]
    fn test_unknown_value_is_validation_error() {
        let err = "SHIPPED".parse::<OrderStatus>().unwrap_err();
        assert_eq!(
            err,
            StorefrontError::Validation("unknown OrderStatus value 'SHIPPED'".to_string())
        );
    }

    #[test]
    fn test_serde_uses_stored_text() {
        let json = serde_json::to_string(&PaymentMethod::CashOnDelivery).unwrap();
        assert_eq!(json, "\"CASH_ON_DELIVERY\"");
        let parsed: PaymentMethod = serde_json::from_str("\"PAYPAL\"").unwrap();
        assert_eq!(parsed, PaymentMethod::Paypal);
    }

    #[test]
    fn test_value_conversion() {
        assert_eq!(Value::from(Gender::Female), Value::Text("FEMALE".to_string()));
        assert_eq!(
            InvoiceStatus::from_value(&Value::from("ISSUED")),
            Some(InvoiceStatus::Issued)
        );
        assert_eq!(InvoiceStatus::from_value(&Value::Null), None);
        assert!(OrderStatus::Cancelled.is_final());
        assert!(!InvoiceStatus::Issued.is_settled());
    }
}
