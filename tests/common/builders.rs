//! Entity builders with plausible defaults

use bigdecimal::BigDecimal;
use chrono::{DateTime, Duration, TimeZone, Utc};
use storefront_query::constants::{
    Gender, InvoiceStatus, OrderItemStatus, OrderStatus, PaymentMethod, Size,
};
use storefront_query::models::{Customer, Invoice, OrderItem, Product, ProductOrder, Shipment, User};

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

pub fn user(id: i64, login: &str) -> User {
    User {
        id,
        login: login.to_string(),
    }
}

/// Builder for [`Customer`] rows
pub struct CustomerBuilder {
    customer: Customer,
}

impl CustomerBuilder {
    pub fn new(id: i64, first_name: &str, last_name: &str) -> Self {
        Self {
            customer: Customer {
                id,
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                gender: Gender::Female,
                email: format!("{}@example.com", first_name.to_lowercase()),
                phone: "555-0100".to_string(),
                address_line_1: "1 Orchard St".to_string(),
                address_line_2: None,
                city: "Concord".to_string(),
                country: "USA".to_string(),
                user_id: None,
            },
        }
    }

    pub fn account(mut self, user_id: i64) -> Self {
        self.customer.user_id = Some(user_id);
        self
    }

    pub fn city(mut self, city: &str) -> Self {
        self.customer.city = city.to_string();
        self
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.customer.gender = gender;
        self
    }

    pub fn address_line_2(mut self, line: &str) -> Self {
        self.customer.address_line_2 = Some(line.to_string());
        self
    }

    pub fn build(self) -> Customer {
        self.customer
    }
}

pub fn product(id: i64, name: &str, description: Option<&str>) -> Product {
    Product {
        id,
        name: name.to_string(),
        description: description.map(str::to_string),
        price: BigDecimal::from(id * 10),
        size: Size::M,
    }
}

pub fn order(id: i64, code: &str, customer_id: i64, status: OrderStatus) -> ProductOrder {
    ProductOrder {
        id,
        placed_date: base_time() + Duration::days(id),
        status,
        code: code.to_string(),
        customer_id,
    }
}

pub fn order_item(id: i64, order_id: i64, product_id: i64, quantity: i32) -> OrderItem {
    OrderItem {
        id,
        quantity,
        total_price: BigDecimal::from(i64::from(quantity) * product_id * 10),
        status: OrderItemStatus::Available,
        product_id,
        order_id,
    }
}

pub fn invoice(id: i64, code: &str, order_id: i64, details: Option<&str>) -> Invoice {
    Invoice {
        id,
        code: code.to_string(),
        date: base_time() + Duration::days(id),
        details: details.map(str::to_string),
        status: if details.is_some() {
            InvoiceStatus::Paid
        } else {
            InvoiceStatus::Issued
        },
        payment_method: PaymentMethod::CreditCard,
        payment_date: base_time() + Duration::days(id + 1),
        payment_amount: BigDecimal::from(100 + id),
        order_id,
    }
}

pub fn shipment(id: i64, invoice_id: i64, tracking_code: Option<&str>) -> Shipment {
    Shipment {
        id,
        tracking_code: tracking_code.map(str::to_string),
        date: base_time() + Duration::days(id),
        details: None,
        invoice_id,
    }
}
