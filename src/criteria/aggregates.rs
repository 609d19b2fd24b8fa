use crate::constants::{Gender, InvoiceStatus, OrderItemStatus, OrderStatus, PaymentMethod};
use crate::filter::{BigDecimalFilter, Filter, InstantFilter, IntegerFilter, LongFilter, StringFilter};
use crate::models::{Customer, Invoice, OrderItem, ProductOrder, Shipment};

criteria! {
    /// Filters for [`Customer`] queries; a customer owns itself
    CustomerCriteria for Customer, owner id {
        id: LongFilter,
        first_name: StringFilter,
        last_name: StringFilter,
        gender: Filter<Gender>,
        email: StringFilter,
        phone: StringFilter,
        address_line_1: StringFilter,
        address_line_2: StringFilter,
        city: StringFilter,
        country: StringFilter,
        user_id: LongFilter,
        order_id: LongFilter,
    }
}

criteria! {
    /// Filters for [`ProductOrder`] queries
    ProductOrderCriteria for ProductOrder, owner customer_id {
        id: LongFilter,
        placed_date: InstantFilter,
        status: Filter<OrderStatus>,
        code: StringFilter,
        order_item_id: LongFilter,
        invoice_id: LongFilter,
        customer_id: LongFilter,
    }
}

criteria! {
    /// Filters for [`OrderItem`] queries; ownership follows `order -> customer`
    OrderItemCriteria for OrderItem, owner customer_id {
        id: LongFilter,
        quantity: IntegerFilter,
        total_price: BigDecimalFilter,
        status: Filter<OrderItemStatus>,
        product_id: LongFilter,
        order_id: LongFilter,
        customer_id: LongFilter,
    }
}

criteria! {
    /// Filters for [`Invoice`] queries; ownership follows `order -> customer`
    InvoiceCriteria for Invoice, owner customer_id {
        id: LongFilter,
        code: StringFilter,
        date: InstantFilter,
        details: StringFilter,
        status: Filter<InvoiceStatus>,
        payment_method: Filter<PaymentMethod>,
        payment_date: InstantFilter,
        payment_amount: BigDecimalFilter,
        shipment_id: LongFilter,
        order_id: LongFilter,
        customer_id: LongFilter,
    }
}

criteria! {
    /// Filters for [`Shipment`] queries; ownership follows `invoice -> order -> customer`
    ShipmentCriteria for Shipment, owner customer_id {
        id: LongFilter,
        tracking_code: StringFilter,
        date: InstantFilter,
        details: StringFilter,
        invoice_id: LongFilter,
        customer_id: LongFilter,
    }
}
