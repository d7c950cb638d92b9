use std::io::Write;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::{
    deserialize::{self, FromSql, FromSqlRow},
    expression::AsExpression,
    pg::{Pg, PgValue},
    prelude::*,
    serialize::{self, IsNull, Output, ToSql},
    sql_types,
};
use uuid::Uuid;

use crate::schema::{
    customer_addresses, menu_items, order_items, orders, payment_methods, payments, vendors,
};

#[derive(FromSqlRow, AsExpression, PartialEq, Eq, Copy, Clone, Debug)]
#[diesel(sql_type = sql_types::Text)]
pub enum VendorStatus {
    PendingApproval,
    Active,
    Suspended,
}

impl VendorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VendorStatus::PendingApproval => "pending_approval",
            VendorStatus::Active => "active",
            VendorStatus::Suspended => "suspended",
        }
    }
}

impl FromStr for VendorStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending_approval" => Ok(VendorStatus::PendingApproval),
            "active" => Ok(VendorStatus::Active),
            "suspended" => Ok(VendorStatus::Suspended),
            _ => Err(()),
        }
    }
}

impl ToSql<sql_types::Text, Pg> for VendorStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<sql_types::Text, Pg> for VendorStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"pending_approval" => Ok(VendorStatus::PendingApproval),
            b"active" => Ok(VendorStatus::Active),
            b"suspended" => Ok(VendorStatus::Suspended),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

/// Lifecycle of an order. `pending` is set at creation; `completed` and
/// `cancelled` are terminal in normal operation.
#[derive(FromSqlRow, AsExpression, PartialEq, Eq, Copy, Clone, Debug)]
#[diesel(sql_type = sql_types::Text)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    OutForDelivery,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "preparing" => Ok(OrderStatus::Preparing),
            "out_for_delivery" => Ok(OrderStatus::OutForDelivery),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(()),
        }
    }
}

impl ToSql<sql_types::Text, Pg> for OrderStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<sql_types::Text, Pg> for OrderStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"pending" => Ok(OrderStatus::Pending),
            b"confirmed" => Ok(OrderStatus::Confirmed),
            b"preparing" => Ok(OrderStatus::Preparing),
            b"out_for_delivery" => Ok(OrderStatus::OutForDelivery),
            b"completed" => Ok(OrderStatus::Completed),
            b"cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

#[derive(FromSqlRow, AsExpression, PartialEq, Eq, Copy, Clone, Debug)]
#[diesel(sql_type = sql_types::Text)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            "failed" => Ok(PaymentStatus::Failed),
            "refunded" => Ok(PaymentStatus::Refunded),
            _ => Err(()),
        }
    }
}

impl ToSql<sql_types::Text, Pg> for PaymentStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<sql_types::Text, Pg> for PaymentStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"pending" => Ok(PaymentStatus::Pending),
            b"paid" => Ok(PaymentStatus::Paid),
            b"failed" => Ok(PaymentStatus::Failed),
            b"refunded" => Ok(PaymentStatus::Refunded),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

#[derive(Queryable, Selectable, Identifiable, Debug, PartialEq, Clone)]
#[diesel(table_name = vendors)]
pub struct Vendor {
    pub id: i32,
    pub user_id: Uuid,
    pub business_name: String,
    pub business_description: Option<String>,
    pub support_phone: Option<String>,
    pub status: VendorStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = vendors)]
pub struct NewVendor {
    pub user_id: Uuid,
    pub business_name: String,
    pub business_description: Option<String>,
    pub support_phone: Option<String>,
    pub status: VendorStatus,
}

#[derive(Queryable, Selectable, Identifiable, Debug, PartialEq, Clone)]
#[diesel(table_name = customer_addresses)]
pub struct CustomerAddress {
    pub id: i32,
    pub user_id: Uuid,
    pub recipient_name: String,
    pub address_line1: String,
    pub city: String,
    pub postal_code: String,
    pub delivery_instructions: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = customer_addresses)]
pub struct NewCustomerAddress {
    pub user_id: Uuid,
    pub recipient_name: String,
    pub address_line1: String,
    pub city: String,
    pub postal_code: String,
    pub delivery_instructions: Option<String>,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, PartialEq, Clone)]
#[diesel(belongs_to(Vendor))]
#[diesel(table_name = menu_items)]
pub struct MenuItem {
    pub id: i32,
    pub vendor_id: i32,
    pub item_name: String,
    pub description: Option<String>,
    pub unit_price: BigDecimal,
    pub is_available: bool,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = menu_items)]
pub struct NewMenuItem {
    pub vendor_id: i32,
    pub item_name: String,
    pub description: Option<String>,
    pub unit_price: BigDecimal,
    pub is_available: bool,
    pub image_url: Option<String>,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, PartialEq, Clone)]
#[diesel(belongs_to(Vendor))]
#[diesel(table_name = orders)]
pub struct Order {
    pub id: i32,
    pub customer_id: Uuid,
    pub vendor_id: i32,
    pub delivery_address_id: i32,
    pub order_status: OrderStatus,
    pub total_amount: BigDecimal,
    pub placed_at: DateTime<Utc>,
    pub required_delivery_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = orders)]
pub struct NewOrder {
    pub customer_id: Uuid,
    pub vendor_id: i32,
    pub delivery_address_id: i32,
    pub order_status: OrderStatus,
    pub total_amount: BigDecimal,
    pub required_delivery_time: Option<DateTime<Utc>>,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, PartialEq, Clone)]
#[diesel(belongs_to(Order))]
#[diesel(table_name = order_items)]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub menu_item_id: i32,
    pub quantity: i32,
    pub unit_price_snapshot: BigDecimal,
    pub special_requests: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = order_items)]
pub struct NewOrderItem {
    pub order_id: i32,
    pub menu_item_id: i32,
    pub quantity: i32,
    pub unit_price_snapshot: BigDecimal,
    pub special_requests: Option<String>,
}

#[derive(Queryable, Selectable, Identifiable, Debug, PartialEq, Clone)]
#[diesel(table_name = payment_methods)]
pub struct PaymentMethod {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, PartialEq, Clone)]
#[diesel(belongs_to(Order))]
#[diesel(table_name = payments)]
pub struct Payment {
    pub id: i32,
    pub order_id: i32,
    pub payment_method_id: i32,
    pub amount: BigDecimal,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = payments)]
pub struct NewPayment {
    pub order_id: i32,
    pub payment_method_id: i32,
    pub amount: BigDecimal,
    pub payment_status: PaymentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_status_parses_wire_values() {
        assert_eq!(
            "out_for_delivery".parse::<OrderStatus>(),
            Ok(OrderStatus::OutForDelivery)
        );
        assert_eq!("cancelled".parse::<OrderStatus>(), Ok(OrderStatus::Cancelled));
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn vendor_status_defaults_to_snake_case_wire_format() {
        assert_eq!(VendorStatus::PendingApproval.as_str(), "pending_approval");
        assert_eq!(
            "pending_approval".parse::<VendorStatus>(),
            Ok(VendorStatus::PendingApproval)
        );
    }
}
