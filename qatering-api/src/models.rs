use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use qatering_service::models::{CustomerAddress, MenuItem, PaymentMethod, Vendor};
use qatering_service::orders::OrderWithLines;

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Error message
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateVendorRequest {
    /// Business name shown to customers
    pub business_name: String,
    pub business_description: Option<String>,
    pub support_phone: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateVendorResponse {
    /// Id of the new vendor profile
    pub id: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateVendorRequest {
    pub business_name: Option<String>,
    pub business_description: Option<String>,
    pub support_phone: Option<String>,
    /// One of: pending_approval, active, suspended
    pub status: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VendorResponse {
    pub id: i32,
    pub business_name: String,
    pub business_description: Option<String>,
    pub support_phone: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<Vendor> for VendorResponse {
    fn from(v: Vendor) -> Self {
        VendorResponse {
            id: v.id,
            business_name: v.business_name,
            business_description: v.business_description,
            support_phone: v.support_phone,
            status: v.status.as_str().to_string(),
            created_at: v.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListVendorsResponse {
    pub items: Vec<VendorResponse>,
    /// Pass back as `cursor` to fetch the next page
    pub next_cursor: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateMenuItemRequest {
    pub item_name: String,
    pub description: Option<String>,
    /// Exact decimal price, e.g. "25000.00"
    pub unit_price: String,
    pub image_url: Option<String>,
    /// Defaults to true
    pub is_available: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateMenuItemResponse {
    pub id: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateMenuItemRequest {
    pub item_name: Option<String>,
    pub description: Option<String>,
    pub unit_price: Option<String>,
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MenuItemResponse {
    pub id: i32,
    pub vendor_id: i32,
    pub item_name: String,
    pub description: Option<String>,
    /// Price as an exact decimal string
    pub unit_price: String,
    pub is_available: bool,
    pub image_url: Option<String>,
}

impl From<MenuItem> for MenuItemResponse {
    fn from(m: MenuItem) -> Self {
        MenuItemResponse {
            id: m.id,
            vendor_id: m.vendor_id,
            item_name: m.item_name,
            description: m.description,
            unit_price: m.unit_price.to_string(),
            is_available: m.is_available,
            image_url: m.image_url,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListMenuItemsResponse {
    pub items: Vec<MenuItemResponse>,
    pub next_cursor: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateAddressRequest {
    pub recipient_name: String,
    pub address_line1: String,
    pub city: String,
    pub postal_code: String,
    pub delivery_instructions: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateAddressResponse {
    pub id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AddressResponse {
    pub id: i32,
    pub recipient_name: String,
    pub address_line1: String,
    pub city: String,
    pub postal_code: String,
    pub delivery_instructions: Option<String>,
}

impl From<CustomerAddress> for AddressResponse {
    fn from(a: CustomerAddress) -> Self {
        AddressResponse {
            id: a.id,
            recipient_name: a.recipient_name,
            address_line1: a.address_line1,
            city: a.city,
            postal_code: a.postal_code,
            delivery_instructions: a.delivery_instructions,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListAddressesResponse {
    pub items: Vec<AddressResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentMethodResponse {
    pub id: i32,
    pub code: String,
    pub name: String,
}

impl From<PaymentMethod> for PaymentMethodResponse {
    fn from(m: PaymentMethod) -> Self {
        PaymentMethodResponse {
            id: m.id,
            code: m.code,
            name: m.name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListPaymentMethodsResponse {
    pub items: Vec<PaymentMethodResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderItemRequest {
    pub menu_item_id: i32,
    /// Must be at least 1
    pub quantity: i32,
    pub special_requests: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub vendor_id: i32,
    pub delivery_address_id: i32,
    pub payment_method_id: i32,
    pub required_delivery_time: Option<DateTime<Utc>>,
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateOrderResponse {
    /// Id of the committed order
    pub order_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderLineResponse {
    pub menu_item_id: i32,
    pub item_name: String,
    pub quantity: i32,
    /// Unit price captured at order time, immune to later catalog changes
    pub unit_price_snapshot: String,
    pub special_requests: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentResponse {
    pub payment_method_id: i32,
    pub amount: String,
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: i32,
    pub customer_id: Uuid,
    pub vendor_id: i32,
    pub delivery_address_id: i32,
    pub status: String,
    pub total_amount: String,
    pub placed_at: DateTime<Utc>,
    pub required_delivery_time: Option<DateTime<Utc>>,
    pub items: Vec<OrderLineResponse>,
    pub payment: PaymentResponse,
}

impl From<OrderWithLines> for OrderResponse {
    fn from(o: OrderWithLines) -> Self {
        OrderResponse {
            id: o.order.id,
            customer_id: o.order.customer_id,
            vendor_id: o.order.vendor_id,
            delivery_address_id: o.order.delivery_address_id,
            status: o.order.order_status.as_str().to_string(),
            total_amount: o.order.total_amount.to_string(),
            placed_at: o.order.placed_at,
            required_delivery_time: o.order.required_delivery_time,
            items: o
                .items
                .into_iter()
                .map(|(line, menu_item)| OrderLineResponse {
                    menu_item_id: line.menu_item_id,
                    item_name: menu_item.item_name,
                    quantity: line.quantity,
                    unit_price_snapshot: line.unit_price_snapshot.to_string(),
                    special_requests: line.special_requests,
                })
                .collect(),
            payment: PaymentResponse {
                payment_method_id: o.payment.payment_method_id,
                amount: o.payment.amount.to_string(),
                status: o.payment.payment_status.as_str().to_string(),
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListOrdersResponse {
    pub items: Vec<OrderResponse>,
    pub next_cursor: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    /// One of: pending, confirmed, preparing, out_for_delivery, completed,
    /// cancelled
    pub status: String,
}
