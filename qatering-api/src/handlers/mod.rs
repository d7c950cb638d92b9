pub mod address;
pub mod menu_item;
pub mod order;
pub mod payment;
pub mod vendor;

// Re-export routers for easier importing
pub use address::router as address_router;
pub use menu_item::router as menu_item_router;
pub use order::router as order_router;
pub use payment::router as payment_router;
pub use vendor::router as vendor_router;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::ApiError;

/// Role claim supplied by the identity collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Customer,
    Vendor,
}

/// The authenticated identity for a request. Session issuance lives in the
/// upstream auth layer, which terminates authentication and forwards the
/// resolved identity as trusted headers; requests without them never reach
/// the workflow.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: Role,
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("x-user-id")
            .ok_or(ApiError::AuthenticationFailed)?
            .to_str()
            .map_err(|_| ApiError::AuthenticationFailed)?
            .parse::<Uuid>()
            .map_err(|_| ApiError::AuthenticationFailed)?;

        let role = match parts.headers.get("x-user-role").map(|v| v.to_str()) {
            Some(Ok("vendor")) => Role::Vendor,
            Some(Ok("customer")) | None => Role::Customer,
            _ => return Err(ApiError::AuthenticationFailed),
        };

        Ok(Identity { user_id, role })
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        vendor::create_vendor,
        vendor::list_vendors,
        vendor::get_vendor,
        vendor::update_vendor,
        menu_item::create_menu_item,
        menu_item::list_menu_items,
        menu_item::get_menu_item,
        menu_item::update_menu_item,
        menu_item::delete_menu_item,
        address::create_address,
        address::list_addresses,
        payment::list_payment_methods,
        order::create_order,
        order::list_orders,
        order::get_order,
        order::update_order_status,
    ),
    components(
        schemas(
            crate::models::CreateVendorRequest,
            crate::models::CreateVendorResponse,
            crate::models::UpdateVendorRequest,
            crate::models::VendorResponse,
            crate::models::ListVendorsResponse,
            crate::models::CreateMenuItemRequest,
            crate::models::CreateMenuItemResponse,
            crate::models::UpdateMenuItemRequest,
            crate::models::MenuItemResponse,
            crate::models::ListMenuItemsResponse,
            crate::models::CreateAddressRequest,
            crate::models::CreateAddressResponse,
            crate::models::AddressResponse,
            crate::models::ListAddressesResponse,
            crate::models::PaymentMethodResponse,
            crate::models::ListPaymentMethodsResponse,
            crate::models::OrderItemRequest,
            crate::models::CreateOrderRequest,
            crate::models::CreateOrderResponse,
            crate::models::OrderLineResponse,
            crate::models::PaymentResponse,
            crate::models::OrderResponse,
            crate::models::ListOrdersResponse,
            crate::models::UpdateOrderStatusRequest,
            crate::models::SuccessResponse,
            crate::models::ApiErrorResponse
        )
    ),
    tags(
        (name = "vendors", description = "Vendor profile endpoints"),
        (name = "menu-items", description = "Menu item catalog endpoints"),
        (name = "addresses", description = "Customer delivery address endpoints"),
        (name = "payment-methods", description = "Payment method reference data"),
        (name = "orders", description = "Order placement and fulfillment endpoints")
    ),
    info(
        title = "Qatering API",
        description = "Catering marketplace order workflow API",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;
