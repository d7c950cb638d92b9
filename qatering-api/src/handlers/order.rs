use axum::{
    Router,
    extract::{Path, Query},
    response::Json,
    routing::{get, post, put},
};
use serde::Deserialize;
use tracing::instrument;

use qatering_service::error::ServiceError;
use qatering_service::models::OrderStatus;
use qatering_service::orders::{self, ListRole};
use qatering_service::establish_connection;

use crate::error::ApiError;
use crate::models::*;

use super::{Identity, Role};

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    /// View to list: "customer" (own orders) or "vendor" (orders against the
    /// acting identity's vendor profile). Defaults to the identity's role
    /// claim.
    pub role: Option<String>,
    pub status: Option<String>,
    pub cursor: Option<i32>,
    pub limit: Option<i64>,
}

pub fn router() -> Router {
    Router::new()
        .route("/orders", post(create_order).get(list_orders))
        .route("/orders/{id}", get(get_order))
        .route("/orders/{id}/status", put(update_order_status))
}

fn parse_status(raw: &str) -> Result<OrderStatus, ApiError> {
    raw.parse::<OrderStatus>()
        .map_err(|_| ServiceError::InvalidRequest(format!("invalid order status: {raw}")).into())
}

#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order committed", body = CreateOrderResponse),
        (status = 400, description = "Invalid order input", body = ApiErrorResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
    ),
    tag = "orders"
)]
#[instrument(skip(payload))]
pub async fn create_order(
    identity: Identity,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<Json<CreateOrderResponse>, ApiError> {
    let conn = &mut establish_connection();

    let order_id = orders::place_order(
        conn,
        identity.user_id,
        orders::PlaceOrder {
            vendor_id: payload.vendor_id,
            delivery_address_id: payload.delivery_address_id,
            payment_method_id: payload.payment_method_id,
            required_delivery_time: payload.required_delivery_time,
            items: payload
                .items
                .into_iter()
                .map(|item| orders::OrderLineRequest {
                    menu_item_id: item.menu_item_id,
                    quantity: item.quantity,
                    special_requests: item.special_requests,
                })
                .collect(),
        },
    )?;

    Ok(Json(CreateOrderResponse { order_id }))
}

#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "Paginated order listing, most recent first", body = ListOrdersResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 403, description = "Vendor view without a vendor profile", body = ApiErrorResponse),
    ),
    params(
        ("role" = Option<String>, Query, description = "customer or vendor view"),
        ("status" = Option<String>, Query, description = "Exact order status filter"),
        ("cursor" = Option<i32>, Query, description = "Return orders with id less than this"),
        ("limit" = Option<i64>, Query, description = "Page size, at most 100"),
    ),
    tag = "orders"
)]
#[instrument]
pub async fn list_orders(
    identity: Identity,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<ListOrdersResponse>, ApiError> {
    let role = match query.role.as_deref() {
        Some("vendor") => ListRole::Vendor,
        Some("customer") => ListRole::Customer,
        Some(other) => {
            return Err(
                ServiceError::InvalidRequest(format!("invalid role: {other}")).into(),
            );
        }
        None => match identity.role {
            Role::Vendor => ListRole::Vendor,
            Role::Customer => ListRole::Customer,
        },
    };
    let status = query.status.as_deref().map(parse_status).transpose()?;

    let conn = &mut establish_connection();

    let page = orders::list_orders(
        conn,
        identity.user_id,
        role,
        status,
        query.cursor,
        query.limit,
    )?;

    Ok(Json(ListOrdersResponse {
        items: page.items.into_iter().map(OrderResponse::from).collect(),
        next_cursor: page.next_cursor,
    }))
}

#[utoipa::path(
    get,
    path = "/orders/{id}",
    responses(
        (status = 200, description = "Order with lines and payment", body = OrderResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 403, description = "Neither the customer nor the owning vendor", body = ApiErrorResponse),
        (status = 404, description = "Order not found", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Order id")
    ),
    tag = "orders"
)]
#[instrument]
pub async fn get_order(
    identity: Identity,
    Path(id): Path<i32>,
) -> Result<Json<OrderResponse>, ApiError> {
    let conn = &mut establish_connection();

    let order = orders::get_order(conn, identity.user_id, id)?;

    Ok(Json(order.into()))
}

#[utoipa::path(
    put,
    path = "/orders/{id}/status",
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status persisted", body = SuccessResponse),
        (status = 400, description = "Unknown status value", body = ApiErrorResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 403, description = "Not the owning vendor", body = ApiErrorResponse),
        (status = 404, description = "Order not found", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Order id")
    ),
    tag = "orders"
)]
#[instrument(skip(payload))]
pub async fn update_order_status(
    identity: Identity,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let status = parse_status(&payload.status)?;

    let conn = &mut establish_connection();

    orders::update_status(conn, identity.user_id, id, status)?;

    Ok(Json(SuccessResponse { success: true }))
}
