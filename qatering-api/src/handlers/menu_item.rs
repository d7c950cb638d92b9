use axum::{
    Router,
    extract::{Path, Query},
    response::Json,
    routing::{get, post},
};
use bigdecimal::BigDecimal;
use serde::Deserialize;
use tracing::instrument;

use qatering_service::error::ServiceError;
use qatering_service::{establish_connection, menu_items};

use crate::error::ApiError;
use crate::models::*;

use super::Identity;

#[derive(Debug, Deserialize)]
pub struct ListMenuItemsQuery {
    pub vendor_id: Option<i32>,
    pub is_available: Option<bool>,
    pub search: Option<String>,
    pub cursor: Option<i32>,
    pub limit: Option<i64>,
}

pub fn router() -> Router {
    Router::new()
        .route("/menu-items", post(create_menu_item).get(list_menu_items))
        .route(
            "/menu-items/{id}",
            get(get_menu_item)
                .patch(update_menu_item)
                .delete(delete_menu_item),
        )
}

fn parse_price(raw: &str) -> Result<BigDecimal, ApiError> {
    raw.parse::<BigDecimal>()
        .map_err(|_| ServiceError::InvalidRequest(format!("invalid price: {raw}")).into())
}

#[utoipa::path(
    post,
    path = "/menu-items",
    request_body = CreateMenuItemRequest,
    responses(
        (status = 200, description = "Menu item created", body = CreateMenuItemResponse),
        (status = 400, description = "Invalid price", body = ApiErrorResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 403, description = "No vendor profile", body = ApiErrorResponse),
    ),
    tag = "menu-items"
)]
#[instrument(skip(payload))]
pub async fn create_menu_item(
    identity: Identity,
    Json(payload): Json<CreateMenuItemRequest>,
) -> Result<Json<CreateMenuItemResponse>, ApiError> {
    let unit_price = parse_price(&payload.unit_price)?;

    let conn = &mut establish_connection();

    let id = menu_items::create_menu_item(
        conn,
        identity.user_id,
        menu_items::CreateMenuItem {
            item_name: payload.item_name,
            description: payload.description,
            unit_price,
            image_url: payload.image_url,
            is_available: payload.is_available.unwrap_or(true),
        },
    )?;

    Ok(Json(CreateMenuItemResponse { id }))
}

#[utoipa::path(
    get,
    path = "/menu-items",
    responses(
        (status = 200, description = "Paginated menu item listing", body = ListMenuItemsResponse),
    ),
    params(
        ("vendor_id" = Option<i32>, Query, description = "Filter by owning vendor"),
        ("is_available" = Option<bool>, Query, description = "Filter by availability"),
        ("search" = Option<String>, Query, description = "Case-insensitive item name filter"),
        ("cursor" = Option<i32>, Query, description = "Return items with id greater than this"),
        ("limit" = Option<i64>, Query, description = "Page size, at most 100"),
    ),
    tag = "menu-items"
)]
#[instrument]
pub async fn list_menu_items(
    Query(query): Query<ListMenuItemsQuery>,
) -> Result<Json<ListMenuItemsResponse>, ApiError> {
    let conn = &mut establish_connection();

    let page = menu_items::list_menu_items(
        conn,
        menu_items::MenuItemFilter {
            vendor_id: query.vendor_id,
            is_available: query.is_available,
            search: query.search,
        },
        query.cursor,
        query.limit,
    )?;

    Ok(Json(ListMenuItemsResponse {
        items: page.items.into_iter().map(MenuItemResponse::from).collect(),
        next_cursor: page.next_cursor,
    }))
}

#[utoipa::path(
    get,
    path = "/menu-items/{id}",
    responses(
        (status = 200, description = "Menu item", body = MenuItemResponse),
        (status = 404, description = "Menu item not found", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Menu item id")
    ),
    tag = "menu-items"
)]
#[instrument]
pub async fn get_menu_item(Path(id): Path<i32>) -> Result<Json<MenuItemResponse>, ApiError> {
    let conn = &mut establish_connection();

    let item = menu_items::get_menu_item(conn, id)?;

    Ok(Json(item.into()))
}

#[utoipa::path(
    patch,
    path = "/menu-items/{id}",
    request_body = UpdateMenuItemRequest,
    responses(
        (status = 200, description = "Menu item updated", body = SuccessResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 403, description = "Not the owning vendor", body = ApiErrorResponse),
        (status = 404, description = "Menu item not found", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Menu item id")
    ),
    tag = "menu-items"
)]
#[instrument(skip(payload))]
pub async fn update_menu_item(
    identity: Identity,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateMenuItemRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let unit_price = payload
        .unit_price
        .as_deref()
        .map(parse_price)
        .transpose()?;

    let conn = &mut establish_connection();

    menu_items::update_menu_item(
        conn,
        identity.user_id,
        id,
        menu_items::MenuItemChanges {
            item_name: payload.item_name,
            description: payload.description,
            unit_price,
            image_url: payload.image_url,
            is_available: payload.is_available,
        },
    )?;

    Ok(Json(SuccessResponse { success: true }))
}

#[utoipa::path(
    delete,
    path = "/menu-items/{id}",
    responses(
        (status = 200, description = "Menu item deleted", body = SuccessResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 403, description = "Not the owning vendor", body = ApiErrorResponse),
        (status = 404, description = "Menu item not found", body = ApiErrorResponse),
        (status = 409, description = "Item is referenced by existing orders", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Menu item id")
    ),
    tag = "menu-items"
)]
#[instrument]
pub async fn delete_menu_item(
    identity: Identity,
    Path(id): Path<i32>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let conn = &mut establish_connection();

    menu_items::delete_menu_item(conn, identity.user_id, id)?;

    Ok(Json(SuccessResponse { success: true }))
}
