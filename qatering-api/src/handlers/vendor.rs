use axum::{
    Router,
    extract::{Path, Query},
    response::Json,
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use qatering_service::error::ServiceError;
use qatering_service::{establish_connection, vendors};

use crate::error::ApiError;
use crate::models::*;

use super::Identity;

#[derive(Debug, Deserialize)]
pub struct ListVendorsQuery {
    pub search: Option<String>,
    pub cursor: Option<i32>,
    pub limit: Option<i64>,
}

pub fn router() -> Router {
    Router::new()
        .route("/vendors", post(create_vendor).get(list_vendors))
        .route("/vendors/{id}", get(get_vendor).patch(update_vendor))
}

#[utoipa::path(
    post,
    path = "/vendors",
    request_body = CreateVendorRequest,
    responses(
        (status = 200, description = "Vendor profile created", body = CreateVendorResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 409, description = "Identity already owns a vendor profile", body = ApiErrorResponse),
    ),
    tag = "vendors"
)]
#[instrument(skip(payload))]
pub async fn create_vendor(
    identity: Identity,
    Json(payload): Json<CreateVendorRequest>,
) -> Result<Json<CreateVendorResponse>, ApiError> {
    let conn = &mut establish_connection();

    let id = vendors::create_vendor(
        conn,
        identity.user_id,
        vendors::CreateVendor {
            business_name: payload.business_name,
            business_description: payload.business_description,
            support_phone: payload.support_phone,
        },
    )?;

    Ok(Json(CreateVendorResponse { id }))
}

#[utoipa::path(
    get,
    path = "/vendors",
    responses(
        (status = 200, description = "Paginated vendor listing", body = ListVendorsResponse),
    ),
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive business name filter"),
        ("cursor" = Option<i32>, Query, description = "Return vendors with id greater than this"),
        ("limit" = Option<i64>, Query, description = "Page size, at most 100"),
    ),
    tag = "vendors"
)]
#[instrument]
pub async fn list_vendors(
    Query(query): Query<ListVendorsQuery>,
) -> Result<Json<ListVendorsResponse>, ApiError> {
    let conn = &mut establish_connection();

    let page = vendors::list_vendors(conn, query.search.as_deref(), query.cursor, query.limit)?;

    Ok(Json(ListVendorsResponse {
        items: page.items.into_iter().map(VendorResponse::from).collect(),
        next_cursor: page.next_cursor,
    }))
}

#[utoipa::path(
    get,
    path = "/vendors/{id}",
    responses(
        (status = 200, description = "Vendor profile", body = VendorResponse),
        (status = 404, description = "Vendor not found", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Vendor id")
    ),
    tag = "vendors"
)]
#[instrument]
pub async fn get_vendor(Path(id): Path<i32>) -> Result<Json<VendorResponse>, ApiError> {
    let conn = &mut establish_connection();

    let vendor = vendors::get_vendor(conn, id)?;

    Ok(Json(vendor.into()))
}

#[utoipa::path(
    patch,
    path = "/vendors/{id}",
    request_body = UpdateVendorRequest,
    responses(
        (status = 200, description = "Vendor profile updated", body = SuccessResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 403, description = "Not the owning identity", body = ApiErrorResponse),
        (status = 404, description = "Vendor not found", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Vendor id")
    ),
    tag = "vendors"
)]
#[instrument(skip(payload))]
pub async fn update_vendor(
    identity: Identity,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateVendorRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let status = payload
        .status
        .map(|s| {
            s.parse().map_err(|_| {
                ServiceError::InvalidRequest(format!("invalid vendor status: {s}"))
            })
        })
        .transpose()?;

    let conn = &mut establish_connection();

    vendors::update_vendor(
        conn,
        identity.user_id,
        id,
        vendors::VendorChanges {
            business_name: payload.business_name,
            business_description: payload.business_description,
            support_phone: payload.support_phone,
            status,
        },
    )?;

    Ok(Json(SuccessResponse { success: true }))
}
