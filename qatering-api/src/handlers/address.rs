use axum::{Router, response::Json, routing::post};
use tracing::instrument;

use qatering_service::{addresses, establish_connection};

use crate::error::ApiError;
use crate::models::*;

use super::Identity;

pub fn router() -> Router {
    Router::new().route("/addresses", post(create_address).get(list_addresses))
}

#[utoipa::path(
    post,
    path = "/addresses",
    request_body = CreateAddressRequest,
    responses(
        (status = 200, description = "Address created", body = CreateAddressResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
    ),
    tag = "addresses"
)]
#[instrument(skip(payload))]
pub async fn create_address(
    identity: Identity,
    Json(payload): Json<CreateAddressRequest>,
) -> Result<Json<CreateAddressResponse>, ApiError> {
    let conn = &mut establish_connection();

    let id = addresses::create_address(
        conn,
        identity.user_id,
        addresses::CreateAddress {
            recipient_name: payload.recipient_name,
            address_line1: payload.address_line1,
            city: payload.city,
            postal_code: payload.postal_code,
            delivery_instructions: payload.delivery_instructions,
        },
    )?;

    Ok(Json(CreateAddressResponse { id }))
}

#[utoipa::path(
    get,
    path = "/addresses",
    responses(
        (status = 200, description = "The acting identity's addresses", body = ListAddressesResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
    ),
    tag = "addresses"
)]
#[instrument]
pub async fn list_addresses(identity: Identity) -> Result<Json<ListAddressesResponse>, ApiError> {
    let conn = &mut establish_connection();

    let addresses = addresses::list_addresses(conn, identity.user_id)?;

    Ok(Json(ListAddressesResponse {
        items: addresses.into_iter().map(AddressResponse::from).collect(),
    }))
}
