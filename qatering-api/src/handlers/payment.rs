use axum::{Router, response::Json, routing::get};
use tracing::instrument;

use qatering_service::{establish_connection, payments};

use crate::error::ApiError;
use crate::models::*;

pub fn router() -> Router {
    Router::new().route("/payment-methods", get(list_payment_methods))
}

#[utoipa::path(
    get,
    path = "/payment-methods",
    responses(
        (status = 200, description = "Active payment methods", body = ListPaymentMethodsResponse),
    ),
    tag = "payment-methods"
)]
#[instrument]
pub async fn list_payment_methods() -> Result<Json<ListPaymentMethodsResponse>, ApiError> {
    let conn = &mut establish_connection();

    let methods = payments::list_payment_methods(conn)?;

    Ok(Json(ListPaymentMethodsResponse {
        items: methods
            .into_iter()
            .map(PaymentMethodResponse::from)
            .collect(),
    }))
}
