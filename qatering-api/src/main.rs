use axum::Router;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod error;
mod handlers;
mod models;

use handlers::{
    ApiDoc, address_router, menu_item_router, order_router, payment_router, vendor_router,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let mut conn = qatering_service::establish_connection();
    qatering_service::run_migrations(&mut conn);
    drop(conn);

    let app = Router::new()
        .merge(vendor_router())
        .merge(menu_item_router())
        .merge(address_router())
        .merge(payment_router())
        .merge(order_router())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8100").await?;
    info!("Qatering API listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
