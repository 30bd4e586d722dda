use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use crate::handlers::export::{export_products, export_products_email};
use crate::handlers::product::{get_products, show_product, submit_promo_code, update_code};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    let open = Router::new()
        .route("/products", get(get_products))
        .route("/products/export", get(export_products))
        .route("/products/{id}", get(show_product).post(submit_promo_code))
        .route("/products/{id}/update_code", post(update_code));

    let protected = Router::new()
        .route("/products/export_email", get(export_products_email))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    open.merge(protected)
}
