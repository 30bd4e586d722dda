// src/handlers/product.rs
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use crate::dtos::product::{ProductDetailResponse, ProductResponse, PromoCodeForm};
use crate::error::AppError;
use crate::services::flash::Flash;
use crate::services::promo::{self, PromoCodeState};
use crate::state::AppState;
use tracing::{error, info, instrument};

// GET /products - List all products
#[instrument(skip(state))]
pub async fn get_products(State(state): State<AppState>) -> Result<Json<Vec<ProductResponse>>, AppError> {
    match state.store.find_all_products().await {
        Ok(products) => {
            let response = products.into_iter().map(ProductResponse::from).collect();
            Ok(Json(response))
        }
        Err(e) => {
            error!(?e, "Failed to fetch products");
            Err(e.into())
        }
    }
}

// GET /products/{id} - Product page
#[instrument(skip(state))]
pub async fn show_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<ProductDetailResponse>, AppError> {
    let product = promo::resolve_product(state.store.as_ref(), id).await?;

    Ok(Json(ProductDetailResponse {
        product: product.into(),
        discounted_price: None,
        flashes: Vec::new(),
    }))
}

// POST /products/{id} - Submit a promo code and redisplay the product page
#[instrument(skip(state, form))]
pub async fn submit_promo_code(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(form): Json<PromoCodeForm>,
) -> Result<Json<ProductDetailResponse>, AppError> {
    let product = promo::resolve_product(state.store.as_ref(), id).await?;
    let code = form.code.unwrap_or_default();

    let mut flashes = Vec::new();
    let discounted_price = match promo::validate_promo_code(state.store.as_ref(), &product, &code, Utc::now()).await? {
        Ok(price) => price,
        Err(e) => {
            info!(error = %e, "Promo code rejected");
            flashes.push(Flash::error(e.to_string()));
            None
        }
    };

    Ok(Json(ProductDetailResponse {
        product: product.into(),
        discounted_price,
        flashes,
    }))
}

// POST /products/{id}/update_code - Live promo code widget update
#[instrument(skip(state, current))]
pub async fn update_code(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(current): Json<PromoCodeState>,
) -> Result<Json<PromoCodeState>, AppError> {
    let product = promo::resolve_product(state.store.as_ref(), id).await?;
    let next = promo::update_code(state.store.as_ref(), &product, current, Utc::now()).await?;
    Ok(Json(next))
}
