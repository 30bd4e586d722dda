// src/handlers/export.rs
use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Extension, Json,
};
use crate::dtos::product::MessageResponse;
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::services::export_queue::ExportProductsMessage;
use crate::services::exporter::{ExportMode, ExportResult};
use crate::services::flash::{append_flash_headers, export_flashes, Flash};
use crate::state::AppState;
use tracing::{error, info, instrument};

pub const EXPORT_EMAIL_ACK: &str = "L’export sera envoyé à votre adresse email sous peu";

fn csv_attachment(result: ExportResult) -> Result<Response, AppError> {
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", result.filename))
        .map_err(|e| AppError::internal(format!("Invalid export filename: {e}")))?;
    let flashes = export_flashes(&result.stats);

    let mut response = result.csv.into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/csv"));
    headers.insert(header::CONTENT_DISPOSITION, disposition);
    append_flash_headers(headers, &flashes);
    Ok(response)
}

// GET /products/export - Formatted CSV download
#[instrument(skip(state))]
pub async fn export_products(State(state): State<AppState>) -> Response {
    let outcome = match state.exporter.export(ExportMode::Formatted).await {
        Ok(result) => csv_attachment(result),
        Err(e) => Err(e.into()),
    };

    match outcome {
        Ok(response) => response,
        Err(e) => {
            error!(error = %e, "Product export failed");
            let mut response = Redirect::to("/products").into_response();
            append_flash_headers(
                response.headers_mut(),
                &[Flash::error(format!("Erreur lors de l'export : {e}"))],
            );
            response
        }
    }
}

// GET /products/export_email - Queue an export mailed to the signed-in user
#[instrument(skip(state, auth), fields(user_id = auth.user_id))]
pub async fn export_products_email(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    state
        .export_queue
        .dispatch(ExportProductsMessage { recipient_email: auth.email })?;
    info!("Export e-mail queued");

    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse { message: EXPORT_EMAIL_ACK.to_string() }),
    ))
}
