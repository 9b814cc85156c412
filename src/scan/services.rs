use bytes::Bytes;
use tracing::{debug, info};

use super::dto::ScanResponse;
use crate::error::{AppError, AppResult};
use crate::nutrition::NutrientSnapshot;
use crate::state::AppState;

/// Decode the uploaded image, look the first barcode up, classify.
pub async fn scan_image(st: &AppState, body: Bytes) -> AppResult<ScanResponse> {
    let barcodes = detect_barcodes(st, body).await?;
    debug!(count = barcodes.len(), "barcodes detected");

    // first result wins
    let barcode = barcodes.into_iter().next().ok_or(AppError::NoBarcodeFound)?;

    let product = st.products.lookup(&barcode).await?;

    let nutrients = NutrientSnapshot::from_nutriments(&product.nutriments);
    let traffic_light = st.config.thresholds.evaluate(&nutrients);

    info!(%barcode, product = product.display_name(), ?traffic_light, "scan complete");
    Ok(ScanResponse::new(
        barcode,
        product.display_name().to_string(),
        nutrients,
        traffic_light,
    ))
}

// Raster decoding and detection are CPU-bound; keep them off the runtime threads.
async fn detect_barcodes(st: &AppState, body: Bytes) -> AppResult<Vec<String>> {
    let decoder = st.decoder.clone();
    tokio::task::spawn_blocking(move || -> AppResult<Vec<String>> {
        let image = image::load_from_memory(&body).map_err(AppError::ImageDecode)?;
        Ok(decoder.decode(&image))
    })
    .await
    .map_err(|e| AppError::Internal(format!("barcode task failed: {e}")))?
}
