use image::DynamicImage;
use tracing::debug;

/// Finds barcodes in a decoded raster image.
///
/// Returns every value found, in the order the detector reports them.
/// An empty vector means nothing was found.
pub trait BarcodeDecoder: Send + Sync {
    fn decode(&self, image: &DynamicImage) -> Vec<String>;
}

/// Multi-format detector backed by `rxing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RxingDecoder;

impl BarcodeDecoder for RxingDecoder {
    fn decode(&self, image: &DynamicImage) -> Vec<String> {
        let luma = image.to_luma8();
        let (width, height) = luma.dimensions();
        match rxing::helpers::detect_multiple_in_luma(luma.into_raw(), width, height) {
            Ok(results) => results
                .iter()
                .map(|r| r.getText().to_string())
                .filter(|text| !text.is_empty())
                .collect(),
            Err(e) => {
                // rxing reports "nothing found" as an error too
                debug!(error = %e, "no barcode detected");
                Vec::new()
            }
        }
    }
}
