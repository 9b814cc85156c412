use serde::Serialize;

use crate::nutrition::{NutrientSnapshot, TrafficLightResult};

/// Success body of `POST /upload`.
#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub status: &'static str, // always "success"
    pub barcode: String,
    pub product_name: String,
    #[serde(flatten)]
    pub nutrients: NutrientSnapshot,
    pub traffic_light: TrafficLightResult,
}

impl ScanResponse {
    pub fn new(
        barcode: String,
        product_name: String,
        nutrients: NutrientSnapshot,
        traffic_light: TrafficLightResult,
    ) -> Self {
        Self {
            status: "success",
            barcode,
            product_name,
            nutrients,
            traffic_light,
        }
    }
}
