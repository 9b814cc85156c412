use serde::Serialize;
use serde_json::{Map, Value};

pub const ENERGY_KEY: &str = "energy-kcal_100g";
pub const FAT_KEY: &str = "fat_100g";
pub const CARBOHYDRATES_KEY: &str = "carbohydrates_100g";
pub const SUGARS_KEY: &str = "sugars_100g";
pub const PROTEINS_KEY: &str = "proteins_100g";

/// Per-100g values of the five tracked nutrients.
///
/// A nutrient missing from the product record is reported as `0.0`, so
/// "unknown" and "none" look the same here.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Default)]
pub struct NutrientSnapshot {
    pub energy: f64,
    pub fat: f64,
    pub carbohydrates: f64,
    pub sugars: f64,
    pub proteins: f64,
}

impl NutrientSnapshot {
    pub fn from_nutriments(nutriments: &Map<String, Value>) -> Self {
        let get = |key: &str| nutriments.get(key).and_then(as_number).unwrap_or(0.0);
        Self {
            energy: get(ENERGY_KEY),
            fat: get(FAT_KEY),
            carbohydrates: get(CARBOHYDRATES_KEY),
            sugars: get(SUGARS_KEY),
            proteins: get(PROTEINS_KEY),
        }
    }
}

// Open Food Facts occasionally ships numbers as strings.
fn as_number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}
