use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Envelope returned by `/api/v0/product/{barcode}.json`.
#[derive(Debug, Deserialize)]
pub struct ProductEnvelope {
    /// Upstream "found" flag: 1 found, 0 not found.
    #[serde(default)]
    pub status: i64,
    pub product: Option<ProductRecord>,
}

/// Product fields we read. Both are lenient: `null` or a value of the wrong
/// type is treated like a missing field instead of failing the lookup.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct ProductRecord {
    #[serde(default, deserialize_with = "string_or_none")]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "object_or_empty")]
    pub nutriments: Map<String, Value>,
}

impl ProductRecord {
    /// Upstream name as-is (an empty string stays empty); `"N/A"` when the
    /// field is missing, `null` or not a string.
    pub fn display_name(&self) -> &str {
        self.product_name.as_deref().unwrap_or("N/A")
    }
}

fn string_or_none<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn object_or_empty<'de, D>(de: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::Object(map) => map,
        _ => Map::new(),
    })
}
