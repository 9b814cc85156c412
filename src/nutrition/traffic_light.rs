use std::str::FromStr;

use serde::Serialize;

use super::snapshot::NutrientSnapshot;

/// Three-level per-100g signal.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrafficLight {
    Green,
    Yellow,
    Red,
}

/// How a value is compared against a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Comparison {
    /// `value >= threshold`
    #[default]
    Inclusive,
    /// `value > threshold`
    Strict,
}

impl Comparison {
    fn reaches(self, value: f64, threshold: f64) -> bool {
        match self {
            Comparison::Inclusive => value >= threshold,
            Comparison::Strict => value > threshold,
        }
    }
}

impl FromStr for Comparison {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inclusive" | ">=" => Ok(Comparison::Inclusive),
            "strict" | ">" => Ok(Comparison::Strict),
            other => Err(format!("unknown comparison {other:?}")),
        }
    }
}

/// Classifies with `>=` at both thresholds.
pub fn classify(value: f64, high: f64, medium: f64) -> TrafficLight {
    classify_with(value, high, medium, Comparison::Inclusive)
}

pub fn classify_with(value: f64, high: f64, medium: f64, comparison: Comparison) -> TrafficLight {
    if comparison.reaches(value, high) {
        TrafficLight::Red
    } else if comparison.reaches(value, medium) {
        TrafficLight::Yellow
    } else {
        TrafficLight::Green
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold {
    pub high: f64,
    pub medium: f64,
}

impl Threshold {
    pub const fn new(high: f64, medium: f64) -> Self {
        Self { high, medium }
    }
}

/// Operator plus per-nutrient thresholds. Only energy, fat and sugars are
/// classified; carbohydrates and proteins are reported as plain values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdTable {
    pub comparison: Comparison,
    pub energy: Threshold,
    pub fat: Threshold,
    pub sugars: Threshold,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct TrafficLightResult {
    pub energy: TrafficLight,
    pub fat: TrafficLight,
    pub sugars: TrafficLight,
}

impl ThresholdTable {
    pub const fn standard() -> Self {
        Self {
            comparison: Comparison::Inclusive,
            energy: Threshold::new(500.0, 250.0),
            fat: Threshold::new(17.5, 3.0),
            sugars: Threshold::new(22.5, 5.0),
        }
    }

    pub const fn strict() -> Self {
        Self {
            comparison: Comparison::Strict,
            energy: Threshold::new(400.0, 200.0),
            fat: Threshold::new(20.0, 10.0),
            sugars: Threshold::new(10.0, 5.0),
        }
    }

    pub fn from_profile(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "standard" => Some(Self::standard()),
            "strict" => Some(Self::strict()),
            _ => None,
        }
    }

    fn light(&self, value: f64, t: Threshold) -> TrafficLight {
        classify_with(value, t.high, t.medium, self.comparison)
    }

    pub fn evaluate(&self, snapshot: &NutrientSnapshot) -> TrafficLightResult {
        TrafficLightResult {
            energy: self.light(snapshot.energy, self.energy),
            fat: self.light(snapshot.fat, self.fat),
            sugars: self.light(snapshot.sugars, self.sugars),
        }
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self::standard()
    }
}
