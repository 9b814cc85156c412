mod snapshot;
mod traffic_light;

pub use snapshot::NutrientSnapshot;
pub use traffic_light::{
    classify, classify_with, Comparison, Threshold, ThresholdTable, TrafficLight,
    TrafficLightResult,
};
