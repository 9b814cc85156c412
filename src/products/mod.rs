mod client;
mod dto;

pub use client::{LookupError, OpenFoodFactsClient, ProductLookup};
pub use dto::ProductRecord;
