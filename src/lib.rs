pub mod app;
pub mod barcode;
pub mod config;
pub mod error;
pub mod nutrition;
pub mod products;
pub mod scan;
pub mod state;
