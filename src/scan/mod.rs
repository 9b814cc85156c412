mod dto;
pub mod handlers;
mod services;

pub use dto::ScanResponse;
pub use services::scan_image;

use crate::state::AppState;
use axum::Router;

pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new().merge(handlers::upload_routes(max_upload_bytes))
}
