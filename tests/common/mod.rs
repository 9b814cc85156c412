#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request, Response};
use axum::{extract::Path, http::StatusCode, routing, Json, Router};
use http_body_util::BodyExt;
use image::{DynamicImage, GrayImage, Luma};
use serde_json::{json, Value};
use tower::ServiceExt;

use nutrilight::app::build_app;
use nutrilight::barcode::{BarcodeDecoder, RxingDecoder};
use nutrilight::config::AppConfig;
use nutrilight::products::{OpenFoodFactsClient, ProductLookup};
use nutrilight::state::AppState;

pub const KNOWN_BARCODE: &str = "5000112637922";
pub const UNKNOWN_BARCODE: &str = "4006381333931";

// ---------------------------------------------------------------------------
// Fake product database
// ---------------------------------------------------------------------------

/// Serves `/api/v0/product/{barcode}.json` on a random local port. Only
/// `KNOWN_BARCODE` is found.
pub async fn spawn_fake_upstream() -> String {
    async fn product(Path(file): Path<String>) -> Json<Value> {
        if file == format!("{KNOWN_BARCODE}.json") {
            Json(json!({
                "code": KNOWN_BARCODE,
                "status": 1,
                "product": {
                    "product_name": "Fudge Brownie",
                    "nutriments": {
                        "energy-kcal_100g": 550,
                        "fat_100g": 20,
                        "sugars_100g": 25,
                        "carbohydrates_100g": 60,
                        "proteins_100g": 5.5
                    }
                }
            }))
        } else {
            Json(json!({"status": 0, "status_verbose": "product not found"}))
        }
    }

    let app = Router::new().route("/api/v0/product/:file", routing::get(product));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Full router with the real decoder and HTTP client pointed at `upstream`.
pub fn build_test_app(upstream: String) -> Router {
    let mut config = AppConfig::default();
    config.product_api.base_url = upstream;
    build_test_app_with(config)
}

pub fn build_test_app_with(config: AppConfig) -> Router {
    // loopback upstream; keep any proxy from the environment out of the way
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    let products = Arc::new(OpenFoodFactsClient::with_client(
        http,
        config.product_api.base_url.clone(),
    )) as Arc<dyn ProductLookup>;
    let decoder = Arc::new(RxingDecoder) as Arc<dyn BarcodeDecoder>;
    build_app(AppState::from_parts(Arc::new(config), decoder, products))
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

const L_CODES: [&str; 10] = [
    "0001101", "0011001", "0010011", "0111101", "0100011", "0110001", "0101111", "0111011",
    "0110111", "0001011",
];
const G_CODES: [&str; 10] = [
    "0100111", "0110011", "0011011", "0100001", "0011101", "0111001", "0000101", "0010001",
    "0001001", "0010111",
];
const R_CODES: [&str; 10] = [
    "1110010", "1100110", "1101100", "1000010", "1011100", "1001110", "1010000", "1000100",
    "1001000", "1110100",
];
// left-half parity, selected by the leading digit
const PARITY: [&str; 10] = [
    "LLLLLL", "LLGLGG", "LLGGLG", "LLGGGL", "LGLLGG", "LGGLLG", "LGGGLL", "LGLGLG", "LGLGGL",
    "LGGLGL",
];

pub fn ean13_modules(code: &str) -> String {
    let d: Vec<usize> = code.bytes().map(|b| (b - b'0') as usize).collect();
    assert_eq!(d.len(), 13, "EAN-13 needs 13 digits");
    let mut bits = String::from("101");
    for (i, parity) in PARITY[d[0]].chars().enumerate() {
        let digit = d[i + 1];
        bits.push_str(if parity == 'L' { L_CODES[digit] } else { G_CODES[digit] });
    }
    bits.push_str("01010");
    for &digit in &d[7..] {
        bits.push_str(R_CODES[digit]);
    }
    bits.push_str("101");
    bits
}

/// Clean EAN-13 rendering with a wide quiet zone.
pub fn ean13_image(code: &str) -> DynamicImage {
    const MODULE: u32 = 4;
    const QUIET: u32 = 15;
    const HEIGHT: u32 = 120;

    let modules = ean13_modules(code);
    let width = (modules.len() as u32 + 2 * QUIET) * MODULE;
    let mut img = GrayImage::from_pixel(width, HEIGHT, Luma([255u8]));
    for (i, bit) in modules.chars().enumerate() {
        if bit != '1' {
            continue;
        }
        let x0 = (QUIET + i as u32) * MODULE;
        for x in x0..x0 + MODULE {
            for y in 10..HEIGHT - 10 {
                img.put_pixel(x, y, Luma([0u8]));
            }
        }
    }
    DynamicImage::ImageLuma8(img)
}

pub fn blank_image() -> DynamicImage {
    DynamicImage::ImageLuma8(GrayImage::from_pixel(320, 160, Luma([255u8])))
}

pub fn png_bytes(img: &DynamicImage) -> Vec<u8> {
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

// ---------------------------------------------------------------------------
// HTTP helpers
// ---------------------------------------------------------------------------

const BOUNDARY: &str = "nutrilight-test-boundary";

/// multipart/form-data body with one part per `(field, filename, bytes)`.
pub fn multipart_body(parts: &[(&str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (field, filename, data) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart(app: Router, body: Vec<u8>) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/upload")
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn upload_image(app: Router, png: &[u8]) -> Response<Body> {
    post_multipart(app, multipart_body(&[("file", "photo.png", png)])).await
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn assert_error(status: StatusCode, json: &Value, expected: StatusCode, message: &str) {
    assert_eq!(status, expected, "unexpected status, body: {json}");
    assert_eq!(json["status"], "error");
    assert_eq!(json["message"], message);
}
