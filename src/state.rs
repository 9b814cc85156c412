use std::sync::Arc;

use crate::barcode::{BarcodeDecoder, RxingDecoder};
use crate::config::AppConfig;
use crate::products::{OpenFoodFactsClient, ProductLookup};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub decoder: Arc<dyn BarcodeDecoder>,
    pub products: Arc<dyn ProductLookup>,
}

impl AppState {
    pub fn init(config: AppConfig) -> anyhow::Result<Self> {
        let products = Arc::new(OpenFoodFactsClient::new(&config.product_api)?) as Arc<dyn ProductLookup>;
        let decoder = Arc::new(RxingDecoder) as Arc<dyn BarcodeDecoder>;
        Ok(Self::from_parts(Arc::new(config), decoder, products))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        decoder: Arc<dyn BarcodeDecoder>,
        products: Arc<dyn ProductLookup>,
    ) -> Self {
        Self {
            config,
            decoder,
            products,
        }
    }

    #[cfg(test)]
    pub fn fake(barcodes: Vec<String>, product: Option<crate::products::ProductRecord>) -> Self {
        use crate::products::{LookupError, ProductRecord};
        use async_trait::async_trait;
        use image::DynamicImage;

        struct FakeDecoder(Vec<String>);
        impl BarcodeDecoder for FakeDecoder {
            fn decode(&self, _image: &DynamicImage) -> Vec<String> {
                self.0.clone()
            }
        }

        struct FakeProducts(Option<ProductRecord>);
        #[async_trait]
        impl ProductLookup for FakeProducts {
            async fn lookup(&self, _barcode: &str) -> Result<ProductRecord, LookupError> {
                self.0.clone().ok_or(LookupError::NotFound)
            }
        }

        Self::from_parts(
            Arc::new(AppConfig::default()),
            Arc::new(FakeDecoder(barcodes)),
            Arc::new(FakeProducts(product)),
        )
    }
}
