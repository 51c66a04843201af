mod clova_ocr_client;

pub use clova_ocr_client::ClovaOcrClient;
