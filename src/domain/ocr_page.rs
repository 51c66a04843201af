use std::fmt;

use serde_json::Value;

pub const OCR_STATUS_SUCCESS: &str = "SUCCESS";
pub const OCR_STATUS_UNKNOWN: &str = "UNKNOWN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OcrStatus {
    Success,
    Other(String),
}

impl OcrStatus {
    pub fn from_infer_result(value: Option<&str>) -> Self {
        match value {
            Some(OCR_STATUS_SUCCESS) => OcrStatus::Success,
            Some(other) => OcrStatus::Other(other.to_string()),
            None => OcrStatus::Other(OCR_STATUS_UNKNOWN.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OcrStatus::Success => OCR_STATUS_SUCCESS,
            OcrStatus::Other(s) => s.as_str(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, OcrStatus::Success)
    }
}

impl fmt::Display for OcrStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OcrPageResult {
    pub text: String,
    pub status: OcrStatus,
    pub average_confidence: Option<f64>,
    pub converted_image_info: Option<Value>,
    pub raw_response: Value,
}
