use std::fmt;
use std::str::FromStr;

/// Office formats handled by the text extraction pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    Docx,
    Hwp,
    Pptx,
}

impl DocumentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Docx => "docx",
            DocumentFormat::Hwp => "hwp",
            DocumentFormat::Pptx => "pptx",
        }
    }

    /// Destination table for extracted rows.
    pub fn table_name(&self) -> &'static str {
        match self {
            DocumentFormat::Docx => "docx_text",
            DocumentFormat::Hwp => "hwp_text",
            DocumentFormat::Pptx => "pptx_text",
        }
    }
}

impl FromStr for DocumentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "docx" => Ok(DocumentFormat::Docx),
            "hwp" | "hwpx" => Ok(DocumentFormat::Hwp),
            "pptx" => Ok(DocumentFormat::Pptx),
            other => Err(format!("Invalid document format: {}", other)),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
