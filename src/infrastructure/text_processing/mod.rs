mod docx_parser;
mod hwp_parser;
mod hwpx_reader;
mod lopdf_splitter;
mod office_common;
mod pptx_parser;

pub use docx_parser::DocxParser;
pub use hwp_parser::HwpParser;
pub use lopdf_splitter::{LopdfPageSource, LopdfSplitter};
pub use pptx_parser::PptxParser;
