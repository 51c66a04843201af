mod annotation;
mod chat_message;
mod embedding;
mod extract_text;
mod file_data;
mod friend_request;
mod health;
mod image_ocr;
mod pdf_ocr;

pub use annotation::{
    GetDocumentAnnotationsByParentFileStorageKey, GetDocumentAnnotationsByWorkRoomId,
    PutDocumentAnnotation,
};
pub use chat_message::PutChatMessage;
pub use embedding::OpenAiEmbedding;
pub use extract_text::{ExtractDocxText, ExtractHwpText, ExtractPptxText};
pub use file_data::{GetFileDataByStorageKey, GetFilesByWorkRoomId, PutFileData};
pub use friend_request::{AnswerFriendRequest, PutFriendRequest};
pub use health::health_handler;
pub use image_ocr::ImageOcr;
pub use pdf_ocr::PdfOcrFileChunk;
