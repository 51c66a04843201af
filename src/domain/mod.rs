mod chat_message;
mod document_annotation;
mod document_format;
mod embedding;
mod extracted_record;
mod extraction_request;
mod file_record;
mod friend_request;
mod ids;
mod ocr_page;
mod pdf_chunk;
mod request_phase;
mod storage_key;
mod text_unit;

pub use chat_message::{ChatMessage, MessageType, NewChatMessage};
pub use document_annotation::{
    AnnotationArea, DEFAULT_ANNOTATION_TYPE, DocumentAnnotation, NewDocumentAnnotation,
};
pub use document_format::DocumentFormat;
pub use embedding::Embedding;
pub use extracted_record::{OcrPageRecord, TextRecord};
pub use extraction_request::{DEFAULT_BUCKET, ExtractionRequest, UNKNOWN_FILE_NAME};
pub use file_record::{FileRecord, NewFileRecord};
pub use friend_request::{
    EmailType, FriendRequestAction, FriendRequestAnswer, FriendRequestEmail, Friendship,
};
pub use ids::{AnnotationId, ChatMessageId, FileId, FriendRequestId, UserId, WorkRoomId};
pub use ocr_page::{OCR_STATUS_SUCCESS, OCR_STATUS_UNKNOWN, OcrPageResult, OcrStatus};
pub use pdf_chunk::{ChunkLimits, DEFAULT_MAX_CHUNK_BYTES, DEFAULT_MAX_PAGES_PER_CHUNK, PdfChunk};
pub use request_phase::RequestPhase;
pub use storage_key::StorageKey;
pub use text_unit::{TextUnit, UnitSequenceBuilder, UnitType};
