mod annotation_repository;
mod chat_message_repository;
mod document_parser;
mod email_dispatcher;
mod embedder;
mod extraction_repository;
mod file_repository;
mod friend_repository;
mod object_fetcher;
mod ocr_client;
mod pdf_splitter;
mod repository_error;

pub use annotation_repository::AnnotationRepository;
pub use chat_message_repository::ChatMessageRepository;
pub use document_parser::{DocumentParser, ParseError};
pub use email_dispatcher::{EmailDispatcher, EmailError};
pub use embedder::{Embedder, EmbedderError};
pub use extraction_repository::ExtractionRepository;
pub use file_repository::FileRepository;
pub use friend_repository::FriendRepository;
pub use object_fetcher::{FetchError, ObjectFetcher};
pub use ocr_client::{OcrClient, OcrError};
pub use pdf_splitter::{PdfSplitter, SplitError};
pub use repository_error::RepositoryError;
