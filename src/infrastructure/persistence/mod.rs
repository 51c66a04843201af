mod in_memory_repository;
mod pg_error;
mod pg_extraction_repository;
mod pg_pool;
mod pg_workspace_repository;

pub use in_memory_repository::{
    InMemoryAnnotationRepository, InMemoryChatMessageRepository, InMemoryExtractionRepository,
    InMemoryFileRepository, InMemoryFriendRepository, StoredFriendRequest,
};
pub use pg_extraction_repository::PgExtractionRepository;
pub use pg_pool::create_pool;
pub use pg_workspace_repository::{
    PgAnnotationRepository, PgChatMessageRepository, PgFileRepository, PgFriendRepository,
};
