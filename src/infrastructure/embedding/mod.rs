mod embedder_factory;
mod function_embedder;
mod openai_embedder;

pub use embedder_factory::{EmbedderFactory, EmbedderFactoryError};
pub use function_embedder::FunctionEmbedder;
pub use openai_embedder::{DEFAULT_OPENAI_MODEL, OPENAI_API_BASE, OpenAiEmbedder};
