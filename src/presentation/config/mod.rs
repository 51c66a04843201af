mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    DatabaseSettings, EmbeddingProvider, EmbeddingsSettings, ExtractionSettings, LoggingSettings,
    OcrSettings, ServerSettings, Settings, SupabaseSettings,
};
