use config::{Config, ConfigError, Environment as EnvironmentSource, File};
use serde::Deserialize;

use crate::domain::{DEFAULT_BUCKET, DEFAULT_MAX_CHUNK_BYTES, DEFAULT_MAX_PAGES_PER_CHUNK};
use crate::infrastructure::embedding::{DEFAULT_OPENAI_MODEL, OPENAI_API_BASE};

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub supabase: SupabaseSettings,
    #[serde(default)]
    pub embeddings: EmbeddingsSettings,
    #[serde(default)]
    pub ocr: OcrSettings,
    #[serde(default)]
    pub extraction: ExtractionSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Settings {
    /// Layers `appsettings.{environment}` under `APP_`-prefixed variables,
    /// e.g. `APP_DATABASE__URL`.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                EnvironmentSource::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseSettings {
    pub url: String,
    pub service_role_key: String,
    #[serde(default = "default_bucket")]
    pub bucket: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingsSettings {
    #[serde(default)]
    pub provider: EmbeddingProvider,
    pub function_url: Option<String>,
    pub openai_api_key: Option<String>,
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,
    #[serde(default = "default_embedding_model")]
    pub model: String,
}

impl Default for EmbeddingsSettings {
    fn default() -> Self {
        Self {
            provider: EmbeddingProvider::default(),
            function_url: None,
            openai_api_key: None,
            openai_base_url: default_openai_base_url(),
            model: default_embedding_model(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    #[default]
    Function,
    #[serde(rename = "openai")]
    OpenAi,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OcrSettings {
    pub invoke_url: Option<String>,
    pub secret_key: Option<String>,
}

impl OcrSettings {
    /// Both values, when present and non-blank.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let url = self.invoke_url.as_deref().map(str::trim).filter(|v| !v.is_empty())?;
        let secret = self.secret_key.as_deref().map(str::trim).filter(|v| !v.is_empty())?;
        Some((url, secret))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionSettings {
    #[serde(default = "default_true")]
    pub generate_embeddings: bool,
    #[serde(default = "default_max_chunk_bytes")]
    pub max_chunk_bytes: usize,
    #[serde(default = "default_max_pages_per_chunk")]
    pub max_pages_per_chunk: usize,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            generate_embeddings: true,
            max_chunk_bytes: DEFAULT_MAX_CHUNK_BYTES,
            max_pages_per_chunk: DEFAULT_MAX_PAGES_PER_CHUNK,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingSettings {
    pub level: Option<String>,
    #[serde(default)]
    pub enable_json: bool,
}

fn default_max_connections() -> u32 {
    10
}

fn default_bucket() -> String {
    DEFAULT_BUCKET.to_string()
}

fn default_openai_base_url() -> String {
    OPENAI_API_BASE.to_string()
}

fn default_embedding_model() -> String {
    DEFAULT_OPENAI_MODEL.to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_chunk_bytes() -> usize {
    DEFAULT_MAX_CHUNK_BYTES
}

fn default_max_pages_per_chunk() -> usize {
    DEFAULT_MAX_PAGES_PER_CHUNK
}
