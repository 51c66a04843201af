use std::sync::Arc;

use anyhow::Context;
use sqlx::PgPool;
use tokio::net::TcpListener;

use workroom_edge::application::ports::{
    DocumentParser, Embedder, ExtractionRepository, OcrClient,
};
use workroom_edge::application::services::{
    EmbeddingMode, ExtractionWriter, FriendshipService, OcrIngestionService,
    TextExtractionService,
};
use workroom_edge::domain::ChunkLimits;
use workroom_edge::infrastructure::email::HttpEmailDispatcher;
use workroom_edge::infrastructure::embedding::EmbedderFactory;
use workroom_edge::infrastructure::observability::{TracingConfig, init_tracing};
use workroom_edge::infrastructure::ocr::ClovaOcrClient;
use workroom_edge::infrastructure::persistence::{
    PgAnnotationRepository, PgChatMessageRepository, PgExtractionRepository, PgFileRepository,
    PgFriendRepository, create_pool,
};
use workroom_edge::infrastructure::storage::PublicObjectFetcher;
use workroom_edge::infrastructure::text_processing::{
    DocxParser, HwpParser, LopdfSplitter, PptxParser,
};
use workroom_edge::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::new(
        environment.as_str(),
        settings.logging.enable_json,
        settings.logging.level.as_deref(),
    ));

    let pool = create_pool(&settings.database.url, settings.database.max_connections)
        .await
        .context("Failed to connect to database")?;

    let state = build_state(&settings, pool);
    let router = create_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}

fn build_state(settings: &Settings, pool: PgPool) -> AppState {
    let supabase = &settings.supabase;
    let fetcher = Arc::new(PublicObjectFetcher::new(
        &supabase.url,
        &supabase.service_role_key,
    ));
    let extraction_repository: Arc<dyn ExtractionRepository> =
        Arc::new(PgExtractionRepository::new(pool.clone()));
    let embedding = embedding_mode(settings);

    let parsers: Vec<Arc<dyn DocumentParser>> =
        vec![Arc::new(DocxParser), Arc::new(HwpParser), Arc::new(PptxParser)];
    let text_extraction = Arc::new(TextExtractionService::new(
        fetcher.clone(),
        parsers,
        embedding.clone(),
        ExtractionWriter::new(Arc::clone(&extraction_repository)),
    ));

    let ocr_client: Option<Arc<dyn OcrClient>> = match settings.ocr.credentials() {
        Some((invoke_url, secret_key)) => {
            Some(Arc::new(ClovaOcrClient::new(invoke_url, secret_key)))
        }
        None => {
            tracing::warn!("OCR is not configured; OCR handlers will answer 500");
            None
        }
    };

    let limits = ChunkLimits::new(
        settings.extraction.max_chunk_bytes,
        settings.extraction.max_pages_per_chunk,
    );
    let ocr_ingestion = ocr_client.as_ref().map(|client| {
        Arc::new(OcrIngestionService::new(
            fetcher.clone(),
            Arc::new(LopdfSplitter),
            Arc::clone(client),
            embedding.clone(),
            ExtractionWriter::new(Arc::clone(&extraction_repository)),
            limits,
        ))
    });

    let openai_embedder: Option<Arc<dyn Embedder>> =
        match EmbedderFactory::create_openai(&settings.embeddings) {
            Ok(embedder) => Some(embedder),
            Err(e) => {
                tracing::warn!(error = %e, "OpenAI embedding endpoint disabled");
                None
            }
        };

    let friendships = Arc::new(FriendshipService::new(
        Arc::new(PgFriendRepository::new(pool.clone())),
        Arc::new(HttpEmailDispatcher::new(
            &supabase.url,
            &supabase.service_role_key,
        )),
    ));

    AppState {
        text_extraction,
        ocr_ingestion,
        ocr_client,
        openai_embedder,
        files: Arc::new(PgFileRepository::new(pool.clone())),
        chat_messages: Arc::new(PgChatMessageRepository::new(pool.clone())),
        annotations: Arc::new(PgAnnotationRepository::new(pool)),
        friendships,
        default_bucket: supabase.bucket.clone(),
    }
}

fn embedding_mode(settings: &Settings) -> EmbeddingMode {
    if !settings.extraction.generate_embeddings {
        tracing::info!("Embedding generation disabled");
        return EmbeddingMode::Disabled;
    }

    match EmbedderFactory::create(&settings.embeddings, &settings.supabase.service_role_key) {
        Ok(embedder) => EmbeddingMode::Enabled(embedder),
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Embedding provider unavailable; extraction handlers will answer 500"
            );
            EmbeddingMode::Unavailable(e.to_string())
        }
    }
}
