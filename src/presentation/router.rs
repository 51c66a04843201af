use axum::Router;
use axum::middleware;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::edge::edge_route;
use crate::presentation::handlers::{
    AnswerFriendRequest, ExtractDocxText, ExtractHwpText, ExtractPptxText,
    GetDocumentAnnotationsByParentFileStorageKey, GetDocumentAnnotationsByWorkRoomId,
    GetFileDataByStorageKey, GetFilesByWorkRoomId, ImageOcr, OpenAiEmbedding, PdfOcrFileChunk,
    PutChatMessage, PutDocumentAnnotation, PutFileData, PutFriendRequest, health_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let mut router = Router::new().route("/health", get(health_handler));

    router = edge_route::<ExtractDocxText>(router);
    router = edge_route::<ExtractHwpText>(router);
    router = edge_route::<ExtractPptxText>(router);
    router = edge_route::<PdfOcrFileChunk>(router);
    router = edge_route::<ImageOcr>(router);
    router = edge_route::<OpenAiEmbedding>(router);
    router = edge_route::<PutFileData>(router);
    router = edge_route::<GetFileDataByStorageKey>(router);
    router = edge_route::<GetFilesByWorkRoomId>(router);
    router = edge_route::<PutChatMessage>(router);
    router = edge_route::<PutFriendRequest>(router);
    router = edge_route::<AnswerFriendRequest>(router);
    router = edge_route::<PutDocumentAnnotation>(router);
    router = edge_route::<GetDocumentAnnotationsByWorkRoomId>(router);
    router = edge_route::<GetDocumentAnnotationsByParentFileStorageKey>(router);

    router
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
