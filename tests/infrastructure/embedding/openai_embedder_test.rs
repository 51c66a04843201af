use workroom_edge::application::ports::{Embedder, EmbedderError};
use workroom_edge::infrastructure::embedding::{DEFAULT_OPENAI_MODEL, OpenAiEmbedder};

use crate::helpers::mock_server::{recorded, start_mock_server};

fn embedder(base_url: &str) -> OpenAiEmbedder {
    OpenAiEmbedder::with_base_url(
        base_url,
        "sk-test".to_string(),
        DEFAULT_OPENAI_MODEL.to_string(),
    )
}

#[tokio::test]
async fn given_text_when_embedding_then_posts_model_and_input_with_bearer_key() {
    let body = r#"{"data":[{"embedding":[0.25,-0.5,1.0],"index":0}],"model":"text-embedding-ada-002"}"#;
    let (base_url, shutdown_tx, log) = start_mock_server(200, body).await;

    let embedding = embedder(&base_url).embed("hello").await.unwrap();

    assert_eq!(embedding.values, vec![0.25, -0.5, 1.0]);
    let requests = recorded(&log);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/v1/embeddings");
    assert_eq!(requests[0].header("authorization"), Some("Bearer sk-test"));
    let sent = requests[0].json();
    assert_eq!(sent["model"], "text-embedding-ada-002");
    assert_eq!(sent["input"][0], "hello");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_batch_when_embedding_then_returns_one_vector_per_input() {
    let body = r#"{"data":[{"embedding":[1.0]},{"embedding":[2.0]}]}"#;
    let (base_url, shutdown_tx, log) = start_mock_server(200, body).await;

    let embeddings = embedder(&base_url)
        .embed_batch(&["a", "b"])
        .await
        .unwrap();

    assert_eq!(embeddings.len(), 2);
    assert_eq!(embeddings[1].values, vec![2.0]);
    let requests = recorded(&log);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].json()["input"], serde_json::json!(["a", "b"]));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_rate_limit_status_when_embedding_then_returns_rate_limited() {
    let (base_url, shutdown_tx, _) = start_mock_server(429, r#"{"error":"slow down"}"#).await;

    let result = embedder(&base_url).embed("hello").await;

    assert!(matches!(result, Err(EmbedderError::RateLimited)));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_server_error_when_embedding_then_returns_request_failure_with_status() {
    let (base_url, shutdown_tx, _) = start_mock_server(500, "upstream down").await;

    let result = embedder(&base_url).embed("hello").await;

    match result {
        Err(EmbedderError::ApiRequestFailed(message)) => {
            assert!(message.contains("500"));
            assert!(message.contains("upstream down"));
        }
        other => panic!("expected request failure, got {:?}", other),
    }
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_fewer_vectors_than_inputs_when_embedding_then_returns_invalid_response() {
    let (base_url, shutdown_tx, _) = start_mock_server(200, r#"{"data":[]}"#).await;

    let result = embedder(&base_url).embed_batch(&["a", "b"]).await;

    assert!(matches!(result, Err(EmbedderError::InvalidResponse(_))));
    shutdown_tx.send(()).ok();
}
