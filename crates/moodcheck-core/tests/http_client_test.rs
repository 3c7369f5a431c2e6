//! HTTP client tests against a local axum server

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use pretty_assertions::assert_eq;

use moodcheck_core::{
    Config, FailureKind, HttpSuggestionClient, MoodSession, RequestOutcome, SuggestionTransport,
    TransportError,
};

#[derive(Clone, Default)]
struct Recorded {
    requests: Arc<Mutex<Vec<(HeaderMap, String)>>>,
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/mood", addr)
}

fn replying(status: StatusCode, body: &'static str, recorded: Recorded) -> Router {
    Router::new()
        .route(
            "/mood",
            post(
                move |State(recorded): State<Recorded>, headers: HeaderMap, payload: String| async move {
                    recorded.requests.lock().unwrap().push((headers, payload));
                    (status, body)
                },
            ),
        )
        .with_state(recorded)
}

#[tokio::test]
async fn test_posts_json_mood() {
    let recorded = Recorded::default();
    let url = serve(replying(StatusCode::OK, r#"{"suggestion":"Stretch"}"#, recorded.clone())).await;
    let client = HttpSuggestionClient::new(&url);

    let response = client.post_mood("Anxious").await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, r#"{"suggestion":"Stretch"}"#);

    let requests = recorded.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let (headers, payload) = &requests[0];
    assert_eq!(headers[header::CONTENT_TYPE].to_str().unwrap(), "application/json");
    assert_eq!(headers[header::ACCEPT].to_str().unwrap(), "application/json");
    let json: serde_json::Value = serde_json::from_str(payload).unwrap();
    assert_eq!(json, serde_json::json!({ "mood": "Anxious" }));
}

#[tokio::test]
async fn test_error_status_is_still_a_response() {
    let url = serve(replying(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"error":"Internal Server Error"}"#,
        Recorded::default(),
    ))
    .await;
    let client = HttpSuggestionClient::new(&url);

    let response = client.post_mood("Sad").await.unwrap();
    assert_eq!(response.status, 500);
    assert!(!response.is_success());
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpSuggestionClient::new(&format!("http://{}/mood", addr));
    let err = client.post_mood("Sad").await.unwrap_err();
    assert!(matches!(err, TransportError::Connect(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_configured_timeout() {
    let router = Router::new().route(
        "/mood",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "{}"
        }),
    );
    let url = serve(router).await;
    let config = Config {
        endpoint: Some(url),
        request_timeout_secs: Some(1),
    };
    let client = HttpSuggestionClient::from_config(&config).unwrap();

    let err = client.post_mood("Sad").await.unwrap_err();
    assert_eq!(err, TransportError::Timeout);
}

#[tokio::test]
async fn test_session_over_http() {
    let url = serve(replying(
        StatusCode::OK,
        r#"{"suggestion":"It's okay to feel sad sometimes."}"#,
        Recorded::default(),
    ))
    .await;
    let config = Config {
        endpoint: Some(url),
        request_timeout_secs: None,
    };
    let client = HttpSuggestionClient::from_config(&config).unwrap();
    let mut session = MoodSession::new(Arc::new(client));

    match session.select_preset("Sad").await {
        RequestOutcome::Success(s) => assert_eq!(s.text, "It's okay to feel sad sometimes."),
        other => panic!("unexpected {:?}", other),
    }
    assert!(!session.state().is_loading());
}

#[tokio::test]
async fn test_session_over_http_failure() {
    let url = serve(replying(StatusCode::BAD_GATEWAY, "", Recorded::default())).await;
    let mut session = MoodSession::new(Arc::new(HttpSuggestionClient::new(&url)));

    match session.submit("Angry").await {
        RequestOutcome::Failed(f) => assert_eq!(f.kind, FailureKind::Http(502)),
        other => panic!("unexpected {:?}", other),
    }
}
