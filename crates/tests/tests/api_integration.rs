use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use translateai_api::{build_app, ApiConfig};
use translateai_tests::{router_with, AlwaysFails, Tagging};
use translateai_translation::ProviderKind;

fn offline_config() -> ApiConfig {
    ApiConfig {
        provider: ProviderKind::Disabled,
        ..ApiConfig::default()
    }
}

fn translate_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/translate")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn health_reports_healthy_service() {
    let app = build_app(&offline_config()).expect("app should build");

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        json!({ "status": "healthy", "service": "TranslateAI" })
    );
}

#[tokio::test]
async fn failing_provider_still_answers_with_normalized_text() {
    let app = router_with(Arc::new(AlwaysFails), &offline_config());

    let response = app
        .oneshot(translate_request(json!({
            "text": "I love this!",
            "target_language": "es"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = read_json(response).await;
    assert_eq!(parsed["input_text"], "i love this");
    assert_eq!(parsed["translation"], "i love this");
    assert!(parsed["sentiment_score"].as_f64().unwrap() > 0.0);
    assert_eq!(parsed.as_object().unwrap().len(), 3);
}

#[tokio::test]
async fn disabled_provider_from_config_falls_back() {
    let app = build_app(&offline_config()).expect("app should build");

    let response = app
        .oneshot(translate_request(json!({
            "text": "Check this URL: http://google.com !!!",
            "target_language": "fr"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = read_json(response).await;
    assert_eq!(parsed["input_text"], "check this url");
    assert_eq!(parsed["translation"], "check this url");
    assert_eq!(parsed["sentiment_score"], 0.0);
}

#[tokio::test]
async fn target_language_defaults_to_english() {
    let provider = Arc::new(Tagging::default());
    let app = router_with(provider.clone(), &offline_config());

    let response = app
        .oneshot(translate_request(json!({ "text": "Bonjour, le monde" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = read_json(response).await;
    assert_eq!(parsed["translation"], "en:bonjour le monde");
    assert_eq!(*provider.targets.lock().unwrap(), vec!["en".to_string()]);
}

#[tokio::test]
async fn missing_text_is_unprocessable() {
    let app = router_with(Arc::new(AlwaysFails), &offline_config());

    let response = app
        .oneshot(translate_request(json!({ "target_language": "es" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let parsed = read_json(response).await;
    assert_eq!(parsed["error"], "invalid_request");
    assert!(parsed["message"].as_str().unwrap().contains("text"));
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = router_with(Arc::new(AlwaysFails), &offline_config());

    let request = Request::builder()
        .method("POST")
        .uri("/translate")
        .header("content-type", "application/json")
        .body(Body::from("{\"text\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let config = ApiConfig {
        max_body_bytes: 128,
        ..offline_config()
    };
    let app = router_with(Arc::new(AlwaysFails), &config);

    let body = json!({ "text": "a".repeat(1024) }).to_string();
    let request = Request::builder()
        .method("POST")
        .uri("/translate")
        .header("content-type", "application/json")
        .header("content-length", body.len())
        .body(Body::from(body))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = build_app(&offline_config()).expect("app should build");

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert!(response.headers().get("x-request-id").is_some());
}

#[tokio::test]
async fn any_origin_is_allowed_by_default() {
    let app = build_app(&offline_config()).expect("app should build");

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/translate")
        .header("origin", "https://somewhere.example")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|value| value.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn allow_list_only_echoes_listed_origins() {
    let config = ApiConfig {
        allowed_origins: vec!["https://app.example.com".to_string()],
        ..offline_config()
    };
    let app = router_with(Arc::new(AlwaysFails), &config);

    let listed = Request::builder()
        .uri("/health")
        .header("origin", "https://app.example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(listed).await.unwrap();
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|value| value.to_str().ok()),
        Some("https://app.example.com")
    );
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-credentials")
            .and_then(|value| value.to_str().ok()),
        Some("true")
    );

    let unlisted = Request::builder()
        .uri("/health")
        .header("origin", "https://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(unlisted).await.unwrap();
    assert!(response.headers().get("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn metrics_count_fallbacks_and_empty_inputs() {
    let app = router_with(Arc::new(AlwaysFails), &offline_config());

    for text in ["Great job!", "www.example.com ???"] {
        let response = app
            .clone()
            .oneshot(translate_request(json!({ "text": text, "target_language": "es" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let parsed = read_json(response).await;
    assert_eq!(parsed["requests_total"], 2);
    assert_eq!(parsed["fallback_total"], 1);
    assert_eq!(parsed["fallback_by_kind"], json!({ "rate_limited": 1 }));
    assert_eq!(parsed["empty_input_total"], 1);
    assert_eq!(parsed["translated_total"], 0);
}

#[tokio::test]
async fn concurrent_requests_are_independent() {
    let provider = Arc::new(Tagging::default());
    let app = router_with(provider.clone(), &offline_config());

    let mut handles = Vec::new();
    for index in 0..16 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            let response = app
                .oneshot(translate_request(json!({
                    "text": format!("Message {index}!"),
                    "target_language": "de"
                })))
                .await
                .unwrap();
            (index, read_json(response).await)
        }));
    }

    for handle in handles {
        let (index, parsed) = handle.await.unwrap();
        assert_eq!(parsed["input_text"], format!("message {index}"));
        assert_eq!(parsed["translation"], format!("de:message {index}"));
    }
    assert_eq!(provider.targets.lock().unwrap().len(), 16);
}
