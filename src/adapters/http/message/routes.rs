//! Axum routes for the message endpoint.

use axum::routing::post;
use axum::Router;

use super::handlers::{send_message, MessageAppState};

/// Creates routes for the message endpoint.
///
/// - POST /message - Send one chat turn
pub fn message_routes() -> Router<MessageAppState> {
    Router::new().route("/message", post(send_message))
}

/// Message routes under /api.
pub fn message_router() -> Router<MessageAppState> {
    Router::new().nest("/api", message_routes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::conversation::MockConversationService;
    use crate::adapters::countries::InMemoryCountryDirectory;
    use crate::application::{EnrichmentSettings, ResponseEnricher, SendMessageHandler};
    use crate::domain::{Country, ConversationResponse, Intent, WorkspaceId};
    use crate::ports::ConversationError;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(service: MockConversationService, directory: InMemoryCountryDirectory) -> Router {
        let handler = SendMessageHandler::new(
            Arc::new(service),
            ResponseEnricher::new(Arc::new(directory), EnrichmentSettings::default()),
            WorkspaceId::parse(Some("ws-1")),
        );
        message_router().with_state(MessageAppState::new(Arc::new(handler)))
    }

    fn post_json(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/message")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn message_route_returns_enriched_response() {
        let service = MockConversationService::new().with_response(ConversationResponse {
            intents: Some(vec![Intent::new("capital", 0.88)]),
            ..ConversationResponse::with_text("It is {capital}.")
        });
        let directory = InMemoryCountryDirectory::new()
            .with_name("Poland", vec![Country::new("Poland").with_capital("Warsaw")]);

        let response = app(service, directory)
            .oneshot(post_json(json!({"input": {"text": "capital of Poland?"}})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["output"]["text"], json!("It is Warsaw."));
    }

    #[tokio::test]
    async fn message_route_surfaces_upstream_errors() {
        let service = MockConversationService::new().with_error(ConversationError::upstream(
            404,
            json!({"error": "Resource not found", "code": 404}),
        ));

        let response = app(service, InMemoryCountryDirectory::new())
            .oneshot(post_json(json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            json_body(response).await,
            json!({"error": "Resource not found", "code": 404})
        );
    }

    #[tokio::test]
    async fn malformed_json_is_rejected_by_the_extractor() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/message")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let service = MockConversationService::new();
        let response = app(service.clone(), InMemoryCountryDirectory::new())
            .oneshot(request)
            .await
            .unwrap();

        assert!(response.status().is_client_error());
        assert_eq!(service.call_count(), 0);
    }

    #[tokio::test]
    async fn get_is_not_allowed() {
        let request = Request::builder()
            .uri("/api/message")
            .body(Body::empty())
            .unwrap();

        let response = app(MockConversationService::new(), InMemoryCountryDirectory::new())
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
