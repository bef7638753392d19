use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use folio_core_forms_contracts::{FormSubmitError, MockFormFeatureService};
use folio_core_health_contracts::{HealthStatus, MockHealthFeatureService};
use folio_models::{
    form::{FormSubmission, FormValidationError, RawFormFields},
    DeliveryId,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;
use tracing_test::traced_test;

use crate::{middlewares::request_id::REQUEST_ID_HEADER, RestServer, RestServerConfig};

fn make_router(health: MockHealthFeatureService, forms: MockFormFeatureService) -> Router {
    RestServer::new(health, forms, RestServerConfig::default()).router()
}

fn forms_router(forms: MockFormFeatureService) -> Router {
    make_router(MockHealthFeatureService::new(), forms)
}

async fn post(router: Router, uri: &str, body: impl Into<Body>) -> Response {
    router
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn ann_contact() -> FormSubmission {
    FormSubmission::contact(RawFormFields {
        name: Some("Ann".into()),
        email: Some("ann@x.com".into()),
        message: Some("Hi".into()),
        service: None,
    })
}

fn ann_contact_json() -> String {
    json!({ "name": "Ann", "email": "ann@x.com", "message": "Hi" }).to_string()
}

#[tokio::test]
async fn contact_ok() {
    // Arrange
    let forms = MockFormFeatureService::new()
        .with_submit(ann_contact(), Ok(DeliveryId::from("msg-1".to_owned())));
    let router = forms_router(forms);

    // Act
    let response = post(router, "/api/contact", ann_contact_json()).await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    assert_eq!(
        json_body(response).await,
        json!({ "success": true, "messageId": "msg-1" })
    );
}

#[tokio::test]
async fn quote_ok() {
    // Arrange
    let submission = FormSubmission::quote(RawFormFields {
        name: Some("Ann".into()),
        email: Some("ann@x.com".into()),
        message: Some("I need a shop".into()),
        service: Some("Web Development".into()),
    });
    let forms = MockFormFeatureService::new()
        .with_submit(submission, Ok(DeliveryId::from("msg-2".to_owned())));
    let router = forms_router(forms);

    // Act
    let response = post(
        router,
        "/api/quote",
        json!({
            "name": "Ann",
            "email": "ann@x.com",
            "message": "I need a shop",
            "service": "Web Development",
        })
        .to_string(),
    )
    .await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "success": true, "messageId": "msg-2" })
    );
}

#[tokio::test]
async fn contact_ignores_service() {
    // Arrange
    let forms = MockFormFeatureService::new()
        .with_submit(ann_contact(), Ok(DeliveryId::from("msg-1".to_owned())));
    let router = forms_router(forms);

    // Act
    let response = post(
        router,
        "/api/contact",
        json!({ "name": "Ann", "email": "ann@x.com", "message": "Hi", "service": "x" })
            .to_string(),
    )
    .await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn absent_and_null_fields_are_missing() {
    // Arrange
    let submission = FormSubmission::contact(RawFormFields {
        email: Some("ann@x.com".into()),
        ..Default::default()
    });
    let forms = MockFormFeatureService::new().with_submit(
        submission,
        Err(FormSubmitError::Validation(FormValidationError::MissingFields)),
    );
    let router = forms_router(forms);

    // Act
    let response = post(
        router,
        "/api/contact",
        json!({ "name": null, "email": "ann@x.com" }).to_string(),
    )
    .await;

    // Assert
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Missing required fields" })
    );
}

#[tokio::test]
async fn submit_errors() {
    for (error, status, message) in [
        (
            FormSubmitError::Validation(FormValidationError::MissingFields),
            StatusCode::BAD_REQUEST,
            "Missing required fields",
        ),
        (
            FormSubmitError::Validation(FormValidationError::InvalidEmail),
            StatusCode::BAD_REQUEST,
            "Invalid email format",
        ),
        (
            FormSubmitError::Validation(FormValidationError::FieldTooLong),
            StatusCode::BAD_REQUEST,
            "Field length exceeds maximum",
        ),
        (
            FormSubmitError::Configuration,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Server configuration error",
        ),
        (
            FormSubmitError::NotificationFailed,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to send email",
        ),
        (
            FormSubmitError::Other(anyhow::anyhow!("template missing")),
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
        ),
    ] {
        // Arrange
        let forms = MockFormFeatureService::new().with_submit(ann_contact(), Err(error));
        let router = forms_router(forms);

        // Act
        let response = post(router, "/api/contact", ann_contact_json()).await;

        // Assert
        assert_eq!(response.status(), status);
        assert_eq!(json_body(response).await, json!({ "error": message }));
    }
}

#[tokio::test]
#[traced_test]
async fn malformed_body() {
    for body in ["{", "[]", r#"{"name": 42}"#] {
        // Arrange
        let router = forms_router(MockFormFeatureService::new());

        // Act
        let response = post(router, "/api/quote", body).await;

        // Assert
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await,
            json!({ "error": "Internal server error" })
        );
    }
    assert!(logs_contain("rejected request body"));
    assert!(!logs_contain("internal server error"));
}

#[tokio::test]
async fn health() {
    for (email, forms, status) in [
        (true, true, StatusCode::OK),
        (false, true, StatusCode::INTERNAL_SERVER_ERROR),
        (true, false, StatusCode::INTERNAL_SERVER_ERROR),
    ] {
        // Arrange
        let health =
            MockHealthFeatureService::new().with_get_status(HealthStatus { email, forms });
        let router = make_router(health, MockFormFeatureService::new());

        // Act
        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), status);
        assert_eq!(
            json_body(response).await,
            json!({ "http": true, "email": email, "forms": forms })
        );
    }
}

#[tokio::test]
async fn cors_allowed_origin() {
    // Arrange
    let config = RestServerConfig::new(&["https://portfolio.example".into()]).unwrap();
    let router = RestServer::new(
        MockHealthFeatureService::new(),
        MockFormFeatureService::new(),
        config,
    )
    .router();

    // Act
    let response = router
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/contact")
                .header(header::ORIGIN, "https://portfolio.example")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Assert
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "https://portfolio.example"
    );
}

#[test]
fn invalid_allowed_origin() {
    assert!(RestServerConfig::new(&["https://bad\norigin".into()]).is_err());
}
