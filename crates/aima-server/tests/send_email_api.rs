mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

use common::{body_json, build_test_app, post_json, post_raw};

use aima_mail::MockMailer;

fn contact_request() -> serde_json::Value {
    json!({
        "to": ["info@allureima.com", "harry@allureima.com"],
        "subject": "New Contact Form Submission",
        "formType": "contact",
        "formData": {
            "firstName": "Ana",
            "lastName": "Reyes",
            "phone": "(714) 555-0199",
            "email": "",
            "message": "Do you offer weekend classes?"
        }
    })
}

#[tokio::test]
async fn contact_form_is_relayed() {
    let mailer = Arc::new(MockMailer::new());
    let app = build_test_app(mailer.clone());

    let response = post_json(app, "/api/send-email", contact_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "success": true }));

    let sent = mailer.last_email().unwrap();
    assert_eq!(sent.to, vec!["info@allureima.com", "harry@allureima.com"]);
    assert_eq!(sent.subject, "New Contact Form Submission");
    assert!(sent.html.contains("<p><strong>Name:</strong> Ana Reyes</p>"));
    assert!(!sent.html.contains("Email:"));
}

#[tokio::test]
async fn enrollment_form_uses_default_subject_when_blank() {
    let mailer = Arc::new(MockMailer::new());
    let app = build_test_app(mailer.clone());

    let body = json!({
        "to": ["info@allureima.com"],
        "subject": "",
        "formType": "enrollment",
        "formData": {
            "firstName": "Lucia",
            "lastName": "Gomez",
            "phone": "5625550110",
            "email": "lucia@example.com",
            "course": "Microshading",
            "startDate": "Feb 21-23, 2025",
            "location": "South Gate"
        }
    });
    let response = post_json(app, "/api/send-email", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let sent = mailer.last_email().unwrap();
    assert_eq!(sent.subject, "New Enrollment Request");
    assert!(sent.html.contains("<p><strong>Course:</strong> Microshading</p>"));
    assert!(sent.html.contains("<p><strong>Email:</strong> lucia@example.com</p>"));
}

#[tokio::test]
async fn unknown_form_type_is_500() {
    let mailer = Arc::new(MockMailer::new());
    let app = build_test_app(mailer.clone());

    let mut body = contact_request();
    body["formType"] = json!("newsletter");
    let response = post_json(app, "/api/send-email", body).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("invalid form type"));
    assert_eq!(mailer.call_count(), 0);
}

#[tokio::test]
async fn empty_recipients_is_500() {
    let mailer = Arc::new(MockMailer::new());
    let app = build_test_app(mailer.clone());

    let mut body = contact_request();
    body["to"] = json!([]);
    let response = post_json(app, "/api/send-email", body).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_json(response).await["error"].is_string());
    assert_eq!(mailer.call_count(), 0);
}

#[tokio::test]
async fn invalid_fields_are_reported() {
    let mailer = Arc::new(MockMailer::new());
    let app = build_test_app(mailer.clone());

    let mut body = contact_request();
    body["formData"]["phone"] = json!("555-0199");
    let response = post_json(app, "/api/send-email", body).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().starts_with("phone:"));
    assert_eq!(mailer.call_count(), 0);
}

#[tokio::test]
async fn malformed_form_data_is_500() {
    let mailer = Arc::new(MockMailer::new());
    let app = build_test_app(mailer.clone());

    let mut body = contact_request();
    body["formData"] = json!("not an object");
    let response = post_json(app, "/api/send-email", body).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("malformed contact form data"));
    assert_eq!(mailer.call_count(), 0);
}

#[tokio::test]
async fn malformed_json_is_500() {
    let app = build_test_app(Arc::new(MockMailer::new()));
    let response = post_raw(app, "/api/send-email", "{ not json".to_string()).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn delivery_failure_is_500_without_details() {
    let mailer = Arc::new(MockMailer::failing("535 authentication failed"));
    let app = build_test_app(mailer.clone());

    let response = post_json(app, "/api/send-email", contact_request()).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Failed to send email");
    assert!(!json.to_string().contains("535"));
    assert_eq!(mailer.call_count(), 1);
}
