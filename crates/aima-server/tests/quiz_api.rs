mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

use common::{body_json, build_test_app, get, post_json};

use aima_mail::MockMailer;

fn app() -> axum::Router {
    build_test_app(Arc::new(MockMailer::new()))
}

#[tokio::test]
async fn questions_are_listed_in_order() {
    let response = get(app(), "/api/quiz/questions").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["max_points"], 25);
    let questions = json["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 5);
    assert_eq!(questions[0]["id"], 1);
    assert_eq!(questions[0]["options"][0]["id"], "natural");
    assert_eq!(questions[0]["options"][0]["scores"]["microblading"], 5);
}

#[tokio::test]
async fn scoring_returns_report_and_matching_offerings() {
    let body = json!({ "answers": ["natural", "drawing", "subtle", "focused", "specialist"] });
    let response = post_json(app(), "/api/quiz", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let recommendation = &json["report"]["recommendation"];
    assert_eq!(recommendation["program"], "microblading");
    assert_eq!(recommendation["scores"], json!({ "microblading": 24, "microshading": 15, "combo": 13 }));
    assert_eq!(recommendation["compatibility"], json!({ "microblading": 96, "microshading": 60, "combo": 52 }));
    assert_eq!(json["report"]["headline"], "Recommended: Microblading Program");

    let offerings = json["offerings"].as_array().unwrap();
    assert_eq!(offerings.len(), 5);
    assert!(offerings.iter().all(|o| o["program"] == "microblading"));
}

#[tokio::test]
async fn spanish_headline_on_request() {
    let body = json!({
        "answers": ["natural", "makeup", "mixed", "focused", "expand"],
        "language": "es"
    });
    let json = body_json(post_json(app(), "/api/quiz", body).await).await;
    assert_eq!(json["report"]["recommendation"]["program"], "combo");
    assert_eq!(json["report"]["headline"], "Recomendado: Programa Combo");
}

#[tokio::test]
async fn incomplete_answers_are_rejected() {
    let body = json!({ "answers": ["natural", "drawing"] });
    let response = post_json(app(), "/api/quiz", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_ANSWER");
    assert_eq!(json["error"], "quiz incomplete: 2 of 5 questions answered");
}

#[tokio::test]
async fn unknown_option_is_rejected() {
    let body = json!({ "answers": ["natural", "juggling", "subtle", "focused", "specialist"] });
    let response = post_json(app(), "/api/quiz", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "question 1 has no option 'juggling'");
}

#[tokio::test]
async fn courses_filter_by_program() {
    let response = get(app(), "/api/courses?program=combo").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let offerings = json["offerings"].as_array().unwrap();
    assert_eq!(offerings.len(), 4);
    assert_eq!(offerings[0]["start_date"], "2024-03-20");
    assert!(offerings.iter().all(|o| o["program"] == "combo"));
}

#[tokio::test]
async fn courses_available_only() {
    let json = body_json(get(app(), "/api/courses?available=true").await).await;
    let offerings = json["offerings"].as_array().unwrap();
    assert_eq!(offerings.len(), 12);
    assert!(offerings.iter().all(|o| o["status"] == "available"));
}

#[tokio::test]
async fn courses_unknown_program_is_bad_request() {
    let response = get(app(), "/api/courses?program=lash-lift").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "unknown program: lash-lift");
}
