mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

fn tour_body(name: &str, secret_tour: bool) -> Value {
    json!({
        "name": name,
        "duration": 14,
        "max_group_size": 12,
        "difficulty": "medium",
        "price": 997.0,
        "summary": "Exploring the jaw-dropping US east coast by foot and by boat",
        "image_cover": "tour-2-cover.jpg",
        "secret_tour": secret_tour
    })
}

#[tokio::test]
async fn test_create_tour_forbidden_for_user_and_guide() {
    let app = TestApp::spawn().await;
    let user = app.signup("Laura", "laura@example.com").await;
    let guide = app
        .signup_with_role("Miyah", "miyah@example.com", "guide")
        .await;

    for token in [user["token"].as_str().unwrap(), guide.as_str()] {
        let response = app
            .post_authenticated("/api/v1/tours", token)
            .json(&tour_body("The Sea Explorer", false))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}

#[tokio::test]
async fn test_lead_guide_manages_tours() {
    let app = TestApp::spawn().await;
    let lead = app
        .signup_with_role("Steve", "steve@example.com", "lead-guide")
        .await;

    let response = app
        .post_authenticated("/api/v1/tours", &lead)
        .json(&tour_body("The Sea Explorer", false))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["slug"], "the-sea-explorer");
    assert_eq!(body["data"]["duration_weeks"], 2.0);
    let tour_id = body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .patch_authenticated(&format!("/api/v1/tours/{}", tour_id), &lead)
        .json(&json!({ "price": 1197.0 }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["price"], 1197.0);

    let response = app
        .delete_authenticated(&format!("/api/v1/tours/{}", tour_id), &lead)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .get(&format!("/api/v1/tours/{}", tour_id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_tour_duplicate_name() {
    let app = TestApp::spawn().await;
    let admin = app
        .signup_with_role("Admin", "admin@example.com", "admin")
        .await;

    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let response = app
            .post_authenticated("/api/v1/tours", &admin)
            .json(&tour_body("The Forest Hiker", false))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), expected);
    }
}

#[tokio::test]
async fn test_create_tour_invalid_discount() {
    let app = TestApp::spawn().await;
    let admin = app
        .signup_with_role("Admin", "admin@example.com", "admin")
        .await;

    let mut body = tour_body("The Forest Hiker", false);
    body["price_discount"] = json!(2000.0);

    let response = app
        .post_authenticated("/api/v1/tours", &admin)
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_secret_tours_are_hidden() {
    let app = TestApp::spawn().await;
    let admin = app
        .signup_with_role("Admin", "admin@example.com", "admin")
        .await;

    app.post_authenticated("/api/v1/tours", &admin)
        .json(&tour_body("The Forest Hiker", false))
        .send()
        .await
        .expect("Failed to execute request");
    let response = app
        .post_authenticated("/api/v1/tours", &admin)
        .json(&tour_body("The Secret Cave Tour", true))
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = response.json().await.expect("Failed to parse response");
    let secret_id = body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .get("/api/v1/tours")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    let tours = body["data"].as_array().unwrap();
    assert_eq!(tours.len(), 1);
    assert_eq!(tours[0]["name"], "The Forest Hiker");

    let response = app
        .get(&format!("/api/v1/tours/{}", secret_id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
