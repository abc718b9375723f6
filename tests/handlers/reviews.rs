//! Integration tests for review routes.

use axum::http::StatusCode;
use serde_json::json;

#[path = "../common/mod.rs"]
mod common;
use common::*;

#[tokio::test]
async fn test_any_user_can_review() {
    let t = test_app();
    let product = create_test_product(&t.state);
    let (user, key) = create_test_user(&t.state, "buyer@test.com");

    let (status, body) = t
        .send(request(
            "POST",
            &format!("/resource/products/{}/reviews", product.id),
            Some(&key),
            Some(json!({ "rating": 4, "comment": "Calm and healthy" })),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["numReviews"], 1);
    assert_eq!(body["rating"].as_f64(), Some(4.0));
    assert_eq!(body["reviews"][0]["user"], user.id.as_str());
    assert_eq!(body["reviews"][0]["name"], user.name.as_str());
    assert!(body["reviews"][0]["_id"].as_str().unwrap().starts_with("sy_rev_"));
}

#[tokio::test]
async fn test_review_validation() {
    let t = test_app();
    let product = create_test_product(&t.state);
    let (_, key) = create_test_user(&t.state, "buyer@test.com");
    let uri = format!("/resource/products/{}/reviews", product.id);

    let (status, body) = t
        .send(request("POST", &uri, Some(&key), Some(json!({ "rating": 6, "comment": "x" }))))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Rating must be between 0 and 5");

    let (status, body) = t
        .send(request("POST", &uri, Some(&key), Some(json!({ "rating": 3, "comment": " " }))))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Comment is required");
}

#[tokio::test]
async fn test_review_requires_credential() {
    let t = test_app();
    let product = create_test_product(&t.state);

    let (status, body) = t
        .send(request(
            "POST",
            &format!("/resource/products/{}/reviews", product.id),
            None,
            Some(json!({ "rating": 4, "comment": "Nice" })),
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token is not supplied");
}

#[tokio::test]
async fn test_admin_deletes_review_and_aggregate_follows() {
    let t = test_app();
    let admin_key = t.admin_key();
    let product = create_test_product(&t.state);
    let (_, a_key) = create_test_user(&t.state, "a@test.com");
    let (_, b_key) = create_test_user(&t.state, "b@test.com");
    let uri = format!("/resource/products/{}/reviews", product.id);

    t.send(request("POST", &uri, Some(&a_key), Some(json!({ "rating": 2, "comment": "Meh" }))))
        .await;
    let (_, body) = t
        .send(request("POST", &uri, Some(&b_key), Some(json!({ "rating": 4, "comment": "Good" }))))
        .await;
    assert_eq!(body["rating"].as_f64(), Some(3.0));
    let review_id = body["reviews"][0]["_id"].as_str().unwrap().to_string();

    // Members cannot moderate
    let (status, _) = t
        .send(request("DELETE", &format!("{}/{}", uri, review_id), Some(&b_key), None))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = t
        .send(request("DELETE", &format!("{}/{}", uri, review_id), Some(&admin_key), None))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["numReviews"], 1);
    assert_eq!(body["rating"].as_f64(), Some(4.0));

    let (status, body) = t
        .send(request("DELETE", &format!("{}/{}", uri, review_id), Some(&admin_key), None))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Review not found");
}
