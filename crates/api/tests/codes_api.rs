//! Integration tests for the HTTP surface: health, code table listing,
//! single-code envelopes and loose envelope building.

mod common;

use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use common::{body_json, get, get_as, post_json, post_raw};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: GET /health answers with a success envelope
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_returns_success_envelope() {
    let response = get(common::build_test_app(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/json");

    let json = body_json(response).await;
    assert_eq!(json["code"], 0);
    assert_eq!(json["message"], "SUCCESS");
    assert_eq!(json["data"]["status"], "ok");
    assert!(json.get("pagination").is_none());
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let response = get(common::build_test_app(), "/health").await;

    let request_id = response.headers().get("x-request-id");
    assert!(
        request_id.is_some(),
        "Response must contain an x-request-id header"
    );
    assert_eq!(request_id.unwrap().to_str().unwrap().len(), 36);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let response = get(common::build_test_app(), "/this-route-does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: GET /api/v1/codes paginates the code table
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_codes_first_page_uses_default_page_size() {
    let response = get(common::build_test_app(), "/api/v1/codes").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["code"], 0);
    assert_eq!(json["data"].as_array().unwrap().len(), 8);
    assert_eq!(json["data"][0], json!({ "code": -1, "message": "Unknown error", "kind": "logic" }));
    assert_eq!(json["data"][1]["kind"], "success");
    assert_eq!(
        json["pagination"],
        json!({
            "total_record": 9,
            "page": 1,
            "pagesize": 8,
            "count": 8,
            "page_count": 2,
            "more": 1
        })
    );
}

#[tokio::test]
async fn list_codes_last_page_has_no_more() {
    let response = get(common::build_test_app(), "/api/v1/codes?page=2&pagesize=8").await;
    let json = body_json(response).await;

    assert_eq!(json["data"], json!([{ "code": 1006, "message": "Mobile number does not exist", "kind": "business" }]));
    assert_eq!(json["pagination"]["count"], 1);
    assert_eq!(json["pagination"]["more"], 0);
}

#[tokio::test]
async fn list_codes_tolerates_garbage_params() {
    let response = get(common::build_test_app(), "/api/v1/codes?page=abc&pagesize=-5").await;
    let json = body_json(response).await;

    assert_eq!(json["pagination"]["page"], 1);
    assert_eq!(json["pagination"]["pagesize"], 8);
}

#[tokio::test]
async fn list_codes_past_the_end_is_empty() {
    let response = get(common::build_test_app(), "/api/v1/codes?page=9&pagesize=4").await;
    let json = body_json(response).await;

    assert_eq!(json["data"], json!([]));
    assert_eq!(json["pagination"]["page"], 9);
    assert_eq!(json["pagination"]["page_count"], 3);
    assert_eq!(json["pagination"]["more"], 0);
}

#[tokio::test]
async fn configured_default_page_size_is_used() {
    let mut config = common::test_config();
    config.default_page_size = 4;

    let response = get(common::build_test_app_with(config), "/api/v1/codes").await;
    let json = body_json(response).await;

    assert_eq!(json["data"].as_array().unwrap().len(), 4);
    assert_eq!(json["pagination"]["page_count"], 3);
}

// ---------------------------------------------------------------------------
// Test: GET /api/v1/codes/{code}
// ---------------------------------------------------------------------------

#[tokio::test]
async fn show_known_code() {
    let response = get(common::build_test_app(), "/api/v1/codes/1005").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(
        json,
        json!({ "code": 1005, "message": "Incorrect password", "data": [] })
    );
}

#[tokio::test]
async fn show_code_with_message_override() {
    let response = get(
        common::build_test_app(),
        "/api/v1/codes/1004?message=Too%20short",
    )
    .await;
    let json = body_json(response).await;

    assert_eq!(json["code"], 1004);
    assert_eq!(json["message"], "Too short");
}

#[tokio::test]
async fn list_codes_ignores_unreadable_query() {
    let response = get(common::build_test_app(), "/api/v1/codes?page=2&page=3").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(CONTENT_TYPE).is_some());

    let json = body_json(response).await;
    assert_eq!(json["code"], 0);
    assert_eq!(json["pagination"]["page"], 1);
}

#[tokio::test]
async fn show_non_numeric_code_casts_to_zero() {
    let json = body_json(get(common::build_test_app(), "/api/v1/codes/abc").await).await;

    assert_eq!(json["code"], -1);
    assert_eq!(json["message"], "SUCCESS");
    assert_eq!(json["data"], json!([]));
}

#[tokio::test]
async fn show_zero_code_reports_unknown_error() {
    let json = body_json(get(common::build_test_app(), "/api/v1/codes/0").await).await;

    assert_eq!(json["code"], -1);
    assert_eq!(json["message"], "SUCCESS");
}

#[tokio::test]
async fn show_unauthorized_code_returns_401() {
    let response = get(common::build_test_app(), "/api/v1/codes/10000").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], 10000);
}

#[tokio::test]
async fn msie9_gets_no_content_type() {
    let response = get_as(
        common::build_test_app(),
        "/api/v1/codes/1003",
        "Mozilla/5.0 (compatible; MSIE 9.0; Windows NT 6.1; Trident/5.0)",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(CONTENT_TYPE).is_none());

    let json = body_json(response).await;
    assert_eq!(json["message"], "Account does not exist");
}

// ---------------------------------------------------------------------------
// Test: POST /api/v1/envelope infers the input shape
// ---------------------------------------------------------------------------

#[tokio::test]
async fn envelope_from_numeric_string_is_error() {
    let response = post_json(
        common::build_test_app(),
        "/api/v1/envelope",
        json!({ "primary": "1001" }),
    )
    .await;
    let json = body_json(response).await;

    assert_eq!(json["code"], 1001);
    assert_eq!(json["message"], "Please enter account and password");
}

#[tokio::test]
async fn envelope_from_array_is_payload_with_pagination() {
    let pagination = json!({ "total_record": 20, "page": 1 });
    let response = post_json(
        common::build_test_app(),
        "/api/v1/envelope",
        json!({ "primary": ["abc"], "secondary": pagination }),
    )
    .await;
    let json = body_json(response).await;

    assert_eq!(json["code"], 0);
    assert_eq!(json["data"], json!(["abc"]));
    assert_eq!(json["pagination"], pagination);
}

#[tokio::test]
async fn envelope_from_text_is_message() {
    let json = body_json(
        post_json(
            common::build_test_app(),
            "/api/v1/envelope",
            json!({ "primary": "Profile saved" }),
        )
        .await,
    )
    .await;

    assert_eq!(json, json!({ "code": 0, "message": "Profile saved", "data": [] }));
}

#[tokio::test]
async fn envelope_from_false_is_unknown_error() {
    let json = body_json(
        post_json(
            common::build_test_app(),
            "/api/v1/envelope",
            json!({ "primary": false }),
        )
        .await,
    )
    .await;

    assert_eq!(json["code"], -1);
    assert_eq!(json["message"], "SUCCESS");
}

#[tokio::test]
async fn malformed_body_still_gets_envelope() {
    let response = post_raw(
        common::build_test_app(),
        "/api/v1/envelope",
        "{not json",
        Some("application/json"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/json");

    let json = body_json(response).await;
    assert_eq!(
        json,
        json!({ "code": -1, "message": "Request body is not valid JSON", "data": [] })
    );
}

#[tokio::test]
async fn body_without_content_type_is_still_read() {
    let response = post_raw(
        common::build_test_app(),
        "/api/v1/envelope",
        r#"{"primary": "1003"}"#,
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["code"], 1003);
    assert_eq!(json["message"], "Account does not exist");
}

#[tokio::test]
async fn empty_body_without_content_type_gets_envelope() {
    let response = post_raw(common::build_test_app(), "/api/v1/envelope", "", None).await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["code"], -1);
    assert_eq!(json["message"], "Request body is not valid JSON");
}
