//! End-to-end tests with mocked upstream services.
//!
//! These tests run the full server stack in-process with mock implementations
//! of the film catalog (TMDB) and the language model (Anthropic).

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sommelier_core::{CatalogError, LlmError};

use common::{fixtures, TestFixture};

async fn fixture_with_films() -> TestFixture {
    let fixture = TestFixture::new().await;
    fixture
        .catalog
        .set_films(vec![
            fixtures::film(27205, "Inception", "2010"),
            fixtures::film(949, "Heat", "1995"),
            fixtures::film(397422, "Gangs of Wasseypur", "2012"),
            fixtures::film(155, "The Dark Knight", "2008"),
            fixtures::film(49026, "The Dark Knight Rises", "2012"),
        ])
        .await;
    fixture
}

// =============================================================================
// Basic API Tests
// =============================================================================

#[tokio::test]
async fn test_root_banner() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({ "message": "Film Sommelier API is running!" })
    );
}

#[tokio::test]
async fn test_health_endpoint() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/api/health").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_config_endpoint_hides_keys() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/api/config").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["tmdb"]["api_key_configured"], true);
    assert_eq!(response.body["llm"]["api_key_configured"], true);
    assert!(!response.text.contains("test-tmdb-key"));
    assert!(!response.text.contains("test-anthropic-key"));
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let fixture = TestFixture::new().await;
    fixture.get("/api/health").await;

    let response = fixture.get("/metrics").await;

    assert_status!(response, StatusCode::OK);
    assert!(response.text.contains("sommelier_http_requests_total"));
    assert!(response.text.contains("/api/health"));
}

#[tokio::test]
async fn test_unknown_route() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/api/nothing-here").await;

    assert_status!(response, StatusCode::NOT_FOUND);
}

// =============================================================================
// Single Film Search
// =============================================================================

#[tokio::test]
async fn test_search_returns_top_match() {
    let fixture = fixture_with_films().await;
    let response = fixture.get("/api/films/search?query=dark%20knight").await;

    assert_status!(response, StatusCode::OK);
    let film = &response.body["film"];
    assert_eq!(film["id"], 155);
    assert_eq!(film["title"], "The Dark Knight");
    assert_eq!(film["year"], "2008");
    assert_eq!(film["poster_path"], "/poster-155.jpg");
    assert!(film["vote_average"].is_number());
    assert!(film["overview"].is_string());
}

#[tokio::test]
async fn test_search_missing_query() {
    let fixture = fixture_with_films().await;

    let response = fixture.get("/api/films/search").await;
    assert_error!(response, StatusCode::BAD_REQUEST, "Query parameter is required");

    let response = fixture.get("/api/films/search?query=").await;
    assert_error!(response, StatusCode::BAD_REQUEST, "Query parameter is required");

    assert_eq!(fixture.catalog.query_count().await, 0);
}

#[tokio::test]
async fn test_search_not_found() {
    let fixture = fixture_with_films().await;
    let response = fixture.get("/api/films/search?query=Zzyzx").await;

    assert_error!(response, StatusCode::NOT_FOUND, "Film not found");
}

#[tokio::test]
async fn test_search_upstream_failure_is_not_found() {
    let fixture = fixture_with_films().await;
    fixture
        .catalog
        .set_next_error(CatalogError::RateLimitExceeded)
        .await;

    let response = fixture.get("/api/films/search?query=Heat").await;

    assert_error!(response, StatusCode::NOT_FOUND, "Film not found");
}

// =============================================================================
// Autocomplete
// =============================================================================

#[tokio::test]
async fn test_search_query_limits_to_five() {
    let fixture = TestFixture::new().await;
    let films = (1..=7)
        .map(|i| fixtures::film(i, &format!("Alien {}", i), "1979"))
        .collect();
    fixture.catalog.set_films(films).await;

    let response = fixture.get("/api/films/search-query?query=alien").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    let films = response.body["films"].as_array().unwrap();
    assert_eq!(films.len(), 5);
    assert_eq!(films[0]["id"], 1);
}

#[tokio::test]
async fn test_search_query_single_character_without_matches() {
    let fixture = fixture_with_films().await;
    let response = fixture.get("/api/films/search-query?query=q").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body, json!({ "success": true, "films": [] }));
}

#[tokio::test]
async fn test_search_query_upstream_failure() {
    let fixture = fixture_with_films().await;
    fixture
        .catalog
        .set_next_error(CatalogError::ApiError {
            status: 503,
            message: "Service Unavailable".to_string(),
        })
        .await;

    let response = fixture.get("/api/films/search-query?query=heat").await;

    assert_error!(
        response,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Failed to search for films"
    );
    assert!(!response.text.contains("Service Unavailable"));
}

#[tokio::test]
async fn test_search_query_missing_query() {
    let fixture = fixture_with_films().await;
    let response = fixture.get("/api/films/search-query").await;

    assert_error!(response, StatusCode::BAD_REQUEST, "Query parameter is required");
}

// =============================================================================
// Multi-title Search
// =============================================================================

#[tokio::test]
async fn test_search_multiple_preserves_order_and_drops_misses() {
    let fixture = fixture_with_films().await;
    fixture.catalog.fail_query("Heat").await;

    let response = fixture
        .post(
            "/api/films/search-multiple",
            json!({ "titles": ["Inception", "Unknown Film", "Heat", "Gangs of Wasseypur"] }),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    let titles: Vec<&str> = response.body["films"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Inception", "Gangs of Wasseypur"]);
    assert_eq!(fixture.catalog.query_count().await, 4);
}

#[tokio::test]
async fn test_search_multiple_validation() {
    let fixture = fixture_with_films().await;

    let response = fixture
        .post("/api/films/search-multiple", json!({ "titles": [] }))
        .await;
    assert_error!(response, StatusCode::BAD_REQUEST, "Titles array is required");

    let response = fixture.post("/api/films/search-multiple", json!({})).await;
    assert_error!(response, StatusCode::BAD_REQUEST, "Titles array is required");

    let response = fixture
        .post("/api/films/search-multiple", json!({ "titles": "Heat" }))
        .await;
    assert_error!(response, StatusCode::BAD_REQUEST, "Titles array is required");

    let response = fixture
        .post_raw("/api/films/search-multiple", "{not json")
        .await;
    assert_error!(response, StatusCode::BAD_REQUEST, "Titles array is required");

    assert_eq!(fixture.catalog.query_count().await, 0);
}

// =============================================================================
// Recommendations
// =============================================================================

#[tokio::test]
async fn test_recommendations_end_to_end() {
    let fixture = TestFixture::new().await;
    fixture
        .llm
        .set_response(fixtures::recommendations_json(&[
            "Memento",
            "The Prestige",
            "Shutter Island",
            "Primer",
            "Arrival",
        ]))
        .await;

    let response = fixture
        .post(
            "/api/recommendations",
            json!({
                "films": [{ "title": "Inception", "year": "2010" }],
                "context": "Nolan-style",
                "excludeFilms": ["Tenet"]
            }),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    let recs = response.body["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 5);
    assert_eq!(recs[0]["title"], "Memento");
    assert_eq!(recs[0]["reason"], "You will like Memento.");

    let prompts = fixture.llm.recorded_prompts().await;
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].matches("Inception (2010)").count(), 1);
    assert_eq!(prompts[0].matches("Nolan-style").count(), 1);
    assert_eq!(prompts[0].matches("Tenet").count(), 1);
    assert_eq!(fixture.llm.recorded_requests().await[0].max_tokens, 2000);
}

#[tokio::test]
async fn test_recommendations_accept_full_film_records() {
    let fixture = TestFixture::new().await;
    let film = fixtures::film(27205, "Inception", "2010");

    let response = fixture
        .post("/api/recommendations", json!({ "films": [film] }))
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["recommendations"], json!([]));

    let prompts = fixture.llm.recorded_prompts().await;
    assert!(prompts[0].contains("- Inception (2010)"));
    assert!(!prompts[0].contains("Do not recommend"));
}

#[tokio::test]
async fn test_recommendations_empty_films_makes_no_model_call() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post("/api/recommendations", json!({ "films": [] }))
        .await;
    assert_error!(response, StatusCode::BAD_REQUEST, "Films array is required");

    let response = fixture
        .post("/api/recommendations", json!({ "context": "anything" }))
        .await;
    assert_error!(response, StatusCode::BAD_REQUEST, "Films array is required");

    let response = fixture
        .post_with_content_type("/api/recommendations", "films=Heat", "text/plain")
        .await;
    assert_error!(response, StatusCode::BAD_REQUEST, "Films array is required");

    assert_eq!(fixture.llm.call_count().await, 0);
}

#[tokio::test]
async fn test_recommendations_null_optional_fields() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post(
            "/api/recommendations",
            json!({
                "films": [{ "title": "Heat", "year": "1995" }],
                "context": null,
                "excludeFilms": null
            }),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    let prompts = fixture.llm.recorded_prompts().await;
    assert!(!prompts[0].contains("What I liked"));
    assert!(!prompts[0].contains("Do not recommend"));
}

#[tokio::test]
async fn test_recommendations_bad_optional_field_types() {
    let fixture = TestFixture::new().await;

    for body in [
        json!({ "films": [{ "title": "Heat" }], "context": 42 }),
        json!({ "films": [{ "title": "Heat" }], "excludeFilms": "Ronin" }),
    ] {
        let response = fixture.post("/api/recommendations", body).await;
        assert_error!(
            response,
            StatusCode::BAD_REQUEST,
            "Invalid recommendation request"
        );
    }

    assert_eq!(fixture.llm.call_count().await, 0);
}

#[tokio::test]
async fn test_recommendations_model_failure_is_opaque() {
    let fixture = TestFixture::new().await;
    fixture
        .llm
        .set_next_error(LlmError::Api {
            status: 529,
            message: "Overloaded".to_string(),
        })
        .await;

    let response = fixture
        .post(
            "/api/recommendations",
            json!({ "films": [{ "title": "Heat", "year": "1995" }] }),
        )
        .await;

    assert_error!(
        response,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Failed to get recommendations"
    );
    assert!(!response.text.contains("Overloaded"));
}

#[tokio::test]
async fn test_recommendations_malformed_model_reply() {
    let fixture = TestFixture::new().await;
    fixture
        .llm
        .set_response("I'd suggest watching Memento, it's great.")
        .await;

    let response = fixture
        .post(
            "/api/recommendations",
            json!({ "films": [{ "title": "Heat", "year": "1995" }] }),
        )
        .await;

    assert_error!(
        response,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Failed to get recommendations"
    );
}

#[tokio::test]
async fn test_recommendations_reply_with_prose_is_failure() {
    let fixture = TestFixture::new().await;
    fixture.llm.set_response("Sorry, nothing fits. []").await;

    let response = fixture
        .post(
            "/api/recommendations",
            json!({ "films": [{ "title": "Heat", "year": "1995" }] }),
        )
        .await;

    assert_error!(
        response,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Failed to get recommendations"
    );
}

#[tokio::test]
async fn test_recommendations_fenced_model_reply() {
    let fixture = TestFixture::new().await;
    fixture
        .llm
        .set_response(format!(
            "```json\n{}\n```",
            fixtures::recommendations_json(&["Ronin", "Collateral"])
        ))
        .await;

    let response = fixture
        .post(
            "/api/recommendations",
            json!({ "films": [{ "title": "Heat", "year": "1995" }] }),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(
        response.body["recommendations"],
        json!([
            { "title": "Ronin", "reason": "You will like Ronin." },
            { "title": "Collateral", "reason": "You will like Collateral." }
        ])
    );
}

// =============================================================================
// CORS
// =============================================================================

#[tokio::test]
async fn test_cors_allows_any_origin() {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let fixture = TestFixture::new().await;
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/recommendations")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .body(Body::empty())
        .unwrap();

    let response = fixture.router.clone().oneshot(request).await.unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}
