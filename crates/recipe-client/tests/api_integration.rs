//! Integration tests for the recipe backend client
//!
//! These tests use wiremock to stand in for the backend and exercise the full
//! request/response cycle, envelope normalization, and error mapping.

use recipe_client::{
    ApiClient, ApiConfig, AuthApi, Difficulty, Error, LoginRequest, RecipeApi, RegisterRequest,
    TokenProvider,
};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct StaticToken(Option<String>);

impl TokenProvider for StaticToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

fn recipe(id: &str, title: &str, category: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "category": category,
        "difficulty": "Mudah",
        "time": "30 menit",
        "servings": "2 porsi",
        "image": format!("https://img.example.com/{}.jpg", id),
        "description": "",
        "ingredients": [],
        "steps": []
    })
}

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ApiConfig::new(server.uri())).unwrap()
}

// =============================================================================
// Recipe Endpoints
// =============================================================================

#[tokio::test]
async fn test_list_recipes_wrapped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [recipe("1", "Nasi Goreng", "Nasi"), recipe("2", "Soto Ayam", "Sup")]
        })))
        .mount(&mock_server)
        .await;

    let recipes = client_for(&mock_server).list_recipes().await.unwrap();

    assert_eq!(recipes.len(), 2);
    assert_eq!(recipes[0].title, "Nasi Goreng");
    assert_eq!(recipes[1].category, "Sup");
}

#[tokio::test]
async fn test_list_recipes_bare_array() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipes"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([recipe("1", "Nasi Goreng", "Nasi")])),
        )
        .mount(&mock_server)
        .await;

    let recipes = client_for(&mock_server).list_recipes().await.unwrap();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].difficulty, Difficulty::Mudah);
}

#[tokio::test]
async fn test_list_recipes_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&mock_server)
        .await;

    let recipes = client_for(&mock_server).list_recipes().await.unwrap();
    assert!(recipes.is_empty());
}

#[tokio::test]
async fn test_get_recipe_both_shapes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipes/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": recipe("1", "Nasi Goreng", "Nasi") })),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/recipes/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(recipe("2", "Soto Ayam", "Sup")))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert_eq!(client.get_recipe("1").await.unwrap().title, "Nasi Goreng");
    assert_eq!(client.get_recipe("2").await.unwrap().title, "Soto Ayam");
}

#[tokio::test]
async fn test_get_recipe_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipes/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not found" })))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).get_recipe("404").await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_server_error_carries_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipes"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "Database unavailable" })),
        )
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).list_recipes().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.server_message(), Some("Database unavailable"));
}

#[tokio::test]
async fn test_server_error_without_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipes"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).list_recipes().await.unwrap_err();
    assert!(matches!(err, Error::Api { status: 502, message: None }));
}

#[tokio::test]
async fn test_malformed_body_is_json_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipes"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).list_recipes().await.unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

// =============================================================================
// Headers
// =============================================================================

#[tokio::test]
async fn test_bearer_token_attached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipes"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server)
        .with_token_provider(Arc::new(StaticToken(Some("secret-token".to_string()))));

    client.list_recipes().await.unwrap();
}

#[tokio::test]
async fn test_no_token_no_authorization_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).with_token_provider(Arc::new(StaticToken(None)));
    client.list_recipes().await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_default_headers_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipes"))
        .and(header("x-client", "mobile"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ApiConfig::new(mock_server.uri()).with_header("X-Client", "mobile");
    ApiClient::new(config).unwrap().list_recipes().await.unwrap();
}

// =============================================================================
// Auth Endpoints
// =============================================================================

#[tokio::test]
async fn test_login_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "email": "ibu.siti@email.com", "password": "rahasia" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "jwt-token",
            "user": { "id": 1, "name": "Ibu Siti", "email": "ibu.siti@email.com" }
        })))
        .mount(&mock_server)
        .await;

    let response = client_for(&mock_server)
        .login(&LoginRequest {
            email: "ibu.siti@email.com".to_string(),
            password: "rahasia".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(response.token, "jwt-token");
    assert_eq!(response.user.name, "Ibu Siti");
    assert_eq!(response.user.extra.get("id"), Some(&json!(1)));
}

#[tokio::test]
async fn test_login_failure_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid password" })),
        )
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .login(&LoginRequest {
            email: "ibu.siti@email.com".to_string(),
            password: "salah".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.server_message(), Some("Invalid password"));
}

#[tokio::test]
async fn test_register_accepts_empty_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(json!({
            "name": "Ibu Siti",
            "email": "ibu.siti@email.com",
            "password": "rahasia"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    client_for(&mock_server)
        .register(&RegisterRequest {
            name: "Ibu Siti".to_string(),
            email: "ibu.siti@email.com".to_string(),
            password: "rahasia".to_string(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_register_conflict() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "message": "Email already registered" })),
        )
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .register(&RegisterRequest {
            name: "Ibu Siti".to_string(),
            email: "ibu.siti@email.com".to_string(),
            password: "rahasia".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.server_message(), Some("Email already registered"));
}
