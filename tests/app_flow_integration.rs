//! End-to-end application flow tests
//!
//! These tests wire a real sled store (in a temp dir) and a wiremock backend
//! through `AppContext`, simulating restarts by reopening the store.

use rahasia_dapur::app_core::auth::{LoginForm, RegisterForm};
use rahasia_dapur::app_core::recipes::{FeedView, Projection, RefreshOutcome, ALL_CATEGORY};
use rahasia_dapur::app_state::{ColorScheme, ThemePreference};
use rahasia_dapur::app_ui::navigation::{available_tabs, DetailTab, NoticeKind, Route};
use rahasia_dapur::recipe_client::ApiConfig;
use rahasia_dapur::storage::{KvConfig, KvStore};
use rahasia_dapur::{AppConfig, AppContext};
use serde_json::json;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(dir: &Path, base_url: &str) -> AppConfig {
    let kv = KvConfig::new(dir.join("kv.db").to_string_lossy()).flush_every_ms(None);
    AppConfig::new(kv, ApiConfig::new(base_url))
}

fn recipes_json() -> serde_json::Value {
    json!([
        {
            "id": "1",
            "title": "Nasi Goreng",
            "category": "Nasi",
            "difficulty": "Mudah",
            "time": "15 menit",
            "image": "https://img.example.com/nasi.jpg"
        },
        {
            "id": "2",
            "title": "Soto Ayam",
            "category": "Sup",
            "difficulty": "Sedang",
            "time": "45 menit",
            "image": "https://img.example.com/soto.jpg"
        }
    ])
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "jwt-token",
            "user": { "id": 1, "name": "Ibu Siti", "email": "ibu.siti@email.com" }
        })))
        .mount(server)
        .await;
}

fn login_form() -> LoginForm {
    LoginForm { email: "ibu.siti@email.com".to_string(), password: "rahasia".to_string() }
}

/// Theme preference survives a restart
#[test]
fn test_theme_preference_survives_restart() {
    let temp_dir = TempDir::new().unwrap();

    {
        let ctx = AppContext::new(config(temp_dir.path(), "http://127.0.0.1:9"), None).unwrap();
        assert_eq!(ctx.theme().preference(), ThemePreference::System);
        ctx.theme().set_preference(ThemePreference::Dark);
        ctx.theme().set_preference(ThemePreference::Light);
        ctx.theme().set_preference(ThemePreference::Dark);
    }

    {
        let ctx = AppContext::new(
            config(temp_dir.path(), "http://127.0.0.1:9"),
            Some(ColorScheme::Light),
        )
        .unwrap();
        assert_eq!(ctx.theme().preference(), ThemePreference::Dark);
        assert_eq!(ctx.theme().effective_scheme(), ColorScheme::Dark);
        assert!(ctx.palette().is_dark());
    }
}

/// Login persists the session, redirects, and the token is sent afterwards
#[tokio::test]
async fn test_login_then_browse() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/recipes"))
        .and(header("authorization", "Bearer jwt-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": recipes_json() })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/recipes/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 2,
            "title": "Soto Ayam",
            "category": "Sup",
            "difficulty": "Sedang",
            "time": "45 menit",
            "servings": "4 porsi",
            "image": "https://img.example.com/soto.jpg",
            "description": "Soto ayam kuning",
            "ingredients": ["1 ekor ayam"],
            "steps": ["Rebus ayam"],
            "videoUrl": "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "tips": ["Gunakan ayam kampung"]
        })))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let mut ctx = AppContext::new(config(temp_dir.path(), &server.uri()), None).unwrap();
    assert_eq!(ctx.navigation().current_route(), &Route::Login);

    let user = ctx.login(&login_form()).await.unwrap();
    assert_eq!(user.name, "Ibu Siti");
    assert_eq!(ctx.navigation().current_route(), &Route::Home);
    assert!(!ctx.navigation().can_go_back());

    assert_eq!(ctx.feed().view(), FeedView::NotLoaded);
    assert_eq!(ctx.feed().refresh().await.unwrap(), RefreshOutcome::Applied(2));
    assert_eq!(ctx.feed().categories(), vec![ALL_CATEGORY, "Nasi", "Sup"]);

    ctx.feed().select_category("Sup");
    match ctx.feed().view() {
        FeedView::Loaded(Projection::Results(recipes)) => {
            assert_eq!(recipes.len(), 1);
            assert_eq!(recipes[0].title, "Soto Ayam");
        }
        other => panic!("unexpected view: {:?}", other),
    }

    assert!(ctx
        .navigation_mut()
        .navigate(Route::RecipeDetail { id: "2".to_string() }));
    let recipe = ctx.feed().fetch_detail("2").await.unwrap().unwrap();
    assert_eq!(
        available_tabs(&recipe),
        vec![DetailTab::Ingredients, DetailTab::Steps, DetailTab::Tips, DetailTab::Video]
    );
}

/// Session survives restart; logout clears it
#[tokio::test]
async fn test_session_survives_restart_until_logout() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    let temp_dir = TempDir::new().unwrap();

    {
        let mut ctx = AppContext::new(config(temp_dir.path(), &server.uri()), None).unwrap();
        ctx.login(&login_form()).await.unwrap();
    }

    {
        let mut ctx = AppContext::new(config(temp_dir.path(), &server.uri()), None).unwrap();
        assert_eq!(ctx.navigation().current_route(), &Route::Home);
        let user = ctx.current_user().unwrap();
        assert_eq!(user.extra.get("id"), Some(&json!(1)));

        ctx.navigation_mut().open_drawer();
        ctx.navigation_mut().request_logout();
        ctx.logout().unwrap();
        assert_eq!(ctx.navigation().current_route(), &Route::Login);
        assert!(!ctx.navigation().is_drawer_open());
        assert_eq!(ctx.navigation().notice().unwrap().title, "Berhasil Keluar");
    }

    {
        let ctx = AppContext::new(config(temp_dir.path(), &server.uri()), None).unwrap();
        assert_eq!(ctx.navigation().current_route(), &Route::Login);
        assert_eq!(ctx.sessions().load_session(), None);
    }
}

/// Session written by the previous client as separate keys is picked up
#[test]
fn test_legacy_session_keys_are_read() {
    let temp_dir = TempDir::new().unwrap();
    let cfg = config(temp_dir.path(), "http://127.0.0.1:9");

    {
        use rahasia_dapur::storage::KeyValueStore;
        let kv = KvStore::new(cfg.kv.clone()).unwrap();
        kv.set("token", "legacy-token").unwrap();
        kv.set("user", r#"{"name":"Pak Budi","email":"budi@email.com"}"#).unwrap();
        kv.flush().unwrap();
    }

    let ctx = AppContext::new(cfg, None).unwrap();
    assert_eq!(ctx.navigation().current_route(), &Route::Home);
    assert_eq!(ctx.current_user().unwrap().name, "Pak Budi");
}

/// Failed login shows a localized message and stays on the login screen
#[tokio::test]
async fn test_failed_login_stays_on_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "User not found" })))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let mut ctx = AppContext::new(config(temp_dir.path(), &server.uri()), None).unwrap();

    let err = ctx.login(&login_form()).await.unwrap_err();
    assert_eq!(err.user_message(), "Email tidak ditemukan");
    assert_eq!(ctx.navigation().current_route(), &Route::Login);
    assert_eq!(ctx.current_user(), None);
}

/// Registration pushes the login screen without signing in
#[tokio::test]
async fn test_register_then_login_screen() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let mut ctx = AppContext::new(config(temp_dir.path(), &server.uri()), None).unwrap();
    ctx.navigation_mut().navigate(Route::Register);

    ctx.register(&RegisterForm {
        name: "Ibu Siti".to_string(),
        email: "ibu.siti@email.com".to_string(),
        password: "rahasia".to_string(),
        confirm_password: "rahasia".to_string(),
    })
    .await
    .unwrap();

    assert_eq!(ctx.navigation().current_route(), &Route::Login);
    assert!(ctx.navigation().can_go_back());
    assert_eq!(ctx.current_user(), None);

    let notice = ctx.navigation().notice().unwrap();
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.title, "Registrasi Berhasil");
    assert_eq!(notice.subtitle.as_deref(), Some("Silakan login dengan akun baru Anda"));
    assert_eq!(notice.duration, Duration::from_millis(5000));
}
