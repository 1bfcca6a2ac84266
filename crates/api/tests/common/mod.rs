#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use cityfolio_api::config::{AdminCredentials, AppConfig};
use cityfolio_api::state::AppState;
use cityfolio_core::auth::password::hash_password;
use cityfolio_core::auth::token::issue_token;
use cityfolio_core::auth::{NewUser, Role, TokenConfig, User};
use cityfolio_core::media::{CloudinaryConfig, MediaError, MediaHost, UploadFile};
use cityfolio_core::store::{MemoryStore, UserStore};

pub const TEST_SECRET: &str = "integration-test-secret-long-enough";

/// Placeholder for accounts that never log in.
const UNUSED_HASH: &str = "not-a-phc-string";

/// Build a test `AppConfig` with safe defaults.
pub fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: None,
        db_max_connections: 1,
        db_min_connections: 1,
        token: TokenConfig {
            secret: TEST_SECRET.to_string(),
            expiry_hours: 24,
        },
        cloudinary: CloudinaryConfig {
            cloud_name: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            folder: "investment-site".to_string(),
        },
        upload_max_bytes: 1024 * 1024,
        admin: AdminCredentials {
            username: "admin".to_string(),
            email: "admin@investment-site.com".to_string(),
            password: "Admin@123456".to_string(),
        },
        log_level: "debug".to_string(),
    }
}

/// Media host that answers with a predictable URL, or fails on demand.
pub struct StubMedia {
    pub fail: bool,
}

#[async_trait]
impl MediaHost for StubMedia {
    async fn upload(&self, file: UploadFile) -> Result<String, MediaError> {
        if self.fail {
            return Err(MediaError::Rejected {
                status: 400,
                message: "Invalid image file".to_string(),
            });
        }
        Ok(format!(
            "https://res.cloudinary.com/demo/image/upload/investment-site/{}",
            file.file_name
        ))
    }
}

/// The real application router over an in-memory store.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub config: AppConfig,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_media(StubMedia { fail: false })
    }

    pub fn with_media(media: StubMedia) -> Self {
        let config = test_config();
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone(), Arc::new(media), config.clone());
        Self {
            router: cityfolio_api::app(state),
            store,
            config,
        }
    }

    /// Insert an account directly. Its password cannot be used to log in.
    pub async fn seed_user(&self, username: &str, role: Role) -> User {
        self.store
            .insert_user(NewUser {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password_hash: UNUSED_HASH.to_string(),
                role,
            })
            .await
            .unwrap()
    }

    /// Insert an account whose password really hashes.
    pub async fn seed_user_with_password(&self, username: &str, password: &str, role: Role) -> User {
        self.store
            .insert_user(NewUser {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password_hash: hash_password(password).unwrap(),
                role,
            })
            .await
            .unwrap()
    }

    pub fn token_for(&self, user: &User) -> String {
        issue_token(user.id, user.role, &self.config.token).unwrap()
    }

    pub async fn editor_token(&self) -> String {
        let user = self.seed_user("editor", Role::Editor).await;
        self.token_for(&user)
    }

    pub async fn admin_token(&self) -> String {
        let user = self.seed_user("chief", Role::Admin).await;
        self.token_for(&user)
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(request(Method::GET, uri, None, None)).await
    }

    pub async fn get_with_token(&self, uri: &str, token: &str) -> Response<Body> {
        self.send(request(Method::GET, uri, Some(token), None)).await
    }

    pub async fn get_lang(&self, uri: &str, accept_language: &str) -> Response<Body> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header("accept-language", accept_language)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post_json(&self, uri: &str, token: Option<&str>, body: Value) -> Response<Body> {
        self.send(request(Method::POST, uri, token, Some(body))).await
    }

    pub async fn put_json(&self, uri: &str, token: Option<&str>, body: Value) -> Response<Body> {
        self.send(request(Method::PUT, uri, token, Some(body))).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> Response<Body> {
        self.send(request(Method::DELETE, uri, token, None)).await
    }

    /// Create a city through the API and return its stored document.
    pub async fn create_city(&self, token: &str, body: Value) -> Value {
        let response = self.post_json("/api/cities", Some(token), body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }
}

pub fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

/// A complete bilingual city payload.
pub fn city_payload(slug: &str) -> Value {
    serde_json::json!({
        "name": { "ar": "مدينة الاختبار", "de": "Teststadt" },
        "slug": slug,
        "heroImage": "https://res.cloudinary.com/demo/hero.jpg",
        "introText": { "ar": "مقدمة", "de": "Einleitung" },
        "sections": [
            {
                "title": { "ar": "التاريخ", "de": "Geschichte" },
                "content": { "ar": "نص", "de": "Text" },
                "image": "https://res.cloudinary.com/demo/section.jpg",
                "order": 1
            }
        ],
        "activities": [
            {
                "day": { "ar": "اليوم الأول", "de": "Tag 1" },
                "activity": { "ar": "جولة", "de": "Stadtrundgang" }
            }
        ]
    })
}
