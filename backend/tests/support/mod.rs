//! Shared harness for HTTP integration tests.
//!
//! Builds the full application over in-memory repositories, records published
//! profile events, and wraps the request/cookie plumbing the tests repeat.

#![allow(dead_code, reason = "each test crate uses a different subset")]

use std::sync::{Arc, Mutex};

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use docshare::domain::ports::UserRepository;
use docshare::domain::{Document, ProfileEvent, UserId, Username};
use docshare::inbound::http::health::HealthState;
use docshare::inbound::http::session_config::{SESSION_COOKIE_NAME, SessionSettings};
use docshare::outbound::events::{ProfileEventReceiver, SignalDispatcher};
use docshare::outbound::memory::{
    InMemoryDocumentRepository, InMemoryFollowRepository, InMemoryUserRepository,
};
use docshare::server::{AppDependencies, http_state_from_repositories};
use serde_json::Value;
use uuid::Uuid;

/// Event name with follower and following usernames.
pub type RecordedEvent = (String, String, String);

/// Receiver capturing every event it is handed.
#[derive(Default)]
pub struct RecordingReceiver {
    events: Mutex<Vec<RecordedEvent>>,
}

impl RecordingReceiver {
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().expect("events lock").clone()
    }
}

#[async_trait]
impl ProfileEventReceiver for RecordingReceiver {
    async fn receive(&self, event: &ProfileEvent) -> Result<(), String> {
        let payload = event.payload();
        self.events.lock().expect("events lock").push((
            event.name().to_owned(),
            payload.follower.username().to_string(),
            payload.following.username().to_string(),
        ));
        Ok(())
    }
}

/// Repositories and recorders behind one application instance.
pub struct World {
    pub users: Arc<InMemoryUserRepository>,
    pub follows: Arc<InMemoryFollowRepository>,
    pub documents: Arc<InMemoryDocumentRepository>,
    pub events: Arc<RecordingReceiver>,
    deps: AppDependencies,
}

impl World {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let follows = Arc::new(InMemoryFollowRepository::default());
        let documents = Arc::new(InMemoryDocumentRepository::default());
        let events = Arc::new(RecordingReceiver::default());
        let dispatcher = SignalDispatcher::default();
        dispatcher.connect("recorder", events.clone());

        let http_state = http_state_from_repositories(
            users.clone(),
            follows.clone(),
            documents.clone(),
            Arc::new(dispatcher),
        );
        let deps = AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: web::Data::new(http_state),
            session: SessionSettings {
                key: Key::generate(),
                cookie_secure: false,
                same_site: SameSite::Lax,
            },
        };

        Self {
            users,
            follows,
            documents,
            events,
            deps,
        }
    }

    pub fn dependencies(&self) -> AppDependencies {
        self.deps.clone()
    }

    pub async fn user_id(&self, username: &str) -> UserId {
        self.users
            .find_by_username(&Username::new(username).expect("username"))
            .await
            .expect("lookup")
            .expect("registered user")
            .id()
            .clone()
    }

    /// Store a document for `owner`, `age_minutes` old.
    pub fn add_document(&self, owner: &UserId, title: &str, is_public: bool, age_minutes: i64) {
        self.documents
            .insert(Document {
                id: Uuid::new_v4(),
                user_id: owner.clone(),
                title: title.to_owned(),
                is_public,
                created_at: Utc::now() - Duration::minutes(age_minutes),
            })
            .expect("insert document");
    }
}

/// Session cookie set on `response`, if any.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
}

/// `Location` header of a redirect.
pub fn location<B>(response: &ServiceResponse<B>) -> String {
    response
        .headers()
        .get(actix_web::http::header::LOCATION)
        .expect("location header")
        .to_str()
        .expect("ascii location")
        .to_owned()
}

/// Register `username` (password `pw-<username>`) and return the session
/// cookie issued for it.
pub async fn register<S, B>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let password = format!("pw-{username}");
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/accounts/register")
            .set_form(&[
                ("username", username),
                ("password1", password.as_str()),
                ("password2", password.as_str()),
            ])
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/");
    session_cookie(&response).expect("session cookie after registration")
}

/// Send `method` to `/profiles/{username}` and decode the JSON body.
pub async fn profile_request<S, B>(
    app: &S,
    request: test::TestRequest,
    username: &str,
    cookie: Option<&Cookie<'static>>,
) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let mut request = request.uri(&format!("/profiles/{username}"));
    if let Some(cookie) = cookie {
        request = request.cookie(cookie.clone());
    }
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json body")
    };
    (status, value)
}

/// Titles listed on a profile page body.
pub fn document_titles(page: &Value) -> Vec<String> {
    page["documents"]
        .as_array()
        .expect("documents array")
        .iter()
        .map(|doc| doc["title"].as_str().expect("title").to_owned())
        .collect()
}
