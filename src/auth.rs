use crate::error::{IsMonError, IsMonResult};
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Header carrying the application's subscription key (`Ocp-Apim-Subscription-Key`)
pub const SUBSCRIPTION_KEY_HEADER: HeaderName =
    HeaderName::from_static("ocp-apim-subscription-key");

/// Account credentials plus the application subscription key
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
    subscription_key: String,
}

impl Credentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        subscription_key: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            subscription_key: subscription_key.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn subscription_key(&self) -> &str {
        &self.subscription_key
    }

    pub(crate) fn login_body(&self) -> LoginRequest<'_> {
        LoginRequest {
            username: &self.username,
            password: &self.password,
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .field("subscription_key", &"***")
            .finish()
    }
}

/// Body of `POST auth/login`
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// An established session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub email: Option<String>,
    pub session_id: String,
}

/// Which header rules apply to an outgoing request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// `POST auth/login`: no session, no subscription key
    Login,
    /// `POST auth/logout`: like `Standard`, plus `Cache-Control: no-cache`
    Logout,
    /// Every other call
    Standard,
}

/// Build the headers for one request.
///
/// `Content-Type` and `Accept` are always JSON. The session header is only
/// attached when a session id is known and the request is not the login.
pub fn auth_headers(
    kind: RequestKind,
    session_id: Option<&str>,
    subscription_key: &str,
) -> IsMonResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    if kind == RequestKind::Login {
        return Ok(headers);
    }

    if let Some(id) = session_id {
        headers.insert(AUTHORIZATION, header_value(&format!("SESSID {}", id))?);
    }
    headers.insert(SUBSCRIPTION_KEY_HEADER, header_value(subscription_key)?);

    if kind == RequestKind::Logout {
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    }

    Ok(headers)
}

fn header_value(value: &str) -> IsMonResult<HeaderValue> {
    value
        .parse()
        .map_err(|e| IsMonError::auth_error(format!("Invalid auth header: {}", e)))
}

/// Mutable session state shared by every clone of a client.
///
/// Reads and writes go through an async `RwLock`; `login_lock` serializes
/// implicit logins so concurrent callers do not each log in.
#[derive(Clone, Default)]
pub(crate) struct SessionState {
    current: Arc<RwLock<Option<SessionInfo>>>,
    login_lock: Arc<Mutex<()>>,
}

impl SessionState {
    pub async fn session_id(&self) -> Option<String> {
        self.current
            .read()
            .await
            .as_ref()
            .map(|s| s.session_id.clone())
    }

    pub async fn get(&self) -> Option<SessionInfo> {
        self.current.read().await.clone()
    }

    pub async fn set(&self, info: SessionInfo) {
        *self.current.write().await = Some(info);
    }

    pub async fn clear(&self) -> Option<SessionInfo> {
        self.current.write().await.take()
    }

    pub fn login_lock(&self) -> &Mutex<()> {
        &self.login_lock
    }
}
