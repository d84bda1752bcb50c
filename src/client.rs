use crate::{
    apis::{MetricApi, MonitoringApi, SystemApi, TerminalApi},
    auth::{auth_headers, Credentials, RequestKind, SessionInfo, SessionState},
    error::{IsMonError, IsMonResult},
    models::{ErrorList, LoginResponse, Page, PageRequest, StatusCodeError},
};
use log::{debug, error, info, warn};
use reqwest::{header::HeaderMap, Client, Method, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// Production endpoint of the monitoring API
pub const DEFAULT_BASE_URL: &str = "https://api.intelsat.com/i1/api-monitoring/v1";

/// Items requested per page
pub const PAGE_SIZE: u64 = 100;

/// Endpoint that issues session ids (`POST`)
pub const LOGIN_ENDPOINT: &str = "auth/login";
/// Endpoint that ends the current session (`POST`)
pub const LOGOUT_ENDPOINT: &str = "auth/logout";

/// Main monitoring API client.
///
/// Clones share the HTTP connection pool and the session, so logging in
/// through one clone authenticates all of them.
#[derive(Clone)]
pub struct IsMonClient {
    client: Client,
    base_url: Url,
    credentials: Credentials,
    session: SessionState,
}

impl IsMonClient {
    /// Create a client for the production API
    pub fn new(credentials: Credentials) -> IsMonResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, credentials)
    }

    /// Create a client for another deployment of the API
    pub fn with_base_url(
        base_url: impl AsRef<str>,
        credentials: Credentials,
    ) -> IsMonResult<Self> {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Self::with_client(client, base_url, credentials)
    }

    /// Create a client with a custom reqwest client
    pub fn with_client(
        client: Client,
        base_url: impl AsRef<str>,
        credentials: Credentials,
    ) -> IsMonResult<Self> {
        let mut base_url = Url::parse(base_url.as_ref())?;
        // Endpoints are relative, so the base must end in a slash for join().
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url,
            credentials,
            session: SessionState::default(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the credentials this client logs in with
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Get Terminal API
    pub fn terminals(&self) -> TerminalApi<'_> {
        TerminalApi::new(self)
    }

    /// Get Metric API
    pub fn metrics(&self) -> MetricApi<'_> {
        MetricApi::new(self)
    }

    /// Get Monitoring API
    pub fn monitoring(&self) -> MonitoringApi<'_> {
        MonitoringApi::new(self)
    }

    /// Get System API (login status, systemwide filters)
    pub fn system(&self) -> SystemApi<'_> {
        SystemApi::new(self)
    }

    /// Current session id, if logged in
    pub async fn session_id(&self) -> Option<String> {
        self.session.session_id().await
    }

    /// Current session, if logged in
    pub async fn session(&self) -> Option<SessionInfo> {
        self.session.get().await
    }

    /// Whether a session id is currently held
    pub async fn is_logged_in(&self) -> bool {
        self.session.session_id().await.is_some()
    }

    /// Log in and store the returned session id.
    ///
    /// Every failure is reported as an authentication error: a malformed
    /// response as [`IsMonError::Auth`], anything else wrapped in
    /// [`IsMonError::LoginFailed`]. On failure the stored session is left
    /// untouched.
    pub async fn login(&self) -> IsMonResult<SessionInfo> {
        self.request_login().await.map_err(|e| match e {
            IsMonError::Auth(_) | IsMonError::LoginFailed(_) => e,
            other => IsMonError::LoginFailed(Box::new(other)),
        })
    }

    async fn request_login(&self) -> IsMonResult<SessionInfo> {
        info!("Logging in as {}", self.credentials.username());
        let url = self.endpoint_url(LOGIN_ENDPOINT)?;
        let headers = auth_headers(
            RequestKind::Login,
            None,
            self.credentials.subscription_key(),
        )?;
        debug!("HTTP POST {}", url);

        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(&self.credentials.login_body())
            .send()
            .await?;
        let value = read_json(response).await?;

        let login = match LoginResponse::deserialize(&value) {
            Ok(login) => login,
            Err(_) => {
                return Err(match classify_error(value) {
                    IsMonError::UnhandledResponse(body) => {
                        error!("Malformed login response: {}", body);
                        IsMonError::auth_error(format!("malformed login response: {}", body))
                    }
                    other => other,
                });
            }
        };

        let info = SessionInfo {
            email: login.data.email,
            session_id: login.data.sessionid,
        };
        info!(
            "Using API key for user: {}",
            info.email.as_deref().unwrap_or("<unknown>")
        );
        self.session.set(info.clone()).await;
        Ok(info)
    }

    /// Log out of the current session.
    ///
    /// The local session is dropped whatever the server answers, so the next
    /// call logs in again. Without a session this is a no-op.
    pub async fn logout(&self) -> IsMonResult<()> {
        let Some(session) = self.session.get().await else {
            debug!("Logout requested without a session");
            return Ok(());
        };

        info!("Logging out");
        let result = self.send_logout(&session.session_id).await;
        self.session.clear().await;

        match &result {
            Ok(()) => info!("Logged out"),
            Err(e) => warn!("Logout failed, session dropped locally: {}", e),
        }
        result
    }

    async fn send_logout(&self, session_id: &str) -> IsMonResult<()> {
        let url = self.endpoint_url(LOGOUT_ENDPOINT)?;
        let headers = auth_headers(
            RequestKind::Logout,
            Some(session_id),
            self.credentials.subscription_key(),
        )?;
        debug!("HTTP POST {}", url);

        let response = self.client.post(url).headers(headers).send().await?;
        let status = response.status();
        let text = response.text().await?;
        if status != StatusCode::OK {
            return Err(status_failure(status, &text));
        }

        // The logout body carries no data; only reject explicit error payloads.
        if let Ok(value) = serde_json::from_str::<Value>(&text) {
            if is_error_payload(&value) {
                return Err(classify_error(value));
            }
        }
        Ok(())
    }

    /// GET every page of `endpoint` with the given query parameters
    pub async fn get<Q>(&self, endpoint: &str, query: &Q) -> IsMonResult<Vec<Page>>
    where
        Q: Serialize + ?Sized,
    {
        self.dispatch::<(), Q>(Method::GET, endpoint, None, Some(query))
            .await
    }

    /// GET every page of an endpoint that takes no parameters
    pub async fn get_all(&self, endpoint: &str) -> IsMonResult<Vec<Page>> {
        self.dispatch::<(), ()>(Method::GET, endpoint, None, None)
            .await
    }

    /// Execute one logical call, walking every result page.
    ///
    /// Logs in first if no session is held, except for the login call itself,
    /// which goes out without session or subscription key. Pages are requested in order,
    /// `__pageSize` fixed at [`PAGE_SIZE`], until `ceil(countTotal / pageSize)`
    /// pages have been read. Any failing page fails the whole call and the
    /// pages read so far are discarded.
    pub async fn dispatch<B, Q>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        query: Option<&Q>,
    ) -> IsMonResult<Vec<Page>>
    where
        B: Serialize + ?Sized,
        Q: Serialize + ?Sized,
    {
        let url = self.endpoint_url(endpoint)?;
        let headers = if is_login_call(&method, endpoint) {
            auth_headers(RequestKind::Login, None, self.credentials.subscription_key())?
        } else {
            let session_id = self.ensure_session().await?;
            auth_headers(
                RequestKind::Standard,
                Some(&session_id),
                self.credentials.subscription_key(),
            )?
        };

        let mut pages = Vec::new();
        let mut page = 1;
        loop {
            debug!("HTTP {} {} (page {})", method, url, page);
            let response = self
                .page_request(&method, &url, &headers, body, query, page)
                .send()
                .await?;
            let current = read_page(response).await?;

            let last_page = current.meta.page_count();
            pages.push(current);
            if page >= last_page {
                break;
            }
            page += 1;
        }

        debug!("{} {}: {} page(s)", method, endpoint, pages.len());
        Ok(pages)
    }

    fn page_request<B, Q>(
        &self,
        method: &Method,
        url: &Url,
        headers: &HeaderMap,
        body: Option<&B>,
        query: Option<&Q>,
        page: u64,
    ) -> reqwest::RequestBuilder
    where
        B: Serialize + ?Sized,
        Q: Serialize + ?Sized,
    {
        let mut req = self
            .client
            .request(method.clone(), url.clone())
            .headers(headers.clone());
        if let Some(query) = query {
            req = req.query(query);
        }
        req = req.query(&PageRequest {
            page,
            page_size: PAGE_SIZE,
        });
        if let Some(body) = body {
            req = req.json(body);
        }
        req
    }

    async fn ensure_session(&self) -> IsMonResult<String> {
        if let Some(id) = self.session.session_id().await {
            return Ok(id);
        }

        let _guard = self.session.login_lock().lock().await;
        // Another task may have logged in while we waited.
        if let Some(id) = self.session.session_id().await {
            return Ok(id);
        }

        debug!("No session held, logging in");
        self.login().await.map(|info| info.session_id)
    }

    fn endpoint_url(&self, endpoint: &str) -> IsMonResult<Url> {
        Ok(self.base_url.join(endpoint.trim_start_matches('/'))?)
    }
}

/// `POST auth/login` is the only request sent without a session
fn is_login_call(method: &Method, endpoint: &str) -> bool {
    *method == Method::POST && endpoint.trim_start_matches('/') == LOGIN_ENDPOINT
}

/// Read a 200 response as JSON; any other status is an error
async fn read_json(response: Response) -> IsMonResult<Value> {
    let status = response.status();
    let text = response.text().await?;
    if status != StatusCode::OK {
        return Err(status_failure(status, &text));
    }
    serde_json::from_str(&text).map_err(|_| {
        error!("Unhandled Response : {}", text);
        IsMonError::UnhandledResponse(Value::String(text))
    })
}

async fn read_page(response: Response) -> IsMonResult<Page> {
    let value = read_json(response).await?;
    classify_page(value)
}

/// Accept a body as a page only when it carries `meta.status == 200`
pub(crate) fn classify_page(value: Value) -> IsMonResult<Page> {
    let ok = value
        .get("meta")
        .and_then(|meta| meta.get("status"))
        .and_then(Value::as_u64)
        == Some(200);
    if !ok {
        return Err(classify_error(value));
    }

    Page::deserialize(&value).map_err(|e| {
        error!("Unhandled Response : {} ({})", value, e);
        IsMonError::UnhandledResponse(value)
    })
}

fn is_error_payload(value: &Value) -> bool {
    value.get("statusCode").is_some()
        || value
            .get("errors")
            .and_then(Value::as_array)
            .is_some_and(|errors| !errors.is_empty())
}

/// Turn a body that is not a valid page into the matching error
pub(crate) fn classify_error(value: Value) -> IsMonError {
    if let Ok(err) = StatusCodeError::deserialize(&value) {
        let message = err.message.unwrap_or_default();
        error!("{} - {}", err.status_code, message);
        return IsMonError::api_error(err.status_code, message);
    }

    if let Ok(list) = ErrorList::deserialize(&value) {
        if !list.errors.is_empty() {
            let messages: Vec<String> = list
                .errors
                .into_iter()
                .map(|e| e.message.unwrap_or_else(|| "unknown error".to_string()))
                .collect();
            for message in &messages {
                error!("{}", message);
            }
            return IsMonError::ApiErrors(messages);
        }
    }

    error!("Unhandled Response : {}", value);
    IsMonError::UnhandledResponse(value)
}

/// Build the error for a non-200 status, preferring the API's own message
fn status_failure(status: StatusCode, text: &str) -> IsMonError {
    let message = match serde_json::from_str::<Value>(text) {
        Ok(value) if is_error_payload(&value) => classify_error(value).to_string(),
        _ => text.to_string(),
    };
    error!("Error: {} - {}", status.as_u16(), message);
    IsMonError::status_error(status.as_u16(), message)
}
