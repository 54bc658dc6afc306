use std::future::Future;

use reqwest::{header::AUTHORIZATION, Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use super::{refresh::RefreshCoordinator, session::SessionStore, types::ApiError};
use crate::config;

/// HTTP client shared by every page. Clones share the session and the
/// refresh coordinator, so a refresh triggered anywhere is seen everywhere.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    session: SessionStore,
    coordinator: RefreshCoordinator,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            session: SessionStore::new(),
            coordinator: RefreshCoordinator::new(),
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: Some(base_url.trim_end_matches('/').to_string()),
            ..Self::new()
        }
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn coordinator(&self) -> &RefreshCoordinator {
        &self.coordinator
    }

    /// Adds the bearer header for the token held right now.
    pub(crate) fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.access_token() {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => builder,
        }
    }

    pub(crate) fn bearer_header(&self) -> Option<String> {
        self.session
            .access_token()
            .map(|token| format!("Bearer {}", token))
    }

    /// Sends a request through the refresh pipeline. `build` runs once per
    /// attempt, so a replay picks up the token stored by the refresh.
    pub(crate) async fn send_with_refresh<F>(&self, build: F) -> Result<ApiResponse, ApiError>
    where
        F: Fn() -> Result<RequestBuilder, ApiError>,
    {
        self.with_refresh(|| {
            let built = build().map(|builder| self.authorized(builder));
            async move { self.dispatch(built?).await }
        })
        .await
    }

    /// Runs `send`; on a 401 refreshes (or waits for the refresh already in
    /// flight) and replays exactly once. A second 401 is handed back as is.
    pub(crate) async fn with_refresh<S, Fut>(&self, send: S) -> Result<ApiResponse, ApiError>
    where
        S: Fn() -> Fut,
        Fut: Future<Output = Result<ApiResponse, ApiError>>,
    {
        let response = send().await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        let trigger = response.into_error().await;
        log::debug!("Request unauthorized, attempting token refresh");
        self.coordinator
            .run(trigger, || self.refresh())
            .await?;

        let replay = send().await?;
        if replay.status() == StatusCode::UNAUTHORIZED {
            log::warn!("Request still unauthorized after token refresh");
        }
        Ok(replay)
    }

    pub(crate) async fn dispatch(&self, builder: RequestBuilder) -> Result<ApiResponse, ApiError> {
        let request = builder
            .build()
            .map_err(|e| ApiError::request_failed(format!("Invalid request: {}", e)))?;

        #[cfg(all(test, not(target_arch = "wasm32")))]
        if let Some(responder) = mock::responder_for(request.url().as_str()) {
            // Lets concurrent requests interleave the way real I/O would.
            tokio::task::yield_now().await;
            return responder
                .respond(&request)
                .map(MockResponse::into_response);
        }

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;
        Ok(ApiResponse::Http(response))
    }
}

/// A response from the network, or one already read into memory (XHR
/// uploads and test doubles).
pub enum ApiResponse {
    Http(reqwest::Response),
    Buffered { status: StatusCode, body: String },
}

impl ApiResponse {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiResponse::Http(response) => response.status(),
            ApiResponse::Buffered { status, .. } => *status,
        }
    }

    pub async fn text(self) -> Result<String, ApiError> {
        match self {
            ApiResponse::Http(response) => response
                .text()
                .await
                .map_err(|e| ApiError::request_failed(format!("Failed to read response: {}", e))),
            ApiResponse::Buffered { body, .. } => Ok(body),
        }
    }

    pub async fn json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let body = self.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
    }

    pub async fn into_error(self) -> ApiError {
        let status = self.status();
        let body = self.text().await.unwrap_or_default();
        ApiError::from_problem(status, &body)
    }
}

pub(crate) async fn parse_json<T: DeserializeOwned>(response: ApiResponse) -> Result<T, ApiError> {
    if response.status().is_success() {
        response.json().await
    } else {
        Err(response.into_error().await)
    }
}

pub(crate) async fn expect_success(response: ApiResponse) -> Result<(), ApiError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(response.into_error().await)
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
pub use mock::{register_mock, MockResponse, TestResponder};

#[cfg(all(test, not(target_arch = "wasm32")))]
mod mock {
    use super::{ApiError, ApiResponse, StatusCode};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex, OnceLock};

    pub trait TestResponder: Send + Sync {
        fn respond(&self, request: &reqwest::Request) -> Result<MockResponse, ApiError>;
    }

    #[derive(Debug, Clone)]
    pub struct MockResponse {
        pub status: u16,
        pub body: String,
    }

    impl MockResponse {
        pub fn json(status: u16, body: serde_json::Value) -> Self {
            Self {
                status,
                body: body.to_string(),
            }
        }

        pub fn empty(status: u16) -> Self {
            Self {
                status,
                body: String::new(),
            }
        }

        pub(super) fn into_response(self) -> ApiResponse {
            ApiResponse::Buffered {
                status: StatusCode::from_u16(self.status)
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                body: self.body,
            }
        }
    }

    type Registry = Mutex<HashMap<String, Arc<dyn TestResponder>>>;

    fn registry() -> &'static Registry {
        static MOCKS: OnceLock<Registry> = OnceLock::new();
        MOCKS.get_or_init(|| Mutex::new(HashMap::new()))
    }

    pub fn register_mock(base_url: String, responder: Arc<dyn TestResponder>) {
        if let Ok(mut mocks) = registry().lock() {
            mocks.insert(base_url, responder);
        }
    }

    pub(super) fn responder_for(url: &str) -> Option<Arc<dyn TestResponder>> {
        let mocks = registry().lock().ok()?;
        mocks
            .iter()
            .filter(|(base, _)| url.starts_with(base.as_str()))
            .max_by_key(|(base, _)| base.len())
            .map(|(_, responder)| responder.clone())
    }
}
