//! HTTP client for the Streamz REST API.
//!
//! One `ApiClient` instance is shared across the application; the session
//! manager is the single writer of its token, and every request issued
//! through it carries `Authorization: Token <token>` once one is set.

use anyhow::{Context, Result};
use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{
    Content, ContentFilter, Genre, Paginated, ProgressUpdate, RegistrationRequest,
    SubscriptionPlan, UserProfile, WatchHistoryEntry,
};

use super::{ApiError, AuthRejection};

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Token + user pair returned by the login and register endpoints
#[derive(Debug, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// API client for the Streamz backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client against the given base URL
    /// (e.g. `http://localhost:8000/api`)
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set the token attached to all subsequent requests.
    /// The previous value, if any, is replaced wholesale.
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Drop the token; subsequent requests are sent unauthenticated
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn auth_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref token) = self.token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Token {}", token))?,
            );
        }
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .query(query)
            .headers(self.auth_headers()?)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.url(path);
        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers()?)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send POST request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    /// List endpoints return either a DRF page or a bare array depending on
    /// backend pagination settings; accept both.
    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .query(query)
            .headers(self.auth_headers()?)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response).await?;
        let text = response.text().await?;

        if let Ok(items) = serde_json::from_str::<Vec<T>>(&text) {
            return Ok(items);
        }

        let page: Paginated<T> = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse list response from {}", url))?;
        Ok(page.results)
    }

    // ===== Authentication =====

    /// Exchange credentials for a token + user pair.
    ///
    /// Failures never escape as errors of unpredictable shape: server
    /// rejections are normalized into `AuthRejection` and transport errors
    /// (including malformed success bodies) become `AuthRejection::Network`.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> std::result::Result<AuthPayload, AuthRejection> {
        let body = LoginRequest { username, password };
        self.auth_post("/auth/login/", &body).await
    }

    /// Create an account. Same contract as `login`; the backend returns the
    /// new user's token directly so no second call is needed.
    pub async fn register(
        &self,
        request: &RegistrationRequest,
    ) -> std::result::Result<AuthPayload, AuthRejection> {
        self.auth_post("/auth/register/", request).await
    }

    async fn auth_post<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> std::result::Result<AuthPayload, AuthRejection> {
        let url = self.url(path);
        let response = match self.client.post(&url).json(body).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %url, error = %e, "Auth request failed to reach server");
                return Err(AuthRejection::Network);
            }
        };

        if response.status().is_success() {
            match response.json::<AuthPayload>().await {
                Ok(payload) => Ok(payload),
                Err(e) => {
                    warn!(url = %url, error = %e, "Malformed auth success payload");
                    Err(AuthRejection::Network)
                }
            }
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            debug!(url = %url, status = %status, "Auth request rejected");
            Err(AuthRejection::from_body(&body))
        }
    }

    /// Fetch the profile of the user owning the current token
    pub async fn fetch_profile(&self) -> Result<UserProfile> {
        self.get("/auth/profile/", &[]).await
    }

    /// Fetch available subscription plans (public endpoint)
    pub async fn fetch_plans(&self) -> Result<Vec<SubscriptionPlan>> {
        self.get_list("/auth/plans/", &[]).await
    }

    // ===== Catalog =====

    pub async fn fetch_genres(&self) -> Result<Vec<Genre>> {
        self.get_list("/content/genres/", &[]).await
    }

    /// Full-text search across titles and descriptions
    pub async fn search_content(&self, query: &str) -> Result<Vec<Content>> {
        self.get_list("/content/content/", &[("search", query.to_string())])
            .await
    }

    pub async fn fetch_movies(&self, filter: &ContentFilter) -> Result<Vec<Content>> {
        self.get_list("/content/content/movies/", &filter.query_pairs())
            .await
    }

    pub async fn fetch_series(&self, filter: &ContentFilter) -> Result<Vec<Content>> {
        self.get_list("/content/content/series/", &filter.query_pairs())
            .await
    }

    pub async fn fetch_documentaries(&self, filter: &ContentFilter) -> Result<Vec<Content>> {
        self.get_list("/content/content/documentaries/", &filter.query_pairs())
            .await
    }

    pub async fn fetch_content_detail(&self, content_id: i64) -> Result<Content> {
        self.get(&format!("/content/content/{}/", content_id), &[])
            .await
    }

    // ===== Streaming =====

    /// In-progress history entries for the continue-watching shelf
    pub async fn fetch_continue_watching(&self) -> Result<Vec<WatchHistoryEntry>> {
        self.get_list("/streaming/history/continue_watching/", &[])
            .await
    }

    pub async fn fetch_trending(&self) -> Result<Vec<Content>> {
        self.get_list("/streaming/trending/", &[]).await
    }

    pub async fn fetch_recommendations(&self) -> Result<Vec<Content>> {
        self.get_list("/streaming/recommendations/", &[]).await
    }

    pub async fn update_progress(&self, update: &ProgressUpdate) -> Result<WatchHistoryEntry> {
        self.post("/streaming/history/update_progress/", update)
            .await
    }
}
