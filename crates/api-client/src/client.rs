use std::time::Duration;

use moodroom_api::{
    CredentialsRequest, ErrorBody, MoodResponse, SummaryResponse, TokenResponse, UserResponse,
};
use moodroom_core::ChatMessage;
use tracing::debug;
use url::Url;

use crate::error::ApiError;

/// Typed HTTP client for the chat server.
///
/// Holds the bearer credential for authenticated endpoints; unauthenticated
/// calls (`login`, `signup`) work without one. The credential is attached as
/// an `Authorization` header everywhere except the realtime handshake, where
/// the transport cannot carry headers and [`ApiClient::ws_url`] puts it in
/// the query string instead.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl ApiClient {
    /// Create a new client with the given base URL and timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: None,
        })
    }

    pub fn set_auth(&mut self, token: String) {
        self.auth_token = Some(token);
    }

    pub fn clear_auth(&mut self) {
        self.auth_token = None;
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn token_or_bail(&self) -> Result<&str, ApiError> {
        self.auth_token.as_deref().ok_or(ApiError::MissingToken)
    }

    /// Realtime channel endpoint: `ws(s)://<host>/ws?token=<credential>`.
    ///
    /// The only place the credential ever appears in a URL.
    pub fn ws_url(&self) -> Result<String, ApiError> {
        let token = self.token_or_bail()?;
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ApiError::BadUrl(e.to_string()))?;

        let scheme = match url.scheme() {
            "https" | "wss" => "wss",
            _ => "ws",
        };
        url.set_scheme(scheme)
            .map_err(|()| ApiError::BadUrl(format!("cannot derive ws scheme for {url}")))?;

        Ok(format!("{}/ws?token={}", url.as_str().trim_end_matches('/'), urlencoding::encode(token)))
    }

    // ── Auth ──────────────────────────────────────────────────────────────

    pub async fn login(&self, req: &CredentialsRequest) -> Result<TokenResponse, ApiError> {
        let resp = self.client.post(self.url("/login")).json(req).send().await?;
        parse_response(resp).await
    }

    pub async fn signup(&self, req: &CredentialsRequest) -> Result<UserResponse, ApiError> {
        let resp = self
            .client
            .post(self.url("/signup"))
            .json(req)
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn me(&self) -> Result<UserResponse, ApiError> {
        let token = self.token_or_bail()?;
        let resp = self
            .client
            .get(self.url("/me"))
            .bearer_auth(token)
            .send()
            .await?;
        parse_response(resp).await
    }

    // ── Chat data ─────────────────────────────────────────────────────────

    /// Full message history, oldest first as the server returns it.
    pub async fn messages(&self) -> Result<Vec<ChatMessage>, ApiError> {
        let token = self.token_or_bail()?;
        let resp = self
            .client
            .get(self.url("/messages"))
            .bearer_auth(token)
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn mood(&self) -> Result<MoodResponse, ApiError> {
        let token = self.token_or_bail()?;
        let resp = self
            .client
            .get(self.url("/mood"))
            .bearer_auth(token)
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn summary(&self) -> Result<SummaryResponse, ApiError> {
        let token = self.token_or_bail()?;
        let resp = self
            .client
            .get(self.url("/summary"))
            .bearer_auth(token)
            .send()
            .await?;
        parse_response(resp).await
    }
}

/// Parse an HTTP response: deserialize the body on 2xx, otherwise extract the
/// server's `{"detail": ...}` (falling back to a generic message when the
/// body is not parseable).
async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ApiError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.detail)
            .unwrap_or_else(|_| format!("request failed with status {status}"));
        debug!(%status, %detail, "API call failed");
        return Err(ApiError::Status { status, detail });
    }
    Ok(resp.json().await?)
}

#[cfg(test)]
mod tests {
    use super::ApiClient;
    use std::time::Duration;

    fn client(base: &str) -> ApiClient {
        let mut client = ApiClient::new(base, Duration::from_secs(5)).expect("client");
        client.set_auth("tok en".to_string());
        client
    }

    #[test]
    fn base_url_is_normalized() {
        let client = client("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn ws_url_swaps_scheme_and_encodes_the_token() {
        let client = client("http://localhost:8000");
        assert_eq!(
            client.ws_url().expect("ws url"),
            "ws://localhost:8000/ws?token=tok%20en"
        );

        let secure = client_with_base("https://chat.example.com");
        assert_eq!(
            secure.ws_url().expect("ws url"),
            "wss://chat.example.com/ws?token=abc"
        );
    }

    fn client_with_base(base: &str) -> ApiClient {
        let mut client = ApiClient::new(base, Duration::from_secs(5)).expect("client");
        client.set_auth("abc".to_string());
        client
    }

    #[test]
    fn ws_url_requires_a_credential() {
        let client = ApiClient::new("http://localhost:8000", Duration::from_secs(5))
            .expect("client");
        assert!(client.ws_url().is_err());
    }

    #[test]
    fn clear_auth_drops_the_credential() {
        let mut client = client("http://localhost:8000");
        assert!(client.auth_token().is_some());
        client.clear_auth();
        assert!(client.auth_token().is_none());
    }
}
