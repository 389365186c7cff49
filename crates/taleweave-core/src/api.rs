//! HTTP client for the fairy-tale backend.
//!
//! All requests share one [`Session`]; when a bearer token is present it is
//! attached as `Authorization: Bearer <token>`. Endpoints are joined onto a
//! configurable base URL so the same client works against local and hosted
//! backends.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::session::Session;
use crate::tale::{BackendTale, SaveStatus, Tale};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Body of `POST /generate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateRequest {
    pub age: String,
    pub topic: String,
    pub moral: String,
    pub length: String,
    pub language: String,
    /// Null means no cultural constraint ("universal").
    pub culture: Option<String>,
    /// Topic for scientific enhancement, null when disabled.
    pub scientific_note: Option<String>,
    pub with_audio: bool,
}

/// Response of `POST /generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub story: String,
    #[serde(default)]
    pub audio_url: Option<String>,
}

#[derive(Debug, Serialize)]
struct AuthRequest<'a> {
    email: &'a str,
    password: &'a str,
    name: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct SaveStoryResponse {
    status: SaveStatus,
}

/// Client for the fairy-tale backend API.
#[derive(Debug, Clone)]
pub struct TaleClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<Session>,
}

impl TaleClient {
    /// Creates a client for the given base URL.
    pub fn new(base_url: &str, session: Arc<Session>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid base URL: {base_url}"))?;
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Generates a story. Requires authentication on the backend side; an
    /// expired or missing token surfaces as an HTTP error here.
    pub async fn generate(&self, request: &GenerateRequest) -> Result<Tale> {
        let response: GenerateResponse = self.post_json("generate", request).await?;
        Ok(Tale::generated(response.story, response.audio_url))
    }

    /// Exchanges credentials for a bearer token and persists it in the
    /// session.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        self.authenticate("token", email, password, None).await
    }

    /// Registers a new account; the backend signs the user in directly, so
    /// this also stores the returned token.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<()> {
        self.authenticate("register", email, password, Some(name)).await
    }

    async fn authenticate(
        &self,
        endpoint: &str,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<()> {
        let request = AuthRequest {
            email,
            password,
            name,
        };
        let response: AuthResponse = self.post_json(endpoint, &request).await?;
        self.session.set_token(&response.access_token)
    }

    /// Fetches all of the user's saved stories, newest last as the backend
    /// returns them.
    pub async fn stories(&self) -> Result<Vec<Tale>> {
        let url = self.endpoint("stories")?;
        let response = self
            .request(self.http.get(url.clone()))
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?;
        let rows: Vec<BackendTale> = Self::parse(response).await?;
        Ok(rows.into_iter().map(Tale::from).collect())
    }

    /// Toggles the saved state of a tale.
    ///
    /// The backend saves the story if it is unknown and removes it if it is
    /// already saved, reporting which of the two happened.
    pub async fn toggle_save(&self, tale: &Tale) -> Result<SaveStatus> {
        let body = BackendTale::from(tale);
        let response: SaveStoryResponse = self.post_json("stories/save", &body).await?;
        Ok(response.status)
    }

    /// Downloads narration audio. Relative audio paths resolve against the
    /// base URL; absolute ones are used as-is.
    pub async fn fetch_audio(&self, audio_url: &str) -> Result<Vec<u8>> {
        let url = self.resolve(audio_url)?;
        let response = self
            .request(self.http.get(url.clone()))
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?;
        if !response.status().is_success() {
            bail!("Audio download failed with status {}", response.status());
        }
        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read audio from {url}"))?;
        Ok(bytes.to_vec())
    }

    /// Resolves a possibly-relative audio URL against the base URL.
    pub fn resolve(&self, audio_url: &str) -> Result<Url> {
        self.base_url
            .join(audio_url)
            .with_context(|| format!("Invalid audio URL: {audio_url}"))
    }

    async fn post_json<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: for<'de> Deserialize<'de>,
    {
        let url = self.endpoint(endpoint)?;
        let response = self
            .request(self.http.post(url.clone()).json(body))
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?;
        Self::parse(response).await
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("Invalid endpoint path: {path}"))
    }

    async fn parse<T>(response: reqwest::Response) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;
        if !status.is_success() {
            bail!("Backend returned {status}: {}", truncate(&body, 200));
        }
        serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse response: {}", truncate(&body, 200)))
    }
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
