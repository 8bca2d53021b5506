//! HTTP access to a RompR player API.
//!
//! Endpoints, relative to the configured base URL:
//! - `GET dirbrowser/?path=...` - HTML listing of one directory
//! - `POST player/` - JSON array of commands, answers with player status
//! - `GET tracklist/` - JSON array describing the play queue

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::markup::parse_directory;
use super::{PlayerCommand, PlayerGateway, QueueTrack, Status};
use crate::config::Settings;
use crate::error::{RemoteError, Result};
use crate::library::Directory;

/// Basic-auth credentials for the player API.
#[derive(Clone)]
pub struct Credentials {
    pub user: String,
    pub password: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Talks to the player over HTTP.
pub struct HttpGateway {
    client: Client,
    base_url: String,
    credentials: Option<Credentials>,
    backend: String,
    request_timeout: Duration,
    playback_timeout: Duration,
}

impl HttpGateway {
    /// Create a gateway for `base_url` with default timeouts and no auth.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let defaults = Settings::default();
        Ok(Self {
            client: Client::builder().user_agent("rompr-remote").build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials: None,
            backend: defaults.player_backend,
            request_timeout: defaults.request_timeout,
            playback_timeout: defaults.playback_timeout,
        })
    }

    /// Create a gateway from resolved settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let gateway = Self::new(&settings.base_url)?
            .with_backend(&settings.player_backend)
            .with_timeouts(settings.request_timeout, settings.playback_timeout);

        Ok(match &settings.api_user {
            Some(user) => gateway.with_credentials(Credentials {
                user: user.clone(),
                password: settings.api_password.clone(),
            }),
            None => gateway,
        })
    }

    /// Send HTTP Basic credentials with every request.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the `player_backend` cookie value.
    pub fn with_backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = backend.into();
        self
    }

    /// Set per-request timeouts.
    ///
    /// `request` covers browsing, status and ad-hoc commands; `playback`
    /// covers queueing batches of tracks and reading the tracklist.
    pub fn with_timeouts(mut self, request: Duration, playback: Duration) -> Self {
        self.request_timeout = request;
        self.playback_timeout = playback;
        self
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}/", self.base_url, name)
    }

    fn prepare(&self, request: RequestBuilder, timeout: Duration) -> RequestBuilder {
        let request = request
            .timeout(timeout)
            .header(
                reqwest::header::COOKIE,
                format!("player_backend={}", self.backend),
            );

        match &self.credentials {
            Some(creds) => request.basic_auth(&creds.user, creds.password.as_deref()),
            None => request,
        }
    }

    async fn send(&self, url: &str, request: RequestBuilder) -> Result<Response> {
        tracing::debug!("Player API request: {}", url);

        let response = request
            .send()
            .await
            .map_err(|source| RemoteError::GatewayTransport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::GatewayStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    async fn json<T: DeserializeOwned>(&self, url: &str, response: Response) -> Result<T> {
        response
            .json()
            .await
            .map_err(|source| RemoteError::GatewayTransport {
                url: url.to_string(),
                source,
            })
    }

    async fn post_commands(&self, commands: &[PlayerCommand], timeout: Duration) -> Result<Status> {
        let url = self.endpoint("player");
        let request = self.prepare(self.client.post(&url).json(commands), timeout);
        let response = self.send(&url, request).await?;
        self.json(&url, response).await
    }
}

#[async_trait]
impl PlayerGateway for HttpGateway {
    async fn fetch_directory(&self, path: &str) -> Result<Directory> {
        let url = self.endpoint("dirbrowser");
        let mut request = self.client.get(&url);
        if !path.is_empty() {
            request = request.query(&[("path", path)]);
        }

        let response = self
            .send(&url, self.prepare(request, self.request_timeout))
            .await?;
        let body = response
            .text()
            .await
            .map_err(|source| RemoteError::GatewayTransport {
                url: url.clone(),
                source,
            })?;

        parse_directory(&body).map_err(|message| RemoteError::GatewayMarkup { url, message })
    }

    async fn run_commands(&self, commands: &[PlayerCommand]) -> Result<Status> {
        self.post_commands(commands, self.request_timeout).await
    }

    async fn queue_batch(&self, commands: &[PlayerCommand]) -> Result<Status> {
        self.post_commands(commands, self.playback_timeout).await
    }

    async fn fetch_tracklist(&self) -> Result<Vec<QueueTrack>> {
        let url = self.endpoint("tracklist");
        let request = self.prepare(self.client.get(&url), self.playback_timeout);
        let response = self.send(&url, request).await?;
        self.json(&url, response).await
    }
}
