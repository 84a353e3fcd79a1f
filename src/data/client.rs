use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, Url};
use tracing::debug;

use super::api::{ApiFuture, ProcessApi};
use super::Process;
use crate::{Result, WatcherError};

/// Credentials attached to every request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Auth {
    Bearer(String),
    Basic { username: String, password: String },
}

impl Auth {
    /// A non-empty token wins over username/password.
    pub fn select(token: Option<&str>, username: &str, password: &str) -> Self {
        match token.map(str::trim).filter(|token| !token.is_empty()) {
            Some(token) => Auth::Bearer(token.to_string()),
            None => Auth::Basic {
                username: username.to_string(),
                password: password.to_string(),
            },
        }
    }
}

/// Thin HTTP client for the Stardog admin endpoints.
#[derive(Clone, Debug)]
pub struct StardogClient {
    http: reqwest::Client,
    base_url: String,
    auth: Auth,
}

impl StardogClient {
    pub fn new(server: &str, auth: Auth, timeout: Duration) -> Result<Self> {
        let base_url = normalize_server(server)?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("dog-watcher/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| WatcherError::http(format!("unable to create client: {err}")))?;
        Ok(Self {
            http,
            base_url,
            auth,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.base_url
    }

    /// Name of the authenticated user.
    pub async fn whoami(&self) -> Result<String> {
        let response = self.send(Method::GET, "admin/status/whoami").await?;
        let body = response.text().await?;
        Ok(body.trim().to_string())
    }

    pub async fn is_alive(&self) -> Result<bool> {
        let response = self
            .request(Method::GET, "admin/alive")
            .send()
            .await?;
        Ok(response.status().is_success())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path);
        let builder = self.http.request(method, url);
        match &self.auth {
            Auth::Bearer(token) => builder.bearer_auth(token),
            Auth::Basic { username, password } => builder.basic_auth(username, Some(password)),
        }
    }

    async fn send(&self, method: Method, path: &str) -> Result<Response> {
        debug!(%method, path, "stardog request");
        let response = self.request(method, path).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        } else {
            body.trim().to_string()
        };
        Err(WatcherError::api(status.as_u16(), message))
    }
}

impl ProcessApi for StardogClient {
    fn list_processes(&self) -> ApiFuture<'_, Vec<Process>> {
        Box::pin(async move {
            let response = self.send(Method::GET, "admin/processes").await?;
            let body = response.text().await?;
            Ok(parse_processes(&body)?)
        })
    }

    fn kill_process<'a>(&'a self, id: &'a str) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            self.send(Method::DELETE, &format!("admin/processes/{id}"))
                .await?;
            Ok(())
        })
    }
}

fn parse_processes(body: &str) -> serde_json::Result<Vec<Process>> {
    serde_json::from_str(body)
}

fn normalize_server(server: &str) -> Result<String> {
    let trimmed = server.trim().trim_end_matches('/');
    let url = Url::parse(trimmed)
        .map_err(|err| WatcherError::invalid_argument(format!("server {server}: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(WatcherError::invalid_argument(format!(
            "server {server}: unsupported scheme {}",
            url.scheme()
        )));
    }
    Ok(trimmed.to_string())
}
