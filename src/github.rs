use anyhow::{bail, Context, Result};
use futures::future::BoxFuture;
use futures::FutureExt;
use headers::{HeaderMapExt, UserAgent};
use hyper::body::Bytes;
use hyper::client::HttpConnector;
use hyper::header::ACCEPT;
use hyper::{Body, Client, Method, Request, Uri};
use hyper_tls::HttpsConnector;
use tracing::debug;

use std::str::FromStr;

/// Read-only access to the hosting API, relative to a fixed base URL.
pub trait Api: Send + Sync {
    /// Resolves with the body of `GET <base>/<path>`, or fails on transport
    /// errors and non-success statuses.
    fn get(&self, path: String) -> BoxFuture<'_, Result<Bytes>>;
}

pub fn repository_path(parameter: &str) -> String {
    format!("repos/{}", parameter)
}

pub fn issues_path(parameter: &str) -> String {
    format!("repos/{}/issues", parameter)
}

pub struct Github {
    client: Client<HttpsConnector<HttpConnector>>,
    base: String,
    user_agent: UserAgent,
}

impl Github {
    pub const API_ENDPOINT: &'static str = "https://api.github.com";

    pub fn new(base: &str, agent: UserAgent) -> Result<Self> {
        let base = base.trim_end_matches('/').to_string();
        let uri =
            Uri::from_str(&base).with_context(|| format!("invalid API base URL '{}'", base))?;
        if uri.scheme().is_none() || uri.authority().is_none() {
            bail!("invalid API base URL '{}': expected scheme and host", base);
        }
        Ok(Self {
            client: Client::builder().build(HttpsConnector::new()),
            base,
            user_agent: agent,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    async fn fetch(&self, path: &str) -> Result<Bytes> {
        let url = self.url(path);
        let uri = Uri::from_str(&url).with_context(|| format!("invalid request url '{}'", url))?;
        let mut req = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(ACCEPT, "application/vnd.github+json")
            .body(Body::empty())?;
        req.headers_mut().typed_insert(self.user_agent.clone());

        debug!(%url, "GET");
        let resp = self.client.request(req).await?;
        let status = resp.status();
        let body = hyper::body::to_bytes(resp.into_body()).await?;
        if !status.is_success() {
            bail!(
                "request failed ({}): '{}'",
                status,
                String::from_utf8_lossy(&body)
            );
        }
        Ok(body)
    }
}

impl Api for Github {
    fn get(&self, path: String) -> BoxFuture<'_, Result<Bytes>> {
        async move { self.fetch(&path).await }.boxed()
    }
}
