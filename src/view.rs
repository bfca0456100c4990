//! View state for a single repository page.
//!
//! A [`RepositoryView`] is driven by route changes. Every call to
//! [`RepositoryView::navigate`] discards the previous results and hands out a
//! [`Dispatch`] ticket tagged with a fresh generation. Fetches issued from the
//! ticket settle into [`Response`]s which are folded back with
//! [`RepositoryView::apply`], in whatever order they arrive.

use anyhow::{Context, Result};
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::github::{issues_path, repository_path, Api};
use crate::model::{Issue, Repository};

/// What to do with a response issued for a parameter that is no longer current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StaleResponses {
    #[default]
    Discard,
    /// Last write wins, regardless of which parameter the fetch was issued for.
    Apply,
}

/// Outcome of folding a [`Response`] into the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Stored,
    Failed,
    Stale,
}

/// Which branch a data region renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region<T> {
    Loading,
    Ready(T),
}

#[derive(Debug)]
pub enum Fetched {
    Repository(Result<Repository>),
    Issues(Result<Vec<Issue>>),
}

#[derive(Debug)]
pub struct Response {
    pub generation: u64,
    pub fetched: Fetched,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub generation: u64,
    pub parameter: String,
}

impl Dispatch {
    pub async fn fetch_repository<A: Api + ?Sized>(&self, api: &A) -> Response {
        let fetched = Fetched::Repository(get_json(api, repository_path(&self.parameter)).await);
        Response {
            generation: self.generation,
            fetched,
        }
    }

    pub async fn fetch_issues<A: Api + ?Sized>(&self, api: &A) -> Response {
        let fetched = Fetched::Issues(get_json(api, issues_path(&self.parameter)).await);
        Response {
            generation: self.generation,
            fetched,
        }
    }
}

async fn get_json<A, T>(api: &A, path: String) -> Result<T>
where
    A: Api + ?Sized,
    T: DeserializeOwned,
{
    let body = api.get(path.clone()).await?;
    serde_json::from_slice(&body)
        .with_context(|| format!("could not parse response from '{}'", path))
}

#[derive(Debug, Default)]
pub struct RepositoryView {
    parameter: Option<String>,
    generation: u64,
    outstanding: usize,
    repository: Option<Repository>,
    issues: Vec<Issue>,
    issues_arrived: bool,
    stale: StaleResponses,
}

impl RepositoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stale_responses(stale: StaleResponses) -> Self {
        Self {
            stale,
            ..Self::default()
        }
    }

    /// Switches to `parameter`, dropping everything fetched so far.
    pub fn navigate(&mut self, parameter: &str) -> Dispatch {
        self.generation += 1;
        self.parameter = Some(parameter.to_string());
        self.outstanding = 2;
        self.repository = None;
        self.issues = Vec::new();
        self.issues_arrived = false;
        debug!(parameter, generation = self.generation, "navigate");
        Dispatch {
            generation: self.generation,
            parameter: parameter.to_string(),
        }
    }

    pub fn apply(&mut self, response: Response) -> Applied {
        let current = response.generation == self.generation;
        if !current && self.stale == StaleResponses::Discard {
            debug!(
                generation = response.generation,
                current = self.generation,
                "discarding stale response"
            );
            return Applied::Stale;
        }
        if current {
            self.outstanding = self.outstanding.saturating_sub(1);
        }

        match response.fetched {
            Fetched::Repository(Ok(repository)) => {
                info!(repository = %repository.full_name, "repository loaded");
                self.repository = Some(repository);
                Applied::Stored
            }
            Fetched::Issues(Ok(issues)) => {
                info!(count = issues.len(), "issues loaded");
                self.issues = issues;
                self.issues_arrived = true;
                Applied::Stored
            }
            Fetched::Repository(Err(e)) => {
                warn!("repository fetch failed: {:#}", e);
                Applied::Failed
            }
            Fetched::Issues(Err(e)) => {
                warn!("issues fetch failed: {:#}", e);
                Applied::Failed
            }
        }
    }

    /// Navigates to `parameter` and applies both fetches as they settle.
    pub async fn load<A: Api + ?Sized>(&mut self, api: &A, parameter: &str) {
        let dispatch = self.navigate(parameter);
        let mut pending = FuturesUnordered::new();
        pending.push(dispatch.fetch_repository(api).boxed());
        pending.push(dispatch.fetch_issues(api).boxed());
        while let Some(response) = pending.next().await {
            self.apply(response);
        }
    }

    pub fn parameter(&self) -> Option<&str> {
        self.parameter.as_deref()
    }

    /// True until both fetches of the current parameter have settled,
    /// including before the first navigation.
    pub fn is_loading(&self) -> bool {
        self.parameter.is_none() || self.outstanding > 0
    }

    pub fn repository(&self) -> Option<&Repository> {
        self.repository.as_ref()
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn repository_region(&self) -> Region<&Repository> {
        match &self.repository {
            Some(repository) if !self.is_loading() => Region::Ready(repository),
            _ => Region::Loading,
        }
    }

    pub fn issues_region(&self) -> Region<&[Issue]> {
        if self.issues_arrived && !self.is_loading() {
            Region::Ready(self.issues.as_slice())
        } else {
            Region::Loading
        }
    }
}
