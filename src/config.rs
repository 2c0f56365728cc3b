//! Run configuration.
//!
//! Everything the pipeline needs to know about the two remote services is
//! collected into one immutable [`Config`], built once at startup and handed
//! to each stage by reference.

use crate::error::{RefsError, Result};
use std::time::Duration;
use url::Url;

/// Semantic Scholar Graph API base URL
pub const DEFAULT_SEARCH_BASE: &str = "https://api.semanticscholar.org/graph/v1";

/// Topic searched on every run
pub const DEFAULT_QUERY: &str = "digital transformation environmental information system open data \
     geospatial platform climate change sustainability public sector";

/// Number of papers requested
pub const DEFAULT_LIMIT: u32 = 6;

/// Publication year filter sent to the search API
pub const DEFAULT_YEAR_RANGE: &str = "2018-2025";

/// User agent for the search call
pub const USER_AGENT: &str = "SIA-Cuba-Digital/1.0";

/// Redmine server hosting the wiki
pub const DEFAULT_REDMINE_URL: &str = "https://gesproy.pagina.cu";

/// Redmine project identifier
pub const DEFAULT_PROJECT: &str = "ps211lh010_001";

/// Wiki page replaced on every run
pub const DEFAULT_WIKI_PAGE: &str = "Referencias_academicas";

/// Per-request timeout for both calls
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Environment variable holding the Redmine API key (required)
pub const REDMINE_API_KEY_ENV: &str = "REDMINE_API_KEY";

/// Environment variable holding an optional Semantic Scholar API key
pub const SEMANTIC_SCHOLAR_API_KEY_ENV: &str = "SEMANTIC_SCHOLAR_API_KEY";

/// Command-line overrides applied on top of the environment configuration.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub query: Option<String>,
    pub limit: Option<u32>,
    pub redmine_url: Option<String>,
    pub project: Option<String>,
    pub page: Option<String>,
    /// Turn TLS certificate verification back on for the publish call
    pub verify_tls: bool,
}

/// Immutable run configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Semantic Scholar Graph API base (without trailing `/paper/search`)
    pub search_base_url: String,
    pub query: String,
    pub limit: u32,
    pub year_range: String,
    pub user_agent: String,
    /// Sent as `x-api-key` on the search call when present
    pub semantic_scholar_api_key: Option<String>,
    pub redmine_url: String,
    pub project_identifier: String,
    pub wiki_page_title: String,
    pub redmine_api_key: String,
    /// Skip TLS certificate verification on the publish call.
    ///
    /// The production Redmine server presents a certificate that does not
    /// verify, so this defaults to `true`. It only affects the wiki client.
    pub accept_invalid_certs: bool,
    pub timeout: Duration,
}

impl Config {
    /// Create a configuration with the production defaults and the given key.
    pub fn new(redmine_api_key: impl Into<String>) -> Self {
        Self {
            search_base_url: DEFAULT_SEARCH_BASE.to_string(),
            query: DEFAULT_QUERY.to_string(),
            limit: DEFAULT_LIMIT,
            year_range: DEFAULT_YEAR_RANGE.to_string(),
            user_agent: USER_AGENT.to_string(),
            semantic_scholar_api_key: None,
            redmine_url: DEFAULT_REDMINE_URL.to_string(),
            project_identifier: DEFAULT_PROJECT.to_string(),
            wiki_page_title: DEFAULT_WIKI_PAGE.to_string(),
            redmine_api_key: redmine_api_key.into(),
            accept_invalid_certs: true,
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Load configuration from the process environment.
    ///
    /// Fails with [`RefsError::Config`] when `REDMINE_API_KEY` is unset or empty.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(REDMINE_API_KEY_ENV)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                RefsError::Config(format!("{} is not set", REDMINE_API_KEY_ENV))
            })?;

        let ss_key = lookup(SEMANTIC_SCHOLAR_API_KEY_ENV)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Ok(Self::new(api_key).with_semantic_scholar_api_key(ss_key))
    }

    pub fn with_search_base_url(mut self, url: impl Into<String>) -> Self {
        self.search_base_url = url.into();
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_semantic_scholar_api_key(mut self, key: Option<String>) -> Self {
        self.semantic_scholar_api_key = key;
        self
    }

    pub fn with_redmine_url(mut self, url: impl Into<String>) -> Self {
        self.redmine_url = url.into();
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project_identifier = project.into();
        self
    }

    pub fn with_wiki_page(mut self, page: impl Into<String>) -> Self {
        self.wiki_page_title = page.into();
        self
    }

    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Apply command-line overrides; unset options keep the current values.
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(query) = &overrides.query {
            self.query = query.clone();
        }
        if let Some(limit) = overrides.limit {
            self.limit = limit;
        }
        if let Some(url) = &overrides.redmine_url {
            self.redmine_url = url.clone();
        }
        if let Some(project) = &overrides.project {
            self.project_identifier = project.clone();
        }
        if let Some(page) = &overrides.page {
            self.wiki_page_title = page.clone();
        }
        self.with_accept_invalid_certs(!overrides.verify_tls)
    }

    /// Full URL of the paper search endpoint (query string added per request).
    pub fn search_url(&self) -> Result<Url> {
        let raw = format!("{}/paper/search", self.search_base_url.trim_end_matches('/'));
        Url::parse(&raw).map_err(|e| RefsError::Config(format!("Invalid search URL {}: {}", raw, e)))
    }

    /// Full URL of the wiki page resource.
    pub fn wiki_page_url(&self) -> Result<Url> {
        let raw = format!(
            "{}/projects/{}/wiki/{}.json",
            self.redmine_url.trim_end_matches('/'),
            self.project_identifier,
            self.wiki_page_title
        );
        Url::parse(&raw).map_err(|e| RefsError::Config(format!("Invalid wiki URL {}: {}", raw, e)))
    }

    /// Check that both endpoints form valid URLs.
    pub fn validate(&self) -> Result<()> {
        if self.limit == 0 {
            return Err(RefsError::Config("limit must be at least 1".to_string()));
        }
        self.search_url()?;
        self.wiki_page_url()?;
        Ok(())
    }
}
