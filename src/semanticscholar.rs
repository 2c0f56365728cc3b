//! Semantic Scholar API Client
//!
//! Runs the single paper search that feeds the wiki page.
//!
//! API Details:
//! - Search endpoint: GET /graph/v1/paper/search
//! - Results come back under a `data` array, one object per paper
//! - Rate limit: 1 req/s (unauthenticated), higher with API key

use crate::config::Config;
use crate::error::{RefsError, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Fields requested for every paper
pub const SEARCH_FIELDS: &str = "title,authors,year,abstract,url,citationCount,journal";

/// Parsed body of a paper search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Total hits reported by the API (not just this page)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    pub data: Vec<Paper>,
}

/// One paper as returned by the search endpoint.
///
/// Only the fields the page shows are read; any other keys are ignored.
/// Every field is optional on the wire; the formatter picks placeholders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Option<Vec<Author>>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(rename = "abstract", default)]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "citationCount", default)]
    pub citation_count: Option<u64>,
    #[serde(default)]
    pub journal: Option<Journal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Journal {
    #[serde(default)]
    pub name: Option<String>,
}

impl Paper {
    /// Author names in API order; unnamed entries become empty strings.
    pub fn author_names(&self) -> Vec<&str> {
        self.authors
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|a| a.name.as_deref().unwrap_or_default())
            .collect()
    }

    pub fn journal_name(&self) -> Option<&str> {
        self.journal.as_ref().and_then(|j| j.name.as_deref())
    }
}

/// Search for papers and report the outcome on the console.
///
/// Any failure (bad status, transport error, unreadable body) is logged here
/// and collapses to `None`; callers only decide whether to continue.
pub async fn search_papers(config: &Config) -> Option<SearchResponse> {
    println!("📡 Buscando en Semantic Scholar...");

    match fetch_papers(config).await {
        Ok(response) => {
            println!("✅ {} artículos encontrados.", response.data.len());
            Some(response)
        }
        Err(e) => {
            warn!(error = %e, "Semantic Scholar search failed");
            println!("{}", e.status_line());
            None
        }
    }
}

/// Run the search request once, without retries.
pub async fn fetch_papers(config: &Config) -> Result<SearchResponse> {
    let client = Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout)
        .build()?;

    let url = config.search_url()?;
    let limit = config.limit.to_string();

    info!(
        query = %config.query,
        limit = config.limit,
        year = %config.year_range,
        "Starting Semantic Scholar search"
    );

    let mut request = client.get(url.clone()).query(&[
        ("query", config.query.as_str()),
        ("limit", limit.as_str()),
        ("fields", SEARCH_FIELDS),
        ("year", config.year_range.as_str()),
    ]);

    // Add API key header if provided
    if let Some(key) = config.semantic_scholar_api_key.as_deref() {
        request = request.header("x-api-key", key);
    }

    debug!(url = %url, "Sending search request");

    let response = request.send().await?;
    let status = response.status();

    if status != StatusCode::OK {
        let error_text = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "API error");
        return Err(RefsError::Api {
            code: status.as_u16(),
            message: error_text,
        });
    }

    let body = response.text().await?;
    let parsed = parse_search_response(&body)?;
    info!(found = parsed.data.len(), total = ?parsed.total, "Semantic Scholar search complete");

    Ok(parsed)
}

/// Parse a search body; a body without a `data` array is rejected.
pub fn parse_search_response(body: &str) -> Result<SearchResponse> {
    serde_json::from_str(body).map_err(|e| {
        RefsError::Parse(format!("Failed to parse Semantic Scholar response: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_record() {
        let body = r#"{
            "total": 1234,
            "offset": 0,
            "next": 6,
            "data": [{
                "paperId": "abc",
                "title": "Open data platforms",
                "authors": [{"authorId": "1", "name": "Ana"}, {"authorId": null, "name": "Luis"}],
                "year": 2022,
                "abstract": "We study things.",
                "url": "https://www.semanticscholar.org/paper/abc",
                "citationCount": 17,
                "journal": {"name": "Sustainability", "volume": "14"}
            }]
        }"#;

        let parsed = parse_search_response(body).expect("should parse");
        assert_eq!(parsed.total, Some(1234));
        assert_eq!(parsed.data.len(), 1);

        let paper = &parsed.data[0];
        assert_eq!(paper.title.as_deref(), Some("Open data platforms"));
        assert_eq!(paper.author_names(), vec!["Ana", "Luis"]);
        assert_eq!(paper.year, Some(2022));
        assert_eq!(paper.citation_count, Some(17));
        assert_eq!(paper.journal_name(), Some("Sustainability"));
    }

    #[test]
    fn test_parse_sparse_record() {
        let body = r#"{"data": [{"title": "X", "journal": null, "abstract": null}]}"#;
        let parsed = parse_search_response(body).expect("should parse");
        let paper = &parsed.data[0];
        assert!(paper.author_names().is_empty());
        assert_eq!(paper.journal_name(), None);
        assert_eq!(paper.abstract_text, None);
        assert_eq!(paper.citation_count, None);
    }

    #[test]
    fn test_journal_without_name() {
        let body = r#"{"data": [{"journal": {"volume": "3"}}]}"#;
        let parsed = parse_search_response(body).expect("should parse");
        assert_eq!(parsed.data[0].journal_name(), None);
    }

    #[test]
    fn test_unused_keys_do_not_break_parsing() {
        let body = r#"{"data": [{
            "paperId": 42,
            "title": "A",
            "authors": [{"authorId": 7, "name": "Ana"}],
            "journal": {"name": "J", "volume": 14, "pages": [1, 2]},
            "venue": {"id": 3}
        }]}"#;

        let parsed = parse_search_response(body).expect("should parse");
        let paper = &parsed.data[0];
        assert_eq!(paper.title.as_deref(), Some("A"));
        assert_eq!(paper.author_names(), vec!["Ana"]);
        assert_eq!(paper.journal_name(), Some("J"));
    }

    #[test]
    fn test_missing_data_is_error() {
        let err = parse_search_response(r#"{"total": 0}"#).unwrap_err();
        assert!(matches!(err, RefsError::Parse(_)));
    }

    #[test]
    fn test_malformed_body_is_error() {
        assert!(parse_search_response("<html>busy</html>").is_err());
    }
}
