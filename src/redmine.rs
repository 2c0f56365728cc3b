//! Redmine wiki publisher.
//!
//! Replaces the content of one wiki page through the Redmine REST API
//! (`PUT /projects/{project}/wiki/{title}.json`). Each call is a full
//! overwrite of the page text.

use crate::config::Config;
use crate::error::{RefsError, Result};
use crate::markdown::timestamp;
use chrono::{DateTime, Local};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Header carrying the Redmine API key
pub const API_KEY_HEADER: &str = "X-Redmine-API-Key";

/// Request body for a wiki page update
#[derive(Debug, Serialize)]
pub struct WikiPageUpdate<'a> {
    pub wiki_page: WikiPage<'a>,
}

#[derive(Debug, Serialize)]
pub struct WikiPage<'a> {
    pub text: &'a str,
    pub comments: String,
}

impl<'a> WikiPageUpdate<'a> {
    /// Build the update body; `content` is trimmed before sending.
    pub fn new(content: &'a str, now: &DateTime<Local>) -> Self {
        Self {
            wiki_page: WikiPage {
                text: content.trim(),
                comments: format!("Actualización automática - {}", timestamp(now)),
            },
        }
    }
}

/// Publish the document and report the outcome on the console.
///
/// Returns `true` when Redmine accepted the update.
pub async fn publish_wiki_page(config: &Config, content: &str, now: &DateTime<Local>) -> bool {
    match update_wiki_page(config, content, now).await {
        Ok(()) => {
            println!("✅ Éxito: Página del wiki actualizada.");
            true
        }
        Err(e) => {
            warn!(error = %e, "Wiki update failed");
            println!("{}", e.status_line());
            false
        }
    }
}

/// Send the PUT request once, without retries.
pub async fn update_wiki_page(config: &Config, content: &str, now: &DateTime<Local>) -> Result<()> {
    if config.accept_invalid_certs {
        warn!(server = %config.redmine_url, "TLS certificate verification disabled for Redmine");
    }

    let client = Client::builder()
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .timeout(config.timeout)
        .build()?;

    let url = config.wiki_page_url()?;
    let body = WikiPageUpdate::new(content, now);

    info!(
        project = %config.project_identifier,
        page = %config.wiki_page_title,
        bytes = body.wiki_page.text.len(),
        "Updating wiki page"
    );
    debug!(url = %url, comments = %body.wiki_page.comments, "Sending wiki update");

    let response = client
        .put(url)
        .header(API_KEY_HEADER, config.redmine_api_key.as_str())
        .json(&body)
        .send()
        .await?;

    let status = response.status();

    if status != StatusCode::OK && status != StatusCode::CREATED {
        let error_text = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "Redmine API error");
        return Err(RefsError::Api {
            code: status.as_u16(),
            message: error_text,
        });
    }

    info!(status = status.as_u16(), "Wiki page updated");
    Ok(())
}
