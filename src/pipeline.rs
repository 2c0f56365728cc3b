//! Search → format → publish.
//!
//! Stages run strictly in order and only hand plain values forward. A failed
//! search stops the run before anything is formatted or sent.

use crate::config::Config;
use crate::markdown;
use crate::redmine;
use crate::semanticscholar;
use chrono::Local;
use tracing::{error, info};

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The search call failed; nothing was published
    SearchFailed,
    /// The page was updated with this many papers
    Published { papers: usize },
    /// The document was built but Redmine rejected it or was unreachable
    PublishFailed { papers: usize },
    /// Publishing was skipped on request
    DryRun { papers: usize, document: String },
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Published { .. } | RunOutcome::DryRun { .. })
    }
}

/// Run the pipeline once.
///
/// With `dry_run` set the formatted document is returned instead of being sent.
pub async fn run(config: &Config, dry_run: bool) -> RunOutcome {
    println!("🚀 Iniciando actualización...\n");

    let Some(results) = semanticscholar::search_papers(config).await else {
        error!("Search returned no result, stopping");
        return RunOutcome::SearchFailed;
    };

    let now = Local::now();
    let papers = results.data.len();
    let document = markdown::render_document(&results, &now);
    info!(papers, chars = document.chars().count(), "Document rendered");

    if dry_run {
        info!("Dry run, skipping wiki update");
        return RunOutcome::DryRun { papers, document };
    }

    println!("📝 Enviando a Redmine...");
    if redmine::publish_wiki_page(config, &document, &now).await {
        println!("🎉 ¡Éxito! Tu wiki está actualizado.");
        RunOutcome::Published { papers }
    } else {
        println!("⚠️ Falló la actualización.");
        RunOutcome::PublishFailed { papers }
    }
}
