//! Markdown rendering of search results for the wiki page.
//!
//! Titles and abstracts are inserted verbatim; markdown in the source data is
//! not escaped.

use crate::semanticscholar::{Paper, SearchResponse};
use chrono::{DateTime, Local};

/// `DD/MM/YYYY HH:MM`, used in the page header and the update comment
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Abstracts are cut to this many characters
pub const ABSTRACT_CHARS: usize = 350;

/// Authors listed before falling back to "et al."
pub const MAX_AUTHORS: usize = 4;

/// Line written instead of paper blocks when the search returned nothing
pub const NO_RESULTS: &str = "❌ No se encontraron artículos.\n";

const NO_TITLE: &str = "Sin título";
const NO_YEAR: &str = "N/A";
const NO_JOURNAL: &str = "Sin revista";
const NO_ABSTRACT: &str = "No disponible";
const NO_URL: &str = "#";

/// Format `now` as `DD/MM/YYYY HH:MM`.
pub fn timestamp(now: &DateTime<Local>) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// Render the complete page for a search response.
pub fn render_document(response: &SearchResponse, now: &DateTime<Local>) -> String {
    let mut md = render_header(now);

    if response.data.is_empty() {
        md.push_str(NO_RESULTS);
        return md;
    }

    for (i, paper) in response.data.iter().enumerate() {
        md.push_str(&render_paper(paper, i + 1));
    }

    md
}

fn render_header(now: &DateTime<Local>) -> String {
    format!(
        "# Referencias Académicas - Transformación Digital del SIA\n\
         \n\
         > Actualizado el {} (automático)\n\
         \n\
         Artículos científicos relevantes para el SIA.\n\
         \n\
         ---\n\
         \n",
        timestamp(now)
    )
}

/// Render one paper block; `index` is 1-based.
pub fn render_paper(paper: &Paper, index: usize) -> String {
    let title = paper.title.as_deref().unwrap_or(NO_TITLE);
    let year = paper
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| NO_YEAR.to_string());
    let journal = paper.journal_name().unwrap_or(NO_JOURNAL);
    let citations = paper.citation_count.unwrap_or(0);
    let url = paper.url.as_deref().unwrap_or(NO_URL);

    format!(
        "\n\
         ### {index}. {title}\n\
         \n\
         - **Autores:** {authors}\n\
         - **Año:** {year} | **Revista:** {journal}\n\
         - **Citas:** {citations}\n\
         - **Resumen:** {summary}\n\
         - [🔗 Ver artículo]({url})\n\
         \n\
         ---\n\
         \n",
        authors = format_authors(&paper.author_names()),
        summary = truncate_abstract(paper.abstract_text.as_deref()),
    )
}

/// Join up to [`MAX_AUTHORS`] names, appending " et al." when more exist.
pub fn format_authors(names: &[&str]) -> String {
    let mut joined = names
        .iter()
        .take(MAX_AUTHORS)
        .copied()
        .collect::<Vec<_>>()
        .join(", ");
    if names.len() > MAX_AUTHORS {
        joined.push_str(" et al.");
    }
    joined
}

/// First [`ABSTRACT_CHARS`] characters plus "...", whatever the input length.
///
/// A missing or empty abstract is replaced by the placeholder before cutting.
pub fn truncate_abstract(text: Option<&str>) -> String {
    let source = text.filter(|t| !t.is_empty()).unwrap_or(NO_ABSTRACT);
    let mut out: String = source.chars().take(ABSTRACT_CHARS).collect();
    out.push_str("...");
    out
}
