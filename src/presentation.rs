//! Plain-data presentation adapter.
//!
//! Turns pipeline results into labels, selection tokens and message text. A
//! chat transport can map [`SelectableOption`] to an inline button and pass the
//! token back on selection; nothing here knows about any transport.

use serde::Serialize;

use crate::domain::FilmId;
use crate::models::{EnrichedFilm, FilmStat, SearchCandidate};
use crate::services::PipelineError;

const SELECTION_PREFIX: &str = "film_";

pub const GREETING: &str = "Hi! I search for films on Kinopoisk HD.\nSend /help for more information.";

pub const HELP: &str = "Send the title of a film, series or anime and pick one of the matches to see its details.\n\
Use /history to see your recent searches.\n\
Use /stats to see the films you viewed most.";

pub const NOTHING_FOUND: &str = "Nothing was found for this query.";

pub const NO_ACTIVITY: &str = "You have not searched for anything yet.";

pub const LINK_LABEL: &str = "Kinopoisk HD";

/// One entry of a selectable candidate list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectableOption {
    pub label: String,
    /// Opaque token returned by the transport when the option is picked.
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkButton {
    pub label: String,
    pub url: String,
}

/// A rendered enriched film: poster, caption and optional deep link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilmMessage {
    pub photo_url: Option<String>,
    pub caption: String,
    pub link: Option<LinkButton>,
}

#[must_use]
pub fn selection_token(film_id: FilmId) -> String {
    format!("{SELECTION_PREFIX}{film_id}")
}

/// Inverse of [`selection_token`]. Returns `None` for foreign or malformed tokens.
#[must_use]
pub fn parse_selection_token(token: &str) -> Option<FilmId> {
    token.strip_prefix(SELECTION_PREFIX)?.parse().ok()
}

#[must_use]
pub fn candidate_label(candidate: &SearchCandidate) -> String {
    match candidate.year {
        Some(year) => format!("{} ({year})", candidate.display_name),
        None => candidate.display_name.clone(),
    }
}

#[must_use]
pub fn selectable_options(candidates: &[SearchCandidate]) -> Vec<SelectableOption> {
    candidates
        .iter()
        .map(|c| SelectableOption {
            label: candidate_label(c),
            token: selection_token(c.film_id),
        })
        .collect()
}

#[must_use]
pub fn search_header(query: &str, candidates: &[SearchCandidate]) -> String {
    if candidates.is_empty() {
        NOTHING_FOUND.to_string()
    } else {
        format!("Results for: {query}")
    }
}

#[must_use]
pub fn film_message(film: &EnrichedFilm) -> FilmMessage {
    FilmMessage {
        photo_url: film.poster_url.clone(),
        caption: film.summary.clone(),
        link: film.external_link.as_ref().map(|url| LinkButton {
            label: LINK_LABEL.to_string(),
            url: url.clone(),
        }),
    }
}

#[must_use]
pub fn history_message(queries: &[String]) -> String {
    if queries.is_empty() {
        return NO_ACTIVITY.to_string();
    }

    format!("Your recent searches:\n{}", queries.join("\n"))
}

#[must_use]
pub fn stats_message(stats: &[FilmStat]) -> String {
    if stats.is_empty() {
        return NO_ACTIVITY.to_string();
    }

    let lines: Vec<String> = stats
        .iter()
        .map(|s| format!("{} - {}", s.film_title, s.count))
        .collect();

    format!("Your most viewed films:\n{}", lines.join("\n"))
}

/// User-facing text for a failed interaction.
#[must_use]
pub fn error_message(error: &PipelineError) -> &'static str {
    match error {
        PipelineError::InvalidQuery => "Please send a film title to search for.",
        PipelineError::Upstream(_) => "The film service is not responding. Please try again later.",
        PipelineError::Persistence(_) => "Something went wrong on our side. Please try again.",
    }
}
