use crate::domain::FilmId;
use serde::Serialize;

/// One recorded search submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub query: String,
    /// RFC 3339 UTC, assigned by the store.
    pub created_at: String,
}

/// Per-user view counter for one film.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilmStat {
    pub film_id: FilmId,
    /// Title captured on the first selection; later selections do not overwrite it.
    pub film_title: String,
    pub count: i32,
}
