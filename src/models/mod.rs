pub mod activity;
pub mod film;

pub use activity::{FilmStat, HistoryEntry};
pub use film::{EnrichedFilm, FilmDetails, KeywordSearchFilm, SearchCandidate};
