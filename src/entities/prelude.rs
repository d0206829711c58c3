pub use super::film_stats::Entity as FilmStats;
pub use super::search_history::Entity as SearchHistory;
