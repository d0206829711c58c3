pub mod prelude;

pub mod film_stats;
pub mod search_history;
