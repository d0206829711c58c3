mod activity;
mod search;
mod select;
mod serve;

pub use activity::{cmd_history, cmd_stats};
pub use search::cmd_search;
pub use select::cmd_select;
pub use serve::cmd_serve;
