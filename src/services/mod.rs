pub mod activity;
pub use activity::ActivityService;

pub mod enrichment;
pub use enrichment::EnrichmentService;

pub mod error;
pub use error::PipelineError;

pub mod search;
pub use search::SearchService;
