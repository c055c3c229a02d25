pub mod analysis;
pub mod error;
pub mod logs;
pub mod pipeline;
pub mod report;

pub use error::{Error, Result};
pub use pipeline::{Outcome, Pipeline, PipelineConfig, RunSummary};
