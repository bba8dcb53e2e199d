//! Pipeline execution: the stage state machine and its retry policy.

mod executor;
mod retry;
mod scenario_tests;

pub use executor::PipelineExecutor;
pub use retry::{BackoffStrategy, JitterStrategy, RetryConfig};
