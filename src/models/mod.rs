//! Data models for runner statistics
//!
//! Defines the statistics tree handed over by the test runner at the end of a run.

mod output;
mod stats;

pub use output::{CommandPayload, OutputEvent, RequestUri, ResultPayload};
pub use stats::{
    ExecutionContext, RunnerStats, Spec, Suite, Test, TestError, TestState, BEFORE_ALL_HOOK,
    HOOK_TEST_KEY,
};
