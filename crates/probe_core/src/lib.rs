//! Probe core: pure retry state machine and run accounting.
//!
//! Nothing here performs IO. Template resolution, the per-endpoint retry
//! transition table and the summary arithmetic are plain data transforms,
//! so they can be exercised without a network layer.
mod endpoint;
mod retry;
mod summary;
mod verdict;

pub use endpoint::{
    resolve_template, validate_template, EndpointConfig, Task, TemplateError, KEYWORD_PLACEHOLDER,
};
pub use retry::{
    default_keyword_pool, AttemptOutcome, FailureReason, RetryMachine, RetryState,
    DEFAULT_KEYWORD_POOL,
};
pub use summary::RunSummary;
pub use verdict::{AttemptRecord, EndpointVerdict};
