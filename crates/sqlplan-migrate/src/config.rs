//! Executor configuration.

use serde::Deserialize;

/// How a [`PlanExecutor`](crate::executor::PlanExecutor) runs a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Collect the statements without executing them.
    pub dry_run: bool,
    /// Rewrite `?` placeholders to `$1`, `$2`, ... before execution.
    pub numbered_placeholders: bool,
}

impl ExecutorConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables dry-run mode.
    #[must_use]
    pub const fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Enables numbered placeholders.
    #[must_use]
    pub const fn numbered_placeholders(mut self, enabled: bool) -> Self {
        self.numbered_placeholders = enabled;
        self
    }
}
