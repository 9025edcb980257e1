//! Per-route timeout budgets for backend calls.
//!
//! Every backend RPC runs under a deadline taken from this table. The
//! deadline starts when the handler issues the call. Keeping the table in
//! one place lets it be tested independently of handler logic.

use std::time::Duration;

/// Routes that issue backend calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// One-shot connectivity probe at process start.
    StartupProbe,
    /// Live probe behind `GET /health`.
    Health,
    /// `POST /api/v1/completion`.
    Completion,
    /// `POST /api/v1/optimize`.
    Optimize,
    /// `GET /api/v1/job/{id}`.
    JobStatus,
}

impl Route {
    /// Label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::StartupProbe => "startup_probe",
            Route::Health => "health",
            Route::Completion => "completion",
            Route::Optimize => "optimize",
            Route::JobStatus => "job_status",
        }
    }
}

/// Maximum wait per route. Fields are public so tests can shorten budgets.
#[derive(Debug, Clone)]
pub struct TimeoutPolicy {
    pub startup_probe: Duration,
    pub health: Duration,
    pub completion: Duration,
    pub optimize: Duration,
    pub job_status: Duration,
}

impl Default for TimeoutPolicy {
    fn default() -> Self {
        Self {
            startup_probe: Duration::from_secs(5),
            health: Duration::from_secs(2),
            completion: Duration::from_secs(30),
            optimize: Duration::from_secs(10),
            job_status: Duration::from_secs(5),
        }
    }
}

impl TimeoutPolicy {
    /// Budget for the given route.
    pub fn budget(&self, route: Route) -> Duration {
        match route {
            Route::StartupProbe => self.startup_probe,
            Route::Health => self.health,
            Route::Completion => self.completion,
            Route::Optimize => self.optimize,
            Route::JobStatus => self.job_status,
        }
    }
}
