//! Backend connection establishment and bounded RPC calls.
//!
//! The gateway holds at most one connection to the backend, established at
//! startup and reused for the process lifetime. There is no reconnection
//! logic here: tonic's channel may re-dial transparently underneath, but a
//! backend that fails after startup is reported per-request, never healed
//! by the gateway.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time;
use tonic::transport::{Channel, Endpoint};

use crate::observability::metrics;
use crate::proto::ai_service_client::AiServiceClient;
use crate::proto::{
    CompletionRequest, CompletionResponse, JobStatusRequest, JobStatusResponse,
    OptimizationRequest, OptimizationResponse, PingRequest, PingResponse,
};

use super::timeout::{Route, TimeoutPolicy};

/// Errors from backend connection establishment or calls.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Channel establishment failed (bad address, refused, unreachable).
    #[error("connection error: {0}")]
    Connect(#[from] tonic::transport::Error),

    /// The RPC completed with an error status.
    #[error("backend error: {}", .0.message())]
    Rpc(tonic::Status),

    /// The RPC did not complete within its budget.
    #[error("backend call timed out after {budget:?} on {route}")]
    Timeout { route: &'static str, budget: Duration },
}

/// Shared handle to the connected backend service.
///
/// Cloning is cheap: clones share the single underlying HTTP/2 channel, which
/// is safe for concurrent use by many request tasks without external locking.
#[derive(Debug, Clone)]
pub struct BackendHandle {
    client: AiServiceClient<Channel>,
}

impl BackendHandle {
    /// Establish the channel and prove reachability with a `Ping` bounded by
    /// the startup-probe budget before declaring success. Both channel
    /// failure and probe failure yield an error; the caller decides whether
    /// that is fatal.
    pub async fn connect(addr: &str, timeouts: &TimeoutPolicy) -> Result<Self, BackendError> {
        let probe_budget = timeouts.budget(Route::StartupProbe);
        let endpoint = Endpoint::from_shared(addr.to_string())?.connect_timeout(probe_budget);
        let channel = endpoint.connect().await?;
        let handle = Self {
            client: AiServiceClient::new(channel),
        };

        handle
            .ping("connection test", Route::StartupProbe, timeouts)
            .await?;

        Ok(handle)
    }

    /// Liveness probe. The budget is resolved from the policy for the given
    /// route, so route and budget cannot disagree.
    pub async fn ping(
        &self,
        message: &str,
        route: Route,
        timeouts: &TimeoutPolicy,
    ) -> Result<PingResponse, BackendError> {
        let mut client = self.client.clone();
        let request = PingRequest {
            message: message.to_string(),
        };
        bounded(route, timeouts.budget(route), async move {
            client.ping(request).await
        })
        .await
    }

    /// LLM completion under the completion route's budget.
    pub async fn get_completion(
        &self,
        request: CompletionRequest,
        budget: Duration,
    ) -> Result<CompletionResponse, BackendError> {
        let mut client = self.client.clone();
        bounded(Route::Completion, budget, async move {
            client.get_completion(request).await
        })
        .await
    }

    /// Queue an optimization job under the optimize route's budget.
    pub async fn solve_optimization(
        &self,
        request: OptimizationRequest,
        budget: Duration,
    ) -> Result<OptimizationResponse, BackendError> {
        let mut client = self.client.clone();
        bounded(Route::Optimize, budget, async move {
            client.solve_optimization(request).await
        })
        .await
    }

    /// Look up a job under the job-status route's budget.
    pub async fn get_job_status(
        &self,
        request: JobStatusRequest,
        budget: Duration,
    ) -> Result<JobStatusResponse, BackendError> {
        let mut client = self.client.clone();
        bounded(Route::JobStatus, budget, async move {
            client.get_job_status(request).await
        })
        .await
    }
}

/// Run an RPC future under its budget. Expiry drops the future, which
/// cancels the in-flight HTTP/2 request, and reliably unblocks the caller.
async fn bounded<T, F>(route: Route, budget: Duration, call: F) -> Result<T, BackendError>
where
    F: Future<Output = Result<tonic::Response<T>, tonic::Status>>,
{
    match time::timeout(budget, call).await {
        Ok(Ok(response)) => Ok(response.into_inner()),
        Ok(Err(status)) => {
            tracing::warn!(
                route = route.as_str(),
                code = %status.code(),
                message = status.message(),
                "Backend call failed"
            );
            Err(BackendError::Rpc(status))
        }
        Err(_) => {
            tracing::warn!(
                route = route.as_str(),
                budget_ms = budget.as_millis() as u64,
                "Backend call timed out"
            );
            metrics::record_backend_timeout(route.as_str());
            Err(BackendError::Timeout {
                route: route.as_str(),
                budget,
            })
        }
    }
}
