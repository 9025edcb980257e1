//! Shared utilities for gateway integration tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic::{Request, Response, Status};

use ai_gateway::proto::ai_service_server::{AiService, AiServiceServer};
use ai_gateway::proto::{
    CompletionRequest, CompletionResponse, JobStatusRequest, JobStatusResponse,
    OptimizationRequest, OptimizationResponse, PingRequest, PingResponse,
};

/// Programmable in-process backend with per-method call counters.
///
/// Clones share their counters and switches, so a test can keep one clone
/// and hand the other to [`spawn_backend`].
#[derive(Clone, Default)]
pub struct MockBackend {
    pub ping_calls: Arc<AtomicU32>,
    pub completion_calls: Arc<AtomicU32>,
    pub optimize_calls: Arc<AtomicU32>,
    pub job_calls: Arc<AtomicU32>,

    /// Every RPC sleeps this long before replying. Zero means no delay.
    pub delay_ms: Arc<AtomicU64>,

    /// `Ping` replies with an error status while set.
    pub fail_ping: Arc<AtomicBool>,

    /// Fixed replies.
    pub completion: CompletionResponse,
    pub optimization: OptimizationResponse,
    pub job: JobStatusResponse,
}

impl MockBackend {
    async fn maybe_delay(&self) {
        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
    }
}

#[tonic::async_trait]
impl AiService for MockBackend {
    async fn ping(
        &self,
        request: Request<PingRequest>,
    ) -> Result<Response<PingResponse>, Status> {
        self.ping_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_delay().await;
        if self.fail_ping.load(Ordering::SeqCst) {
            return Err(Status::unavailable("backend going down"));
        }
        Ok(Response::new(PingResponse {
            message: format!("Pong: {}", request.into_inner().message),
            timestamp: 0,
        }))
    }

    async fn get_completion(
        &self,
        _request: Request<CompletionRequest>,
    ) -> Result<Response<CompletionResponse>, Status> {
        self.completion_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_delay().await;
        Ok(Response::new(self.completion.clone()))
    }

    async fn solve_optimization(
        &self,
        _request: Request<OptimizationRequest>,
    ) -> Result<Response<OptimizationResponse>, Status> {
        self.optimize_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_delay().await;
        Ok(Response::new(self.optimization.clone()))
    }

    async fn get_job_status(
        &self,
        _request: Request<JobStatusRequest>,
    ) -> Result<Response<JobStatusResponse>, Status> {
        self.job_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_delay().await;
        Ok(Response::new(self.job.clone()))
    }
}

/// Serve the mock on an ephemeral port and return its address.
pub async fn spawn_backend(mock: MockBackend) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        Server::builder()
            .add_service(AiServiceServer::new(mock))
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
            .unwrap();
    });

    addr
}
