//! In-process OTLP collectors for tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use opentelemetry_proto::tonic::collector::trace::v1::trace_service_server::{
    TraceService, TraceServiceServer,
};
use opentelemetry_proto::tonic::collector::trace::v1::{
    ExportTraceServiceRequest, ExportTraceServiceResponse,
};
use tokio_stream::wrappers::TcpListenerStream;
use tonic::{Request, Response, Status};

/// Records the names of exported spans
#[derive(Clone, Default)]
pub(crate) struct MockCollector {
    spans: Arc<Mutex<Vec<String>>>,
}

impl MockCollector {
    pub(crate) fn span_names(&self) -> Vec<String> {
        self.spans.lock().unwrap().clone()
    }
}

#[tonic::async_trait]
impl TraceService for MockCollector {
    async fn export(
        &self,
        request: Request<ExportTraceServiceRequest>,
    ) -> Result<Response<ExportTraceServiceResponse>, Status> {
        let names = request
            .into_inner()
            .resource_spans
            .into_iter()
            .flat_map(|rs| rs.scope_spans)
            .flat_map(|ss| ss.spans)
            .map(|span| span.name);
        self.spans.lock().unwrap().extend(names);

        Ok(Response::new(ExportTraceServiceResponse::default()))
    }
}

/// Accepts export calls and never answers them
#[derive(Clone, Default)]
pub(crate) struct StalledCollector;

#[tonic::async_trait]
impl TraceService for StalledCollector {
    async fn export(
        &self,
        _request: Request<ExportTraceServiceRequest>,
    ) -> Result<Response<ExportTraceServiceResponse>, Status> {
        std::future::pending().await
    }
}

/// Serve `service` on a loopback port for the rest of the test.
pub(crate) async fn spawn_collector<S: TraceService>(service: S) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let service = TraceServiceServer::new(service);
    tokio::spawn(async move {
        tonic::transport::Server::builder()
            .add_service(service)
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
    });

    addr
}

/// A port with nothing listening on it.
pub(crate) fn unused_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}
