// gRPC transport layer implementation
// This file implements the TLS channel, macaroon credentials and the
// lnrpc.Lightning client used to talk to an lnd node
//
// Numan Thabit 2025 Nov

use std::path::Path;
use std::time::Duration;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::codegen::InterceptedService;
use tonic::metadata::{Ascii, MetadataValue};
use tonic::service::Interceptor;
use tonic::transport::{Certificate, Channel, ClientTlsConfig, Endpoint};
use tonic::{Request, Response, Status};

use crate::errors::GatewayError;

/// Messages for the subset of `lnrpc` the gateway uses.
pub mod lnrpc {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct GetInfoRequest {}

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct GetInfoResponse {
        #[prost(string, tag = "1")]
        pub identity_pubkey: ::prost::alloc::string::String,
        #[prost(string, tag = "2")]
        pub alias: ::prost::alloc::string::String,
        #[prost(uint32, tag = "3")]
        pub num_pending_channels: u32,
        #[prost(uint32, tag = "4")]
        pub num_active_channels: u32,
        #[prost(uint32, tag = "5")]
        pub num_peers: u32,
        #[prost(uint32, tag = "6")]
        pub block_height: u32,
        #[prost(string, tag = "8")]
        pub block_hash: ::prost::alloc::string::String,
        #[prost(bool, tag = "9")]
        pub synced_to_chain: bool,
        #[prost(bool, tag = "10")]
        pub testnet: bool,
        #[prost(string, repeated, tag = "12")]
        pub uris: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
        #[prost(int64, tag = "13")]
        pub best_header_timestamp: i64,
        #[prost(string, tag = "14")]
        pub version: ::prost::alloc::string::String,
        #[prost(uint32, tag = "15")]
        pub num_inactive_channels: u32,
        #[prost(message, repeated, tag = "16")]
        pub chains: ::prost::alloc::vec::Vec<Chain>,
        #[prost(string, tag = "17")]
        pub color: ::prost::alloc::string::String,
        #[prost(bool, tag = "18")]
        pub synced_to_graph: bool,
        #[prost(string, tag = "20")]
        pub commit_hash: ::prost::alloc::string::String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Chain {
        #[prost(string, tag = "1")]
        pub chain: ::prost::alloc::string::String,
        #[prost(string, tag = "2")]
        pub network: ::prost::alloc::string::String,
    }
}

/// Attaches the hex-encoded macaroon to every outgoing call.
#[derive(Clone)]
pub struct MacaroonInterceptor {
    macaroon: MetadataValue<Ascii>,
}

impl MacaroonInterceptor {
    pub fn new(macaroon: &[u8]) -> Result<Self, GatewayError> {
        let macaroon = MetadataValue::try_from(hex::encode(macaroon))
            .map_err(|e| GatewayError::Config(format!("macaroon metadata: {e}")))?;
        Ok(Self { macaroon })
    }
}

impl Interceptor for MacaroonInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        request
            .metadata_mut()
            .insert("macaroon", self.macaroon.clone());
        Ok(request)
    }
}

pub type LightningChannel = InterceptedService<Channel, MacaroonInterceptor>;

/// Client for the `lnrpc.Lightning` service.
#[derive(Clone)]
pub struct LightningClient {
    inner: tonic::client::Grpc<LightningChannel>,
}

impl LightningClient {
    pub fn new(channel: Channel, interceptor: MacaroonInterceptor) -> Self {
        Self {
            inner: tonic::client::Grpc::new(InterceptedService::new(channel, interceptor)),
        }
    }

    pub async fn get_info(
        &mut self,
        request: lnrpc::GetInfoRequest,
    ) -> Result<Response<lnrpc::GetInfoResponse>, Status> {
        self.inner
            .ready()
            .await
            .map_err(|e| Status::unknown(format!("Service was not ready: {e}")))?;
        let codec = tonic::codec::ProstCodec::default();
        let path = PathAndQuery::from_static("/lnrpc.Lightning/GetInfo");
        self.inner.unary(Request::new(request), path, codec).await
    }
}

/// Open a TLS channel that trusts the node's own certificate.
pub async fn connect_tls(
    host: &str,
    port: u16,
    cert_file: &Path,
) -> Result<Channel, GatewayError> {
    let pem = tokio::fs::read(cert_file).await.map_err(|e| {
        GatewayError::Config(format!("read tls cert {}: {e}", cert_file.display()))
    })?;
    let tls = ClientTlsConfig::new()
        .ca_certificate(Certificate::from_pem(pem))
        .domain_name(host.to_string());
    let endpoint = format!("https://{host}:{port}");
    let ep = Endpoint::from_shared(endpoint.clone())
        .map_err(|e| GatewayError::Config(format!("lnd endpoint {endpoint}: {e}")))?
        .connect_timeout(Duration::from_secs(5))
        .tcp_nodelay(true)
        .tls_config(tls)
        .map_err(|e| GatewayError::Config(format!("lnd tls config: {e}")))?;
    ep.connect().await.map_err(|e| GatewayError::Unreachable {
        endpoint,
        source: Box::new(GatewayError::Transport(e.to_string())),
    })
}
