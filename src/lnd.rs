// Lightning node client
// Connects to lnd over TLS with macaroon auth and exposes node info
//
// Numan Thabit 2025 Nov

use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use crate::config::{expand_path, LndConfig};
use crate::errors::GatewayError;
use crate::metrics::{REQ_ERRORS, REQ_LATENCY};
use crate::probe::{spawn_probe, ProbeHandle};
use crate::transport::grpc::{connect_tls, lnrpc, LightningClient, MacaroonInterceptor};

/// Identity and sync status of the node, as served to HTTP clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeInfo {
    pub identity_pubkey: String,
    pub alias: String,
    pub color: String,
    pub version: String,
    pub commit_hash: String,
    pub num_pending_channels: u32,
    pub num_active_channels: u32,
    pub num_inactive_channels: u32,
    pub num_peers: u32,
    pub block_height: u32,
    pub block_hash: String,
    pub best_header_timestamp: i64,
    pub synced_to_chain: bool,
    pub synced_to_graph: bool,
    pub testnet: bool,
    pub chains: Vec<ChainInfo>,
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainInfo {
    pub chain: String,
    pub network: String,
}

impl From<lnrpc::GetInfoResponse> for NodeInfo {
    fn from(resp: lnrpc::GetInfoResponse) -> Self {
        Self {
            identity_pubkey: resp.identity_pubkey,
            alias: resp.alias,
            color: resp.color,
            version: resp.version,
            commit_hash: resp.commit_hash,
            num_pending_channels: resp.num_pending_channels,
            num_active_channels: resp.num_active_channels,
            num_inactive_channels: resp.num_inactive_channels,
            num_peers: resp.num_peers,
            block_height: resp.block_height,
            block_hash: resp.block_hash,
            best_header_timestamp: resp.best_header_timestamp,
            synced_to_chain: resp.synced_to_chain,
            synced_to_graph: resp.synced_to_graph,
            testnet: resp.testnet,
            chains: resp
                .chains
                .into_iter()
                .map(|c| ChainInfo {
                    chain: c.chain,
                    network: c.network,
                })
                .collect(),
            uris: resp.uris,
        }
    }
}

#[derive(Clone)]
pub struct LndClient {
    client: LightningClient,
    endpoint: String,
}

impl LndClient {
    pub async fn connect(conf: &LndConfig) -> Result<Self, GatewayError> {
        let tls_file = expand_path(&conf.tls_file);
        let macaroon_file = expand_path(&conf.macaroon_file);
        let macaroon = tokio::fs::read(&macaroon_file).await.map_err(|e| {
            GatewayError::Config(format!("read macaroon {}: {e}", macaroon_file.display()))
        })?;
        let interceptor = MacaroonInterceptor::new(&macaroon)?;
        let channel = connect_tls(&conf.host, conf.port, &tls_file).await?;
        let endpoint = format!("{}:{}", conf.host, conf.port);
        debug!(endpoint = %endpoint, "lnd channel open");
        Ok(Self {
            client: LightningClient::new(channel, interceptor),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn info(&self) -> Result<NodeInfo, GatewayError> {
        let _timer = REQ_LATENCY.with_label_values(&["lnd", "GetInfo"]).start_timer();
        let mut client = self.client.clone();
        match client.get_info(lnrpc::GetInfoRequest {}).await {
            Ok(resp) => Ok(resp.into_inner().into()),
            Err(status) => {
                REQ_ERRORS.with_label_values(&["lnd", "GetInfo"]).inc();
                Err(GatewayError::Lightning(format!(
                    "{:?}: {}",
                    status.code(),
                    status.message()
                )))
            }
        }
    }

    /// Poll `GetInfo` every `every` until the handle is stopped.
    pub fn start_probe(&self, every: Duration) -> ProbeHandle {
        let lnd = self.clone();
        spawn_probe("lnd", every, move || {
            let lnd = lnd.clone();
            async move { lnd.info().await.map(|_| ()) }
        })
    }
}
