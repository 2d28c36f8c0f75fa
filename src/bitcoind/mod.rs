// Bitcoin Core client
// Connection setup with a liveness probe, and one adapter per RPC method
// the gateway serves
//
// Numan Thabit 2025 Nov

pub mod methods;
pub mod types;

use tracing::{debug, info};

use crate::config::BitcoindConfig;
use crate::errors::GatewayError;
use crate::transport::jsonrpc::JsonRpc;
use methods::{
    BlockRef, GetBestBlockHash, GetBlock, GetBlockCount, GetBlockHash, GetBlockStats,
    GetBlockchainInfo, GetMempoolInfo, GetMiningInfo, GetNetworkInfo, GetPeerInfo,
    GetRawMempool, GetRawTransaction, SendRawTransaction,
};
use types::{
    Block, BlockStats, BlockchainInfo, MempoolInfo, MiningInfo, NetworkInfo, PeerInfo,
    VerboseTransaction,
};

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 8332;
pub const DEFAULT_USER: &str = "lncm";

#[derive(Debug, Clone)]
pub struct BitcoindClient {
    rpc: JsonRpc,
}

impl BitcoindClient {
    /// Build the client and make one `getblockcount` round trip. A client is
    /// only returned if that call succeeds.
    pub async fn connect(conf: &BitcoindConfig) -> Result<Self, GatewayError> {
        let host = if conf.host.is_empty() {
            DEFAULT_HOST
        } else {
            conf.host.as_str()
        };
        let port = if conf.port == 0 { DEFAULT_PORT } else { conf.port };
        let user = if conf.user.is_empty() {
            DEFAULT_USER
        } else {
            conf.user.as_str()
        };
        let url = format!("http://{host}:{port}");
        info!(url = %url, "creating bitcoin client");

        let client = Self {
            rpc: JsonRpc::new(url.clone(), user, conf.pass.clone())?,
        };
        let height = client
            .block_count()
            .await
            .map_err(|source| GatewayError::Unreachable {
                endpoint: url,
                source: Box::new(source),
            })?;
        debug!(height, "bitcoind liveness probe ok");
        Ok(client)
    }

    pub fn endpoint(&self) -> &str {
        self.rpc.endpoint()
    }

    pub async fn block_count(&self) -> Result<i64, GatewayError> {
        self.rpc.call(&GetBlockCount).await
    }

    pub async fn blockchain_info(&self) -> Result<BlockchainInfo, GatewayError> {
        self.rpc.call(&GetBlockchainInfo).await
    }

    pub async fn network_info(&self) -> Result<NetworkInfo, GatewayError> {
        self.rpc.call(&GetNetworkInfo).await
    }

    pub async fn transaction_info(&self, txid: &str) -> Result<VerboseTransaction, GatewayError> {
        self.rpc.call(&GetRawTransaction { txid }).await
    }

    pub async fn mempool_contents(&self) -> Result<Vec<String>, GatewayError> {
        self.rpc.call(&GetRawMempool).await
    }

    pub async fn mempool_info(&self) -> Result<MempoolInfo, GatewayError> {
        self.rpc.call(&GetMempoolInfo).await
    }

    pub async fn push_transaction(&self, hex: &str) -> Result<String, GatewayError> {
        self.rpc.call(&SendRawTransaction { hex }).await
    }

    pub async fn best_block_hash(&self) -> Result<String, GatewayError> {
        self.rpc.call(&GetBestBlockHash).await
    }

    pub async fn block_hash(&self, height: i64) -> Result<String, GatewayError> {
        self.rpc.call(&GetBlockHash { height }).await
    }

    pub async fn block(&self, hash: &str) -> Result<Block, GatewayError> {
        self.rpc.call(&GetBlock { hash }).await
    }

    pub async fn mining_info(&self) -> Result<MiningInfo, GatewayError> {
        self.rpc.call(&GetMiningInfo).await
    }

    pub async fn peer_info(&self) -> Result<Vec<PeerInfo>, GatewayError> {
        self.rpc.call(&GetPeerInfo).await
    }

    pub async fn block_stats(&self, block: BlockRef<'_>) -> Result<BlockStats, GatewayError> {
        self.rpc.call(&GetBlockStats { block }).await
    }
}
