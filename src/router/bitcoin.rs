// Bitcoin Core routes
// One handler per endpoint, each making exactly one bitcoind call
//
// Numan Thabit 2025 Nov

use axum::{
    extract::{rejection::FormRejection, Path, State},
    routing::{get, post},
    Form, Router as AxumRouter,
};
use serde::Deserialize;
use std::sync::Arc;

use super::response::{ApiError, ApiResult, Envelope};
use crate::bitcoind::methods::BlockRef;
use crate::bitcoind::BitcoindClient;

type Bitcoind = State<Arc<BitcoindClient>>;

pub(crate) const PATHS: &[&str] = &[
    "GET /api/blockcount",
    "GET /api/blockchaininfo",
    "GET /api/networkinfo",
    "GET /api/mininginfo",
    "GET /api/peerinfo",
    "GET /api/mempoolinfo",
    "GET /api/txid/:id",
    "GET /api/mempool",
    "POST /api/pushtx",
    "GET /api/getblockhash",
    "GET /api/blockheight/:id",
    "GET /api/block/:id",
    "GET /api/blockstats/:id",
];

pub fn routes(client: Arc<BitcoindClient>) -> AxumRouter {
    AxumRouter::new()
        .route("/api/blockcount", get(block_count))
        .route("/api/blockchaininfo", get(blockchain_info))
        .route("/api/networkinfo", get(network_info))
        .route("/api/mininginfo", get(mining_info))
        .route("/api/peerinfo", get(peer_info))
        .route("/api/mempoolinfo", get(mempool_info))
        .route("/api/txid/:id", get(transaction_info))
        .route("/api/mempool", get(mempool_contents))
        .route("/api/pushtx", post(push_transaction))
        .route("/api/getblockhash", get(best_block_hash))
        .route("/api/blockheight/:id", get(block_hash_by_height))
        .route("/api/block/:id", get(block))
        .route("/api/blockstats/:id", get(block_stats))
        .with_state(client)
}

async fn block_count(State(btc): Bitcoind) -> ApiResult {
    let count = btc
        .block_count()
        .await
        .map_err(|e| ApiError::backend("Can't get block count", e))?;
    Envelope::ok("blockcount", &count)
}

async fn blockchain_info(State(btc): Bitcoind) -> ApiResult {
    let info = btc
        .blockchain_info()
        .await
        .map_err(|e| ApiError::backend("Can't get blockchain info", e))?;
    Envelope::ok("blockchaininfo", &info)
}

async fn network_info(State(btc): Bitcoind) -> ApiResult {
    let info = btc
        .network_info()
        .await
        .map_err(|e| ApiError::backend("Can't get network info", e))?;
    Envelope::ok("networkinfo", &info)
}

async fn mining_info(State(btc): Bitcoind) -> ApiResult {
    let info = btc
        .mining_info()
        .await
        .map_err(|e| ApiError::backend("Can't get mining info", e))?;
    Envelope::ok("mininginfo", &info)
}

async fn peer_info(State(btc): Bitcoind) -> ApiResult {
    let peers = btc
        .peer_info()
        .await
        .map_err(|e| ApiError::backend("Can't get peer info", e))?;
    Envelope::ok("peerinfo", &peers)
}

async fn mempool_info(State(btc): Bitcoind) -> ApiResult {
    let info = btc
        .mempool_info()
        .await
        .map_err(|e| ApiError::backend("Can't get mempool info", e))?;
    Envelope::ok("mempoolinfo", &info)
}

async fn transaction_info(State(btc): Bitcoind, Path(txid): Path<String>) -> ApiResult {
    let tx = btc
        .transaction_info(&txid)
        .await
        .map_err(|e| ApiError::backend("Can't access transaction index", e))?;
    Envelope::ok("txinfo", &tx)
}

async fn mempool_contents(State(btc): Bitcoind) -> ApiResult {
    let txids = btc
        .mempool_contents()
        .await
        .map_err(|e| ApiError::backend("Can't access mempool", e))?;
    Envelope::ok("mempool", &txids)
}

#[derive(Debug, Deserialize)]
pub struct PushTxForm {
    #[serde(default)]
    pub hex: String,
}

async fn push_transaction(
    State(btc): Bitcoind,
    form: Result<Form<PushTxForm>, FormRejection>,
) -> ApiResult {
    let Form(form) = form.map_err(|e| ApiError::input(format!("Can't read form: {e}")))?;
    if form.hex.is_empty() {
        return Err(ApiError::input("Missing form field: hex"));
    }
    let txid = btc
        .push_transaction(&form.hex)
        .await
        .map_err(|e| ApiError::backend("Can't broadcast transaction", e))?;
    Envelope::ok("txid", &txid)
}

async fn best_block_hash(State(btc): Bitcoind) -> ApiResult {
    let hash = btc
        .best_block_hash()
        .await
        .map_err(|e| ApiError::backend("Error getting the block hash", e))?;
    Envelope::ok("blockhash", &hash)
}

async fn block_hash_by_height(State(btc): Bitcoind, Path(id): Path<String>) -> ApiResult {
    let height: i64 = id
        .parse()
        .map_err(|_| ApiError::input("Error converting input to integer"))?;
    let hash = btc
        .block_hash(height)
        .await
        .map_err(|e| ApiError::backend("Error getting the block hash", e))?;
    Envelope::ok("blockhash", &hash)
}

async fn block(State(btc): Bitcoind, Path(hash): Path<String>) -> ApiResult {
    let block = btc
        .block(&hash)
        .await
        .map_err(|e| ApiError::backend("Can't get block", e))?;
    Envelope::ok("block", &block)
}

async fn block_stats(State(btc): Bitcoind, Path(id): Path<String>) -> ApiResult {
    let stats = btc
        .block_stats(BlockRef::parse(&id))
        .await
        .map_err(|e| ApiError::backend("Can't get block stats", e))?;
    Envelope::ok("blockstats", &stats)
}
