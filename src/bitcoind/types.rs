// Response shapes for the bitcoind RPC calls the gateway exposes.
// Field names follow the node's JSON so payloads pass through unchanged.
//
// Numan Thabit 2025 Nov

use serde::{Deserialize, Serialize};

/// `getblockchaininfo` (softforks omitted)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockchainInfo {
    pub chain: String,
    pub blocks: i64,
    pub headers: i64,
    #[serde(rename = "bestblockhash")]
    pub best_block_hash: String,
    pub difficulty: f64,
    #[serde(rename = "mediantime")]
    pub median_time: i64,
    #[serde(rename = "verificationprogress")]
    pub verification_progress: f64,
    #[serde(rename = "initialblockdownload")]
    pub initial_block_download: bool,
    #[serde(rename = "chainwork")]
    pub chain_work: String,
    pub size_on_disk: i64,
    #[serde(default)]
    pub pruned: bool,
    #[serde(rename = "pruneheight", default, skip_serializing_if = "Option::is_none")]
    pub prune_height: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automatic_pruning: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prune_target_size: Option<i64>,
    #[serde(default)]
    pub warnings: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkEntry {
    pub name: String,
    pub limited: bool,
    pub reachable: bool,
    pub proxy: String,
    pub proxy_randomize_credentials: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalAddress {
    pub address: String,
    pub port: i64,
    pub score: i64,
}

/// `getnetworkinfo`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkInfo {
    pub version: i64,
    #[serde(rename = "subversion")]
    pub sub_version: String,
    #[serde(rename = "protocolversion")]
    pub protocol_version: i64,
    #[serde(rename = "localservices")]
    pub local_services: String,
    #[serde(rename = "localrelay")]
    pub local_relay: bool,
    pub connections: i64,
    #[serde(rename = "networkactive")]
    pub network_active: bool,
    #[serde(default)]
    pub networks: Vec<NetworkEntry>,
    #[serde(rename = "relayfee")]
    pub relay_fee: f64,
    #[serde(rename = "incrementalfee")]
    pub incremental_fee: f64,
    #[serde(rename = "localaddresses", default)]
    pub local_addresses: Vec<LocalAddress>,
    #[serde(default)]
    pub warnings: serde_json::Value,
}

/// `getmininginfo`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiningInfo {
    pub blocks: i64,
    #[serde(rename = "currentblockweight", default, skip_serializing_if = "Option::is_none")]
    pub current_block_weight: Option<i64>,
    #[serde(rename = "currentblocktx", default, skip_serializing_if = "Option::is_none")]
    pub current_block_tx: Option<i64>,
    pub difficulty: f64,
    #[serde(rename = "networkhashps")]
    pub network_hash_ps: f64,
    #[serde(rename = "pooledtx")]
    pub pooled_tx: i64,
    pub chain: String,
    #[serde(default)]
    pub warnings: serde_json::Value,
}

/// `getmempoolinfo`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MempoolInfo {
    pub size: i64,
    pub bytes: i64,
    pub usage: i64,
    #[serde(rename = "maxmempool")]
    pub max_mempool: i64,
    #[serde(rename = "mempoolminfee")]
    pub mempool_min_fee: f64,
    #[serde(rename = "minrelaytxfee")]
    pub min_relay_tx_fee: f64,
}

/// Previous output spent by a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionInput {
    /// Absent on coinbase inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vout: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coinbase: Option<String>,
    pub sequence: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptPubKey {
    pub asm: String,
    pub hex: String,
    #[serde(rename = "type")]
    pub script_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "reqSigs", default, skip_serializing_if = "Option::is_none")]
    pub req_sigs: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionOutput {
    pub value: f64,
    pub n: i64,
    #[serde(rename = "scriptPubKey")]
    pub script_pub_key: ScriptPubKey,
}

/// `getrawtransaction <txid> 1`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerboseTransaction {
    pub txid: String,
    pub hash: String,
    pub size: i64,
    pub hex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmations: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocktime: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blockhash: Option<String>,
    pub vin: Vec<TransactionInput>,
    pub vout: Vec<TransactionOutput>,
}

/// `getblock <hash> 1`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub hash: String,
    pub confirmations: i64,
    pub size: i64,
    #[serde(rename = "strippedsize")]
    pub stripped_size: i64,
    pub weight: i64,
    pub height: i64,
    pub version: i64,
    #[serde(rename = "versionHex")]
    pub version_hex: String,
    #[serde(rename = "merkleroot")]
    pub merkle_root: String,
    pub tx: Vec<String>,
    pub time: i64,
    #[serde(rename = "mediantime")]
    pub median_time: i64,
    pub nonce: i64,
    pub bits: String,
    pub difficulty: f64,
    #[serde(rename = "chainwork")]
    pub chain_work: String,
    #[serde(rename = "previousblockhash", default, skip_serializing_if = "Option::is_none")]
    pub previous_block_hash: Option<String>,
    #[serde(rename = "nextblockhash", default, skip_serializing_if = "Option::is_none")]
    pub next_block_hash: Option<String>,
}

/// One entry of `getpeerinfo`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerInfo {
    pub id: i64,
    pub addr: String,
    #[serde(rename = "addrbind", default, skip_serializing_if = "Option::is_none")]
    pub addr_bind: Option<String>,
    #[serde(rename = "addrlocal", default, skip_serializing_if = "Option::is_none")]
    pub addr_local: Option<String>,
    pub services: String,
    #[serde(rename = "servicesnames", default)]
    pub services_names: Vec<String>,
    #[serde(rename = "relaytxes", default)]
    pub relay_txes: bool,
    #[serde(rename = "lastsend")]
    pub last_send: i64,
    #[serde(rename = "lastrecv")]
    pub last_recv: i64,
    #[serde(rename = "bytessent")]
    pub bytes_sent: i64,
    #[serde(rename = "bytesrecv")]
    pub bytes_recv: i64,
    #[serde(rename = "conntime")]
    pub conn_time: i64,
    #[serde(rename = "timeoffset")]
    pub time_offset: i64,
    #[serde(rename = "pingtime", default, skip_serializing_if = "Option::is_none")]
    pub ping_time: Option<f64>,
    #[serde(rename = "minping", default, skip_serializing_if = "Option::is_none")]
    pub min_ping: Option<f64>,
    #[serde(rename = "pingwait", default, skip_serializing_if = "Option::is_none")]
    pub ping_wait: Option<f64>,
    pub version: i64,
    pub subver: String,
    pub inbound: bool,
    #[serde(rename = "startingheight", default, skip_serializing_if = "Option::is_none")]
    pub starting_height: Option<i64>,
    #[serde(default)]
    pub synced_headers: i64,
    #[serde(default)]
    pub synced_blocks: i64,
    #[serde(default)]
    pub inflight: Vec<i64>,
    #[serde(rename = "minfeefilter", default, skip_serializing_if = "Option::is_none")]
    pub min_fee_filter: Option<f64>,
}

/// `getblockstats <height|hash>`; fee amounts are in satoshis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockStats {
    #[serde(rename = "avgfee")]
    pub avg_fee: i64,
    #[serde(rename = "avgfeerate")]
    pub avg_fee_rate: i64,
    #[serde(rename = "avgtxsize")]
    pub avg_tx_size: i64,
    pub blockhash: String,
    #[serde(rename = "feerate_percentiles")]
    pub fee_rate_percentiles: Vec<i64>,
    pub height: i64,
    pub ins: i64,
    #[serde(rename = "maxfee")]
    pub max_fee: i64,
    #[serde(rename = "maxfeerate")]
    pub max_fee_rate: i64,
    #[serde(rename = "maxtxsize")]
    pub max_tx_size: i64,
    #[serde(rename = "medianfee")]
    pub median_fee: i64,
    #[serde(rename = "mediantime")]
    pub median_time: i64,
    #[serde(rename = "mediantxsize")]
    pub median_tx_size: i64,
    #[serde(rename = "minfee")]
    pub min_fee: i64,
    #[serde(rename = "minfeerate")]
    pub min_fee_rate: i64,
    #[serde(rename = "mintxsize")]
    pub min_tx_size: i64,
    pub outs: i64,
    pub subsidy: i64,
    pub swtotal_size: i64,
    pub swtotal_weight: i64,
    pub swtxs: i64,
    pub time: i64,
    pub total_out: i64,
    pub total_size: i64,
    pub total_weight: i64,
    #[serde(rename = "totalfee")]
    pub total_fee: i64,
    pub txs: i64,
    pub utxo_increase: i64,
    pub utxo_size_inc: i64,
}
