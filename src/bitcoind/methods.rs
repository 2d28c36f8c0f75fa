// Typed requests for every bitcoind RPC method the gateway calls.
// Each request knows its method name, output shape and wire parameters.
//
// Numan Thabit 2025 Nov

use serde_json::Value;

use super::types::{
    Block, BlockStats, BlockchainInfo, MempoolInfo, MiningInfo, NetworkInfo, PeerInfo,
    VerboseTransaction,
};
use crate::transport::jsonrpc::RpcMethod;

macro_rules! no_param_method {
    ($(#[$doc:meta])* $name:ident, $method:literal, $output:ty) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl RpcMethod for $name {
            const NAME: &'static str = $method;
            type Output = $output;
        }
    };
}

no_param_method!(
    /// Height of the most-work chain tip.
    GetBlockCount, "getblockcount", i64
);
no_param_method!(GetBlockchainInfo, "getblockchaininfo", BlockchainInfo);
no_param_method!(GetNetworkInfo, "getnetworkinfo", NetworkInfo);
no_param_method!(
    /// Txids currently in the mempool.
    GetRawMempool, "getrawmempool", Vec<String>
);
no_param_method!(GetMempoolInfo, "getmempoolinfo", MempoolInfo);
no_param_method!(GetBestBlockHash, "getbestblockhash", String);
no_param_method!(GetMiningInfo, "getmininginfo", MiningInfo);
no_param_method!(GetPeerInfo, "getpeerinfo", Vec<PeerInfo>);

/// Decoded transaction lookup. Needs `txindex=1` for confirmed
/// transactions outside the wallet.
#[derive(Debug, Clone)]
pub struct GetRawTransaction<'a> {
    pub txid: &'a str,
}

impl RpcMethod for GetRawTransaction<'_> {
    const NAME: &'static str = "getrawtransaction";
    type Output = VerboseTransaction;

    fn params(&self) -> Vec<Value> {
        vec![Value::from(self.txid), Value::from(1)]
    }
}

/// Broadcast a signed transaction; returns its txid.
#[derive(Debug, Clone)]
pub struct SendRawTransaction<'a> {
    pub hex: &'a str,
}

impl RpcMethod for SendRawTransaction<'_> {
    const NAME: &'static str = "sendrawtransaction";
    type Output = String;

    fn params(&self) -> Vec<Value> {
        vec![Value::from(self.hex)]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetBlockHash {
    pub height: i64,
}

impl RpcMethod for GetBlockHash {
    const NAME: &'static str = "getblockhash";
    type Output = String;

    fn params(&self) -> Vec<Value> {
        vec![Value::from(self.height)]
    }
}

/// Block header plus txids (verbosity 1).
#[derive(Debug, Clone)]
pub struct GetBlock<'a> {
    pub hash: &'a str,
}

impl RpcMethod for GetBlock<'_> {
    const NAME: &'static str = "getblock";
    type Output = Block;

    fn params(&self) -> Vec<Value> {
        vec![Value::from(self.hash), Value::from(1)]
    }
}

/// A block addressed either by height or by hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockRef<'a> {
    Height(i64),
    Hash(&'a str),
}

impl<'a> BlockRef<'a> {
    /// Numeric input is a height, anything else is taken as a hash.
    pub fn parse(raw: &'a str) -> Self {
        match raw.parse::<i64>() {
            Ok(height) => BlockRef::Height(height),
            Err(_) => BlockRef::Hash(raw),
        }
    }
}

impl From<BlockRef<'_>> for Value {
    fn from(block: BlockRef<'_>) -> Self {
        match block {
            BlockRef::Height(height) => Value::from(height),
            BlockRef::Hash(hash) => Value::from(hash),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetBlockStats<'a> {
    pub block: BlockRef<'a>,
}

impl RpcMethod for GetBlockStats<'_> {
    const NAME: &'static str = "getblockstats";
    type Output = BlockStats;

    fn params(&self) -> Vec<Value> {
        vec![self.block.into()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn no_param_methods_send_empty_params() {
        assert_eq!(GetBlockCount::NAME, "getblockcount");
        assert!(GetBlockCount.params().is_empty());
        assert_eq!(GetRawMempool::NAME, "getrawmempool");
        assert!(GetPeerInfo.params().is_empty());
    }

    #[test]
    fn positional_params_match_node_order() {
        assert_eq!(
            GetRawTransaction { txid: "ab12" }.params(),
            vec![json!("ab12"), json!(1)]
        );
        assert_eq!(GetBlock { hash: "00ff" }.params(), vec![json!("00ff"), json!(1)]);
        assert_eq!(GetBlockHash { height: 100 }.params(), vec![json!(100)]);
        assert_eq!(
            SendRawTransaction { hex: "0200" }.params(),
            vec![json!("0200")]
        );
    }

    #[test]
    fn block_stats_accepts_height_or_hash() {
        assert_eq!(BlockRef::parse("700000"), BlockRef::Height(700000));
        assert_eq!(BlockRef::parse("00000abc"), BlockRef::Hash("00000abc"));
        let by_height = GetBlockStats {
            block: BlockRef::Height(42),
        };
        assert_eq!(by_height.params(), vec![json!(42)]);
        let by_hash = GetBlockStats {
            block: BlockRef::parse("00000abc"),
        };
        assert_eq!(by_hash.params(), vec![json!("00000abc")]);
    }
}
