// Transport layer module
// Upstream clients: JSON-RPC for bitcoind, gRPC for lnd, plain HTTP
// for the price feed
//
// Numan Thabit 2025 Nov

pub mod grpc;
pub mod jsonrpc;
pub mod pricefeed;
