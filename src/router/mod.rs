// Router module - HTTP dispatch plane
// This file wires the per-backend route groups into one axum router
// and exposes the response envelope shared by every handler
//
// Numan Thabit 2025 Nov

pub mod bitcoin;
pub mod device;
pub mod lightning;
pub mod login;
pub mod response;

#[allow(clippy::module_inception)]
pub mod router;

pub use response::{ApiError, ApiResult, Envelope};
pub use router::{create_api_router, Backends};
