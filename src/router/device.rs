// PinePhone sensor routes
//
// Numan Thabit 2025 Nov

use axum::{
    extract::{Path, State},
    routing::get,
    Router as AxumRouter,
};
use std::sync::Arc;

use super::response::{ApiError, ApiResult, Envelope};
use crate::sensors::{Axis, Sensors};

type Device = State<Arc<Sensors>>;

pub(crate) const PATHS: &[&str] = &[
    "GET /api/batteryStatus",
    "GET /api/batteryCapacity",
    "GET /api/cpuTemp",
    "GET /api/gpuTemp",
    "GET /api/magnetometer/:axis",
];

pub fn routes(sensors: Arc<Sensors>) -> AxumRouter {
    AxumRouter::new()
        .route("/api/batteryStatus", get(battery_status))
        .route("/api/batteryCapacity", get(battery_capacity))
        .route("/api/cpuTemp", get(cpu_temp))
        .route("/api/gpuTemp", get(gpu_temp))
        .route("/api/magnetometer/:axis", get(magnetometer))
        .with_state(sensors)
}

async fn battery_status(State(sensors): Device) -> ApiResult {
    let status = sensors
        .battery_status()
        .await
        .map_err(|e| ApiError::backend("Can't read battery status", e))?;
    Envelope::ok("status", &status)
}

async fn battery_capacity(State(sensors): Device) -> ApiResult {
    let percent = sensors
        .battery_capacity()
        .await
        .map_err(|e| ApiError::backend("Can't read battery capacity", e))?;
    Envelope::ok("percent", &percent)
}

async fn cpu_temp(State(sensors): Device) -> ApiResult {
    let temp = sensors
        .cpu_temp()
        .await
        .map_err(|e| ApiError::backend("Can't read CPU temperature", e))?;
    Envelope::ok("cputemp", &temp)
}

async fn gpu_temp(State(sensors): Device) -> ApiResult {
    let temp = sensors
        .gpu_temp()
        .await
        .map_err(|e| ApiError::backend("Can't read GPU temperature", e))?;
    Envelope::ok("gputemp", &temp)
}

async fn magnetometer(State(sensors): Device, Path(axis): Path<String>) -> ApiResult {
    let axis: Axis = axis.parse().map_err(ApiError::input)?;
    let value = sensors
        .magnetometer(axis)
        .await
        .map_err(|e| ApiError::backend("Can't read magnetometer", e))?;
    Envelope::ok("magnetometer", &value)
}
