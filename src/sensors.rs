// PinePhone sysfs sensors
// Battery, thermal zone and magnetometer readings taken straight from sysfs
//
// Numan Thabit 2025 Nov

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::config::SensorConfig;
use crate::errors::SensorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            other => Err(format!("unknown magnetometer axis {other:?}")),
        }
    }
}

impl Axis {
    fn file_name(self) -> &'static str {
        match self {
            Axis::X => "in_magn_x_raw",
            Axis::Y => "in_magn_y_raw",
            Axis::Z => "in_magn_z_raw",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Sensors {
    battery_dir: PathBuf,
    thermal_dir: PathBuf,
    magnetometer_dir: PathBuf,
}

impl Sensors {
    pub fn new(conf: &SensorConfig) -> Self {
        Self {
            battery_dir: conf.battery_dir.clone(),
            thermal_dir: conf.thermal_dir.clone(),
            magnetometer_dir: conf.magnetometer_dir.clone(),
        }
    }

    /// Battery presence flag, "1" when a battery is fitted.
    pub async fn battery_status(&self) -> Result<String, SensorError> {
        read_trimmed(&self.battery_dir.join("present")).await
    }

    /// Charge level in percent, as reported.
    pub async fn battery_capacity(&self) -> Result<String, SensorError> {
        read_trimmed(&self.battery_dir.join("capacity")).await
    }

    /// CPU temperature in whole degrees Celsius.
    pub async fn cpu_temp(&self) -> Result<i64, SensorError> {
        self.zone_temp("thermal_zone0").await
    }

    /// GPU temperature in whole degrees Celsius.
    pub async fn gpu_temp(&self) -> Result<i64, SensorError> {
        self.zone_temp("thermal_zone1").await
    }

    pub async fn magnetometer(&self, axis: Axis) -> Result<i64, SensorError> {
        read_number(&self.magnetometer_dir.join(axis.file_name())).await
    }

    async fn zone_temp(&self, zone: &str) -> Result<i64, SensorError> {
        // sysfs reports millidegrees
        let millidegrees = read_number(&self.thermal_dir.join(zone).join("temp")).await?;
        Ok(millidegrees / 1000)
    }
}

async fn read_trimmed(path: &Path) -> Result<String, SensorError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SensorError::Unavailable {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(raw.trim_matches('\n').to_string())
}

async fn read_number(path: &Path) -> Result<i64, SensorError> {
    let value = read_trimmed(path).await?;
    value.trim().parse::<i64>().map_err(|_| SensorError::Parse {
        path: path.to_path_buf(),
        value,
    })
}
