//! Immutable snapshot types shared by the collector and the renderer.
//!
//! A [`MetricsSnapshot`] is produced whole by the collector and handed to the
//! renderer read-only; nothing in here is mutated after construction.

use serde::Serialize;

/// Point-in-time aggregate of every monitored category.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsSnapshot {
    pub cpu: CpuStatus,
    pub memory: MemoryStatus,
    pub disks: Vec<DiskStatus>,
    pub disk_io: DiskIoStatus,
    pub batteries: Vec<BatteryStatus>,
    pub thermal: ThermalStatus,
    pub network: Vec<NetworkStatus>,
    pub proxy: ProxyStatus,
    pub top_processes: Vec<ProcessInfo>,
    pub gpus: Vec<GpuStatus>,
    pub sensors: Vec<SensorReading>,
    pub hardware: HardwareInfo,
    /// Overall health score, 0-100.
    pub health_score: u8,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CpuStatus {
    /// Overall usage percentage.
    pub usage: f64,
    pub load_one: f64,
    pub load_five: f64,
    pub load_fifteen: f64,
    pub logical_cores: usize,
    /// Per-core usage percentages, indexed by core number.
    pub per_core: Vec<f64>,
    /// True when per-core data could not be sampled and `usage` is an
    /// averaged estimate.
    pub per_core_estimated: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MemoryStatus {
    pub used: u64,
    pub total: u64,
    pub used_percent: f64,
    pub swap_used: u64,
    pub swap_total: u64,
    pub pressure: MemoryPressure,
}

/// Qualitative memory pressure derived from usage and swap activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryPressure {
    #[default]
    Normal,
    Warn,
    Critical,
}

impl MemoryPressure {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Warn => "warn",
            Self::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DiskStatus {
    pub name: String,
    pub used: u64,
    pub total: u64,
    pub used_percent: f64,
    /// Removable/external volume, listed after internal ones.
    pub external: bool,
}

/// Aggregate read/write throughput across physical disks, in MB/s.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct DiskIoStatus {
    pub read_rate: f64,
    pub write_rate: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatteryStatus {
    pub percent: f64,
    pub state: BatteryState,
    /// Pre-formatted time-to-empty/full, e.g. "2h 14m".
    pub time_left: Option<String>,
    /// Pre-formatted health summary, e.g. "Health 93%".
    pub health: Option<String>,
    pub cycle_count: u32,
}

/// Charging state as reported by the power supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BatteryState {
    Charging,
    Discharging,
    Charged,
    NotCharging,
    #[default]
    Unknown,
}

impl BatteryState {
    /// Display label, already capitalized the way the power card shows it.
    pub fn label(self) -> &'static str {
        match self {
            Self::Charging => "Charging",
            Self::Discharging => "Discharging",
            Self::Charged => "Charged",
            Self::NotCharging => "Plugged in",
            Self::Unknown => "Unknown",
        }
    }

    /// Charging or already full; exempt from the low-battery danger color.
    pub fn is_charging(self) -> bool {
        matches!(self, Self::Charging | Self::Charged)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ThermalStatus {
    /// CPU temperature in degrees Celsius; 0.0 when unknown.
    pub cpu_temp: f64,
    /// Fan speed in RPM; 0 when no fan was found.
    pub fan_rpm: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NetworkStatus {
    pub name: String,
    pub ip: Option<String>,
    /// Receive rate in MB/s.
    pub rx_rate: f64,
    /// Transmit rate in MB/s.
    pub tx_rate: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProxyStatus {
    pub enabled: bool,
    pub kind: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessInfo {
    pub name: String,
    pub cpu: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GpuStatus {
    pub name: String,
    /// Utilization percentage; `None` when no usable reading exists.
    pub usage: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SensorReading {
    pub label: String,
    pub value: f64,
    pub unit: String,
    /// Set when the reading is present but unusable; noted readings are
    /// hidden from the sensors card.
    pub note: Option<String>,
}

/// Static hardware description shown in the header. Empty fields are
/// omitted from the summary line.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HardwareInfo {
    pub model: String,
    pub cpu_model: String,
    pub total_ram: String,
    pub disk_size: String,
    pub os_version: String,
}
