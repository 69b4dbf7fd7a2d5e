//! System metrics collection.
//!
//! `sysinfo` covers CPU, memory, disks, networks, processes and temperature
//! components; batteries, disk throughput and fans come from the Linux
//! sysfs/procfs surfaces and degrade to empty data elsewhere. Every sample
//! produces a complete, immutable [`MetricsSnapshot`].

mod battery;
mod diskio;
mod gpu;
mod health;
mod sensors;

use std::time::Instant;

use sysinfo::{
    Components, CpuRefreshKind, Disks, MemoryRefreshKind, Networks, ProcessRefreshKind,
    ProcessesToUpdate, RefreshKind, System,
};
use thiserror::Error;

use crate::config::CollectorConfig;
use crate::metrics::{
    CpuStatus, DiskStatus, HardwareInfo, MemoryPressure, MemoryStatus, MetricsSnapshot,
    NetworkStatus, ProcessInfo, ProxyStatus, SensorReading, ThermalStatus,
};
use crate::render::format::human_bytes_short;

const MB: f64 = 1024.0 * 1024.0;

#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
}

/// Maintains reusable `sysinfo` handles so repeated samples don't
/// reallocate, plus the delta state for rate calculations.
pub struct SystemCollector {
    sys: System,
    disks: Disks,
    networks: Networks,
    components: Components,
    disk_io: diskio::DiskIoSampler,
    gpu: gpu::GpuProbe,
    hardware: HardwareInfo,
    last_sample: Instant,
    top_processes: usize,
}

impl SystemCollector {
    pub fn new(config: &CollectorConfig) -> Self {
        // Prime an initial refresh so the first real sample has stable
        // baselines (especially CPU usage).
        let mut sys = System::new_with_specifics(
            RefreshKind::new()
                .with_cpu(CpuRefreshKind::everything())
                .with_memory(MemoryRefreshKind::everything()),
        );
        sys.refresh_cpu_usage();
        sys.refresh_memory();

        let mut disks = Disks::new_with_refreshed_list();
        disks.refresh();
        let networks = Networks::new_with_refreshed_list();
        let components = Components::new_with_refreshed_list();

        let hardware = describe_hardware(&sys, &disks);

        Self {
            sys,
            disks,
            networks,
            components,
            disk_io: diskio::DiskIoSampler::new(),
            gpu: gpu::GpuProbe::detect(),
            hardware,
            last_sample: Instant::now(),
            top_processes: config.top_processes,
        }
    }

    /// Refresh every source and assemble a snapshot.
    pub fn sample(&mut self) -> Result<MetricsSnapshot, CollectorError> {
        let elapsed = self.last_sample.elapsed().as_secs_f64().max(0.001);
        self.last_sample = Instant::now();

        self.sys.refresh_cpu_usage();
        self.sys.refresh_memory();
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            ProcessRefreshKind::new().with_cpu(),
        );
        self.disks.refresh();
        if self.disks.list().is_empty() {
            self.disks.refresh_list();
        }
        self.networks.refresh();
        self.components.refresh();

        let mut snapshot = MetricsSnapshot {
            cpu: self.cpu_status(),
            memory: memory_status(&self.sys),
            disks: self.disk_status(),
            disk_io: self.disk_io.sample(elapsed)?,
            batteries: battery::read_all()?,
            thermal: self.thermal_status(),
            network: self.network_status(elapsed),
            proxy: proxy_from_env(|name| std::env::var(name).ok()),
            top_processes: self.process_status(),
            gpus: self.gpu.sample(),
            sensors: self.sensor_readings(),
            hardware: self.hardware.clone(),
            health_score: 0,
        };
        snapshot.health_score = health::score(&snapshot);
        Ok(snapshot)
    }

    fn cpu_status(&self) -> CpuStatus {
        let per_core: Vec<f64> = self
            .sys
            .cpus()
            .iter()
            .map(|cpu| f64::from(cpu.cpu_usage()))
            .collect();
        let load = System::load_average();
        CpuStatus {
            usage: f64::from(self.sys.global_cpu_usage()),
            load_one: load.one,
            load_five: load.five,
            load_fifteen: load.fifteen,
            logical_cores: per_core.len(),
            per_core_estimated: per_core.is_empty(),
            per_core,
        }
    }

    fn disk_status(&self) -> Vec<DiskStatus> {
        self.disks
            .list()
            .iter()
            .filter(|disk| disk.total_space() > 0)
            .map(|disk| {
                let total = disk.total_space();
                let used = total.saturating_sub(disk.available_space());
                DiskStatus {
                    name: disk.mount_point().display().to_string(),
                    used,
                    total,
                    used_percent: used as f64 / total as f64 * 100.0,
                    external: disk.is_removable(),
                }
            })
            .collect()
    }

    fn thermal_status(&self) -> ThermalStatus {
        let mut cpu_temp = 0.0f64;
        let mut hottest = 0.0f64;
        for component in self.components.list() {
            let temp = f64::from(component.temperature());
            if !temp.is_finite() || temp <= 0.0 {
                continue;
            }
            let label = component.label().to_lowercase();
            if label.contains("cpu") || label.contains("package") || label.contains("tdie") {
                cpu_temp = cpu_temp.max(temp);
            }
            hottest = hottest.max(temp);
        }
        // Hottest sensor stands in when nothing is CPU-labelled.
        if cpu_temp == 0.0 {
            cpu_temp = hottest;
        }
        ThermalStatus {
            cpu_temp,
            fan_rpm: sensors::max_fan_rpm(),
        }
    }

    fn network_status(&self, elapsed: f64) -> Vec<NetworkStatus> {
        let mut interfaces: Vec<NetworkStatus> = self
            .networks
            .list()
            .iter()
            .map(|(name, data)| {
                let ip = data
                    .ip_networks()
                    .iter()
                    .map(|net| net.addr)
                    .find(std::net::IpAddr::is_ipv4)
                    .or_else(|| data.ip_networks().first().map(|net| net.addr))
                    .map(|addr| addr.to_string());
                NetworkStatus {
                    name: name.clone(),
                    ip,
                    rx_rate: data.received() as f64 / MB / elapsed,
                    tx_rate: data.transmitted() as f64 / MB / elapsed,
                }
            })
            .collect();
        interfaces.sort_by(|a, b| a.name.cmp(&b.name));
        interfaces
    }

    fn process_status(&self) -> Vec<ProcessInfo> {
        let mut procs: Vec<ProcessInfo> = self
            .sys
            .processes()
            .values()
            .map(|process| ProcessInfo {
                name: process.name().to_string_lossy().into_owned(),
                cpu: f64::from(process.cpu_usage()),
            })
            .collect();
        procs.sort_by(|a, b| b.cpu.partial_cmp(&a.cpu).unwrap_or(std::cmp::Ordering::Equal));
        procs.truncate(self.top_processes);
        procs
    }

    fn sensor_readings(&self) -> Vec<SensorReading> {
        self.components
            .list()
            .iter()
            .map(|component| {
                let raw = f64::from(component.temperature());
                let usable = raw.is_finite() && raw > 0.0;
                SensorReading {
                    label: component.label().to_string(),
                    value: if usable { raw } else { 0.0 },
                    unit: "°C".to_string(),
                    note: (!usable).then(|| "unavailable".to_string()),
                }
            })
            .collect()
    }
}

fn memory_status(sys: &System) -> MemoryStatus {
    let total = sys.total_memory();
    let used = sys.used_memory();
    let used_percent = if total > 0 {
        used as f64 / total as f64 * 100.0
    } else {
        0.0
    };
    let swap_total = sys.total_swap();
    let swap_used = sys.used_swap();

    let pressure = if used_percent >= 90.0 || (swap_total > 0 && swap_used > swap_total / 2) {
        MemoryPressure::Critical
    } else if used_percent >= 75.0 {
        MemoryPressure::Warn
    } else {
        MemoryPressure::Normal
    };

    MemoryStatus {
        used,
        total,
        used_percent,
        swap_used,
        swap_total,
        pressure,
    }
}

/// Proxy indication from the conventional environment variables.
fn proxy_from_env(get: impl Fn(&str) -> Option<String>) -> ProxyStatus {
    let vars = [
        ("HTTPS_PROXY", "HTTPS"),
        ("https_proxy", "HTTPS"),
        ("HTTP_PROXY", "HTTP"),
        ("http_proxy", "HTTP"),
        ("ALL_PROXY", "SOCKS"),
        ("all_proxy", "SOCKS"),
    ];
    for (name, kind) in vars {
        if get(name).is_some_and(|value| !value.is_empty()) {
            return ProxyStatus {
                enabled: true,
                kind: kind.to_string(),
            };
        }
    }
    ProxyStatus::default()
}

fn describe_hardware(sys: &System, disks: &Disks) -> HardwareInfo {
    let model = std::fs::read_to_string("/sys/devices/virtual/dmi/id/product_name")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(System::host_name)
        .unwrap_or_default();

    let cpu_model = sys
        .cpus()
        .first()
        .map(|cpu| cpu.brand().trim().to_string())
        .unwrap_or_default();

    let total_ram = match sys.total_memory() {
        0 => String::new(),
        bytes => format!("{}B", human_bytes_short(bytes)),
    };

    let internal_total: u64 = disks
        .list()
        .iter()
        .filter(|disk| !disk.is_removable())
        .map(sysinfo::Disk::total_space)
        .sum();
    let disk_size = match internal_total {
        0 => String::new(),
        bytes => format!("{}B", human_bytes_short(bytes)),
    };

    let os_version = match (System::name(), System::os_version()) {
        (Some(name), Some(version)) => format!("{name} {version}"),
        (Some(name), None) => name,
        _ => String::new(),
    };

    HardwareInfo {
        model,
        cpu_model,
        total_ram,
        disk_size,
        os_version,
    }
}
