//! Per-category card builders.
//!
//! Each builder is a pure function from a slice of the snapshot to a
//! [`Card`]: an icon, a title and pre-formatted, pre-colorized lines.
//! Missing data always becomes a placeholder line, never an error.

use crate::metrics::{
    BatteryStatus, CpuStatus, DiskIoStatus, DiskStatus, GpuStatus, MemoryPressure, MemoryStatus,
    MetricsSnapshot, NetworkStatus, ProcessInfo, ProxyStatus, SensorReading, ThermalStatus,
};
use crate::render::bars;
use crate::render::format::{format_rate, human_bytes, human_bytes_short, shorten};
use crate::render::theme::{severity, Band, Theme, TEMPERATURE};

const ICON_CPU: &str = "⚙";
const ICON_MEMORY: &str = "▦";
const ICON_GPU: &str = "▣";
const ICON_DISK: &str = "▤";
const ICON_NETWORK: &str = "⇅";
const ICON_BATTERY: &str = "▮";
const ICON_SENSORS: &str = "♨";
const ICON_PROCS: &str = "▶";

/// Truncation width for process, GPU and sensor labels.
const NAME_WIDTH: usize = 12;
/// Busiest cores shown on the CPU card.
const TOP_CORES: usize = 3;
/// Entries shown on the process card.
const TOP_PROCESSES: usize = 3;

/// One titled block of display lines.
#[derive(Debug, Clone)]
pub struct Card {
    pub icon: &'static str,
    pub title: &'static str,
    pub lines: Vec<String>,
}

/// Build every card for a snapshot, in the fixed grid order. The GPU and
/// sensors cards only appear when they have something usable to show.
pub fn build_cards(theme: &Theme, m: &MetricsSnapshot, primary_interface: &str) -> Vec<Card> {
    let mut cards = vec![
        cpu_card(theme, &m.cpu),
        memory_card(theme, &m.memory),
        disk_card(theme, &m.disks, m.disk_io),
        power_card(theme, &m.batteries, m.thermal),
        process_card(theme, &m.top_processes),
        network_card(theme, &m.network, &m.proxy, primary_interface),
    ];
    if m.gpus.iter().any(|g| g.usage.is_some()) {
        cards.push(gpu_card(theme, &m.gpus));
    }
    if has_sensor_data(&m.sensors) {
        cards.push(sensors_card(theme, &m.sensors));
    }
    cards
}

fn has_sensor_data(sensors: &[SensorReading]) -> bool {
    sensors.iter().any(|s| s.note.is_none() && s.value > 0.0)
}

fn cpu_card(theme: &Theme, cpu: &CpuStatus) -> Card {
    let mut lines = vec![format!(
        "Total  {}  {:>5.1}%",
        bars::percent_bar(theme, cpu.usage),
        cpu.usage
    )];
    lines.push(theme.paint(
        Band::Subtle,
        &format!(
            "{:.2} / {:.2} / {:.2}  ({} cores)",
            cpu.load_one, cpu.load_five, cpu.load_fifteen, cpu.logical_cores
        ),
    ));

    if cpu.per_core_estimated {
        lines.push(theme.paint(Band::Subtle, "Per-core data unavailable (using averaged load)"));
    } else if !cpu.per_core.is_empty() {
        // Busiest first, but keep the original core number as the label.
        let mut ranked: Vec<(usize, f64)> = cpu.per_core.iter().copied().enumerate().collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        for (idx, usage) in ranked.into_iter().take(TOP_CORES) {
            lines.push(format!(
                "Core{:<2} {}  {:>5.1}%",
                idx + 1,
                bars::percent_bar(theme, usage),
                usage
            ));
        }
    }

    Card { icon: ICON_CPU, title: "CPU", lines }
}

fn memory_card(theme: &Theme, mem: &MemoryStatus) -> Card {
    let mut lines = vec![format!(
        "Used   {}  {:>5.1}%",
        bars::percent_bar(theme, mem.used_percent),
        mem.used_percent
    )];
    lines.push(theme.paint(
        Band::Subtle,
        &format!("{} / {} total", human_bytes(mem.used), human_bytes(mem.total)),
    ));

    // Derived from the used percentage so Used + Free is exactly 100.
    let free_percent = 100.0 - mem.used_percent;
    let available = mem.total.saturating_sub(mem.used);
    lines.push(format!(
        "Free   {}  {:>5.1}%",
        bars::percent_bar(theme, free_percent),
        free_percent
    ));
    lines.push(theme.paint(Band::Subtle, &format!("{} available", human_bytes(available))));

    if mem.swap_total > 0 || mem.swap_used > 0 {
        let swap_percent = if mem.swap_total > 0 {
            mem.swap_used as f64 / mem.swap_total as f64 * 100.0
        } else {
            0.0
        };
        let swap_text = theme.paint(
            Band::Subtle,
            &format!("{} / {} swap", human_bytes(mem.swap_used), human_bytes(mem.swap_total)),
        );
        lines.push(format!(
            "Swap   {}  {:>5.1}%  {}",
            bars::percent_bar(theme, swap_percent),
            swap_percent,
            swap_text
        ));
    } else {
        lines.push(format!("Swap   {}", theme.paint(Band::Subtle, "not in use")));
    }

    let pressure_band = match mem.pressure {
        MemoryPressure::Normal => Band::Ok,
        MemoryPressure::Warn => Band::Warn,
        MemoryPressure::Critical => Band::Danger,
    };
    lines.push(theme.paint(pressure_band, &format!("Status {}", mem.pressure.label())));

    Card { icon: ICON_MEMORY, title: "Memory", lines }
}

fn disk_card(theme: &Theme, disks: &[DiskStatus], io: DiskIoStatus) -> Card {
    let mut lines = Vec::new();
    if disks.is_empty() {
        lines.push(theme.paint(Band::Subtle, "Collecting..."));
    } else {
        let (internal, external): (Vec<&DiskStatus>, Vec<&DiskStatus>) =
            disks.iter().partition(|d| !d.external);
        for (prefix, group) in [("INTR", internal), ("EXTR", external)] {
            let total = group.len();
            for (i, d) in group.into_iter().enumerate() {
                lines.push(disk_line(theme, &disk_label(prefix, i, total), d));
            }
        }
    }

    lines.push(format!(
        "Read   {}  {:.1} MB/s",
        bars::io_bar(theme, io.read_rate),
        io.read_rate
    ));
    lines.push(format!(
        "Write  {}  {:.1} MB/s",
        bars::io_bar(theme, io.write_rate),
        io.write_rate
    ));

    Card { icon: ICON_DISK, title: "Disk", lines }
}

/// Bare prefix for a single volume, 1-based suffix when the group has more.
fn disk_label(prefix: &str, index: usize, total: usize) -> String {
    if total <= 1 {
        prefix.to_string()
    } else {
        format!("{}{}", prefix, index + 1)
    }
}

fn disk_line(theme: &Theme, label: &str, d: &DiskStatus) -> String {
    format!(
        "{:<6} {}  {:>5.1}% ({}/{})",
        label,
        bars::percent_bar(theme, d.used_percent),
        d.used_percent,
        human_bytes_short(d.used),
        human_bytes_short(d.total)
    )
}

fn power_card(theme: &Theme, batteries: &[BatteryStatus], thermal: ThermalStatus) -> Card {
    let mut lines = Vec::new();
    if batteries.is_empty() {
        lines.push(theme.paint(Band::Subtle, "No battery"));
    } else {
        // Only the first battery is shown; multi-battery hosts are not
        // disambiguated.
        let b = &batteries[0];

        let mut percent_text = format!("{:>5.1}%", b.percent);
        if b.percent < 20.0 && !b.state.is_charging() {
            percent_text = theme.paint(Band::Danger, &percent_text);
        }
        lines.push(format!("Level  {}  {}", bars::battery_bar(theme, b.percent), percent_text));

        let mut status = b.state.label().to_string();
        if let Some(time_left) = &b.time_left {
            status.push_str(" · ");
            status.push_str(time_left);
        }
        let (band, icon) = if b.state.is_charging() {
            (Band::Ok, " ⚡")
        } else if b.percent < 20.0 {
            (Band::Danger, "")
        } else {
            (Band::Subtle, "")
        };
        lines.push(theme.paint(band, &format!("{status}{icon}")));

        let mut health_parts = Vec::new();
        if let Some(health) = &b.health {
            health_parts.push(health.clone());
        }
        if b.cycle_count > 0 {
            health_parts.push(format!("{} cycles", b.cycle_count));
        }
        if !health_parts.is_empty() {
            lines.push(theme.paint(Band::Subtle, &health_parts.join(" · ")));
        }

        let mut thermal_parts = Vec::new();
        if thermal.cpu_temp > 0.0 {
            thermal_parts.push(theme.paint(
                severity(thermal.cpu_temp, &TEMPERATURE),
                &format!("{:.0}°C", thermal.cpu_temp),
            ));
        }
        if thermal.fan_rpm > 0 {
            thermal_parts.push(format!("{} RPM", thermal.fan_rpm));
        }
        if !thermal_parts.is_empty() {
            lines.push(thermal_parts.join(" · "));
        }
    }

    Card { icon: ICON_BATTERY, title: "Power", lines }
}

fn process_card(theme: &Theme, procs: &[ProcessInfo]) -> Card {
    let mut lines: Vec<String> = procs
        .iter()
        .take(TOP_PROCESSES)
        .map(|p| {
            format!(
                "{:<12}  {}  {:>5.1}%",
                shorten(&p.name, NAME_WIDTH),
                bars::mini_bar(theme, p.cpu),
                p.cpu
            )
        })
        .collect();
    if lines.is_empty() {
        lines.push(theme.paint(Band::Subtle, "No data"));
    }
    Card { icon: ICON_PROCS, title: "Processes", lines }
}

fn network_card(
    theme: &Theme,
    interfaces: &[NetworkStatus],
    proxy: &ProxyStatus,
    primary_interface: &str,
) -> Card {
    let mut lines = Vec::new();
    if interfaces.is_empty() {
        lines.push(theme.paint(Band::Subtle, "Collecting..."));
    } else {
        let total_rx: f64 = interfaces.iter().map(|n| n.rx_rate).sum();
        let total_tx: f64 = interfaces.iter().map(|n| n.tx_rate).sum();
        lines.push(format!(
            "Down   {}  {}",
            bars::net_bar(theme, total_rx),
            format_rate(total_rx)
        ));
        lines.push(format!(
            "Up     {}  {}",
            bars::net_bar(theme, total_tx),
            format_rate(total_tx)
        ));

        let primary_ip = interfaces
            .iter()
            .filter(|n| n.name == primary_interface)
            .find_map(|n| n.ip.as_deref().filter(|ip| !ip.is_empty()));

        let mut info_parts = Vec::new();
        if proxy.enabled {
            info_parts.push(format!("Proxy {}", proxy.kind));
        }
        if let Some(ip) = primary_ip {
            info_parts.push(ip.to_string());
        }
        if !info_parts.is_empty() {
            lines.push(theme.paint(Band::Subtle, &info_parts.join(" · ")));
        }
    }
    Card { icon: ICON_NETWORK, title: "Network", lines }
}

fn gpu_card(theme: &Theme, gpus: &[GpuStatus]) -> Card {
    let mut lines = Vec::new();
    if gpus.is_empty() {
        lines.push(theme.paint(Band::Subtle, "No GPU detected"));
    } else {
        for g in gpus {
            let name = shorten(&g.name, NAME_WIDTH);
            match g.usage {
                Some(usage) => lines.push(format!(
                    "{:<12}  {}  {:>5.1}%",
                    name,
                    bars::percent_bar(theme, usage),
                    usage
                )),
                None => lines.push(name),
            }
        }
    }
    Card { icon: ICON_GPU, title: "GPU", lines }
}

fn sensors_card(theme: &Theme, sensors: &[SensorReading]) -> Card {
    let mut lines = Vec::new();
    for s in sensors {
        if s.note.is_some() {
            continue;
        }
        lines.push(format!(
            "{:<12} {}{}",
            shorten(&s.label, NAME_WIDTH),
            theme.paint(severity(s.value, &TEMPERATURE), &format!("{:.1}", s.value)),
            s.unit
        ));
    }
    if lines.is_empty() {
        lines.push(theme.paint(Band::Subtle, "No sensors"));
    }
    Card { icon: ICON_SENSORS, title: "Sensors", lines }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{BatteryState, MetricsSnapshot};
    use crate::render::ansi::strip_ansi;
    use pretty_assertions::assert_eq;

    fn theme() -> Theme {
        Theme::default()
    }

    #[test]
    fn cpu_card_shows_danger_bar_and_right_aligned_percent() {
        let cpu = CpuStatus {
            usage: 93.4,
            load_one: 3.1,
            load_five: 2.0,
            load_fifteen: 1.4,
            logical_cores: 1,
            per_core: vec![93.4],
            per_core_estimated: false,
        };
        let card = cpu_card(&theme(), &cpu);
        let expected = format!("Total  {}   93.4%", bars::percent_bar(&theme(), 93.4));
        assert_eq!(card.lines[0], expected);
        // The bar itself carries the danger styling for >=90.
        assert_eq!(
            bars::percent_bar(&theme(), 93.4),
            theme().paint(Band::Danger, &strip_ansi(&bars::percent_bar(&theme(), 93.4)))
        );
    }

    #[test]
    fn cpu_card_ranks_cores_but_labels_by_index() {
        let cpu = CpuStatus {
            usage: 40.0,
            logical_cores: 4,
            per_core: vec![10.0, 80.0, 30.0, 60.0],
            ..Default::default()
        };
        let card = cpu_card(&theme(), &cpu);
        let labels: Vec<String> = card.lines[2..]
            .iter()
            .map(|l| strip_ansi(l).split_whitespace().next().unwrap_or_default().to_string())
            .collect();
        assert_eq!(labels, vec!["Core2", "Core4", "Core3"]);
    }

    #[test]
    fn cpu_card_estimated_flag_replaces_core_lines() {
        let cpu = CpuStatus {
            usage: 12.0,
            logical_cores: 8,
            per_core: vec![],
            per_core_estimated: true,
            ..Default::default()
        };
        let card = cpu_card(&theme(), &cpu);
        assert_eq!(card.lines.len(), 3);
        assert!(strip_ansi(&card.lines[2]).contains("unavailable"));
    }

    #[test]
    fn memory_free_and_used_sum_to_exactly_one_hundred() {
        let mem = MemoryStatus {
            used: 6 * (1 << 30),
            total: 16 * (1 << 30),
            used_percent: 37.3,
            ..Default::default()
        };
        let card = memory_card(&theme(), &mem);
        assert!(strip_ansi(&card.lines[0]).contains("37.3%"));
        assert!(strip_ansi(&card.lines[2]).contains("62.7%"));
    }

    #[test]
    fn memory_card_reports_idle_swap() {
        let mem = MemoryStatus {
            used: 1,
            total: 2,
            used_percent: 50.0,
            swap_used: 0,
            swap_total: 0,
            ..Default::default()
        };
        let card = memory_card(&theme(), &mem);
        assert!(strip_ansi(&card.lines[4]).contains("not in use"));
    }

    #[test]
    fn empty_disk_list_shows_placeholder_and_zero_rate_bars() {
        let card = disk_card(&theme(), &[], DiskIoStatus::default());
        assert_eq!(strip_ansi(&card.lines[0]), "Collecting...");
        assert!(strip_ansi(&card.lines[1]).ends_with("0.0 MB/s"));
        assert!(strip_ansi(&card.lines[2]).ends_with("0.0 MB/s"));
    }

    #[test]
    fn disks_group_internal_before_external_with_numbering() {
        let disks = vec![
            DiskStatus { name: "ssd0".into(), used: 1, total: 2, used_percent: 50.0, external: false },
            DiskStatus { name: "usb".into(), used: 1, total: 2, used_percent: 50.0, external: true },
            DiskStatus { name: "ssd1".into(), used: 1, total: 2, used_percent: 50.0, external: false },
        ];
        let card = disk_card(&theme(), &disks, DiskIoStatus::default());
        let labels: Vec<String> = card.lines[..3]
            .iter()
            .map(|l| strip_ansi(l).split_whitespace().next().unwrap_or_default().to_string())
            .collect();
        assert_eq!(labels, vec!["INTR1", "INTR2", "EXTR"]);
    }

    #[test]
    fn charging_battery_is_exempt_from_the_danger_color() {
        let batteries = vec![BatteryStatus {
            percent: 15.0,
            state: BatteryState::Charging,
            ..Default::default()
        }];
        let card = power_card(&theme(), &batteries, ThermalStatus::default());
        let expected = format!("Level  {}   15.0%", bars::battery_bar(&theme(), 15.0));
        assert_eq!(card.lines[0], expected);
        assert_eq!(card.lines[1], theme().paint(Band::Ok, "Charging ⚡"));
    }

    #[test]
    fn low_discharging_battery_is_danger_colored() {
        let batteries = vec![BatteryStatus {
            percent: 12.0,
            state: BatteryState::Discharging,
            ..Default::default()
        }];
        let card = power_card(&theme(), &batteries, ThermalStatus::default());
        assert!(card.lines[0].contains(&theme().paint(Band::Danger, " 12.0%")));
    }

    #[test]
    fn power_card_joins_health_and_thermal_parts() {
        let batteries = vec![BatteryStatus {
            percent: 80.0,
            state: BatteryState::Discharging,
            time_left: Some("3h 10m".into()),
            health: Some("Health 93%".into()),
            cycle_count: 412,
            ..Default::default()
        }];
        let thermal = ThermalStatus { cpu_temp: 54.0, fan_rpm: 2200 };
        let card = power_card(&theme(), &batteries, thermal);
        assert_eq!(strip_ansi(&card.lines[1]), "Discharging · 3h 10m");
        assert_eq!(strip_ansi(&card.lines[2]), "Health 93% · 412 cycles");
        assert_eq!(strip_ansi(&card.lines[3]), "54°C · 2200 RPM");
    }

    #[test]
    fn process_names_truncate_to_twelve_characters() {
        let procs = vec![
            ProcessInfo { name: "averylongprocessname".into(), cpu: 42.0 },
            ProcessInfo { name: "idle".into(), cpu: 1.0 },
            ProcessInfo { name: "third".into(), cpu: 0.5 },
            ProcessInfo { name: "fourth".into(), cpu: 0.1 },
        ];
        let card = process_card(&theme(), &procs);
        assert_eq!(card.lines.len(), 3);
        assert!(strip_ansi(&card.lines[0]).starts_with("averylongpr…"));
    }

    #[test]
    fn network_card_sums_rates_and_finds_the_primary_ip() {
        let interfaces = vec![
            NetworkStatus { name: "lo".into(), ip: Some("127.0.0.1".into()), rx_rate: 0.5, tx_rate: 0.5 },
            NetworkStatus { name: "eth0".into(), ip: Some("192.168.1.5".into()), rx_rate: 4.0, tx_rate: 1.0 },
        ];
        let proxy = ProxyStatus { enabled: true, kind: "HTTP".into() };
        let card = network_card(&theme(), &interfaces, &proxy, "eth0");
        assert!(strip_ansi(&card.lines[0]).contains("4.5 MB/s"));
        assert!(strip_ansi(&card.lines[1]).contains("1.5 MB/s"));
        assert_eq!(strip_ansi(&card.lines[2]), "Proxy HTTP · 192.168.1.5");
    }

    #[test]
    fn gpu_card_is_omitted_without_a_usable_reading() {
        let mut snapshot = MetricsSnapshot::default();
        snapshot.gpus = vec![GpuStatus { name: "iGPU".into(), usage: None }];
        let cards = build_cards(&theme(), &snapshot, "eth0");
        assert!(cards.iter().all(|c| c.title != "GPU"));

        snapshot.gpus[0].usage = Some(23.0);
        let cards = build_cards(&theme(), &snapshot, "eth0");
        assert!(cards.iter().any(|c| c.title == "GPU"));
    }

    #[test]
    fn noted_sensor_readings_are_filtered_out() {
        let sensors = vec![
            SensorReading { label: "CPU".into(), value: 61.5, unit: "°C".into(), note: None },
            SensorReading { label: "NVMe".into(), value: 0.0, unit: "°C".into(), note: Some("unavailable".into()) },
        ];
        let mut snapshot = MetricsSnapshot::default();
        snapshot.sensors = sensors;
        let cards = build_cards(&theme(), &snapshot, "eth0");
        let card = cards.iter().find(|c| c.title == "Sensors").expect("sensors card");
        assert_eq!(card.lines.len(), 1);
        assert!(strip_ansi(&card.lines[0]).contains("61.5"));
    }

    #[test]
    fn sensors_card_requires_a_positive_note_free_reading() {
        let mut snapshot = MetricsSnapshot::default();
        snapshot.sensors = vec![SensorReading {
            label: "CPU".into(),
            value: 0.0,
            unit: "°C".into(),
            note: None,
        }];
        let cards = build_cards(&theme(), &snapshot, "eth0");
        assert!(cards.iter().all(|c| c.title != "Sensors"));
    }
}
