//! Battery state from `/sys/class/power_supply`.
//!
//! Each supply directory of type `Battery` contributes one entry. Missing
//! attribute files are normal (firmware varies wildly); only a failing
//! directory scan is an error.

use std::io;
use std::path::Path;

use crate::collector::CollectorError;
use crate::metrics::{BatteryState, BatteryStatus};

const POWER_SUPPLY_DIR: &str = "/sys/class/power_supply";

pub fn read_all() -> Result<Vec<BatteryStatus>, CollectorError> {
    read_from(Path::new(POWER_SUPPLY_DIR))
}

fn read_from(dir: &Path) -> Result<Vec<BatteryStatus>, CollectorError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(CollectorError::Read {
                path: dir.display().to_string(),
                source,
            })
        }
    };

    let mut batteries = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if read_attr(&path, "type").as_deref() == Some("Battery") {
            if let Some(battery) = read_battery(&path) {
                batteries.push(battery);
            }
        }
    }
    batteries.sort_by(|a, b| b.percent.partial_cmp(&a.percent).unwrap_or(std::cmp::Ordering::Equal));
    Ok(batteries)
}

fn read_battery(path: &Path) -> Option<BatteryStatus> {
    let percent = read_attr(path, "capacity")?.parse::<f64>().ok()?;
    let state = read_attr(path, "status")
        .map(|s| parse_state(&s))
        .unwrap_or_default();

    let cycle_count = read_attr(path, "cycle_count")
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(0);

    // energy_* on most laptops, charge_* on the rest; the ratios are
    // unit-free either way.
    let full = read_number(path, "energy_full").or_else(|| read_number(path, "charge_full"));
    let design = read_number(path, "energy_full_design")
        .or_else(|| read_number(path, "charge_full_design"));
    let now = read_number(path, "energy_now").or_else(|| read_number(path, "charge_now"));
    let draw = read_number(path, "power_now").or_else(|| read_number(path, "current_now"));

    let health = health_summary(full, design);
    let time_left = time_remaining(state, now, full, draw);

    Some(BatteryStatus {
        percent,
        state,
        time_left,
        health,
        cycle_count,
    })
}

fn parse_state(raw: &str) -> BatteryState {
    match raw.to_lowercase().as_str() {
        "charging" => BatteryState::Charging,
        "discharging" => BatteryState::Discharging,
        "full" => BatteryState::Charged,
        "not charging" => BatteryState::NotCharging,
        _ => BatteryState::Unknown,
    }
}

fn health_summary(full: Option<f64>, design: Option<f64>) -> Option<String> {
    let (full, design) = (full?, design?);
    if design <= 0.0 {
        return None;
    }
    let percent = (full / design * 100.0).min(100.0);
    Some(format!("Health {:.0}%", percent))
}

/// Estimate time to empty (discharging) or full (charging) from the
/// current draw, formatted as e.g. "2h 14m".
fn time_remaining(
    state: BatteryState,
    now: Option<f64>,
    full: Option<f64>,
    draw: Option<f64>,
) -> Option<String> {
    let draw = draw.filter(|d| *d > 0.0)?;
    let remaining = match state {
        BatteryState::Discharging => now?,
        BatteryState::Charging => full? - now?,
        _ => return None,
    };
    if remaining <= 0.0 {
        return None;
    }
    Some(format_hours(remaining / draw))
}

fn format_hours(hours: f64) -> String {
    let total_minutes = (hours * 60.0).round() as u64;
    if total_minutes >= 60 {
        format!("{}h {}m", total_minutes / 60, total_minutes % 60)
    } else {
        format!("{}m", total_minutes)
    }
}

fn read_attr(dir: &Path, name: &str) -> Option<String> {
    std::fs::read_to_string(dir.join(name))
        .ok()
        .map(|s| s.trim().to_string())
}

fn read_number(dir: &Path, name: &str) -> Option<f64> {
    read_attr(dir, name)?.parse().ok()
}
