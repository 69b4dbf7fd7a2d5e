//! Overall health score for the header indicator.

use crate::metrics::{MemoryPressure, MetricsSnapshot};

/// Condense a snapshot into 0-100. Starts from a perfect score and
/// subtracts penalties for each stressed subsystem.
pub fn score(m: &MetricsSnapshot) -> u8 {
    let mut penalty: u32 = 0;

    penalty += match m.cpu.usage {
        u if u >= 90.0 => 25,
        u if u >= 70.0 => 10,
        _ => 0,
    };

    penalty += match m.memory.used_percent {
        u if u >= 90.0 => 25,
        u if u >= 75.0 => 10,
        _ => 0,
    };
    penalty += match m.memory.pressure {
        MemoryPressure::Critical => 10,
        MemoryPressure::Warn => 5,
        MemoryPressure::Normal => 0,
    };

    let fullest_disk = m
        .disks
        .iter()
        .map(|d| d.used_percent)
        .fold(0.0f64, f64::max);
    penalty += match fullest_disk {
        u if u >= 95.0 => 15,
        u if u >= 85.0 => 8,
        _ => 0,
    };

    penalty += match m.thermal.cpu_temp {
        t if t >= 85.0 => 15,
        t if t >= 70.0 => 5,
        _ => 0,
    };

    if let Some(b) = m.batteries.first() {
        if b.percent < 20.0 && !b.state.is_charging() {
            penalty += 5;
        }
    }

    100u32.saturating_sub(penalty) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{BatteryState, BatteryStatus, DiskStatus};

    #[test]
    fn an_idle_machine_scores_perfect() {
        assert_eq!(score(&MetricsSnapshot::default()), 100);
    }

    #[test]
    fn each_stressed_subsystem_costs_points() {
        let mut m = MetricsSnapshot::default();
        m.cpu.usage = 75.0;
        assert_eq!(score(&m), 90);
        m.memory.used_percent = 92.0;
        assert_eq!(score(&m), 65);
    }

    #[test]
    fn a_machine_on_fire_bottoms_out_at_zero() {
        let mut m = MetricsSnapshot::default();
        m.cpu.usage = 99.0;
        m.memory.used_percent = 99.0;
        m.memory.pressure = MemoryPressure::Critical;
        m.disks = vec![DiskStatus {
            used_percent: 99.0,
            ..Default::default()
        }];
        m.thermal.cpu_temp = 95.0;
        m.batteries = vec![BatteryStatus {
            percent: 5.0,
            state: BatteryState::Discharging,
            ..Default::default()
        }];
        let s = score(&m);
        assert_eq!(s, 100 - (25 + 25 + 10 + 15 + 15 + 5));
    }

    #[test]
    fn charging_battery_is_not_penalized() {
        let mut m = MetricsSnapshot::default();
        m.batteries = vec![BatteryStatus {
            percent: 5.0,
            state: BatteryState::Charging,
            ..Default::default()
        }];
        assert_eq!(score(&m), 100);
    }
}
