//! Aggregate disk throughput from `/proc/diskstats` sector deltas.

use std::collections::HashMap;
use std::io;
use std::path::Path;

use crate::collector::CollectorError;
use crate::metrics::DiskIoStatus;

const DISKSTATS: &str = "/proc/diskstats";
const SECTOR_BYTES: f64 = 512.0;
const MB: f64 = 1024.0 * 1024.0;

/// Cumulative (sectors read, sectors written) per physical device.
type Counters = HashMap<String, (u64, u64)>;

/// Keeps the previous counters so each sample yields a rate.
#[derive(Debug, Default)]
pub struct DiskIoSampler {
    prev: Option<Counters>,
}

impl DiskIoSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rates since the previous call, averaged over `elapsed_secs`. The
    /// first call and non-Linux hosts report zero.
    pub fn sample(&mut self, elapsed_secs: f64) -> Result<DiskIoStatus, CollectorError> {
        let contents = match std::fs::read_to_string(Path::new(DISKSTATS)) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(DiskIoStatus::default()),
            Err(source) => {
                return Err(CollectorError::Read {
                    path: DISKSTATS.to_string(),
                    source,
                })
            }
        };

        let current = parse_diskstats(&contents);
        let status = match (&self.prev, elapsed_secs > 0.0) {
            (Some(prev), true) => rates(prev, &current, elapsed_secs),
            _ => DiskIoStatus::default(),
        };
        self.prev = Some(current);
        Ok(status)
    }
}

fn rates(prev: &Counters, current: &Counters, elapsed_secs: f64) -> DiskIoStatus {
    let mut read_sectors = 0u64;
    let mut write_sectors = 0u64;
    for (device, (read, written)) in current {
        if let Some((prev_read, prev_written)) = prev.get(device) {
            read_sectors += read.saturating_sub(*prev_read);
            write_sectors += written.saturating_sub(*prev_written);
        }
    }
    DiskIoStatus {
        read_rate: read_sectors as f64 * SECTOR_BYTES / MB / elapsed_secs,
        write_rate: write_sectors as f64 * SECTOR_BYTES / MB / elapsed_secs,
    }
}

fn parse_diskstats(contents: &str) -> Counters {
    let mut counters = Counters::new();
    for line in contents.lines() {
        if let Some((name, read, written)) = parse_line(line) {
            counters.insert(name.to_string(), (read, written));
        }
    }
    counters
}

/// Extract (device, sectors read, sectors written) from one line, skipping
/// partitions so volumes are not double counted.
fn parse_line(line: &str) -> Option<(&str, u64, u64)> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    // major minor name reads merged sectors ms writes merged sectors ...
    if fields.len() < 10 {
        return None;
    }
    let name = fields[2];
    if !is_physical_device(name) {
        return None;
    }
    let read = fields[5].parse().ok()?;
    let written = fields[9].parse().ok()?;
    Some((name, read, written))
}

fn is_physical_device(name: &str) -> bool {
    if let Some(rest) = name.strip_prefix("nvme") {
        return !rest.contains('p');
    }
    if let Some(rest) = name.strip_prefix("mmcblk") {
        return !rest.contains('p');
    }
    if name.starts_with("sd") || name.starts_with("vd") || name.starts_with("hd") {
        return !name.ends_with(|c: char| c.is_ascii_digit());
    }
    false
}
