//! GPU utilization via `nvidia-smi`, when one is installed.

use std::path::PathBuf;
use std::process::Command;

use crate::metrics::GpuStatus;

/// Locates `nvidia-smi` once; sampling is a no-op without it.
#[derive(Debug, Default)]
pub struct GpuProbe {
    smi_path: Option<PathBuf>,
}

impl GpuProbe {
    pub fn detect() -> Self {
        let smi_path = std::env::var_os("PATH").and_then(|paths| {
            std::env::split_paths(&paths)
                .map(|dir| dir.join("nvidia-smi"))
                .find(|candidate| candidate.is_file())
        });
        if smi_path.is_none() {
            tracing::debug!("nvidia-smi not found, GPU card disabled");
        }
        Self { smi_path }
    }

    pub fn sample(&self) -> Vec<GpuStatus> {
        let Some(smi) = &self.smi_path else {
            return Vec::new();
        };
        let output = Command::new(smi)
            .args(["--query-gpu=name,utilization.gpu", "--format=csv,noheader,nounits"])
            .output();
        match output {
            Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout)
                .lines()
                .filter_map(parse_line)
                .collect(),
            Ok(out) => {
                tracing::debug!(code = ?out.status.code(), "nvidia-smi query failed");
                Vec::new()
            }
            Err(e) => {
                tracing::debug!(error = %e, "could not run nvidia-smi");
                Vec::new()
            }
        }
    }
}

/// Parse one CSV row like `NVIDIA GeForce RTX 3080, 23`. A row whose
/// utilization does not parse (e.g. `[N/A]`) keeps the name without a
/// reading.
fn parse_line(line: &str) -> Option<GpuStatus> {
    let (name, usage) = line.rsplit_once(',')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some(GpuStatus {
        name: name.to_string(),
        usage: usage.trim().parse::<f64>().ok(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn csv_rows_parse_name_and_utilization() {
        let gpu = parse_line("NVIDIA GeForce RTX 3080, 23").expect("parse");
        assert_eq!(gpu.name, "NVIDIA GeForce RTX 3080");
        assert_eq!(gpu.usage, Some(23.0));
    }

    #[test]
    fn unreadable_utilization_keeps_the_name() {
        let gpu = parse_line("Tesla K80, [N/A]").expect("parse");
        assert_eq!(gpu.name, "Tesla K80");
        assert_eq!(gpu.usage, None);
    }

    #[test]
    fn junk_rows_are_dropped() {
        assert!(parse_line("").is_none());
        assert!(parse_line("no comma here").is_none());
        assert!(parse_line(", 50").is_none());
    }
}
