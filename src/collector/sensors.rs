//! Fan speeds from `/sys/class/hwmon`.

use std::path::Path;

/// Fastest fan across all hwmon devices, in RPM; 0 when none report.
pub fn max_fan_rpm() -> u32 {
    max_fan_rpm_in(Path::new("/sys/class/hwmon"))
}

fn max_fan_rpm_in(root: &Path) -> u32 {
    let Ok(devices) = std::fs::read_dir(root) else {
        return 0;
    };
    let mut max_rpm = 0u32;
    for device in devices.flatten() {
        let Ok(files) = std::fs::read_dir(device.path()) else {
            continue;
        };
        for file in files.flatten() {
            let name = file.file_name();
            let name = name.to_string_lossy();
            if !name.starts_with("fan") || !name.ends_with("_input") {
                continue;
            }
            if let Some(rpm) = read_rpm(&file.path()) {
                max_rpm = max_rpm.max(rpm);
            }
        }
    }
    max_rpm
}

fn read_rpm(path: &Path) -> Option<u32> {
    std::fs::read_to_string(path).ok()?.trim().parse().ok()
}
