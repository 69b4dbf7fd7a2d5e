//! Severity classification and terminal styling.
//!
//! Classification is a pure function of a value and a per-metric threshold
//! table; turning a band into colored text is a separate lookup on the
//! theme, so the two halves are testable on their own.

use crossterm::style::{Color, Stylize};

/// Severity band attached to a rendered value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Ok,
    Warn,
    Danger,
    /// Muted informational text.
    Subtle,
    /// Unstyled text.
    Plain,
}

/// Which end of the scale is unhealthy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    HighIsBad,
    LowIsBad,
}

/// Thresholds for one metric kind.
///
/// Percentage-of-capacity metrics and absolute-throughput metrics carry
/// independently tuned tables; they are not interchangeable.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdTable {
    pub warn: f64,
    pub danger: f64,
    pub direction: Direction,
    /// Whether a value sitting exactly on a boundary takes the hotter band.
    /// Only meaningful for `HighIsBad`.
    pub inclusive: bool,
    /// Band for values on the healthy side of `warn`.
    pub calm: Band,
}

/// Generic percent-of-capacity metrics (CPU, memory, disk fill).
pub const PERCENT: ThresholdTable = ThresholdTable {
    warn: 70.0,
    danger: 90.0,
    direction: Direction::HighIsBad,
    inclusive: true,
    calm: Band::Ok,
};

/// Battery charge: low is bad.
pub const BATTERY: ThresholdTable = ThresholdTable {
    warn: 50.0,
    danger: 20.0,
    direction: Direction::LowIsBad,
    inclusive: false,
    calm: Band::Ok,
};

/// Temperatures in °C; calm readings stay muted rather than green.
pub const TEMPERATURE: ThresholdTable = ThresholdTable {
    warn: 70.0,
    danger: 85.0,
    direction: Direction::HighIsBad,
    inclusive: true,
    calm: Band::Subtle,
};

/// Disk throughput in MB/s, strict boundaries.
pub const DISK_IO: ThresholdTable = ThresholdTable {
    warn: 30.0,
    danger: 80.0,
    direction: Direction::HighIsBad,
    inclusive: false,
    calm: Band::Ok,
};

/// Network throughput in MB/s, strict boundaries.
pub const NETWORK: ThresholdTable = ThresholdTable {
    warn: 3.0,
    danger: 8.0,
    direction: Direction::HighIsBad,
    inclusive: false,
    calm: Band::Ok,
};

/// Classify a value against a threshold table.
pub fn severity(value: f64, table: &ThresholdTable) -> Band {
    match table.direction {
        Direction::HighIsBad => {
            let hot = |limit: f64| {
                if table.inclusive {
                    value >= limit
                } else {
                    value > limit
                }
            };
            if hot(table.danger) {
                Band::Danger
            } else if hot(table.warn) {
                Band::Warn
            } else {
                table.calm
            }
        }
        Direction::LowIsBad => {
            if value < table.danger {
                Band::Danger
            } else if value < table.warn {
                Band::Warn
            } else {
                table.calm
            }
        }
    }
}

/// Color palette mapping bands to terminal styles.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub ok: Color,
    pub warn: Color,
    pub danger: Color,
    pub subtle: Color,
    pub title: Color,
    pub rule: Color,
    pub excellent: Color,
    pub poor: Color,
}

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "ansi" | "basic" => Self::ansi(),
            _ => Self::aurora(),
        }
    }

    /// Default truecolor palette.
    pub fn aurora() -> Self {
        Self {
            name: "Aurora".to_string(),
            ok: Color::Rgb { r: 135, g: 215, b: 135 },
            warn: Color::Rgb { r: 255, g: 215, b: 95 },
            danger: Color::Rgb { r: 255, g: 107, b: 107 },
            subtle: Color::Rgb { r: 158, g: 158, b: 158 },
            title: Color::Rgb { r: 199, g: 159, b: 215 },
            rule: Color::Rgb { r: 90, g: 90, b: 90 },
            excellent: Color::Rgb { r: 135, g: 255, b: 135 },
            poor: Color::Rgb { r: 255, g: 175, b: 95 },
        }
    }

    /// 16-color fallback for terminals without truecolor support.
    pub fn ansi() -> Self {
        Self {
            name: "Ansi".to_string(),
            ok: Color::Green,
            warn: Color::Yellow,
            danger: Color::Red,
            subtle: Color::DarkGrey,
            title: Color::Magenta,
            rule: Color::DarkGrey,
            excellent: Color::Green,
            poor: Color::DarkYellow,
        }
    }

    /// Wrap text in the escape sequence for a band.
    pub fn paint(&self, band: Band, text: &str) -> String {
        match band {
            Band::Ok => text.with(self.ok).to_string(),
            Band::Warn => text.with(self.warn).to_string(),
            Band::Danger => text.with(self.danger).bold().to_string(),
            Band::Subtle => text.with(self.subtle).to_string(),
            Band::Plain => text.to_string(),
        }
    }

    pub fn title(&self, text: &str) -> String {
        text.with(self.title).bold().to_string()
    }

    pub fn rule(&self, text: &str) -> String {
        text.with(self.rule).to_string()
    }

    /// Health score indicator, colored in five bands from excellent (>=90)
    /// down to critical (<40).
    pub fn score_indicator(&self, score: u8) -> String {
        let color = if score >= 90 {
            self.excellent
        } else if score >= 75 {
            self.ok
        } else if score >= 60 {
            self.warn
        } else if score >= 40 {
            self.poor
        } else {
            self.danger
        };
        format!("● {}", score).with(color).bold().to_string()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::aurora()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_boundaries_are_inclusive() {
        assert_eq!(severity(0.0, &PERCENT), Band::Ok);
        assert_eq!(severity(69.9, &PERCENT), Band::Ok);
        assert_eq!(severity(70.0, &PERCENT), Band::Warn);
        assert_eq!(severity(89.9, &PERCENT), Band::Warn);
        assert_eq!(severity(90.0, &PERCENT), Band::Danger);
        assert_eq!(severity(250.0, &PERCENT), Band::Danger);
    }

    #[test]
    fn battery_scale_is_inverted() {
        assert_eq!(severity(5.0, &BATTERY), Band::Danger);
        assert_eq!(severity(19.9, &BATTERY), Band::Danger);
        assert_eq!(severity(20.0, &BATTERY), Band::Warn);
        assert_eq!(severity(49.9, &BATTERY), Band::Warn);
        assert_eq!(severity(50.0, &BATTERY), Band::Ok);
        assert_eq!(severity(100.0, &BATTERY), Band::Ok);
    }

    #[test]
    fn calm_temperature_stays_subtle() {
        assert_eq!(severity(45.0, &TEMPERATURE), Band::Subtle);
        assert_eq!(severity(70.0, &TEMPERATURE), Band::Warn);
        assert_eq!(severity(85.0, &TEMPERATURE), Band::Danger);
    }

    #[test]
    fn rate_boundaries_are_strict() {
        assert_eq!(severity(30.0, &DISK_IO), Band::Ok);
        assert_eq!(severity(30.1, &DISK_IO), Band::Warn);
        assert_eq!(severity(80.0, &DISK_IO), Band::Warn);
        assert_eq!(severity(80.1, &DISK_IO), Band::Danger);

        assert_eq!(severity(3.0, &NETWORK), Band::Ok);
        assert_eq!(severity(3.5, &NETWORK), Band::Warn);
        assert_eq!(severity(8.0, &NETWORK), Band::Warn);
        assert_eq!(severity(9.0, &NETWORK), Band::Danger);
    }

    #[test]
    fn paint_styles_all_bands_but_plain() {
        let theme = Theme::default();
        assert!(theme.paint(Band::Ok, "x").contains("\x1b["));
        assert!(theme.paint(Band::Danger, "x").contains("\x1b["));
        assert_eq!(theme.paint(Band::Plain, "x"), "x");
    }

    #[test]
    fn unknown_theme_name_falls_back_to_default() {
        assert_eq!(Theme::from_name("nope").name, "Aurora");
        assert_eq!(Theme::from_name("ansi").name, "Ansi");
    }
}
