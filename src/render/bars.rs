//! Fixed-resolution bar glyphs.
//!
//! Two families: percent-based fills (`filled = p/100 * cells`) and
//! rate-based fills (`filled = rate / divisor`). They share glyph and clamp
//! logic but map their input differently and color against different
//! threshold tables, so the mappings stay separate functions.

use crate::render::theme::{severity, Theme, BATTERY, DISK_IO, NETWORK, PERCENT};

/// Resolution of the primary bars.
pub const WIDE_CELLS: usize = 18;
/// Resolution of the compact and rate bars.
pub const COMPACT_CELLS: usize = 5;

const WIDE_FULL: char = '█';
const WIDE_EMPTY: char = '░';
const COMPACT_FULL: char = '▮';
const COMPACT_EMPTY: char = '▯';

fn glyphs(filled: usize, cells: usize, full: char, empty: char) -> String {
    let mut bar = String::with_capacity(cells * full.len_utf8());
    for i in 0..cells {
        bar.push(if i < filled { full } else { empty });
    }
    bar
}

/// Cells filled by a percentage, clamped to [0, 100].
fn percent_fill(percent: f64, cells: usize) -> usize {
    let p = percent.clamp(0.0, 100.0);
    ((p / 100.0 * cells as f64) as usize).min(cells)
}

/// Cells filled by an absolute rate over a linear scale divisor.
fn rate_fill(rate: f64, divisor: f64, cells: usize) -> usize {
    ((rate / divisor).max(0.0) as usize).min(cells)
}

/// 18-cell usage bar colored by the generic percent thresholds.
pub fn percent_bar(theme: &Theme, percent: f64) -> String {
    let bar = glyphs(percent_fill(percent, WIDE_CELLS), WIDE_CELLS, WIDE_FULL, WIDE_EMPTY);
    theme.paint(severity(percent.clamp(0.0, 100.0), &PERCENT), &bar)
}

/// 18-cell charge bar colored by the inverted battery thresholds.
pub fn battery_bar(theme: &Theme, percent: f64) -> String {
    let bar = glyphs(percent_fill(percent, WIDE_CELLS), WIDE_CELLS, WIDE_FULL, WIDE_EMPTY);
    theme.paint(severity(percent.clamp(0.0, 100.0), &BATTERY), &bar)
}

/// 5-cell disk throughput bar; one cell per 10 MB/s.
pub fn io_bar(theme: &Theme, rate: f64) -> String {
    let bar = glyphs(rate_fill(rate, 10.0, COMPACT_CELLS), COMPACT_CELLS, COMPACT_FULL, COMPACT_EMPTY);
    theme.paint(severity(rate, &DISK_IO), &bar)
}

/// 5-cell network throughput bar; one cell per 2 MB/s.
pub fn net_bar(theme: &Theme, rate: f64) -> String {
    let bar = glyphs(rate_fill(rate, 2.0, COMPACT_CELLS), COMPACT_CELLS, COMPACT_FULL, COMPACT_EMPTY);
    theme.paint(severity(rate, &NETWORK), &bar)
}

/// 5-cell usage bar for per-process lines.
pub fn mini_bar(theme: &Theme, percent: f64) -> String {
    let bar = glyphs(percent_fill(percent, COMPACT_CELLS), COMPACT_CELLS, COMPACT_FULL, COMPACT_EMPTY);
    theme.paint(severity(percent, &PERCENT), &bar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ansi::strip_ansi;

    fn filled_cells(bar: &str, full: char) -> usize {
        strip_ansi(bar).chars().filter(|&c| c == full).count()
    }

    fn cells(bar: &str) -> usize {
        strip_ansi(bar).chars().count()
    }

    #[test]
    fn percent_bar_has_fixed_resolution() {
        let theme = Theme::default();
        for p in [-20.0, 0.0, 13.0, 50.0, 99.9, 100.0, 400.0] {
            assert_eq!(cells(&percent_bar(&theme, p)), WIDE_CELLS);
        }
    }

    #[test]
    fn percent_fill_is_monotonic_and_clamped() {
        assert_eq!(percent_fill(0.0, WIDE_CELLS), 0);
        assert_eq!(percent_fill(100.0, WIDE_CELLS), WIDE_CELLS);
        assert_eq!(percent_fill(-5.0, WIDE_CELLS), percent_fill(0.0, WIDE_CELLS));
        assert_eq!(percent_fill(250.0, WIDE_CELLS), percent_fill(100.0, WIDE_CELLS));

        let mut last = 0;
        for p in 0..=100 {
            let f = percent_fill(f64::from(p), WIDE_CELLS);
            assert!(f >= last, "fill must not decrease (p={})", p);
            last = f;
        }
    }

    #[test]
    fn rate_bars_scale_linearly() {
        let theme = Theme::default();
        assert_eq!(filled_cells(&io_bar(&theme, 0.0), '▮'), 0);
        assert_eq!(filled_cells(&io_bar(&theme, 10.0), '▮'), 1);
        assert_eq!(filled_cells(&io_bar(&theme, 49.0), '▮'), 4);
        assert_eq!(filled_cells(&io_bar(&theme, 500.0), '▮'), COMPACT_CELLS);

        assert_eq!(filled_cells(&net_bar(&theme, 1.9), '▮'), 0);
        assert_eq!(filled_cells(&net_bar(&theme, 2.0), '▮'), 1);
        assert_eq!(filled_cells(&net_bar(&theme, 10.0), '▮'), COMPACT_CELLS);
    }

    #[test]
    fn mini_bar_maps_twenty_percent_per_cell() {
        let theme = Theme::default();
        assert_eq!(filled_cells(&mini_bar(&theme, 0.0), '▮'), 0);
        assert_eq!(filled_cells(&mini_bar(&theme, 45.0), '▮'), 2);
        assert_eq!(filled_cells(&mini_bar(&theme, 100.0), '▮'), COMPACT_CELLS);
        assert_eq!(cells(&mini_bar(&theme, 45.0)), COMPACT_CELLS);
    }

    #[test]
    fn danger_band_reaches_the_bar_color() {
        let theme = Theme::default();
        let hot = percent_bar(&theme, 93.4);
        let calm = percent_bar(&theme, 10.0);
        assert_eq!(hot, theme.paint(crate::render::theme::Band::Danger, &strip_ansi(&hot)));
        assert_eq!(calm, theme.paint(crate::render::theme::Band::Ok, &strip_ansi(&calm)));
    }
}
