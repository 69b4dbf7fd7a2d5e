//! Header block and the two-column card grid.

use crate::metrics::MetricsSnapshot;
use crate::render::ansi::visible_width;
use crate::render::cards::Card;
use crate::render::mascot;
use crate::render::theme::{Band, Theme};

/// Floor for the per-card column width.
const MIN_COLUMN_WIDTH: usize = 38;
/// Columns reserved around each half of the terminal.
const COLUMN_MARGIN: usize = 2;
/// Space between the two columns of a row.
const GUTTER: &str = "  ";
/// Shortest title rule we will draw.
const MIN_RULE: usize = 4;

/// Title line, health indicator, hardware summary and the mascot. With an
/// active error the error line is appended and the caller skips the grid.
pub fn render_header(
    theme: &Theme,
    m: &MetricsSnapshot,
    error: Option<&str>,
    anim_frame: u64,
    term_width: u16,
) -> String {
    let title = theme.title("Vitals");
    let score = format!(
        "{}{}",
        theme.paint(Band::Subtle, "Health "),
        theme.score_indicator(m.health_score)
    );

    let hw = &m.hardware;
    let info = [
        hw.model.as_str(),
        hw.cpu_model.as_str(),
        hw.total_ram.as_str(),
        hw.disk_size.as_str(),
        hw.os_version.as_str(),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" · ");

    let header_line = format!("{}  {}  {}", title, score, theme.paint(Band::Subtle, &info));
    let sprite = mascot::sprite(anim_frame, term_width as usize);

    match error {
        Some(msg) if !msg.is_empty() => [
            header_line,
            String::new(),
            sprite,
            theme.paint(Band::Danger, msg),
            String::new(),
        ]
        .join("\n"),
        _ => format!("{header_line}\n\n{sprite}"),
    }
}

/// Stack cards two per row, equalizing the height of each row.
pub fn render_grid(theme: &Theme, cards: &[Card], term_width: u16) -> String {
    if cards.is_empty() {
        return String::new();
    }
    let column_width = MIN_COLUMN_WIDTH.max((term_width as usize / 2).saturating_sub(COLUMN_MARGIN));

    let mut out: Vec<String> = Vec::new();
    for pair in cards.chunks(2) {
        let left = card_lines(theme, &pair[0], column_width);
        match pair.get(1) {
            Some(right_card) => {
                let right = card_lines(theme, right_card, column_width);
                let height = left.len().max(right.len());
                let left = pad_to_height(left, height);
                let right = pad_to_height(right, height);
                for (l, r) in left.iter().zip(right.iter()) {
                    let fill = " ".repeat(column_width.saturating_sub(visible_width(l)));
                    out.push(format!("{l}{fill}{GUTTER}{r}"));
                }
            }
            None => out.extend(left),
        }
    }
    out.join("\n")
}

/// Render one card into its lines: a ruled title, the content, and one
/// trailing blank for spacing below the row.
fn card_lines(theme: &Theme, card: &Card, width: usize) -> Vec<String> {
    let title_text = format!("{} {}", card.icon, card.title);
    let rule_len = width
        .saturating_sub(visible_width(&title_text) + 1)
        .max(MIN_RULE);
    let header = format!(
        "{} {}",
        theme.title(&title_text),
        theme.rule(&"─".repeat(rule_len))
    );

    let mut lines = Vec::with_capacity(card.lines.len() + 2);
    lines.push(header);
    lines.extend(card.lines.iter().cloned());
    lines.push(String::new());
    lines
}

fn pad_to_height(mut lines: Vec<String>, height: usize) -> Vec<String> {
    while lines.len() < height {
        lines.push(String::new());
    }
    lines
}
