//! Rendering engine: snapshot in, colorized text block out.
//!
//! Everything here is a pure computation over its inputs; the app owns the
//! animation frame counter and the terminal, and hands both in per call.

pub mod ansi;
pub mod bars;
pub mod cards;
pub mod format;
pub mod layout;
pub mod mascot;
pub mod theme;

pub use theme::{Band, Theme};

use crate::metrics::MetricsSnapshot;

/// Stateless dashboard renderer, configured once from the app config.
#[derive(Debug, Clone)]
pub struct DashboardRenderer {
    theme: Theme,
    primary_interface: String,
}

impl DashboardRenderer {
    pub fn new(theme: Theme, primary_interface: impl Into<String>) -> Self {
        Self {
            theme,
            primary_interface: primary_interface.into(),
        }
    }

    /// Render one frame. With an active error only the header block (plus
    /// the error line) is produced; the grid would be stale noise.
    pub fn render(
        &self,
        snapshot: &MetricsSnapshot,
        error: Option<&str>,
        anim_frame: u64,
        term_width: u16,
    ) -> String {
        let header = layout::render_header(&self.theme, snapshot, error, anim_frame, term_width);
        if error.is_some_and(|msg| !msg.is_empty()) {
            return header;
        }

        let cards = cards::build_cards(&self.theme, snapshot, &self.primary_interface);
        let grid = layout::render_grid(&self.theme, &cards, term_width);
        format!("{header}\n\n{grid}")
    }
}
