//! Decorative crab that scuttles across the header.
//!
//! Purely frame-counter driven: the caller increments an integer per render
//! tick and the same (frame, width) pair always yields the same output.

/// Nominal sprite width in columns, used to bound the bounce.
pub const MASCOT_WIDTH: usize = 12;

/// Claw and leg positions cycle through these poses.
const POSES: [[&str; 3]; 4] = [
    [
        r" \/      \/ ",
        r"( (o    o) )",
        r"  ^^    ^^  ",
    ],
    [
        r" ()      () ",
        r"( (o    o) )",
        r"   ^^  ^^   ",
    ],
    [
        r" \/      \/ ",
        r"( (-    -) )",
        r"  ^^  ^^    ",
    ],
    [
        r" \|      |/ ",
        r"( (o    o) )",
        r"   ^^ ^^    ",
    ],
];

/// Pick the pose for a frame; independent of position.
pub fn pose(frame: u64) -> &'static [&'static str; 3] {
    &POSES[(frame % POSES.len() as u64) as usize]
}

/// Horizontal offset for a frame: a triangular sweep from the left edge to
/// `width - MASCOT_WIDTH` and back, clamped to 0 on narrow terminals.
pub fn offset(frame: u64, term_width: usize) -> usize {
    let max_offset = term_width.saturating_sub(MASCOT_WIDTH);
    let cycle = (max_offset * 2).max(1);
    let pos = (frame % cycle as u64) as usize;
    if pos > max_offset {
        cycle - pos
    } else {
        pos
    }
}

/// Render the sprite for a frame, indented to its current offset.
pub fn sprite(frame: u64, term_width: usize) -> String {
    let pad = " ".repeat(offset(frame, term_width));
    pose(frame)
        .iter()
        .map(|line| format!("{pad}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_stays_inside_the_terminal() {
        for width in [0, 5, MASCOT_WIDTH, 13, 40, 81, 200] {
            let max = width.saturating_sub(MASCOT_WIDTH);
            for frame in 0..500 {
                let o = offset(frame, width);
                assert!(o <= max, "offset {} > max {} (frame {}, width {})", o, max, frame, width);
            }
        }
    }

    #[test]
    fn sweep_reflects_at_the_right_edge() {
        let width = 40;
        let max = width - MASCOT_WIDTH;
        assert_eq!(offset(0, width), 0);
        assert_eq!(offset(max as u64, width), max);
        assert_eq!(offset(max as u64 + 1, width), max - 1);
        assert_eq!(offset(2 * max as u64, width), 0);
    }

    #[test]
    fn poses_cycle_with_a_fixed_period() {
        assert_eq!(pose(0), pose(POSES.len() as u64));
        assert_ne!(pose(0), pose(1));
    }

    #[test]
    fn sprite_is_deterministic_and_pinned_on_narrow_terminals() {
        assert_eq!(sprite(17, 80), sprite(17, 80));
        assert_eq!(offset(99, 4), 0);
        assert_eq!(offset(3, 0), 0);
    }
}
