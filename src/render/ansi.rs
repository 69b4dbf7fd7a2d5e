//! ANSI-aware text measurement used by the layout math.

use unicode_width::UnicodeWidthStr;

/// Remove ANSI escape sequences, leaving only printable content.
pub fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\x1b' {
            out.push(c);
            continue;
        }
        match chars.next() {
            // CSI sequence: parameters and intermediates end at 0x40..=0x7e.
            Some('[') => {
                for t in chars.by_ref() {
                    if ('\x40'..='\x7e').contains(&t) {
                        break;
                    }
                }
            }
            // Two-byte escape (or trailing ESC); the follow-up char is
            // consumed by the `next()` above.
            _ => {}
        }
    }
    out
}

/// Display width of a string in terminal columns, ignoring escape
/// sequences.
pub fn visible_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(s).as_str())
}
