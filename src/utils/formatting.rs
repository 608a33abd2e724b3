//! Formatting utilities used for CLI and export outputs.

use crate::models::AttendanceStatus;
use unicode_width::UnicodeWidthStr;

/// Pad to a display width, so names with umlauts or accents line up.
pub fn pad_right(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}

/// Label and ANSI colour for a record status.
pub fn describe_status(status: AttendanceStatus) -> (&'static str, &'static str) {
    match status {
        AttendanceStatus::CheckedIn => (status.label(), "\x1b[32m"),
        AttendanceStatus::CheckedOut => (status.label(), "\x1b[34m"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_by_display_width() {
        assert_eq!(pad_right("Jürgen", 8), "Jürgen  ");
        assert_eq!(pad_right("toolongname", 4), "toolongname");
    }
}
