//! Table formatting utilities for CLI output.

use std::io::{self, Write};

/// Truncates a string to at most `max_len` characters, adding "..." if needed.
///
/// Widths too narrow for the ellipsis keep a plain prefix.
///
/// # Examples
///
/// ```rust
/// use capaudit_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("curses", 10), "curses");
/// assert_eq!(truncate_string("posix_subprocess", 8), "posix...");
/// assert_eq!(truncate_string("scproxy", 2), "sc");
/// ```
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len < 3 {
        s.chars().take(max_len).collect()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{kept}...")
    }
}

/// Write a horizontal separator line.
pub fn write_separator(out: &mut impl Write, width: usize) -> io::Result<()> {
    writeln!(out, "{}", "-".repeat(width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string_no_truncation_needed() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("exact", 5), "exact");
    }

    #[test]
    fn test_truncate_string_multibyte() {
        assert_eq!(truncate_string("ééééé", 4), "é...");
    }

    #[test]
    fn test_truncate_string_never_exceeds_width() {
        for width in 0..10 {
            let truncated = truncate_string("posix_subprocess", width);
            assert!(truncated.chars().count() <= width, "{width}: {truncated}");
        }
        assert_eq!(truncate_string("scproxy", 2), "sc");
        assert_eq!(truncate_string("scproxy", 3), "...");
        assert_eq!(truncate_string("scproxy", 0), "");
    }

    #[test]
    fn test_write_separator() {
        let mut out = Vec::new();
        write_separator(&mut out, 4).unwrap();
        assert_eq!(out, b"----\n");
    }
}
