//! Plain-text console rendering: rules, headers and two-column tables.
//!
//! Everything writes to a caller-supplied `Write` so the same formatting backs
//! stdout and the run log.

use std::fmt::Display;
use std::io::{self, Write};

pub const TEXT_WIDTH: usize = 80;
/// Gap between the longest key and the value column.
pub const TAB_WIDTH: usize = 4;
const LINE_SYMBOL: char = '\u{2014}';

pub fn horizontal_line<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    let line: String = std::iter::repeat_n(LINE_SYMBOL, TEXT_WIDTH).collect();
    writeln!(out, "{line}")
}

/// Title framed by horizontal rules.
pub fn header<W: Write + ?Sized>(out: &mut W, title: &str) -> io::Result<()> {
    horizontal_line(out)?;
    writeln!(out, "{title}")?;
    horizontal_line(out)
}

/// Write `rows` as aligned key/value columns.
///
/// The value column starts [`TAB_WIDTH`] characters after the longest key, or
/// after `key_width` when given (used to align several tables to one width).
pub fn tabulate<W, K, V>(out: &mut W, rows: &[(K, V)], key_width: Option<usize>) -> io::Result<()>
where
    W: Write + ?Sized,
    K: AsRef<str>,
    V: Display,
{
    let width = key_width.unwrap_or_else(|| {
        rows.iter()
            .map(|(key, _)| key.as_ref().chars().count())
            .max()
            .unwrap_or(0)
    }) + TAB_WIDTH;

    for (key, value) in rows {
        let key = key.as_ref();
        let pad = width.saturating_sub(key.chars().count());
        writeln!(out, "{key}{:pad$}{value}", "")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).expect("render");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn header_is_framed_by_rules() {
        let text = render(|out| header(out, "Select mode:"));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].chars().count(), TEXT_WIDTH);
        assert_eq!(lines[1], "Select mode:");
        assert_eq!(lines[0], lines[2]);
    }

    #[test]
    fn tabulate_aligns_to_longest_key() {
        let rows = [("Mode:", "run"), ("Command:", "./run.sh")];
        let text = render(|out| tabulate(out, &rows, None));
        assert_eq!(text, "Mode:       run\nCommand:    ./run.sh\n");
    }

    #[test]
    fn tabulate_honors_explicit_width() {
        let rows = [("/a", "ls")];
        let text = render(|out| tabulate(out, &rows, Some(6)));
        assert_eq!(text, "/a        ls\n");
    }
}
