//! util — общие хелперы валидации ввода.
//!
//! Используются и интерактивным вводом, и разбором файла данных:
//! - trim_trailing_newline(): снять один терминатор строки.
//! - is_blank(): пустая строка или только пробельные символы.
//! - parse_strict_int(): целое без "мусора" после числа (допускаются только хвостовые пробелы).
//! - truncate_name(): обрезка имени до NAME_MAX_BYTES по границе UTF-8 символа.
//! - read_line_bounded(): чтение одной строки не длиннее лимита (stdin и файл данных).
//!
//! Пробельные символы — ASCII (как isspace в C locale): ' ', \t, \n, \v, \f, \r.

use std::io::{self, BufRead, Read};

use crate::consts::NAME_MAX_BYTES;
use crate::error::{RabbitError, Result};

/// Remove exactly one trailing line terminator (`\n`, `\r\n` or `\r`) if present.
///
/// Only one terminator is removed per call: `"a\n\n"` becomes `"a\n"`. Repeated calls are
/// a no-op only once the text no longer ends with a terminator.
#[inline]
pub fn trim_trailing_newline(s: &str) -> &str {
    s.strip_suffix("\r\n")
        .or_else(|| s.strip_suffix('\n'))
        .or_else(|| s.strip_suffix('\r'))
        .unwrap_or(s)
}

/// ASCII whitespace in the C `isspace` sense (includes vertical tab).
#[inline]
pub fn is_space_byte(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\x0B' | b'\x0C' | b'\r')
}

/// True when the text is empty or ASCII whitespace only.
#[inline]
pub fn is_blank(s: &str) -> bool {
    s.bytes().all(is_space_byte)
}

/// Parse a signed 32-bit integer.
///
/// The numeral (optional `+`/`-` and at least one digit) must start at the first byte;
/// anything after it has to be ASCII whitespace. Leading whitespace is rejected, as is a value
/// outside the i32 range.
pub fn parse_strict_int(s: &str) -> Result<i32> {
    let bytes = s.as_bytes();
    let mut end = 0usize;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_from = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }

    let bad = || RabbitError::Parse {
        input: trim_trailing_newline(s).to_string(),
    };

    if end == digits_from {
        return Err(bad());
    }
    if !is_blank(&s[end..]) {
        return Err(bad());
    }
    s[..end].parse::<i32>().map_err(|_| bad())
}

/// Cut a name down to NAME_MAX_BYTES without splitting a character.
#[inline]
pub fn truncate_name(s: &str) -> &str {
    if s.len() <= NAME_MAX_BYTES {
        return s;
    }
    let mut cut = NAME_MAX_BYTES;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    &s[..cut]
}

/// Outcome of [`read_line_bounded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRead {
    /// A line (with its terminator, if any) is in the buffer.
    Line,
    /// Nothing left to read.
    Eof,
    /// Line exceeded the limit; it was consumed up to and including its newline
    /// and the buffer content must be ignored.
    TooLong,
}

/// Read one line of at most `limit` bytes (terminator included) into `buf`.
///
/// Memory use never exceeds `limit`: the tail of an over-long line is skipped
/// directly in the reader's buffer.
pub fn read_line_bounded<R: BufRead>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    limit: usize,
) -> io::Result<LineRead> {
    buf.clear();
    let n = (&mut *reader).take(limit as u64).read_until(b'\n', buf)?;
    if n == 0 {
        return Ok(LineRead::Eof);
    }
    if n >= limit && buf.last() != Some(&b'\n') {
        skip_rest_of_line(reader)?;
        buf.clear();
        return Ok(LineRead::TooLong);
    }
    Ok(LineRead::Line)
}

fn skip_rest_of_line<R: BufRead>(reader: &mut R) -> io::Result<()> {
    loop {
        let chunk = reader.fill_buf()?;
        if chunk.is_empty() {
            return Ok(());
        }
        match chunk.iter().position(|&b| b == b'\n') {
            Some(i) => {
                reader.consume(i + 1);
                return Ok(());
            }
            None => {
                let n = chunk.len();
                reader.consume(n);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_newline_variants() {
        assert_eq!(trim_trailing_newline("abc\n"), "abc");
        assert_eq!(trim_trailing_newline("abc\r\n"), "abc");
        assert_eq!(trim_trailing_newline("abc\r"), "abc");
        assert_eq!(trim_trailing_newline("abc"), "abc");
        assert_eq!(trim_trailing_newline(""), "");
        // снимается ровно один терминатор за вызов
        assert_eq!(trim_trailing_newline("abc\n\n"), "abc\n");
        assert_eq!(trim_trailing_newline(trim_trailing_newline("abc\n\n")), "abc");
        assert_eq!(trim_trailing_newline("abc\r\n\n"), "abc\r\n");
    }

    #[test]
    fn blank_detection() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank(" \t\n"));
        assert!(!is_blank("a"));
        assert!(!is_blank("  a  "));
        assert!(is_blank("\x0B\x0C\r"));
        // не-ASCII пробелы значимы
        assert!(!is_blank("\u{a0}"));
        assert!(!is_blank("\u{3000}"));
    }

    #[test]
    fn strict_int_accepts() {
        assert_eq!(parse_strict_int("42").unwrap(), 42);
        assert_eq!(parse_strict_int("-3").unwrap(), -3);
        assert_eq!(parse_strict_int("+8").unwrap(), 8);
        assert_eq!(parse_strict_int("7 ").unwrap(), 7);
        assert_eq!(parse_strict_int("7\n").unwrap(), 7);
        assert_eq!(parse_strict_int("0\t \r\n").unwrap(), 0);
        assert_eq!(parse_strict_int("2147483647").unwrap(), i32::MAX);
        assert_eq!(parse_strict_int("-2147483648").unwrap(), i32::MIN);
    }

    #[test]
    fn strict_int_rejects() {
        for bad in [
            "", "   ", "\n", "42abc", " 7", "  7  ", "abc", "-", "+", "4 2", "1.5", "0x10",
            "2147483648", "-2147483649", "7\u{a0}", "7 \u{2003}",
        ] {
            let err = parse_strict_int(bad).expect_err(bad);
            assert!(matches!(err, RabbitError::Parse { .. }), "{bad:?}");
        }
    }

    #[test]
    fn bounded_read_skips_overlong_lines() {
        use std::io::Cursor;

        let data = format!("ok\n{}\nnext\n{}", "x".repeat(50), "y".repeat(3));
        let mut rd = Cursor::new(data.into_bytes());
        let mut buf = Vec::new();

        assert_eq!(read_line_bounded(&mut rd, &mut buf, 8).unwrap(), LineRead::Line);
        assert_eq!(buf, b"ok\n");
        assert_eq!(read_line_bounded(&mut rd, &mut buf, 8).unwrap(), LineRead::TooLong);
        assert!(buf.is_empty());
        assert_eq!(read_line_bounded(&mut rd, &mut buf, 8).unwrap(), LineRead::Line);
        assert_eq!(buf, b"next\n");
        // последняя строка без '\n'
        assert_eq!(read_line_bounded(&mut rd, &mut buf, 8).unwrap(), LineRead::Line);
        assert_eq!(buf, b"yyy");
        assert_eq!(read_line_bounded(&mut rd, &mut buf, 8).unwrap(), LineRead::Eof);
    }

    #[test]
    fn bounded_read_limit_counts_newline() {
        use std::io::Cursor;

        let mut buf = Vec::new();
        // 7 байт + '\n' = ровно лимит
        let mut rd = Cursor::new(b"1234567\n".to_vec());
        assert_eq!(read_line_bounded(&mut rd, &mut buf, 8).unwrap(), LineRead::Line);
        // 8 байт без '\n' в лимите — слишком длинная
        let mut rd = Cursor::new(b"12345678\n".to_vec());
        assert_eq!(read_line_bounded(&mut rd, &mut buf, 8).unwrap(), LineRead::TooLong);
        assert_eq!(read_line_bounded(&mut rd, &mut buf, 8).unwrap(), LineRead::Eof);
    }

    #[test]
    fn truncate_respects_bound_and_char_boundary() {
        assert_eq!(truncate_name("short"), "short");
        let long = "x".repeat(80);
        assert_eq!(truncate_name(&long).len(), NAME_MAX_BYTES);

        // 24 двухбайтовых символа = 48 байт, затем ещё один двухбайтовый: 50 байт
        let wide = "я".repeat(25);
        let cut = truncate_name(&wide);
        assert_eq!(cut.len(), 48);
        assert_eq!(cut.chars().count(), 24);
    }
}
