//! persist — загрузка/сохранение Store в плоский текстовый файл.
//!
//! Формат: одна запись на строку, `<name>,<value>\n`. Без заголовка, кавычек и экранирования.
//!
//! Загрузка:
//! - строка без запятой, с пустым именем или с невалидным значением пропускается;
//! - как только Store заполнен, чтение прекращается; если в файле ещё остались строки,
//!   выставляется LoadReport::capacity_reached (не ошибка);
//! - строка длиннее MAX_DATA_LINE пропускается целиком (память на строку ограничена);
//! - невалидный UTF-8 декодируется lossy;
//! - ошибка чтения посреди файла откатывает Store к состоянию до загрузки.
//!
//! Сохранение: truncate + последовательная запись всех элементов.

use log::{debug, info, warn};
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::consts::{FIELD_SEP, MAX_DATA_LINE};
use crate::error::{RabbitError, Result};
use crate::metrics::{record_load, record_save};
use crate::store::Store;
use crate::util::{is_blank, parse_strict_int, read_line_bounded, trim_trailing_newline, LineRead};

/// Outcome of a load call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records added to the store by this call.
    pub loaded: usize,
    /// Malformed lines that were skipped.
    pub skipped: usize,
    /// Store filled up while unread lines were still left in the file.
    pub capacity_reached: bool,
}

/// Parse one data line into (name, value). None means "skip this line".
///
/// The name is everything before the first comma and is kept as is (no trimming).
pub fn parse_line(line: &str) -> Option<(&str, i32)> {
    let line = trim_trailing_newline(line);
    let (name, value) = line.split_once(FIELD_SEP)?;
    if is_blank(name) {
        return None;
    }
    let value = parse_strict_int(value).ok()?;
    Some((name, value))
}

/// Read records from any buffered reader into the store.
///
/// On a read error the store is rolled back to what it held before the call,
/// so a failed load never leaves a partial file image in memory.
pub fn load_items_from<R: BufRead>(mut reader: R, store: &mut Store) -> io::Result<LoadReport> {
    let before = store.len();
    match read_records(&mut reader, store) {
        Ok(report) => {
            record_load(report.loaded as u64, report.skipped as u64);
            Ok(report)
        }
        Err(e) => {
            warn!(
                "load: read error after {} item(s), rolling back: {}",
                store.len() - before,
                e
            );
            store.truncate(before);
            Err(e)
        }
    }
}

fn read_records<R: BufRead>(reader: &mut R, store: &mut Store) -> io::Result<LoadReport> {
    let mut report = LoadReport::default();
    let mut buf = Vec::new();
    let mut lineno = 0usize;

    loop {
        if store.is_full() {
            report.capacity_reached = !reader.fill_buf()?.is_empty();
            break;
        }

        match read_line_bounded(reader, &mut buf, MAX_DATA_LINE)? {
            LineRead::Eof => break,
            LineRead::TooLong => {
                lineno += 1;
                warn!("load: line {} longer than {} bytes skipped", lineno, MAX_DATA_LINE);
                report.skipped += 1;
                continue;
            }
            LineRead::Line => lineno += 1,
        }

        let line = String::from_utf8_lossy(&buf);
        match parse_line(&line) {
            Some((name, value)) => match store.add(name, value) {
                Ok(()) => report.loaded += 1,
                Err(e) => {
                    // capacity проверена выше, blank отсеян parse_line — сюда попадать не должны
                    warn!("load: line {} rejected by store: {}", lineno, e);
                    report.skipped += 1;
                }
            },
            None => {
                debug!("load: skip malformed line {}: {:?}", lineno, trim_trailing_newline(&line));
                report.skipped += 1;
            }
        }
    }

    Ok(report)
}

/// Load records from a data file.
///
/// A missing or unreadable file is an `Io` error; callers treat it as "start empty".
pub fn load_items(path: &Path, store: &mut Store) -> Result<LoadReport> {
    let f = File::open(path).map_err(|e| RabbitError::io("open", path, e))?;
    let report =
        load_items_from(BufReader::new(f), store).map_err(|e| RabbitError::io("read", path, e))?;

    info!(
        "load: {} item(s) from {} (skipped={}, capacity_reached={})",
        report.loaded,
        path.display(),
        report.skipped,
        report.capacity_reached
    );
    if report.skipped > 0 {
        warn!("load: {} malformed line(s) ignored in {}", report.skipped, path.display());
    }
    Ok(report)
}

/// Write every record as `name,value\n` in insertion order.
pub fn write_items<W: Write>(mut w: W, store: &Store) -> io::Result<()> {
    for item in store.items() {
        writeln!(w, "{}", item)?;
    }
    w.flush()
}

/// Overwrite the data file with the current store contents.
pub fn save_items(path: &Path, store: &Store) -> Result<()> {
    let res = save_inner(path, store);
    record_save(res.is_ok());
    match &res {
        Ok(()) => debug!("save: {} item(s) -> {}", store.len(), path.display()),
        Err(e) => warn!("save: {}", e),
    }
    res
}

fn save_inner(path: &Path, store: &Store) -> Result<()> {
    let f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|e| RabbitError::io("open", path, e))?;
    write_items(BufWriter::new(f), store).map_err(|e| RabbitError::io("write", path, e))
}
