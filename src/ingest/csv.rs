//! Investing.com-style CSV exports.
//!
//! Expected headers: `Date, Price, Open, High, Low, Vol.`; other columns such
//! as `Change %` are ignored. `Price` is the session close.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};

use super::IngestError;
use crate::indicators::parser::parse_volume;
use crate::models::indicators::RawCandle;

const DATE_FORMATS: [&str; 3] = ["%m/%d/%Y", "%Y-%m-%d", "%b %d, %Y"];

struct Columns {
    date: usize,
    close: usize,
    open: usize,
    high: usize,
    low: usize,
    volume: usize,
}

impl Columns {
    fn from_headers(headers: &::csv::StringRecord) -> Result<Self, IngestError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}') == name)
                .ok_or_else(|| IngestError::MissingField(name.to_string()))
        };
        Ok(Self {
            date: find("Date")?,
            close: find("Price")?,
            open: find("Open")?,
            high: find("High")?,
            low: find("Low")?,
            volume: find("Vol.")?,
        })
    }
}

/// Parse a session date into its `[00:00:00Z, 23:59:00Z]` bounds.
pub fn parse_session_date(value: &str) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let date = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })?;

    let start = date.and_hms_opt(0, 0, 0)?.and_utc();
    let end = date.and_hms_opt(23, 59, 0)?.and_utc();
    Some((start, end))
}

/// Parse CSV rows into raw candles, in file order.
pub fn parse_candles<R: Read>(reader: R) -> Result<Vec<RawCandle>, IngestError> {
    let mut reader = ::csv::ReaderBuilder::new()
        .trim(::csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let columns = Columns::from_headers(reader.headers()?)?;
    let field = |record: &::csv::StringRecord, idx: usize| record.get(idx).unwrap_or("").to_string();

    let mut candles = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }

        let date = field(&record, columns.date);
        let (start_time, end_time) =
            parse_session_date(&date).ok_or(IngestError::InvalidDate {
                row: row + 1,
                value: date.clone(),
            })?;
        let volume = parse_volume(&field(&record, columns.volume));

        candles.push(RawCandle {
            open: field(&record, columns.open),
            high: field(&record, columns.high),
            low: field(&record, columns.low),
            close: field(&record, columns.close),
            volume,
            total_volume: Some(volume),
            market_time: Some("regular".to_string()),
            start_time,
            end_time,
        });
    }

    Ok(candles)
}

/// Load raw candles from a CSV file on disk.
pub fn load_candles_from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<RawCandle>, IngestError> {
    let file = File::open(path)?;
    parse_candles(BufReader::new(file))
}
