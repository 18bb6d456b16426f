//! Parse profiler log lines into structured records.
//!
//! The workload generator's profiler writes one whitespace-delimited line per
//! traced call:
//! ```text
//! 1524272351029000000 17 | access(tx) [method] containsKey [id] 7c4f2940-7893-3334-a6cb-7a87bf045c0d [dur] 15000
//! 1524272351031000000 17 | TXEnd [dur] 900
//! ```
//!
//! The first four tokens are positional: start timestamp (ns), thread ID, a
//! separator token, and the event name. Bracketed keys may follow in any
//! order:
//!
//! - `[dur] <ns>`: call duration in nanoseconds
//! - `[method] <name>`: the table method that was invoked
//! - `[id] <uuid>`: the table the call touched
//! - `[ids] <uuid> <uuid> ...`: several tables, up to the next bracketed key
//!
//! Any line containing `(tx)` belongs to a transaction.

use std::fmt;

const NANOS_PER_MILLI: u64 = 1_000_000;

/// A parsed profiler log line.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Start timestamp in nanoseconds
    pub timestamp_ns: u64,
    /// Thread that made the call
    pub thread_id: u64,
    /// Event name (e.g., "Seq", "TXBegin", "access(tx)")
    pub event: String,
    /// Call duration in nanoseconds, if the line carried `[dur]`
    pub duration_ns: Option<u64>,
    /// Invoked method, if the line carried `[method]`
    pub method: Option<String>,
    /// Tables named by `[id]` or `[ids]`
    pub table_ids: Vec<String>,
    /// Whether the line mentions `(tx)`
    pub transactional: bool,
}

impl Record {
    /// The whole millisecond this record started in.
    pub fn bucket_ms(&self) -> u64 {
        self.timestamp_ns / NANOS_PER_MILLI
    }

    /// Duration in milliseconds. Lines without `[dur]` count as zero.
    pub fn duration_ms(&self) -> f64 {
        self.duration_ns.unwrap_or(0) as f64 / NANOS_PER_MILLI as f64
    }

    pub fn is_event(&self, name: &str) -> bool {
        self.event == name
    }

    /// Returns true if this record touched the given table.
    pub fn has_table(&self, table_id: &str) -> bool {
        self.table_ids.iter().any(|id| id == table_id)
    }

    /// Returns true if the invoked method is one of `methods`.
    pub fn mentions_method(&self, methods: &[String]) -> bool {
        self.method
            .as_deref()
            .is_some_and(|m| methods.iter().any(|candidate| candidate == m))
    }
}

/// Why a line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Blank or whitespace-only line
    Empty,
    /// A positional token or a bracketed key's value is missing
    MissingField { field: &'static str },
    /// A numeric field did not parse
    InvalidNumber { field: &'static str, value: String },
}

impl std::error::Error for ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty line"),
            ParseError::MissingField { field } => write!(f, "missing {field}"),
            ParseError::InvalidNumber { field, value } => {
                write!(f, "invalid {field}: {value:?}")
            }
        }
    }
}

/// Records parsed from a block of text, plus how many lines were dropped.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParseReport {
    pub records: Vec<Record>,
    /// Non-blank lines that failed to parse
    pub skipped: usize,
}

fn parse_number(field: &'static str, value: Option<&str>) -> Result<u64, ParseError> {
    let value = value.ok_or(ParseError::MissingField { field })?;
    value.parse().map_err(|_| ParseError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn is_key(token: &str) -> bool {
    token.len() > 2 && token.starts_with('[') && token.ends_with(']')
}

/// Parse a single profiler line.
pub fn parse_line(line: &str) -> Result<Record, ParseError> {
    let mut tokens = line.split_whitespace().peekable();
    if tokens.peek().is_none() {
        return Err(ParseError::Empty);
    }

    let timestamp_ns = parse_number("timestamp", tokens.next())?;
    let thread_id = parse_number("thread id", tokens.next())?;
    tokens
        .next()
        .ok_or(ParseError::MissingField { field: "separator" })?;
    let event = tokens
        .next()
        .ok_or(ParseError::MissingField { field: "event" })?
        .to_string();

    let mut duration_ns = None;
    let mut method = None;
    let mut table_ids = Vec::new();

    while let Some(token) = tokens.next() {
        match token {
            "[dur]" => duration_ns = Some(parse_number("duration", tokens.next())?),
            "[method]" => {
                let name = tokens
                    .next()
                    .ok_or(ParseError::MissingField { field: "method" })?;
                method = Some(name.to_string());
            }
            "[id]" => {
                let id = tokens
                    .next()
                    .ok_or(ParseError::MissingField { field: "table id" })?;
                table_ids.push(id.to_string());
            }
            "[ids]" => {
                while let Some(id) = tokens.next_if(|t| !is_key(t)) {
                    table_ids.push(id.to_string());
                }
            }
            _ => {} // Free-form tokens and unknown keys are ignored
        }
    }

    Ok(Record {
        timestamp_ns,
        thread_id,
        event,
        duration_ns,
        method,
        table_ids,
        transactional: line.contains("(tx)"),
    })
}

/// Parse every line of `input`, skipping blank and malformed lines.
pub fn parse_lines(input: &str) -> ParseReport {
    let mut report = ParseReport::default();
    for (index, line) in input.lines().enumerate() {
        match parse_line(line) {
            Ok(record) => report.records.push(record),
            Err(ParseError::Empty) => {}
            Err(e) => {
                log::debug!("Skipping line {}: {}", index + 1, e);
                report.skipped += 1;
            }
        }
    }
    report
}
