use crate::record::Record;
use crate::tint::RESET;
use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt::Write;
use tracing::Level;

const DIM: &str = "\x1b[2m";
const WHITE_BRIGHT: &str = "\x1b[97m";

fn level_style(level: Level) -> &'static str {
    match level {
        l if l == Level::ERROR => "\x1b[31m",
        l if l == Level::WARN => "\x1b[33m",
        l if l == Level::INFO => "\x1b[32m",
        l if l == Level::DEBUG => "\x1b[34m",
        _ => "\x1b[90m",
    }
}

/// Numeric severity on the pino scale, 10 (trace) through 50 (error).
fn level_number(level: Level) -> u8 {
    match level {
        l if l == Level::TRACE => 10,
        l if l == Level::DEBUG => 20,
        l if l == Level::INFO => 30,
        l if l == Level::WARN => 40,
        _ => 50,
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Human-readable record formatter for development terminals.
///
/// One header line (timestamp, colored level, target, bright message), then
/// one indented continuation line per remaining field. Emits no trailing
/// newline; the tint stream owns line termination.
pub(crate) struct PrettyFormatter {
    ignore: HashSet<String>,
}

impl Default for PrettyFormatter {
    fn default() -> Self {
        Self::ignoring(["pid", "hostname"])
    }
}

impl PrettyFormatter {
    /// Formatter that drops the given field keys from its output.
    pub(crate) fn ignoring<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            ignore: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub(crate) fn format(&self, level: Level, target: &str, record: &Record) -> String {
        self.format_at(Local::now(), level, target, record)
    }

    fn format_at(
        &self,
        timestamp: DateTime<Local>,
        level: Level,
        target: &str,
        record: &Record,
    ) -> String {
        let mut out = String::new();
        let _ = write!(out, "{DIM}{}{RESET} ", timestamp.format("%Y-%m-%d %H:%M:%S%.3f"));
        let _ = write!(out, "{}{level:>5}{RESET} ", level_style(level));
        let _ = write!(out, "{DIM}{target}:{RESET} ");
        let _ = write!(out, "{WHITE_BRIGHT}{}{RESET}", record.message);
        for (key, value) in &record.fields {
            if self.ignore.contains(key) {
                continue;
            }
            let _ = write!(out, "\n    {DIM}{key}:{RESET} {}", render_value(value));
        }
        out
    }
}

/// One record on the pino wire shape, serialized as a single JSON line.
#[derive(Serialize)]
struct JsonLine<'a> {
    level: u8,
    time: i64,
    pid: u32,
    hostname: &'a str,
    target: &'a str,
    #[serde(flatten)]
    fields: Map<String, Value>,
    msg: &'a str,
}

pub(crate) fn format_json(
    level: Level,
    target: &str,
    record: &Record,
    pid: u32,
    hostname: &str,
) -> String {
    format_json_at(Utc::now().timestamp_millis(), level, target, record, pid, hostname)
}

fn format_json_at(
    time: i64,
    level: Level,
    target: &str,
    record: &Record,
    pid: u32,
    hostname: &str,
) -> String {
    let line = JsonLine {
        level: level_number(level),
        time,
        pid,
        hostname,
        target,
        fields: record.fields.iter().cloned().collect(),
        msg: &record.message,
    };
    // Serializing strings and numbers cannot fail.
    serde_json::to_string(&line).unwrap_or_default()
}
