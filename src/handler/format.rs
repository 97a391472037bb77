/// Line formatting shared by the file and console handlers
///
/// `[datetime] channel.LEVEL: message {context} {extra}`, one record per line.
/// Empty context or extra maps are written as `[]`.

use chrono::SecondsFormat;
use colored::{ColoredString, Colorize};
use serde_json::{Map, Value};
use crate::level::Level;
use crate::logger::LogRecord;

pub fn line(record: &LogRecord, colorize: bool) -> String {
    let level = if colorize {
        paint(record.level).to_string()
    } else {
        record.level.name().to_string()
    };

    format!(
        "[{}] {}.{}: {} {} {}\n",
        record.datetime.to_rfc3339_opts(SecondsFormat::Micros, false),
        record.channel,
        level,
        record.message,
        fields(&record.context),
        fields(&record.extra),
    )
}

fn fields(map: &Map<String, Value>) -> String {
    if map.is_empty() {
        "[]".to_string()
    } else {
        Value::Object(map.clone()).to_string()
    }
}

fn paint(level: Level) -> ColoredString {
    let name = level.name();
    match level {
        Level::Debug => name.dimmed(),
        Level::Info => name.green(),
        Level::Notice => name.cyan(),
        Level::Warning => name.yellow(),
        Level::Error => name.red(),
        Level::Critical | Level::Alert | Level::Emergency => name.red().bold(),
    }
}
