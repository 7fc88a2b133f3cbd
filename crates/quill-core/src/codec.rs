//! Conversion between logical values and the values a driver binds and returns.
//!
//! STRING, INTEGER, NUMERIC, BINARY and TIMESTAMP pass through unchanged.
//! DATE and TIME are bound as text (`YYYY-MM-DD` and `YYYY-MM-DD HH:MM:SS`,
//! UTC) and read back as Unix seconds.

use crate::{
    schema::{Cast, Model},
    stmt::{Record, Row, Value},
    Error, Result,
};

use indexmap::IndexMap;
use jiff::{
    civil::{Date, DateTime, Time},
    tz::TimeZone,
    Timestamp,
};
use std::sync::Arc;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Converts a logical value into the value bound as a statement parameter.
pub fn encode(value: &Value, cast: Cast) -> Result<Value> {
    match cast {
        Cast::Date => encode_civil(value, DATE_FORMAT, "Date"),
        Cast::Time => encode_civil(value, TIME_FORMAT, "Time"),
        Cast::String | Cast::Integer | Cast::Numeric | Cast::Binary | Cast::Timestamp => {
            Ok(value.clone())
        }
    }
}

/// Converts a value returned by the driver into its logical form.
pub fn decode(value: Value, cast: Cast) -> Result<Value> {
    match cast {
        Cast::Date | Cast::Time => match value {
            Value::String(text) => match parse_civil(&text) {
                Some(datetime) => Ok(Value::I64(unix_seconds(datetime)?)),
                None => Err(Error::type_conversion(
                    Value::String(text),
                    cast_name(cast),
                )),
            },
            Value::Null | Value::I64(_) => Ok(value),
            value => Err(Error::type_conversion(value, cast_name(cast))),
        },
        Cast::String | Cast::Integer | Cast::Numeric | Cast::Binary | Cast::Timestamp => {
            Ok(value)
        }
    }
}

/// Builds a record from a result row, decoding every column of the model.
///
/// Columns missing from the row hydrate as null.
pub fn hydrate(model: &Arc<Model>, mut row: Row) -> Result<Record> {
    let mut values = IndexMap::new();

    for field in model.columns() {
        let raw = row.remove(field.name()).unwrap_or_default();
        let value = decode(raw, field.cast()).map_err(|err| {
            err.context(crate::err!(
                "reading field `{}` of `{}`",
                field.name(),
                model.name()
            ))
        })?;
        values.insert(field.name().to_string(), value);
    }

    Ok(Record::new(model.clone(), values))
}

fn encode_civil(value: &Value, format: &str, ty: &'static str) -> Result<Value> {
    let datetime = match value {
        Value::Null => return Ok(Value::Null),
        Value::String(text) if text.trim().is_empty() => return Ok(Value::Null),
        Value::I64(seconds) => Timestamp::from_second(*seconds)?
            .to_zoned(TimeZone::UTC)
            .datetime(),
        Value::String(text) => match parse_civil(text) {
            Some(datetime) => datetime,
            None => return Err(Error::type_conversion(value.clone(), ty)),
        },
        _ => return Err(Error::type_conversion(value.clone(), ty)),
    };

    Ok(Value::String(datetime.strftime(format).to_string()))
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` and `YYYY-MM-DDTHH:MM:SS`.
fn parse_civil(text: &str) -> Option<DateTime> {
    let text = text.trim();

    if let Ok(datetime) = text.replacen(' ', "T", 1).parse::<DateTime>() {
        return Some(datetime);
    }

    text.parse::<Date>()
        .ok()
        .map(|date| date.to_datetime(Time::midnight()))
}

fn unix_seconds(datetime: DateTime) -> Result<i64> {
    Ok(datetime.to_zoned(TimeZone::UTC)?.timestamp().as_second())
}

fn cast_name(cast: Cast) -> &'static str {
    match cast {
        Cast::Date => "Date",
        Cast::Time => "Time",
        _ => cast.as_str(),
    }
}
