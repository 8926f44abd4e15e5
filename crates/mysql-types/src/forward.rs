//! Forward conversion: `Value` → MySQL parameter
//!
//! This is the write-path codec. Every application value has exactly one
//! parameter form:
//!
//! - `Null` binds SQL NULL
//! - temporal values bind through the driver's native DATE/TIME encoding,
//!   except years the encoding cannot carry, which bind as text
//! - `Custom` values are reduced through their canonical hook first
//! - arrays and objects bind as JSON text
//! - every other scalar binds as itself
//!
//! Nothing is parsed back here; reading is left to whoever consumes the rows.

use chrono::{Datelike, Timelike};
use mysql_async::Value as MySqlValue;
use norm_core::Value;

/// Map an application value to a bound parameter.
pub fn serialize(value: &Value) -> MySqlValue {
    match value {
        Value::Null => MySqlValue::NULL,

        Value::Bool(b) => MySqlValue::Int(i64::from(*b)),
        Value::Int(i) => MySqlValue::Int(*i),
        Value::UInt(u) => MySqlValue::UInt(*u),
        Value::Float(f) => MySqlValue::Double(*f),
        Value::String(s) => MySqlValue::Bytes(s.as_bytes().to_vec()),
        Value::Bytes(b) => MySqlValue::Bytes(b.clone()),

        Value::Date(d) => match binary_year(d.year()) {
            Some(year) => MySqlValue::Date(year, d.month() as u8, d.day() as u8, 0, 0, 0, 0),
            None => text(d.to_string()),
        },
        Value::DateTime(dt) => match binary_year(dt.year()) {
            Some(year) => MySqlValue::Date(
                year,
                dt.month() as u8,
                dt.day() as u8,
                dt.hour() as u8,
                dt.minute() as u8,
                dt.second() as u8,
                micros(dt.nanosecond()),
            ),
            None => text(dt.to_string()),
        },
        Value::Time(t) => MySqlValue::Time(
            false, // not negative
            0,     // days
            t.hour() as u8,
            t.minute() as u8,
            t.second() as u8,
            micros(t.nanosecond()),
        ),

        Value::Custom(hook) => serialize(&hook.to_canonical()),

        Value::Array(_) | Value::Object(_) => {
            MySqlValue::Bytes(value.to_json().to_string().into_bytes())
        }
    }
}

/// Years the binary DATE encoding can carry; anything else binds as text.
fn binary_year(year: i32) -> Option<u16> {
    (0..=9999).contains(&year).then_some(year as u16)
}

/// MySQL uses microseconds. A leap second (nanos past one second) is capped.
fn micros(nanos: u32) -> u32 {
    (nanos / 1000).min(999_999)
}

fn text(s: String) -> MySqlValue {
    MySqlValue::Bytes(s.into_bytes())
}
