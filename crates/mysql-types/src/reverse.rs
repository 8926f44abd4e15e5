//! Reverse conversion: MySQL rows → `Row`
//!
//! Raw mapping only. Values come back as the driver reports them, with no
//! schema-driven reconstruction (decimals stay text, booleans stay integers,
//! JSON columns stay text); that is left to whoever consumes the rows.

use chrono::{NaiveDate, NaiveTime};
use mysql_async::consts::ColumnType;
use mysql_async::Value as MySqlValue;
use norm_core::{Row, Value};

/// Map one result row to a `Row`, keyed by column name.
pub fn row_from_mysql(row: &mysql_async::Row) -> Row {
    row.columns_ref()
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let value = row
                .as_ref(i)
                .map(|v| value_from_mysql(v, column.column_type()))
                .unwrap_or(Value::Null);
            (column.name_str().into_owned(), value)
        })
        .collect()
}

/// Map one raw value. `column_type` only decides DATE vs DATETIME.
pub fn value_from_mysql(value: &MySqlValue, column_type: ColumnType) -> Value {
    match value {
        MySqlValue::NULL => Value::Null,
        MySqlValue::Int(i) => Value::Int(*i),
        MySqlValue::UInt(u) => Value::UInt(*u),
        MySqlValue::Float(f) => Value::Float(*f as f64),
        MySqlValue::Double(f) => Value::Float(*f),
        MySqlValue::Bytes(bytes) => match String::from_utf8(bytes.clone()) {
            Ok(s) => Value::String(s),
            Err(_) => Value::Bytes(bytes.clone()),
        },
        MySqlValue::Date(year, month, day, hour, minute, second, micros) => {
            let Some(date) = NaiveDate::from_ymd_opt(*year as i32, *month as u32, *day as u32)
            else {
                // Zero dates ("0000-00-00") have no calendar equivalent
                return Value::String(format!("{year:04}-{month:02}-{day:02}"));
            };
            if matches!(
                column_type,
                ColumnType::MYSQL_TYPE_DATE | ColumnType::MYSQL_TYPE_NEWDATE
            ) {
                return Value::Date(date);
            }
            date.and_hms_micro_opt(*hour as u32, *minute as u32, *second as u32, *micros)
                .map(Value::DateTime)
                .unwrap_or(Value::Date(date))
        }
        MySqlValue::Time(negative, days, hours, minutes, seconds, micros) => {
            if !*negative && *days == 0 {
                if let Some(t) = NaiveTime::from_hms_micro_opt(
                    *hours as u32,
                    *minutes as u32,
                    *seconds as u32,
                    *micros,
                ) {
                    return Value::Time(t);
                }
            }
            Value::String(format_duration(
                *negative, *days, *hours, *minutes, *seconds, *micros,
            ))
        }
    }
}

/// `[-]HHH:MM:SS[.ffffff]` for TIME values outside a single day.
fn format_duration(
    negative: bool,
    days: u32,
    hours: u8,
    minutes: u8,
    seconds: u8,
    micros: u32,
) -> String {
    let sign = if negative { "-" } else { "" };
    let total_hours = days as u64 * 24 + hours as u64;
    if micros > 0 {
        format!("{sign}{total_hours:02}:{minutes:02}:{seconds:02}.{micros:06}")
    } else {
        format!("{sign}{total_hours:02}:{minutes:02}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_values() {
        assert_eq!(
            value_from_mysql(&MySqlValue::Int(-3), ColumnType::MYSQL_TYPE_LONG),
            Value::Int(-3)
        );
        assert_eq!(
            value_from_mysql(&MySqlValue::UInt(3), ColumnType::MYSQL_TYPE_LONGLONG),
            Value::UInt(3)
        );
        assert_eq!(
            value_from_mysql(&MySqlValue::Double(12.34), ColumnType::MYSQL_TYPE_DOUBLE),
            Value::Float(12.34)
        );
        assert_eq!(
            value_from_mysql(&MySqlValue::Float(0.5), ColumnType::MYSQL_TYPE_FLOAT),
            Value::Float(0.5)
        );
    }

    #[test]
    fn test_bytes_stay_raw() {
        assert_eq!(
            value_from_mysql(
                &MySqlValue::Bytes(b"123.456".to_vec()),
                ColumnType::MYSQL_TYPE_NEWDECIMAL
            ),
            Value::from("123.456")
        );
        assert_eq!(
            value_from_mysql(
                &MySqlValue::Bytes(br#"{"foo":"bar"}"#.to_vec()),
                ColumnType::MYSQL_TYPE_BLOB
            ),
            Value::from(r#"{"foo":"bar"}"#)
        );
        assert_eq!(
            value_from_mysql(
                &MySqlValue::Bytes(vec![0xff, 0xfe]),
                ColumnType::MYSQL_TYPE_BLOB
            ),
            Value::Bytes(vec![0xff, 0xfe])
        );
    }

    #[test]
    fn test_date_columns() {
        let raw = MySqlValue::Date(2018, 11, 21, 0, 0, 0, 0);
        assert_eq!(
            value_from_mysql(&raw, ColumnType::MYSQL_TYPE_DATE),
            Value::Date(NaiveDate::from_ymd_opt(2018, 11, 21).unwrap())
        );
        assert_eq!(
            value_from_mysql(&raw, ColumnType::MYSQL_TYPE_DATETIME),
            Value::DateTime(
                NaiveDate::from_ymd_opt(2018, 11, 21)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
            )
        );
    }

    #[test]
    fn test_zero_date() {
        let raw = MySqlValue::Date(0, 0, 0, 0, 0, 0, 0);
        assert_eq!(
            value_from_mysql(&raw, ColumnType::MYSQL_TYPE_DATETIME),
            Value::from("0000-00-00")
        );
    }

    #[test]
    fn test_time_values() {
        assert_eq!(
            value_from_mysql(
                &MySqlValue::Time(false, 0, 10, 30, 0, 0),
                ColumnType::MYSQL_TYPE_TIME
            ),
            Value::Time(NaiveTime::from_hms_opt(10, 30, 0).unwrap())
        );
        assert_eq!(
            value_from_mysql(
                &MySqlValue::Time(true, 1, 2, 3, 4, 0),
                ColumnType::MYSQL_TYPE_TIME
            ),
            Value::from("-26:03:04")
        );
        assert_eq!(
            value_from_mysql(
                &MySqlValue::Time(false, 2, 0, 0, 0, 500),
                ColumnType::MYSQL_TYPE_TIME
            ),
            Value::from("48:00:00.000500")
        );
    }
}
