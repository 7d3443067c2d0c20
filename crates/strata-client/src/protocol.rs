//! ClickHouse `JSONCompact` wire format.
//!
//! Queries are sent with `FORMAT JSONCompact`; the response carries the
//! declared column names and types under `meta` and the rows as arrays
//! under `data`.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value as Json;
use strata_frame::{ColumnType, TypeKind, Value};

use crate::error::{ClientError, MaterializeError};
use crate::stream::ResultStream;

#[derive(Debug, Deserialize)]
struct Meta {
    name: String,
    #[serde(rename = "type")]
    column_type: String,
}

#[derive(Debug, Deserialize)]
struct CompactResponse {
    meta: Vec<Meta>,
    #[serde(default)]
    data: Vec<Vec<Json>>,
}

/// Parse a `FORMAT JSONCompact` response body into a result stream.
pub(crate) fn parse_response(body: &str) -> Result<ResultStream, ClientError> {
    let response: CompactResponse = serde_json::from_str(body)
        .map_err(|e| ClientError::connection(format!("malformed response body: {e}")))?;

    let mut columns = Vec::with_capacity(response.meta.len());
    for meta in response.meta {
        let column_type = parse_column_type(&meta.column_type)
            .ok_or_else(|| MaterializeError::UnsupportedColumnType(meta.column_type.clone()))?;
        columns.push((meta.name, column_type));
    }
    Ok(ResultStream::from_rows(columns, response.data))
}

/// Parse a declared ClickHouse type string, e.g. `Nullable(Int64)` or
/// `LowCardinality(String)`. `None` when the type has no representation
/// in [`strata_frame`].
pub(crate) fn parse_column_type(declared: &str) -> Option<ColumnType> {
    let mut inner = declared.trim();
    let mut nullable = false;
    loop {
        if let Some(rest) = strip_wrapper(inner, "Nullable") {
            nullable = true;
            inner = rest;
        } else if let Some(rest) = strip_wrapper(inner, "LowCardinality") {
            inner = rest;
        } else {
            break;
        }
    }

    let kind = if let Some(kind) = TypeKind::parse(inner) {
        kind
    } else if inner.starts_with("DateTime64(") || inner.starts_with("DateTime(") {
        TypeKind::DateTime
    } else if inner.starts_with("FixedString(") {
        TypeKind::Text
    } else {
        return None;
    };
    Some(ColumnType { kind, nullable })
}

fn strip_wrapper<'a>(s: &'a str, wrapper: &str) -> Option<&'a str> {
    s.strip_prefix(wrapper)?
        .strip_prefix('(')?
        .strip_suffix(')')
}

/// Decode one JSON cell as `column_type`. `None` when the value does not
/// fit the declared type.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn decode_value(column_type: &ColumnType, cell: &Json) -> Option<Value> {
    if cell.is_null() {
        return column_type.nullable.then_some(Value::Null);
    }
    match column_type.kind {
        TypeKind::UInt8 => as_u64(cell)
            .and_then(|v| u8::try_from(v).ok())
            .map(Value::UInt8),
        TypeKind::UInt16 => as_u64(cell)
            .and_then(|v| u16::try_from(v).ok())
            .map(Value::UInt16),
        TypeKind::UInt32 => as_u64(cell)
            .and_then(|v| u32::try_from(v).ok())
            .map(Value::UInt32),
        TypeKind::UInt64 => as_u64(cell).map(Value::UInt64),
        TypeKind::Int8 => as_i64(cell)
            .and_then(|v| i8::try_from(v).ok())
            .map(Value::Int8),
        TypeKind::Int16 => as_i64(cell)
            .and_then(|v| i16::try_from(v).ok())
            .map(Value::Int16),
        TypeKind::Int32 => as_i64(cell)
            .and_then(|v| i32::try_from(v).ok())
            .map(Value::Int32),
        TypeKind::Int64 => as_i64(cell).map(Value::Int64),
        TypeKind::Float32 => cell.as_f64().map(|v| Value::Float32(v as f32)),
        TypeKind::Float64 => cell.as_f64().map(Value::Float64),
        TypeKind::Text => cell.as_str().map(|s| Value::Text(s.to_string())),
        TypeKind::Date => cell
            .as_str()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
            .map(Value::Date),
        TypeKind::DateTime => cell.as_str().and_then(parse_datetime).map(Value::DateTime),
    }
}

// 64-bit integers may arrive quoted, depending on the server's
// output_format_json_quote_64bit_integers setting.
fn as_u64(cell: &Json) -> Option<u64> {
    cell.as_u64()
        .or_else(|| cell.as_str().and_then(|s| s.parse().ok()))
}

fn as_i64(cell: &Json) -> Option<i64> {
    cell.as_i64()
        .or_else(|| cell.as_str().and_then(|s| s.parse().ok()))
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}
